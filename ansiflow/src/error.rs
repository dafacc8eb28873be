use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors surfaced by the text transformations.
///
/// Malformed escape sequences are never an error: they are passed through.
#[derive(Debug, Error)]
pub enum Error {
    #[error("output sink error: {0}")]
    Sink(#[from] io::Error),

    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Sink(err) => err,
            other => io::Error::other(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// The `*_str` and `*_bytes` helpers write into a `Vec`, which never fails,
// and every transformer emits whole input codepoints plus ASCII, so UTF-8
// input yields UTF-8 output.
pub(crate) const INFALLIBLE_STR: &str = "UTF-8 text written into a Vec stays UTF-8";
pub(crate) const INFALLIBLE_BYTES: &str = "writing into a Vec cannot fail";
