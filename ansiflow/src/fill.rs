use std::fmt;
use std::io::{self, Write};

type FillFn = dyn FnMut(&mut dyn Write) -> io::Result<()> + Send;

/// What to emit for each synthetic unit of padding or indentation.
pub enum Fill {
    /// Write the codepoint once per unit.
    Char(char),
    /// Call the closure once per unit.
    With(Box<FillFn>),
}

impl Fill {
    pub fn with<F>(f: F) -> Self
    where
        F: FnMut(&mut dyn Write) -> io::Result<()> + Send + 'static,
    {
        Self::With(Box::new(f))
    }

    /// Emit `units` fill units into `out`.
    pub(crate) fn emit(
        &mut self,
        out: &mut dyn Write,
        units: usize,
    ) -> io::Result<()> {
        match self {
            Self::Char(c) => {
                let mut buf = [0; 4];
                let encoded = c.encode_utf8(&mut buf).as_bytes();
                for _ in 0..units {
                    out.write_all(encoded)?;
                }
            },
            Self::With(f) => {
                for _ in 0..units {
                    f(&mut *out)?;
                }
            },
        }
        Ok(())
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::Char(' ')
    }
}

impl From<char> for Fill {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl fmt::Debug for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}
