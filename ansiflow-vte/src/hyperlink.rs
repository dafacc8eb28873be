/// Typed view over an OSC 8 hyperlink command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Value of the `id=` key from the metadata parameter, if any.
    pub id: Option<String>,
    /// Target URI of the hyperlink.
    pub uri: String,
}

impl Hyperlink {
    pub fn new<T: ToString>(id: Option<T>, uri: T) -> Self {
        Self {
            id: id.map(|id| id.to_string()),
            uri: uri.to_string(),
        }
    }

    /// Build a hyperlink from the raw OSC 8 parameters.
    ///
    /// `metadata` is the colon-separated `key=value` block, `uri` the
    /// target. Returns `None` for an empty URI, which closes a link.
    pub fn from_params(metadata: &[u8], uri: &[u8]) -> Option<Self> {
        if uri.is_empty() {
            return None;
        }

        let id = metadata
            .split(|&b| b == b':')
            .find_map(|kv| kv.strip_prefix(b"id="))
            .filter(|id| !id.is_empty())
            .map(|id| String::from_utf8_lossy(id).into_owned());

        Some(Self {
            id,
            uri: String::from_utf8_lossy(uri).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_from_metadata() {
        let link =
            Hyperlink::from_params(b"foo=bar:id=42", b"https://example.com")
                .unwrap();
        assert_eq!(link, Hyperlink::new(Some("42"), "https://example.com"));
    }

    #[test]
    fn metadata_without_id() {
        let link = Hyperlink::from_params(b"", b"file:///tmp").unwrap();
        assert_eq!(link.id, None);
        assert_eq!(link.uri, "file:///tmp");
    }

    #[test]
    fn empty_uri_closes() {
        assert!(Hyperlink::from_params(b"id=1", b"").is_none());
    }
}
