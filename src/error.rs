//! Error types for protodoc operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a protocol tree or rendering it.
///
/// Every variant is fatal for a generation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{location}: missing required key `{key}`")]
    Schema {
        location: String,
        key: &'static str,
    },

    #[error("{location}: packet `{id}` was referenced but never loaded")]
    UnresolvedPacket { location: String, id: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Parse {
            path: PathBuf::from("doc/ping.json"),
            source,
        };
        assert!(err.to_string().starts_with("doc/ping.json: "));
    }

    #[test]
    fn test_schema_error_names_location() {
        let err = Error::Schema {
            location: "kdeconnect.ping.body".to_string(),
            key: "type",
        };
        assert_eq!(
            err.to_string(),
            "kdeconnect.ping.body: missing required key `type`"
        );
    }

    #[test]
    fn test_utf8_error_converts() {
        fn decode(bytes: Vec<u8>) -> Result<String> {
            Ok(String::from_utf8(bytes)?)
        }
        let err = decode(vec![b'#', 0xff]).unwrap_err();
        assert!(matches!(err, Error::Utf8(_)));
    }
}
