use std::path::Path;

use serde::Deserialize;

use crate::error::{TickerError, TickerResult};
use crate::store::FileStore;

#[derive(Deserialize)]
struct CredentialsFile {
    api_key: String,
}

/// Reads the operator-maintained credentials file and returns its `api_key`.
/// The key format is not checked.
pub fn load_api_key(files: &dyn FileStore, path: &Path) -> TickerResult<String> {
    let raw = files
        .read_to_string(path)
        .map_err(|e| TickerError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let creds: CredentialsFile =
        serde_json::from_str(&raw).map_err(|e| TickerError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(creds.api_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const PATH: &str = "/home/op/.config/simmer/credentials.json";

    #[test]
    fn extracts_api_key() {
        let store =
            MemoryStore::default().with_file(PATH, r#"{"api_key":"sk_live_123","agent":"x"}"#);
        let key = load_api_key(&store, Path::new(PATH)).unwrap();
        assert_eq!(key, "sk_live_123");
    }

    #[test]
    fn missing_file_is_a_credentials_error() {
        let store = MemoryStore::default();
        let err = load_api_key(&store, Path::new(PATH)).unwrap_err();
        assert!(matches!(err, TickerError::Credentials { .. }), "{err}");
        assert!(err.to_string().contains(PATH));
    }

    #[test]
    fn malformed_json_is_a_credentials_error() {
        let store = MemoryStore::default().with_file(PATH, "api_key = nope");
        let err = load_api_key(&store, Path::new(PATH)).unwrap_err();
        assert!(matches!(err, TickerError::Credentials { .. }), "{err}");
    }

    #[test]
    fn non_string_key_is_rejected() {
        let store = MemoryStore::default().with_file(PATH, r#"{"api_key":42}"#);
        assert!(load_api_key(&store, Path::new(PATH)).is_err());
    }
}
