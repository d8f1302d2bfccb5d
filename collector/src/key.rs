//! Loading the YouTube Data API key.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// A YouTube Data API v3 key.
///
/// The key is sent as the `key` query parameter of every request. Its `Debug`
/// output is redacted so that it never ends up in `tracing` spans.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Reads the key from the first line of `path`.
pub fn load_api_key(path: impl AsRef<Path>) -> Result<ApiKey> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("cannot read API key file {}: {e}", path.display()))
    })?;

    let key = content.lines().next().unwrap_or_default().trim();
    if key.is_empty() {
        return Err(Error::Config(format!(
            "API key file {} is empty",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), "loaded API key");
    Ok(ApiKey::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn reads_first_line_trimmed() {
        let file = key_file("  AIzaSyExample \r\nsecond line is ignored\n");
        let key = load_api_key(file.path()).unwrap();
        assert_eq!(key.expose(), "AIzaSyExample");
    }

    #[test]
    fn empty_file_is_config_error() {
        let file = key_file("   \n");
        let err = load_api_key(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_api_key(dir.path().join("api_key.txt")).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{err:?}");
    }

    #[test]
    fn debug_does_not_leak_key() {
        let key = ApiKey::new("AIzaSyExample");
        assert!(!format!("{key:?}").contains("AIza"));
    }
}
