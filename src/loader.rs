// Data Loader
// Normalizes a local file or a remote endpoint into one Dataset shape

use crate::entry::Dataset;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Loader failure taxonomy
///
/// `Load` is a transport/file failure; `Parse` is a successful transport
/// whose payload is malformed. Both are terminal for the current cycle:
/// no retries, no partial datasets.
#[derive(Debug, Error)]
pub enum WebringError {
    #[error("Failed to load webring: {0}")]
    Load(String),

    #[error("Invalid response from server: {0}")]
    Parse(String),
}

/// Wrapped-response convention used by the proxied endpoint
#[derive(Debug, Deserialize)]
struct WrappedResponse {
    status: String,
    rows: serde_json::Value,
}

/// Where a Dataset comes from
///
/// A `File` source holds a bare JSON array. A `Remote` source may use the
/// wrapped `{status, rows}` convention of the spreadsheet proxy.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Remote { url: String, wrapped: bool },
}

impl Source {
    /// Load and parse the dataset. Suspends on I/O only; parsing is pure.
    pub async fn load(&self) -> Result<Dataset, WebringError> {
        match self {
            Source::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| WebringError::Load(format!("{}: {}", path.display(), e)))?;
                parse_dataset(&text)
            }
            Source::Remote { url, wrapped } => {
                let response = reqwest::get(url)
                    .await
                    .map_err(|e| WebringError::Load(e.to_string()))?;
                if !response.status().is_success() {
                    return Err(WebringError::Load(format!(
                        "server returned {}",
                        response.status()
                    )));
                }
                let text = response
                    .text()
                    .await
                    .map_err(|e| WebringError::Load(e.to_string()))?;
                if *wrapped {
                    parse_wrapped(&text)
                } else {
                    parse_dataset(&text)
                }
            }
        }
    }
}

/// Parse a bare JSON array of entries
pub fn parse_dataset(text: &str) -> Result<Dataset, WebringError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| WebringError::Parse(e.to_string()))?;
    if !value.is_array() {
        return Err(WebringError::Parse("payload is not an array".to_string()));
    }
    serde_json::from_value(value).map_err(|e| WebringError::Parse(e.to_string()))
}

/// Parse a wrapped `{status, rows}` payload
pub fn parse_wrapped(text: &str) -> Result<Dataset, WebringError> {
    let wrapped: WrappedResponse =
        serde_json::from_str(text).map_err(|e| WebringError::Parse(e.to_string()))?;
    if wrapped.status != "ok" {
        return Err(WebringError::Parse(format!(
            "status is {:?}, expected \"ok\"",
            wrapped.status
        )));
    }
    if !wrapped.rows.is_array() {
        return Err(WebringError::Parse("rows is not an array".to_string()));
    }
    serde_json::from_value(wrapped.rows).map_err(|e| WebringError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: &str = r#"[
        {"name": "Ada", "website": "https://ada.example", "year": 2024, "about": "Compilers"},
        {"name": "Grace", "website": "https://grace.example", "year": 2023, "fact": "Debugging"}
    ]"#;

    #[test]
    fn test_parse_bare_array() {
        let dataset = parse_dataset(ROWS).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].name, "Ada");
        // "fact" variant normalized at the boundary
        assert_eq!(dataset[1].about, "Debugging");
    }

    #[test]
    fn test_parse_non_array_is_parse_error() {
        let err = parse_dataset(r#"{"name": "Ada"}"#).unwrap_err();
        assert!(matches!(err, WebringError::Parse(_)));
    }

    #[test]
    fn test_parse_wrapped_ok() {
        let text = format!(r#"{{"status": "ok", "rows": {}}}"#, ROWS);
        let dataset = parse_wrapped(&text).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_parse_wrapped_bad_status() {
        let err = parse_wrapped(r#"{"status": "error", "rows": []}"#).unwrap_err();
        assert!(matches!(err, WebringError::Parse(_)));
    }

    #[test]
    fn test_parse_wrapped_rows_not_array() {
        let err = parse_wrapped(r#"{"status": "ok", "rows": 42}"#).unwrap_err();
        assert!(matches!(err, WebringError::Parse(_)));
    }

    #[test]
    fn test_parse_wrapped_not_an_object() {
        let err = parse_wrapped("[]").unwrap_err();
        assert!(matches!(err, WebringError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_file_source() {
        let path = std::env::temp_dir().join("webring_loader_test.json");
        tokio::fs::write(&path, ROWS).await.unwrap();

        let dataset = Source::File(path.clone()).load().await.unwrap();
        assert_eq!(dataset.len(), 2);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_is_load_error() {
        let source = Source::File(PathBuf::from("/nonexistent/webring.json"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, WebringError::Load(_)));
    }
}
