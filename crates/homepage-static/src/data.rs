//! Site data loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Data exposed to templates under the `data` variable.
///
/// No schema is enforced; templates decide which keys they read.
pub type SiteData = Map<String, Value>;

/// Errors that can occur when loading site data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the top level of {0}")]
    NotAnObject(PathBuf),
}

/// Load site data from a JSON file.
///
/// A missing file is not an error: a warning is logged and an empty mapping is
/// returned so the build can proceed without data.
pub fn load_site_data(path: &Path) -> Result<SiteData, DataError> {
    if !path.exists() {
        tracing::warn!("{} not found, using empty data", path.display());
        return Ok(SiteData::new());
    }

    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => {
            tracing::debug!("Loaded {} data keys from {}", map.len(), path.display());
            Ok(map)
        }
        _ => Err(DataError::NotAnObject(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_empty_data() {
        let temp = tempdir().unwrap();

        let data = load_site_data(&temp.path().join("data.json")).unwrap();

        assert!(data.is_empty());
    }

    #[test]
    fn loads_nested_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data.json");
        fs::write(
            &path,
            r#"{"title": "Hello", "links": [{"name": "GitHub"}], "draft": false}"#,
        )
        .unwrap();

        let data = load_site_data(&path).unwrap();

        assert_eq!(data["title"], "Hello");
        assert_eq!(data["links"][0]["name"], "GitHub");
        assert_eq!(data["draft"], false);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, r#"{"title": "#).unwrap();

        let err = load_site_data(&path).unwrap_err();

        assert!(matches!(err, DataError::Parse { .. }));
        assert!(err.to_string().contains("data.json"));
    }

    #[test]
    fn top_level_array_is_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load_site_data(&path).unwrap_err();

        assert!(matches!(err, DataError::NotAnObject(_)));
    }
}
