//! Loading and saving the anime metadata file
//!
//! The file is a JSON array of objects. Records are kept as raw JSON maps so
//! that every field, including the ones no transform touches, survives a
//! load/save cycle with its key order intact.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// One anime entry, field name to value.
pub type Record = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize records for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: root is not a JSON array")]
    NotAnArray { path: PathBuf },

    #[error("{path}: element {index} is not a JSON object")]
    NotAnObject { path: PathBuf, index: usize },
}

impl DatasetError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// Read the whole file and split it into records.
pub fn load(path: &Path) -> Result<Vec<Record>, DatasetError> {
    let contents = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
    parse_records(path, &contents)
}

fn parse_records(path: &Path, contents: &str) -> Result<Vec<Record>, DatasetError> {
    let root: Value = serde_json::from_str(contents).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = root else {
        return Err(DatasetError::NotAnArray { path: path.to_path_buf() });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(DatasetError::NotAnObject { path: path.to_path_buf(), index }),
        })
        .collect()
}

/// Render records the way they are stored on disk: pretty printed with the
/// configured indent, non-ASCII left as is.
pub fn to_json_string(records: &[Record], config: &Config) -> Result<String, serde_json::Error> {
    let indent = config.indent_bytes();
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    records.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Overwrite the file at `path` with `records`.
///
/// The file is rewritten in place, so its mode and any symlink pointing at it
/// are kept. A file marked read-only is refused even when the process could
/// write it anyway.
pub fn save(path: &Path, records: &[Record], config: &Config) -> Result<(), DatasetError> {
    let json = to_json_string(records, config).map_err(|source| DatasetError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    if let Ok(metadata) = fs::metadata(path) {
        if metadata.permissions().readonly() {
            let err = io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only");
            return Err(DatasetError::io(path, err));
        }
    }

    fs::write(path, &json).map_err(|e| DatasetError::io(path, e))?;

    log::debug!("wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("animedata.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_array_of_objects() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, r#"[{"nombre": "Mushishi", "genero": ["Drama"]}, {}]"#);

        let records = load(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["nombre"], json!("Mushishi"));
        assert!(records[1].is_empty());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "[{\"nombre\": ");
        assert!(matches!(load(&path), Err(DatasetError::Parse { .. })));
    }

    #[test]
    fn test_load_rejects_non_array_root() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, r#"{"nombre": "Mushishi"}"#);
        assert!(matches!(load(&path), Err(DatasetError::NotAnArray { .. })));
    }

    #[test]
    fn test_load_rejects_non_object_element() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, r#"[{}, 3]"#);
        match load(&path) {
            Err(DatasetError::NotAnObject { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(load(&path), Err(DatasetError::Io { .. })));
    }

    #[test]
    fn test_save_keeps_key_order_and_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, r#"[{"nombre": "Shingeki", "año_debut": "2013", "estudio": "Wit"}]"#);

        let records = load(&path).unwrap();
        save(&path, &records, &Config::default()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "[\n    {\n        \"nombre\": \"Shingeki\",\n        \"año_debut\": \"2013\",\n        \"estudio\": \"Wit\"\n    }\n]"
        );
    }

    #[test]
    fn test_save_keeps_integers_beyond_64_bits() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, r#"[{"id": 123456789012345678901234567890, "puntuacion": 8.50}]"#);

        let records = load(&path).unwrap();
        save(&path, &records, &Config::default()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"id\": 123456789012345678901234567890"));
        assert!(written.contains("\"puntuacion\": 8.50"));
    }

    #[test]
    fn test_save_to_read_only_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "[]");
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        let result = save(&path, &[], &Config::default());
        assert!(matches!(result, Err(DatasetError::Io { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_mode_and_symlink() {
        use std::os::unix::fs::{symlink, PermissionsExt};

        let dir = TempDir::new().unwrap();
        let target = write_fixture(&dir, r#"[{"estudio": "Bones"}]"#);
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();
        let link = dir.path().join("link.json");
        symlink(&target, &link).unwrap();

        let records = load(&link).unwrap();
        save(&link, &records, &Config::default()).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert!(fs::read_to_string(&target).unwrap().contains("\"estudio\": \"Bones\""));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("animedata.json");
        let result = save(&path, &[], &Config::default());
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
