//! Loading schema snapshots and entry counts from disk.
//!
//! The on-disk formats are the camelCase JSON payloads the introspection
//! layer exports: a [`SchemaDocument`] for the type system and a flat
//! name-to-counts map for content volume.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::errors::{AuditError, Result};
use crate::core::schema::{EntryCounts, Schema, SchemaDocument};

/// Load a schema snapshot from a JSON file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AuditError::io(format!("reading schema file {}", path.display()), e))?;
    let document: SchemaDocument = serde_json::from_str(&raw)?;
    let schema = Schema::from(document);
    debug!(
        path = %path.display(),
        models = schema.model_count(),
        components = schema.component_count(),
        enums = schema.enum_count(),
        "loaded schema snapshot"
    );
    Ok(schema)
}

/// Load per-model entry counts from a JSON file.
pub fn load_counts(path: &Path) -> Result<EntryCounts> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AuditError::io(format!("reading counts file {}", path.display()), e))?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn schema_snapshot_loads_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "models": [{{
                    "name": "Article",
                    "fields": [
                        {{"name": "title", "typeName": "String"}},
                        {{"name": "author", "typeName": "Author", "relatedModel": "Author"}}
                    ]
                }}],
                "enums": [{{"name": "Status", "values": ["DRAFT", "PUBLISHED"]}}]
            }}"#
        )
        .unwrap();
        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.model_count(), 1);
        assert_eq!(schema.enum_count(), 1);
    }

    #[test]
    fn counts_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Article": {{"draftCount": 2, "publishedCount": 40}}}}"#
        )
        .unwrap();
        let counts = load_counts(file.path()).unwrap();
        assert_eq!(counts.total("Article"), 42);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_schema(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, AuditError::Io { .. }));
    }
}
