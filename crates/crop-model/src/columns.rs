use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crop_core::schema::CategoricalFieldSet;

use crate::error::{ArtifactError, ArtifactKind};

/// Load the categorical column list, a JSON array of field names.
///
/// # Errors
///
/// Returns [`ArtifactError::Missing`] / [`ArtifactError::Unreadable`] for I/O
/// failures and [`ArtifactError::Malformed`] if the file is not an array of
/// distinct, non-blank names.
pub fn load_categorical_columns(path: impl AsRef<Path>) -> Result<CategoricalFieldSet, ArtifactError> {
    let path = path.as_ref();
    let malformed = |reason: String| ArtifactError::Malformed {
        kind: ArtifactKind::CategoricalColumns,
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| {
        ArtifactError::from_io(ArtifactKind::CategoricalColumns, path.to_path_buf(), e)
    })?;
    let fields: Vec<String> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| malformed(e.to_string()))?;

    CategoricalFieldSet::new(fields).map_err(|e| malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SAMPLE_COLUMNS_JSON;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("categorical_columns.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_fields_in_file_order() {
        let (_dir, path) = write(SAMPLE_COLUMNS_JSON);
        let fields = load_categorical_columns(&path).unwrap();
        assert_eq!(
            fields.iter().collect::<Vec<_>>(),
            vec!["State", "District", "Crop", "Season"]
        );
    }

    #[test]
    fn duplicate_fields_are_malformed() {
        let (_dir, path) = write(r#"["Crop", "Crop"]"#);
        let err = load_categorical_columns(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Malformed { .. }));
    }

    #[test]
    fn non_array_is_malformed() {
        let (_dir, path) = write(r#"{"columns": ["Crop"]}"#);
        let err = load_categorical_columns(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Malformed { .. }));
        assert_eq!(err.kind(), ArtifactKind::CategoricalColumns);
    }

    #[test]
    fn absent_file_is_missing() {
        let dir = TempDir::new().unwrap();
        let err = load_categorical_columns(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
    }
}
