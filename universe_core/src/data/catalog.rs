//! Catalog JSON loading.

use std::collections::HashSet;
use std::path::Path;

use crate::data::model::Resource;
use crate::error::CatalogError;

/// Reads a JSON array of resources from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<Resource>, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let resources: Vec<Resource> =
        serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate_ids(&resources)?;
    Ok(resources)
}

/// Ids key the layout tables, so they must be unique.
pub fn validate_ids(resources: &[Resource]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(resources.len());
    for resource in resources {
        if !seen.insert(resource.id) {
            return Err(CatalogError::DuplicateId(resource.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("orrery-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_valid_catalog() {
        let path = write_temp(
            "valid.json",
            r#"[
                { "id": 1, "name": "serde", "category": "Serialization", "score": 9.8 },
                { "id": 2, "name": "tokio", "category": "Async", "score": 9.6 }
            ]"#,
        );
        let resources = load_catalog(&path).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[1].category, "Async");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let path = write_temp(
            "dupes.json",
            r#"[
                { "id": 3, "name": "a", "category": "x" },
                { "id": 3, "name": "b", "category": "y" }
            ]"#,
        );
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(3)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let path = write_temp("broken.json", "[{ \"id\": ");
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
