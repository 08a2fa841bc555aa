// 📂 Data Loader - one JSON file per language
// Boundary collaborator: the controller decides what a failure means

use crate::language::Language;
use crate::record::BeachRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read beach data {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse beach data {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where beach records come from
pub trait DataSource: Send + Sync {
    fn load(&self, language: Language) -> Result<Vec<BeachRecord>, LoadError>;
}

/// Parse a JSON array of records
pub fn parse_records(json: &str) -> Result<Vec<BeachRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// FILE SOURCE
// ============================================================================

/// Reads `beaches.json` / `beaches_ja.json` from a directory
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        FileSource {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, language: Language) -> PathBuf {
        self.data_dir.join(language.data_file_name())
    }
}

impl DataSource for FileSource {
    fn load(&self, language: Language) -> Result<Vec<BeachRecord>, LoadError> {
        let path = self.path_for(language);

        let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        parse_records(&content).map_err(|source| LoadError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ONE_BEACH: &str = r#"[
        {"name":"美らSUNビーチ","address":"豊見城市豊崎5-1","open_time":"9:00-18:00",
         "has_lifeguard":true,"has_shower":true,"is_free":true,"note":"","extra":1}
    ]"#;

    #[test]
    fn test_loads_language_specific_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("beaches_ja.json"), ONE_BEACH).unwrap();
        fs::write(dir.path().join("beaches.json"), "[]").unwrap();

        let source = FileSource::new(dir.path());
        let ja = source.load(Language::Ja).unwrap();
        assert_eq!(ja.len(), 1);
        assert_eq!(ja[0].name, "美らSUNビーチ");
        assert!(source.load(Language::Zh).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path()).load(Language::Zh).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("beaches.json"), r#"[{"name":"A"}]"#).unwrap();

        let err = FileSource::new(dir.path()).load(Language::Zh).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_bundled_data_parses() {
        let source = FileSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let zh = source.load(Language::Zh).unwrap();
        let ja = source.load(Language::Ja).unwrap();
        assert!(!zh.is_empty());
        assert_eq!(zh.len(), ja.len());
    }

    #[test]
    fn test_order_is_preserved() {
        let json = r#"[
            {"name":"B","address":"","open_time":"","has_lifeguard":false,"has_shower":false,"is_free":false,"note":""},
            {"name":"A","address":"","open_time":"","has_lifeguard":false,"has_shower":false,"is_free":false,"note":""}
        ]"#;
        let names: Vec<_> = parse_records(json).unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
