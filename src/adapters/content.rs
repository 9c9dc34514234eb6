use crate::config::ContentConfig;
use crate::domain::model::{ContentKey, Shelf, SummaryDocument};
use crate::domain::ports::ContentStore;
use crate::utils::error::{KahinError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

fn read_utf8(path: PathBuf) -> Result<String> {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(KahinError::NotFound { path }),
        Err(e) => {
            return Err(KahinError::ReadError {
                path,
                reason: e.to_string(),
            })
        }
    };

    String::from_utf8(bytes).map_err(|e| KahinError::ReadError {
        path,
        reason: format!("invalid UTF-8: {}", e),
    })
}

/// Reads the markdown fragment for `key` under `base_dir`, trimmed.
pub fn lookup(key: &ContentKey, base_dir: &Path) -> Result<String> {
    let path = base_dir.join(key.markdown_file());
    tracing::debug!("Reading content from {}", path.display());
    Ok(read_utf8(path)?.trim().to_string())
}

/// Reads the structured JSON companion for `key` under `base_dir`.
pub fn lookup_summary(key: &ContentKey, base_dir: &Path) -> Result<SummaryDocument> {
    let path = base_dir.join(key.json_file());
    tracing::debug!("Reading summary from {}", path.display());
    let raw = read_utf8(path.clone())?;
    serde_json::from_str(&raw).map_err(|e| KahinError::ReadError {
        path,
        reason: format!("malformed summary JSON: {}", e),
    })
}

#[derive(Debug, Clone)]
pub struct LocalContentStore {
    config: ContentConfig,
}

impl LocalContentStore {
    pub fn new(config: ContentConfig) -> Self {
        Self { config }
    }
}

impl ContentStore for LocalContentStore {
    fn lookup(&self, shelf: Shelf, key: &ContentKey) -> Result<String> {
        lookup(key, &self.config.shelf_dir(shelf))
    }

    fn lookup_summary(&self, shelf: Shelf, key: &ContentKey) -> Result<SummaryDocument> {
        lookup_summary(key, &self.config.shelf_dir(shelf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LifePath, SummarySection};
    use tempfile::TempDir;

    const LIFE_PATH: ContentKey = ContentKey::LifePath(LifePath {
        raw_sum: 15,
        reduced: 6,
    });

    #[test]
    fn test_lookup_returns_trimmed_text() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("15_6.md"), "\n\n# Başlık\nİçerik\n  \n").unwrap();
        assert_eq!(lookup(&LIFE_PATH, dir.path()).unwrap(), "# Başlık\nİçerik");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = lookup(&ContentKey::Enneagram(4), dir.path()).unwrap_err();
        assert!(matches!(err, KahinError::NotFound { path } if path.ends_with("4.md")));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("1_4.md"), [0xff, 0xfe, 0x00]).unwrap();
        let err = lookup(&ContentKey::PinDigit { position: 1, digit: 4 }, dir.path()).unwrap_err();
        assert!(matches!(err, KahinError::ReadError { .. }));
    }

    #[test]
    fn test_directory_in_place_of_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("3.md")).unwrap();
        let err = lookup(&ContentKey::Enneagram(3), dir.path()).unwrap_err();
        assert!(matches!(err, KahinError::ReadError { .. }));
    }

    #[test]
    fn test_summary_keeps_group_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("15_6.json"),
            r#"{"key_traits": ["Yaratıcı"], "health": {"positive": ["a"], "negative": [], "advice": ["b"]}}"#,
        )
        .unwrap();

        let doc = lookup_summary(&LIFE_PATH, dir.path()).unwrap();
        assert_eq!(
            doc.get("key_traits"),
            Some(&SummarySection::Bullets(vec!["Yaratıcı".to_string()]))
        );
        match doc.get("health") {
            Some(SummarySection::Groups(groups)) => {
                let keys: Vec<_> = groups.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["positive", "negative", "advice"]);
            }
            other => panic!("unexpected health section: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_summary_is_read_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("15_6.json"), "{not json").unwrap();
        assert!(matches!(
            lookup_summary(&LIFE_PATH, dir.path()),
            Err(KahinError::ReadError { .. })
        ));
    }

    #[test]
    fn test_store_resolves_shelves() {
        let dir = TempDir::new().unwrap();
        let shelf = dir.path().join("enneagrams");
        std::fs::create_dir_all(&shelf).unwrap();
        std::fs::write(shelf.join("8.md"), "Meydan okuyan").unwrap();

        let store = LocalContentStore::new(ContentConfig::with_data_dir(dir.path()));
        assert_eq!(
            store.lookup(Shelf::Enneagrams, &ContentKey::Enneagram(8)).unwrap(),
            "Meydan okuyan"
        );
        assert!(matches!(
            store.lookup(Shelf::MillmanFull, &LIFE_PATH),
            Err(KahinError::NotFound { .. })
        ));
    }
}
