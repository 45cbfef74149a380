//! Archive file: a [`ResultStore`] persisted as pretty JSON.

use std::path::Path;

use anyhow::Context;
use codebook_core::ResultStore;
use tracing::info;

/// Load the archive at `path`, or an empty store if the file does not exist yet.
pub fn load(path: &Path) -> anyhow::Result<ResultStore> {
    if !path.exists() {
        return Ok(ResultStore::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading archive {}", path.display()))?;
    let store = ResultStore::from_json(&json)
        .with_context(|| format!("parsing archive {}", path.display()))?;
    info!(path = %path.display(), entries = store.entries().len(), "loaded archive");
    Ok(store)
}

pub fn save(path: &Path, store: &ResultStore) -> anyhow::Result<()> {
    let json = store.to_json()?;
    std::fs::write(path, json).with_context(|| format!("writing archive {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use codebook_core::ClassificationResult;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("archive.json")).unwrap();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.json");

        let mut store = ResultStore::new();
        store.record("maria", ClassificationResult::failure("boom"));
        store.archive("maria", "Maria", Utc::now()).unwrap();
        save(&path, &store).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.entries(), store.entries());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.json");
        std::fs::write(&path, "not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("parsing archive"));
    }
}
