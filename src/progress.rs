//! Per-user, per-category "last completed word" markers.

use crate::error::SourceError;
use crate::word_source::{CategoryId, UserId, WordId};
use crate::{debug_log, info_log};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vocab-quiz";
const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressMarker {
    pub category_id: CategoryId,
    pub user_id: UserId,
    pub last_word_id: WordId,
    pub updated_at: DateTime<Utc>,
}

/// Directory for files the application writes, e.g. `~/.local/share/vocab-quiz`.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

pub fn default_progress_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(PROGRESS_FILE))
}

/// Marker list, optionally mirrored to a JSON file after every change.
#[derive(Debug, Default)]
pub struct ProgressStore {
    path: Option<PathBuf>,
    markers: Vec<ProgressMarker>,
}

impl ProgressStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads markers from `path`; a missing file means no progress yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let markers = match fs::read_to_string(path) {
            Ok(data) if data.trim().is_empty() => Vec::new(),
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug_log!("No progress file at {}", path.display());
                Vec::new()
            }
            Err(e) => return Err(SourceError::io(path, e)),
        };
        info_log!("Loaded {} progress markers", markers.len());
        Ok(Self {
            path: Some(path.to_path_buf()),
            markers,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn markers(&self) -> &[ProgressMarker] {
        &self.markers
    }

    fn position(&self, category: CategoryId, user: &UserId) -> Option<usize> {
        self.markers
            .iter()
            .position(|m| m.category_id == category && &m.user_id == user)
    }

    pub fn last_completed(&self, category: CategoryId, user: &UserId) -> Option<WordId> {
        self.position(category, user)
            .map(|i| self.markers[i].last_word_id)
    }

    /// Records `word` for the pair; memory only changes once the file write succeeded.
    pub fn set_last_completed(
        &mut self,
        category: CategoryId,
        user: &UserId,
        word: WordId,
    ) -> Result<(), SourceError> {
        let updated_at = Utc::now();
        let mut markers = self.markers.clone();
        match self.position(category, user) {
            Some(i) => {
                markers[i].last_word_id = word;
                markers[i].updated_at = updated_at;
            }
            None => markers.push(ProgressMarker {
                category_id: category,
                user_id: user.clone(),
                last_word_id: word,
                updated_at,
            }),
        }
        self.save(&markers)?;
        self.markers = markers;
        Ok(())
    }

    pub fn delete(&mut self, category: CategoryId, user: &UserId) -> Result<(), SourceError> {
        let Some(i) = self.position(category, user) else {
            return Ok(());
        };
        let mut markers = self.markers.clone();
        markers.remove(i);
        self.save(&markers)?;
        self.markers = markers;
        Ok(())
    }

    fn save(&self, markers: &[ProgressMarker]) -> Result<(), SourceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SourceError::io(parent, e))?;
        }
        let data = serde_json::to_string_pretty(markers)?;
        fs::write(path, data).map_err(|e| SourceError::io(path, e))?;
        debug_log!("Saved {} progress markers to {}", markers.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserId {
        UserId(name.to_string())
    }

    #[test]
    fn test_markers_are_per_user_and_category() {
        let mut store = ProgressStore::in_memory();
        store.set_last_completed(CategoryId(1), &user("ada"), WordId(3)).unwrap();
        store.set_last_completed(CategoryId(2), &user("ada"), WordId(7)).unwrap();
        store.set_last_completed(CategoryId(1), &user("bob"), WordId(4)).unwrap();

        assert_eq!(store.last_completed(CategoryId(1), &user("ada")), Some(WordId(3)));
        assert_eq!(store.last_completed(CategoryId(2), &user("ada")), Some(WordId(7)));
        assert_eq!(store.last_completed(CategoryId(1), &user("bob")), Some(WordId(4)));
        assert_eq!(store.last_completed(CategoryId(2), &user("bob")), None);
    }

    #[test]
    fn test_set_replaces_existing_marker() {
        let mut store = ProgressStore::in_memory();
        store.set_last_completed(CategoryId(1), &user("ada"), WordId(3)).unwrap();
        store.set_last_completed(CategoryId(1), &user("ada"), WordId(4)).unwrap();
        assert_eq!(store.markers().len(), 1);
        assert_eq!(store.last_completed(CategoryId(1), &user("ada")), Some(WordId(4)));
    }

    #[test]
    fn test_delete_missing_marker_is_ok() {
        let mut store = ProgressStore::in_memory();
        store.delete(CategoryId(1), &user("ada")).unwrap();
        assert!(store.markers().is_empty());
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::open(dir.path().join("progress.json")).unwrap();
        assert!(store.markers().is_empty());
    }

    #[test]
    fn test_progress_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");

        let mut store = ProgressStore::open(&path).unwrap();
        store.set_last_completed(CategoryId(2), &user("ada"), WordId(202)).unwrap();
        store.set_last_completed(CategoryId(3), &user("ada"), WordId(301)).unwrap();
        store.delete(CategoryId(3), &user("ada")).unwrap();

        let reloaded = ProgressStore::open(&path).unwrap();
        assert_eq!(reloaded.markers().len(), 1);
        assert_eq!(
            reloaded.last_completed(CategoryId(2), &user("ada")),
            Some(WordId(202))
        );
        assert_eq!(reloaded.last_completed(CategoryId(3), &user("ada")), None);
    }

    #[test]
    fn test_corrupt_progress_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "[{").unwrap();
        assert!(matches!(ProgressStore::open(&path), Err(SourceError::Json(_))));
    }

    #[test]
    fn test_failed_write_leaves_marker_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let mut store = ProgressStore::open(sub.join("progress.json")).unwrap();

        // A regular file where the directory should be makes every write fail.
        fs::write(&sub, "").unwrap();
        let result = store.set_last_completed(CategoryId(1), &user("ada"), WordId(5));
        assert!(matches!(result, Err(SourceError::Io { .. })));
        assert_eq!(store.last_completed(CategoryId(1), &user("ada")), None);

        // The failed marker must not ride along with a later successful write.
        fs::remove_file(&sub).unwrap();
        store.set_last_completed(CategoryId(2), &user("ada"), WordId(9)).unwrap();
        let reloaded = ProgressStore::open(sub.join("progress.json")).unwrap();
        assert_eq!(reloaded.markers().len(), 1);
        assert_eq!(reloaded.last_completed(CategoryId(1), &user("ada")), None);
    }

    #[test]
    fn test_failed_delete_keeps_marker() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let mut store = ProgressStore::open(sub.join("progress.json")).unwrap();
        store.set_last_completed(CategoryId(1), &user("ada"), WordId(5)).unwrap();

        fs::remove_dir_all(&sub).unwrap();
        fs::write(&sub, "").unwrap();
        assert!(store.delete(CategoryId(1), &user("ada")).is_err());
        assert_eq!(store.last_completed(CategoryId(1), &user("ada")), Some(WordId(5)));
    }
}
