use crate::models::PlayEntry;
use anyhow::Result;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

const MAX_RECENTS: usize = 50;
const RECENTS_FILE: &str = "recent.yaml";

/// Manages the recently-played history and its on-disk file
pub struct Storage {
    pub recents: VecDeque<PlayEntry>,
    config_dir: PathBuf,
}

impl Storage {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minstrel");
        Self::with_dir(config_dir)
    }

    /// Storage rooted at an explicit directory (tests use a temp dir)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        let mut storage = Storage {
            recents: VecDeque::with_capacity(MAX_RECENTS),
            config_dir,
        };

        // Try to load saved data
        let _ = storage.load_recents();
        storage
    }

    /// Record a play, newest first, capped
    pub fn add_recent(&mut self, entry: PlayEntry) {
        if self.recents.len() >= MAX_RECENTS {
            self.recents.pop_back();
        }
        self.recents.push_front(entry);
    }

    /// Get a recent play by index (0 = most recent)
    #[allow(dead_code)] // Prepared for a future recently-played screen
    pub fn get_recent(&self, index: usize) -> Option<&PlayEntry> {
        self.recents.get(index)
    }

    /// Number of recorded plays
    #[allow(dead_code)] // Prepared for a future recently-played screen
    pub fn recents_len(&self) -> usize {
        self.recents.len()
    }

    /// Ensure config directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Save the recently-played history to file
    pub fn save_recents(&self) -> Result<()> {
        self.ensure_dir()?;
        let path = self.config_dir.join(RECENTS_FILE);
        let entries: Vec<&PlayEntry> = self.recents.iter().collect();
        let content = serde_yaml::to_string(&entries)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load the recently-played history from disk
    pub fn load_recents(&mut self) -> Result<()> {
        let path = self.config_dir.join(RECENTS_FILE);
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&path)?;
        let entries: Vec<PlayEntry> = serde_yaml::from_str(&content)?;
        self.recents = entries.into_iter().take(MAX_RECENTS).collect();
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn entry(id: u64) -> PlayEntry {
        PlayEntry::from_track(&Track::stub(id, format!("t{id}")))
    }

    #[test]
    fn test_recents_are_capped_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::with_dir(dir.path().to_path_buf());

        for id in 0..60 {
            storage.add_recent(entry(id));
        }
        assert_eq!(storage.recents_len(), 50);
        assert_eq!(storage.get_recent(0).unwrap().track_id, 59);
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::with_dir(dir.path().to_path_buf());
        storage.add_recent(entry(1));
        storage.add_recent(entry(2));
        storage.save_recents().unwrap();

        let reloaded = Storage::with_dir(dir.path().to_path_buf());
        assert_eq!(reloaded.recents_len(), 2);
        assert_eq!(reloaded.get_recent(0).unwrap().track_id, 2);
        assert_eq!(reloaded.get_recent(1).unwrap().track_id, 1);
    }
}
