use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SnapshotError;
use crate::game::GameEngine;

use super::GameSnapshot;

/// Reads and writes a single snapshot file.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the engine's state. The file is replaced atomically so a crash
    /// mid-write never leaves a truncated snapshot behind.
    pub fn save(&self, engine: &GameEngine) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&GameSnapshot::capture(engine))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), status = %engine.status(), "snapshot saved");
        Ok(())
    }

    pub fn load_snapshot(&self) -> Result<GameSnapshot, SnapshotError> {
        let json = fs::read_to_string(&self.path).map_err(|e| SnapshotError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| SnapshotError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Load and validate the snapshot, rebuilding the engine it describes.
    pub fn load(&self) -> Result<GameEngine, SnapshotError> {
        let engine = self.load_snapshot()?.restore()?;
        info!(path = %self.path.display(), status = %engine.status(), "snapshot loaded");
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameStatus, Player, PlayerId};

    fn in_progress() -> GameEngine {
        let mut engine = GameEngine::default();
        engine
            .start(
                Player::new(PlayerId::One, "red"),
                Player::new(PlayerId::Two, "yellow"),
                6,
                7,
            )
            .unwrap();
        engine.drop_piece(3).unwrap();
        engine.drop_piece(4).unwrap();
        engine.drop_piece(3).unwrap();
        engine
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("saves").join("game.json"));
        assert!(!store.exists());

        let engine = in_progress();
        store.save(&engine).unwrap();
        assert!(store.exists());
        assert!(!store.path().with_extension("json.tmp").exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, engine);
        assert_eq!(loaded.current_player(), PlayerId::Two);
        assert_eq!(loaded.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("game.json"));

        let mut engine = in_progress();
        store.save(&engine).unwrap();
        engine.drop_piece(0).unwrap();
        store.save(&engine).unwrap();

        assert_eq!(store.load().unwrap(), engine);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("missing.json"));
        assert!(matches!(store.load(), Err(SnapshotError::Read { .. })));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SnapshotStore::new(&path);
        assert!(matches!(store.load(), Err(SnapshotError::Parse { .. })));
    }
}
