use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Failure to read or write the persisted high score.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Storage for the single persisted high-score value.
pub trait HighScoreStore {
    /// Returns the stored high score, or `Ok(0)` when nothing is stored yet.
    fn load(&self) -> Result<u32, ScoreError>;

    fn save(&mut self, score: u32) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// High score kept as JSON in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user data location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, ScoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let file = serde_json::from_str::<ScoreFile>(&raw)?;
        Ok(file.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&ScoreFile { high_score: score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Session-only store; also records every write it receives.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: u32,
    writes: Vec<u32>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            writes: Vec::new(),
        }
    }

    /// Values passed to `save`, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[u32] {
        &self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        self.high_score = score;
        self.writes.push(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{HighScoreStore, JsonFileStore, MemoryStore, ScoreError};

    #[test]
    fn score_file_round_trip() {
        let path = unique_test_path("round_trip");
        let mut store = JsonFileStore::new(&path);

        store.save(42).expect("score save should succeed");
        let loaded = store.load().expect("load should succeed");

        assert_eq!(loaded, 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        let loaded = JsonFileStore::new(&path)
            .load()
            .expect("missing file should return Ok(0)");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn malformed_score_file_returns_parse_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(
            matches!(JsonFileStore::new(&path).load(), Err(ScoreError::Parse(_))),
            "malformed file should return a parse error"
        );

        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_records_writes() {
        let mut store = MemoryStore::with_high_score(5);
        assert_eq!(store.load().expect("memory load"), 5);

        store.save(20).expect("memory save");

        assert_eq!(store.load().expect("memory load"), 20);
        assert_eq!(store.writes(), &[20]);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
