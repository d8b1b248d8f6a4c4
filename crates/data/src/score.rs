use crate::load::{load_json, write_json};
use evodeck_core::ScoreStore;
use std::path::{Path, PathBuf};

/// High score kept as a single JSON integer.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> anyhow::Result<i64> {
        load_json(&self.path)
    }

    pub fn write(&self, score: i64) -> anyhow::Result<()> {
        write_json(&self.path, &score)
    }
}

impl ScoreStore for FileScoreStore {
    fn load_high_score(&self) -> i64 {
        self.read().unwrap_or(0).max(0)
    }

    fn save_high_score(&mut self, score: i64) {
        if let Err(err) = self.write(score) {
            eprintln!("high score not saved: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("evodeck_{name}_{}_{nanos}.json", std::process::id()))
    }

    #[test]
    fn missing_file_reads_zero() {
        let store = FileScoreStore::new(unique_temp_file("absent"));
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn corrupt_file_reads_zero() {
        let path = unique_temp_file("garbled");
        fs::write(&path, "high score: lots").expect("write");
        assert_eq!(FileScoreStore::new(&path).load_high_score(), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_score_round_trips() {
        let path = unique_temp_file("score");
        let mut store = FileScoreStore::new(&path);
        store.save_high_score(57);
        assert_eq!(fs::read_to_string(&path).expect("read").trim(), "57");
        assert_eq!(FileScoreStore::new(&path).load_high_score(), 57);
        let _ = fs::remove_file(&path);
    }
}
