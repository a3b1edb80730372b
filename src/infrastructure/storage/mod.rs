//! File-based scoreboard storage

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::application::errors::StorageError;
use crate::domain::entities::ScoreboardState;
use crate::domain::traits::ScoreStore;

/// JSON file-based store
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "scoreboard".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Result<ScoreboardState, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No scoreboard at {}, starting empty", self.path.display());
                return Ok(ScoreboardState::new());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Serialization(format!("{}: {}", self.path.display(), e))
        })
    }

    fn save(&self, state: &ScoreboardState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // write the sibling first so a crash never truncates the old document
        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;

        tracing::debug!("Wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}
