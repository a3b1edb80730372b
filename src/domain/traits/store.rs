use crate::application::errors::StorageError;
use crate::domain::entities::ScoreboardState;

/// Durable home of the scoreboard
pub trait ScoreStore: Send + Sync {
    /// Empty state when nothing was saved yet; malformed data is an error
    fn load(&self) -> Result<ScoreboardState, StorageError>;

    /// Replace the stored document wholesale
    fn save(&self, state: &ScoreboardState) -> Result<(), StorageError>;
}
