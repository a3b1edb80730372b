//! Orderly teardown after a termination signal

use std::fmt;
use std::time::Duration;

use crate::application::errors::BotError;
use crate::domain::entities::ScoreboardState;
use crate::domain::traits::{Connection, ScoreStore};

/// Reason given when leaving channels and quitting
pub const SHUTDOWN_REASON: &str = "we get signal";

/// Time granted to the transport to flush the leave notices
pub const GRACE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    Running,
    Leaving,
    Disconnecting,
    Terminated,
}

impl fmt::Display for ShutdownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShutdownPhase::Running => "running",
            ShutdownPhase::Leaving => "leaving",
            ShutdownPhase::Disconnecting => "disconnecting",
            ShutdownPhase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Runs the leave, wait, quit, save sequence
pub struct ShutdownCoordinator {
    grace: Duration,
    reason: String,
    phase: ShutdownPhase,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(GRACE_INTERVAL)
    }
}

impl ShutdownCoordinator {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            reason: SHUTDOWN_REASON.to_string(),
            phase: ShutdownPhase::Running,
        }
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.phase
    }

    fn enter(&mut self, phase: ShutdownPhase) {
        tracing::info!("Shutdown: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Tear down the connection, then persist the scoreboard.
    ///
    /// Transport failures are logged and skipped; only a failed save is
    /// reported, since nothing can retry it once the process exits.
    pub async fn execute(
        &mut self,
        conn: &dyn Connection,
        channels: &[String],
        store: Option<&dyn ScoreStore>,
        scoreboard: &ScoreboardState,
    ) -> Result<(), BotError> {
        self.enter(ShutdownPhase::Leaving);
        for channel in channels {
            if let Err(e) = conn.part(channel, &self.reason).await {
                tracing::warn!("Failed to leave {}: {}", channel, e);
            }
        }
        tokio::time::sleep(self.grace).await;

        self.enter(ShutdownPhase::Disconnecting);
        match tokio::time::timeout(self.grace, conn.quit(&self.reason)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Failed to quit cleanly: {}", e),
            Err(_) => tracing::warn!("Transport did not accept quit within {:?}", self.grace),
        }

        if let Some(store) = store {
            store.save(scoreboard)?;
            tracing::info!("Saved scoreboard ({} subjects)", scoreboard.len());
        }
        self.enter(ShutdownPhase::Terminated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{Call, Recorder};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_two_channels_scenario() {
        let recorder = Recorder::new();
        let conn = recorder.connection();
        let store = recorder.store();
        let mut board = ScoreboardState::new();
        board.set("alice", 5);

        let mut coordinator = ShutdownCoordinator::default();
        let started = Instant::now();
        coordinator
            .execute(&conn, &["#a".to_string(), "#b".to_string()], Some(&store), &board)
            .await
            .unwrap();

        let calls = recorder.calls();
        assert_eq!(
            calls.iter().map(|(c, _)| c.clone()).collect::<Vec<_>>(),
            vec![
                Call::Part("#a".to_string(), SHUTDOWN_REASON.to_string()),
                Call::Part("#b".to_string(), SHUTDOWN_REASON.to_string()),
                Call::Quit(SHUTDOWN_REASON.to_string()),
                Call::Save(board.clone()),
            ]
        );
        // one grace wait between the last leave and the quit
        assert_eq!(calls[1].1 - started, Duration::ZERO);
        assert!(calls[2].1 - calls[1].1 >= GRACE_INTERVAL);
        assert_eq!(coordinator.phase(), ShutdownPhase::Terminated);
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_store_skips_save() {
        let recorder = Recorder::new();
        let conn = recorder.connection();
        let mut coordinator = ShutdownCoordinator::default();

        coordinator
            .execute(&conn, &["#a".to_string()], None, &ScoreboardState::new())
            .await
            .unwrap();

        assert!(!recorder.calls().iter().any(|(c, _)| matches!(c, Call::Save(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_quit_still_saves() {
        let recorder = Recorder::new();
        let conn = recorder.connection().hang_on_quit();
        let store = recorder.store();
        let mut coordinator = ShutdownCoordinator::default();

        coordinator
            .execute(&conn, &[], Some(&store), &ScoreboardState::new())
            .await
            .unwrap();

        assert_eq!(recorder.saves(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_is_reported() {
        let recorder = Recorder::new();
        let conn = recorder.connection();
        let store = recorder.store().failing();
        let mut coordinator = ShutdownCoordinator::default();

        let result = coordinator
            .execute(&conn, &[], Some(&store), &ScoreboardState::new())
            .await;
        assert!(matches!(result, Err(BotError::Storage(_))));
        assert_eq!(coordinator.phase(), ShutdownPhase::Disconnecting);
    }
}
