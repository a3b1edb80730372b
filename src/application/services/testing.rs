//! In-memory transport and store that record every call, for tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::application::errors::{BotError, StorageError};
use crate::domain::entities::{Event, ScoreboardState};
use crate::domain::traits::{Connection, ScoreStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send(String, String),
    Join(String),
    Part(String, String),
    Quit(String),
    Save(ScoreboardState),
}

type Log = Arc<Mutex<Vec<(Call, Instant)>>>;

/// Shared call log for a connection and a store
#[derive(Clone, Default)]
pub struct Recorder {
    log: Log,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection(&self) -> RecordingConnection {
        RecordingConnection {
            log: self.log.clone(),
            hang_on_quit: false,
            on_send: SendBehaviour::Deliver,
        }
    }

    pub fn store(&self) -> RecordingStore {
        RecordingStore {
            log: self.log.clone(),
            initial: ScoreboardState::new(),
            fail: false,
        }
    }

    pub fn calls(&self) -> Vec<(Call, Instant)> {
        self.log.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|(call, _)| match call {
                Call::Send(target, text) => Some((target, text)),
                _ => None,
            })
            .collect()
    }

    pub fn saves(&self) -> usize {
        self.calls().iter().filter(|(c, _)| matches!(c, Call::Save(_))).count()
    }
}

fn record(log: &Log, call: Call) {
    log.lock().unwrap().push((call, Instant::now()));
}

#[derive(Clone, Copy)]
enum SendBehaviour {
    Deliver,
    Hang,
    Fail,
}

pub struct RecordingConnection {
    log: Log,
    hang_on_quit: bool,
    on_send: SendBehaviour,
}

impl RecordingConnection {
    /// Make `quit` never complete
    pub fn hang_on_quit(mut self) -> Self {
        self.hang_on_quit = true;
        self
    }

    /// Make `send_message` never complete
    pub fn hang_on_send(mut self) -> Self {
        self.on_send = SendBehaviour::Hang;
        self
    }

    /// Make `send_message` fail with a network error
    pub fn failing_send(mut self) -> Self {
        self.on_send = SendBehaviour::Fail;
        self
    }
}

#[async_trait]
impl Connection for RecordingConnection {
    async fn connect(&self, _events: mpsc::Sender<Event>) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_message(&self, target: &str, text: &str) -> Result<(), BotError> {
        match self.on_send {
            SendBehaviour::Deliver => {}
            SendBehaviour::Hang => std::future::pending::<()>().await,
            SendBehaviour::Fail => return Err(BotError::Network("connection reset".to_string())),
        }
        record(&self.log, Call::Send(target.to_string(), text.to_string()));
        Ok(())
    }

    async fn join(&self, channel: &str) -> Result<(), BotError> {
        record(&self.log, Call::Join(channel.to_string()));
        Ok(())
    }

    async fn part(&self, channel: &str, reason: &str) -> Result<(), BotError> {
        record(&self.log, Call::Part(channel.to_string(), reason.to_string()));
        Ok(())
    }

    async fn quit(&self, reason: &str) -> Result<(), BotError> {
        if self.hang_on_quit {
            std::future::pending::<()>().await;
        }
        record(&self.log, Call::Quit(reason.to_string()));
        Ok(())
    }
}

pub struct RecordingStore {
    log: Log,
    initial: ScoreboardState,
    fail: bool,
}

impl RecordingStore {
    pub fn with_state(mut self, state: ScoreboardState) -> Self {
        self.initial = state;
        self
    }

    /// Make every save fail
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl ScoreStore for RecordingStore {
    fn load(&self) -> Result<ScoreboardState, StorageError> {
        Ok(self.initial.clone())
    }

    fn save(&self, state: &ScoreboardState) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        record(&self.log, Call::Save(state.clone()));
        Ok(())
    }
}
