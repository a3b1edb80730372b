use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::Event;

/// Connection trait - abstraction for the chat transport
#[async_trait]
pub trait Connection: Send + Sync {
    /// Start delivering inbound events, in order, on `events`
    async fn connect(&self, events: mpsc::Sender<Event>) -> Result<(), BotError>;

    /// Send a message to a channel or nick
    async fn send_message(&self, target: &str, text: &str) -> Result<(), BotError>;

    async fn join(&self, channel: &str) -> Result<(), BotError>;

    async fn part(&self, channel: &str, reason: &str) -> Result<(), BotError>;

    /// Terminate the connection
    async fn quit(&self, reason: &str) -> Result<(), BotError>;
}
