//! Console adapter for development/testing
//!
//! Each stdin line is one inbound event:
//! - `<sender> <target> <text...>` is a chat message
//! - `307 <queried> <responder>` is a registered-nick reply
//!
//! EOF acts as a remote disconnect.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::{Event, IncomingMessage};
use crate::domain::traits::Connection;

/// Numeric of the registered-nick WHOIS reply
pub const RPL_WHOISREGNICK: &str = "307";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    nick: String,
}

impl ConsoleAdapter {
    pub fn new(nick: impl Into<String>) -> Self {
        Self { nick: nick.into() }
    }

    /// Turn one input line into an event; blank or short lines are skipped
    pub fn parse_line(line: &str) -> Option<Event> {
        let line = line.trim();
        let mut parts = line.splitn(3, char::is_whitespace);
        let first = parts.next().filter(|s| !s.is_empty())?;
        let second = parts.next()?;
        let rest = parts.next().map(str::trim).unwrap_or_default();

        if first == RPL_WHOISREGNICK {
            let responder = rest.split_whitespace().next()?;
            return Some(Event::IdentityVerified {
                queried: second.to_string(),
                responder: responder.to_string(),
            });
        }
        if rest.is_empty() {
            return None;
        }
        Some(Event::Message(IncomingMessage::new(first, second, rest)))
    }
}

#[async_trait]
impl Connection for ConsoleAdapter {
    async fn connect(&self, events: mpsc::Sender<Event>) -> Result<(), BotError> {
        tracing::info!("Starting console bot as {} (dev mode)", self.nick);
        events
            .send(Event::Connected)
            .await
            .map_err(|e| BotError::Internal(e.to_string()))?;

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Some(event) = ConsoleAdapter::parse_line(&line) else {
                            continue;
                        };
                        if events.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        let _ = events.send(Event::Disconnected).await;
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        let _ = events.send(Event::Disconnected).await;
                        break;
                    }
                }
            }
        });
        Ok(())
    }

    async fn send_message(&self, target: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT -> {}] {}", target, text);
        Ok(())
    }

    async fn join(&self, channel: &str) -> Result<(), BotError> {
        println!("[BOT] JOIN {}", channel);
        Ok(())
    }

    async fn part(&self, channel: &str, reason: &str) -> Result<(), BotError> {
        println!("[BOT] PART {} :{}", channel, reason);
        Ok(())
    }

    async fn quit(&self, reason: &str) -> Result<(), BotError> {
        println!("[BOT] QUIT :{}", reason);
        Ok(())
    }
}
