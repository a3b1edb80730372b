use crate::domain::entities::{Action, AdminSet};

/// Acknowledgement sent privately to a newly verified nick
pub const GRANT_ACK: &str = "you know what you doing";

/// Grants trust based on identity-verification replies
pub struct AuthService {
    bot_nick: String,
}

impl AuthService {
    pub fn new(bot_nick: impl Into<String>) -> Self {
        Self { bot_nick: bot_nick.into() }
    }

    /// Handle a registered-nick reply.
    ///
    /// Only replies addressed to this bot count; the reported nick becomes
    /// trusted and is told so. Repeated replies leave the set unchanged.
    pub fn identity_verified(&self, admins: &mut AdminSet, queried: &str, responder: &str) -> Option<Action> {
        if queried != self.bot_nick {
            return None;
        }
        if admins.grant(responder) {
            tracing::info!("Granted admin to {}", responder);
        }
        Some(Action::say(responder, GRANT_ACK))
    }
}
