/// A chat line received from the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender: String,
    pub target: String,
    pub text: String,
}

impl IncomingMessage {
    pub fn new(sender: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            target: target.into(),
            text: text.into(),
        }
    }

    /// Route replies to the human when the line was addressed to the bot itself
    pub fn reply_target(&self, bot_nick: &str) -> &str {
        if self.target == bot_nick {
            &self.sender
        } else {
            &self.target
        }
    }
}

/// Events delivered by the connection layer, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Registration with the server completed
    Connected,
    /// The remote side closed the connection
    Disconnected,
    /// Numeric 307: `queried` is the nick the reply is addressed to,
    /// `responder` the nick reported as registered
    IdentityVerified { queried: String, responder: String },
    Message(IncomingMessage),
}

/// Outbound side effect requested by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Say { target: String, text: String },
    Join { channel: String },
    Part { channel: String, reason: String },
}

impl Action {
    pub fn say(target: impl Into<String>, text: impl Into<String>) -> Self {
        Action::Say {
            target: target.into(),
            text: text.into(),
        }
    }

    pub fn join(channel: impl Into<String>) -> Self {
        Action::Join { channel: channel.into() }
    }

    pub fn part(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Action::Part {
            channel: channel.into(),
            reason: reason.into(),
        }
    }
}

/// Channel names get a leading `#` when written without one
pub fn channel_name(name: &str) -> String {
    if name.starts_with('#') || name.starts_with('&') {
        name.to_string()
    } else {
        format!("#{}", name)
    }
}
