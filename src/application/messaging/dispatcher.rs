//! Message dispatcher - Routes chat lines to commands or substitutions

use rand::Rng;

use super::parser::CommandParser;
use super::substitution::SubstitutionEngine;
use crate::application::errors::CommandError;
use crate::domain::entities::{
    Action, AdminSet, CommandContext, CommandRegistry, IncomingMessage, Invocation, ScoreboardState,
};

/// Reply sent to an untrusted nick invoking a privileged command
pub const ACCESS_DENIED: &str = "Access denied.";

/// Message dispatcher - classifies each line exactly once
pub struct MessageDispatcher {
    bot_nick: String,
    parser: CommandParser,
    commands: CommandRegistry,
    substitutions: SubstitutionEngine,
}

impl MessageDispatcher {
    pub fn new(
        bot_nick: impl Into<String>,
        parser: CommandParser,
        commands: CommandRegistry,
        substitutions: SubstitutionEngine,
    ) -> Self {
        Self {
            bot_nick: bot_nick.into(),
            parser,
            commands,
            substitutions,
        }
    }

    /// Process one message and return the outbound actions it causes
    pub fn dispatch<R: Rng + ?Sized>(
        &self,
        message: &IncomingMessage,
        admins: &AdminSet,
        scoreboard: &mut ScoreboardState,
        rng: &mut R,
    ) -> Vec<Action> {
        let target = message.reply_target(&self.bot_nick);

        if let Some(parsed) = self.parser.parse(&message.text) {
            let invocation = Invocation {
                target,
                argument: &parsed.argument,
                invoker: &message.sender,
            };
            return self.run_command(&parsed.name, &invocation, admins, scoreboard);
        }

        match self.substitutions.substitute(&message.text, rng) {
            Some(text) => vec![Action::say(target, text)],
            None => Vec::new(),
        }
    }

    fn run_command(
        &self,
        name: &str,
        invocation: &Invocation<'_>,
        admins: &AdminSet,
        scoreboard: &mut ScoreboardState,
    ) -> Vec<Action> {
        let Some(command) = self.commands.get(name) else {
            tracing::debug!("Ignoring unknown command {} from {}", name, invocation.invoker);
            return Vec::new();
        };

        if command.requires_admin && !admins.contains(invocation.invoker) {
            tracing::warn!("Denied {} to untrusted nick {}", name, invocation.invoker);
            return vec![Action::say(invocation.invoker, ACCESS_DENIED)];
        }

        tracing::debug!("[{}] {} invoked {} {:?}", invocation.target, invocation.invoker, name, invocation.argument);

        let catalog = self.commands.catalog();
        let mut ctx = CommandContext {
            admins,
            scoreboard,
            substitutions: self.substitutions.table(),
            catalog: &catalog,
        };

        match command.call(&mut ctx, invocation) {
            Ok(actions) => actions,
            Err(CommandError::InvalidArgs(reason)) => {
                tracing::debug!("Rejected {} arguments: {}", name, reason);
                let usage = command.usage.as_deref().unwrap_or("invalid arguments");
                vec![Action::say(invocation.invoker, format!("usage: {}", usage))]
            }
        }
    }
}
