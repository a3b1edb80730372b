use std::collections::HashMap;

use super::{Action, AdminSet, ScoreboardState, SubstitutionTable};
use crate::application::errors::CommandError;

/// Arguments a handler is invoked with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Where replies go (already rewritten for private messages)
    pub target: &'a str,
    pub argument: &'a str,
    pub invoker: &'a str,
}

/// State a handler may read or mutate while it runs
pub struct CommandContext<'a> {
    pub admins: &'a AdminSet,
    pub scoreboard: &'a mut ScoreboardState,
    pub substitutions: &'a SubstitutionTable,
    pub catalog: &'a [CommandInfo],
}

/// Command handler function type
pub type CommandHandler = Box<
    dyn Fn(&mut CommandContext<'_>, &Invocation<'_>) -> Result<Vec<Action>, CommandError> + Send + Sync,
>;

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub requires_admin: bool,
    pub handler: CommandHandler,
}

impl Command {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &Invocation<'_>) -> Result<Vec<Action>, CommandError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            usage: None,
            requires_admin: false,
            handler: Box::new(handler),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.requires_admin = true;
        self
    }

    pub fn info(&self) -> CommandInfo {
        CommandInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            usage: self.usage.clone(),
            requires_admin: self.requires_admin,
        }
    }

    pub fn call(&self, ctx: &mut CommandContext<'_>, invocation: &Invocation<'_>) -> Result<Vec<Action>, CommandError> {
        (self.handler)(ctx, invocation)
    }
}

/// Handler-free view of a command, for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub requires_admin: bool,
}

impl CommandInfo {
    /// Name as listed by help, with `*` marking admin-only commands
    pub fn label(&self) -> String {
        if self.requires_admin {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Command registry, keyed by exact name
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Sorted by name
    pub fn catalog(&self) -> Vec<CommandInfo> {
        let mut infos: Vec<CommandInfo> = self.commands.values().map(Command::info).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}
