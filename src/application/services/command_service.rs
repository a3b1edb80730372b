use crate::application::errors::CommandError;
use crate::domain::entities::{channel_name, Action, Command, CommandContext, CommandRegistry, Invocation};

type CommandResult = Result<Vec<Action>, CommandError>;

/// Number of entries shown by a bare `points`
const LEADERBOARD_SIZE: usize = 5;

/// Service for building the command table
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        let p = self.prefix.clone();

        self.register(Command::new("help", help)
            .with_description("List commands (* = admin only)")
            .with_usage(format!("{}help [command]", p)));

        self.register(Command::new("points", points)
            .with_description("Show a score or the leaderboard")
            .with_usage(format!("{}points [subject]", p)));

        self.register(Command::new("emotes", emotes)
            .with_description("List substitution triggers")
            .with_usage(format!("{}emotes", p)));

        self.register(Command::new("score", score)
            .with_description("Change the scoreboard")
            .with_usage(format!("{}score add <subject> <delta> | set <subject> <value> | del <subject>", p))
            .admin_only());

        self.register(Command::new("admins", admins)
            .with_description("List trusted nicks")
            .with_usage(format!("{}admins", p))
            .admin_only());

        self.register(Command::new("say", say)
            .with_description("Send a message somewhere")
            .with_usage(format!("{}say <target> <text>", p))
            .admin_only());

        self.register(Command::new("join", join)
            .with_description("Join a channel")
            .with_usage(format!("{}join <channel>", p))
            .admin_only());

        self.register(Command::new("part", part)
            .with_description("Leave a channel")
            .with_usage(format!("{}part [channel]", p))
            .admin_only());
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn into_registry(self) -> CommandRegistry {
        self.registry
    }
}

fn help(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    let wanted = inv.argument.split_whitespace().next();
    if let Some(info) = ctx.catalog.iter().find(|c| Some(c.name.as_str()) == wanted) {
        let mut line = format!("{} - {}", info.label(), info.description.as_deref().unwrap_or("no description"));
        if let Some(usage) = &info.usage {
            line.push_str(&format!(" (usage: {})", usage));
        }
        return Ok(vec![Action::say(inv.target, line)]);
    }

    // unknown or missing topic lists everything
    let names: Vec<String> = ctx.catalog.iter().map(|c| c.label()).collect();
    Ok(vec![Action::say(inv.target, format!("commands: {}", names.join(" ")))])
}

fn points(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    let reply = match inv.argument.split_whitespace().next() {
        Some(subject) => format!("{}: {}", subject, ctx.scoreboard.get(subject).unwrap_or(0)),
        None if ctx.scoreboard.is_empty() => "scoreboard is empty".to_string(),
        None => ctx
            .scoreboard
            .top(LEADERBOARD_SIZE)
            .iter()
            .map(|(subject, value)| format!("{}: {}", subject, value))
            .collect::<Vec<_>>()
            .join(", "),
    };
    Ok(vec![Action::say(inv.target, reply)])
}

fn emotes(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    Ok(ctx
        .substitutions
        .categories()
        .iter()
        .map(|c| Action::say(inv.target, format!("{}: {}", c.name, c.tokens().join(" "))))
        .collect())
}

fn score(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    let parts: Vec<&str> = inv.argument.split_whitespace().collect();
    let reply = match parts.as_slice() {
        ["add", subject, delta] => {
            let value = ctx.scoreboard.mutate(subject, parse_amount(delta)?);
            format!("{}: {}", subject, value)
        }
        ["set", subject, value] => {
            let value = parse_amount(value)?;
            ctx.scoreboard.set(subject, value);
            format!("{}: {}", subject, value)
        }
        ["del", subject] => match ctx.scoreboard.remove(subject) {
            Some(_) => format!("{} removed", subject),
            None => format!("{} has no score", subject),
        },
        _ => return Err(CommandError::InvalidArgs(inv.argument.to_string())),
    };
    Ok(vec![Action::say(inv.target, reply)])
}

fn admins(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    if ctx.admins.is_empty() {
        return Ok(vec![Action::say(inv.target, "no admins")]);
    }
    let nicks: Vec<&str> = ctx.admins.iter().collect();
    Ok(vec![Action::say(inv.target, format!("admins: {}", nicks.join(", ")))])
}

fn say(_ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    match inv.argument.split_once(char::is_whitespace) {
        Some((target, text)) if !text.trim().is_empty() => Ok(vec![Action::say(target, text.trim())]),
        _ => Err(CommandError::InvalidArgs(inv.argument.to_string())),
    }
}

fn join(_ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    match inv.argument.split_whitespace().next() {
        Some(channel) => Ok(vec![Action::join(channel_name(channel))]),
        None => Err(CommandError::InvalidArgs(inv.argument.to_string())),
    }
}

fn part(_ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandResult {
    let channel = match inv.argument.split_whitespace().next() {
        Some(channel) => channel_name(channel),
        None if inv.target.starts_with('#') => inv.target.to_string(),
        None => return Err(CommandError::InvalidArgs(inv.argument.to_string())),
    };
    Ok(vec![Action::part(channel, format!("requested by {}", inv.invoker))])
}

fn parse_amount(raw: &str) -> Result<i64, CommandError> {
    raw.parse::<i64>()
        .map_err(|_| CommandError::InvalidArgs(format!("not a number: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AdminSet, Category, ScoreboardState, SubstitutionTable};

    struct Harness {
        registry: CommandRegistry,
        admins: AdminSet,
        board: ScoreboardState,
        table: SubstitutionTable,
    }

    impl Harness {
        fn new() -> Self {
            let mut service = CommandService::new("!");
            service.register_defaults();
            Self {
                registry: service.into_registry(),
                admins: AdminSet::from_list("tso"),
                board: ScoreboardState::new(),
                table: SubstitutionTable::new()
                    .with_category(Category::new("emoji").with_fixed("smile", "🙂").with_fixed("fire", "🔥")),
            }
        }

        fn call(&mut self, name: &str, argument: &str) -> CommandResult {
            let catalog = self.registry.catalog();
            let mut ctx = CommandContext {
                admins: &self.admins,
                scoreboard: &mut self.board,
                substitutions: &self.table,
                catalog: &catalog,
            };
            let inv = Invocation { target: "#x", argument, invoker: "tso" };
            self.registry.get(name).expect("registered").call(&mut ctx, &inv)
        }
    }

    #[test]
    fn test_admin_flags() {
        let h = Harness::new();
        for name in ["score", "admins", "say", "join", "part"] {
            assert!(h.registry.get(name).unwrap().requires_admin, "{} should be admin only", name);
        }
        for name in ["help", "points", "emotes"] {
            assert!(!h.registry.get(name).unwrap().requires_admin, "{} should be public", name);
        }
    }

    #[test]
    fn test_score_add_scenario() {
        let mut h = Harness::new();
        let actions = h.call("score", "add alice 5").unwrap();
        assert_eq!(actions, vec![Action::say("#x", "alice: 5")]);
        assert_eq!(h.board.get("alice"), Some(5));
        assert_eq!(h.board.len(), 1);

        h.call("score", "add alice -7").unwrap();
        assert_eq!(h.board.get("alice"), Some(-2));
    }

    #[test]
    fn test_score_set_and_del() {
        let mut h = Harness::new();
        h.call("score", "set bob 10").unwrap();
        assert_eq!(h.board.get("bob"), Some(10));

        let actions = h.call("score", "del bob").unwrap();
        assert_eq!(actions, vec![Action::say("#x", "bob removed")]);
        assert!(h.board.is_empty());

        let actions = h.call("score", "del bob").unwrap();
        assert_eq!(actions, vec![Action::say("#x", "bob has no score")]);
    }

    #[test]
    fn test_score_rejects_bad_input() {
        let mut h = Harness::new();
        assert!(matches!(h.call("score", "add alice lots"), Err(CommandError::InvalidArgs(_))));
        assert!(matches!(h.call("score", ""), Err(CommandError::InvalidArgs(_))));
        assert!(h.board.is_empty());
    }

    #[test]
    fn test_points() {
        let mut h = Harness::new();
        assert_eq!(h.call("points", "").unwrap(), vec![Action::say("#x", "scoreboard is empty")]);

        h.board.set("alice", 3);
        h.board.set("bob", 9);
        assert_eq!(h.call("points", "").unwrap(), vec![Action::say("#x", "bob: 9, alice: 3")]);
        assert_eq!(h.call("points", "carol").unwrap(), vec![Action::say("#x", "carol: 0")]);
    }

    #[test]
    fn test_help_marks_admin_commands() {
        let mut h = Harness::new();
        let actions = h.call("help", "").unwrap();
        assert_eq!(
            actions,
            vec![Action::say("#x", "commands: admins* emotes help join* part* points say* score*")]
        );
    }

    #[test]
    fn test_help_describes_one_command() {
        let mut h = Harness::new();
        assert_eq!(
            h.call("help", "join").unwrap(),
            vec![Action::say("#x", "join* - Join a channel (usage: !join <channel>)")]
        );
        // unknown topics fall back to the listing
        let listing = h.call("help", "").unwrap();
        assert_eq!(h.call("help", ":smile:").unwrap(), listing);
    }

    #[test]
    fn test_admins_lists_trusted_nicks() {
        let mut h = Harness::new();
        h.admins.grant("alice");
        assert_eq!(h.call("admins", "").unwrap(), vec![Action::say("#x", "admins: alice, tso")]);

        h.admins = AdminSet::new();
        assert_eq!(h.call("admins", "").unwrap(), vec![Action::say("#x", "no admins")]);
    }

    #[test]
    fn test_emotes_lists_tokens() {
        let mut h = Harness::new();
        assert_eq!(h.call("emotes", "").unwrap(), vec![Action::say("#x", "emoji: fire smile")]);
    }

    #[test]
    fn test_channel_commands() {
        let mut h = Harness::new();
        assert_eq!(h.call("join", "rust").unwrap(), vec![Action::join("#rust")]);
        assert_eq!(
            h.call("part", "").unwrap(),
            vec![Action::part("#x", "requested by tso")]
        );
        assert!(h.call("join", "").is_err());
    }

    #[test]
    fn test_say() {
        let mut h = Harness::new();
        assert_eq!(h.call("say", "#y hello there").unwrap(), vec![Action::say("#y", "hello there")]);
        assert!(h.call("say", "#y").is_err());
    }
}
