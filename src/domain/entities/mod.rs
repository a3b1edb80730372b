//! Domain entities - Core business objects with no external dependencies

pub mod admin;
pub mod command;
pub mod message;
pub mod scoreboard;
pub mod substitution;

pub use admin::AdminSet;
pub use command::{Command, CommandContext, CommandRegistry, Invocation};
pub use message::{channel_name, Action, Event, IncomingMessage};
pub use scoreboard::ScoreboardState;
pub use substitution::{Category, SubstitutionTable};
