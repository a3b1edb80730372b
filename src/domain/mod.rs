//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Message, Command, AdminSet, Scoreboard)
//! - Traits: Abstractions for infrastructure (Connection, ScoreStore)

pub mod entities;
pub mod traits;
