//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Scoreboard persistence
//! - Emotes: Built-in substitution table
//! - Adapters: Transport integrations

pub mod config;
pub mod storage;
pub mod emotes;
pub mod adapters;
