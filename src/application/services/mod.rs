//! Application services - Business logic orchestration

pub mod auth_service;
pub mod command_service;
pub mod runtime;
pub mod shutdown;
#[cfg(test)]
pub mod testing;

pub use command_service::CommandService;
pub use runtime::{BotRuntime, RuntimeSettings};
