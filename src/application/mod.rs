//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Command table, authentication, runtime loop and shutdown
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing, substitution, dispatching

pub mod errors;
pub mod services;
pub mod messaging;
