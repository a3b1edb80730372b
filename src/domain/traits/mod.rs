//! Domain traits - Abstractions for infrastructure implementations

pub mod connection;
pub mod store;

pub use connection::Connection;
pub use store::ScoreStore;
