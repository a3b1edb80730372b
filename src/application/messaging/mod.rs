//! Message handling - Classification and dispatch of chat lines

pub mod dispatcher;
pub mod parser;
pub mod substitution;

pub use dispatcher::{MessageDispatcher, ACCESS_DENIED};
pub use parser::CommandParser;
pub use substitution::SubstitutionEngine;
