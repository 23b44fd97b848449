//! Terminal client for the chat service.

pub mod error;
pub mod progress;
pub mod repl;

pub use error::CliError;
pub use repl::ChatApp;
