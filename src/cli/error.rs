use std::fmt;

use crate::exchange::ExchangeError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CliError: errors that end the terminal client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug)]
pub enum CliError {
    /// The proxy client could not be constructed
    ClientSetup(String),
    /// Reading from the terminal failed
    Prompt(String),
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientSetup(msg) => write!(f, "Failed to set up the chat client: {msg}"),
            Self::Prompt(msg) => write!(f, "Terminal input failed: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl From<ExchangeError> for CliError {
    fn from(err: ExchangeError) -> Self {
        Self::ClientSetup(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display_client_setup() {
        let err = CliError::from(ExchangeError::Transport("tls backend missing".to_string()));
        let msg = format!("{err}");
        assert!(
            msg.contains("tls backend missing"),
            "Expected cause in: {msg}"
        );
    }

    #[test]
    fn test_cli_error_display_io() {
        let err = CliError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert!(format!("{err}").starts_with("I/O error"));
    }
}
