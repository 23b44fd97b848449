//! Upstream provider connectors
//!
//! The chat proxy never talks HTTP to the LLM provider directly. Routes receive an
//! `Arc<dyn CompletionConnector>` so tests can swap the provider for a stub.

pub mod anthropic;
pub mod config;
pub mod errors;

pub use anthropic::init as init_upstream;
pub use anthropic::{AnthropicClient, CompletionConnector, CompletionRequest};
pub use config::UpstreamConfig;
pub use errors::ConnectorError;
