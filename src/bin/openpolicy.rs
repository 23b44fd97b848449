//! `openpolicy-cli`: sign in and chat with PA AI from the terminal.
//!
//! ```text
//! openpolicy-cli --server-url http://127.0.0.1:8000
//! openpolicy-cli --auth remote --auth-url https://auth.example.com --locale en
//! ```

use clap::Parser;
use openpolicy::auth::{self, AuthBackend};
use openpolicy::cli::{ChatApp, CliError};
use openpolicy::conversation::ChatSession;
use openpolicy::exchange::HttpChatExchange;
use openpolicy::i18n::Locale;
use openpolicy::render::{MarkdownRenderer, PlainRenderer, TerminalRenderer};
use openpolicy::telemetry::{get_cli_subscriber, init_subscriber};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "openpolicy-cli",
    version,
    about = "Chat with the PA AI policy assistant"
)]
struct Cli {
    /// Base URL of the chat server (the host serving /api/chat)
    #[arg(long, env = "OPENPOLICY_SERVER_URL", default_value = "http://127.0.0.1:8000")]
    server_url: String,
    /// Authentication backend: demo, remote
    #[arg(long, env = "OPENPOLICY_AUTH", default_value_t = AuthBackend::Demo)]
    auth: AuthBackend,
    /// Base URL of the remote auth service
    #[arg(long = "auth-url", env = "OPENPOLICY_AUTH_URL")]
    auth_url: Option<String>,
    /// UI language: ja, en
    #[arg(long, env = "OPENPOLICY_LOCALE", default_value_t = Locale::Ja)]
    locale: Locale,
    /// Print assistant replies as raw markdown
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber(get_cli_subscriber("warn".into()));
    let cli = Cli::parse();

    let exchange = HttpChatExchange::new(&cli.server_url).map_err(CliError::from)?;
    let provider = auth::init(cli.auth, cli.auth_url);
    let session = ChatSession::new(Arc::new(exchange), provider, cli.locale);

    let renderer: Box<dyn MarkdownRenderer> = if cli.plain {
        Box::new(PlainRenderer)
    } else {
        Box::new(TerminalRenderer)
    };

    ChatApp::new(session, renderer).run().await?;
    Ok(())
}
