#![allow(dead_code)]

use openpolicy::configuration::Settings;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const UPSTREAM_FAILED: &str = "AI応答の取得に失敗しました";

pub struct TestApp {
    pub address: String,
    pub upstream: MockServer,
}

impl TestApp {
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.address)
    }
}

/// Proxy wired to a wiremock upstream with a test credential.
pub async fn spawn_app() -> TestApp {
    let upstream = MockServer::start().await;

    let mut settings = Settings::default();
    settings.upstream.base_url = upstream.uri();
    settings.upstream.api_key = Some(TEST_API_KEY.to_string());
    settings.upstream.timeout_secs = 5;

    let address = spawn_app_with_settings(settings).await;
    TestApp { address, upstream }
}

pub async fn spawn_app_with_settings(settings: Settings) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = openpolicy::startup::run(listener, settings)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    format!("http://127.0.0.1:{}", port)
}
