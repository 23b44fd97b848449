mod common;

use common::spawn_app;
use openpolicy::auth::DemoAuthProvider;
use openpolicy::conversation::{ChatSession, SendOutcome};
use openpolicy::exchange::HttpChatExchange;
use openpolicy::forms::Credentials;
use openpolicy::i18n::Locale;
use openpolicy::models::Role;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn signed_in_session(address: &str) -> ChatSession {
    let exchange = HttpChatExchange::new(address).expect("Failed to build exchange client");
    let session = ChatSession::new(
        Arc::new(exchange),
        Arc::new(DemoAuthProvider::default()),
        Locale::Ja,
    );
    session
        .sign_in(&Credentials::new("pa@example.com", "secret1"))
        .await
        .expect("demo sign in");
    session
}

#[tokio::test]
async fn reply_is_appended_through_the_proxy() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "Hi there" }]
        })))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let session = signed_in_session(&app.address).await;
    let outcome = session.send("Hello").await;
    assert!(matches!(outcome, SendOutcome::Replied(ref m) if m.content == "Hi there"));

    let conversation = session.snapshot().await;
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[0].role, Role::User);
    assert_eq!(conversation.messages[0].content, "Hello");
    assert_eq!(conversation.messages[1].role, Role::Assistant);
    assert!(conversation.messages[0].timestamp <= conversation.messages[1].timestamp);
    assert!(!conversation.is_loading);
    assert!(conversation.last_error.is_none());
}

#[tokio::test]
async fn proxy_failure_keeps_user_message_and_sets_error() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.upstream)
        .await;

    let session = signed_in_session(&app.address).await;
    let outcome = session.send("Hello").await;
    let expected = Locale::Ja.texts().exchange_failed;
    assert_eq!(outcome, SendOutcome::Failed(expected.to_string()));

    let conversation = session.snapshot().await;
    assert_eq!(conversation.messages.len(), 1);
    assert_eq!(conversation.messages[0].content, "Hello");
    assert_eq!(conversation.last_error.as_deref(), Some(expected));
    assert!(!conversation.is_loading);
}

#[tokio::test]
async fn failed_turn_can_be_retried_with_full_history() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&app.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "Recovered" }]
        })))
        .mount(&app.upstream)
        .await;

    let session = signed_in_session(&app.address).await;
    assert!(matches!(session.send("Hello").await, SendOutcome::Failed(_)));
    assert!(matches!(session.send("Again").await, SendOutcome::Replied(_)));

    let received = app.upstream.received_requests().await.unwrap();
    let second: serde_json::Value = serde_json::from_slice(&received[1].body).unwrap();
    assert_eq!(
        second["messages"],
        json!([
            { "role": "user", "content": "Hello" },
            { "role": "user", "content": "Again" }
        ])
    );

    let conversation = session.snapshot().await;
    assert_eq!(conversation.messages.len(), 3);
    assert!(conversation.last_error.is_none());
}

#[tokio::test]
async fn sign_out_empties_the_log() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "Hi there" }]
        })))
        .mount(&app.upstream)
        .await;

    let session = signed_in_session(&app.address).await;
    session.send("Hello").await;
    assert_eq!(session.snapshot().await.messages.len(), 2);

    session.sign_out().await;

    assert!(session.snapshot().await.messages.is_empty());
    assert!(session.current_user().await.is_none());
    assert_eq!(session.send("Hello").await, SendOutcome::Rejected);
}
