use super::store::{Conversation, ConversationStore};
use crate::auth::{AuthError, AuthProvider, SignUpOutcome};
use crate::exchange::ChatExchange;
use crate::forms::{Credentials, SignUpForm};
use crate::i18n::Locale;
use crate::models::{Message, User};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input, a turn already in flight, or nobody signed in. Nothing changed.
    Rejected,
    Replied(Message),
    /// The turn failed; carries the fixed message that was stored as `last_error`.
    Failed(String),
    /// The log was cleared while the turn was in flight; its outcome was dropped.
    Abandoned,
}

/// One signed-in chat session: the conversation store, the way to reach the
/// proxy, and the auth gate in front of both.
pub struct ChatSession {
    store: Arc<Mutex<ConversationStore>>,
    exchange: Arc<dyn ChatExchange>,
    auth: Arc<dyn AuthProvider>,
    locale: Locale,
}

impl ChatSession {
    pub fn new(exchange: Arc<dyn ChatExchange>, auth: Arc<dyn AuthProvider>, locale: Locale) -> Self {
        Self {
            store: Arc::new(Mutex::new(ConversationStore::new())),
            exchange,
            auth,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub async fn snapshot(&self) -> Conversation {
        self.store.lock().await.snapshot()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.auth.current_user().await
    }

    /// Runs one turn: append the user message, send the whole history, then
    /// append the reply or record the failure.
    #[tracing::instrument(name = "Send chat message.", skip_all)]
    pub async fn send(&self, text: &str) -> SendOutcome {
        // Taken before the auth check: a sign-out in between bumps it.
        let epoch = self.store.lock().await.epoch();
        if self.auth.current_user().await.is_none() {
            tracing::debug!("Send rejected: not authenticated");
            return SendOutcome::Rejected;
        }

        let text = text.trim();
        // The lock is released before the network call.
        let history = {
            let mut store = self.store.lock().await;
            if store.epoch() != epoch {
                tracing::debug!("Send rejected: signed out during the auth check");
                return SendOutcome::Rejected;
            }
            if store.append_user_message(text).is_none() {
                return SendOutcome::Rejected;
            }
            store.history()
        };

        let result = self.exchange.exchange(history).await;

        let mut store = self.store.lock().await;
        if store.epoch() != epoch {
            tracing::debug!("Dropping outcome of a cleared conversation");
            return SendOutcome::Abandoned;
        }

        match result {
            Ok(reply) => match store.append_assistant_message(&reply) {
                Some(message) => SendOutcome::Replied(message.clone()),
                None => SendOutcome::Abandoned,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Chat exchange failed");
                let message = self.locale.texts().exchange_failed;
                store.fail_exchange(message);
                SendOutcome::Failed(message.to_string())
            }
        }
    }

    /// "New chat": empties the log, keeps the user signed in.
    pub async fn clear(&self) {
        self.store.lock().await.clear();
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        self.auth.sign_in(credentials).await
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, AuthError> {
        self.auth.sign_up(form).await
    }

    /// The log is cleared even when the provider fails to sign out. The
    /// provider goes first so no send can pass the auth check after the clear.
    pub async fn sign_out(&self) {
        if let Err(err) = self.auth.sign_out().await {
            tracing::warn!(error = %err, "Sign out failed");
        }
        self.store.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DemoAuthProvider;
    use crate::exchange::ExchangeError;
    use crate::models::{ChatTurn, Role};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct StubExchange {
        reply: Result<String, String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<Vec<ChatTurn>>>,
        gate: Option<Arc<Notify>>,
    }

    impl StubExchange {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err("proxy answered 500".to_string()),
                ..Self::replying("")
            }
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }
    }

    #[async_trait]
    impl ChatExchange for StubExchange {
        async fn exchange(&self, history: Vec<ChatTurn>) -> Result<String, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().await.push(history);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply
                .clone()
                .map_err(|body| ExchangeError::Status { status: 500, body })
        }
    }

    async fn signed_in(exchange: Arc<StubExchange>) -> ChatSession {
        let session = ChatSession::new(exchange, Arc::new(DemoAuthProvider::default()), Locale::Ja);
        session
            .sign_in(&Credentials::new("pa@example.com", "secret1"))
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_successful_turn_appends_reply() {
        let exchange = Arc::new(StubExchange::replying("Hi there"));
        let session = signed_in(exchange.clone()).await;

        let outcome = session.send("Hello").await;
        assert!(matches!(outcome, SendOutcome::Replied(ref m) if m.content == "Hi there"));

        let conversation = session.snapshot().await;
        let turns: Vec<ChatTurn> = conversation.messages.iter().map(ChatTurn::from).collect();
        assert_eq!(
            turns,
            vec![
                ChatTurn::new(Role::User, "Hello"),
                ChatTurn::new(Role::Assistant, "Hi there")
            ]
        );
        assert!(!conversation.is_loading);
        assert!(conversation.last_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_turn_sets_fixed_error() {
        let session = signed_in(Arc::new(StubExchange::failing())).await;

        let outcome = session.send("Hello").await;
        let expected = Locale::Ja.texts().exchange_failed;
        assert_eq!(outcome, SendOutcome::Failed(expected.to_string()));

        let conversation = session.snapshot().await;
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].role, Role::User);
        assert_eq!(conversation.last_error.as_deref(), Some(expected));
        assert!(!conversation.is_loading);
    }

    #[tokio::test]
    async fn test_history_is_sent_in_full_every_turn() {
        let exchange = Arc::new(StubExchange::replying("ok"));
        let session = signed_in(exchange.clone()).await;

        session.send("one").await;
        session.send("two").await;

        let seen = exchange.seen.lock().await;
        assert_eq!(seen[0].len(), 1);
        assert_eq!(
            seen[1],
            vec![
                ChatTurn::new(Role::User, "one"),
                ChatTurn::new(Role::Assistant, "ok"),
                ChatTurn::new(Role::User, "two"),
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_without_request() {
        let exchange = Arc::new(StubExchange::replying("ok"));
        let session = signed_in(exchange.clone()).await;

        assert_eq!(session.send("   ").await, SendOutcome::Rejected);
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 0);
        assert!(session.snapshot().await.messages.is_empty());
    }

    #[tokio::test]
    async fn test_send_requires_authentication() {
        let exchange = Arc::new(StubExchange::replying("ok"));
        let session = ChatSession::new(
            exchange.clone(),
            Arc::new(DemoAuthProvider::default()),
            Locale::Ja,
        );

        assert_eq!(session.send("Hello").await, SendOutcome::Rejected);
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_second_send_while_in_flight_is_noop() {
        let gate = Arc::new(Notify::new());
        let exchange = Arc::new(StubExchange::replying("Hi there").gated(gate.clone()));
        let session = Arc::new(signed_in(exchange.clone()).await);

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.send("Hello").await })
        };
        while !session.snapshot().await.is_loading {
            tokio::task::yield_now().await;
        }

        assert_eq!(session.send("Hello again").await, SendOutcome::Rejected);
        assert_eq!(session.snapshot().await.messages.len(), 1);

        gate.notify_one();
        assert!(matches!(first.await.unwrap(), SendOutcome::Replied(_)));
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.snapshot().await.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_clear_during_flight_drops_reply() {
        let gate = Arc::new(Notify::new());
        let exchange = Arc::new(StubExchange::replying("late").gated(gate.clone()));
        let session = Arc::new(signed_in(exchange).await);

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.send("Hello").await })
        };
        while !session.snapshot().await.is_loading {
            tokio::task::yield_now().await;
        }

        session.clear().await;
        gate.notify_one();

        assert_eq!(first.await.unwrap(), SendOutcome::Abandoned);
        assert!(session.snapshot().await.messages.is_empty());
    }

    /// Demo provider whose next `current_user` call reports the user it saw,
    /// but only after `release` fires.
    struct PausingAuth {
        inner: DemoAuthProvider,
        armed: std::sync::atomic::AtomicBool,
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl AuthProvider for PausingAuth {
        async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
            self.inner.sign_in(credentials).await
        }

        async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, AuthError> {
            self.inner.sign_up(form).await
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.inner.sign_out().await
        }

        async fn current_user(&self) -> Option<User> {
            let user = self.inner.current_user().await;
            if self.armed.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            user
        }
    }

    #[tokio::test]
    async fn test_sign_out_during_auth_check_rejects_send() {
        let exchange = Arc::new(StubExchange::replying("reply"));
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let auth = Arc::new(PausingAuth {
            inner: DemoAuthProvider::default(),
            armed: std::sync::atomic::AtomicBool::new(false),
            entered: entered.clone(),
            release: release.clone(),
        });
        let session = Arc::new(ChatSession::new(exchange.clone(), auth.clone(), Locale::Ja));
        session
            .sign_in(&Credentials::new("pa@example.com", "secret1"))
            .await
            .unwrap();
        auth.armed.store(true, Ordering::SeqCst);

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.send("Hello").await })
        };
        entered.notified().await;
        session.sign_out().await;
        release.notify_one();

        assert_eq!(pending.await.unwrap(), SendOutcome::Rejected);
        assert!(session.current_user().await.is_none());
        assert!(session.snapshot().await.messages.is_empty());
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sign_out_clears_log() {
        let session = signed_in(Arc::new(StubExchange::replying("ok"))).await;
        session.send("Hello").await;
        assert_eq!(session.snapshot().await.messages.len(), 2);

        session.sign_out().await;

        assert!(session.snapshot().await.messages.is_empty());
        assert!(session.current_user().await.is_none());
    }
}
