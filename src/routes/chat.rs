use crate::configuration::Settings;
use crate::connectors::{CompletionConnector, CompletionRequest};
use crate::forms::ChatRequest;
use crate::helpers::ErrorResponse;
use actix_web::{http::StatusCode, post, web, HttpResponse, ResponseError};
use serde_valid::Validate;
use std::fmt;
use std::sync::Arc;

/// Every proxy failure looks the same to the client: `500 {"error": <fixed message>}`.
/// Whether the provider or the proxy itself failed is only visible in the logs.
#[derive(Debug)]
pub struct ChatFailure {
    message: &'static str,
}

impl ChatFailure {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl fmt::Display for ChatFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ChatFailure {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        ErrorResponse::new(self.message).response(self.status_code())
    }
}

/// POST /api/chat
/// Forwards the caller's full history to the provider and relays its JSON body untouched.
#[tracing::instrument(name = "Chat exchange.", skip_all)]
#[post("/chat")]
pub async fn chat_handler(
    form: web::Json<ChatRequest>,
    connector: web::Data<Arc<dyn CompletionConnector>>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, ChatFailure> {
    let failure = ChatFailure::new(settings.locale.texts().upstream_failed);
    let form = form.into_inner();

    if let Err(errors) = form.validate() {
        tracing::error!(errors = %errors, "Rejected chat request");
        return Err(failure);
    }

    tracing::info!(messages = form.messages.len(), "Forwarding chat history");
    let request = CompletionRequest::new(&settings.upstream, settings.locale, form.messages);

    match connector.complete(request).await {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(err) if err.is_upstream() => {
            tracing::error!(error = %err, "Upstream provider returned an error");
            Err(failure)
        }
        Err(err) => {
            tracing::error!(error = %err, "Chat proxy fault");
            Err(failure)
        }
    }
}
