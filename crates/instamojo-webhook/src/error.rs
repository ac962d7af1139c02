use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Errors raised while handling a webhook POST.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("missing Content-Type header")]
    MissingContentType,

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("malformed form body: {0}")]
    MalformedBody(String),

    #[error("failed to write webhook log: {0}")]
    Storage(#[from] std::io::Error),
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingContentType | WebhookError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            WebhookError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            WebhookError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            WebhookError::Storage(e) => {
                tracing::error!("Webhook log write failed: {}", e);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
            other => {
                tracing::warn!(error = %other, "rejected webhook request");
                let code = match other {
                    WebhookError::UnsupportedContentType(_) => "unsupported_media_type",
                    _ => "bad_request",
                };
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "error": code,
                    "message": other.to_string()
                }))
            }
        }
    }
}
