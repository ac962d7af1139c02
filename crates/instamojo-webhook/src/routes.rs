use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::error::WebhookError;
use crate::record::{decode_form, format_record};
use crate::state::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Reject requests that are not form-encoded.
fn check_content_type(req: &HttpRequest) -> Result<(), WebhookError> {
    let value = req
        .headers()
        .get(header::CONTENT_TYPE)
        .ok_or(WebhookError::MissingContentType)?;
    let value = value
        .to_str()
        .map_err(|_| WebhookError::UnsupportedContentType("<non-ascii>".to_string()))?;

    // Ignore parameters such as `; charset=utf-8`
    let mime = value.split(';').next().unwrap_or_default().trim();
    if mime.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
        Ok(())
    } else {
        Err(WebhookError::UnsupportedContentType(mime.to_string()))
    }
}

/// POST (any path) - record a webhook payload
pub async fn receive(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, WebhookError> {
    check_content_type(&req)?;
    let pairs = decode_form(&body)?;

    state.log.append(&format_record(&pairs)).await?;
    tracing::info!(
        path = %req.path(),
        fields = pairs.len(),
        log = %state.log.path().display(),
        "webhook recorded"
    );

    Ok(HttpResponse::Ok().content_type("text/html").finish())
}

/// Every path routes to [`receive`]; methods other than POST get 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{path:.*}").route(web::post().to(receive)));
}
