//! Client for the payment request creation API.
//!
//! One authenticated, form-encoded POST per call. No retries: a non-success
//! status comes back as [`InstamojoError::Remote`] with the body attached.

use std::time::Duration;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{
    API_KEY_HEADER, AUTH_TOKEN_HEADER, PAYMENT_REQUEST_ENDPOINT, REQUEST_TIMEOUT_SECS,
};
use crate::error::{InstamojoError, Result};

/// Round to exactly two fraction digits (banker's rounding), e.g. `12.3` ->
/// `"12.30"`, `1.005` -> `"1.00"`.
pub fn quantize_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded.to_string()
}

/// Details of a payment request to create.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub purpose: String,
    pub amount: Decimal,
    pub buyer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub redirect_url: Option<String>,
    pub webhook: Option<String>,
    pub allow_repeated_payments: bool,
    pub send_email: bool,
    pub send_sms: bool,
}

impl PaymentRequest {
    pub fn new(purpose: impl Into<String>, amount: Decimal) -> Self {
        Self {
            purpose: purpose.into(),
            amount,
            buyer_name: None,
            email: None,
            phone: None,
            redirect_url: None,
            webhook: None,
            allow_repeated_payments: false,
            send_email: false,
            send_sms: false,
        }
    }

    /// Form body. Unset optional fields are left out; booleans are sent as
    /// `True`/`False`.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("purpose", self.purpose.clone()),
            ("amount", quantize_amount(self.amount)),
        ];
        let optional = [
            ("buyer_name", &self.buyer_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("redirect_url", &self.redirect_url),
            ("webhook", &self.webhook),
        ];
        form.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone()))),
        );
        form.push((
            "allow_repeated_payments",
            form_bool(self.allow_repeated_payments),
        ));
        form.push(("send_email", form_bool(self.send_email)));
        form.push(("send_sms", form_bool(self.send_sms)));
        form
    }
}

fn form_bool(value: bool) -> String {
    let s = if value { "True" } else { "False" };
    s.to_string()
}

/// Authenticated client for the payment request API.
pub struct PaymentRequestClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    auth_token: String,
}

impl std::fmt::Debug for PaymentRequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentRequestClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

impl PaymentRequestClient {
    pub fn new(api_key: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: PAYMENT_REQUEST_ENDPOINT.to_string(),
            api_key: api_key.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Point the client at a different endpoint (sandbox, mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create a payment request and return the API's JSON response as-is.
    pub async fn create(&self, request: &PaymentRequest) -> Result<serde_json::Value> {
        let form = request.form_fields();
        tracing::info!(
            endpoint = %self.endpoint,
            purpose = %request.purpose,
            "creating payment request"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .header(AUTH_TOKEN_HEADER, &self.auth_token)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .form(&form)
            .send()
            .await
            .map_err(|e| InstamojoError::Http(format!("request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| InstamojoError::Http(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "payment request rejected");
            return Err(InstamojoError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_quantize_pads_and_rounds() {
        assert_eq!(quantize_amount(dec("12.3")), "12.30");
        assert_eq!(quantize_amount(dec("12")), "12.00");
        assert_eq!(quantize_amount(dec("12.345")), "12.34");
        assert_eq!(quantize_amount(dec("12.355")), "12.36");
        assert_eq!(quantize_amount(dec("9.999")), "10.00");
    }

    #[test]
    fn test_form_omits_unset_optionals() {
        let req = PaymentRequest::new("Test payment link", dec("12.34"));
        let form = req.form_fields();
        let keys: Vec<&str> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "purpose",
                "amount",
                "allow_repeated_payments",
                "send_email",
                "send_sms"
            ]
        );
        assert_eq!(form[2].1, "False");
    }

    #[test]
    fn test_form_includes_buyer_details() {
        let mut req = PaymentRequest::new("Test", dec("1"));
        req.buyer_name = Some("Aditya Sengupta".to_string());
        req.webhook = Some("https://example.com/hook".to_string());
        req.send_sms = true;
        let form = req.form_fields();
        assert!(form.contains(&("buyer_name", "Aditya Sengupta".to_string())));
        assert!(form.contains(&("webhook", "https://example.com/hook".to_string())));
        assert!(form.contains(&("amount", "1.00".to_string())));
        assert!(form.contains(&("send_sms", "True".to_string())));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let client = PaymentRequestClient::new("key-123", "token-456");
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("key-123"));
        assert!(!dbg.contains("token-456"));
    }
}
