//! Instamojo webhook receiver — appends each form-encoded POST to a log file.
//!
//! The platform posts payment events as `application/x-www-form-urlencoded`
//! bodies. Every request is decoded and written as one record of `key: value`
//! lines followed by a separator line. Incoming signatures are not verified.
//!
//! # Modules
//!
//! - [`config`] — Listener configuration ([`WebhookConfig`](config::WebhookConfig))
//! - [`record`] — Form decoding and record formatting
//! - [`state`] — Shared [`AppState`](state::AppState) holding the serialized log sink
//! - [`routes`] — The catch-all POST endpoint
//! - [`error`] — Request errors mapped to 4xx responses

pub mod config;
pub mod error;
pub mod record;
pub mod routes;
pub mod state;

pub use config::{ConfigError, WebhookConfig};
pub use error::WebhookError;
pub use state::{AppState, WebhookLog};
