//! Helpers for integrating with the Instamojo payment platform.
//!
//! - **Links** ([`LinkBuilder`]) — pre-filled offer URLs, with optional
//!   HMAC-SHA1 signing of the read-only fields so buyers cannot edit them
//! - **Payment requests** ([`PaymentRequestClient`]) — create a payment request
//!   through the REST API (requires the `full` feature)
//!
//! # Quick example
//!
//! ```
//! use instamojo::{LinkBuilder, Offer};
//!
//! let link = LinkBuilder::new(Offer::url("www.instamojo.com/demo/demo-offer/"))
//!     .name("Aditya Sengupta")
//!     .email("aditya@instamojo.com")
//!     .readonly("name")
//!     .sign_with("s3cr3t")
//!     .build()
//!     .unwrap();
//! assert!(link.as_str().contains("data_sign=2e990fc5f3a86e386a7e59071398637d57bdcfca"));
//! ```

// Core types
pub mod constants;
pub mod error;
pub mod fields;

// Signing and link rendering (no I/O)
pub mod link;
pub mod signing;

// REST client
#[cfg(feature = "full")]
pub mod payment_request;

pub use constants::*;
pub use error::{InstamojoError, Result};
pub use fields::{FieldMap, FieldValue};
pub use link::{Intent, Link, LinkBuilder, Offer};

#[cfg(feature = "full")]
pub use payment_request::{quantize_amount, PaymentRequest, PaymentRequestClient};
