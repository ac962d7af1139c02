//! Pre-filled (and optionally signed) offer links.
//!
//! ```
//! use instamojo::link::{LinkBuilder, Offer};
//!
//! let link = LinkBuilder::new(Offer::slug("demo", "demo-offer"))
//!     .name("A S")
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     link.as_str(),
//!     "https://www.instamojo.com/demo/demo-offer/?data_name=A+S"
//! );
//! ```

use std::fmt;

use rust_decimal::Decimal;

use crate::constants::{
    CUSTOM_FIELD_PREFIX, DEFAULT_ENDPOINT, FIELD_PREFIX, HIDDEN_KEY, INTENT_KEY, READONLY_KEY,
    RECOGNIZED_HOST_PREFIXES, SIGN_KEY,
};
use crate::error::{InstamojoError, Result};
use crate::fields::{FieldMap, FieldValue};
use crate::signing;

/// Where the offer lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// A full offer URL such as `www.instamojo.com/demo/demo-offer/`.
    Url(String),
    /// Offer addressed by seller username and offer slug.
    Slug { username: String, offer_slug: String },
}

impl Offer {
    pub fn url(url: impl Into<String>) -> Self {
        Offer::Url(url.into())
    }

    pub fn slug(username: impl Into<String>, offer_slug: impl Into<String>) -> Self {
        Offer::Slug {
            username: username.into(),
            offer_slug: offer_slug.into(),
        }
    }

    /// Resolve to a base URL rooted at `endpoint`.
    pub fn resolve(&self, endpoint: &str) -> Result<String> {
        match self {
            Offer::Url(url) => RECOGNIZED_HOST_PREFIXES
                .iter()
                .find_map(|prefix| url.strip_prefix(prefix))
                .map(|rest| format!("{endpoint}{rest}"))
                .ok_or_else(|| InstamojoError::Validation(format!("URL is not valid: {url}"))),
            Offer::Slug {
                username,
                offer_slug,
            } => Ok(format!("{endpoint}/{username}/{offer_slug}/")),
        }
    }
}

/// Purchase intent passed through to the offer page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Buy,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Buy => "buy",
        }
    }
}

/// A rendered offer link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    url: String,
}

impl Link {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Builder for offer links.
///
/// Field names given to [`readonly`](Self::readonly) and
/// [`hidden`](Self::hidden) are the bare names (`name`, `Field_48905`); the
/// `data_` namespace is added here.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    offer: Offer,
    endpoint: Option<String>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    amount: Option<Decimal>,
    intent: Option<Intent>,
    custom_fields: Vec<(String, String)>,
    readonly: Vec<String>,
    hidden: Vec<String>,
    salt: Option<String>,
}

impl LinkBuilder {
    pub fn new(offer: Offer) -> Self {
        Self {
            offer,
            endpoint: None,
            name: None,
            email: None,
            phone: None,
            amount: None,
            intent: None,
            custom_fields: Vec::new(),
            readonly: Vec::new(),
            hidden: Vec::new(),
            salt: None,
        }
    }

    /// Alternate endpoint base. Empty means the default.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Zero is treated as "not set" and omitted from the link.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Add a custom form field. Keys not starting with `Field_` are dropped
    /// when the link is built.
    pub fn custom_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_fields.push((key.into(), value.into()));
        self
    }

    pub fn readonly(mut self, field: impl Into<String>) -> Self {
        self.readonly.push(field.into());
        self
    }

    pub fn hidden(mut self, field: impl Into<String>) -> Self {
        self.hidden.push(field.into());
        self
    }

    /// Sign the read-only fields with the account salt.
    pub fn sign_with(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn build(self) -> Result<Link> {
        let endpoint = self
            .endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT);
        let base = self.offer.resolve(endpoint)?;

        let mut fields = FieldMap::new();
        let prefixed = |field: &str| format!("{FIELD_PREFIX}{field}");
        if let Some(name) = self.name {
            fields.insert(prefixed("name"), name);
        }
        if let Some(email) = self.email {
            fields.insert(prefixed("email"), email);
        }
        if let Some(phone) = self.phone {
            fields.insert(prefixed("phone"), phone);
        }
        if let Some(amount) = self.amount.filter(|a| !a.is_zero()) {
            fields.insert(prefixed("amount"), amount.to_string());
        }
        if let Some(intent) = self.intent {
            fields.insert(INTENT_KEY, intent.as_str());
        }
        for (key, value) in self.custom_fields {
            if key.starts_with(CUSTOM_FIELD_PREFIX) {
                fields.insert(prefixed(key.as_str()), value);
            } else {
                tracing::debug!(field = %key, "dropping unrecognized custom field");
            }
        }
        let mut fields = fields.without_empty();

        let readonly: Vec<String> = self.readonly.iter().map(|f| prefixed(f.as_str())).collect();
        let hidden: Vec<String> = self.hidden.iter().map(|f| prefixed(f.as_str())).collect();

        if let Some(salt) = self.salt {
            if salt.is_empty() {
                return Err(InstamojoError::Configuration(
                    "can't sign without salt".to_string(),
                ));
            }
            if readonly.is_empty() {
                return Err(InstamojoError::Configuration(
                    "specify which fields need to be signed (as readonly fields)".to_string(),
                ));
            }
            let to_sign = fields.subset(&readonly);
            let signature = signing::sign(&to_sign, &salt)?;
            fields.insert(SIGN_KEY, signature);
        }

        if !readonly.is_empty() {
            fields.insert(READONLY_KEY, FieldValue::List(readonly));
        }
        if !hidden.is_empty() {
            fields.insert(HIDDEN_KEY, FieldValue::List(hidden));
        }

        Ok(Link {
            url: format!("{base}?{}", fields.to_query_string()),
        })
    }
}
