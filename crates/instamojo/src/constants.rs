/// Default Instamojo web endpoint. Offer links are rooted here unless an
/// alternate endpoint is given.
pub const DEFAULT_ENDPOINT: &str = "https://www.instamojo.com";

/// Host prefixes accepted for literal offer URLs, checked in order. The
/// matched prefix is swapped for the configured endpoint.
pub const RECOGNIZED_HOST_PREFIXES: [&str; 4] = [
    "https://www.instamojo.com",
    "http://www.instamojo.com",
    "instamojo.com",
    "www.instamojo.com",
];

/// Namespace tag for prefilled form fields (`name` becomes `data_name`).
pub const FIELD_PREFIX: &str = "data_";

/// Only custom fields whose key starts with this are forwarded.
pub const CUSTOM_FIELD_PREFIX: &str = "Field_";

/// Reserved query key carrying the link signature.
pub const SIGN_KEY: &str = "data_sign";

/// Reserved query key listing read-only fields.
pub const READONLY_KEY: &str = "data_readonly";

/// Reserved query key listing hidden fields.
pub const HIDDEN_KEY: &str = "data_hidden";

/// Query key for the purchase intent.
pub const INTENT_KEY: &str = "intent";

/// Payment request creation endpoint (API v1.1).
pub const PAYMENT_REQUEST_ENDPOINT: &str = "https://www.instamojo.com/api/1.1/payment-requests/";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Timeout for the outbound payment request call, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
