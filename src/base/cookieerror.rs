use thiserror::Error;

pub(crate) const INVALID_URL_MISSING_HTTP: &str =
    "Invalid URL: It may be missing a protocol (ex. http:// or https://).";
pub(crate) const GET_ALL_NOT_SUPPORTED: &str =
    "Get all cookies is not supported by this cookie store";
pub(crate) const CLEAR_BY_NAME_NOT_SUPPORTED: &str =
    "Cannot remove a single cookie by name from this cookie store";
pub(crate) const ALTERNATE_STORE_NOT_AVAILABLE: &str =
    "The web engine cookie store is not available on this platform version";

/// Errors reported by cookie operations.
///
/// Every variant maps to a stable [`code`](CookieError::code) so that binding
/// layers can reject promises with a machine-readable reason alongside the
/// human-readable message.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieError {
    /// The target URL could not be parsed or has no host.
    #[error("Invalid URL: It may be missing a protocol (ex. http:// or https://).")]
    InvalidUrl,

    /// Required cookie fields are missing, the domain is a public suffix,
    /// or the store refused the cookie.
    #[error("Unable to add cookie - invalid values")]
    InvalidCookieValues,

    /// The cookie domain cannot be set from the target URL's host.
    #[error("Cookie URL host {host} and domain {domain} mismatched. The cookie won't set correctly.")]
    DomainMismatch { host: String, domain: String },

    /// The operation is not available for this platform/store combination.
    #[error("{0}")]
    Unsupported(&'static str),

    /// The underlying store raised an error.
    #[error("Cookie store failure: {message}")]
    StoreFailure { message: String },
}

impl CookieError {
    /// Stable error code for the binding boundary.
    pub fn code(&self) -> &'static str {
        match self {
            CookieError::InvalidUrl => "invalid_url",
            CookieError::InvalidCookieValues => "invalid_cookie_values",
            CookieError::DomainMismatch { .. } => "domain_mismatch",
            CookieError::Unsupported(_) => "unsupported",
            CookieError::StoreFailure { .. } => "store_failure",
        }
    }

    /// Create a domain mismatch error.
    pub fn domain_mismatch(host: impl Into<String>, domain: impl Into<String>) -> Self {
        CookieError::DomainMismatch {
            host: host.into(),
            domain: domain.into(),
        }
    }

    /// Create a store failure carrying the native message.
    pub fn store_failure(message: impl Into<String>) -> Self {
        CookieError::StoreFailure {
            message: message.into(),
        }
    }

    /// Whether this error was raised before the store was touched.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CookieError::InvalidUrl
                | CookieError::InvalidCookieValues
                | CookieError::DomainMismatch { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type CookieResult<T> = Result<T, CookieError>;
