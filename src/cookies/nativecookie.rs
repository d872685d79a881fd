use crate::cookies::date;
use crate::cookies::domain::{self, DomainMatchPolicy};
use time::{Duration, OffsetDateTime};
use url::Url;

/// A cookie as held by a native store.
///
/// This is the structured handle returned by store enumeration and accepted
/// by targeted deletion. Identity is `(name, domain, path)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeCookie {
    pub name: String,
    pub value: String,
    /// Lower-case, without a leading dot.
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub version: Option<u32>,
}

impl NativeCookie {
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            secure: false,
            http_only: false,
            host_only: true,
            version: None,
        }
    }

    /// Build a cookie from a `Set-Cookie` value received for `url`.
    ///
    /// Returns `None` when the line does not parse, has an empty name, or
    /// names a domain that does not cover the URL's host.
    pub fn from_set_cookie(url: &Url, line: &str, now: OffsetDateTime) -> Option<Self> {
        let parsed = match cookie::Cookie::parse(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(line = %line, error = %e, "failed to parse Set-Cookie");
                return None;
            }
        };

        if parsed.name().is_empty() {
            return None;
        }

        let host = url.host_str()?.to_ascii_lowercase();

        let (domain, host_only) = match parsed.domain() {
            Some(d) if !d.is_empty() => {
                let d = domain::strip_leading_dot(d).to_ascii_lowercase();
                if !domain::domain_matches(&host, &d, DomainMatchPolicy::Suffix) {
                    tracing::debug!(host = %host, domain = %d, "store rejected foreign cookie domain");
                    return None;
                }
                (d, false)
            }
            _ => (host, true),
        };

        let path = parsed
            .path()
            .filter(|p| p.starts_with('/'))
            .unwrap_or("/")
            .to_string();

        // Max-Age wins over Expires.
        let expiration_time = match parsed.max_age() {
            Some(max_age) => Some(date::expiry_from_max_age(
                now,
                Duration::seconds(max_age.whole_seconds()),
            )),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        Some(Self {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            creation_time: now,
            expiration_time,
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            host_only,
            version: version_attribute(line),
        })
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        match self.expiration_time {
            Some(expiry) => expiry <= current_time,
            None => false,
        }
    }

    /// Session cookies have no expiry and die with the store's session.
    pub fn is_session(&self) -> bool {
        self.expiration_time.is_none()
    }

    pub fn same_identity(&self, other: &NativeCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }
}

/// The `Version` attribute of a `Set-Cookie` line, which the `cookie` crate skips.
pub(crate) fn version_attribute(line: &str) -> Option<u32> {
    line.split(';').skip(1).find_map(|attribute| {
        let (name, value) = attribute.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("version") {
            return None;
        }
        value.trim().trim_matches('"').parse().ok()
    })
}
