//! RFC 6265 `Set-Cookie` rendering.
//!
//! The output is handed to native stores verbatim, so the attribute order is
//! fixed: `name=value; expires=...; domain=...; path=...; secure; httponly; version=...`.

use crate::cookies::date::{self, DateFormat};
use crate::cookies::validator::EffectiveCookie;
use std::fmt::Write;
use time::OffsetDateTime;

/// Render `cookie` as a `Set-Cookie` value.
///
/// `expires` is emitted only when it lies after `now`; `httponly` only when
/// the store supports it.
pub fn to_set_cookie_string(
    cookie: &EffectiveCookie,
    supports_http_only: bool,
    now: OffsetDateTime,
) -> String {
    let mut out = String::with_capacity(cookie.name.len() + cookie.value.len() + 64);
    out.push_str(&cookie.name);
    out.push('=');
    out.push_str(&cookie.value);

    if let Some(expires) = cookie.expires.filter(|e| *e > now) {
        if let Some(formatted) = date::format(expires, DateFormat::Rfc1123) {
            let _ = write!(out, "; expires={}", formatted);
        }
    }

    if !cookie.domain.is_empty() {
        let _ = write!(out, "; domain={}", cookie.domain);
    }

    if !cookie.path.is_empty() {
        let _ = write!(out, "; path={}", cookie.path);
    }

    if cookie.secure {
        out.push_str("; secure");
    }

    if supports_http_only && cookie.http_only {
        out.push_str("; httponly");
    }

    if let Some(version) = cookie.version {
        let _ = write!(out, "; version={}", version);
    }

    out
}
