//! Cookie normalization, serialization and parsing.
//!
//! This module is the backend-agnostic core shared by every store:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`date`] | Descriptor (ISO 8601) and wire (RFC 1123) date codec |
//! | [`domain`] | Host/domain matching and public suffix checks |
//! | [`validator`] | [`CookieDescriptor`](descriptor::CookieDescriptor) → [`EffectiveCookie`](validator::EffectiveCookie) |
//! | [`serializer`] | [`EffectiveCookie`](validator::EffectiveCookie) → `Set-Cookie` string |
//! | [`deserializer`] | header strings / native handles → [`CookieMap`](descriptor::CookieMap) |
//! | [`jar`], [`nativecookie`], [`persistence`] | In-memory jar used by the reference stores |
//!
//! All functions here are synchronous, reentrant and hold no shared state;
//! the current time is passed in explicitly where it matters.
//!
//! ```rust
//! use cookiebridge::cookies::descriptor::CookieDescriptor;
//! use cookiebridge::cookies::serializer::to_set_cookie_string;
//! use cookiebridge::cookies::validator::{validate, ValidationOptions};
//!
//! let descriptor = CookieDescriptor::new("session", "abc").with_secure(true);
//! let cookie = validate("https://example.com", &descriptor, &ValidationOptions::default())?;
//! let wire = to_set_cookie_string(&cookie, true, time::OffsetDateTime::now_utc());
//! assert_eq!(wire, "session=abc; domain=example.com; path=/; secure");
//! # Ok::<(), cookiebridge::base::cookieerror::CookieError>(())
//! ```

pub mod date;
pub mod descriptor;
pub mod deserializer;
pub mod domain;
pub mod jar;
pub mod nativecookie;
pub mod persistence;
pub mod serializer;
pub mod validator;
