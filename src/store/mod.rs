//! Native cookie store abstraction.
//!
//! A [`StoreAdapter`] is the boundary between the cookie core and a
//! platform's cookie store. The core hands it validated `Set-Cookie` strings
//! and reads back raw headers or structured [`NativeCookie`] handles; the
//! store owns persistence and any thread affinity.
//!
//! What a store can do is described once by its [`StoreCapabilities`]
//! rather than by separate types, so callers branch on flags instead of
//! downcasting.
//!
//! Reference implementations:
//! - [`LegacyCookieStore`](legacy::LegacyCookieStore): synchronous, needs an explicit sync pass
//! - [`SystemCookieStore`](system::SystemCookieStore): asynchronous, optional flush file
//! - [`WebEngineCookieStore`](webengine::WebEngineCookieStore): every call hops to a dedicated thread

use crate::base::cookieerror::{
    CookieError, CookieResult, CLEAR_BY_NAME_NOT_SUPPORTED, GET_ALL_NOT_SUPPORTED,
};
use crate::cookies::nativecookie::NativeCookie;
use std::{future::Future, pin::Pin, sync::Arc};
use url::Url;

pub mod legacy;
pub mod system;
pub mod webengine;

/// Alias for the `Future` type returned by store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = CookieResult<T>> + Send + 'a>>;

/// What a store supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCapabilities {
    /// `get_all_cookies` returns structured handles.
    pub supports_enumeration: bool,
    /// `delete_cookie` can remove a single cookie.
    pub supports_targeted_delete: bool,
    /// The `HttpOnly` attribute is stored and reported.
    pub supports_http_only: bool,
    /// Mutations are only visible after `sync()`.
    pub requires_explicit_sync: bool,
}

impl StoreCapabilities {
    /// A legacy synchronous store.
    pub const fn legacy(supports_http_only: bool) -> Self {
        Self {
            supports_enumeration: false,
            supports_targeted_delete: false,
            supports_http_only,
            requires_explicit_sync: true,
        }
    }

    /// An asynchronous store that only exposes header-level access.
    pub const fn header_only(supports_http_only: bool) -> Self {
        Self {
            supports_enumeration: false,
            supports_targeted_delete: false,
            supports_http_only,
            requires_explicit_sync: false,
        }
    }

    /// A store with structured enumeration and targeted deletion.
    pub const fn structured() -> Self {
        Self {
            supports_enumeration: true,
            supports_targeted_delete: true,
            supports_http_only: true,
            requires_explicit_sync: false,
        }
    }
}

/// Trait for native cookie stores.
///
/// Implementations must be thread-safe. Every method returns a boxed future
/// so synchronous and callback-based stores share one interface; a
/// synchronous store simply does its work before returning a ready future.
pub trait StoreAdapter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> StoreCapabilities;

    /// Store a `Set-Cookie` value received for `url`.
    ///
    /// Overwrites a cookie with the same name/domain/path. Resolves to
    /// `false` when the store refuses the cookie.
    fn set_cookie<'a>(&'a self, url: &'a Url, set_cookie: &'a str) -> StoreFuture<'a, bool>;

    /// The `Cookie` header the store would send to `url`.
    fn get_cookie<'a>(&'a self, url: &'a Url) -> StoreFuture<'a, Option<String>>;

    /// Every cookie in the store.
    fn get_all_cookies(&self) -> StoreFuture<'_, Vec<NativeCookie>> {
        Box::pin(std::future::ready(Err(CookieError::Unsupported(
            GET_ALL_NOT_SUPPORTED,
        ))))
    }

    /// Remove the cookie identified by `cookie`. Resolves to whether it existed.
    fn delete_cookie<'a>(&'a self, cookie: &'a NativeCookie) -> StoreFuture<'a, bool> {
        let _ = cookie;
        Box::pin(std::future::ready(Err(CookieError::Unsupported(
            CLEAR_BY_NAME_NOT_SUPPORTED,
        ))))
    }

    /// Remove every cookie.
    fn remove_all_cookies(&self) -> StoreFuture<'_, bool>;

    /// Remove cookies without an expiry.
    fn remove_session_cookies(&self) -> StoreFuture<'_, bool>;

    /// Persist in-memory state to durable storage.
    fn flush(&self) -> StoreFuture<'_, ()> {
        Box::pin(std::future::ready(Ok(())))
    }

    /// Make pending mutations visible. Only meaningful with `requires_explicit_sync`.
    fn sync(&self) -> StoreFuture<'_, ()> {
        Box::pin(std::future::ready(Ok(())))
    }
}

/// Blanket implementation for Arc-wrapped stores.
impl<S: StoreAdapter + ?Sized> StoreAdapter for Arc<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn capabilities(&self) -> StoreCapabilities {
        (**self).capabilities()
    }

    fn set_cookie<'a>(&'a self, url: &'a Url, set_cookie: &'a str) -> StoreFuture<'a, bool> {
        (**self).set_cookie(url, set_cookie)
    }

    fn get_cookie<'a>(&'a self, url: &'a Url) -> StoreFuture<'a, Option<String>> {
        (**self).get_cookie(url)
    }

    fn get_all_cookies(&self) -> StoreFuture<'_, Vec<NativeCookie>> {
        (**self).get_all_cookies()
    }

    fn delete_cookie<'a>(&'a self, cookie: &'a NativeCookie) -> StoreFuture<'a, bool> {
        (**self).delete_cookie(cookie)
    }

    fn remove_all_cookies(&self) -> StoreFuture<'_, bool> {
        (**self).remove_all_cookies()
    }

    fn remove_session_cookies(&self) -> StoreFuture<'_, bool> {
        (**self).remove_session_cookies()
    }

    fn flush(&self) -> StoreFuture<'_, ()> {
        (**self).flush()
    }

    fn sync(&self) -> StoreFuture<'_, ()> {
        (**self).sync()
    }
}
