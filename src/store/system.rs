//! Asynchronous system cookie store.
//!
//! Stands in for the platform's shared cookie storage (the modern Android
//! `CookieManager`, or the URL-session cookie storage on iOS). Capabilities
//! are configurable so the same store can play either role.
//!
//! When constructed with a flush file, cookies are loaded from it on
//! construction and written back on [`flush`](StoreAdapter::flush).

use super::{StoreAdapter, StoreCapabilities, StoreFuture};
use crate::base::context::StoreResultExt;
use crate::base::cookieerror::{
    CookieError, CookieResult, CLEAR_BY_NAME_NOT_SUPPORTED, GET_ALL_NOT_SUPPORTED,
};
use crate::cookies::jar::CookieJar;
use crate::cookies::nativecookie::NativeCookie;
use crate::cookies::persistence;
use std::path::PathBuf;
use time::OffsetDateTime;
use url::Url;

pub struct SystemCookieStore {
    jar: CookieJar,
    capabilities: StoreCapabilities,
    flush_file: Option<PathBuf>,
}

impl SystemCookieStore {
    /// Create an in-memory store.
    ///
    /// `requires_explicit_sync` is ignored; this store publishes writes immediately.
    pub fn new(capabilities: StoreCapabilities) -> Self {
        Self {
            jar: CookieJar::new(),
            capabilities: StoreCapabilities {
                requires_explicit_sync: false,
                ..capabilities
            },
            flush_file: None,
        }
    }

    /// Create a store backed by `path`, loading any cookies already there.
    pub fn with_flush_file(capabilities: StoreCapabilities, path: PathBuf) -> CookieResult<Self> {
        let mut store = Self::new(capabilities);

        if path.exists() {
            let count = persistence::load_cookies(&store.jar, &path, OffsetDateTime::now_utc())
                .store_context("load flush file")?;
            tracing::debug!(path = %path.display(), count, "loaded cookies from flush file");
        }

        store.flush_file = Some(path);
        Ok(store)
    }

    pub fn cookie_count(&self) -> usize {
        self.jar.total_cookie_count()
    }
}

impl StoreAdapter for SystemCookieStore {
    fn name(&self) -> &'static str {
        "system"
    }

    fn capabilities(&self) -> StoreCapabilities {
        self.capabilities
    }

    fn set_cookie<'a>(&'a self, url: &'a Url, set_cookie: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let now = OffsetDateTime::now_utc();
            match NativeCookie::from_set_cookie(url, set_cookie, now) {
                Some(mut cookie) => {
                    cookie.http_only &= self.capabilities.supports_http_only;
                    self.jar.set(cookie, now);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    fn get_cookie<'a>(&'a self, url: &'a Url) -> StoreFuture<'a, Option<String>> {
        Box::pin(async move { Ok(self.jar.cookie_header(url, OffsetDateTime::now_utc())) })
    }

    fn get_all_cookies(&self) -> StoreFuture<'_, Vec<NativeCookie>> {
        Box::pin(async move {
            if !self.capabilities.supports_enumeration {
                return Err(CookieError::Unsupported(GET_ALL_NOT_SUPPORTED));
            }
            Ok(self.jar.all_cookies(OffsetDateTime::now_utc()))
        })
    }

    fn delete_cookie<'a>(&'a self, cookie: &'a NativeCookie) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            if !self.capabilities.supports_targeted_delete {
                return Err(CookieError::Unsupported(CLEAR_BY_NAME_NOT_SUPPORTED));
            }
            Ok(self.jar.delete(cookie))
        })
    }

    fn remove_all_cookies(&self) -> StoreFuture<'_, bool> {
        Box::pin(async move { Ok(self.jar.clear()) })
    }

    fn remove_session_cookies(&self) -> StoreFuture<'_, bool> {
        Box::pin(async move { Ok(self.jar.remove_session_cookies()) })
    }

    fn flush(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let Some(path) = self.flush_file.clone() else {
                return Ok(());
            };

            let jar = self.jar.clone();
            tokio::task::spawn_blocking(move || {
                persistence::save_cookies(&jar, &path, OffsetDateTime::now_utc())
            })
            .await
            .store_context("flush task")?
            .store_context("flush")
        })
    }
}
