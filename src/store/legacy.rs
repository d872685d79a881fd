//! Legacy synchronous cookie store.
//!
//! Models the pre-Lollipop Android `CookieManager`: every call completes
//! before it returns, the store cannot enumerate or delete single cookies,
//! and writes stay invisible to readers until a sync pass publishes them.

use super::{StoreAdapter, StoreCapabilities, StoreFuture};
use crate::base::cookieerror::{CookieError, CookieResult};
use crate::cookies::jar::CookieJar;
use crate::cookies::nativecookie::NativeCookie;
use std::future::ready;
use std::sync::Mutex;
use time::OffsetDateTime;
use url::Url;

/// A mutation waiting for the next sync pass.
#[derive(Debug, Clone)]
enum PendingWrite {
    Set(NativeCookie),
    RemoveAll,
    RemoveSession,
}

/// Synchronous store whose writes are published by [`sync`](StoreAdapter::sync).
pub struct LegacyCookieStore {
    published: CookieJar,
    pending: Mutex<Vec<PendingWrite>>,
    supports_http_only: bool,
}

impl LegacyCookieStore {
    pub fn new(supports_http_only: bool) -> Self {
        Self {
            published: CookieJar::new(),
            pending: Mutex::new(Vec::new()),
            supports_http_only,
        }
    }

    /// Number of writes not yet published.
    pub fn pending_writes(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    fn enqueue(&self, write: PendingWrite) -> CookieResult<()> {
        self.pending
            .lock()
            .map_err(|e| CookieError::store_failure(format!("legacy store lock poisoned: {}", e)))?
            .push(write);
        Ok(())
    }

    fn publish(&self) -> CookieResult<()> {
        let writes = std::mem::take(
            &mut *self
                .pending
                .lock()
                .map_err(|e| CookieError::store_failure(format!("legacy store lock poisoned: {}", e)))?,
        );

        let now = OffsetDateTime::now_utc();
        tracing::trace!(count = writes.len(), "publishing legacy cookie writes");
        for write in writes {
            match write {
                PendingWrite::Set(cookie) => self.published.set(cookie, now),
                PendingWrite::RemoveAll => {
                    self.published.clear();
                }
                PendingWrite::RemoveSession => {
                    self.published.remove_session_cookies();
                }
            }
        }
        Ok(())
    }
}

impl StoreAdapter for LegacyCookieStore {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities::legacy(self.supports_http_only)
    }

    fn set_cookie<'a>(&'a self, url: &'a Url, set_cookie: &'a str) -> StoreFuture<'a, bool> {
        let result = match NativeCookie::from_set_cookie(url, set_cookie, OffsetDateTime::now_utc()) {
            Some(mut cookie) => {
                cookie.http_only &= self.supports_http_only;
                self.enqueue(PendingWrite::Set(cookie)).map(|_| true)
            }
            None => Ok(false),
        };
        Box::pin(ready(result))
    }

    fn get_cookie<'a>(&'a self, url: &'a Url) -> StoreFuture<'a, Option<String>> {
        let header = self.published.cookie_header(url, OffsetDateTime::now_utc());
        Box::pin(ready(Ok(header)))
    }

    fn remove_all_cookies(&self) -> StoreFuture<'_, bool> {
        Box::pin(ready(self.enqueue(PendingWrite::RemoveAll).map(|_| true)))
    }

    fn remove_session_cookies(&self) -> StoreFuture<'_, bool> {
        Box::pin(ready(self.enqueue(PendingWrite::RemoveSession).map(|_| true)))
    }

    fn flush(&self) -> StoreFuture<'_, ()> {
        Box::pin(ready(self.publish()))
    }

    fn sync(&self) -> StoreFuture<'_, ()> {
        Box::pin(ready(self.publish()))
    }
}
