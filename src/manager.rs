//! Public cookie operations.
//!
//! [`CookieManager`] validates and serializes caller input, picks the store
//! an operation targets, and adapts the store's answer back into
//! [`CookieMap`]s. Every operation resolves to exactly one outcome; a
//! validation error is returned before any store is touched.

use crate::base::cookieerror::{
    CookieError, CookieResult, ALTERNATE_STORE_NOT_AVAILABLE, CLEAR_BY_NAME_NOT_SUPPORTED,
    GET_ALL_NOT_SUPPORTED,
};
use crate::config::{AlternateStorePolicy, CookieManagerConfig};
use crate::cookies::descriptor::{CookieDescriptor, CookieMap};
use crate::cookies::deserializer;
use crate::cookies::domain::{self, DomainMatchPolicy};
use crate::cookies::serializer;
use crate::cookies::validator::{self, ValidationOptions};
use crate::store::legacy::LegacyCookieStore;
use crate::store::system::SystemCookieStore;
use crate::store::webengine::WebEngineCookieStore;
use crate::store::{StoreAdapter, StoreCapabilities};
use http::header::{HeaderMap, SET_COOKIE};
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;

/// Bridge between application cookie descriptors and a native cookie store.
///
/// Cloning is cheap; clones share the same stores.
#[derive(Clone)]
pub struct CookieManager {
    primary: Arc<dyn StoreAdapter>,
    alternate: Option<Arc<dyn StoreAdapter>>,
    config: CookieManagerConfig,
}

impl CookieManager {
    /// Create a manager for the detected platform.
    pub fn new() -> CookieResult<Self> {
        Self::with_config(CookieManagerConfig::default())
    }

    /// Create a manager backed by the reference stores for `config.platform`.
    ///
    /// The flush file is only honored by the asynchronous system store.
    pub fn with_config(config: CookieManagerConfig) -> CookieResult<Self> {
        let platform = config.platform;
        let capabilities = platform.primary_capabilities();

        let primary: Arc<dyn StoreAdapter> = if platform.uses_legacy_store() {
            Arc::new(LegacyCookieStore::new(platform.supports_http_only()))
        } else if let Some(path) = &config.flush_file {
            Arc::new(SystemCookieStore::with_flush_file(capabilities, path.clone())?)
        } else {
            Arc::new(SystemCookieStore::new(capabilities))
        };

        let alternate: Option<Arc<dyn StoreAdapter>> = match platform.alternate_store_policy() {
            AlternateStorePolicy::WebEngine => Some(Arc::new(WebEngineCookieStore::spawn()?)),
            AlternateStorePolicy::Ignored | AlternateStorePolicy::Unavailable => None,
        };

        Ok(Self::with_stores(config, primary, alternate))
    }

    /// Create a manager over caller-provided stores.
    pub fn with_stores(
        config: CookieManagerConfig,
        primary: Arc<dyn StoreAdapter>,
        alternate: Option<Arc<dyn StoreAdapter>>,
    ) -> Self {
        tracing::debug!(
            platform = ?config.platform,
            primary = primary.name(),
            alternate = alternate.as_ref().map(|s| s.name()),
            "cookie manager created"
        );
        Self {
            primary,
            alternate,
            config,
        }
    }

    pub fn config(&self) -> &CookieManagerConfig {
        &self.config
    }

    /// Set a cookie described by `descriptor` for `url`.
    ///
    /// Resolves to `false` when the store refused the serialized cookie.
    pub async fn set(
        &self,
        url: &str,
        descriptor: &CookieDescriptor,
        use_alternate_store: bool,
    ) -> CookieResult<bool> {
        let store = self.select_store(use_alternate_store)?;
        let capabilities = store.capabilities();

        let cookie = validator::validate(url, descriptor, &self.validation_options(capabilities))?;
        let target = validator::parse_target_url(url)?;
        let line = serializer::to_set_cookie_string(
            &cookie,
            capabilities.supports_http_only,
            OffsetDateTime::now_utc(),
        );

        tracing::debug!(url = %target, store = store.name(), cookie = %cookie.name, "setting cookie");
        let accepted = store.set_cookie(&target, &line).await?;
        sync_if_required(store).await?;
        Ok(accepted)
    }

    /// Store a raw `Set-Cookie` value for `url` in the primary store.
    pub async fn set_from_raw_header(&self, url: &str, header: Option<&str>) -> CookieResult<bool> {
        let target = validator::parse_target_url(url)?;
        let header = header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(CookieError::InvalidCookieValues)?;

        let store = self.primary.as_ref();
        let accepted = store.set_cookie(&target, header).await?;
        sync_if_required(store).await?;
        Ok(accepted)
    }

    /// Cookies that apply to `url`, keyed by name.
    pub async fn get(&self, url: &str, use_alternate_store: bool) -> CookieResult<CookieMap> {
        let target = validator::parse_target_url(url)?;
        let host = target.host_str().unwrap_or_default();

        let store = self.select_store(use_alternate_store)?;
        let capabilities = store.capabilities();
        let now = OffsetDateTime::now_utc();

        if capabilities.supports_enumeration {
            let cookies = store.get_all_cookies().await?;
            Ok(deserializer::records_for_host(
                host,
                &cookies,
                self.config.domain_match,
                capabilities.supports_http_only,
                now,
            ))
        } else {
            let header = store.get_cookie(&target).await?;
            Ok(deserializer::parse_all(
                header.as_deref(),
                capabilities.supports_http_only,
                now,
            ))
        }
    }

    /// Every cookie in the store, keyed by name.
    pub async fn get_all(&self, use_alternate_store: bool) -> CookieResult<CookieMap> {
        let store = self.select_store(use_alternate_store)?;
        let capabilities = store.capabilities();
        if !capabilities.supports_enumeration {
            return Err(CookieError::Unsupported(GET_ALL_NOT_SUPPORTED));
        }

        let cookies = store.get_all_cookies().await?;
        Ok(deserializer::records_from_native(
            &cookies,
            capabilities.supports_http_only,
            OffsetDateTime::now_utc(),
        ))
    }

    /// Remove every cookie.
    pub async fn clear_all(&self, use_alternate_store: bool) -> CookieResult<bool> {
        let store = self.select_store(use_alternate_store)?;
        let removed = store.remove_all_cookies().await?;
        sync_if_required(store).await?;
        tracing::debug!(store = store.name(), removed, "cleared all cookies");
        Ok(removed)
    }

    /// Remove cookies called `name` whose domain covers the host of `url`.
    ///
    /// Resolves to whether any such cookie was found.
    pub async fn clear_by_name(
        &self,
        url: &str,
        name: &str,
        use_alternate_store: bool,
    ) -> CookieResult<bool> {
        let target = validator::parse_target_url(url)?;
        let host = target.host_str().unwrap_or_default();

        let store = self.select_store(use_alternate_store)?;
        if !store.capabilities().supports_targeted_delete {
            return Err(CookieError::Unsupported(CLEAR_BY_NAME_NOT_SUPPORTED));
        }

        let mut found = false;
        for cookie in store.get_all_cookies().await? {
            if cookie.name == name
                && domain::domain_matches(host, &cookie.domain, DomainMatchPolicy::Suffix)
            {
                found = true;
                store.delete_cookie(&cookie).await?;
            }
        }

        sync_if_required(store).await?;
        tracing::debug!(url = %target, name, found, "cleared cookies by name");
        Ok(found)
    }

    /// Persist the primary store.
    pub async fn flush(&self) -> CookieResult<bool> {
        self.primary.flush().await?;
        Ok(true)
    }

    /// Remove cookies without an expiry from the primary store.
    pub async fn remove_session_cookies(&self) -> CookieResult<bool> {
        let store = self.primary.as_ref();
        let removed = store.remove_session_cookies().await?;
        sync_if_required(store).await?;
        Ok(removed)
    }

    /// Store every `Set-Cookie` header of a response received from `url`.
    ///
    /// Returns the name and value of each cookie the primary store accepted.
    pub async fn store_response_cookies(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> CookieResult<HashMap<String, String>> {
        let target = validator::parse_target_url(url)?;
        let store = self.primary.as_ref();
        let now = OffsetDateTime::now_utc();
        let mut stored = HashMap::new();

        for value in headers.get_all(SET_COOKIE) {
            let line = match value.to_str() {
                Ok(line) => line,
                Err(e) => {
                    tracing::debug!(url = %target, error = %e, "skipping non-ASCII Set-Cookie header");
                    continue;
                }
            };

            if !store.set_cookie(&target, line).await? {
                continue;
            }
            if let Some(record) = deserializer::parse_set_cookie(line, false, now) {
                stored.insert(record.name, record.value);
            }
        }

        sync_if_required(store).await?;
        Ok(stored)
    }

    fn select_store(&self, use_alternate_store: bool) -> CookieResult<&dyn StoreAdapter> {
        if !use_alternate_store {
            return Ok(self.primary.as_ref());
        }

        match self.config.platform.alternate_store_policy() {
            AlternateStorePolicy::Ignored => Ok(self.primary.as_ref()),
            AlternateStorePolicy::Unavailable => {
                Err(CookieError::Unsupported(ALTERNATE_STORE_NOT_AVAILABLE))
            }
            AlternateStorePolicy::WebEngine => self
                .alternate
                .as_deref()
                .ok_or(CookieError::Unsupported(ALTERNATE_STORE_NOT_AVAILABLE)),
        }
    }

    fn validation_options(&self, capabilities: StoreCapabilities) -> ValidationOptions {
        ValidationOptions {
            domain_match: self.config.domain_match,
            reject_public_suffix: self.config.reject_public_suffix,
            supports_http_only: capabilities.supports_http_only,
        }
    }
}

impl std::fmt::Debug for CookieManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieManager")
            .field("primary", &self.primary.name())
            .field("alternate", &self.alternate.as_ref().map(|s| s.name()))
            .field("config", &self.config)
            .finish()
    }
}

async fn sync_if_required(store: &dyn StoreAdapter) -> CookieResult<()> {
    if store.capabilities().requires_explicit_sync {
        store.sync().await?;
    }
    Ok(())
}
