//! Cookie manager configuration.
//!
//! The platform profile is fixed once when the manager is built; it decides
//! which reference store backs the manager, what that store can do, and how
//! requests for the alternate (web-engine) store are handled.

use crate::cookies::domain::DomainMatchPolicy;
use crate::store::StoreCapabilities;
use std::path::PathBuf;

/// First Android API level with the asynchronous cookie manager.
pub const ANDROID_ASYNC_STORE_API_LEVEL: u32 = 21;

/// First Android API level whose cookie manager keeps `HttpOnly`.
pub const ANDROID_HTTP_ONLY_API_LEVEL: u32 = 24;

/// First iOS major version with a web-engine cookie store.
pub const IOS_WEB_ENGINE_STORE_VERSION: u32 = 11;

/// The platform whose cookie store behavior is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformProfile {
    Android { api_level: u32 },
    Ios { major_version: u32 },
    Desktop,
}

/// How `use_alternate_store` is treated on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlternateStorePolicy {
    /// The flag is accepted and silently ignored.
    Ignored,
    /// Requesting the alternate store fails.
    Unavailable,
    /// The web-engine store serves the request.
    WebEngine,
}

impl PlatformProfile {
    /// Best guess for the compilation target.
    pub fn detect() -> Self {
        if cfg!(target_os = "android") {
            PlatformProfile::Android {
                api_level: ANDROID_HTTP_ONLY_API_LEVEL,
            }
        } else if cfg!(target_os = "ios") {
            PlatformProfile::Ios {
                major_version: IOS_WEB_ENGINE_STORE_VERSION,
            }
        } else {
            PlatformProfile::Desktop
        }
    }

    pub fn supports_http_only(&self) -> bool {
        match *self {
            PlatformProfile::Android { api_level } => api_level >= ANDROID_HTTP_ONLY_API_LEVEL,
            PlatformProfile::Ios { .. } | PlatformProfile::Desktop => true,
        }
    }

    /// Whether the primary store is the synchronous legacy store.
    pub fn uses_legacy_store(&self) -> bool {
        matches!(*self, PlatformProfile::Android { api_level } if api_level < ANDROID_ASYNC_STORE_API_LEVEL)
    }

    /// Capabilities of the primary store.
    pub fn primary_capabilities(&self) -> StoreCapabilities {
        match self {
            PlatformProfile::Android { .. } if self.uses_legacy_store() => {
                StoreCapabilities::legacy(self.supports_http_only())
            }
            PlatformProfile::Android { .. } => {
                StoreCapabilities::header_only(self.supports_http_only())
            }
            PlatformProfile::Ios { .. } | PlatformProfile::Desktop => {
                StoreCapabilities::structured()
            }
        }
    }

    pub fn alternate_store_policy(&self) -> AlternateStorePolicy {
        match *self {
            PlatformProfile::Android { .. } => AlternateStorePolicy::Ignored,
            PlatformProfile::Ios { major_version } if major_version < IOS_WEB_ENGINE_STORE_VERSION => {
                AlternateStorePolicy::Unavailable
            }
            PlatformProfile::Ios { .. } | PlatformProfile::Desktop => AlternateStorePolicy::WebEngine,
        }
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::detect()
    }
}

/// Configuration options for [`CookieManager`](crate::manager::CookieManager).
#[derive(Clone)]
pub struct CookieManagerConfig {
    /// Platform whose store semantics are modelled.
    pub platform: PlatformProfile,

    /// How a descriptor's domain is checked against the target host.
    pub domain_match: DomainMatchPolicy,

    /// Reject descriptor domains that are public suffixes.
    pub reject_public_suffix: bool,

    /// File the primary store is loaded from and flushed to (None = memory only).
    pub flush_file: Option<PathBuf>,
}

impl Default for CookieManagerConfig {
    fn default() -> Self {
        Self {
            platform: PlatformProfile::default(),
            domain_match: DomainMatchPolicy::Suffix,
            reject_public_suffix: true,
            flush_file: None,
        }
    }
}

impl CookieManagerConfig {
    /// Default configuration for `platform`.
    pub fn for_platform(platform: PlatformProfile) -> Self {
        Self {
            platform,
            ..Default::default()
        }
    }
}

impl std::fmt::Debug for CookieManagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieManagerConfig")
            .field("platform", &self.platform)
            .field("domain_match", &self.domain_match)
            .field("reject_public_suffix", &self.reject_public_suffix)
            .field("flush_file", &self.flush_file.as_ref().map(|p| p.display().to_string()))
            .finish()
    }
}
