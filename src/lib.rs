//! # cookiebridge
//!
//! Cookie management on top of native HTTP cookie stores.
//!
//! `cookiebridge` turns application-level cookie descriptors into RFC 6265
//! `Set-Cookie` strings, hands them to a platform cookie store, and reads
//! cookies back out as name-keyed maps. Stores differ in what they can do
//! (enumerate, delete one cookie, keep `HttpOnly`, publish writes lazily);
//! those differences are described by a capability descriptor and handled
//! in one place.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cookiebridge::config::{CookieManagerConfig, PlatformProfile};
//! use cookiebridge::cookies::descriptor::CookieDescriptor;
//! use cookiebridge::manager::CookieManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cookiebridge::base::cookieerror::CookieError> {
//!     let config = CookieManagerConfig::for_platform(PlatformProfile::Desktop);
//!     let manager = CookieManager::with_config(config)?;
//!
//!     let session = CookieDescriptor::new("session", "abc")
//!         .with_path("/")
//!         .with_expires("2030-01-01T00:00:00.000+00:00");
//!     manager.set("https://example.com", &session, false).await?;
//!
//!     let cookies = manager.get("https://example.com", false).await?;
//!     println!("session = {}", cookies["session"].value);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and error context helpers
//! - [`cookies`] - Date codec, validation, serialization and parsing
//! - [`store`] - Native store abstraction and reference stores
//! - [`config`] - Platform profiles and manager configuration
//! - [`manager`] - The public cookie operations

pub mod base;
pub mod config;
pub mod cookies;
pub mod manager;
pub mod store;
