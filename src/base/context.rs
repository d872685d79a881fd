//! Ergonomic error context helpers.
//!
//! Provides an extension trait for converting errors raised by a store's
//! backing machinery (I/O, serialization, closed channels) into
//! context-rich [`CookieError::StoreFailure`] values.

use crate::base::cookieerror::CookieError;
use std::fmt::Display;

/// Extension trait for adding store context to foreign `Result`s.
pub trait StoreResultExt<T> {
    /// Wrap the error as a store failure, prefixed with the operation name.
    ///
    /// # Example
    /// ```ignore
    /// use cookiebridge::base::context::StoreResultExt;
    ///
    /// let json = std::fs::read_to_string(path).store_context("flush")?;
    /// // Error: "Cookie store failure: flush: No such file or directory"
    /// ```
    fn store_context(self, operation: &str) -> Result<T, CookieError>;
}

impl<T, E: Display> StoreResultExt<T> for Result<T, E> {
    fn store_context(self, operation: &str) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::store_failure(format!("{}: {}", operation, e)))
    }
}
