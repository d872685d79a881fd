//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): error taxonomy with stable codes
//! - [`StoreResultExt`](context::StoreResultExt): wraps foreign errors as store failures

pub mod context;
pub mod cookieerror;

#[cfg(test)]
mod tests;
