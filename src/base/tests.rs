use crate::base::cookieerror::CookieError;

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(CookieError::InvalidUrl.code(), "invalid_url");
    assert_eq!(CookieError::InvalidCookieValues.code(), "invalid_cookie_values");
    assert_eq!(
        CookieError::domain_mismatch("example.com", "other.com").code(),
        "domain_mismatch"
    );
    assert_eq!(CookieError::Unsupported("nope").code(), "unsupported");
    assert_eq!(CookieError::store_failure("boom").code(), "store_failure");
}

#[test]
fn test_domain_mismatch_message_carries_both_values() {
    let err = CookieError::domain_mismatch("example.com", "other.com");
    let message = err.to_string();
    assert!(message.contains("example.com"));
    assert!(message.contains("other.com"));
    assert!(message.contains("mismatched"));
}

#[test]
fn test_validation_errors() {
    assert!(CookieError::InvalidUrl.is_validation_error());
    assert!(CookieError::domain_mismatch("a", "b").is_validation_error());
    assert!(!CookieError::Unsupported("x").is_validation_error());
    assert!(!CookieError::store_failure("x").is_validation_error());
}

#[test]
fn test_invalid_url_message() {
    assert_eq!(
        CookieError::InvalidUrl.to_string(),
        "Invalid URL: It may be missing a protocol (ex. http:// or https://)."
    );
}
