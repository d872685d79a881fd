use cookiebridge::cookies::date::{self, DateFormat};
use cookiebridge::cookies::descriptor::CookieDescriptor;
use cookiebridge::cookies::deserializer::{parse_all, parse_set_cookie};
use cookiebridge::cookies::jar::CookieJar;
use cookiebridge::cookies::nativecookie::NativeCookie;
use cookiebridge::cookies::serializer::to_set_cookie_string;
use cookiebridge::cookies::validator::{validate, ValidationOptions};
use time::macros::datetime;
use time::OffsetDateTime;
use url::Url;

fn now() -> OffsetDateTime {
    datetime!(2026-06-01 12:00:00 UTC)
}

fn save(jar: &CookieJar, url: &Url, line: &str) {
    let cookie = NativeCookie::from_set_cookie(url, line, now()).unwrap();
    jar.set(cookie, now());
}

#[test]
fn test_descriptor_to_wire_and_back() {
    let descriptor = CookieDescriptor::new("session", "abc123")
        .with_domain("example.com")
        .with_path("/app")
        .with_expires("2030-01-01T00:00:00.000+00:00")
        .with_secure(true)
        .with_http_only(true);

    let cookie = validate(
        "https://www.example.com",
        &descriptor,
        &ValidationOptions::default(),
    )
    .unwrap();
    let wire = to_set_cookie_string(&cookie, true, now());
    assert_eq!(
        wire,
        "session=abc123; expires=Tue, 01 Jan 2030 00:00:00 GMT; domain=example.com; path=/app; secure; httponly"
    );

    let record = parse_set_cookie(&wire, true, now()).unwrap();
    assert_eq!(record.name, "session");
    assert_eq!(record.value, "abc123");
    assert_eq!(record.domain.as_deref(), Some("example.com"));
    assert_eq!(record.path.as_deref(), Some("/app"));
    assert!(record.secure);
    assert_eq!(record.http_only, Some(true));
    assert_eq!(
        record.expires.as_deref().and_then(|e| date::parse(e, DateFormat::Descriptor)),
        Some(datetime!(2030-01-01 00:00:00 UTC))
    );
}

#[test]
fn test_parse_cookie_header() {
    let cookies = parse_all(Some("a=1; b=2"), true, now());
    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies["a"].value, "1");
    assert_eq!(cookies["b"].value, "2");
}

#[test]
fn test_jar_path_matching() {
    let jar = CookieJar::new();
    let url = Url::parse("https://example.com/foo/bar").unwrap();

    save(&jar, &url, "root=val; Path=/");
    save(&jar, &url, "foo=val; Path=/foo");
    save(&jar, &url, "baz=val; Path=/baz");

    let cookies = jar.cookies_for_url(&url, now());
    assert_eq!(cookies.len(), 2);
    // Longest path first
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[1].name, "root");
}

#[test]
fn test_jar_domain_matching() {
    let jar = CookieJar::new();
    let url = Url::parse("https://a.example.com").unwrap();

    save(&jar, &url, "host=val");
    save(&jar, &url, "domain=val; Domain=example.com");

    let sub = jar.cookies_for_url(&url, now());
    assert!(sub.iter().any(|c| c.name == "host"));
    assert!(sub.iter().any(|c| c.name == "domain"));

    let parent = jar.cookies_for_url(&Url::parse("https://example.com").unwrap(), now());
    assert_eq!(parent.len(), 1);
    assert_eq!(parent[0].name, "domain");
}

#[test]
fn test_jar_secure_flag() {
    let jar = CookieJar::new();
    let https_url = Url::parse("https://example.com").unwrap();
    let http_url = Url::parse("http://example.com").unwrap();

    save(&jar, &https_url, "sec=saved; Secure");

    assert_eq!(jar.cookies_for_url(&https_url, now()).len(), 1);
    assert!(jar.cookies_for_url(&http_url, now()).is_empty());
}

#[test]
fn test_jar_overwrite_and_expire() {
    let jar = CookieJar::new();
    let url = Url::parse("https://example.com").unwrap();

    save(&jar, &url, "a=1");
    save(&jar, &url, "a=2");
    assert_eq!(jar.cookie_header(&url, now()).as_deref(), Some("a=2"));

    save(&jar, &url, "a=3; Max-Age=0");
    assert_eq!(jar.cookie_header(&url, now()), None);
    assert_eq!(jar.total_cookie_count(), 0);
}
