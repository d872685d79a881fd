use crate::cookies::domain::{self, DomainMatchPolicy};
use crate::cookies::nativecookie::NativeCookie;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// In-memory cookie jar backing the reference stores.
///
/// Cookies are bucketed by domain. Cloning the jar yields another handle to
/// the same buckets.
#[derive(Clone)]
pub struct CookieJar {
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<NativeCookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Insert `cookie`, replacing any cookie with the same name/domain/path.
    ///
    /// An already-expired cookie deletes its counterpart instead of being stored.
    pub fn set(&self, cookie: NativeCookie, now: OffsetDateTime) {
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        entry.retain(|c| !c.same_identity(&cookie));

        if cookie.is_expired(now) {
            return;
        }

        // Enforce per-domain limit, evicting the oldest cookie first
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            let oldest_idx = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i);
            match oldest_idx {
                Some(idx) => {
                    entry.remove(idx);
                }
                None => break,
            }
        }

        entry.push(cookie);
    }

    /// Get live cookies that would be sent to `url`.
    pub fn cookies_for_url(&self, url: &Url, now: OffsetDateTime) -> Vec<NativeCookie> {
        let mut result = Vec::new();
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();

        for domain in Self::get_matching_domains(&host) {
            if let Some(entry) = self.store.get(&domain) {
                for cookie in entry.iter() {
                    if !Self::host_matches(cookie, &host) {
                        continue;
                    }
                    if !Self::path_matches(&cookie.path, url.path()) {
                        continue;
                    }
                    if cookie.secure && url.scheme() != "https" {
                        continue;
                    }
                    if cookie.is_expired(now) {
                        continue;
                    }
                    result.push(cookie.clone());
                }
            }
        }

        // Longest path first, then oldest first
        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    /// The `Cookie` request header for `url`, if any cookie applies.
    pub fn cookie_header(&self, url: &Url, now: OffsetDateTime) -> Option<String> {
        let header = self
            .cookies_for_url(url, now)
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");

        if header.is_empty() {
            None
        } else {
            Some(header)
        }
    }

    /// All live cookies, in no particular order.
    pub fn all_cookies(&self, now: OffsetDateTime) -> Vec<NativeCookie> {
        self.store
            .iter()
            .flat_map(|entry| entry.value().clone())
            .filter(|c| !c.is_expired(now))
            .collect()
    }

    /// Delete the cookie with the same identity as `cookie`.
    pub fn delete(&self, cookie: &NativeCookie) -> bool {
        match self.store.get_mut(&cookie.domain) {
            Some(mut entry) => {
                let before = entry.len();
                entry.retain(|c| !c.same_identity(cookie));
                entry.len() != before
            }
            None => false,
        }
    }

    /// Remove every cookie. Returns whether anything was removed.
    pub fn clear(&self) -> bool {
        let had_cookies = self.total_cookie_count() > 0;
        self.store.clear();
        had_cookies
    }

    /// Remove cookies without an expiry. Returns whether anything was removed.
    pub fn remove_session_cookies(&self) -> bool {
        let mut removed = false;
        for mut entry in self.store.iter_mut() {
            let before = entry.len();
            entry.retain(|c| !c.is_session());
            removed |= entry.len() != before;
        }
        removed
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    fn host_matches(cookie: &NativeCookie, host: &str) -> bool {
        if cookie.host_only {
            return cookie.domain.eq_ignore_ascii_case(host);
        }
        domain::domain_matches(host, &cookie.domain, DomainMatchPolicy::Suffix)
    }

    /// Check if request path matches cookie path (RFC 6265 path-match).
    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }

        if request_path.starts_with(cookie_path) {
            if cookie_path.ends_with('/') {
                return true;
            }
            return request_path[cookie_path.len()..].starts_with('/');
        }

        false
    }

    /// The host itself and all of its parent domains.
    fn get_matching_domains(host: &str) -> Vec<String> {
        let mut domains = vec![host.to_string()];

        // For "foo.bar.example.com", add "bar.example.com", "example.com"
        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }

        domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::Duration;

    fn now() -> OffsetDateTime {
        datetime!(2026-06-01 00:00:00 UTC)
    }

    fn set(jar: &CookieJar, url: &str, line: &str) {
        let url = Url::parse(url).unwrap();
        let cookie = NativeCookie::from_set_cookie(&url, line, now()).unwrap();
        jar.set(cookie, now());
    }

    #[test]
    fn test_overwrite_same_identity() {
        let jar = CookieJar::new();
        set(&jar, "https://example.com", "a=1");
        set(&jar, "https://example.com", "a=2");
        assert_eq!(jar.total_cookie_count(), 1);

        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(jar.cookie_header(&url, now()).unwrap(), "a=2");
    }

    #[test]
    fn test_parent_domain_cookie_visible_from_subdomain() {
        let jar = CookieJar::new();
        set(&jar, "https://a.example.com", "d=1; domain=example.com");
        set(&jar, "https://a.example.com", "h=1");

        let sub = Url::parse("https://a.example.com/").unwrap();
        let names: Vec<_> = jar.cookies_for_url(&sub, now()).into_iter().map(|c| c.name).collect();
        assert!(names.contains(&"d".to_string()));
        assert!(names.contains(&"h".to_string()));

        let other = Url::parse("https://b.example.com/").unwrap();
        let names: Vec<_> = jar.cookies_for_url(&other, now()).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["d".to_string()]);
    }

    #[test]
    fn test_path_and_secure_filtering() {
        let jar = CookieJar::new();
        set(&jar, "https://example.com", "root=1; path=/");
        set(&jar, "https://example.com", "foo=1; path=/foo");
        set(&jar, "https://example.com", "sec=1; secure");

        let http = Url::parse("http://example.com/bar").unwrap();
        let names: Vec<_> = jar.cookies_for_url(&http, now()).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["root".to_string()]);

        let https = Url::parse("https://example.com/foo/x").unwrap();
        assert_eq!(jar.cookies_for_url(&https, now()).len(), 3);
    }

    #[test]
    fn test_expired_set_deletes() {
        let jar = CookieJar::new();
        set(&jar, "https://example.com", "a=1");
        set(&jar, "https://example.com", "a=1; Max-Age=0");
        assert_eq!(jar.total_cookie_count(), 0);
    }

    #[test]
    fn test_expired_cookies_hidden() {
        let jar = CookieJar::new();
        set(&jar, "https://example.com", "a=1; Max-Age=10");
        let later = now() + Duration::seconds(20);
        assert!(jar.all_cookies(later).is_empty());
        assert_eq!(jar.all_cookies(now()).len(), 1);
    }

    #[test]
    fn test_delete_and_session_removal() {
        let jar = CookieJar::new();
        set(&jar, "https://example.com", "session=1");
        set(&jar, "https://example.com", "persistent=1; Max-Age=3600");

        assert!(jar.remove_session_cookies());
        assert!(!jar.remove_session_cookies());

        let remaining = jar.all_cookies(now());
        assert_eq!(remaining.len(), 1);
        assert!(jar.delete(&remaining[0]));
        assert!(!jar.delete(&remaining[0]));
        assert!(!jar.clear());
    }

    #[test]
    fn test_per_domain_limit() {
        let jar = CookieJar::new();
        for i in 0..(MAX_COOKIES_PER_DOMAIN + 5) {
            set(&jar, "https://example.com", &format!("c{}=v", i));
        }
        assert_eq!(jar.total_cookie_count(), MAX_COOKIES_PER_DOMAIN);
    }
}
