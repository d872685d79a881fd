//! Flush-file persistence for the reference stores.
//!
//! Saves and loads a [`CookieJar`] as JSON. Session cookies are written too;
//! expired cookies are skipped on load.

use crate::cookies::jar::CookieJar;
use crate::cookies::nativecookie::NativeCookie;
use std::fs;
use std::io;
use std::path::Path;
use time::OffsetDateTime;

use serde::{Deserialize, Serialize};

/// Serializable representation of a cookie for persistence.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersistentCookie {
    name: String,
    value: String,
    domain: String,
    path: String,
    secure: bool,
    http_only: bool,
    host_only: bool,
    expires_unix_secs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
}

/// Save the live cookies of `jar` to `path`.
///
/// # Example
/// ```ignore
/// persistence::save_cookies(&jar, Path::new("/path/to/cookies.json"), OffsetDateTime::now_utc())?;
/// ```
pub fn save_cookies(jar: &CookieJar, path: &Path, now: OffsetDateTime) -> io::Result<()> {
    let all_cookies: Vec<PersistentCookie> = jar
        .all_cookies(now)
        .into_iter()
        .map(|cookie| PersistentCookie {
            expires_unix_secs: cookie.expiration_time.map(|t| t.unix_timestamp()),
            name: cookie.name,
            value: cookie.value,
            domain: cookie.domain,
            path: cookie.path,
            secure: cookie.secure,
            http_only: cookie.http_only,
            host_only: cookie.host_only,
            version: cookie.version,
        })
        .collect();

    let json = serde_json::to_string_pretty(&all_cookies)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)
}

/// Load cookies from `path` into `jar`. Returns the number of cookies loaded.
pub fn load_cookies(jar: &CookieJar, path: &Path, now: OffsetDateTime) -> io::Result<usize> {
    let json = fs::read_to_string(path)?;
    let persistent_cookies: Vec<PersistentCookie> =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut count = 0;
    for pc in persistent_cookies {
        let expiration_time = pc
            .expires_unix_secs
            .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok());

        let mut cookie = NativeCookie::new(pc.name, pc.value, pc.domain, pc.path, now, expiration_time);
        cookie.secure = pc.secure;
        cookie.http_only = pc.http_only;
        cookie.host_only = pc.host_only;
        cookie.version = pc.version;

        if cookie.is_expired(now) {
            continue;
        }

        jar.set(cookie, now);
        count += 1;
    }

    Ok(count)
}
