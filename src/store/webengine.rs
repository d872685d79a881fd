//! Web-engine cookie store with thread affinity.
//!
//! Stands in for a browser engine's cookie store (e.g. `WKHTTPCookieStore`),
//! which may only be touched from one UI-affine thread. The store owns a
//! dedicated thread; every operation is sent to it as a command and the
//! result comes back over a oneshot channel, so callers on any thread or
//! runtime simply await the returned future.
//!
//! The thread exits once the last handle to the store is dropped.

use super::{StoreAdapter, StoreCapabilities, StoreFuture};
use crate::base::context::StoreResultExt;
use crate::base::cookieerror::{CookieError, CookieResult};
use crate::cookies::jar::CookieJar;
use crate::cookies::nativecookie::NativeCookie;
use std::panic::{self, AssertUnwindSafe};
use time::OffsetDateTime;
use tokio::sync::{mpsc, oneshot};
use url::Url;

const THREAD_NAME: &str = "cookie-webengine";

enum Command {
    Set {
        url: Url,
        line: String,
        reply: oneshot::Sender<bool>,
    },
    Get {
        url: Url,
        reply: oneshot::Sender<Option<String>>,
    },
    GetAll {
        reply: oneshot::Sender<Vec<NativeCookie>>,
    },
    Delete {
        cookie: NativeCookie,
        reply: oneshot::Sender<bool>,
    },
    RemoveAll {
        reply: oneshot::Sender<bool>,
    },
    RemoveSession {
        reply: oneshot::Sender<bool>,
    },
}

/// Cookie store whose state lives on a dedicated thread.
pub struct WebEngineCookieStore {
    sender: mpsc::UnboundedSender<Command>,
}

impl WebEngineCookieStore {
    /// Start the store thread.
    pub fn spawn() -> CookieResult<Self> {
        let (sender, receiver) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run(receiver))
            .store_context("spawn web engine thread")?;

        Ok(Self { sender })
    }

    fn request<T: Send + 'static>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> StoreFuture<'_, T> {
        let (tx, rx) = oneshot::channel();
        let sent = self
            .sender
            .send(command(tx))
            .map_err(|_| CookieError::store_failure("web engine cookie thread has stopped"));

        Box::pin(async move {
            sent?;
            rx.await.store_context("web engine cookie store")
        })
    }
}

/// Command loop owning the jar. Runs until every sender is dropped.
fn run(mut receiver: mpsc::UnboundedReceiver<Command>) {
    let jar = CookieJar::new();
    tracing::debug!("web engine cookie thread started");

    while let Some(command) = receiver.blocking_recv() {
        // A panicking command drops its reply sender; its caller gets a
        // store failure and the thread keeps serving everyone else.
        if panic::catch_unwind(AssertUnwindSafe(|| handle(&jar, command))).is_err() {
            tracing::error!("web engine cookie command panicked");
        }
    }

    tracing::debug!("web engine cookie thread stopped");
}

fn handle(jar: &CookieJar, command: Command) {
    let now = OffsetDateTime::now_utc();
    // A dropped reply receiver just means the caller stopped waiting.
    match command {
        Command::Set { url, line, reply } => {
            let accepted = match NativeCookie::from_set_cookie(&url, &line, now) {
                Some(cookie) => {
                    jar.set(cookie, now);
                    true
                }
                None => false,
            };
            let _ = reply.send(accepted);
        }
        Command::Get { url, reply } => {
            let _ = reply.send(jar.cookie_header(&url, now));
        }
        Command::GetAll { reply } => {
            let _ = reply.send(jar.all_cookies(now));
        }
        Command::Delete { cookie, reply } => {
            let _ = reply.send(jar.delete(&cookie));
        }
        Command::RemoveAll { reply } => {
            jar.clear();
            let _ = reply.send(true);
        }
        Command::RemoveSession { reply } => {
            let _ = reply.send(jar.remove_session_cookies());
        }
    }
}

impl StoreAdapter for WebEngineCookieStore {
    fn name(&self) -> &'static str {
        "webengine"
    }

    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities::structured()
    }

    fn set_cookie<'a>(&'a self, url: &'a Url, set_cookie: &'a str) -> StoreFuture<'a, bool> {
        let url = url.clone();
        let line = set_cookie.to_string();
        self.request(move |reply| Command::Set { url, line, reply })
    }

    fn get_cookie<'a>(&'a self, url: &'a Url) -> StoreFuture<'a, Option<String>> {
        let url = url.clone();
        self.request(move |reply| Command::Get { url, reply })
    }

    fn get_all_cookies(&self) -> StoreFuture<'_, Vec<NativeCookie>> {
        self.request(|reply| Command::GetAll { reply })
    }

    fn delete_cookie<'a>(&'a self, cookie: &'a NativeCookie) -> StoreFuture<'a, bool> {
        let cookie = cookie.clone();
        self.request(move |reply| Command::Delete { cookie, reply })
    }

    fn remove_all_cookies(&self) -> StoreFuture<'_, bool> {
        self.request(|reply| Command::RemoveAll { reply })
    }

    fn remove_session_cookies(&self) -> StoreFuture<'_, bool> {
        self.request(|reply| Command::RemoveSession { reply })
    }
}
