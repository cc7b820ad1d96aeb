//! dirpane-core/src/controller/action_dispatcher/navigation_dispatcher.rs
//! Fenced directory navigation
//!
//! Every `navigate_to` takes a fresh [`RequestToken`]. A completion is adopted
//! only when its token is still the latest one issued, so results land in
//! request-issue order no matter how the host orders its replies.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::fs::object_info::Entry;
use crate::model::fs_state::Listing;
use crate::operators::file_system_operator::FileSystemService;

use super::utils::spawn_host_call;

/// Monotonic sequence number of an enumeration request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a finished enumeration was applied.
#[derive(Debug)]
pub enum NavigationOutcome {
    /// Listing replaced; carries the new entry count.
    Adopted(usize),

    /// A later request was issued; result discarded.
    Stale,

    /// Latest request failed; Listing untouched.
    Failed(AppError),
}

pub struct NavigationController {
    service: Arc<dyn FileSystemService>,
    task_tx: UnboundedSender<TaskResult>,

    /// Most recently issued token. Token 0 is never issued.
    latest: RequestToken,

    /// Path of the latest request while it is outstanding.
    in_flight: Option<String>,
}

impl NavigationController {
    pub fn new(service: Arc<dyn FileSystemService>, task_tx: UnboundedSender<TaskResult>) -> Self {
        Self {
            service,
            task_tx,
            latest: RequestToken::default(),
            in_flight: None,
        }
    }

    /// Issue `enumerate(path)` under a new token.
    #[instrument(level = "info", skip(self))]
    pub fn navigate_to(&mut self, path: &str) -> RequestToken {
        let path: String = path.to_string();

        self.latest = self.latest.next();
        let token: RequestToken = self.latest;

        if let Some(previous) = self.in_flight.replace(path.clone()) {
            debug!(%token, superseded = %previous, "Superseding outstanding enumeration");
        }

        let service: Arc<dyn FileSystemService> = Arc::clone(&self.service);

        spawn_host_call(&self.task_tx, "enumerate", async move {
            let start_time = Instant::now();
            let result = service.enumerate(&path).await;

            TaskResult::DirectoryLoad {
                token,
                path,
                result,
                execution_time: start_time.elapsed(),
            }
        });

        info!(%token, "Enumeration issued");
        token
    }

    /// Apply a completed enumeration. Only the latest token may touch `listing`.
    #[instrument(level = "debug", skip(self, result, listing), fields(%token))]
    pub fn complete(
        &mut self,
        token: RequestToken,
        path: &str,
        result: Result<Vec<Entry>, AppError>,
        listing: &mut Listing,
    ) -> NavigationOutcome {
        if token != self.latest {
            debug!(
                latest = %self.latest,
                ok = result.is_ok(),
                "Discarding stale enumeration result"
            );
            return NavigationOutcome::Stale;
        }

        self.in_flight = None;

        match result {
            Ok(entries) => {
                let count = entries.len();
                listing.replace(path, entries);
                info!(path, entries = count, "Listing adopted");
                NavigationOutcome::Adopted(count)
            }
            Err(e) => {
                warn!(path, error = %e, "Enumeration failed, keeping current listing");
                NavigationOutcome::Failed(e)
            }
        }
    }

    #[must_use]
    pub const fn latest_token(&self) -> RequestToken {
        self.latest
    }

    /// True while the latest enumeration has not completed.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn pending_path(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }
}

impl fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("latest", &self.latest)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::file_system_operator::OfflineFileSystem;
    use tokio::sync::mpsc;

    fn controller() -> (NavigationController, mpsc::UnboundedReceiver<TaskResult>) {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let service = Arc::new(OfflineFileSystem);
        (NavigationController::new(service, task_tx), task_rx)
    }

    fn entries(path: &str) -> Vec<Entry> {
        vec![Entry::new(format!("{path}/f"), "f", 1, false)]
    }

    #[tokio::test]
    async fn test_tokens_are_monotonic() {
        let (mut nav, _rx) = controller();
        let first = nav.navigate_to("/a");
        let second = nav.navigate_to("/b");

        assert!(second > first);
        assert_eq!(nav.latest_token(), second);
        assert_eq!(nav.pending_path(), Some("/b"));
    }

    #[tokio::test]
    async fn test_stale_success_is_discarded() {
        let (mut nav, _rx) = controller();
        let mut listing = Listing::new();

        let a = nav.navigate_to("/a");
        let b = nav.navigate_to("/b");

        assert!(matches!(
            nav.complete(b, "/b", Ok(entries("/b")), &mut listing),
            NavigationOutcome::Adopted(1)
        ));
        assert!(matches!(
            nav.complete(a, "/a", Ok(entries("/a")), &mut listing),
            NavigationOutcome::Stale
        ));

        assert_eq!(listing.current_path(), Some("/b"));
        assert_eq!(listing.entries(), entries("/b").as_slice());
        assert!(!nav.is_loading());
    }

    #[tokio::test]
    async fn test_failure_keeps_listing() {
        let (mut nav, _rx) = controller();
        let mut listing = Listing::new();

        let a = nav.navigate_to("/a");
        nav.complete(a, "/a", Ok(entries("/a")), &mut listing);
        let before = listing.clone();

        let x = nav.navigate_to("/a/x");
        let outcome = nav.complete(
            x,
            "/a/x",
            Err(AppError::directory_access("/a/x", "denied")),
            &mut listing,
        );

        assert!(matches!(outcome, NavigationOutcome::Failed(_)));
        assert_eq!(listing, before);
        assert!(!nav.is_loading());
    }

    #[tokio::test]
    async fn test_stale_failure_is_silent() {
        let (mut nav, _rx) = controller();
        let mut listing = Listing::new();

        let a = nav.navigate_to("/a");
        let _b = nav.navigate_to("/b");

        let outcome = nav.complete(
            a,
            "/a",
            Err(AppError::directory_access("/a", "gone")),
            &mut listing,
        );

        assert!(matches!(outcome, NavigationOutcome::Stale));
        assert!(nav.is_loading());
    }
}
