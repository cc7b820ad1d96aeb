//! dirpane-core/src/controller/action_dispatcher/startup_dispatcher.rs
//! One-shot initial directory query issued at mount. No automatic retry.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, instrument, warn};

use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::operators::file_system_operator::FileSystemService;

use super::utils::spawn_host_call;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StartupStatus {
    /// Query not issued yet.
    #[default]
    Unmounted,

    /// Waiting on the host.
    Resolving,

    /// Host answered with this path.
    Resolved(String),

    /// Host failed; the pane stays unpopulated for this session.
    Failed,
}

pub struct InitialDirectoryResolver {
    service: Arc<dyn FileSystemService>,
    task_tx: UnboundedSender<TaskResult>,
    status: StartupStatus,
}

impl InitialDirectoryResolver {
    pub fn new(service: Arc<dyn FileSystemService>, task_tx: UnboundedSender<TaskResult>) -> Self {
        Self {
            service,
            task_tx,
            status: StartupStatus::Unmounted,
        }
    }

    /// Ask the host for the starting directory. Only the first call does anything.
    #[instrument(level = "info", skip(self))]
    pub fn resolve(&mut self) {
        if self.status != StartupStatus::Unmounted {
            warn!(status = ?self.status, "Initial directory already requested");
            return;
        }

        let service: Arc<dyn FileSystemService> = Arc::clone(&self.service);

        spawn_host_call(&self.task_tx, "initial_directory", async move {
            TaskResult::InitialDirectory {
                result: service.initial_directory().await,
            }
        });

        self.status = StartupStatus::Resolving;
    }

    /// Record the host's answer. Returns the path to navigate to on success;
    /// answers that arrive when no query is outstanding yield `None`.
    pub fn complete(&mut self, result: Result<String, AppError>) -> Option<Result<String, AppError>> {
        if self.status != StartupStatus::Resolving {
            warn!(status = ?self.status, "Unexpected initial directory answer");
            return None;
        }

        match result {
            Ok(path) => {
                info!(path = %path, "Initial directory resolved");
                self.status = StartupStatus::Resolved(path.clone());
                Some(Ok(path))
            }
            Err(e) => {
                error!(error = %e, "Initial directory query failed");
                self.status = StartupStatus::Failed;
                Some(Err(e))
            }
        }
    }

    #[must_use]
    pub const fn status(&self) -> &StartupStatus {
        &self.status
    }

    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.status == StartupStatus::Failed
    }
}

impl fmt::Debug for InitialDirectoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitialDirectoryResolver")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::file_system_operator::OfflineFileSystem;
    use tokio::sync::mpsc;

    fn resolver() -> (InitialDirectoryResolver, mpsc::UnboundedReceiver<TaskResult>) {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        (
            InitialDirectoryResolver::new(Arc::new(OfflineFileSystem), task_tx),
            task_rx,
        )
    }

    #[tokio::test]
    async fn test_resolve_posts_host_answer() {
        let (mut startup, mut rx) = resolver();
        startup.resolve();
        assert_eq!(startup.status(), &StartupStatus::Resolving);

        let Some(TaskResult::InitialDirectory { result }) = rx.recv().await else {
            panic!("expected initial directory result");
        };
        assert_eq!(startup.complete(result).unwrap().unwrap(), "/a");
        assert_eq!(startup.status(), &StartupStatus::Resolved("/a".to_string()));
    }

    #[tokio::test]
    async fn test_failure_is_terminal() {
        let (mut startup, _rx) = resolver();
        startup.resolve();

        let outcome = startup.complete(Err(AppError::startup("no exe")));
        assert!(matches!(outcome, Some(Err(AppError::Startup { .. }))));
        assert!(startup.has_failed());

        // no retry
        startup.resolve();
        assert!(startup.has_failed());
    }

    #[test]
    fn test_answer_without_query_is_ignored() {
        let (mut startup, _rx) = resolver();
        assert!(startup.complete(Ok("/a".to_string())).is_none());
        assert_eq!(startup.status(), &StartupStatus::Unmounted);
    }
}
