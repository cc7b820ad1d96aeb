//! dirpane-core/src/controller/action_dispatcher/deletion_dispatcher.rs
//! Confirm-then-delete state machine
//!
//! `Idle -> ConfirmPending -> Executing -> Idle`. The selection is captured
//! when the prompt opens; a declined prompt makes no host call and an
//! outstanding delete blocks new triggers until it completes.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexSet;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, instrument, warn};

use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::model::fs_state::Listing;
use crate::model::selection::SelectionModel;
use crate::operators::file_system_operator::FileSystemService;

use super::utils::spawn_host_call;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletionState {
    #[default]
    Idle,

    /// Prompt open for these paths, in selection order.
    ConfirmPending { paths: Vec<String> },

    /// `delete(paths)` outstanding.
    Executing { paths: Vec<String> },
}

impl DeletionState {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ConfirmPending { .. } => "confirm_pending",
            Self::Executing { .. } => "executing",
        }
    }
}

/// How a finished delete call was applied.
#[derive(Debug)]
pub enum DeletionOutcome {
    /// Entries removed from the listing; selection cleared.
    Deleted(usize),

    /// Host failed; listing and selection untouched.
    Failed(AppError),

    /// No delete was executing.
    Unexpected,
}

pub struct DeletionController {
    service: Arc<dyn FileSystemService>,
    task_tx: UnboundedSender<TaskResult>,
    state: DeletionState,
}

impl DeletionController {
    pub fn new(service: Arc<dyn FileSystemService>, task_tx: UnboundedSender<TaskResult>) -> Self {
        Self {
            service,
            task_tx,
            state: DeletionState::Idle,
        }
    }

    /// Open the confirmation prompt for the current selection.
    ///
    /// Returns `false` when the selection is empty or a deletion is already
    /// pending or running.
    #[instrument(level = "debug", skip(self, selection), fields(selected = selection.len(), state = self.state.name()))]
    pub fn request(&mut self, selection: &SelectionModel) -> bool {
        if !matches!(self.state, DeletionState::Idle) {
            debug!("Delete trigger ignored, deletion already in progress");
            return false;
        }

        if selection.is_empty() {
            debug!("Delete trigger ignored, nothing selected");
            return false;
        }

        self.state = DeletionState::ConfirmPending {
            paths: selection.to_ordered_vec(),
        };
        info!("Awaiting delete confirmation");
        true
    }

    /// User confirmed: issue `delete` for the captured paths.
    #[instrument(level = "info", skip(self), fields(state = self.state.name()))]
    pub fn confirm(&mut self) -> bool {
        let paths: Vec<String> = match &self.state {
            DeletionState::ConfirmPending { paths } => paths.clone(),
            _ => {
                debug!("Confirm outside of prompt ignored");
                return false;
            }
        };

        let service: Arc<dyn FileSystemService> = Arc::clone(&self.service);
        let batch: Vec<String> = paths.clone();

        spawn_host_call(&self.task_tx, "delete", async move {
            let start_time = Instant::now();
            let result = service.delete(&batch).await;

            TaskResult::Deletion {
                paths: batch,
                result,
                execution_time: start_time.elapsed(),
            }
        });

        info!(count = paths.len(), "Delete issued");
        self.state = DeletionState::Executing { paths };
        true
    }

    /// User declined: back to idle with no host call.
    #[instrument(level = "info", skip(self), fields(state = self.state.name()))]
    pub fn decline(&mut self) -> bool {
        if !self.is_confirm_pending() {
            return false;
        }

        self.state = DeletionState::Idle;
        info!("Delete declined");
        true
    }

    /// Reconcile Listing and Selection with a finished delete call.
    #[instrument(level = "info", skip_all, fields(state = self.state.name()))]
    pub fn complete(
        &mut self,
        result: Result<(), AppError>,
        listing: &mut Listing,
        selection: &mut SelectionModel,
    ) -> DeletionOutcome {
        let paths: Vec<String> = match std::mem::take(&mut self.state) {
            DeletionState::Executing { paths } => paths,
            other => {
                self.state = other;
                warn!("Delete completion without an executing delete");
                return DeletionOutcome::Unexpected;
            }
        };

        match result {
            Ok(()) => {
                let deleted: IndexSet<String> = paths.into_iter().collect();
                let removed = listing.remove_paths(&deleted);
                selection.clear();

                info!(requested = deleted.len(), removed, "Deletion applied to listing");
                DeletionOutcome::Deleted(removed)
            }
            Err(e) => {
                error!(error = %e, count = paths.len(), "Deletion failed, listing kept");
                DeletionOutcome::Failed(e)
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &DeletionState {
        &self.state
    }

    #[must_use]
    pub const fn is_confirm_pending(&self) -> bool {
        matches!(self.state, DeletionState::ConfirmPending { .. })
    }

    #[must_use]
    pub const fn is_executing(&self) -> bool {
        matches!(self.state, DeletionState::Executing { .. })
    }

    /// Paths shown in the confirmation prompt.
    #[must_use]
    pub fn pending_paths(&self) -> Option<&[String]> {
        match &self.state {
            DeletionState::ConfirmPending { paths } => Some(paths),
            _ => None,
        }
    }
}

impl fmt::Debug for DeletionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletionController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
