//! StateCoordinator: the pane controller
//!
//! Owns Listing, Selection, the three sub-controllers and UI state for the
//! lifetime of one mount. Every mutation enters through `dispatch` (user
//! intent) or `apply_task_result` (host completions); the event loop is the
//! only caller, so no locking is involved.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, trace};

use crate::config::BrowserConfig;
use crate::controller::action_dispatcher::{
    DeletionController, DeletionOutcome, DeletionState, DispatchResult, InitialDirectoryResolver,
    NavigationController, NavigationOutcome, RequestToken, StartupStatus,
};
use crate::controller::actions::Action;
use crate::controller::event_loop::TaskResult;
use crate::error::{AppError, FailureKind};
use crate::model::fs_state::Listing;
use crate::model::selection::{SelectionInput, SelectionModel};
use crate::model::ui_state::{Notification, UIOverlay, UIState};
use crate::operators::file_system_operator::FileSystemService;

pub struct StateCoordinator {
    listing: Listing,
    selection: SelectionModel,

    startup: InitialDirectoryResolver,
    navigation: NavigationController,
    deletion: DeletionController,

    /// Host completions held back while the confirm prompt is open.
    deferred: VecDeque<TaskResult>,

    prune_selection_on_navigate: bool,

    ui: UIState,
}

impl StateCoordinator {
    /// Create the controller and issue the initial directory query.
    #[instrument(level = "info", skip_all)]
    pub fn mount(
        service: Arc<dyn FileSystemService>,
        task_tx: UnboundedSender<TaskResult>,
        browser: &BrowserConfig,
    ) -> Self {
        let mut coordinator = Self {
            listing: Listing::new(),
            selection: SelectionModel::new(),
            startup: InitialDirectoryResolver::new(Arc::clone(&service), task_tx.clone()),
            navigation: NavigationController::new(Arc::clone(&service), task_tx.clone()),
            deletion: DeletionController::new(service, task_tx),
            deferred: VecDeque::new(),
            prune_selection_on_navigate: browser.prune_selection_on_navigate,
            ui: UIState::new(),
        };

        coordinator.startup.resolve();
        info!("Directory pane mounted");
        coordinator
    }

    // ------------------------------------------------------------------
    // User intent
    // ------------------------------------------------------------------

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        if action == Action::Quit {
            info!("Quit requested");
            return DispatchResult::Terminate;
        }

        if action.is_passive() {
            trace!(?action, "Dispatching");
        } else {
            debug!(?action, overlay = ?self.overlay(), "Dispatching");
        }

        match self.overlay() {
            UIOverlay::ConfirmDelete => self.dispatch_in_prompt(action),
            UIOverlay::Notification => self.dispatch_in_notification(action),
            UIOverlay::None => self.dispatch_in_table(action),
        }

        DispatchResult::Continue
    }

    fn dispatch_in_prompt(&mut self, action: Action) {
        let resolved = match action {
            Action::ConfirmDelete => self.deletion.confirm(),
            Action::DeclineDelete => self.deletion.decline(),
            Action::Resize(..) => {
                self.ui.request_redraw();
                false
            }
            other => {
                trace!(action = ?other, "Ignored while confirmation is pending");
                false
            }
        };

        if resolved {
            self.ui.request_redraw();
            self.drain_deferred();
        }
    }

    fn dispatch_in_notification(&mut self, action: Action) {
        match action {
            Action::DismissNotification => {
                self.ui.dismiss_notification();
            }
            Action::Resize(..) => self.ui.request_redraw(),
            other => trace!(action = ?other, "Ignored while a notification is open"),
        }
    }

    fn dispatch_in_table(&mut self, action: Action) {
        let rows: usize = self.listing.len();

        match action {
            Action::ActivateRow(path) => self.activate_row(&path),
            Action::SelectionChanged(input) => self.set_selection(input),
            Action::RequestDelete => self.request_delete(),
            Action::MoveSelectionUp => self.ui.move_cursor(-1, rows),
            Action::MoveSelectionDown => self.ui.move_cursor(1, rows),
            Action::SelectFirst => self.ui.reset_cursor(rows),
            Action::SelectLast => self.ui.cursor_to_end(rows),
            Action::Resize(..) => self.ui.request_redraw(),
            Action::ConfirmDelete
            | Action::DeclineDelete
            | Action::DismissNotification
            | Action::Tick
            | Action::Quit
            | Action::NoOp => {}
        }
    }

    /// Navigate into `path` if it is a directory row of the current listing.
    fn activate_row(&mut self, path: &str) {
        match self.listing.entry(path) {
            Some(entry) if entry.is_dir => {
                self.navigation.navigate_to(path);
                self.ui.request_redraw();
            }
            Some(_) => debug!(path, "Activation on a file row ignored"),
            None => debug!(path, "Activation on an unknown row ignored"),
        }
    }

    fn set_selection(&mut self, input: SelectionInput) {
        self.selection.set_selection(input);
        self.ui.request_redraw();
    }

    fn request_delete(&mut self) {
        if self.deletion.is_executing() {
            self.ui.show_status("A deletion is already running");
            return;
        }

        if self.deletion.request(&self.selection) {
            self.ui.request_redraw();
        }
    }

    // ------------------------------------------------------------------
    // Host completions
    // ------------------------------------------------------------------

    /// Apply one host completion, or hold it while the confirm prompt is open.
    pub fn apply_task_result(&mut self, result: TaskResult) {
        if self.deletion.is_confirm_pending() {
            debug!(task = result.name(), "Deferring host result until prompt resolves");
            self.deferred.push_back(result);
            return;
        }

        match result {
            TaskResult::InitialDirectory { result } => self.on_initial_directory(result),

            TaskResult::DirectoryLoad {
                token,
                path,
                result,
                execution_time,
            } => {
                debug!(%token, path, elapsed_ms = execution_time.as_millis(), "Enumeration finished");

                match self.navigation.complete(token, &path, result, &mut self.listing) {
                    NavigationOutcome::Adopted(_) => self.on_listing_adopted(),
                    NavigationOutcome::Stale => {}
                    NavigationOutcome::Failed(e) => self.notify(&e),
                }
                self.ui.request_redraw();
            }

            TaskResult::Deletion {
                paths,
                result,
                execution_time,
            } => {
                debug!(
                    count = paths.len(),
                    elapsed_ms = execution_time.as_millis(),
                    "Delete finished"
                );

                match self
                    .deletion
                    .complete(result, &mut self.listing, &mut self.selection)
                {
                    DeletionOutcome::Deleted(removed) => {
                        self.ui.clamp_cursor(self.listing.len());
                        self.ui.show_status(format!("Deleted {removed} item(s)"));
                    }
                    DeletionOutcome::Failed(e) => self.notify(&e),
                    DeletionOutcome::Unexpected => {}
                }
                self.ui.request_redraw();
            }
        }
    }

    fn on_initial_directory(&mut self, result: Result<String, AppError>) {
        match self.startup.complete(result) {
            Some(Ok(path)) => {
                self.navigation.navigate_to(&path);
            }
            Some(Err(e)) => self.notify(&e),
            None => {}
        }
        self.ui.request_redraw();
    }

    fn on_listing_adopted(&mut self) {
        if self.prune_selection_on_navigate {
            let dropped = self.selection.retain_listed(&self.listing);
            if dropped > 0 {
                debug!(dropped, "Pruned selection after navigation");
            }
        }

        self.ui.reset_cursor(self.listing.len());
    }

    fn drain_deferred(&mut self) {
        while let Some(result) = self.deferred.pop_front() {
            self.apply_task_result(result);
        }
    }

    fn notify(&mut self, error: &AppError) {
        let title = match error.kind() {
            FailureKind::Startup => "Startup failed",
            FailureKind::DirectoryAccess => "Cannot open directory",
            FailureKind::Deletion => "Delete failed",
            FailureKind::Internal => "Error",
        };

        self.ui
            .push_notification(Notification::error(title, error.to_string()));
    }

    // ------------------------------------------------------------------
    // Read access for the view and the key handler
    // ------------------------------------------------------------------

    /// Modal surface on top, if any. The prompt wins over notifications.
    #[must_use]
    pub fn overlay(&self) -> UIOverlay {
        if self.deletion.is_confirm_pending() {
            UIOverlay::ConfirmDelete
        } else if self.ui.has_notification() {
            UIOverlay::Notification
        } else {
            UIOverlay::None
        }
    }

    #[must_use]
    pub const fn listing(&self) -> &Listing {
        &self.listing
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub const fn deletion_state(&self) -> &DeletionState {
        self.deletion.state()
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&[String]> {
        self.deletion.pending_paths()
    }

    #[must_use]
    pub const fn startup_status(&self) -> &StartupStatus {
        self.startup.status()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.navigation.is_loading()
    }

    /// Token of the most recently issued enumeration.
    #[must_use]
    pub const fn latest_request(&self) -> RequestToken {
        self.navigation.latest_token()
    }

    #[must_use]
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    #[must_use]
    pub const fn ui(&self) -> &UIState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UIState {
        &mut self.ui
    }

    /// Split borrow for rendering: the table needs mutable cursor state
    /// alongside the read-only model.
    pub fn render_parts(&mut self) -> (&Listing, &SelectionModel, &mut UIState) {
        (&self.listing, &self.selection, &mut self.ui)
    }
}

impl std::fmt::Debug for StateCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCoordinator")
            .field("current_path", &self.listing.current_path())
            .field("entries", &self.listing.len())
            .field("selected", &self.selection.len())
            .field("startup", &self.startup)
            .field("navigation", &self.navigation)
            .field("deletion", &self.deletion)
            .field("deferred", &self.deferred.len())
            .finish_non_exhaustive()
    }
}
