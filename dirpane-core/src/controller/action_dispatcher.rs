//! Controllers behind the `StateCoordinator`.
//!
//! Each sub-controller owns one piece of the pane's async lifecycle:
//! - `startup_dispatcher`: the one-shot initial directory query
//! - `navigation_dispatcher`: fenced directory enumeration
//! - `deletion_dispatcher`: the confirm-then-delete state machine
//!
//! They issue host calls as spawned tasks and get their completions back
//! through the coordinator, which owns Listing and Selection.

pub mod deletion_dispatcher;
pub use deletion_dispatcher::{DeletionController, DeletionOutcome, DeletionState};

pub mod navigation_dispatcher;
pub use navigation_dispatcher::{NavigationController, NavigationOutcome, RequestToken};

pub mod startup_dispatcher;
pub use startup_dispatcher::{InitialDirectoryResolver, StartupStatus};

pub mod utils;

/// What the event loop should do after an action was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Continue,
    Terminate,
}
