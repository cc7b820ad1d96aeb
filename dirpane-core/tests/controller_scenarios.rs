//! End-to-end controller scenarios against a scripted host.
//!
//! Host calls run as real spawned tasks; each test pulls the posted
//! completions off the task channel and feeds them back into the
//! coordinator, in arrival order or in an order the test picks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::timeout;

use dirpane_core::{
    AppError,
    config::BrowserConfig,
    controller::{
        Action, StateCoordinator, TaskResult,
        action_dispatcher::{DeletionState, StartupStatus},
        handlers::{KeyboardHandler, ShortcutBinder, key},
    },
    fs::object_info::Entry,
    model::UIOverlay,
    operators::FileSystemService,
};

#[derive(Debug, Default)]
struct ScriptedHost {
    initial: Option<String>,
    listings: Mutex<HashMap<String, Vec<Entry>>>,
    enumerate_calls: Mutex<Vec<String>>,
    delete_calls: Mutex<Vec<Vec<String>>>,
    fail_delete: bool,
}

impl ScriptedHost {
    fn rooted_at(path: &str) -> Self {
        Self {
            initial: Some(path.to_string()),
            ..Self::default()
        }
    }

    fn with_listing(self, path: &str, entries: Vec<Entry>) -> Self {
        self.listings
            .lock()
            .unwrap()
            .insert(path.to_string(), entries);
        self
    }

    fn failing_deletes(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    fn delete_calls(&self) -> Vec<Vec<String>> {
        self.delete_calls.lock().unwrap().clone()
    }

    fn enumerate_calls(&self) -> Vec<String> {
        self.enumerate_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSystemService for ScriptedHost {
    async fn enumerate(&self, path: &str) -> Result<Vec<Entry>, AppError> {
        self.enumerate_calls.lock().unwrap().push(path.to_string());
        self.listings
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::directory_access(path, "Permission denied"))
    }

    async fn delete(&self, paths: &[String]) -> Result<(), AppError> {
        self.delete_calls.lock().unwrap().push(paths.to_vec());
        if self.fail_delete {
            return Err(AppError::deletion(&paths[0], "Access is denied"));
        }
        Ok(())
    }

    async fn initial_directory(&self) -> Result<String, AppError> {
        self.initial
            .clone()
            .ok_or_else(|| AppError::startup("Failed to get executable directory"))
    }
}

struct Harness {
    host: Arc<ScriptedHost>,
    coordinator: StateCoordinator,
    keyboard: KeyboardHandler,
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
}

impl Harness {
    fn mount(host: ScriptedHost) -> Self {
        Self::mount_with(host, &BrowserConfig::default())
    }

    fn mount_with(host: ScriptedHost, browser: &BrowserConfig) -> Self {
        let host = Arc::new(host);
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let service: Arc<dyn FileSystemService> = host.clone();
        let coordinator = StateCoordinator::mount(service, task_tx, browser);

        Self {
            host,
            coordinator,
            keyboard: KeyboardHandler::new(ShortcutBinder::default()),
            task_rx,
        }
    }

    /// Next host completion, without applying it.
    async fn next_result(&mut self) -> TaskResult {
        timeout(Duration::from_secs(5), self.task_rx.recv())
            .await
            .expect("host call did not complete")
            .expect("task channel closed")
    }

    /// Wait for the next host completion and apply it.
    async fn settle_one(&mut self) {
        let result = self.next_result().await;
        self.coordinator.apply_task_result(result);
    }

    fn press(&mut self, event: KeyEvent) {
        let action = self.keyboard.handle_key(event, &self.coordinator);
        self.coordinator.dispatch(action);
    }

    fn entry_paths(&self) -> Vec<String> {
        self.coordinator
            .listing()
            .entries()
            .iter()
            .map(|entry| entry.path.clone())
            .collect()
    }
}

fn enter_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
}

fn backspace_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)
}

fn root_listing() -> Vec<Entry> {
    vec![
        Entry::new("/a/x", "x", 0, true),
        Entry::new("/a/y", "y", 10, false),
        Entry::new("/a/z", "z", 0, true),
    ]
}

fn scripted_tree() -> ScriptedHost {
    ScriptedHost::rooted_at("/a")
        .with_listing("/a", root_listing())
        .with_listing("/a/x", vec![Entry::new("/a/x/q", "q", 3, false)])
        .with_listing("/a/z", vec![Entry::new("/a/z/w", "w", 2048, false)])
}

/// Mount and run startup through the first enumeration.
async fn started(host: ScriptedHost) -> Harness {
    let mut harness = Harness::mount(host);
    harness.settle_one().await;
    harness.settle_one().await;
    harness
}

#[tokio::test]
async fn test_startup_lists_initial_directory() {
    let harness = started(scripted_tree()).await;

    assert_eq!(
        harness.coordinator.startup_status(),
        &StartupStatus::Resolved("/a".to_string())
    );
    assert_eq!(harness.coordinator.listing().current_path(), Some("/a"));
    assert_eq!(harness.entry_paths(), vec!["/a/x", "/a/y", "/a/z"]);
    assert_eq!(
        harness.coordinator.listing().entries()[1].human_readable_size,
        "10 B"
    );
    assert_eq!(harness.host.enumerate_calls(), vec!["/a"]);
}

#[tokio::test]
async fn test_startup_failure_leaves_listing_empty() {
    let mut harness = Harness::mount(ScriptedHost::default());
    harness.settle_one().await;

    assert_eq!(harness.coordinator.startup_status(), &StartupStatus::Failed);
    assert!(!harness.coordinator.listing().is_populated());
    assert_eq!(harness.coordinator.overlay(), UIOverlay::Notification);
    assert!(harness.host.enumerate_calls().is_empty());
}

#[tokio::test]
async fn test_activating_directory_navigates_into_it() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::ActivateRow("/a/x".to_string()));
    assert!(harness.coordinator.is_loading());
    harness.settle_one().await;

    assert_eq!(harness.coordinator.listing().current_path(), Some("/a/x"));
    assert_eq!(harness.entry_paths(), vec!["/a/x/q"]);
    assert!(!harness.coordinator.is_loading());
}

#[tokio::test]
async fn test_enter_on_cursor_row_navigates() {
    let mut harness = started(scripted_tree()).await;

    harness.press(enter_key());
    harness.settle_one().await;

    assert_eq!(harness.coordinator.listing().current_path(), Some("/a/x"));
}

#[tokio::test]
async fn test_long_path_prefix_hidden_in_header_only() {
    let host = ScriptedHost::rooted_at(r"\\?\C:\data")
        .with_listing(r"\\?\C:\data", vec![Entry::new(r"\\?\C:\data\f", "f", 1, false)]);
    let harness = started(host).await;

    assert_eq!(
        harness.coordinator.listing().current_path(),
        Some(r"C:\data")
    );
    assert_eq!(harness.host.enumerate_calls(), vec![r"\\?\C:\data"]);
}

#[tokio::test]
async fn test_late_response_from_superseded_request_is_dropped() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::ActivateRow("/a/x".to_string()));
    harness
        .coordinator
        .dispatch(Action::ActivateRow("/a/z".to_string()));

    let first = harness.next_result().await;
    let second = harness.next_result().await;

    let (older, newer) = match (&first, &second) {
        (
            TaskResult::DirectoryLoad { token: a, .. },
            TaskResult::DirectoryLoad { token: b, .. },
        ) if a < b => (first, second),
        _ => (second, first),
    };

    // Newer request resolves first, older one straggles in afterwards.
    harness.coordinator.apply_task_result(newer);
    harness.coordinator.apply_task_result(older);

    assert_eq!(harness.coordinator.listing().current_path(), Some("/a/z"));
    assert_eq!(harness.entry_paths(), vec!["/a/z/w"]);
    assert!(!harness.coordinator.is_loading());
}

#[tokio::test]
async fn test_enumeration_failure_keeps_previous_listing() {
    let mut harness = started(scripted_tree()).await;
    harness
        .host
        .listings
        .lock()
        .unwrap()
        .remove("/a/x");

    harness
        .coordinator
        .dispatch(Action::ActivateRow("/a/x".to_string()));
    harness.settle_one().await;

    assert_eq!(harness.coordinator.listing().current_path(), Some("/a"));
    assert_eq!(harness.entry_paths(), vec!["/a/x", "/a/y", "/a/z"]);
    assert_eq!(harness.coordinator.overlay(), UIOverlay::Notification);
    assert_eq!(
        harness
            .coordinator
            .ui()
            .notification()
            .map(|n| n.title.as_str()),
        Some("Cannot open directory")
    );

    harness.press(enter_key());
    assert_eq!(harness.coordinator.overlay(), UIOverlay::None);
}

#[tokio::test]
async fn test_selection_pruned_after_navigation() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::SelectionChanged("/a/y".into()));
    harness
        .coordinator
        .dispatch(Action::ActivateRow("/a/x".to_string()));
    harness.settle_one().await;

    let listed = harness.entry_paths();
    assert!(
        harness
            .coordinator
            .selection()
            .iter()
            .all(|path| listed.iter().any(|p| p.as_str() == path))
    );
    assert!(harness.coordinator.selection().is_empty());
}

#[tokio::test]
async fn test_selection_carries_over_when_pruning_disabled() {
    let browser = BrowserConfig {
        prune_selection_on_navigate: false,
        ..BrowserConfig::default()
    };
    let mut harness = Harness::mount_with(scripted_tree(), &browser);
    harness.settle_one().await;
    harness.settle_one().await;

    harness
        .coordinator
        .dispatch(Action::SelectionChanged("/a/y".into()));
    harness
        .coordinator
        .dispatch(Action::ActivateRow("/a/x".to_string()));
    harness.settle_one().await;

    assert!(harness.coordinator.selection().contains("/a/y"));
}

#[tokio::test]
async fn test_confirmed_delete_removes_rows_and_clears_selection() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::SelectionChanged("/a/y".into()));
    harness.press(backspace_key());
    assert_eq!(harness.coordinator.overlay(), UIOverlay::ConfirmDelete);

    harness.press(key('y'));
    assert!(matches!(
        harness.coordinator.deletion_state(),
        DeletionState::Executing { .. }
    ));
    harness.settle_one().await;

    assert_eq!(harness.host.delete_calls(), vec![vec!["/a/y".to_string()]]);
    assert_eq!(harness.entry_paths(), vec!["/a/x", "/a/z"]);
    assert!(harness.coordinator.selection().is_empty());
    assert_eq!(harness.coordinator.deletion_state(), &DeletionState::Idle);
}

#[tokio::test]
async fn test_delete_sends_paths_in_selection_order() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::SelectionChanged(
            vec!["/a/z".to_string(), "/a/y".to_string()].into(),
        ));
    harness.coordinator.dispatch(Action::RequestDelete);
    harness.coordinator.dispatch(Action::ConfirmDelete);
    harness.settle_one().await;

    assert_eq!(
        harness.host.delete_calls(),
        vec![vec!["/a/z".to_string(), "/a/y".to_string()]]
    );
    assert_eq!(harness.entry_paths(), vec!["/a/x"]);
}

#[tokio::test]
async fn test_declined_delete_changes_nothing() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::SelectionChanged("/a/y".into()));
    let listing_before = harness.coordinator.listing().clone();
    let selection_before = harness.coordinator.selection().clone();

    harness.press(backspace_key());
    harness.press(key('n'));
    tokio::task::yield_now().await;

    assert_eq!(harness.coordinator.listing(), &listing_before);
    assert_eq!(harness.coordinator.selection(), &selection_before);
    assert_eq!(harness.coordinator.deletion_state(), &DeletionState::Idle);
    assert!(harness.host.delete_calls().is_empty());
    assert!(harness.task_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_failed_delete_preserves_state_and_reports() {
    let mut harness = started(scripted_tree().failing_deletes()).await;

    harness
        .coordinator
        .dispatch(Action::SelectionChanged("/a/y".into()));
    let listing_before = harness.coordinator.listing().clone();
    let selection_before = harness.coordinator.selection().clone();

    harness.coordinator.dispatch(Action::RequestDelete);
    harness.coordinator.dispatch(Action::ConfirmDelete);
    harness.settle_one().await;

    assert_eq!(harness.coordinator.listing(), &listing_before);
    assert_eq!(harness.coordinator.selection(), &selection_before);
    assert_eq!(harness.coordinator.deletion_state(), &DeletionState::Idle);
    assert_eq!(
        harness
            .coordinator
            .ui()
            .notification()
            .map(|n| n.title.as_str()),
        Some("Delete failed")
    );
}

#[tokio::test]
async fn test_shortcut_with_empty_selection_does_nothing() {
    let mut harness = started(scripted_tree()).await;

    harness.press(backspace_key());

    assert_eq!(harness.coordinator.overlay(), UIOverlay::None);
    assert_eq!(harness.coordinator.deletion_state(), &DeletionState::Idle);
}

#[tokio::test]
async fn test_second_delete_rejected_while_executing() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::SelectionChanged("/a/y".into()));
    harness.coordinator.dispatch(Action::RequestDelete);
    harness.coordinator.dispatch(Action::ConfirmDelete);

    harness.coordinator.dispatch(Action::RequestDelete);
    assert!(matches!(
        harness.coordinator.deletion_state(),
        DeletionState::Executing { .. }
    ));

    harness.settle_one().await;
    assert_eq!(harness.host.delete_calls().len(), 1);
}

#[tokio::test]
async fn test_navigation_result_waits_for_prompt() {
    let mut harness = started(scripted_tree()).await;

    harness
        .coordinator
        .dispatch(Action::ActivateRow("/a/x".to_string()));
    harness
        .coordinator
        .dispatch(Action::SelectionChanged("/a/y".into()));
    harness.coordinator.dispatch(Action::RequestDelete);

    harness.settle_one().await;
    assert_eq!(harness.coordinator.listing().current_path(), Some("/a"));
    assert_eq!(harness.coordinator.deferred_len(), 1);

    harness.coordinator.dispatch(Action::DeclineDelete);

    assert_eq!(harness.coordinator.deferred_len(), 0);
    assert_eq!(harness.coordinator.listing().current_path(), Some("/a/x"));
}
