//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop
//!
//! Single task that owns the `StateCoordinator` and multiplexes:
//! - terminal input from crossterm's `EventStream`
//! - host completions (`TaskResult`) from spawned host calls
//! - a redraw tick
//! - external shutdown through a `CancellationToken`
//!
//! Redraws happen only when the UI state asks for one.

use std::time::{Duration, Instant};

use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};

use crate::controller::action_dispatcher::{DispatchResult, RequestToken};
use crate::controller::actions::Action;
use crate::controller::handlers::keyboard_handler::KeyboardHandler;
use crate::controller::state_coordinator::StateCoordinator;
use crate::error::AppError;
use crate::fs::object_info::Entry;
use crate::view::ui::View;

/// Completion of a host call, posted back to the event loop.
#[derive(Debug)]
pub enum TaskResult {
    /// Answer to the startup query.
    InitialDirectory { result: Result<String, AppError> },

    /// Enumeration finished for the request identified by `token`.
    DirectoryLoad {
        token: RequestToken,
        path: String,
        result: Result<Vec<Entry>, AppError>,
        execution_time: Duration,
    },

    /// Delete call finished for `paths`.
    Deletion {
        paths: Vec<String>,
        result: Result<(), AppError>,
        execution_time: Duration,
    },
}

impl TaskResult {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InitialDirectory { .. } => "initial_directory",
            Self::DirectoryLoad { .. } => "enumerate",
            Self::Deletion { .. } => "delete",
        }
    }
}

enum LoopEvent {
    Action(Action),
    Task(TaskResult),
    Shutdown,
}

pub struct EventLoop {
    coordinator: StateCoordinator,
    keyboard: KeyboardHandler,
    view: View,
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    event_stream: EventStream,
    tick: Interval,
    shutdown: CancellationToken,
}

impl EventLoop {
    pub fn new(
        coordinator: StateCoordinator,
        keyboard: KeyboardHandler,
        task_rx: mpsc::UnboundedReceiver<TaskResult>,
        tick_rate: Duration,
    ) -> Self {
        let mut tick = tokio::time::interval(tick_rate.max(Duration::from_millis(10)));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(tick_ms = tick_rate.as_millis(), "Event loop initialized");

        Self {
            view: View::new(keyboard.shortcuts().clone()),
            coordinator,
            keyboard,
            task_rx,
            event_stream: EventStream::new(),
            tick,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops the loop when cancelled (signal handlers hold a clone).
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    #[must_use]
    pub const fn coordinator(&self) -> &StateCoordinator {
        &self.coordinator
    }

    /// Run until the user quits, the shutdown token fires, or input ends.
    #[instrument(level = "info", skip_all)]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        loop {
            if self.coordinator.ui().needs_redraw() {
                let start_time = Instant::now();

                terminal.draw(|frame| self.view.render(frame, &mut self.coordinator))?;
                self.coordinator.ui_mut().clear_redraw();

                trace!(elapsed_us = start_time.elapsed().as_micros(), "Frame drawn");
            }

            match self.next_event().await {
                LoopEvent::Action(action) => {
                    if self.coordinator.dispatch(action) == DispatchResult::Terminate {
                        break;
                    }
                }
                LoopEvent::Task(result) => self.coordinator.apply_task_result(result),
                LoopEvent::Shutdown => break,
            }
        }

        info!("Event loop terminated cleanly");
        Ok(())
    }

    async fn next_event(&mut self) -> LoopEvent {
        tokio::select! {
            () = self.shutdown.cancelled() => {
                info!("Shutdown signal received");
                LoopEvent::Shutdown
            }

            maybe_event = self.event_stream.next() => match maybe_event {
                Some(Ok(event)) => LoopEvent::Action(self.map_terminal_event(event)),
                Some(Err(e)) => {
                    warn!(error = %e, "Terminal event stream error");
                    LoopEvent::Action(Action::NoOp)
                }
                None => {
                    info!("Terminal event stream closed");
                    LoopEvent::Shutdown
                }
            },

            Some(result) = self.task_rx.recv() => {
                debug!(task = result.name(), "Task result received");
                LoopEvent::Task(result)
            }

            _ = self.tick.tick() => LoopEvent::Action(Action::Tick),
        }
    }

    fn map_terminal_event(&self, event: TermEvent) -> Action {
        match event {
            TermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.keyboard.handle_key(key_event, &self.coordinator)
            }
            TermEvent::Resize(width, height) => {
                debug!(width, height, "Terminal resize");
                Action::Resize(width, height)
            }
            other => {
                trace!(event = ?other, "Unhandled terminal event");
                Action::NoOp
            }
        }
    }
}
