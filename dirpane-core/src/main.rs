//! src/main.rs
//! Terminal host for the directory pane.
//!
//! Usage: `dirpane [CONFIG_PATH]`. Without a path the platform config file
//! is used (and created with defaults on first run).

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{signal, sync::mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use dirpane_core::{
    config::Config,
    controller::{
        event_loop::{EventLoop, TaskResult},
        handlers::KeyboardHandler,
        state_coordinator::StateCoordinator,
    },
    logging::init_logging_with_config,
    operators::{FileSystemService, LocalFileSystemOperator},
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run())
}

async fn run() -> Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_from(&path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().await.context("Failed to load config")?,
    };

    // Flushes buffered log lines on drop; keep alive until exit.
    let _log_guard =
        init_logging_with_config(config.logging.clone()).context("Failed to initialize logging")?;

    info!("Starting dirpane");

    let keyboard =
        KeyboardHandler::from_config(&config.keys).context("Invalid key bindings in config")?;

    let service: Arc<dyn FileSystemService> =
        Arc::new(LocalFileSystemOperator::from_config(&config.browser));

    let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
    let coordinator = StateCoordinator::mount(service, task_tx, &config.browser);
    let mut event_loop = EventLoop::new(coordinator, keyboard, task_rx, config.ui.tick_rate);

    setup_shutdown_handler(event_loop.shutdown_token());
    setup_panic_handler();

    let mut terminal = setup_terminal().context("Failed to initialize terminal")?;
    let result = event_loop.run(&mut terminal).await;
    cleanup_terminal(&mut terminal)?;

    result.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

fn setup_shutdown_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Failed to create SIGTERM handler: {}", e);
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM"),
                _ = signal::ctrl_c() => info!("Received Ctrl+C"),
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                return;
            }
            info!("Received Ctrl+C");
        }

        shutdown.cancel();
    });
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
