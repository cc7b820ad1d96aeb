pub mod error;

pub mod config;

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod action_dispatcher;

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};

    pub mod state_coordinator;
    pub use state_coordinator::StateCoordinator;

    pub mod handlers;
}

pub mod model {
    pub mod fs_state;
    pub use fs_state::Listing;

    pub mod selection;
    pub use selection::{SelectionInput, SelectionModel};

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, UIOverlay, UIState};
}

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod ui;
    pub use ui::View;

    pub mod components {
        pub mod confirm_overlay;
        pub use confirm_overlay::ConfirmOverlay;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod object_table;
        pub use object_table::ObjectTable;
        pub mod status_bar;
        pub use status_bar::{PathHeader, StatusBar};
    }
}

pub mod fs {
    pub mod dir_scanner;
    pub mod object_info;
    pub mod utils;
}

pub mod operators {
    pub mod file_system_operator;
    pub use file_system_operator::{FileSystemService, LocalFileSystemOperator};
}

pub mod logging;
pub use logging::LoggerBuilder;

pub mod util {
    pub mod humanize;
}

pub use error::AppError;

pub use model::{fs_state::Listing, selection::SelectionModel, ui_state::UIState};
