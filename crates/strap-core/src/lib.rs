//! Strap Core
//!
//! Entry point for hosts embedding the widgets: configuration, logging and a
//! [`Toolkit`] that builds tab groups and dropdowns with configured defaults.

mod config;
mod error;
mod toolkit;

pub use config::Config;
pub use error::CoreError;
pub use toolkit::Toolkit;

// Re-export widget crates
pub use strap_dropdown::{
    DropdownError, DropdownEvent, DropdownModel, DropdownOption, DropdownProps, DropdownSelect,
    Notice, OptionValue,
};
pub use strap_runtime::{
    ClassSet, Emitter, InputEvent, ManualScheduler, ModelBinding, RuntimeError, Scheduler,
    SharedModel, SubscriptionId, TaskHandle, TokioScheduler,
};
pub use strap_tabs::{
    ActivationOutcome, PanelPhase, PanelState, TabDescriptor, TabError, TabEvent,
    TabGroupController, TabGroupProps, TabPanel,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
