//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] strap_tabs::TabError),

    #[error("Dropdown error: {0}")]
    Dropdown(#[from] strap_dropdown::DropdownError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] strap_runtime::RuntimeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
