//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab index {index} out of range for {len} tabs")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Tab group has been destroyed")]
    Destroyed,
}
