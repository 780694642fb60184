//! Dropdown error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DropdownError {
    #[error("Option index {index} out of range for {len} options")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No option matches the given value")]
    OptionNotFound,
}
