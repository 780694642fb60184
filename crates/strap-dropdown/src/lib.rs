//! Strap Dropdown
//!
//! A dropdown select bound to a host-owned model. The model holds either the
//! selected option's raw value or, in return-object mode, the whole option.

mod error;
mod option;
mod select;

pub use error::DropdownError;
pub use option::{DropdownModel, DropdownOption, OptionValue};
pub use select::{DropdownEvent, DropdownProps, DropdownSelect, Notice, DEFAULT_TEXT};

pub type Result<T> = std::result::Result<T, DropdownError>;
