//! Strap Tabs
//!
//! A tab group controller owning an ordered set of registered panels.
//! At most one panel is active at a time; activation flips the panel's
//! `animate` flag after a fade delay so the host can drive an enter transition.

mod controller;
mod error;
mod panel;
mod state;

pub use controller::{
    ActivationOutcome, TabEvent, TabGroupController, TabGroupProps, TRANSITION_DURATION,
};
pub use error::TabError;
pub use panel::{PanelState, TabDescriptor, TabPanel};
pub use state::PanelPhase;

pub type Result<T> = std::result::Result<T, TabError>;
