//! Panel Phase State Machine
//!
//! ```text
//! Inactive
//!   ↓ set_active (flags flip synchronously)
//! Activating
//!   ↓ fade delay elapses (animate flips)
//! Active
//! ```
//! Leaving `Active` or `Activating` is a single synchronous step back to
//! `Inactive`; there is no deferred exit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPhase {
    /// Panel is hidden
    Inactive,
    /// Panel is marked active, waiting for the fade-in flip
    Activating,
    /// Panel is active and animated in
    Active,
}

impl PanelPhase {
    /// Derive the phase from a panel's `active` and `animate` flags
    pub fn from_flags(active: bool, animate: bool) -> Self {
        match (active, animate) {
            (false, _) => PanelPhase::Inactive,
            (true, false) => PanelPhase::Activating,
            (true, true) => PanelPhase::Active,
        }
    }

    /// Check if transition to another phase is valid
    pub fn can_transition_to(&self, target: PanelPhase) -> bool {
        match (self, target) {
            (PanelPhase::Inactive, PanelPhase::Activating) => true,
            (PanelPhase::Activating, PanelPhase::Active) => true,
            // Superseded before the flip fired
            (PanelPhase::Activating, PanelPhase::Inactive) => true,
            (PanelPhase::Active, PanelPhase::Inactive) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    /// Flags (`active`, `animate`) that represent this phase
    pub fn flags(&self) -> (bool, bool) {
        match self {
            PanelPhase::Inactive => (false, false),
            PanelPhase::Activating => (true, false),
            PanelPhase::Active => (true, true),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelPhase::Inactive => "inactive",
            PanelPhase::Activating => "activating",
            PanelPhase::Active => "active",
        }
    }
}

impl std::fmt::Display for PanelPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PanelPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inactive" => Ok(PanelPhase::Inactive),
            "activating" => Ok(PanelPhase::Activating),
            "active" => Ok(PanelPhase::Active),
            _ => Err(format!("Unknown panel phase: {}", s)),
        }
    }
}
