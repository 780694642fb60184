//! User input events handed to widget operations

/// The input event that triggered a widget operation.
///
/// Widgets may stop its propagation so ancestor handlers (for example a
/// click-outside-to-close listener) never see it.
#[derive(Debug, Clone, Default)]
pub struct InputEvent {
    propagation_stopped: bool,
}

impl InputEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
