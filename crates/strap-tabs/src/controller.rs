//! Tab Group Controller
//!
//! Owns the registered panels and enforces the exclusive active tab.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use std::time::Duration;

use strap_runtime::{ClassSet, Emitter, Scheduler, SubscriptionId, TaskHandle};

use crate::error::TabError;
use crate::panel::{TabDescriptor, TabPanel};
use crate::state::PanelPhase;
use crate::Result;

/// Fade-in delay, matched to the stylesheet's tab transition timing
pub const TRANSITION_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabGroupProps {
    pub fade: bool,
    pub size: String,
    /// Delay before `animate` flips when `fade` is on
    pub transition: Duration,
}

impl Default for TabGroupProps {
    fn default() -> Self {
        Self {
            fade: true,
            size: "md".to_string(),
            transition: TRANSITION_DURATION,
        }
    }
}

impl TabGroupProps {
    /// `btn-<size>`, or empty for an empty or `default` size
    pub fn size_class(&self) -> String {
        if self.size.is_empty() || self.size == "default" {
            String::new()
        } else {
            format!("btn-{}", self.size)
        }
    }

    pub fn delay(&self) -> Duration {
        if self.fade {
            self.transition
        } else {
            Duration::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TabEvent {
    /// A panel finished activating
    Changed { id: String },
}

impl TabEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TabEvent::Changed { .. } => "changed:tab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The panel is activating; the flip runs after `delay`
    Scheduled { index: usize, delay: Duration },
    /// Already active or already activating
    AlreadyActive,
    /// Disabled panels are ignored
    Disabled,
}

struct Slot {
    descriptor: TabDescriptor,
    panel: TabPanel,
}

#[derive(Debug, Clone, Copy)]
struct PendingFlip {
    index: usize,
    handle: TaskHandle,
    generation: u64,
}

#[derive(Default)]
struct GroupState {
    slots: Vec<Slot>,
    pending: Option<PendingFlip>,
    /// Bumped per scheduled flip; a flip only applies if it is still current
    generation: u64,
    destroyed: bool,
}

impl GroupState {
    fn active_index(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.descriptor.active)
    }

    fn pending_index(&self) -> Option<usize> {
        self.pending.map(|pending| pending.index)
    }
}

struct Shared {
    props: TabGroupProps,
    state: Mutex<GroupState>,
    scheduler: Arc<dyn Scheduler>,
    events: Emitter<TabEvent>,
}

impl Shared {
    /// Body of the deferred flip
    fn finish_activation(&self, generation: u64) {
        let id = {
            let mut state = self.state.lock();
            if state.destroyed {
                return;
            }

            let pending = match state.pending {
                Some(pending) if pending.generation == generation => pending,
                _ => return,
            };
            state.pending = None;

            let slot = &mut state.slots[pending.index];
            if slot.panel.is_disabled() {
                tracing::warn!(tab_id = %slot.descriptor.id, "Tab disabled during fade, not activating");
                if let Err(e) = slot.panel.transition_to(PanelPhase::Inactive) {
                    tracing::warn!(tab_id = %slot.descriptor.id, error = %e, "Failed to reset tab");
                }
                return;
            }
            if let Err(e) = slot.panel.transition_to(PanelPhase::Active) {
                tracing::warn!(tab_id = %slot.descriptor.id, error = %e, "Dropped tab activation");
                return;
            }
            slot.descriptor.active = true;
            slot.descriptor.id.clone()
        };

        tracing::debug!(tab_id = %id, "Tab activated");

        // Lock released: listeners may call back into the controller
        self.events.emit(&TabEvent::Changed { id });
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(pending) = self.state.get_mut().pending.take() {
            self.scheduler.cancel(pending.handle);
        }
    }
}

/// Controller for a group of tabs. Clones are handles to the same group.
///
/// The pending fade flip is cancelled by [`TabGroupController::destroy`] or
/// when the last handle is dropped.
#[derive(Clone)]
pub struct TabGroupController {
    shared: Arc<Shared>,
}

impl TabGroupController {
    pub fn new(props: TabGroupProps, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            shared: Arc::new(Shared {
                props,
                state: Mutex::new(GroupState::default()),
                scheduler,
                events: Emitter::new(),
            }),
        }
    }

    pub fn props(&self) -> &TabGroupProps {
        &self.shared.props
    }

    /// Register a panel, appending its descriptor in visual order.
    ///
    /// A panel flagged active is demoted if it is also disabled or if another
    /// panel is already active or activating.
    pub fn register(&self, descriptor: TabDescriptor) -> Result<TabPanel> {
        let mut state = self.shared.state.lock();
        if state.destroyed {
            return Err(TabError::Destroyed);
        }

        let mut descriptor = descriptor;
        if descriptor.active {
            if descriptor.disabled {
                tracing::warn!(tab_id = %descriptor.id, "Disabled tab registered as active, demoting");
                descriptor.active = false;
            } else if state.active_index().is_some() || state.pending.is_some() {
                tracing::warn!(tab_id = %descriptor.id, "Second active tab registered, demoting");
                descriptor.active = false;
            }
        }

        let panel = TabPanel::new(&descriptor, self.shared.props.fade);

        tracing::debug!(
            tab_id = %descriptor.id,
            index = state.slots.len(),
            active = descriptor.active,
            "Registered tab"
        );

        state.slots.push(Slot {
            descriptor,
            panel: panel.clone(),
        });

        Ok(panel)
    }

    /// Finish setup once all panels are registered: activate the first tab if
    /// none is active. A disabled first tab leaves the group without one.
    pub fn ready(&self) -> Result<()> {
        {
            let state = self.shared.state.lock();
            if state.destroyed {
                return Err(TabError::Destroyed);
            }
            if state.slots.is_empty()
                || state.active_index().is_some()
                || state.pending.is_some()
            {
                return Ok(());
            }
        }

        self.set_active(0).map(|_| ())
    }

    /// Classes for the nav link of tab `index`
    pub fn class_name_for(&self, index: usize) -> ClassSet {
        let state = self.shared.state.lock();
        let flags = state.slots.get(index).map(|slot| slot.panel.state());
        let (active, disabled) = flags
            .map(|flags| (flags.active, flags.disabled))
            .unwrap_or((false, false));

        ClassSet::new()
            .with("nav-link", true)
            .with(self.shared.props.size_class(), true)
            .with("btn", true)
            .with("active", active)
            .with("disabled", disabled)
    }

    /// Index of the committed active tab. A tab still inside its fade window
    /// does not count yet.
    pub fn active_index(&self) -> Option<usize> {
        self.shared.state.lock().active_index()
    }

    /// Index of the tab whose flip is pending, if any
    pub fn pending_target(&self) -> Option<usize> {
        self.shared.state.lock().pending_index()
    }

    /// Activate tab `index`.
    ///
    /// The previous tab is deactivated immediately. The new one is flagged
    /// active now and animated in after the fade delay, at which point its
    /// descriptor is marked active and `changed:tab` is emitted. Any flip
    /// still pending is cancelled first.
    pub fn set_active(&self, index: usize) -> Result<ActivationOutcome> {
        let mut state = self.shared.state.lock();
        if state.destroyed {
            return Err(TabError::Destroyed);
        }

        let len = state.slots.len();
        if index >= len {
            tracing::warn!(index, len, "Tab index out of range");
            return Err(TabError::IndexOutOfRange { index, len });
        }

        if state.slots[index].panel.is_disabled() {
            tracing::debug!(index, "Ignoring activation of disabled tab");
            return Ok(ActivationOutcome::Disabled);
        }

        let current = state.active_index();
        if current == Some(index) || state.pending_index() == Some(index) {
            return Ok(ActivationOutcome::AlreadyActive);
        }

        if let Some(superseded) = state.pending.take() {
            self.shared.scheduler.cancel(superseded.handle);
            state.slots[superseded.index]
                .panel
                .transition_to(PanelPhase::Inactive)?;
        }

        if let Some(previous) = current {
            let slot = &mut state.slots[previous];
            slot.descriptor.active = false;
            slot.panel.transition_to(PanelPhase::Inactive)?;
        }

        state.slots[index]
            .panel
            .transition_to(PanelPhase::Activating)?;

        state.generation += 1;
        let generation = state.generation;
        let delay = self.shared.props.delay();
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let handle = self.shared.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.finish_activation(generation);
                }
            }),
        );

        state.pending = Some(PendingFlip {
            index,
            handle,
            generation,
        });

        tracing::debug!(
            tab_id = %state.slots[index].descriptor.id,
            index,
            delay_ms = delay.as_millis() as u64,
            "Scheduled tab activation"
        );

        Ok(ActivationOutcome::Scheduled { index, delay })
    }

    /// Tear the group down. A pending flip is cancelled and never fires.
    pub fn destroy(&self) {
        let mut state = self.shared.state.lock();
        if state.destroyed {
            return;
        }
        state.destroyed = true;

        if let Some(pending) = state.pending.take() {
            self.shared.scheduler.cancel(pending.handle);
        }

        tracing::info!(tabs = state.slots.len(), "Destroyed tab group");
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.state.lock().destroyed
    }

    /// Descriptors in visual order. `disabled` reflects the panel's current flag.
    pub fn descriptors(&self) -> Vec<TabDescriptor> {
        self.shared
            .state
            .lock()
            .slots
            .iter()
            .map(|slot| TabDescriptor {
                disabled: slot.panel.is_disabled(),
                ..slot.descriptor.clone()
            })
            .collect()
    }

    pub fn panel(&self, index: usize) -> Option<TabPanel> {
        self.shared
            .state
            .lock()
            .slots
            .get(index)
            .map(|slot| slot.panel.clone())
    }

    pub fn len(&self) -> usize {
        self.shared.state.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Listen for `changed:tab`
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&TabEvent) + Send + Sync + 'static,
    {
        self.shared.events.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.events.unsubscribe(id)
    }
}
