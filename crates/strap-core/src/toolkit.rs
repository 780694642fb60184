//! Widget factory
//!
//! Holds the configuration and the scheduler shared by every tab group, and
//! builds widgets with configured defaults.

use std::sync::Arc;

use strap_dropdown::{
    DropdownEvent, DropdownModel, DropdownOption, DropdownProps, DropdownSelect, OptionValue,
};
use strap_runtime::{Emitter, ModelBinding, Scheduler, TokioScheduler};
use strap_tabs::{TabDescriptor, TabGroupController, TabGroupProps, TabPanel};

use crate::config::Config;
use crate::Result;

pub struct Toolkit {
    config: Config,
    scheduler: Arc<dyn Scheduler>,
}

impl Toolkit {
    pub fn new(config: Config, scheduler: Arc<dyn Scheduler>) -> Self {
        tracing::info!(
            fade_ms = config.fade_duration_ms,
            css_transitions = config.css_transitions,
            "Created widget toolkit"
        );

        Self { config, scheduler }
    }

    /// Toolkit scheduling on the current tokio runtime
    pub fn with_tokio(config: Config) -> Result<Self> {
        let scheduler = TokioScheduler::current()?;
        Ok(Self::new(config, Arc::new(scheduler)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scheduler(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn tab_group_props(&self) -> TabGroupProps {
        TabGroupProps {
            fade: self.config.tab_fade,
            size: self.config.tab_size.clone(),
            transition: self.config.transition_delay(true),
        }
    }

    /// Empty tab group; register panels then call `ready`
    pub fn tab_group(&self) -> TabGroupController {
        TabGroupController::new(self.tab_group_props(), self.scheduler())
    }

    /// Tab group with `tabs` registered in order and initial activation done
    pub fn tab_group_with<I>(&self, tabs: I) -> Result<(TabGroupController, Vec<TabPanel>)>
    where
        I: IntoIterator<Item = TabDescriptor>,
    {
        let group = self.tab_group();
        let panels = tabs
            .into_iter()
            .map(|descriptor| group.register(descriptor))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        group.ready()?;

        Ok((group, panels))
    }

    pub fn dropdown_props(&self) -> DropdownProps {
        DropdownProps {
            default_text: self.config.dropdown_default_text.clone(),
            variant: self.config.dropdown_variant.clone(),
            ..DropdownProps::default()
        }
    }

    /// Dropdown with configured defaults. `events` should already have its
    /// listeners, since a preset model emits `selected:dropdown` here.
    pub fn dropdown<V, B>(
        &self,
        id: impl Into<String>,
        list: Vec<DropdownOption<V>>,
        model: B,
        events: Emitter<DropdownEvent<V>>,
    ) -> DropdownSelect<V, B>
    where
        V: OptionValue,
        B: ModelBinding<DropdownModel<V>>,
    {
        let props = DropdownProps {
            id: Some(id.into()),
            ..self.dropdown_props()
        };
        DropdownSelect::new(props, list, model, events)
    }
}
