//! Dropdown select widget

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use strap_runtime::{ClassSet, Emitter, InputEvent, ModelBinding};

use crate::error::DropdownError;
use crate::option::{DropdownModel, DropdownOption, OptionValue};
use crate::Result;

pub const DEFAULT_TEXT: &str = "Please select one";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownProps {
    /// Generated as `dropdown-<uuid>` when missing
    pub id: Option<String>,
    /// Show the toggle caret
    pub caret: bool,
    /// Menu alignment, `left` or `right`
    pub position: String,
    pub size: String,
    pub variant: String,
    pub default_text: String,
    /// Always display `default_text`
    pub force_default: bool,
    /// Bind the whole option instead of its value
    pub return_object: bool,
    pub dropup: bool,
    pub disabled: bool,
}

impl Default for DropdownProps {
    fn default() -> Self {
        Self {
            id: None,
            caret: true,
            position: "left".to_string(),
            size: String::new(),
            variant: "default".to_string(),
            default_text: DEFAULT_TEXT.to_string(),
            force_default: false,
            return_object: false,
            dropup: false,
            disabled: false,
        }
    }
}

impl DropdownProps {
    pub fn variant_class(&self) -> String {
        if self.variant.is_empty() || self.variant == "default" {
            "btn-secondary".to_string()
        } else {
            format!("btn-{}", self.variant)
        }
    }

    pub fn size_class(&self) -> String {
        if self.size.is_empty() || self.size == "default" {
            String::new()
        } else {
            format!("btn-{}", self.size)
        }
    }
}

/// Notifications sent to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DropdownEvent<V> {
    Shown { id: String },
    Hidden { id: String },
    Selected { id: String, model: DropdownModel<V> },
}

impl<V> DropdownEvent<V> {
    pub fn name(&self) -> &'static str {
        match self {
            DropdownEvent::Shown { .. } => "shown:dropdown",
            DropdownEvent::Hidden { .. } => "hidden:dropdown",
            DropdownEvent::Selected { .. } => "selected:dropdown",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            DropdownEvent::Shown { id }
            | DropdownEvent::Hidden { id }
            | DropdownEvent::Selected { id, .. } => id.as_str(),
        }
    }
}

/// Notifications the host sends to dropdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// `hide:dropdown`, sent by click-outside coordination
    HideDropdown,
}

pub struct DropdownSelect<V, B> {
    id: String,
    props: DropdownProps,
    list: Vec<DropdownOption<V>>,
    model: B,
    show: bool,
    events: Emitter<DropdownEvent<V>>,
}

impl<V, B> DropdownSelect<V, B>
where
    V: OptionValue,
    B: ModelBinding<DropdownModel<V>>,
{
    /// Create the dropdown.
    ///
    /// A model already set on creation is normalized by selecting the option
    /// with the same identity, which emits `selected:dropdown` on `events`.
    pub fn new(
        props: DropdownProps,
        list: Vec<DropdownOption<V>>,
        model: B,
        events: Emitter<DropdownEvent<V>>,
    ) -> Self {
        let id = props
            .id
            .clone()
            .unwrap_or_else(|| format!("dropdown-{}", Uuid::new_v4()));

        let mut dropdown = Self {
            id,
            props,
            list,
            model,
            show: false,
            events,
        };

        let preset = dropdown
            .current_model()
            .and_then(|model| dropdown.list.iter().find(|o| model.matches(o)).cloned());
        if let Some(option) = preset {
            tracing::debug!(dropdown_id = %dropdown.id, "Normalizing preset model");
            dropdown.select(&option);
        }

        dropdown
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn props(&self) -> &DropdownProps {
        &self.props
    }

    pub fn is_open(&self) -> bool {
        self.show
    }

    pub fn list(&self) -> &[DropdownOption<V>] {
        &self.list
    }

    /// Replace the option list
    pub fn set_list(&mut self, list: Vec<DropdownOption<V>>) {
        self.list = list;
    }

    pub fn model(&self) -> Option<DropdownModel<V>> {
        self.model.get()
    }

    pub fn events(&self) -> &Emitter<DropdownEvent<V>> {
        &self.events
    }

    /// Open or close the menu.
    ///
    /// Opening stops propagation of `event` so an ancestor click-outside
    /// handler does not close the menu straight away. Disabled dropdowns
    /// ignore toggles.
    pub fn toggle(&mut self, event: &mut InputEvent) {
        if self.props.disabled {
            tracing::debug!(dropdown_id = %self.id, "Ignoring toggle on disabled dropdown");
            return;
        }

        self.show = !self.show;

        if self.show {
            self.events.emit(&DropdownEvent::Shown {
                id: self.id.clone(),
            });
            event.stop_propagation();
        } else {
            self.events.emit(&DropdownEvent::Hidden {
                id: self.id.clone(),
            });
        }
    }

    /// Bind `option`, close the menu and emit `selected:dropdown`.
    ///
    /// The binding is always written, even with an unchanged value, so host
    /// watchers fire.
    pub fn select(&mut self, option: &DropdownOption<V>) {
        let model = if self.props.return_object {
            DropdownModel::Object(option.clone())
        } else {
            DropdownModel::Value(option.value.clone())
        };

        self.model.set(model.clone());
        self.show = false;

        tracing::debug!(dropdown_id = %self.id, text = %option.text, "Selected option");

        self.events.emit(&DropdownEvent::Selected {
            id: self.id.clone(),
            model,
        });
    }

    /// Select the option at `index` in the list
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        let len = self.list.len();
        let option = self
            .list
            .get(index)
            .cloned()
            .ok_or(DropdownError::IndexOutOfRange { index, len })?;
        self.select(&option);
        Ok(())
    }

    /// Select the option whose value has the same identity as `value`
    pub fn select_value(&mut self, value: &V) -> Result<()> {
        let wanted = DropdownModel::Value(value.clone());
        let option = self
            .list
            .iter()
            .find(|o| wanted.matches(o))
            .cloned()
            .ok_or(DropdownError::OptionNotFound)?;
        self.select(&option);
        Ok(())
    }

    /// Close without emitting
    pub fn hide(&mut self) {
        self.show = false;
    }

    pub fn handle(&mut self, notice: Notice) {
        match notice {
            Notice::HideDropdown => self.hide(),
        }
    }

    /// Text shown on the toggle button.
    ///
    /// In order: the default text when forced or when the model is blank for
    /// the binding mode; the bound option's text; the text of the list entry
    /// matching the model's identity, falling back to the raw model; empty.
    pub fn display_item(&self) -> String {
        let model = self.current_model();

        let blank = match &model {
            Some(model) if self.props.return_object => model.text().map_or(true, str::is_empty),
            Some(model) => model.is_empty_sequence(),
            None => false,
        };
        if self.props.force_default || blank {
            return self.props.default_text.clone();
        }

        match model {
            Some(DropdownModel::Object(option)) if self.props.return_object => option.text,
            Some(model) if !self.props.return_object => self
                .list
                .iter()
                .find(|o| model.matches(o))
                .map(|o| o.text.clone())
                .unwrap_or_else(|| model.display_text()),
            _ => String::new(),
        }
    }

    /// Classes for the toggle button
    pub fn button_class_set(&self) -> ClassSet {
        ClassSet::new()
            .with("btn", true)
            .with(self.props.variant_class(), true)
            .with(self.props.size_class(), true)
            .with("dropdown-toggle", self.props.caret)
    }

    /// Classes for the wrapping element
    pub fn container_class_set(&self) -> ClassSet {
        ClassSet::new()
            .with("btn-group", true)
            .with("dropdown", !self.props.dropup)
            .with("dropup", self.props.dropup)
            .with("open", self.show)
    }

    pub fn menu_class_set(&self) -> ClassSet {
        ClassSet::new()
            .with("dropdown-menu", true)
            .with("dropdown-menu-right", self.props.position == "right")
    }

    fn current_model(&self) -> Option<DropdownModel<V>> {
        self.model.get().filter(|model| !model.is_unset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use strap_runtime::SharedModel;

    type Select = DropdownSelect<Value, SharedModel<DropdownModel<Value>>>;

    fn fruit() -> Vec<DropdownOption<Value>> {
        vec![
            DropdownOption::new("Apple", json!({"_id": 1, "name": "apple"})),
            DropdownOption::new("Banana", json!({"_id": 2, "name": "banana"})),
        ]
    }

    fn props(return_object: bool) -> DropdownProps {
        DropdownProps {
            id: Some("fruit".to_string()),
            return_object,
            ..DropdownProps::default()
        }
    }

    fn recorder(events: &Emitter<DropdownEvent<Value>>) -> Arc<Mutex<Vec<String>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        events.subscribe(move |event: &DropdownEvent<Value>| {
            sink.lock().unwrap().push(format!("{}({})", event.name(), event.id()));
        });
        seen
    }

    fn build(props: DropdownProps, model: &SharedModel<DropdownModel<Value>>) -> Select {
        DropdownSelect::new(props, fruit(), model.clone(), Emitter::new())
    }

    #[test]
    fn test_select_return_object() {
        let model = SharedModel::new();
        let mut select = build(props(true), &model);
        let option = DropdownOption::new("A", json!({"_id": 1}));

        select.select(&option);
        assert_eq!(model.get(), Some(DropdownModel::Object(option)));
        assert_eq!(select.display_item(), "A");
    }

    #[test]
    fn test_select_raw_value() {
        let model = SharedModel::new();
        let mut select = DropdownSelect::new(
            props(false),
            vec![DropdownOption::new("A", json!({"_id": 1}))],
            model.clone(),
            Emitter::new(),
        );

        select.select(&DropdownOption::new("A", json!({"_id": 1})));
        assert_eq!(model.get(), Some(DropdownModel::Value(json!({"_id": 1}))));
        assert_eq!(select.display_item(), "A");
    }

    #[test]
    fn test_select_closes_and_emits() {
        let model = SharedModel::new();
        let events = Emitter::new();
        let seen = recorder(&events);
        let mut select = DropdownSelect::new(props(false), fruit(), model, events);

        select.toggle(&mut InputEvent::new());
        select.select_index(1).unwrap();

        assert!(!select.is_open());
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["shown:dropdown(fruit)", "selected:dropdown(fruit)"]
        );
    }

    #[test]
    fn test_reselecting_same_option_fires_watchers() {
        let model = SharedModel::new();
        let writes = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&writes);
        model.watch(move |_| *counter.lock().unwrap() += 1);
        let mut select = build(props(false), &model);

        select.select_index(0).unwrap();
        select.select_index(0).unwrap();
        assert_eq!(*writes.lock().unwrap(), 2);
    }

    #[test]
    fn test_force_default_wins() {
        let model = SharedModel::with_value(DropdownModel::Value(json!({"_id": 2})));
        let select = build(
            DropdownProps {
                force_default: true,
                ..props(false)
            },
            &model,
        );

        assert_eq!(select.display_item(), DEFAULT_TEXT);
    }

    #[test]
    fn test_display_default_for_blank_models() {
        let object_model = SharedModel::with_value(DropdownModel::Object(DropdownOption::new(
            "",
            json!({"_id": 9}),
        )));
        assert_eq!(build(props(true), &object_model).display_item(), DEFAULT_TEXT);

        let raw_in_object_mode = SharedModel::with_value(DropdownModel::Value(json!({"_id": 9})));
        assert_eq!(build(props(true), &raw_in_object_mode).display_item(), DEFAULT_TEXT);

        let empty_sequence = SharedModel::with_value(DropdownModel::Value(json!([])));
        assert_eq!(build(props(false), &empty_sequence).display_item(), DEFAULT_TEXT);
    }

    #[test]
    fn test_display_empty_without_model() {
        let model = SharedModel::new();
        assert_eq!(build(props(false), &model).display_item(), "");
        assert_eq!(build(props(true), &model).display_item(), "");

        let null_model = SharedModel::with_value(DropdownModel::Value(Value::Null));
        assert_eq!(build(props(false), &null_model).display_item(), "");

        let zero_model = SharedModel::with_value(DropdownModel::Value(json!(0)));
        assert_eq!(build(props(false), &zero_model).display_item(), "");
    }

    #[test]
    fn test_display_falls_back_to_raw_model() {
        let model = SharedModel::with_value(DropdownModel::Value(json!("orphan")));
        let select = build(props(false), &model);
        assert_eq!(select.display_item(), "orphan");

        let unmatched = SharedModel::with_value(DropdownModel::Value(json!({"_id": 99})));
        let select = build(props(false), &unmatched);
        assert_eq!(select.display_item(), r#"{"_id":99}"#);
    }

    #[test]
    fn test_display_with_empty_list() {
        let model = SharedModel::with_value(DropdownModel::Value(json!("x")));
        let select: Select = DropdownSelect::new(props(false), Vec::new(), model, Emitter::new());
        assert_eq!(select.display_item(), "x");
        assert!(select.list().is_empty());
    }

    #[test]
    fn test_preset_model_is_normalized() {
        let model = SharedModel::with_value(DropdownModel::Value(json!({"_id": 2})));
        let events = Emitter::new();
        let seen = recorder(&events);

        let select = DropdownSelect::new(props(true), fruit(), model.clone(), events);

        assert_eq!(model.get(), Some(DropdownModel::Object(fruit()[1].clone())));
        assert_eq!(select.display_item(), "Banana");
        assert_eq!(*seen.lock().unwrap(), vec!["selected:dropdown(fruit)"]);
    }

    #[test]
    fn test_unmatched_preset_left_alone() {
        let model = SharedModel::with_value(DropdownModel::Value(json!({"_id": 5})));
        let events = Emitter::new();
        let seen = recorder(&events);

        DropdownSelect::new(props(false), fruit(), model.clone(), events);
        assert_eq!(model.get(), Some(DropdownModel::Value(json!({"_id": 5}))));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_alternates() {
        let model = SharedModel::new();
        let events = Emitter::new();
        let seen = recorder(&events);
        let mut select = DropdownSelect::new(props(false), fruit(), model, events);

        let mut open = InputEvent::new();
        select.toggle(&mut open);
        assert!(select.is_open());
        assert!(open.propagation_stopped());

        let mut close = InputEvent::new();
        select.toggle(&mut close);
        assert!(!select.is_open());
        assert!(!close.propagation_stopped());

        select.toggle(&mut InputEvent::new());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "shown:dropdown(fruit)",
                "hidden:dropdown(fruit)",
                "shown:dropdown(fruit)"
            ]
        );
    }

    #[test]
    fn test_disabled_ignores_toggle() {
        let model = SharedModel::new();
        let mut select = build(
            DropdownProps {
                disabled: true,
                ..props(false)
            },
            &model,
        );

        let mut event = InputEvent::new();
        select.toggle(&mut event);
        assert!(!select.is_open());
        assert!(!event.propagation_stopped());
    }

    #[test]
    fn test_hide_notice_closes_silently() {
        let model = SharedModel::new();
        let events = Emitter::new();
        let seen = recorder(&events);
        let mut select = DropdownSelect::new(props(false), fruit(), model, events);

        select.toggle(&mut InputEvent::new());
        select.handle(Notice::HideDropdown);
        assert!(!select.is_open());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_select_by_value_and_index_errors() {
        let model = SharedModel::new();
        let mut select = build(props(false), &model);

        select.select_value(&json!({"_id": 2})).unwrap();
        assert_eq!(select.display_item(), "Banana");

        assert_eq!(
            select.select_value(&json!({"_id": 3})),
            Err(DropdownError::OptionNotFound)
        );
        assert_eq!(
            select.select_index(5),
            Err(DropdownError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_generated_id() {
        let model = SharedModel::new();
        let select = build(DropdownProps::default(), &model);
        assert!(select.id().starts_with("dropdown-"));
        assert_eq!(select.id().len(), "dropdown-".len() + 36);
    }

    #[test]
    fn test_button_classes() {
        let model = SharedModel::new();
        let select = build(props(false), &model);
        assert_eq!(
            select.button_class_set().to_class_string(),
            "btn btn-secondary dropdown-toggle"
        );

        let styled = build(
            DropdownProps {
                variant: "primary".to_string(),
                size: "sm".to_string(),
                caret: false,
                ..props(false)
            },
            &model,
        );
        assert_eq!(styled.button_class_set().to_class_string(), "btn btn-primary btn-sm");

        let defaults = build(
            DropdownProps {
                variant: String::new(),
                size: "default".to_string(),
                ..props(false)
            },
            &model,
        );
        assert_eq!(
            defaults.button_class_set().to_class_string(),
            "btn btn-secondary dropdown-toggle"
        );
    }

    #[test]
    fn test_container_and_menu_classes() {
        let model = SharedModel::new();
        let mut select = build(
            DropdownProps {
                dropup: true,
                position: "right".to_string(),
                ..props(false)
            },
            &model,
        );
        select.toggle(&mut InputEvent::new());

        assert_eq!(select.container_class_set().to_class_string(), "btn-group dropup open");
        assert_eq!(
            select.menu_class_set().to_class_string(),
            "dropdown-menu dropdown-menu-right"
        );
    }

    #[test]
    fn test_props_from_json() {
        let props: DropdownProps =
            serde_json::from_str(r#"{"return_object": true, "variant": "info"}"#).unwrap();
        assert!(props.return_object);
        assert!(props.caret);
        assert_eq!(props.default_text, DEFAULT_TEXT);
        assert_eq!(props.variant_class(), "btn-info");
    }
}
