//! Dropdown options and the bound model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Values carried by dropdown options.
///
/// Options are matched against the model by identity rather than equality,
/// so a model holding only an id still resolves to its option.
pub trait OptionValue: Clone + Send + Sync + 'static {
    type Identity: PartialEq;

    fn identity(&self) -> Option<Self::Identity>;

    /// Fallback text when no option matches the model
    fn display_text(&self) -> String;

    fn is_empty_sequence(&self) -> bool {
        false
    }

    fn is_unset(&self) -> bool {
        false
    }
}

/// JSON values are identified by their `_id` field. Numeric ids compare by
/// numeric value, so `1` and `1.0` are the same id.
impl OptionValue for Value {
    type Identity = Value;

    fn identity(&self) -> Option<Value> {
        let id = self.get("_id").filter(|id| !id.is_null())?;
        match id.as_f64() {
            Some(number) => Some(Value::from(number)),
            None => Some(id.clone()),
        }
    }

    fn display_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    fn is_empty_sequence(&self) -> bool {
        self.as_array().is_some_and(|items| items.is_empty())
    }

    /// `null`, `false`, zero and the empty string count as unset
    fn is_unset(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(flag) => !flag,
            Value::Number(number) => number.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(_) | Value::Object(_) => false,
        }
    }
}

/// Plain strings are their own identity
impl OptionValue for String {
    type Identity = String;

    fn identity(&self) -> Option<String> {
        Some(self.clone())
    }

    fn display_text(&self) -> String {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption<V> {
    pub text: String,
    pub value: V,
}

impl<V> DropdownOption<V> {
    pub fn new(text: impl Into<String>, value: V) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropdownModel<V> {
    /// Return-object mode: the full option
    Object(DropdownOption<V>),
    /// The option's value only
    Value(V),
}

impl<V: OptionValue> DropdownModel<V> {
    /// Option text, only present in object form
    pub fn text(&self) -> Option<&str> {
        match self {
            DropdownModel::Object(option) => Some(option.text.as_str()),
            DropdownModel::Value(_) => None,
        }
    }

    pub fn identity(&self) -> Option<V::Identity> {
        match self {
            DropdownModel::Object(option) => option.value.identity(),
            DropdownModel::Value(value) => value.identity(),
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            DropdownModel::Object(option) => option.text.clone(),
            DropdownModel::Value(value) => value.display_text(),
        }
    }

    pub fn is_empty_sequence(&self) -> bool {
        match self {
            DropdownModel::Object(_) => false,
            DropdownModel::Value(value) => value.is_empty_sequence(),
        }
    }

    pub fn is_unset(&self) -> bool {
        match self {
            DropdownModel::Object(_) => false,
            DropdownModel::Value(value) => value.is_unset(),
        }
    }

    /// True if this model refers to `option`
    pub fn matches(&self, option: &DropdownOption<V>) -> bool {
        match (self.identity(), option.value.identity()) {
            (Some(model_id), Some(option_id)) => model_id == option_id,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_identity() {
        assert_eq!(json!({"_id": 1, "name": "x"}).identity(), Some(json!(1.0)));
        assert_eq!(json!({"_id": "abc"}).identity(), Some(json!("abc")));
        assert_eq!(json!({"name": "x"}).identity(), None);
        assert_eq!(json!({"_id": null}).identity(), None);
        assert_eq!(json!("plain").identity(), None);
    }

    #[test]
    fn test_json_display_text() {
        assert_eq!(json!("raw").display_text(), "raw");
        assert_eq!(json!(42).display_text(), "42");
        assert_eq!(json!({"_id": 7}).display_text(), r#"{"_id":7}"#);
        assert_eq!(Value::Null.display_text(), "");
    }

    #[test]
    fn test_matches_requires_identity_on_both_sides() {
        let option = DropdownOption::new("A", json!({"_id": 1}));
        assert!(DropdownModel::Value(json!({"_id": 1})).matches(&option));
        assert!(DropdownModel::Object(option.clone()).matches(&option));
        assert!(!DropdownModel::Value(json!({"_id": 2})).matches(&option));

        let anonymous = DropdownOption::new("B", json!("b"));
        assert!(!DropdownModel::Value(json!("b")).matches(&anonymous));
    }

    #[test]
    fn test_integer_and_float_ids_match() {
        let option = DropdownOption::new("A", json!({"_id": 1}));
        assert!(DropdownModel::Value(json!({"_id": 1.0})).matches(&option));
        assert!(!DropdownModel::Value(json!({"_id": "1"})).matches(&option));
    }

    #[test]
    fn test_json_falsy_values_are_unset() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(value.is_unset(), "{value} should be unset");
        }
        for value in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
            assert!(!value.is_unset(), "{value} should be set");
        }
    }

    #[test]
    fn test_string_values() {
        let option = DropdownOption::new("Red", "red".to_string());
        assert!(DropdownModel::Value("red".to_string()).matches(&option));
        assert_eq!(DropdownModel::Value("red".to_string()).text(), None);
    }

    #[test]
    fn test_model_deserializes_either_form() {
        let object: DropdownModel<Value> =
            serde_json::from_value(json!({"text": "A", "value": {"_id": 1}})).unwrap();
        assert_eq!(object.text(), Some("A"));

        let raw: DropdownModel<Value> = serde_json::from_value(json!({"_id": 1})).unwrap();
        assert_eq!(raw, DropdownModel::Value(json!({"_id": 1})));
    }
}
