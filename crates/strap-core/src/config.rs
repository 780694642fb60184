//! Widget configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use strap_dropdown::DEFAULT_TEXT;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab fade length, kept in step with the stylesheet transition
    pub fade_duration_ms: u64,
    /// Whether the host renders CSS transitions. Without them tabs switch
    /// immediately even when fading is on.
    pub css_transitions: bool,
    pub tab_fade: bool,
    pub tab_size: String,
    pub dropdown_default_text: String,
    pub dropdown_variant: String,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Delay before a newly activated tab animates in
    pub fn transition_delay(&self, fade: bool) -> Duration {
        if fade && self.css_transitions {
            Duration::from_millis(self.fade_duration_ms)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fade_duration_ms: 150,
            css_transitions: true,
            tab_fade: true,
            tab_size: "md".to_string(),
            dropdown_default_text: DEFAULT_TEXT.to_string(),
            dropdown_variant: "default".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.transition_delay(true), Duration::from_millis(150));
        assert_eq!(config.transition_delay(false), Duration::ZERO);
        assert_eq!(config.dropdown_default_text, "Please select one");
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(r#"{"css_transitions": false, "tab_size": "lg"}"#).unwrap();
        assert_eq!(config.tab_size, "lg");
        assert!(config.tab_fade);
        assert_eq!(config.transition_delay(true), Duration::ZERO);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Config::from_json_str("{not json"),
            Err(crate::CoreError::Serialization(_))
        ));
    }
}
