//! Placement configuration.
//!
//! One constant set is used for both menus and submenus: a 16px edge margin
//! and a 4px gap between the trigger and the popover.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_EDGE_MARGIN: f32 = 16.0;
pub const DEFAULT_GAP: f32 = 4.0;
pub const DEFAULT_MIN_VISIBLE: f32 = 32.0;

/// Tunables for [`resolve`](crate::placement::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    /// Minimum distance kept from every viewport edge.
    pub edge_margin: f32,
    /// Distance between the anchor edge and the content edge.
    pub gap: f32,
    /// Smallest room worth placing next to the anchor. Below this the
    /// popover is allowed to overlap its anchor instead of being squashed.
    pub min_visible: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            edge_margin: DEFAULT_EDGE_MARGIN,
            gap: DEFAULT_GAP,
            min_visible: DEFAULT_MIN_VISIBLE,
        }
    }
}

impl PlacementConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject negative or non-finite values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("edge_margin", self.edge_margin),
            ("gap", self.gap),
            ("min_visible", self.min_visible),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }

    /// Copy with every field forced into range. The resolver runs on this so
    /// a bad config degrades layout instead of panicking.
    pub(crate) fn sanitized(&self) -> Self {
        let fix = |v: f32, default: f32| if v.is_finite() && v >= 0.0 { v } else { default };
        Self {
            edge_margin: fix(self.edge_margin, DEFAULT_EDGE_MARGIN),
            gap: fix(self.gap, DEFAULT_GAP),
            min_visible: fix(self.min_visible, DEFAULT_MIN_VISIBLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PlacementConfig::default();
        assert_eq!(c.edge_margin, 16.0);
        assert_eq!(c.gap, 4.0);
        assert_eq!(c.min_visible, 32.0);
    }

    #[test]
    fn test_from_json_partial() {
        let c = PlacementConfig::from_json_str(r#"{"gap": 8}"#).unwrap();
        assert_eq!(c.gap, 8.0);
        assert_eq!(c.edge_margin, DEFAULT_EDGE_MARGIN);
    }

    #[test]
    fn test_from_json_empty_object() {
        let c = PlacementConfig::from_json_str("{}").unwrap();
        assert_eq!(c, PlacementConfig::default());
    }

    #[test]
    fn test_from_json_rejects_negative() {
        let err = PlacementConfig::from_json_str(r#"{"edge_margin": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "edge_margin", .. }));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        let err = PlacementConfig::from_json_str(r#"{"margin": 4}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_sanitized_replaces_bad_values() {
        let c = PlacementConfig { edge_margin: f32::NAN, gap: -3.0, min_visible: 10.0 }.sanitized();
        assert_eq!(c.edge_margin, DEFAULT_EDGE_MARGIN);
        assert_eq!(c.gap, DEFAULT_GAP);
        assert_eq!(c.min_visible, 10.0);
    }
}
