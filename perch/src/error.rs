//! Perch error types.

use thiserror::Error;

use crate::popover::PopoverId;

/// Errors from the popover arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PopoverError {
    #[error("unknown popover: {0}")]
    UnknownPopover(PopoverId),

    #[error("parent {parent} of submenu {child} is not open")]
    ParentNotOpen { parent: PopoverId, child: PopoverId },
}

/// Errors from loading a [`PlacementConfig`](crate::config::PlacementConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {field}: {value} (must be finite and >= 0)")]
    Invalid { field: &'static str, value: f32 },
}
