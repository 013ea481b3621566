//! Perch: adaptive popover placement for dropdown menus and submenus.
//!
//! Perch decides where a popover goes so it stays on-screen and reads
//! naturally next to its trigger:
//! - Dropdown menus open below (or above) the trigger, clamped horizontally
//! - Submenus open right (or left) of their trigger, shifted up to fit
//! - Content that cannot fit is shrunk and flagged for scrolling
//!
//! # Architecture
//!
//! [`placement::resolve`] is a pure function of anchor, content and viewport
//! geometry. [`PopoverArena`] owns open/close state per popover and runs the
//! resolver twice per open: once with an estimated size, once with the
//! measured one. [`Menu`] models menu entries and estimates their size.
//!
//! # Usage
//!
//! ```
//! use perch::{PlacementConfig, PopoverArena, MeasureOutcome, Rect, Side, Size};
//!
//! let mut arena = PopoverArena::new(Size::new(400.0, 600.0), PlacementConfig::default());
//! let menu = arena.create_menu();
//! let ticket = arena.open(menu, Rect::new(10.0, 500.0, 100.0, 40.0)).unwrap();
//!
//! // Later, once the host has laid the content out:
//! match arena.content_measured(ticket, Size::new(200.0, 300.0)).unwrap() {
//!     MeasureOutcome::Applied { placement, .. } => assert_eq!(placement.side, Side::Above),
//!     MeasureOutcome::Stale => unreachable!(),
//! }
//! ```

// Core primitives
pub mod primitives;

// Placement resolver
pub mod config;
pub mod placement;

// Per-instance state
pub mod popover;

// Menu model
pub mod menu;

pub mod error;

// Re-export core types
pub use config::PlacementConfig;
pub use error::{ConfigError, PopoverError};
pub use menu::{Activation, Content, Menu, MenuEntry, MenuItem, MenuMetrics, NodeHandle, Row, Step, SubMenu};
pub use placement::{ContentSize, Placement, PlacementRequest, Side, resolve};
pub use popover::{DismissReason, MeasureOutcome, MeasureTicket, PopoverArena, PopoverId, PopoverKind};
pub use primitives::{Edges, Point, Rect, Size};
