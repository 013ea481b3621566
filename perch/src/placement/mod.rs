//! Popover Placement Resolver.
//!
//! [`resolve`] is a pure function from anchor, content and viewport geometry
//! to a [`Placement`]. It never fails: when space runs out it shrinks the
//! content and reports the constraint through `max_width`/`max_height` and
//! `overflow`, leaving scrolling to the render host.
//!
//! Vertical sides (`Below`/`Above`) use the menu algorithm, horizontal sides
//! (`Left`/`Right`) the submenu algorithm. Both follow the same three steps:
//! measure the available space, decide a side, clamp into the usable viewport.

mod axis;
mod menu;
mod submenu;

use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;
use crate::primitives::{Edges, Point, Rect, Size};

use axis::{AxisParams, Direction, Span};

/// Placement intent relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Below,
    Above,
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Below => Side::Above,
            Side::Above => Side::Below,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// True for `Below` and `Above`.
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Below | Side::Above)
    }

    pub(crate) fn direction(self) -> Direction {
        match self {
            Side::Above | Side::Left => Direction::Before,
            Side::Below | Side::Right => Direction::After,
        }
    }

    fn vertical(direction: Direction) -> Self {
        match direction {
            Direction::Before => Side::Above,
            Direction::After => Side::Below,
        }
    }

    fn horizontal(direction: Direction) -> Self {
        match direction {
            Direction::Before => Side::Left,
            Direction::After => Side::Right,
        }
    }
}

/// What is known about the content's size at resolve time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "size")]
pub enum ContentSize {
    /// Nothing laid out yet.
    #[default]
    Unknown,
    /// A guess (e.g. from [`Menu::estimate_size`](crate::menu::Menu::estimate_size)).
    Estimated(Size),
    /// Reported by the host after layout.
    Measured(Size),
}

impl ContentSize {
    pub fn size(&self) -> Option<Size> {
        match self {
            ContentSize::Unknown => None,
            ContentSize::Estimated(size) | ContentSize::Measured(size) => Some(*size),
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, ContentSize::Measured(_))
    }
}

/// Everything the resolver looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub anchor: Rect,
    pub content: ContentSize,
    pub viewport: Size,
    pub preferred: Side,
}

impl PlacementRequest {
    pub fn new(anchor: Rect, content: ContentSize, viewport: Size, preferred: Side) -> Self {
        Self { anchor, content, viewport, preferred }
    }

    /// Dropdown placement: prefers the space below the trigger.
    pub fn menu(anchor: Rect, content: ContentSize, viewport: Size) -> Self {
        Self::new(anchor, content, viewport, Side::Below)
    }

    /// Submenu placement: prefers the space right of the trigger.
    pub fn submenu(anchor: Rect, content: ContentSize, viewport: Size) -> Self {
        Self::new(anchor, content, viewport, Side::Right)
    }
}

/// Where to draw the popover content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Absolute box in viewport coordinates, already clamped.
    pub rect: Rect,
    /// Side actually chosen.
    pub side: Side,
    /// Set when the content must be narrower than its natural width.
    pub max_width: Option<f32>,
    /// Set when the content must be shorter than its natural height.
    pub max_height: Option<f32>,
    /// Content does not fit at its natural size; the host should scroll or truncate.
    pub overflow: bool,
    /// Computed without a measured content size.
    pub estimated: bool,
}

impl Placement {
    pub fn edges(&self, viewport: Size) -> Edges {
        Edges::of(&self.rect, viewport)
    }

    /// Offset that moves `previous` to this placement's origin.
    pub fn shift_from(&self, previous: &Placement) -> Point {
        self.rect.origin() - previous.rect.origin()
    }
}

/// Sanitized geometry shared by the menu and submenu algorithms.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub anchor: Rect,
    pub content: Option<Size>,
    pub x: AxisParams,
    pub y: AxisParams,
}

impl Frame {
    fn new(request: &PlacementRequest, config: &PlacementConfig) -> Self {
        let config = config.sanitized();
        let viewport = request.viewport.sanitized();
        let axis = |extent: f32| AxisParams {
            span: Span::new(extent, config.edge_margin),
            gap: config.gap,
            min_visible: config.min_visible,
        };
        Self {
            anchor: request.anchor.sanitized(),
            content: request.content.size().map(|s| s.sanitized()),
            x: axis(viewport.width),
            y: axis(viewport.height),
        }
    }

    /// The whole usable viewport.
    fn usable(&self) -> Rect {
        Rect::new(self.x.span.lo(), self.y.span.lo(), self.x.span.len(), self.y.span.len())
    }
}

/// Compute where to draw a popover.
pub fn resolve(request: &PlacementRequest, config: &PlacementConfig) -> Placement {
    let frame = Frame::new(request, config);
    let estimated = !request.content.is_measured();

    if let Some(content) = frame.content {
        if content.width > frame.x.span.len() && content.height > frame.y.span.len() {
            let usable = frame.usable();
            tracing::trace!(?usable, "content exceeds viewport on both axes");
            return Placement {
                rect: usable,
                side: request.preferred,
                max_width: Some(usable.width),
                max_height: Some(usable.height),
                overflow: true,
                estimated,
            };
        }
    }

    let placed = if request.preferred.is_vertical() {
        menu::place(&frame, request.preferred.direction())
    } else {
        submenu::place(&frame, request.preferred.direction())
    };

    let overflow = placed.max_width.is_some() || placed.max_height.is_some();
    tracing::trace!(side = ?placed.side, rect = ?placed.rect, overflow, "resolved placement");

    Placement {
        rect: placed.rect,
        side: placed.side,
        max_width: placed.max_width,
        max_height: placed.max_height,
        overflow,
        estimated,
    }
}

/// Output of the per-orientation algorithms before flags are finalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placed {
    pub rect: Rect,
    pub side: Side,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
}
