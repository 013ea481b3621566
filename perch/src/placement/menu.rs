//! Dropdown menu placement: below or above the trigger, left-aligned with it
//! and clamped horizontally.

use crate::primitives::Rect;

use super::axis::{AnchorSpan, Direction};
use super::{Frame, Placed, Side};

pub(crate) fn place(frame: &Frame, preferred: Direction) -> Placed {
    let anchor = frame.anchor;
    let along = AnchorSpan { start: anchor.y, end: anchor.bottom() };

    let main = match frame.content {
        Some(content) => frame.y.decide(along, content.height, preferred),
        None => frame.y.unmeasured(along, preferred, 0.0),
    };

    // The panel is never narrower than its trigger.
    let natural_width = anchor.width.max(frame.content.map_or(anchor.width, |c| c.width));
    let width = natural_width.min(frame.x.span.len());
    let left = frame.x.span.clamp_start(anchor.x, width);

    Placed {
        rect: Rect::new(left, main.start, width, main.len),
        side: Side::vertical(main.direction),
        max_width: (width < natural_width).then_some(width),
        max_height: main.constrained.then_some(main.len),
    }
}
