//! Submenu placement: right or left of the submenu trigger, top-aligned with
//! it and shifted up only as far as needed to fit.

use crate::primitives::Rect;

use super::axis::{AnchorSpan, Direction};
use super::{Frame, Placed, Side};

pub(crate) fn place(frame: &Frame, preferred: Direction) -> Placed {
    let anchor = frame.anchor;
    let along = AnchorSpan { start: anchor.x, end: anchor.right() };

    // Without a size the submenu is guessed to be as wide as its trigger.
    let (main, natural_height) = match frame.content {
        Some(content) => (frame.x.decide(along, content.width, preferred), content.height),
        None => (frame.x.unmeasured(along, preferred, anchor.width), 0.0),
    };

    let height = natural_height.min(frame.y.span.len());
    let top = frame.y.span.clamp_start(anchor.y, height);

    Placed {
        rect: Rect::new(main.start, top, main.len, height),
        side: Side::horizontal(main.direction),
        max_width: main.constrained.then_some(main.len),
        max_height: (height < natural_height).then_some(height),
    }
}
