//! One-axis placement: measure the room on either side of the anchor, decide
//! a direction, and clamp the result into the usable span.
//!
//! Menus run this on the Y axis and submenus on the X axis; the rest of each
//! algorithm only deals with the cross axis.

/// Usable range of one viewport axis after removing the edge margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Span {
    /// Full viewport extent on this axis.
    pub extent: f32,
    /// Effective margin (never more than half the extent).
    pub margin: f32,
}

impl Span {
    pub fn new(extent: f32, margin: f32) -> Self {
        Self { extent, margin: margin.min(extent / 2.0) }
    }

    #[inline]
    pub fn lo(&self) -> f32 {
        self.margin
    }

    #[inline]
    pub fn hi(&self) -> f32 {
        self.extent - self.margin
    }

    #[inline]
    pub fn len(&self) -> f32 {
        self.hi() - self.lo()
    }

    /// Clamp a segment start so `[start, start + len]` stays inside the span.
    /// A segment longer than the span is pinned to `lo`.
    #[inline]
    pub fn clamp_start(&self, start: f32, len: f32) -> f32 {
        let max_start = (self.hi() - len).max(self.lo());
        start.max(self.lo()).min(max_start)
    }
}

/// Which side of the anchor a segment goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Towards the origin (above / left).
    Before,
    /// Away from the origin (below / right).
    After,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Before => Direction::After,
            Direction::After => Direction::Before,
        }
    }
}

/// The anchor's extent on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AnchorSpan {
    pub start: f32,
    pub end: f32,
}

/// Result of placing the content on its main axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MainAxis {
    pub direction: Direction,
    pub start: f32,
    pub len: f32,
    /// The content was shrunk below its natural length.
    pub constrained: bool,
}

/// Inputs shared by every main-axis decision.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisParams {
    pub span: Span,
    pub gap: f32,
    pub min_visible: f32,
}

impl AxisParams {
    /// Raw space between the anchor and the viewport edge in `direction`.
    fn space(&self, anchor: AnchorSpan, direction: Direction) -> f32 {
        match direction {
            Direction::Before => anchor.start,
            Direction::After => self.span.extent - anchor.end,
        }
    }

    /// Room left for content once the gap and edge margin are paid for.
    ///
    /// Both are charged on both axes, so a side only fits when the content
    /// clears the anchor by `gap` and the viewport edge by `edge_margin`.
    /// Submenus pay the margin too.
    fn room(&self, anchor: AnchorSpan, direction: Direction) -> f32 {
        self.space(anchor, direction) - self.gap - self.span.margin
    }

    /// Start coordinate of a segment of `len` placed flush against the anchor.
    fn adjacent_start(&self, anchor: AnchorSpan, direction: Direction, len: f32) -> f32 {
        match direction {
            Direction::Before => anchor.start - self.gap - len,
            Direction::After => anchor.end + self.gap,
        }
    }

    fn placed(&self, anchor: AnchorSpan, direction: Direction, len: f32, natural: f32) -> MainAxis {
        let start = self.span.clamp_start(self.adjacent_start(anchor, direction, len), len);
        MainAxis { direction, start, len, constrained: len < natural }
    }

    /// First pass with no usable size: sit next to the anchor on the preferred
    /// side with a guessed length.
    pub fn unmeasured(&self, anchor: AnchorSpan, preferred: Direction, guess: f32) -> MainAxis {
        let len = guess.min(self.span.len());
        self.placed(anchor, preferred, len, len)
    }

    /// Full decision for content of `natural` length.
    pub fn decide(&self, anchor: AnchorSpan, natural: f32, preferred: Direction) -> MainAxis {
        let len = natural.min(self.span.len());

        for direction in [preferred, preferred.opposite()] {
            if self.room(anchor, direction) >= len {
                return self.placed(anchor, direction, len, natural);
            }
        }

        // Neither side fits: strictly more space wins, ties keep the preference.
        let opposite = preferred.opposite();
        let direction = if self.space(anchor, opposite) > self.space(anchor, preferred) {
            opposite
        } else {
            preferred
        };

        let avail = self.room(anchor, direction).max(0.0);
        if avail > 0.0 && avail >= len.min(self.min_visible) {
            self.placed(anchor, direction, avail, natural)
        } else {
            // Too cramped next to the anchor; overlap it rather than vanish.
            self.placed(anchor, direction, len, natural)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(extent: f32) -> AxisParams {
        AxisParams { span: Span::new(extent, 16.0), gap: 4.0, min_visible: 32.0 }
    }

    fn anchor(start: f32, len: f32) -> AnchorSpan {
        AnchorSpan { start, end: start + len }
    }

    #[test]
    fn test_span_bounds() {
        let s = Span::new(600.0, 16.0);
        assert_eq!((s.lo(), s.hi(), s.len()), (16.0, 584.0, 568.0));
    }

    #[test]
    fn test_span_margin_capped_at_half_extent() {
        let s = Span::new(20.0, 16.0);
        assert_eq!(s.margin, 10.0);
        assert_eq!(s.len(), 0.0);
    }

    #[test]
    fn test_clamp_start() {
        let s = Span::new(400.0, 16.0);
        assert_eq!(s.clamp_start(10.0, 200.0), 16.0);
        assert_eq!(s.clamp_start(300.0, 200.0), 184.0);
        assert_eq!(s.clamp_start(100.0, 200.0), 100.0);
        assert_eq!(s.clamp_start(100.0, 500.0), 16.0);
    }

    #[test]
    fn test_decide_preferred_fits() {
        let m = params(600.0).decide(anchor(100.0, 40.0), 200.0, Direction::After);
        assert_eq!(m, MainAxis { direction: Direction::After, start: 144.0, len: 200.0, constrained: false });
    }

    #[test]
    fn test_decide_flips_when_preferred_short() {
        let m = params(600.0).decide(anchor(500.0, 40.0), 300.0, Direction::After);
        assert_eq!(m.direction, Direction::Before);
        assert_eq!(m.start, 196.0);
        assert!(!m.constrained);
    }

    #[test]
    fn test_decide_exact_fit_is_accepted() {
        // room below = 600 - 340 - 4 - 16 = 240
        let m = params(600.0).decide(anchor(300.0, 40.0), 240.0, Direction::After);
        assert_eq!(m.direction, Direction::After);
        assert_eq!(m.start + m.len, 584.0);
    }

    #[test]
    fn test_decide_squashes_into_larger_side() {
        // below: 600-340 = 260 space, above: 300 space; content 400 fits neither.
        let m = params(600.0).decide(anchor(300.0, 40.0), 400.0, Direction::After);
        assert_eq!(m.direction, Direction::Before);
        assert_eq!(m.len, 280.0);
        assert_eq!(m.start, 16.0);
        assert!(m.constrained);
    }

    #[test]
    fn test_decide_tie_keeps_preferred() {
        // anchor centred: 280 space each side.
        let m = params(600.0).decide(anchor(280.0, 40.0), 400.0, Direction::Before);
        assert_eq!(m.direction, Direction::Before);
        let m = params(600.0).decide(anchor(280.0, 40.0), 400.0, Direction::After);
        assert_eq!(m.direction, Direction::After);
    }

    #[test]
    fn test_decide_overlaps_when_no_room() {
        // Anchor covers almost the whole axis.
        let m = params(600.0).decide(anchor(10.0, 580.0), 100.0, Direction::After);
        assert_eq!(m.len, 100.0);
        assert!(m.start >= 16.0 && m.start + m.len <= 584.0);
        assert!(!m.constrained);
    }

    #[test]
    fn test_unmeasured_clamped_on_screen() {
        let m = params(600.0).unmeasured(anchor(590.0, 40.0), Direction::After, 0.0);
        assert_eq!(m.start, 584.0);
        assert_eq!(m.len, 0.0);
    }
}
