//! Integration tests for the placement resolver and the two-pass open flow.
//!
//! Grids of anchors and content sizes stand in for property tests: every
//! combination must land inside the usable viewport, satisfy tie-break and
//! monotonicity rules, and resolve identically when repeated.

use perch::{
    ContentSize, MeasureOutcome, Menu, MenuItem, MenuMetrics, Placement, PlacementConfig,
    PlacementRequest, PopoverArena, Rect, Side, Size, SubMenu, resolve,
};

const VIEWPORT: Size = Size::new(400.0, 600.0);
const EPS: f32 = 1e-3;

fn config() -> PlacementConfig {
    PlacementConfig::default()
}

fn measured(w: f32, h: f32) -> ContentSize {
    ContentSize::Measured(Size::new(w, h))
}

fn usable(viewport: Size, margin: f32) -> Rect {
    Rect::new(margin, margin, viewport.width - 2.0 * margin, viewport.height - 2.0 * margin)
}

fn assert_within(outer: Rect, p: &Placement, context: &str) {
    let slack = Rect::new(outer.x - EPS, outer.y - EPS, outer.width + 2.0 * EPS, outer.height + 2.0 * EPS);
    assert!(slack.contains_rect(&p.rect), "{context}: {:?} escapes {outer:?}", p.rect);
}

fn anchors() -> Vec<Rect> {
    let mut anchors = Vec::new();
    for x in (-40..=440).step_by(40) {
        for y in (-40..=640).step_by(40) {
            for (w, h) in [(100, 40), (20, 20), (380, 60), (150, 300)] {
                anchors.push(Rect::new(x as f32, y as f32, w as f32, h as f32));
            }
        }
    }
    anchors
}

fn contents() -> Vec<Option<Size>> {
    let mut contents = vec![None];
    for (w, h) in [(50, 30), (200, 300), (368, 568), (220, 200), (10, 560), (360, 20)] {
        contents.push(Some(Size::new(w as f32, h as f32)));
    }
    contents
}

fn sides() -> [Side; 4] {
    [Side::Below, Side::Above, Side::Left, Side::Right]
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn fitting_content_stays_inside_usable_viewport() {
    let outer = usable(VIEWPORT, 16.0);
    for anchor in anchors() {
        for content in contents() {
            for side in sides() {
                let content = content.map_or(ContentSize::Unknown, ContentSize::Measured);
                let p = resolve(&PlacementRequest::new(anchor, content, VIEWPORT, side), &config());
                assert_within(outer, &p, &format!("{anchor:?} {content:?} {side:?}"));
            }
        }
    }
}

#[test]
fn oversized_content_is_clamped_and_flagged() {
    let outer = usable(VIEWPORT, 16.0);
    for anchor in anchors() {
        for side in sides() {
            for content in [measured(600.0, 100.0), measured(100.0, 900.0)] {
                let p = resolve(&PlacementRequest::new(anchor, content, VIEWPORT, side), &config());
                assert_within(outer, &p, &format!("{anchor:?} {content:?} {side:?}"));
                assert!(p.overflow, "{anchor:?} {content:?} {side:?}");
            }
        }
    }
}

#[test]
fn resolve_is_idempotent() {
    for anchor in anchors() {
        for content in contents() {
            let content = content.map_or(ContentSize::Unknown, ContentSize::Measured);
            let req = PlacementRequest::menu(anchor, content, VIEWPORT);
            assert_eq!(resolve(&req, &config()), resolve(&req, &config()));
        }
    }
}

#[test]
fn growing_space_below_never_flips_to_above() {
    let content = measured(200.0, 150.0);
    let mut seen_below = false;
    // Moving the trigger up grows the space below it.
    for y in (0..=560).rev().step_by(10) {
        let anchor = Rect::new(40.0, y as f32, 100.0, 40.0);
        let p = resolve(&PlacementRequest::menu(anchor, content, VIEWPORT), &config());
        if seen_below {
            assert_eq!(p.side, Side::Below, "flipped at y={y}");
        }
        seen_below |= p.side == Side::Below;
    }
    assert!(seen_below);
}

#[test]
fn equal_horizontal_space_keeps_preferred_side() {
    // Trigger centred horizontally: space_left == space_right.
    let anchor = Rect::new(150.0, 100.0, 100.0, 40.0);
    for content in [measured(100.0, 100.0), measured(300.0, 100.0)] {
        for preferred in [Side::Left, Side::Right] {
            let p = resolve(&PlacementRequest::new(anchor, content, VIEWPORT, preferred), &config());
            assert_eq!(p.side, preferred, "{content:?}");
        }
    }
}

#[test]
fn equal_vertical_space_keeps_preferred_side() {
    let anchor = Rect::new(40.0, 280.0, 100.0, 40.0);
    for preferred in [Side::Below, Side::Above] {
        let p = resolve(&PlacementRequest::new(anchor, measured(100.0, 400.0), VIEWPORT, preferred), &config());
        assert_eq!(p.side, preferred);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_menu_flips_above() {
    let anchor = Rect::new(10.0, 500.0, 100.0, 40.0);
    let p = resolve(&PlacementRequest::menu(anchor, measured(200.0, 300.0), VIEWPORT), &config());
    assert_eq!(p.side, Side::Above);
    assert_eq!(p.rect.y, 196.0);
    assert_eq!(p.rect.x, 16.0);
}

#[test]
fn scenario_short_menu_still_flips_above() {
    let anchor = Rect::new(10.0, 500.0, 100.0, 40.0);
    let p = resolve(&PlacementRequest::menu(anchor, measured(200.0, 50.0), VIEWPORT), &config());
    assert_eq!(p.side, Side::Above);
    assert_eq!(p.rect.y, 446.0);
}

#[test]
fn scenario_submenu_opens_left() {
    let anchor = Rect::new(350.0, 100.0, 150.0, 40.0);
    let p = resolve(&PlacementRequest::submenu(anchor, measured(220.0, 200.0), VIEWPORT), &config());
    assert_eq!(p.side, Side::Left);
    assert_eq!(p.rect.x, 126.0);
}

#[test]
fn scenario_overflow_both_axes() {
    let anchor = Rect::new(10.0, 500.0, 100.0, 40.0);
    for side in sides() {
        let p = resolve(&PlacementRequest::new(anchor, measured(500.0, 800.0), VIEWPORT, side), &config());
        assert!(p.overflow);
        assert_eq!(p.rect, Rect::new(16.0, 16.0, 368.0, 568.0));
    }
}

#[test]
fn custom_margin_and_gap() {
    let config = PlacementConfig { edge_margin: 8.0, gap: 0.0, ..PlacementConfig::default() };
    let anchor = Rect::new(0.0, 100.0, 100.0, 40.0);
    let p = resolve(&PlacementRequest::menu(anchor, measured(150.0, 100.0), VIEWPORT), &config);
    assert_eq!(p.rect, Rect::new(8.0, 140.0, 150.0, 100.0));
}

// =============================================================================
// Two-pass flow
// =============================================================================

#[test]
fn first_pass_on_screen_for_any_anchor() {
    let outer = usable(VIEWPORT, 16.0);
    for anchor in anchors() {
        let mut arena = PopoverArena::new(VIEWPORT, config());
        let menu = arena.create_menu();
        arena.open(menu, anchor).unwrap();
        assert_within(outer, &arena.placement(menu).unwrap(), &format!("{anchor:?}"));
    }
}

#[test]
fn second_pass_is_stable() {
    let anchor = Rect::new(10.0, 500.0, 100.0, 40.0);
    let mut arena = PopoverArena::new(VIEWPORT, config());
    let menu = arena.create_menu();
    let ticket = arena.open(menu, anchor).unwrap();
    let first = arena.placement(menu).unwrap();

    let MeasureOutcome::Applied { placement, shift } =
        arena.content_measured(ticket, Size::new(200.0, 300.0)).unwrap()
    else {
        panic!("measurement should apply");
    };
    assert_eq!(first.rect.translate(shift).origin(), placement.rect.origin());

    // Re-reporting the same size must not move the popover again.
    let MeasureOutcome::Applied { shift, .. } =
        arena.content_measured(ticket, Size::new(200.0, 300.0)).unwrap()
    else {
        panic!("measurement should apply");
    };
    assert_eq!(shift.max_abs(), 0.0);
}

#[test]
fn menu_estimate_removes_corrective_jump() {
    let metrics = MenuMetrics::default();
    let menu = Menu::new()
        .label("Actions")
        .item(MenuItem::new("Copy").icon("copy-outline"))
        .item(MenuItem::new("Share").icon("share-outline"))
        .separator()
        .item(MenuItem::new("Delete").icon("trash-outline").destructive(true));
    let estimate = menu.estimate_size(&metrics);

    let anchor = Rect::new(10.0, 440.0, 120.0, 40.0);
    let mut arena = PopoverArena::new(VIEWPORT, config());
    let id = arena.create_menu();
    let ticket = arena.open_with_estimate(id, anchor, estimate).unwrap();
    assert_eq!(arena.placement(id).unwrap().side, Side::Above);

    // Host measures exactly what the model guessed.
    let MeasureOutcome::Applied { shift, .. } = arena.content_measured(ticket, estimate).unwrap() else {
        panic!("measurement should apply");
    };
    assert_eq!(shift.max_abs(), 0.0);
}

#[test]
fn submenu_follows_parent_panel() {
    let metrics = MenuMetrics::default();
    let menu = Menu::new()
        .item(MenuItem::new("Profile"))
        .sub(SubMenu::new("Invite users").item(MenuItem::new("Email")).item(MenuItem::new("Message")));

    let mut arena = PopoverArena::new(VIEWPORT, config());
    let root = arena.create_menu();
    let sub = arena.create_submenu(root).unwrap();

    let ticket = arena.open(root, Rect::new(200.0, 80.0, 120.0, 40.0)).unwrap();
    arena.content_measured(ticket, menu.estimate_size(&metrics)).unwrap();
    let panel = arena.placement(root).unwrap().rect;

    let sub_anchor = menu.submenu_anchor(1, &panel, &metrics).unwrap();
    let sub_menu = menu.sub_menu(1).unwrap().to_menu();
    let ticket = arena.open_with_estimate(sub, sub_anchor, sub_menu.estimate_size(&metrics)).unwrap();
    arena.content_measured(ticket, sub_menu.estimate_size(&metrics)).unwrap();

    let placed = arena.placement(sub).unwrap();
    // Only ~55px remain right of the parent panel.
    assert_eq!(placed.side, Side::Left);
    assert_eq!(placed.rect.y, sub_anchor.y);
    assert!(arena.is_open(root));
}
