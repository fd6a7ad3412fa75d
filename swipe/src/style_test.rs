#![allow(clippy::float_cmp)]

use super::*;
use crate::input::Point;

fn dragging(dx: f64) -> DragState {
    DragState { is_dragging: true, offset: Point::new(dx, 0.0), start_pos: Point::new(10.0, 10.0) }
}

// =============================================================
// Hidden window
// =============================================================

#[test]
fn negative_positions_are_hidden() {
    for position in [-1, -2, -50] {
        let style = card_style(position, &DragState::neutral());
        assert!(style.is_hidden());
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.z_index, 0);
        assert_eq!(style.transform, Transform::None);
    }
}

#[test]
fn positions_beyond_depth_are_hidden_even_while_dragging() {
    for position in [3, 4, 100] {
        assert_eq!(card_style(position, &dragging(80.0)), CardStyle::hidden());
    }
}

// =============================================================
// Active card
// =============================================================

#[test]
fn active_card_follows_drag_with_rotation() {
    let style = card_style(0, &dragging(80.0));
    assert_eq!(style.display, Display::Flex);
    assert_eq!(style.z_index, DRAG_Z_INDEX);
    assert_eq!(style.transition, Transition::None);
    assert_eq!(style.opacity, 1.0);
    match style.transform {
        Transform::Following { offset_x, rotation_deg } => {
            assert_eq!(offset_x, 80.0);
            assert!((rotation_deg - 12.0).abs() < 1e-9);
        }
        other => panic!("expected following transform, got {other:?}"),
    }
}

#[test]
fn active_card_rotates_negative_for_left_drag() {
    let style = card_style(0, &dragging(-40.0));
    match style.transform {
        Transform::Following { rotation_deg, .. } => assert!((rotation_deg + 6.0).abs() < 1e-9),
        other => panic!("expected following transform, got {other:?}"),
    }
}

#[test]
fn active_card_at_rest_is_stacked_on_top() {
    let style = card_style(0, &DragState::neutral());
    assert_eq!(style.z_index, 3);
    assert_eq!(style.transition, Transition::Eased);
    assert_eq!(style.transform, Transform::Stacked { lift_px: 0.0, scale: 1.0 });
}

// =============================================================
// Resting stack
// =============================================================

#[test]
fn second_card_is_lifted_and_shrunk() {
    let style = card_style(1, &dragging(120.0));
    assert_eq!(style.z_index, 2);
    assert_eq!(style.transition, Transition::Eased);
    match style.transform {
        Transform::Stacked { lift_px, scale } => {
            assert_eq!(lift_px, 20.0);
            assert!((scale - 0.9).abs() < 1e-9);
        }
        other => panic!("expected stacked transform, got {other:?}"),
    }
}

#[test]
fn third_card_is_deepest_visible() {
    let style = card_style(2, &DragState::neutral());
    assert_eq!(style.z_index, 1);
    match style.transform {
        Transform::Stacked { lift_px, scale } => {
            assert_eq!(lift_px, 40.0);
            assert!((scale - 0.8).abs() < 1e-9);
        }
        other => panic!("expected stacked transform, got {other:?}"),
    }
}

// =============================================================
// Purity
// =============================================================

#[test]
fn identical_inputs_yield_identical_styles() {
    let drags = [DragState::neutral(), dragging(33.0), dragging(-250.0), dragging(500.0)];
    for position in -3..6 {
        for drag in &drags {
            assert_eq!(card_style(position, drag), card_style(position, drag));
            assert_eq!(card_style(position, drag).to_css(), card_style(position, drag).to_css());
        }
    }
}

#[test]
fn style_at_uses_offset_from_cursor() {
    let drag = dragging(50.0);
    assert_eq!(card_style_at(5, 5, &drag), card_style(0, &drag));
    assert_eq!(card_style_at(6, 5, &drag), card_style(1, &drag));
    assert!(card_style_at(4, 5, &drag).is_hidden());
    assert!(card_style_at(8, 5, &drag).is_hidden());
}

// =============================================================
// CSS rendering
// =============================================================

#[test]
fn css_for_hidden_card() {
    assert_eq!(
        CardStyle::hidden().to_css(),
        "display: none; z-index: 0; transform: none; opacity: 0; transition: none"
    );
}

#[test]
fn css_for_dragged_card() {
    assert_eq!(
        card_style(0, &dragging(100.0)).to_css(),
        "display: flex; z-index: 10; transform: translateX(-50%) translateX(100px) rotate(15deg); opacity: 1; transition: none"
    );
}

#[test]
fn css_for_second_card() {
    assert_eq!(
        card_style(1, &DragState::neutral()).to_css(),
        "display: flex; z-index: 2; transform: translateX(-50%) translateY(-20px) scale(0.9); opacity: 1; transition: all 0.3s ease"
    );
}

#[test]
fn style_serializes_with_tagged_transform() {
    let json = serde_json::to_value(card_style(1, &DragState::neutral())).unwrap();
    assert_eq!(json["display"], "flex");
    assert_eq!(json["transition"], "eased");
    assert_eq!(json["transform"]["kind"], "stacked");
    assert_eq!(json["transform"]["lift_px"], 20.0);
}
