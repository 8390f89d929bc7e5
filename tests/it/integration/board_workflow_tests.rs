//! Board Workflow Integration Tests

use crate::helpers::{
    assert_image_count, assert_image_position, board_with_images, test_image, TestBoardBuilder,
};
use promptboard::constants::{DEFAULT_IMAGE_SIZE, FREEFORM_ORIGIN, FREEFORM_STAGGER, GRID_UNIT};
use promptboard::snap::{finalize_position, snap_position, EdgeKind, GuideSource};
use promptboard::types::ViewMode;

const CANVAS: (f32, f32) = (1600.0, 1000.0);

#[test]
fn test_new_board_workflow() {
    let board = TestBoardBuilder::new().build();
    assert!(board.is_empty());
    assert_eq!(board.selected(), None);
    assert_eq!(board.view_mode, ViewMode::Grid);
}

#[test]
fn test_generation_appends_and_selects() {
    let mut board = board_with_images(2);
    assert_image_count(&board, 2);
    assert_eq!(board.selected(), Some(2));

    // A new generation lands selected, on the next cascade slot.
    let id = board.next_image_id();
    board.add_image(test_image(id));
    assert_eq!(board.selected(), Some(id));
    assert_image_position(
        &board,
        id,
        (
            FREEFORM_ORIGIN.0 + 2.0 * FREEFORM_STAGGER,
            FREEFORM_ORIGIN.1 + 2.0 * FREEFORM_STAGGER,
        ),
    );
}

#[test]
fn test_drag_snaps_to_neighbor_edge() {
    let mut board = TestBoardBuilder::new()
        .with_images(2)
        .with_view_mode(ViewMode::FreeForm)
        .build();

    // Propose a position 3px short of the first image's right edge.
    let edge = FREEFORM_ORIGIN.0 + DEFAULT_IMAGE_SIZE.0;
    let others = board.bounds_except(2);
    let outcome = snap_position((edge - 3.0, 600.0), DEFAULT_IMAGE_SIZE, &others, CANVAS, true);

    assert_eq!(outcome.position, (edge, 600.0));
    let guide = outcome.guides.vertical.expect("x axis should snap");
    assert_eq!(guide.line, edge);
    assert_eq!(guide.source, GuideSource::Item(1));
    assert_eq!(guide.item_edge, EdgeKind::Leading);
    assert_eq!(guide.target_edge, EdgeKind::Trailing);
    assert_eq!(guide.distance, 3.0);
    assert!(outcome.guides.horizontal.is_none());

    // Commit the drag: snapped gestures keep the exact snapped position.
    board.move_image(2, outcome.position);
    let settled = finalize_position(outcome.position, DEFAULT_IMAGE_SIZE, CANVAS, true, false);
    board.move_image(2, settled);
    assert_image_position(&board, 2, (edge, 600.0));
}

#[test]
fn test_unsnapped_release_rounds_to_grid() {
    let mut board = TestBoardBuilder::new()
        .with_images(1)
        .with_view_mode(ViewMode::FreeForm)
        .build();

    let settled = finalize_position((401.0, 299.0), DEFAULT_IMAGE_SIZE, CANVAS, false, false);
    assert_eq!(settled, (408.0, 288.0));
    assert_eq!(settled.0 % GRID_UNIT, 0.0);
    assert_eq!(settled.1 % GRID_UNIT, 0.0);

    board.move_image(1, settled);
    assert_image_position(&board, 1, (408.0, 288.0));
}

#[test]
fn test_modifier_release_keeps_free_position() {
    let settled = finalize_position((401.0, 299.0), DEFAULT_IMAGE_SIZE, CANVAS, false, true);
    assert_eq!(settled, (401.0, 299.0));
}

#[test]
fn test_release_clamps_to_canvas() {
    // Snapped release near the corner still cannot leave the canvas.
    let settled = finalize_position((1500.0, 950.0), DEFAULT_IMAGE_SIZE, CANVAS, true, false);
    assert_eq!(
        settled,
        (CANVAS.0 - DEFAULT_IMAGE_SIZE.0, CANVAS.1 - DEFAULT_IMAGE_SIZE.1)
    );
}

#[test]
fn test_click_selects_topmost_then_raises() {
    let mut board = TestBoardBuilder::new()
        .with_images(3)
        .with_view_mode(ViewMode::FreeForm)
        .build();

    // The cascade overlaps; a point inside all three hits the topmost.
    let point = (130.0, 130.0);
    let hit = board.hit_test(point).expect("point is inside the cascade");
    assert_eq!(hit, 3);

    board.select(hit);
    board.bring_to_front(hit);
    assert_eq!(board.selected(), Some(3));

    // Raising the bottom image changes what the same point hits.
    board.bring_to_front(1);
    assert_eq!(board.hit_test(point), Some(1));
}

#[test]
fn test_removing_selected_image_clears_selection() {
    let mut board = board_with_images(2);
    board.select(1);
    assert!(board.remove_image(1));
    assert_eq!(board.selected(), None);
    assert_image_count(&board, 1);
}

#[test]
fn test_reentering_freeform_resets_layout() {
    let mut board = TestBoardBuilder::new()
        .with_images(2)
        .with_view_mode(ViewMode::FreeForm)
        .build();

    board.move_image(2, (500.0, 500.0));
    assert_image_position(&board, 2, (500.0, 500.0));

    // Staying in free-form keeps the drag.
    board.set_view_mode(ViewMode::FreeForm);
    assert_image_position(&board, 2, (500.0, 500.0));

    // Leaving and coming back reseeds the cascade.
    board.set_view_mode(ViewMode::Grid);
    board.set_view_mode(ViewMode::FreeForm);
    assert_image_position(
        &board,
        2,
        (
            FREEFORM_ORIGIN.0 + FREEFORM_STAGGER,
            FREEFORM_ORIGIN.1 + FREEFORM_STAGGER,
        ),
    );
}
