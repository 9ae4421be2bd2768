//! Assertion helpers for pager tests.

use pager_core::{PageIndex, PagingController};
use pager_geometry::{Rect, Size};

/// Assert that a value is within `tolerance` of the expected value.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that exactly `expected` indices are cached.
pub fn assert_cached(controller: &PagingController, expected: &[PageIndex]) {
    assert_eq!(
        controller.cached_indices(),
        expected,
        "cached indices mismatch"
    );
}

/// Assert that every cached page sits in its slot of a strip of `page_size`
/// pages.
pub fn assert_pages_in_slots(controller: &PagingController, page_size: Size) {
    for (index, page) in controller.cache().iter() {
        assert_rect_approx_eq(
            page.frame(),
            Rect::page_slot(index, page_size),
            0.001,
            &format!("page {} at index {}", page.id(), index),
        );
    }
}
