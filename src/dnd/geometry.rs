//! Cell-grid geometry helpers for drop-target resolution.
//!
//! All coordinates are terminal cells. Rectangles come straight from the
//! layout pass, so width/height may be zero for collapsed regions.

use ratatui::layout::Rect;

/// Return whether the rect contains the cell at (x, y).
///
pub fn contains_point(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x.saturating_add(rect.width) && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

/// Return the overlap area of two rects in cells, zero when disjoint.
///
pub fn overlap_area(a: Rect, b: Rect) -> u32 {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = (a.x.saturating_add(a.width)).min(b.x.saturating_add(b.width));
    let y2 = (a.y.saturating_add(a.height)).min(b.y.saturating_add(b.height));
    if x2 <= x1 || y2 <= y1 {
        return 0;
    }
    u32::from(x2 - x1) * u32::from(y2 - y1)
}

/// Return the squared distance between the centers of two rects.
///
pub fn center_distance_sq(a: Rect, b: Rect) -> u64 {
    let (ax, ay) = center(a);
    let (bx, by) = center(b);
    let dx = i64::from(ax) - i64::from(bx);
    let dy = i64::from(ay) - i64::from(by);
    (dx * dx + dy * dy) as u64
}

/// Return the squared distance from a point to the rect's center.
///
pub fn point_center_distance_sq(rect: Rect, x: u16, y: u16) -> u64 {
    let (cx, cy) = center(rect);
    let dx = i64::from(cx) - i64::from(x);
    let dy = i64::from(cy) - i64::from(y);
    (dx * dx + dy * dy) as u64
}

/// Return the midpoint row of the rect.
///
pub fn mid_row(rect: Rect) -> u16 {
    rect.y.saturating_add(rect.height / 2)
}

fn center(rect: Rect) -> (u16, u16) {
    (
        rect.x.saturating_add(rect.width / 2),
        rect.y.saturating_add(rect.height / 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_point_is_half_open() {
        let rect = Rect::new(2, 2, 4, 4);
        assert!(contains_point(rect, 2, 2));
        assert!(contains_point(rect, 5, 5));
        assert!(!contains_point(rect, 6, 2));
        assert!(!contains_point(rect, 2, 6));
        assert!(!contains_point(rect, 1, 3));
    }

    #[test]
    fn overlap_area_of_disjoint_rects_is_zero() {
        let a = Rect::new(0, 0, 3, 3);
        let b = Rect::new(10, 10, 3, 3);
        assert_eq!(overlap_area(a, b), 0);
    }

    #[test]
    fn overlap_area_of_nested_rects() {
        let outer = Rect::new(0, 0, 10, 10);
        let inner = Rect::new(2, 2, 3, 3);
        assert_eq!(overlap_area(outer, inner), 9);
        assert_eq!(overlap_area(inner, outer), 9);
    }

    #[test]
    fn center_distance_is_symmetric() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(6, 8, 2, 2);
        assert_eq!(center_distance_sq(a, b), center_distance_sq(b, a));
        assert_eq!(center_distance_sq(a, a), 0);
    }

    #[test]
    fn zero_size_rect_contains_nothing() {
        let rect = Rect::new(3, 3, 0, 0);
        assert!(!contains_point(rect, 3, 3));
    }
}
