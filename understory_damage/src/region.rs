// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region algebra over axis-aligned rectangles.
//!
//! Rectangles come in two interchangeable forms:
//!
//! - **coordinates**: `(x0, y0, x1, y1)`, represented by [`kurbo::Rect`].
//! - **bounds**: `(x, y, width, height)`, represented by [`Bounds`].
//!
//! All helpers here are pure. Absent regions (`None`) stand for "the whole surface" and
//! never cause a panic; empty inputs produce the empty rectangle ([`EMPTY`]).
//!
//! Overlap is strict: rectangles that only share an edge do not intersect.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};

/// The empty rectangle, returned by unions over nothing and by disjoint intersections.
pub const EMPTY: Rect = Rect::ZERO;

/// A rectangle in `(x, y, width, height)` form.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Bounds {
    /// Create bounds from an origin and extents.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create bounds at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Convert to coordinate form.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl From<Bounds> for Rect {
    fn from(b: Bounds) -> Self {
        b.to_rect()
    }
}

impl From<Rect> for Bounds {
    fn from(r: Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

/// Whether two rectangles share a region of non-zero area.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Whether `outer` fully covers `inner`.
pub fn covers(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// The overlap of two rectangles, or [`EMPTY`] when they do not overlap.
pub fn intersect(a: Rect, b: Rect) -> Rect {
    if overlaps(a, b) { a.intersect(b) } else { EMPTY }
}

/// Intersect against a region that may be absent.
///
/// An absent region is the whole surface, so the result is `rect` unchanged.
pub fn intersect_region(region: Option<Rect>, rect: Rect) -> Rect {
    match region {
        Some(r) => intersect(r, rect),
        None => rect,
    }
}

/// Smallest rectangle enclosing both inputs.
pub fn union(a: Rect, b: Rect) -> Rect {
    a.union(b)
}

/// Left fold of [`union`] over `rects`.
///
/// Returns [`EMPTY`] when `rects` is empty.
pub fn union_all(rects: impl IntoIterator<Item = Rect>) -> Rect {
    let mut it = rects.into_iter();
    let Some(first) = it.next() else {
        return EMPTY;
    };
    it.fold(first, union)
}

/// Merge `rect` into `set`, keeping `set` pairwise non-overlapping.
///
/// Entries that overlap or are covered by the incoming rectangle are absorbed into it,
/// repeating until nothing else overlaps the grown rectangle. Rectangles with zero area
/// are ignored.
///
/// ```
/// use kurbo::Rect;
/// use understory_damage::region::disjoint_union;
///
/// let mut set = vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(30.0, 0.0, 40.0, 10.0)];
/// disjoint_union(&mut set, Rect::new(5.0, 5.0, 15.0, 15.0));
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&Rect::new(0.0, 0.0, 15.0, 15.0)));
/// ```
pub fn disjoint_union(set: &mut Vec<Rect>, rect: Rect) {
    if rect.is_zero_area() {
        return;
    }
    let mut merged = rect.abs();
    loop {
        let before = set.len();
        set.retain(|r| {
            if overlaps(*r, merged) || covers(merged, *r) {
                merged = merged.union(*r);
                false
            } else {
                true
            }
        });
        if set.len() == before {
            break;
        }
    }
    set.push(merged);
}

/// Whether `query` overlaps any rectangle in `set`.
///
/// An absent set is the whole surface and always intersects; an empty set never does.
pub fn intersects_any(set: Option<&[Rect]>, query: Rect) -> bool {
    match set {
        None => true,
        Some(rects) => rects.iter().any(|r| overlaps(*r, query)),
    }
}

/// Axis-aligned bounding box of a point list, or `None` if there are no points.
pub fn bounding_box(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut it = points.into_iter();
    let first = it.next()?;
    Some(it.fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p)))
}

/// Point-in-rectangle test; the far edges are exclusive.
pub fn contains_point(rect: Rect, point: Point) -> bool {
    rect.contains(point)
}
