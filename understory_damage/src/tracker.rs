// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage tracker: the stale regions accumulated between paints.

use alloc::vec::Vec;
use kurbo::Rect;

use crate::region;

/// Tracks which parts of a surface must be repainted.
///
/// The state is either "whole dirty" (`regions() == None`) or a list of dirty rectangles.
/// An empty list means the surface is clean.
///
/// The list is kept in invalidation order and is not coalesced; use
/// [`region::disjoint_union`] if a minimal cover is needed.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageTracker {
    regions: Option<Vec<Rect>>,
}

impl Default for DamageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DamageTracker {
    /// Create a tracker in the "whole dirty" state.
    pub const fn new() -> Self {
        Self { regions: None }
    }

    /// Mark `region` as stale, or the whole surface when `region` is `None`.
    ///
    /// No-op while the whole surface is already dirty.
    pub fn invalidate(&mut self, region: Option<Rect>) {
        match region {
            Some(r) => {
                if let Some(list) = &mut self.regions {
                    list.push(r);
                }
            }
            None => self.regions = None,
        }
    }

    /// Mark a batch of regions as stale.
    pub fn invalidate_many(&mut self, regions: impl IntoIterator<Item = Rect>) {
        if let Some(list) = &mut self.regions {
            list.extend(regions);
        }
    }

    /// Whether `query` touches any stale region.
    ///
    /// Always true while the whole surface is dirty.
    pub fn needs_redraw(&self, query: Rect) -> bool {
        region::intersects_any(self.regions.as_deref(), query)
    }

    /// Make the whole surface dirty.
    pub fn reset_whole(&mut self) {
        self.regions = None;
    }

    /// Reset after a paint.
    ///
    /// With damaged-region handling enabled the tracker becomes clean. Otherwise it goes
    /// back to "whole dirty", so the next paint clears the full surface again.
    pub fn clear(&mut self, use_damaged_region: bool) {
        self.regions = if use_damaged_region {
            Some(Vec::new())
        } else {
            None
        };
    }

    /// Prepare for a paint pass.
    ///
    /// A clean list, or any list while damaged-region handling is disabled, is promoted to
    /// "whole dirty" so a paint never silently skips clearing.
    pub fn normalize(&mut self, use_damaged_region: bool) {
        if !use_damaged_region || self.is_clean() {
            self.regions = None;
        }
    }

    /// The stale rectangles, or `None` when the whole surface is dirty.
    pub fn regions(&self) -> Option<&[Rect]> {
        self.regions.as_deref()
    }

    /// Whether the whole surface is dirty.
    pub fn is_whole(&self) -> bool {
        self.regions.is_none()
    }

    /// Whether nothing is dirty.
    pub fn is_clean(&self) -> bool {
        self.regions.as_ref().is_some_and(Vec::is_empty)
    }

    /// Union of all stale rectangles; `None` when the whole surface is dirty.
    ///
    /// A clean tracker yields [`region::EMPTY`].
    pub fn union(&self) -> Option<Rect> {
        self.regions
            .as_deref()
            .map(|rs| region::union_all(rs.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean() -> DamageTracker {
        let mut d = DamageTracker::new();
        d.clear(true);
        d
    }

    #[test]
    fn starts_whole_dirty() {
        let d = DamageTracker::new();
        assert!(d.is_whole());
        assert!(d.needs_redraw(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(d.union(), None);
    }

    #[test]
    fn invalidate_region_then_query() {
        let mut d = clean();
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        d.invalidate(Some(r));
        assert!(d.needs_redraw(r));
        assert!(!d.needs_redraw(Rect::new(30.0, 30.0, 40.0, 40.0)));
        assert_eq!(d.regions(), Some(&[r][..]));
    }

    #[test]
    fn invalidate_everything_dominates() {
        let mut d = clean();
        d.invalidate(Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        d.invalidate(None);
        assert!(d.is_whole());
        assert!(d.needs_redraw(Rect::new(500.0, 500.0, 501.0, 501.0)));
        // Regions are ignored until the next clear.
        d.invalidate(Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        d.invalidate_many([Rect::new(1.0, 1.0, 2.0, 2.0)]);
        assert!(d.is_whole());
    }

    #[test]
    fn clean_tracker_needs_nothing() {
        let d = clean();
        assert!(d.is_clean());
        assert!(!d.needs_redraw(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(d.union(), Some(region::EMPTY));
    }

    #[test]
    fn clear_depends_on_mode() {
        let mut d = clean();
        d.invalidate(Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        d.clear(false);
        assert!(d.is_whole());
        d.clear(true);
        assert!(d.is_clean());
    }

    #[test]
    fn normalize_promotes_clean_and_disabled() {
        let mut d = clean();
        d.normalize(true);
        assert!(d.is_whole(), "empty list is promoted");

        let mut d = clean();
        d.invalidate(Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        d.normalize(true);
        assert!(!d.is_whole());
        d.normalize(false);
        assert!(d.is_whole(), "partial list is promoted when the mode is off");
    }

    #[test]
    fn union_covers_all_regions() {
        let mut d = clean();
        d.invalidate_many([
            Rect::new(0.0, 0.0, 5.0, 5.0),
            Rect::new(20.0, 30.0, 25.0, 35.0),
        ]);
        assert_eq!(d.union(), Some(Rect::new(0.0, 0.0, 25.0, 35.0)));
    }
}
