// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The component collaborator: what the window needs from the drawable, hit-testable tree.
//!
//! The window never walks the tree itself. It hit-tests the root, dispatches to the root
//! (or the capture owner), and resolves other nodes by key through
//! [`Component::descendant`] / [`Component::descendant_mut`].

use core::fmt;

use kurbo::{Affine, Point, Rect};

use crate::cx::EventCx;
use crate::event::{EventTag, PointerEvent};
use crate::host::GraphicsContext;

bitflags::bitflags! {
    /// How a root component follows the size of the host control.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FitMode: u8 {
        /// Take the whole control, anchored at the origin.
        const FIT_WINDOW = 0b0000_0001;
        /// Stretch horizontally from x = 0.
        const HORIZONTAL = 0b0000_0010;
        /// Stretch vertically from y = 0.
        const VERTICAL   = 0b0000_0100;
    }
}

/// A node of the component tree as seen by the window.
///
/// `K` is a small copyable handle identifying components, used for capture, focus and timer
/// bookkeeping.
pub trait Component<K> {
    /// This component's key.
    fn key(&self) -> K;

    /// Whether `point` (in window coordinates) lies in this component's interactive bounds.
    fn contains(&self, point: Point) -> bool;

    /// Deliver an event.
    fn dispatch(&mut self, event: &mut PointerEvent, tag: EventTag, cx: &mut EventCx<'_, K>);

    /// Whether this component takes keyboard focus.
    fn accepts_focus(&self) -> bool {
        false
    }

    /// The transform this component applies to event positions on their way to its children.
    fn event_transform(&self) -> Affine {
        Affine::IDENTITY
    }

    /// Lay out children before a paint.
    fn do_layout(&mut self) {}

    /// Draw into `gc`; `view_bounds` is the visible part of the surface.
    fn draw(&mut self, gc: &mut dyn GraphicsContext, view_bounds: Rect);

    /// Find a strict descendant by key.
    fn descendant(&self, _key: K) -> Option<&dyn Component<K>> {
        None
    }

    /// Find a strict descendant by key, mutably.
    fn descendant_mut(&mut self, _key: K) -> Option<&mut dyn Component<K>> {
        None
    }

    /// How this component tracks the host control size when installed as the root.
    fn fit_mode(&self) -> FitMode {
        FitMode::empty()
    }

    /// Outer bounds, in window coordinates.
    fn outer_bounds(&self) -> Rect {
        Rect::ZERO
    }

    /// Replace the outer bounds. Only called when [`Self::fit_mode`] is non-empty.
    fn set_outer_bounds(&mut self, _bounds: Rect) {}
}

/// Find `key` in the subtree rooted at `component`, including `component` itself.
pub fn find<K: Copy + Eq>(component: &dyn Component<K>, key: K) -> Option<&dyn Component<K>> {
    if component.key() == key {
        Some(component)
    } else {
        component.descendant(key)
    }
}

/// Mutable variant of [`find`].
pub fn find_mut<K: Copy + Eq>(
    component: &mut dyn Component<K>,
    key: K,
) -> Option<&mut dyn Component<K>> {
    if component.key() == key {
        Some(component)
    } else {
        component.descendant_mut(key)
    }
}

/// An empty container that fills the window; the default root.
pub struct EmptyContainer<K> {
    key: K,
    bounds: Rect,
}

impl<K: fmt::Debug> fmt::Debug for EmptyContainer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmptyContainer")
            .field("key", &self.key)
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl<K> EmptyContainer<K> {
    /// Create an empty container; it takes its size from the window once installed.
    pub fn new(key: K) -> Self {
        Self {
            key,
            bounds: Rect::ZERO,
        }
    }
}

impl<K: Copy> Component<K> for EmptyContainer<K> {
    fn key(&self) -> K {
        self.key
    }

    fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    fn dispatch(&mut self, _event: &mut PointerEvent, _tag: EventTag, _cx: &mut EventCx<'_, K>) {}

    fn draw(&mut self, _gc: &mut dyn GraphicsContext, _view_bounds: Rect) {}

    fn fit_mode(&self) -> FitMode {
        FitMode::FIT_WINDOW
    }

    fn outer_bounds(&self) -> Rect {
        self.bounds
    }

    fn set_outer_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}
