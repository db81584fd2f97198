// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event routing.
//!
//! ## Overview
//!
//! Every host pointer event goes through [`Window::dispatch_pointer`]:
//!
//! 1. Events arriving before the first paint are dropped.
//! 2. **Captured**: the capture owner receives the event directly, with the capture
//!    transform pushed. No hit testing, no enter/leave.
//! 3. **Normal**: the previous target gets `pre_mouse_leave`/`mouse_leave` if the pointer
//!    left it. If the root contains the pointer it gets `pre_mouse_enter`/`mouse_enter`
//!    when it was not already the previous target, then `pre_<kind>`/`<kind>`.
//! 4. **Focus**, for kinds that request it: a button press or wheel motion pulls host
//!    keyboard focus to the window, and a focus-accepting root becomes the focus owner if
//!    nobody owns focus yet.
//!
//! The `handled` flag is reset between the `Pre` and `Main` halves of each delivery.
//!
//! Overlay-first routing is not implemented: the overlay is drawn but never hit-tested, so
//! the previous target is only ever the root.
//!
//! Components may capture or release the pointer, or change focus, from inside a dispatch.
//! Each step re-reads window state instead of caching it across a dispatch.

use kurbo::Point;

use crate::cx::EventCx;
use crate::event::{EventKind, EventTag, PointerEvent};
use crate::host::HostSurface;
use crate::window::{Layer, Window};

impl<K, H> Window<K, H>
where
    K: Copy + Eq + core::fmt::Debug + 'static,
    H: HostSurface<K>,
{
    /// Route a native pointer event of `kind`.
    pub fn dispatch_pointer(&mut self, kind: EventKind, native: &H::NativeEvent) {
        if self.size.is_none() {
            return;
        }
        let mut event = PointerEvent::new(self.host.translate_event(native));
        self.modifiers = event.modifiers();

        if let Some(owner) = self.interaction.capture.owner() {
            self.route_captured(owner, kind, &mut event);
        } else {
            self.route_normal(kind, &mut event);
        }

        if kind.sets_focus() {
            self.assign_focus(&event);
        }
    }

    fn route_captured(&mut self, owner: K, kind: EventKind, event: &mut PointerEvent) {
        let layers = &self.layers;
        let transform = self
            .interaction
            .capture
            .resolve_transform(|k| layers.find(k).map(|c| c.event_transform()));
        if let Some(t) = transform {
            event.push_transform(t);
        }

        let Some(target) = self.layers.find_mut(owner) else {
            tracing::debug!(?owner, %kind, "capture owner not in tree; event dropped");
            return;
        };
        let mut cx = EventCx::new(&mut self.interaction, &mut self.host);
        target.dispatch(event, EventTag::main(kind), &mut cx);
        self.pointer_owner = Some(owner);
    }

    fn route_normal(&mut self, kind: EventKind, event: &mut PointerEvent) {
        // Overlay-first routing would go here; the overlay is not hit-tested yet.

        let pos = event.position();
        if let Some(prev) = self.prev_target
            && !self.layer_contains(prev, pos)
        {
            self.deliver(prev, EventKind::MouseLeave, event);
            self.prev_target = None;
        }

        if self.layers.root.contains(pos) {
            if self.prev_target != Some(Layer::Root) {
                self.prev_target = Some(Layer::Root);
                self.deliver(Layer::Root, EventKind::MouseEnter, event);
            }
            self.deliver(Layer::Root, kind, event);
        }
    }

    fn layer_contains(&mut self, layer: Layer, pos: Point) -> bool {
        self.layers
            .layer_mut(layer)
            .is_some_and(|c| c.contains(pos))
    }

    /// `Pre` then `Main` dispatch of `kind` to `layer`, clearing `handled` in between.
    fn deliver(&mut self, layer: Layer, kind: EventKind, event: &mut PointerEvent) {
        let Some(target) = self.layers.layer_mut(layer) else {
            return;
        };
        let mut cx = EventCx::new(&mut self.interaction, &mut self.host);
        target.dispatch(event, EventTag::pre(kind), &mut cx);
        event.handled = false;
        target.dispatch(event, EventTag::main(kind), &mut cx);
    }

    fn assign_focus(&mut self, event: &PointerEvent) {
        if event.is_focus_gesture() {
            self.host.request_focus();
        }
        let root = &self.layers.root;
        if root.accepts_focus() && self.interaction.focus_owner.is_none() {
            let key = root.key();
            tracing::debug!(owner = ?key, "focus owner assigned");
            self.interaction.focus_owner = Some(key);
        }
    }

    /// The pointer entered the native window. Not implemented; does nothing.
    pub fn on_window_enter(&mut self, _native: &H::NativeEvent) {}

    /// The pointer left the native window: the previous target gets a `mouse_leave`.
    pub fn on_window_leave(&mut self, native: &H::NativeEvent) {
        let Some(prev) = self.prev_target.take() else {
            return;
        };
        let mut event = PointerEvent::new(self.host.translate_event(native));
        if let Some(target) = self.layers.layer_mut(prev) {
            let mut cx = EventCx::new(&mut self.interaction, &mut self.host);
            target.dispatch(&mut event, EventTag::main(EventKind::MouseLeave), &mut cx);
        }
    }

    /// Primary button pressed.
    pub fn left_down(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::LeftDown, native);
    }

    /// Primary button released.
    pub fn left_up(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::LeftUp, native);
    }

    /// Primary button double click.
    pub fn left_dclick(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::LeftDclick, native);
    }

    /// Secondary button pressed.
    pub fn right_down(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::RightDown, native);
    }

    /// Secondary button released.
    pub fn right_up(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::RightUp, native);
    }

    /// Secondary button double click.
    pub fn right_dclick(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::RightDclick, native);
    }

    /// Tertiary button pressed.
    pub fn middle_down(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::MiddleDown, native);
    }

    /// Tertiary button released.
    pub fn middle_up(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::MiddleUp, native);
    }

    /// Tertiary button double click.
    pub fn middle_dclick(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::MiddleDclick, native);
    }

    /// Pointer moved.
    pub fn mouse_move(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::MouseMove, native);
    }

    /// Wheel scrolled.
    pub fn mouse_wheel(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::MouseWheel, native);
    }

    /// The host reports the pointer entering the window area.
    pub fn mouse_enter(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::MouseEnter, native);
    }

    /// The host reports the pointer leaving the window area.
    pub fn mouse_leave(&mut self, native: &H::NativeEvent) {
        self.dispatch_pointer(EventKind::MouseLeave, native);
    }
}
