// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed pointer events and the tags they are dispatched under.
//!
//! A host binding turns each native input event into a [`RawPointerEvent`]. The window wraps
//! it in a [`PointerEvent`], which adds the `handled` flag and a transform stack used to map
//! window coordinates into a component's local space.
//!
//! Components receive every event together with an [`EventTag`]: the [`EventKind`] plus a
//! [`Stage`]. Each delivery is a `Pre` dispatch followed by a `Main` dispatch, with
//! `handled` reset in between.

use core::fmt;

use kurbo::{Affine, Point};
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Mouse buttons held down when the event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// Primary button.
        const LEFT   = 0b0000_0001;
        /// Secondary button.
        const RIGHT  = 0b0000_0010;
        /// Tertiary button.
        const MIDDLE = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held when the event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt/Option key.
        const ALT     = 0b0000_0100;
    }
}

/// The pointer event kinds a window routes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary button pressed.
    LeftDown,
    /// Primary button released.
    LeftUp,
    /// Primary button double click.
    LeftDclick,
    /// Secondary button pressed.
    RightDown,
    /// Secondary button released.
    RightUp,
    /// Secondary button double click.
    RightDclick,
    /// Tertiary button pressed.
    MiddleDown,
    /// Tertiary button released.
    MiddleUp,
    /// Tertiary button double click.
    MiddleDclick,
    /// Pointer moved.
    MouseMove,
    /// Wheel scrolled.
    MouseWheel,
    /// Pointer entered a component.
    MouseEnter,
    /// Pointer left a component.
    MouseLeave,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::LeftDown,
        Self::LeftUp,
        Self::LeftDclick,
        Self::RightDown,
        Self::RightUp,
        Self::RightDclick,
        Self::MiddleDown,
        Self::MiddleUp,
        Self::MiddleDclick,
        Self::MouseMove,
        Self::MouseWheel,
        Self::MouseEnter,
        Self::MouseLeave,
    ];

    /// Snake-case name, e.g. `left_down`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftDown => "left_down",
            Self::LeftUp => "left_up",
            Self::LeftDclick => "left_dclick",
            Self::RightDown => "right_down",
            Self::RightUp => "right_up",
            Self::RightDclick => "right_dclick",
            Self::MiddleDown => "middle_down",
            Self::MiddleUp => "middle_up",
            Self::MiddleDclick => "middle_dclick",
            Self::MouseMove => "mouse_move",
            Self::MouseWheel => "mouse_wheel",
            Self::MouseEnter => "mouse_enter",
            Self::MouseLeave => "mouse_leave",
        }
    }

    /// Whether routing this kind runs focus assignment afterwards.
    ///
    /// Button presses and wheel events do; moves, releases, double clicks, enter and leave
    /// do not.
    pub const fn sets_focus(self) -> bool {
        matches!(
            self,
            Self::LeftDown | Self::RightDown | Self::MiddleDown | Self::MouseWheel
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of a delivery a dispatch belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Preview dispatch, delivered first.
    Pre,
    /// The event proper.
    Main,
}

/// The tag a component receives with each dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventTag {
    /// Preview or main dispatch.
    pub stage: Stage,
    /// The event kind.
    pub kind: EventKind,
}

impl EventTag {
    /// Preview tag for `kind`.
    pub const fn pre(kind: EventKind) -> Self {
        Self {
            stage: Stage::Pre,
            kind,
        }
    }

    /// Main tag for `kind`.
    pub const fn main(kind: EventKind) -> Self {
        Self {
            stage: Stage::Main,
            kind,
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Stage::Pre => write!(f, "pre_{}", self.kind),
            Stage::Main => write!(f, "{}", self.kind),
        }
    }
}

/// Pointer state as reported by the host, in window coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RawPointerEvent {
    /// Window-local position.
    pub position: Point,
    /// Buttons currently down.
    pub buttons: Buttons,
    /// Modifiers currently held.
    pub modifiers: Modifiers,
    /// Wheel delta, zero for non-wheel events.
    pub wheel_delta: f64,
}

impl RawPointerEvent {
    /// Event at `position` with no buttons, modifiers or wheel motion.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Set the buttons held.
    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Set the modifiers held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the wheel delta.
    pub fn with_wheel_delta(mut self, delta: f64) -> Self {
        self.wheel_delta = delta;
        self
    }
}

/// A pointer event being routed through a window.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    raw: RawPointerEvent,
    transforms: SmallVec<[Affine; 2]>,
    /// Set by a component that consumed the event.
    pub handled: bool,
}

impl PointerEvent {
    /// Wrap a raw event with an empty transform stack.
    pub fn new(raw: RawPointerEvent) -> Self {
        Self {
            raw,
            transforms: SmallVec::new(),
            handled: false,
        }
    }

    /// Position in the current coordinate space (window position mapped through the stack).
    pub fn position(&self) -> Point {
        self.net_transform() * self.raw.position
    }

    /// Horizontal component of [`Self::position`].
    pub fn x(&self) -> f64 {
        self.position().x
    }

    /// Vertical component of [`Self::position`].
    pub fn y(&self) -> f64 {
        self.position().y
    }

    /// Position in window coordinates, ignoring the transform stack.
    pub fn window_position(&self) -> Point {
        self.raw.position
    }

    /// Push a transform that maps the current space into a nested one.
    pub fn push_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    /// Pop the most recently pushed transform.
    pub fn pop_transform(&mut self) -> Option<Affine> {
        self.transforms.pop()
    }

    /// The composition of the stack; the first pushed transform applies first.
    pub fn net_transform(&self) -> Affine {
        self.transforms
            .iter()
            .fold(Affine::IDENTITY, |acc, t| *t * acc)
    }

    /// Buttons held.
    pub fn buttons(&self) -> Buttons {
        self.raw.buttons
    }

    /// Modifiers held.
    pub fn modifiers(&self) -> Modifiers {
        self.raw.modifiers
    }

    /// Wheel delta.
    pub fn wheel_delta(&self) -> f64 {
        self.raw.wheel_delta
    }

    /// Whether the primary button is down.
    pub fn left_down(&self) -> bool {
        self.raw.buttons.contains(Buttons::LEFT)
    }

    /// Whether the secondary button is down.
    pub fn right_down(&self) -> bool {
        self.raw.buttons.contains(Buttons::RIGHT)
    }

    /// Whether the tertiary button is down.
    pub fn middle_down(&self) -> bool {
        self.raw.buttons.contains(Buttons::MIDDLE)
    }

    /// Whether this event should pull keyboard focus to the window: a button is down or the
    /// wheel moved.
    pub fn is_focus_gesture(&self) -> bool {
        !self.raw.buttons.is_empty() || self.raw.wheel_delta != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use kurbo::Vec2;

    #[test]
    fn tags_render_like_handler_names() {
        assert_eq!(EventTag::main(EventKind::LeftDown).to_string(), "left_down");
        assert_eq!(
            EventTag::pre(EventKind::MouseEnter).to_string(),
            "pre_mouse_enter"
        );
    }

    #[test]
    fn focus_policy_per_kind() {
        let focusing: alloc::vec::Vec<_> = EventKind::ALL
            .iter()
            .filter(|k| k.sets_focus())
            .map(|k| k.name())
            .collect();
        assert_eq!(
            focusing,
            ["left_down", "right_down", "middle_down", "mouse_wheel"]
        );
    }

    #[test]
    fn transform_stack_applies_first_pushed_first() {
        let mut ev = PointerEvent::new(RawPointerEvent::at(Point::new(1.0, 1.0)));
        ev.push_transform(Affine::translate(Vec2::new(10.0, 0.0)));
        ev.push_transform(Affine::scale(2.0));
        assert_eq!(ev.position(), Point::new(22.0, 2.0));
        assert_eq!(ev.window_position(), Point::new(1.0, 1.0));
        ev.pop_transform();
        assert_eq!(ev.position(), Point::new(11.0, 1.0));
    }

    #[test]
    fn focus_gesture_needs_button_or_wheel() {
        let p = Point::new(0.0, 0.0);
        assert!(!PointerEvent::new(RawPointerEvent::at(p)).is_focus_gesture());
        let down = RawPointerEvent::at(p).with_buttons(Buttons::MIDDLE);
        assert!(PointerEvent::new(down).is_focus_gesture());
        let wheel = RawPointerEvent::at(p).with_wheel_delta(-1.0);
        assert!(PointerEvent::new(wheel).is_focus_gesture());
    }
}
