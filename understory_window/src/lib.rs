// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_window --heading-base-level=0

//! Understory Window: pointer routing, capture, focus and damage-driven repaint for a
//! retained-mode window surface.
//!
//! ## Overview
//!
//! A [`Window`] sits between a native host surface and a tree of components. It owns:
//!
//! - a root [`Component`] and an optional overlay drawn on top of it,
//! - a [`CaptureManager`] that can redirect every pointer event to one component,
//! - the keyboard focus owner,
//! - a [`DamageTracker`](understory_damage::DamageTracker) of stale regions,
//! - the backing graphics context, recreated when the host control is resized.
//!
//! The host side is abstracted by [`HostSurface`]; the window never talks to a toolkit
//! directly. Components address each other by a small copyable key `K` and reach window
//! services during dispatch through an [`EventCx`].
//!
//! ## Routing
//!
//! Each pointer entry point ([`Window::left_down`], [`Window::mouse_move`], ...) runs the
//! same steps:
//!
//! 1) **Capture**: if a capture owner is set, it receives the event directly, mapped into
//!    its space by either the stored capture transform or the recomposed transforms of the
//!    dispatch history. Hit testing and enter/leave are skipped.
//! 2) **Leave**: if the pointer moved off the previous target, it gets `pre_mouse_leave`
//!    then `mouse_leave`.
//! 3) **Enter**: if the root contains the pointer and was not the previous target, it gets
//!    `pre_mouse_enter` then `mouse_enter`.
//! 4) **Deliver**: the root gets `pre_<kind>` then `<kind>`, with `handled` reset between.
//! 5) **Focus**: presses and wheel motion pull host focus and give keyboard focus to a
//!    focus-accepting root when nobody holds it.
//!
//! Events arriving before the first [`Window::paint`] are dropped.
//!
//! ## Painting
//!
//! [`Window::paint`] lays out the root, then either clears the full surface to the
//! background or, with damaged-region repainting enabled, clips to the union of the stale
//! rectangles. It draws the root and then the overlay, presents, and resets damage.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use peniko::Color;
//! use understory_window::{
//!     Component, EventCx, EventKind, EventTag, GraphicsContext, HostSurface, PixelFormat,
//!     PointerEvent, PointerHost, RawPointerEvent, SurfaceError, SurfaceSize, Window,
//!     WindowConfig,
//! };
//!
//! # struct Host;
//! # struct Canvas;
//! # impl GraphicsContext for Canvas {
//! #     fn clear(&mut self, _: Color) {}
//! #     fn clip_to_rect(&mut self, _: Rect) {}
//! # }
//! # impl PointerHost<u32> for Host {
//! #     fn capture_pointer(&mut self) {}
//! #     fn release_pointer(&mut self) {}
//! #     fn request_focus(&mut self) {}
//! #     fn set_cursor(&mut self, _: cursor_icon::CursorIcon) {}
//! #     fn set_timer_interval(&mut self, _: u32, _: Option<core::time::Duration>) {}
//! #     fn request_redraw(&mut self, _: Option<Rect>) {}
//! # }
//! # impl HostSurface<u32> for Host {
//! #     type NativeEvent = RawPointerEvent;
//! #     type Context = Canvas;
//! #     fn control_size(&self) -> SurfaceSize { SurfaceSize::new(100, 100) }
//! #     fn create_context(&mut self, _: SurfaceSize, _: PixelFormat) -> Result<Canvas, SurfaceError> { Ok(Canvas) }
//! #     fn present(&mut self, _: &mut Canvas) -> Result<(), SurfaceError> { Ok(()) }
//! #     fn translate_event(&self, e: &RawPointerEvent) -> RawPointerEvent { *e }
//! #     fn screen_to_window(&self, p: Point) -> Point { p }
//! # }
//! struct Button {
//!     presses: u32,
//! }
//!
//! impl Component<u32> for Button {
//!     fn key(&self) -> u32 {
//!         1
//!     }
//!     fn contains(&self, p: Point) -> bool {
//!         Rect::new(0.0, 0.0, 50.0, 20.0).contains(p)
//!     }
//!     fn dispatch(&mut self, _: &mut PointerEvent, tag: EventTag, cx: &mut EventCx<'_, u32>) {
//!         if tag == EventTag::main(EventKind::LeftDown) {
//!             self.presses += 1;
//!             cx.invalidate(None);
//!         }
//!     }
//!     fn draw(&mut self, _: &mut dyn GraphicsContext, _: Rect) {}
//! }
//!
//! let config = WindowConfig::new().with_damaged_region(true);
//! let mut window = Window::with_root(Host, Box::new(Button { presses: 0 }), config);
//! window.paint().unwrap();
//! assert!(window.damage().is_clean());
//!
//! window.left_down(&RawPointerEvent::at(Point::new(10.0, 10.0)));
//! assert!(window.damage().is_whole());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to the dependencies.
//! - `libm`: `no_std` float math through `libm`.
//! - `serde`: serialize [`WindowSnapshot`] and [`PixelFormat`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod capture;
pub mod component;
pub mod config;
mod cx;
pub mod error;
pub mod event;
pub mod host;
mod router;
mod surface;
mod window;

#[cfg(test)]
mod testing;

pub use capture::{Capture, CaptureManager, compose_history};
pub use component::{Component, EmptyContainer, FitMode};
pub use config::{DEFAULT_BACKGROUND, WindowConfig};
pub use cx::EventCx;
pub use error::SurfaceError;
pub use event::{
    Buttons, EventKind, EventTag, Modifiers, PointerEvent, RawPointerEvent, Stage,
};
pub use host::{GraphicsContext, HostSurface, PixelFormat, PointerHost, SurfaceSize};
pub use understory_damage::DamageTracker;
pub use window::{Layer, Window, WindowSnapshot};
