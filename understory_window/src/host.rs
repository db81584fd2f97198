// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host toolkit collaborator traits.
//!
//! A concrete binding (winit, a web canvas, a test double) implements [`HostSurface`].
//! Every operation the window relies on is a required method, so a binding that leaves one
//! out does not compile.
//!
//! [`PointerHost`] is the object-safe subset that components may reach during dispatch
//! through [`EventCx`](crate::EventCx).

use core::time::Duration;

use cursor_icon::CursorIcon;
use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::error::SurfaceError;
use crate::event::RawPointerEvent;

/// Pixel layout of a backing context.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// 24-bit BGR.
    #[default]
    Bgr24,
    /// 32-bit BGRA.
    Bgra32,
    /// 32-bit RGBA.
    Rgba32,
}

/// Integer size of a host surface in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// As a floating point size.
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Rectangle at the origin covering the surface.
    pub fn to_rect(self) -> Rect {
        self.to_size().to_rect()
    }
}

/// Drawing target handed to components during paint.
///
/// Only the operations the paint cycle itself needs are modeled; components downcast or
/// wrap the concrete context for anything richer.
pub trait GraphicsContext {
    /// Fill the whole context with `color`.
    fn clear(&mut self, color: Color);

    /// Restrict subsequent drawing to `rect`.
    fn clip_to_rect(&mut self, rect: Rect);
}

/// Host services reachable while an event is being dispatched.
pub trait PointerHost<K> {
    /// Route all future pointer events to this window.
    fn capture_pointer(&mut self);

    /// Undo [`Self::capture_pointer`].
    fn release_pointer(&mut self);

    /// Give the window keyboard focus.
    fn request_focus(&mut self);

    /// Change the displayed cursor.
    fn set_cursor(&mut self, cursor: CursorIcon);

    /// Arm a repeating timer for `component`, or cancel it with `None`.
    fn set_timer_interval(&mut self, component: K, interval: Option<Duration>);

    /// Ask the host to schedule a paint, of `region` or of everything.
    fn request_redraw(&mut self, region: Option<Rect>);
}

/// A native surface the window draws into and receives events from.
pub trait HostSurface<K>: PointerHost<K> {
    /// The toolkit's native input event.
    type NativeEvent;
    /// The backing graphics context.
    type Context: GraphicsContext;

    /// Current size of the native control.
    fn control_size(&self) -> SurfaceSize;

    /// Allocate a backing context.
    fn create_context(
        &mut self,
        size: SurfaceSize,
        format: PixelFormat,
    ) -> Result<Self::Context, SurfaceError>;

    /// Blit the backing context to the screen.
    fn present(&mut self, context: &mut Self::Context) -> Result<(), SurfaceError>;

    /// Extract pointer state from a native event.
    fn translate_event(&self, event: &Self::NativeEvent) -> RawPointerEvent;

    /// Map global screen coordinates to window-local ones.
    fn screen_to_window(&self, point: Point) -> Point;
}
