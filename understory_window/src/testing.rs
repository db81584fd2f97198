// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host and components shared by the unit tests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;

use cursor_icon::CursorIcon;
use kurbo::{Affine, Point, Rect};
use peniko::Color;

use crate::component::{self, Component};
use crate::cx::EventCx;
use crate::error::SurfaceError;
use crate::event::{EventTag, PointerEvent, RawPointerEvent};
use crate::host::{GraphicsContext, HostSurface, PixelFormat, PointerHost, SurfaceSize};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum GcOp {
    Clear,
    Clip(Rect),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingContext {
    pub(crate) size: SurfaceSize,
    pub(crate) ops: Vec<GcOp>,
}

impl GraphicsContext for RecordingContext {
    fn clear(&mut self, _color: Color) {
        self.ops.push(GcOp::Clear);
    }

    fn clip_to_rect(&mut self, rect: Rect) {
        self.ops.push(GcOp::Clip(rect));
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) size: SurfaceSize,
    pub(crate) captures: usize,
    pub(crate) releases: usize,
    pub(crate) focus_requests: usize,
    pub(crate) redraws: usize,
    pub(crate) cursors: Vec<CursorIcon>,
    pub(crate) timers: Vec<(u32, Option<Duration>)>,
    pub(crate) contexts_created: usize,
    pub(crate) presents: usize,
    pub(crate) fail_context: bool,
}

impl RecordingHost {
    pub(crate) fn sized(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            ..Self::default()
        }
    }
}

impl PointerHost<u32> for RecordingHost {
    fn capture_pointer(&mut self) {
        self.captures += 1;
    }

    fn release_pointer(&mut self) {
        self.releases += 1;
    }

    fn request_focus(&mut self) {
        self.focus_requests += 1;
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursors.push(cursor);
    }

    fn set_timer_interval(&mut self, component: u32, interval: Option<Duration>) {
        self.timers.push((component, interval));
    }

    fn request_redraw(&mut self, _region: Option<Rect>) {
        self.redraws += 1;
    }
}

impl HostSurface<u32> for RecordingHost {
    type NativeEvent = RawPointerEvent;
    type Context = RecordingContext;

    fn control_size(&self) -> SurfaceSize {
        self.size
    }

    fn create_context(
        &mut self,
        size: SurfaceSize,
        format: PixelFormat,
    ) -> Result<Self::Context, SurfaceError> {
        if self.fail_context {
            return Err(SurfaceError::ContextCreation {
                width: size.width,
                height: size.height,
                format,
            });
        }
        self.contexts_created += 1;
        Ok(RecordingContext {
            size,
            ops: Vec::new(),
        })
    }

    fn present(&mut self, _context: &mut Self::Context) -> Result<(), SurfaceError> {
        self.presents += 1;
        Ok(())
    }

    fn translate_event(&self, event: &Self::NativeEvent) -> RawPointerEvent {
        *event
    }

    fn screen_to_window(&self, point: Point) -> Point {
        point - kurbo::Vec2::new(100.0, 100.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ProbeLog {
    /// `(component, tag, position seen)` in delivery order.
    pub(crate) events: Vec<(u32, EventTag, Point)>,
    pub(crate) draws: Vec<(u32, Rect)>,
    pub(crate) layouts: usize,
}

impl ProbeLog {
    pub(crate) fn tags(&self) -> Vec<String> {
        use alloc::string::ToString;
        self.events.iter().map(|(_, t, _)| t.to_string()).collect()
    }
}

type Hook = Box<dyn FnMut(&mut PointerEvent, EventTag, &mut EventCx<'_, u32>)>;

/// A rectangular component that records everything it receives.
pub(crate) struct Probe {
    pub(crate) key: u32,
    pub(crate) bounds: Rect,
    pub(crate) focusable: bool,
    pub(crate) transform: Affine,
    pub(crate) children: Vec<Probe>,
    pub(crate) hook: Option<Hook>,
    pub(crate) log: Rc<RefCell<ProbeLog>>,
}

impl Probe {
    pub(crate) fn new(key: u32, bounds: Rect) -> (Self, Rc<RefCell<ProbeLog>>) {
        let log = Rc::new(RefCell::new(ProbeLog::default()));
        (Self::with_log(key, bounds, log.clone()), log)
    }

    pub(crate) fn with_log(key: u32, bounds: Rect, log: Rc<RefCell<ProbeLog>>) -> Self {
        Self {
            key,
            bounds,
            focusable: false,
            transform: Affine::IDENTITY,
            children: Vec::new(),
            hook: None,
            log,
        }
    }

    pub(crate) fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub(crate) fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub(crate) fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Run `hook` after recording each dispatch.
    pub(crate) fn on_dispatch(
        mut self,
        hook: impl FnMut(&mut PointerEvent, EventTag, &mut EventCx<'_, u32>) + 'static,
    ) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl Component<u32> for Probe {
    fn key(&self) -> u32 {
        self.key
    }

    fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    fn dispatch(&mut self, event: &mut PointerEvent, tag: EventTag, cx: &mut EventCx<'_, u32>) {
        self.log
            .borrow_mut()
            .events
            .push((self.key, tag, event.position()));
        if let Some(hook) = &mut self.hook {
            hook(event, tag, cx);
        }
    }

    fn accepts_focus(&self) -> bool {
        self.focusable
    }

    fn event_transform(&self) -> Affine {
        self.transform
    }

    fn do_layout(&mut self) {
        self.log.borrow_mut().layouts += 1;
    }

    fn draw(&mut self, _gc: &mut dyn GraphicsContext, view_bounds: Rect) {
        self.log.borrow_mut().draws.push((self.key, view_bounds));
    }

    fn descendant(&self, key: u32) -> Option<&dyn Component<u32>> {
        self.children.iter().find_map(|c| component::find(c, key))
    }

    fn descendant_mut(&mut self, key: u32) -> Option<&mut dyn Component<u32>> {
        self.children
            .iter_mut()
            .find_map(|c| component::find_mut(c, key))
    }
}
