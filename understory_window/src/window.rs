// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window: root context owning the component layers, interaction state and host.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Rect};
use peniko::Color;
use understory_damage::DamageTracker;

use crate::component::{self, Component, EmptyContainer, FitMode};
use crate::config::WindowConfig;
use crate::cx::Interaction;
use crate::event::Modifiers;
use crate::host::{HostSurface, SurfaceSize};

/// The two top-level layers a window routes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The root component.
    Root,
    /// The overlay, drawn last.
    Overlay,
}

pub(crate) struct Layers<K> {
    pub(crate) root: Box<dyn Component<K>>,
    pub(crate) overlay: Option<Box<dyn Component<K>>>,
}

impl<K: Copy + Eq> Layers<K> {
    pub(crate) fn layer_mut(&mut self, layer: Layer) -> Option<&mut dyn Component<K>> {
        match layer {
            Layer::Root => Some(self.root.as_mut()),
            Layer::Overlay => self.overlay.as_deref_mut().map(|o| o as &mut dyn Component<K>),
        }
    }

    pub(crate) fn find(&self, key: K) -> Option<&dyn Component<K>> {
        if let Some(c) = component::find(self.root.as_ref(), key) {
            return Some(c);
        }
        self.overlay
            .as_deref()
            .and_then(|o| component::find(o, key))
    }

    pub(crate) fn find_mut(&mut self, key: K) -> Option<&mut dyn Component<K>> {
        if let Some(c) = component::find_mut(self.root.as_mut(), key) {
            return Some(c);
        }
        self.overlay
            .as_deref_mut()
            .and_then(|o| component::find_mut(o, key))
    }
}

/// Serializable subset of a window: root, background, overlay and scroll origin.
///
/// Components are opaque to the window, so the caller maps them to `S`; see
/// [`Window::snapshot`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSnapshot<S> {
    /// The root component.
    pub root: S,
    /// Background color.
    pub background: Color,
    /// The overlay component, if any.
    pub overlay: Option<S>,
    /// Scroll origin.
    pub scroll_origin: Point,
}

/// A top-level window hosting a component tree.
///
/// ## Usage
///
/// - Construct with [`Window::new`] (empty root) or [`Window::with_root`].
/// - Forward host input to the pointer entry points ([`Window::left_down`],
///   [`Window::mouse_move`], ...). Events are ignored until the first [`Window::paint`]
///   establishes a surface size.
/// - Call [`Window::paint`] whenever the host asks for a repaint.
/// - Components mark damage with [`EventCx::invalidate`](crate::EventCx::invalidate) or callers
///   use [`Window::invalidate`].
pub struct Window<K, H: HostSurface<K>> {
    pub(crate) layers: Layers<K>,
    pub(crate) interaction: Interaction<K>,
    pub(crate) host: H,
    pub(crate) config: WindowConfig,
    /// Layer that received the last routed event, for enter/leave synthesis.
    pub(crate) prev_target: Option<Layer>,
    /// Last owner a captured event was delivered to.
    pub(crate) pointer_owner: Option<K>,
    pub(crate) modifiers: Modifiers,
    pub(crate) scroll_origin: Point,
    /// Size of the backing context; `None` until the first paint.
    pub(crate) size: Option<SurfaceSize>,
    pub(crate) context: Option<H::Context>,
}

impl<K: fmt::Debug, H: HostSurface<K>> fmt::Debug for Window<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("interaction", &self.interaction)
            .field("config", &self.config)
            .field("prev_target", &self.prev_target)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<K, H> Window<K, H>
where
    K: Copy + Eq + Default + fmt::Debug + 'static,
    H: HostSurface<K>,
{
    /// Create a window whose root is an [`EmptyContainer`] keyed `K::default()`.
    pub fn new(host: H, config: WindowConfig) -> Self {
        Self::with_root(host, Box::new(EmptyContainer::new(K::default())), config)
    }
}

impl<K, H> Window<K, H>
where
    K: Copy + Eq + fmt::Debug + 'static,
    H: HostSurface<K>,
{
    /// Create a window hosting `root`.
    pub fn with_root(host: H, root: Box<dyn Component<K>>, config: WindowConfig) -> Self {
        let mut window = Self {
            layers: Layers {
                root,
                overlay: None,
            },
            interaction: Interaction::default(),
            host,
            config,
            prev_target: None,
            pointer_owner: None,
            modifiers: Modifiers::empty(),
            scroll_origin: Point::ORIGIN,
            size: None,
            context: None,
        };
        window.root_changed();
        window
    }

    /// Replace the root component.
    ///
    /// `None` installs an [`EmptyContainer`] with the old root's key. The new root is fitted
    /// to the control, the whole surface is invalidated and a redraw is requested.
    pub fn set_root(&mut self, root: Option<Box<dyn Component<K>>>) {
        let root = root.unwrap_or_else(|| Box::new(EmptyContainer::new(self.layers.root.key())));
        self.layers.root = root;
        if self.prev_target == Some(Layer::Root) {
            self.prev_target = None;
        }
        self.root_changed();
    }

    fn root_changed(&mut self) {
        tracing::debug!(root = ?self.layers.root.key(), "root component installed");
        self.fit_root();
        self.interaction.damage.reset_whole();
        self.redraw();
    }

    fn fit_root(&mut self) {
        let mode = self.layers.root.fit_mode();
        if mode.is_empty() {
            return;
        }
        let size = self.host.control_size().to_size();
        let bounds = if mode.contains(FitMode::FIT_WINDOW) {
            size.to_rect()
        } else {
            let mut b = self.layers.root.outer_bounds();
            if mode.contains(FitMode::HORIZONTAL) {
                b.x0 = 0.0;
                b.x1 = size.width;
            }
            if mode.contains(FitMode::VERTICAL) {
                b.y0 = 0.0;
                b.y1 = size.height;
            }
            b
        };
        self.layers.root.set_outer_bounds(bounds);
    }

    /// The root component.
    pub fn root(&self) -> &dyn Component<K> {
        self.layers.root.as_ref()
    }

    /// The root component, mutably.
    pub fn root_mut(&mut self) -> &mut dyn Component<K> {
        self.layers.root.as_mut()
    }

    /// Install or remove the overlay.
    pub fn set_overlay(&mut self, overlay: Option<Box<dyn Component<K>>>) {
        self.layers.overlay = overlay;
        if self.prev_target == Some(Layer::Overlay) {
            self.prev_target = None;
        }
        self.interaction.damage.reset_whole();
    }

    /// The overlay, if any.
    pub fn overlay(&self) -> Option<&dyn Component<K>> {
        self.layers.overlay.as_deref().map(|o| o as &dyn Component<K>)
    }

    /// Handle the root reporting new bounds.
    pub fn component_bounds_changed(&mut self) {
        self.invalidate(None);
    }

    /// Capture the pointer for `owner`, or release it with `None`.
    ///
    /// See [`CaptureManager::set_owner`](crate::CaptureManager::set_owner).
    pub fn set_mouse_owner(
        &mut self,
        owner: Option<K>,
        transform: Option<Affine>,
        history: Option<Vec<K>>,
    ) {
        self.interaction
            .capture
            .set_owner(owner, transform, history, &mut self.host);
    }

    /// The current capture owner.
    pub fn mouse_owner(&self) -> Option<K> {
        self.interaction.capture.owner()
    }

    /// The component a captured event was last delivered to.
    pub fn pointer_owner(&self) -> Option<K> {
        self.pointer_owner
    }

    /// The current keyboard focus owner.
    pub fn focus_owner(&self) -> Option<K> {
        self.interaction.focus_owner
    }

    /// Replace the keyboard focus owner.
    pub fn set_focus_owner(&mut self, owner: Option<K>) {
        self.interaction.focus_owner = owner;
    }

    /// Layer that received the last routed event, if the pointer is still over it.
    pub fn hovered_layer(&self) -> Option<Layer> {
        self.prev_target
    }

    /// Modifiers held during the last routed event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Mark `region` (or the whole surface) as needing a repaint.
    pub fn invalidate(&mut self, region: Option<Rect>) {
        tracing::trace!(?region, "invalidate");
        self.interaction.damage.invalidate(region);
    }

    /// Whether `bounds` overlaps a stale region.
    pub fn needs_redraw(&self, bounds: Rect) -> bool {
        self.interaction.damage.needs_redraw(bounds)
    }

    /// The damage tracker.
    pub fn damage(&self) -> &DamageTracker {
        &self.interaction.damage
    }

    /// Ask the host to schedule a full paint.
    pub fn redraw(&mut self) {
        self.host.request_redraw(None);
    }

    /// The configuration.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Change the background color used by full repaints.
    pub fn set_background(&mut self, color: Color) {
        self.config.background = color;
    }

    /// Enable or disable damaged-region repainting.
    pub fn set_use_damaged_region(&mut self, enabled: bool) {
        self.config.use_damaged_region = enabled;
    }

    /// Scroll origin.
    pub fn scroll_origin(&self) -> Point {
        self.scroll_origin
    }

    /// Set the scroll origin.
    pub fn set_scroll_origin(&mut self, origin: Point) {
        self.scroll_origin = origin;
    }

    /// Size of the backing context, `None` until the first paint.
    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Map global screen coordinates into window coordinates.
    pub fn screen_to_window(&self, point: Point) -> Point {
        self.host.screen_to_window(point)
    }

    /// Capture the persistent subset of this window, mapping components with `f`.
    pub fn snapshot<S>(&self, mut f: impl FnMut(&dyn Component<K>) -> S) -> WindowSnapshot<S> {
        WindowSnapshot {
            root: f(self.layers.root.as_ref()),
            background: self.config.background,
            overlay: self.layers.overlay.as_deref().map(|o| f(o)),
            scroll_origin: self.scroll_origin,
        }
    }
}
