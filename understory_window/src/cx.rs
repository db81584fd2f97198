// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context handed to components while they handle an event.

use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use cursor_icon::CursorIcon;
use kurbo::{Affine, Rect};
use understory_damage::DamageTracker;

use crate::capture::CaptureManager;
use crate::host::PointerHost;

/// Mutable window state that components may change mid-dispatch.
#[derive(Debug)]
pub(crate) struct Interaction<K> {
    pub(crate) capture: CaptureManager<K>,
    pub(crate) focus_owner: Option<K>,
    pub(crate) damage: DamageTracker,
}

impl<K> Default for Interaction<K> {
    fn default() -> Self {
        Self {
            capture: CaptureManager::default(),
            focus_owner: None,
            damage: DamageTracker::new(),
        }
    }
}

/// Window services available to a component during [`Component::dispatch`](crate::Component::dispatch).
///
/// Changes made here take effect immediately: the router re-reads capture and focus state
/// after every dispatch, so a component may capture or release the pointer from inside its
/// own handler.
pub struct EventCx<'a, K> {
    pub(crate) interaction: &'a mut Interaction<K>,
    pub(crate) host: &'a mut dyn PointerHost<K>,
}

impl<K: fmt::Debug> fmt::Debug for EventCx<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCx")
            .field("mouse_owner", &self.interaction.capture.current().map(|c| &c.owner))
            .field("focus_owner", &self.interaction.focus_owner)
            .finish_non_exhaustive()
    }
}

impl<'a, K: Copy + Eq + fmt::Debug> EventCx<'a, K> {
    pub(crate) fn new(interaction: &'a mut Interaction<K>, host: &'a mut dyn PointerHost<K>) -> Self {
        Self { interaction, host }
    }

    /// Capture the pointer for `owner`, or release it with `None`.
    ///
    /// See [`CaptureManager::set_owner`].
    pub fn set_mouse_owner(
        &mut self,
        owner: Option<K>,
        transform: Option<Affine>,
        history: Option<Vec<K>>,
    ) {
        self.interaction
            .capture
            .set_owner(owner, transform, history, self.host);
    }

    /// Release pointer capture.
    pub fn release_mouse(&mut self) {
        self.set_mouse_owner(None, None, None);
    }

    /// The current capture owner.
    pub fn mouse_owner(&self) -> Option<K> {
        self.interaction.capture.owner()
    }

    /// The current focus owner.
    pub fn focus_owner(&self) -> Option<K> {
        self.interaction.focus_owner
    }

    /// Replace the focus owner.
    pub fn set_focus_owner(&mut self, owner: Option<K>) {
        tracing::debug!(?owner, "focus owner set");
        self.interaction.focus_owner = owner;
    }

    /// Mark `region` (or everything) as needing a repaint.
    pub fn invalidate(&mut self, region: Option<Rect>) {
        tracing::trace!(?region, "invalidate");
        self.interaction.damage.invalidate(region);
    }

    /// Ask the host to schedule a paint.
    pub fn request_redraw(&mut self) {
        self.host.request_redraw(None);
    }

    /// Change the displayed cursor.
    pub fn set_cursor(&mut self, cursor: CursorIcon) {
        self.host.set_cursor(cursor);
    }

    /// Arm or cancel a repeating timer for `component`.
    pub fn set_timer_interval(&mut self, component: K, interval: Option<Duration>) {
        self.host.set_timer_interval(component, interval);
    }
}
