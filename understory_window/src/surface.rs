// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint cycle: backing-store management, full vs. clipped repaint, damage reset.

use crate::error::SurfaceError;
use crate::host::{GraphicsContext, HostSurface};
use crate::window::Window;

impl<K, H> Window<K, H>
where
    K: Copy + Eq + core::fmt::Debug + 'static,
    H: HostSurface<K>,
{
    /// Repaint the window.
    ///
    /// - Recreates the backing context when the control size changed or none exists yet.
    /// - Lays out the root.
    /// - Clears the whole context to the background when the whole surface is dirty,
    ///   otherwise clips drawing to the union of the damaged regions.
    /// - Draws the root, then the overlay, with view bounds covering the full surface.
    /// - Presents the context and resets damage: clean with damaged-region handling
    ///   enabled, whole dirty otherwise.
    ///
    /// On return the backing context matches the control size.
    ///
    /// # Errors
    ///
    /// Fails when the host cannot create the backing context, in which case no context
    /// and no size are kept and the next paint retries. Fails when the host cannot
    /// present, in which case damage is left as it was so the next paint redraws it.
    pub fn paint(&mut self) -> Result<(), SurfaceError> {
        let size = self.host.control_size();
        if self.size != Some(size) {
            self.context = None;
            self.size = None;
        }
        let context = match &mut self.context {
            Some(context) => context,
            slot => {
                tracing::debug!(
                    width = size.width,
                    height = size.height,
                    format = ?self.config.pixel_format,
                    "recreating backing context"
                );
                let context = self.host.create_context(size, self.config.pixel_format)?;
                self.size = Some(size);
                slot.insert(context)
            }
        };

        self.layers.root.do_layout();

        let use_damaged_region = self.config.use_damaged_region;
        let damage = &mut self.interaction.damage;
        damage.normalize(use_damaged_region);
        match damage.union() {
            None => {
                tracing::trace!("full repaint");
                context.clear(self.config.background);
            }
            Some(union) => {
                tracing::trace!(?union, "clipped repaint");
                context.clip_to_rect(union);
            }
        }

        let view_bounds = size.to_rect();
        self.layers.root.draw(context, view_bounds);
        if let Some(overlay) = &mut self.layers.overlay {
            overlay.draw(context, view_bounds);
        }

        if !use_damaged_region {
            damage.reset_whole();
        }
        self.host.present(context)?;
        damage.clear(use_damaged_region);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;
    use crate::host::SurfaceSize;
    use crate::testing::{GcOp, Probe, RecordingHost};
    use alloc::boxed::Box;
    use kurbo::Rect;

    fn window(host: RecordingHost, config: WindowConfig) -> Window<u32, RecordingHost> {
        let (probe, _log) = Probe::new(1, Rect::new(0.0, 0.0, 100.0, 100.0));
        Window::with_root(host, Box::new(probe), config)
    }

    #[test]
    fn first_paint_creates_context_and_clears() {
        let (root, log) = Probe::new(1, Rect::new(0.0, 0.0, 100.0, 100.0));
        let overlay = Probe::with_log(2, Rect::ZERO, log.clone());
        let mut w = Window::with_root(
            RecordingHost::sized(200, 100),
            Box::new(root),
            WindowConfig::default(),
        );
        w.set_overlay(Some(Box::new(overlay)));
        assert_eq!(w.size(), None);
        w.paint().unwrap();
        assert_eq!(w.size(), Some(SurfaceSize::new(200, 100)));
        assert_eq!(w.host().contexts_created, 1);
        assert_eq!(w.host().presents, 1);
        assert_eq!(w.context.as_ref().unwrap().ops, [GcOp::Clear]);

        let log = log.borrow();
        assert_eq!(log.layouts, 1);
        let full = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(log.draws, [(1, full), (2, full)], "root first, then overlay");
    }

    #[test]
    fn context_recreated_only_on_resize() {
        let mut w = window(RecordingHost::sized(50, 50), WindowConfig::default());
        w.paint().unwrap();
        w.paint().unwrap();
        assert_eq!(w.host().contexts_created, 1);
        w.host_mut().size = SurfaceSize::new(80, 60);
        w.paint().unwrap();
        assert_eq!(w.host().contexts_created, 2);
        assert_eq!(w.size(), Some(SurfaceSize::new(80, 60)));
        let ctx = w.context.as_ref().unwrap();
        assert_eq!(ctx.size, SurfaceSize::new(80, 60));
    }

    #[test]
    fn disabled_mode_always_repaints_fully() {
        let mut w = window(RecordingHost::sized(100, 100), WindowConfig::default());
        w.paint().unwrap();
        w.invalidate(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        w.paint().unwrap();
        assert!(w.damage().is_whole());
        let ops = &w.context.as_ref().unwrap().ops;
        assert!(!ops.iter().any(|op| matches!(op, GcOp::Clip(_))));
    }

    #[test]
    fn damaged_mode_clips_to_union_and_ends_clean() {
        let config = WindowConfig::default().with_damaged_region(true);
        let mut w = window(RecordingHost::sized(100, 100), config);
        w.paint().unwrap();
        assert!(w.damage().is_clean());

        w.invalidate(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        w.invalidate(Some(Rect::new(20.0, 20.0, 30.0, 40.0)));
        w.context.as_mut().unwrap().ops.clear();
        w.paint().unwrap();
        let ops = &w.context.as_ref().unwrap().ops;
        assert_eq!(ops.first(), Some(&GcOp::Clip(Rect::new(0.0, 0.0, 30.0, 40.0))));
        assert!(!ops.contains(&GcOp::Clear));
        assert!(w.damage().is_clean());
    }

    #[test]
    fn clean_state_is_promoted_to_full_repaint() {
        let config = WindowConfig::default().with_damaged_region(true);
        let mut w = window(RecordingHost::sized(100, 100), config);
        w.paint().unwrap();
        w.context.as_mut().unwrap().ops.clear();
        w.paint().unwrap();
        let ops = &w.context.as_ref().unwrap().ops;
        assert_eq!(ops.first(), Some(&GcOp::Clear));
    }

    #[test]
    fn context_failure_propagates() {
        let mut host = RecordingHost::sized(10, 10);
        host.fail_context = true;
        let mut w = window(host, WindowConfig::default());
        let err = w.paint().unwrap_err();
        assert!(matches!(err, SurfaceError::ContextCreation { width: 10, .. }));
        assert_eq!(w.size(), None);
    }

    #[test]
    fn failed_resize_forgets_size_with_context() {
        let mut w = window(RecordingHost::sized(50, 50), WindowConfig::default());
        w.paint().unwrap();
        w.host_mut().size = SurfaceSize::new(80, 60);
        w.host_mut().fail_context = true;
        assert!(w.paint().is_err());
        assert_eq!(w.size(), None);
        assert!(w.context.is_none());

        w.host_mut().fail_context = false;
        w.paint().unwrap();
        assert_eq!(w.size(), Some(SurfaceSize::new(80, 60)));
        assert_eq!(w.host().contexts_created, 2);
    }
}
