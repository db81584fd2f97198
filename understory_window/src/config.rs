// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window configuration.

use peniko::Color;

use crate::host::PixelFormat;

/// Light gray, the default window background.
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb8(211, 211, 211);

/// Options fixed at window construction; see [`Window::with_root`](crate::Window::with_root).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowConfig {
    /// Color used to clear the surface on a full repaint.
    pub background: Color,
    /// Repaint only the damaged regions instead of the full surface.
    ///
    /// When disabled, every paint clears and redraws everything.
    pub use_damaged_region: bool,
    /// Pixel layout requested for the backing context.
    pub pixel_format: PixelFormat,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            use_damaged_region: false,
            pixel_format: PixelFormat::default(),
        }
    }
}

impl WindowConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Enable or disable damaged-region repainting.
    pub fn with_damaged_region(mut self, enabled: bool) -> Self {
        self.use_damaged_region = enabled;
        self
    }

    /// Set the backing context pixel format.
    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = format;
        self
    }
}
