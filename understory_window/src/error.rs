// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by host bindings.

use alloc::string::String;

use crate::host::PixelFormat;

/// A host operation needed by the paint cycle failed.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The backing context could not be allocated.
    #[error("failed to create a {format:?} backing context of {width}x{height}")]
    ContextCreation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Requested pixel layout.
        format: PixelFormat,
    },
    /// The host could not blit the backing context.
    #[error("failed to present the backing context: {0}")]
    Present(String),
}
