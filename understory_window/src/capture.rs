// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer capture: one component temporarily owns every pointer event.
//!
//! ## Overview
//!
//! While a capture is active the router skips hit testing and enter/leave synthesis and
//! delivers every event straight to the owner. The owner's position space is described
//! either by a single stored transform or by a dispatch history: the chain of ancestors the
//! event passed through when capture began, whose transforms are recomposed on every event
//! (so an ancestor that moves mid-drag is honored).
//!
//! Owner, transform and history are stored together, so none of them can outlive the others.
//!
//! ## Composition order
//!
//! The history is recorded in traversal order, outermost ancestor first, so `hn` is the
//! capturing component's immediate parent. [`compose_history`] chains the transforms so
//! that they act from that parent back up to the root:
//!
//! ```text
//! history = [h0, h1, ..., hn]   =>   net = T(h0) * T(h1) * ... * T(hn)
//! ```
//!
//! Applied to a point, `T(hn)` acts first and `T(h0)` last.

use alloc::vec::Vec;

use kurbo::Affine;

use crate::host::PointerHost;

/// Active pointer capture.
#[derive(Clone, Debug, PartialEq)]
pub struct Capture<K> {
    /// The component receiving all pointer events.
    pub owner: K,
    /// Transform from window space to the owner's space, used when there is no history.
    pub transform: Option<Affine>,
    /// Ancestors whose transforms are recomposed per event, outermost first.
    pub history: Option<Vec<K>>,
}

/// Tracks the capture owner and keeps host-level capture in sync.
#[derive(Clone, Debug)]
pub struct CaptureManager<K> {
    current: Option<Capture<K>>,
}

impl<K> Default for CaptureManager<K> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K> CaptureManager<K> {
    /// The active capture, if any.
    pub fn current(&self) -> Option<&Capture<K>> {
        self.current.as_ref()
    }
}

impl<K: Copy + Eq + core::fmt::Debug> CaptureManager<K> {
    /// No capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the capture owner.
    ///
    /// A `Some` owner captures the pointer at the host level and stores all three values.
    /// `None` releases the host capture and clears everything, ignoring `transform` and
    /// `history`.
    pub fn set_owner(
        &mut self,
        owner: Option<K>,
        transform: Option<Affine>,
        history: Option<Vec<K>>,
        host: &mut dyn PointerHost<K>,
    ) {
        match owner {
            Some(owner) => {
                tracing::debug!(?owner, has_history = history.is_some(), "pointer captured");
                host.capture_pointer();
                self.current = Some(Capture {
                    owner,
                    transform,
                    history,
                });
            }
            None => {
                if let Some(prev) = &self.current {
                    tracing::debug!(owner = ?prev.owner, "pointer released");
                }
                host.release_pointer();
                self.current = None;
            }
        }
    }

    /// The capture owner, if any.
    pub fn owner(&self) -> Option<K> {
        self.current.as_ref().map(|c| c.owner)
    }

    /// Transform to push onto an event delivered to the owner.
    ///
    /// A non-empty history wins and is recomposed with `transform_of`, which returns the
    /// current event transform of a component (or `None` if it is gone, treated as identity).
    /// Otherwise the stored transform is used. `None` means deliver untransformed.
    pub fn resolve_transform(&self, transform_of: impl Fn(K) -> Option<Affine>) -> Option<Affine> {
        let capture = self.current.as_ref()?;
        match capture.history.as_deref() {
            Some(history) if !history.is_empty() => {
                Some(compose_history(history.iter().map(|&k| {
                    transform_of(k).unwrap_or_else(|| {
                        tracing::trace!(ancestor = ?k, "capture ancestor missing; using identity");
                        Affine::IDENTITY
                    })
                })))
            }
            _ => capture.transform,
        }
    }
}

/// Compose ancestor transforms given in traversal order (outermost first).
///
/// The accumulator starts at identity and is multiplied on the right by each transform in
/// order, giving `T(h0) * ... * T(hn)`. The result applies the innermost transform to a
/// point first and the outermost last.
pub fn compose_history<I>(transforms: I) -> Affine
where
    I: IntoIterator<Item = Affine>,
{
    let mut net = Affine::IDENTITY;
    for t in transforms {
        net = net * t;
    }
    net
}
