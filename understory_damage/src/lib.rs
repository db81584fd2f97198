// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_damage --heading-base-level=0

//! Understory Damage: rectangle region algebra and stale-region tracking.
//!
//! ## Overview
//!
//! A retained-mode surface should only repaint what changed.
//! This crate provides the two pieces needed to get there:
//!
//! - [`region`]: stateless helpers over axis-aligned [`kurbo::Rect`]s (bounds ↔ coordinates,
//!   intersection, union, disjoint union, overlap queries against a set).
//! - [`DamageTracker`]: the set of dirty rectangles accumulated between two paints, or the
//!   "whole surface" sentinel when everything must be cleared and redrawn.
//!
//! ## Whole vs. partial damage
//!
//! The tracker has three observable states:
//!
//! - **whole dirty**: the entire surface is stale (the initial state).
//! - **clean**: an empty list, nothing to repaint.
//! - **partial**: a non-empty list of rectangles.
//!
//! Whole-surface damage dominates: invalidating a region while whole dirty is a no-op, and
//! invalidating without a region from any state makes the surface whole dirty.
//!
//! ```
//! use kurbo::Rect;
//! use understory_damage::DamageTracker;
//!
//! let mut damage = DamageTracker::new();
//! assert!(damage.is_whole());
//!
//! // After a paint in damaged-region mode the tracker is clean.
//! damage.clear(true);
//! damage.invalidate(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
//!
//! assert!(damage.needs_redraw(Rect::new(5.0, 5.0, 20.0, 20.0)));
//! assert!(!damage.needs_redraw(Rect::new(50.0, 50.0, 60.0, 60.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod region;
mod tracker;

pub use region::Bounds;
pub use tracker::DamageTracker;
