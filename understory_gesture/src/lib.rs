// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: headless multi-touch gesture interpretation.
//!
//! This crate turns a stream of raw touch samples into an incrementally
//! updated 2D [`Transform`] (offset, rotation, scale). It is the math core of a
//! pinch / pan / rotate wrapper and knows nothing about any UI framework:
//! hosts deliver [`TouchEvent`]s and apply the resulting transform themselves.
//!
//! - [`math`]: distance and angle between the first two touches.
//! - [`touch`]: touch snapshots, the touch classifier, and the event shape.
//! - [`GestureAccumulator`]: the drag / pinch / rotate state machine.
//! - [`GestureEvent`] / [`GestureListener`]: start/change/end lifecycle
//!   reporting for the gesture as a whole and for multi-touch, rotate and
//!   scale separately.
//!
//! ## Pinch example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureAccumulator, GestureConfig, GestureKind, GesturePhase, TouchEvent, TouchSnapshot,
//! };
//!
//! let mut acc = GestureAccumulator::new(GestureConfig::default().with_rotatable(false));
//!
//! let fingers = |spread: f64| {
//!     TouchSnapshot::from_points([Point::new(0.0, 0.0), Point::new(spread, 0.0)])
//! };
//!
//! acc.begin(&TouchEvent::new(fingers(100.0), 0));
//! let events = acc.update(&TouchEvent::new(fingers(140.0), 16));
//!
//! // Widening by 40px at the default 400px-per-unit sensitivity adds 0.1.
//! assert!((acc.transform().scale - 1.1).abs() < 1e-12);
//! assert!(events[0].is(GestureKind::Scale, GesturePhase::Start));
//! ```
//!
//! ## Design notes
//!
//! - The accumulator is the only owner of the transform. Policy layers (such
//!   as `understory_zoom`) read and write it through explicit accessors, so
//!   the scale range is enforced in one place.
//! - Lifecycle callbacks are returned as values instead of invoked, which
//!   keeps ordering between gesture updates and other state changes explicit.
//! - Degenerate input (no fingers, coincident fingers) never panics and never
//!   produces non-finite transforms.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod accumulator;
mod config;
mod event;
pub mod math;
pub mod touch;
mod transform;

pub use accumulator::{GestureAccumulator, GestureFlags};
pub use config::{DEFAULT_SENSITIVITY, Draggable, GestureConfig, Scalable};
pub use event::{GestureEvent, GestureEvents, GestureKind, GestureListener, GesturePhase};
pub use touch::{TouchEvent, TouchSnapshot};
pub use transform::Transform;
