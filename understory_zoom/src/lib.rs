// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: pinch-to-zoom policy on top of `understory_gesture`.
//!
//! [`ZoomView`] wraps a gesture accumulator with the behaviour of a zoomable
//! pane inside a fixed container:
//! - The scale stays within `[minimum_zoom, maximum_zoom]` (minimum at least 1).
//! - The pane origin is clamped so the scaled pane never detaches from the
//!   container edges ([`bounds`]).
//! - Double taps cycle through a [`ZoomLadder`] of evenly spaced stops,
//!   keeping the tapped content under the container centre.
//! - Fast releases request a fling; the host drives the decay and reports
//!   frames back, tagged with a [`FlingId`] so stale frames are dropped.
//! - Container changes and orientation resets that arrive before the pane is
//!   measured are deferred until it is.
//!
//! Nothing here renders or animates. Every input returns [`ZoomOutput`]s
//! telling the host what to apply or start.
//!
//! ## Double-tap example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_gesture::TouchEvent;
//! use understory_zoom::{ZoomConfig, ZoomView};
//!
//! let mut view = ZoomView::new(ZoomConfig::default().with_zoom_range(1.0, 5.0)).unwrap();
//! view.set_container(Rect::new(0.0, 0.0, 400.0, 600.0));
//! view.set_pane_layout(Size::new(400.0, 600.0));
//! assert_eq!(view.ladder().stops(), &[1.0, 3.0, 5.0]);
//!
//! let tap = Point::new(200.0, 300.0);
//! for t in [0, 200] {
//!     view.touch_start(&TouchEvent::single(tap, t));
//!     view.touch_end(&TouchEvent::release(tap, t + 50));
//! }
//! assert_eq!(view.transform().scale, 3.0);
//! ```
//!
//! ## Fling
//!
//! When a release produces [`ZoomOutput::StartFling`], run a decay animation
//! (for example [`DecayAnimation`]) from `request.from` and feed each value to
//! [`ZoomView::fling_frame`], then the final value to
//! [`ZoomView::fling_settled`]. A new touch cancels the fling and reports
//! [`ZoomOutput::CancelFling`].
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod bounds;
mod command;
mod config;
mod fling;
mod ladder;
mod tap;
mod view;

pub use command::ZoomCommand;
pub use config::{
    ConfigError, DEFAULT_LEVEL_COUNT, DoubleTapConfig, FlingConfig, ZoomConfig, ZoomLevels,
    ZoomLimits,
};
pub use fling::{
    DecayAnimation, DecayFrame, FlingId, FlingRequest, FlingTracker, VelocitySampler,
};
pub use ladder::ZoomLadder;
pub use tap::{TapOutcome, TapTracker};
pub use view::{ZoomOutput, ZoomOutputs, ZoomView};
