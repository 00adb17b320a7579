// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::config::DoubleTapConfig;

/// How a release was classified by [`TapTracker::on_release`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapOutcome {
    /// Second tap of a double tap, released at the given page position.
    DoubleTap(Point),
    /// A short, still touch; may become the first half of a double tap.
    Tap,
    /// The finger travelled further than the drift tolerance.
    Drag,
}

/// Recognizes double taps from a sequence of releases.
///
/// A release is the second half of a double tap when it follows the previous
/// release by less than the configured interval and lands within the
/// configured distance of where the previous tap *started*. Drags clear the
/// pending tap, so a drag followed by a tap is never a double tap.
#[derive(Clone, Debug, Default)]
pub struct TapTracker {
    config: DoubleTapConfig,
    enabled: bool,
    last_release: Option<u64>,
    pending_tap: Option<Point>,
}

impl TapTracker {
    /// Creates a tracker. A disabled tracker still classifies taps and drags
    /// but never reports [`TapOutcome::DoubleTap`].
    #[must_use]
    pub fn new(config: DoubleTapConfig, enabled: bool) -> Self {
        Self {
            config,
            enabled,
            last_release: None,
            pending_tap: None,
        }
    }

    /// Returns `true` if double taps can be reported.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Classifies a release at `position` and `timestamp` for a touch that
    /// started at `start`.
    pub fn on_release(&mut self, position: Point, timestamp: u64, start: Point) -> TapOutcome {
        let previous = self.last_release.replace(timestamp);

        if self.enabled
            && let (Some(prev_time), Some(prev_tap)) = (previous, self.pending_tap)
        {
            let interval = timestamp.saturating_sub(prev_time);
            let drift = (position - prev_tap).hypot();
            if interval < self.config.max_interval_ms && drift < self.config.max_distance {
                self.reset();
                return TapOutcome::DoubleTap(position);
            }
        }

        if (position - start).hypot() > self.config.max_distance {
            self.pending_tap = None;
            TapOutcome::Drag
        } else {
            self.pending_tap = Some(start);
            TapOutcome::Tap
        }
    }

    /// Forgets any pending tap.
    pub fn reset(&mut self) {
        self.last_release = None;
        self.pending_tap = None;
    }
}
