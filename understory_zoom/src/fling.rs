// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release velocity sampling and fling inertia.
//!
//! - [`VelocitySampler`] records a positional delta at most once per sample
//!   interval while a finger moves, and turns it into a release velocity.
//! - [`FlingTracker`] hands out [`FlingRequest`]s, drops frames from
//!   cancelled flings, and applies a frame only once both axes moved.
//! - [`DecayAnimation`] is a ready-made decay primitive for hosts that do not
//!   have one: per-axis exponential deceleration stepped in milliseconds.

use kurbo::{Point, Vec2};

/// Tracks the most recent movement of the primary finger.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocitySampler {
    start: Point,
    start_time: u64,
    prev: Point,
    prev_time: u64,
    delta: Vec2,
    elapsed: u64,
    interval: u64,
}

impl VelocitySampler {
    /// Creates a sampler that records at most one delta per `interval_ms`.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: interval_ms,
            ..Self::default()
        }
    }

    /// Starts tracking a new touch.
    pub fn start(&mut self, position: Point, timestamp: u64) {
        *self = Self {
            start: position,
            start_time: timestamp,
            prev: position,
            prev_time: timestamp,
            delta: Vec2::ZERO,
            elapsed: 0,
            interval: self.interval,
        };
    }

    /// Records `position` if more than the sample interval passed since the
    /// last recorded sample.
    pub fn sample(&mut self, position: Point, timestamp: u64) {
        let elapsed = timestamp.saturating_sub(self.prev_time);
        if elapsed > self.interval {
            self.delta = position - self.prev;
            self.elapsed = elapsed;
            self.prev = position;
            self.prev_time = timestamp;
        }
    }

    /// Where the touch started.
    #[must_use]
    pub fn start_position(&self) -> Point {
        self.start
    }

    /// Straight-line distance from the touch start to `position`.
    #[must_use]
    pub fn travel(&self, position: Point) -> f64 {
        (position - self.start).hypot()
    }

    /// Velocity in page units per millisecond at a release at `position`.
    ///
    /// Falls back to the movement since the last sample (and the time since
    /// the touch started) when no interval-spaced sample was recorded. Returns
    /// `None` when either axis is zero or the result is not finite.
    #[must_use]
    pub fn release_velocity(&self, position: Point, timestamp: u64) -> Option<Vec2> {
        let dt = if self.elapsed == 0 {
            timestamp.saturating_sub(self.start_time)
        } else {
            self.elapsed
        };
        if dt == 0 {
            return None;
        }
        let dx = if self.delta.x == 0.0 {
            position.x - self.prev.x
        } else {
            self.delta.x
        };
        let dy = if self.delta.y == 0.0 {
            position.y - self.prev.y
        } else {
            self.delta.y
        };
        let dt = dt as f64;
        let velocity = Vec2::new(dx / dt, dy / dt);
        if velocity.x == 0.0 || velocity.y == 0.0 || !velocity.is_finite() {
            return None;
        }
        Some(velocity)
    }
}

/// Identifies one fling so frames from a cancelled fling can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlingId(pub u64);

/// Instruction for the host to start its decay primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingRequest {
    /// Id to report frames with.
    pub id: FlingId,
    /// Origin the fling starts from.
    pub from: Point,
    /// Release velocity in page units per millisecond.
    pub velocity: Vec2,
    /// Where the fling heads: `from + velocity * decay_constant`.
    pub projected: Point,
}

/// Owns the lifecycle of the active fling and de-duplicates its frames.
#[derive(Clone, Debug, Default)]
pub struct FlingTracker {
    active: Option<FlingId>,
    next_id: u64,
    pending: Point,
    x_fresh: bool,
    y_fresh: bool,
}

impl FlingTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the running fling, if any.
    #[must_use]
    pub fn active(&self) -> Option<FlingId> {
        self.active
    }

    /// Starts a new fling from `from`, replacing any running one.
    pub fn start(&mut self, from: Point, velocity: Vec2, decay_constant: f64) -> FlingRequest {
        let id = FlingId(self.next_id);
        self.next_id += 1;
        self.active = Some(id);
        self.pending = from;
        self.x_fresh = false;
        self.y_fresh = false;
        FlingRequest {
            id,
            from,
            velocity,
            projected: from + velocity * decay_constant,
        }
    }

    /// Cancels the running fling, returning its id.
    pub fn cancel(&mut self) -> Option<FlingId> {
        self.x_fresh = false;
        self.y_fresh = false;
        self.active.take()
    }

    /// Offers a frame of fling `id` while the target sits at `current`.
    ///
    /// An axis is fresh once the frame's value on it differs from `current`.
    /// The accumulated position is returned only when both axes are fresh;
    /// freshness then resets. Frames of inactive flings are dropped.
    pub fn frame(&mut self, id: FlingId, value: Point, current: Point) -> Option<Point> {
        if self.active != Some(id) {
            return None;
        }
        if value.x != current.x {
            self.pending.x = value.x;
            self.x_fresh = true;
        }
        if value.y != current.y {
            self.pending.y = value.y;
            self.y_fresh = true;
        }
        if self.x_fresh && self.y_fresh {
            self.x_fresh = false;
            self.y_fresh = false;
            Some(self.pending)
        } else {
            None
        }
    }

    /// Finishes fling `id` at its resting `value`, returning the position to
    /// apply if it differs from `current`.
    ///
    /// This flushes an axis that kept moving after the other one stopped.
    pub fn settle(&mut self, id: FlingId, value: Point, current: Point) -> Option<Point> {
        if self.active != Some(id) {
            return None;
        }
        self.cancel();
        (value != current).then_some(value)
    }
}

/// One step of a [`DecayAnimation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayFrame {
    /// Current animated position.
    pub value: Point,
    /// Both axes have come to rest.
    pub settled: bool,
}

/// Per-axis exponential velocity decay.
///
/// Each millisecond the position advances by the velocity and the velocity is
/// multiplied by the deceleration factor. An axis settles once a step moves it
/// less than [`DecayAnimation::REST_DISTANCE`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayAnimation {
    value: Point,
    velocity: Vec2,
    deceleration: f64,
    last: Point,
    settled_x: bool,
    settled_y: bool,
}

impl DecayAnimation {
    /// Velocity multiplier applied every millisecond.
    pub const DEFAULT_DECELERATION: f64 = 0.997;
    /// Movement per step below which an axis is at rest.
    pub const REST_DISTANCE: f64 = 0.1;
    /// Longest step simulated at once; longer gaps are truncated.
    const MAX_STEP_MS: u64 = 1000;

    /// Creates an animation starting at `from` with `velocity` in units per ms.
    #[must_use]
    pub fn new(from: Point, velocity: Vec2) -> Self {
        Self {
            value: from,
            velocity,
            deceleration: Self::DEFAULT_DECELERATION,
            last: from,
            settled_x: false,
            settled_y: false,
        }
    }

    /// Creates the animation described by a fling request.
    #[must_use]
    pub fn from_request(request: &FlingRequest) -> Self {
        Self::new(request.from, request.velocity)
    }

    /// Sets the per-millisecond deceleration, clamped into `[0, 1)`.
    #[must_use]
    pub fn with_deceleration(mut self, deceleration: f64) -> Self {
        self.deceleration = deceleration.clamp(0.0, 0.999_999);
        self
    }

    /// Returns `true` once both axes are at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled_x && self.settled_y
    }

    /// Advances the animation by `dt_ms` milliseconds.
    ///
    /// A zero-length step reports the current frame without settling.
    pub fn step(&mut self, dt_ms: u64) -> DecayFrame {
        if dt_ms == 0 {
            return DecayFrame {
                value: self.value,
                settled: self.is_settled(),
            };
        }
        for _ in 0..dt_ms.min(Self::MAX_STEP_MS) {
            if !self.settled_x {
                self.value.x += self.velocity.x;
                self.velocity.x *= self.deceleration;
            }
            if !self.settled_y {
                self.value.y += self.velocity.y;
                self.velocity.y *= self.deceleration;
            }
        }
        if (self.value.x - self.last.x).abs() < Self::REST_DISTANCE {
            self.settled_x = true;
        }
        if (self.value.y - self.last.y).abs() < Self::REST_DISTANCE {
            self.settled_y = true;
        }
        self.last = self.value;
        DecayFrame {
            value: self.value,
            settled: self.is_settled(),
        }
    }
}
