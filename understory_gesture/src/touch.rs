// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch snapshots, the touch classifier, and the event shape fed in by hosts.
//!
//! A [`TouchSnapshot`] is the list of fingers currently on the surface, in the
//! order the host reports them. A [`TouchEvent`] wraps one snapshot together
//! with the position and timestamp of the finger that produced the event and
//! the host's accumulated gesture delta.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::touch::{TouchSnapshot, is_multi_touch, touch_count};
//!
//! let one = TouchSnapshot::from_points([Point::new(1.0, 2.0)]);
//! assert!(!one.is_multi_touch());
//!
//! let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
//! assert!(is_multi_touch(&pts));
//! assert_eq!(touch_count(&pts), 2);
//! ```

use core::ops::Deref;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Number of touches stored inline before a snapshot spills to the heap.
const INLINE_TOUCHES: usize = 4;

/// Returns `true` if more than one touch is present.
#[must_use]
pub fn is_multi_touch(points: &[Point]) -> bool {
    points.len() > 1
}

/// Number of touches present.
#[must_use]
pub fn touch_count(points: &[Point]) -> usize {
    points.len()
}

/// Ordered set of active touch points; index = finger index reported by the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchSnapshot {
    points: SmallVec<[Point; INLINE_TOUCHES]>,
}

impl TouchSnapshot {
    /// Creates an empty snapshot (no fingers down).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot from points in finger order.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Appends a finger to the snapshot.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Returns the touch points in finger order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of touches in the snapshot.
    #[must_use]
    pub fn touch_count(&self) -> usize {
        touch_count(&self.points)
    }

    /// Returns `true` if more than one touch is present.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        is_multi_touch(&self.points)
    }
}

impl Deref for TouchSnapshot {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

impl FromIterator<Point> for TouchSnapshot {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

/// One touch event as delivered by the host framework.
///
/// On a release, `touches` holds the fingers that are *still* down, so it is
/// empty when the last finger lifts; `position` is then the position of the
/// finger that was lifted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchEvent {
    /// Fingers currently on the surface.
    pub touches: TouchSnapshot,
    /// Page position of the finger that produced this event.
    pub position: Point,
    /// Event time in milliseconds on the host's monotonic clock.
    pub timestamp: u64,
    /// Movement accumulated by the host since the gesture was granted.
    pub gesture_delta: Vec2,
}

impl TouchEvent {
    /// Creates an event whose position is the first touch (or the origin if none).
    #[must_use]
    pub fn new(touches: TouchSnapshot, timestamp: u64) -> Self {
        let position = touches.first().copied().unwrap_or(Point::ORIGIN);
        Self {
            touches,
            position,
            timestamp,
            gesture_delta: Vec2::ZERO,
        }
    }

    /// Creates a single-finger event at `position`.
    #[must_use]
    pub fn single(position: Point, timestamp: u64) -> Self {
        Self::new(TouchSnapshot::from_points([position]), timestamp)
    }

    /// Creates a release event: no fingers remain and `position` is where the
    /// last finger lifted.
    #[must_use]
    pub fn release(position: Point, timestamp: u64) -> Self {
        Self {
            touches: TouchSnapshot::new(),
            position,
            timestamp,
            gesture_delta: Vec2::ZERO,
        }
    }

    /// Sets the accumulated gesture delta.
    #[must_use]
    pub fn with_gesture_delta(mut self, delta: Vec2) -> Self {
        self.gesture_delta = delta;
        self
    }

    /// Sets the position of the finger that produced the event.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}
