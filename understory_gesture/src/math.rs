// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger vector math: distance and angle between the first two touches.
//!
//! Only the first two points of a snapshot are considered. Extra fingers are
//! ignored, missing ones make [`distance`] unavailable and [`angle`] zero.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::math::{angle, distance};
//!
//! let touches = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
//! assert_eq!(distance(&touches), Some(5.0));
//!
//! let vertical = [Point::new(0.0, 0.0), Point::new(0.0, 10.0)];
//! assert!((angle(&vertical) - 90.0).abs() < 1e-9);
//!
//! assert_eq!(distance(&touches[..1]), None);
//! ```

use kurbo::Point;

/// Euclidean distance between the first two points.
///
/// Returns `None` when fewer than two points are present.
#[must_use]
pub fn distance(points: &[Point]) -> Option<f64> {
    match points {
        [a, b, ..] => Some((*b - *a).hypot()),
        _ => None,
    }
}

/// Angle in degrees of the vector from the first point to the second.
///
/// The result is normalized into `[0, 360)`. With fewer than two points the
/// angle is `0.0`.
#[must_use]
pub fn angle(points: &[Point]) -> f64 {
    let [a, b, ..] = points else {
        return 0.0;
    };
    let deg = (*b - *a).atan2().to_degrees();
    if deg < 0.0 { deg + 360.0 } else { deg }
}

/// Signed difference `a - b` between two angles, wrapped into `(-180, 180]`.
///
/// Non-finite inputs yield `0.0`.
#[must_use]
pub fn angle_delta(a: f64, b: f64) -> f64 {
    let mut d = a - b;
    if !d.is_finite() {
        return 0.0;
    }
    // Reduce first so the loops below run at most once for any magnitude.
    d %= 360.0;
    while d > 180.0 {
        d -= 360.0;
    }
    while d <= -180.0 {
        d += 360.0;
    }
    d
}
