// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Default pixel-to-scale sensitivity: a pinch that widens by this many
/// pixels adds `1.0` to the scale.
pub const DEFAULT_SENSITIVITY: f64 = 400.0;

/// Per-axis drag enablement.
///
/// `true`/`false` convert to both axes enabled/disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Draggable {
    /// Horizontal dragging moves `left`.
    pub x: bool,
    /// Vertical dragging moves `top`.
    pub y: bool,
}

impl Default for Draggable {
    fn default() -> Self {
        Self::BOTH
    }
}

impl Draggable {
    /// Both axes draggable.
    pub const BOTH: Self = Self { x: true, y: true };
    /// Dragging disabled.
    pub const NONE: Self = Self { x: false, y: false };

    /// Returns `true` if at least one axis is draggable.
    #[must_use]
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

impl From<bool> for Draggable {
    fn from(enabled: bool) -> Self {
        Self {
            x: enabled,
            y: enabled,
        }
    }
}

/// Whether pinching scales, and into which range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalable {
    /// Pinching never changes the scale.
    Disabled,
    /// Pinching scales, clamped into `[min, max]`.
    Range {
        /// Smallest reachable scale.
        min: f64,
        /// Largest reachable scale.
        max: f64,
    },
}

impl Default for Scalable {
    fn default() -> Self {
        Self::Range {
            min: 0.33,
            max: 2.0,
        }
    }
}

impl From<bool> for Scalable {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::default()
        } else {
            Self::Disabled
        }
    }
}

impl Scalable {
    /// Clamps `scale` into the range; `Disabled` leaves it untouched.
    ///
    /// A reversed range is normalized so `min <= max`.
    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        match self {
            Self::Disabled => scale,
            Self::Range { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                scale.clamp(lo, hi)
            }
        }
    }

    /// Returns `true` unless scaling is disabled.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Configuration for [`GestureAccumulator`](crate::GestureAccumulator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Which axes single- and multi-finger drags move.
    pub draggable: Draggable,
    /// Whether two-finger twists rotate the target.
    pub rotatable: bool,
    /// Whether and within which range pinches scale the target.
    pub scalable: Scalable,
    /// Pixels of pinch distance change per unit of scale.
    pub sensitivity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            draggable: Draggable::default(),
            rotatable: true,
            scalable: Scalable::default(),
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl GestureConfig {
    /// Sets drag enablement.
    #[must_use]
    pub fn with_draggable(mut self, draggable: impl Into<Draggable>) -> Self {
        self.draggable = draggable.into();
        self
    }

    /// Sets rotation enablement.
    #[must_use]
    pub fn with_rotatable(mut self, rotatable: bool) -> Self {
        self.rotatable = rotatable;
        self
    }

    /// Sets scale enablement and range.
    #[must_use]
    pub fn with_scalable(mut self, scalable: impl Into<Scalable>) -> Self {
        self.scalable = scalable.into();
        self
    }

    /// Sets the pinch sensitivity. Non-positive or non-finite values fall
    /// back to [`DEFAULT_SENSITIVITY`].
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = if sensitivity.is_finite() && sensitivity > 0.0 {
            sensitivity
        } else {
            DEFAULT_SENSITIVITY
        };
        self
    }
}
