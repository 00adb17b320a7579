// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use understory_gesture::{DEFAULT_SENSITIVITY, Draggable};

use crate::ladder::ZoomLadder;

/// Number of ladder levels used when none are configured.
pub const DEFAULT_LEVEL_COUNT: usize = 2;

/// Which zoom stops double-tapping cycles through.
///
/// Only the number of configured levels matters; the stops themselves are
/// always spread evenly between the minimum and maximum zoom.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ZoomLevels {
    /// Nothing configured: [`DEFAULT_LEVEL_COUNT`] levels, double-tap enabled.
    #[default]
    Default,
    /// An explicit list. An empty list disables double-tap cycling.
    Explicit(Vec<f64>),
}

impl ZoomLevels {
    /// Number of levels the ladder is built with.
    #[must_use]
    pub fn level_count(&self) -> usize {
        match self {
            Self::Explicit(levels) if !levels.is_empty() => levels.len(),
            _ => DEFAULT_LEVEL_COUNT,
        }
    }

    /// Returns `false` only for an explicit empty list.
    #[must_use]
    pub fn double_tap_enabled(&self) -> bool {
        match self {
            Self::Default => true,
            Self::Explicit(levels) => !levels.is_empty(),
        }
    }
}

/// Spatial and temporal tolerance for recognizing a double tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoubleTapConfig {
    /// Longest gap between two releases, in milliseconds (exclusive).
    pub max_interval_ms: u64,
    /// Largest drift between the taps, in page units (exclusive).
    pub max_distance: f64,
}

impl Default for DoubleTapConfig {
    fn default() -> Self {
        Self {
            max_interval_ms: 600,
            max_distance: 20.0,
        }
    }
}

/// Tuning for release velocity sampling and fling inertia.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingConfig {
    /// Velocity multiplier used to project where a fling heads.
    pub decay_constant: f64,
    /// Movement since touch start above which a release counts as a drag.
    pub drag_threshold: f64,
    /// Window after a partial multi-finger release during which the final
    /// release does not fling, in milliseconds.
    pub cooldown_ms: u64,
    /// Minimum spacing between velocity samples, in milliseconds.
    pub sample_interval_ms: u64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            decay_constant: 2500.0,
            drag_threshold: 20.0,
            cooldown_ms: 400,
            sample_interval_ms: 50,
        }
    }
}

/// Host-facing configuration of a [`ZoomView`](crate::ZoomView).
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Smallest scale. Values below `1.0` are raised to `1.0`.
    pub minimum_zoom: f64,
    /// Largest scale.
    pub maximum_zoom: f64,
    /// Double-tap zoom stops.
    pub zoom_levels: ZoomLevels,
    /// Which axes drags move.
    pub draggable: Draggable,
    /// Double-tap recognition.
    pub double_tap: DoubleTapConfig,
    /// Fling behaviour.
    pub fling: FlingConfig,
    /// Pinch sensitivity in pixels per unit of scale.
    pub sensitivity: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            minimum_zoom: 1.0,
            maximum_zoom: 3.0,
            zoom_levels: ZoomLevels::Default,
            draggable: Draggable::BOTH,
            double_tap: DoubleTapConfig::default(),
            fling: FlingConfig::default(),
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl ZoomConfig {
    /// Sets the zoom range.
    #[must_use]
    pub fn with_zoom_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum_zoom = minimum;
        self.maximum_zoom = maximum;
        self
    }

    /// Sets the double-tap zoom levels.
    #[must_use]
    pub fn with_zoom_levels(mut self, levels: ZoomLevels) -> Self {
        self.zoom_levels = levels;
        self
    }

    /// Sets drag enablement.
    #[must_use]
    pub fn with_draggable(mut self, draggable: impl Into<Draggable>) -> Self {
        self.draggable = draggable.into();
        self
    }

    /// Sets double-tap tolerances.
    #[must_use]
    pub fn with_double_tap(mut self, double_tap: DoubleTapConfig) -> Self {
        self.double_tap = double_tap;
        self
    }

    /// Sets fling tuning.
    #[must_use]
    pub fn with_fling(mut self, fling: FlingConfig) -> Self {
        self.fling = fling;
        self
    }

    /// Sets pinch sensitivity.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Checks the configuration and derives the effective zoom limits.
    ///
    /// `minimum_zoom` is coerced to at least `1.0` before the range is checked.
    pub fn validate(&self) -> Result<ZoomLimits, ConfigError> {
        if !self.minimum_zoom.is_finite() {
            return Err(ConfigError::NonFiniteZoom {
                value: self.minimum_zoom,
            });
        }
        if !self.maximum_zoom.is_finite() {
            return Err(ConfigError::NonFiniteZoom {
                value: self.maximum_zoom,
            });
        }
        let min = self.minimum_zoom.max(1.0);
        let max = self.maximum_zoom;
        if max < min {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(ZoomLimits {
            min,
            max,
            ladder: ZoomLadder::new(min, max, self.zoom_levels.level_count()),
            double_tap_enabled: self.zoom_levels.double_tap_enabled(),
        })
    }
}

/// Effective limits derived from a validated [`ZoomConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomLimits {
    /// Smallest scale (at least `1.0`).
    pub min: f64,
    /// Largest scale.
    pub max: f64,
    /// Double-tap stops.
    pub ladder: ZoomLadder,
    /// Whether double-tapping cycles the ladder.
    pub double_tap_enabled: bool,
}

/// Why a [`ZoomConfig`] was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A zoom bound was NaN or infinite.
    NonFiniteZoom {
        /// The offending value.
        value: f64,
    },
    /// The maximum zoom is below the (coerced) minimum.
    InvertedRange {
        /// Effective minimum zoom.
        min: f64,
        /// Configured maximum zoom.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteZoom { value } => write!(f, "zoom bound {value} is not finite"),
            Self::InvertedRange { min, max } => {
                write!(f, "maximum zoom {max} is below minimum zoom {min}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
