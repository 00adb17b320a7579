// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

/// Evenly spaced scale stops used for double-tap zoom cycling.
///
/// A ladder with `n` levels has `n + 1` stops running from the minimum to
/// the maximum zoom inclusive. It is computed once and never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomLadder {
    stops: SmallVec<[f64; 8]>,
}

impl ZoomLadder {
    /// Builds `level_count + 1` stops evenly spaced over `[min, max]`.
    ///
    /// A `level_count` of zero yields the single stop `min`.
    #[must_use]
    pub fn new(min: f64, max: f64, level_count: usize) -> Self {
        if level_count == 0 {
            let mut stops = SmallVec::new();
            stops.push(min);
            return Self { stops };
        }
        let step = (max - min) / level_count as f64;
        let stops = (0..=level_count)
            .map(|i| {
                if i == level_count {
                    // Land exactly on the maximum regardless of rounding.
                    max
                } else {
                    min + i as f64 * step
                }
            })
            .collect();
        Self { stops }
    }

    /// Returns the stops in increasing order.
    #[must_use]
    pub fn stops(&self) -> &[f64] {
        &self.stops
    }

    /// Number of stops (levels + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// A ladder always has at least one stop.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Lowest stop.
    #[must_use]
    pub fn first(&self) -> f64 {
        self.stops[0]
    }

    /// Highest stop.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.stops[self.stops.len() - 1]
    }

    /// Smallest stop strictly greater than `scale`, wrapping to the lowest
    /// stop when `scale` is already at or past the top.
    #[must_use]
    pub fn next_after(&self, scale: f64) -> f64 {
        self.stops
            .iter()
            .copied()
            .find(|&stop| scale < stop)
            .unwrap_or_else(|| self.first())
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Ladders have `levels + 1` strictly increasing stops from min to max.
        #[test]
        fn ladder_shape(min in 1.0f64..10.0, span in 0.01f64..20.0, levels in 1usize..12) {
            let max = min + span;
            let ladder = ZoomLadder::new(min, max, levels);
            prop_assert_eq!(ladder.len(), levels + 1);
            prop_assert_eq!(ladder.first(), min);
            prop_assert_eq!(ladder.last(), max);
            for pair in ladder.stops().windows(2) {
                prop_assert!(pair[0] < pair[1], "stops not increasing: {:?}", ladder.stops());
            }
        }
    }
}
