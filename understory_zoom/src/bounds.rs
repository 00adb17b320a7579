// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Border clamping for a centre-scaled pane inside a container.
//!
//! The pane is scaled about its centre, so at scale `s` it overhangs its
//! layout box by `(s - 1) * size / 2` on every side. Clamping limits how far
//! that overhang can be pulled into view:
//! - `left` stays in `[-extra, extra]`, so horizontal panning only uncovers
//!   the overhang and a pane at scale 1 never scrolls sideways.
//! - `top` stays in `[container - scaled + extra, extra]`, so a tall pane can
//!   scroll through the container height. The upper bound wins when the pane
//!   is shorter than the container.

use kurbo::{Point, Size, Vec2};

/// Extra extent per side introduced by scaling a pane of `pane` size by `scale`.
#[must_use]
pub fn extra_extent(scale: f64, pane: Size) -> Vec2 {
    Vec2::new(
        (scale - 1.0) * pane.width / 2.0,
        (scale - 1.0) * pane.height / 2.0,
    )
}

/// Clamps `origin` so a pane of size `pane`, scaled by `scale`, does not
/// detach from the edges of a `container`-sized viewport.
///
/// Only the container height takes part; horizontally the origin is held
/// within the overhang.
///
/// Without a measured pane there is nothing to overhang and the origin
/// collapses to `(0, 0)`. The operation is idempotent.
#[must_use]
pub fn clamp_origin(origin: Point, scale: f64, pane: Option<Size>, container: Size) -> Point {
    let Some(pane) = pane else {
        return Point::ORIGIN;
    };
    let extra = extra_extent(scale, pane);
    Point::new(
        origin.x.max(-extra.x).min(extra.x),
        clamp_vertical(origin.y, scale * pane.height, extra.y, container.height),
    )
}

fn clamp_vertical(value: f64, scaled: f64, extra: f64, container: f64) -> f64 {
    let lower = container - scaled + extra;
    let upper = extra;
    // Not `f64::clamp`: that panics when `lower > upper`, which happens for
    // panes smaller than the container.
    value.max(lower).min(upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANE: Size = Size::new(400.0, 800.0);
    const CONTAINER: Size = Size::new(400.0, 600.0);

    #[test]
    fn unit_scale_pins_horizontally() {
        let p = clamp_origin(Point::new(35.0, 0.0), 1.0, Some(PANE), CONTAINER);
        assert_eq!(p.x, 0.0);
        let p = clamp_origin(Point::new(-35.0, 0.0), 1.0, Some(PANE), CONTAINER);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn unit_scale_allows_vertical_scroll_of_tall_pane() {
        // 800 tall pane in a 600 tall container: top in [-200, 0].
        let p = clamp_origin(Point::new(0.0, -150.0), 1.0, Some(PANE), CONTAINER);
        assert_eq!(p.y, -150.0);
        let p = clamp_origin(Point::new(0.0, -500.0), 1.0, Some(PANE), CONTAINER);
        assert_eq!(p.y, -200.0);
        let p = clamp_origin(Point::new(0.0, 50.0), 1.0, Some(PANE), CONTAINER);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn scale_two_allows_extra_extent_each_side() {
        // Width 400 at scale 2: extra 200, left in [-200, 200].
        let p = clamp_origin(Point::new(500.0, 0.0), 2.0, Some(PANE), CONTAINER);
        assert_eq!(p.x, 200.0);
        let p = clamp_origin(Point::new(-500.0, 0.0), 2.0, Some(PANE), CONTAINER);
        assert_eq!(p.x, -200.0);
        let p = clamp_origin(Point::new(120.0, 0.0), 2.0, Some(PANE), CONTAINER);
        assert_eq!(p.x, 120.0);
    }

    #[test]
    fn wide_pane_does_not_scroll_sideways_at_unit_scale() {
        let wide = Size::new(800.0, 600.0);
        let p = clamp_origin(Point::new(-300.0, 0.0), 1.0, Some(wide), CONTAINER);
        assert_eq!(p.x, 0.0);
        // At scale 2 only the 400 overhang per side is reachable.
        let p = clamp_origin(Point::new(-900.0, 0.0), 2.0, Some(wide), CONTAINER);
        assert_eq!(p.x, -400.0);
        let p = clamp_origin(Point::new(900.0, 0.0), 2.0, Some(wide), CONTAINER);
        assert_eq!(p.x, 400.0);
    }

    #[test]
    fn small_pane_sticks_to_top() {
        let pane = Size::new(400.0, 300.0);
        let p = clamp_origin(Point::new(0.0, 80.0), 1.0, Some(pane), CONTAINER);
        assert_eq!(p.y, 0.0);
        let p = clamp_origin(Point::new(0.0, -80.0), 1.0, Some(pane), CONTAINER);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn unknown_pane_collapses_to_origin() {
        let p = clamp_origin(Point::new(12.0, 34.0), 2.0, None, CONTAINER);
        assert_eq!(p, Point::ORIGIN);
    }

    #[test]
    fn extra_extent_is_half_growth() {
        assert_eq!(extra_extent(3.0, Size::new(10.0, 20.0)), Vec2::new(10.0, 20.0));
        assert_eq!(extra_extent(1.0, Size::new(10.0, 20.0)), Vec2::ZERO);
    }
}
