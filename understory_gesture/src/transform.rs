// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};

/// Position, rotation and scale applied to a gesture target.
///
/// `left`/`top` are the layout offset of the target. Rotation and scale are
/// applied about the target's centre, matching how mobile style transforms
/// compose, so scaling by `s` grows a pane of width `w` by `(s - 1) * w / 2`
/// on each side without moving `left`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Horizontal offset.
    pub left: f64,
    /// Vertical offset.
    pub top: f64,
    /// Clockwise rotation in degrees.
    pub rotation_degrees: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No offset, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        left: 0.0,
        top: 0.0,
        rotation_degrees: 0.0,
        scale: 1.0,
    };

    /// Creates a transform with the given origin and scale and no rotation.
    #[must_use]
    pub fn new(origin: Point, scale: f64) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            rotation_degrees: 0.0,
            scale,
        }
    }

    /// Returns `(left, top)` as a point.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Returns a copy with `left`/`top` replaced.
    #[must_use]
    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            ..self
        }
    }

    /// Returns a copy with `scale` replaced.
    #[must_use]
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.rotation_degrees.is_finite()
            && self.scale.is_finite()
    }

    /// Builds the affine map from pane-local coordinates to the parent's
    /// coordinate space for a pane of the given size.
    ///
    /// The pane is offset by `(left, top)`, then rotated and scaled about its
    /// centre.
    #[must_use]
    pub fn to_affine(&self, pane: Size) -> Affine {
        let center = Vec2::new(pane.width / 2.0, pane.height / 2.0);
        Affine::translate(self.origin().to_vec2() + center)
            * Affine::rotate(self.rotation_degrees.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}
