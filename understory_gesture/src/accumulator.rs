// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform accumulator: turn a stream of touch samples into drag, pinch-scale
//! and rotate updates of a [`Transform`].
//!
//! ## Usage
//!
//! 1) Call [`GestureAccumulator::begin`] when the first finger goes down.
//! 2) Call [`GestureAccumulator::update`] for every move sample.
//! 3) Call [`GestureAccumulator::end`] when the last finger lifts.
//!
//! Each step returns the lifecycle [`GestureEvent`]s it raised. The current
//! transform is read with [`GestureAccumulator::transform`] and may be
//! rewritten between samples with [`GestureAccumulator::set_transform`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::{GestureAccumulator, GestureConfig, TouchEvent};
//!
//! let mut acc = GestureAccumulator::new(GestureConfig::default());
//!
//! acc.begin(&TouchEvent::single(Point::new(10.0, 10.0), 0));
//! acc.update(
//!     &TouchEvent::single(Point::new(40.0, 25.0), 16).with_gesture_delta(Vec2::new(30.0, 15.0)),
//! );
//! acc.end(&TouchEvent::release(Point::new(40.0, 25.0), 32));
//!
//! assert_eq!(acc.transform().left, 30.0);
//! assert_eq!(acc.transform().top, 15.0);
//! ```

use kurbo::Point;
use tracing::trace;

use crate::config::GestureConfig;
use crate::event::{GestureEvent, GestureEvents, GestureKind, GesturePhase};
use crate::math::{angle, angle_delta, distance};
use crate::touch::{TouchEvent, TouchSnapshot};
use crate::transform::Transform;

bitflags::bitflags! {
    /// Conditions that became true during the current session.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureFlags: u8 {
        /// Two or more fingers were seen.
        const MULTI_TOUCHING = 0b0000_0001;
        /// A rotation sample was applied.
        const ROTATING       = 0b0000_0010;
        /// A scale sample was applied.
        const SCALING        = 0b0000_0100;
    }
}

/// State of one touch-down to touch-up cycle.
#[derive(Clone, Debug)]
struct GestureSession {
    initial_touches: TouchSnapshot,
    baseline: Transform,
    prev_angle: f64,
    prev_distance: f64,
    flags: GestureFlags,
}

impl GestureSession {
    fn new(touches: TouchSnapshot, baseline: Transform) -> Self {
        Self {
            initial_touches: touches,
            baseline,
            prev_angle: 0.0,
            prev_distance: 0.0,
            flags: GestureFlags::empty(),
        }
    }

    fn regrab(&mut self, touches: TouchSnapshot) {
        self.initial_touches = touches;
        self.prev_angle = 0.0;
        self.prev_distance = 0.0;
    }
}

/// Converts touch samples into transform updates for one gesture target.
///
/// The accumulator is the single owner of the target's [`Transform`]. Policy
/// layers read it through [`transform`](Self::transform) and write it back
/// through [`set_transform`](Self::set_transform), which keeps the scale range
/// invariant enforced here.
#[derive(Clone, Debug)]
pub struct GestureAccumulator {
    config: GestureConfig,
    transform: Transform,
    session: Option<GestureSession>,
    last_baseline: Transform,
}

impl GestureAccumulator {
    /// Creates an idle accumulator with the identity transform (scale clamped
    /// into the configured range).
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self::with_transform(config, Transform::IDENTITY)
    }

    /// Creates an idle accumulator starting from `transform`.
    #[must_use]
    pub fn with_transform(config: GestureConfig, transform: Transform) -> Self {
        let transform = transform.with_scale(config.scalable.clamp(transform.scale));
        Self {
            config,
            transform,
            session: None,
            last_baseline: transform,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns the current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Replaces the current transform.
    ///
    /// The scale is clamped into the configured range. Non-finite transforms
    /// are ignored.
    pub fn set_transform(&mut self, transform: Transform) {
        if !transform.is_finite() {
            return;
        }
        self.transform = transform.with_scale(self.config.scalable.clamp(transform.scale));
    }

    /// Replaces `left`/`top` only.
    pub fn set_origin(&mut self, origin: Point) {
        self.set_transform(self.transform.with_origin(origin));
    }

    /// Replaces the scale only (clamped into the configured range).
    pub fn set_scale(&mut self, scale: f64) {
        self.set_transform(self.transform.with_scale(scale));
    }

    /// Returns `true` between [`begin`](Self::begin) and [`end`](Self::end).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the conditions raised so far in the active session.
    #[must_use]
    pub fn flags(&self) -> GestureFlags {
        self.session
            .as_ref()
            .map_or(GestureFlags::empty(), |s| s.flags)
    }

    /// Returns the transform recorded when the active session began.
    #[must_use]
    pub fn baseline(&self) -> Option<Transform> {
        self.session.as_ref().map(|s| s.baseline)
    }

    /// Starts a session from the event's touches and the current transform.
    ///
    /// An already active session is discarded without end events.
    pub fn begin(&mut self, event: &TouchEvent) -> GestureEvents {
        let mut session = GestureSession::new(event.touches.clone(), self.transform);
        self.last_baseline = self.transform;

        let mut events = GestureEvents::new();
        events.push(self.event(GestureKind::Gesture, GesturePhase::Start));
        if event.touches.is_multi_touch() {
            session.flags.insert(GestureFlags::MULTI_TOUCHING);
            events.push(self.event(GestureKind::MultiTouch, GesturePhase::Start));
        }
        self.session = Some(session);
        events
    }

    /// Applies one move sample.
    ///
    /// If the number of fingers differs from the session's initial snapshot,
    /// the snapshot is re-grabbed and the sample is not applied. Outside a
    /// session this is a no-op.
    pub fn update(&mut self, event: &TouchEvent) -> GestureEvents {
        let mut events = GestureEvents::new();
        let Some(mut session) = self.session.take() else {
            return events;
        };

        let touches = &event.touches;
        if touches.touch_count() != session.initial_touches.touch_count() {
            trace!(
                from = session.initial_touches.touch_count(),
                to = touches.touch_count(),
                "finger count changed, re-grabbing"
            );
            session.regrab(touches.clone());
        } else {
            self.drag(&session, event);
            if touches.is_multi_touch() {
                self.scale(&mut session, touches, &mut events);
                self.rotate(&mut session, touches, &mut events);
            }
        }

        if touches.is_multi_touch() && !session.flags.contains(GestureFlags::MULTI_TOUCHING) {
            session.flags.insert(GestureFlags::MULTI_TOUCHING);
            events.push(self.event(GestureKind::MultiTouch, GesturePhase::Start));
        } else if session.flags.contains(GestureFlags::MULTI_TOUCHING) {
            events.push(self.event(GestureKind::MultiTouch, GesturePhase::Change));
        }
        events.push(self.event(GestureKind::Gesture, GesturePhase::Change));

        self.session = Some(session);
        events
    }

    /// Ends the session, reporting end events for every condition raised.
    ///
    /// Outside a session this is a no-op.
    pub fn end(&mut self, _event: &TouchEvent) -> GestureEvents {
        let mut events = GestureEvents::new();
        let Some(session) = self.session.take() else {
            return events;
        };

        events.push(self.event(GestureKind::Gesture, GesturePhase::End));
        if session.flags.contains(GestureFlags::ROTATING) {
            events.push(self.event(GestureKind::Rotate, GesturePhase::End));
        }
        if session.flags.contains(GestureFlags::SCALING) {
            events.push(self.event(GestureKind::Scale, GesturePhase::End));
        }
        if session.flags.contains(GestureFlags::MULTI_TOUCHING) {
            events.push(self.event(GestureKind::MultiTouch, GesturePhase::End));
        }
        events
    }

    /// Restores the transform recorded when the current or most recent
    /// session began, returning it.
    pub fn reset_to_baseline(&mut self) -> Transform {
        let baseline = self.baseline().unwrap_or(self.last_baseline);
        self.set_transform(baseline);
        self.transform
    }

    fn event(&self, kind: GestureKind, phase: GesturePhase) -> GestureEvent {
        GestureEvent::new(kind, phase, self.transform)
    }

    fn drag(&mut self, session: &GestureSession, event: &TouchEvent) {
        let draggable = self.config.draggable;
        let base = session.baseline;
        let delta = event.gesture_delta;
        let left = if draggable.x { base.left + delta.x } else { base.left };
        let top = if draggable.y { base.top + delta.y } else { base.top };
        if left.is_finite() && top.is_finite() {
            self.transform.left = left;
            self.transform.top = top;
        }
    }

    fn scale(&mut self, session: &mut GestureSession, touches: &[Point], events: &mut GestureEvents) {
        if !self.config.scalable.is_enabled() {
            return;
        }
        let current = distance(touches).unwrap_or(0.0);
        let initial = distance(&session.initial_touches).unwrap_or(0.0);
        let increased = current - initial;
        let diff = session.prev_distance - increased;
        let scale = self
            .config
            .scalable
            .clamp(self.transform.scale - diff / self.config.sensitivity);
        if !scale.is_finite() {
            return;
        }
        self.transform.scale = scale;
        session.prev_distance = increased;

        let phase = Self::raise(session, GestureFlags::SCALING);
        events.push(self.event(GestureKind::Scale, phase));
    }

    fn rotate(&mut self, session: &mut GestureSession, touches: &[Point], events: &mut GestureEvents) {
        if !self.config.rotatable {
            return;
        }
        let current = angle(touches);
        let initial = if session.initial_touches.is_multi_touch() {
            angle(&session.initial_touches)
        } else {
            current
        };
        let new_angle = current - initial;
        let diff = angle_delta(session.prev_angle, new_angle);
        let rotation = self.transform.rotation_degrees - diff;
        if !rotation.is_finite() {
            return;
        }
        self.transform.rotation_degrees = rotation;
        session.prev_angle = new_angle;

        let phase = Self::raise(session, GestureFlags::ROTATING);
        events.push(self.event(GestureKind::Rotate, phase));
    }

    /// Sets `flag`, returning `Start` if it was not yet set and `Change` otherwise.
    fn raise(session: &mut GestureSession, flag: GestureFlags) -> GesturePhase {
        if session.flags.contains(flag) {
            GesturePhase::Change
        } else {
            session.flags.insert(flag);
            GesturePhase::Start
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Vec2;

    use super::*;
    use crate::config::{Draggable, Scalable};

    fn two(a: (f64, f64), b: (f64, f64), t: u64) -> TouchEvent {
        TouchEvent::new(
            TouchSnapshot::from_points([Point::new(a.0, a.1), Point::new(b.0, b.1)]),
            t,
        )
    }

    fn kinds(events: &GestureEvents) -> Vec<(GestureKind, GesturePhase)> {
        events.iter().map(|e| (e.kind, e.phase)).collect()
    }

    #[test]
    fn new_accumulator_is_idle() {
        let acc = GestureAccumulator::new(GestureConfig::default());
        assert!(!acc.is_active());
        assert_eq!(acc.transform(), Transform::IDENTITY);
        assert_eq!(acc.flags(), GestureFlags::empty());
        assert_eq!(acc.baseline(), None);
    }

    #[test]
    fn single_finger_begin_emits_start_only() {
        let mut acc = GestureAccumulator::new(GestureConfig::default());
        let events = acc.begin(&TouchEvent::single(Point::new(1.0, 1.0), 0));
        assert_eq!(kinds(&events), [(GestureKind::Gesture, GesturePhase::Start)]);
        assert!(acc.is_active());
    }

    #[test]
    fn drag_respects_axis_gating() {
        let cfg = GestureConfig::default().with_draggable(Draggable { x: true, y: false });
        let start = Transform::new(Point::new(5.0, 7.0), 1.0);
        let mut acc = GestureAccumulator::with_transform(cfg, start);

        acc.begin(&TouchEvent::single(Point::new(0.0, 0.0), 0));
        acc.update(
            &TouchEvent::single(Point::new(50.0, 30.0), 10)
                .with_gesture_delta(Vec2::new(50.0, 30.0)),
        );

        assert_eq!(acc.transform().left, 55.0);
        assert_eq!(acc.transform().top, 7.0);
    }

    #[test]
    fn drag_is_relative_to_baseline_not_previous_sample() {
        let mut acc = GestureAccumulator::new(GestureConfig::default());
        acc.begin(&TouchEvent::single(Point::ORIGIN, 0));
        acc.update(&TouchEvent::single(Point::ORIGIN, 1).with_gesture_delta(Vec2::new(10.0, 0.0)));
        acc.update(&TouchEvent::single(Point::ORIGIN, 2).with_gesture_delta(Vec2::new(25.0, 0.0)));
        assert_eq!(acc.transform().left, 25.0);
    }

    #[test]
    fn pinch_widening_by_forty_adds_a_tenth() {
        let cfg = GestureConfig::default().with_rotatable(false);
        let mut acc = GestureAccumulator::new(cfg);

        acc.begin(&two((0.0, 0.0), (100.0, 0.0), 0));
        let events = acc.update(&two((0.0, 0.0), (140.0, 0.0), 16));

        assert!((acc.transform().scale - 1.1).abs() < 1e-12);
        assert_eq!(
            kinds(&events),
            [
                (GestureKind::Scale, GesturePhase::Start),
                (GestureKind::MultiTouch, GesturePhase::Change),
                (GestureKind::Gesture, GesturePhase::Change),
            ]
        );
    }

    #[test]
    fn pinch_accumulates_per_sample_deltas() {
        let cfg = GestureConfig::default()
            .with_rotatable(false)
            .with_scalable(Scalable::Range { min: 0.1, max: 10.0 });
        let mut acc = GestureAccumulator::new(cfg);

        acc.begin(&two((0.0, 0.0), (100.0, 0.0), 0));
        acc.update(&two((0.0, 0.0), (140.0, 0.0), 1));
        let events = acc.update(&two((0.0, 0.0), (180.0, 0.0), 2));

        // 80px total widening at 400px per unit.
        assert!((acc.transform().scale - 1.2).abs() < 1e-12);
        assert_eq!(events[0].kind, GestureKind::Scale);
        assert_eq!(events[0].phase, GesturePhase::Change);
    }

    #[test]
    fn scale_is_clamped_to_range() {
        let cfg = GestureConfig::default()
            .with_rotatable(false)
            .with_scalable(Scalable::Range { min: 1.0, max: 1.5 });
        let mut acc = GestureAccumulator::new(cfg);

        acc.begin(&two((0.0, 0.0), (10.0, 0.0), 0));
        acc.update(&two((0.0, 0.0), (2000.0, 0.0), 1));
        assert_eq!(acc.transform().scale, 1.5);

        acc.update(&two((0.0, 0.0), (10.0, 0.0), 2));
        acc.update(&two((0.0, 0.0), (0.0, 0.0), 3));
        assert_eq!(acc.transform().scale, 1.0);
    }

    #[test]
    fn disabled_scaling_leaves_scale_alone() {
        let cfg = GestureConfig::default()
            .with_rotatable(false)
            .with_scalable(false);
        let mut acc = GestureAccumulator::new(cfg);
        acc.begin(&two((0.0, 0.0), (100.0, 0.0), 0));
        let events = acc.update(&two((0.0, 0.0), (300.0, 0.0), 1));
        assert_eq!(acc.transform().scale, 1.0);
        assert!(events.iter().all(|e| e.kind != GestureKind::Scale));
    }

    #[test]
    fn rotation_follows_finger_twist() {
        let cfg = GestureConfig::default().with_scalable(false);
        let mut acc = GestureAccumulator::new(cfg);

        acc.begin(&two((0.0, 0.0), (10.0, 0.0), 0));
        let events = acc.update(&two((0.0, 0.0), (0.0, 10.0), 1));

        assert!((acc.transform().rotation_degrees - 90.0).abs() < 1e-9);
        assert!(events[0].is(GestureKind::Rotate, GesturePhase::Start));

        acc.update(&two((0.0, 0.0), (-10.0, 0.0), 2));
        assert!((acc.transform().rotation_degrees - 180.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_across_zero_degrees_does_not_jump() {
        let cfg = GestureConfig::default().with_scalable(false);
        let mut acc = GestureAccumulator::new(cfg);

        // Start just above 0 degrees, twist to just below 360.
        acc.begin(&two((0.0, 0.0), (100.0, 1.0), 0));
        acc.update(&two((0.0, 0.0), (100.0, -1.0), 1));

        let r = acc.transform().rotation_degrees;
        assert!(r.abs() < 2.0, "rotation jumped to {r}");
    }

    #[test]
    fn disabled_rotation_is_ignored() {
        let cfg = GestureConfig::default().with_rotatable(false).with_scalable(false);
        let mut acc = GestureAccumulator::new(cfg);
        acc.begin(&two((0.0, 0.0), (10.0, 0.0), 0));
        acc.update(&two((0.0, 0.0), (0.0, 10.0), 1));
        assert_eq!(acc.transform().rotation_degrees, 0.0);
    }

    #[test]
    fn finger_count_change_regrabs_without_applying() {
        let cfg = GestureConfig::default().with_rotatable(false);
        let mut acc = GestureAccumulator::new(cfg);

        acc.begin(&TouchEvent::single(Point::ORIGIN, 0));
        // Second finger arrives: re-grab, no scale change yet.
        let events = acc.update(&two((0.0, 0.0), (100.0, 0.0), 1));
        assert_eq!(acc.transform().scale, 1.0);
        assert_eq!(
            kinds(&events),
            [
                (GestureKind::MultiTouch, GesturePhase::Start),
                (GestureKind::Gesture, GesturePhase::Change),
            ]
        );

        // Pinch is now measured from the re-grabbed snapshot.
        acc.update(&two((0.0, 0.0), (140.0, 0.0), 2));
        assert!((acc.transform().scale - 1.1).abs() < 1e-12);
    }

    #[test]
    fn end_reports_every_raised_condition() {
        let mut acc = GestureAccumulator::new(GestureConfig::default());
        let begin = acc.begin(&two((0.0, 0.0), (100.0, 0.0), 0));
        assert_eq!(
            kinds(&begin),
            [
                (GestureKind::Gesture, GesturePhase::Start),
                (GestureKind::MultiTouch, GesturePhase::Start),
            ]
        );
        acc.update(&two((0.0, 0.0), (100.0, 20.0), 1));

        let events = acc.end(&TouchEvent::release(Point::ORIGIN, 2));
        assert_eq!(
            kinds(&events),
            [
                (GestureKind::Gesture, GesturePhase::End),
                (GestureKind::Rotate, GesturePhase::End),
                (GestureKind::Scale, GesturePhase::End),
                (GestureKind::MultiTouch, GesturePhase::End),
            ]
        );
        assert!(!acc.is_active());
    }

    #[test]
    fn idle_update_and_end_are_noops() {
        let mut acc = GestureAccumulator::new(GestureConfig::default());
        assert!(acc.update(&TouchEvent::default()).is_empty());
        assert!(acc.end(&TouchEvent::default()).is_empty());
        assert_eq!(acc.transform(), Transform::IDENTITY);
    }

    #[test]
    fn empty_snapshots_do_not_panic() {
        let mut acc = GestureAccumulator::new(GestureConfig::default());
        acc.begin(&TouchEvent::new(TouchSnapshot::new(), 0));
        acc.update(&TouchEvent::new(TouchSnapshot::new(), 1));
        acc.end(&TouchEvent::new(TouchSnapshot::new(), 2));
        assert!(acc.transform().is_finite());
    }

    #[test]
    fn set_transform_enforces_scale_range() {
        let mut acc = GestureAccumulator::new(GestureConfig::default());
        acc.set_scale(10.0);
        assert_eq!(acc.transform().scale, 2.0);
        acc.set_transform(Transform::IDENTITY.with_scale(f64::NAN));
        assert_eq!(acc.transform().scale, 2.0);
        acc.set_origin(Point::new(3.0, 4.0));
        assert_eq!(acc.transform().origin(), Point::new(3.0, 4.0));
    }

    #[test]
    fn reset_to_baseline_restores_session_start() {
        let mut acc = GestureAccumulator::with_transform(
            GestureConfig::default(),
            Transform::new(Point::new(1.0, 2.0), 1.0),
        );
        acc.begin(&TouchEvent::single(Point::ORIGIN, 0));
        acc.update(&TouchEvent::single(Point::ORIGIN, 1).with_gesture_delta(Vec2::new(9.0, 9.0)));
        acc.end(&TouchEvent::release(Point::ORIGIN, 2));
        assert_eq!(acc.transform().origin(), Point::new(10.0, 11.0));

        let restored = acc.reset_to_baseline();
        assert_eq!(restored.origin(), Point::new(1.0, 2.0));
    }
}
