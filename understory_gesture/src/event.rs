// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture lifecycle events and the listener trait they dispatch to.
//!
//! The accumulator reports what happened as a list of [`GestureEvent`]s rather
//! than calling back directly. Hosts that prefer callbacks implement
//! [`GestureListener`], overriding only the methods they care about, and route
//! each event through [`GestureEvent::dispatch`].

use smallvec::SmallVec;

use crate::touch::TouchEvent;
use crate::transform::Transform;

/// Which aspect of the gesture an event is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// The gesture session as a whole.
    Gesture,
    /// Two or more fingers on the surface.
    MultiTouch,
    /// Two-finger rotation.
    Rotate,
    /// Two-finger pinch scaling.
    Scale,
}

/// Lifecycle phase of a [`GestureKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// First sample on which the condition held.
    Start,
    /// Any later sample while the condition holds.
    Change,
    /// The session ended while the condition was active.
    End,
}

/// A lifecycle event with the transform in effect when it was raised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    /// What the event is about.
    pub kind: GestureKind,
    /// Where in its lifecycle it is.
    pub phase: GesturePhase,
    /// Transform snapshot at the time of the event.
    pub transform: Transform,
}

/// Events produced by one accumulator step; rarely more than a handful.
pub type GestureEvents = SmallVec<[GestureEvent; 4]>;

impl GestureEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(kind: GestureKind, phase: GesturePhase, transform: Transform) -> Self {
        Self {
            kind,
            phase,
            transform,
        }
    }

    /// Returns `true` if this event has the given kind and phase.
    #[must_use]
    pub fn is(&self, kind: GestureKind, phase: GesturePhase) -> bool {
        self.kind == kind && self.phase == phase
    }

    /// Calls the listener method matching this event's kind and phase.
    pub fn dispatch<L: GestureListener + ?Sized>(&self, touch: &TouchEvent, listener: &mut L) {
        use GestureKind as K;
        use GesturePhase as P;
        let t = &self.transform;
        match (self.kind, self.phase) {
            (K::Gesture, P::Start) => listener.on_start(touch, t),
            (K::Gesture, P::Change) => listener.on_change(touch, t),
            (K::Gesture, P::End) => listener.on_end(touch, t),
            (K::MultiTouch, P::Start) => listener.on_multi_touch_start(touch, t),
            (K::MultiTouch, P::Change) => listener.on_multi_touch_change(touch, t),
            (K::MultiTouch, P::End) => listener.on_multi_touch_end(touch, t),
            (K::Rotate, P::Start) => listener.on_rotate_start(touch, t),
            (K::Rotate, P::Change) => listener.on_rotate_change(touch, t),
            (K::Rotate, P::End) => listener.on_rotate_end(touch, t),
            (K::Scale, P::Start) => listener.on_scale_start(touch, t),
            (K::Scale, P::Change) => listener.on_scale_change(touch, t),
            (K::Scale, P::End) => listener.on_scale_end(touch, t),
        }
    }
}

/// Optional gesture callbacks. Every method defaults to a no-op.
#[expect(unused_variables, reason = "default implementations ignore their inputs")]
pub trait GestureListener {
    /// A gesture session began.
    fn on_start(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// A sample was processed during a session.
    fn on_change(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// The session ended.
    fn on_end(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// Two or more fingers touched for the first time this session.
    fn on_multi_touch_start(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// A sample was processed while multi-touching.
    fn on_multi_touch_change(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// The session ended after multi-touching.
    fn on_multi_touch_end(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// The first rotation sample of the session.
    fn on_rotate_start(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// A later rotation sample.
    fn on_rotate_change(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// The session ended after rotating.
    fn on_rotate_end(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// The first scale sample of the session.
    fn on_scale_start(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// A later scale sample.
    fn on_scale_change(&mut self, event: &TouchEvent, transform: &Transform) {}
    /// The session ended after scaling.
    fn on_scale_end(&mut self, event: &TouchEvent, transform: &Transform) {}
}
