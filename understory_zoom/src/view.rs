// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::VecDeque;

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;
use tracing::{debug, trace};
use understory_gesture::{
    GestureAccumulator, GestureConfig, GestureEvent, GestureEvents, Scalable, TouchEvent,
    Transform,
};

use crate::bounds::{clamp_origin, extra_extent};
use crate::command::ZoomCommand;
use crate::config::{ConfigError, FlingConfig, ZoomConfig, ZoomLimits};
use crate::fling::{FlingId, FlingRequest, FlingTracker, VelocitySampler};
use crate::ladder::ZoomLadder;
use crate::tap::{TapOutcome, TapTracker};

bitflags::bitflags! {
    /// Work deferred until the pane layout is known.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct PendingWork: u8 {
        const RECLAMP = 0b01;
        const RESET   = 0b10;
    }
}

/// Something the host should act on after a [`ZoomView`] step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomOutput {
    /// A gesture lifecycle event; dispatch it to a listener if desired.
    Gesture(GestureEvent),
    /// The transform changed; apply it to the pane.
    Transform(Transform),
    /// Start the decay primitive and report frames back with the request id.
    StartFling(FlingRequest),
    /// Stop the decay primitive running for this id.
    CancelFling(FlingId),
}

/// Outputs of one step, in the order they were produced.
pub type ZoomOutputs = SmallVec<[ZoomOutput; 8]>;

/// Pinch-to-zoom policy over a [`GestureAccumulator`].
///
/// `ZoomView` owns the accumulator (configured without rotation and with the
/// zoom range as its scale range) and adds:
/// - Border clamping of the pane against the container.
/// - Double-tap cycling through a [`ZoomLadder`], centred on the tap.
/// - Fling inertia after a fast release.
/// - Deferred re-clamping and orientation resets until the pane is measured.
///
/// Every input returns the [`ZoomOutput`]s it produced. Inputs may also be
/// queued as [`ZoomCommand`]s and processed in order with
/// [`ZoomView::process`].
#[derive(Clone, Debug)]
pub struct ZoomView {
    limits: ZoomLimits,
    fling_config: FlingConfig,
    accumulator: GestureAccumulator,
    container: Option<Rect>,
    pane: Option<Size>,
    taps: TapTracker,
    velocity: VelocitySampler,
    fling: FlingTracker,
    cooldown: Option<u64>,
    pending: PendingWork,
    queue: VecDeque<ZoomCommand>,
}

impl ZoomView {
    /// Creates a view at the minimum zoom with its origin at `(0, 0)`.
    pub fn new(config: ZoomConfig) -> Result<Self, ConfigError> {
        let limits = config.validate()?;
        let gesture = GestureConfig::default()
            .with_draggable(config.draggable)
            .with_rotatable(false)
            .with_scalable(Scalable::Range {
                min: limits.min,
                max: limits.max,
            })
            .with_sensitivity(config.sensitivity);
        let accumulator =
            GestureAccumulator::with_transform(gesture, Transform::IDENTITY.with_scale(limits.min));
        Ok(Self {
            taps: TapTracker::new(config.double_tap, limits.double_tap_enabled),
            velocity: VelocitySampler::new(config.fling.sample_interval_ms),
            fling_config: config.fling,
            limits,
            accumulator,
            container: None,
            pane: None,
            fling: FlingTracker::new(),
            cooldown: None,
            pending: PendingWork::empty(),
            queue: VecDeque::new(),
        })
    }

    /// Returns the current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.accumulator.transform()
    }

    /// Returns the effective zoom limits.
    #[must_use]
    pub fn limits(&self) -> &ZoomLimits {
        &self.limits
    }

    /// Returns the double-tap zoom ladder.
    #[must_use]
    pub fn ladder(&self) -> &ZoomLadder {
        &self.limits.ladder
    }

    /// Returns the container rect in page coordinates, once known.
    #[must_use]
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// Returns the measured pane size, once known.
    #[must_use]
    pub fn pane_layout(&self) -> Option<Size> {
        self.pane
    }

    /// Returns the id of the running fling, if any.
    #[must_use]
    pub fn active_fling(&self) -> Option<FlingId> {
        self.fling.active()
    }

    /// Returns `true` while fingers are down.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.accumulator.is_active()
    }

    /// Handles the first finger going down.
    ///
    /// Any running fling is cancelled before anything else changes.
    pub fn touch_start(&mut self, event: &TouchEvent) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        self.cancel_fling(&mut out);
        self.velocity.start(event.position, event.timestamp);
        let events = self.accumulator.begin(event);
        push_gestures(&mut out, &events);
        out.push(ZoomOutput::Transform(self.transform()));
        out
    }

    /// Handles a move sample.
    pub fn touch_move(&mut self, event: &TouchEvent) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        if !self.accumulator.is_active() {
            return out;
        }
        let events = self.accumulator.update(event);
        push_gestures(&mut out, &events);
        self.clamp();
        self.velocity.sample(event.position, event.timestamp);
        out.push(ZoomOutput::Transform(self.transform()));
        out
    }

    /// Handles a finger lifting.
    ///
    /// If fingers remain, the gesture re-grabs the remaining touches and the
    /// fling cool-down starts. On the final release the gesture ends and the
    /// release is classified as a double tap, a fling, or neither.
    pub fn touch_end(&mut self, event: &TouchEvent) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        if !self.accumulator.is_active() {
            return out;
        }

        if !event.touches.is_empty() {
            self.cooldown = Some(event.timestamp);
            let events = self.accumulator.update(event);
            push_gestures(&mut out, &events);
            self.clamp();
            out.push(ZoomOutput::Transform(self.transform()));
            return out;
        }

        let events = self.accumulator.end(event);
        push_gestures(&mut out, &events);
        self.clamp();

        let Some(container) = self.container else {
            out.push(ZoomOutput::Transform(self.transform()));
            return out;
        };

        let outcome = self.taps.on_release(
            event.position,
            event.timestamp,
            self.velocity.start_position(),
        );
        if let TapOutcome::DoubleTap(position) = outcome {
            self.double_tap(position, container);
            out.push(ZoomOutput::Transform(self.transform()));
            return out;
        }

        out.push(ZoomOutput::Transform(self.transform()));
        if let Some(request) = self.try_fling(event) {
            out.push(ZoomOutput::StartFling(request));
        }
        out
    }

    /// Applies a frame of fling `id` reporting the animated origin `value`.
    ///
    /// Frames of cancelled flings are ignored, as are frames in which only
    /// one axis has moved since the last applied frame.
    pub fn fling_frame(&mut self, id: FlingId, value: Point) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        let current = self.transform().origin();
        if let Some(origin) = self.fling.frame(id, value, current) {
            self.accumulator.set_origin(origin);
            self.clamp();
            out.push(ZoomOutput::Transform(self.transform()));
        }
        out
    }

    /// Finishes fling `id` at its resting origin `value`.
    pub fn fling_settled(&mut self, id: FlingId, value: Point) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        let current = self.transform().origin();
        if let Some(origin) = self.fling.settle(id, value, current) {
            self.accumulator.set_origin(origin);
            self.clamp();
            out.push(ZoomOutput::Transform(self.transform()));
        }
        out
    }

    /// Sets the container rect in page coordinates.
    ///
    /// When the pane is measured the origin is re-clamped immediately;
    /// otherwise re-clamping waits for [`set_pane_layout`](Self::set_pane_layout).
    pub fn set_container(&mut self, container: Rect) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        if self.container == Some(container) {
            return out;
        }
        self.container = Some(container);
        if self.pane.is_some() {
            self.clamp();
            out.push(ZoomOutput::Transform(self.transform()));
        } else {
            debug!("container changed before pane layout; deferring re-clamp");
            self.pending.insert(PendingWork::RECLAMP);
        }
        out
    }

    /// Records the measured pane size and runs any deferred work.
    pub fn set_pane_layout(&mut self, pane: Size) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        self.pane = Some(pane);
        let pending = core::mem::take(&mut self.pending);
        if pending.is_empty() {
            return out;
        }
        debug!(?pending, "pane measured; running deferred work");
        if pending.contains(PendingWork::RESET) {
            self.reset(&mut out);
        } else if pending.contains(PendingWork::RECLAMP) {
            self.clamp();
            out.push(ZoomOutput::Transform(self.transform()));
        }
        out
    }

    /// Resets to the minimum zoom at origin `(0, 0)`, cancelling any fling.
    ///
    /// Used when the device orientation changes. Deferred until the pane is
    /// measured.
    pub fn reset_orientation(&mut self) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        if self.pane.is_some() {
            self.reset(&mut out);
        } else {
            self.pending.insert(PendingWork::RESET);
        }
        out
    }

    /// Clamps the origin against the container now.
    ///
    /// This runs automatically after every input; hosts only need it after
    /// changing the transform by other means. Without a container or pane
    /// layout nothing happens.
    pub fn adjust_border_zoom(&mut self) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        if self.container.is_some() && self.pane.is_some() {
            self.clamp();
            out.push(ZoomOutput::Transform(self.transform()));
        }
        out
    }

    /// Queues a command for [`process`](Self::process).
    pub fn submit(&mut self, command: ZoomCommand) {
        self.queue.push_back(command);
    }

    /// Number of queued commands.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Runs every queued command in submission order, returning all outputs.
    pub fn process(&mut self) -> ZoomOutputs {
        let mut out = ZoomOutputs::new();
        while let Some(command) = self.queue.pop_front() {
            out.extend(self.apply(command));
        }
        out
    }

    /// Runs one command immediately.
    pub fn apply(&mut self, command: ZoomCommand) -> ZoomOutputs {
        match command {
            ZoomCommand::TouchStart(event) => self.touch_start(&event),
            ZoomCommand::TouchMove(event) => self.touch_move(&event),
            ZoomCommand::TouchEnd(event) => self.touch_end(&event),
            ZoomCommand::FlingFrame { id, value } => self.fling_frame(id, value),
            ZoomCommand::FlingSettled { id, value } => self.fling_settled(id, value),
            ZoomCommand::ContainerChanged(rect) => self.set_container(rect),
            ZoomCommand::PaneMeasured(size) => self.set_pane_layout(size),
            ZoomCommand::OrientationChanged => self.reset_orientation(),
        }
    }

    /// Clamps the origin against the container if both sizes are known.
    fn clamp(&mut self) {
        let (Some(container), Some(_)) = (self.container, self.pane) else {
            return;
        };
        let t = self.transform();
        let clamped = clamp_origin(t.origin(), t.scale, self.pane, container.size());
        if clamped != t.origin() {
            trace!(from = ?t.origin(), to = ?clamped, scale = t.scale, "clamped origin");
            self.accumulator.set_origin(clamped);
        }
    }

    fn cancel_fling(&mut self, out: &mut ZoomOutputs) {
        if let Some(id) = self.fling.cancel() {
            debug!(?id, "fling cancelled");
            out.push(ZoomOutput::CancelFling(id));
        }
    }

    fn reset(&mut self, out: &mut ZoomOutputs) {
        debug!("resetting view for orientation change");
        self.cancel_fling(out);
        self.accumulator
            .set_transform(Transform::new(Point::ORIGIN, self.limits.min));
        self.clamp();
        out.push(ZoomOutput::Transform(self.transform()));
    }

    /// Zooms to the next ladder stop, moving the content under the tap to
    /// the container centre.
    fn double_tap(&mut self, position: Point, container: Rect) {
        let current = self.transform();
        let scale = current.scale;
        let target = self.limits.ladder.next_after(scale);

        let extra = |s: f64| self.pane.map_or(Vec2::ZERO, |p| extra_extent(s, p));
        let tap = position - container.origin();
        let center = Vec2::new(container.width() / 2.0, container.height() / 2.0);

        let content = (current.origin().to_vec2() - extra(scale) - tap) / scale;
        let origin = content * target + extra(target) + center;

        debug!(from = scale, to = target, ?position, "double tap zoom");
        self.accumulator.set_transform(Transform {
            left: origin.x,
            top: origin.y,
            scale: target,
            ..current
        });
        self.clamp();
    }

    fn try_fling(&mut self, event: &TouchEvent) -> Option<FlingRequest> {
        if let Some(at) = self.cooldown.take()
            && event.timestamp.saturating_sub(at) < self.fling_config.cooldown_ms
        {
            return None;
        }
        if self.velocity.travel(event.position) <= self.fling_config.drag_threshold {
            return None;
        }
        let velocity = self
            .velocity
            .release_velocity(event.position, event.timestamp)?;
        let request = self.fling.start(
            self.transform().origin(),
            velocity,
            self.fling_config.decay_constant,
        );
        debug!(id = ?request.id, ?velocity, "fling started");
        Some(request)
    }
}

fn push_gestures(out: &mut ZoomOutputs, events: &GestureEvents) {
    out.extend(events.iter().copied().map(ZoomOutput::Gesture));
}
