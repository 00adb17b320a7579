// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use understory_gesture::TouchEvent;

use crate::fling::FlingId;

/// One input to a [`ZoomView`](crate::ZoomView).
///
/// Hosts that receive touch, layout and animation callbacks on different
/// paths can queue them with [`ZoomView::submit`](crate::ZoomView::submit)
/// and run them in arrival order with [`ZoomView::process`](crate::ZoomView::process).
#[derive(Clone, Debug, PartialEq)]
pub enum ZoomCommand {
    /// First finger down.
    TouchStart(TouchEvent),
    /// Move sample.
    TouchMove(TouchEvent),
    /// A finger lifted; `touches` holds the fingers still down.
    TouchEnd(TouchEvent),
    /// Animated origin for a running fling.
    FlingFrame {
        /// Fling the frame belongs to.
        id: FlingId,
        /// Animated origin.
        value: Point,
    },
    /// Resting origin for a finished fling.
    FlingSettled {
        /// Fling that finished.
        id: FlingId,
        /// Final origin.
        value: Point,
    },
    /// The container was measured or moved (page coordinates).
    ContainerChanged(Rect),
    /// The pane was laid out.
    PaneMeasured(Size),
    /// The device orientation changed.
    OrientationChanged,
}
