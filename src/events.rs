use crate::seekbar::{Point, PointerId};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A touch sample, already translated so that `position` is relative to the ring center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub position: Point,
}

impl TouchEvent {
    pub fn new(action: TouchAction, position: Point) -> Self {
        Self { action, position }
    }

    pub fn at_angle(action: TouchAction, angle: f64, radius: f64) -> Self {
        Self::new(action, Point::from_polar(angle, radius))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekBarEvent {
    StartTracking {
        pointer: PointerId,
    },
    ProgressChanged {
        pointer: PointerId,
        progress: i32,
        relative: i32,
        from_user: bool,
    },
    StopTracking {
        pointer: PointerId,
    },
}

impl SeekBarEvent {
    pub fn pointer(&self) -> PointerId {
        match *self {
            Self::StartTracking { pointer }
            | Self::ProgressChanged { pointer, .. }
            | Self::StopTracking { pointer } => pointer,
        }
    }

    pub fn dispatch<L: SeekBarListener + ?Sized>(&self, listener: &mut L) {
        match *self {
            Self::StartTracking { pointer } => listener.on_start_tracking_touch(pointer),
            Self::ProgressChanged {
                pointer,
                progress,
                relative,
                from_user,
            } => listener.on_progress_changed(pointer, progress, relative, from_user),
            Self::StopTracking { pointer } => listener.on_stop_tracking_touch(pointer),
        }
    }
}

/// Callback-style consumer of [`SeekBarEvent`]s. Every method defaults to doing nothing.
pub trait SeekBarListener {
    fn on_progress_changed(
        &mut self,
        _pointer: PointerId,
        _progress: i32,
        _relative: i32,
        _from_user: bool,
    ) {
    }

    fn on_start_tracking_touch(&mut self, _pointer: PointerId) {}

    fn on_stop_tracking_touch(&mut self, _pointer: PointerId) {}
}

/// Result of feeding one touch event to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchOutcome {
    /// False lets the host hand the gesture to someone else.
    pub consumed: bool,
    pub should_redraw: bool,
    pub events: Vec<SeekBarEvent>,
}

impl TouchOutcome {
    pub fn new(consumed: bool, events: Vec<SeekBarEvent>) -> Self {
        Self {
            consumed,
            should_redraw: consumed || !events.is_empty(),
            events,
        }
    }

    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn dispatch<L: SeekBarListener + ?Sized>(&self, listener: &mut L) {
        self.events.iter().for_each(|e| e.dispatch(listener));
    }
}
