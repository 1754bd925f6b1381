use super::arc::ArcModel;
use super::geometry::{Point, RingGeometry, cw_distance};
use super::pointer::{GangOverflow, Pointer, PointerId, PointerSet};
use super::style::{Color, PointerStyle, SeekBarStyle};
use super::{
    DEFAULT_LOCK_ENABLED, DEFAULT_MOVE_OUTSIDE_CIRCLE, HIT_TOLERANCE, LOCK_RELEASE_DEGREES,
    WRAP_JUMP_DEGREES,
};
use crate::events::{SeekBarEvent, TouchAction, TouchEvent, TouchOutcome};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// State of the touch sequence currently dragging a pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub pointer: PointerId,
    pub last_cw_from_start: f64,
    pub rotation: Rotation,
    pub lock_at_start: bool,
    pub lock_at_end: bool,
}

impl Gesture {
    fn grab(pointer: PointerId, sample: &TouchSample) -> Self {
        Self {
            pointer,
            last_cw_from_start: sample.cw_from_start,
            rotation: Rotation::Clockwise,
            lock_at_start: false,
            lock_at_end: false,
        }
    }

    /// Updates direction and the lock latches from a new sample.
    ///
    /// A jump of more than half a turn against the current direction is the touch wrapping
    /// through the seam, not a reversal.
    fn track(&mut self, sample: &TouchSample, total_sweep: f64) {
        let last = self.last_cw_from_start;
        let current = sample.cw_from_start;

        if current > last {
            if current - last > WRAP_JUMP_DEGREES && self.rotation == Rotation::CounterClockwise {
                self.lock_at_start = true;
                self.lock_at_end = false;
            } else {
                self.rotation = Rotation::Clockwise;
            }
        } else if current < last {
            if last - current > WRAP_JUMP_DEGREES && self.rotation == Rotation::Clockwise {
                self.lock_at_end = true;
                self.lock_at_start = false;
            } else {
                self.rotation = Rotation::CounterClockwise;
            }
        }

        let clockwise = self.rotation == Rotation::Clockwise;
        if self.lock_at_start && (clockwise || sample.ccw_from_start() > LOCK_RELEASE_DEGREES) {
            self.lock_at_start = false;
        }
        if self.lock_at_end && (!clockwise || sample.cw_from_end > LOCK_RELEASE_DEGREES) {
            self.lock_at_end = false;
        }

        // a fast swipe can leave the sweep without any sample landing near the end
        if !self.lock_at_end && clockwise && current > total_sweep && last < total_sweep {
            self.lock_at_end = true;
        }
    }
}

/// Public view of what the engine is doing with touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum DragState {
    Idle,
    Dragging(PointerId),
}

/// Touch position expressed against the arc.
#[derive(Debug, Clone, Copy)]
struct TouchSample {
    angle: f64,
    radius: f64,
    cw_from_start: f64,
    cw_from_end: f64,
}

impl TouchSample {
    fn new(arc: &ArcModel, position: Point) -> Self {
        let angle = position.angle();
        Self {
            angle,
            radius: position.radius(),
            cw_from_start: arc.cw_distance_from_start(angle),
            cw_from_end: arc.cw_distance_from_end(angle),
        }
    }

    fn ccw_from_start(&self) -> f64 {
        360.0 - self.cw_from_start
    }
}

/// Owns the arc, its pointers and the touch state machine.
///
/// Every mutation ends in [`InteractionEngine::recompute`], so pointer angles always match the
/// current progress, max and bounds. Events produced by setters queue up until
/// [`InteractionEngine::drain_events`]; touch handling returns them directly.
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    pub(crate) arc: ArcModel,
    pub(crate) pointers: PointerSet,
    pub(crate) geometry: RingGeometry,
    pub(crate) style: SeekBarStyle,
    pub(crate) gesture: Option<Gesture>,
    pub(crate) lock_enabled: bool,
    pub(crate) move_outside_circle: bool,
    pub(crate) touch_enabled: bool,
    pub(crate) gang_overflow: GangOverflow,
    pending: Vec<SeekBarEvent>,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new(ArcModel::default(), RingGeometry::default())
    }
}

impl InteractionEngine {
    pub fn new(arc: ArcModel, geometry: RingGeometry) -> Self {
        let mut engine = Self {
            arc,
            pointers: PointerSet::default(),
            geometry,
            style: SeekBarStyle::default(),
            gesture: None,
            lock_enabled: DEFAULT_LOCK_ENABLED,
            move_outside_circle: DEFAULT_MOVE_OUTSIDE_CIRCLE,
            touch_enabled: true,
            gang_overflow: GangOverflow::default(),
            pending: Vec::new(),
        };
        engine.recompute();
        engine
    }

    pub fn arc(&self) -> &ArcModel {
        &self.arc
    }

    pub fn pointers(&self) -> &PointerSet {
        &self.pointers
    }

    pub fn pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.get(id)
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &SeekBarStyle {
        &self.style
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        self.gesture
            .map_or(DragState::Idle, |g| DragState::Dragging(g.pointer))
    }

    pub fn max(&self) -> i32 {
        self.arc.max()
    }

    pub fn is_lock_enabled(&self) -> bool {
        self.lock_enabled
    }

    pub fn set_lock_enabled(&mut self, enabled: bool) {
        self.lock_enabled = enabled;
    }

    pub fn is_move_outside_circle(&self) -> bool {
        self.move_outside_circle
    }

    pub fn set_move_outside_circle(&mut self, allowed: bool) {
        self.move_outside_circle = allowed;
    }

    pub fn is_touch_enabled(&self) -> bool {
        self.touch_enabled
    }

    /// Disabling touch does not affect programmatic changes.
    pub fn set_touch_enabled(&mut self, enabled: bool) {
        self.touch_enabled = enabled;
        if !enabled {
            self.gesture = None;
        }
    }

    pub fn gang_overflow(&self) -> GangOverflow {
        self.gang_overflow
    }

    pub fn set_gang_overflow(&mut self, overflow: GangOverflow) {
        self.gang_overflow = overflow;
    }

    pub fn set_geometry(&mut self, geometry: RingGeometry) {
        self.geometry = geometry;
    }

    pub fn set_style(&mut self, style: SeekBarStyle) {
        self.style = style;
    }

    pub fn style_mut(&mut self) -> &mut SeekBarStyle {
        &mut self.style
    }

    /// Brings every derived angle back in line with progress, max and bounds.
    pub fn recompute(&mut self) {
        self.arc.recompute();
        self.pointers.recompute(&self.arc);
    }

    pub fn drain_events(&mut self) -> Vec<SeekBarEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn set_bounds(&mut self, start_angle: f64, end_angle: f64) {
        self.arc.set_bounds(start_angle, end_angle);
        self.recompute();
    }

    /// Non-positive values are ignored. Pointers at or above the new max restart from zero.
    pub fn set_max(&mut self, max: i32) {
        if !self.arc.set_max(max) {
            return;
        }

        let reset: Vec<PointerId> = self
            .pointers
            .iter()
            .filter(|p| max <= p.progress())
            .map(Pointer::id)
            .collect();
        for &id in &reset {
            self.pointers.set_progress(id, 0);
        }

        self.recompute();
        for id in reset {
            log::debug!("Pointer {} reset by new max {}", id, max);
            self.notify_change(id, false);
        }
    }

    /// Adds a pointer at `progress`, or redistributes every pointer evenly when `None`.
    pub fn add_pointer(&mut self, progress: Option<i32>) -> PointerId {
        self.add_styled_pointer(progress, None)
    }

    pub fn add_styled_pointer(
        &mut self,
        progress: Option<i32>,
        style: Option<PointerStyle>,
    ) -> PointerId {
        let (id, moved) = match progress {
            Some(progress) => {
                let progress = self.clamp(progress);
                (self.pointers.push(progress, style), Vec::new())
            }
            None => {
                let id = self.pointers.push(0, style);
                (id, self.pointers.distribute(self.arc.max()))
            }
        };
        self.recompute();
        for moved_id in moved {
            self.notify_change(moved_id, false);
        }
        id
    }

    /// Programmatic progress change, clamped to `[0, max]`. False for unknown pointers.
    pub fn set_progress(&mut self, id: PointerId, progress: i32) -> bool {
        if self.pointers.get(id).is_none() {
            return false;
        }
        let progress = self.clamp(progress);
        if self.pointers.set_progress(id, progress) {
            self.recompute();
            self.notify_change(id, false);
        }
        true
    }

    pub fn progress(&self, id: PointerId) -> Option<i32> {
        self.pointers.get(id).map(Pointer::progress)
    }

    pub fn relative_progress(&self, id: PointerId) -> Option<i32> {
        self.pointers.relative_progress(id)
    }

    /// `None` returns the pointer to the shared style.
    pub fn set_pointer_style(&mut self, id: PointerId, style: Option<PointerStyle>) -> bool {
        self.pointers.set_style(id, style)
    }

    /// Same color for handle, halo and progress arc.
    pub fn set_pointer_uniform_color(&mut self, id: PointerId, color: Color) -> bool {
        self.set_pointer_style(id, Some(PointerStyle::uniform(color)))
    }

    pub fn set_pointer_color(&mut self, id: PointerId, color: Color) -> bool {
        self.customize_pointer(id, |s| {
            s.pointer_color = color;
            s.halo_color = color;
        })
    }

    pub fn set_pointer_progress_color(&mut self, id: PointerId, color: Color) -> bool {
        self.customize_pointer(id, |s| s.progress_color = color)
    }

    fn customize_pointer(&mut self, id: PointerId, edit: impl FnOnce(&mut PointerStyle)) -> bool {
        let Some(pointer) = self.pointers.get(id) else {
            return false;
        };
        let mut style = self.style.resolve(pointer.style());
        edit(&mut style);
        self.pointers.set_style(id, Some(style))
    }

    /// Which pointer, if any, a touch at `position` would grab. Earliest inserted wins ties.
    pub fn hit_test(&self, position: Point) -> Option<PointerId> {
        let sample = TouchSample::new(&self.arc, position);
        self.hit_test_sample(&sample)
    }

    fn hit_test_sample(&self, sample: &TouchSample) -> Option<PointerId> {
        if !self.geometry.in_ring(sample.radius, HIT_TOLERANCE) {
            return None;
        }
        let halo_degrees = self.geometry.pointer_radius_degrees() + HIT_TOLERANCE;
        self.pointers
            .iter()
            .find(|p| {
                let cw = cw_distance(p.angle(), sample.angle);
                cw <= halo_degrees || 360.0 - cw <= halo_degrees
            })
            .map(Pointer::id)
    }

    pub fn handle_touch(&mut self, event: TouchEvent) -> TouchOutcome {
        if !self.touch_enabled {
            return TouchOutcome::ignored();
        }

        let sample = TouchSample::new(&self.arc, event.position);
        let consumed = match event.action {
            TouchAction::Down => self.touch_down(&sample),
            TouchAction::Move => self.touch_move(&sample),
            TouchAction::Up => self.touch_up(),
            TouchAction::Cancel => self.touch_cancel(),
        };

        TouchOutcome::new(consumed, self.drain_events())
    }

    fn touch_down(&mut self, sample: &TouchSample) -> bool {
        if let Some(previous) = self.gesture.take() {
            log::debug!("New touch while dragging pointer {}, ending that drag", previous.pointer);
            self.pending.push(SeekBarEvent::StopTracking {
                pointer: previous.pointer,
            });
        }

        let Some(id) = self.hit_test_sample(sample) else {
            log::trace!(
                "Touch at {:.1} deg, radius {:.1} missed every pointer",
                sample.angle,
                sample.radius
            );
            return false;
        };

        log::debug!("Grabbed pointer {} at {:.1} deg", id, sample.angle);
        self.gesture = Some(Gesture::grab(id, sample));
        self.pending.push(SeekBarEvent::StartTracking { pointer: id });
        true
    }

    fn touch_move(&mut self, sample: &TouchSample) -> bool {
        let Some(mut gesture) = self.gesture else {
            return false;
        };
        if self.pointers.get(gesture.pointer).is_none() {
            log::debug!("Dragged pointer {} no longer exists", gesture.pointer);
            self.gesture = None;
            return false;
        }

        let (was_locked_start, was_locked_end) = (gesture.lock_at_start, gesture.lock_at_end);
        gesture.track(sample, self.arc.total_sweep());
        if gesture.lock_at_start != was_locked_start || gesture.lock_at_end != was_locked_end {
            log::debug!(
                "Lock latches now start={} end={} ({})",
                gesture.lock_at_start,
                gesture.lock_at_end,
                gesture.rotation
            );
        }
        log::trace!(
            "Move to {:.1} deg ({:.1} from start, {})",
            sample.angle,
            sample.cw_from_start,
            gesture.rotation
        );

        let applied = if gesture.lock_at_start && self.lock_enabled {
            self.snap(gesture.pointer, 0);
            true
        } else if gesture.lock_at_end && self.lock_enabled {
            self.snap(gesture.pointer, self.arc.max());
            true
        } else if self.move_outside_circle || sample.radius <= self.geometry.outer_touch_radius() {
            if !self.arc.is_dead_zone(sample.angle) {
                self.drag_to(gesture.pointer, sample.angle);
            }
            true
        } else {
            false
        };

        if applied {
            gesture.last_cw_from_start = sample.cw_from_start;
        }
        self.gesture = Some(gesture);
        true
    }

    fn touch_up(&mut self) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                log::debug!("Released pointer {}", gesture.pointer);
                self.pending.push(SeekBarEvent::StopTracking {
                    pointer: gesture.pointer,
                });
                true
            }
            None => false,
        }
    }

    fn touch_cancel(&mut self) -> bool {
        self.gesture
            .take()
            .inspect(|g| log::debug!("Drag of pointer {} cancelled", g.pointer))
            .is_some()
    }

    fn snap(&mut self, id: PointerId, progress: i32) {
        if self.pointers.set_progress(id, progress) {
            self.recompute();
            self.notify_change(id, true);
        }
    }

    fn drag_to(&mut self, id: PointerId, angle: f64) {
        let Some(prior) = self.progress(id) else {
            return;
        };
        let current = self.arc.progress_for_angle(angle);
        if !self.pointers.set_progress(id, current) {
            return;
        }

        let pushed = self.pointers.gang_shift(
            id,
            prior,
            current,
            self.gang_overflow,
            self.arc.max(),
        );
        self.recompute();

        self.notify_change(id, true);
        for pushed_id in pushed {
            self.notify_change(pushed_id, false);
        }
    }

    fn notify_change(&mut self, id: PointerId, from_user: bool) {
        let (Some(progress), Some(relative)) = (self.progress(id), self.relative_progress(id))
        else {
            return;
        };
        self.pending.push(SeekBarEvent::ProgressChanged {
            pointer: id,
            progress,
            relative,
            from_user,
        });
    }

    fn clamp(&self, progress: i32) -> i32 {
        progress.clamp(0, self.arc.max())
    }
}
