use super::geometry::{cw_distance, normalize_angle};
use super::{DEFAULT_END_ANGLE, DEFAULT_MAX, DEFAULT_START_ANGLE, SEAM_DEGREES};

/// The angular domain of the seek bar and the mapping between progress and angle.
///
/// Angles are degrees, clockwise from 3 o'clock, always kept in [0, 360).
#[derive(Debug, Clone, PartialEq)]
pub struct ArcModel {
    start_angle: f64,
    end_angle: f64,
    total_sweep: f64,
    max: i32,
}

impl Default for ArcModel {
    fn default() -> Self {
        Self::new(DEFAULT_START_ANGLE, DEFAULT_END_ANGLE, DEFAULT_MAX)
    }
}

impl ArcModel {
    pub fn new(start_angle: f64, end_angle: f64, max: i32) -> Self {
        let mut arc = Self {
            start_angle: 0.0,
            end_angle: 0.0,
            total_sweep: 360.0,
            max: DEFAULT_MAX,
        };
        arc.set_bounds(start_angle, end_angle);
        arc.set_max(max);
        arc
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn total_sweep(&self) -> f64 {
        self.total_sweep
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Sets both ends of the arc. Equal ends describe a full circle with a small seam.
    pub fn set_bounds(&mut self, start_angle: f64, end_angle: f64) {
        self.start_angle = normalize_angle(start_angle);
        self.end_angle = normalize_angle(end_angle);
        if self.start_angle == self.end_angle {
            self.end_angle = normalize_angle(self.end_angle - SEAM_DEGREES);
        }
        self.recompute();
    }

    /// Returns false and leaves the model untouched when `max` is not positive.
    pub fn set_max(&mut self, max: i32) -> bool {
        if max <= 0 {
            log::debug!("Ignoring non-positive max {}", max);
            return false;
        }
        self.max = max;
        true
    }

    pub fn recompute(&mut self) {
        let sweep = (360.0 - (self.start_angle - self.end_angle)).rem_euclid(360.0);
        self.total_sweep = if sweep <= 0.0 { 360.0 } else { sweep };
    }

    /// Angle of the handle for a progress value, wrapped into [0, 360).
    pub fn angle_for_progress(&self, progress: i32) -> f64 {
        let fraction = f64::from(progress) / f64::from(self.max);
        normalize_angle(self.start_angle + fraction * self.total_sweep)
    }

    /// Nearest progress value for an angle on the arc.
    pub fn progress_for_angle(&self, angle: f64) -> i32 {
        let degrees = self.cw_distance_from_start(angle);
        (f64::from(self.max) * degrees / self.total_sweep).round() as i32
    }

    pub fn cw_distance_from_start(&self, angle: f64) -> f64 {
        cw_distance(self.start_angle, angle)
    }

    pub fn cw_distance_from_end(&self, angle: f64) -> f64 {
        cw_distance(self.end_angle, angle)
    }

    /// True when the angle falls in the gap between the end and the start.
    pub fn is_dead_zone(&self, angle: f64) -> bool {
        self.cw_distance_from_start(angle) > self.total_sweep
    }
}
