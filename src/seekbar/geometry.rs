use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A position relative to the center of the ring, in pixels. `y` grows downwards, so angles
/// run clockwise from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a point from an angle in degrees and a distance from the center.
    pub fn from_polar(angle: f64, radius: f64) -> Self {
        let rad = angle.to_radians();
        Self::new(radius * rad.cos(), radius * rad.sin())
    }

    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the point in degrees, normalized to [0, 360).
    pub fn angle(&self) -> f64 {
        normalize_angle(self.y.atan2(self.x).to_degrees())
    }
}

/// Wraps any angle into [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Clockwise distance in degrees going from `from` to `to`.
pub fn cw_distance(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Pixel measurements of the ring, provided by the host after layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingGeometry {
    pub radius_x: f64,
    pub radius_y: f64,
    pub stroke_width: f64,
    pub pointer_radius: f64,
    pub pointer_halo_width: f64,
    pub pointer_halo_border_width: f64,
    pub min_touch_target: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            radius_x: super::DEFAULT_RING_RADIUS,
            radius_y: super::DEFAULT_RING_RADIUS,
            stroke_width: super::DEFAULT_STROKE_WIDTH,
            pointer_radius: super::DEFAULT_POINTER_RADIUS,
            pointer_halo_width: super::DEFAULT_POINTER_HALO_WIDTH,
            pointer_halo_border_width: super::DEFAULT_POINTER_HALO_BORDER_WIDTH,
            min_touch_target: super::MIN_TOUCH_TARGET,
        }
    }
}

impl RingGeometry {
    pub fn circle(radius: f64) -> Self {
        Self {
            radius_x: radius,
            radius_y: radius,
            ..Self::default()
        }
    }

    pub fn max_radius(&self) -> f64 {
        self.radius_x.max(self.radius_y)
    }

    pub fn min_radius(&self) -> f64 {
        self.radius_x.min(self.radius_y)
    }

    /// Extra room around the stroke so thin rings still get a finger-sized target.
    fn ring_margin(&self) -> f64 {
        if self.stroke_width < self.min_touch_target {
            self.min_touch_target / 2.0
        } else {
            self.stroke_width / 2.0
        }
    }

    pub fn outer_touch_radius(&self) -> f64 {
        self.max_radius() + self.ring_margin()
    }

    pub fn inner_touch_radius(&self) -> f64 {
        self.min_radius() - self.ring_margin()
    }

    /// Whether a distance from the center lies on the touchable ring body.
    pub fn in_ring(&self, radius: f64, tolerance: f64) -> bool {
        radius >= self.inner_touch_radius() - tolerance
            && radius <= self.outer_touch_radius() + tolerance
    }

    /// Angular half-width of a pointer handle, measured along the widest radius.
    pub fn pointer_radius_degrees(&self) -> f64 {
        let max = self.max_radius();
        if max <= 0.0 {
            return 0.0;
        }
        (self.pointer_radius * 180.0) / (PI * max)
    }

    /// Where a handle sits for the given angle. Ellipses use the parametric form.
    pub fn position_at(&self, angle: f64) -> Point {
        let rad = angle.to_radians();
        Point::new(self.radius_x * rad.cos(), self.radius_y * rad.sin())
    }

    pub fn halo_radius(&self) -> f64 {
        self.pointer_radius + self.pointer_halo_width
    }
}
