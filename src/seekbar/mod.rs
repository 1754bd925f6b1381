pub mod arc;
pub mod engine;
pub mod frame;
pub mod geometry;
pub mod pointer;
pub mod style;

pub use arc::ArcModel;
pub use engine::{DragState, Gesture, InteractionEngine, Rotation};
pub use frame::{ArcSpan, Frame, PointerFrame};
pub use geometry::{Point, RingGeometry};
pub use pointer::{GangOverflow, Pointer, PointerId, PointerSet};
pub use style::{Color, PointerStyle, SeekBarStyle};

// Angles are geometric degrees, clockwise from 3 o'clock
pub const DEFAULT_START_ANGLE: f64 = 270.0;
pub const DEFAULT_END_ANGLE: f64 = 270.0;
pub const DEFAULT_MAX: i32 = 100;
pub const DEFAULT_LOCK_ENABLED: bool = true;
pub const DEFAULT_MOVE_OUTSIDE_CIRCLE: bool = false;
pub const SEAM_DEGREES: f64 = 0.1; // gap kept between equal start and end angles

// Pixel defaults, used when the host does not measure anything itself
pub const DEFAULT_RING_RADIUS: f64 = 120.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;
pub const DEFAULT_POINTER_RADIUS: f64 = 7.0;
pub const DEFAULT_POINTER_HALO_WIDTH: f64 = 6.0;
pub const DEFAULT_POINTER_HALO_BORDER_WIDTH: f64 = 2.0;
pub const MIN_TOUCH_TARGET: f64 = 48.0;

// Touch tracking
pub const HIT_TOLERANCE: f64 = 3.0; // added to both the ring band (px) and the halo (degrees)
pub const WRAP_JUMP_DEGREES: f64 = 180.0; // larger jumps mean the touch crossed the seam
pub const LOCK_RELEASE_DEGREES: f64 = 90.0;
