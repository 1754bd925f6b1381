use super::engine::InteractionEngine;
use super::geometry::Point;
use super::pointer::PointerId;
use super::style::Color;
use std::fmt;

/// An arc to stroke, in degrees clockwise from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start: f64,
    pub sweep: f64,
}

impl ArcSpan {
    pub fn new(start: f64, sweep: f64) -> Self {
        Self { start, sweep }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerFrame {
    pub id: PointerId,
    pub progress: i32,
    pub relative_progress: i32,
    pub angle: f64,
    pub progress_arc: ArcSpan,
    pub position: Point,
    /// The pointer is the one being dragged.
    pub pressed: bool,
    pub pointer_color: Color,
    pub progress_color: Color,
    pub halo_color: Color,
}

/// Everything a renderer needs for one paint, centered on the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub ring: ArcSpan,
    pub radius_x: f64,
    pub radius_y: f64,
    pub stroke_width: f64,
    pub pointer_radius: f64,
    pub halo_radius: f64,
    /// Set while a drag is in progress; renderers outline every halo then.
    pub halo_border_width: Option<f64>,
    pub circle_color: Color,
    pub circle_fill_color: Color,
    pub pointers: Vec<PointerFrame>,
}

impl Frame {
    pub fn capture(engine: &InteractionEngine) -> Self {
        let arc = engine.arc();
        let geometry = engine.geometry();
        let style = engine.style();
        let dragged = engine.gesture().map(|g| g.pointer);

        let pointers = engine
            .pointers()
            .iter()
            .map(|p| {
                let resolved = style.resolve(p.style());
                let pressed = dragged == Some(p.id());
                PointerFrame {
                    id: p.id(),
                    progress: p.progress(),
                    relative_progress: engine.relative_progress(p.id()).unwrap_or_default(),
                    angle: p.angle(),
                    progress_arc: ArcSpan::new(arc.start_angle(), p.progress_degrees()),
                    position: geometry.position_at(p.angle()),
                    pressed,
                    pointer_color: resolved.pointer_color,
                    progress_color: resolved.progress_color,
                    halo_color: style.halo_for(&resolved, pressed),
                }
            })
            .collect();

        Self {
            ring: ArcSpan::new(arc.start_angle(), arc.total_sweep()),
            radius_x: geometry.radius_x,
            radius_y: geometry.radius_y,
            stroke_width: geometry.stroke_width,
            pointer_radius: geometry.pointer_radius,
            halo_radius: geometry.halo_radius(),
            halo_border_width: dragged.map(|_| geometry.pointer_halo_border_width),
            circle_color: style.circle_color,
            circle_fill_color: style.circle_fill_color,
            pointers,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ring: start {:.1} sweep {:.1} ({})",
            self.ring.start, self.ring.sweep, self.circle_color
        )?;
        for p in &self.pointers {
            writeln!(
                f,
                "pointer {}: progress {} (+{}) at {:.1} deg, ({:.1}, {:.1}){}",
                p.id,
                p.progress,
                p.relative_progress,
                p.angle,
                p.position.x,
                p.position.y,
                if p.pressed { " [pressed]" } else { "" }
            )?;
        }
        Ok(())
    }
}

impl InteractionEngine {
    pub fn frame(&self) -> Frame {
        Frame::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{TouchAction, TouchEvent};
    use crate::seekbar::{ArcModel, PointerStyle, RingGeometry};

    fn engine() -> InteractionEngine {
        let mut engine =
            InteractionEngine::new(ArcModel::new(180.0, 0.0, 100), RingGeometry::circle(100.0));
        engine.add_pointer(Some(0));
        engine.add_pointer(Some(50));
        engine
    }

    #[test]
    fn test_frame_spans_and_positions() {
        let frame = engine().frame();
        assert_eq!(frame.ring, ArcSpan::new(180.0, 180.0));
        assert_eq!(frame.pointers.len(), 2);

        let second = &frame.pointers[1];
        assert_eq!(second.progress_arc, ArcSpan::new(180.0, 90.0));
        assert!(second.position.x.abs() < 1e-6);
        assert!((second.position.y + 100.0).abs() < 1e-6);
        assert_eq!(second.relative_progress, 50);

        let first = &frame.pointers[0];
        assert!((first.position.x + 100.0).abs() < 1e-6);
        assert_eq!(first.progress_arc.sweep, 0.0);
    }

    #[test]
    fn test_pressed_pointer_uses_touch_halo() {
        let mut engine = engine();
        engine.handle_touch(TouchEvent::at_angle(TouchAction::Down, 270.0, 100.0));
        let frame = engine.frame();
        assert!(frame.pointers[1].pressed);
        assert!(!frame.pointers[0].pressed);
        assert_eq!(frame.pointers[1].halo_color.alpha(), 100);
        assert_eq!(frame.pointers[0].halo_color.alpha(), 135);
        assert_eq!(frame.halo_border_width, Some(2.0));

        engine.handle_touch(TouchEvent::at_angle(TouchAction::Up, 270.0, 100.0));
        assert_eq!(engine.frame().halo_border_width, None);
    }

    #[test]
    fn test_custom_pointer_color_in_frame() {
        let mut engine = engine();
        let green = Color::rgb(0, 255, 0);
        engine.set_pointer_style(PointerId::from(0), Some(PointerStyle::uniform(green)));
        let frame = engine.frame();
        assert_eq!(frame.pointers[0].progress_color, green);
        assert_eq!(frame.pointers[0].halo_color, green.with_alpha(135));
        assert_eq!(frame.pointers[1].progress_color, engine.style().progress_color);
    }
}
