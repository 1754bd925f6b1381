use crate::events::{TouchAction, TouchEvent, TouchOutcome};
use crate::seekbar::{InteractionEngine, Point};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// One scripted touch, given either as `x`/`y` or as `angle`/`radius` around the ring center.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub action: TouchAction,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub angle: Option<f64>,
    /// Defaults to the ring radius when only an angle is given.
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub samples: Vec<Sample>,
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to load script: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Sample {0} has neither x/y nor an angle")]
    MissingPosition(usize),
}

impl Sample {
    pub fn to_event(&self, index: usize, ring_radius: f64) -> Result<TouchEvent, ScriptError> {
        let position = match (self.x, self.y, self.angle) {
            (Some(x), Some(y), _) => Point::new(x, y),
            (_, _, Some(angle)) => Point::from_polar(angle, self.radius.unwrap_or(ring_radius)),
            _ => return Err(ScriptError::MissingPosition(index)),
        };
        Ok(TouchEvent::new(self.action, position))
    }
}

pub fn load_script(path: &Path) -> Result<Script, ScriptError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;
    Ok(s.try_deserialize()?)
}

/// Feeds every sample to the engine in order. Stops at the first malformed sample.
pub fn replay(
    engine: &mut InteractionEngine,
    script: &Script,
) -> Result<Vec<TouchOutcome>, ScriptError> {
    let ring_radius = engine.geometry().max_radius();
    script
        .samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let event = sample.to_event(i, ring_radius)?;
            Ok(engine.handle_touch(event))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SeekBarEvent;
    use crate::seekbar::{ArcModel, PointerId, RingGeometry};

    fn parse(toml: &str) -> Script {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap()
    }

    #[test]
    fn test_replay_drag() {
        let script = parse(
            r#"
[[samples]]
action = "down"
angle = 90.0

[[samples]]
action = "move"
x = 100.0
y = 0.0

[[samples]]
action = "up"
angle = 0.0
"#,
        );
        let mut engine =
            InteractionEngine::new(ArcModel::new(270.0, 270.0, 100), RingGeometry::circle(100.0));
        let id = engine.add_pointer(Some(50));

        let outcomes = replay(&mut engine, &script).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.consumed));
        assert_eq!(engine.progress(id), Some(25));
        assert_eq!(
            outcomes[2].events,
            vec![SeekBarEvent::StopTracking {
                pointer: PointerId::from(0)
            }]
        );
    }

    #[test]
    fn test_sample_without_position() {
        let script = parse("[[samples]]\naction = \"down\"\nx = 3.0\n");
        let mut engine = InteractionEngine::default();
        assert!(matches!(
            replay(&mut engine, &script),
            Err(ScriptError::MissingPosition(0))
        ));
    }

    #[test]
    fn test_unknown_action_fails_to_parse() {
        let result = config::Config::builder()
            .add_source(config::File::from_str(
                "[[samples]]\naction = \"hover\"\nangle = 1.0\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize::<Script>());
        assert!(result.is_err());
    }
}
