use crate::seekbar::{InteractionEngine, PointerId};
use serde::{Deserialize, Serialize};

/// The part of the seek bar a host needs to put it back after being torn down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub max: i32,
    pub progress: Vec<i32>,
    #[serde(default = "default_true")]
    pub lock_enabled: bool,
    #[serde(default = "default_true")]
    pub touch_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl InteractionEngine {
    pub fn save_state(&self) -> SavedState {
        SavedState {
            max: self.arc.max(),
            progress: self.pointers.progresses(),
            lock_enabled: self.lock_enabled,
            touch_enabled: self.touch_enabled,
        }
    }

    /// Restores silently: no change events are queued. Saved values beyond the current
    /// pointers become new pointers.
    pub fn restore_state(&mut self, state: &SavedState) {
        if !self.arc.set_max(state.max) {
            log::warn!("Saved max {} is not positive, keeping {}", state.max, self.arc.max());
        }
        let max = self.arc.max();

        for (index, &progress) in state.progress.iter().enumerate() {
            let progress = progress.clamp(0, max);
            if index < self.pointers.len() {
                self.pointers.set_progress(PointerId::from(index), progress);
            } else {
                self.pointers.push(progress, None);
            }
        }

        self.lock_enabled = state.lock_enabled;
        self.touch_enabled = state.touch_enabled;
        self.gesture = None;
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seekbar::{ArcModel, RingGeometry};

    fn engine() -> InteractionEngine {
        let mut engine =
            InteractionEngine::new(ArcModel::new(270.0, 270.0, 100), RingGeometry::default());
        engine.add_pointer(Some(20));
        engine.add_pointer(Some(80));
        engine
    }

    #[test]
    fn test_save_restore() {
        let mut source = engine();
        source.set_max(200);
        source.set_progress(PointerId::from(1), 150);
        source.set_lock_enabled(false);
        let saved = source.save_state();
        assert_eq!(saved.progress, vec![20, 150]);

        let mut target = engine();
        target.restore_state(&saved);
        assert_eq!(target.max(), 200);
        assert_eq!(target.pointers().progresses(), vec![20, 150]);
        assert!(!target.is_lock_enabled());
        assert!(target.drain_events().is_empty());

        let angle = target.pointer(PointerId::from(1)).map(|p| p.angle());
        assert_eq!(angle, source.pointer(PointerId::from(1)).map(|p| p.angle()));
    }

    #[test]
    fn test_restore_adds_missing_pointers_and_clamps() {
        let mut target = engine();
        target.restore_state(&SavedState {
            max: 50,
            progress: vec![10, 70, 30],
            lock_enabled: true,
            touch_enabled: true,
        });
        assert_eq!(target.pointers().progresses(), vec![10, 50, 30]);
    }

    #[test]
    fn test_restore_ignores_bad_max() {
        let mut target = engine();
        target.restore_state(&SavedState {
            max: -1,
            progress: vec![],
            lock_enabled: true,
            touch_enabled: false,
        });
        assert_eq!(target.max(), 100);
        assert_eq!(target.pointers().progresses(), vec![20, 80]);
        assert!(!target.is_touch_enabled());
    }

    #[test]
    fn test_saved_state_json() {
        let state: SavedState = serde_json::from_str(r#"{"max": 10, "progress": [1, 2]}"#).unwrap();
        assert_eq!(
            state,
            SavedState {
                max: 10,
                progress: vec![1, 2],
                lock_enabled: true,
                touch_enabled: true,
            }
        );
        let json = serde_json::to_string(&state).unwrap();
        let back: SavedState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
