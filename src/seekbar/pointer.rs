use super::arc::ArcModel;
use super::style::PointerStyle;
use derive_more::{Display, From, Into};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// Stable handle for a pointer, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct PointerId(usize);

impl PointerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What happens to pointers that a drag pushes past either end of the range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GangOverflow {
    /// Pushed pointers keep whatever value the shift produced, even outside `[0, max]`.
    #[default]
    Unclamped,
    /// Pushed pointers stop at `0` or `max`.
    Clamp,
}

/// A draggable handle on the arc.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    id: PointerId,
    progress: i32,
    angle: f64,
    progress_degrees: f64,
    style: Option<PointerStyle>,
}

impl Pointer {
    fn new(id: PointerId, progress: i32, style: Option<PointerStyle>) -> Self {
        Self {
            id,
            progress,
            angle: 0.0,
            progress_degrees: 0.0,
            style,
        }
    }

    pub fn id(&self) -> PointerId {
        self.id
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Angular position of the handle in [0, 360).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Sweep of the progress arc, from the start of the arc up to the handle.
    pub fn progress_degrees(&self) -> f64 {
        self.progress_degrees
    }

    pub fn style(&self) -> Option<&PointerStyle> {
        self.style.as_ref()
    }

    fn update_geometry(&mut self, arc: &ArcModel) {
        self.angle = arc.angle_for_progress(self.progress);
        self.progress_degrees = arc.cw_distance_from_start(self.angle);
    }
}

/// Pointers in insertion order.
///
/// Mutators only touch progress values. Callers run [`PointerSet::recompute`] once they are done
/// so the derived angles never lag behind.
#[derive(Debug, Clone, Default)]
pub struct PointerSet {
    pointers: Vec<Pointer>,
}

impl PointerSet {
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pointer> {
        self.pointers.iter()
    }

    pub fn get(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.get(id.0)
    }

    pub fn push(&mut self, progress: i32, style: Option<PointerStyle>) -> PointerId {
        let id = PointerId(self.pointers.len());
        self.pointers.push(Pointer::new(id, progress, style));
        id
    }

    /// Returns true when the value actually changed.
    pub fn set_progress(&mut self, id: PointerId, progress: i32) -> bool {
        match self.pointers.get_mut(id.0) {
            Some(p) if p.progress != progress => {
                p.progress = progress;
                true
            }
            _ => false,
        }
    }

    pub fn set_style(&mut self, id: PointerId, style: Option<PointerStyle>) -> bool {
        self.pointers
            .get_mut(id.0)
            .map(|p| p.style = style)
            .is_some()
    }

    /// Spreads pointers evenly over `[0, max)` by insertion index. Returns the ones that moved.
    pub fn distribute(&mut self, max: i32) -> Vec<PointerId> {
        let count = self.pointers.len() as i32;
        if count == 0 {
            return Vec::new();
        }
        let step = max / count;
        self.pointers
            .iter_mut()
            .enumerate()
            .filter_map(|(i, p)| {
                let target = step * i as i32;
                (p.progress != target).then(|| {
                    p.progress = target;
                    p.id
                })
            })
            .collect()
    }

    /// Moves every pointer that sat ahead of the dragged one by the same delta the dragged
    /// pointer moved. "Ahead" is measured against `prior`, so a single large jump still carries
    /// pointers it passed over. Returns the pointers whose value changed.
    pub fn gang_shift(
        &mut self,
        dragged: PointerId,
        prior: i32,
        current: i32,
        overflow: GangOverflow,
        max: i32,
    ) -> Vec<PointerId> {
        let delta = current - prior;
        if delta == 0 {
            return Vec::new();
        }

        self.pointers
            .iter_mut()
            .filter(|p| p.id != dragged && p.progress > prior)
            .filter_map(|p| {
                let shifted = p.progress + delta;
                let shifted = match overflow {
                    GangOverflow::Unclamped => shifted,
                    GangOverflow::Clamp => shifted.clamp(0, max),
                };
                (shifted != p.progress).then(|| {
                    p.progress = shifted;
                    p.id
                })
            })
            .collect()
    }

    /// Progress above the closest pointer below this one (or above zero if there is none).
    pub fn relative_progress(&self, id: PointerId) -> Option<i32> {
        let this = self.get(id)?.progress;
        let floor = self
            .pointers
            .iter()
            .map(|p| p.progress)
            .filter(|&v| v < this)
            .fold(0, i32::max);
        Some(this - floor)
    }

    pub fn progresses(&self) -> Vec<i32> {
        self.pointers.iter().map(|p| p.progress).collect()
    }

    pub fn recompute(&mut self, arc: &ArcModel) {
        self.pointers
            .iter_mut()
            .for_each(|p| p.update_geometry(arc));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(progresses: &[i32]) -> PointerSet {
        let mut set = PointerSet::default();
        for &p in progresses {
            set.push(p, None);
        }
        set
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let set = set_of(&[5, 1, 9]);
        let ids: Vec<_> = set.iter().map(|p| p.id().index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(set.get(PointerId::from(2)).map(Pointer::progress), Some(9));
        assert!(set.get(PointerId::from(3)).is_none());
    }

    #[test]
    fn test_distribute_uses_integer_steps() {
        let mut set = set_of(&[0, 0, 0]);
        let moved = set.distribute(100);
        assert_eq!(set.progresses(), vec![0, 33, 66]);
        assert_eq!(moved, vec![PointerId::from(1), PointerId::from(2)]);

        let mut set = set_of(&[7; 4]);
        set.distribute(10);
        assert_eq!(set.progresses(), vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_gang_shift_pushes_pointers_ahead() {
        let mut set = set_of(&[20, 80]);
        set.set_progress(PointerId::from(0), 90);
        let pushed = set.gang_shift(PointerId::from(0), 20, 90, GangOverflow::Unclamped, 100);
        assert_eq!(pushed, vec![PointerId::from(1)]);
        assert_eq!(set.progresses(), vec![90, 150]);
    }

    #[test]
    fn test_gang_shift_single_jump_carries_passed_pointers() {
        let mut set = set_of(&[20, 50, 80]);
        set.set_progress(PointerId::from(0), 60);
        let pushed = set.gang_shift(PointerId::from(0), 20, 60, GangOverflow::Unclamped, 100);
        assert_eq!(pushed, vec![PointerId::from(1), PointerId::from(2)]);
        assert_eq!(set.progresses(), vec![60, 90, 120]);
    }

    #[test]
    fn test_gang_shift_clamps_when_asked() {
        let mut set = set_of(&[20, 80, 95]);
        set.set_progress(PointerId::from(0), 30);
        set.gang_shift(PointerId::from(0), 20, 30, GangOverflow::Clamp, 100);
        assert_eq!(set.progresses(), vec![30, 90, 100]);
    }

    #[test]
    fn test_gang_shift_leaves_pointers_behind_alone() {
        let mut set = set_of(&[10, 40, 60]);
        set.set_progress(PointerId::from(1), 45);
        set.gang_shift(PointerId::from(1), 40, 45, GangOverflow::Unclamped, 100);
        assert_eq!(set.progresses(), vec![10, 45, 65]);
    }

    #[test]
    fn test_gang_shift_pulls_back() {
        let mut set = set_of(&[10, 40, 60]);
        set.set_progress(PointerId::from(1), 30);
        let moved = set.gang_shift(PointerId::from(1), 40, 30, GangOverflow::Unclamped, 100);
        assert_eq!(moved, vec![PointerId::from(2)]);
        assert_eq!(set.progresses(), vec![10, 30, 50]);
    }

    #[test]
    fn test_gang_shift_preserves_order_ahead() {
        let mut set = set_of(&[0, 30, 50, 70]);
        set.set_progress(PointerId::from(0), 12);
        set.gang_shift(PointerId::from(0), 0, 12, GangOverflow::Unclamped, 100);
        let p = set.progresses();
        assert!(p[1] < p[2] && p[2] < p[3]);
        assert!(p[0] < p[1]);
    }

    #[test]
    fn test_relative_progress() {
        let set = set_of(&[20, 80, 50]);
        assert_eq!(set.relative_progress(PointerId::from(0)), Some(20));
        assert_eq!(set.relative_progress(PointerId::from(1)), Some(30));
        assert_eq!(set.relative_progress(PointerId::from(2)), Some(30));
        assert_eq!(set.relative_progress(PointerId::from(9)), None);
    }

    #[test]
    fn test_relative_progress_ignores_equal_neighbors() {
        let set = set_of(&[40, 40, 10]);
        assert_eq!(set.relative_progress(PointerId::from(0)), Some(30));
    }

    #[test]
    fn test_recompute_keeps_angles_in_sync() {
        let arc = ArcModel::new(180.0, 0.0, 100);
        let mut set = set_of(&[0, 50, 100]);
        set.recompute(&arc);
        let angles: Vec<_> = set.iter().map(Pointer::angle).collect();
        assert!((angles[0] - 180.0).abs() < 1e-9);
        assert!((angles[1] - 270.0).abs() < 1e-9);
        assert!(angles[2].abs() < 1e-9);
        let sweep = set.get(PointerId::from(2)).map(Pointer::progress_degrees);
        assert!((sweep.unwrap_or_default() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_gang_overflow_parsing() {
        assert_eq!("clamp".parse::<GangOverflow>(), Ok(GangOverflow::Clamp));
        assert_eq!("Unclamped".parse::<GangOverflow>(), Ok(GangOverflow::Unclamped));
        assert_eq!(GangOverflow::Clamp.to_string(), "clamp");
    }
}
