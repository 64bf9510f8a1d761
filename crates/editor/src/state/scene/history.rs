//! Undo/redo functionality
//!
//! History is a linear list of full scene snapshots with a cursor. Committing
//! after an undo discards the redo branch; the list is bounded and the oldest
//! snapshot ages out once the limit is reached.

use std::collections::VecDeque;

use shared::{ObjectGroup, SceneObject};

use super::SceneState;

/// Maximum number of retained snapshots
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One undo step: objects together with group membership
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub objects: Vec<SceneObject>,
    pub groups: Vec<ObjectGroup>,
}

/// Bounded linear history of snapshots
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<SceneSnapshot>,
    index: usize,
    limit: usize,
}

impl History {
    /// History holding a single empty snapshot, retaining at most `limit` entries
    pub fn with_limit(limit: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(SceneSnapshot::default());
        Self {
            entries,
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new snapshot after the cursor
    pub fn push(&mut self, snapshot: SceneSnapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        if self.entries.len() > self.limit {
            // Window is full: the oldest entry ages out, cursor stays on the newest
            self.entries.pop_front();
        } else {
            self.index += 1;
        }
    }

    /// Step the cursor back and return the snapshot to restore
    pub fn undo(&mut self) -> Option<&SceneSnapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step the cursor forward and return the snapshot to restore
    pub fn redo(&mut self) -> Option<&SceneSnapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Drop everything and start over from one empty snapshot
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push_back(SceneSnapshot::default());
        self.index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Snapshot at `index`
    pub fn get(&self, index: usize) -> Option<&SceneSnapshot> {
        self.entries.get(index)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl SceneState {
    /// Undo last change
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ObjectType;

    fn snap_with(n: usize) -> SceneSnapshot {
        SceneSnapshot {
            objects: (0..n)
                .map(|i| SceneObject::primitive(format!("o{i}"), ObjectType::Box))
                .collect(),
            groups: vec![],
        }
    }

    #[test]
    fn test_initial_single_empty_snapshot() {
        let h = History::default();
        assert_eq!(h.len(), 1);
        assert_eq!(h.index(), 0);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.get(0), Some(&SceneSnapshot::default()));
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut h = History::default();
        h.push(snap_with(1));
        h.push(snap_with(2));
        assert_eq!(h.len(), 3);
        assert_eq!(h.index(), 2);
        assert!(h.can_undo());
    }

    #[test]
    fn test_undo_redo_bounds_are_noops() {
        let mut h = History::default();
        assert!(h.undo().is_none());
        h.push(snap_with(1));
        assert!(h.redo().is_none());
        assert_eq!(h.undo().map(|s| s.objects.len()), Some(0));
        assert!(h.undo().is_none());
        assert_eq!(h.index(), 0);
    }

    #[test]
    fn test_push_after_undo_discards_branch() {
        let mut h = History::default();
        h.push(snap_with(1));
        h.push(snap_with(2));
        h.undo();
        h.undo();
        h.push(snap_with(5));
        assert_eq!(h.len(), 2);
        assert_eq!(h.index(), 1);
        assert!(!h.can_redo());
        assert_eq!(h.get(1).map(|s| s.objects.len()), Some(5));
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut h = History::with_limit(3);
        for n in 1..=5 {
            h.push(snap_with(n));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.index(), 2);
        // Oldest retained state is the one with 3 objects
        assert_eq!(h.get(0).map(|s| s.objects.len()), Some(3));
        h.undo();
        h.undo();
        assert!(h.undo().is_none());
    }

    #[test]
    fn test_reset() {
        let mut h = History::with_limit(4);
        h.push(snap_with(1));
        h.reset();
        assert_eq!(h.len(), 1);
        assert_eq!(h.index(), 0);
        assert_eq!(h.limit(), 4);
    }

    #[test]
    fn test_zero_limit_clamped() {
        let mut h = History::with_limit(0);
        h.push(snap_with(1));
        assert_eq!(h.len(), 1);
        assert_eq!(h.index(), 0);
        assert_eq!(h.get(0).map(|s| s.objects.len()), Some(1));
    }
}
