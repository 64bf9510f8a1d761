//! Headless test harness for programmatic scene manipulation.
//!
//! Wraps an `EditorState` with short helpers for building scenes and driving
//! gizmo gestures the way the viewport would.

use std::ops::{Deref, DerefMut};

use shared::{GroupId, ObjectId, SceneObject, Transform, Vec3};

use crate::command::{execute_json, CommandError, CommandResponse};
use crate::fixtures;
use crate::state::EditorState;
use crate::viewport::gizmo::ModifierKeys;

/// Headless test harness around the full editor state
#[derive(Debug, Default)]
pub struct TestHarness {
    pub state: EditorState,
}

impl Deref for TestHarness {
    type Target = EditorState;

    fn deref(&self) -> &EditorState {
        &self.state
    }
}

impl DerefMut for TestHarness {
    fn deref_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            state: EditorState::with_history_limit(limit),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add a box with a fixed ID at a position
    pub fn add_box(&mut self, id: &str, position: Vec3) -> ObjectId {
        self.state.add_object(fixtures::box_at(id, position))
    }

    /// Add a locked box with a fixed ID at a position
    pub fn add_locked_box(&mut self, id: &str, position: Vec3) -> ObjectId {
        self.state.add_object(fixtures::locked_box_at(id, position))
    }

    /// Group existing objects by ID
    pub fn group(&mut self, name: &str, ids: &[&str]) -> Option<GroupId> {
        self.state.create_group(name, &fixtures::ids(ids))
    }

    /// Run a JSON command against the editor
    pub fn run(&mut self, json: &str) -> Result<CommandResponse, CommandError> {
        execute_json(&mut self.state, json)
    }

    // ── Gestures ──────────────────────────────────────────────

    /// Full drag: grab, move through `samples`, release on the last one.
    /// Returns whether an undo step was recorded.
    pub fn drag(&mut self, samples: &[Transform], mods: ModifierKeys) -> bool {
        let Some((last, ticks)) = samples.split_last() else {
            return false;
        };
        if self.state.begin_drag().is_none() {
            return false;
        }
        for sample in ticks {
            self.state.drag_update(sample, mods);
        }
        self.state.end_drag(last, mods)
    }

    /// Drag the current gizmo target to a position
    pub fn drag_to(&mut self, position: Vec3) -> bool {
        self.drag(&[fixtures::sample_at(position)], ModifierKeys::NONE)
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.state.scene().objects().len()
    }

    pub fn group_count(&self) -> usize {
        self.state.scene().groups().len()
    }

    /// Number of visible objects
    pub fn visible_object_count(&self) -> usize {
        self.state.scene().objects().iter().filter(|o| o.visible).count()
    }

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.state.scene().get_object(id)
    }

    pub fn position_of(&self, id: &str) -> Option<Vec3> {
        self.object(id).map(|o| o.position)
    }

    /// Scene snapshot as pretty JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(self.state.scene().objects()).unwrap_or_default()
    }

    /// Problems with the object/group relation; empty when consistent
    pub fn invariant_violations(&self) -> Vec<String> {
        self.state.scene().invariant_violations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.object_count(), 0);
        assert_eq!(h.group_count(), 0);
    }

    #[test]
    fn test_add_box() {
        let mut h = TestHarness::new();
        let id = h.add_box("b", [1.0, 0.0, 0.0]);
        assert_eq!(id, "b");
        assert_eq!(h.position_of("b"), Some([1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut h = TestHarness::new();
        h.add_box("b", [0.0; 3]);
        assert!(h.undo());
        assert_eq!(h.object_count(), 0);
        assert!(h.redo());
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_drag_to() {
        let mut h = TestHarness::new();
        h.add_box("b", [0.0; 3]);
        h.select_object(Some("b"), false);
        assert!(h.drag_to([2.2, 0.0, 0.0]));
        assert_eq!(h.position_of("b"), Some([2.0, 0.0, 0.0]));
    }

    #[test]
    fn test_drag_without_selection() {
        let mut h = TestHarness::new();
        h.add_box("b", [0.0; 3]);
        assert!(!h.drag_to([2.0, 0.0, 0.0]));
        assert!(!h.drag(&[], ModifierKeys::NONE));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut h = TestHarness::new();
        h.add_box("a", [0.0; 3]);
        h.add_box("b", [1.0, 0.0, 0.0]);
        h.group("G", &["a", "b"]).unwrap();
        h.clear_scene();
        assert_eq!(h.object_count(), 0);
        assert_eq!(h.group_count(), 0);
        assert!(!h.can_undo());
    }

    #[test]
    fn test_export_scene_json() {
        let mut h = TestHarness::new();
        h.add_box("b", [0.0; 3]);
        let json = h.export_scene_json();
        assert!(json.contains("\"type\": \"box\""));
    }

    #[test]
    fn test_hide_counts() {
        let mut h = TestHarness::new();
        h.add_box("a", [0.0; 3]);
        h.add_box("b", [0.0; 3]);
        h.toggle_visibility("a");
        assert_eq!(h.visible_object_count(), 1);
    }
}
