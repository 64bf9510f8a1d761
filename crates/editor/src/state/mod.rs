pub mod scene;
pub mod selection;
pub mod selectors;
pub mod settings;

use serde::{Deserialize, Serialize};
use shared::{GroupId, ObjectId, ObjectType, SceneObject, TransformMode, Vec3};

pub use scene::{object_display_name, object_icon, short_id, ObjectUpdate, SceneState};
use selection::SelectionState;
pub use settings::{EditorSettings, SettingsError, SettingsUpdate};

use crate::viewport::gizmo::GizmoSession;

/// Orbit camera placement shared with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            position: [5.0, 5.0, 5.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Combined editor state
///
/// Every mutation goes through a method here so that selection, history and
/// an in-flight gizmo drag stay consistent with the scene.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub(crate) scene: SceneState,
    pub(crate) selection: SelectionState,
    pub(crate) transform_mode: TransformMode,
    pub(crate) settings: EditorSettings,
    pub(crate) camera: CameraView,
    pub(crate) gizmo: GizmoSession,
    /// Bumped by changes that live outside scene and selection
    revision: u64,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            scene: SceneState::with_history_limit(limit),
            ..Default::default()
        }
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn camera(&self) -> &CameraView {
        &self.camera
    }

    /// Change counter for UI polling; grows on every observable mutation
    pub fn version(&self) -> u64 {
        self.scene.version() + self.selection.version() + self.revision
    }

    /// Drop selection entries whose object or group no longer exists
    fn prune_selection(&mut self) {
        let scene = &self.scene;
        self.selection.retain(
            |id| scene.get_object(id).is_some(),
            |gid| scene.get_group(gid).is_some(),
        );
    }

    /// Roll back an active drag before a structural commit
    fn settle_drag(&mut self) {
        if self.gizmo.is_dragging() {
            tracing::debug!("Structural edit during drag, rolling the drag back");
            self.cancel_drag();
        }
    }

    // ── Objects ──────────────────────────────────────────────

    pub fn add_object(&mut self, obj: SceneObject) -> ObjectId {
        self.settle_drag();
        self.scene.add_object(obj)
    }

    /// Place a primitive with default geometry; `None` for non-primitive types
    pub fn add_primitive(&mut self, kind: ObjectType) -> Option<ObjectId> {
        if !kind.is_primitive() {
            tracing::debug!("add_primitive: {kind:?} is not a primitive");
            return None;
        }
        Some(self.add_object(SceneObject::primitive("", kind)))
    }

    /// Place a light; `None` for non-light types
    pub fn add_light(&mut self, kind: ObjectType) -> Option<ObjectId> {
        if !kind.is_light() {
            tracing::debug!("add_light: {kind:?} is not a light");
            return None;
        }
        Some(self.add_object(SceneObject::light("", kind)))
    }

    /// Place an imported model at the origin
    pub fn add_model(&mut self, path: &str) -> ObjectId {
        self.add_object(SceneObject::model("", path))
    }

    pub fn remove_object(&mut self, id: &str) -> bool {
        self.settle_drag();
        let removed = self.scene.remove_object(id);
        if removed {
            self.selection.forget(id);
            self.prune_selection();
        }
        removed
    }

    /// Remove every selected object as separate undo steps
    pub fn remove_selected(&mut self) -> usize {
        let ids: Vec<ObjectId> = self.selection.all().to_vec();
        ids.iter().filter(|id| self.remove_object(id)).count()
    }

    pub fn update_object(&mut self, id: &str, update: &ObjectUpdate) -> bool {
        self.scene.update_object(id, update)
    }

    pub fn update_object_committed(&mut self, id: &str, update: &ObjectUpdate) -> bool {
        self.settle_drag();
        self.scene.update_object_committed(id, update)
    }

    /// Copy an object and make the copy the only selection
    pub fn duplicate_object(&mut self, id: &str) -> Option<ObjectId> {
        self.settle_drag();
        let new_id = self.scene.duplicate_object(id)?;
        self.selection.select_object(Some(&new_id), false);
        Some(new_id)
    }

    pub fn toggle_lock(&mut self, id: &str) -> bool {
        self.settle_drag();
        self.scene.toggle_lock(id)
    }

    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        self.settle_drag();
        self.scene.toggle_visibility(id)
    }

    pub fn apply_material_preset(&mut self, id: &str, preset_id: &str) -> bool {
        self.settle_drag();
        self.scene.apply_material_preset(id, preset_id)
    }

    // ── Groups ───────────────────────────────────────────────

    pub fn create_group(&mut self, name: &str, object_ids: &[ObjectId]) -> Option<GroupId> {
        self.settle_drag();
        let gid = self.scene.create_group(name, object_ids)?;
        self.prune_selection();
        Some(gid)
    }

    /// Group the current object selection
    pub fn group_selected(&mut self, name: &str) -> Option<GroupId> {
        let ids = self.selection.all().to_vec();
        self.create_group(name, &ids)
    }

    pub fn add_to_group(&mut self, group_id: &str, object_id: &str) -> bool {
        self.settle_drag();
        let changed = self.scene.add_to_group(group_id, object_id);
        self.prune_selection();
        changed
    }

    pub fn remove_from_group(&mut self, object_id: &str) -> bool {
        self.settle_drag();
        let changed = self.scene.remove_from_group(object_id);
        self.prune_selection();
        changed
    }

    pub fn delete_group(&mut self, group_id: &str) -> bool {
        self.settle_drag();
        let deleted = self.scene.delete_group(group_id);
        self.prune_selection();
        deleted
    }

    pub fn update_group(&mut self, group_id: &str, name: &str) -> bool {
        self.scene.update_group(group_id, name)
    }

    // ── Selection ────────────────────────────────────────────

    /// Click selection; unknown IDs are ignored
    pub fn select_object(&mut self, id: Option<&str>, multi: bool) -> bool {
        if let Some(id) = id {
            if self.scene.get_object(id).is_none() {
                tracing::debug!("select_object: {id} not found");
                return false;
            }
        }
        self.selection.select_object(id, multi);
        true
    }

    /// Enter group mode; unknown IDs are ignored
    pub fn select_group(&mut self, group_id: Option<&str>) -> bool {
        if let Some(gid) = group_id {
            if self.scene.get_group(gid).is_none() {
                tracing::debug!("select_group: {gid} not found");
                return false;
            }
        }
        self.selection.select_group(group_id);
        true
    }

    /// Select every object in scene order
    pub fn select_all(&mut self) {
        self.selection.clear();
        for id in self.scene.object_ids() {
            self.selection.select_object(Some(&id), true);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── History ──────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.cancel_drag();
        let changed = self.scene.undo();
        if changed {
            self.prune_selection();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_drag();
        let changed = self.scene.redo();
        if changed {
            self.prune_selection();
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.scene.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.scene.can_redo()
    }

    /// Empty scene, empty selection, fresh history
    pub fn clear_scene(&mut self) {
        self.cancel_drag();
        self.scene.clear();
        self.selection.clear();
    }

    // ── Editor settings ──────────────────────────────────────

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        if self.transform_mode != mode {
            self.transform_mode = mode;
            self.revision += 1;
        }
    }

    pub fn update_settings(&mut self, update: &SettingsUpdate) -> Result<(), SettingsError> {
        self.settings.apply(update)?;
        self.revision += 1;
        Ok(())
    }

    pub fn set_camera(&mut self, position: Option<Vec3>, target: Option<Vec3>) {
        if let Some(position) = position {
            self.camera.position = position;
        }
        if let Some(target) = target {
            self.camera.target = target;
        }
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_factories() {
        let mut st = EditorState::new();
        assert!(st.add_primitive(ObjectType::Sphere).is_some());
        assert!(st.add_primitive(ObjectType::PointLight).is_none());
        assert!(st.add_light(ObjectType::SpotLight).is_some());
        assert!(st.add_light(ObjectType::Box).is_none());
        let m = st.add_model("/assets/models/chair.glb");
        assert_eq!(st.scene().get_object(&m).unwrap().name, "chair");
        assert_eq!(st.scene().objects().len(), 3);
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut st = EditorState::new();
        let a = st.add_primitive(ObjectType::Box).unwrap();
        let b = st.add_primitive(ObjectType::Box).unwrap();
        st.select_object(Some(&a), true);
        st.select_object(Some(&b), true);
        assert!(st.remove_object(&b));
        assert_eq!(st.selection().all(), &[a.clone()]);
        assert_eq!(st.selection().primary(), Some(&a));
    }

    #[test]
    fn test_duplicate_selects_copy() {
        let mut st = EditorState::new();
        let a = st.add_primitive(ObjectType::Box).unwrap();
        let gid = st.create_group("G", &[a.clone()]).unwrap();
        st.select_group(Some(&gid));
        let copy = st.duplicate_object(&a).unwrap();
        assert_eq!(st.selection().primary(), Some(&copy));
        assert_eq!(st.selection().count(), 1);
        assert!(st.selection().group().is_none());
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let mut st = EditorState::new();
        let a = st.add_primitive(ObjectType::Box).unwrap();
        st.select_object(Some(&a), false);
        assert!(!st.select_object(Some("ghost"), false));
        assert_eq!(st.selection().primary(), Some(&a));
        assert!(!st.select_group(Some("ghost")));
    }

    #[test]
    fn test_undo_prunes_selection() {
        let mut st = EditorState::new();
        let a = st.add_primitive(ObjectType::Box).unwrap();
        st.select_object(Some(&a), false);
        assert!(st.undo());
        assert!(st.selection().primary().is_none());
        assert!(st.redo());
        assert!(st.selection().primary().is_none());
    }

    #[test]
    fn test_delete_group_clears_group_selection() {
        let mut st = EditorState::new();
        let a = st.add_primitive(ObjectType::Box).unwrap();
        let gid = st.create_group("G", &[a]).unwrap();
        st.select_group(Some(&gid));
        st.delete_group(&gid);
        assert!(st.selection().group().is_none());
    }

    #[test]
    fn test_clear_scene() {
        let mut st = EditorState::new();
        let a = st.add_primitive(ObjectType::Box).unwrap();
        st.select_object(Some(&a), false);
        st.clear_scene();
        assert!(st.scene().objects().is_empty());
        assert!(st.selection().is_empty());
        assert!(!st.can_undo());
        assert!(!st.can_redo());
    }

    #[test]
    fn test_version_grows_on_every_kind_of_change() {
        let mut st = EditorState::new();
        let mut last = st.version();
        let mut check = |st: &EditorState| {
            assert!(st.version() > last);
            last = st.version();
        };
        let a = st.add_primitive(ObjectType::Box).unwrap();
        check(&st);
        st.select_object(Some(&a), false);
        check(&st);
        st.set_transform_mode(TransformMode::Rotate);
        check(&st);
        st.update_settings(&SettingsUpdate {
            snap_size: Some(1.0),
            ..Default::default()
        })
        .unwrap();
        check(&st);
        st.update_object(&a, &ObjectUpdate::rename("x"));
        check(&st);
    }

    #[test]
    fn test_select_all_and_remove_selected() {
        let mut st = EditorState::new();
        st.add_primitive(ObjectType::Box);
        st.add_primitive(ObjectType::Cone);
        st.select_all();
        assert_eq!(st.selection().count(), 2);
        assert_eq!(st.remove_selected(), 2);
        assert!(st.scene().objects().is_empty());
        assert!(st.selection().is_empty());
    }

    #[test]
    fn test_camera_defaults_and_update() {
        let mut st = EditorState::new();
        assert_eq!(st.camera().position, [5.0, 5.0, 5.0]);
        st.set_camera(None, Some([1.0, 0.0, 0.0]));
        assert_eq!(st.camera().target, [1.0, 0.0, 0.0]);
        assert_eq!(st.camera().position, [5.0, 5.0, 5.0]);
    }
}
