//! Scene state management
//!
//! This module provides the object/group store with undo/redo history. Every
//! operation keeps the object ↔ group relation bidirectional: an object's
//! `group_id` always names an existing group that lists the object.

mod display;
mod group_ops;
pub mod history;
mod object_ops;
mod transform_ops;

pub use display::{object_display_name, object_icon, short_id};
pub use history::{History, SceneSnapshot, DEFAULT_HISTORY_LIMIT};
pub use object_ops::ObjectUpdate;
pub use transform_ops::TransformUpdate;

use shared::{GroupId, ObjectGroup, ObjectId, SceneObject};

/// Scene objects, groups and their undo/redo history
#[derive(Debug, Clone)]
pub struct SceneState {
    /// All objects in insertion (display) order
    pub(crate) objects: Vec<SceneObject>,
    /// Flat groups in creation order
    pub(crate) groups: Vec<ObjectGroup>,
    pub(crate) history: History,
    /// Monotonically increasing version counter for change polling
    pub(crate) version: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl SceneState {
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            objects: Vec::new(),
            groups: Vec::new(),
            history: History::with_limit(limit),
            version: 0,
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn groups(&self) -> &[ObjectGroup] {
        &self.groups
    }

    /// Get an object by ID
    pub fn get_object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get mutable object by ID
    pub(crate) fn get_object_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Get a group by ID
    pub fn get_group(&self, id: &str) -> Option<&ObjectGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub(crate) fn get_group_mut(&mut self, id: &str) -> Option<&mut ObjectGroup> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Members of a group in membership order
    pub fn group_members(&self, group_id: &str) -> Vec<&SceneObject> {
        let Some(group) = self.get_group(group_id) else {
            return Vec::new();
        };
        group
            .object_ids
            .iter()
            .filter_map(|id| self.get_object(id))
            .collect()
    }

    /// Deep copy of the undoable part of the scene
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            objects: self.objects.clone(),
            groups: self.groups.clone(),
        }
    }

    /// Record the current state as one undo step
    pub(crate) fn commit(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
        self.version += 1;
    }

    /// Replace objects and groups without touching history
    pub(crate) fn restore(&mut self, snapshot: SceneSnapshot) {
        self.objects = snapshot.objects;
        self.groups = snapshot.groups;
        self.version += 1;
    }

    /// Reset to the initial empty scene, history included
    pub fn clear(&mut self) {
        self.objects.clear();
        self.groups.clear();
        self.history.reset();
        self.version += 1;
        tracing::info!("Scene cleared");
    }

    pub(crate) fn fresh_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn is_id_taken(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id == id) || self.groups.iter().any(|g| g.id == id)
    }

    /// Violations of the object ↔ group relation; empty when consistent
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for obj in &self.objects {
            if let Some(gid) = &obj.group_id {
                match self.get_group(gid) {
                    Some(group) if group.contains(&obj.id) => {}
                    Some(_) => errors.push(format!("group {gid} does not list member {}", obj.id)),
                    None => errors.push(format!("object {} points at missing group {gid}", obj.id)),
                }
            }
        }
        for group in &self.groups {
            if group.object_ids.is_empty() {
                errors.push(format!("group {} is empty", group.id));
            }
            for (i, id) in group.object_ids.iter().enumerate() {
                if group.object_ids[..i].contains(id) {
                    errors.push(format!("group {} lists {id} twice", group.id));
                }
                let back_ref: Option<&GroupId> =
                    self.get_object(id).and_then(|o| o.group_id.as_ref());
                if back_ref != Some(&group.id) {
                    errors.push(format!("member {id} does not point back at group {}", group.id));
                }
            }
        }
        errors
    }

    /// IDs of all objects, in order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id.clone()).collect()
    }
}
