//! Object CRUD operations

use serde::{Deserialize, Serialize};
use shared::{MaterialConfig, ObjectId, SceneObject, Transform, Vec3};

use super::SceneState;

/// Partial object change, shallow-merged into the target object.
///
/// Has no `id` or `group_id`: membership only changes through the group
/// operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry_args: Option<Vec<f64>>,
}

impl ObjectUpdate {
    /// Update that overwrites the full transform
    pub fn transform(transform: &Transform) -> Self {
        Self {
            position: Some(transform.position),
            rotation: Some(transform.rotation),
            scale: Some(transform.scale),
            ..Default::default()
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `obj`
    pub fn apply_to(&self, obj: &mut SceneObject) {
        if let Some(name) = &self.name {
            obj.name = name.clone();
        }
        if let Some(position) = self.position {
            obj.position = position;
        }
        if let Some(rotation) = self.rotation {
            obj.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            obj.scale = scale;
        }
        if let Some(visible) = self.visible {
            obj.visible = visible;
        }
        if let Some(locked) = self.locked {
            obj.locked = locked;
        }
        if let Some(material) = &self.material {
            obj.material = Some(material.clone());
        }
        if let Some(path) = &self.model_path {
            obj.model_path = Some(path.clone());
        }
        if let Some(intensity) = self.intensity {
            obj.intensity = Some(intensity);
        }
        if let Some(color) = &self.light_color {
            obj.light_color = Some(color.clone());
        }
        if let Some(cast) = self.cast_shadow {
            obj.cast_shadow = Some(cast);
        }
        if let Some(args) = &self.geometry_args {
            obj.geometry_args = Some(args.clone());
        }
    }
}

impl SceneState {
    /// Append an object and return its ID.
    ///
    /// An empty or already used ID is replaced with a fresh one. A `group_id`
    /// naming an existing group enrols the object there; any other value is
    /// dropped.
    pub fn add_object(&mut self, mut obj: SceneObject) -> ObjectId {
        if obj.id.is_empty() || self.is_id_taken(&obj.id) {
            obj.id = Self::fresh_id();
        }
        let id = obj.id.clone();

        if let Some(gid) = obj.group_id.clone() {
            match self.get_group_mut(&gid) {
                Some(group) => group.object_ids.push(id.clone()),
                None => obj.group_id = None,
            }
        }

        tracing::info!("Added {:?} object {}", obj.kind, id);
        self.objects.push(obj);
        self.commit();
        id
    }

    /// Remove an object, detaching it from its group first
    pub fn remove_object(&mut self, id: &str) -> bool {
        if self.get_object(id).is_none() {
            tracing::debug!("remove_object: {id} not found");
            return false;
        }
        self.detach(id);
        self.objects.retain(|o| o.id != id);
        tracing::info!("Removed object {id}");
        self.commit();
        true
    }

    /// Merge fields into an object without recording history (drag feedback)
    pub fn update_object(&mut self, id: &str, update: &ObjectUpdate) -> bool {
        match self.get_object_mut(id) {
            Some(obj) => {
                update.apply_to(obj);
                self.version += 1;
                true
            }
            None => {
                tracing::debug!("update_object: {id} not found");
                false
            }
        }
    }

    /// Merge fields into an object as one undo step
    pub fn update_object_committed(&mut self, id: &str, update: &ObjectUpdate) -> bool {
        if !self.update_object(id, update) {
            return false;
        }
        self.commit();
        true
    }

    /// Copy an object next to the original; the copy is not grouped
    pub fn duplicate_object(&mut self, id: &str) -> Option<ObjectId> {
        let Some(original) = self.get_object(id) else {
            tracing::debug!("duplicate_object: {id} not found");
            return None;
        };
        let mut copy = original.clone();
        copy.id = Self::fresh_id();
        copy.name = format!("{} Copy", original.name);
        copy.position[0] += 1.0;
        copy.group_id = None;

        let new_id = copy.id.clone();
        self.objects.push(copy);
        tracing::info!("Duplicated {id} as {new_id}");
        self.commit();
        Some(new_id)
    }

    /// Flip the locked flag
    pub fn toggle_lock(&mut self, id: &str) -> bool {
        let Some(obj) = self.get_object_mut(id) else {
            tracing::debug!("toggle_lock: {id} not found");
            return false;
        };
        obj.locked = !obj.locked;
        self.commit();
        true
    }

    /// Flip the visible flag
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        let Some(obj) = self.get_object_mut(id) else {
            tracing::debug!("toggle_visibility: {id} not found");
            return false;
        };
        obj.visible = !obj.visible;
        self.commit();
        true
    }

    /// Replace an object's material with a library preset; lights are skipped
    pub fn apply_material_preset(&mut self, id: &str, preset_id: &str) -> bool {
        let Some(preset) = shared::preset_by_id(preset_id) else {
            tracing::debug!("apply_material_preset: unknown preset {preset_id}");
            return false;
        };
        match self.get_object_mut(id) {
            Some(obj) if !obj.kind.is_light() => {
                obj.material = Some(preset.config);
            }
            _ => return false,
        }
        self.commit();
        true
    }
}
