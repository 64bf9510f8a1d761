//! Group membership operations
//!
//! Groups are flat: an object belongs to at most one group and groups never
//! nest. A group that loses its last member is deleted.

use shared::{GroupId, ObjectGroup, ObjectId};

use super::SceneState;

impl SceneState {
    /// Create a group from existing objects.
    ///
    /// Unknown IDs and duplicates are ignored. Objects already in another
    /// group are moved. Returns `None` (and records nothing) when no valid
    /// object remains.
    pub fn create_group(&mut self, name: &str, object_ids: &[ObjectId]) -> Option<GroupId> {
        let mut members: Vec<ObjectId> = Vec::new();
        for id in object_ids {
            if self.get_object(id).is_some() && !members.contains(id) {
                members.push(id.clone());
            }
        }
        if members.is_empty() {
            tracing::debug!("create_group: no valid members for {name:?}");
            return None;
        }

        for id in &members {
            self.detach(id);
        }

        let group_id = Self::fresh_id();
        for id in &members {
            if let Some(obj) = self.get_object_mut(id) {
                obj.group_id = Some(group_id.clone());
            }
        }
        self.groups.push(ObjectGroup {
            id: group_id.clone(),
            name: name.to_string(),
            object_ids: members,
        });

        tracing::info!("Created group {name:?} ({group_id})");
        self.commit();
        Some(group_id)
    }

    /// Append an object to a group, moving it out of its current group
    pub fn add_to_group(&mut self, group_id: &str, object_id: &str) -> bool {
        let current = match (self.get_group(group_id), self.get_object(object_id)) {
            (Some(_), Some(obj)) => obj.group_id.clone(),
            _ => {
                tracing::debug!("add_to_group: unknown group {group_id} or object {object_id}");
                return false;
            }
        };
        if current.as_deref() == Some(group_id) {
            return false;
        }

        self.detach(object_id);
        // Detaching cannot empty the target group since the object was not in it
        if let Some(group) = self.get_group_mut(group_id) {
            group.object_ids.push(object_id.to_string());
        }
        if let Some(obj) = self.get_object_mut(object_id) {
            obj.group_id = Some(group_id.to_string());
        }
        self.commit();
        true
    }

    /// Take an object out of its group; the group is deleted once empty
    pub fn remove_from_group(&mut self, object_id: &str) -> bool {
        let grouped = self
            .get_object(object_id)
            .is_some_and(|obj| obj.group_id.is_some());
        if !grouped {
            tracing::debug!("remove_from_group: {object_id} is not grouped");
            return false;
        }
        self.detach(object_id);
        self.commit();
        true
    }

    /// Dissolve a group; members stay in the scene ungrouped
    pub fn delete_group(&mut self, group_id: &str) -> bool {
        let Some(pos) = self.groups.iter().position(|g| g.id == group_id) else {
            tracing::debug!("delete_group: {group_id} not found");
            return false;
        };
        let group = self.groups.remove(pos);
        for id in &group.object_ids {
            if let Some(obj) = self.get_object_mut(id) {
                obj.group_id = None;
            }
        }
        tracing::info!("Deleted group {:?} ({group_id})", group.name);
        self.commit();
        true
    }

    /// Rename a group. Not recorded in history.
    pub fn update_group(&mut self, group_id: &str, name: &str) -> bool {
        match self.get_group_mut(group_id) {
            Some(group) => {
                group.name = name.to_string();
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Clear an object's membership on both sides of the relation
    pub(crate) fn detach(&mut self, object_id: &str) {
        let Some(gid) = self
            .get_object_mut(object_id)
            .and_then(|obj| obj.group_id.take())
        else {
            return;
        };
        if let Some(group) = self.get_group_mut(&gid) {
            group.object_ids.retain(|id| id != object_id);
        }
        self.groups.retain(|g| !g.object_ids.is_empty());
    }
}
