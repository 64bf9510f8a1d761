//! Read-only views derived from the editor state

use std::collections::HashMap;

use serde::Serialize;
use shared::{ObjectGroup, ObjectType, SceneObject};

use super::{object_display_name, object_icon, EditorState};

/// Undo/redo availability for toolbar buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub len: usize,
    pub index: usize,
}

/// An object line in the hierarchy panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyItem<'a> {
    pub label: String,
    pub icon: &'static str,
    pub object: &'a SceneObject,
}

impl<'a> HierarchyItem<'a> {
    fn new(object: &'a SceneObject) -> Self {
        Self {
            label: object_display_name(object),
            icon: object_icon(object.kind),
            object,
        }
    }
}

/// One row of the scene hierarchy panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HierarchyEntry<'a> {
    Group {
        group: &'a ObjectGroup,
        members: Vec<HierarchyItem<'a>>,
    },
    Object(HierarchyItem<'a>),
}

impl EditorState {
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.scene.get_object(self.selection.primary()?)
    }

    /// Selected objects in selection order
    pub fn selected_objects(&self) -> Vec<&SceneObject> {
        self.selection
            .all()
            .iter()
            .filter_map(|id| self.scene.get_object(id))
            .collect()
    }

    pub fn selected_group(&self) -> Option<&ObjectGroup> {
        self.scene.get_group(self.selection.group()?)
    }

    pub fn objects_by_type(&self) -> HashMap<ObjectType, Vec<&SceneObject>> {
        let mut map: HashMap<ObjectType, Vec<&SceneObject>> = HashMap::new();
        for obj in self.scene.objects() {
            map.entry(obj.kind).or_default().push(obj);
        }
        map
    }

    pub fn lights(&self) -> Vec<&SceneObject> {
        self.scene.objects().iter().filter(|o| o.kind.is_light()).collect()
    }

    /// Primitive meshes (no lights, no imported models)
    pub fn meshes(&self) -> Vec<&SceneObject> {
        self.scene.objects().iter().filter(|o| o.kind.is_primitive()).collect()
    }

    pub fn models(&self) -> Vec<&SceneObject> {
        self.scene
            .objects()
            .iter()
            .filter(|o| o.kind == ObjectType::Model)
            .collect()
    }

    pub fn history_status(&self) -> HistoryStatus {
        let history = self.scene.history();
        HistoryStatus {
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
            len: history.len(),
            index: history.index(),
        }
    }

    /// Groups with their members first, then ungrouped objects in scene order
    pub fn hierarchy(&self) -> Vec<HierarchyEntry<'_>> {
        let groups = self.scene.groups().iter().map(|group| HierarchyEntry::Group {
            group,
            members: self
                .scene
                .group_members(&group.id)
                .into_iter()
                .map(HierarchyItem::new)
                .collect(),
        });
        let loose = self
            .scene
            .objects()
            .iter()
            .filter(|o| o.group_id.is_none())
            .map(|object| HierarchyEntry::Object(HierarchyItem::new(object)));
        groups.chain(loose).collect()
    }
}
