//! JSON command protocol.
//!
//! Every editor operation has one variant here, so the browser bindings, the
//! stdin shell and integration tests all drive the editor the same way.

use serde::{Deserialize, Serialize};
use shared::{ObjectType, SceneObject, Transform, TransformMode, Vec3};
use thiserror::Error;

use crate::export::export_to_component;
use crate::state::scene::ObjectUpdate;
use crate::state::{EditorState, SettingsUpdate};
use crate::viewport::gizmo::ModifierKeys;

/// A command the editor can execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Insert a fully specified object.
    AddObject { object: SceneObject },
    /// Place a primitive with default geometry.
    AddPrimitive {
        #[serde(rename = "type")]
        kind: ObjectType,
    },
    /// Place a light with default intensity.
    AddLight {
        #[serde(rename = "type")]
        kind: ObjectType,
    },
    /// Place an imported model.
    AddModel { path: String },
    RemoveObject { id: String },
    /// Remove every selected object.
    RemoveSelected,
    /// Merge fields without recording history.
    UpdateObject { id: String, updates: ObjectUpdate },
    /// Merge fields as one undo step.
    UpdateObjectCommitted { id: String, updates: ObjectUpdate },
    DuplicateObject { id: String },
    ToggleLock { id: String },
    ToggleVisibility { id: String },
    ApplyMaterialPreset { id: String, preset: String },
    CreateGroup {
        name: String,
        #[serde(default)]
        object_ids: Vec<String>,
    },
    /// Group the current selection.
    GroupSelected { name: String },
    AddToGroup { group_id: String, object_id: String },
    RemoveFromGroup { object_id: String },
    DeleteGroup { group_id: String },
    UpdateGroup { group_id: String, name: String },
    /// Select an object; `id: null` clears.
    SelectObject {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        multi_select: bool,
    },
    /// Select a group; `id: null` leaves group mode.
    SelectGroup {
        #[serde(default)]
        id: Option<String>,
    },
    SelectAll,
    ClearSelection,
    Undo,
    Redo,
    /// Clear the entire scene and its history.
    ClearScene,
    SetTransformMode { mode: TransformMode },
    UpdateSettings { settings: SettingsUpdate },
    SetCamera {
        #[serde(default)]
        position: Option<Vec3>,
        #[serde(default)]
        target: Option<Vec3>,
    },
    /// Grab the gizmo on the current selection.
    BeginDrag,
    DragUpdate {
        transform: Transform,
        #[serde(default)]
        modifiers: ModifierKeys,
    },
    EndDrag {
        transform: Transform,
        #[serde(default)]
        modifiers: ModifierKeys,
    },
    /// Commit the last drag sample (pointer lost).
    FinishDrag,
    CancelDrag,
    /// Inspect the editor: objects, groups, selection, history.
    Inspect,
    /// Generate the React-Three-Fiber component source.
    ExportCode,
}

/// Response from executing a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid command JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Full observable state, as returned by `inspect`
pub fn snapshot_json(state: &EditorState) -> serde_json::Value {
    let scene = state.scene();
    serde_json::json!({
        "version": state.version(),
        "objects": scene.objects(),
        "groups": scene.groups(),
        "hierarchy": state.hierarchy(),
        "selection": state.selection(),
        "transform_mode": state.transform_mode(),
        "settings": state.settings(),
        "camera": state.camera(),
        "history": state.history_status(),
        "gizmo": {
            "target": state.gizmo_target(),
            "transform": state.gizmo_transform(),
            "dragging": state.is_dragging(),
        },
    })
}

/// Execute a single command.
pub fn execute_command(state: &mut EditorState, cmd: EditorCommand) -> CommandResponse {
    use serde_json::json;

    match cmd {
        EditorCommand::AddObject { object } => {
            let id = state.add_object(object);
            CommandResponse::ok_with_data(json!({ "id": id }))
        }

        EditorCommand::AddPrimitive { kind } => match state.add_primitive(kind) {
            Some(id) => CommandResponse::ok_with_data(json!({ "id": id })),
            None => CommandResponse::err(format!("{kind:?} is not a primitive")),
        },

        EditorCommand::AddLight { kind } => match state.add_light(kind) {
            Some(id) => CommandResponse::ok_with_data(json!({ "id": id })),
            None => CommandResponse::err(format!("{kind:?} is not a light")),
        },

        EditorCommand::AddModel { path } => {
            let id = state.add_model(&path);
            CommandResponse::ok_with_data(json!({ "id": id }))
        }

        EditorCommand::RemoveObject { id } => {
            let removed = state.remove_object(&id);
            CommandResponse::ok_with_data(json!({ "removed": removed }))
        }

        EditorCommand::RemoveSelected => {
            let removed = state.remove_selected();
            CommandResponse::ok_with_data(json!({ "removed": removed }))
        }

        EditorCommand::UpdateObject { id, updates } => {
            let updated = state.update_object(&id, &updates);
            CommandResponse::ok_with_data(json!({ "updated": updated }))
        }

        EditorCommand::UpdateObjectCommitted { id, updates } => {
            let updated = state.update_object_committed(&id, &updates);
            CommandResponse::ok_with_data(json!({ "updated": updated }))
        }

        EditorCommand::DuplicateObject { id } => {
            let new_id = state.duplicate_object(&id);
            CommandResponse::ok_with_data(json!({ "id": new_id }))
        }

        EditorCommand::ToggleLock { id } => {
            let toggled = state.toggle_lock(&id);
            let locked = state.scene().get_object(&id).map(|o| o.locked);
            CommandResponse::ok_with_data(json!({ "toggled": toggled, "locked": locked }))
        }

        EditorCommand::ToggleVisibility { id } => {
            let toggled = state.toggle_visibility(&id);
            let visible = state.scene().get_object(&id).map(|o| o.visible);
            CommandResponse::ok_with_data(json!({ "toggled": toggled, "visible": visible }))
        }

        EditorCommand::ApplyMaterialPreset { id, preset } => {
            let applied = state.apply_material_preset(&id, &preset);
            CommandResponse::ok_with_data(json!({ "applied": applied }))
        }

        EditorCommand::CreateGroup { name, object_ids } => {
            let group_id = state.create_group(&name, &object_ids);
            CommandResponse::ok_with_data(json!({ "group_id": group_id }))
        }

        EditorCommand::GroupSelected { name } => {
            let group_id = state.group_selected(&name);
            CommandResponse::ok_with_data(json!({ "group_id": group_id }))
        }

        EditorCommand::AddToGroup {
            group_id,
            object_id,
        } => {
            let added = state.add_to_group(&group_id, &object_id);
            CommandResponse::ok_with_data(json!({ "added": added }))
        }

        EditorCommand::RemoveFromGroup { object_id } => {
            let removed = state.remove_from_group(&object_id);
            CommandResponse::ok_with_data(json!({ "removed": removed }))
        }

        EditorCommand::DeleteGroup { group_id } => {
            let deleted = state.delete_group(&group_id);
            CommandResponse::ok_with_data(json!({ "deleted": deleted }))
        }

        EditorCommand::UpdateGroup { group_id, name } => {
            let updated = state.update_group(&group_id, &name);
            CommandResponse::ok_with_data(json!({ "updated": updated }))
        }

        EditorCommand::SelectObject { id, multi_select } => {
            let selected = state.select_object(id.as_deref(), multi_select);
            CommandResponse::ok_with_data(json!({
                "selected": selected,
                "primary": state.selection().primary(),
                "ids": state.selection().all(),
            }))
        }

        EditorCommand::SelectGroup { id } => {
            let selected = state.select_group(id.as_deref());
            CommandResponse::ok_with_data(json!({ "selected": selected }))
        }

        EditorCommand::SelectAll => {
            state.select_all();
            CommandResponse::ok_with_data(json!({ "ids": state.selection().all() }))
        }

        EditorCommand::ClearSelection => {
            state.clear_selection();
            CommandResponse::ok()
        }

        EditorCommand::Undo => {
            let success = state.undo();
            CommandResponse::ok_with_data(json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = state.redo();
            CommandResponse::ok_with_data(json!({ "redone": success }))
        }

        EditorCommand::ClearScene => {
            state.clear_scene();
            CommandResponse::ok()
        }

        EditorCommand::SetTransformMode { mode } => {
            state.set_transform_mode(mode);
            CommandResponse::ok()
        }

        EditorCommand::UpdateSettings { settings } => match state.update_settings(&settings) {
            Ok(()) => CommandResponse::ok_with_data(json!({ "settings": state.settings() })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::SetCamera { position, target } => {
            state.set_camera(position, target);
            CommandResponse::ok_with_data(json!({ "camera": state.camera() }))
        }

        EditorCommand::BeginDrag => match state.begin_drag() {
            Some(target) => CommandResponse::ok_with_data(json!({ "target": target })),
            None => CommandResponse::err("nothing to drag"),
        },

        EditorCommand::DragUpdate {
            transform,
            modifiers,
        } => match state.drag_update(&transform, modifiers) {
            Some(live) => CommandResponse::ok_with_data(json!({ "transform": live })),
            None => CommandResponse::err("no drag in progress"),
        },

        EditorCommand::EndDrag {
            transform,
            modifiers,
        } => {
            let committed = state.end_drag(&transform, modifiers);
            CommandResponse::ok_with_data(json!({ "committed": committed }))
        }

        EditorCommand::FinishDrag => {
            let committed = state.finish_drag();
            CommandResponse::ok_with_data(json!({ "committed": committed }))
        }

        EditorCommand::CancelDrag => {
            let cancelled = state.cancel_drag();
            CommandResponse::ok_with_data(json!({ "cancelled": cancelled }))
        }

        EditorCommand::Inspect => CommandResponse::ok_with_data(snapshot_json(state)),

        EditorCommand::ExportCode => {
            let code = export_to_component(state.scene().objects());
            CommandResponse::ok_with_data(json!({ "code": code }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(state: &mut EditorState, json: &str) -> Result<CommandResponse, CommandError> {
    let cmd: EditorCommand = serde_json::from_str(json)?;
    Ok(execute_command(state, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    state: &mut EditorState,
    json: &str,
) -> Result<Vec<CommandResponse>, CommandError> {
    let cmds: Vec<EditorCommand> = serde_json::from_str(json)?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(state, cmd))
        .collect())
}
