use wasm_bindgen::prelude::*;

use scene_editor_lib::command::{execute_command, execute_json, execute_json_batch, snapshot_json};
use scene_editor_lib::export::export_to_component;
use scene_editor_lib::shortcuts::{shortcut_command, KeyPress};
use scene_editor_lib::state::{EditorSettings, EditorState};

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Editor instance owned by the page; every call goes through the JSON
/// command protocol.
#[wasm_bindgen]
pub struct WasmEditor {
    state: EditorState,
}

#[wasm_bindgen]
impl WasmEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEditor {
        WasmEditor {
            state: EditorState::new(),
        }
    }

    /// Editor with settings restored from JSON (e.g. localStorage)
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(settings_json: &str) -> Result<WasmEditor, JsError> {
        let settings: EditorSettings = serde_json::from_str(settings_json).map_err(to_js_error)?;
        settings.validate().map_err(to_js_error)?;
        Ok(WasmEditor {
            state: EditorState::with_settings(settings),
        })
    }

    /// Run one command (object) or several (array); returns the response JSON
    pub fn execute(&mut self, command_json: &str) -> Result<String, JsError> {
        if command_json.trim_start().starts_with('[') {
            let responses = execute_json_batch(&mut self.state, command_json).map_err(to_js_error)?;
            serde_json::to_string(&responses).map_err(to_js_error)
        } else {
            let response = execute_json(&mut self.state, command_json).map_err(to_js_error)?;
            serde_json::to_string(&response).map_err(to_js_error)
        }
    }

    /// Full observable state as JSON
    pub fn snapshot(&self) -> String {
        snapshot_json(&self.state).to_string()
    }

    /// Change counter; re-read `snapshot()` when it moves
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Handle a keyboard shortcut. Returns the response JSON, or `None` when
    /// the key is not bound in the current state.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(
        &mut self,
        key: &str,
        command: bool,
        shift: bool,
        typing: bool,
    ) -> Result<Option<String>, JsError> {
        let press = KeyPress {
            key: key.to_string(),
            command,
            shift,
            typing,
        };
        let Some(cmd) = shortcut_command(&self.state, &press) else {
            return Ok(None);
        };
        let response = execute_command(&mut self.state, cmd);
        serde_json::to_string(&response).map(Some).map_err(to_js_error)
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Export a scene (JSON array of objects) as component source
#[wasm_bindgen(js_name = exportComponent)]
pub fn export_component(objects_json: &str) -> Result<String, JsError> {
    let objects: Vec<shared::SceneObject> = serde_json::from_str(objects_json).map_err(to_js_error)?;
    Ok(export_to_component(&objects))
}

/// Models returned by the listing endpoint; anything unreadable counts as none
#[wasm_bindgen(js_name = parseModelList)]
pub fn parse_model_list(response_json: &str) -> js_sys::Array {
    let models = serde_json::from_str::<serde_json::Value>(response_json)
        .ok()
        .and_then(|v| {
            v.get("models")?
                .as_array()
                .map(|list| list.iter().filter_map(|m| m.as_str().map(String::from)).collect::<Vec<_>>())
        })
        .unwrap_or_else(|| {
            web_sys::console::warn_1(&"Model list unavailable".into());
            Vec::new()
        });
    models.into_iter().map(JsValue::from).collect()
}
