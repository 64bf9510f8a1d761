//! Keyboard shortcut handling
//!
//! Maps key presses from the host page to editor commands. The host reports
//! whether a text field has focus; shortcuts are ignored while typing.

use serde::{Deserialize, Serialize};
use shared::TransformMode;

use crate::command::EditorCommand;
use crate::state::EditorState;

/// A key press as reported by the browser (`KeyboardEvent.key` naming)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyPress {
    pub key: String,
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub command: bool,
    pub shift: bool,
    pub typing: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_command(mut self) -> Self {
        self.command = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Command bound to a key press in the current state, if any
pub fn shortcut_command(state: &EditorState, key: &KeyPress) -> Option<EditorCommand> {
    // Don't handle shortcuts when a text field is focused
    if key.typing {
        return None;
    }
    let k = key.key.to_lowercase();
    let primary = state.selection().primary().cloned();

    match (k.as_str(), key.command, key.shift) {
        // Ctrl+Z undo, Ctrl+Shift+Z or Ctrl+Y redo
        ("z", true, false) => Some(EditorCommand::Undo),
        ("z", true, true) | ("y", true, _) => Some(EditorCommand::Redo),
        ("d", true, _) => primary.map(|id| EditorCommand::DuplicateObject { id }),
        ("a", true, _) => Some(EditorCommand::SelectAll),
        ("e", true, _) => Some(EditorCommand::ExportCode),
        ("g", true, false) => {
            (state.selection().count() > 0).then(|| EditorCommand::GroupSelected {
                name: "Group".to_string(),
            })
        }
        ("delete" | "backspace", false, _) => {
            (state.selection().count() > 0).then_some(EditorCommand::RemoveSelected)
        }
        ("escape", _, _) => Some(if state.is_dragging() {
            EditorCommand::CancelDrag
        } else {
            EditorCommand::ClearSelection
        }),
        ("w", false, false) => Some(EditorCommand::SetTransformMode {
            mode: TransformMode::Translate,
        }),
        ("e", false, false) => Some(EditorCommand::SetTransformMode {
            mode: TransformMode::Rotate,
        }),
        ("r", false, false) => Some(EditorCommand::SetTransformMode {
            mode: TransformMode::Scale,
        }),
        _ => None,
    }
}
