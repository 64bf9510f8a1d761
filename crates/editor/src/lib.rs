// Library crate: the editor state machine plus the JSON command interface used
// by the browser bindings, the HTTP server and integration tests.

pub mod assets;
pub mod command;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod shortcuts;
pub mod state;

/// Gizmo interaction: drag sessions and snapping. Drawing the gizmo is left to
/// the renderer.
pub mod viewport {
    pub mod gizmo;
    pub mod snap;
}
