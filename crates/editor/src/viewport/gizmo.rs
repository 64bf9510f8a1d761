//! Gizmo drag session
//!
//! A drag is an explicit state machine: `begin_drag` captures the target and
//! the pre-drag transforms of every object it may move, each `drag_update`
//! snaps the sample and writes it silently, and `end_drag` writes the final
//! sample and records a single undo step. Every tick re-reads the scene, so a
//! target deleted mid-drag simply stops receiving updates.

use serde::{Deserialize, Serialize};
use shared::{GroupId, ObjectId, Transform, TransformMode};

use super::snap::snap_transform;
use crate::state::scene::{ObjectUpdate, TransformUpdate};
use crate::state::EditorState;

/// Momentary mode overrides held while nominally translating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierKeys {
    pub rotate: bool,
    pub scale: bool,
}

impl ModifierKeys {
    pub const NONE: Self = Self {
        rotate: false,
        scale: false,
    };
}

/// Mode the gizmo actually operates in. Overrides only apply in translate
/// mode, and scale wins over rotate.
pub fn effective_mode(nominal: TransformMode, mods: ModifierKeys) -> TransformMode {
    match nominal {
        TransformMode::Translate if mods.scale => TransformMode::Scale,
        TransformMode::Translate if mods.rotate => TransformMode::Rotate,
        mode => mode,
    }
}

/// What the gizmo is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum GizmoTarget {
    Object(ObjectId),
    Group(GroupId),
}

#[derive(Debug, Clone)]
struct DragState {
    target: GizmoTarget,
    /// Last snapped sample, written back to the gizmo
    live: Option<Transform>,
    /// Pre-drag transforms of every object the target can move
    original: Vec<(ObjectId, Transform)>,
}

#[derive(Debug, Clone, Default)]
enum GizmoPhase {
    #[default]
    Idle,
    Dragging(DragState),
}

/// Drag session owned by the editor state
#[derive(Debug, Clone, Default)]
pub struct GizmoSession {
    phase: GizmoPhase,
}

impl GizmoSession {
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GizmoPhase::Dragging(_))
    }

    pub fn target(&self) -> Option<&GizmoTarget> {
        match &self.phase {
            GizmoPhase::Dragging(drag) => Some(&drag.target),
            GizmoPhase::Idle => None,
        }
    }

    /// Snapped transform of the last drag tick
    pub fn live_transform(&self) -> Option<Transform> {
        match &self.phase {
            GizmoPhase::Dragging(drag) => drag.live,
            GizmoPhase::Idle => None,
        }
    }

    fn take(&mut self) -> Option<DragState> {
        match std::mem::take(&mut self.phase) {
            GizmoPhase::Dragging(drag) => Some(drag),
            GizmoPhase::Idle => None,
        }
    }
}

impl EditorState {
    /// Resolve the gizmo attachment from the current selection
    pub fn gizmo_target(&self) -> Option<GizmoTarget> {
        if let Some(gid) = self.selection.group() {
            return self
                .scene
                .group_pivot(gid)
                .map(|_| GizmoTarget::Group(gid.clone()));
        }
        let obj = self.scene.get_object(self.selection.primary()?)?;
        match &obj.group_id {
            Some(gid) => self
                .scene
                .group_pivot(gid)
                .map(|_| GizmoTarget::Group(gid.clone())),
            None if obj.locked => None,
            None => Some(GizmoTarget::Object(obj.id.clone())),
        }
    }

    /// Where the gizmo should be drawn
    pub fn gizmo_transform(&self) -> Option<Transform> {
        if let Some(live) = self.gizmo.live_transform() {
            return Some(live);
        }
        match self.gizmo_target()? {
            GizmoTarget::Object(id) => self.scene.get_object(&id).map(|o| o.transform()),
            GizmoTarget::Group(gid) => self.scene.group_pivot(&gid),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gizmo.is_dragging()
    }

    pub fn gizmo(&self) -> &GizmoSession {
        &self.gizmo
    }

    /// Start dragging the current gizmo target. Returns `None` when there is
    /// nothing to drag or a drag is already running.
    pub fn begin_drag(&mut self) -> Option<GizmoTarget> {
        if self.gizmo.is_dragging() {
            tracing::debug!("begin_drag: drag already in progress");
            return None;
        }
        let target = self.gizmo_target()?;
        let ids = match &target {
            GizmoTarget::Object(id) => vec![id.clone()],
            GizmoTarget::Group(gid) => self.scene.unlocked_members(gid),
        };
        let original = ids
            .into_iter()
            .filter_map(|id| {
                let transform = self.scene.get_object(&id)?.transform();
                Some((id, transform))
            })
            .collect();

        tracing::debug!("Drag started on {target:?}");
        self.gizmo.phase = GizmoPhase::Dragging(DragState {
            target: target.clone(),
            live: None,
            original,
        });
        Some(target)
    }

    /// Snap and apply one drag sample without recording history. Returns the
    /// snapped transform for the gizmo to display.
    pub fn drag_update(&mut self, sample: &Transform, mods: ModifierKeys) -> Option<Transform> {
        let target = self.gizmo.target()?.clone();
        let mode = effective_mode(self.transform_mode, mods);
        let snapped = snap_transform(sample, mode, &self.settings);

        match &target {
            GizmoTarget::Object(id) => {
                self.scene.apply_object_transform(id, &snapped, false);
            }
            GizmoTarget::Group(gid) => {
                let update = TransformUpdate::for_mode(mode, &snapped);
                self.scene.apply_group_transform(gid, &update, false);
            }
        }

        if let GizmoPhase::Dragging(drag) = &mut self.gizmo.phase {
            drag.live = Some(snapped);
        }
        Some(snapped)
    }

    /// Apply the release sample and commit the whole gesture as one undo step.
    /// Returns whether a step was recorded.
    pub fn end_drag(&mut self, sample: &Transform, mods: ModifierKeys) -> bool {
        if self.drag_update(sample, mods).is_none() {
            return false;
        }
        self.finish_drag()
    }

    /// Commit whatever the last tick applied (e.g. pointer lost mid-drag)
    pub fn finish_drag(&mut self) -> bool {
        let Some(drag) = self.gizmo.take() else {
            return false;
        };
        let moved = drag.original.iter().any(|(id, before)| {
            self.scene
                .get_object(id)
                .is_some_and(|obj| obj.transform() != *before)
        });
        if moved {
            self.scene.commit();
            tracing::debug!("Drag on {:?} committed", drag.target);
        }
        moved
    }

    /// Abort the drag and put every touched object back where it started
    pub fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.gizmo.take() else {
            return false;
        };
        for (id, before) in &drag.original {
            self.scene.update_object(id, &ObjectUpdate::transform(before));
        }
        tracing::debug!("Drag on {:?} cancelled", drag.target);
        true
    }
}
