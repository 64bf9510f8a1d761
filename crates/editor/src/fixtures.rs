//! Factory functions for creating test data.
//!
//! Provides helpers to construct `SceneObject`s, groups and drag samples used
//! in tests and by the JSON command interface.

use shared::*;

// ── Object factories ────────────────────────────────────────────

/// Unit box resting on the ground plane.
pub fn box_object(id: &str) -> SceneObject {
    SceneObject::primitive(id, ObjectType::Box)
}

/// Box at a specific position.
pub fn box_at(id: &str, position: Vec3) -> SceneObject {
    SceneObject {
        position,
        ..box_object(id)
    }
}

/// Locked box at a specific position.
pub fn locked_box_at(id: &str, position: Vec3) -> SceneObject {
    SceneObject {
        locked: true,
        ..box_at(id, position)
    }
}

/// Sphere with a material preset applied.
pub fn sphere_with_preset(id: &str, preset_id: &str) -> SceneObject {
    let mut obj = SceneObject::primitive(id, ObjectType::Sphere);
    obj.material = preset_by_id(preset_id).map(|p| p.config);
    obj
}

pub fn point_light(id: &str) -> SceneObject {
    SceneObject::light(id, ObjectType::PointLight)
}

pub fn model(id: &str, path: &str) -> SceneObject {
    SceneObject::model(id, path)
}

/// One object of every type, ids equal to the type's default name.
pub fn one_of_each() -> Vec<SceneObject> {
    ObjectType::all()
        .iter()
        .map(|kind| match kind {
            ObjectType::Model => model("Model", "/assets/models/chair.glb"),
            _ => SceneObject::new(kind.default_name(), *kind),
        })
        .collect()
}

// ── Transform samples ───────────────────────────────────────────

/// Gizmo sample at a position with identity rotation and scale.
pub fn sample_at(position: Vec3) -> Transform {
    Transform {
        position,
        ..Transform::new()
    }
}

/// Gizmo sample with a rotation given in degrees.
pub fn sample_rotated_deg(degrees: Vec3) -> Transform {
    Transform {
        rotation: degrees.map(f64::to_radians),
        ..Transform::new()
    }
}

/// Gizmo sample with a uniform scale.
pub fn sample_scaled(factor: f64) -> Transform {
    Transform {
        scale: [factor; 3],
        ..Transform::new()
    }
}

// ── Convenience helpers ───────────────────────────────────────

/// Owned ID list from string slices.
pub fn ids(list: &[&str]) -> Vec<ObjectId> {
    list.iter().map(|s| s.to_string()).collect()
}
