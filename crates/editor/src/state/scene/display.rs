//! Display helper functions for the scene tree

use shared::{ObjectType, SceneObject};

/// Get display name for an object
pub fn object_display_name(obj: &SceneObject) -> String {
    format!("{} ({})", obj.name, short_id(&obj.id))
}

/// Get icon for an object type
pub fn object_icon(kind: ObjectType) -> &'static str {
    match kind {
        ObjectType::Box => "[B]",
        ObjectType::Sphere => "[S]",
        ObjectType::Cylinder => "[Y]",
        ObjectType::Plane => "[P]",
        ObjectType::Torus => "[O]",
        ObjectType::Cone => "[K]",
        ObjectType::Model => "[M]",
        ObjectType::AmbientLight => "[A]",
        ObjectType::DirectionalLight => "[D]",
        ObjectType::PointLight => "[*]",
        ObjectType::SpotLight => "[^]",
    }
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
