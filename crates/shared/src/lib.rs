use serde::{Deserialize, Serialize};

pub mod materials;

pub use materials::{preset_by_id, presets, MaterialPreset, PresetCategory};

/// Unique identifier of an object in the scene
pub type ObjectId = String;

/// Unique identifier of an object group
pub type GroupId = String;

/// Position / rotation / scale triple
pub type Vec3 = [f64; 3];

fn default_true() -> bool {
    true
}

fn default_scale() -> Vec3 {
    [1.0, 1.0, 1.0]
}

// ============================================================================
// Object types
// ============================================================================

/// Kind of a placed scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectType {
    Box,
    Sphere,
    Cylinder,
    Plane,
    Torus,
    Cone,
    Model,
    AmbientLight,
    DirectionalLight,
    PointLight,
    SpotLight,
}

impl ObjectType {
    /// All object types, primitives first
    pub fn all() -> &'static [ObjectType] {
        &[
            ObjectType::Box,
            ObjectType::Sphere,
            ObjectType::Cylinder,
            ObjectType::Plane,
            ObjectType::Torus,
            ObjectType::Cone,
            ObjectType::Model,
            ObjectType::AmbientLight,
            ObjectType::DirectionalLight,
            ObjectType::PointLight,
            ObjectType::SpotLight,
        ]
    }

    pub fn is_light(&self) -> bool {
        matches!(
            self,
            ObjectType::AmbientLight
                | ObjectType::DirectionalLight
                | ObjectType::PointLight
                | ObjectType::SpotLight
        )
    }

    /// Parametric shape (not a light, not an imported model)
    pub fn is_primitive(&self) -> bool {
        !self.is_light() && *self != ObjectType::Model
    }

    /// Name given to freshly created objects of this type
    pub fn default_name(&self) -> &'static str {
        match self {
            ObjectType::Box => "Box",
            ObjectType::Sphere => "Sphere",
            ObjectType::Cylinder => "Cylinder",
            ObjectType::Plane => "Plane",
            ObjectType::Torus => "Torus",
            ObjectType::Cone => "Cone",
            ObjectType::Model => "Model",
            ObjectType::AmbientLight => "Ambient Light",
            ObjectType::DirectionalLight => "Directional Light",
            ObjectType::PointLight => "Point Light",
            ObjectType::SpotLight => "Spot Light",
        }
    }

    /// Default geometry parameters for primitives; empty for lights and models
    pub fn default_geometry_args(&self) -> Vec<f64> {
        match self {
            ObjectType::Box => vec![1.0, 1.0, 1.0],
            ObjectType::Sphere => vec![1.0, 32.0, 32.0],
            ObjectType::Cylinder => vec![1.0, 1.0, 2.0, 32.0],
            ObjectType::Plane => vec![10.0, 10.0],
            ObjectType::Torus => vec![1.0, 0.4, 16.0, 100.0],
            ObjectType::Cone => vec![1.0, 2.0, 32.0],
            _ => Vec::new(),
        }
    }

    /// Minimum number of geometry arguments a primitive needs
    fn min_geometry_args(&self) -> usize {
        match self {
            ObjectType::Box | ObjectType::Sphere | ObjectType::Cone => 3,
            ObjectType::Cylinder | ObjectType::Torus => 4,
            ObjectType::Plane => 2,
            _ => 0,
        }
    }
}

// ============================================================================
// Materials
// ============================================================================

/// Shading model of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Standard,
    Basic,
    Phong,
    Lambert,
    Physical,
    Toon,
}

impl MaterialKind {
    /// Physically based models that honour metalness/roughness
    pub fn is_pbr(&self) -> bool {
        matches!(self, MaterialKind::Standard | MaterialKind::Physical)
    }
}

/// Shading configuration of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConfig {
    #[serde(rename = "type", default)]
    pub kind: MaterialKind,
    /// Hex color, e.g. `#888888`
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metalness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    #[serde(default)]
    pub wireframe: bool,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Standard,
            color: "#888888".to_string(),
            metalness: Some(0.0),
            roughness: Some(0.5),
            wireframe: false,
            transparent: false,
            opacity: None,
        }
    }
}

// ============================================================================
// Scene objects
// ============================================================================

/// One placed entity: primitive, imported model or light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    #[serde(default)]
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in radians
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    /// Hidden objects are skipped by rendering and export but stay editable
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Locked objects are never moved by the gizmo
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialConfig>,
    /// Asset path, only for `ObjectType::Model`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_args: Option<Vec<f64>>,
}

impl SceneObject {
    /// Create an object of any type with the editor's defaults
    pub fn new(id: impl Into<ObjectId>, kind: ObjectType) -> Self {
        if kind.is_light() {
            Self::light(id, kind)
        } else if kind == ObjectType::Model {
            Self::model(id, "")
        } else {
            Self::primitive(id, kind)
        }
    }

    /// Primitive shape resting on the ground plane
    pub fn primitive(id: impl Into<ObjectId>, kind: ObjectType) -> Self {
        let is_plane = kind == ObjectType::Plane;
        Self {
            position: [0.0, if is_plane { 0.0 } else { 1.0 }, 0.0],
            rotation: if is_plane {
                [-std::f64::consts::FRAC_PI_2, 0.0, 0.0]
            } else {
                [0.0; 3]
            },
            geometry_args: Some(kind.default_geometry_args()),
            material: Some(MaterialConfig::default()),
            ..Self::blank(id.into(), kind.default_name().to_string(), kind)
        }
    }

    /// Light source; ambient lights sit at the origin and cast no shadow
    pub fn light(id: impl Into<ObjectId>, kind: ObjectType) -> Self {
        let ambient = kind == ObjectType::AmbientLight;
        Self {
            position: if ambient { [0.0; 3] } else { [5.0, 5.0, 5.0] },
            intensity: Some(if ambient { 0.5 } else { 1.0 }),
            light_color: Some("#ffffff".to_string()),
            cast_shadow: Some(!ambient),
            ..Self::blank(id.into(), kind.default_name().to_string(), kind)
        }
    }

    /// Imported model; the name is derived from the asset file name
    pub fn model(id: impl Into<ObjectId>, path: &str) -> Self {
        Self {
            model_path: Some(path.to_string()),
            ..Self::blank(id.into(), model_name_from_path(path), ObjectType::Model)
        }
    }

    fn blank(id: ObjectId, name: String, kind: ObjectType) -> Self {
        Self {
            id,
            name,
            kind,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: default_scale(),
            visible: true,
            locked: false,
            group_id: None,
            material: None,
            model_path: None,
            intensity: None,
            light_color: None,
            cast_shadow: None,
            geometry_args: None,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        self.position = transform.position;
        self.rotation = transform.rotation;
        self.scale = transform.scale;
    }

    /// Geometry arguments with defaults substituted when missing or too short
    pub fn effective_geometry_args(&self) -> Vec<f64> {
        match &self.geometry_args {
            Some(args) if args.len() >= self.kind.min_geometry_args() => args.clone(),
            _ => self.kind.default_geometry_args(),
        }
    }
}

/// `/assets/models/chair.glb` → `chair`
pub fn model_name_from_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or_default();
    let stem = file
        .strip_suffix(".glb")
        .or_else(|| file.strip_suffix(".gltf"))
        .unwrap_or(file);
    if stem.is_empty() {
        "Model".to_string()
    } else {
        stem.to_string()
    }
}

/// Named, flat collection of objects that can be selected and moved as one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectGroup {
    pub id: GroupId,
    pub name: String,
    /// Member ids in insertion order, no duplicates
    pub object_ids: Vec<ObjectId>,
}

impl ObjectGroup {
    pub fn contains(&self, object_id: &str) -> bool {
        self.object_ids.iter().any(|id| id == object_id)
    }
}

// ============================================================================
// Transforms
// ============================================================================

/// Object transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Global gizmo mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}
