//! React-Three-Fiber component export
//!
//! Turns the scene objects into a standalone `CustomScene` component. Lights
//! are emitted first, then meshes inside one `<group>`. Hidden objects are left
//! out; grouping and lock state have no meaning in the output.

use std::fmt::Write as _;

use shared::{MaterialConfig, MaterialKind, ObjectType, SceneObject, Vec3};

/// Default file name offered for the generated component
pub const DEFAULT_FILE_NAME: &str = "CustomScene.tsx";

const HEADER: &str = "import { Canvas } from '@react-three/fiber';
import { OrbitControls } from '@react-three/drei';
import * as THREE from 'three';";

const LIGHT_INDENT: &str = "      ";
const MESH_INDENT: &str = "        ";

fn fmt_vec(v: &Vec3) -> String {
    format!("[{}, {}, {}]", v[0], v[1], v[2])
}

fn fmt_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn light_tag(kind: ObjectType) -> Option<&'static str> {
    match kind {
        ObjectType::AmbientLight => Some("ambientLight"),
        ObjectType::DirectionalLight => Some("directionalLight"),
        ObjectType::PointLight => Some("pointLight"),
        ObjectType::SpotLight => Some("spotLight"),
        _ => None,
    }
}

fn geometry_tag(kind: ObjectType) -> &'static str {
    match kind {
        ObjectType::Sphere => "sphereGeometry",
        ObjectType::Cylinder => "cylinderGeometry",
        ObjectType::Plane => "planeGeometry",
        ObjectType::Torus => "torusGeometry",
        ObjectType::Cone => "coneGeometry",
        _ => "boxGeometry",
    }
}

fn material_tag(kind: MaterialKind) -> &'static str {
    match kind {
        MaterialKind::Standard => "meshStandardMaterial",
        MaterialKind::Basic => "meshBasicMaterial",
        MaterialKind::Phong => "meshPhongMaterial",
        MaterialKind::Lambert => "meshLambertMaterial",
        MaterialKind::Physical => "meshPhysicalMaterial",
        MaterialKind::Toon => "meshToonMaterial",
    }
}

fn material_props(material: &MaterialConfig) -> Vec<String> {
    let mut props = vec![format!("color=\"{}\"", material.color)];
    if material.kind.is_pbr() {
        if let Some(m) = material.metalness {
            props.push(format!("metalness={{{m}}}"));
        }
        if let Some(r) = material.roughness {
            props.push(format!("roughness={{{r}}}"));
        }
    }
    if material.wireframe {
        props.push("wireframe".to_string());
    }
    if material.transparent {
        props.push("transparent".to_string());
        props.push(format!("opacity={{{}}}", material.opacity.unwrap_or(1.0)));
    }
    props
}

fn light_jsx(light: &SceneObject) -> Option<String> {
    let tag = light_tag(light.kind)?;
    let i = LIGHT_INDENT;
    let color = light.light_color.as_deref().unwrap_or("#ffffff");
    if light.kind == ObjectType::AmbientLight {
        return Some(format!(
            "{i}<{tag} intensity={{{}}} color=\"{color}\" />",
            light.intensity.unwrap_or(0.5)
        ));
    }
    Some(format!(
        "{i}<{tag}\n{i}  position={{{}}}\n{i}  intensity={{{}}}\n{i}  color=\"{color}\"\n{i}  castShadow={{{}}}\n{i}/>",
        fmt_vec(&light.position),
        light.intensity.unwrap_or(1.0),
        light.cast_shadow.unwrap_or(false),
    ))
}

fn mesh_jsx(obj: &SceneObject) -> String {
    let i = MESH_INDENT;
    if obj.kind == ObjectType::Model {
        let path = obj.model_path.as_deref().unwrap_or_default();
        return format!(
            "{i}{{/* Model: {} - Path: {path} */}}\n{i}{{/* Load this model using useGLTF hook */}}",
            obj.name
        );
    }

    let args = format!("args={{[{}]}}", fmt_list(&obj.effective_geometry_args()));
    let (material, props) = match &obj.material {
        Some(m) => (material_tag(m.kind), material_props(m).join(" ")),
        None => (material_tag(MaterialKind::Standard), String::new()),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{i}<mesh");
    let _ = writeln!(out, "{i}  position={{{}}}", fmt_vec(&obj.position));
    let _ = writeln!(out, "{i}  rotation={{{}}}", fmt_vec(&obj.rotation));
    let _ = writeln!(out, "{i}  scale={{{}}}", fmt_vec(&obj.scale));
    let _ = writeln!(out, "{i}  castShadow");
    let _ = writeln!(out, "{i}  receiveShadow");
    let _ = writeln!(out, "{i}>");
    let _ = writeln!(out, "{i}  <{} {args} />", geometry_tag(obj.kind));
    let _ = writeln!(out, "{i}  <{material} {props} />");
    let _ = write!(out, "{i}</mesh>");
    out
}

/// Generate the component source for the visible objects
pub fn export_to_component(objects: &[SceneObject]) -> String {
    let visible = objects.iter().filter(|o| o.visible);
    let (lights, meshes): (Vec<&SceneObject>, Vec<&SceneObject>) =
        visible.partition(|o| o.kind.is_light());

    let lights_jsx = lights
        .iter()
        .filter_map(|l| light_jsx(l))
        .collect::<Vec<_>>()
        .join("\n");
    let meshes_jsx = meshes
        .iter()
        .map(|m| mesh_jsx(m))
        .collect::<Vec<_>>()
        .join("\n\n");

    tracing::debug!("Exported {} lights and {} meshes", lights.len(), meshes.len());

    format!(
        "{HEADER}

export default function CustomScene() {{
  return (
    <Canvas camera={{{{ position: [5, 5, 5], fov: 50 }}}} shadows>
      {{/* Lights */}}
{lights_jsx}

      {{/* Scene Objects */}}
      <group>
{meshes_jsx}
      </group>

      <OrbitControls makeDefault />
    </Canvas>
  );
}}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene_is_valid_component() {
        let code = export_to_component(&[]);
        assert!(code.starts_with("import { Canvas }"));
        assert!(code.contains("export default function CustomScene()"));
        assert!(code.contains("<Canvas camera={{ position: [5, 5, 5], fov: 50 }} shadows>"));
        assert!(code.contains("<OrbitControls makeDefault />"));
    }

    #[test]
    fn test_mesh_output() {
        let mut b = SceneObject::primitive("b", ObjectType::Box);
        b.position = [1.5, 1.0, -2.0];
        let code = export_to_component(&[b]);
        assert!(code.contains("position={[1.5, 1, -2]}"));
        assert!(code.contains("<boxGeometry args={[1, 1, 1]} />"));
        assert!(code.contains(r##"<meshStandardMaterial color="#888888" metalness={0} roughness={0.5} />"##));
    }

    #[test]
    fn test_non_pbr_material_drops_metalness() {
        let mut b = SceneObject::primitive("b", ObjectType::Sphere);
        b.material = shared::preset_by_id("plastic-red").map(|p| p.config);
        let code = export_to_component(&[b]);
        assert!(code.contains(r##"<meshPhongMaterial color="#ff3333" />"##));
    }

    #[test]
    fn test_transparent_material() {
        let mut b = SceneObject::primitive("b", ObjectType::Box);
        b.material = shared::preset_by_id("glass").map(|p| p.config);
        let code = export_to_component(&[b]);
        assert!(code.contains("transparent opacity={0.5}"));
    }

    #[test]
    fn test_lights_come_first() {
        let b = SceneObject::primitive("b", ObjectType::Box);
        let l = SceneObject::light("l", ObjectType::PointLight);
        let a = SceneObject::light("a", ObjectType::AmbientLight);
        let code = export_to_component(&[b, l, a]);
        let light_pos = code.find("<pointLight").unwrap();
        let mesh_pos = code.find("<mesh").unwrap();
        assert!(light_pos < mesh_pos);
        assert!(code.contains(r##"<ambientLight intensity={0.5} color="#ffffff" />"##));
        assert!(code.contains("castShadow={true}"));
    }

    #[test]
    fn test_hidden_objects_skipped() {
        let mut b = SceneObject::primitive("b", ObjectType::Torus);
        b.visible = false;
        let code = export_to_component(&[b]);
        assert!(!code.contains("torusGeometry"));
    }

    #[test]
    fn test_model_placeholder() {
        let m = SceneObject::model("m", "/assets/models/chair.glb");
        let code = export_to_component(&[m]);
        assert!(code.contains("{/* Model: chair - Path: /assets/models/chair.glb */}"));
    }
}
