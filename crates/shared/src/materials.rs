//! Built-in material presets offered by the material library panel

use serde::{Deserialize, Serialize};

use crate::{MaterialConfig, MaterialKind};

/// Library grouping of a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetCategory {
    Basic,
    Metal,
    Plastic,
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PresetCategory,
    pub config: MaterialConfig,
}

fn preset(
    id: &'static str,
    name: &'static str,
    category: PresetCategory,
    kind: MaterialKind,
    color: &str,
    metalness: Option<f64>,
    roughness: Option<f64>,
) -> MaterialPreset {
    MaterialPreset {
        id,
        name,
        category,
        config: MaterialConfig {
            kind,
            color: color.to_string(),
            metalness,
            roughness,
            wireframe: false,
            transparent: false,
            opacity: None,
        },
    }
}

/// All presets in library order
pub fn presets() -> Vec<MaterialPreset> {
    use MaterialKind::{Lambert, Phong, Physical, Standard, Toon};
    use PresetCategory::{Metal, Plastic, Special};

    let mut glass = preset("glass", "Glass", Special, Physical, "#ffffff", Some(0.0), Some(0.0));
    glass.config.transparent = true;
    glass.config.opacity = Some(0.5);

    vec![
        preset("standard-white", "White Standard", PresetCategory::Basic, Standard, "#ffffff", Some(0.0), Some(0.5)),
        preset("standard-gray", "Gray Standard", PresetCategory::Basic, Standard, "#808080", Some(0.0), Some(0.5)),
        preset("basic-red", "Red Basic", PresetCategory::Basic, MaterialKind::Basic, "#ff0000", None, None),
        preset("basic-green", "Green Basic", PresetCategory::Basic, MaterialKind::Basic, "#00ff00", None, None),
        preset("basic-blue", "Blue Basic", PresetCategory::Basic, MaterialKind::Basic, "#0000ff", None, None),
        preset("metal-gold", "Gold", Metal, Standard, "#ffd700", Some(1.0), Some(0.2)),
        preset("metal-silver", "Silver", Metal, Standard, "#c0c0c0", Some(1.0), Some(0.1)),
        preset("metal-copper", "Copper", Metal, Standard, "#b87333", Some(1.0), Some(0.3)),
        preset("metal-bronze", "Bronze", Metal, Standard, "#cd7f32", Some(1.0), Some(0.4)),
        preset("metal-iron", "Iron", Metal, Standard, "#4a4a4a", Some(1.0), Some(0.5)),
        preset("plastic-red", "Red Plastic", Plastic, Phong, "#ff3333", Some(0.0), Some(0.3)),
        preset("plastic-blue", "Blue Plastic", Plastic, Phong, "#3333ff", Some(0.0), Some(0.3)),
        preset("plastic-green", "Green Plastic", Plastic, Phong, "#33ff33", Some(0.0), Some(0.3)),
        preset("plastic-yellow", "Yellow Plastic", Plastic, Phong, "#ffff00", Some(0.0), Some(0.3)),
        preset("plastic-black", "Black Plastic", Plastic, Phong, "#1a1a1a", Some(0.0), Some(0.4)),
        glass,
        preset("rubber", "Rubber", Special, Standard, "#2a2a2a", Some(0.0), Some(0.9)),
        preset("wood", "Wood", Special, Lambert, "#8b4513", Some(0.0), Some(0.8)),
        preset("stone", "Stone", Special, Lambert, "#808080", Some(0.0), Some(0.9)),
        preset("toon", "Toon", Special, Toon, "#ff6b6b", None, None),
    ]
}

pub fn preset_by_id(id: &str) -> Option<MaterialPreset> {
    presets().into_iter().find(|p| p.id == id)
}
