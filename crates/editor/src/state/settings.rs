//! Editor settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Snap translation to the grid
    pub snap_to_grid: bool,
    /// Grid cell size in world units
    pub snap_size: f64,
    pub snap_rotation: bool,
    /// Rotation step in degrees
    pub rotation_step: f64,
    pub snap_scale: bool,
    pub scale_step: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            snap_size: 0.5,
            snap_rotation: false,
            rotation_step: 15.0,
            snap_scale: false,
            scale_step: 0.1,
        }
    }
}

/// Partial settings change; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_to_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_rotation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_step: Option<f64>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} must be a positive finite number, got {value}")]
    InvalidStep { field: &'static str, value: f64 },
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn check_step(field: &'static str, value: f64) -> Result<f64, SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::InvalidStep { field, value })
    }
}

impl EditorSettings {
    /// Load settings from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject non-positive or non-finite step sizes
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_step("snapSize", self.snap_size)?;
        check_step("rotationStep", self.rotation_step)?;
        check_step("scaleStep", self.scale_step)?;
        Ok(())
    }

    /// Merge a partial update. Nothing changes if any step is invalid.
    pub fn apply(&mut self, update: &SettingsUpdate) -> Result<(), SettingsError> {
        let mut next = self.clone();
        if let Some(v) = update.snap_to_grid {
            next.snap_to_grid = v;
        }
        if let Some(v) = update.snap_size {
            next.snap_size = check_step("snapSize", v)?;
        }
        if let Some(v) = update.snap_rotation {
            next.snap_rotation = v;
        }
        if let Some(v) = update.rotation_step {
            next.rotation_step = check_step("rotationStep", v)?;
        }
        if let Some(v) = update.snap_scale {
            next.snap_scale = v;
        }
        if let Some(v) = update.scale_step {
            next.scale_step = check_step("scaleStep", v)?;
        }
        *self = next;
        Ok(())
    }
}
