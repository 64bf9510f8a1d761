//! Grid, rotation and scale snapping for gizmo samples

use shared::{Transform, TransformMode, Vec3};

use crate::state::settings::EditorSettings;

/// Round `value` to the nearest multiple of `step`; identity for unusable steps
pub fn snap_value(value: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

pub fn snap_vec3(v: Vec3, step: f64) -> Vec3 {
    v.map(|c| snap_value(c, step))
}

/// Snap Euler angles (radians) to a step given in degrees
pub fn snap_rotation(rotation: Vec3, step_degrees: f64) -> Vec3 {
    rotation.map(|r| snap_value(r.to_degrees(), step_degrees).to_radians())
}

/// Snap the component `mode` manipulates, if that kind of snapping is enabled.
///
/// `mode` is the effective mode, i.e. after modifier overrides.
pub fn snap_transform(transform: &Transform, mode: TransformMode, settings: &EditorSettings) -> Transform {
    let mut out = *transform;
    match mode {
        TransformMode::Translate if settings.snap_to_grid => {
            out.position = snap_vec3(out.position, settings.snap_size);
        }
        TransformMode::Rotate if settings.snap_rotation => {
            out.rotation = snap_rotation(out.rotation, settings.rotation_step);
        }
        TransformMode::Scale if settings.snap_scale => {
            out.scale = snap_vec3(out.scale, settings.scale_step);
        }
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_snap_value() {
        assert_eq!(snap_value(0.74, 0.5), 0.5);
        assert_eq!(snap_value(0.76, 0.5), 1.0);
        assert_eq!(snap_value(-1.3, 1.0), -1.0);
    }

    #[test]
    fn test_snap_value_bad_step_is_identity() {
        assert_eq!(snap_value(0.37, 0.0), 0.37);
        assert_eq!(snap_value(0.37, -1.0), 0.37);
        assert_eq!(snap_value(0.37, f64::NAN), 0.37);
        assert_eq!(snap_value(0.37, f64::INFINITY), 0.37);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for step in [0.1, 0.25, 0.5, 1.0, 15.0] {
            for v in [-3.7, -0.05, 0.0, 0.33, 1.26, 7.9, 123.456] {
                let once = snap_value(v, step);
                assert_relative_eq!(snap_value(once, step), once, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_snap_rotation_degrees() {
        // 80 degrees snaps to 90 with a 15 degree step
        let r = snap_rotation([80f64.to_radians(), 0.0, 0.0], 15.0);
        assert_relative_eq!(r[0], FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(r[1], 0.0);
    }

    #[test]
    fn test_snap_transform_translate_only_touches_position() {
        let settings = EditorSettings::default();
        let t = Transform {
            position: [0.74, 1.1, -0.2],
            rotation: [0.1, 0.2, 0.3],
            scale: [1.23, 1.0, 1.0],
        };
        let out = snap_transform(&t, TransformMode::Translate, &settings);
        assert_eq!(out.position, [0.5, 1.0, 0.0]);
        assert_eq!(out.rotation, t.rotation);
        assert_eq!(out.scale, t.scale);
    }

    #[test]
    fn test_snap_transform_respects_toggles() {
        let mut settings = EditorSettings {
            snap_to_grid: false,
            ..Default::default()
        };
        let t = Transform {
            position: [0.74, 0.0, 0.0],
            rotation: [0.3, 0.0, 0.0],
            scale: [1.26, 1.0, 1.0],
        };
        assert_eq!(snap_transform(&t, TransformMode::Translate, &settings), t);
        assert_eq!(snap_transform(&t, TransformMode::Rotate, &settings), t);
        assert_eq!(snap_transform(&t, TransformMode::Scale, &settings), t);

        settings.snap_scale = true;
        let out = snap_transform(&t, TransformMode::Scale, &settings);
        assert_relative_eq!(out.scale[0], 1.3, epsilon = 1e-9);
        assert_eq!(out.position, t.position);
    }
}
