//! Transform application for single objects and groups

use glam::DVec3;
use serde::{Deserialize, Serialize};
use shared::{ObjectId, Transform, TransformMode, Vec3};

use super::SceneState;

/// Which transform components a gizmo tick writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformUpdate {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
}

impl TransformUpdate {
    /// Only the component the given mode manipulates
    pub fn for_mode(mode: TransformMode, transform: &Transform) -> Self {
        match mode {
            TransformMode::Translate => Self {
                position: Some(transform.position),
                ..Default::default()
            },
            TransformMode::Rotate => Self {
                rotation: Some(transform.rotation),
                ..Default::default()
            },
            TransformMode::Scale => Self {
                scale: Some(transform.scale),
                ..Default::default()
            },
        }
    }
}

fn mean(values: impl Iterator<Item = Vec3>) -> Option<DVec3> {
    let (sum, n) = values.fold((DVec3::ZERO, 0usize), |(sum, n), v| {
        (sum + DVec3::from_array(v), n + 1)
    });
    (n > 0).then(|| sum / n as f64)
}

impl SceneState {
    /// IDs of group members the gizmo may move
    pub fn unlocked_members(&self, group_id: &str) -> Vec<ObjectId> {
        self.group_members(group_id)
            .into_iter()
            .filter(|o| !o.locked)
            .map(|o| o.id.clone())
            .collect()
    }

    /// Gizmo pivot of a group: centroid position, mean rotation and mean scale
    /// of the unlocked members. `None` when no member can move.
    pub fn group_pivot(&self, group_id: &str) -> Option<Transform> {
        let members: Vec<_> = self
            .group_members(group_id)
            .into_iter()
            .filter(|o| !o.locked)
            .collect();
        let position = mean(members.iter().map(|o| o.position))?;
        let rotation = mean(members.iter().map(|o| o.rotation))?;
        let scale = mean(members.iter().map(|o| o.scale))?;
        Some(Transform {
            position: position.to_array(),
            rotation: rotation.to_array(),
            scale: scale.to_array(),
        })
    }

    /// Overwrite one object's transform. Locked or missing objects are left alone.
    pub fn apply_object_transform(&mut self, id: &str, transform: &Transform, commit: bool) -> bool {
        match self.get_object_mut(id) {
            Some(obj) if !obj.locked => obj.set_transform(transform),
            Some(_) => return false,
            None => {
                tracing::debug!("apply_object_transform: {id} not found");
                return false;
            }
        }
        if commit {
            self.commit();
        } else {
            self.version += 1;
        }
        true
    }

    /// Move a group as one unit.
    ///
    /// Translation is rigid: every unlocked member keeps its offset from the
    /// current centroid. Rotation and scale are written as the same value to
    /// every unlocked member. Locked members never move.
    pub fn apply_group_transform(
        &mut self,
        group_id: &str,
        update: &TransformUpdate,
        commit: bool,
    ) -> bool {
        let ids = self.unlocked_members(group_id);
        if ids.is_empty() {
            tracing::debug!("apply_group_transform: {group_id} has no movable members");
            return false;
        }

        let delta = match (update.position, self.group_pivot(group_id)) {
            (Some(target), Some(pivot)) => {
                DVec3::from_array(target) - DVec3::from_array(pivot.position)
            }
            _ => DVec3::ZERO,
        };

        for id in &ids {
            let Some(obj) = self.get_object_mut(id) else {
                continue;
            };
            if update.position.is_some() {
                obj.position = (DVec3::from_array(obj.position) + delta).to_array();
            }
            if let Some(rotation) = update.rotation {
                obj.rotation = rotation;
            }
            if let Some(scale) = update.scale {
                obj.scale = scale;
            }
        }

        if commit {
            self.commit();
        } else {
            self.version += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shared::{ObjectType, SceneObject};

    fn placed(id: &str, position: Vec3) -> SceneObject {
        let mut obj = SceneObject::primitive(id, ObjectType::Box);
        obj.position = position;
        obj
    }

    fn grouped(objects: Vec<SceneObject>) -> (SceneState, String) {
        let mut s = SceneState::default();
        let ids: Vec<ObjectId> = objects.iter().map(|o| o.id.clone()).collect();
        for obj in objects {
            s.add_object(obj);
        }
        let gid = s.create_group("G", &ids).unwrap();
        (s, gid)
    }

    #[test]
    fn test_group_pivot_is_centroid() {
        let (s, gid) = grouped(vec![placed("a", [0.0, 0.0, 0.0]), placed("b", [2.0, 4.0, 0.0])]);
        let pivot = s.group_pivot(&gid).unwrap();
        assert_eq!(pivot.position, [1.0, 2.0, 0.0]);
        assert_eq!(pivot.scale, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_group_pivot_ignores_locked() {
        let mut locked = placed("b", [10.0, 0.0, 0.0]);
        locked.locked = true;
        let (s, gid) = grouped(vec![placed("a", [2.0, 0.0, 0.0]), locked]);
        assert_eq!(s.group_pivot(&gid).unwrap().position, [2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_group_pivot_all_locked() {
        let mut a = placed("a", [0.0; 3]);
        a.locked = true;
        let (mut s, gid) = grouped(vec![a]);
        assert!(s.group_pivot(&gid).is_none());
        let update = TransformUpdate {
            position: Some([1.0, 0.0, 0.0]),
            ..Default::default()
        };
        let version = s.version();
        assert!(!s.apply_group_transform(&gid, &update, true));
        assert_eq!(s.version(), version);
    }

    #[test]
    fn test_group_translate_is_rigid() {
        let (mut s, gid) = grouped(vec![placed("a", [0.0, 0.0, 0.0]), placed("b", [2.0, 0.0, 0.0])]);
        let update = TransformUpdate {
            position: Some([5.0, 0.0, 0.0]),
            ..Default::default()
        };
        assert!(s.apply_group_transform(&gid, &update, false));
        assert_eq!(s.get_object("a").unwrap().position, [4.0, 0.0, 0.0]);
        assert_eq!(s.get_object("b").unwrap().position, [6.0, 0.0, 0.0]);
    }

    #[test]
    fn test_group_translate_skips_locked_member() {
        let mut c = placed("c", [10.0, 3.0, 0.0]);
        c.locked = true;
        let (mut s, gid) = grouped(vec![placed("a", [0.0; 3]), placed("b", [2.0, 0.0, 0.0]), c]);
        let update = TransformUpdate {
            position: Some([1.0, 1.0, 1.0]),
            ..Default::default()
        };
        s.apply_group_transform(&gid, &update, true);
        let a = s.get_object("a").unwrap().position;
        let b = s.get_object("b").unwrap().position;
        assert_relative_eq!(a[0], 0.0);
        assert_relative_eq!(b[0], 2.0);
        assert_relative_eq!(a[1], 1.0);
        assert_eq!(s.get_object("c").unwrap().position, [10.0, 3.0, 0.0]);
    }

    #[test]
    fn test_group_rotation_and_scale_are_uniform() {
        let mut b = placed("b", [2.0, 0.0, 0.0]);
        b.rotation = [0.0, 1.0, 0.0];
        let (mut s, gid) = grouped(vec![placed("a", [0.0; 3]), b]);
        let update = TransformUpdate {
            rotation: Some([0.0, 0.5, 0.0]),
            scale: Some([2.0, 2.0, 2.0]),
            ..Default::default()
        };
        s.apply_group_transform(&gid, &update, false);
        for id in ["a", "b"] {
            let obj = s.get_object(id).unwrap();
            assert_eq!(obj.rotation, [0.0, 0.5, 0.0]);
            assert_eq!(obj.scale, [2.0, 2.0, 2.0]);
        }
        // Positions untouched without a translation component
        assert_eq!(s.get_object("b").unwrap().position, [2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_apply_object_transform_commit_flag() {
        let mut s = SceneState::default();
        s.add_object(placed("a", [0.0; 3]));
        let t = Transform {
            position: [1.0, 2.0, 3.0],
            ..Transform::new()
        };
        assert!(s.apply_object_transform("a", &t, false));
        assert_eq!(s.history().len(), 2);
        assert!(s.apply_object_transform("a", &t, true));
        assert_eq!(s.history().len(), 3);
        assert!(!s.apply_object_transform("ghost", &t, true));
    }

    #[test]
    fn test_locked_object_not_transformed() {
        let mut obj = placed("a", [0.0; 3]);
        obj.locked = true;
        let mut s = SceneState::default();
        s.add_object(obj);
        let t = Transform {
            position: [9.0, 9.0, 9.0],
            ..Transform::new()
        };
        assert!(!s.apply_object_transform("a", &t, true));
        assert_eq!(s.get_object("a").unwrap().position, [0.0; 3]);
    }

    #[test]
    fn test_update_for_mode() {
        let t = Transform {
            position: [1.0, 0.0, 0.0],
            rotation: [0.0, 2.0, 0.0],
            scale: [3.0, 3.0, 3.0],
        };
        let u = TransformUpdate::for_mode(TransformMode::Rotate, &t);
        assert_eq!(u.rotation, Some([0.0, 2.0, 0.0]));
        assert!(u.position.is_none() && u.scale.is_none());
    }
}
