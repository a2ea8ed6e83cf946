// Y-axis rotation and perspective projection

use glam::{Mat3, Vec3};

pub const DEFAULT_VIEW_DISTANCE: f32 = 250.0;

// Projection screen in text cells. The rendered canvas is later cropped to
// the slab's bounding box, so these only anchor the coordinate origin.
const SCREEN_W: f32 = 100.0;
const SCREEN_H: f32 = 100.0;

/// Rotate a point around the y axis.
pub fn rotate_y(point: Vec3, angle: f32) -> Vec3 {
    Mat3::from_rotation_y(angle) * point
}

/// Perspective-project a camera-space point onto the text screen.
///
/// x and y scale by `view_distance / (view_distance + z)`; points on or
/// behind the eye plane are culled.
pub fn project(point: Vec3, view_distance: f32) -> Option<(i32, i32)> {
    let denom = view_distance + point.z;
    if denom <= 0.0 {
        return None;
    }
    let factor = view_distance / denom;
    let x = (SCREEN_W / 2.0 + point.x * factor) as i32;
    let y = (SCREEN_H / 2.0 + point.y * factor) as i32;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_rotate_zero_is_identity() {
        let p = Vec3::new(3.0, -2.0, 7.0);
        let r = rotate_y(p, 0.0);
        assert!((r - p).length() < 1e-5);
    }

    #[test]
    fn test_rotate_half_turn_mirrors_x_and_z() {
        let r = rotate_y(Vec3::new(1.0, 5.0, 2.0), PI);
        assert!((r.x - -1.0).abs() < 1e-5);
        assert!((r.y - 5.0).abs() < 1e-5);
        assert!((r.z - -2.0).abs() < 1e-5);
    }

    #[test]
    fn test_quarter_turn_moves_x_into_z() {
        let r = rotate_y(Vec3::new(1.0, 0.0, 0.0), PI / 2.0);
        assert!(r.x.abs() < 1e-5);
        assert!((r.z - -1.0).abs() < 1e-5);
    }

    #[test]
    fn test_project_centers_origin() {
        assert_eq!(project(Vec3::ZERO, 250.0), Some((50, 50)));
    }

    #[test]
    fn test_project_shrinks_with_depth() {
        let near = project(Vec3::new(40.0, 0.0, -100.0), 250.0).unwrap();
        let far = project(Vec3::new(40.0, 0.0, 100.0), 250.0).unwrap();
        assert!(near.0 > far.0);
        assert!(far.0 > 50);
    }

    #[test]
    fn test_points_behind_eye_plane_are_culled() {
        assert_eq!(project(Vec3::new(0.0, 0.0, -250.0), 250.0), None);
        assert_eq!(project(Vec3::new(0.0, 0.0, -300.0), 250.0), None);
    }
}
