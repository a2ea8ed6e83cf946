// Extrusion of the occupancy grid into a voxel slab

use glam::Vec3;

use super::ascii::AsciiGrid;

/// One solid cell of the extruded slab. Voxels on the front or back layer
/// render with the face glyph, interior layers with the side glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
    pub pos: Vec3,
    pub on_face: bool,
}

/// Stack the grid `depth` layers deep along the z axis.
pub fn extrude(grid: &AsciiGrid, depth: u32) -> Vec<Voxel> {
    let mut voxels = Vec::new();
    for z in 0..depth {
        let on_face = z == 0 || z == depth - 1;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.is_inked(x, y) {
                    voxels.push(Voxel {
                        pos: Vec3::new(x as f32, y as f32, z as f32),
                        on_face,
                    });
                }
            }
        }
    }
    voxels
}

/// Midpoint of the slab's bounding box. Rotation happens around this point;
/// without recentering the slab swings around the y axis and out of frame.
pub fn centroid(voxels: &[Voxel]) -> Option<Vec3> {
    let first = voxels.first()?.pos;
    let mut min = first;
    let mut max = first;
    for v in voxels {
        min = min.min(v.pos);
        max = max.max(v.pos);
    }
    Some((min + max) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cell_grid() -> AsciiGrid {
        let mut grid = AsciiGrid::new(3, 2);
        grid.set(0, 0, true);
        grid.set(2, 1, true);
        grid
    }

    #[test]
    fn test_extrude_stacks_every_layer() {
        let voxels = extrude(&two_cell_grid(), 5);
        assert_eq!(voxels.len(), 2 * 5);
        assert!(voxels.iter().any(|v| v.pos == Vec3::new(2.0, 1.0, 4.0)));
    }

    #[test]
    fn test_only_outer_layers_are_faces() {
        let voxels = extrude(&two_cell_grid(), 3);
        for v in &voxels {
            assert_eq!(v.on_face, v.pos.z == 0.0 || v.pos.z == 2.0);
        }
    }

    #[test]
    fn test_depth_one_slab_is_all_face() {
        let voxels = extrude(&two_cell_grid(), 1);
        assert!(voxels.iter().all(|v| v.on_face));
    }

    #[test]
    fn test_centroid_is_bounding_box_midpoint() {
        let voxels = extrude(&two_cell_grid(), 5);
        // bounds: x 0..2, y 0..1, z 0..4
        assert_eq!(centroid(&voxels), Some(Vec3::new(1.0, 0.5, 2.0)));
    }

    #[test]
    fn test_centroid_of_empty_slab_is_none() {
        assert_eq!(centroid(&[]), None);
    }
}
