// Z-buffered rasterization of projected voxels into a text frame

pub const FACE_GLYPH: char = '#';
pub const SIDE_GLYPH: char = '@';
pub const BLANK_GLYPH: char = '.';

/// A voxel after rotation and projection, ready to rasterize.
#[derive(Clone, Copy, Debug)]
pub struct Projected {
    pub x: i32,
    pub y: i32,
    /// Camera-space z, used to keep only the nearest surface per cell.
    pub depth: f32,
    pub glyph: char,
}

/// Canvas geometry shared by every frame of an animation. `min_x`/`min_y`
/// come from the unrotated projection's bounding box so all frames crop
/// identically.
#[derive(Clone, Copy, Debug)]
pub struct CanvasSpec {
    pub min_x: i32,
    pub min_y: i32,
    pub width: usize,
    pub height: usize,
    pub padding: i32,
}

/// Rasterize one frame. Cells keep the glyph of the nearest projected voxel;
/// everything else stays blank.
pub fn render_frame(points: &[Projected], canvas: &CanvasSpec) -> String {
    let mut rows = vec![vec![BLANK_GLYPH; canvas.width]; canvas.height];
    let mut zbuffer = vec![vec![f32::INFINITY; canvas.width]; canvas.height];

    for p in points {
        let fx = p.x - canvas.min_x + canvas.padding;
        let fy = p.y - canvas.min_y + canvas.padding;
        if fx < 0 || fy < 0 {
            continue;
        }
        let (fx, fy) = (fx as usize, fy as usize);
        if fx >= canvas.width || fy >= canvas.height {
            continue;
        }
        if p.depth < zbuffer[fy][fx] {
            zbuffer[fy][fx] = p.depth;
            rows[fy][fx] = p.glyph;
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
