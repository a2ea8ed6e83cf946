// Full image-to-animation generation

use anyhow::{Result, anyhow, bail};
use image::DynamicImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::ascii::{self, InkSelection};
use super::projection;
use super::renderer::{BLANK_GLYPH, CanvasSpec, FACE_GLYPH, Projected, SIDE_GLYPH, render_frame};
use super::voxel::{self, Voxel};
use crate::model::frames::FrameSet;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Grid width in cells; the source image is tiled to this many columns.
    #[serde(default = "default_columns")]
    pub columns: u32,

    /// Slab thickness in voxel layers.
    #[serde(default = "default_depth")]
    pub depth: u32,

    /// Frames per full revolution.
    #[serde(default = "default_frame_count")]
    pub frame_count: u32,

    #[serde(default)]
    pub ink: InkSelection,

    /// Distance from the eye to the projection origin.
    #[serde(default = "default_view_distance")]
    pub view_distance: f32,

    /// Blank border around the rendered slab, in cells.
    #[serde(default = "default_padding")]
    pub padding: i32,
}

fn default_columns() -> u32 {
    100
}

fn default_depth() -> u32 {
    11
}

fn default_frame_count() -> u32 {
    50
}

fn default_view_distance() -> f32 {
    projection::DEFAULT_VIEW_DISTANCE
}

fn default_padding() -> i32 {
    5
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            depth: default_depth(),
            frame_count: default_frame_count(),
            ink: InkSelection::default(),
            view_distance: default_view_distance(),
            padding: default_padding(),
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            bail!("column count must be at least 1");
        }
        if self.depth == 0 {
            bail!("slab depth must be at least 1");
        }
        if self.frame_count == 0 {
            bail!("frame count must be at least 1");
        }
        if self.view_distance <= 0.0 {
            bail!("view distance must be positive");
        }
        if self.padding < 0 {
            bail!("padding cannot be negative");
        }
        Ok(())
    }
}

/// Generate one full revolution of the image as text frames.
///
/// `progress` is called once per rendered frame with (done, total); frames
/// render in parallel, so calls arrive in completion order.
pub fn generate<F>(image: &DynamicImage, options: &GeneratorOptions, progress: F) -> Result<FrameSet>
where
    F: Fn(usize, usize) + Sync,
{
    options.validate()?;

    let grid = ascii::grid_from_image(image, options.columns, options.ink)?;
    let voxels = voxel::extrude(&grid, options.depth);
    let center = voxel::centroid(&voxels)
        .ok_or_else(|| anyhow!("no pixels matched the ink selection"))?;

    // Recenter so rotation spins the slab in place.
    let centered: Vec<Voxel> = voxels
        .iter()
        .map(|v| Voxel {
            pos: v.pos - center,
            on_face: v.on_face,
        })
        .collect();

    let canvas = canvas_spec(&centered, options)?;

    let total = options.frame_count as usize;
    let done = AtomicUsize::new(0);

    let frames: Vec<String> = (0..options.frame_count)
        .into_par_iter()
        .map(|i| {
            let angle = i as f32 * (TAU / options.frame_count as f32);
            let frame = render_angle(&centered, angle, options, &canvas);
            progress(done.fetch_add(1, Ordering::SeqCst) + 1, total);
            frame
        })
        .collect();

    FrameSet::new(frames)
}

/// Frame geometry from the unrotated projection, so every frame of the
/// revolution crops to the same canvas.
fn canvas_spec(voxels: &[Voxel], options: &GeneratorOptions) -> Result<CanvasSpec> {
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;

    for v in voxels {
        if let Some((x, y)) = projection::project(v.pos, options.view_distance) {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x {
        bail!("every voxel projects behind the eye plane; increase view distance");
    }

    Ok(CanvasSpec {
        min_x,
        min_y,
        width: (max_x - min_x + 1 + 2 * options.padding) as usize,
        height: (max_y - min_y + 1 + 2 * options.padding) as usize,
        padding: options.padding,
    })
}

fn render_angle(
    voxels: &[Voxel],
    angle: f32,
    options: &GeneratorOptions,
    canvas: &CanvasSpec,
) -> String {
    let points: Vec<Projected> = voxels
        .iter()
        .filter_map(|v| {
            let rotated = projection::rotate_y(v.pos, angle);
            projection::project(rotated, options.view_distance).map(|(x, y)| Projected {
                x,
                y,
                depth: rotated.z,
                glyph: if v.on_face { FACE_GLYPH } else { SIDE_GLYPH },
            })
        })
        .collect();

    render_frame(&points, canvas)
}

/// Glyph census of a frame, used by status panes and tests.
pub fn frame_ink_ratio(frame: &str) -> f32 {
    let total = frame.chars().filter(|c| *c != '\n').count();
    if total == 0 {
        return 0.0;
    }
    let inked = frame
        .chars()
        .filter(|c| *c != '\n' && *c != BLANK_GLYPH)
        .count();
    inked as f32 / total as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::Mutex;

    fn solid_black_image(size: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            size,
            size,
            Rgba([0, 0, 0, 255]),
        ))
    }

    fn small_options() -> GeneratorOptions {
        GeneratorOptions {
            columns: 10,
            depth: 3,
            frame_count: 8,
            ..GeneratorOptions::default()
        }
    }

    #[test]
    fn test_generate_produces_requested_frame_count() {
        let frames = generate(&solid_black_image(40), &small_options(), |_, _| {}).unwrap();
        assert_eq!(frames.len(), 8);
    }

    #[test]
    fn test_all_frames_share_canvas_dimensions() {
        let frames = generate(&solid_black_image(40), &small_options(), |_, _| {}).unwrap();
        let (cols, rows) = frames.canvas_size();
        for frame in frames.frames() {
            for line in frame.lines() {
                assert_eq!(line.len(), cols);
            }
            assert_eq!(frame.lines().count(), rows);
        }
    }

    #[test]
    fn test_every_frame_carries_ink() {
        let frames = generate(&solid_black_image(40), &small_options(), |_, _| {}).unwrap();
        for frame in frames.frames() {
            assert!(frame_ink_ratio(frame) > 0.0);
        }
    }

    #[test]
    fn test_progress_reaches_total() {
        let seen = Mutex::new(Vec::new());
        let frames = generate(&solid_black_image(40), &small_options(), |done, total| {
            seen.lock().unwrap().push((done, total));
        })
        .unwrap();
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), frames.len());
        assert!(seen.iter().any(|(done, total)| done == total));
    }

    #[test]
    fn test_blank_image_is_an_error() {
        let white = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            40,
            Rgba([255, 255, 255, 255]),
        ));
        assert!(generate(&white, &small_options(), |_, _| {}).is_err());
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let mut options = small_options();
        options.frame_count = 0;
        assert!(generate(&solid_black_image(40), &options, |_, _| {}).is_err());
        options = small_options();
        options.depth = 0;
        assert!(generate(&solid_black_image(40), &options, |_, _| {}).is_err());
    }
}
