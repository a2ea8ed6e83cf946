// Image to ASCII occupancy grid conversion

use anyhow::{Result, bail};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use imageproc::contrast::{ThresholdType, threshold};
use serde::{Deserialize, Serialize};

/// Which pixels of the source count as solid ink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkSelection {
    /// Near-black pixels are solid (dark artwork on a light backdrop).
    #[default]
    Dark,
    /// Near-white pixels are solid (light artwork on a dark backdrop).
    Light,
}

// Luma cutoffs for the binary mask. Dark selects luma <= 30,
// light selects luma > 229.
const DARK_LUMA_CUTOFF: u8 = 30;
const LIGHT_LUMA_CUTOFF: u8 = 229;

// Fraction of a tile's pixels that must pass the mask for the cell to ink.
const CELL_COVERAGE: f32 = 0.9;

/// Row-major boolean grid; `true` cells carry ink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl AsciiGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![false; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_inked(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, inked: bool) {
        self.cells[y * self.width + x] = inked;
    }

    pub fn inked_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

/// Convert an image into an occupancy grid `columns` cells wide.
///
/// The image is flattened onto a backdrop opposite to the ink selection,
/// resized so its width is an exact multiple of `columns`, thresholded to a
/// binary mask, then tiled; a cell inks when at least 90% of its tile passes.
pub fn grid_from_image(
    image: &DynamicImage,
    columns: u32,
    ink: InkSelection,
) -> Result<AsciiGrid> {
    if columns == 0 {
        bail!("column count must be at least 1");
    }

    let flattened = flatten_alpha(image, ink);
    let tile = flattened.width() / columns;
    if tile == 0 {
        bail!(
            "image is only {} pixels wide, narrower than {} columns",
            flattened.width(),
            columns
        );
    }

    // Trim the height to a tile multiple so the grid tiles exactly.
    let target_h = flattened.height() - flattened.height() % tile;
    if target_h == 0 {
        bail!(
            "image is only {} pixels tall, shorter than one {}-pixel tile",
            flattened.height(),
            tile
        );
    }
    let resized = imageops::resize(&flattened, tile * columns, target_h, FilterType::Triangle);

    let gray = imageops::grayscale(&resized);
    let mask = match ink {
        InkSelection::Dark => threshold(&gray, DARK_LUMA_CUTOFF, ThresholdType::BinaryInverted),
        InkSelection::Light => threshold(&gray, LIGHT_LUMA_CUTOFF, ThresholdType::Binary),
    };

    let rows = (target_h / tile) as usize;
    let needed = ((tile * tile) as f32 * CELL_COVERAGE).floor() as u32;
    let mut grid = AsciiGrid::new(columns as usize, rows);

    for gy in 0..rows as u32 {
        for gx in 0..columns {
            let mut passing = 0u32;
            for py in 0..tile {
                for px in 0..tile {
                    if mask.get_pixel(gx * tile + px, gy * tile + py)[0] == 255 {
                        passing += 1;
                    }
                }
            }
            grid.set(gx as usize, gy as usize, passing >= needed);
        }
    }

    Ok(grid)
}

/// Composite the image over an opaque backdrop so transparency cannot read
/// as ink. Dark selection flattens onto white, light onto black.
fn flatten_alpha(image: &DynamicImage, ink: InkSelection) -> RgbaImage {
    let level = match ink {
        InkSelection::Dark => 255,
        InkSelection::Light => 0,
    };
    let mut backdrop = RgbaImage::from_pixel(
        image.width(),
        image.height(),
        Rgba([level, level, level, 255]),
    );
    imageops::overlay(&mut backdrop, &image.to_rgba8(), 0, 0);
    backdrop
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_black_image(size: u32) -> DynamicImage {
        let mut img = RgbaImage::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let level = if x < size / 2 { 0 } else { 255 };
                img.put_pixel(x, y, Rgba([level, level, level, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_dark_ink_selects_black_half() {
        let grid = grid_from_image(&half_black_image(40), 4, InkSelection::Dark).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 4);
        for y in 0..4 {
            assert!(grid.is_inked(0, y));
            assert!(grid.is_inked(1, y));
            assert!(!grid.is_inked(2, y));
            assert!(!grid.is_inked(3, y));
        }
    }

    #[test]
    fn test_light_ink_selects_white_half() {
        let grid = grid_from_image(&half_black_image(40), 4, InkSelection::Light).unwrap();
        for y in 0..4 {
            assert!(!grid.is_inked(0, y));
            assert!(grid.is_inked(2, y));
        }
    }

    #[test]
    fn test_transparent_pixels_read_as_backdrop() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            32,
            32,
            Rgba([0, 0, 0, 0]),
        ));
        let grid = grid_from_image(&img, 4, InkSelection::Dark).unwrap();
        assert_eq!(grid.inked_count(), 0);
    }

    #[test]
    fn test_image_narrower_than_columns_is_an_error() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        assert!(grid_from_image(&img, 100, InkSelection::Dark).is_err());
    }

    #[test]
    fn test_zero_columns_is_an_error() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        assert!(grid_from_image(&img, 0, InkSelection::Dark).is_err());
    }
}
