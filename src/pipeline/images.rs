// Source image discovery

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Shallow scan of a directory for supported raster images, sorted by name.
pub fn scan_image_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            images.push(path.to_path_buf());
        }
    }
    images.sort();
    Ok(images)
}

/// Resolve a browser selection to a concrete source image: a file must be an
/// image, a directory yields its first image.
pub fn resolve_source(selection: &Path) -> Result<PathBuf> {
    if selection.is_dir() {
        let images = scan_image_dir(selection)?;
        match images.into_iter().next() {
            Some(first) => Ok(first),
            None => bail!("no images found in {}", selection.display()),
        }
    } else if is_image_file(selection) {
        Ok(selection.to_path_buf())
    } else {
        bail!("{} is not a supported image", selection.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_scan_finds_only_images_sorted() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "b.png");
        write_png(dir.path(), "a.png");
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let images = scan_image_dir(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_resolve_directory_picks_first_image() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "zz.png");
        let first = write_png(dir.path(), "aa.png");
        assert_eq!(resolve_source(dir.path()).unwrap(), first);
    }

    #[test]
    fn test_resolve_empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(resolve_source(dir.path()).is_err());
    }

    #[test]
    fn test_resolve_non_image_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "x").unwrap();
        assert!(resolve_source(&path).is_err());
    }
}
