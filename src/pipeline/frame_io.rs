// Frames document load/save (a JSON array of frame strings)

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::model::frames::FrameSet;

/// Load a frames document from a named path.
pub fn load_frames(path: &Path) -> Result<FrameSet> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read frames document {}", path.display()))?;
    let frames: Vec<String> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse frames document {}", path.display()))?;
    FrameSet::new(frames)
        .with_context(|| format!("Invalid frames document {}", path.display()))
}

/// Persist a frame set in the same shape `load_frames` reads.
pub fn save_frames(frames: &FrameSet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string(frames.frames())?;
    fs::write(path, data)
        .with_context(|| format!("Failed to write frames document {}", path.display()))
}
