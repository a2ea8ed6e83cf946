// Background worker for frame generation

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use image::GenericImageView;
use std::path::{Path, PathBuf};
use std::thread;

use crate::event::AppMsg;
use crate::pipeline::generator::{self, GeneratorOptions};
use crate::pipeline::{frame_io, images};

pub struct GeneratorWorker {
    tx: Sender<AppMsg>,
}

impl GeneratorWorker {
    pub fn new(tx: Sender<AppMsg>) -> Self {
        Self { tx }
    }

    /// Generate frames from `source` (an image file or a directory of
    /// images), persist them to `output`, and hand them to the player.
    pub fn start_generation(&self, source: PathBuf, output: PathBuf, options: GeneratorOptions) {
        let tx = self.tx.clone();

        thread::spawn(move || {
            if let Err(e) = Self::run_generation(source, &output, &options, &tx) {
                let _ = tx.send(AppMsg::GenerationFailed(format!("{:#}", e)));
            }
        });
    }

    fn run_generation(
        source: PathBuf,
        output: &Path,
        options: &GeneratorOptions,
        tx: &Sender<AppMsg>,
    ) -> Result<()> {
        let source = images::resolve_source(&source)?;
        let _ = tx.send(AppMsg::GenerationStarted(source.clone()));

        let image = image::open(&source)
            .with_context(|| format!("Failed to open source image {}", source.display()))?;
        let _ = tx.send(AppMsg::LogMessage(format!(
            "Loaded {} ({}x{})",
            source.display(),
            image.width(),
            image.height()
        )));

        let frames = generator::generate(&image, options, |done, total| {
            let _ = tx.send(AppMsg::GenerationProgress(done, total));
        })?;

        frame_io::save_frames(&frames, output)?;
        let _ = tx.send(AppMsg::LogMessage(format!(
            "Wrote {} frames to {}",
            frames.len(),
            output.display()
        )));

        let count = frames.len();
        let _ = tx.send(AppMsg::FramesLoaded(frames));
        let _ = tx.send(AppMsg::GenerationCompleted(count));
        Ok(())
    }
}
