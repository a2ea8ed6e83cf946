use crossterm::event::KeyEvent;
use std::path::PathBuf;

use crate::model::frames::FrameSet;
use crate::pipeline::generator::GeneratorOptions;

#[derive(Clone, Debug)]
pub enum AppMsg {
    Tick,
    Key(KeyEvent),
    Quit,

    // Browser selection
    SourceSelected(PathBuf),
    FramesFileSelected(PathBuf),

    // Playback
    FramesLoaded(FrameSet),

    // Settings
    OptionsChanged(GeneratorOptions),
    IntervalChanged(u64),

    // Generation control
    GenerationRequested,
    GenerationStarted(PathBuf),
    GenerationProgress(usize, usize),
    GenerationCompleted(usize),
    GenerationFailed(String),

    // General
    ErrorOccurred(String),
    LogMessage(String),
}
