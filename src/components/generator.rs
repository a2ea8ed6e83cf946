use super::Component;
use crate::event::AppMsg;
use crate::pipeline::generator::GeneratorOptions;
use crate::pipeline_worker::GeneratorWorker;
use crate::widgets::common::focused_block;
use crate::widgets::theme::get_theme;
use crossbeam_channel::Sender;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationStatus {
    Idle,
    Running,
    Completed(usize),
    Failed(String),
}

/// Generation control pane: tracks the selected source, kicks off the
/// background worker, shows progress.
pub struct GeneratorState {
    pub status: GenerationStatus,
    pub source: Option<PathBuf>,
    pub output: PathBuf,
    pub options: GeneratorOptions,
    pub frames_done: usize,
    pub total_frames: usize,
    pub tx: Option<Sender<AppMsg>>,
}

impl GeneratorState {
    pub fn new(output: PathBuf, options: GeneratorOptions) -> Self {
        Self {
            status: GenerationStatus::Idle,
            source: None,
            output,
            options,
            frames_done: 0,
            total_frames: 0,
            tx: None,
        }
    }

    pub fn set_sender(&mut self, tx: Sender<AppMsg>) {
        self.tx = Some(tx);
    }

    fn send(&self, msg: AppMsg) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(msg);
        }
    }

    fn start_generation(&mut self) {
        if self.status == GenerationStatus::Running {
            self.send(AppMsg::LogMessage(
                "Generation already running".to_string(),
            ));
            return;
        }
        let Some(source) = self.source.clone() else {
            self.status = GenerationStatus::Failed("No source image selected".to_string());
            self.send(AppMsg::ErrorOccurred(
                "Select a source image before generating".to_string(),
            ));
            return;
        };

        self.status = GenerationStatus::Running;
        self.frames_done = 0;
        self.total_frames = self.options.frame_count as usize;

        if let Some(tx) = &self.tx {
            let worker = GeneratorWorker::new(tx.clone());
            worker.start_generation(source, self.output.clone(), self.options.clone());
        }
    }
}

impl Component for GeneratorState {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg> {
        match msg {
            AppMsg::SourceSelected(path) => {
                self.source = Some(path.clone());
                self.send(AppMsg::LogMessage(format!(
                    "Source selected: {}",
                    path.display()
                )));
            }
            AppMsg::OptionsChanged(options) => {
                self.options = options.clone();
            }
            AppMsg::GenerationRequested => {
                self.start_generation();
            }
            AppMsg::GenerationStarted(source) => {
                self.send(AppMsg::LogMessage(format!(
                    "Generating from {}",
                    source.display()
                )));
            }
            AppMsg::GenerationProgress(done, total) => {
                self.frames_done = *done;
                self.total_frames = *total;
            }
            AppMsg::GenerationCompleted(count) => {
                self.status = GenerationStatus::Completed(*count);
            }
            AppMsg::GenerationFailed(error) => {
                self.status = GenerationStatus::Failed(error.clone());
            }
            _ => {}
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let theme = get_theme();
        let block = focused_block("Generator", is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let (status_text, status_color) = match &self.status {
            GenerationStatus::Idle => ("Idle".to_string(), theme.status_idle),
            GenerationStatus::Running => ("Running".to_string(), theme.status_running),
            GenerationStatus::Completed(count) => {
                (format!("Completed ({} frames)", count), theme.status_completed)
            }
            GenerationStatus::Failed(error) => (format!("Failed: {}", error), theme.status_failed),
        };

        let mut lines = vec![Line::from(vec![
            Span::styled("Status: ", Style::default().fg(theme.text_secondary)),
            Span::styled(status_text, Style::default().fg(status_color)),
        ])];

        match &self.source {
            Some(source) => lines.push(Line::from(vec![
                Span::styled("Source: ", Style::default().fg(theme.text_secondary)),
                Span::raw(source.display().to_string()),
            ])),
            None => lines.push(Line::from(Span::styled(
                "Source: none (pick one in the browser)",
                Style::default().fg(theme.text_secondary),
            ))),
        }
        lines.push(Line::from(vec![
            Span::styled("Output: ", Style::default().fg(theme.text_secondary)),
            Span::raw(self.output.display().to_string()),
        ]));
        lines.push(Line::from(Span::styled(
            "Press 'g' to generate",
            Style::default().fg(theme.text_secondary),
        )));

        Paragraph::new(lines).render(chunks[0], buf);

        if self.status == GenerationStatus::Running && self.total_frames > 0 {
            let ratio = self.frames_done as f64 / self.total_frames as f64;
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(theme.status_running))
                .ratio(ratio.clamp(0.0, 1.0))
                .label(format!("{}/{}", self.frames_done, self.total_frames));
            gauge.render(chunks[1], buf);
        }
    }
}
