use super::Component;
use crate::event::AppMsg;
use crate::pipeline::images;
use crate::widgets::common::focused_block;
use crate::widgets::theme::get_theme;
use anyhow::{Context, Result};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, StatefulWidget, Widget},
};
use ratatui_image::{StatefulImage, picker::Picker, protocol::StatefulProtocol};
use std::path::{Path, PathBuf};

/// Source-image preview, rendered with the terminal's best graphics protocol.
pub struct SourceViewState {
    picker: Picker,
    protocol: Option<StatefulProtocol>,
    path: Option<PathBuf>,
}

impl SourceViewState {
    pub fn new(picker: Picker) -> Self {
        Self {
            picker,
            protocol: None,
            path: None,
        }
    }

    fn load(&mut self, selection: &Path) -> Result<()> {
        let path = images::resolve_source(selection)?;
        let image = image::open(&path)
            .with_context(|| format!("Failed to open source image {}", path.display()))?;
        self.protocol = Some(self.picker.new_resize_protocol(image));
        self.path = Some(path);
        Ok(())
    }
}

impl Component for SourceViewState {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg> {
        if let AppMsg::SourceSelected(path) = msg
            && let Err(e) = self.load(path)
        {
            self.protocol = None;
            self.path = None;
            return Some(AppMsg::ErrorOccurred(format!("{:#}", e)));
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let block = focused_block("Source", is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        match &mut self.protocol {
            Some(protocol) => {
                StatefulImage::default().render(inner, buf, protocol);
            }
            None => {
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from("No source image"),
                ])
                .alignment(Alignment::Center)
                .style(Style::default().fg(get_theme().text_secondary))
                .render(inner, buf);
            }
        }
    }
}
