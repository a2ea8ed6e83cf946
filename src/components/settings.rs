use super::Component;
use crate::event::AppMsg;
use crate::pipeline::ascii::InkSelection;
use crate::pipeline::generator::GeneratorOptions;
use crate::widgets::common::focused_block;
use crate::widgets::theme::get_theme;
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Interval,
    Columns,
    Depth,
    FrameCount,
    Ink,
    ViewDistance,
    Padding,
}

const FIELDS: &[Field] = &[
    Field::Interval,
    Field::Columns,
    Field::Depth,
    Field::FrameCount,
    Field::Ink,
    Field::ViewDistance,
    Field::Padding,
];

/// Settings pane for playback interval and generator options. Changes are
/// broadcast so the app scheduler and the generator pane stay in sync.
pub struct SettingsState {
    pub options: GeneratorOptions,
    pub interval_ms: u64,
    selected: usize,
}

impl SettingsState {
    pub fn new(options: GeneratorOptions, interval_ms: u64) -> Self {
        Self {
            options,
            interval_ms,
            selected: 0,
        }
    }

    fn field(&self) -> Field {
        FIELDS[self.selected]
    }

    fn adjust(&mut self, increase: bool) -> Option<AppMsg> {
        match self.field() {
            Field::Interval => {
                self.interval_ms = if increase {
                    (self.interval_ms + 10).min(1000)
                } else {
                    self.interval_ms.saturating_sub(10).max(10)
                };
                return Some(AppMsg::IntervalChanged(self.interval_ms));
            }
            Field::Columns => {
                self.options.columns = if increase {
                    (self.options.columns + 10).min(400)
                } else {
                    self.options.columns.saturating_sub(10).max(10)
                };
            }
            Field::Depth => {
                self.options.depth = if increase {
                    (self.options.depth + 2).min(51)
                } else {
                    self.options.depth.saturating_sub(2).max(1)
                };
            }
            Field::FrameCount => {
                self.options.frame_count = if increase {
                    (self.options.frame_count + 5).min(500)
                } else {
                    self.options.frame_count.saturating_sub(5).max(5)
                };
            }
            Field::Ink => {
                self.options.ink = match self.options.ink {
                    InkSelection::Dark => InkSelection::Light,
                    InkSelection::Light => InkSelection::Dark,
                };
            }
            Field::ViewDistance => {
                self.options.view_distance = if increase {
                    (self.options.view_distance + 25.0).min(2000.0)
                } else {
                    (self.options.view_distance - 25.0).max(50.0)
                };
            }
            Field::Padding => {
                self.options.padding = if increase {
                    (self.options.padding + 1).min(20)
                } else {
                    (self.options.padding - 1).max(0)
                };
            }
        }
        Some(AppMsg::OptionsChanged(self.options.clone()))
    }

    fn value_text(&self, field: Field) -> String {
        match field {
            Field::Interval => format!("{} ms", self.interval_ms),
            Field::Columns => self.options.columns.to_string(),
            Field::Depth => self.options.depth.to_string(),
            Field::FrameCount => self.options.frame_count.to_string(),
            Field::Ink => match self.options.ink {
                InkSelection::Dark => "dark".to_string(),
                InkSelection::Light => "light".to_string(),
            },
            Field::ViewDistance => format!("{:.0}", self.options.view_distance),
            Field::Padding => self.options.padding.to_string(),
        }
    }

    fn label(field: Field) -> &'static str {
        match field {
            Field::Interval => "Tick interval",
            Field::Columns => "Columns",
            Field::Depth => "Slab depth",
            Field::FrameCount => "Frames per turn",
            Field::Ink => "Ink",
            Field::ViewDistance => "View distance",
            Field::Padding => "Padding",
        }
    }
}

impl Component for SettingsState {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg> {
        if let AppMsg::Key(key) = msg {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = if self.selected == 0 {
                        FIELDS.len() - 1
                    } else {
                        self.selected - 1
                    };
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.selected = (self.selected + 1) % FIELDS.len();
                }
                KeyCode::Left | KeyCode::Char('h') => return self.adjust(false),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
                    return self.adjust(true);
                }
                _ => {}
            }
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let theme = get_theme();
        let block = focused_block("Settings", is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = FIELDS
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let selected = i == self.selected;
                let marker = if selected { ">> " } else { "   " };
                let label_style = if selected {
                    Style::default()
                        .fg(theme.text_highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_primary)
                };
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{:<16}", Self::label(*field)), label_style),
                    Span::styled(
                        self.value_text(*field),
                        Style::default().fg(theme.text_primary),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
