use super::Component;
use crate::event::AppMsg;
use crate::pipeline::images::is_image_file;
use crate::widgets::common::focused_block;
use crate::widgets::theme::get_theme;
use crossbeam_channel::Sender;
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{
        List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

fn is_frames_document(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase() == "json")
        .unwrap_or(false)
}

pub struct FileBrowserState {
    pub current_dir: PathBuf,
    pub entries: Vec<PathBuf>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
    pub tx: Option<Sender<AppMsg>>,
    pub last_refresh: Instant,
}

impl Default for FileBrowserState {
    fn default() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut state = Self {
            current_dir,
            entries: Vec::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
            tx: None,
            last_refresh: Instant::now(),
        };
        state.refresh_entries();
        if !state.entries.is_empty() {
            state.list_state.select(Some(0));
        }
        state
    }
}

impl FileBrowserState {
    pub fn set_sender(&mut self, tx: Sender<AppMsg>) {
        self.tx = Some(tx);
    }

    fn refresh_entries(&mut self) {
        self.entries.clear();

        if self.current_dir.parent().is_some() {
            self.entries.push(PathBuf::from(".."));
        }

        if let Ok(entries) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    dirs.push(path);
                } else if is_image_file(&path) || is_frames_document(&path) {
                    files.push(path);
                }
            }

            dirs.sort();
            files.sort();

            self.entries.extend(dirs);
            self.entries.extend(files);
        }
    }

    fn send(&self, msg: AppMsg) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(msg);
        }
    }

    /// Enter on a directory descends; on a file, classifies it as either a
    /// frames document or a generator source image.
    fn enter_selected(&mut self) {
        let Some(idx) = self.list_state.selected() else {
            return;
        };
        let Some(path) = self.entries.get(idx).cloned() else {
            return;
        };

        if path.to_string_lossy() == ".." {
            if let Some(parent) = self.current_dir.parent() {
                self.current_dir = parent.to_path_buf();
                self.refresh_entries();
                self.list_state.select(Some(0));
                self.scroll_state = self.scroll_state.position(0);
            }
        } else if path.is_dir() {
            self.current_dir = path;
            self.refresh_entries();
            self.list_state.select(Some(0));
            self.scroll_state = self.scroll_state.position(0);
        } else if is_frames_document(&path) {
            self.send(AppMsg::FramesFileSelected(path));
        } else if is_image_file(&path) {
            self.send(AppMsg::SourceSelected(path));
        }
    }

    fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= self.entries.len().saturating_sub(1) => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
        self.scroll_state = self.scroll_state.position(i);
    }

    fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.entries.len().saturating_sub(1),
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.scroll_state = self.scroll_state.position(i);
    }
}

impl Component for FileBrowserState {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg> {
        match msg {
            AppMsg::Tick => {
                if self.last_refresh.elapsed() >= Duration::from_secs(1) {
                    self.refresh_entries();
                    self.last_refresh = Instant::now();

                    if let Some(selected) = self.list_state.selected()
                        && selected >= self.entries.len()
                    {
                        let new_selected = self.entries.len().saturating_sub(1);
                        self.list_state.select(Some(new_selected));
                    }
                }
            }
            AppMsg::Key(key) => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
                KeyCode::Enter => self.enter_selected(),
                KeyCode::Char('d') => {
                    // use the whole directory as the generator source
                    self.send(AppMsg::SourceSelected(self.current_dir.clone()));
                }
                _ => {}
            },
            _ => {}
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let theme = get_theme();

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let icon = if entry.is_dir() {
                    "📁"
                } else if is_frames_document(entry) {
                    "🎞"
                } else {
                    "🖼"
                };
                let name = entry.file_name().unwrap_or_default().to_string_lossy();
                ListItem::new(format!("{} {}", icon, name))
                    .style(Style::default().fg(theme.text_primary))
            })
            .collect();

        let block = focused_block("Browser", is_focused);
        let inner_area = block.inner(area);
        block.render(area, buf);

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(theme.text_highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        StatefulWidget::render(list, inner_area, buf, &mut self.list_state);

        self.scroll_state = self.scroll_state.content_length(self.entries.len());

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"));

        scrollbar.render(inner_area, buf, &mut self.scroll_state);
    }
}
