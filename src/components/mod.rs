use crate::event::AppMsg;
use ratatui::{buffer::Buffer, layout::Rect};

pub mod file_browser;
pub mod generator;
pub mod logs;
pub mod player;
pub mod settings;
pub mod source_view;

pub trait Component {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg>;

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool);
}
