use super::Component;
use crate::event::AppMsg;
use crate::model::frames::Player;
use crate::widgets::common::focused_block;
use crate::widgets::theme::get_theme;
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Playback pane: the display target the current frame is written into on
/// every tick.
pub struct PlayerState {
    pub player: Option<Player>,
    pub playing: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            player: None,
            playing: true,
        }
    }
}

impl PlayerState {
    fn status_line(&self) -> Line<'_> {
        let theme = get_theme();
        match &self.player {
            Some(player) => {
                let (cols, rows) = player.frames().canvas_size();
                let state = if self.playing {
                    Span::styled("▶ Playing", Style::default().fg(theme.status_completed))
                } else {
                    Span::styled("⏸ Paused", Style::default().fg(theme.status_idle))
                };
                Line::from(vec![
                    state,
                    Span::raw("  "),
                    Span::styled("Frame: ", Style::default().fg(theme.text_secondary)),
                    Span::raw(format!(
                        "{}/{}",
                        player.cursor() + 1,
                        player.frame_count()
                    )),
                    Span::raw("  "),
                    Span::styled("Canvas: ", Style::default().fg(theme.text_secondary)),
                    Span::raw(format!("{}x{}", cols, rows)),
                ])
            }
            None => Line::from(Span::styled(
                "No frames loaded",
                Style::default().fg(get_theme().text_secondary),
            )),
        }
    }
}

impl Component for PlayerState {
    fn update(&mut self, msg: &AppMsg) -> Option<AppMsg> {
        match msg {
            AppMsg::Tick => {
                if self.playing && let Some(player) = &mut self.player {
                    player.advance();
                }
            }
            AppMsg::FramesLoaded(frames) => {
                self.player = Some(Player::new(frames.clone()));
                self.playing = true;
            }
            AppMsg::Key(key) => match key.code {
                KeyCode::Char(' ') => {
                    self.playing = !self.playing;
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    if let Some(player) = &mut self.player {
                        self.playing = false;
                        player.advance();
                    }
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    if let Some(player) = &mut self.player {
                        self.playing = false;
                        player.rewind();
                    }
                }
                KeyCode::Char('r') => {
                    if let Some(player) = &mut self.player {
                        player.reset();
                    }
                }
                _ => {}
            },
            _ => {}
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, is_focused: bool) {
        let theme = get_theme();
        let block = focused_block("Player", is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let body = match &self.player {
            Some(player) => {
                let lines: Vec<Line> = player
                    .current()
                    .lines()
                    .map(|line| {
                        Line::from(Span::styled(
                            line.to_string(),
                            Style::default().fg(theme.frame_ink),
                        ))
                    })
                    .collect();
                Paragraph::new(lines).alignment(Alignment::Center)
            }
            None => Paragraph::new(vec![
                Line::from(""),
                Line::from("No animation loaded"),
                Line::from(""),
                Line::from("Pick a frames document in the file browser,"),
                Line::from("or select an image and press 'g' to generate one"),
            ])
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_secondary)),
        };
        body.render(chunks[0], buf);

        Paragraph::new(self.status_line())
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frames::FrameSet;

    fn frames(list: &[&str]) -> FrameSet {
        FrameSet::new(list.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_tick_advances_only_while_playing() {
        let mut state = PlayerState::default();
        state.update(&AppMsg::FramesLoaded(frames(&["a", "b", "c"])));

        state.update(&AppMsg::Tick);
        assert_eq!(state.player.as_ref().unwrap().current(), "b");

        state.playing = false;
        state.update(&AppMsg::Tick);
        assert_eq!(state.player.as_ref().unwrap().current(), "b");
    }

    #[test]
    fn test_loading_frames_restarts_playback() {
        let mut state = PlayerState::default();
        state.update(&AppMsg::FramesLoaded(frames(&["a", "b"])));
        state.update(&AppMsg::Tick);
        state.playing = false;

        state.update(&AppMsg::FramesLoaded(frames(&["x", "y"])));
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.current(), "x");
        assert!(state.playing);
    }

    #[test]
    fn test_tick_without_frames_is_harmless() {
        let mut state = PlayerState::default();
        state.update(&AppMsg::Tick);
        assert!(state.player.is_none());
    }
}
