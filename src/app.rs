use anyhow::Result;
use crossbeam_channel::{Receiver, unbounded};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    widgets::{Paragraph, Widget},
};
use ratatui_image::picker::Picker;
use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crate::components::Component;
use crate::components::file_browser::FileBrowserState;
use crate::components::generator::GeneratorState;
use crate::components::logs::LogsState;
use crate::components::player::PlayerState;
use crate::components::settings::SettingsState;
use crate::components::source_view::SourceViewState;
use crate::config::Config;
use crate::event::AppMsg;
use crate::pipeline::frame_io;
use crate::widgets::theme::get_theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivePane {
    Browser,
    Player,
    Generator,
    Settings,
    Logs,
}

impl ActivePane {
    fn next(self) -> Self {
        match self {
            ActivePane::Browser => ActivePane::Player,
            ActivePane::Player => ActivePane::Generator,
            ActivePane::Generator => ActivePane::Settings,
            ActivePane::Settings => ActivePane::Logs,
            ActivePane::Logs => ActivePane::Browser,
        }
    }
}

pub struct App {
    config: Config,
    rx: Receiver<AppMsg>,

    browser: FileBrowserState,
    player: PlayerState,
    source_view: SourceViewState,
    generator: GeneratorState,
    settings: SettingsState,
    logs: LogsState,

    focus: ActivePane,
    interval: Duration,
    should_quit: bool,
}

impl App {
    pub fn new_with_picker(picker: Picker) -> Self {
        let (config, warning) = Config::load_or_default();
        let (tx, rx) = unbounded();

        let mut browser = FileBrowserState::default();
        browser.set_sender(tx.clone());

        let mut generator =
            GeneratorState::new(config.frames_path.clone(), config.generator.clone());
        generator.set_sender(tx.clone());

        let settings = SettingsState::new(config.generator.clone(), config.interval_ms);
        let interval = Duration::from_millis(config.interval_ms);

        let mut app = Self {
            config,
            rx,
            browser,
            player: PlayerState::default(),
            source_view: SourceViewState::new(picker),
            generator,
            settings,
            logs: LogsState::default(),
            focus: ActivePane::Browser,
            interval,
            should_quit: false,
        };

        if let Some(warning) = warning {
            app.dispatch(AppMsg::LogMessage(warning));
        }
        app.load_initial_frames();
        app
    }

    /// The player starts from the configured frames document when one is
    /// already on disk; otherwise playback waits for a selection.
    fn load_initial_frames(&mut self) {
        let path = self.config.frames_path.clone();
        if path.exists() {
            self.dispatch(AppMsg::FramesFileSelected(path));
        } else {
            self.dispatch(AppMsg::LogMessage(format!(
                "No frames document at {}; generate one or pick one in the browser",
                path.display()
            )));
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        let res = self.run_loop(&mut terminal);

        // Restore the terminal even when the loop errored
        if let Err(e) = restore_terminal(&mut terminal) {
            if res.is_ok() {
                return Err(e);
            }
        }

        if let Some(path) = Config::default_path()
            && let Err(e) = self.config.save_to_file(&path)
        {
            eprintln!("Failed to save config {}: {}", path.display(), e);
        }
        res
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| {
                let area = f.area();
                let buf = f.buffer_mut();
                self.draw(area, buf);
            })?;

            // The tick is the playback clock: poll only for the remainder of
            // the interval so input cannot stretch the frame period.
            let timeout = self.interval.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.interval {
                self.dispatch(AppMsg::Tick);
                last_tick = Instant::now();
            }

            while let Ok(msg) = self.rx.try_recv() {
                self.dispatch(msg);
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) => self.dispatch(AppMsg::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.dispatch(AppMsg::Quit),
            (KeyCode::Tab, _) => self.focus = self.focus.next(),
            (KeyCode::Char('g'), _) => self.dispatch(AppMsg::GenerationRequested),
            _ => self.dispatch(AppMsg::Key(key)),
        }
    }

    /// Deliver a message and any follow-ups it produces. Key events go to
    /// the focused pane only; everything else is broadcast.
    fn dispatch(&mut self, msg: AppMsg) {
        let mut queue = VecDeque::from([msg]);

        while let Some(msg) = queue.pop_front() {
            match &msg {
                AppMsg::Quit => {
                    self.should_quit = true;
                    continue;
                }
                AppMsg::IntervalChanged(ms) => {
                    self.interval = Duration::from_millis(*ms);
                    self.config.interval_ms = *ms;
                }
                AppMsg::OptionsChanged(options) => {
                    self.config.generator = options.clone();
                }
                AppMsg::FramesFileSelected(path) => {
                    match frame_io::load_frames(path) {
                        Ok(frames) => {
                            queue.push_back(AppMsg::LogMessage(format!(
                                "Loaded {} frames from {}",
                                frames.len(),
                                path.display()
                            )));
                            queue.push_back(AppMsg::FramesLoaded(frames));
                        }
                        Err(e) => queue.push_back(AppMsg::ErrorOccurred(format!("{:#}", e))),
                    }
                    continue;
                }
                _ => {}
            }

            if matches!(msg, AppMsg::Key(_)) {
                let follow_up = match self.focus {
                    ActivePane::Browser => self.browser.update(&msg),
                    ActivePane::Player => self.player.update(&msg),
                    ActivePane::Generator => self.generator.update(&msg),
                    ActivePane::Settings => self.settings.update(&msg),
                    ActivePane::Logs => self.logs.update(&msg),
                };
                if let Some(m) = follow_up {
                    queue.push_back(m);
                }
            } else {
                for follow_up in [
                    self.browser.update(&msg),
                    self.player.update(&msg),
                    self.source_view.update(&msg),
                    self.generator.update(&msg),
                    self.settings.update(&msg),
                    self.logs.update(&msg),
                ]
                .into_iter()
                .flatten()
                {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    fn draw(&mut self, area: ratatui::layout::Rect, buf: &mut ratatui::buffer::Buffer) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30),
                Constraint::Min(40),
                Constraint::Length(42),
            ])
            .split(outer[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(7),
                Constraint::Length(9),
                Constraint::Min(5),
            ])
            .split(columns[2]);

        self.browser
            .render(columns[0], buf, self.focus == ActivePane::Browser);
        self.player
            .render(columns[1], buf, self.focus == ActivePane::Player);
        self.source_view.render(side[0], buf, false);
        self.generator
            .render(side[1], buf, self.focus == ActivePane::Generator);
        self.settings
            .render(side[2], buf, self.focus == ActivePane::Settings);
        self.logs.render(side[3], buf, self.focus == ActivePane::Logs);

        let hints = Paragraph::new(
            "Tab focus  |  Enter open  |  g generate  |  Space pause  |  ←/→ step  |  q quit",
        )
        .style(Style::default().fg(get_theme().text_secondary))
        .alignment(Alignment::Center);
        hints.render(outer[1], buf);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().ok();
    // LeaveAlternateScreen must be executed on the same stdout the backend uses
    let mut out = io::stdout();
    execute!(out, LeaveAlternateScreen)?;
    Ok(())
}
