//! Application loop for the TUI.

use std::cell::Cell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use crate::app::pins::PinBoard;
use crate::app::selection::{ClearHandle, SelectionController};
use crate::app::view::Screen;
use crate::domain::model::{PinId, Selection};
use crate::infra::config::Config;
use crate::infra::opener::{OpenError, OpenPath, opener_from_config};
use crate::ui::components::detail::DetailView;
use crate::ui::components::pin_list::{PinList, PinListState};
use crate::ui::effects::{Shake, ShakeAnimation, shift_within};
use crate::ui::keys;

const TICK_RATE: Duration = Duration::from_millis(50);

/// Interactive pin browser. Owns the selection controller for as long as the UI is mounted.
pub struct UiApp {
    config: Config,
    board: PinBoard,
    controller: SelectionController,
    reset: ClearHandle,
    list: PinListState,
    pin_list: PinList,
    detail: DetailView,
    open_errors: Receiver<OpenError>,
    last_viewed: Rc<Cell<Option<PinId>>>,
    shake: Option<ShakeAnimation>,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl UiApp {
    /// Build the UI with the opener described by `config`.
    pub fn new(config: Config, board: PinBoard) -> Self {
        let (tx, rx) = mpsc::channel();
        let opener = opener_from_config(&config.opener, Some(tx));
        Self::assemble(config, board, opener, rx)
    }

    /// Build the UI around a caller-provided opener. Failures it reports are not shown.
    pub fn with_opener(config: Config, board: PinBoard, opener: Arc<dyn OpenPath>) -> Self {
        let (_tx, rx) = mpsc::channel();
        Self::assemble(config, board, opener, rx)
    }

    fn assemble(
        config: Config,
        board: PinBoard,
        opener: Arc<dyn OpenPath>,
        open_errors: Receiver<OpenError>,
    ) -> Self {
        let mut controller = SelectionController::new(opener);
        let last_viewed = Rc::new(Cell::new(None));
        let viewed = Rc::clone(&last_viewed);
        controller.on_update(move |selection| {
            if let Selection::Selected(pin) = selection {
                viewed.set(Some(pin.id()));
            }
        });
        let reset = controller.clear_handle();
        let style = config.defaults.icon_style;

        Self {
            config,
            board,
            controller,
            reset,
            list: PinListState::default(),
            pin_list: PinList::new(style),
            detail: DetailView::new(style),
            open_errors,
            last_viewed,
            shake: None,
            status: None,
            should_quit: false,
        }
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().ok();

        let event_loop_result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        event_loop_result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev)?;
            }
        }
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// One turn of the UI-owned loop: apply queued selection changes and collect
    /// opener failures.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.controller.apply_pending();
        if matches!(self.controller.screen(), Screen::PinList)
            && let Some(id) = self.last_viewed.take()
        {
            self.list.focus(&self.board, id);
        }

        while let Ok(err) = self.open_errors.try_recv() {
            self.set_status(StatusLevel::Error, err.to_string());
            self.shake = Some(ShakeAnimation::start(self.shake_config(), now));
        }

        if let Some(shake) = &self.shake
            && shake.is_finished(now)
        {
            self.shake = None;
        }
        if let Some(status) = &self.status
            && status.is_expired(now)
        {
            self.status = None;
        }
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(size);

        let screen = self.controller.screen();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("zfinder", Style::default().fg(Color::Cyan)),
            Span::raw(" · "),
            Span::raw(screen.title()),
        ]));
        frame.render_widget(header, layout[0]);

        let offset = self
            .shake
            .map(|shake| shake.offset_at(Instant::now()))
            .unwrap_or(0);
        let body = shift_within(layout[1], offset, size);
        match &screen {
            Screen::PinList => self.pin_list.render(frame, body, &self.board, &self.list),
            Screen::Detail(pin) => self.detail.render(
                frame,
                body,
                pin,
                &self.config.keybindings,
                self.shake.is_some(),
            ),
        }

        self.render_status(frame, layout[2], &screen);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect, screen: &Screen) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = match &self.status {
            Some(status) => {
                let style = match status.level {
                    StatusLevel::Info => Style::default().fg(Color::Gray),
                    StatusLevel::Error => Style::default().fg(Color::Red),
                };
                Line::styled(status.text.clone(), style)
            }
            None => self.hints(screen),
        };
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn hints(&self, screen: &Screen) -> Line<'static> {
        let keys = &self.config.keybindings;
        let key = |name: &str| Span::styled(name.to_string(), Style::default().fg(Color::Cyan));
        let mut spans = match screen {
            Screen::PinList => vec![
                key(format!("{}/{}", keys.down, keys.up).as_str()),
                Span::raw(" move · "),
                key(keys.select.as_str()),
                Span::raw(" details · "),
            ],
            Screen::Detail(_) => vec![key(keys.back.as_str()), Span::raw(" back · ")],
        };
        spans.extend([
            key(keys.open.as_str()),
            Span::raw(" open · "),
            key(keys.quit.as_str()),
            Span::raw(" quit"),
        ]);
        Line::from(spans)
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Resize(..) => {}
            Event::Mouse(_) => {}
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        if keys::matches(&self.config.keybindings.quit, &key) {
            self.should_quit = true;
            return Ok(());
        }

        match self.controller.screen() {
            Screen::PinList => self.handle_list_key(key),
            Screen::Detail(pin) => {
                let bindings = &self.config.keybindings;
                if keys::matches(&bindings.back, &key)
                    || matches!(key.code, KeyCode::Left | KeyCode::Backspace)
                {
                    self.reset.clear();
                } else if keys::matches(&bindings.open, &key) {
                    self.open(pin.path());
                }
                Ok(())
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        let bindings = &self.config.keybindings;
        if keys::matches(&bindings.down, &key) || key.code == KeyCode::Down {
            self.list.select_next(self.board.len());
        } else if keys::matches(&bindings.up, &key) || key.code == KeyCode::Up {
            self.list.select_previous();
        } else if keys::matches(&bindings.select, &key) || key.code == KeyCode::Right {
            if let Some(pin) = self.board.get(self.list.selected()).cloned() {
                self.controller.select(pin);
            }
        } else if keys::matches(&bindings.open, &key) {
            if let Some(pin) = self.board.get(self.list.selected()).cloned() {
                self.open(pin.path());
            }
        }
        Ok(())
    }

    fn open(&mut self, path: &Path) {
        self.controller.request_open(path);
        self.set_status(StatusLevel::Info, format!("Opening {}", path.display()));
    }

    fn shake_config(&self) -> Shake {
        Shake {
            amount: f32::from(self.config.defaults.shake_amount),
            shakes_per_unit: self.config.defaults.shakes_per_unit,
        }
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + Duration::from_secs(4),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusLevel {
    Info,
    Error,
}
