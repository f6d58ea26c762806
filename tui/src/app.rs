use std::time::Instant;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use skullsweeper_core as game;

use crate::ui;

pub(crate) const MIN_MINES: game::Area = 10;
pub(crate) const MAX_MINES: game::Area = 20;

/// Board shape and layout options fixed at startup.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) width: game::Axis,
    pub(crate) height: game::Axis,
    pub(crate) mines: Option<game::Area>,
    pub(crate) seed: Option<u64>,
}

/// Mine count input on the title screen. Accepts at most two digits and
/// never lets the typed value climb above [`MAX_MINES`].
#[derive(Debug, Default)]
pub(crate) struct MineEntry {
    buffer: String,
}

impl MineEntry {
    pub(crate) fn push(&mut self, c: char) {
        if !c.is_ascii_digit() || self.buffer.len() >= 2 {
            return;
        }
        let mut next = self.buffer.clone();
        next.push(c);
        if next.parse::<game::Area>().is_ok_and(|value| value <= MAX_MINES) {
            self.buffer = next;
        }
    }

    pub(crate) fn pop(&mut self) {
        self.buffer.pop();
    }

    pub(crate) fn text(&self) -> &str {
        &self.buffer
    }

    /// The entered count, if it sits in the playable band.
    pub(crate) fn mines(&self) -> Option<game::Area> {
        let value = self.buffer.parse::<game::Area>().ok()?;
        (MIN_MINES..=MAX_MINES).contains(&value).then_some(value)
    }
}

/// One game in progress: the board plus cursor and clock state.
pub(crate) struct Session {
    board: game::Board,
    cursor: game::Pos,
    started_at: Instant,
    ended_at: Option<Instant>,
}

impl Session {
    fn new(board: game::Board) -> Self {
        Self {
            board,
            cursor: (0, 0),
            started_at: Instant::now(),
            ended_at: None,
        }
    }

    fn start(settings: &Settings, mines: game::Area) -> game::Result<Self> {
        let config = game::BoardConfig::new(settings.width, settings.height, mines)?;
        let board = match settings.seed {
            Some(seed) => game::Board::with_seed(config, seed),
            None => game::Board::new(config),
        };
        log::debug!("new game: {:?}", config);
        Ok(Self::new(board))
    }

    pub(crate) fn board(&self) -> &game::Board {
        &self.board
    }

    pub(crate) fn cursor(&self) -> game::Pos {
        self.cursor
    }

    pub(crate) fn is_playable(&self) -> bool {
        !self.board.phase().is_terminal()
    }

    /// Seconds since the session began, frozen at the final time once the
    /// game ends.
    pub(crate) fn elapsed_secs(&self) -> u64 {
        let end = self.ended_at.unwrap_or_else(Instant::now);
        end.duration_since(self.started_at).as_secs()
    }

    fn set_cursor(&mut self, pos: game::Pos) {
        self.cursor = pos;
    }

    fn step_cursor(&mut self, dx: i8, dy: i8) {
        let (width, height) = self.board.size();
        let x = self.cursor.0.saturating_add_signed(dx).min(width - 1);
        let y = self.cursor.1.saturating_add_signed(dy).min(height - 1);
        self.cursor = (x, y);
    }

    fn reveal(&mut self, pos: game::Pos) {
        match self.board.reveal(pos) {
            Ok(outcome) => {
                if outcome.has_update() {
                    self.on_move();
                }
            }
            Err(err) => log::error!("rejected reveal at {:?}: {}", pos, err),
        }
    }

    fn toggle_flag(&mut self, pos: game::Pos) {
        match self.board.toggle_flag(pos) {
            Ok(outcome) => {
                if outcome.has_update() {
                    self.on_move();
                }
            }
            Err(err) => log::error!("rejected flag at {:?}: {}", pos, err),
        }
    }

    fn on_move(&mut self) {
        if self.board.phase().is_terminal() && self.ended_at.is_none() {
            self.ended_at = Some(Instant::now());
        }
    }
}

pub(crate) enum Screen {
    Title(MineEntry),
    Playing(Session),
}

pub(crate) struct App {
    settings: Settings,
    screen: Screen,
    should_quit: bool,
}

impl App {
    /// Goes straight to a board when the mine count came from the command
    /// line, otherwise opens on the title screen.
    pub(crate) fn new(settings: Settings) -> game::Result<Self> {
        let screen = match settings.mines {
            Some(mines) => Screen::Playing(Session::start(&settings, mines)?),
            None => Screen::Title(MineEntry::default()),
        };
        Ok(Self {
            settings,
            screen,
            should_quit: false,
        })
    }

    pub(crate) fn screen(&self) -> &Screen {
        &self.screen
    }

    pub(crate) fn board_shape(&self) -> game::Pos {
        (self.settings.width, self.settings.height)
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn caption(&self) -> &'static str {
        match &self.screen {
            Screen::Title(_) => "Minesweeper -- Title Screen",
            Screen::Playing(session) => match session.board.phase() {
                game::Phase::Lost => "Minesweeper -- You Lose",
                game::Phase::Won => "Minesweeper -- You Win!",
                _ => "Minesweeper -- Playing",
            },
        }
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') => {
                self.new_game();
                return;
            }
            _ => {}
        }

        match &mut self.screen {
            Screen::Title(entry) => match code {
                KeyCode::Char(c) => entry.push(c),
                KeyCode::Backspace => entry.pop(),
                KeyCode::Enter => {
                    let Some(mines) = entry.mines() else { return };
                    self.start_session(mines);
                }
                _ => {}
            },
            Screen::Playing(session) => {
                if !session.is_playable() {
                    return;
                }
                match code {
                    KeyCode::Left => session.step_cursor(-1, 0),
                    KeyCode::Right => session.step_cursor(1, 0),
                    KeyCode::Up => session.step_cursor(0, -1),
                    KeyCode::Down => session.step_cursor(0, 1),
                    KeyCode::Char(' ') | KeyCode::Enter => session.reveal(session.cursor),
                    KeyCode::Char('f') | KeyCode::Char('F') => session.toggle_flag(session.cursor),
                    _ => {}
                }
            }
        }
    }

    pub(crate) fn handle_mouse(&mut self, event: MouseEvent, area: Rect) {
        let Screen::Playing(session) = &mut self.screen else {
            return;
        };
        if !session.is_playable() || !ui::fits(area, session.board.size()) {
            return;
        }

        let grid = ui::grid_rect(area, session.board.size());
        let Some(pos) = ui::cell_at(grid, event.column, event.row, session.board.size()) else {
            return;
        };

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                session.set_cursor(pos);
                session.reveal(pos);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                session.set_cursor(pos);
                session.toggle_flag(pos);
            }
            _ => {}
        }
    }

    fn new_game(&mut self) {
        match self.settings.mines {
            Some(mines) => self.start_session(mines),
            None => self.screen = Screen::Title(MineEntry::default()),
        }
    }

    fn start_session(&mut self, mines: game::Area) {
        match Session::start(&self.settings, mines) {
            Ok(session) => self.screen = Screen::Playing(session),
            Err(err) => log::error!("failed to start a game: {}", err),
        }
    }
}
