//! Terminal front end
//!
//! Runs the session in the terminal: draws the board with `ratatui`, reads
//! keys and clicks through `crossterm`, and ticks the session at the
//! configured frame rate.

use std::{
    io::{self, Stdout},
    ops::ControlFlow,
    path::PathBuf,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use web_time::Instant;

use crate::{board, game::Game};

pub mod input;
pub mod layout;
pub mod render;

use input::Action;
use layout::HitMap;

/// Front end state around a session
#[derive(Debug)]
pub struct App {
    game: Game,
    files: Vec<PathBuf>,
    cursor: usize,
    hit_map: HitMap,
    status: Option<String>,
}

impl App {
    /// Wraps a session
    ///
    /// # Arguments
    ///
    /// * `game` - The session to present
    /// * `files` - Clue files the host can switch between
    pub fn new(game: Game, files: Vec<PathBuf>) -> Self {
        Self {
            game,
            files,
            cursor: 0,
            hit_map: HitMap::default(),
            status: None,
        }
    }

    /// The session
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Consumes the front end, returning the session
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Clue files offered on the selection screen
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Whether there is a file list to go back to
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Highlighted entry of the file list
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clickable areas of the last frame
    pub fn hit_map(&self) -> &HitMap {
        &self.hit_map
    }

    /// Error from the last file load, if it failed
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Carries out an input action
    ///
    /// # Returns
    ///
    /// [`ControlFlow::Break`] when the host quits
    pub fn apply(&mut self, action: Action) -> ControlFlow<()> {
        match action {
            Action::Host(message) => self.game.receive_message(message),
            Action::OpenFile(index) => self.open_file(index),
            Action::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Action::CursorDown => {
                self.cursor = (self.cursor + 1).min(self.files.len().saturating_sub(1));
            }
            Action::ShowFiles => {
                self.game.show_file_selection(self.files.clone());
            }
            Action::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Loads a file from the list into the session
    ///
    /// A file that fails to load leaves the selection screen up with the
    /// error shown.
    fn open_file(&mut self, index: usize) {
        let Some(path) = self.files.get(index) else {
            return;
        };
        self.cursor = index;

        match board::load_report(path, self.game.options().columns) {
            Ok(report) if report.board.is_empty() => {
                warn!(path = %path.display(), "no clues in file");
                self.status = Some(format!("No clues found in {}", path.display()));
            }
            Ok(report) => {
                self.status = None;
                self.game.load_board(report.board);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to load clue file");
                self.status = Some(format!("{}: {error}", path.display()));
            }
        }
    }
}

/// Terminal in raw mode on the alternate screen
type Term = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal into raw mode with mouse capture
fn setup() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Returns the terminal to its normal state
fn restore(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

/// Runs the front end until the host quits
///
/// The terminal is restored even when drawing or reading input fails.
///
/// # Errors
///
/// Returns any terminal I/O error.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = setup()?;
    let result = event_loop(&mut terminal, app);
    let restored = restore(&mut terminal);
    result.and(restored)
}

/// Draws, reads input and ticks the session once per frame
fn event_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    let interval = app.game.options().frame_interval();
    let mut last_tick = Instant::now();

    info!(?interval, "front end started");

    loop {
        let mut hit_map = HitMap::default();
        terminal.draw(|frame| hit_map = render::draw(frame, app))?;
        app.hit_map = hit_map;

        let timeout = interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) => input::key_action(key, app),
                Event::Mouse(mouse) => input::mouse_action(mouse, app),
                _ => None,
            };
            if let Some(action) = action {
                if app.apply(action).is_break() {
                    info!("host quit");
                    return Ok(());
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= interval {
            app.game.tick(elapsed);
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{config::Options, game::State};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_app(dir: &TempDir) -> App {
        let good = dir.path().join("q1.txt");
        let mut file = std::fs::File::create(&good).unwrap();
        writeln!(file, "category,question,answer,value").unwrap();
        writeln!(file, "Science,What is H2O?,Water,$100").unwrap();

        let empty = dir.path().join("q2.txt");
        std::fs::write(&empty, "category,question,answer\n").unwrap();

        let missing = dir.path().join("q3.txt");

        let game = Game::with_file_selection(
            vec![good.clone(), empty.clone(), missing.clone()],
            Options::default(),
        )
        .unwrap();
        App::new(game, vec![good, empty, missing])
    }

    #[test]
    fn test_cursor_stays_in_list() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);

        let _ = app.apply(Action::CursorUp);
        assert_eq!(app.cursor(), 0);
        for _ in 0..5 {
            let _ = app.apply(Action::CursorDown);
        }
        assert_eq!(app.cursor(), 2);
    }

    #[test]
    fn test_open_file_loads_board() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);

        let _ = app.apply(Action::OpenFile(0));
        assert!(matches!(app.game().state, State::Board));
        assert_eq!(app.game().board().clue_count(), 1);
        assert_eq!(app.status(), None);

        let _ = app.apply(Action::ShowFiles);
        assert!(matches!(app.game().state, State::SelectingFile(_)));
    }

    #[test]
    fn test_bad_files_keep_selection_screen() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);

        let _ = app.apply(Action::OpenFile(1));
        assert!(matches!(app.game().state, State::SelectingFile(_)));
        assert!(app.status().is_some_and(|status| status.starts_with("No clues")));

        let _ = app.apply(Action::OpenFile(2));
        assert!(matches!(app.game().state, State::SelectingFile(_)));
        assert_eq!(app.cursor(), 2);
        assert!(app.status().is_some());

        let _ = app.apply(Action::OpenFile(9));
        assert_eq!(app.cursor(), 2);
    }

    #[test]
    fn test_quit_breaks() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);
        assert!(app.apply(Action::Quit).is_break());
        assert!(app.apply(Action::CursorDown).is_continue());
    }
}
