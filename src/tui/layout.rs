//! Screen geometry and pointer hit testing
//!
//! Every frame the renderer splits the terminal with the functions below and
//! records each clickable rectangle in a [`HitMap`]. Clicks are resolved
//! against the map from the last drawn frame, so what the host sees is what
//! the host hits.

use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::{board::TileRef, teams::TeamSide};

/// Height of the score header
const HEADER_HEIGHT: u16 = 3;

/// Height of the banner and button strip
const FOOTER_HEIGHT: u16 = 3;

/// Height of the category name row above the tiles
const CATEGORY_HEIGHT: u16 = 3;

/// Width of one button
const BUTTON_WIDTH: u16 = 18;

/// A host command bound to an on-screen button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Show the answer
    Reveal,
    /// Judge the answer correct
    Correct,
    /// Judge the answer wrong
    Wrong,
    /// Pick a multiple choice option
    Choice(usize),
    /// Next stage of the final clue
    Advance,
    /// Previous round
    PreviousRound,
    /// Next round
    NextRound,
    /// Go to the final standings
    End,
}

/// What a rectangle on screen stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// An unused tile of the board
    Tile(TileRef),
    /// An entry of the file list
    File(usize),
    /// A button
    Button(Button),
    /// A team's score box
    Score(TeamSide),
}

/// Clickable rectangles of the last drawn frame
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    /// Registers a clickable rectangle
    ///
    /// Empty rectangles are dropped.
    pub fn push(&mut self, area: Rect, target: Target) {
        if !area.is_empty() {
            self.regions.push((area, target));
        }
    }

    /// Finds the target under a pointer position
    ///
    /// When rectangles overlap the one registered last wins.
    pub fn hit(&self, column: u16, row: u16) -> Option<Target> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    /// Number of registered rectangles
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing is clickable
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// The three horizontal bands of every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Team scores and round title
    pub header: Rect,
    /// Board, clue, file list or standings
    pub body: Rect,
    /// Feedback banner and buttons
    pub footer: Rect,
}

/// Splits the terminal into header, body and footer
pub fn screen(area: Rect) -> Screen {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    Screen {
        header,
        body,
        footer,
    }
}

/// Splits the header into team A's score, the title, and team B's score
pub fn header(area: Rect) -> [Rect; 3] {
    Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(area)
}

/// Category columns and tile cells of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Name cell of each category
    pub headers: Vec<Rect>,
    /// Tile cells, indexed by category then row
    pub cells: Vec<Vec<Rect>>,
}

/// Lays out `columns` categories of `rows` tiles each
pub fn grid(area: Rect, columns: usize, rows: usize) -> Grid {
    if columns == 0 {
        return Grid {
            headers: Vec::new(),
            cells: Vec::new(),
        };
    }

    let [names, tiles] =
        Layout::vertical([Constraint::Length(CATEGORY_HEIGHT), Constraint::Min(0)]).areas(area);
    let column_constraints = (0..columns).map(|_| Constraint::Ratio(1, columns as u32));
    let row_constraints = (0..rows).map(|_| Constraint::Ratio(1, rows as u32));

    let headers = Layout::horizontal(column_constraints.clone())
        .split(names)
        .to_vec();
    let cells = Layout::horizontal(column_constraints)
        .split(tiles)
        .iter()
        .map(|column| {
            Layout::vertical(row_constraints.clone())
                .split(*column)
                .to_vec()
        })
        .collect();

    Grid { headers, cells }
}

/// Centers `count` buttons side by side
pub fn buttons(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let width = BUTTON_WIDTH.min(area.width / count as u16);
    let total = width * count as u16;
    let start = area.x + (area.width - total) / 2;

    (0..count as u16)
        .map(|i| Rect::new(start + i * width, area.y, width, area.height))
        .collect()
}

/// One-line rectangles for the first `count` entries of a list
///
/// Entries that do not fit are left out.
pub fn lines(area: Rect, count: usize) -> Vec<Rect> {
    (0..count.min(area.height as usize) as u16)
        .map(|i| Rect::new(area.x, area.y + i, area.width, 1))
        .collect()
}
