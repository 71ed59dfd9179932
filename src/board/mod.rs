//! Clue board data model
//!
//! A [`Board`] is the read-only structure the loader produces: an ordered list
//! of [`Round`]s, each holding its [`Category`] columns, each holding its
//! [`Clue`]s sorted by point value. The only field that changes after load is
//! a clue's `used` flag.

use std::{collections::BTreeMap, fmt, time::Duration};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub mod columns;
pub mod loader;

pub use columns::ColumnMapping;
pub use loader::{LoadError, LoadReport, SkipReason, discover_files, load, load_report};

/// The option a multiple choice clue marks as correct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    /// Zero-based index into the clue's options
    Index(usize),
    /// Literal text that should match one of the options
    Text(String),
}

/// A single clue on the board
#[serde_with::serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    /// Text shown to the teams when the tile is opened
    prompt: String,
    /// Text shown once the host reveals the answer
    reveal: String,
    /// Points credited or deducted when the clue is judged
    points: i64,
    /// Label drawn on the tile, usually the literal point cell
    label: String,
    /// Multiple choice options, empty for open clues
    options: Vec<String>,
    /// Which option is correct, when the file says so
    correct: Option<Choice>,
    /// Countdown for answering, when the file has a time column
    #[serde_as(as = "Option<serde_with::DurationSeconds<u64>>")]
    time_limit: Option<Duration>,
    /// Whether a judgment has been recorded for this clue
    used: bool,
}

impl Clue {
    /// Creates an unused open clue labelled with its point value
    pub fn new(prompt: impl Into<String>, reveal: impl Into<String>, points: i64) -> Self {
        Self {
            prompt: prompt.into(),
            reveal: reveal.into(),
            points,
            label: points.to_string(),
            options: Vec::new(),
            correct: None,
            time_limit: None,
            used: false,
        }
    }

    /// Replaces the tile label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Attaches multiple choice options and the correct one
    #[must_use]
    pub fn with_options(mut self, options: Vec<String>, correct: Option<Choice>) -> Self {
        self.options = options;
        self.correct = correct;
        self
    }

    /// Attaches an answering time limit
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// The text shown when the clue is opened
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The text shown once the answer is revealed
    ///
    /// Falls back to the correct option's text when the file had no
    /// dedicated answer cell, or to the indicator itself when it names no
    /// option.
    pub fn reveal(&self) -> &str {
        if !self.reveal.is_empty() {
            return &self.reveal;
        }
        match (self.correct_option(), &self.correct) {
            (Some(index), _) => self.options.get(index).map_or("", String::as_str),
            (None, Some(Choice::Text(text))) => text.trim(),
            (None, _) => "",
        }
    }

    /// Points at stake
    pub fn points(&self) -> i64 {
        self.points
    }

    /// Label drawn on the tile
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Multiple choice options
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Answering time limit
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Whether this clue is the zero-valued final clue
    pub fn is_final(&self) -> bool {
        self.points == crate::constants::clue::FINAL_POINTS
    }

    /// Whether the clue has been judged
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Marks the clue as judged
    ///
    /// # Returns
    ///
    /// `true` the first time, `false` if the clue was already used
    pub fn mark_used(&mut self) -> bool {
        !std::mem::replace(&mut self.used, true)
    }

    /// Index of the correct option, if one can be determined
    ///
    /// A textual indicator matches an option case-insensitively.
    pub fn correct_option(&self) -> Option<usize> {
        match self.correct.as_ref()? {
            Choice::Index(index) => (*index < self.options.len()).then_some(*index),
            Choice::Text(text) => {
                let text = text.trim().to_lowercase();
                self.options
                    .iter()
                    .position(|option| option.trim().to_lowercase() == text)
            }
        }
    }

    /// Whether the clue is answered by picking one of its options
    pub fn is_multiple_choice(&self) -> bool {
        !self.is_final() && self.correct_option().is_some()
    }
}

/// A named column of clues sorted ascending by point value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    clues: Vec<Clue>,
}

impl Category {
    /// Creates a category, sorting its clues by point value
    ///
    /// The sort is stable, so clues of equal value keep their file order.
    pub fn new(name: impl Into<String>, mut clues: Vec<Clue>) -> Self {
        clues.sort_by_key(Clue::points);
        Self {
            name: name.into(),
            clues,
        }
    }

    /// The category title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clues in display order
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Number of clues not yet judged
    pub fn remaining(&self) -> usize {
        self.clues.iter().filter(|clue| !clue.is_used()).count()
    }
}

/// Identifies a round: the air date it belongs to and its number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundKey {
    /// Air date of the episode, absent for single-board files
    pub air_date: Option<String>,
    /// Round number within the air date
    pub number: u32,
}

impl Default for RoundKey {
    fn default() -> Self {
        Self {
            air_date: None,
            number: crate::constants::clue::DEFAULT_ROUND,
        }
    }
}

impl fmt::Display for RoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.air_date {
            Some(air_date) => write!(f, "Air Date: {air_date}  |  Round: {}", self.number),
            None => write!(f, "Round: {}", self.number),
        }
    }
}

/// One complete board of categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    key: RoundKey,
    categories: Vec<Category>,
}

impl Round {
    /// The round's identifier
    pub fn key(&self) -> &RoundKey {
        &self.key
    }

    /// The category columns, ordered by name
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Height of the tallest category column
    pub fn max_rows(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.clues.len())
            .max()
            .unwrap_or_default()
    }

    /// Number of clues not yet judged in this round
    pub fn remaining(&self) -> usize {
        self.categories.iter().map(Category::remaining).sum()
    }
}

/// Location of a tile: round, category column, and row within the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    /// Index of the round
    pub round: usize,
    /// Index of the category within the round
    pub category: usize,
    /// Index of the clue within the category
    pub row: usize,
}

/// Every round loaded from a clue file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rounds: Vec<Round>,
}

impl Board {
    /// Groups clues into rounds and categories
    ///
    /// Rounds are ordered by key, categories by name, clues by point value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RoundKey, String, Clue)>,
    {
        let mut grouped: BTreeMap<RoundKey, BTreeMap<String, Vec<Clue>>> = BTreeMap::new();

        for (key, category, clue) in entries {
            grouped
                .entry(key)
                .or_default()
                .entry(category)
                .or_default()
                .push(clue);
        }

        Self {
            rounds: grouped
                .into_iter()
                .map(|(key, categories)| Round {
                    key,
                    categories: categories
                        .into_iter()
                        .map(|(name, clues)| Category::new(name, clues))
                        .collect_vec(),
                })
                .collect_vec(),
        }
    }

    /// The rounds in play order
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Looks up a round by index
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// Whether nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Looks up a clue by tile
    pub fn clue(&self, tile: TileRef) -> Option<&Clue> {
        self.rounds
            .get(tile.round)?
            .categories
            .get(tile.category)?
            .clues
            .get(tile.row)
    }

    /// Looks up a clue by tile for marking it used
    pub(crate) fn clue_mut(&mut self, tile: TileRef) -> Option<&mut Clue> {
        self.rounds
            .get_mut(tile.round)?
            .categories
            .get_mut(tile.category)?
            .clues
            .get_mut(tile.row)
    }

    /// Name of the category a tile belongs to
    pub fn category_name(&self, tile: TileRef) -> Option<&str> {
        self.rounds
            .get(tile.round)?
            .categories
            .get(tile.category)
            .map(Category::name)
    }

    /// Total number of clues
    pub fn clue_count(&self) -> usize {
        self.rounds
            .iter()
            .flat_map(|round| &round.categories)
            .map(|category| category.clues.len())
            .sum()
    }

    /// Number of clues not yet judged
    pub fn remaining(&self) -> usize {
        self.rounds.iter().map(Round::remaining).sum()
    }
}
