//! Configuration constants for the quiz board
//!
//! This module contains the default values and limits used throughout the
//! loader, the session, and the terminal front end so that every fallback
//! and every validation bound lives in one place.

/// Clue file constants
pub mod clue {
    /// Point value used when a clue's point label contains no digits
    pub const DEFAULT_POINTS: i64 = 100;
    /// Time limit in seconds used when a clue's time cell is blank or cannot
    /// be parsed
    pub const DEFAULT_TIME_LIMIT: u64 = 20;
    /// Round number used when a row's round cell cannot be parsed
    pub const DEFAULT_ROUND: u32 = 1;
    /// Maximum number of multiple choice options per clue
    pub const MAX_OPTION_COUNT: usize = 4;
    /// Point value marking a final clue
    pub const FINAL_POINTS: i64 = 0;
    /// Tile label of a final clue
    pub const FINAL_LABEL: &str = "FINAL!";
}

/// Team configuration constants
pub mod team {
    /// Maximum length of a team name in characters
    pub const MAX_NAME_LENGTH: usize = 30;
    /// Default display names for the two teams
    pub const DEFAULT_NAMES: [&str; 2] = ["Team A", "Team B"];
}

/// Host control constants
pub mod host {
    /// Default amount added or removed by a manual score adjustment
    pub const DEFAULT_SCORE_STEP: i64 = 1000;
    /// Largest allowed manual score step
    pub const MAX_SCORE_STEP: i64 = 10_000;
    /// Default time in milliseconds a feedback banner stays visible
    pub const DEFAULT_FEEDBACK_MILLIS: u64 = 2000;
    /// Shortest allowed feedback banner in milliseconds
    pub const MIN_FEEDBACK_MILLIS: u64 = 0;
    /// Longest allowed feedback banner in milliseconds
    pub const MAX_FEEDBACK_MILLIS: u64 = 10_000;
}

/// Event loop constants
pub mod frame {
    /// Default frames per second of the event loop
    pub const DEFAULT_FPS: u32 = 30;
    /// Lowest allowed frame rate
    pub const MIN_FPS: u32 = 1;
    /// Highest allowed frame rate
    pub const MAX_FPS: u32 = 120;
}

/// File selection constants
pub mod files {
    /// Default directory scanned for clue files
    pub const DEFAULT_DIR: &str = "./";
    /// Default file name prefix of clue files
    pub const DEFAULT_PREFIX: &str = "q";
    /// Default file extension of clue files
    pub const DEFAULT_EXTENSION: &str = "txt";
}
