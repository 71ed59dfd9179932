//! Session options and where they come from
//!
//! Options are layered, lowest priority first:
//! 1. Built-in defaults
//! 2. A TOML file, either given explicitly or `quizboard.toml` in the working
//!    directory when present
//! 3. Environment variables prefixed `QUIZBOARD_`, with `__` separating nested
//!    keys (`QUIZBOARD_TEAMS__RANDOM__PETNAME=3`)
//!
//! Command line flags are applied on top by the binary. The merged result is
//! validated before a session starts.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    board::ColumnMapping,
    constants::{files, frame, host},
    teams::{TeamOptions, TeamSide},
};

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "quizboard.toml";

/// Prefix of environment variables that override options
pub const ENV_PREFIX: &str = "QUIZBOARD_";

/// Errors that can occur while loading options
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),
    /// The merged options failed validation
    #[error("invalid configuration: {0}")]
    Invalid(#[from] garde::Report),
}

/// What happens to a team's score when it answers wrong
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrongAnswerPolicy {
    /// The score stays as it is
    NoPenalty,
    /// The clue's points are subtracted
    #[default]
    Deduct,
}

impl WrongAnswerPolicy {
    /// Score change for a wrong answer to a clue worth `points`
    pub fn penalty(self, points: i64) -> i64 {
        match self {
            Self::NoPenalty => 0,
            Self::Deduct => points.saturating_neg(),
        }
    }
}

/// Which team picks the first clue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstTurn {
    /// Team A starts
    #[default]
    A,
    /// Team B starts
    B,
    /// A coin flip decides
    Random,
}

impl FirstTurn {
    /// Picks the starting team
    pub fn resolve(self) -> TeamSide {
        match self {
            Self::A => TeamSide::A,
            Self::B => TeamSide::B,
            Self::Random => {
                if fastrand::bool() {
                    TeamSide::A
                } else {
                    TeamSide::B
                }
            }
        }
    }
}

type ValidationResult = garde::Result;

/// Validates that a duration falls within bounds given in milliseconds
///
/// # Errors
///
/// Returns a `garde::Error` if the duration is outside the specified bounds.
fn validate_millis<const MIN_MILLIS: u64, const MAX_MILLIS: u64>(
    val: &Duration,
) -> ValidationResult {
    let millis = u64::try_from(val.as_millis()).unwrap_or(u64::MAX);
    if (MIN_MILLIS..=MAX_MILLIS).contains(&millis) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "outside of bounds [{MIN_MILLIS},{MAX_MILLIS}] milliseconds",
        )))
    }
}

/// Validates how long the feedback banner stays up
fn validate_feedback_duration(val: &Duration, _ctx: &()) -> ValidationResult {
    validate_millis::<{ host::MIN_FEEDBACK_MILLIS }, { host::MAX_FEEDBACK_MILLIS }>(val)
}

/// Validates the file extension used when scanning for clue files
#[allow(clippy::ptr_arg)]
fn validate_extension(val: &String, _ctx: &()) -> ValidationResult {
    if val.is_empty() || val.contains(['.', '/', '\\']) {
        Err(garde::Error::new("must be a bare extension such as `txt`"))
    } else {
        Ok(())
    }
}

/// Options for a quiz board session
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Options {
    /// How the two teams are named
    #[garde(dive)]
    pub teams: TeamOptions,
    /// Which team picks first
    #[garde(skip)]
    pub first_turn: FirstTurn,
    /// Scoring of wrong answers
    #[garde(skip)]
    pub wrong_answer: WrongAnswerPolicy,
    /// Points added or removed by one manual adjustment
    #[garde(range(min = 1, max = host::MAX_SCORE_STEP))]
    pub score_step: i64,
    /// How long the feedback banner stays up after a verdict
    #[garde(custom(validate_feedback_duration))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub feedback_duration: Duration,
    /// Whether time limits from the clue file are enforced
    #[garde(skip)]
    pub countdown: bool,
    /// Frames per second of the event loop
    #[garde(range(min = frame::MIN_FPS, max = frame::MAX_FPS))]
    pub fps: u32,
    /// Which columns hold the prompt and the reveal
    #[garde(skip)]
    pub columns: ColumnMapping,
    /// Directory scanned for clue files
    #[garde(skip)]
    pub question_dir: PathBuf,
    /// Name prefix of clue files
    #[garde(skip)]
    pub file_prefix: String,
    /// Extension of clue files, without the dot
    #[garde(custom(validate_extension))]
    pub file_extension: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            teams: TeamOptions::default(),
            first_turn: FirstTurn::default(),
            wrong_answer: WrongAnswerPolicy::default(),
            score_step: host::DEFAULT_SCORE_STEP,
            feedback_duration: Duration::from_millis(host::DEFAULT_FEEDBACK_MILLIS),
            countdown: true,
            fps: frame::DEFAULT_FPS,
            columns: ColumnMapping::default(),
            question_dir: PathBuf::from(files::DEFAULT_DIR),
            file_prefix: files::DEFAULT_PREFIX.to_owned(),
            file_extension: files::DEFAULT_EXTENSION.to_owned(),
        }
    }
}

impl Options {
    /// Builds the provider chain
    ///
    /// The default file is only merged when it is present.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Self::default()));

        let figment = match config_path {
            Some(path) => figment.merge(Toml::file(path)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
            }
            None => figment,
        };

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates options from all sources
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if an explicit `config_path` does not
    /// exist or a source is malformed, and [`ConfigError::Invalid`] if a value
    /// is out of bounds.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path.filter(|path| !path.is_file()) {
            return Err(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))
            .into());
        }

        let options: Self = Self::figment(config_path).extract()?;
        options.validate()?;
        Ok(options)
    }

    /// The interval between frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(frame::MIN_FPS)
    }
}
