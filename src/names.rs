//! Team name generation and validation
//!
//! Team names are either given by the host, in which case they are checked
//! for length, content and uniqueness, or drawn at random from one of the
//! [`NameStyle`] generators and pluralized ("Brave Otters").

use heck::ToTitleCase;
use rustrict::CensorStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::team::{DEFAULT_NAMES, MAX_NAME_LENGTH};

/// Number of draws before random naming gives up on a distinct pair
const MAX_NAME_ATTEMPTS: usize = 16;

/// Defines the style of automatically generated team names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, garde::Validate)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    /// Roman-style names (praenomen + nomen, optionally + cognomen)
    Roman(#[garde(range(min = 2, max = 3))] usize),
    /// Pet-style names (adjective + animal combinations)
    Petname(#[garde(range(min = 2, max = 3))] usize),
}

impl Default for NameStyle {
    /// Default name style is Petname with 2 words
    fn default() -> Self {
        Self::Petname(2)
    }
}

impl NameStyle {
    /// Generates a random name according to this style
    ///
    /// # Returns
    ///
    /// A randomly generated name in title case
    pub fn get_name(&self) -> String {
        match self {
            Self::Roman(count) => romanname::romanname(romanname::NameConfig {
                praenomen: *count > 2,
            }),
            Self::Petname(count) => petname::petname(*count as u8, " ").unwrap_or_default(),
        }
        .to_title_case()
    }
}

/// Trait for generating names according to a specific naming scheme.
pub trait NamingScheme {
    /// Generates and returns a name according to the naming scheme.
    fn get_name(&self) -> String;

    /// Generates and returns the plural form of a name according to the naming scheme.
    ///
    /// # Returns
    ///
    /// A pluralized version of the generated name as a String.
    fn get_plural_name(&self) -> String {
        pluralizer::pluralize(&self.get_name(), 3, false)
    }
}

impl NamingScheme for NameStyle {
    fn get_name(&self) -> String {
        self.get_name()
    }
}

/// Errors that can occur during team name validation
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The name is empty or contains only whitespace
    #[error("team name cannot be empty")]
    Empty,
    /// The name exceeds the maximum allowed length
    #[error("team name is too long")]
    TooLong,
    /// The name contains inappropriate content
    #[error("team name is inappropriate")]
    Sinful,
    /// Both teams were given the same name
    #[error("team names must differ")]
    Duplicate,
}

/// Cleans and checks a single team name
///
/// # Returns
///
/// The name with surrounding whitespace removed
///
/// # Errors
///
/// * `Error::TooLong` - Name exceeds [`MAX_NAME_LENGTH`] characters
/// * `Error::Empty` - Name is empty after trimming whitespace
/// * `Error::Sinful` - Name contains inappropriate content
pub fn validate_name(name: &str) -> Result<String, Error> {
    let name = rustrict::trim_whitespace(name);
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::TooLong);
    }
    if name.is_empty() {
        return Err(Error::Empty);
    }
    if name.is_inappropriate() {
        return Err(Error::Sinful);
    }
    Ok(name.to_owned())
}

/// Validates the host-provided names for both teams
///
/// # Errors
///
/// Any error from [`validate_name`], or `Error::Duplicate` if the cleaned
/// names are equal ignoring case.
pub fn team_names(first: &str, second: &str) -> Result<[String; 2], Error> {
    let first = validate_name(first)?;
    let second = validate_name(second)?;
    if first.to_lowercase() == second.to_lowercase() {
        return Err(Error::Duplicate);
    }
    Ok([first, second])
}

/// Draws two distinct plural names from a naming scheme
///
/// Falls back to the default names if the scheme keeps producing the same
/// or unusable names.
pub fn random_team_names(scheme: &impl NamingScheme) -> [String; 2] {
    let mut names = std::iter::repeat_with(|| scheme.get_plural_name().to_title_case())
        .take(MAX_NAME_ATTEMPTS)
        .filter(|name| validate_name(name).is_ok());

    let Some(first) = names.next() else {
        return DEFAULT_NAMES.map(str::to_owned);
    };

    match names.find(|name| *name != first) {
        Some(second) => [first, second],
        None => DEFAULT_NAMES.map(str::to_owned),
    }
}
