//! The two competing teams
//!
//! This module holds the team records, whose turn it is, and the options
//! that decide how the teams are named when a session starts.

use enum_map::{Enum, EnumMap};
use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    constants::team::DEFAULT_NAMES,
    names::{self, NameStyle},
};

/// One of the two teams
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, derive_more::Display,
)]
pub enum TeamSide {
    /// The first team
    A,
    /// The second team
    B,
}

impl TeamSide {
    /// The opposing team
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// A team's display name and running score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    score: i64,
}

impl Team {
    /// Creates a team with no points
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }

    /// The team's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The team's score, which may be negative
    pub fn score(&self) -> i64 {
        self.score
    }
}

/// Both teams and whose turn it is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teams {
    teams: EnumMap<TeamSide, Team>,
    active: TeamSide,
}

impl Teams {
    /// Creates both teams with no points
    ///
    /// # Arguments
    ///
    /// * `names` - Display names of team A and team B
    /// * `first` - The team that picks the first clue
    pub fn new([a, b]: [String; 2], first: TeamSide) -> Self {
        Self {
            teams: EnumMap::from_array([Team::new(a), Team::new(b)]),
            active: first,
        }
    }

    /// The team whose turn it is
    pub fn active(&self) -> TeamSide {
        self.active
    }

    /// Looks up a team
    pub fn team(&self, side: TeamSide) -> &Team {
        &self.teams[side]
    }

    /// Passes the turn to the other team
    pub fn flip_turn(&mut self) {
        self.active = self.active.other();
    }

    /// Clears both scores and hands the turn to `first`
    pub fn reset(&mut self, first: TeamSide) {
        for team in self.teams.values_mut() {
            team.score = 0;
        }
        self.active = first;
    }

    /// Adds `delta` to a team's score
    ///
    /// # Returns
    ///
    /// The team's new score
    pub(crate) fn add_points(&mut self, side: TeamSide, delta: i64) -> i64 {
        let team = &mut self.teams[side];
        team.score = team.score.saturating_add(delta);
        team.score
    }

    /// Iterates over both teams in A, B order
    pub fn iter(&self) -> impl Iterator<Item = (TeamSide, &Team)> {
        self.teams.iter()
    }
}

/// Validates host-provided team names
fn validate_team_names(val: &[String; 2], _ctx: &()) -> garde::Result {
    let [a, b] = val;
    names::team_names(a, b)
        .map(|_| ())
        .map_err(|error| garde::Error::new(error.to_string()))
}

/// How the teams are named
///
/// Random names, when a style is set, take precedence over `names`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct TeamOptions {
    /// Names chosen by the host, team A first
    #[garde(custom(validate_team_names))]
    pub names: [String; 2],
    /// Style of randomly drawn names
    #[garde(dive)]
    pub random: Option<NameStyle>,
}

impl Default for TeamOptions {
    fn default() -> Self {
        Self {
            names: DEFAULT_NAMES.map(str::to_owned),
            random: None,
        }
    }
}

impl TeamOptions {
    /// Produces the display names of both teams
    ///
    /// # Errors
    ///
    /// Returns a [`names::Error`] if host-provided names are rejected.
    pub fn resolve(&self) -> Result<[String; 2], names::Error> {
        match &self.random {
            Some(style) => Ok(names::random_team_names(style)),
            None => {
                let [a, b] = &self.names;
                names::team_names(a, b)
            }
        }
    }
}
