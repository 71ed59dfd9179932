//! Score history and final standings
//!
//! Every change to a team's score is recorded as a [`ScoreEntry`], whether it
//! came from a judged clue or a manual adjustment by the host. The ledger is
//! what the end-of-game summary is built from.

use std::{cmp::Reverse, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    board::{Board, TileRef},
    clue::Verdict,
    teams::{TeamSide, Teams},
};

/// Why a score changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    /// A clue was judged
    Judged(Verdict),
    /// The host adjusted the score by hand
    Adjustment,
}

/// One change to a team's score
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// The team whose score changed
    pub team: TeamSide,
    /// Points added, negative for deductions
    pub delta: i64,
    /// What caused the change
    pub cause: Cause,
    /// The clue involved, if any
    pub tile: Option<TileRef>,
}

/// Ledger of all score changes in a session
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

/// A team's place in the final standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// Place, starting at 1; tied teams share a place
    pub position: usize,
    /// Which team
    pub team: TeamSide,
    /// The team's display name
    pub name: String,
    /// Final score
    pub score: i64,
    /// Clues judged correct
    pub correct: usize,
    /// Clues judged wrong or timed out
    pub wrong: usize,
}

/// End-of-game report
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Teams from best to worst
    pub standings: Vec<Standing>,
    /// The team with the highest score, absent on a tie
    pub winner: Option<TeamSide>,
    /// Clues judged or closed
    pub clues_played: usize,
    /// Clues on the board
    pub clues_total: usize,
}

impl Scoreboard {
    /// Appends an entry to the ledger
    pub fn record(&mut self, entry: ScoreEntry) {
        self.entries.push(entry);
    }

    /// All entries in the order they happened
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Sum of all changes for a team
    pub fn total(&self, team: TeamSide) -> i64 {
        self.entries
            .iter()
            .filter(|entry| entry.team == team)
            .map(|entry| entry.delta)
            .sum()
    }

    /// Counts a team's correct and wrong verdicts
    ///
    /// # Returns
    ///
    /// `(correct, wrong)`, where timeouts count as wrong
    fn verdicts(&self, team: TeamSide) -> (usize, usize) {
        self.entries
            .iter()
            .filter(|entry| entry.team == team)
            .filter_map(|entry| match entry.cause {
                Cause::Judged(verdict) => Some(verdict.is_correct()),
                Cause::Adjustment => None,
            })
            .fold((0, 0), |(correct, wrong), is_correct| {
                if is_correct {
                    (correct + 1, wrong)
                } else {
                    (correct, wrong + 1)
                }
            })
    }

    /// Ranks the teams by score
    pub fn standings(&self, teams: &Teams) -> Vec<Standing> {
        let ranked = teams
            .iter()
            .sorted_by_key(|(_, team)| Reverse(team.score()))
            .collect_vec();

        ranked
            .iter()
            .map(|(side, team)| {
                let (correct, wrong) = self.verdicts(*side);
                Standing {
                    position: ranked
                        .iter()
                        .filter(|(_, other)| other.score() > team.score())
                        .count()
                        + 1,
                    team: *side,
                    name: team.name().to_owned(),
                    score: team.score(),
                    correct,
                    wrong,
                }
            })
            .collect_vec()
    }

    /// Builds the end-of-game report
    pub fn summary(&self, teams: &Teams, board: &Board) -> Summary {
        let standings = self.standings(teams);
        let winner = match standings.as_slice() {
            [first, second, ..] if first.score > second.score => Some(first.team),
            [only] => Some(only.team),
            _ => None,
        };

        Summary {
            standings,
            winner,
            clues_played: board.clue_count() - board.remaining(),
            clues_total: board.clue_count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final standings")?;
        for standing in &self.standings {
            writeln!(
                f,
                "{}. {} ({}): {} points, {} correct, {} wrong",
                standing.position,
                standing.name,
                standing.team,
                standing.score,
                standing.correct,
                standing.wrong
            )?;
        }
        match self.winner.and_then(|winner| {
            self.standings
                .iter()
                .find(|standing| standing.team == winner)
        }) {
            Some(winner) => writeln!(f, "Winner: {}", winner.name)?,
            None => writeln!(f, "It's a tie")?,
        }
        write!(f, "Clues played: {}/{}", self.clues_played, self.clues_total)
    }
}
