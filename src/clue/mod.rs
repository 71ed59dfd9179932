//! Clue flows
//!
//! Once a tile is opened the session hands host messages to a per-clue state
//! machine. Open clues move from the prompt to the revealed answer and wait
//! for a verdict, multiple choice clues are judged the moment an option is
//! picked, and final clues walk through a wager step before the prompt is
//! shown. Each flow reports a [`Resolution`] when the clue is finished and the
//! session takes care of scoring.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    board::{Clue, TileRef},
    game::HostMessage,
};

pub mod final_clue;
pub mod multiple_choice;
pub mod standard;

/// Stages shared by open and multiple choice clues
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Showing the prompt, answer hidden
    #[default]
    Prompt,
    /// Showing the prompt together with the answer
    Revealed,
}

/// The host's judgment of a team's answer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Verdict {
    /// The answer was right
    #[display("Correct")]
    Correct,
    /// The answer was wrong
    #[display("Wrong")]
    Wrong,
    /// The countdown ran out before an answer
    #[display("Time's up")]
    TimeUp,
}

impl Verdict {
    /// Whether the team earns the clue's points
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// How a clue flow finished
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// A verdict was reached and the clue's points are at stake
    Judged(Verdict),
    /// The host closed the clue after adjusting scores by hand
    Closed,
}

/// Guarded stage transitions
///
/// A transition only happens when the current stage is the expected one, so a
/// repeated or stale message cannot skip a step.
pub trait StageManager {
    /// The stage type of this flow
    type Stage: Copy + PartialEq;

    /// The current stage
    fn stage(&self) -> Self::Stage;

    /// Mutable access to the current stage
    fn stage_mut(&mut self) -> &mut Self::Stage;

    /// Attempts to move from `before` to `after`
    ///
    /// # Returns
    ///
    /// `true` if the flow was in `before` and is now in `after`
    fn change_stage(&mut self, before: Self::Stage, after: Self::Stage) -> bool {
        if self.stage() == before {
            *self.stage_mut() = after;
            true
        } else {
            false
        }
    }
}

/// Answering countdown advanced by frame ticks
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    limit: Duration,
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    elapsed: Duration,
    #[serde(default)]
    ran_out: bool,
}

impl Countdown {
    /// Creates a countdown that has not started ticking
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            elapsed: Duration::ZERO,
            ran_out: false,
        }
    }

    /// Adds elapsed time
    ///
    /// # Returns
    ///
    /// `true` only on the tick that makes the countdown run out. A zero
    /// limit runs out on the first tick.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.ran_out {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(elapsed);
        self.ran_out = self.is_expired();
        self.ran_out
    }

    /// Time left before the countdown runs out
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }

    /// Whether the countdown has run out
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.limit
    }

    /// The full length of the countdown
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

/// The clue currently open on screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentClue {
    /// Where the clue sits on the board
    pub tile: TileRef,
    /// Progress through the clue's flow
    pub state: ClueState,
}

/// Runtime state of an open clue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClueState {
    /// An open clue judged by the host
    Standard(standard::State),
    /// A clue answered by picking an option
    MultipleChoice(multiple_choice::State),
    /// The zero-valued final clue with wagers
    Final(final_clue::State),
}

impl ClueState {
    /// Picks the flow for a clue
    ///
    /// # Arguments
    ///
    /// * `clue` - The clue being opened
    /// * `countdown` - Whether time limits from the clue file are enforced
    pub fn for_clue(clue: &Clue, countdown: bool) -> Self {
        if clue.is_final() {
            return Self::Final(final_clue::State::default());
        }

        let countdown = clue
            .time_limit()
            .filter(|_| countdown)
            .map(Countdown::new);

        match clue.correct_option() {
            Some(correct) => Self::MultipleChoice(multiple_choice::State::new(
                correct,
                clue.options().len(),
                countdown,
            )),
            None => Self::Standard(standard::State::new(countdown)),
        }
    }

    /// Forwards a host message to the flow
    ///
    /// # Returns
    ///
    /// The [`Resolution`] if the message finished the clue
    pub fn receive_message(&mut self, message: &HostMessage) -> Option<Resolution> {
        match self {
            Self::Standard(s) => s.receive_message(message),
            Self::MultipleChoice(s) => s.receive_message(message),
            Self::Final(s) => s.receive_message(message),
        }
    }

    /// Advances the countdown, if any
    ///
    /// # Returns
    ///
    /// `Some(Resolution::Judged(Verdict::TimeUp))` on the tick the countdown
    /// runs out
    pub fn tick(&mut self, elapsed: Duration) -> Option<Resolution> {
        match self {
            Self::Standard(s) => s.tick(elapsed),
            Self::MultipleChoice(s) => s.tick(elapsed),
            Self::Final(_) => None,
        }
    }

    /// Whether the prompt text should be visible
    pub fn shows_prompt(&self) -> bool {
        match self {
            Self::Standard(_) | Self::MultipleChoice(_) => true,
            Self::Final(s) => s.stage() != final_clue::FinalStage::Wager,
        }
    }

    /// Whether the answer text should be visible
    pub fn shows_reveal(&self) -> bool {
        match self {
            Self::Standard(s) => s.stage() == Stage::Revealed,
            Self::MultipleChoice(s) => s.stage() == Stage::Revealed,
            Self::Final(s) => s.stage() == final_clue::FinalStage::Score,
        }
    }

    /// Whether the host may adjust scores and switch teams inside the clue
    pub fn accepts_adjustments(&self) -> bool {
        matches!(self, Self::Final(s) if s.stage() == final_clue::FinalStage::Score)
    }

    /// The running countdown, if the clue has one
    pub fn countdown(&self) -> Option<&Countdown> {
        match self {
            Self::Standard(s) => s.countdown(),
            Self::MultipleChoice(s) => s.countdown(),
            Self::Final(_) => None,
        }
    }
}
