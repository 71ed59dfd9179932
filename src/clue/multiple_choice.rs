//! Multiple choice clue flow
//!
//! The options are shown with the prompt and the first pick decides the
//! verdict. The host can still reveal and judge by hand, which covers a team
//! calling out an answer instead of picking.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::HostMessage;

use super::{Countdown, Resolution, Stage, StageManager, Verdict, standard};

/// Runtime state of a multiple choice clue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Reveal, judge and countdown handling shared with open clues
    inner: standard::State,
    /// Index of the correct option
    correct: usize,
    /// Number of options on screen
    option_count: usize,
}

impl StageManager for State {
    type Stage = Stage;

    fn stage(&self) -> Stage {
        self.inner.stage()
    }

    fn stage_mut(&mut self) -> &mut Stage {
        self.inner.stage_mut()
    }
}

impl State {
    /// Creates the flow at the prompt stage
    ///
    /// # Arguments
    ///
    /// * `correct` - Index of the correct option
    /// * `option_count` - Number of options, picks outside this range are ignored
    /// * `countdown` - Answering countdown, if the clue is timed
    pub fn new(correct: usize, option_count: usize, countdown: Option<Countdown>) -> Self {
        Self {
            inner: standard::State::new(countdown),
            correct,
            option_count,
        }
    }

    /// Index of the correct option
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Handles `Choose`, falling back to the open clue flow for the rest
    ///
    /// # Returns
    ///
    /// The verdict as a [`Resolution`] when the clue is judged
    pub fn receive_message(&mut self, message: &HostMessage) -> Option<Resolution> {
        match message {
            HostMessage::Choose(index) if *index < self.option_count => self
                .change_stage(Stage::Prompt, Stage::Revealed)
                .then(|| {
                    Resolution::Judged(if *index == self.correct {
                        Verdict::Correct
                    } else {
                        Verdict::Wrong
                    })
                }),
            HostMessage::Choose(_) => None,
            message => self.inner.receive_message(message),
        }
    }

    /// Advances the countdown while the options are open
    pub fn tick(&mut self, elapsed: Duration) -> Option<Resolution> {
        self.inner.tick(elapsed)
    }

    /// The countdown, if the clue is timed
    pub fn countdown(&self) -> Option<&Countdown> {
        self.inner.countdown()
    }
}
