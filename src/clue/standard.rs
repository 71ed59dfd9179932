//! Open clue flow
//!
//! The prompt is shown, the host reveals the answer, then records whether the
//! team was right. A countdown, when present, only runs while the prompt is
//! showing; running out counts as a timed-out answer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::game::HostMessage;

use super::{Countdown, Resolution, Stage, StageManager, Verdict};

/// Runtime state of an open clue
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    stage: Stage,
    countdown: Option<Countdown>,
}

impl StageManager for State {
    type Stage = Stage;

    fn stage(&self) -> Stage {
        self.stage
    }

    fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }
}

impl State {
    /// Creates the flow at the prompt stage
    pub fn new(countdown: Option<Countdown>) -> Self {
        Self {
            stage: Stage::Prompt,
            countdown,
        }
    }

    /// Handles `Reveal` and `Judge`
    ///
    /// A verdict is only accepted once the answer is on screen.
    ///
    /// # Returns
    ///
    /// The verdict as a [`Resolution`] when the clue is judged
    pub fn receive_message(&mut self, message: &HostMessage) -> Option<Resolution> {
        match message {
            HostMessage::Reveal => {
                self.change_stage(Stage::Prompt, Stage::Revealed);
                None
            }
            HostMessage::Judge(verdict) if self.stage == Stage::Revealed => {
                Some(Resolution::Judged(*verdict))
            }
            _ => None,
        }
    }

    /// Advances the countdown while the prompt is showing
    ///
    /// On expiry the answer is revealed and the clue resolves as timed out.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Resolution> {
        if self.stage != Stage::Prompt {
            return None;
        }

        let expired = self
            .countdown
            .as_mut()
            .is_some_and(|countdown| countdown.advance(elapsed));

        (expired && self.change_stage(Stage::Prompt, Stage::Revealed))
            .then_some(Resolution::Judged(Verdict::TimeUp))
    }

    /// The countdown, if the clue is timed
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }
}
