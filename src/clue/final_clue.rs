//! Final clue flow
//!
//! A zero-valued clue is played for wagers instead of fixed points. The prompt
//! stays hidden until the host confirms the wagers are in, then the answer is
//! shown and the host settles each team's score by hand before closing it.

use serde::{Deserialize, Serialize};

use crate::game::HostMessage;

use super::{Resolution, StageManager};

/// Stages of the final clue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalStage {
    /// Category shown, teams write down wagers
    #[default]
    Wager,
    /// Prompt shown
    Clue,
    /// Answer shown, host adjusts scores
    Score,
}

/// Runtime state of the final clue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    stage: FinalStage,
}

impl StageManager for State {
    type Stage = FinalStage;

    fn stage(&self) -> FinalStage {
        self.stage
    }

    fn stage_mut(&mut self) -> &mut FinalStage {
        &mut self.stage
    }
}

impl State {
    /// Handles `Advance`
    ///
    /// # Returns
    ///
    /// [`Resolution::Closed`] when advancing out of the score stage
    pub fn receive_message(&mut self, message: &HostMessage) -> Option<Resolution> {
        if !matches!(message, HostMessage::Advance) {
            return None;
        }

        match self.stage {
            FinalStage::Wager => {
                self.change_stage(FinalStage::Wager, FinalStage::Clue);
                None
            }
            FinalStage::Clue => {
                self.change_stage(FinalStage::Clue, FinalStage::Score);
                None
            }
            FinalStage::Score => Some(Resolution::Closed),
        }
    }
}
