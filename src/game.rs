//! Core game logic and state management
//!
//! This module contains the session a host runs in front of two teams: the
//! loaded board, the teams and whose turn it is, the score ledger, and the
//! screen currently shown. The front end turns clicks and keys into
//! [`HostMessage`]s and calls [`Game::tick`] once per frame; everything else
//! happens here.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    board::{Board, Clue, Round, TileRef},
    clue::{ClueState, CurrentClue, Resolution, Verdict},
    config::Options,
    names,
    scoreboard::{Cause, ScoreEntry, Scoreboard, Summary},
    teams::{TeamSide, Teams},
};

/// Represents the screen the session is on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum State {
    /// Listing clue files to pick from
    SelectingFile(Vec<PathBuf>),
    /// Showing the grid of the current round
    Board,
    /// A clue is open
    Clue(Box<CurrentClue>),
    /// Final standings, nothing left to play
    Done,
}

/// Direction of a manual score adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Add one score step
    Increase,
    /// Remove one score step
    Decrease,
}

/// Commands the host can give
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostMessage {
    /// Leave the file selection screen for the loaded board
    OpenBoard,
    /// Open a tile of the current round
    Select(TileRef),
    /// Show the answer of the open clue
    Reveal,
    /// Record a verdict for the open clue
    Judge(Verdict),
    /// Pick an option of a multiple choice clue
    Choose(usize),
    /// Move the final clue to its next stage
    Advance,
    /// Change the active team's score by one step
    Adjust(Adjustment),
    /// Hand the turn to the other team
    ToggleTeam,
    /// Show the previous round
    PreviousRound,
    /// Show the next round
    NextRound,
    /// Stop playing and show the standings
    End,
}

/// How a feedback banner is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// Points were won
    Positive,
    /// The answer was wrong or timed out
    Negative,
    /// Informational
    Neutral,
}

/// A short message shown after a clue is resolved
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Text of the banner
    pub text: String,
    /// Color of the banner
    pub tone: Tone,
    /// Time until the banner disappears
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub remaining: Duration,
}

/// The quiz board session
#[derive(Debug, Serialize, Deserialize)]
pub struct Game {
    /// Clues loaded from the current file
    board: Board,
    /// Index of the round on screen
    round: usize,
    /// Both teams and the active one
    teams: Teams,
    /// Every score change so far
    scoreboard: Scoreboard,
    /// Current screen
    pub state: State,
    /// Session options
    options: Options,
    /// Banner from the last resolved clue
    feedback: Option<Feedback>,
}

impl Game {
    /// Creates a session showing the given board
    ///
    /// # Arguments
    ///
    /// * `board` - The clues to play; an empty board shows a "no data" grid
    /// * `options` - Session options
    ///
    /// # Errors
    ///
    /// Returns a [`names::Error`] if configured team names are rejected.
    pub fn new(board: Board, options: Options) -> Result<Self, names::Error> {
        let teams = Teams::new(options.teams.resolve()?, options.first_turn.resolve());

        info!(
            team_a = teams.team(TeamSide::A).name(),
            team_b = teams.team(TeamSide::B).name(),
            first = %teams.active(),
            clues = board.clue_count(),
            "session started"
        );

        Ok(Self {
            board,
            round: 0,
            teams,
            scoreboard: Scoreboard::default(),
            state: State::Board,
            options,
            feedback: None,
        })
    }

    /// Creates a session that starts on the file selection screen
    ///
    /// # Errors
    ///
    /// Returns a [`names::Error`] if configured team names are rejected.
    pub fn with_file_selection(
        files: Vec<PathBuf>,
        options: Options,
    ) -> Result<Self, names::Error> {
        let mut game = Self::new(Board::default(), options)?;
        game.state = State::SelectingFile(files);
        Ok(game)
    }

    /// The loaded board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Index of the round on screen
    pub fn round_index(&self) -> usize {
        self.round
    }

    /// The round on screen, `None` when nothing was loaded
    pub fn current_round(&self) -> Option<&Round> {
        self.board.round(self.round)
    }

    /// Both teams
    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    /// The score ledger
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Session options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The feedback banner, while it is visible
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// The open clue with its board entry
    pub fn current_clue(&self) -> Option<(&CurrentClue, &Clue)> {
        match &self.state {
            State::Clue(current) => self
                .board
                .clue(current.tile)
                .map(|clue| (current.as_ref(), clue)),
            _ => None,
        }
    }

    /// The end-of-game report
    pub fn summary(&self) -> Summary {
        self.scoreboard.summary(&self.teams, &self.board)
    }

    /// Replaces the board and shows its first round
    ///
    /// A new board starts a new game: scores and the ledger are cleared and
    /// the first turn is decided again.
    pub fn load_board(&mut self, board: Board) {
        info!(
            rounds = board.rounds().len(),
            clues = board.clue_count(),
            "board loaded"
        );
        self.board = board;
        self.round = 0;
        self.teams.reset(self.options.first_turn.resolve());
        self.scoreboard = Scoreboard::default();
        self.feedback = None;
        self.state = State::Board;
    }

    /// Switches to the file selection screen
    ///
    /// Only allowed from the board, so an open clue cannot be abandoned.
    ///
    /// # Returns
    ///
    /// `true` if the screen changed
    pub fn show_file_selection(&mut self, files: Vec<PathBuf>) -> bool {
        if matches!(self.state, State::Board) {
            self.state = State::SelectingFile(files);
            true
        } else {
            false
        }
    }

    /// Handles a host command
    ///
    /// Commands that make no sense on the current screen are ignored.
    pub fn receive_message(&mut self, message: HostMessage) {
        debug!(?message, "host message");

        match &self.state {
            State::SelectingFile(_) => {
                if matches!(message, HostMessage::OpenBoard) && !self.board.is_empty() {
                    self.state = State::Board;
                }
            }
            State::Board => match message {
                HostMessage::Select(tile) => self.open_clue(tile),
                HostMessage::Adjust(adjustment) => self.adjust(adjustment),
                HostMessage::ToggleTeam => self.toggle_team(),
                HostMessage::PreviousRound => self.set_round(self.round.saturating_sub(1)),
                HostMessage::NextRound => self.set_round(self.round.saturating_add(1)),
                HostMessage::End => self.finish(),
                HostMessage::OpenBoard
                | HostMessage::Reveal
                | HostMessage::Judge(_)
                | HostMessage::Choose(_)
                | HostMessage::Advance => {}
            },
            State::Clue(current) => {
                if current.state.accepts_adjustments() {
                    match message {
                        HostMessage::Adjust(adjustment) => return self.adjust(adjustment),
                        HostMessage::ToggleTeam => return self.toggle_team(),
                        _ => {}
                    }
                }
                self.receive_clue_message(&message);
            }
            State::Done => {}
        }
    }

    /// Advances timers by the time since the last frame
    ///
    /// Expires the feedback banner and runs the open clue's countdown.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(feedback) = &mut self.feedback {
            feedback.remaining = feedback.remaining.saturating_sub(elapsed);
            if feedback.remaining.is_zero() {
                self.feedback = None;
            }
        }

        let resolution = match &mut self.state {
            State::Clue(current) => current
                .state
                .tick(elapsed)
                .map(|resolution| (current.tile, resolution)),
            _ => None,
        };

        if let Some((tile, resolution)) = resolution {
            self.resolve(tile, resolution);
        }
    }

    /// Forwards a message to the open clue and settles its resolution
    fn receive_clue_message(&mut self, message: &HostMessage) {
        let resolution = match &mut self.state {
            State::Clue(current) => current
                .state
                .receive_message(message)
                .map(|resolution| (current.tile, resolution)),
            _ => None,
        };

        if let Some((tile, resolution)) = resolution {
            self.resolve(tile, resolution);
        }
    }

    /// Opens a tile of the current round
    ///
    /// Tiles from other rounds, unknown tiles and used tiles are ignored.
    fn open_clue(&mut self, tile: TileRef) {
        if tile.round != self.round {
            return;
        }
        let Some(clue) = self.board.clue(tile).filter(|clue| !clue.is_used()) else {
            return;
        };

        let state = ClueState::for_clue(clue, self.options.countdown);
        info!(
            round = tile.round,
            category = self.board.category_name(tile).unwrap_or_default(),
            points = clue.points(),
            team = %self.teams.active(),
            "clue opened"
        );

        self.feedback = None;
        self.state = State::Clue(Box::new(CurrentClue { tile, state }));
    }

    /// Settles a finished clue and returns to the board
    fn resolve(&mut self, tile: TileRef, resolution: Resolution) {
        let Some(clue) = self.board.clue_mut(tile) else {
            self.state = State::Board;
            return;
        };
        let points = clue.points();
        let reveal = clue.reveal().to_owned();
        clue.mark_used();

        match resolution {
            Resolution::Judged(verdict) => {
                let side = self.teams.active();
                let delta = if verdict.is_correct() {
                    points
                } else {
                    self.options.wrong_answer.penalty(points)
                };
                self.record(side, delta, Cause::Judged(verdict), Some(tile));
                self.teams.flip_turn();

                let team = self.teams.team(side).name();
                let (text, tone) = match verdict {
                    Verdict::Correct => (format!("CORRECT! {team} {delta:+}"), Tone::Positive),
                    Verdict::Wrong | Verdict::TimeUp => (
                        match (delta, reveal.is_empty()) {
                            (0, true) => format!("{verdict}!"),
                            (0, false) => format!("{verdict}! The answer was {reveal}"),
                            (_, true) => format!("{verdict}! {team} {delta:+}"),
                            (_, false) => {
                                format!("{verdict}! {team} {delta:+}. The answer was {reveal}")
                            }
                        },
                        Tone::Negative,
                    ),
                };
                self.show_feedback(text, tone);
            }
            Resolution::Closed => {
                info!(round = tile.round, "final clue closed");
                self.show_feedback("Final clue scored".to_owned(), Tone::Neutral);
            }
        }

        self.state = State::Board;
        if self.board.remaining() == 0 {
            self.finish();
        }
    }

    /// Applies a score change to a team and the ledger
    fn record(&mut self, team: TeamSide, delta: i64, cause: Cause, tile: Option<TileRef>) {
        let score = self.teams.add_points(team, delta);
        self.scoreboard.record(ScoreEntry {
            team,
            delta,
            cause,
            tile,
        });
        info!(%team, delta, score, ?cause, "score changed");
    }

    /// Changes the active team's score by one step
    fn adjust(&mut self, adjustment: Adjustment) {
        let delta = match adjustment {
            Adjustment::Increase => self.options.score_step,
            Adjustment::Decrease => self.options.score_step.saturating_neg(),
        };
        self.record(self.teams.active(), delta, Cause::Adjustment, None);
    }

    /// Hands the turn to the other team
    fn toggle_team(&mut self) {
        self.teams.flip_turn();
        info!(team = %self.teams.active(), "turn switched");
    }

    /// Shows a round, clamped to the loaded rounds
    fn set_round(&mut self, round: usize) {
        let last = self.board.rounds().len().saturating_sub(1);
        let round = round.min(last);
        if round != self.round {
            self.round = round;
            info!(round, "round changed");
        }
    }

    /// Shows a feedback banner unless banners are disabled
    fn show_feedback(&mut self, text: String, tone: Tone) {
        let remaining = self.options.feedback_duration;
        self.feedback = (!remaining.is_zero()).then_some(Feedback {
            text,
            tone,
            remaining,
        });
    }

    /// Ends the game
    fn finish(&mut self) {
        self.state = State::Done;
        info!(
            a = self.teams.team(TeamSide::A).score(),
            b = self.teams.team(TeamSide::B).score(),
            "game over"
        );
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{
        board::{Choice, RoundKey},
        clue::{StageManager, final_clue::FinalStage},
        config::{FirstTurn, WrongAnswerPolicy},
    };
    use pretty_assertions::assert_eq;

    fn key(number: u32) -> RoundKey {
        RoundKey {
            air_date: None,
            number,
        }
    }

    fn tile(round: usize, category: usize, row: usize) -> TileRef {
        TileRef {
            round,
            category,
            row,
        }
    }

    fn create_test_board() -> Board {
        Board::from_entries([
            (key(1), "History".to_owned(), Clue::new("First president?", "Washington", 200)),
            (key(1), "Science".to_owned(), Clue::new("What is H2O?", "Water", 100)),
            (
                key(1),
                "Science".to_owned(),
                Clue::new("Sky color?", "", 300).with_options(
                    vec!["Red".to_owned(), "Blue".to_owned()],
                    Some(Choice::Index(1)),
                ),
            ),
            (key(2), "Final".to_owned(), Clue::new("Last one", "Done", 0)),
        ])
    }

    fn create_test_game(options: Options) -> Game {
        Game::new(create_test_board(), options).unwrap()
    }

    fn play(game: &mut Game, tile: TileRef, verdict: Verdict) {
        game.receive_message(HostMessage::Select(tile));
        game.receive_message(HostMessage::Reveal);
        game.receive_message(HostMessage::Judge(verdict));
    }

    fn score(game: &Game, side: TeamSide) -> i64 {
        game.teams().team(side).score()
    }

    fn assert_ledger_matches(game: &Game) {
        for (side, team) in game.teams().iter() {
            assert_eq!(game.scoreboard().total(side), team.score());
        }
    }

    #[test]
    fn test_correct_answer_credits_and_flips_turn() {
        let mut game = create_test_game(Options::default());
        let science = tile(0, 1, 0);

        play(&mut game, science, Verdict::Correct);

        assert_eq!(score(&game, TeamSide::A), 100);
        assert_eq!(game.teams().active(), TeamSide::B);
        assert!(game.board().clue(science).unwrap().is_used());
        assert!(matches!(game.state, State::Board));
        assert_eq!(game.feedback().map(|f| f.tone), Some(Tone::Positive));
        assert_ledger_matches(&game);
    }

    #[test]
    fn test_wrong_answer_policies() {
        let mut game = create_test_game(Options::default());
        play(&mut game, tile(0, 0, 0), Verdict::Wrong);
        assert_eq!(score(&game, TeamSide::A), -200);

        let mut game = create_test_game(Options {
            wrong_answer: WrongAnswerPolicy::NoPenalty,
            ..Options::default()
        });
        play(&mut game, tile(0, 0, 0), Verdict::Wrong);
        assert_eq!(score(&game, TeamSide::A), 0);
        assert_eq!(game.teams().active(), TeamSide::B);
        assert_eq!(game.scoreboard().entries().len(), 1);
        assert_ledger_matches(&game);
    }

    #[test]
    fn test_used_tile_cannot_be_reopened() {
        let mut game = create_test_game(Options::default());
        let science = tile(0, 1, 0);
        play(&mut game, science, Verdict::Correct);

        game.receive_message(HostMessage::Select(science));
        assert!(matches!(game.state, State::Board));
        assert_eq!(game.teams().active(), TeamSide::B);
    }

    #[test]
    fn test_judging_before_reveal_is_ignored() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        game.receive_message(HostMessage::Judge(Verdict::Correct));

        assert!(matches!(game.state, State::Clue(_)));
        assert_eq!(score(&game, TeamSide::A), 0);
    }

    #[test]
    fn test_tiles_outside_current_round_are_ignored() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::Select(tile(1, 0, 0)));
        assert!(matches!(game.state, State::Board));
        game.receive_message(HostMessage::Select(tile(0, 7, 0)));
        assert!(matches!(game.state, State::Board));
    }

    #[test]
    fn test_multiple_choice_judges_on_pick() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::Select(tile(0, 1, 1)));
        game.receive_message(HostMessage::Choose(1));

        assert_eq!(score(&game, TeamSide::A), 300);
        assert!(matches!(game.state, State::Board));

        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::Select(tile(0, 1, 1)));
        game.receive_message(HostMessage::Choose(0));
        assert_eq!(score(&game, TeamSide::A), -300);
        assert!(
            game.feedback()
                .is_some_and(|feedback| feedback.text.contains("The answer was Blue"))
        );
    }

    #[test]
    fn test_adjustments_do_not_flip_turn() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::Adjust(Adjustment::Increase));
        game.receive_message(HostMessage::Adjust(Adjustment::Increase));
        game.receive_message(HostMessage::Adjust(Adjustment::Decrease));

        assert_eq!(score(&game, TeamSide::A), 1000);
        assert_eq!(game.teams().active(), TeamSide::A);
        assert_eq!(game.board().remaining(), 4);
        assert_ledger_matches(&game);
    }

    #[test]
    fn test_adjustments_ignored_inside_open_clue() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        game.receive_message(HostMessage::Adjust(Adjustment::Increase));
        game.receive_message(HostMessage::ToggleTeam);

        assert_eq!(score(&game, TeamSide::A), 0);
        assert_eq!(game.teams().active(), TeamSide::A);
    }

    #[test]
    fn test_toggle_team() {
        let mut game = create_test_game(Options {
            first_turn: FirstTurn::B,
            ..Options::default()
        });
        assert_eq!(game.teams().active(), TeamSide::B);
        game.receive_message(HostMessage::ToggleTeam);
        assert_eq!(game.teams().active(), TeamSide::A);
    }

    #[test]
    fn test_round_navigation_clamps() {
        let mut game = create_test_game(Options::default());

        game.receive_message(HostMessage::PreviousRound);
        assert_eq!(game.round_index(), 0);
        game.receive_message(HostMessage::NextRound);
        assert_eq!(game.round_index(), 1);
        game.receive_message(HostMessage::NextRound);
        assert_eq!(game.round_index(), 1);
        assert_eq!(game.current_round().map(|r| r.key().number), Some(2));
    }

    #[test]
    fn test_round_navigation_blocked_inside_clue() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        game.receive_message(HostMessage::NextRound);
        assert_eq!(game.round_index(), 0);
    }

    #[test]
    fn test_final_clue_flow() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::NextRound);
        let last = tile(1, 0, 0);

        game.receive_message(HostMessage::Select(last));
        let stage = |game: &Game| match &game.state {
            State::Clue(current) => match &current.state {
                ClueState::Final(state) => Some(state.stage()),
                _ => None,
            },
            _ => None,
        };
        assert_eq!(stage(&game), Some(FinalStage::Wager));

        game.receive_message(HostMessage::Adjust(Adjustment::Increase));
        assert_eq!(score(&game, TeamSide::A), 0);

        game.receive_message(HostMessage::Advance);
        game.receive_message(HostMessage::Advance);
        assert_eq!(stage(&game), Some(FinalStage::Score));

        game.receive_message(HostMessage::Adjust(Adjustment::Increase));
        game.receive_message(HostMessage::ToggleTeam);
        game.receive_message(HostMessage::Adjust(Adjustment::Decrease));
        game.receive_message(HostMessage::Advance);

        assert_eq!(score(&game, TeamSide::A), 1000);
        assert_eq!(score(&game, TeamSide::B), -1000);
        assert_eq!(game.teams().active(), TeamSide::B);
        assert!(game.board().clue(last).unwrap().is_used());
        assert!(matches!(game.state, State::Board));
        assert_ledger_matches(&game);
    }

    #[test]
    fn test_countdown_times_out() {
        let board = Board::from_entries([
            (
                key(1),
                "Quick".to_owned(),
                Clue::new("Fast?", "Yes", 100).with_time_limit(Some(Duration::from_secs(1))),
            ),
            (key(1), "Slow".to_owned(), Clue::new("Slow?", "No", 100)),
        ]);
        let mut game = Game::new(board, Options::default()).unwrap();

        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        game.tick(Duration::from_millis(500));
        assert!(matches!(game.state, State::Clue(_)));
        game.tick(Duration::from_millis(500));

        assert!(matches!(game.state, State::Board));
        assert_eq!(score(&game, TeamSide::A), -100);
        assert_eq!(game.teams().active(), TeamSide::B);
        assert!(
            game.feedback()
                .is_some_and(|feedback| feedback.text.starts_with("Time's up!"))
        );
    }

    #[test]
    fn test_zero_time_limit_times_out_on_first_tick() {
        let board = Board::from_entries([
            (
                key(1),
                "Quick".to_owned(),
                Clue::new("Instant?", "Yes", 100).with_time_limit(Some(Duration::ZERO)),
            ),
            (key(1), "Slow".to_owned(), Clue::new("Slow?", "No", 100)),
        ]);
        let mut game = Game::new(board, Options::default()).unwrap();

        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        game.tick(Duration::from_millis(100));

        assert!(matches!(game.state, State::Board));
        assert_eq!(score(&game, TeamSide::A), -100);
        assert_eq!(game.teams().active(), TeamSide::B);
        assert_ledger_matches(&game);
    }

    #[test]
    fn test_countdown_disabled() {
        let board = Board::from_entries([(
            key(1),
            "Quick".to_owned(),
            Clue::new("Fast?", "Yes", 100).with_time_limit(Some(Duration::from_secs(1))),
        )]);
        let mut game = Game::new(
            board,
            Options {
                countdown: false,
                ..Options::default()
            },
        )
        .unwrap();

        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        game.tick(Duration::from_secs(5));
        assert!(matches!(game.state, State::Clue(_)));
    }

    #[test]
    fn test_feedback_expires() {
        let mut game = create_test_game(Options {
            feedback_duration: Duration::from_millis(100),
            ..Options::default()
        });
        play(&mut game, tile(0, 0, 0), Verdict::Correct);

        game.tick(Duration::from_millis(60));
        assert_eq!(
            game.feedback().map(|f| f.remaining),
            Some(Duration::from_millis(40))
        );
        game.tick(Duration::from_millis(60));
        assert_eq!(game.feedback(), None);
    }

    #[test]
    fn test_zero_feedback_duration_shows_nothing() {
        let mut game = create_test_game(Options {
            feedback_duration: Duration::ZERO,
            ..Options::default()
        });
        play(&mut game, tile(0, 0, 0), Verdict::Correct);
        assert_eq!(game.feedback(), None);
    }

    #[test]
    fn test_exhausting_board_ends_game() {
        let board = Board::from_entries([(key(1), "Only".to_owned(), Clue::new("Q", "A", 100))]);
        let mut game = Game::new(board, Options::default()).unwrap();

        play(&mut game, tile(0, 0, 0), Verdict::Correct);

        assert!(matches!(game.state, State::Done));
        let summary = game.summary();
        assert_eq!(summary.winner, Some(TeamSide::A));
        assert_eq!(summary.clues_played, 1);
    }

    #[test]
    fn test_end_from_board() {
        let mut game = create_test_game(Options::default());
        game.receive_message(HostMessage::End);
        assert!(matches!(game.state, State::Done));

        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        assert!(matches!(game.state, State::Done));
    }

    #[test]
    fn test_empty_board_disables_tiles() {
        let mut game = Game::new(Board::default(), Options::default()).unwrap();
        assert!(game.current_round().is_none());

        game.receive_message(HostMessage::Select(tile(0, 0, 0)));
        game.receive_message(HostMessage::NextRound);
        assert!(matches!(game.state, State::Board));
        assert_eq!(game.round_index(), 0);
    }

    #[test]
    fn test_file_selection_flow() {
        let files = vec![PathBuf::from("q1.txt")];
        let mut game = Game::with_file_selection(files.clone(), Options::default()).unwrap();

        game.receive_message(HostMessage::OpenBoard);
        assert!(matches!(&game.state, State::SelectingFile(listed) if *listed == files));

        game.load_board(create_test_board());
        assert!(matches!(game.state, State::Board));

        assert!(game.show_file_selection(files));
        game.receive_message(HostMessage::OpenBoard);
        assert!(matches!(game.state, State::Board));
    }

    #[test]
    fn test_loading_board_starts_new_game() {
        let mut game = create_test_game(Options::default());
        play(&mut game, tile(0, 1, 0), Verdict::Correct);
        assert_eq!(score(&game, TeamSide::A), 100);
        assert_eq!(game.teams().active(), TeamSide::B);

        game.load_board(Board::from_entries([(
            key(1),
            "Geography".to_owned(),
            Clue::new("Longest river?", "Nile", 500),
        )]));

        assert!(matches!(game.state, State::Board));
        assert_eq!(game.round_index(), 0);
        assert_eq!(game.teams().active(), TeamSide::A);
        assert!(game.teams().iter().all(|(_, team)| team.score() == 0));
        assert!(game.scoreboard().entries().is_empty());
        assert_ledger_matches(&game);

        game.receive_message(HostMessage::End);
        let summary = game.summary();
        assert_eq!(summary.clues_played, 0);
        assert_eq!(summary.clues_total, 1);
        assert!(summary.standings.iter().all(|standing| standing.correct == 0));
    }

    #[test]
    fn test_invalid_team_names_are_rejected() {
        let mut options = Options::default();
        options.teams.names = ["Owls".to_owned(), "owls".to_owned()];
        assert_eq!(
            Game::new(Board::default(), options).err(),
            Some(names::Error::Duplicate)
        );
    }
}
