//! # Quizboard
//!
//! This library provides the logic behind a quiz board presented by a live
//! host to two competing teams. It loads clue files into rounds and
//! categories, runs the session state machine that opens, reveals and judges
//! clues, keeps score, and renders the board in a terminal.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::ignored_unit_patterns)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]

pub mod board;
pub mod clue;
pub mod config;
pub mod constants;
pub mod game;
pub mod names;
pub mod scoreboard;
pub mod teams;
pub mod tui;

pub use board::{Board, Clue, LoadError, TileRef};
pub use config::Options;
pub use game::{Game, HostMessage};
