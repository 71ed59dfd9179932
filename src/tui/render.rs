//! Drawing the session
//!
//! Every draw function renders its part of the screen and registers what is
//! clickable in the [`HitMap`] it is handed.

use std::path::PathBuf;

use itertools::Itertools;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Gauge, Paragraph, Wrap},
};

use crate::{
    board::{Clue, Round, TileRef},
    clue::{ClueState, CurrentClue, StageManager, final_clue::FinalStage},
    constants::clue::FINAL_LABEL,
    game::{Game, State, Tone},
    teams::TeamSide,
};

use super::{
    App,
    layout::{self, Button, HitMap, Target},
};

/// Width of the round navigation arrows
const ARROW_WIDTH: u16 = 3;

/// Option letters, in option order
const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

fn highlight() -> Style {
    Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn tone_style(tone: Tone) -> Style {
    let color = match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Neutral => Color::Cyan,
    };
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}

fn option_letter(index: usize) -> char {
    OPTION_LETTERS.get(index).copied().unwrap_or('?')
}

/// Draws the whole screen
///
/// # Returns
///
/// The clickable areas of the frame
pub fn draw(frame: &mut Frame, app: &App) -> HitMap {
    let mut hits = HitMap::default();
    let game = app.game();
    let bands = layout::screen(frame.area());

    draw_header(frame, game, bands.header, &mut hits);

    match &game.state {
        State::SelectingFile(files) => {
            draw_files(frame, files, app.cursor(), bands.body, &mut hits);
            draw_message(frame, app, bands.footer);
        }
        State::Board => {
            match game.current_round() {
                Some(round) => draw_board(frame, round, game.round_index(), bands.body, &mut hits),
                None => draw_no_data(frame, bands.body),
            }
            draw_message(frame, app, bands.footer);
        }
        State::Clue(_) => {
            if let Some((current, clue)) = game.current_clue() {
                draw_clue(frame, game, current, clue, bands.body);
                draw_buttons(frame, &clue_buttons(current, clue), bands.footer, &mut hits);
            }
        }
        State::Done => {
            draw_summary(frame, game, bands.body);
            draw_message(frame, app, bands.footer);
        }
    }

    hits
}

/// Team scores either side of the round title
fn draw_header(frame: &mut Frame, game: &Game, area: Rect, hits: &mut HitMap) {
    let [left, middle, right] = layout::header(area);
    let active = game.teams().active();

    for (side, area) in [(TeamSide::A, left), (TeamSide::B, right)] {
        let team = game.teams().team(side);
        let mut block = Block::bordered().title(format!(" {} ", team.name()));
        if side == active {
            block = block.border_style(highlight()).title_bottom(" to play ");
        }
        let score = Paragraph::new(team.score().to_string())
            .alignment(Alignment::Center)
            .bold()
            .block(block);
        frame.render_widget(score, area);
        hits.push(area, Target::Score(side));
    }

    let title = match game.current_round() {
        Some(round) => format!(
            "{} ({}/{})",
            round.key(),
            game.round_index() + 1,
            game.board().rounds().len()
        ),
        None => "Quiz board".to_owned(),
    };
    let block = Block::bordered();
    let inner = block.inner(middle);
    frame.render_widget(
        Paragraph::new(title).alignment(Alignment::Center).block(block),
        middle,
    );

    let rounds = game.board().rounds().len();
    if matches!(game.state, State::Board) && rounds > 1 {
        let [previous, _, next] = Layout::horizontal([
            Constraint::Length(ARROW_WIDTH),
            Constraint::Min(0),
            Constraint::Length(ARROW_WIDTH),
        ])
        .areas(inner);

        if game.round_index() > 0 {
            frame.render_widget(Paragraph::new("<").alignment(Alignment::Center).bold(), previous);
            hits.push(previous, Target::Button(Button::PreviousRound));
        }
        if game.round_index() + 1 < rounds {
            frame.render_widget(Paragraph::new(">").alignment(Alignment::Center).bold(), next);
            hits.push(next, Target::Button(Button::NextRound));
        }
    }
}

/// The list of clue files
fn draw_files(frame: &mut Frame, files: &[PathBuf], cursor: usize, area: Rect, hits: &mut HitMap) {
    let block = Block::bordered().title(" Choose a clue file ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if files.is_empty() {
        frame.render_widget(
            Paragraph::new("No clue files found").alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let offset = cursor
        .saturating_sub((inner.height as usize).saturating_sub(1))
        .min(files.len() - 1);
    let rows = layout::lines(inner, files.len() - offset);
    for (i, (path, row)) in files[offset..].iter().zip(rows).enumerate() {
        let index = offset + i;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        let line = if index == cursor {
            Line::styled(format!("> {name}"), highlight())
        } else {
            Line::raw(format!("  {name}"))
        };
        frame.render_widget(Paragraph::new(line), row);
        hits.push(row, Target::File(index));
    }
}

/// Placeholder when nothing was loaded
fn draw_no_data(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("No data: the clue file had no usable rows")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered());
    frame.render_widget(text, area);
}

/// The category grid of a round
fn draw_board(frame: &mut Frame, round: &Round, index: usize, area: Rect, hits: &mut HitMap) {
    let categories = round.categories();
    let grid = layout::grid(area, categories.len(), round.max_rows());

    for (category_index, ((category, header), cells)) in categories
        .iter()
        .zip(&grid.headers)
        .zip(&grid.cells)
        .enumerate()
    {
        let name = Paragraph::new(category.name().to_uppercase())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .bold()
            .block(Block::bordered());
        frame.render_widget(name, *header);

        for (row, (clue, cell)) in category.clues().iter().zip(cells).enumerate() {
            if clue.is_used() {
                frame.render_widget(Block::bordered().dark_gray(), *cell);
                continue;
            }
            let label = if clue.is_final() {
                FINAL_LABEL
            } else {
                clue.label()
            };
            let label = Paragraph::new(label.to_owned())
                .alignment(Alignment::Center)
                .style(highlight())
                .block(Block::bordered());
            frame.render_widget(label, *cell);
            hits.push(
                *cell,
                Target::Tile(TileRef {
                    round: index,
                    category: category_index,
                    row,
                }),
            );
        }
    }
}

/// Prompt, options, answer and countdown of the open clue
fn draw_clue(frame: &mut Frame, game: &Game, current: &CurrentClue, clue: &Clue, area: Rect) {
    let team = game.teams().team(game.teams().active()).name();
    let category = game.board().category_name(current.tile).unwrap_or_default();
    let block = Block::bordered()
        .title(format!(" {category} for {} ", clue.label()))
        .title_bottom(format!(" {team} to answer "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let countdown = current.state.countdown();
    let [text_area, timer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(u16::from(countdown.is_some())),
    ])
    .areas(inner);

    let mut text = Text::default();
    if current.state.shows_prompt() {
        text.push_line(Line::from(clue.prompt().to_owned()).bold());
    } else {
        text.push_line(Line::from("Final clue: collect the wagers").bold());
    }

    if current.state.shows_prompt() && !clue.options().is_empty() {
        text.push_line(Line::default());
        let correct = clue.correct_option();
        for (index, option) in clue.options().iter().enumerate() {
            let line = Line::from(format!("{}. {option}", option_letter(index)));
            let line = if current.state.shows_reveal() && Some(index) == correct {
                line.style(tone_style(Tone::Positive))
            } else {
                line
            };
            text.push_line(line);
        }
    }

    if current.state.shows_reveal() {
        text.push_line(Line::default());
        text.push_line(Line::from(vec![
            Span::raw("Answer: "),
            Span::styled(clue.reveal().to_owned(), highlight()),
        ]));
    }

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        text_area,
    );

    if let Some(countdown) = countdown {
        let limit = countdown.limit().as_secs_f64();
        let remaining = countdown.remaining();
        let ratio = if limit > 0.0 {
            (remaining.as_secs_f64() / limit).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .gauge_style(Style::new().fg(Color::Cyan))
            .ratio(ratio)
            .label(format!("{}s", remaining.as_secs_f64().ceil()));
        frame.render_widget(gauge, timer_area);
    }
}

/// Buttons available in the open clue
fn clue_buttons(current: &CurrentClue, clue: &Clue) -> Vec<(Button, String)> {
    match &current.state {
        ClueState::Final(state) => {
            let label = match state.stage() {
                FinalStage::Wager => "Show clue",
                FinalStage::Clue => "Show answer",
                FinalStage::Score => "Done",
            };
            vec![(Button::Advance, label.to_owned())]
        }
        state if state.shows_reveal() => vec![
            (Button::Correct, "Correct".to_owned()),
            (Button::Wrong, "Wrong".to_owned()),
        ],
        ClueState::MultipleChoice(_) => (0..clue.options().len())
            .map(|index| (Button::Choice(index), option_letter(index).to_string()))
            .chain([(Button::Reveal, "Reveal".to_owned())])
            .collect_vec(),
        ClueState::Standard(_) => vec![(Button::Reveal, "Reveal answer".to_owned())],
    }
}

/// A row of bordered buttons
fn draw_buttons(frame: &mut Frame, buttons: &[(Button, String)], area: Rect, hits: &mut HitMap) {
    for ((button, label), rect) in buttons.iter().zip(layout::buttons(area, buttons.len())) {
        let style = match button {
            Button::Correct => tone_style(Tone::Positive),
            Button::Wrong => tone_style(Tone::Negative),
            _ => highlight(),
        };
        frame.render_widget(
            Paragraph::new(label.as_str())
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::bordered()),
            rect,
        );
        hits.push(rect, Target::Button(*button));
    }
}

/// Final standings
fn draw_summary(frame: &mut Frame, game: &Game, area: Rect) {
    let summary = game.summary();
    let text = Paragraph::new(summary.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(" Game over "));
    frame.render_widget(text, area);
}

/// Feedback banner, load error, or key help
fn draw_message(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if let Some(feedback) = app.game().feedback() {
        (feedback.text.clone(), tone_style(feedback.tone))
    } else if let Some(status) = app.status() {
        (status.to_owned(), tone_style(Tone::Negative))
    } else {
        let help = match app.game().state {
            State::SelectingFile(_) => "Up/Down select  Enter open  Tab back  q quit",
            State::Board if app.has_files() => {
                "+/- score  T switch team  Left/Right round  F files  E end  q quit"
            }
            State::Board => "+/- score  T switch team  Left/Right round  E end  q quit",
            State::Clue(_) | State::Done => "q quit",
        };
        (help.to_owned(), Style::new().dark_gray())
    };

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::bordered()),
        area,
    );
}
