//! Key and pointer bindings

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::{
    clue::{ClueState, Verdict},
    constants::clue::MAX_OPTION_COUNT,
    game::{Adjustment, HostMessage, State},
};

use super::{
    App,
    layout::{Button, Target},
};

/// What the front end does in response to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forward a command to the session
    Host(HostMessage),
    /// Load the file at this index of the file list
    OpenFile(usize),
    /// Move the file list cursor up
    CursorUp,
    /// Move the file list cursor down
    CursorDown,
    /// Go back to the file list
    ShowFiles,
    /// Leave the program
    Quit,
}

impl From<HostMessage> for Action {
    fn from(message: HostMessage) -> Self {
        Self::Host(message)
    }
}

/// Maps an option key (`1`-`4` or `a`-`d`) to an option index
fn option_index(c: char) -> Option<usize> {
    let index = match c.to_ascii_lowercase() {
        digit @ '1'..='9' => digit as usize - '1' as usize,
        letter @ 'a'..='z' => letter as usize - 'a' as usize,
        _ => return None,
    };
    (index < MAX_OPTION_COUNT).then_some(index)
}

/// Translates a key press
pub fn key_action(key: KeyEvent, app: &App) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q' | 'Q')) {
        return Some(Action::Quit);
    }

    let game = app.game();
    match &game.state {
        State::SelectingFile(_) => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
            KeyCode::Enter => Some(Action::OpenFile(app.cursor())),
            KeyCode::Tab => Some(HostMessage::OpenBoard.into()),
            _ => None,
        },
        State::Board => match key.code {
            KeyCode::Char('+' | '=') => Some(HostMessage::Adjust(Adjustment::Increase).into()),
            KeyCode::Char('-' | '_') => Some(HostMessage::Adjust(Adjustment::Decrease).into()),
            KeyCode::Char('t' | 'T') => Some(HostMessage::ToggleTeam.into()),
            KeyCode::Left | KeyCode::PageUp => Some(HostMessage::PreviousRound.into()),
            KeyCode::Right | KeyCode::PageDown => Some(HostMessage::NextRound.into()),
            KeyCode::Char('e' | 'E') => Some(HostMessage::End.into()),
            KeyCode::Char('f' | 'F') if app.has_files() => Some(Action::ShowFiles),
            _ => None,
        },
        State::Clue(current) => {
            let is_final = matches!(current.state, ClueState::Final(_));
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') if is_final => {
                    Some(HostMessage::Advance.into())
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(HostMessage::Reveal.into()),
                KeyCode::Char('+' | '=') => Some(HostMessage::Adjust(Adjustment::Increase).into()),
                KeyCode::Char('-' | '_') => Some(HostMessage::Adjust(Adjustment::Decrease).into()),
                KeyCode::Char('t' | 'T') if is_final => Some(HostMessage::ToggleTeam.into()),
                KeyCode::Char('y' | 'Y') => Some(HostMessage::Judge(Verdict::Correct).into()),
                KeyCode::Char('n' | 'N') => Some(HostMessage::Judge(Verdict::Wrong).into()),
                KeyCode::Char(c) if matches!(current.state, ClueState::MultipleChoice(_)) => {
                    option_index(c).map(|index| HostMessage::Choose(index).into())
                }
                _ => None,
            }
        }
        State::Done => None,
    }
}

/// Translates a pointer event using the last frame's hit map
///
/// A left click activates whatever is under the pointer. On the active
/// team's score box a left click adds a score step and a right click removes
/// one.
pub fn mouse_action(mouse: MouseEvent, app: &App) -> Option<Action> {
    let target = app.hit_map().hit(mouse.column, mouse.row)?;
    let active = app.game().teams().active();

    match (mouse.kind, target) {
        (MouseEventKind::Down(MouseButton::Left), Target::Tile(tile)) => {
            Some(HostMessage::Select(tile).into())
        }
        (MouseEventKind::Down(MouseButton::Left), Target::File(index)) => {
            Some(Action::OpenFile(index))
        }
        (MouseEventKind::Down(MouseButton::Left), Target::Button(button)) => {
            Some(button_message(button).into())
        }
        (MouseEventKind::Down(MouseButton::Left), Target::Score(side)) if side == active => {
            Some(HostMessage::Adjust(Adjustment::Increase).into())
        }
        (MouseEventKind::Down(MouseButton::Right), Target::Score(side)) if side == active => {
            Some(HostMessage::Adjust(Adjustment::Decrease).into())
        }
        _ => None,
    }
}

/// The command behind a button
fn button_message(button: Button) -> HostMessage {
    match button {
        Button::Reveal => HostMessage::Reveal,
        Button::Correct => HostMessage::Judge(Verdict::Correct),
        Button::Wrong => HostMessage::Judge(Verdict::Wrong),
        Button::Choice(index) => HostMessage::Choose(index),
        Button::Advance => HostMessage::Advance,
        Button::PreviousRound => HostMessage::PreviousRound,
        Button::NextRound => HostMessage::NextRound,
        Button::End => HostMessage::End,
    }
}
