//! Key dispatch: the normal / insert / command mode state machine.

use super::EditorState;
use crate::commands::{execute_command, E37};
use crate::types::{Key, KeyInput, Mode, Operator, Pos};
use crate::vfs::FileStore;

/// Result of feeding one key to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: EditorState,
    pub should_exit: bool,
}

/// Process one key against `state`, producing the next state.
///
/// Unrecognized keys leave the state unchanged; nothing here fails.
pub fn dispatch(state: &EditorState, input: KeyInput, store: &dyn FileStore) -> Transition {
    let mut next = state.clone();

    // Escape wins in every mode.
    if input.key == Key::Escape {
        next.escape();
        return Transition { state: next, should_exit: false };
    }

    let should_exit = match next.mode {
        Mode::Normal => next.handle_normal(input),
        Mode::Insert => {
            next.handle_insert(input);
            false
        }
        Mode::Command => next.handle_command(input, store),
        Mode::Visual => false,
    };
    Transition { state: next, should_exit }
}

impl EditorState {
    fn escape(&mut self) {
        if self.mode == Mode::Normal {
            self.pending_operator = None;
            return;
        }
        self.mode = Mode::Normal;
        self.command_buffer.clear();
        self.status_message.clear();
        self.pending_operator = None;
        self.insert_snapshot = None;
        self.clamp_cursor();
    }

    /// Returns `true` when the editor should exit.
    fn handle_normal(&mut self, input: KeyInput) -> bool {
        if let Some(op) = self.pending_operator {
            self.complete_operator(op, input);
            return false;
        }

        if input.ctrl {
            if input.key == Key::Char('r') {
                self.redo_or_report();
            }
            return false;
        }

        if input.key == Key::Char('q') {
            if !self.modified {
                return true;
            }
            self.status_message = E37.to_string();
            return false;
        }

        if self.handle_motion(input) {
            return false;
        }

        let Key::Char(c) = input.key else {
            return false;
        };

        if let Some(op) = Operator::from_char(c) {
            self.pending_operator = Some(op);
            return false;
        }

        match c {
            'x' => self.delete_char_under_cursor(),
            'i' => self.enter_insert(self.cursor.col),
            'I' => {
                let indent = self.current_line().chars().take_while(|ch| ch.is_whitespace()).count();
                self.enter_insert(indent);
            }
            'a' => self.enter_insert(self.cursor.col + 1),
            'A' => self.enter_insert(self.buf.line_len_chars(self.cursor.row)),
            'o' => self.open_line(self.cursor.row + 1),
            'O' => self.open_line(self.cursor.row),
            ':' => {
                self.mode = Mode::Command;
                self.command_buffer.clear();
            }
            'p' => self.put(false),
            'P' => self.put(true),
            'u' => self.undo_or_report(),
            _ => {}
        }
        false
    }

    /// `o` / `O`: insert an empty line at `row` and start inserting there.
    fn open_line(&mut self, row: usize) {
        let prior = self.save_undo_state();
        self.buf.insert_lines(row, &[String::new()]);
        self.push_undo(prior);
        self.modified = true;
        self.mode = Mode::Insert;
        self.insert_snapshot = None;
        self.cursor = Pos { row, col: 0 };
    }

    fn undo_or_report(&mut self) {
        match self.undo() {
            Some(next) => *self = next,
            None => self.status_message = "Already at oldest change".to_string(),
        }
    }

    fn redo_or_report(&mut self) {
        match self.redo() {
            Some(next) => *self = next,
            None => self.status_message = "Already at newest change".to_string(),
        }
    }

    fn handle_insert(&mut self, input: KeyInput) {
        if input.ctrl {
            return;
        }
        match input.key {
            Key::Char(_) => {
                if let Some(ch) = input.printable() {
                    self.begin_insert_edit();
                    self.cursor = self.buf.insert_char(self.cursor, ch);
                }
            }
            Key::Tab => {
                self.begin_insert_edit();
                self.cursor = self.buf.insert_str(self.cursor, "  ");
            }
            Key::Backspace => {
                if self.cursor.col == 0 && self.cursor.row == 0 {
                    return;
                }
                self.begin_insert_edit();
                if let Some(p) = self.buf.delete_backspace(self.cursor) {
                    self.cursor = p;
                }
            }
            Key::Enter => {
                self.begin_insert_edit();
                self.cursor = self.buf.insert_newline(self.cursor);
            }
            Key::Left | Key::Right | Key::Up | Key::Down | Key::Escape | Key::Other => {}
        }
    }

    /// Every insert-mode edit marks the buffer modified; the first one of an insert session
    /// also records the session's starting state for undo.
    fn begin_insert_edit(&mut self) {
        if let Some(prior) = self.insert_snapshot.take() {
            self.push_undo(prior);
        }
        self.modified = true;
    }

    /// Returns `true` when the submitted command asks to exit.
    fn handle_command(&mut self, input: KeyInput, store: &dyn FileStore) -> bool {
        match input.key {
            Key::Enter => {
                let outcome = execute_command(self, store, &self.command_buffer);
                if outcome.should_exit {
                    return true;
                }
                if let Some(next) = outcome.state {
                    *self = next;
                }
                self.mode = Mode::Normal;
                self.command_buffer.clear();
                self.status_message = outcome.message.unwrap_or_default();
                self.clamp_cursor();
            }
            Key::Backspace => {
                self.command_buffer.pop();
            }
            _ => {
                if let Some(ch) = input.printable() {
                    self.command_buffer.push(ch);
                }
            }
        }
        false
    }
}
