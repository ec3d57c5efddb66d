//! Operator-pending commands: `dd`, `dw`, `yy`, `gg`.

use super::movement::word_end; // `w` span rule
use super::EditorState; // main editor state
use crate::types::{Key, KeyInput, Operator, Pos}; // operator and key types
use tracing::debug;

impl EditorState {
    /// Finish the pending operator with `input`. Unknown completions drop the operator silently.
    pub(super) fn complete_operator(&mut self, op: Operator, input: KeyInput) {
        self.pending_operator = None;
        let completion = match input.key {
            Key::Char(c) if !input.ctrl => c,
            _ => return,
        };
        debug!(?op, completion = %completion, "operator");
        match (op, completion) {
            (Operator::Delete, 'd') => self.delete_line(),
            (Operator::Delete, 'w') => self.delete_word(),
            (Operator::Yank, 'y') => {
                let line = self.current_line().to_string();
                self.set_yank(vec![line], true);
                self.status_message = "1 line yanked".to_string();
            }
            (Operator::Go, 'g') => self.cursor = Pos { row: 0, col: 0 },
            _ => {}
        }
    }

    /// `dd`
    fn delete_line(&mut self) {
        let prior = self.save_undo_state();
        let removed = self.buf.delete_line(self.cursor.row);
        self.push_undo(prior);
        self.set_yank(vec![removed], true);
        self.cursor = Pos { row: self.cursor.row.min(self.buf.last_row()), col: 0 };
        self.modified = true;
        self.status_message = "1 line deleted".to_string();
    }

    /// `dw`: delete through the end of the next word and its trailing whitespace, in this line.
    fn delete_word(&mut self) {
        let Pos { row, col } = self.cursor;
        let end = word_end(self.current_line(), col);
        if end <= col {
            return;
        }
        let prior = self.save_undo_state();
        let removed = self.buf.delete_in_line(row, col, end);
        self.push_undo(prior);
        self.set_yank(vec![removed], false);
        self.modified = true;
        self.clamp_cursor();
    }
}
