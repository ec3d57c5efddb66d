//! Yank buffer operations: delete-char, put after, put before.

use super::EditorState; // main editor state
use crate::types::Pos; // document position type
use crate::utils::char_len; // char counting

impl EditorState {
    /// `x`: delete the character under the cursor into the yank buffer.
    pub(super) fn delete_char_under_cursor(&mut self) {
        if self.current_line().is_empty() {
            return;
        }
        let prior = self.save_undo_state();
        if let Some(ch) = self.buf.delete_char(self.cursor) {
            self.push_undo(prior);
            self.set_yank(vec![ch.to_string()], false);
            self.modified = true;
            self.clamp_cursor();
        }
    }

    pub(super) fn set_yank(&mut self, text: Vec<String>, linewise: bool) {
        self.yank_buffer = text;
        self.yank_linewise = linewise;
    }

    /// `p` (`before == false`) and `P` (`before == true`).
    ///
    /// An in-line fragment is spliced into the current line; whole lines are inserted below
    /// or above the current row.
    pub(super) fn put(&mut self, before: bool) {
        if self.yank_buffer.is_empty() {
            return;
        }
        let prior = self.save_undo_state();
        let row = self.cursor.row;

        if !self.yank_linewise && self.yank_buffer.len() == 1 {
            let text = self.yank_buffer[0].clone();
            let at = if before || self.current_line().is_empty() {
                self.cursor.col
            } else {
                self.cursor.col + 1
            };
            self.buf.insert_str(Pos { row, col: at }, &text);
            self.cursor = Pos { row, col: at + char_len(&text) };
        } else {
            let lines = self.yank_buffer.clone();
            let at = if before { row } else { row + 1 };
            self.buf.insert_lines(at, &lines);
            self.cursor = Pos { row: at, col: 0 };
        }

        self.push_undo(prior);
        self.modified = true;
        self.clamp_cursor();
    }
}
