//! Cursor motions and word-boundary detection.

use super::EditorState; // main editor state
use crate::buffer::Buffer; // line access
use crate::types::{Key, KeyInput, Pos}; // key and position types
use std::cmp::min; // comparison helpers

/// End (exclusive) of the word starting at `col`: skip the rest of the current word, then the
/// whitespace after it. Never leaves the line.
pub(super) fn word_end(line: &str, col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut i = col;
    while i < chars.len() && !chars[i].is_whitespace() {
        i += 1;
    }
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

/// `w`: start of the next word, wrapping to column 0 of the next row when the line runs out.
fn next_word_start(buf: &Buffer, p: Pos) -> Pos {
    let len = buf.line_len_chars(p.row);
    let end = word_end(buf.line(p.row), p.col);
    if end < len {
        Pos { row: p.row, col: end }
    } else if p.row + 1 < buf.line_count() {
        Pos { row: p.row + 1, col: 0 }
    } else {
        Pos { row: p.row, col: buf.last_col(p.row) }
    }
}

/// `b`: start of the previous word; stops at column 0.
fn prev_word_start(buf: &Buffer, p: Pos) -> Pos {
    if p.col == 0 {
        return p;
    }
    let chars: Vec<char> = buf.line(p.row).chars().collect();
    let mut i = min(p.col, chars.len()) - 1;

    // 1. Skip any whitespace immediately to the left
    while i > 0 && chars[i].is_whitespace() {
        i -= 1;
    }
    // 2. Walk back to the start of that word
    while i > 0 && !chars[i - 1].is_whitespace() {
        i -= 1;
    }
    Pos { row: p.row, col: i }
}

impl EditorState {
    /// Apply a normal-mode motion key. Returns `false` if the key is not a motion.
    pub(super) fn handle_motion(&mut self, input: KeyInput) -> bool {
        let buf = &self.buf;
        let p = self.cursor;
        let target = match input.key {
            Key::Char('h') | Key::Left => Pos { row: p.row, col: p.col.saturating_sub(1) },
            Key::Char('l') | Key::Right => Pos { row: p.row, col: min(p.col + 1, buf.last_col(p.row)) },
            Key::Char('j') | Key::Down => {
                let row = min(p.row + 1, buf.last_row());
                Pos { row, col: min(p.col, buf.last_col(row)) }
            }
            Key::Char('k') | Key::Up => {
                let row = p.row.saturating_sub(1);
                Pos { row, col: min(p.col, buf.last_col(row)) }
            }
            Key::Char('w') => next_word_start(buf, p),
            Key::Char('b') => prev_word_start(buf, p),
            Key::Char('0') => Pos { row: p.row, col: 0 },
            Key::Char('$') => Pos { row: p.row, col: buf.last_col(p.row) },
            Key::Char('G') => Pos { row: buf.last_row(), col: 0 },
            _ => return false,
        };
        self.cursor = target;
        true
    }
}
