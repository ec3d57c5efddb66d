//! The text buffer: stores lines of text and provides the editing primitives the modes use.

use crate::types::Pos; // core editor types
use crate::utils::{char_len, char_to_byte_index}; // utf-8 index conversion
use std::cmp::min; // comparison helpers

/// The document buffer: a list of lines (each line is a `String`).
///
/// Invariant: `lines` is never empty. Every operation that could remove the last
/// line leaves a single empty line instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    pub lines: Vec<String>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Create a new empty buffer with a single empty line.
    pub fn new() -> Self {
        Self { lines: vec![String::new()] }
    }

    /// Build a buffer from already-split lines; an empty list becomes one empty line.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            Self::new()
        } else {
            Self { lines }
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    pub fn line_len_chars(&self, row: usize) -> usize {
        char_len(self.line(row))
    }

    /// Last column the cursor may rest on outside insert mode (0 for an empty line).
    pub fn last_col(&self, row: usize) -> usize {
        self.line_len_chars(row).saturating_sub(1)
    }

    pub fn last_row(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Clamp a position for normal/command mode: the cursor rests *on* a character.
    pub fn clamp_normal(&self, p: Pos) -> Pos {
        let row = min(p.row, self.last_row());
        Pos { row, col: min(p.col, self.last_col(row)) }
    }

    /// Clamp a position for insert mode: the cursor may rest just past the end.
    pub fn clamp_insert(&self, p: Pos) -> Pos {
        let row = min(p.row, self.last_row());
        Pos { row, col: min(p.col, self.line_len_chars(row)) }
    }

    /// Insert a single character at a position, returning the new cursor position.
    pub fn insert_char(&mut self, p: Pos, ch: char) -> Pos {
        let line = &mut self.lines[p.row];
        let bi = char_to_byte_index(line, p.col);
        line.insert(bi, ch);
        Pos { row: p.row, col: p.col + 1 }
    }

    /// Insert a string (no newlines) at a position, returning the position just past it.
    pub fn insert_str(&mut self, p: Pos, text: &str) -> Pos {
        let line = &mut self.lines[p.row];
        let bi = char_to_byte_index(line, p.col);
        line.insert_str(bi, text);
        Pos { row: p.row, col: p.col + char_len(text) }
    }

    /// Insert a newline at a position, splitting the current line in two.
    pub fn insert_newline(&mut self, p: Pos) -> Pos {
        let line = &mut self.lines[p.row];
        let bi = char_to_byte_index(line, p.col);
        let rest = line.split_off(bi);
        self.lines.insert(p.row + 1, rest);
        Pos { row: p.row + 1, col: 0 }
    }

    /// Backspace behavior:
    /// - If `col > 0`, delete the previous character.
    /// - If at start of line and not the first line, merge with previous line.
    ///
    /// Returns `None` when there is nothing to delete (start of the buffer).
    pub fn delete_backspace(&mut self, p: Pos) -> Option<Pos> {
        if p.col > 0 {
            let line = &mut self.lines[p.row];
            let bi = char_to_byte_index(line, p.col - 1);
            line.remove(bi);
            Some(Pos { row: p.row, col: p.col - 1 })
        } else if p.row > 0 {
            let cur = self.lines.remove(p.row);
            let prev = &mut self.lines[p.row - 1];
            let prev_len = char_len(prev);
            prev.push_str(&cur);
            Some(Pos { row: p.row - 1, col: prev_len })
        } else {
            None
        }
    }

    /// Remove the character at a position, returning it (`None` past end of line).
    pub fn delete_char(&mut self, p: Pos) -> Option<char> {
        let line = self.lines.get_mut(p.row)?;
        if p.col >= char_len(line) {
            return None;
        }
        let bi = char_to_byte_index(line, p.col);
        Some(line.remove(bi))
    }

    /// Remove the characters in `[start, end)` of one row, returning the removed text.
    pub fn delete_in_line(&mut self, row: usize, start: usize, end: usize) -> String {
        let line = &mut self.lines[row];
        let b0 = char_to_byte_index(line, start);
        let b1 = char_to_byte_index(line, end);
        line.drain(b0..b1).collect()
    }

    /// Remove a whole line, returning its content.
    ///
    /// Removing the only line empties it instead, keeping the buffer non-empty.
    pub fn delete_line(&mut self, row: usize) -> String {
        if self.lines.len() == 1 {
            std::mem::take(&mut self.lines[0])
        } else {
            self.lines.remove(row)
        }
    }

    /// Insert whole lines so the first one lands at `row`.
    pub fn insert_lines(&mut self, row: usize, lines: &[String]) {
        let at = min(row, self.lines.len());
        self.lines.splice(at..at, lines.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines.iter().map(|s| (*s).to_string()).collect())
    }

    // ==================== Buffer creation tests ====================

    #[test]
    fn new_buffer_has_one_empty_line() {
        let b = Buffer::new();
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.lines[0], "");
    }

    #[test]
    fn from_lines_empty_keeps_one_line() {
        let b = Buffer::from_lines(vec![]);
        assert_eq!(b.lines, vec![String::new()]);
    }

    // ==================== Insert tests ====================

    #[test]
    fn insert_char_unicode() {
        let mut b = buf(&["hllo"]);
        let pos = b.insert_char(Pos::new(0, 1), 'é');
        assert_eq!(pos, Pos::new(0, 2));
        assert_eq!(b.lines[0], "héllo");
    }

    #[test]
    fn insert_str_advances_past_text() {
        let mut b = buf(&["ad"]);
        let pos = b.insert_str(Pos::new(0, 1), "bc");
        assert_eq!(pos, Pos::new(0, 3));
        assert_eq!(b.lines[0], "abcd");
    }

    #[test]
    fn insert_newline_splits() {
        let mut b = buf(&["hello world"]);
        let pos = b.insert_newline(Pos::new(0, 5));
        assert_eq!(pos, Pos::new(1, 0));
        assert_eq!(b.lines, vec!["hello", " world"]);
    }

    #[test]
    fn insert_lines_at_end_and_middle() {
        let mut b = buf(&["a", "d"]);
        b.insert_lines(1, &["b".to_string(), "c".to_string()]);
        assert_eq!(b.lines, vec!["a", "b", "c", "d"]);
        b.insert_lines(99, &["e".to_string()]);
        assert_eq!(b.lines.last().map(String::as_str), Some("e"));
    }

    // ==================== Delete tests ====================

    #[test]
    fn delete_backspace_middle() {
        let mut b = buf(&["abc"]);
        assert_eq!(b.delete_backspace(Pos::new(0, 2)), Some(Pos::new(0, 1)));
        assert_eq!(b.lines[0], "ac");
    }

    #[test]
    fn delete_backspace_merge_lines() {
        let mut b = buf(&["line1", "line2"]);
        assert_eq!(b.delete_backspace(Pos::new(1, 0)), Some(Pos::new(0, 5)));
        assert_eq!(b.lines, vec!["line1line2"]);
    }

    #[test]
    fn delete_backspace_at_origin_is_noop() {
        let mut b = buf(&["abc"]);
        assert_eq!(b.delete_backspace(Pos::new(0, 0)), None);
        assert_eq!(b.lines[0], "abc");
    }

    #[test]
    fn delete_char_returns_removed() {
        let mut b = buf(&["héllo"]);
        assert_eq!(b.delete_char(Pos::new(0, 1)), Some('é'));
        assert_eq!(b.lines[0], "hllo");
        assert_eq!(b.delete_char(Pos::new(0, 10)), None);
    }

    #[test]
    fn delete_in_line_range() {
        let mut b = buf(&["hello world"]);
        assert_eq!(b.delete_in_line(0, 0, 6), "hello ");
        assert_eq!(b.lines[0], "world");
    }

    #[test]
    fn delete_only_line_empties_it() {
        let mut b = buf(&["only"]);
        assert_eq!(b.delete_line(0), "only");
        assert_eq!(b.lines, vec![String::new()]);
    }

    // ==================== Clamping ====================

    #[test]
    fn clamp_normal_and_insert() {
        let b = buf(&["short", "", "longer line"]);
        assert_eq!(b.clamp_normal(Pos::new(0, 100)), Pos::new(0, 4));
        assert_eq!(b.clamp_insert(Pos::new(0, 100)), Pos::new(0, 5));
        assert_eq!(b.clamp_normal(Pos::new(1, 3)), Pos::new(1, 0));
        assert_eq!(b.clamp_normal(Pos::new(100, 0)), Pos::new(2, 0));
    }
}
