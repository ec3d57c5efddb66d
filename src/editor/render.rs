//! Rendering: projecting an editor snapshot into host-independent draw instructions.
//!
//! Nothing here touches the terminal. The host walks a [`Frame`] and paints it.

use super::highlight::{color_at, extension_of, tokenize};
use super::EditorState;
use crate::types::{ColorRange, Mode};
use crate::utils::digits;
use std::cmp::max;
use std::fmt;

/// Foreground for text no pattern colors.
pub const DEFAULT_FG: &str = "#abb2bf";
/// Foreground for the line-number gutter and filler rows.
pub const GUTTER_FG: &str = "#5c6370";

const MIN_GUTTER_WIDTH: usize = 3;

/// Shape of the text cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    /// Thin bar before the character (insert mode).
    Bar,
    /// Block over the character (normal and command modes).
    Block,
}

/// A run of characters sharing one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: &'static str,
}

/// One visible buffer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 0-based buffer row.
    pub line_index: usize,
    /// Right-justified 1-based line number, or empty when line numbers are off.
    pub gutter: String,
    pub spans: Vec<Span>,
}

/// Cursor position in the text area, relative to the first visible row and the first
/// character after the gutter. `col` counts chars; the host converts to display cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCursor {
    pub row: usize,
    pub col: usize,
    pub style: CursorStyle,
}

/// Contents of the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    pub mode: &'static str,
    pub filename: String,
    pub modified: bool,
    /// 1-based row.
    pub row: usize,
    /// 1-based column.
    pub col: usize,
}

impl fmt::Display for StatusBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dirty = if self.modified { " [+]" } else { "" };
        write!(f, " {} | {}{} | {},{}", self.mode, self.filename, dirty, self.row, self.col)
    }
}

/// Everything the host needs to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width of the gutter column (0 when line numbers are off).
    pub gutter_width: usize,
    pub rows: Vec<Row>,
    /// Number of `~` rows drawn past the end of the buffer.
    pub filler_rows: usize,
    /// `None` when the cursor row lies outside the visible window.
    pub cursor: Option<ScreenCursor>,
    pub status_bar: StatusBar,
    /// Bottom line: `:` plus the typed command in command mode, else the status message.
    pub command_line: String,
    /// Draw a block cursor after `command_line` (command mode only).
    pub command_cursor: bool,
}

/// Group chars into same-colored runs.
fn color_spans(line: &str, ranges: &[ColorRange]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for (i, ch) in line.chars().enumerate() {
        let color = color_at(ranges, i).unwrap_or(DEFAULT_FG);
        match spans.last_mut() {
            Some(last) if last.color == color => last.text.push(ch),
            _ => spans.push(Span { text: ch.to_string(), color }),
        }
    }
    spans
}

/// Project `state` onto a window of `visible` rows starting at `state.scroll_offset`.
pub fn project(state: &EditorState, visible: usize) -> Frame {
    let line_count = state.buf.line_count();
    let gutter_width = if state.show_line_numbers {
        max(MIN_GUTTER_WIDTH, digits(line_count))
    } else {
        0
    };
    let ext = extension_of(&state.filename);

    let start = state.scroll_offset.min(line_count);
    let end = (start + visible).min(line_count);
    let rows: Vec<Row> = (start..end)
        .map(|y| {
            let line = state.buf.line(y);
            let gutter = if state.show_line_numbers {
                format!("{:>width$}", y + 1, width = gutter_width)
            } else {
                String::new()
            };
            Row { line_index: y, gutter, spans: color_spans(line, &tokenize(line, &ext)) }
        })
        .collect();
    let filler_rows = visible.saturating_sub(rows.len());

    let style = if state.mode == Mode::Insert { CursorStyle::Bar } else { CursorStyle::Block };
    let cursor = state
        .cursor
        .row
        .checked_sub(start)
        .filter(|r| *r < visible)
        .map(|row| ScreenCursor { row, col: state.cursor.col, style });

    let status_bar = StatusBar {
        mode: state.mode.as_str(),
        filename: state.filename.clone(),
        modified: state.modified,
        row: state.cursor.row + 1,
        col: state.cursor.col + 1,
    };

    let (command_line, command_cursor) = if state.mode == Mode::Command {
        (format!(":{}", state.command_buffer), true)
    } else {
        (state.status_message.clone(), false)
    };

    Frame { gutter_width, rows, filler_rows, cursor, status_bar, command_line, command_cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::editor::highlight::{KEYWORD, NUMBER};
    use crate::types::Pos;
    use crate::vfs::CannedFiles;

    fn state(filename: &str, lines: &[&str]) -> EditorState {
        let mut st = EditorState::new(&CannedFiles::new(), filename);
        st.buf = Buffer::from_lines(lines.iter().map(|s| (*s).to_string()).collect());
        st
    }

    fn runs(row: &Row) -> Vec<(&str, &'static str)> {
        row.spans.iter().map(|s| (s.text.as_str(), s.color)).collect()
    }

    // ==================== rows ====================

    #[test]
    fn colors_group_into_runs() {
        let st = state("a.js", &["const x = 1;"]);
        let frame = project(&st, 5);
        assert_eq!(
            runs(&frame.rows[0]),
            vec![("const", KEYWORD), (" x = ", DEFAULT_FG), ("1", NUMBER), (";", DEFAULT_FG)]
        );
    }

    #[test]
    fn later_range_wins_on_overlap() {
        // the string starts inside the comment, so it paints over it
        let st = state("a.js", &["// say \"hi\""]);
        let frame = project(&st, 1);
        let colors: Vec<&str> = runs(&frame.rows[0]).into_iter().map(|(_, c)| c).collect();
        assert_eq!(colors, vec![crate::editor::highlight::COMMENT, crate::editor::highlight::STRING]);
    }

    #[test]
    fn plain_text_is_one_run() {
        let st = state("notes.txt", &["const x = 1;", ""]);
        let frame = project(&st, 5);
        assert_eq!(runs(&frame.rows[0]), vec![("const x = 1;", DEFAULT_FG)]);
        assert!(frame.rows[1].spans.is_empty());
    }

    #[test]
    fn gutter_width_and_toggle() {
        let mut st = state("a.txt", &["a", "b"]);
        let frame = project(&st, 5);
        assert_eq!(frame.gutter_width, 3);
        assert_eq!(frame.rows[1].gutter, "  2");

        let many: Vec<String> = (0..1200).map(|i| i.to_string()).collect();
        st.buf = Buffer::from_lines(many);
        st.scroll_offset = 1195;
        let frame = project(&st, 5);
        assert_eq!(frame.gutter_width, 4);
        assert_eq!(frame.rows[0].gutter, "1196");

        st.show_line_numbers = false;
        let frame = project(&st, 5);
        assert_eq!(frame.gutter_width, 0);
        assert!(frame.rows.iter().all(|r| r.gutter.is_empty()));
    }

    #[test]
    fn window_and_filler() {
        let mut st = state("a.txt", &["0", "1", "2", "3", "4"]);
        st.scroll_offset = 3;
        let frame = project(&st, 4);
        let idx: Vec<usize> = frame.rows.iter().map(|r| r.line_index).collect();
        assert_eq!(idx, vec![3, 4]);
        assert_eq!(frame.filler_rows, 2);
    }

    // ==================== cursor ====================

    #[test]
    fn cursor_style_follows_mode() {
        let mut st = state("a.txt", &["abc", "def"]);
        st.cursor = Pos::new(1, 2);
        let c = project(&st, 5).cursor;
        assert_eq!(c, Some(ScreenCursor { row: 1, col: 2, style: CursorStyle::Block }));

        st.mode = Mode::Insert;
        st.cursor.col = 3;
        let c = project(&st, 5).cursor;
        assert_eq!(c, Some(ScreenCursor { row: 1, col: 3, style: CursorStyle::Bar }));
    }

    #[test]
    fn cursor_relative_to_scroll() {
        let mut st = state("a.txt", &["0", "1", "2", "3"]);
        st.scroll_offset = 2;
        st.cursor = Pos::new(3, 0);
        assert_eq!(project(&st, 2).cursor.map(|c| c.row), Some(1));
        st.cursor.row = 1;
        assert_eq!(project(&st, 2).cursor, None);
    }

    // ==================== status and command line ====================

    #[test]
    fn status_bar_text() {
        let mut st = state("hello.js", &["abc"]);
        st.cursor = Pos::new(0, 2);
        assert_eq!(project(&st, 1).status_bar.to_string(), " NORMAL | hello.js | 1,3");
        st.modified = true;
        st.mode = Mode::Insert;
        assert_eq!(project(&st, 1).status_bar.to_string(), " INSERT | hello.js [+] | 1,3");
    }

    #[test]
    fn command_line_shows_buffer_or_message() {
        let mut st = state("a.txt", &["abc"]);
        st.status_message = "1 line yanked".to_string();
        let frame = project(&st, 1);
        assert_eq!(frame.command_line, "1 line yanked");
        assert!(!frame.command_cursor);

        st.mode = Mode::Command;
        st.command_buffer = "set nu".to_string();
        let frame = project(&st, 1);
        assert_eq!(frame.command_line, ":set nu");
        assert!(frame.command_cursor);
    }
}
