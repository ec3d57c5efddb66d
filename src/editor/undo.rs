//! Undo/redo history and viewport scrolling.

use super::EditorState; // main editor state
use crate::buffer::Buffer; // restored text
use crate::types::UndoState; // undo/redo snapshots

/// Oldest entries are dropped past this depth.
const UNDO_CAP: usize = 1000;

impl EditorState {
    /// Capture buffer + cursor so an edit can be rolled back.
    pub fn save_undo_state(&self) -> UndoState {
        UndoState { lines: self.buf.lines.clone(), cursor: self.cursor }
    }

    /// Record `prior` (taken before an edit) and drop the redo history.
    pub fn push_undo(&mut self, prior: UndoState) {
        self.undo_stack.push(prior);
        if self.undo_stack.len() > UNDO_CAP {
            self.undo_stack.drain(0..(self.undo_stack.len() - UNDO_CAP));
        }
        self.redo_stack.clear();
    }

    /// Roll back the most recent recorded edit. `None` when there is nothing to undo.
    ///
    /// `modified` is derived from the remaining stack depth (`> 1`), not from comparing the
    /// text against the last write.
    pub fn undo(&self) -> Option<EditorState> {
        let mut next = self.clone();
        let entry = next.undo_stack.pop()?;
        let current = next.save_undo_state();
        next.redo_stack.push(current);
        next.restore(entry);
        next.modified = next.undo_stack.len() > 1;
        next.status_message = "Undo".to_string();
        Some(next)
    }

    /// Re-apply the most recently undone edit. `None` when there is nothing to redo.
    pub fn redo(&self) -> Option<EditorState> {
        let mut next = self.clone();
        let entry = next.redo_stack.pop()?;
        let current = next.save_undo_state();
        next.undo_stack.push(current);
        next.restore(entry);
        next.modified = true;
        next.status_message = "Redo".to_string();
        Some(next)
    }

    fn restore(&mut self, entry: UndoState) {
        self.buf = Buffer::from_lines(entry.lines);
        self.cursor = entry.cursor;
    }

    /// Scroll offset that keeps the cursor row inside a window of `visible` rows.
    pub fn calculate_scroll_offset(&self, visible: usize) -> usize {
        let visible = visible.max(1);
        let row = self.cursor.row;
        if row < self.scroll_offset {
            row
        } else if row >= self.scroll_offset + visible {
            row + 1 - visible
        } else {
            self.scroll_offset
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::EditorState;
    use crate::types::Pos;
    use crate::vfs::CannedFiles;

    fn state() -> EditorState {
        EditorState::new(&CannedFiles::new(), "hello.js")
    }

    fn edit(st: &mut EditorState, text: &str) {
        let prior = st.save_undo_state();
        st.push_undo(prior);
        st.buf.lines[0] = text.to_string();
        st.modified = true;
    }

    // ==================== undo/redo ====================

    #[test]
    fn undo_restores_lines_and_cursor() {
        let mut st = state();
        st.cursor = Pos::new(1, 3);
        let before = st.clone();
        edit(&mut st, "changed");
        st.cursor = Pos::new(0, 0);

        let undone = st.undo().unwrap_or_else(|| panic!("undo should apply"));
        assert_eq!(undone.buf, before.buf);
        assert_eq!(undone.cursor, before.cursor);
        assert_eq!(undone.status_message, "Undo");
        assert_eq!(undone.redo_stack.len(), 1);
        assert!(undone.undo_stack.is_empty());
    }

    #[test]
    fn undo_and_redo_on_empty_stacks() {
        let st = state();
        assert!(st.undo().is_none());
        assert!(st.redo().is_none());
    }

    #[test]
    fn redo_reapplies() {
        let mut st = state();
        edit(&mut st, "changed");
        let undone = st.undo().unwrap_or_else(|| panic!("undo"));
        let redone = undone.redo().unwrap_or_else(|| panic!("redo"));
        assert_eq!(redone.buf.lines[0], "changed");
        assert!(redone.modified);
        assert_eq!(redone.status_message, "Redo");
        assert_eq!(redone.undo_stack.len(), 1);
        assert!(redone.redo_stack.is_empty());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut st = state();
        edit(&mut st, "one");
        let mut st = st.undo().unwrap_or_else(|| panic!("undo"));
        assert_eq!(st.redo_stack.len(), 1);
        edit(&mut st, "two");
        assert!(st.redo_stack.is_empty());
    }

    #[test]
    fn modified_after_undo_follows_stack_depth() {
        // Three edits, then undo: two entries remain, so still modified.
        let mut st = state();
        edit(&mut st, "one");
        edit(&mut st, "two");
        edit(&mut st, "three");
        let st = st.undo().unwrap_or_else(|| panic!("undo"));
        assert!(st.modified);

        // One entry left: reported unmodified although the text still differs from the load.
        let st = st.undo().unwrap_or_else(|| panic!("undo"));
        assert_eq!(st.buf.lines[0], "one");
        assert!(!st.modified);
    }

    #[test]
    fn undo_stack_is_capped() {
        let mut st = state();
        for i in 0..1005 {
            edit(&mut st, &i.to_string());
        }
        assert_eq!(st.undo_stack.len(), 1000);
    }

    // ==================== scrolling ====================

    #[test]
    fn scroll_follows_cursor() {
        let mut st = state();
        st.cursor.row = 10;
        assert_eq!(st.calculate_scroll_offset(4), 7);
        st.scroll_offset = 7;
        st.cursor.row = 8;
        assert_eq!(st.calculate_scroll_offset(4), 7);
        st.cursor.row = 2;
        assert_eq!(st.calculate_scroll_offset(4), 2);
        st.cursor.row = 11;
        assert_eq!(st.calculate_scroll_offset(0), 11);
    }
}
