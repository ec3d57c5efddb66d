//! Editor: the state snapshot, its transitions, and the session that drives them.
//!
//! ## Reading guide
//! - **`EditorState`**: one immutable-by-convention snapshot of buffer, cursor, mode and history.
//!   Transitions take `&EditorState` and hand back a new value.
//! - **`input::dispatch`**: the mode state machine, one key at a time.
//! - **`crate::commands`**: the `:` command-line interpreter.
//! - **`render::project`**: turns a snapshot into draw instructions.
//! - **`Session`**: what a host holds on to; feeds keys in and keeps the viewport in sync.

pub mod highlight;
pub mod input;
mod movement;
mod operator;
pub mod render;
mod undo;
mod yank;

use crate::buffer::Buffer;
use crate::types::{Mode, Operator, Pos, UndoState};
use crate::vfs::FileStore;
use tracing::debug;

pub use input::{dispatch, Transition};
pub use render::{project, Frame};

/// The complete editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// The text being edited. Never empty.
    pub buf: Buffer,
    pub cursor: Pos,
    pub mode: Mode,
    /// Text typed after `:` while in command mode.
    pub command_buffer: String,
    /// Last message shown on the command line when not typing a command.
    pub status_message: String,
    pub show_line_numbers: bool,
    /// Unsaved changes since the last load or `:w`.
    pub modified: bool,
    pub filename: String,
    /// Undo and redo stacks, most recent last.
    pub undo_stack: Vec<UndoState>,
    pub redo_stack: Vec<UndoState>,
    /// First visible row.
    pub scroll_offset: usize,
    pub pending_operator: Option<Operator>,
    /// Most recently deleted or yanked text.
    pub yank_buffer: Vec<String>,
    /// Whether `yank_buffer` holds whole lines rather than an in-line fragment.
    pub yank_linewise: bool,
    /// Buffer state from when the current insert session started; pushed onto the undo
    /// stack by the session's first edit.
    pub insert_snapshot: Option<UndoState>,
    /// Reserved for search; nothing sets it yet.
    pub last_search_pattern: Option<String>,
}

impl EditorState {
    /// Load `filename` from the store. A missing file gives an empty buffer; this never fails.
    pub fn new(store: &dyn FileStore, filename: &str) -> Self {
        let buf = Buffer::from_lines(store.get_content(filename).unwrap_or_default());
        let status_message = format!("\"{}\" {}L", filename, buf.line_count());
        debug!(filename, lines = buf.line_count(), "loaded file");
        Self {
            buf,
            cursor: Pos::default(),
            mode: Mode::Normal,
            command_buffer: String::new(),
            status_message,
            show_line_numbers: true,
            modified: false,
            filename: filename.to_string(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            scroll_offset: 0,
            pending_operator: None,
            yank_buffer: Vec::new(),
            yank_linewise: false,
            insert_snapshot: None,
            last_search_pattern: None,
        }
    }

    /// The current line.
    pub fn current_line(&self) -> &str {
        self.buf.line(self.cursor.row)
    }

    /// Clamp the cursor to what the current mode allows.
    pub(crate) fn clamp_cursor(&mut self) {
        self.cursor = if self.mode == Mode::Insert {
            self.buf.clamp_insert(self.cursor)
        } else {
            self.buf.clamp_normal(self.cursor)
        };
    }

    pub(crate) fn enter_insert(&mut self, col: usize) {
        self.insert_snapshot = Some(self.save_undo_state());
        self.mode = Mode::Insert;
        self.cursor.col = col;
        self.clamp_cursor();
    }
}

/// Build the starting state for `filename`.
pub fn create_initial_state(store: &dyn FileStore, filename: &str) -> EditorState {
    EditorState::new(store, filename)
}

/// A running editor: the current snapshot, the file store, and the viewport height.
///
/// Hosts forward every keystroke to [`Session::handle_key`] and redraw from
/// [`Session::frame`]; the scroll offset is recomputed after each transition and resize.
pub struct Session<S: FileStore> {
    state: EditorState,
    store: S,
    visible_lines: usize,
}

impl<S: FileStore> Session<S> {
    pub fn new(store: S, filename: &str, visible_lines: usize) -> Self {
        let state = EditorState::new(&store, filename);
        let mut session = Self { state, store, visible_lines };
        session.sync_scroll();
        session
    }

    /// Replace the current state, e.g. to apply configuration before the first key.
    pub fn with_state(mut self, state: EditorState) -> Self {
        self.state = state;
        self.sync_scroll();
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    /// Process one key. Returns `true` when the editor asks to exit.
    pub fn handle_key(&mut self, input: crate::types::KeyInput) -> bool {
        let Transition { state, should_exit } = dispatch(&self.state, input, &self.store);
        if state.mode != self.state.mode {
            debug!(from = ?self.state.mode, to = ?state.mode, "mode change");
        }
        self.state = state;
        self.sync_scroll();
        should_exit
    }

    /// Called when the viewport changes height.
    pub fn resize(&mut self, visible_lines: usize) {
        self.visible_lines = visible_lines;
        self.sync_scroll();
    }

    /// Draw instructions for the current state.
    pub fn frame(&self) -> Frame {
        project(&self.state, self.visible_lines)
    }

    fn sync_scroll(&mut self) {
        self.state.scroll_offset = self.state.calculate_scroll_offset(self.visible_lines);
    }
}
