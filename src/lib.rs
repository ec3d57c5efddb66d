//! `pvim`: a small vim-like modal editor over a virtual, read-only file store.
//!
//! ## Reading guide (high level architecture)
//! - **`buffer::Buffer`**: the document model (a `Vec<String>` of lines) and the low-level editing
//!   operations. Positions are char indices, never byte offsets.
//! - **`editor::EditorState`**: the full editor snapshot. Every key goes through
//!   **`editor::dispatch`**, which returns a new snapshot plus an exit flag.
//! - **`commands`**: the `:` command line (`:w`, `:q`, `:e`, `:set nu`, ...).
//! - **`editor::highlight`**: regex tokenizer producing per-line color ranges.
//! - **`editor::project`**: turns a snapshot into a host-independent [`editor::Frame`].
//! - **`vfs`**: the read-only file store; **`config`** mounts extra files into it.
//! - **`terminal`**: crossterm host glue used by the `pvim` binary.

pub mod buffer;
pub mod commands;
pub mod config;
pub mod editor;
pub mod terminal;
pub mod types;
pub mod utils;
pub mod vfs;

pub use editor::{create_initial_state, dispatch, project, EditorState, Frame, Session, Transition};
pub use types::{Key, KeyInput, Mode, Pos};
pub use vfs::{CannedFiles, FileStore};
