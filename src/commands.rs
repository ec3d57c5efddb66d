//! Command-line (`:`) parsing and execution.

use crate::buffer::Buffer;
use crate::editor::EditorState;
use crate::types::Pos;
use crate::vfs::{FileStore, HELP_FILE};
use tracing::debug;

pub(crate) const E37: &str = "E37: No write since last change (add ! to override)";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// `:q` / `:q!`
    Quit { force: bool },
    /// `:w`
    Write,
    /// `:wq` / `:x`
    WriteQuit,
    /// `:set nu` / `:set nonu`
    SetNumber(bool),
    /// `:e <name>`
    Edit(String),
    /// `:help`
    Help,
    /// `:files`
    ListFiles,
    /// Nothing typed.
    Empty,
    Unknown(String),
}

/// What running a command asks the dispatcher to do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// Replacement state, if the command changed anything.
    pub state: Option<EditorState>,
    pub message: Option<String>,
    pub should_exit: bool,
}

impl CommandOutcome {
    fn message(msg: impl Into<String>) -> Self {
        Self { message: Some(msg.into()), ..Self::default() }
    }

    fn exit() -> Self {
        Self { should_exit: true, ..Self::default() }
    }
}

/// Parse a command string (without the leading `:`).
pub fn parse_command(cmd_str: &str) -> ExCommand {
    let trimmed = cmd_str.trim();

    match trimmed {
        "" => ExCommand::Empty,
        "q" | "quit" => ExCommand::Quit { force: false },
        "q!" | "quit!" => ExCommand::Quit { force: true },
        "w" | "write" => ExCommand::Write,
        "wq" | "x" => ExCommand::WriteQuit,
        "set number" | "set nu" => ExCommand::SetNumber(true),
        "set nonumber" | "set nonu" => ExCommand::SetNumber(false),
        "help" | "h" => ExCommand::Help,
        "files" | "ls" => ExCommand::ListFiles,
        _ => match trimmed.strip_prefix("e ") {
            Some(name) if !name.trim().is_empty() => ExCommand::Edit(name.trim().to_string()),
            _ => ExCommand::Unknown(trimmed.to_string()),
        },
    }
}

/// Run `cmd_str` against `state`.
pub fn execute_command(state: &EditorState, store: &dyn FileStore, cmd_str: &str) -> CommandOutcome {
    let cmd = parse_command(cmd_str);
    debug!(?cmd, "command");

    match cmd {
        ExCommand::Empty => CommandOutcome::default(),
        ExCommand::Quit { force } => {
            if state.modified && !force {
                CommandOutcome::message(E37)
            } else {
                CommandOutcome::exit()
            }
        }
        ExCommand::WriteQuit => CommandOutcome::exit(),
        ExCommand::Write => {
            let mut next = state.clone();
            next.modified = false;
            CommandOutcome {
                state: Some(next),
                message: Some(format!(
                    "\"{}\" {}L written (simulated)",
                    state.filename,
                    state.buf.line_count()
                )),
                should_exit: false,
            }
        }
        ExCommand::SetNumber(on) => {
            let mut next = state.clone();
            next.show_line_numbers = on;
            CommandOutcome { state: Some(next), ..CommandOutcome::default() }
        }
        ExCommand::Edit(name) => open_file(state, store, &name),
        ExCommand::Help => open_file(state, store, HELP_FILE),
        ExCommand::ListFiles => CommandOutcome::message(store.list_names().join(", ")),
        ExCommand::Unknown(text) => CommandOutcome::message(format!("E492: Not an editor command: {text}")),
    }
}

/// Replace the buffer with `name` from the store; a missing file leaves everything untouched.
fn open_file(state: &EditorState, store: &dyn FileStore, name: &str) -> CommandOutcome {
    let Some(lines) = store.get_content(name) else {
        return CommandOutcome::message(format!("E212: Can't open file for reading: {name}"));
    };

    let mut next = state.clone();
    next.buf = Buffer::from_lines(lines);
    next.filename = name.to_string();
    next.cursor = Pos::default();
    next.scroll_offset = 0;
    next.modified = false;
    next.undo_stack.clear();
    next.redo_stack.clear();
    next.pending_operator = None;
    next.insert_snapshot = None;
    let message = format!("\"{}\" {}L", name, next.buf.line_count());
    CommandOutcome { state: Some(next), message: Some(message), should_exit: false }
}
