//! Common types used throughout the editor.

/// A position in the buffer.
///
/// - `row`: line index (0-based)
/// - `col`: **char index** within that line (0-based). This is *not* a byte index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The interaction mode governing how keystrokes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    /// Declared for completeness; no transition ever enters it.
    Visual,
}

impl Mode {
    /// Upper-cased tag shown in the status bar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Visual => "VISUAL",
        }
    }
}

/// An operator awaiting its completion keystroke (`d`, `y`, `g`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Yank,
    Go,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Delete),
            'y' => Some(Self::Yank),
            'g' => Some(Self::Go),
            _ => None,
        }
    }
}

/// A host-independent key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
    /// Anything the editor has no binding for (F-keys, Home, ...).
    Other,
}

impl Key {
    /// Parse a browser-style key identifier (`"a"`, `"Escape"`, `"ArrowLeft"`).
    ///
    /// Unknown identifiers map to [`Key::Other`] so hosts can forward every
    /// keydown without filtering.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Tab" => Key::Tab,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// One logical input event: a key plus the Ctrl modifier flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }

    /// The printable character carried by this input, if any.
    pub fn printable(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.ctrl && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        Self::plain(Key::Char(c))
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

/// Buffer + cursor captured for undo/redo restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub lines: Vec<String>,
    pub cursor: Pos,
}

/// A colored sub-range of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    /// Start char index (inclusive).
    pub start: usize,
    /// End char index (exclusive).
    pub end: usize,
    /// Display color tag, a `#rrggbb` hex code.
    pub color: &'static str,
}
