//! Terminal setup and teardown, key translation, and frame drawing.

use crate::editor::render::{CursorStyle, Frame, GUTTER_FG};
use crate::types::{Key, KeyInput};
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    style::{self, Attribute, Color},
    terminal::{self, ClearType},
    ExecutableCommand, QueueableCommand,
};
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthChar;

/// Rows below the text area: status bar and command line.
pub const CHROME_ROWS: usize = 2;

/// RAII guard for terminal state.
///
/// In Rust, "RAII" means you acquire a resource in `new()` and release it in `Drop`.
/// That guarantees cleanup even if the function returns early.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Enable raw mode and the alternate screen.
    pub fn new(stdout: &mut Stdout) -> Result<Self> {
        terminal::enable_raw_mode().context("enable_raw_mode failed")?;
        stdout.execute(terminal::EnterAlternateScreen)?;
        stdout.execute(cursor::Hide)?;
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.flush()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    /// Always restore terminal state when exiting the editor.
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(style::ResetColor);
        let _ = stdout.execute(cursor::SetCursorStyle::DefaultUserShape);
        let _ = stdout.execute(cursor::Show);
        let _ = stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

/// Number of text rows for a terminal of `height` rows.
pub fn visible_rows(height: u16) -> usize {
    usize::from(height).saturating_sub(CHROME_ROWS).max(1)
}

/// Translate a crossterm key event into the editor's key model.
pub fn translate_key(ev: KeyEvent) -> KeyInput {
    let key = match ev.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => Key::Other,
    };
    KeyInput { key, ctrl: ev.modifiers.contains(KeyModifiers::CONTROL) }
}

/// Parse a `#rrggbb` color tag. Anything else falls back to the terminal's default.
fn to_color(hex: &str) -> Color {
    let parsed = hex.strip_prefix('#').filter(|h| h.len() == 6).and_then(|h| {
        let channel = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    });
    parsed.unwrap_or(Color::Reset)
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Print `text` without exceeding `avail` display cells. Returns the cells used.
fn print_clipped<W: Write>(out: &mut W, text: &str, avail: usize) -> Result<usize> {
    let mut used = 0;
    let mut fitted = String::new();
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > avail {
            break;
        }
        used += w;
        fitted.push(ch);
    }
    out.queue(style::Print(fitted))?;
    Ok(used)
}

/// Paint `frame` onto a terminal `width` cells wide. Rows come first, then the status bar and
/// command line on the last two rows, then the cursor.
pub fn draw<W: Write>(out: &mut W, frame: &Frame, width: u16) -> Result<()> {
    let width = usize::from(width);
    let gutter = if frame.gutter_width > 0 { frame.gutter_width + 1 } else { 0 };
    let text_avail = width.saturating_sub(gutter);
    let text_rows = frame.rows.len() + frame.filler_rows;

    out.queue(cursor::Hide)?;
    out.queue(style::ResetColor)?;

    for (y, row) in frame.rows.iter().enumerate() {
        out.queue(cursor::MoveTo(0, to_u16(y)))?;
        out.queue(terminal::Clear(ClearType::CurrentLine))?;
        if gutter > 0 {
            out.queue(style::SetForegroundColor(to_color(GUTTER_FG)))?;
            out.queue(style::Print(format!("{} ", row.gutter)))?;
        }
        let mut used = 0;
        for span in &row.spans {
            out.queue(style::SetForegroundColor(to_color(span.color)))?;
            used += print_clipped(out, &span.text, text_avail - used)?;
            if used >= text_avail {
                break;
            }
        }
        out.queue(style::ResetColor)?;
    }

    for y in frame.rows.len()..text_rows {
        out.queue(cursor::MoveTo(0, to_u16(y)))?;
        out.queue(terminal::Clear(ClearType::CurrentLine))?;
        out.queue(style::SetForegroundColor(to_color(GUTTER_FG)))?;
        out.queue(style::Print("~"))?;
        out.queue(style::ResetColor)?;
    }

    // Status bar
    out.queue(cursor::MoveTo(0, to_u16(text_rows)))?;
    out.queue(terminal::Clear(ClearType::CurrentLine))?;
    out.queue(style::SetAttribute(Attribute::Reverse))?;
    let mut bar = frame.status_bar.to_string();
    let bar_len = bar.chars().count();
    if bar_len < width {
        bar.push_str(&" ".repeat(width - bar_len));
    }
    print_clipped(out, &bar, width)?;
    out.queue(style::SetAttribute(Attribute::Reset))?;

    // Command line
    out.queue(cursor::MoveTo(0, to_u16(text_rows + 1)))?;
    out.queue(terminal::Clear(ClearType::CurrentLine))?;
    let used = print_clipped(out, &frame.command_line, width)?;

    if frame.command_cursor {
        out.queue(cursor::SetCursorStyle::SteadyBlock)?;
        out.queue(cursor::MoveTo(to_u16(used), to_u16(text_rows + 1)))?;
        out.queue(cursor::Show)?;
    } else if let Some(c) = frame.cursor {
        let line: String = frame
            .rows
            .get(c.row)
            .map(|r| r.spans.iter().map(|s| s.text.as_str()).collect())
            .unwrap_or_default();
        let x: usize = gutter + line.chars().take(c.col).map(char_width).sum::<usize>();
        let shape = match c.style {
            CursorStyle::Bar => cursor::SetCursorStyle::SteadyBar,
            CursorStyle::Block => cursor::SetCursorStyle::SteadyBlock,
        };
        out.queue(shape)?;
        out.queue(cursor::MoveTo(to_u16(x.min(width.saturating_sub(1))), to_u16(c.row)))?;
        out.queue(cursor::Show)?;
    }

    out.flush()?;
    Ok(())
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
