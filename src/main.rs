//! `pvim`: terminal host for the modal editor in the `pvim` library.
//!
//! ## Reading guide
//! - **`main()` / `run()`**: parses arguments, loads `pvim.toml`, sets up logging and the
//!   terminal, then runs the input/render loop.
//! - **`terminal::TerminalGuard`**: raw mode + alternate screen, restored on drop.
//! - **`editor::Session`**: owns the current editor snapshot; every key goes through it.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, ClearType};
use crossterm::ExecutableCommand;
use pvim::config::{default_config_paths, Config};
use pvim::editor::Session;
use pvim::terminal::{draw, translate_key, visible_rows, TerminalGuard};
use pvim::vfs::FileStore;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file.
const LOG_ENV: &str = "PVIM_LOG";

/// Program entry point.
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    file: Option<String>,
    config: Option<PathBuf>,
}

fn print_help() {
    println!("pvim — a small vim-like modal editor");
    println!();
    println!("USAGE:");
    println!("    pvim [FILE]                 Open FILE from the virtual file store");
    println!("    pvim -c, --config <PATH>    Use PATH instead of ./pvim.toml");
    println!("    pvim -h, --help             Show this help message");
    println!("    pvim -v, --version          Show version information");
    println!();
    println!("KEYS:");
    println!("    i a I A o O                 Enter insert mode");
    println!("    h j k l w b 0 $ gg G        Move");
    println!("    x dd dw yy p P u Ctrl+R     Edit, yank, put, undo, redo");
    println!("    :w :q :q! :wq :e <file>     Commands (:help for more)");
    println!();
    println!("Set {LOG_ENV}=<file> to write a debug log.");
}

/// Returns `None` when the process should exit after printing help or the version.
fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(None);
            }
            "-v" | "--version" => {
                println!("pvim v{}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "-c" | "--config" => {
                let path = it.next().with_context(|| format!("'{arg}' needs a path"))?;
                args.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => {
                eprintln!("Error: Unknown flag '{}'", flag);
                eprintln!("Try 'pvim --help' for more information.");
                std::process::exit(1);
            }
            name => args.file = Some(name.to_string()),
        }
    }
    Ok(Some(args))
}

/// Install a file-backed subscriber when `PVIM_LOG` is set. The terminal belongs to the editor,
/// so logs never go to stdout/stderr.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("Creating log file {}", PathBuf::from(&path).display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pvim=debug"));
    // Ignore the error if a global subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Runs the editor:
/// - parses command line arguments and loads the config
/// - sets up the terminal (raw mode + alternate screen)
/// - loops: draw → read input events → update state
fn run() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };
    init_logging()?;

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&default_config_paths())?,
    };
    let store = config.file_store();
    let filename = args.file.unwrap_or_else(|| config.editor.initial_file.clone());
    if !store.exists(&filename) {
        warn!(%filename, "file not in store; starting with an empty buffer");
    }

    let mut stdout = io::stdout();
    let _term = TerminalGuard::new(&mut stdout)?;

    let (mut width, height) = terminal::size().context("Reading terminal size")?;
    let session = Session::new(store, &filename, visible_rows(height));
    let mut state = session.state().clone();
    state.show_line_numbers = config.editor.line_numbers;
    let mut session = session.with_state(state);
    debug!(%filename, width, height, "editor started");

    loop {
        draw(&mut stdout, &session.frame(), width)?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if session.handle_key(translate_key(key)) {
                    break;
                }
            }
            Event::Resize(w, h) => {
                width = w;
                stdout.execute(terminal::Clear(ClearType::All))?;
                session.resize(visible_rows(h));
            }
            _ => {}
        }
    }

    debug!("editor exited");
    Ok(())
}
