//! Virtual file store: the fixed, read-only set of files the editor can open.

/// Name of the file `:help` opens.
pub const HELP_FILE: &str = "help.txt";

/// Read-only name → lines mapping consumed by the editor.
pub trait FileStore {
    /// Lines of `name`, or `None` if no such file exists.
    fn get_content(&self, name: &str) -> Option<Vec<String>>;

    fn exists(&self, name: &str) -> bool {
        self.get_content(name).is_some()
    }

    /// All known file names, in listing order.
    fn list_names(&self) -> Vec<String>;
}

/// A file store backed by an in-memory list of canned files.
#[derive(Debug, Clone)]
pub struct CannedFiles {
    files: Vec<(String, Vec<String>)>,
}

impl Default for CannedFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl CannedFiles {
    /// The built-in files shipped with the editor.
    pub fn new() -> Self {
        let files = BUILTIN
            .iter()
            .map(|(name, text)| ((*name).to_string(), split_lines(text)))
            .collect();
        Self { files }
    }

    /// Built-in files plus `extra`; an extra file with a built-in name replaces it.
    pub fn with_extra(extra: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        let mut store = Self::new();
        for (name, lines) in extra {
            if let Some(slot) = store.files.iter_mut().find(|(n, _)| *n == name) {
                slot.1 = lines;
            } else {
                store.files.push((name, lines));
            }
        }
        store
    }
}

impl FileStore for CannedFiles {
    fn get_content(&self, name: &str) -> Option<Vec<String>> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, lines)| lines.clone())
    }

    fn list_names(&self) -> Vec<String> {
        self.files.iter().map(|(n, _)| n.clone()).collect()
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "readme.txt",
        "Welcome to pvim!
================

This is a small modal editor living inside a terminal.
Press i to start typing, Escape to get back to normal mode.

Type :help for the list of keys and commands.
Type :files to see what else you can open.
Type :q to leave.",
    ),
    (
        "hello.js",
        "// A simple JavaScript file
const greeting = \"Hello, world!\";
let count = 42;

function greet(name) {
  if (name === undefined) {
    return greeting;
  }
  return `Hello, ${name}!`;
}

console.log(greet(\"visitor\"), count, true);",
    ),
    (
        "types.ts",
        "// Shapes used by the portfolio
interface Project {
  name: string;
  year: number;
  tags: string[];
}

export const featured: Project = {
  name: \"pvim\",
  year: 2024,
  tags: [\"rust\", \"editor\"],
};",
    ),
    (
        "script.py",
        "# Print a few squares
def squares(limit):
    return [n * n for n in range(limit)]

if __name__ == \"__main__\":
    for value in squares(5):
        print(value, None, True)",
    ),
    (
        "projects.json",
        "{
  \"projects\": [
    { \"name\": \"pvim\", \"stars\": 128, \"active\": true },
    { \"name\": \"pipes\", \"stars\": 12, \"active\": false }
  ],
  \"owner\": null
}",
    ),
    (
        "about.txt",
        "About
=====

I build small tools, terminals and games.
This editor is one of them: modal, tiny, and forgetful.
Nothing you write here is saved anywhere.",
    ),
    (
        HELP_FILE,
        "pvim help
=========

NORMAL MODE
  h j k l / arrows   move left, down, up, right
  w b                next / previous word
  0 $                start / end of line
  gg G               first / last line
  i I a A            insert at cursor, line start, after cursor, line end
  o O                open a line below / above
  x                  delete character
  dd dw              delete line / word
  yy                 yank line
  p P                paste after / before
  u Ctrl-r           undo / redo
  :                  command line
  q                  quit (refused with unsaved changes)

COMMANDS
  :w                 write (simulated)
  :q :q!             quit / quit discarding changes
  :wq :x             write and quit
  :e <file>          open a file
  :files :ls         list files
  :set nu / nonu     show / hide line numbers
  :help              this file",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_files_exist() {
        let store = CannedFiles::new();
        assert!(store.exists("readme.txt"));
        assert!(store.exists(HELP_FILE));
        assert!(!store.exists("nonexistent.txt"));
    }

    #[test]
    fn hello_js_first_line() {
        let store = CannedFiles::new();
        let lines = store.get_content("hello.js").unwrap_or_default();
        assert_eq!(lines[0], "// A simple JavaScript file");
        assert!(lines.len() > 2);
    }

    #[test]
    fn listing_keeps_insertion_order() {
        let names = CannedFiles::new().list_names();
        assert_eq!(names.first().map(String::as_str), Some("readme.txt"));
        assert_eq!(names.last().map(String::as_str), Some(HELP_FILE));
    }

    #[test]
    fn extra_files_append_or_replace() {
        let store = CannedFiles::with_extra(vec![
            ("notes.txt".to_string(), vec!["one".to_string()]),
            ("about.txt".to_string(), vec!["replaced".to_string()]),
        ]);
        assert_eq!(store.get_content("notes.txt"), Some(vec!["one".to_string()]));
        assert_eq!(store.get_content("about.txt"), Some(vec!["replaced".to_string()]));
        assert_eq!(store.list_names().last().map(String::as_str), Some("notes.txt"));
    }
}
