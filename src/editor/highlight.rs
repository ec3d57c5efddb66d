//! Syntax highlighting: a static table of regex patterns per file extension.

use crate::types::ColorRange;
use crate::utils::{byte_to_char_index, char_len};
use regex::Regex;
use std::sync::OnceLock;

pub const COMMENT: &str = "#7f848e";
pub const STRING: &str = "#98c379";
pub const KEYWORD: &str = "#c678dd";
pub const CONSTANT: &str = "#d19a66";
pub const NUMBER: &str = "#d19a66";
pub const BUILTIN: &str = "#61afef";
pub const TYPE: &str = "#e5c07b";
pub const PROPERTY: &str = "#e06c75";

/// Extension tag used for plain text (no highlighting).
pub const PLAIN_TEXT: &str = "txt";

/// A compiled pattern ready for matching.
struct SyntaxPattern {
    regex: Regex,
    color: &'static str,
}

/// Uncompiled table: extension tag → patterns in priority order.
type PatternTable = &'static [(&'static str, &'static [(&'static str, &'static str)])];

const JS_KEYWORDS: &str = r"\b(?:const|let|var|function|return|if|else|for|while|do|switch|case|break|continue|new|class|extends|import|export|from|default|async|await|try|catch|finally|throw|typeof|instanceof|of|in|this)\b";

const PATTERNS: PatternTable = &[
    (
        "js",
        &[
            (r"//.*$", COMMENT),
            (r"/\*.*?\*/", COMMENT),
            (r#""(?:[^"\\]|\\.)*""#, STRING),
            (r"'(?:[^'\\]|\\.)*'", STRING),
            (r"`(?:[^`\\]|\\.)*`", STRING),
            (JS_KEYWORDS, KEYWORD),
            (r"\b(?:true|false|null|undefined|NaN|Infinity)\b", CONSTANT),
            (r"\b\d+(?:\.\d+)?\b", NUMBER),
            (r"\b(?:console|Math|JSON|Object|Array|Promise|document|window)\b", BUILTIN),
        ],
    ),
    (
        "ts",
        &[
            (r"//.*$", COMMENT),
            (r"/\*.*?\*/", COMMENT),
            (r#""(?:[^"\\]|\\.)*""#, STRING),
            (r"'(?:[^'\\]|\\.)*'", STRING),
            (r"`(?:[^`\\]|\\.)*`", STRING),
            (JS_KEYWORDS, KEYWORD),
            (r"\b(?:interface|type|enum|implements|private|public|protected|readonly|as)\b", KEYWORD),
            (r"\b(?:true|false|null|undefined)\b", CONSTANT),
            (r"\b\d+(?:\.\d+)?\b", NUMBER),
            (r"\b(?:string|number|boolean|void|any|unknown|never)\b", TYPE),
        ],
    ),
    (
        "py",
        &[
            (r"#.*$", COMMENT),
            (r#""(?:[^"\\]|\\.)*""#, STRING),
            (r"'(?:[^'\\]|\\.)*'", STRING),
            (r"\b(?:def|class|return|if|elif|else|for|while|in|not|and|or|import|from|as|with|try|except|finally|raise|lambda|pass|break|continue|yield|is)\b", KEYWORD),
            (r"\b(?:True|False|None)\b", CONSTANT),
            (r"\b\d+(?:\.\d+)?\b", NUMBER),
            (r"\b(?:print|len|range|str|int|float|list|dict|set|open|enumerate|zip)\b", BUILTIN),
        ],
    ),
    (
        "json",
        &[
            (r#""(?:[^"\\]|\\.)*"\s*:"#, PROPERTY),
            (r#""(?:[^"\\]|\\.)*""#, STRING),
            (r"\b(?:true|false|null)\b", CONSTANT),
            (r"-?\b\d+(?:\.\d+)?\b", NUMBER),
        ],
    ),
    (PLAIN_TEXT, &[]),
];

fn compiled() -> &'static [(&'static str, Vec<SyntaxPattern>)] {
    static TABLE: OnceLock<Vec<(&'static str, Vec<SyntaxPattern>)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(ext, patterns)| {
                let compiled = patterns
                    .iter()
                    .filter_map(|(pattern, color)| match Regex::new(pattern) {
                        Ok(regex) => Some(SyntaxPattern { regex, color: *color }),
                        Err(e) => {
                            tracing::warn!("Invalid highlight pattern '{}': {}", pattern, e);
                            None
                        }
                    })
                    .collect();
                (*ext, compiled)
            })
            .collect()
    })
}

/// Extension tag of a file name: its final dot-delimited segment, lower-cased.
///
/// A name without a dot is plain text.
pub fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => PLAIN_TEXT.to_string(),
    }
}

/// Compute the colored ranges of one line.
///
/// Every pattern of the extension scans the whole line on its own; ranges from different
/// patterns may overlap. The result is sorted by `start`, keeping pattern order for ties.
pub fn tokenize(line: &str, ext: &str) -> Vec<ColorRange> {
    let Some((_, patterns)) = compiled().iter().find(|(e, _)| *e == ext) else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    for pattern in patterns {
        for m in pattern.regex.find_iter(line) {
            let start = byte_to_char_index(line, m.start());
            let end = start + char_len(m.as_str());
            ranges.push(ColorRange { start, end, color: pattern.color });
        }
    }

    ranges.sort_by_key(|r| r.start);
    ranges
}

/// Color of the character at `char_idx`: the last sorted range covering it wins.
pub fn color_at(ranges: &[ColorRange], char_idx: usize) -> Option<&'static str> {
    ranges
        .iter()
        .rev()
        .find(|r| char_idx >= r.start && char_idx < r.end)
        .map(|r| r.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(line: &str, ext: &str) -> Vec<(usize, usize, &'static str)> {
        tokenize(line, ext).into_iter().map(|r| (r.start, r.end, r.color)).collect()
    }

    // ==================== extension_of ====================

    #[test]
    fn extension_from_filename() {
        assert_eq!(extension_of("hello.js"), "js");
        assert_eq!(extension_of("archive.tar.JSON"), "json");
        assert_eq!(extension_of("Makefile"), "txt");
    }

    // ==================== tokenize ====================

    #[test]
    fn const_keyword_in_js() {
        let ranges = tokenize("const x = 1;", "js");
        assert!(ranges.contains(&ColorRange { start: 0, end: 5, color: KEYWORD }));
        assert!(ranges.contains(&ColorRange { start: 10, end: 11, color: NUMBER }));
    }

    #[test]
    fn ranges_sorted_by_start() {
        let ranges = tokenize("let s = \"a\"; // done", "js");
        assert!(ranges.windows(2).all(|w| w[0].start <= w[1].start));
        assert_eq!(
            spans("let s = \"a\"; // done", "js"),
            vec![(0, 3, KEYWORD), (8, 11, STRING), (13, 20, COMMENT)]
        );
    }

    #[test]
    fn overlapping_ranges_are_kept() {
        // the keyword inside the comment is still reported
        let got = spans("// return", "js");
        assert_eq!(got, vec![(0, 9, COMMENT), (3, 9, KEYWORD)]);
    }

    #[test]
    fn python_comment_and_constants() {
        let got = spans("x = None  # nothing", "py");
        assert_eq!(got, vec![(4, 8, CONSTANT), (10, 19, COMMENT)]);
    }

    #[test]
    fn json_property_then_value() {
        let got = spans("\"a\": 1", "json");
        assert_eq!(got, vec![(0, 4, PROPERTY), (0, 3, STRING), (5, 6, NUMBER)]);
    }

    #[test]
    fn plain_and_unknown_are_empty() {
        assert!(tokenize("const x = 1;", "txt").is_empty());
        assert!(tokenize("const x = 1;", "rs").is_empty());
    }

    #[test]
    fn char_offsets_not_bytes() {
        let got = spans("\"é\" + 1", "js");
        assert_eq!(got, vec![(0, 3, STRING), (6, 7, NUMBER)]);
    }

    // ==================== color_at ====================

    #[test]
    fn later_range_overrides_inside() {
        let ranges = tokenize("// return", "js");
        assert_eq!(color_at(&ranges, 0), Some(COMMENT));
        assert_eq!(color_at(&ranges, 4), Some(KEYWORD));
        assert_eq!(color_at(&ranges, 20), None);
    }
}
