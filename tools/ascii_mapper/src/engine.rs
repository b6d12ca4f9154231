//! Line-oriented transliteration engine.
//!
//! Each line goes through four passes, each on the previous pass's output:
//!   1. comment short-circuit: a line that starts with the comment marker
//!      (whitespace ignored) is returned untouched, including any code inside it
//!   2. `SPECIAL_CHARS` substitution and removal of ignorable characters
//!   3. subscript runs: `bₘₐₓ` -> `b_max`; unmapped members of a run are dropped
//!   4. residual sweep of every remaining non-ASCII char through `fallback`
//!
//! No state survives between lines, and nothing here touches the file system.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::UnmappableChar;
use crate::fallback::char_replacement;
use crate::tables::{self, IGNORABLE_CHARS, SPECIAL_CHARS, SUBSCRIPTS, SUB_SUPER_BLOCK};

pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// An ASCII letter or digit followed by one or more subscript-like characters.
static SUBSCRIPT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    let mut class = String::new();
    for (key, _) in SUBSCRIPTS {
        class.push_str(&regex::escape(&key.to_string()));
    }
    class.push_str(&format!(
        r"\x{{{:X}}}-\x{{{:X}}}",
        u32::from(*SUB_SUPER_BLOCK.start()),
        u32::from(*SUB_SUPER_BLOCK.end())
    ));
    Regex::new(&format!(r"([A-Za-z0-9])([{class}]+)")).expect("subscript run pattern is valid")
});

#[derive(Debug, Clone)]
pub struct Transliterator {
    comment_marker: String,
    skip_comments: bool,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self {
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            skip_comments: true,
        }
    }
}

impl Transliterator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    /// When false, comment lines are transliterated like any other line.
    pub fn skip_comments(mut self, skip: bool) -> Self {
        self.skip_comments = skip;
        self
    }

    /// True if the line, with all whitespace removed, starts with the marker.
    pub fn is_comment(&self, line: &str) -> bool {
        if self.comment_marker.is_empty() {
            return false;
        }
        let mut stripped = line.chars().filter(|c| !c.is_whitespace());
        self.comment_marker
            .chars()
            .all(|m| stripped.next() == Some(m))
    }

    pub fn transliterate(&self, line: &str) -> Result<String, UnmappableChar> {
        if line.is_ascii() || (self.skip_comments && self.is_comment(line)) {
            return Ok(line.to_string());
        }

        let text = substitute_special(line);
        let text = collapse_subscript_runs(&text);
        if text.is_ascii() {
            return Ok(text.into_owned());
        }

        let mut out = String::with_capacity(text.len() + 16);
        for c in text.chars() {
            if c.is_ascii() {
                out.push(c);
            } else {
                out.push_str(&char_replacement(c)?);
            }
        }
        Ok(out)
    }
}

/// Transliterate one line with the default settings.
pub fn transliterate(line: &str) -> Result<String, UnmappableChar> {
    Transliterator::default().transliterate(line)
}

fn substitute_special(line: &str) -> String {
    let mut text = line.to_string();
    for (key, value) in SPECIAL_CHARS {
        if text.contains(key) {
            text = text.replace(key, value);
        }
    }
    if text.contains(IGNORABLE_CHARS) {
        text.retain(|c| !IGNORABLE_CHARS.contains(&c));
    }
    text
}

fn collapse_subscript_runs(text: &str) -> Cow<'_, str> {
    SUBSCRIPT_RUN.replace_all(text, |caps: &Captures| {
        let base = &caps[1];
        let suffix: String = caps[2]
            .chars()
            .filter_map(tables::subscript_replacement)
            .collect();
        if suffix.is_empty() {
            base.to_string()
        } else {
            format!("{base}_{suffix}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_special_char_alone() {
        for (key, value) in SPECIAL_CHARS {
            assert_eq!(transliterate(key).unwrap(), *value, "key {key:?}");
        }
    }

    #[test]
    fn test_special_chars_in_context() {
        assert_eq!(
            transliterate("if (x \u{2264} \u{03C0}) return \u{221E};").unwrap(),
            "if (x <= pi) return inf;"
        );
        assert_eq!(transliterate("b\u{0304} = 1").unwrap(), "hatb = 1");
    }

    #[test]
    fn test_every_subscript_after_base() {
        for (key, value) in SUBSCRIPTS {
            let line = format!("x{key}");
            assert_eq!(transliterate(&line).unwrap(), format!("x_{value}"));
            let line = format!("7{key}");
            assert_eq!(transliterate(&line).unwrap(), format!("7_{value}"));
        }
    }

    #[test]
    fn test_subscript_runs() {
        assert_eq!(transliterate("b\u{2098}\u{2090}\u{2093}").unwrap(), "b_max");
        assert_eq!(transliterate("x\u{2081}\u{2082}").unwrap(), "x_12");
        assert_eq!(
            transliterate("double s\u{2097} = a\u{2081} + ab\u{2082};").unwrap(),
            "double s_l = a_1 + ab_2;"
        );
        assert_eq!(transliterate("x\u{00B2}").unwrap(), "x_2");
    }

    #[test]
    fn test_isolated_subscript_maps_directly() {
        assert_eq!(transliterate("(\u{2081})").unwrap(), "(1)");
        assert_eq!(transliterate("_\u{2098}").unwrap(), "_m");
    }

    #[test]
    fn test_end_to_end_expression() {
        assert_eq!(
            transliterate("s\u{2097} = \u{03B8}\u{00B7}\u{03B2}").unwrap(),
            "s_l = theta*beta"
        );
    }

    #[test]
    fn test_comment_line_unchanged() {
        let line = "// \u{2113} is a ratio";
        assert_eq!(transliterate(line).unwrap(), line);
        // Unmappable characters inside a comment are fine too
        let line = "   //\u{20AC} price\n";
        assert_eq!(transliterate(line).unwrap(), line);
        let line = "\t/ / \u{03B8} spaced marker";
        assert_eq!(transliterate(line).unwrap(), line);
    }

    #[test]
    fn test_trailing_comment_is_transliterated() {
        assert_eq!(
            transliterate("x = 1; // \u{03B8}").unwrap(),
            "x = 1; // theta"
        );
    }

    #[test]
    fn test_comment_options() {
        let engine = Transliterator::new().skip_comments(false);
        assert_eq!(engine.transliterate("// \u{03B8}").unwrap(), "// theta");

        let engine = Transliterator::new().with_comment_marker("#");
        assert_eq!(engine.transliterate("# \u{20AC}").unwrap(), "# \u{20AC}");
        assert!(engine.transliterate("// \u{20AC}").is_err());

        let engine = Transliterator::new().with_comment_marker("");
        assert!(!engine.is_comment("// \u{03B8}"));
    }

    #[test]
    fn test_greek_fallback_by_name() {
        assert_eq!(transliterate("\u{03C9}").unwrap(), "omega");
        assert_eq!(transliterate("2\u{03C0}\u{03C9}t").unwrap(), "2piomegat");
    }

    #[test]
    fn test_unmappable_fails() {
        let err = transliterate("price = 3\u{20AC};").unwrap_err();
        assert_eq!(err.ch, '\u{20AC}');
        assert_eq!(err.code_point, 0x20AC);
    }

    #[test]
    fn test_ignorable_chars_removed() {
        assert_eq!(transliterate("co\u{00AD}ef").unwrap(), "coef");
        assert_eq!(transliterate("\u{FEFF}#include <x>").unwrap(), "#include <x>");
    }

    #[test]
    fn test_idempotent_on_ascii() {
        let inputs = [
            "s\u{2097} = \u{03B8}\u{00B7}\u{03B2}\n",
            "b\u{2098}\u{2090}\u{2093} \u{2264} \u{221E}\r\n",
            "plain ascii line\n",
        ];
        for input in inputs {
            let once = transliterate(input).unwrap();
            assert!(once.is_ascii());
            assert_eq!(transliterate(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_line_endings_preserved() {
        assert_eq!(transliterate("\u{03B8}\r\n").unwrap(), "theta\r\n");
        assert_eq!(transliterate("\u{03B8}\n").unwrap(), "theta\n");
    }

    // Unmapped characters inside a run are silently dropped, while the same
    // character on its own goes through the name fallback. Kept as-is.
    #[test]
    fn test_unmapped_run_member_dropped() {
        assert_eq!(transliterate("x\u{2094}").unwrap(), "x");
        assert_eq!(transliterate("x\u{2094}\u{2081}").unwrap(), "x_1");
        assert_eq!(
            transliterate(" \u{2094}").unwrap(),
            " latinsubscriptsmallletterschwa"
        );
    }

    #[test]
    fn test_signs_in_runs_are_kept() {
        assert_eq!(transliterate("x\u{207B}\u{00B9}").unwrap(), "x_-1");
        assert_eq!(transliterate("10\u{207B}\u{00B3}").unwrap(), "10_-3");
        assert_eq!(transliterate("n\u{207A}").unwrap(), "n_+");
        assert_eq!(transliterate("x\u{207D}\u{00B2}\u{207E}").unwrap(), "x_(2)");
        assert_eq!(transliterate("a\u{208A}\u{2081}").unwrap(), "a_+1");
    }
}
