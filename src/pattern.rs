//! Name matching and substitution.
//!
//! Wraps a compiled `regex::Regex` together with the replacement template.
//! Malformed patterns are rejected by [`Pattern::new`], before any directory
//! is touched.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// A compiled pattern and the template substituted for each of its matches.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    replacement: String,
}

/// Result of running a [`Pattern`] over a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    /// The substituted text, covering only the compared prefix.
    pub text: String,
    /// Whether the substitution changed the compared prefix.
    pub matched: bool,
}

impl Pattern {
    /// Compiles `pattern` and prepares `replacement` for expansion.
    ///
    /// The replacement uses `$1` / `${name}` references. Backslash forms
    /// (`\1`, `\g<name>`) are accepted as well and translated.
    pub fn new(pattern: &str, replacement: &str, case_insensitive: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .with_context(|| format!("Malformed pattern: {}", pattern))?;

        Ok(Self {
            regex,
            replacement: translate_backreferences(replacement),
        })
    }

    /// Replaces every non-overlapping match within the first `len` bytes of `name`.
    ///
    /// `len` must fall on a character boundary; callers split at an ASCII `.`
    /// so this always holds. Bytes past `len` are not part of the result.
    pub fn apply(&self, name: &str, len: usize) -> Replaced {
        let head = &name[..len];
        let text = self.regex.replace_all(head, self.replacement.as_str());
        let matched = text != head;
        Replaced {
            text: text.into_owned(),
            matched,
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Rewrites `\N`, `\g<name>` and `\\` into the `regex` crate's expansion syntax.
fn translate_backreferences(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some(d) if d.is_ascii_digit() => {
                chars.next();
                out.push_str(&format!("${{{}}}", d));
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some('g') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                match read_group_name(&mut lookahead) {
                    Some(name) => {
                        chars = lookahead;
                        out.push_str(&format!("${{{}}}", name));
                    }
                    None => out.push('\\'),
                }
            }
            _ => out.push('\\'),
        }
    }

    out
}

/// Reads `<name>` from `chars`, returning `name` if it is non-empty and closed.
fn read_group_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    if chars.next() != Some('<') {
        return None;
    }
    let mut name = String::new();
    for c in chars.by_ref() {
        if c == '>' {
            return if name.is_empty() { None } else { Some(name) };
        }
        if !(c.is_alphanumeric() || c == '_') {
            return None;
        }
        name.push(c);
    }
    None
}
