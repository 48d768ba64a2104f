//! Free-text filter values.

use serde::{Deserialize, Serialize};

/// Escape character used in generated `LIKE` patterns.
///
/// `!` has no meaning inside string literals in any supported dialect, so
/// it cannot interact with quote or backslash escaping.
pub const LIKE_ESCAPE: char = '!';

/// Untrusted text a caller wants to find inside an entity's searchable fields.
///
/// Only non-empty text produces a `SearchText`; the empty string means
/// "no filter". The text is kept verbatim and matched as a literal substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchText(String);

impl SearchText {
    /// Build a filter from optional caller input.
    pub fn new(text: Option<&str>) -> Option<Self> {
        match text {
            Some(t) if !t.is_empty() => Some(Self(t.to_string())),
            _ => None,
        }
    }

    /// The raw, unescaped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// A `LIKE` pattern matching any value containing this text.
    ///
    /// `%`, `_` and the escape character itself are escaped with
    /// [`LIKE_ESCAPE`]. The result is still untrusted text and must go
    /// through string-literal quoting before it is embedded in a statement.
    pub fn contains_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}
