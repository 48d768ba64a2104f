//! String-literal quoting.
//!
//! [`quote_literal`] is the only place untrusted text is turned into SQL.
//! Whatever the input, the output is exactly one complete string literal
//! whose value is the input, character for character.

use tracing::warn;

use prodctl_core::config::LiteralDialect;
use prodctl_core::error::AppError;
use prodctl_core::result::AppResult;

/// Quote `value` as a single-quoted SQL string literal.
///
/// Single quotes are doubled. Under [`LiteralDialect::Backslash`] backslashes
/// are doubled as well. Tab, line feed and carriage return pass through;
/// any other control character (NUL included) is rejected, since drivers and
/// wire protocols may truncate or reinterpret them.
pub fn quote_literal(value: &str, dialect: LiteralDialect) -> AppResult<String> {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => quoted.push_str("''"),
            '\\' if dialect == LiteralDialect::Backslash => quoted.push_str("\\\\"),
            '\t' | '\n' | '\r' => quoted.push(ch),
            c if c.is_control() => {
                warn!(
                    codepoint = c as u32,
                    "Rejected control character at literal boundary"
                );
                return Err(AppError::escaping_boundary(format!(
                    "control character U+{:04X} cannot be embedded in a literal",
                    c as u32
                )));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    Ok(quoted)
}
