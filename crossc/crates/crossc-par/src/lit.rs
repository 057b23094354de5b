//! Literal values shared by both ASTs.

/// A literal's tagged value.
///
/// Numbers keep their source lexeme so emission can reproduce the literal
/// form, including any C# type suffix. Strings hold the content between the
/// quotes with quote escapes resolved; remaining escape sequences pass
/// through untouched and are re-escaped on emission.
#[derive(Clone, Debug, PartialEq)]
pub enum LitValue {
    /// String content, quotes stripped.
    Str(String),
    /// Numeric literal in its source form.
    Num(String),
    /// Boolean literal.
    Bool(bool),
    /// Null literal.
    Null,
}

/// Decode a string token's lexeme into its content.
///
/// Strips the surrounding quotes (including a verbatim `@` prefix), resolves
/// escaped quotes and escaped backslashes, and leaves every other escape
/// sequence as-is. For verbatim strings a doubled quote collapses to one.
/// Unterminated lexemes (no closing quote) simply yield everything after the
/// opening quote.
pub fn decode_string_lexeme(lexeme: &str) -> String {
    if let Some(rest) = lexeme.strip_prefix('@') {
        return decode_verbatim(rest);
    }

    let mut chars = lexeme.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };

    let mut out = String::new();
    while let Some(c) = chars.next() {
        if c == quote && chars.as_str().is_empty() {
            // Closing quote.
            return out;
        }
        if c == '\\' {
            match chars.next() {
                Some(next @ ('\\' | '"' | '\'' | '`')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn decode_verbatim(quoted: &str) -> String {
    let inner = quoted.strip_prefix('"').unwrap_or(quoted);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    inner.replace("\"\"", "\"")
}
