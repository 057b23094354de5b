//! Fixed operator mapping tables.
//!
//! Almost every operator carries over verbatim; the interesting rows are the
//! equality operators. JavaScript's strict forms have no C# counterpart, so
//! lowering them to `==`/`!=` is lossy, and raising C#'s `==`/`!=` to the
//! strict forms changes reference semantics. Both directions return the
//! warning text the mapper should record.

/// Map a JavaScript binary operator to its C# form.
///
/// Returns the target operator and an optional warning message.
pub fn js_binary_to_cs(op: &str) -> (&'static str, Option<&'static str>) {
    match op {
        "===" => (
            "==",
            Some("strict equality '===' lowered to '=='; reference semantics are not preserved"),
        ),
        "!==" => (
            "!=",
            Some("strict inequality '!==' lowered to '!='; reference semantics are not preserved"),
        ),
        "==" => ("==", None),
        "!=" => ("!=", None),
        "&&" => ("&&", None),
        "||" => ("||", None),
        "<" => ("<", None),
        ">" => (">", None),
        "<=" => ("<=", None),
        ">=" => (">=", None),
        "+" => ("+", None),
        "-" => ("-", None),
        "*" => ("*", None),
        "/" => ("/", None),
        "%" => ("%", None),
        _ => ("", None),
    }
}

/// Map a C# binary operator to its JavaScript form.
///
/// Returns the target operator and an optional warning message.
pub fn cs_binary_to_js(op: &str) -> (&'static str, Option<&'static str>) {
    match op {
        "==" => (
            "===",
            Some("equality '==' raised to '==='; safe for primitives, check reference comparisons"),
        ),
        "!=" => (
            "!==",
            Some("inequality '!=' raised to '!=='; safe for primitives, check reference comparisons"),
        ),
        "&&" => ("&&", None),
        "||" => ("||", None),
        "??" => ("??", None),
        "|" => ("|", None),
        "^" => ("^", None),
        "&" => ("&", None),
        "<<" => ("<<", None),
        ">>" => (">>", None),
        "<" => ("<", None),
        ">" => (">", None),
        "<=" => ("<=", None),
        ">=" => (">=", None),
        "+" => ("+", None),
        "-" => ("-", None),
        "*" => ("*", None),
        "/" => ("/", None),
        "%" => ("%", None),
        _ => ("", None),
    }
}

/// Strip a C# numeric type suffix, which JavaScript cannot carry.
pub fn strip_numeric_suffix(lexeme: &str) -> &str {
    match lexeme.as_bytes().last() {
        Some(b'f' | b'd' | b'm' | b'l') => &lexeme[..lexeme.len() - 1],
        _ => lexeme,
    }
}
