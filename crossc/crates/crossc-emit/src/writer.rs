//! Indented line writer and literal rendering.

use crossc_par::js::ast::LitValue;

/// Accumulates output lines at a tracked indentation depth.
///
/// Indentation is four spaces per level; lines are pushed whole, so the
/// output never carries trailing whitespace.
pub struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    const INDENT: &'static str = "    ";

    /// Create an empty writer.
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.out.push('\n');
            return;
        }
        for _ in 0..self.depth {
            self.out.push_str(Self::INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Increase indentation depth.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease indentation depth.
    pub fn dedent(&mut self) {
        debug_assert!(self.depth > 0);
        self.depth = self.depth.saturating_sub(1);
    }

    /// Consume the writer, returning the built text.
    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a literal value as source text.
///
/// Strings are double-quoted with backslashes and quotes escaped; numbers
/// render via their lexeme; booleans and null render literally (both
/// languages agree on all four).
pub fn render_literal(value: &LitValue) -> String {
    match value {
        LitValue::Str(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('"');
            for c in s.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    _ => out.push(c),
                }
            }
            out.push('"');
            out
        }
        LitValue::Num(n) => n.clone(),
        LitValue::Bool(true) => "true".to_string(),
        LitValue::Bool(false) => "false".to_string(),
        LitValue::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = Writer::new();
        w.line("a {");
        w.indent();
        w.line("b;");
        w.dedent();
        w.line("}");
        assert_eq!(w.finish(), "a {\n    b;\n}\n");
    }

    #[test]
    fn test_no_trailing_whitespace_on_blank_lines() {
        let mut w = Writer::new();
        w.indent();
        w.blank();
        w.line("x;");
        let out = w.finish();
        assert_eq!(out, "\n    x;\n");
        assert!(out.lines().all(|l| l.trim_end() == l));
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(
            render_literal(&LitValue::Str("a\"b\\c".to_string())),
            r#""a\"b\\c""#
        );
    }

    #[test]
    fn test_number_renders_lexeme() {
        assert_eq!(render_literal(&LitValue::Num("10.5m".to_string())), "10.5m");
    }

    #[test]
    fn test_bool_and_null() {
        assert_eq!(render_literal(&LitValue::Bool(true)), "true");
        assert_eq!(render_literal(&LitValue::Null), "null");
    }
}
