//! Main lexer implementation for both source languages.
//!
//! A single scanning engine drives tokenization for JavaScript and C#; the
//! differences between the two vocabularies live in a [`LangProfile`]: the
//! keyword table, the operator tables (tried longest-first: three characters,
//! then two, then one), and a handful of option flags (`$` identifiers and
//! backtick template strings for JavaScript, verbatim strings and numeric
//! type suffixes for C#).
//!
//! The lexer is total and silent: every input produces a finite token
//! sequence ending with EOF, and unrecognized bytes become
//! [`TokenKind::Unknown`] tokens for the parser to reject. No diagnostics
//! are emitted here.

use crossc_util::{FxHashMap, Span};
use once_cell::sync::Lazy;

use crate::cursor::Cursor;
use crate::token::{Lang, Token, TokenKind, CS_KEYWORDS_MAP, JS_KEYWORDS};

/// Three-character operators, per language.
const JS_OPS3: &[(&str, TokenKind)] = &[("===", TokenKind::EqEqEq), ("!==", TokenKind::NotEqEq)];

const CS_OPS3: &[(&str, TokenKind)] = &[
    ("??=", TokenKind::QuestionQuestionEq),
    ("<<=", TokenKind::ShlEq),
    (">>=", TokenKind::ShrEq),
];

/// Two-character operators shared by both languages.
const SHARED_OPS2: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::LtEq),
    (">=", TokenKind::GtEq),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    ("%=", TokenKind::PercentEq),
];

/// Two-character operators only C# has.
const CS_OPS2: &[(&str, TokenKind)] = &[
    ("&=", TokenKind::AmpEq),
    ("|=", TokenKind::PipeEq),
    ("^=", TokenKind::CaretEq),
    ("=>", TokenKind::Arrow),
    ("::", TokenKind::ColonColon),
    ("<<", TokenKind::Shl),
    (">>", TokenKind::Shr),
    ("??", TokenKind::QuestionQuestion),
];

/// Single-character tokens shared by both languages.
const SHARED_OPS1: &[(char, TokenKind)] = &[
    ('(', TokenKind::LParen),
    (')', TokenKind::RParen),
    ('{', TokenKind::LBrace),
    ('}', TokenKind::RBrace),
    ('[', TokenKind::LBracket),
    (']', TokenKind::RBracket),
    (',', TokenKind::Comma),
    (';', TokenKind::Semicolon),
    (':', TokenKind::Colon),
    ('.', TokenKind::Dot),
    ('+', TokenKind::Plus),
    ('-', TokenKind::Minus),
    ('*', TokenKind::Star),
    ('/', TokenKind::Slash),
    ('%', TokenKind::Percent),
    ('=', TokenKind::Eq),
    ('<', TokenKind::Lt),
    ('>', TokenKind::Gt),
    ('!', TokenKind::Not),
];

/// Single-character tokens only C# has.
const CS_OPS1: &[(char, TokenKind)] = &[
    ('&', TokenKind::Amp),
    ('|', TokenKind::Pipe),
    ('^', TokenKind::Caret),
    ('~', TokenKind::Tilde),
    ('?', TokenKind::Question),
];

/// Per-language lexing configuration.
///
/// The scanning engine is shared; this struct captures everything that
/// differs between the two vocabularies.
pub struct LangProfile {
    /// Keyword lookup table for identifier classification.
    keywords: &'static FxHashMap<&'static str, TokenKind>,

    /// Three-character operator table (tried first).
    ops3: &'static [(&'static str, TokenKind)],

    /// Two-character operator tables (tried second).
    ops2: &'static [&'static [(&'static str, TokenKind)]],

    /// Single-character tables (tried last).
    ops1: &'static [&'static [(char, TokenKind)]],

    /// `$` may start an identifier (JavaScript).
    dollar_idents: bool,

    /// Backtick opens a template string that may span lines (JavaScript).
    template_strings: bool,

    /// `@"..."` opens a verbatim string (C#).
    verbatim_strings: bool,

    /// A trailing `f`, `d`, `m` or `l` belongs to a numeric literal (C#).
    numeric_suffixes: bool,
}

impl LangProfile {
    /// Profile for the given language.
    pub fn for_lang(lang: Lang) -> &'static Self {
        match lang {
            Lang::Js => Lazy::force(&JS_PROFILE),
            Lang::Cs => Lazy::force(&CS_PROFILE),
        }
    }
}

static JS_PROFILE: Lazy<LangProfile> = Lazy::new(|| LangProfile {
    keywords: Lazy::force(&JS_KEYWORDS),
    ops3: JS_OPS3,
    ops2: &[SHARED_OPS2],
    ops1: &[SHARED_OPS1],
    dollar_idents: true,
    template_strings: true,
    verbatim_strings: false,
    numeric_suffixes: false,
});

static CS_PROFILE: Lazy<LangProfile> = Lazy::new(|| LangProfile {
    keywords: Lazy::force(&CS_KEYWORDS_MAP),
    ops3: CS_OPS3,
    ops2: &[CS_OPS2, SHARED_OPS2],
    ops1: &[SHARED_OPS1, CS_OPS1],
    dollar_idents: false,
    template_strings: false,
    verbatim_strings: true,
    numeric_suffixes: true,
});

/// The lexer state machine.
///
/// Produces tokens on demand via [`Lexer::next_token`]; most callers use the
/// [`tokenize`] convenience function instead.
pub struct Lexer<'a> {
    /// Character cursor over the source.
    cursor: Cursor<'a>,

    /// Language-specific tables and flags.
    profile: &'static LangProfile,

    /// Byte position where the current token started.
    token_start: usize,

    /// Line where the current token started.
    token_line: u32,

    /// Column where the current token started.
    token_column: u32,

    /// Offset of the token start within its line.
    token_offset_in_line: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for `source` using the given language profile.
    pub fn new(source: &'a str, lang: Lang) -> Self {
        Self {
            cursor: Cursor::new(source),
            profile: LangProfile::for_lang(lang),
            token_start: 0,
            token_line: 1,
            token_column: 1,
            token_offset_in_line: 0,
        }
    }

    /// Returns the next token, or an EOF token at end of input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_line = self.cursor.line();
        self.token_column = self.cursor.column();
        self.token_offset_in_line = self.cursor.offset_in_line();

        if self.cursor.is_at_end() {
            return Token::eof(self.cursor.line());
        }

        let c = self.cursor.current_char();

        let kind = match c {
            '"' | '\'' => self.lex_string(c, false),
            '`' if self.profile.template_strings => self.lex_string('`', true),
            '@' if self.profile.verbatim_strings && self.cursor.char_at(1) == '"' => {
                self.lex_verbatim_string()
            }
            _ if c.is_ascii_digit() => self.lex_number(),
            _ if is_ident_start(c, self.profile.dollar_idents) => self.lex_identifier(),
            _ => self.lex_operator(),
        };

        self.make_token(kind)
    }

    /// Lexes a string literal opened by `quote`.
    ///
    /// The matched quote is the only terminator; an unterminated single-line
    /// string ends at the line break and the token is produced anyway (the
    /// parser decides what to make of it). Backslash escapes pass through
    /// with both bytes retained in the lexeme.
    fn lex_string(&mut self, quote: char, multiline: bool) -> TokenKind {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                break;
            }

            let c = self.cursor.current_char();

            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\n' && !multiline {
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                let next = self.cursor.current_char();
                if !self.cursor.is_at_end() && !(next == '\n' && !multiline) {
                    self.cursor.advance();
                }
            } else {
                self.cursor.advance();
            }
        }

        TokenKind::Str
    }

    /// Lexes a C# verbatim string `@"..."`.
    ///
    /// Inside, `""` is a literal quote and backslash is not special; the
    /// string may span lines.
    fn lex_verbatim_string(&mut self) -> TokenKind {
        self.cursor.advance(); // '@'
        self.cursor.advance(); // opening quote

        loop {
            if self.cursor.is_at_end() {
                break;
            }

            if self.cursor.current_char() == '"' {
                if self.cursor.char_at(1) == '"' {
                    self.cursor.advance();
                    self.cursor.advance();
                    continue;
                }
                self.cursor.advance();
                break;
            }

            self.cursor.advance();
        }

        TokenKind::Str
    }

    /// Lexes a numeric literal: greedy digits and dots, plus one type
    /// suffix character when the profile allows it.
    fn lex_number(&mut self) -> TokenKind {
        while self.cursor.current_char().is_ascii_digit() || self.cursor.current_char() == '.' {
            self.cursor.advance();
        }

        if self.profile.numeric_suffixes {
            if let 'f' | 'd' | 'm' | 'l' = self.cursor.current_char() {
                self.cursor.advance();
            }
        }

        TokenKind::Number
    }

    /// Lexes an identifier or keyword.
    fn lex_identifier(&mut self) -> TokenKind {
        self.cursor.advance();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice(self.token_start, self.cursor.position());
        self.profile
            .keywords
            .get(text)
            .copied()
            .unwrap_or(TokenKind::Ident)
    }

    /// Lexes an operator or punctuation mark by tabular longest match.
    fn lex_operator(&mut self) -> TokenKind {
        let rest = self.cursor.remaining();

        for &(text, kind) in self.profile.ops3 {
            if rest.starts_with(text) {
                for _ in 0..text.len() {
                    self.cursor.advance();
                }
                return kind;
            }
        }

        for table in self.profile.ops2 {
            for &(text, kind) in *table {
                if rest.starts_with(text) {
                    self.cursor.advance();
                    self.cursor.advance();
                    return kind;
                }
            }
        }

        let c = self.cursor.current_char();
        for table in self.profile.ops1 {
            for &(ch, kind) in *table {
                if c == ch {
                    self.cursor.advance();
                    return kind;
                }
            }
        }

        // Unrecognized byte: token it and move on, the parser will complain.
        self.cursor.advance();
        TokenKind::Unknown
    }

    /// Skips whitespace, line comments and block comments.
    ///
    /// Block comments close across line boundaries; an unterminated block
    /// comment silently runs to end of input.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let c = self.cursor.current_char();

            if c.is_whitespace() && !self.cursor.is_at_end() {
                self.cursor.advance();
                continue;
            }

            if c == '/' && self.cursor.char_at(1) == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }

            if c == '/' && self.cursor.char_at(1) == '*' {
                self.cursor.advance();
                self.cursor.advance();
                while !self.cursor.is_at_end() {
                    if self.cursor.current_char() == '*' && self.cursor.char_at(1) == '/' {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    self.cursor.advance();
                }
                continue;
            }

            break;
        }
    }

    /// Assembles the token from the recorded start state.
    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = self.cursor.slice(self.token_start, self.cursor.position());
        let start = self.token_offset_in_line;
        Token::new(
            kind,
            lexeme,
            Span::new(
                start,
                start + lexeme.len(),
                self.token_line,
                self.token_column,
            ),
        )
    }
}

fn is_ident_start(c: char, dollar: bool) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (dollar && c == '$')
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenizes the whole source, appending the canonical EOF token.
///
/// The EOF token's line is one past the last content line; for empty input
/// it sits on line 1.
pub fn tokenize(source: &str, lang: Lang) -> Vec<Token> {
    let mut lexer = Lexer::new(source, lang);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        if token.is(TokenKind::Eof) {
            break;
        }
        tokens.push(token);
    }

    tokens.push(Token::eof(source.lines().count() as u32 + 1));
    tokens
}

/// Tokenizes JavaScript source.
pub fn tokenize_js(source: &str) -> Vec<Token> {
    tokenize(source, Lang::Js)
}

/// Tokenizes C# source.
pub fn tokenize_cs(source: &str) -> Vec<Token> {
    tokenize(source, Lang::Cs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str, lang: Lang) -> Vec<TokenKind> {
        tokenize(source, lang).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_let_binding() {
        let tokens = tokenize_js("let name = \"John\";");
        let expected = [
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Str,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ];
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            expected.to_vec()
        );
        assert_eq!(tokens[3].lexeme, "\"John\"");
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize_js("let x\nx = 1;");
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[0].span.column, 1);
        assert_eq!(tokens[1].span.column, 5);
        assert_eq!(tokens[2].span.line, 2);
        assert_eq!(tokens[2].span.column, 1);
        assert_eq!(tokens[2].span.start, 0);
        assert_eq!(tokens[2].span.end, 1);
    }

    #[test]
    fn test_eof_line_past_content() {
        let tokens = tokenize_js("a;\nb;");
        assert_eq!(tokens.last().unwrap().span.line, 3);

        let empty = tokenize_js("");
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].kind, TokenKind::Eof);
        assert_eq!(empty[0].span.line, 1);
    }

    #[test]
    fn test_strict_equality_is_js_only() {
        assert_eq!(
            kinds("a === b", Lang::Js),
            vec![
                TokenKind::Ident,
                TokenKind::EqEqEq,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
        // The C# table has no ===; longest match finds == then =.
        assert_eq!(
            kinds("a === b", Lang::Cs),
            vec![
                TokenKind::Ident,
                TokenKind::EqEq,
                TokenKind::Eq,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_cs_operators() {
        assert_eq!(
            kinds("a ??= b << 2", Lang::Cs),
            vec![
                TokenKind::Ident,
                TokenKind::QuestionQuestionEq,
                TokenKind::Ident,
                TokenKind::Shl,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds("x => x :: y", Lang::Cs),
            vec![
                TokenKind::Ident,
                TokenKind::Arrow,
                TokenKind::Ident,
                TokenKind::ColonColon,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_js_bitwise_chars_are_unknown() {
        assert_eq!(
            kinds("a ~ b", Lang::Js),
            vec![
                TokenKind::Ident,
                TokenKind::Unknown,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            kinds("x // trailing\ny", Lang::Js),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_multiline_block_comment() {
        let tokens = tokenize_js("a /* first\nsecond\nthird */ b");
        assert_eq!(tokens[0].lexeme, "a");
        assert_eq!(tokens[1].lexeme, "b");
        assert_eq!(tokens[1].span.line, 3);
    }

    #[test]
    fn test_keyword_classification_per_language() {
        assert_eq!(kinds("foreach", Lang::Js)[0], TokenKind::Ident);
        assert_eq!(kinds("foreach", Lang::Cs)[0], TokenKind::Foreach);
        assert_eq!(kinds("function", Lang::Cs)[0], TokenKind::Function);
    }

    #[test]
    fn test_dollar_identifier() {
        let tokens = tokenize_js("$elem");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lexeme, "$elem");
        // C# has no $ identifiers.
        assert_eq!(tokenize_cs("$elem")[0].kind, TokenKind::Unknown);
    }

    #[test]
    fn test_numeric_suffixes() {
        let tokens = tokenize_cs("1.5f 10l 3.0d 2m");
        assert_eq!(tokens[0].lexeme, "1.5f");
        assert_eq!(tokens[1].lexeme, "10l");
        assert_eq!(tokens[2].lexeme, "3.0d");
        assert_eq!(tokens[3].lexeme, "2m");
        // JavaScript keeps the suffix out of the number.
        let js = tokenize_js("1.5f");
        assert_eq!(js[0].lexeme, "1.5");
        assert_eq!(js[1].lexeme, "f");
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let tokens = tokenize_js(r#""a\"b""#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme, r#""a\"b""#);
    }

    #[test]
    fn test_template_string_spans_lines() {
        let tokens = tokenize_js("`one\ntwo` x");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert!(tokens[0].lexeme.contains('\n'));
        assert_eq!(tokens[1].lexeme, "x");
    }

    #[test]
    fn test_verbatim_string() {
        let tokens = tokenize_cs(r#"@"c:\temp\\" x"#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme, r#"@"c:\temp\\""#);

        let doubled = tokenize_cs(r#"@"say ""hi"" now";"#);
        assert_eq!(doubled[0].kind, TokenKind::Str);
        assert_eq!(doubled[0].lexeme, r#"@"say ""hi"" now""#);
        assert_eq!(doubled[1].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_unknown_byte_is_tokenized_silently() {
        let tokens = tokenize_js("let # x");
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].lexeme, "#");
        assert_eq!(tokens[2].kind, TokenKind::Ident);
    }
}
