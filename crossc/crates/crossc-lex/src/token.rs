//! Token definitions shared by both lexers.
//!
//! A [`Token`] is an immutable record of one lexical unit: its [`TokenKind`],
//! the matched text (lexeme), and its [`Span`]. String lexemes retain their
//! surrounding quote characters and escape sequences verbatim; C# numeric
//! lexemes retain their type suffix. Keeping the raw text means the emitter
//! can reproduce literals byte-for-byte.

use crossc_util::{FxHashMap, Span};
use once_cell::sync::Lazy;

/// Lexical category of a token.
///
/// The enum is the union of both languages' vocabularies; each lexer only
/// produces the kinds its keyword and operator tables contain. Primitive C#
/// type keywords carry a `Ty` suffix to keep them apart from the literal
/// kinds (`int` the keyword vs. a number literal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // LITERALS AND SPECIALS
    // =========================================================================
    /// Identifier (variable, function, type or member name).
    Ident,
    /// Numeric literal; the lexeme keeps the literal form including any
    /// C# suffix (`1.5f`, `10l`).
    Number,
    /// String literal; the lexeme keeps the surrounding quotes.
    Str,
    /// An unrecognized byte. The lexer stays silent and lets the parser
    /// surface it as a syntax error on first use.
    Unknown,
    /// End-of-file marker terminating every stream.
    Eof,

    // =========================================================================
    // SHARED KEYWORDS
    // =========================================================================
    Var,
    Let,
    Const,
    Function,
    Class,
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    Try,
    Catch,
    Finally,
    Throw,
    New,
    This,
    Super,
    Import,
    Export,
    Default,
    Async,
    Await,
    True,
    False,
    Null,
    Undefined,
    Typeof,
    Instanceof,
    In,
    Of,

    // =========================================================================
    // C#-ONLY KEYWORDS
    // =========================================================================
    Using,
    Namespace,
    Struct,
    Interface,
    Enum,
    Delegate,
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Readonly,
    Virtual,
    Override,
    Abstract,
    Sealed,
    Partial,
    Foreach,
    Do,
    Switch,
    Case,
    Base,
    Void,
    Out,
    Ref,
    Params,
    Where,
    Select,
    From,
    Group,
    Orderby,
    Get,
    Set,
    Add,
    Remove,
    Event,
    Operator,
    Implicit,
    Explicit,
    IntTy,
    StringTy,
    BoolTy,
    DoubleTy,
    FloatTy,
    DecimalTy,
    CharTy,
    ByteTy,
    ShortTy,
    LongTy,
    UintTy,
    UshortTy,
    UlongTy,
    SbyteTy,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Question,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// `=`
    Eq,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `&=`
    AmpEq,
    /// `|=`
    PipeEq,
    /// `^=`
    CaretEq,
    /// `<<=`
    ShlEq,
    /// `>>=`
    ShrEq,
    /// `??=`
    QuestionQuestionEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `===`
    EqEqEq,
    /// `!==`
    NotEqEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Not,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `??`
    QuestionQuestion,
    /// `=>`
    Arrow,
    /// `::`
    ColonColon,
}

/// The two languages the converter understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    /// JavaScript (dynamically typed side).
    Js,
    /// C# (statically typed side).
    Cs,
}

impl Lang {
    /// Short lowercase tag, as used in CLI flags and file extensions.
    pub fn tag(&self) -> &'static str {
        match self {
            Lang::Js => "js",
            Lang::Cs => "cs",
        }
    }
}

/// One lexical unit with its matched text and source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// The matched source text.
    pub lexeme: String,
    /// Source position of the first byte.
    pub span: Span,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Create the EOF token at the given line.
    pub fn eof(line: u32) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            span: Span::point(line, 1),
        }
    }

    /// True if this token has the given kind.
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Line of the token (1-based).
    #[inline]
    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Column of the token (1-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.span.column
    }
}

/// Keywords shared by both languages, as declared for JavaScript.
const SHARED_KEYWORDS: &[(&str, TokenKind)] = &[
    ("var", TokenKind::Var),
    ("let", TokenKind::Let),
    ("const", TokenKind::Const),
    ("function", TokenKind::Function),
    ("class", TokenKind::Class),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("return", TokenKind::Return),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("try", TokenKind::Try),
    ("catch", TokenKind::Catch),
    ("finally", TokenKind::Finally),
    ("throw", TokenKind::Throw),
    ("new", TokenKind::New),
    ("this", TokenKind::This),
    ("super", TokenKind::Super),
    ("import", TokenKind::Import),
    ("export", TokenKind::Export),
    ("default", TokenKind::Default),
    ("async", TokenKind::Async),
    ("await", TokenKind::Await),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
    ("undefined", TokenKind::Undefined),
    ("typeof", TokenKind::Typeof),
    ("instanceof", TokenKind::Instanceof),
    ("in", TokenKind::In),
    ("of", TokenKind::Of),
];

/// Keywords recognized only by the C# lexer.
const CS_KEYWORDS: &[(&str, TokenKind)] = &[
    ("using", TokenKind::Using),
    ("namespace", TokenKind::Namespace),
    ("struct", TokenKind::Struct),
    ("interface", TokenKind::Interface),
    ("enum", TokenKind::Enum),
    ("delegate", TokenKind::Delegate),
    ("public", TokenKind::Public),
    ("private", TokenKind::Private),
    ("protected", TokenKind::Protected),
    ("internal", TokenKind::Internal),
    ("static", TokenKind::Static),
    ("readonly", TokenKind::Readonly),
    ("virtual", TokenKind::Virtual),
    ("override", TokenKind::Override),
    ("abstract", TokenKind::Abstract),
    ("sealed", TokenKind::Sealed),
    ("partial", TokenKind::Partial),
    ("foreach", TokenKind::Foreach),
    ("do", TokenKind::Do),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("base", TokenKind::Base),
    ("void", TokenKind::Void),
    ("out", TokenKind::Out),
    ("ref", TokenKind::Ref),
    ("params", TokenKind::Params),
    ("where", TokenKind::Where),
    ("select", TokenKind::Select),
    ("from", TokenKind::From),
    ("group", TokenKind::Group),
    ("orderby", TokenKind::Orderby),
    ("get", TokenKind::Get),
    ("set", TokenKind::Set),
    ("add", TokenKind::Add),
    ("remove", TokenKind::Remove),
    ("event", TokenKind::Event),
    ("operator", TokenKind::Operator),
    ("implicit", TokenKind::Implicit),
    ("explicit", TokenKind::Explicit),
    ("int", TokenKind::IntTy),
    ("string", TokenKind::StringTy),
    ("bool", TokenKind::BoolTy),
    ("double", TokenKind::DoubleTy),
    ("float", TokenKind::FloatTy),
    ("decimal", TokenKind::DecimalTy),
    ("char", TokenKind::CharTy),
    ("byte", TokenKind::ByteTy),
    ("short", TokenKind::ShortTy),
    ("long", TokenKind::LongTy),
    ("uint", TokenKind::UintTy),
    ("ushort", TokenKind::UshortTy),
    ("ulong", TokenKind::UlongTy),
    ("sbyte", TokenKind::SbyteTy),
];

/// JavaScript keyword table.
pub static JS_KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> =
    Lazy::new(|| SHARED_KEYWORDS.iter().copied().collect());

/// C# keyword table: the shared set plus the C#-only set.
pub static CS_KEYWORDS_MAP: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    SHARED_KEYWORDS
        .iter()
        .chain(CS_KEYWORDS.iter())
        .copied()
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_keywords_subset_of_cs() {
        for (word, kind) in SHARED_KEYWORDS {
            assert_eq!(JS_KEYWORDS.get(word), Some(kind));
            assert_eq!(CS_KEYWORDS_MAP.get(word), Some(kind));
        }
    }

    #[test]
    fn test_cs_only_keywords_unknown_to_js() {
        assert!(JS_KEYWORDS.get("foreach").is_none());
        assert!(JS_KEYWORDS.get("namespace").is_none());
        assert_eq!(CS_KEYWORDS_MAP.get("foreach"), Some(&TokenKind::Foreach));
    }

    #[test]
    fn test_token_accessors() {
        let token = Token::new(TokenKind::Ident, "name", crossc_util::Span::new(0, 4, 2, 1));
        assert!(token.is(TokenKind::Ident));
        assert_eq!(token.line(), 2);
        assert_eq!(token.lexeme, "name");
    }

    #[test]
    fn test_eof_token() {
        let eof = Token::eof(7);
        assert!(eof.is(TokenKind::Eof));
        assert_eq!(eof.line(), 7);
        assert!(eof.lexeme.is_empty());
    }
}
