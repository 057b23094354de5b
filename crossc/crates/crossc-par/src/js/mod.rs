//! JavaScript parser.
//!
//! Statement and expression productions live in the `stmt` and `expr`
//! submodules; this module owns the parser state, the shared helpers and the
//! panic-mode recovery loop.

pub mod ast;
mod expr;
mod stmt;

use std::time::Instant;

use crossc_lex::{TokenKind, Token};
use crossc_util::{DiagnosticKind, Handler, Metrics};

use crate::stream::TokenCursor;
use ast::{JsProgram, JsStmt};

/// Token kinds that may begin a JavaScript statement; panic-mode recovery
/// stops (without consuming) when it reaches one of these.
const STMT_FIRST: &[TokenKind] = &[
    TokenKind::Var,
    TokenKind::Let,
    TokenKind::Const,
    TokenKind::Function,
    TokenKind::Class,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Return,
    TokenKind::Break,
    TokenKind::Continue,
    TokenKind::Throw,
    TokenKind::Try,
    TokenKind::LBrace,
];

/// Recursive-descent parser for the JavaScript side.
pub struct JsParser<'a> {
    pub(crate) cursor: TokenCursor,
    pub(crate) handler: &'a Handler,
    pub(crate) metrics: &'a mut Metrics,
}

/// Parse a JavaScript token stream into a program.
///
/// Always returns a root node; everything that went wrong on the way is in
/// the handler and the recovery counter. Timing and token counts are written
/// into `metrics`.
pub fn parse_js(tokens: Vec<Token>, handler: &Handler, metrics: &mut Metrics) -> JsProgram {
    JsParser::new(tokens, handler, metrics).parse()
}

impl<'a> JsParser<'a> {
    /// Create a parser over a token stream.
    pub fn new(tokens: Vec<Token>, handler: &'a Handler, metrics: &'a mut Metrics) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            handler,
            metrics,
        }
    }

    /// Parse the whole stream into a program node.
    pub fn parse(mut self) -> JsProgram {
        let started = Instant::now();
        self.metrics.tokens_processed = self.cursor.non_eof_len();

        let mut body = Vec::new();
        while !self.cursor.at_end() {
            let before = self.cursor.position();
            match self.parse_stmt() {
                Some(stmt) => body.push(stmt),
                None => self.recover(before),
            }
        }

        let program = self.node(JsProgram { body, line: 1 });
        self.metrics.parsing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        program
    }

    // =========================================================================
    // SHARED HELPERS
    // =========================================================================

    /// Count a constructed node and pass it through.
    #[inline]
    pub(crate) fn node<T>(&mut self, value: T) -> T {
        self.metrics.record_node();
        value
    }

    /// Line of the current token.
    #[inline]
    pub(crate) fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Expect and consume a token kind, or record a parse diagnostic.
    pub(crate) fn consume(&mut self, kind: TokenKind, msg: &str) -> Option<Token> {
        if self.cursor.check(kind) {
            Some(self.cursor.bump())
        } else {
            self.error_here(msg);
            None
        }
    }

    /// Record a parse error at the current token.
    pub(crate) fn error_here(&mut self, msg: &str) {
        let token = self.cursor.peek();
        let detail = if token.is(TokenKind::Eof) {
            format!("{msg}, found end of input")
        } else {
            format!("{msg}, found '{}'", token.lexeme)
        };
        self.handler.error(
            DiagnosticKind::RdpParsing,
            detail,
            token.line(),
            token.column(),
        );
    }

    /// Surface an unknown byte the lexer tokenized silently.
    pub(crate) fn error_unknown(&mut self) {
        let token = self.cursor.peek();
        self.handler.error(
            DiagnosticKind::Syntax,
            format!("unexpected character '{}'", token.lexeme),
            token.line(),
            token.column(),
        );
    }

    /// Panic-mode recovery: skip tokens until a `;` (consumed), a
    /// statement-first token (not consumed) or EOF.
    pub(crate) fn synchronize(&mut self) {
        self.metrics.record_recovery();

        while !self.cursor.at_end() {
            if self.cursor.check(TokenKind::Semicolon) {
                self.cursor.bump();
                return;
            }
            if STMT_FIRST.contains(&self.cursor.peek().kind) {
                return;
            }
            self.cursor.bump();
        }
    }

    /// Recover after a failed production. `before` is the cursor position
    /// at which the production was attempted; if neither the production nor
    /// synchronization consumed anything, one token is forced out so list
    /// loops always make progress.
    pub(crate) fn recover(&mut self, before: usize) {
        self.synchronize();
        if self.cursor.position() == before && !self.cursor.at_end() {
            self.cursor.bump();
        }
    }

    /// Parse a brace-delimited statement list with per-statement recovery.
    pub(crate) fn parse_block(&mut self) -> Option<ast::Block> {
        let line = self.line();
        self.consume(TokenKind::LBrace, "expected '{'")?;

        let mut body = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            let before = self.cursor.position();
            match self.parse_stmt() {
                Some(stmt) => body.push(stmt),
                None => self.recover(before),
            }
        }

        if self.consume(TokenKind::RBrace, "expected '}'").is_none() {
            // Unmatched brace at EOF: one diagnostic, recovery runs out the
            // stream, and the partial block is kept.
            self.synchronize();
        }

        Some(self.node(ast::Block { body, line }))
    }

    /// Next statement to dispatch, by first token.
    pub(crate) fn parse_stmt(&mut self) -> Option<JsStmt> {
        match self.cursor.peek().kind {
            TokenKind::Var | TokenKind::Let | TokenKind::Const => self.parse_var_stmt(),
            TokenKind::Function => self.parse_function_decl(),
            TokenKind::Class => self.parse_class_decl(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Break => self.parse_jump_stmt(TokenKind::Break),
            TokenKind::Continue => self.parse_jump_stmt(TokenKind::Continue),
            TokenKind::Throw => self.parse_throw_stmt(),
            TokenKind::Try => self.parse_try_stmt(),
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                Some(JsStmt::Block(block))
            }
            _ => self.parse_expr_stmt(),
        }
    }
}
