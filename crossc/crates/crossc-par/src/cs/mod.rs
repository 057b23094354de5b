//! C# parser.
//!
//! Declarations (compilation unit, namespaces, type declarations, members)
//! live in `items`, statements in `stmt`, expressions in `expr`. This module
//! owns the parser state and the shared helpers.

pub mod ast;
mod expr;
mod items;
mod stmt;

use std::time::Instant;

use crossc_lex::{Token, TokenKind};
use crossc_util::{DiagnosticKind, Handler, Metrics};

use crate::stream::TokenCursor;
use ast::CompilationUnit;

/// Token kinds that may begin a C# statement or declaration; panic-mode
/// recovery stops (without consuming) when it reaches one of these.
const STMT_FIRST: &[TokenKind] = &[
    TokenKind::Var,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Do,
    TokenKind::For,
    TokenKind::Foreach,
    TokenKind::Switch,
    TokenKind::Return,
    TokenKind::Throw,
    TokenKind::Break,
    TokenKind::Continue,
    TokenKind::Try,
    TokenKind::LBrace,
    TokenKind::Using,
    TokenKind::Namespace,
    TokenKind::Class,
    TokenKind::Struct,
    TokenKind::Interface,
    TokenKind::Enum,
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Protected,
    TokenKind::Internal,
    TokenKind::Static,
];

/// Declaration modifiers, in the order the parser accepts them.
const MODIFIERS: &[TokenKind] = &[
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Protected,
    TokenKind::Internal,
    TokenKind::Static,
    TokenKind::Readonly,
    TokenKind::Const,
    TokenKind::Virtual,
    TokenKind::Override,
    TokenKind::Abstract,
    TokenKind::Sealed,
    TokenKind::Partial,
    TokenKind::Async,
];

/// Recursive-descent parser for the C# side.
pub struct CsParser<'a> {
    pub(crate) cursor: TokenCursor,
    pub(crate) handler: &'a Handler,
    pub(crate) metrics: &'a mut Metrics,
}

/// Parse a C# token stream into a compilation unit.
///
/// Always returns a root node; diagnostics and recovery counts land in the
/// handler and metrics sink.
pub fn parse_cs(tokens: Vec<Token>, handler: &Handler, metrics: &mut Metrics) -> CompilationUnit {
    CsParser::new(tokens, handler, metrics).parse()
}

impl<'a> CsParser<'a> {
    /// Create a parser over a token stream.
    pub fn new(tokens: Vec<Token>, handler: &'a Handler, metrics: &'a mut Metrics) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            handler,
            metrics,
        }
    }

    /// Parse the whole stream into a compilation unit node.
    pub fn parse(mut self) -> CompilationUnit {
        let started = Instant::now();
        self.metrics.tokens_processed = self.cursor.non_eof_len();

        let mut usings = Vec::new();
        while self.cursor.check(TokenKind::Using) {
            let before = self.cursor.position();
            match self.parse_using_directive() {
                Some(using) => usings.push(using),
                None => self.recover(before),
            }
        }

        let mut members = Vec::new();
        while !self.cursor.at_end() {
            let before = self.cursor.position();
            match self.parse_member() {
                Some(member) => members.push(member),
                None => self.recover(before),
            }
        }

        let unit = self.node(CompilationUnit {
            usings,
            members,
            line: 1,
        });
        self.metrics.parsing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        unit
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

    /// True if the current token is a declaration modifier.
    pub(crate) fn at_modifier(&self) -> bool {
        MODIFIERS.contains(&self.cursor.peek().kind)
    }

    /// Consume the run of declaration modifiers, keeping their lexemes.
    pub(crate) fn parse_modifiers(&mut self) -> Vec<String> {
        let mut modifiers = Vec::new();
        while self.at_modifier() {
            modifiers.push(self.cursor.bump().lexeme);
        }
        modifiers
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
    pub(crate) fn parse_stmt_block(&mut self) -> Option<ast::Block> {
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
            self.synchronize();
        }

        Some(self.node(ast::Block { body, line }))
    }
}

#[cfg(test)]
mod tests {
    use super::ast::*;
    use super::*;
    use crossc_lex::tokenize_cs;

    fn parse_clean(source: &str) -> (CompilationUnit, Metrics) {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let unit = parse_cs(tokenize_cs(source), &handler, &mut metrics);
        assert!(
            !handler.has_errors(),
            "unexpected errors for {source:?}: {:?}",
            handler.diagnostics()
        );
        (unit, metrics)
    }

    fn only_class(unit: &CompilationUnit) -> &ClassDecl {
        for member in &unit.members {
            if let CsMember::Class(class) = member {
                return class;
            }
        }
        panic!("no class in {unit:?}");
    }

    #[test]
    fn test_global_statement_call_shape() {
        let (unit, _) = parse_clean("Console.WriteLine(\"Hi\");");
        let CsMember::GlobalStmt(CsStmt::Expr(stmt)) = &unit.members[0] else {
            panic!("expected global expression statement");
        };
        let CsExpr::Call(call) = &stmt.expr else {
            panic!("expected call");
        };
        let CsExpr::Member(member) = &call.callee else {
            panic!("expected member callee");
        };
        assert_eq!(member.property, "WriteLine");
        assert!(
            matches!(&member.object, CsExpr::Ident(id) if id.name == "Console")
        );
    }

    #[test]
    fn test_using_directives_then_class() {
        let (unit, _) = parse_clean(
            "using System;\nusing System.Collections.Generic;\n\npublic class Program { }",
        );
        assert_eq!(unit.usings.len(), 2);
        assert_eq!(unit.usings[1].name.dotted(), "System.Collections.Generic");
        let class = only_class(&unit);
        assert_eq!(class.name, "Program");
        assert_eq!(class.modifiers, vec!["public"]);
    }

    #[test]
    fn test_method_and_constructor_dispatch() {
        let (unit, _) = parse_clean(
            "public class Point {\n\
             public Point(int x) { }\n\
             public int Norm() { return 0; }\n\
             Helper MakeHelper() { return null; }\n\
             }",
        );
        let class = only_class(&unit);
        assert!(matches!(class.members[0], Member::Constructor(_)));
        assert!(matches!(class.members[1], Member::Method(_)));
        // Identifier-typed return: still a method, not a constructor.
        let Member::Method(method) = &class.members[2] else {
            panic!("expected method");
        };
        assert_eq!(method.return_type.name.dotted(), "Helper");
        assert_eq!(method.name, "MakeHelper");
    }

    #[test]
    fn test_property_and_event() {
        let (unit, _) = parse_clean(
            "public class Person {\n\
             public string Name { get; set; }\n\
             public int Age { get { return 0; } }\n\
             public event EventHandler Changed;\n\
             }",
        );
        let class = only_class(&unit);
        let Member::Property(name_prop) = &class.members[0] else {
            panic!("expected property");
        };
        assert!(name_prop.getter.is_some());
        assert!(name_prop.setter.is_some());
        assert!(name_prop.getter.as_ref().unwrap().body.is_none());

        let Member::Property(age_prop) = &class.members[1] else {
            panic!("expected property");
        };
        assert!(age_prop.getter.as_ref().unwrap().body.is_some());
        assert!(age_prop.setter.is_none());

        assert!(matches!(class.members[2], Member::Event(_)));
    }

    #[test]
    fn test_generics_bases_and_where() {
        let (unit, _) = parse_clean(
            "public class Repo<T, U> : Base, IStore where T : IEntity {\n\
             Dictionary<string, List<int>> Index() { return null; }\n\
             }",
        );
        let class = only_class(&unit);
        assert_eq!(class.type_params.len(), 2);
        assert_eq!(class.bases.len(), 2);
        assert_eq!(class.constraints[0].param, "T");

        let Member::Method(method) = &class.members[0] else {
            panic!("expected method");
        };
        // Nested generic closed by a single `>>` token.
        assert_eq!(method.return_type.name.dotted(), "Dictionary");
        assert_eq!(method.return_type.args.len(), 2);
        assert_eq!(method.return_type.args[1].name.dotted(), "List");
    }

    #[test]
    fn test_namespace_nesting() {
        let (unit, _) = parse_clean("namespace App.Models { public class User { } }");
        let CsMember::Namespace(ns) = &unit.members[0] else {
            panic!("expected namespace");
        };
        assert_eq!(ns.name.dotted(), "App.Models");
        assert!(matches!(ns.members[0], CsMember::Class(_)));
    }

    #[test]
    fn test_struct_interface_enum() {
        let (unit, _) = parse_clean(
            "public struct Vec { }\n\
             public interface IShape { int Area(); string Label { get; } }\n\
             public enum Color { Red, Green = 2, Blue }",
        );
        assert!(matches!(unit.members[0], CsMember::Struct(_)));

        let CsMember::Interface(iface) = &unit.members[1] else {
            panic!("expected interface");
        };
        let Member::Method(method) = &iface.members[0] else {
            panic!("expected method");
        };
        assert!(method.body.is_none());

        let CsMember::Enum(color) = &unit.members[2] else {
            panic!("expected enum");
        };
        assert_eq!(color.members.len(), 3);
        assert!(color.members[1].value.is_some());
    }

    #[test]
    fn test_statement_forms() {
        let (unit, _) = parse_clean(
            "var total = 0;\n\
             for (var i = 0; i < 10; i++) { total += i; }\n\
             foreach (string name in names) { Console.WriteLine(name); }\n\
             do { total--; } while (total > 0);\n\
             switch (total) { case 0: break; default: total = 1; break; }",
        );
        assert!(matches!(
            unit.members[0],
            CsMember::GlobalStmt(CsStmt::Var(_))
        ));
        assert!(matches!(
            unit.members[1],
            CsMember::GlobalStmt(CsStmt::For(_))
        ));
        let CsMember::GlobalStmt(CsStmt::Foreach(foreach)) = &unit.members[2] else {
            panic!("expected foreach");
        };
        assert_eq!(foreach.binding, "name");
        assert_eq!(
            foreach.ty.as_ref().unwrap().name.dotted(),
            "string"
        );
        assert!(matches!(
            unit.members[3],
            CsMember::GlobalStmt(CsStmt::DoWhile(_))
        ));
        let CsMember::GlobalStmt(CsStmt::Switch(switch)) = &unit.members[4] else {
            panic!("expected switch");
        };
        assert_eq!(switch.cases.len(), 2);
        assert!(switch.cases[1].test.is_none());
    }

    #[test]
    fn test_conditional_and_coalescing() {
        let (unit, _) = parse_clean("var r = flag ? a ?? b : c;");
        let CsMember::GlobalStmt(CsStmt::Var(decl)) = &unit.members[0] else {
            panic!("expected var");
        };
        let CsExpr::Cond(cond) = decl.init.as_ref().unwrap() else {
            panic!("expected conditional");
        };
        let CsExpr::Binary(coalesce) = &cond.consequent else {
            panic!("expected coalescing");
        };
        assert_eq!(coalesce.op, "??");
    }

    #[test]
    fn test_bitwise_and_shift_layers() {
        // Or(a, And(b, Shl(c, 1))) for a | b & c << 1
        let (unit, _) = parse_clean("var x = a | b & c << 1;");
        let CsMember::GlobalStmt(CsStmt::Var(decl)) = &unit.members[0] else {
            panic!("expected var");
        };
        let CsExpr::Binary(or) = decl.init.as_ref().unwrap() else {
            panic!("expected binary");
        };
        assert_eq!(or.op, "|");
        let CsExpr::Binary(and) = &or.right else {
            panic!("expected binary");
        };
        assert_eq!(and.op, "&");
        let CsExpr::Binary(shift) = &and.right else {
            panic!("expected binary");
        };
        assert_eq!(shift.op, "<<");
    }

    #[test]
    fn test_numeric_suffix_preserved() {
        let (unit, _) = parse_clean("var price = 10.5m;");
        let CsMember::GlobalStmt(CsStmt::Var(decl)) = &unit.members[0] else {
            panic!("expected var");
        };
        assert!(matches!(
            decl.init.as_ref().unwrap(),
            CsExpr::Literal(LiteralExpr {
                value: LitValue::Num(n),
                ..
            }) if n == "10.5m"
        ));
    }

    #[test]
    fn test_try_catch_typed() {
        let (unit, _) = parse_clean(
            "try { Risky(); } catch (Exception e) { Console.WriteLine(e); } finally { Done(); }",
        );
        let CsMember::GlobalStmt(CsStmt::Try(stmt)) = &unit.members[0] else {
            panic!("expected try");
        };
        let handler = stmt.handler.as_ref().unwrap();
        assert_eq!(handler.ty.as_ref().unwrap().name.dotted(), "Exception");
        assert_eq!(handler.param.as_deref(), Some("e"));
        assert!(stmt.finalizer.is_some());
    }

    #[test]
    fn test_recovery_in_type_body() {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let unit = parse_cs(
            tokenize_cs("public class A { int x = ; public int Ok() { return 1; } }"),
            &handler,
            &mut metrics,
        );
        assert!(handler.has_errors());
        assert!(metrics.error_recovery_count >= 1);
        // The well-formed method after the bad member is still there.
        let class = only_class(&unit);
        assert!(class
            .members
            .iter()
            .any(|m| matches!(m, Member::Method(method) if method.name == "Ok")));
    }
}
