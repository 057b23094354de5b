//! JavaScript statement productions.

use crossc_lex::TokenKind;
use crossc_util::DiagnosticKind;

use super::ast::*;
use super::JsParser;

impl<'a> JsParser<'a> {
    /// Variable declaration statement, terminated by `;`.
    pub(crate) fn parse_var_stmt(&mut self) -> Option<JsStmt> {
        let decl = self.parse_var_decl()?;
        self.check_const_initializers(&decl);
        self.consume(
            TokenKind::Semicolon,
            "expected ';' after variable declaration",
        )?;
        Some(JsStmt::Var(decl))
    }

    /// A `const` declarator must be initialized. Not checked for the
    /// `for..of` header, where the binding is initialized by the loop.
    fn check_const_initializers(&mut self, decl: &VarDecl) {
        if decl.kind != VarKind::Const {
            return;
        }
        for declarator in &decl.declarations {
            if declarator.init.is_none() {
                self.handler.error(
                    DiagnosticKind::Semantic,
                    format!(
                        "const declaration of '{}' requires an initializer",
                        declarator.name
                    ),
                    declarator.line,
                    1,
                );
            }
        }
    }

    /// The declaration itself, without the terminator. Shared with the
    /// classic `for` initializer and the `for..of` header.
    pub(crate) fn parse_var_decl(&mut self) -> Option<VarDecl> {
        let line = self.line();
        let kind = match self.cursor.bump().kind {
            TokenKind::Var => VarKind::Var,
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => unreachable!("caller checked the declaration keyword"),
        };

        let mut declarations = Vec::new();
        loop {
            let decl_line = self.line();
            let name = self
                .consume(TokenKind::Ident, "expected variable name")?
                .lexeme;

            let init = if self.cursor.eat(TokenKind::Eq) {
                Some(self.parse_assign_expr()?)
            } else {
                None
            };

            declarations.push(self.node(VarDeclarator {
                name,
                init,
                line: decl_line,
            }));

            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }

        Some(self.node(VarDecl {
            kind,
            declarations,
            line,
        }))
    }

    /// `function name(params) { body }`
    pub(crate) fn parse_function_decl(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // function

        let name = self
            .consume(TokenKind::Ident, "expected function name")?
            .lexeme;
        let params = self.parse_param_names()?;
        let body = self.parse_block()?;

        Some(JsStmt::Function(self.node(FnDecl {
            name,
            params,
            body,
            line,
        })))
    }

    /// Parenthesized comma-separated identifier list.
    fn parse_param_names(&mut self) -> Option<Vec<String>> {
        self.consume(TokenKind::LParen, "expected '(' before parameter list")?;

        let mut params = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                let param = self
                    .consume(TokenKind::Ident, "expected parameter name")?
                    .lexeme;
                params.push(param);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen, "expected ')' after parameter list")?;
        Some(params)
    }

    /// `class Name { constructor(..) {..} method(..) {..} }`
    pub(crate) fn parse_class_decl(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // class

        let name = self.consume(TokenKind::Ident, "expected class name")?.lexeme;
        self.consume(TokenKind::LBrace, "expected '{' before class body")?;

        let mut members = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            let before = self.cursor.position();
            match self.parse_class_member() {
                Some(member) => members.push(member),
                None => self.recover(before),
            }
        }

        self.consume(TokenKind::RBrace, "expected '}' after class body")?;
        Some(JsStmt::Class(self.node(ClassDecl {
            name,
            members,
            line,
        })))
    }

    fn parse_class_member(&mut self) -> Option<ClassMember> {
        let line = self.line();
        let name = self
            .consume(TokenKind::Ident, "expected method name")?
            .lexeme;
        let params = self.parse_param_names()?;
        let body = self.parse_block()?;
        let is_constructor = name == "constructor";

        Some(self.node(ClassMember {
            name,
            params,
            body,
            is_constructor,
            line,
        }))
    }

    /// `if (test) stmt else stmt`
    pub(crate) fn parse_if_stmt(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // if

        self.consume(TokenKind::LParen, "expected '(' after 'if'")?;
        let test = self.parse_expr()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;

        let consequent = Box::new(self.parse_stmt()?);
        let alternate = if self.cursor.eat(TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Some(JsStmt::If(self.node(IfStmt {
            test,
            consequent,
            alternate,
            line,
        })))
    }

    /// `while (test) stmt`
    pub(crate) fn parse_while_stmt(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // while

        self.consume(TokenKind::LParen, "expected '(' after 'while'")?;
        let test = self.parse_expr()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;
        let body = Box::new(self.parse_stmt()?);

        Some(JsStmt::While(self.node(WhileStmt { test, body, line })))
    }

    /// Classic `for (init; test; update)` or `for (kind name of iterable)`.
    pub(crate) fn parse_for_stmt(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // for
        self.consume(TokenKind::LParen, "expected '(' after 'for'")?;

        // A declaration keyword may open either form; `of` decides.
        if matches!(
            self.cursor.peek().kind,
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ) {
            let decl = self.parse_var_decl()?;

            if self.cursor.eat(TokenKind::Of) {
                return self.parse_for_of_tail(decl, line);
            }

            self.check_const_initializers(&decl);
            self.consume(TokenKind::Semicolon, "expected ';' after 'for' initializer")?;
            return self.parse_for_tail(Some(ForInit::Decl(decl)), line);
        }

        let init = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(ForInit::Expr(self.parse_expr()?))
        };
        self.consume(TokenKind::Semicolon, "expected ';' after 'for' initializer")?;
        self.parse_for_tail(init, line)
    }

    fn parse_for_tail(&mut self, init: Option<ForInit>, line: u32) -> Option<JsStmt> {
        let test = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume(TokenKind::Semicolon, "expected ';' after 'for' condition")?;

        let update = if self.cursor.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume(TokenKind::RParen, "expected ')' after 'for' clauses")?;

        let body = Box::new(self.parse_stmt()?);
        Some(JsStmt::For(self.node(ForStmt {
            init,
            test,
            update,
            body,
            line,
        })))
    }

    /// The `of iterable ) body` tail; the declaration must be a single
    /// uninitialized binding.
    fn parse_for_of_tail(&mut self, decl: VarDecl, line: u32) -> Option<JsStmt> {
        if decl.declarations.len() != 1 || decl.declarations[0].init.is_some() {
            self.error_here("expected a single binding before 'of'");
            return None;
        }
        let binding = decl.declarations[0].name.clone();

        let iterable = self.parse_expr()?;
        self.consume(TokenKind::RParen, "expected ')' after 'for..of' iterable")?;
        let body = Box::new(self.parse_stmt()?);

        Some(JsStmt::ForOf(self.node(ForOfStmt {
            kind: decl.kind,
            binding,
            iterable,
            body,
            line,
        })))
    }

    /// `return expr? ;`
    pub(crate) fn parse_return_stmt(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // return

        let argument = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume(TokenKind::Semicolon, "expected ';' after return statement")?;

        Some(JsStmt::Return(self.node(ReturnStmt { argument, line })))
    }

    /// `break;` or `continue;`
    pub(crate) fn parse_jump_stmt(&mut self, kind: TokenKind) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump();
        self.consume(TokenKind::Semicolon, "expected ';' after jump statement")?;

        let stmt = self.node(JumpStmt { line });
        Some(match kind {
            TokenKind::Break => JsStmt::Break(stmt),
            _ => JsStmt::Continue(stmt),
        })
    }

    /// `throw expr;`
    pub(crate) fn parse_throw_stmt(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // throw

        let argument = self.parse_expr()?;
        self.consume(TokenKind::Semicolon, "expected ';' after throw statement")?;

        Some(JsStmt::Throw(self.node(ThrowStmt { argument, line })))
    }

    /// `try { } catch (e) { } finally { }`
    pub(crate) fn parse_try_stmt(&mut self) -> Option<JsStmt> {
        let line = self.line();
        self.cursor.bump(); // try

        let block = self.parse_block()?;

        let handler = if self.cursor.check(TokenKind::Catch) {
            let catch_line = self.line();
            self.cursor.bump();

            let param = if self.cursor.eat(TokenKind::LParen) {
                let name = self
                    .consume(TokenKind::Ident, "expected catch parameter name")?
                    .lexeme;
                self.consume(TokenKind::RParen, "expected ')' after catch parameter")?;
                Some(name)
            } else {
                None
            };

            let body = self.parse_block()?;
            Some(self.node(CatchClause {
                param,
                body,
                line: catch_line,
            }))
        } else {
            None
        };

        let finalizer = if self.cursor.eat(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            self.error_here("expected 'catch' or 'finally' after try block");
            return None;
        }

        Some(JsStmt::Try(self.node(TryStmt {
            block,
            handler,
            finalizer,
            line,
        })))
    }

    /// Expression statement, terminated by `;`.
    pub(crate) fn parse_expr_stmt(&mut self) -> Option<JsStmt> {
        let line = self.line();
        let expr = self.parse_expr()?;
        self.consume(TokenKind::Semicolon, "expected ';' after expression")?;
        Some(JsStmt::Expr(self.node(ExprStmt { expr, line })))
    }
}
