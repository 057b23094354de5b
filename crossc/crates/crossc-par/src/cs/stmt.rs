//! C# statement productions.

use crossc_lex::TokenKind;

use super::ast::*;
use super::CsParser;

impl<'a> CsParser<'a> {
    /// Next statement to dispatch, by first token.
    pub(crate) fn parse_stmt(&mut self) -> Option<CsStmt> {
        match self.cursor.peek().kind {
            TokenKind::Var => self.parse_var_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Do => self.parse_do_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Foreach => self.parse_foreach_stmt(),
            TokenKind::Switch => self.parse_switch_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Throw => self.parse_throw_stmt(),
            TokenKind::Break => self.parse_jump_stmt(TokenKind::Break),
            TokenKind::Continue => self.parse_jump_stmt(TokenKind::Continue),
            TokenKind::Try => self.parse_try_stmt(),
            TokenKind::LBrace => {
                let block = self.parse_stmt_block()?;
                Some(CsStmt::Block(block))
            }
            _ => self.parse_expr_stmt(),
        }
    }

    /// `var name = init;`
    pub(crate) fn parse_var_stmt(&mut self) -> Option<CsStmt> {
        let decl = self.parse_var_decl()?;
        self.consume(
            TokenKind::Semicolon,
            "expected ';' after variable declaration",
        )?;
        Some(CsStmt::Var(decl))
    }

    /// The declaration itself, without the terminator. Shared with the
    /// classic `for` initializer.
    pub(crate) fn parse_var_decl(&mut self) -> Option<VarStmt> {
        let line = self.line();
        self.cursor.bump(); // var

        let name = self
            .consume(TokenKind::Ident, "expected variable name")?
            .lexeme;
        let init = if self.cursor.eat(TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Some(self.node(VarStmt { name, init, line }))
    }

    /// `if (test) stmt else stmt`
    fn parse_if_stmt(&mut self) -> Option<CsStmt> {
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

        Some(CsStmt::If(self.node(IfStmt {
            test,
            consequent,
            alternate,
            line,
        })))
    }

    /// `while (test) stmt`
    fn parse_while_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // while

        self.consume(TokenKind::LParen, "expected '(' after 'while'")?;
        let test = self.parse_expr()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;
        let body = Box::new(self.parse_stmt()?);

        Some(CsStmt::While(self.node(WhileStmt { test, body, line })))
    }

    /// `do stmt while (test);`
    fn parse_do_while_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // do

        let body = Box::new(self.parse_stmt()?);
        self.consume(TokenKind::While, "expected 'while' after do body")?;
        self.consume(TokenKind::LParen, "expected '(' after 'while'")?;
        let test = self.parse_expr()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;
        self.consume(TokenKind::Semicolon, "expected ';' after do-while")?;

        Some(CsStmt::DoWhile(self.node(DoWhileStmt { body, test, line })))
    }

    /// Classic `for (init; test; update) stmt`.
    fn parse_for_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // for
        self.consume(TokenKind::LParen, "expected '(' after 'for'")?;

        let init = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else if self.cursor.check(TokenKind::Var) {
            Some(ForInit::Var(self.parse_var_decl()?))
        } else {
            Some(ForInit::Expr(self.parse_expr()?))
        };
        self.consume(TokenKind::Semicolon, "expected ';' after 'for' initializer")?;

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
        Some(CsStmt::For(self.node(ForStmt {
            init,
            test,
            update,
            body,
            line,
        })))
    }

    /// `foreach (Type binding in iterable) stmt`
    fn parse_foreach_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // foreach
        self.consume(TokenKind::LParen, "expected '(' after 'foreach'")?;

        let ty = if self.cursor.check(TokenKind::Var) {
            self.cursor.bump();
            None
        } else {
            Some(self.parse_type()?)
        };

        let binding = self
            .consume(TokenKind::Ident, "expected loop variable name")?
            .lexeme;
        self.consume(TokenKind::In, "expected 'in' in foreach header")?;
        let iterable = self.parse_expr()?;
        self.consume(TokenKind::RParen, "expected ')' after foreach header")?;

        let body = Box::new(self.parse_stmt()?);
        Some(CsStmt::Foreach(self.node(ForeachStmt {
            ty,
            binding,
            iterable,
            body,
            line,
        })))
    }

    /// `switch (expr) { case ...: ... default: ... }`
    fn parse_switch_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // switch

        self.consume(TokenKind::LParen, "expected '(' after 'switch'")?;
        let discriminant = self.parse_expr()?;
        self.consume(TokenKind::RParen, "expected ')' after switch value")?;
        self.consume(TokenKind::LBrace, "expected '{' before switch body")?;

        let mut cases = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            let case_line = self.line();
            let test = match self.cursor.peek().kind {
                TokenKind::Case => {
                    self.cursor.bump();
                    let expr = self.parse_expr()?;
                    Some(expr)
                }
                TokenKind::Default => {
                    self.cursor.bump();
                    None
                }
                _ => {
                    self.error_here("expected 'case' or 'default'");
                    return None;
                }
            };
            self.consume(TokenKind::Colon, "expected ':' after case label")?;

            let mut body = Vec::new();
            while !matches!(
                self.cursor.peek().kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                let before = self.cursor.position();
                match self.parse_stmt() {
                    Some(stmt) => body.push(stmt),
                    None => self.recover(before),
                }
            }

            cases.push(self.node(SwitchCase {
                test,
                body,
                line: case_line,
            }));
        }

        self.consume(TokenKind::RBrace, "expected '}' after switch body")?;
        Some(CsStmt::Switch(self.node(SwitchStmt {
            discriminant,
            cases,
            line,
        })))
    }

    /// `return expr?;`
    fn parse_return_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // return

        let argument = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume(TokenKind::Semicolon, "expected ';' after return statement")?;

        Some(CsStmt::Return(self.node(ReturnStmt { argument, line })))
    }

    /// `throw expr;`
    fn parse_throw_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // throw

        let argument = self.parse_expr()?;
        self.consume(TokenKind::Semicolon, "expected ';' after throw statement")?;

        Some(CsStmt::Throw(self.node(ThrowStmt { argument, line })))
    }

    /// `break;` or `continue;`
    fn parse_jump_stmt(&mut self, kind: TokenKind) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump();
        self.consume(TokenKind::Semicolon, "expected ';' after jump statement")?;

        let stmt = self.node(JumpStmt { line });
        Some(match kind {
            TokenKind::Break => CsStmt::Break(stmt),
            _ => CsStmt::Continue(stmt),
        })
    }

    /// `try { } catch (Type e) { } finally { }`
    fn parse_try_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        self.cursor.bump(); // try

        let block = self.parse_stmt_block()?;

        let handler = if self.cursor.check(TokenKind::Catch) {
            let catch_line = self.line();
            self.cursor.bump();

            let (ty, param) = if self.cursor.eat(TokenKind::LParen) {
                let ty = self.parse_type()?;
                let param = if self.cursor.check(TokenKind::Ident) {
                    Some(self.cursor.bump().lexeme)
                } else {
                    None
                };
                self.consume(TokenKind::RParen, "expected ')' after catch filter")?;
                (Some(ty), param)
            } else {
                (None, None)
            };

            let body = self.parse_stmt_block()?;
            Some(self.node(CatchClause {
                ty,
                param,
                body,
                line: catch_line,
            }))
        } else {
            None
        };

        let finalizer = if self.cursor.eat(TokenKind::Finally) {
            Some(self.parse_stmt_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            self.error_here("expected 'catch' or 'finally' after try block");
            return None;
        }

        Some(CsStmt::Try(self.node(TryStmt {
            block,
            handler,
            finalizer,
            line,
        })))
    }

    /// Expression statement, terminated by `;`.
    fn parse_expr_stmt(&mut self) -> Option<CsStmt> {
        let line = self.line();
        let expr = self.parse_expr()?;
        self.consume(TokenKind::Semicolon, "expected ';' after expression")?;
        Some(CsStmt::Expr(self.node(ExprStmt { expr, line })))
    }
}
