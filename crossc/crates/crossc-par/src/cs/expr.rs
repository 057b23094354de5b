//! C# expression productions.
//!
//! The statically-typed side carries the full precedence ladder: the
//! conditional operator sits above null-coalescing, which sits above the
//! logical, bitwise, equality, relational, shift, additive and
//! multiplicative layers. Strict equality does not exist here; `==`/`!=`
//! are the only equality operators.

use crossc_lex::TokenKind;

use super::ast::*;
use super::CsParser;
use crate::lit::decode_string_lexeme;

/// Binding power levels, lowest to highest. Left-associative operators
/// recurse with `level + 1`.
mod bp {
    pub const MIN: u8 = 0;
    pub const COALESCE: u8 = 2;
    pub const LOGICAL_OR: u8 = 4;
    pub const LOGICAL_AND: u8 = 6;
    pub const BITWISE_OR: u8 = 8;
    pub const BITWISE_XOR: u8 = 10;
    pub const BITWISE_AND: u8 = 12;
    pub const EQUALITY: u8 = 14;
    pub const RELATIONAL: u8 = 16;
    pub const SHIFT: u8 = 18;
    pub const ADDITIVE: u8 = 20;
    pub const MULTIPLICATIVE: u8 = 22;
}

impl<'a> CsParser<'a> {
    /// Full expression entry point.
    pub(crate) fn parse_expr(&mut self) -> Option<CsExpr> {
        self.parse_assign_expr()
    }

    /// Assignment level, right-associative.
    pub(crate) fn parse_assign_expr(&mut self) -> Option<CsExpr> {
        let line = self.line();
        let left = self.parse_cond_expr()?;

        if let Some(op) = self.assign_op() {
            let value = self.parse_assign_expr()?;
            return Some(CsExpr::Assign(Box::new(self.node(AssignExpr {
                op: op.to_string(),
                target: left,
                value,
                line,
            }))));
        }

        Some(left)
    }

    /// Consume the current token if it is an assignment operator.
    fn assign_op(&mut self) -> Option<&'static str> {
        let op = match self.cursor.peek().kind {
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::ShlEq => "<<=",
            TokenKind::ShrEq => ">>=",
            TokenKind::QuestionQuestionEq => "??=",
            _ => return None,
        };
        self.cursor.bump();
        Some(op)
    }

    /// `test ? consequent : alternate`, right-associative in its alternate.
    fn parse_cond_expr(&mut self) -> Option<CsExpr> {
        let line = self.line();
        let test = self.parse_binary(bp::MIN)?;

        if self.cursor.eat(TokenKind::Question) {
            let consequent = self.parse_expr()?;
            self.consume(TokenKind::Colon, "expected ':' in conditional expression")?;
            let alternate = self.parse_cond_expr()?;
            return Some(CsExpr::Cond(Box::new(self.node(CondExpr {
                test,
                consequent,
                alternate,
                line,
            }))));
        }

        Some(test)
    }

    /// Binding power and operator text for the current token, if it is a
    /// binary operator.
    fn binary_bp(&self) -> Option<(u8, &'static str)> {
        Some(match self.cursor.peek().kind {
            TokenKind::QuestionQuestion => (bp::COALESCE, "??"),
            TokenKind::OrOr => (bp::LOGICAL_OR, "||"),
            TokenKind::AndAnd => (bp::LOGICAL_AND, "&&"),
            TokenKind::Pipe => (bp::BITWISE_OR, "|"),
            TokenKind::Caret => (bp::BITWISE_XOR, "^"),
            TokenKind::Amp => (bp::BITWISE_AND, "&"),
            TokenKind::EqEq => (bp::EQUALITY, "=="),
            TokenKind::NotEq => (bp::EQUALITY, "!="),
            TokenKind::Lt => (bp::RELATIONAL, "<"),
            TokenKind::Gt => (bp::RELATIONAL, ">"),
            TokenKind::LtEq => (bp::RELATIONAL, "<="),
            TokenKind::GtEq => (bp::RELATIONAL, ">="),
            TokenKind::Shl => (bp::SHIFT, "<<"),
            TokenKind::Shr => (bp::SHIFT, ">>"),
            TokenKind::Plus => (bp::ADDITIVE, "+"),
            TokenKind::Minus => (bp::ADDITIVE, "-"),
            TokenKind::Star => (bp::MULTIPLICATIVE, "*"),
            TokenKind::Slash => (bp::MULTIPLICATIVE, "/"),
            TokenKind::Percent => (bp::MULTIPLICATIVE, "%"),
            _ => return None,
        })
    }

    /// Left-associative binary layers.
    fn parse_binary(&mut self, min_bp: u8) -> Option<CsExpr> {
        let line = self.line();
        let mut left = self.parse_unary()?;

        while let Some((lbp, op)) = self.binary_bp() {
            if lbp < min_bp {
                break;
            }
            self.cursor.bump();

            let right = self.parse_binary(lbp + 1)?;
            left = CsExpr::Binary(Box::new(self.node(BinaryExpr {
                op: op.to_string(),
                left,
                right,
                line,
            })));
        }

        Some(left)
    }

    /// Prefix unary operators and the update forms.
    fn parse_unary(&mut self) -> Option<CsExpr> {
        let line = self.line();

        let op = match self.cursor.peek().kind {
            TokenKind::Not => Some("!"),
            TokenKind::Minus => Some("-"),
            TokenKind::Plus => Some("+"),
            TokenKind::Tilde => Some("~"),
            _ => None,
        };
        if let Some(op) = op {
            self.cursor.bump();
            let operand = self.parse_unary()?;
            return Some(CsExpr::Unary(Box::new(self.node(UnaryExpr {
                op: op.to_string(),
                operand,
                line,
            }))));
        }

        if matches!(
            self.cursor.peek().kind,
            TokenKind::PlusPlus | TokenKind::MinusMinus
        ) {
            let op = self.cursor.bump().lexeme;
            let operand = self.parse_unary()?;
            return Some(CsExpr::Update(Box::new(self.node(UpdateExpr {
                op,
                prefix: true,
                operand,
                line,
            }))));
        }

        self.parse_postfix()
    }

    /// Member access, calls, indexing and postfix updates.
    fn parse_postfix(&mut self) -> Option<CsExpr> {
        let line = self.line();
        let mut expr = self.parse_primary()?;

        loop {
            match self.cursor.peek().kind {
                TokenKind::Dot => {
                    self.cursor.bump();
                    let property = self
                        .consume(TokenKind::Ident, "expected member name after '.'")?
                        .lexeme;
                    expr = CsExpr::Member(Box::new(self.node(MemberExpr {
                        object: expr,
                        property,
                        line,
                    })));
                }
                TokenKind::LParen => {
                    let args = self.parse_call_args()?;
                    expr = CsExpr::Call(Box::new(self.node(CallExpr {
                        callee: expr,
                        args,
                        line,
                    })));
                }
                TokenKind::LBracket => {
                    self.cursor.bump();
                    let index = self.parse_expr()?;
                    self.consume(TokenKind::RBracket, "expected ']' after index")?;
                    expr = CsExpr::Index(Box::new(self.node(IndexExpr {
                        object: expr,
                        index,
                        line,
                    })));
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = self.cursor.bump().lexeme;
                    expr = CsExpr::Update(Box::new(self.node(UpdateExpr {
                        op,
                        prefix: false,
                        operand: expr,
                        line,
                    })));
                    break;
                }
                _ => break,
            }
        }

        Some(expr)
    }

    /// Parenthesized argument list.
    fn parse_call_args(&mut self) -> Option<Vec<CsExpr>> {
        self.consume(TokenKind::LParen, "expected '('")?;

        let mut args = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_assign_expr()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen, "expected ')' after arguments")?;
        Some(args)
    }

    /// Leaf expressions.
    fn parse_primary(&mut self) -> Option<CsExpr> {
        let line = self.line();

        match self.cursor.peek().kind {
            TokenKind::Ident | TokenKind::This | TokenKind::Base => {
                let name = self.cursor.bump().lexeme;
                Some(CsExpr::Ident(self.node(IdentExpr { name, line })))
            }
            TokenKind::Number => {
                let lexeme = self.cursor.bump().lexeme;
                Some(CsExpr::Literal(self.node(LiteralExpr {
                    value: LitValue::Num(lexeme),
                    line,
                })))
            }
            TokenKind::Str => {
                let lexeme = self.cursor.bump().lexeme;
                Some(CsExpr::Literal(self.node(LiteralExpr {
                    value: LitValue::Str(decode_string_lexeme(&lexeme)),
                    line,
                })))
            }
            TokenKind::True | TokenKind::False => {
                let value = self.cursor.bump().kind == TokenKind::True;
                Some(CsExpr::Literal(self.node(LiteralExpr {
                    value: LitValue::Bool(value),
                    line,
                })))
            }
            TokenKind::Null => {
                self.cursor.bump();
                Some(CsExpr::Literal(self.node(LiteralExpr {
                    value: LitValue::Null,
                    line,
                })))
            }
            TokenKind::LParen => {
                self.cursor.bump();
                let expr = self.parse_expr()?;
                self.consume(TokenKind::RParen, "expected ')' after expression")?;
                Some(expr)
            }
            TokenKind::New => self.parse_new_expr(),
            TokenKind::Unknown => {
                self.error_unknown();
                None
            }
            _ => {
                self.error_here("expected expression");
                None
            }
        }
    }

    /// `new Type.Path(args)`
    fn parse_new_expr(&mut self) -> Option<CsExpr> {
        let line = self.line();
        self.cursor.bump(); // new

        let name = self
            .consume(TokenKind::Ident, "expected type name after 'new'")?
            .lexeme;
        let mut callee = CsExpr::Ident(self.node(IdentExpr { name, line }));

        while self.cursor.check(TokenKind::Dot) && self.cursor.peek_ahead(1).is(TokenKind::Ident) {
            self.cursor.bump();
            let property = self.cursor.bump().lexeme;
            callee = CsExpr::Member(Box::new(self.node(MemberExpr {
                object: callee,
                property,
                line,
            })));
        }

        let args = if self.cursor.check(TokenKind::LParen) {
            self.parse_call_args()?
        } else {
            Vec::new()
        };

        Some(CsExpr::New(Box::new(self.node(NewExpr {
            callee,
            args,
            line,
        }))))
    }
}
