//! JavaScript expression productions.
//!
//! Binary operators run through a binding-power loop equivalent to the
//! layered cascade; assignment is right-recursive above it. `===`/`!==` are
//! equality-level operators here and do not exist on the C# side.

use crossc_lex::TokenKind;

use super::ast::*;
use super::JsParser;
use crate::lit::decode_string_lexeme;

/// Binding power levels, lowest to highest. Left-associative operators
/// recurse with `level + 1`.
mod bp {
    pub const MIN: u8 = 0;
    pub const LOGICAL_OR: u8 = 2;
    pub const LOGICAL_AND: u8 = 4;
    pub const EQUALITY: u8 = 6;
    pub const RELATIONAL: u8 = 8;
    pub const ADDITIVE: u8 = 10;
    pub const MULTIPLICATIVE: u8 = 12;
}

impl<'a> JsParser<'a> {
    /// Full expression entry point.
    pub(crate) fn parse_expr(&mut self) -> Option<JsExpr> {
        self.parse_assign_expr()
    }

    /// Assignment level, right-associative.
    pub(crate) fn parse_assign_expr(&mut self) -> Option<JsExpr> {
        let line = self.line();
        let left = self.parse_binary(bp::MIN)?;

        if let Some(op) = self.assign_op() {
            let value = self.parse_assign_expr()?;
            return Some(JsExpr::Assign(Box::new(self.node(AssignExpr {
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
            _ => return None,
        };
        self.cursor.bump();
        Some(op)
    }

    /// Binding power and operator text for the current token, if it is a
    /// binary operator.
    fn binary_bp(&self) -> Option<(u8, &'static str)> {
        Some(match self.cursor.peek().kind {
            TokenKind::OrOr => (bp::LOGICAL_OR, "||"),
            TokenKind::AndAnd => (bp::LOGICAL_AND, "&&"),
            TokenKind::EqEq => (bp::EQUALITY, "=="),
            TokenKind::NotEq => (bp::EQUALITY, "!="),
            TokenKind::EqEqEq => (bp::EQUALITY, "==="),
            TokenKind::NotEqEq => (bp::EQUALITY, "!=="),
            TokenKind::Lt => (bp::RELATIONAL, "<"),
            TokenKind::Gt => (bp::RELATIONAL, ">"),
            TokenKind::LtEq => (bp::RELATIONAL, "<="),
            TokenKind::GtEq => (bp::RELATIONAL, ">="),
            TokenKind::Instanceof => (bp::RELATIONAL, "instanceof"),
            TokenKind::In => (bp::RELATIONAL, "in"),
            TokenKind::Plus => (bp::ADDITIVE, "+"),
            TokenKind::Minus => (bp::ADDITIVE, "-"),
            TokenKind::Star => (bp::MULTIPLICATIVE, "*"),
            TokenKind::Slash => (bp::MULTIPLICATIVE, "/"),
            TokenKind::Percent => (bp::MULTIPLICATIVE, "%"),
            _ => return None,
        })
    }

    /// Left-associative binary layers.
    fn parse_binary(&mut self, min_bp: u8) -> Option<JsExpr> {
        let line = self.line();
        let mut left = self.parse_unary()?;

        while let Some((lbp, op)) = self.binary_bp() {
            if lbp < min_bp {
                break;
            }
            self.cursor.bump();

            let right = self.parse_binary(lbp + 1)?;
            left = JsExpr::Binary(Box::new(self.node(BinaryExpr {
                op: op.to_string(),
                left,
                right,
                line,
            })));
        }

        Some(left)
    }

    /// Prefix unary operators and the update forms.
    fn parse_unary(&mut self) -> Option<JsExpr> {
        let line = self.line();

        let op = match self.cursor.peek().kind {
            TokenKind::Not => Some("!"),
            TokenKind::Minus => Some("-"),
            TokenKind::Plus => Some("+"),
            TokenKind::Typeof => Some("typeof"),
            _ => None,
        };
        if let Some(op) = op {
            self.cursor.bump();
            let operand = self.parse_unary()?;
            return Some(JsExpr::Unary(Box::new(self.node(UnaryExpr {
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
            return Some(JsExpr::Update(Box::new(self.node(UpdateExpr {
                op,
                prefix: true,
                operand,
                line,
            }))));
        }

        self.parse_postfix()
    }

    /// Member access, calls, indexing and postfix updates.
    fn parse_postfix(&mut self) -> Option<JsExpr> {
        let line = self.line();
        let mut expr = self.parse_primary()?;

        loop {
            match self.cursor.peek().kind {
                TokenKind::Dot => {
                    self.cursor.bump();
                    let property = self
                        .consume(TokenKind::Ident, "expected property name after '.'")?
                        .lexeme;
                    expr = JsExpr::Member(Box::new(self.node(MemberExpr {
                        object: expr,
                        property,
                        line,
                    })));
                }
                TokenKind::LParen => {
                    let args = self.parse_call_args()?;
                    expr = JsExpr::Call(Box::new(self.node(CallExpr {
                        callee: expr,
                        args,
                        line,
                    })));
                }
                TokenKind::LBracket => {
                    self.cursor.bump();
                    let index = self.parse_expr()?;
                    self.consume(TokenKind::RBracket, "expected ']' after index")?;
                    expr = JsExpr::Index(Box::new(self.node(IndexExpr {
                        object: expr,
                        index,
                        line,
                    })));
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = self.cursor.bump().lexeme;
                    expr = JsExpr::Update(Box::new(self.node(UpdateExpr {
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
    pub(crate) fn parse_call_args(&mut self) -> Option<Vec<JsExpr>> {
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
    fn parse_primary(&mut self) -> Option<JsExpr> {
        let line = self.line();

        match self.cursor.peek().kind {
            TokenKind::Ident
            | TokenKind::This
            | TokenKind::Super
            | TokenKind::Undefined => {
                let name = self.cursor.bump().lexeme;
                Some(JsExpr::Ident(self.node(IdentExpr { name, line })))
            }
            TokenKind::Number => {
                let lexeme = self.cursor.bump().lexeme;
                Some(JsExpr::Literal(self.node(LiteralExpr {
                    value: LitValue::Num(lexeme),
                    line,
                })))
            }
            TokenKind::Str => {
                let lexeme = self.cursor.bump().lexeme;
                Some(JsExpr::Literal(self.node(LiteralExpr {
                    value: LitValue::Str(decode_string_lexeme(&lexeme)),
                    line,
                })))
            }
            TokenKind::True | TokenKind::False => {
                let value = self.cursor.bump().kind == TokenKind::True;
                Some(JsExpr::Literal(self.node(LiteralExpr {
                    value: LitValue::Bool(value),
                    line,
                })))
            }
            TokenKind::Null => {
                self.cursor.bump();
                Some(JsExpr::Literal(self.node(LiteralExpr {
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
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
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

    /// `[e1, e2, ...]`
    fn parse_array_literal(&mut self) -> Option<JsExpr> {
        let line = self.line();
        self.cursor.bump(); // [

        let mut elements = Vec::new();
        if !self.cursor.check(TokenKind::RBracket) {
            loop {
                elements.push(self.parse_assign_expr()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RBracket, "expected ']' after array literal")?;
        Some(JsExpr::Array(self.node(ArrayLit { elements, line })))
    }

    /// `{ key: value, "key": value, 1: value }`
    fn parse_object_literal(&mut self) -> Option<JsExpr> {
        let line = self.line();
        self.cursor.bump(); // {

        let mut properties = Vec::new();
        if !self.cursor.check(TokenKind::RBrace) {
            loop {
                let prop_line = self.line();
                let key = match self.cursor.peek().kind {
                    TokenKind::Ident => self.cursor.bump().lexeme,
                    TokenKind::Str => decode_string_lexeme(&self.cursor.bump().lexeme),
                    TokenKind::Number => self.cursor.bump().lexeme,
                    _ => {
                        self.error_here("expected property key");
                        return None;
                    }
                };

                self.consume(TokenKind::Colon, "expected ':' after property key")?;
                let value = self.parse_assign_expr()?;
                properties.push(self.node(Property {
                    key,
                    value,
                    line: prop_line,
                }));

                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RBrace, "expected '}' after object literal")?;
        Some(JsExpr::Object(self.node(ObjectLit { properties, line })))
    }

    /// `new Callee.Path(args)`
    fn parse_new_expr(&mut self) -> Option<JsExpr> {
        let line = self.line();
        self.cursor.bump(); // new

        let name = self
            .consume(TokenKind::Ident, "expected constructor name after 'new'")?
            .lexeme;
        let mut callee = JsExpr::Ident(self.node(IdentExpr { name, line }));

        while self.cursor.eat(TokenKind::Dot) {
            let property = self
                .consume(TokenKind::Ident, "expected property name after '.'")?
                .lexeme;
            callee = JsExpr::Member(Box::new(self.node(MemberExpr {
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

        Some(JsExpr::New(Box::new(self.node(NewExpr {
            callee,
            args,
            line,
        }))))
    }
}
