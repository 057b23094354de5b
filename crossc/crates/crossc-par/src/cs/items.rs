//! C# declaration productions: using directives, namespaces, type
//! declarations, members and type references.

use crossc_lex::TokenKind;

use super::ast::*;
use super::CsParser;

/// Keywords that name a predefined type and may therefore open a type
/// reference.
const PREDEFINED_TYPES: &[TokenKind] = &[
    TokenKind::Void,
    TokenKind::IntTy,
    TokenKind::StringTy,
    TokenKind::BoolTy,
    TokenKind::DoubleTy,
    TokenKind::FloatTy,
    TokenKind::DecimalTy,
    TokenKind::CharTy,
    TokenKind::ByteTy,
    TokenKind::ShortTy,
    TokenKind::LongTy,
    TokenKind::UintTy,
    TokenKind::UshortTy,
    TokenKind::UlongTy,
    TokenKind::SbyteTy,
];

impl<'a> CsParser<'a> {
    /// `using A.B.C;`
    pub(crate) fn parse_using_directive(&mut self) -> Option<UsingDirective> {
        let line = self.line();
        self.cursor.bump(); // using

        let name = self.parse_qualified_name()?;
        self.consume(TokenKind::Semicolon, "expected ';' after using directive")?;

        Some(self.node(UsingDirective { name, line }))
    }

    /// Dot-separated identifier path.
    pub(crate) fn parse_qualified_name(&mut self) -> Option<QualifiedName> {
        let line = self.line();
        let mut parts = vec![self.consume(TokenKind::Ident, "expected identifier")?.lexeme];

        while self.cursor.check(TokenKind::Dot)
            && self.cursor.peek_ahead(1).is(TokenKind::Ident)
        {
            self.cursor.bump();
            parts.push(self.cursor.bump().lexeme);
        }

        Some(self.node(QualifiedName { parts, line }))
    }

    /// Top-level and namespace-level member dispatch: namespace, type
    /// declaration, or global statement.
    pub(crate) fn parse_member(&mut self) -> Option<CsMember> {
        match self.cursor.peek().kind {
            TokenKind::Namespace => self.parse_namespace(),
            TokenKind::Class
            | TokenKind::Struct
            | TokenKind::Interface
            | TokenKind::Enum => self.parse_type_decl(Vec::new()),
            _ if self.at_modifier() => {
                let modifiers = self.parse_modifiers();
                self.parse_type_decl(modifiers)
            }
            _ => Some(CsMember::GlobalStmt(self.parse_stmt()?)),
        }
    }

    /// `namespace A.B { members }`
    fn parse_namespace(&mut self) -> Option<CsMember> {
        let line = self.line();
        self.cursor.bump(); // namespace

        let name = self.parse_qualified_name()?;
        self.consume(TokenKind::LBrace, "expected '{' after namespace name")?;

        let mut members = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            let before = self.cursor.position();
            match self.parse_member() {
                Some(member) => members.push(member),
                None => self.recover(before),
            }
        }

        self.consume(TokenKind::RBrace, "expected '}' after namespace body")?;
        Some(CsMember::Namespace(self.node(NamespaceDecl {
            name,
            members,
            line,
        })))
    }

    /// Type declaration after its (already consumed) modifier run.
    fn parse_type_decl(&mut self, modifiers: Vec<String>) -> Option<CsMember> {
        match self.cursor.peek().kind {
            TokenKind::Class => self.parse_class_like(modifiers, TokenKind::Class),
            TokenKind::Struct => self.parse_class_like(modifiers, TokenKind::Struct),
            TokenKind::Interface => self.parse_class_like(modifiers, TokenKind::Interface),
            TokenKind::Enum => self.parse_enum_decl(modifiers),
            _ => {
                self.error_here("expected 'class', 'struct', 'interface' or 'enum'");
                None
            }
        }
    }

    /// Shared body of class, struct and interface declarations.
    fn parse_class_like(&mut self, modifiers: Vec<String>, keyword: TokenKind) -> Option<CsMember> {
        let line = self.line();
        self.cursor.bump(); // class | struct | interface

        let name = self.consume(TokenKind::Ident, "expected type name")?.lexeme;
        let type_params = self.parse_type_params()?;

        let bases = if self.cursor.eat(TokenKind::Colon) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        let constraints = self.parse_where_clauses()?;

        self.consume(TokenKind::LBrace, "expected '{' before type body")?;
        let mut members = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            let before = self.cursor.position();
            match self.parse_type_member() {
                Some(member) => members.push(member),
                None => self.recover(before),
            }
        }
        self.consume(TokenKind::RBrace, "expected '}' after type body")?;

        Some(match keyword {
            TokenKind::Class => CsMember::Class(self.node(ClassDecl {
                modifiers,
                name,
                type_params,
                bases,
                constraints,
                members,
                line,
            })),
            TokenKind::Struct => CsMember::Struct(self.node(StructDecl {
                modifiers,
                name,
                type_params,
                bases,
                constraints,
                members,
                line,
            })),
            _ => CsMember::Interface(self.node(InterfaceDecl {
                modifiers,
                name,
                type_params,
                bases,
                constraints,
                members,
                line,
            })),
        })
    }

    /// `enum Name { A, B = 2 }`
    fn parse_enum_decl(&mut self, modifiers: Vec<String>) -> Option<CsMember> {
        let line = self.line();
        self.cursor.bump(); // enum

        let name = self.consume(TokenKind::Ident, "expected enum name")?.lexeme;
        self.consume(TokenKind::LBrace, "expected '{' before enum body")?;

        let mut members = Vec::new();
        if !self.cursor.check(TokenKind::RBrace) {
            loop {
                let member_line = self.line();
                let member_name = self
                    .consume(TokenKind::Ident, "expected enum member name")?
                    .lexeme;
                let value = if self.cursor.eat(TokenKind::Eq) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                members.push(self.node(EnumMember {
                    name: member_name,
                    value,
                    line: member_line,
                }));

                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
                // Trailing comma before the closing brace.
                if self.cursor.check(TokenKind::RBrace) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RBrace, "expected '}' after enum body")?;
        Some(CsMember::Enum(self.node(EnumDecl {
            modifiers,
            name,
            members,
            line,
        })))
    }

    /// Member dispatch inside a class, struct or interface body.
    ///
    /// An identifier immediately followed by `(` is a constructor; a method
    /// beginning with an identifier-typed return shows a type token after
    /// the leading identifier instead.
    fn parse_type_member(&mut self) -> Option<Member> {
        let line = self.line();
        let modifiers = self.parse_modifiers();

        if self.cursor.check(TokenKind::Event) {
            self.cursor.bump();
            let ty = self.parse_type()?;
            let name = self.consume(TokenKind::Ident, "expected event name")?.lexeme;
            self.consume(TokenKind::Semicolon, "expected ';' after event declaration")?;
            return Some(Member::Event(self.node(EventDecl {
                modifiers,
                ty,
                name,
                line,
            })));
        }

        if self.cursor.check(TokenKind::Ident) && self.cursor.peek_ahead(1).is(TokenKind::LParen) {
            let name = self.cursor.bump().lexeme;
            let params = self.parse_params()?;
            let body = self.parse_stmt_block()?;
            return Some(Member::Constructor(self.node(CtorDecl {
                modifiers,
                name,
                params,
                body,
                line,
            })));
        }

        let return_type = self.parse_type()?;
        let name = self.consume(TokenKind::Ident, "expected member name")?.lexeme;

        if self.cursor.check(TokenKind::LBrace) {
            return self.parse_property_tail(modifiers, return_type, name, line);
        }

        let type_params = self.parse_type_params()?;
        let params = self.parse_params()?;
        let constraints = self.parse_where_clauses()?;

        let body = if self.cursor.check(TokenKind::LBrace) {
            Some(self.parse_stmt_block()?)
        } else {
            self.consume(TokenKind::Semicolon, "expected method body or ';'")?;
            None
        };

        Some(Member::Method(self.node(MethodDecl {
            modifiers,
            return_type,
            name,
            type_params,
            params,
            constraints,
            body,
            line,
        })))
    }

    /// `{ get ...; set ...; }` accessor group of a property.
    fn parse_property_tail(
        &mut self,
        modifiers: Vec<String>,
        ty: TypeRef,
        name: String,
        line: u32,
    ) -> Option<Member> {
        self.cursor.bump(); // {

        let mut getter = None;
        let mut setter = None;

        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.at_end() {
            let accessor_line = self.line();
            let is_get = match self.cursor.peek().kind {
                TokenKind::Get => true,
                TokenKind::Set => false,
                _ => {
                    self.error_here("expected 'get' or 'set' accessor");
                    return None;
                }
            };
            self.cursor.bump();

            let body = if self.cursor.check(TokenKind::LBrace) {
                Some(self.parse_stmt_block()?)
            } else {
                self.consume(TokenKind::Semicolon, "expected ';' after auto accessor")?;
                None
            };

            let accessor = self.node(Accessor {
                body,
                line: accessor_line,
            });
            if is_get {
                getter = Some(accessor);
            } else {
                setter = Some(accessor);
            }
        }

        self.consume(TokenKind::RBrace, "expected '}' after property accessors")?;
        Some(Member::Property(self.node(PropertyDecl {
            modifiers,
            ty,
            name,
            getter,
            setter,
            line,
        })))
    }

    /// Optional `<T, U>` type parameter list.
    fn parse_type_params(&mut self) -> Option<Vec<TypeParam>> {
        let mut params = Vec::new();
        if !self.cursor.eat(TokenKind::Lt) {
            return Some(params);
        }

        loop {
            let line = self.line();
            let name = self
                .consume(TokenKind::Ident, "expected type parameter name")?
                .lexeme;
            params.push(self.node(TypeParam { name, line }));
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }

        self.consume(TokenKind::Gt, "expected '>' after type parameters")?;
        Some(params)
    }

    /// Zero or more `where T : Bound, Bound` clauses.
    fn parse_where_clauses(&mut self) -> Option<Vec<WhereClause>> {
        let mut clauses = Vec::new();
        while self.cursor.check(TokenKind::Where) {
            let line = self.line();
            self.cursor.bump();

            let param = self
                .consume(TokenKind::Ident, "expected constrained type parameter")?
                .lexeme;
            self.consume(TokenKind::Colon, "expected ':' in where clause")?;
            let bounds = self.parse_type_list()?;

            clauses.push(self.node(WhereClause {
                param,
                bounds,
                line,
            }));
        }
        Some(clauses)
    }

    /// Comma-separated type references.
    fn parse_type_list(&mut self) -> Option<Vec<TypeRef>> {
        let mut types = vec![self.parse_type()?];
        while self.cursor.eat(TokenKind::Comma) {
            types.push(self.parse_type()?);
        }
        Some(types)
    }

    /// `(modifier? Type name, ...)` parameter list.
    pub(crate) fn parse_params(&mut self) -> Option<Vec<Param>> {
        self.consume(TokenKind::LParen, "expected '(' before parameter list")?;

        let mut params = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                let line = self.line();
                let modifier = match self.cursor.peek().kind {
                    TokenKind::Ref | TokenKind::Out | TokenKind::Params => {
                        Some(self.cursor.bump().lexeme)
                    }
                    _ => None,
                };

                let ty = self.parse_type()?;
                let name = self
                    .consume(TokenKind::Ident, "expected parameter name")?
                    .lexeme;

                params.push(self.node(Param {
                    modifier,
                    ty,
                    name,
                    line,
                }));

                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen, "expected ')' after parameter list")?;
        Some(params)
    }

    /// Named type reference: qualified name, optional type arguments,
    /// optional rank-1 array suffix.
    pub(crate) fn parse_type(&mut self) -> Option<TypeRef> {
        let line = self.line();

        let name = if self.cursor.check(TokenKind::Ident) {
            self.parse_qualified_name()?
        } else if PREDEFINED_TYPES.contains(&self.cursor.peek().kind) {
            let lexeme = self.cursor.bump().lexeme;
            self.node(QualifiedName {
                parts: vec![lexeme],
                line,
            })
        } else {
            self.error_here("expected type");
            return None;
        };

        let args = if self.cursor.eat(TokenKind::Lt) {
            let mut args = vec![self.parse_type()?];
            while self.cursor.eat(TokenKind::Comma) {
                args.push(self.parse_type()?);
            }
            self.close_type_args()?;
            args
        } else {
            Vec::new()
        };

        let array = if self.cursor.check(TokenKind::LBracket)
            && self.cursor.peek_ahead(1).is(TokenKind::RBracket)
        {
            self.cursor.bump();
            self.cursor.bump();
            true
        } else {
            false
        };

        Some(self.node(TypeRef {
            name,
            args,
            array,
            line,
        }))
    }

    /// Close a type-argument list, splitting a `>>` token when two nested
    /// lists close at once.
    fn close_type_args(&mut self) -> Option<()> {
        if self.cursor.eat(TokenKind::Gt) {
            return Some(());
        }
        if self.cursor.check(TokenKind::Shr) {
            self.cursor.split_shift_right();
            return Some(());
        }
        self.error_here("expected '>' after type arguments");
        None
    }
}
