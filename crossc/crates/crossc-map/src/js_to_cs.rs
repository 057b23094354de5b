//! JavaScript-to-C# AST mapping.

use crossc_par::cs::ast as cs;
use crossc_par::js::ast as js;
use crossc_util::{DiagnosticKind, Handler};

use crate::ops::js_binary_to_cs;

/// Map a JavaScript program to a C# compilation unit.
///
/// Top-level functions become detached public static methods and top-level
/// statements become global statements; the emitter decides how to wrap
/// them. Classes map to public classes directly.
pub fn map_js_to_cs(program: js::JsProgram, handler: &Handler) -> cs::CompilationUnit {
    let mapper = Mapper { handler };

    let members = program
        .body
        .into_iter()
        .map(|stmt| mapper.map_top(stmt))
        .collect();

    cs::CompilationUnit {
        usings: Vec::new(),
        members,
        line: program.line,
    }
}

struct Mapper<'a> {
    handler: &'a Handler,
}

impl<'a> Mapper<'a> {
    fn warn(&self, message: impl Into<String>, line: u32) {
        self.handler
            .warning(DiagnosticKind::ConversionError, message, line, 1);
    }

    fn unsupported(&self, what: &str, line: u32) -> String {
        self.handler.error(
            DiagnosticKind::AstConversionError,
            format!("{what} cannot be converted to C#"),
            line,
            1,
        );
        format!("unsupported: {what}")
    }

    fn map_top(&self, stmt: js::JsStmt) -> cs::CsMember {
        match stmt {
            js::JsStmt::Function(func) => cs::CsMember::GlobalMethod(self.map_function(func)),
            js::JsStmt::Class(class) => cs::CsMember::Class(self.map_class(class)),
            other => cs::CsMember::GlobalStmt(self.map_stmt(other)),
        }
    }

    /// `function f(a, b) {..}` becomes `public static void f(string a, string b) {..}`.
    ///
    /// Parameters receive the default type `string`; no further inference is
    /// attempted.
    fn map_function(&self, func: js::FnDecl) -> cs::MethodDecl {
        let line = func.line;
        cs::MethodDecl {
            modifiers: vec!["public".to_string(), "static".to_string()],
            return_type: cs::TypeRef::simple("void", line),
            name: func.name,
            type_params: Vec::new(),
            params: self.map_params(func.params, line),
            constraints: Vec::new(),
            body: Some(self.map_block(func.body)),
            line,
        }
    }

    fn map_params(&self, params: Vec<String>, line: u32) -> Vec<cs::Param> {
        params
            .into_iter()
            .map(|name| cs::Param {
                modifier: None,
                ty: cs::TypeRef::simple("string", line),
                name,
                line,
            })
            .collect()
    }

    fn map_class(&self, class: js::ClassDecl) -> cs::ClassDecl {
        let class_name = class.name.clone();
        let members = class
            .members
            .into_iter()
            .map(|member| {
                let line = member.line;
                if member.is_constructor {
                    cs::Member::Constructor(cs::CtorDecl {
                        modifiers: vec!["public".to_string()],
                        name: class_name.clone(),
                        params: self.map_params(member.params, line),
                        body: self.map_block(member.body),
                        line,
                    })
                } else {
                    cs::Member::Method(cs::MethodDecl {
                        modifiers: vec!["public".to_string()],
                        return_type: cs::TypeRef::simple("void", line),
                        name: member.name,
                        type_params: Vec::new(),
                        params: self.map_params(member.params, line),
                        constraints: Vec::new(),
                        body: Some(self.map_block(member.body)),
                        line,
                    })
                }
            })
            .collect();

        cs::ClassDecl {
            modifiers: vec!["public".to_string()],
            name: class.name,
            type_params: Vec::new(),
            bases: Vec::new(),
            constraints: Vec::new(),
            members,
            line: class.line,
        }
    }

    fn map_block(&self, block: js::Block) -> cs::Block {
        cs::Block {
            body: block.body.into_iter().map(|s| self.map_stmt(s)).collect(),
            line: block.line,
        }
    }

    fn map_stmt(&self, stmt: js::JsStmt) -> cs::CsStmt {
        match stmt {
            js::JsStmt::Var(decl) => self.map_var_decl(decl),
            js::JsStmt::Block(block) => cs::CsStmt::Block(self.map_block(block)),
            js::JsStmt::If(stmt) => cs::CsStmt::If(cs::IfStmt {
                test: self.map_expr(stmt.test),
                consequent: Box::new(self.map_stmt(*stmt.consequent)),
                alternate: stmt
                    .alternate
                    .map(|alt| Box::new(self.map_stmt(*alt))),
                line: stmt.line,
            }),
            js::JsStmt::While(stmt) => cs::CsStmt::While(cs::WhileStmt {
                test: self.map_expr(stmt.test),
                body: Box::new(self.map_stmt(*stmt.body)),
                line: stmt.line,
            }),
            js::JsStmt::DoWhile(stmt) => cs::CsStmt::DoWhile(cs::DoWhileStmt {
                body: Box::new(self.map_stmt(*stmt.body)),
                test: self.map_expr(stmt.test),
                line: stmt.line,
            }),
            js::JsStmt::For(stmt) => cs::CsStmt::For(cs::ForStmt {
                init: stmt.init.map(|init| match init {
                    js::ForInit::Decl(decl) => match self.map_var_decl(decl) {
                        cs::CsStmt::Var(var) => cs::ForInit::Var(var),
                        other => cs::ForInit::Expr(cs::CsExpr::Marker(cs::MarkerExpr {
                            text: "unsupported loop initializer".to_string(),
                            line: other.line(),
                        })),
                    },
                    js::ForInit::Expr(expr) => cs::ForInit::Expr(self.map_expr(expr)),
                }),
                test: stmt.test.map(|e| self.map_expr(e)),
                update: stmt.update.map(|e| self.map_expr(e)),
                body: Box::new(self.map_stmt(*stmt.body)),
                line: stmt.line,
            }),
            js::JsStmt::ForOf(stmt) => cs::CsStmt::Foreach(cs::ForeachStmt {
                ty: None,
                binding: stmt.binding,
                iterable: self.map_expr(stmt.iterable),
                body: Box::new(self.map_stmt(*stmt.body)),
                line: stmt.line,
            }),
            js::JsStmt::Switch(stmt) => cs::CsStmt::Switch(cs::SwitchStmt {
                discriminant: self.map_expr(stmt.discriminant),
                cases: stmt
                    .cases
                    .into_iter()
                    .map(|case| cs::SwitchCase {
                        test: case.test.map(|e| self.map_expr(e)),
                        body: case.body.into_iter().map(|s| self.map_stmt(s)).collect(),
                        line: case.line,
                    })
                    .collect(),
                line: stmt.line,
            }),
            js::JsStmt::Return(stmt) => cs::CsStmt::Return(cs::ReturnStmt {
                argument: stmt.argument.map(|e| self.map_expr(e)),
                line: stmt.line,
            }),
            js::JsStmt::Break(stmt) => cs::CsStmt::Break(cs::JumpStmt { line: stmt.line }),
            js::JsStmt::Continue(stmt) => cs::CsStmt::Continue(cs::JumpStmt { line: stmt.line }),
            js::JsStmt::Throw(stmt) => cs::CsStmt::Throw(cs::ThrowStmt {
                argument: self.map_expr(stmt.argument),
                line: stmt.line,
            }),
            js::JsStmt::Try(stmt) => cs::CsStmt::Try(cs::TryStmt {
                block: self.map_block(stmt.block),
                handler: stmt.handler.map(|clause| cs::CatchClause {
                    ty: Some(cs::TypeRef::simple("Exception", clause.line)),
                    param: clause.param,
                    body: self.map_block(clause.body),
                    line: clause.line,
                }),
                finalizer: stmt.finalizer.map(|block| self.map_block(block)),
                line: stmt.line,
            }),
            js::JsStmt::Expr(stmt) => cs::CsStmt::Expr(cs::ExprStmt {
                expr: self.map_expr(stmt.expr),
                line: stmt.line,
            }),
            js::JsStmt::Function(func) => {
                let line = func.line;
                let text = self.unsupported(
                    &format!("nested function declaration '{}'", func.name),
                    line,
                );
                cs::CsStmt::Marker(cs::MarkerStmt { text, line })
            }
            js::JsStmt::Class(class) => {
                let line = class.line;
                let text =
                    self.unsupported(&format!("nested class declaration '{}'", class.name), line);
                cs::CsStmt::Marker(cs::MarkerStmt { text, line })
            }
            js::JsStmt::Marker(marker) => cs::CsStmt::Marker(cs::MarkerStmt {
                text: marker.text,
                line: marker.line,
            }),
        }
    }

    /// Multi-declarator declarations keep their first declarator; the rest
    /// are dropped with a warning.
    fn map_var_decl(&self, decl: js::VarDecl) -> cs::CsStmt {
        let line = decl.line;
        let mut declarations = decl.declarations.into_iter();
        let Some(first) = declarations.next() else {
            let text = self.unsupported("empty declaration list", line);
            return cs::CsStmt::Marker(cs::MarkerStmt { text, line });
        };

        let dropped: Vec<String> = declarations.map(|d| d.name).collect();
        if !dropped.is_empty() {
            self.warn(
                format!(
                    "declaration lists multiple declarators; only '{}' was converted ({} dropped)",
                    first.name,
                    dropped.join(", ")
                ),
                line,
            );
        }

        cs::CsStmt::Var(cs::VarStmt {
            name: first.name,
            init: first.init.map(|e| self.map_expr(e)),
            line,
        })
    }

    fn map_expr(&self, expr: js::JsExpr) -> cs::CsExpr {
        match expr {
            js::JsExpr::Assign(assign) => cs::CsExpr::Assign(Box::new(cs::AssignExpr {
                op: assign.op,
                target: self.map_expr(assign.target),
                value: self.map_expr(assign.value),
                line: assign.line,
            })),
            js::JsExpr::Cond(cond) => cs::CsExpr::Cond(Box::new(cs::CondExpr {
                test: self.map_expr(cond.test),
                consequent: self.map_expr(cond.consequent),
                alternate: self.map_expr(cond.alternate),
                line: cond.line,
            })),
            js::JsExpr::Binary(binary) => {
                let line = binary.line;
                let (mapped, warning) = js_binary_to_cs(&binary.op);
                if let Some(warning) = warning {
                    self.warn(warning, line);
                }
                if mapped.is_empty() {
                    let text =
                        self.unsupported(&format!("binary operator '{}'", binary.op), line);
                    return cs::CsExpr::Marker(cs::MarkerExpr { text, line });
                }
                cs::CsExpr::Binary(Box::new(cs::BinaryExpr {
                    op: mapped.to_string(),
                    left: self.map_expr(binary.left),
                    right: self.map_expr(binary.right),
                    line,
                }))
            }
            js::JsExpr::Unary(unary) => {
                let line = unary.line;
                if unary.op == "typeof" {
                    self.warn(
                        "'typeof' has no direct C# equivalent; emitted as a call",
                        line,
                    );
                    return cs::CsExpr::Call(Box::new(cs::CallExpr {
                        callee: cs::CsExpr::Ident(cs::IdentExpr {
                            name: "typeof".to_string(),
                            line,
                        }),
                        args: vec![self.map_expr(unary.operand)],
                        line,
                    }));
                }
                cs::CsExpr::Unary(Box::new(cs::UnaryExpr {
                    op: unary.op,
                    operand: self.map_expr(unary.operand),
                    line,
                }))
            }
            js::JsExpr::Update(update) => cs::CsExpr::Update(Box::new(cs::UpdateExpr {
                op: update.op,
                prefix: update.prefix,
                operand: self.map_expr(update.operand),
                line: update.line,
            })),
            js::JsExpr::Call(call) => cs::CsExpr::Call(Box::new(cs::CallExpr {
                callee: self.map_expr(call.callee),
                args: call.args.into_iter().map(|a| self.map_expr(a)).collect(),
                line: call.line,
            })),
            js::JsExpr::New(new) => cs::CsExpr::New(Box::new(cs::NewExpr {
                callee: self.map_expr(new.callee),
                args: new.args.into_iter().map(|a| self.map_expr(a)).collect(),
                line: new.line,
            })),
            js::JsExpr::Member(member) => cs::CsExpr::Member(Box::new(cs::MemberExpr {
                object: self.map_expr(member.object),
                property: member.property,
                line: member.line,
            })),
            js::JsExpr::Index(index) => cs::CsExpr::Index(Box::new(cs::IndexExpr {
                object: self.map_expr(index.object),
                index: self.map_expr(index.index),
                line: index.line,
            })),
            js::JsExpr::Ident(ident) => cs::CsExpr::Ident(cs::IdentExpr {
                name: ident.name,
                line: ident.line,
            }),
            js::JsExpr::Literal(literal) => cs::CsExpr::Literal(cs::LiteralExpr {
                value: literal.value,
                line: literal.line,
            }),
            js::JsExpr::Array(array) => {
                let line = array.line;
                let text = self.unsupported("array literal", line);
                cs::CsExpr::Marker(cs::MarkerExpr { text, line })
            }
            js::JsExpr::Object(object) => {
                let line = object.line;
                let text = self.unsupported("object literal", line);
                cs::CsExpr::Marker(cs::MarkerExpr { text, line })
            }
            js::JsExpr::Marker(marker) => cs::CsExpr::Marker(cs::MarkerExpr {
                text: marker.text,
                line: marker.line,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossc_lex::tokenize_js;
    use crossc_par::parse_js;
    use crossc_util::{Metrics, Severity};

    fn map(source: &str) -> (cs::CompilationUnit, Handler) {
        let parse_handler = Handler::new();
        let mut metrics = Metrics::new();
        let program = parse_js(tokenize_js(source), &parse_handler, &mut metrics);
        assert!(!parse_handler.has_errors(), "parse failed for {source:?}");

        let handler = Handler::new();
        let unit = map_js_to_cs(program, &handler);
        (unit, handler)
    }

    #[test]
    fn test_function_becomes_static_void_method() {
        let (unit, _) = map("function greet(name) { console.log(name); }");
        let cs::CsMember::GlobalMethod(method) = &unit.members[0] else {
            panic!("expected global method");
        };
        assert_eq!(method.modifiers, vec!["public", "static"]);
        assert_eq!(method.return_type.name.dotted(), "void");
        assert_eq!(method.params[0].ty.name.dotted(), "string");
        assert_eq!(method.params[0].name, "name");
    }

    #[test]
    fn test_let_becomes_var_statement() {
        let (unit, handler) = map("let name = \"John\";");
        assert!(!handler.has_errors());
        let cs::CsMember::GlobalStmt(cs::CsStmt::Var(var)) = &unit.members[0] else {
            panic!("expected var statement");
        };
        assert_eq!(var.name, "name");
        assert!(var.init.is_some());
    }

    #[test]
    fn test_multi_declarator_warns_and_keeps_first() {
        let (unit, handler) = map("let a = 1, b = 2;");
        let cs::CsMember::GlobalStmt(cs::CsStmt::Var(var)) = &unit.members[0] else {
            panic!("expected var statement");
        };
        assert_eq!(var.name, "a");
        assert_eq!(handler.warning_count(), 1);
        assert!(handler.warnings()[0].message.contains('b'));
    }

    #[test]
    fn test_strict_equality_lowered_with_warning() {
        let (unit, handler) = map("let same = a === b;");
        let cs::CsMember::GlobalStmt(cs::CsStmt::Var(var)) = &unit.members[0] else {
            panic!("expected var statement");
        };
        let cs::CsExpr::Binary(binary) = var.init.as_ref().unwrap() else {
            panic!("expected binary");
        };
        assert_eq!(binary.op, "==");
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn test_for_of_becomes_foreach() {
        let (unit, _) = map("for (const item of items) { console.log(item); }");
        let cs::CsMember::GlobalStmt(cs::CsStmt::Foreach(foreach)) = &unit.members[0] else {
            panic!("expected foreach");
        };
        assert!(foreach.ty.is_none());
        assert_eq!(foreach.binding, "item");
    }

    #[test]
    fn test_catch_gets_exception_type() {
        let (unit, _) = map("try { risky(); } catch (e) { log(e); }");
        let cs::CsMember::GlobalStmt(cs::CsStmt::Try(try_stmt)) = &unit.members[0] else {
            panic!("expected try");
        };
        let clause = try_stmt.handler.as_ref().unwrap();
        assert_eq!(clause.ty.as_ref().unwrap().name.dotted(), "Exception");
        assert_eq!(clause.param.as_deref(), Some("e"));
    }

    #[test]
    fn test_class_maps_to_public_class() {
        let (unit, _) = map("class Point { constructor(x) { this.x = x; } norm() { return 0; } }");
        let cs::CsMember::Class(class) = &unit.members[0] else {
            panic!("expected class");
        };
        assert_eq!(class.modifiers, vec!["public"]);
        let cs::Member::Constructor(ctor) = &class.members[0] else {
            panic!("expected constructor");
        };
        assert_eq!(ctor.name, "Point");
        assert!(matches!(&class.members[1], cs::Member::Method(m) if m.name == "norm"));
    }

    #[test]
    fn test_object_literal_degrades_to_marker() {
        let (unit, handler) = map("let o = { a: 1 };");
        let cs::CsMember::GlobalStmt(cs::CsStmt::Var(var)) = &unit.members[0] else {
            panic!("expected var statement");
        };
        assert!(matches!(var.init, Some(cs::CsExpr::Marker(_))));
        let errors = handler.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind,
            crossc_util::DiagnosticKind::AstConversionError
        );
        assert_eq!(errors[0].severity, Severity::Error);
    }

    #[test]
    fn test_lines_preserved() {
        let (unit, _) = map("let a = 1;\nlet b = 2;");
        let cs::CsMember::GlobalStmt(stmt) = &unit.members[1] else {
            panic!("expected statement");
        };
        assert_eq!(stmt.line(), 2);
    }
}
