//! C#-to-JavaScript AST mapping.

use crossc_par::cs::ast as cs;
use crossc_par::js::ast as js;
use crossc_util::{DiagnosticKind, Handler};

use crate::ops::{cs_binary_to_js, strip_numeric_suffix};

/// Map a C# compilation unit to a JavaScript program.
///
/// Using directives are dropped with informational notes, namespaces are
/// flattened into their members, methods lose their modifiers and return
/// types, and the dynamic side picks up everything else structurally.
pub fn map_cs_to_js(unit: cs::CompilationUnit, handler: &Handler) -> js::JsProgram {
    let mapper = Mapper { handler };

    for using in &unit.usings {
        handler.info(
            DiagnosticKind::ConversionError,
            format!("using directive '{}' dropped", using.name.dotted()),
            using.line,
            1,
        );
    }

    let mut body = Vec::new();
    for member in unit.members {
        mapper.map_member_into(member, &mut body);
    }

    js::JsProgram {
        body,
        line: unit.line,
    }
}

struct Mapper<'a> {
    handler: &'a Handler,
}

impl<'a> Mapper<'a> {
    fn note(&self, message: impl Into<String>, line: u32) {
        self.handler
            .info(DiagnosticKind::ConversionError, message, line, 1);
    }

    fn warn(&self, message: impl Into<String>, line: u32) {
        self.handler
            .warning(DiagnosticKind::ConversionError, message, line, 1);
    }

    fn map_member_into(&self, member: cs::CsMember, out: &mut Vec<js::JsStmt>) {
        match member {
            cs::CsMember::Namespace(ns) => {
                self.note(
                    format!("namespace '{}' flattened into the program body", ns.name.dotted()),
                    ns.line,
                );
                for inner in ns.members {
                    self.map_member_into(inner, out);
                }
            }
            cs::CsMember::Class(class) => out.push(js::JsStmt::Class(self.map_class(class))),
            cs::CsMember::Struct(decl) => {
                self.note(format!("struct '{}' converted to a class", decl.name), decl.line);
                out.push(js::JsStmt::Class(self.map_class(cs::ClassDecl {
                    modifiers: decl.modifiers,
                    name: decl.name,
                    type_params: decl.type_params,
                    bases: decl.bases,
                    constraints: decl.constraints,
                    members: decl.members,
                    line: decl.line,
                })));
            }
            cs::CsMember::Interface(decl) => {
                self.warn(
                    format!("interface '{}' has no JavaScript equivalent; dropped", decl.name),
                    decl.line,
                );
                out.push(js::JsStmt::Marker(js::MarkerStmt {
                    text: format!("dropped: interface {}", decl.name),
                    line: decl.line,
                }));
            }
            cs::CsMember::Enum(decl) => out.push(self.map_enum(decl)),
            cs::CsMember::GlobalStmt(stmt) => out.push(self.map_stmt(stmt)),
            cs::CsMember::GlobalMethod(method) => {
                out.push(js::JsStmt::Function(self.map_method_to_function(method)))
            }
        }
    }

    /// Modifiers and return types have no place on the dynamic side and are
    /// dropped.
    fn map_method_to_function(&self, method: cs::MethodDecl) -> js::FnDecl {
        let line = method.line;
        js::FnDecl {
            name: method.name,
            params: method.params.into_iter().map(|p| p.name).collect(),
            body: method
                .body
                .map(|b| self.map_block(b))
                .unwrap_or(js::Block {
                    body: Vec::new(),
                    line,
                }),
            line,
        }
    }

    fn map_class(&self, class: cs::ClassDecl) -> js::ClassDecl {
        let mut members = Vec::new();

        for member in class.members {
            match member {
                cs::Member::Method(method) => {
                    if method.body.is_none() {
                        self.warn(
                            format!("bodyless method '{}' dropped", method.name),
                            method.line,
                        );
                        continue;
                    }
                    let func = self.map_method_to_function(method);
                    members.push(js::ClassMember {
                        name: func.name,
                        params: func.params,
                        body: func.body,
                        is_constructor: false,
                        line: func.line,
                    });
                }
                cs::Member::Constructor(ctor) => {
                    members.push(js::ClassMember {
                        name: "constructor".to_string(),
                        params: ctor.params.into_iter().map(|p| p.name).collect(),
                        body: self.map_block(ctor.body),
                        is_constructor: true,
                        line: ctor.line,
                    });
                }
                cs::Member::Property(prop) => {
                    self.warn(
                        format!("property '{}' has no JavaScript equivalent; dropped", prop.name),
                        prop.line,
                    );
                }
                cs::Member::Event(event) => {
                    self.warn(
                        format!("event '{}' has no JavaScript equivalent; dropped", event.name),
                        event.line,
                    );
                }
            }
        }

        js::ClassDecl {
            name: class.name,
            members,
            line: class.line,
        }
    }

    /// Enums become a `var` bound to an object literal with the member
    /// values, auto-numbered where the source gave none.
    fn map_enum(&self, decl: cs::EnumDecl) -> js::JsStmt {
        self.note(
            format!("enum '{}' converted to an object literal", decl.name),
            decl.line,
        );

        let mut next_value: i64 = 0;
        let mut properties = Vec::new();
        for member in decl.members {
            let value = match member.value {
                Some(cs::CsExpr::Literal(cs::LiteralExpr {
                    value: cs::LitValue::Num(num),
                    line,
                })) => {
                    if let Ok(parsed) = num.parse::<i64>() {
                        next_value = parsed + 1;
                    }
                    js::JsExpr::Literal(js::LiteralExpr {
                        value: js::LitValue::Num(num),
                        line,
                    })
                }
                Some(other) => self.map_expr(other),
                None => {
                    let value = js::JsExpr::Literal(js::LiteralExpr {
                        value: js::LitValue::Num(next_value.to_string()),
                        line: member.line,
                    });
                    next_value += 1;
                    value
                }
            };
            properties.push(js::Property {
                key: member.name,
                value,
                line: member.line,
            });
        }

        js::JsStmt::Var(js::VarDecl {
            kind: js::VarKind::Var,
            declarations: vec![js::VarDeclarator {
                name: decl.name,
                init: Some(js::JsExpr::Object(js::ObjectLit {
                    properties,
                    line: decl.line,
                })),
                line: decl.line,
            }],
            line: decl.line,
        })
    }

    fn map_block(&self, block: cs::Block) -> js::Block {
        js::Block {
            body: block.body.into_iter().map(|s| self.map_stmt(s)).collect(),
            line: block.line,
        }
    }

    fn map_stmt(&self, stmt: cs::CsStmt) -> js::JsStmt {
        match stmt {
            cs::CsStmt::Var(var) => js::JsStmt::Var(js::VarDecl {
                kind: js::VarKind::Var,
                declarations: vec![js::VarDeclarator {
                    name: var.name,
                    init: var.init.map(|e| self.map_expr(e)),
                    line: var.line,
                }],
                line: var.line,
            }),
            cs::CsStmt::Block(block) => js::JsStmt::Block(self.map_block(block)),
            cs::CsStmt::If(stmt) => js::JsStmt::If(js::IfStmt {
                test: self.map_expr(stmt.test),
                consequent: Box::new(self.map_stmt(*stmt.consequent)),
                alternate: stmt.alternate.map(|alt| Box::new(self.map_stmt(*alt))),
                line: stmt.line,
            }),
            cs::CsStmt::While(stmt) => js::JsStmt::While(js::WhileStmt {
                test: self.map_expr(stmt.test),
                body: Box::new(self.map_stmt(*stmt.body)),
                line: stmt.line,
            }),
            cs::CsStmt::DoWhile(stmt) => js::JsStmt::DoWhile(js::DoWhileStmt {
                body: Box::new(self.map_stmt(*stmt.body)),
                test: self.map_expr(stmt.test),
                line: stmt.line,
            }),
            cs::CsStmt::For(stmt) => js::JsStmt::For(js::ForStmt {
                init: stmt.init.map(|init| match init {
                    cs::ForInit::Var(var) => js::ForInit::Decl(js::VarDecl {
                        kind: js::VarKind::Var,
                        declarations: vec![js::VarDeclarator {
                            name: var.name,
                            init: var.init.map(|e| self.map_expr(e)),
                            line: var.line,
                        }],
                        line: var.line,
                    }),
                    cs::ForInit::Expr(expr) => js::ForInit::Expr(self.map_expr(expr)),
                }),
                test: stmt.test.map(|e| self.map_expr(e)),
                update: stmt.update.map(|e| self.map_expr(e)),
                body: Box::new(self.map_stmt(*stmt.body)),
                line: stmt.line,
            }),
            cs::CsStmt::Foreach(stmt) => js::JsStmt::ForOf(js::ForOfStmt {
                kind: js::VarKind::Var,
                binding: stmt.binding,
                iterable: self.map_expr(stmt.iterable),
                body: Box::new(self.map_stmt(*stmt.body)),
                line: stmt.line,
            }),
            cs::CsStmt::Switch(stmt) => js::JsStmt::Switch(js::SwitchStmt {
                discriminant: self.map_expr(stmt.discriminant),
                cases: stmt
                    .cases
                    .into_iter()
                    .map(|case| js::SwitchCase {
                        test: case.test.map(|e| self.map_expr(e)),
                        body: case.body.into_iter().map(|s| self.map_stmt(s)).collect(),
                        line: case.line,
                    })
                    .collect(),
                line: stmt.line,
            }),
            cs::CsStmt::Return(stmt) => js::JsStmt::Return(js::ReturnStmt {
                argument: stmt.argument.map(|e| self.map_expr(e)),
                line: stmt.line,
            }),
            cs::CsStmt::Throw(stmt) => js::JsStmt::Throw(js::ThrowStmt {
                argument: self.map_expr(stmt.argument),
                line: stmt.line,
            }),
            cs::CsStmt::Break(stmt) => js::JsStmt::Break(js::JumpStmt { line: stmt.line }),
            cs::CsStmt::Continue(stmt) => js::JsStmt::Continue(js::JumpStmt { line: stmt.line }),
            cs::CsStmt::Try(stmt) => js::JsStmt::Try(js::TryStmt {
                block: self.map_block(stmt.block),
                handler: stmt.handler.map(|clause| js::CatchClause {
                    param: clause.param,
                    body: self.map_block(clause.body),
                    line: clause.line,
                }),
                finalizer: stmt.finalizer.map(|b| self.map_block(b)),
                line: stmt.line,
            }),
            cs::CsStmt::Expr(stmt) => js::JsStmt::Expr(js::ExprStmt {
                expr: self.map_expr(stmt.expr),
                line: stmt.line,
            }),
            cs::CsStmt::Marker(marker) => js::JsStmt::Marker(js::MarkerStmt {
                text: marker.text,
                line: marker.line,
            }),
        }
    }

    fn map_expr(&self, expr: cs::CsExpr) -> js::JsExpr {
        match expr {
            cs::CsExpr::Assign(assign) => js::JsExpr::Assign(Box::new(js::AssignExpr {
                op: assign.op,
                target: self.map_expr(assign.target),
                value: self.map_expr(assign.value),
                line: assign.line,
            })),
            cs::CsExpr::Cond(cond) => js::JsExpr::Cond(Box::new(js::CondExpr {
                test: self.map_expr(cond.test),
                consequent: self.map_expr(cond.consequent),
                alternate: self.map_expr(cond.alternate),
                line: cond.line,
            })),
            cs::CsExpr::Binary(binary) => {
                let line = binary.line;
                let (mapped, warning) = cs_binary_to_js(&binary.op);
                if let Some(warning) = warning {
                    self.warn(warning, line);
                }
                let op = if mapped.is_empty() {
                    binary.op
                } else {
                    mapped.to_string()
                };
                js::JsExpr::Binary(Box::new(js::BinaryExpr {
                    op,
                    left: self.map_expr(binary.left),
                    right: self.map_expr(binary.right),
                    line,
                }))
            }
            cs::CsExpr::Unary(unary) => js::JsExpr::Unary(Box::new(js::UnaryExpr {
                op: unary.op,
                operand: self.map_expr(unary.operand),
                line: unary.line,
            })),
            cs::CsExpr::Update(update) => js::JsExpr::Update(Box::new(js::UpdateExpr {
                op: update.op,
                prefix: update.prefix,
                operand: self.map_expr(update.operand),
                line: update.line,
            })),
            cs::CsExpr::Call(call) => js::JsExpr::Call(Box::new(js::CallExpr {
                callee: self.map_expr(call.callee),
                args: call.args.into_iter().map(|a| self.map_expr(a)).collect(),
                line: call.line,
            })),
            cs::CsExpr::New(new) => js::JsExpr::New(Box::new(js::NewExpr {
                callee: self.map_expr(new.callee),
                args: new.args.into_iter().map(|a| self.map_expr(a)).collect(),
                line: new.line,
            })),
            cs::CsExpr::Member(member) => js::JsExpr::Member(Box::new(js::MemberExpr {
                object: self.map_expr(member.object),
                property: member.property,
                line: member.line,
            })),
            cs::CsExpr::Index(index) => js::JsExpr::Index(Box::new(js::IndexExpr {
                object: self.map_expr(index.object),
                index: self.map_expr(index.index),
                line: index.line,
            })),
            cs::CsExpr::Ident(ident) => js::JsExpr::Ident(js::IdentExpr {
                name: ident.name,
                line: ident.line,
            }),
            cs::CsExpr::Literal(literal) => {
                let value = match literal.value {
                    cs::LitValue::Num(num) => {
                        js::LitValue::Num(strip_numeric_suffix(&num).to_string())
                    }
                    other => other,
                };
                js::JsExpr::Literal(js::LiteralExpr {
                    value,
                    line: literal.line,
                })
            }
            cs::CsExpr::Marker(marker) => js::JsExpr::Marker(js::MarkerExpr {
                text: marker.text,
                line: marker.line,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossc_lex::tokenize_cs;
    use crossc_par::parse_cs;
    use crossc_util::{Metrics, Severity};

    fn map(source: &str) -> (js::JsProgram, Handler) {
        let parse_handler = Handler::new();
        let mut metrics = Metrics::new();
        let unit = parse_cs(tokenize_cs(source), &parse_handler, &mut metrics);
        assert!(!parse_handler.has_errors(), "parse failed for {source:?}");

        let handler = Handler::new();
        let program = map_cs_to_js(unit, &handler);
        (program, handler)
    }

    #[test]
    fn test_global_statement_carries_over() {
        let (program, handler) = map("Console.WriteLine(\"Hi\");");
        assert!(!handler.has_errors());
        assert!(matches!(program.body[0], js::JsStmt::Expr(_)));
    }

    #[test]
    fn test_using_directives_dropped_with_note() {
        let (program, handler) = map("using System;\nConsole.WriteLine(1);");
        assert_eq!(program.body.len(), 1);
        let notes = handler.notes();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("System"));
        assert_eq!(notes[0].severity, Severity::Info);
    }

    #[test]
    fn test_equality_raised_with_warning() {
        let (program, handler) = map("var same = a == b;");
        let js::JsStmt::Var(decl) = &program.body[0] else {
            panic!("expected var");
        };
        let js::JsExpr::Binary(binary) = decl.declarations[0].init.as_ref().unwrap() else {
            panic!("expected binary");
        };
        assert_eq!(binary.op, "===");
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn test_var_statement_becomes_var_declaration() {
        let (program, _) = map("var total = 0;");
        let js::JsStmt::Var(decl) = &program.body[0] else {
            panic!("expected var");
        };
        assert_eq!(decl.kind, js::VarKind::Var);
        assert_eq!(decl.declarations.len(), 1);
        assert_eq!(decl.declarations[0].name, "total");
    }

    #[test]
    fn test_method_becomes_function_via_class() {
        let (program, _) = map(
            "public class Program { public static void Greet(string name) { Console.WriteLine(name); } }",
        );
        let js::JsStmt::Class(class) = &program.body[0] else {
            panic!("expected class");
        };
        assert_eq!(class.members[0].name, "Greet");
        assert_eq!(class.members[0].params, vec!["name"]);
    }

    #[test]
    fn test_namespace_flattened_with_note() {
        let (program, handler) = map("namespace App { public class A { } }");
        assert!(matches!(program.body[0], js::JsStmt::Class(_)));
        assert!(handler.notes()[0].message.contains("App"));
    }

    #[test]
    fn test_property_dropped_with_warning() {
        let (program, handler) = map("public class P { public string Name { get; set; } }");
        let js::JsStmt::Class(class) = &program.body[0] else {
            panic!("expected class");
        };
        assert!(class.members.is_empty());
        assert!(handler.warnings()[0].message.contains("Name"));
    }

    #[test]
    fn test_foreach_becomes_for_of() {
        let (program, _) = map("foreach (string name in names) { Console.WriteLine(name); }");
        let js::JsStmt::ForOf(stmt) = &program.body[0] else {
            panic!("expected for..of");
        };
        assert_eq!(stmt.binding, "name");
    }

    #[test]
    fn test_do_while_and_conditional_carry_over() {
        let (program, _) = map("do { i--; } while (i > 0);\nvar r = a > b ? a : b;");
        assert!(matches!(program.body[0], js::JsStmt::DoWhile(_)));
        let js::JsStmt::Var(decl) = &program.body[1] else {
            panic!("expected var");
        };
        assert!(matches!(
            decl.declarations[0].init,
            Some(js::JsExpr::Cond(_))
        ));
    }

    #[test]
    fn test_enum_becomes_object_literal() {
        let (program, handler) = map("public enum Color { Red, Green = 5, Blue }");
        let js::JsStmt::Var(decl) = &program.body[0] else {
            panic!("expected var");
        };
        let js::JsExpr::Object(obj) = decl.declarations[0].init.as_ref().unwrap() else {
            panic!("expected object literal");
        };
        assert_eq!(obj.properties.len(), 3);
        assert!(matches!(
            &obj.properties[1].value,
            js::JsExpr::Literal(js::LiteralExpr { value: js::LitValue::Num(n), .. }) if n == "5"
        ));
        assert!(matches!(
            &obj.properties[2].value,
            js::JsExpr::Literal(js::LiteralExpr { value: js::LitValue::Num(n), .. }) if n == "6"
        ));
        assert!(!handler.notes().is_empty());
    }

    #[test]
    fn test_numeric_suffix_stripped() {
        let (program, _) = map("var price = 10.5m;");
        let js::JsStmt::Var(decl) = &program.body[0] else {
            panic!("expected var");
        };
        assert!(matches!(
            decl.declarations[0].init.as_ref().unwrap(),
            js::JsExpr::Literal(js::LiteralExpr { value: js::LitValue::Num(n), .. }) if n == "10.5"
        ));
    }
}
