//! C# emitter.
//!
//! Allman braces, four-space indent, one statement per line, binary
//! expressions always parenthesized. A call of `console.log` is rewritten to
//! `Console.WriteLine` on the way out.
//!
//! Wrapping is conditional: only when the compilation unit carries global
//! statements or detached methods does the emitter produce the
//! `using System;` + `public class Program` + `Main` scaffold. Type
//! declarations that were already there emit as-is, so an input that was a
//! complete program is never double-wrapped.

use crossc_par::cs::ast::*;

use crate::writer::{render_literal, Writer};

/// Emit a C# compilation unit as formatted source text.
pub fn emit_cs(unit: &CompilationUnit) -> String {
    let mut emitter = CsEmitter { w: Writer::new() };
    emitter.emit_unit(unit);
    emitter.w.finish()
}

struct CsEmitter {
    w: Writer,
}

impl CsEmitter {
    fn emit_unit(&mut self, unit: &CompilationUnit) {
        let globals: Vec<&CsStmt> = unit
            .members
            .iter()
            .filter_map(|m| match m {
                CsMember::GlobalStmt(stmt) => Some(stmt),
                _ => None,
            })
            .collect();
        let methods: Vec<&MethodDecl> = unit
            .members
            .iter()
            .filter_map(|m| match m {
                CsMember::GlobalMethod(method) => Some(method),
                _ => None,
            })
            .collect();
        let needs_wrapper = !globals.is_empty() || !methods.is_empty();

        let mut usings: Vec<String> = unit.usings.iter().map(|u| u.name.dotted()).collect();
        if needs_wrapper && !usings.iter().any(|u| u == "System") {
            usings.insert(0, "System".to_string());
        }

        for using in &usings {
            self.w.line(&format!("using {using};"));
        }
        if !usings.is_empty() {
            self.w.blank();
        }

        let mut first = true;
        for member in &unit.members {
            match member {
                CsMember::GlobalStmt(_) | CsMember::GlobalMethod(_) => continue,
                other => {
                    if !first {
                        self.w.blank();
                    }
                    self.emit_member(other);
                    first = false;
                }
            }
        }

        if needs_wrapper {
            if !first {
                self.w.blank();
            }
            self.w.line("public class Program");
            self.w.line("{");
            self.w.indent();

            self.w.line("public static void Main(string[] args)");
            self.w.line("{");
            self.w.indent();
            for stmt in &globals {
                self.emit_stmt(stmt);
            }
            self.w.dedent();
            self.w.line("}");

            for method in &methods {
                self.w.blank();
                self.emit_method(method);
            }

            self.w.dedent();
            self.w.line("}");
        }
    }

    fn emit_member(&mut self, member: &CsMember) {
        match member {
            CsMember::Namespace(ns) => {
                self.w.line(&format!("namespace {}", ns.name.dotted()));
                self.w.line("{");
                self.w.indent();
                let mut first = true;
                for inner in &ns.members {
                    if !first {
                        self.w.blank();
                    }
                    self.emit_member(inner);
                    first = false;
                }
                self.w.dedent();
                self.w.line("}");
            }
            CsMember::Class(decl) => self.emit_class_like(
                &decl.modifiers,
                "class",
                &decl.name,
                &decl.type_params,
                &decl.bases,
                &decl.constraints,
                &decl.members,
            ),
            CsMember::Struct(decl) => self.emit_class_like(
                &decl.modifiers,
                "struct",
                &decl.name,
                &decl.type_params,
                &decl.bases,
                &decl.constraints,
                &decl.members,
            ),
            CsMember::Interface(decl) => self.emit_class_like(
                &decl.modifiers,
                "interface",
                &decl.name,
                &decl.type_params,
                &decl.bases,
                &decl.constraints,
                &decl.members,
            ),
            CsMember::Enum(decl) => {
                self.w
                    .line(&with_modifiers(&decl.modifiers, &format!("enum {}", decl.name)));
                self.w.line("{");
                self.w.indent();
                for (i, member) in decl.members.iter().enumerate() {
                    let comma = if i + 1 < decl.members.len() { "," } else { "" };
                    match &member.value {
                        Some(value) => {
                            let rendered = self.expr(value);
                            self.w
                                .line(&format!("{} = {}{}", member.name, rendered, comma));
                        }
                        None => self.w.line(&format!("{}{}", member.name, comma)),
                    }
                }
                self.w.dedent();
                self.w.line("}");
            }
            CsMember::GlobalStmt(stmt) => self.emit_stmt(stmt),
            CsMember::GlobalMethod(method) => self.emit_method(method),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_class_like(
        &mut self,
        modifiers: &[String],
        keyword: &str,
        name: &str,
        type_params: &[TypeParam],
        bases: &[TypeRef],
        constraints: &[WhereClause],
        members: &[Member],
    ) {
        let mut header = with_modifiers(modifiers, &format!("{keyword} {name}"));
        if !type_params.is_empty() {
            let params: Vec<&str> = type_params.iter().map(|p| p.name.as_str()).collect();
            header.push_str(&format!("<{}>", params.join(", ")));
        }
        if !bases.is_empty() {
            let bases: Vec<String> = bases.iter().map(|b| self.type_ref(b)).collect();
            header.push_str(&format!(" : {}", bases.join(", ")));
        }
        for clause in constraints {
            let bounds: Vec<String> = clause.bounds.iter().map(|b| self.type_ref(b)).collect();
            header.push_str(&format!(" where {} : {}", clause.param, bounds.join(", ")));
        }

        self.w.line(&header);
        self.w.line("{");
        self.w.indent();
        let mut first = true;
        for member in members {
            if !first {
                self.w.blank();
            }
            self.emit_type_member(member);
            first = false;
        }
        self.w.dedent();
        self.w.line("}");
    }

    fn emit_type_member(&mut self, member: &Member) {
        match member {
            Member::Method(method) => self.emit_method(method),
            Member::Constructor(ctor) => {
                let params = self.params(&ctor.params);
                self.w
                    .line(&with_modifiers(&ctor.modifiers, &format!("{}({})", ctor.name, params)));
                self.emit_block(&ctor.body);
            }
            Member::Property(prop) => self.emit_property(prop),
            Member::Event(event) => {
                let ty = self.type_ref(&event.ty);
                self.w.line(&with_modifiers(
                    &event.modifiers,
                    &format!("event {} {};", ty, event.name),
                ));
            }
        }
    }

    fn emit_method(&mut self, method: &MethodDecl) {
        let mut signature = format!(
            "{} {}",
            self.type_ref(&method.return_type),
            method.name
        );
        if !method.type_params.is_empty() {
            let params: Vec<&str> = method.type_params.iter().map(|p| p.name.as_str()).collect();
            signature.push_str(&format!("<{}>", params.join(", ")));
        }
        signature.push_str(&format!("({})", self.params(&method.params)));
        for clause in &method.constraints {
            let bounds: Vec<String> = clause.bounds.iter().map(|b| self.type_ref(b)).collect();
            signature.push_str(&format!(" where {} : {}", clause.param, bounds.join(", ")));
        }

        match &method.body {
            Some(body) => {
                self.w.line(&with_modifiers(&method.modifiers, &signature));
                self.emit_block(body);
            }
            None => {
                self.w
                    .line(&with_modifiers(&method.modifiers, &format!("{signature};")));
            }
        }
    }

    fn emit_property(&mut self, prop: &PropertyDecl) {
        let header = with_modifiers(
            &prop.modifiers,
            &format!("{} {}", self.type_ref(&prop.ty), prop.name),
        );

        let auto = prop.getter.as_ref().map_or(true, |a| a.body.is_none())
            && prop.setter.as_ref().map_or(true, |a| a.body.is_none());

        if auto {
            let mut accessors = Vec::new();
            if prop.getter.is_some() {
                accessors.push("get;");
            }
            if prop.setter.is_some() {
                accessors.push("set;");
            }
            self.w
                .line(&format!("{} {{ {} }}", header, accessors.join(" ")));
            return;
        }

        self.w.line(&header);
        self.w.line("{");
        self.w.indent();
        if let Some(getter) = &prop.getter {
            self.emit_accessor("get", getter);
        }
        if let Some(setter) = &prop.setter {
            self.emit_accessor("set", setter);
        }
        self.w.dedent();
        self.w.line("}");
    }

    fn emit_accessor(&mut self, keyword: &str, accessor: &Accessor) {
        match &accessor.body {
            Some(body) => {
                self.w.line(keyword);
                self.emit_block(body);
            }
            None => self.w.line(&format!("{keyword};")),
        }
    }

    fn emit_block(&mut self, block: &Block) {
        self.w.line("{");
        self.w.indent();
        for stmt in &block.body {
            self.emit_stmt(stmt);
        }
        self.w.dedent();
        self.w.line("}");
    }

    /// Emit the body of a control statement, normalizing to a braced block.
    fn emit_body(&mut self, stmt: &CsStmt) {
        match stmt {
            CsStmt::Block(block) => self.emit_block(block),
            other => {
                self.w.line("{");
                self.w.indent();
                self.emit_stmt(other);
                self.w.dedent();
                self.w.line("}");
            }
        }
    }

    fn emit_stmt(&mut self, stmt: &CsStmt) {
        match stmt {
            CsStmt::Var(var) => {
                let rendered = self.render_var(var);
                self.w.line(&format!("{rendered};"));
            }
            CsStmt::Block(block) => self.emit_block(block),
            CsStmt::If(stmt) => self.emit_if(stmt),
            CsStmt::While(stmt) => {
                self.w.line(&format!("while {}", self.condition(&stmt.test)));
                self.emit_body(&stmt.body);
            }
            CsStmt::DoWhile(stmt) => {
                self.w.line("do");
                self.emit_body(&stmt.body);
                self.w
                    .line(&format!("while {};", self.condition(&stmt.test)));
            }
            CsStmt::For(stmt) => {
                let init = match &stmt.init {
                    Some(ForInit::Var(var)) => self.render_var(var),
                    Some(ForInit::Expr(expr)) => self.expr(expr),
                    None => String::new(),
                };
                let test = stmt.test.as_ref().map(|e| self.expr(e)).unwrap_or_default();
                let update = stmt
                    .update
                    .as_ref()
                    .map(|e| self.expr(e))
                    .unwrap_or_default();
                self.w.line(&format!("for ({init}; {test}; {update})"));
                self.emit_body(&stmt.body);
            }
            CsStmt::Foreach(stmt) => {
                let ty = stmt
                    .ty
                    .as_ref()
                    .map(|t| self.type_ref(t))
                    .unwrap_or_else(|| "var".to_string());
                let iterable = self.expr(&stmt.iterable);
                self.w
                    .line(&format!("foreach ({} {} in {})", ty, stmt.binding, iterable));
                self.emit_body(&stmt.body);
            }
            CsStmt::Switch(stmt) => {
                self.w
                    .line(&format!("switch {}", self.condition(&stmt.discriminant)));
                self.w.line("{");
                self.w.indent();
                for case in &stmt.cases {
                    match &case.test {
                        Some(test) => {
                            let rendered = self.expr(test);
                            self.w.line(&format!("case {rendered}:"));
                        }
                        None => self.w.line("default:"),
                    }
                    self.w.indent();
                    for inner in &case.body {
                        self.emit_stmt(inner);
                    }
                    self.w.dedent();
                }
                self.w.dedent();
                self.w.line("}");
            }
            CsStmt::Return(stmt) => match &stmt.argument {
                Some(expr) => {
                    let rendered = self.expr(expr);
                    self.w.line(&format!("return {rendered};"));
                }
                None => self.w.line("return;"),
            },
            CsStmt::Throw(stmt) => {
                let rendered = self.expr(&stmt.argument);
                self.w.line(&format!("throw {rendered};"));
            }
            CsStmt::Break(_) => self.w.line("break;"),
            CsStmt::Continue(_) => self.w.line("continue;"),
            CsStmt::Try(stmt) => {
                self.w.line("try");
                self.emit_block(&stmt.block);
                if let Some(clause) = &stmt.handler {
                    let filter = match (&clause.ty, &clause.param) {
                        (Some(ty), Some(param)) => {
                            format!(" ({} {})", self.type_ref(ty), param)
                        }
                        (Some(ty), None) => format!(" ({})", self.type_ref(ty)),
                        _ => String::new(),
                    };
                    self.w.line(&format!("catch{filter}"));
                    self.emit_block(&clause.body);
                }
                if let Some(finalizer) = &stmt.finalizer {
                    self.w.line("finally");
                    self.emit_block(finalizer);
                }
            }
            CsStmt::Expr(stmt) => {
                let rendered = self.expr(&stmt.expr);
                self.w.line(&format!("{rendered};"));
            }
            CsStmt::Marker(marker) => self.w.line(&format!("// {}", marker.text)),
        }
    }

    /// `if`/`else if`/`else` chains emit flat.
    fn emit_if(&mut self, stmt: &IfStmt) {
        self.w.line(&format!("if {}", self.condition(&stmt.test)));
        self.emit_body(&stmt.consequent);

        let mut alternate = stmt.alternate.as_deref();
        while let Some(alt) = alternate {
            match alt {
                CsStmt::If(nested) => {
                    self.w
                        .line(&format!("else if {}", self.condition(&nested.test)));
                    self.emit_body(&nested.consequent);
                    alternate = nested.alternate.as_deref();
                }
                other => {
                    self.w.line("else");
                    self.emit_body(other);
                    alternate = None;
                }
            }
        }
    }

    fn render_var(&self, var: &VarStmt) -> String {
        match &var.init {
            Some(init) => format!("var {} = {}", var.name, self.expr(init)),
            None => format!("var {}", var.name),
        }
    }

    fn params(&self, params: &[Param]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                let ty = self.type_ref(&p.ty);
                match &p.modifier {
                    Some(modifier) => format!("{} {} {}", modifier, ty, p.name),
                    None => format!("{} {}", ty, p.name),
                }
            })
            .collect();
        rendered.join(", ")
    }

    fn type_ref(&self, ty: &TypeRef) -> String {
        let mut out = ty.name.dotted();
        if !ty.args.is_empty() {
            let args: Vec<String> = ty.args.iter().map(|a| self.type_ref(a)).collect();
            out.push_str(&format!("<{}>", args.join(", ")));
        }
        if ty.array {
            out.push_str("[]");
        }
        out
    }

    /// A statement condition: binary expressions supply their own
    /// parentheses, everything else gets wrapped.
    fn condition(&self, expr: &CsExpr) -> String {
        match expr {
            CsExpr::Binary(_) => self.expr(expr),
            other => format!("({})", self.expr(other)),
        }
    }

    fn expr(&self, expr: &CsExpr) -> String {
        match expr {
            CsExpr::Assign(assign) => format!(
                "{} {} {}",
                self.expr(&assign.target),
                assign.op,
                self.expr(&assign.value)
            ),
            CsExpr::Cond(cond) => format!(
                "{} ? {} : {}",
                self.expr(&cond.test),
                self.expr(&cond.consequent),
                self.expr(&cond.alternate)
            ),
            CsExpr::Binary(binary) => format!(
                "({} {} {})",
                self.expr(&binary.left),
                binary.op,
                self.expr(&binary.right)
            ),
            CsExpr::Unary(unary) => format!("{}{}", unary.op, self.expr(&unary.operand)),
            CsExpr::Update(update) => {
                if update.prefix {
                    format!("{}{}", update.op, self.expr(&update.operand))
                } else {
                    format!("{}{}", self.expr(&update.operand), update.op)
                }
            }
            CsExpr::Call(call) => {
                let callee = self.callee(&call.callee);
                let args: Vec<String> = call.args.iter().map(|a| self.expr(a)).collect();
                format!("{}({})", callee, args.join(", "))
            }
            CsExpr::New(new) => {
                let args: Vec<String> = new.args.iter().map(|a| self.expr(a)).collect();
                format!("new {}({})", self.expr(&new.callee), args.join(", "))
            }
            CsExpr::Member(member) => {
                format!("{}.{}", self.expr(&member.object), member.property)
            }
            CsExpr::Index(index) => {
                format!("{}[{}]", self.expr(&index.object), self.expr(&index.index))
            }
            CsExpr::Ident(ident) => ident.name.clone(),
            CsExpr::Literal(literal) => render_literal(&literal.value),
            CsExpr::Marker(marker) => format!("/* {} */", marker.text),
        }
    }

    /// Render a call callee, rewriting the cross-language console surrogate.
    fn callee(&self, callee: &CsExpr) -> String {
        if let CsExpr::Member(member) = callee {
            if member.property == "log" {
                if let CsExpr::Ident(object) = &member.object {
                    if object.name == "console" {
                        return "Console.WriteLine".to_string();
                    }
                }
            }
        }
        self.expr(callee)
    }
}

fn with_modifiers(modifiers: &[String], rest: &str) -> String {
    if modifiers.is_empty() {
        rest.to_string()
    } else {
        format!("{} {}", modifiers.join(" "), rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossc_lex::{tokenize_cs, tokenize_js};
    use crossc_map::map_js_to_cs;
    use crossc_par::{parse_cs, parse_js};
    use crossc_util::{Handler, Metrics};

    fn roundtrip(source: &str) -> String {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let unit = parse_cs(tokenize_cs(source), &handler, &mut metrics);
        assert!(!handler.has_errors(), "parse failed for {source:?}");
        emit_cs(&unit)
    }

    fn convert(source: &str) -> String {
        let handler = Handler::new();
        let mut metrics = Metrics::new();
        let program = parse_js(tokenize_js(source), &handler, &mut metrics);
        assert!(!handler.has_errors(), "parse failed for {source:?}");
        emit_cs(&map_js_to_cs(program, &handler))
    }

    #[test]
    fn test_bare_statement_gets_wrapped() {
        let out = convert("let name = \"John\";");
        assert!(out.starts_with("using System;\n"));
        assert!(out.contains("public class Program"));
        assert!(out.contains("public static void Main(string[] args)"));
        assert!(out.contains("var name = \"John\";"));
    }

    #[test]
    fn test_console_rewrite() {
        let out = convert("console.log(\"Hello\");");
        assert!(out.contains("Console.WriteLine(\"Hello\");"));
    }

    #[test]
    fn test_type_declarations_not_double_wrapped() {
        let out = roundtrip("using System;\n\npublic class Widget { }");
        assert!(!out.contains("class Program"));
        assert!(!out.contains("Main("));
        assert!(out.contains("public class Widget"));
        // An existing `using System;` is not duplicated either.
        assert_eq!(out.matches("using System;").count(), 1);
    }

    #[test]
    fn test_mixed_members_wrap_only_globals() {
        let out = convert("class Point { norm() { return 0; } }\nlet p = new Point();");
        assert!(out.contains("public class Point"));
        let wrapper_pos = out.find("public class Program").unwrap();
        let point_pos = out.find("public class Point").unwrap();
        assert!(point_pos < wrapper_pos);
        assert!(out.contains("var p = new Point();"));
    }

    #[test]
    fn test_top_level_function_lands_next_to_main() {
        let out = convert("function greet(name) { console.log(name); }\ngreet(\"you\");");
        assert!(out.contains("public static void greet(string name)"));
        assert!(out.contains("greet(\"you\");"));
        let main_pos = out.find("Main(string[] args)").unwrap();
        let method_pos = out.find("public static void greet").unwrap();
        assert!(main_pos < method_pos);
    }

    #[test]
    fn test_for_header_shows_binary_parens() {
        let out = convert("for (let i = 0; i < 10; i++) { console.log(i); }");
        assert!(out.contains("for (var i = 0; (i < 10); i++)"));
        assert!(out.contains("Console.WriteLine(i);"));
    }

    #[test]
    fn test_if_condition_single_parens() {
        let out = convert("if (age >= 18) { console.log(\"Adult\"); }");
        assert!(out.contains("if (age >= 18)\n"));
        assert!(!out.contains("(("));
    }

    #[test]
    fn test_property_forms() {
        let out = roundtrip(
            "public class P { public string Name { get; set; } public int Age { get { return 1; } } }",
        );
        assert!(out.contains("public string Name { get; set; }"));
        assert!(out.contains("public int Age\n"));
        assert!(out.contains("get\n"));
    }

    #[test]
    fn test_enum_and_interface() {
        let out = roundtrip(
            "public interface IShape { int Area(); }\npublic enum Color { Red, Green = 2 }",
        );
        assert!(out.contains("public interface IShape"));
        assert!(out.contains("int Area();"));
        assert!(out.contains("Red,"));
        assert!(out.contains("Green = 2"));
    }

    #[test]
    fn test_generic_method_signature() {
        let out = roundtrip(
            "public class R { public List<T> Wrap<T>(T item) where T : IEntity { return null; } }",
        );
        assert!(out.contains("public List<T> Wrap<T>(T item) where T : IEntity"));
    }

    #[test]
    fn test_emission_deterministic() {
        let source = "using System;\nConsole.WriteLine(\"Hi\");";
        assert_eq!(roundtrip(source), roundtrip(source));
    }

    #[test]
    fn test_reparse_fixed_point() {
        let source = "public class A\n{\n    public int F()\n    {\n        return (1 + 2);\n    }\n}\n";
        let first = roundtrip(source);
        let second = roundtrip(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let out = convert("if (a > b) { console.log(a); } else { console.log(b); }");
        assert!(out.lines().all(|line| line.trim_end() == line));
    }
}
