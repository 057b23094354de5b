//! C# AST node definitions.
//!
//! Same design as the JavaScript side: closed tagged variants, owned
//! children, a source line on every node. The statically-typed surface adds
//! declarations (namespaces, type declarations, members), types
//! ([`TypeRef`], [`QualifiedName`]) and the expression layers JavaScript
//! lacks (conditional, null-coalescing, bitwise and shift operators).

pub use crate::lit::LitValue;

/// AST root: one source file.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub members: Vec<CsMember>,
    pub line: u32,
}

/// `using System.Collections.Generic;`
#[derive(Clone, Debug, PartialEq)]
pub struct UsingDirective {
    pub name: QualifiedName,
    pub line: u32,
}

/// Top-level (or namespace-level) member.
///
/// Bare statements are legal at the top level; the emitter decides whether
/// they need wrapping into a `Main` method.
#[derive(Clone, Debug, PartialEq)]
pub enum CsMember {
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Struct(StructDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    GlobalStmt(CsStmt),
    /// A method without an enclosing type. Produced only by the
    /// JavaScript-to-C# mapper for top-level functions; the emitter folds it
    /// into the wrapper class next to `Main`.
    GlobalMethod(MethodDecl),
}

/// `namespace Name.Space { members }`
#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceDecl {
    pub name: QualifiedName,
    pub members: Vec<CsMember>,
    pub line: u32,
}

/// `class Name<T> : Base where T : Bound { members }`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub modifiers: Vec<String>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub bases: Vec<TypeRef>,
    pub constraints: Vec<WhereClause>,
    pub members: Vec<Member>,
    pub line: u32,
}

/// `struct Name { members }`
#[derive(Clone, Debug, PartialEq)]
pub struct StructDecl {
    pub modifiers: Vec<String>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub bases: Vec<TypeRef>,
    pub constraints: Vec<WhereClause>,
    pub members: Vec<Member>,
    pub line: u32,
}

/// `interface Name { bodyless members }`
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceDecl {
    pub modifiers: Vec<String>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub bases: Vec<TypeRef>,
    pub constraints: Vec<WhereClause>,
    pub members: Vec<Member>,
    pub line: u32,
}

/// `enum Name { A, B = 2 }`
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDecl {
    pub modifiers: Vec<String>,
    pub name: String,
    pub members: Vec<EnumMember>,
    pub line: u32,
}

/// One enum member with its optional explicit value.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<CsExpr>,
    pub line: u32,
}

/// Member of a class, struct or interface body.
#[derive(Clone, Debug, PartialEq)]
pub enum Member {
    Method(MethodDecl),
    Constructor(CtorDecl),
    Property(PropertyDecl),
    Event(EventDecl),
}

impl Member {
    /// Source line of the member.
    pub fn line(&self) -> u32 {
        match self {
            Member::Method(m) => m.line,
            Member::Constructor(c) => c.line,
            Member::Property(p) => p.line,
            Member::Event(e) => e.line,
        }
    }
}

/// `modifiers ReturnType Name<T>(params) where T : Bound { body }`
///
/// `body` is `None` for interface methods.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub modifiers: Vec<String>,
    pub return_type: TypeRef,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub constraints: Vec<WhereClause>,
    pub body: Option<Block>,
    pub line: u32,
}

/// `modifiers Name(params) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct CtorDecl {
    pub modifiers: Vec<String>,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
    pub line: u32,
}

/// `modifiers Type Name { get ...; set ...; }`
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDecl {
    pub modifiers: Vec<String>,
    pub ty: TypeRef,
    pub name: String,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
    pub line: u32,
}

/// One `get`/`set` accessor; `body` is `None` for the auto form (`get;`).
#[derive(Clone, Debug, PartialEq)]
pub struct Accessor {
    pub body: Option<Block>,
    pub line: u32,
}

/// `modifiers event Type Name;`
#[derive(Clone, Debug, PartialEq)]
pub struct EventDecl {
    pub modifiers: Vec<String>,
    pub ty: TypeRef,
    pub name: String,
    pub line: u32,
}

/// One parameter with its optional passing-mode modifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub modifier: Option<String>,
    pub ty: TypeRef,
    pub name: String,
    pub line: u32,
}

/// One generic type parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub line: u32,
}

/// `where T : Bound1, Bound2`
#[derive(Clone, Debug, PartialEq)]
pub struct WhereClause {
    pub param: String,
    pub bounds: Vec<TypeRef>,
    pub line: u32,
}

/// Named type reference, possibly generic and possibly a rank-1 array.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeRef {
    pub name: QualifiedName,
    pub args: Vec<TypeRef>,
    pub array: bool,
    pub line: u32,
}

impl TypeRef {
    /// A plain non-generic named type.
    pub fn simple(name: &str, line: u32) -> Self {
        Self {
            name: QualifiedName {
                parts: vec![name.to_string()],
                line,
            },
            args: Vec::new(),
            array: false,
            line,
        }
    }
}

/// Dot-separated identifier path.
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedName {
    pub parts: Vec<String>,
    pub line: u32,
}

impl QualifiedName {
    /// Render as `A.B.C`.
    pub fn dotted(&self) -> String {
        self.parts.join(".")
    }
}

/// Statement-level node.
#[derive(Clone, Debug, PartialEq)]
pub enum CsStmt {
    Var(VarStmt),
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    Foreach(ForeachStmt),
    Switch(SwitchStmt),
    Return(ReturnStmt),
    Throw(ThrowStmt),
    Break(JumpStmt),
    Continue(JumpStmt),
    Try(TryStmt),
    Expr(ExprStmt),
    /// Comment marker standing in for an unconvertible construct.
    Marker(MarkerStmt),
}

impl CsStmt {
    /// Source line of the node.
    pub fn line(&self) -> u32 {
        match self {
            CsStmt::Var(n) => n.line,
            CsStmt::Block(n) => n.line,
            CsStmt::If(n) => n.line,
            CsStmt::While(n) => n.line,
            CsStmt::DoWhile(n) => n.line,
            CsStmt::For(n) => n.line,
            CsStmt::Foreach(n) => n.line,
            CsStmt::Switch(n) => n.line,
            CsStmt::Return(n) => n.line,
            CsStmt::Throw(n) => n.line,
            CsStmt::Break(n) | CsStmt::Continue(n) => n.line,
            CsStmt::Try(n) => n.line,
            CsStmt::Expr(n) => n.line,
            CsStmt::Marker(n) => n.line,
        }
    }
}

/// `var name = init;`
#[derive(Clone, Debug, PartialEq)]
pub struct VarStmt {
    pub name: String,
    pub init: Option<CsExpr>,
    pub line: u32,
}

/// `{ statements }`
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub body: Vec<CsStmt>,
    pub line: u32,
}

/// `if (test) consequent else alternate`
#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub test: CsExpr,
    pub consequent: Box<CsStmt>,
    pub alternate: Option<Box<CsStmt>>,
    pub line: u32,
}

/// `while (test) body`
#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub test: CsExpr,
    pub body: Box<CsStmt>,
    pub line: u32,
}

/// `do body while (test);`
#[derive(Clone, Debug, PartialEq)]
pub struct DoWhileStmt {
    pub body: Box<CsStmt>,
    pub test: CsExpr,
    pub line: u32,
}

/// Classic three-part `for`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub test: Option<CsExpr>,
    pub update: Option<CsExpr>,
    pub body: Box<CsStmt>,
    pub line: u32,
}

/// Initializer of a classic `for`.
#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    Var(VarStmt),
    Expr(CsExpr),
}

/// `foreach (Type binding in iterable) body`; `ty` is `None` for `var`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForeachStmt {
    pub ty: Option<TypeRef>,
    pub binding: String,
    pub iterable: CsExpr,
    pub body: Box<CsStmt>,
    pub line: u32,
}

/// `switch (discriminant) { cases }`
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchStmt {
    pub discriminant: CsExpr,
    pub cases: Vec<SwitchCase>,
    pub line: u32,
}

/// One `case expr:` (or `default:` when `test` is `None`) with its body.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub test: Option<CsExpr>,
    pub body: Vec<CsStmt>,
    pub line: u32,
}

/// `return expr?;`
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStmt {
    pub argument: Option<CsExpr>,
    pub line: u32,
}

/// `throw expr;`
#[derive(Clone, Debug, PartialEq)]
pub struct ThrowStmt {
    pub argument: CsExpr,
    pub line: u32,
}

/// `break;` / `continue;`
#[derive(Clone, Debug, PartialEq)]
pub struct JumpStmt {
    pub line: u32,
}

/// `try { } catch (Type e) { } finally { }`
#[derive(Clone, Debug, PartialEq)]
pub struct TryStmt {
    pub block: Block,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<Block>,
    pub line: u32,
}

/// Catch clause with optional exception type and binding.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub ty: Option<TypeRef>,
    pub param: Option<String>,
    pub body: Block,
    pub line: u32,
}

/// Expression statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprStmt {
    pub expr: CsExpr,
    pub line: u32,
}

/// Comment marker; see [`CsStmt::Marker`].
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerStmt {
    pub text: String,
    pub line: u32,
}

/// Expression-level node.
#[derive(Clone, Debug, PartialEq)]
pub enum CsExpr {
    Assign(Box<AssignExpr>),
    Cond(Box<CondExpr>),
    Binary(Box<BinaryExpr>),
    Unary(Box<UnaryExpr>),
    Update(Box<UpdateExpr>),
    Call(Box<CallExpr>),
    New(Box<NewExpr>),
    Member(Box<MemberExpr>),
    Index(Box<IndexExpr>),
    Ident(IdentExpr),
    Literal(LiteralExpr),
    /// Comment marker standing in for an unconvertible expression.
    Marker(MarkerExpr),
}

impl CsExpr {
    /// Source line of the node.
    pub fn line(&self) -> u32 {
        match self {
            CsExpr::Assign(n) => n.line,
            CsExpr::Cond(n) => n.line,
            CsExpr::Binary(n) => n.line,
            CsExpr::Unary(n) => n.line,
            CsExpr::Update(n) => n.line,
            CsExpr::Call(n) => n.line,
            CsExpr::New(n) => n.line,
            CsExpr::Member(n) => n.line,
            CsExpr::Index(n) => n.line,
            CsExpr::Ident(n) => n.line,
            CsExpr::Literal(n) => n.line,
            CsExpr::Marker(n) => n.line,
        }
    }
}

/// `target op value`, right-associative.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignExpr {
    pub op: String,
    pub target: CsExpr,
    pub value: CsExpr,
    pub line: u32,
}

/// `test ? consequent : alternate`
#[derive(Clone, Debug, PartialEq)]
pub struct CondExpr {
    pub test: CsExpr,
    pub consequent: CsExpr,
    pub alternate: CsExpr,
    pub line: u32,
}

/// `left op right` with the operator kept as its source string.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub op: String,
    pub left: CsExpr,
    pub right: CsExpr,
    pub line: u32,
}

/// Prefix unary operator.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub op: String,
    pub operand: CsExpr,
    pub line: u32,
}

/// `++`/`--` in prefix or postfix position.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateExpr {
    pub op: String,
    pub prefix: bool,
    pub operand: CsExpr,
    pub line: u32,
}

/// `callee(args)`
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callee: CsExpr,
    pub args: Vec<CsExpr>,
    pub line: u32,
}

/// `new Callee(args)`
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpr {
    pub callee: CsExpr,
    pub args: Vec<CsExpr>,
    pub line: u32,
}

/// `object.property`
#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpr {
    pub object: CsExpr,
    pub property: String,
    pub line: u32,
}

/// `object[index]`
#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpr {
    pub object: CsExpr,
    pub index: CsExpr,
    pub line: u32,
}

/// Identifier reference.
#[derive(Clone, Debug, PartialEq)]
pub struct IdentExpr {
    pub name: String,
    pub line: u32,
}

/// Literal with its tagged value.
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralExpr {
    pub value: LitValue,
    pub line: u32,
}

/// Comment marker; see [`CsExpr::Marker`].
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerExpr {
    pub text: String,
    pub line: u32,
}
