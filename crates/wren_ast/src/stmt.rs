//! Statement AST nodes and auxiliaries.

use wren_diagnostics::Span;
use wren_lexer::Token;

use crate::expr::Expr;

/// Top-level node: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub statements: Vec<Stmt>,
}

/// Statement node. Definitions (classes, imports, variables) are
/// statements too; Wren allows them anywhere a statement goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Box<BlockStmt>),
    Break(Token),
    Class(Box<ClassStmt>),
    Continue(Token),
    Expression(Expr),
    For(Box<ForStmt>),
    If(Box<IfStmt>),
    Import(Box<ImportStmt>),
    Return(Box<ReturnStmt>),
    Var(Box<VarStmt>),
    While(Box<WhileStmt>),
}

/// Curly-brace statement block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub left_brace: Token,
    pub statements: Vec<Stmt>,
    pub right_brace: Token,
}

/// Class declaration, possibly `foreign`, with an optional
/// `is Superclass` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStmt {
    pub foreign_keyword: Option<Token>,
    pub class_keyword: Token,
    pub name: Token,
    pub superclass: Option<Token>,
    pub methods: Vec<Method>,
    pub right_brace: Token,
}

/// `for (variable in iterator) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub keyword: Token,
    pub variable: Token,
    pub type_annotation: Option<TypeAnnotation>,
    pub iterator: Expr,
    pub body: Stmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub then_branch: Stmt,
    pub else_branch: Option<Stmt>,
}

/// `import "path"` with an optional `for Name, Name as Alias, ...`
/// list. `variables` is `None` for a bare import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub keyword: Token,
    pub path: Token,
    pub variables: Option<Vec<Token>>,
}

impl ImportStmt {
    /// A bare import binds nothing locally and may define anything,
    /// so it suppresses forward-reference checking.
    pub fn is_bare(&self) -> bool {
        self.variables.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
}

/// `var name: Type = initializer`, annotation and initializer both
/// optional.
#[derive(Debug, Clone, PartialEq)]
pub struct VarStmt {
    pub keyword: Token,
    pub name: Token,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub body: Stmt,
}

/// A method inside a class body. A `foreign` method has no body;
/// every other method has one. Operators use their operator token as
/// the name; a setter shares its getter's name token and is flagged.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub foreign_keyword: Option<Token>,
    pub static_keyword: Option<Token>,
    pub construct_keyword: Option<Token>,
    pub name: Token,
    pub is_setter: bool,
    pub parameters: Option<Vec<Parameter>>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Option<Body>,
}

impl Method {
    pub fn is_static(&self) -> bool {
        self.static_keyword.is_some() || self.construct_keyword.is_some()
    }
}

/// A method or block-argument body: either a single expression or a
/// list of statements, never both. Both absent denotes `{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub parameters: Option<Vec<Parameter>>,
    pub expression: Option<Expr>,
    pub statements: Option<Vec<Stmt>>,
    pub left_brace: Token,
    pub right_brace: Token,
}

impl Body {
    pub fn span(&self) -> Span {
        self.left_brace.span.merge(self.right_brace.span)
    }
}

/// A declared parameter with an optional type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Token,
    pub type_annotation: Option<TypeAnnotation>,
}

/// The non-standard `: TypeName` annotation grammar: a single
/// type-name token.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub name: Token,
}

impl Stmt {
    /// Byte span covering the whole statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Break(t) | Stmt::Continue(t) => t.span,
            Stmt::Block(b) => b.left_brace.span.merge(b.right_brace.span),
            Stmt::Class(c) => {
                let start = c
                    .foreign_keyword
                    .as_ref()
                    .map(|t| t.span)
                    .unwrap_or(c.class_keyword.span);
                start.merge(c.right_brace.span)
            }
            Stmt::Expression(e) => e.span(),
            Stmt::For(f) => f.keyword.span.merge(f.body.span()),
            Stmt::If(i) => {
                let end = i
                    .else_branch
                    .as_ref()
                    .map(|s| s.span())
                    .unwrap_or_else(|| i.then_branch.span());
                i.keyword.span.merge(end)
            }
            Stmt::Import(i) => {
                let end = i
                    .variables
                    .as_ref()
                    .and_then(|vars| vars.last())
                    .map(|t| t.span)
                    .unwrap_or(i.path.span);
                i.keyword.span.merge(end)
            }
            Stmt::Return(r) => {
                let end = r
                    .value
                    .as_ref()
                    .map(|v| v.span())
                    .unwrap_or(r.keyword.span);
                r.keyword.span.merge(end)
            }
            Stmt::Var(v) => {
                let mut span = v.keyword.span.merge(v.name.span);
                if let Some(annotation) = &v.type_annotation {
                    span = span.merge(annotation.name.span);
                }
                if let Some(initializer) = &v.initializer {
                    span = span.merge(initializer.span());
                }
                span
            }
            Stmt::While(w) => w.keyword.span.merge(w.body.span()),
        }
    }
}
