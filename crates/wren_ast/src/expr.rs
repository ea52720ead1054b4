//! Expression AST nodes.

use wren_diagnostics::Span;
use wren_lexer::Token;

use crate::stmt::Body;

/// Expression node.
///
/// There is deliberately no "identifier" variant: a bare name like
/// `foo` is a `Call` with no receiver, no argument list, and no
/// block argument. Downstream passes depend on that collapse.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assignment(Box<AssignmentExpr>),
    Bool(Token),
    Call(Box<CallExpr>),
    Conditional(Box<ConditionalExpr>),
    Field(Token),
    Grouping(Box<GroupingExpr>),
    Infix(Box<InfixExpr>),
    Interpolation(Box<InterpolationExpr>),
    List(Box<ListExpr>),
    Map(Box<MapExpr>),
    Null(Token),
    Num(Token),
    Prefix(Box<PrefixExpr>),
    StaticField(Token),
    String(Token),
    Subscript(Box<SubscriptExpr>),
    Super(Box<SuperExpr>),
    This(Token),
}

/// Assignment: `target = value`. Any expression is accepted as a
/// target syntactically; only some forms are meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Expr,
    pub value: Expr,
}

/// Method call, getter access, or bare name: `receiver.name(args)`.
///
/// `arguments` is `None` for a getter (`foo.bar`), `Some(vec![])`
/// for an explicit empty argument list (`foo.bar()`).
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub receiver: Option<Expr>,
    pub name: Token,
    pub arguments: Option<Vec<Expr>>,
    pub block_argument: Option<Body>,
}

impl CallExpr {
    /// A free identifier: no receiver, no argument list, no block.
    pub fn is_bare_name(&self) -> bool {
        self.receiver.is_none() && self.arguments.is_none() && self.block_argument.is_none()
    }
}

/// Ternary conditional: `condition ? then : else`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Expr,
    pub then_branch: Expr,
    pub else_branch: Expr,
}

/// Parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub left_paren: Token,
    pub expression: Expr,
    pub right_paren: Token,
}

/// Binary operator application, including `is` type tests.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub left: Expr,
    pub operator: Token,
    pub right: Expr,
}

/// String with `%(...)` interpolations. `strings` always has one
/// more element than `expressions`; the first carries kind
/// `Interpolation`, the last kind `String`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationExpr {
    pub strings: Vec<Token>,
    pub expressions: Vec<Expr>,
}

/// List literal: `[a, b, c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    pub left_bracket: Token,
    pub elements: Vec<Expr>,
    pub right_bracket: Token,
}

/// Map literal: `{key: value, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapExpr {
    pub left_brace: Token,
    pub entries: Vec<MapEntry>,
    pub right_brace: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
}

/// Prefix operator application: `-x`, `!x`, `~x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: Token,
    pub operand: Expr,
}

/// Subscript: `receiver[args]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub receiver: Expr,
    pub left_bracket: Token,
    pub arguments: Vec<Expr>,
    pub right_bracket: Token,
}

/// Superclass dispatch: `super`, `super.name`, `super(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperExpr {
    pub keyword: Token,
    pub name: Option<Token>,
    pub arguments: Option<Vec<Expr>>,
    pub block_argument: Option<Body>,
}

impl Expr {
    /// Byte span covering the whole expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Bool(t)
            | Expr::Field(t)
            | Expr::Null(t)
            | Expr::Num(t)
            | Expr::StaticField(t)
            | Expr::String(t)
            | Expr::This(t) => t.span,

            Expr::Assignment(a) => a.target.span().merge(a.value.span()),
            Expr::Conditional(c) => c.condition.span().merge(c.else_branch.span()),
            Expr::Grouping(g) => g.left_paren.span.merge(g.right_paren.span),
            Expr::Infix(i) => i.left.span().merge(i.right.span()),
            Expr::List(l) => l.left_bracket.span.merge(l.right_bracket.span),
            Expr::Map(m) => m.left_brace.span.merge(m.right_brace.span),
            Expr::Prefix(p) => p.operator.span.merge(p.operand.span()),
            Expr::Subscript(s) => s.receiver.span().merge(s.right_bracket.span),

            Expr::Interpolation(i) => {
                let first = i.strings.first().map(|t| t.span).unwrap_or(Span::new(0, 0));
                let last = i.strings.last().map(|t| t.span).unwrap_or(first);
                first.merge(last)
            }

            Expr::Call(c) => {
                let mut span = c.name.span;
                if let Some(receiver) = &c.receiver {
                    span = span.merge(receiver.span());
                }
                if let Some(arguments) = &c.arguments {
                    for argument in arguments {
                        span = span.merge(argument.span());
                    }
                }
                if let Some(body) = &c.block_argument {
                    span = span.merge(body.span());
                }
                span
            }

            Expr::Super(s) => {
                let mut span = s.keyword.span;
                if let Some(name) = &s.name {
                    span = span.merge(name.span);
                }
                if let Some(arguments) = &s.arguments {
                    for argument in arguments {
                        span = span.merge(argument.span());
                    }
                }
                if let Some(body) = &s.block_argument {
                    span = span.merge(body.span());
                }
                span
            }
        }
    }
}
