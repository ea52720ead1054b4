//! Parser test suite.

use wren_ast::expr::*;
use wren_ast::stmt::*;
use wren_ast::visitor::{walk_expr, Visitor};
use wren_diagnostics::Span;
use wren_lexer::{SourceBuffer, TokenKind};

use crate::parser::{ParseResult, Parser};

// ---- Helpers ----

fn parse(src: &str) -> ParseResult {
    let buffer = SourceBuffer::new("test.wren", src);
    Parser::new(&buffer).parse()
}

/// Parse expecting clean syntax.
fn module(src: &str) -> Module {
    let result = parse(src);
    assert!(
        result.diagnostics.is_empty(),
        "parse errors for input:\n{}\n\n{:?}",
        src,
        result.diagnostics
    );
    result.module
}

/// Parse a single statement.
fn stmt(src: &str) -> Stmt {
    let mut module = module(src);
    assert_eq!(module.statements.len(), 1, "expected one statement");
    module.statements.remove(0)
}

/// Parse a single expression statement.
fn expr(src: &str) -> Expr {
    match stmt(src) {
        Stmt::Expression(e) => e,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn var_stmt(src: &str) -> VarStmt {
    match stmt(src) {
        Stmt::Var(v) => *v,
        other => panic!("expected var statement, got {other:?}"),
    }
}

fn class_stmt(src: &str) -> ClassStmt {
    match stmt(src) {
        Stmt::Class(c) => *c,
        other => panic!("expected class statement, got {other:?}"),
    }
}

// ========================================================
// Variable declarations
// ========================================================

#[test]
fn test_var_plain() {
    let v = var_stmt("var x");
    assert_eq!(v.name.name(), "x");
    assert!(v.type_annotation.is_none());
    assert!(v.initializer.is_none());
}

#[test]
fn test_var_with_annotation() {
    let v = var_stmt("var x: Num");
    assert_eq!(v.type_annotation.unwrap().name.name(), "Num");
    assert!(v.initializer.is_none());
}

#[test]
fn test_var_with_initializer() {
    let v = var_stmt("var x = 42");
    assert!(v.type_annotation.is_none());
    assert!(matches!(v.initializer, Some(Expr::Num(_))));
}

#[test]
fn test_var_with_annotation_and_initializer() {
    let v = var_stmt("var x: Num = 42");
    assert_eq!(v.type_annotation.unwrap().name.name(), "Num");
    assert!(matches!(v.initializer, Some(Expr::Num(_))));
}

#[test]
fn test_var_initializer_may_continue_after_equal() {
    let v = var_stmt("var x =\n  42");
    assert!(matches!(v.initializer, Some(Expr::Num(_))));
}

// ========================================================
// Bare names are calls
// ========================================================

#[test]
fn test_bare_name_is_call() {
    let e = expr("foo");
    let Expr::Call(call) = e else {
        panic!("expected call, got {e:?}")
    };
    assert!(call.receiver.is_none());
    assert_eq!(call.name.name(), "foo");
    assert!(call.arguments.is_none());
    assert!(call.block_argument.is_none());
    assert!(call.is_bare_name());
}

#[test]
fn test_empty_argument_list_is_not_bare() {
    let Expr::Call(call) = expr("foo()") else {
        panic!()
    };
    assert_eq!(call.arguments.as_deref(), Some(&[][..]));
    assert!(!call.is_bare_name());
}

#[test]
fn test_call_with_arguments() {
    let Expr::Call(call) = expr("foo(1, 2)") else {
        panic!()
    };
    assert_eq!(call.arguments.unwrap().len(), 2);
}

#[test]
fn test_call_with_block_argument() {
    let Expr::Call(call) = expr("foo { 1 }") else {
        panic!()
    };
    assert!(call.arguments.is_none());
    let body = call.block_argument.unwrap();
    assert!(body.parameters.is_none());
    assert!(body.expression.is_some());
}

#[test]
fn test_block_argument_with_parameters() {
    let Expr::Call(call) = expr("items.map {|a, b| a }") else {
        panic!()
    };
    let body = call.block_argument.unwrap();
    assert_eq!(body.parameters.unwrap().len(), 2);
}

// ========================================================
// Method chains and newline tolerance
// ========================================================

/// The shape check for `a.b`: a getter call on a bare-name receiver.
fn assert_getter_chain(e: &Expr) {
    let Expr::Call(call) = e else {
        panic!("expected call, got {e:?}")
    };
    assert_eq!(call.name.name(), "b");
    assert!(call.arguments.is_none());
    assert!(call.block_argument.is_none());
    let Some(Expr::Call(receiver)) = &call.receiver else {
        panic!("expected bare-name receiver")
    };
    assert!(receiver.is_bare_name());
    assert_eq!(receiver.name.name(), "a");
}

#[test]
fn test_dot_chain_same_line() {
    assert_getter_chain(&expr("a.b"));
}

#[test]
fn test_dot_chain_next_line() {
    assert_getter_chain(&expr("a\n.b"));
}

#[test]
fn test_dot_chain_blank_lines_and_indent() {
    assert_getter_chain(&expr("a\n\n  .b"));
}

#[test]
fn test_newline_without_dot_ends_statement() {
    let m = module("a\nb");
    assert_eq!(m.statements.len(), 2);
}

#[test]
fn test_chain_after_call() {
    let Expr::Call(call) = expr("a.b(1).c") else {
        panic!()
    };
    assert_eq!(call.name.name(), "c");
    let Some(Expr::Call(inner)) = &call.receiver else {
        panic!()
    };
    assert_eq!(inner.name.name(), "b");
    assert_eq!(inner.arguments.as_ref().unwrap().len(), 1);
}

#[test]
fn test_dot_then_newline_is_tolerated() {
    assert_getter_chain(&expr("a.\n  b"));
}

// ========================================================
// Subscripts
// ========================================================

#[test]
fn test_subscript() {
    let Expr::Subscript(sub) = expr("a[1]") else {
        panic!()
    };
    assert_eq!(sub.arguments.len(), 1);
}

#[test]
fn test_subscript_multiple_arguments() {
    let Expr::Subscript(sub) = expr("grid[1, 2]") else {
        panic!()
    };
    assert_eq!(sub.arguments.len(), 2);
}

#[test]
fn test_subscript_assignment_target() {
    let Expr::Assignment(assign) = expr("a[0] = 1") else {
        panic!()
    };
    assert!(matches!(assign.target, Expr::Subscript(_)));
}

// ========================================================
// Operators and precedence
// ========================================================

#[test]
fn test_additive_binds_tighter_than_comparison() {
    let Expr::Infix(cmp) = expr("1 + 2 < 3 * 4") else {
        panic!()
    };
    assert_eq!(cmp.operator.kind, TokenKind::Less);
    assert!(matches!(cmp.left, Expr::Infix(_)));
    assert!(matches!(cmp.right, Expr::Infix(_)));
}

#[test]
fn test_left_associativity() {
    let Expr::Infix(outer) = expr("1 - 2 - 3") else {
        panic!()
    };
    assert_eq!(outer.operator.kind, TokenKind::Minus);
    let Expr::Infix(inner) = outer.left else {
        panic!("expected (1 - 2) - 3")
    };
    assert_eq!(inner.operator.kind, TokenKind::Minus);
}

#[test]
fn test_is_expression() {
    let Expr::Infix(infix) = expr("x is Num") else {
        panic!()
    };
    assert_eq!(infix.operator.kind, TokenKind::Is);
}

#[test]
fn test_is_binds_between_equality_and_comparison() {
    // `a == b is Num` parses as `a == (b is Num)`.
    let Expr::Infix(outer) = expr("a == b is Num") else {
        panic!()
    };
    assert_eq!(outer.operator.kind, TokenKind::EqualEqual);
    let Expr::Infix(right) = outer.right else {
        panic!()
    };
    assert_eq!(right.operator.kind, TokenKind::Is);
}

#[test]
fn test_range_operators() {
    let Expr::Infix(range) = expr("1..5") else {
        panic!()
    };
    assert_eq!(range.operator.kind, TokenKind::DotDot);
    let Expr::Infix(range) = expr("1...5") else {
        panic!()
    };
    assert_eq!(range.operator.kind, TokenKind::DotDotDot);
}

#[test]
fn test_shift_and_bitwise() {
    let Expr::Infix(or) = expr("a | b ^ c & d << e") else {
        panic!()
    };
    assert_eq!(or.operator.kind, TokenKind::Pipe);
}

#[test]
fn test_prefix_operators() {
    let Expr::Prefix(neg) = expr("-x") else {
        panic!()
    };
    assert_eq!(neg.operator.kind, TokenKind::Minus);

    let Expr::Prefix(not) = expr("!!x") else {
        panic!()
    };
    assert_eq!(not.operator.kind, TokenKind::Bang);
    assert!(matches!(not.operand, Expr::Prefix(_)));
}

#[test]
fn test_prefix_binds_tighter_than_infix() {
    let Expr::Infix(mul) = expr("-a * b") else {
        panic!()
    };
    assert_eq!(mul.operator.kind, TokenKind::Star);
    assert!(matches!(mul.left, Expr::Prefix(_)));
}

#[test]
fn test_newline_after_binary_operator() {
    let Expr::Infix(add) = expr("1 +\n2") else {
        panic!()
    };
    assert_eq!(add.operator.kind, TokenKind::Plus);
}

// ========================================================
// Assignment and conditional
// ========================================================

#[test]
fn test_assignment_is_right_associative() {
    let Expr::Assignment(outer) = expr("a = b = 1") else {
        panic!()
    };
    assert!(matches!(outer.value, Expr::Assignment(_)));
}

#[test]
fn test_conditional() {
    let Expr::Conditional(cond) = expr("a ? 1 : 2") else {
        panic!()
    };
    assert!(matches!(cond.then_branch, Expr::Num(_)));
    assert!(matches!(cond.else_branch, Expr::Num(_)));
}

#[test]
fn test_conditional_right_associative() {
    let Expr::Conditional(outer) = expr("a ? 1 : b ? 2 : 3") else {
        panic!()
    };
    assert!(matches!(outer.else_branch, Expr::Conditional(_)));
}

#[test]
fn test_conditional_newline_tolerance() {
    let Expr::Conditional(_) = expr("a ?\n1 :\n2") else {
        panic!()
    };
}

#[test]
fn test_assignment_of_conditional() {
    let Expr::Assignment(assign) = expr("x = a ? 1 : 2") else {
        panic!()
    };
    assert!(matches!(assign.value, Expr::Conditional(_)));
}

// ========================================================
// Literals
// ========================================================

#[test]
fn test_list_literal() {
    let Expr::List(list) = expr("[1, 2, 3]") else {
        panic!()
    };
    assert_eq!(list.elements.len(), 3);
}

#[test]
fn test_list_literal_multiline() {
    let Expr::List(list) = expr("[\n  1,\n  2,\n]") else {
        panic!()
    };
    assert_eq!(list.elements.len(), 2);
}

#[test]
fn test_empty_list_and_map() {
    assert!(matches!(expr("[]"), Expr::List(_)));
    // At statement position `{}` is a block; as an initializer it is
    // a map literal.
    assert!(matches!(var_stmt("var m = {}").initializer, Some(Expr::Map(_))));
}

#[test]
fn test_map_literal() {
    let Some(Expr::Map(map)) = var_stmt("var m = {\"a\": 1, \"b\": 2}").initializer else {
        panic!()
    };
    assert_eq!(map.entries.len(), 2);
}

#[test]
fn test_map_value_can_be_conditional() {
    let Some(Expr::Map(map)) = var_stmt("var m = {\"a\": x ? 1 : 2}").initializer else {
        panic!()
    };
    assert!(matches!(map.entries[0].value, Expr::Conditional(_)));
}

#[test]
fn test_interpolation_expression() {
    let Expr::Interpolation(interp) = expr("\"sum: %(1 + 2), done\"") else {
        panic!()
    };
    assert_eq!(interp.strings.len(), 2);
    assert_eq!(interp.expressions.len(), 1);
    assert!(matches!(interp.expressions[0], Expr::Infix(_)));
}

#[test]
fn test_fields_and_literals() {
    assert!(matches!(expr("_field"), Expr::Field(_)));
    assert!(matches!(expr("__static"), Expr::StaticField(_)));
    assert!(matches!(expr("true"), Expr::Bool(_)));
    assert!(matches!(expr("null"), Expr::Null(_)));
    assert!(matches!(expr("this"), Expr::This(_)));
    assert!(matches!(expr("\"s\""), Expr::String(_)));
}

#[test]
fn test_grouping() {
    let Expr::Infix(mul) = expr("(1 + 2) * 3") else {
        panic!()
    };
    assert_eq!(mul.operator.kind, TokenKind::Star);
    assert!(matches!(mul.left, Expr::Grouping(_)));
}

// ========================================================
// Super
// ========================================================

#[test]
fn test_super_bare_call() {
    let Expr::Super(sup) = expr("super(1)") else {
        panic!()
    };
    assert!(sup.name.is_none());
    assert_eq!(sup.arguments.unwrap().len(), 1);
}

#[test]
fn test_super_with_name() {
    let Expr::Super(sup) = expr("super.toString") else {
        panic!()
    };
    assert_eq!(sup.name.unwrap().name(), "toString");
    assert!(sup.arguments.is_none());
}

// ========================================================
// Statements
// ========================================================

#[test]
fn test_if_else() {
    let Stmt::If(if_stmt) = stmt("if (x) y else z") else {
        panic!()
    };
    assert!(if_stmt.else_branch.is_some());
}

#[test]
fn test_if_condition_newline_tolerance() {
    let Stmt::If(_) = stmt("if (\n  x) y") else {
        panic!()
    };
}

#[test]
fn test_while() {
    let Stmt::While(while_stmt) = stmt("while (x) x = x - 1") else {
        panic!()
    };
    assert!(matches!(
        while_stmt.body,
        Stmt::Expression(Expr::Assignment(_))
    ));
}

#[test]
fn test_for_with_annotation() {
    let Stmt::For(for_stmt) = stmt("for (i: Num in 1..3) i") else {
        panic!()
    };
    assert_eq!(for_stmt.variable.name(), "i");
    assert_eq!(for_stmt.type_annotation.unwrap().name.name(), "Num");
}

#[test]
fn test_return_with_and_without_value() {
    let Stmt::Return(with_value) = stmt("return 1") else {
        panic!()
    };
    assert!(with_value.value.is_some());

    let Stmt::Return(bare) = stmt("return") else {
        panic!()
    };
    assert!(bare.value.is_none());
}

#[test]
fn test_break_and_continue() {
    assert!(matches!(stmt("break"), Stmt::Break(_)));
    assert!(matches!(stmt("continue"), Stmt::Continue(_)));
}

#[test]
fn test_block_statement() {
    let Stmt::Block(block) = stmt("{\n  var a = 1\n  a\n}") else {
        panic!()
    };
    assert_eq!(block.statements.len(), 2);
}

#[test]
fn test_empty_block_statement() {
    let Stmt::Block(block) = stmt("{}") else {
        panic!()
    };
    assert!(block.statements.is_empty());
}

// ========================================================
// Imports
// ========================================================

#[test]
fn test_bare_import() {
    let Stmt::Import(import) = stmt("import \"mod\"") else {
        panic!()
    };
    assert!(import.is_bare());
}

#[test]
fn test_import_with_variables() {
    let Stmt::Import(import) = stmt("import \"mod\" for A, B") else {
        panic!()
    };
    let vars = import.variables.unwrap();
    let names: Vec<_> = vars.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_import_alias_replaces_original() {
    let Stmt::Import(import) = stmt("import \"mod\" for A as C, B") else {
        panic!()
    };
    let vars = import.variables.unwrap();
    let names: Vec<_> = vars.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["C", "B"]);
}

// ========================================================
// Classes and methods
// ========================================================

#[test]
fn test_class_plain() {
    let class = class_stmt("class Foo {}");
    assert_eq!(class.name.name(), "Foo");
    assert!(class.superclass.is_none());
    assert!(class.foreign_keyword.is_none());
    assert!(class.methods.is_empty());
}

#[test]
fn test_class_with_superclass() {
    let class = class_stmt("class Foo is Bar {}");
    assert_eq!(class.superclass.unwrap().name(), "Bar");
}

#[test]
fn test_foreign_class() {
    let class = class_stmt("foreign class Foo {}");
    assert!(class.foreign_keyword.is_some());
}

#[test]
fn test_method_kinds() {
    let class = class_stmt(
        "class Foo {\n  construct new() {}\n  static helper() { 1 }\n  plain() { 2 }\n}",
    );
    assert_eq!(class.methods.len(), 3);
    assert!(class.methods[0].construct_keyword.is_some());
    assert!(class.methods[0].is_static());
    assert!(class.methods[1].static_keyword.is_some());
    assert!(!class.methods[2].is_static());
}

#[test]
fn test_getter_has_no_parameter_list() {
    let class = class_stmt("class Foo {\n  size { 1 }\n}");
    assert!(class.methods[0].parameters.is_none());
}

#[test]
fn test_setter() {
    let class = class_stmt("class Foo {\n  size=(value) { value }\n}");
    let method = &class.methods[0];
    assert!(method.is_setter);
    assert_eq!(method.name.name(), "size");
    assert_eq!(method.parameters.as_ref().unwrap().len(), 1);
}

#[test]
fn test_operator_methods() {
    let class = class_stmt("class Vec {\n  +(other) { other }\n  -(other) { other }\n  !{ this }\n}");
    assert_eq!(class.methods[0].name.kind, TokenKind::Plus);
    assert_eq!(class.methods[1].name.kind, TokenKind::Minus);
    assert_eq!(class.methods[2].name.kind, TokenKind::Bang);
    assert!(class.methods[2].parameters.is_none());
}

#[test]
fn test_subscript_method() {
    let class = class_stmt("class Grid {\n  [x, y] { 1 }\n  [x, y]=(value) { value }\n}");
    let getter = &class.methods[0];
    assert_eq!(getter.name.kind, TokenKind::LeftBracket);
    assert_eq!(getter.parameters.as_ref().unwrap().len(), 2);
    let setter = &class.methods[1];
    assert!(setter.is_setter);
    assert_eq!(setter.parameters.as_ref().unwrap().len(), 3);
}

#[test]
fn test_foreign_method_has_no_body() {
    let class = class_stmt("class Foo {\n  foreign compute(x)\n}");
    let method = &class.methods[0];
    assert!(method.foreign_keyword.is_some());
    assert!(method.body.is_none());
}

#[test]
fn test_method_return_annotation() {
    let class = class_stmt("class Foo {\n  bar() -> Num { 1 }\n}");
    assert_eq!(
        class.methods[0].return_type.as_ref().unwrap().name.name(),
        "Num"
    );
}

#[test]
fn test_annotated_parameters() {
    let class = class_stmt("class Foo {\n  bar(a: Num, b) { a }\n}");
    let params = class.methods[0].parameters.as_ref().unwrap();
    assert_eq!(params[0].type_annotation.as_ref().unwrap().name.name(), "Num");
    assert!(params[1].type_annotation.is_none());
}

#[test]
fn test_method_parameters_shared_with_body() {
    let class = class_stmt("class Foo {\n  bar(a) { a }\n}");
    let method = &class.methods[0];
    assert_eq!(
        method.parameters.as_ref(),
        method.body.as_ref().unwrap().parameters.as_ref()
    );
}

// ========================================================
// Bodies
// ========================================================

#[test]
fn test_empty_body() {
    let class = class_stmt("class Foo {\n  bar() {}\n}");
    let body = class.methods[0].body.as_ref().unwrap();
    assert!(body.expression.is_none());
    assert!(body.statements.is_none());
}

#[test]
fn test_expression_body() {
    let class = class_stmt("class Foo {\n  bar() { 1 }\n}");
    let body = class.methods[0].body.as_ref().unwrap();
    assert!(body.expression.is_some());
    assert!(body.statements.is_none());
}

#[test]
fn test_statement_body() {
    let class = class_stmt("class Foo {\n  bar() {\n    var a = 1\n    return a\n  }\n}");
    let body = class.methods[0].body.as_ref().unwrap();
    assert!(body.expression.is_none());
    assert_eq!(body.statements.as_ref().unwrap().len(), 2);
}

// ========================================================
// Spans
// ========================================================

/// Every expression's span must sit inside its parent expression's
/// span.
struct SpanChecker {
    stack: Vec<Span>,
}

impl Visitor for SpanChecker {
    fn visit_expr(&mut self, expr: &Expr) {
        let span = expr.span();
        if let Some(parent) = self.stack.last() {
            assert!(
                parent.contains(span),
                "child span {span:?} escapes parent {parent:?}"
            );
        }
        self.stack.push(span);
        walk_expr(self, expr);
        self.stack.pop();
    }
}

#[test]
fn test_expression_spans_nest() {
    let m = module(
        "var x = (1 + 2) * f(3, [4, 5])\n\
         class Foo {\n  bar(a) { a ? \"y\" : \"n\" }\n}\n\
         items.map {|i| i + 1 }",
    );
    let mut checker = SpanChecker { stack: Vec::new() };
    checker.visit_module(&m);
}

#[test]
fn test_statement_span_covers_source() {
    let src = "var x: Num = 42";
    let s = stmt(src);
    let span = s.span();
    assert_eq!(span.start, 0);
    assert_eq!(span.end as usize, src.len());
}

// ========================================================
// Error reporting and recovery
// ========================================================

#[test]
fn test_missing_paren_reports_and_continues() {
    let result = parse("var x = (1 + 2\nvar y = 3");
    assert!(!result.diagnostics.is_empty());
    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.code.as_deref() == Some("parse-error")));
}

#[test]
fn test_error_token_surfaces_scanner_message() {
    let result = parse("var x = $");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("unexpected character"));
}

#[test]
fn test_error_severity() {
    let result = parse("var = 1");
    assert!(!result.diagnostics.is_empty());
    assert!(result.diagnostics.iter().all(|d| d.is_error()));
}

#[test]
fn test_module_is_always_produced() {
    let result = parse("class {{{");
    // Best-effort parsing never panics and always yields a module.
    let _ = result.module;
}

#[test]
fn test_diagnostics_are_deterministic() {
    let first = parse("var = \nclass {{{");
    let second = parse("var = \nclass {{{");
    assert_eq!(first.diagnostics, second.diagnostics);
}
