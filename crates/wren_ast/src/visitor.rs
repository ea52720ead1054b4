//! Generic AST traversal.
//!
//! The `Visitor` trait dispatches each node kind to a handler whose
//! default implementation descends into children in source order.
//! Passes override only the handlers they care about and call the
//! matching `walk_*` function to keep descending.

use crate::expr::Expr;
use crate::stmt::{Body, Method, Module, Stmt};

pub trait Visitor: Sized {
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_method(&mut self, method: &Method) {
        walk_method(self, method);
    }

    fn visit_body(&mut self, body: &Body) {
        walk_body(self, body);
    }
}

pub fn walk_module<V: Visitor>(visitor: &mut V, module: &Module) {
    for stmt in &module.statements {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Break(_) | Stmt::Continue(_) | Stmt::Import(_) => {}
        Stmt::Block(block) => {
            for stmt in &block.statements {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::Class(class) => {
            for method in &class.methods {
                visitor.visit_method(method);
            }
        }
        Stmt::Expression(expr) => visitor.visit_expr(expr),
        Stmt::For(for_stmt) => {
            visitor.visit_expr(&for_stmt.iterator);
            visitor.visit_stmt(&for_stmt.body);
        }
        Stmt::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.condition);
            visitor.visit_stmt(&if_stmt.then_branch);
            if let Some(else_branch) = &if_stmt.else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Var(var) => {
            if let Some(initializer) = &var.initializer {
                visitor.visit_expr(initializer);
            }
        }
        Stmt::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.condition);
            visitor.visit_stmt(&while_stmt.body);
        }
    }
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Bool(_)
        | Expr::Field(_)
        | Expr::Null(_)
        | Expr::Num(_)
        | Expr::StaticField(_)
        | Expr::String(_)
        | Expr::This(_) => {}

        Expr::Assignment(assignment) => {
            visitor.visit_expr(&assignment.target);
            visitor.visit_expr(&assignment.value);
        }
        Expr::Call(call) => {
            if let Some(receiver) = &call.receiver {
                visitor.visit_expr(receiver);
            }
            if let Some(arguments) = &call.arguments {
                for argument in arguments {
                    visitor.visit_expr(argument);
                }
            }
            if let Some(body) = &call.block_argument {
                visitor.visit_body(body);
            }
        }
        Expr::Conditional(conditional) => {
            visitor.visit_expr(&conditional.condition);
            visitor.visit_expr(&conditional.then_branch);
            visitor.visit_expr(&conditional.else_branch);
        }
        Expr::Grouping(grouping) => visitor.visit_expr(&grouping.expression),
        Expr::Infix(infix) => {
            visitor.visit_expr(&infix.left);
            visitor.visit_expr(&infix.right);
        }
        Expr::Interpolation(interpolation) => {
            for expression in &interpolation.expressions {
                visitor.visit_expr(expression);
            }
        }
        Expr::List(list) => {
            for element in &list.elements {
                visitor.visit_expr(element);
            }
        }
        Expr::Map(map) => {
            for entry in &map.entries {
                visitor.visit_expr(&entry.key);
                visitor.visit_expr(&entry.value);
            }
        }
        Expr::Prefix(prefix) => visitor.visit_expr(&prefix.operand),
        Expr::Subscript(subscript) => {
            visitor.visit_expr(&subscript.receiver);
            for argument in &subscript.arguments {
                visitor.visit_expr(argument);
            }
        }
        Expr::Super(sup) => {
            if let Some(arguments) = &sup.arguments {
                for argument in arguments {
                    visitor.visit_expr(argument);
                }
            }
            if let Some(body) = &sup.block_argument {
                visitor.visit_body(body);
            }
        }
    }
}

pub fn walk_method<V: Visitor>(visitor: &mut V, method: &Method) {
    if let Some(body) = &method.body {
        visitor.visit_body(body);
    }
}

pub fn walk_body<V: Visitor>(visitor: &mut V, body: &Body) {
    if let Some(expression) = &body.expression {
        visitor.visit_expr(expression);
    }
    if let Some(statements) = &body.statements {
        for stmt in statements {
            visitor.visit_stmt(stmt);
        }
    }
}
