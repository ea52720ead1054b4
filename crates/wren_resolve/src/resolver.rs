//! Scope resolver — walks the AST and checks every name use.

use wren_ast::expr::Expr;
use wren_ast::stmt::{Body, Module, Stmt};
use wren_ast::visitor::{walk_body, walk_expr, walk_stmt, Visitor};
use wren_diagnostics::Diagnostic;
use wren_lexer::{SourceBuffer, Token};

use crate::scope::{DeclSite, Frame, ScopeStack};
use crate::suggest::suggest;

/// Resolve all names in a module, returning scoping diagnostics in
/// traversal order (forward-reference findings come last).
pub fn resolve(module: &Module, source: &SourceBuffer) -> Vec<Diagnostic> {
    let mut resolver = Resolver {
        source,
        scopes: ScopeStack::new(),
        forward_references: Vec::new(),
        has_bare_import: false,
        diagnostics: Vec::new(),
    };
    resolver.visit_module(module);

    // A bare import may define anything, so unresolved names from
    // class bodies cannot be judged.
    if !resolver.has_bare_import {
        resolver.check_forward_references();
    }
    resolver.diagnostics
}

struct Resolver<'src> {
    source: &'src SourceBuffer,
    scopes: ScopeStack,
    /// Names used in class bodies without a declaration in sight;
    /// validated against module scope after the whole module is seen.
    forward_references: Vec<Token>,
    has_bare_import: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Resolver<'_> {
    // ---- Declaration ----

    fn declare(&mut self, name: &Token) {
        let text = name.name().to_string();
        match self.scopes.innermost_mut() {
            // Class bodies don't introduce lexical bindings.
            Frame::ClassMarker => {}
            Frame::Regular(map) => {
                if let Some(existing) = map.get(&text) {
                    let message = match existing {
                        DeclSite::Declared(previous) => format!(
                            "variable '{}' is already declared on line {}",
                            text,
                            self.source.line_at(previous.span.start)
                        ),
                        DeclSite::Builtin => {
                            format!("variable '{text}' is already declared")
                        }
                    };
                    self.diagnostics.push(
                        Diagnostic::error(message, name.span).with_code("duplicate-variable"),
                    );
                } else {
                    map.insert(text, DeclSite::Declared(name.clone()));
                }
            }
        }
    }

    // ---- Resolution ----

    fn resolve_name(&mut self, name: &Token) {
        let text = name.name();
        for frame in self.scopes.frames().iter().rev() {
            match frame {
                Frame::Regular(map) => {
                    if map.contains_key(text) {
                        return;
                    }
                }
                Frame::ClassMarker => {
                    // Inside a class body, an unresolved name may be
                    // an implicit self-send or a module variable
                    // declared further down. Check module scope now;
                    // otherwise judge it in the post-pass, once the
                    // whole module has been seen.
                    if self.scopes.module_scope().contains_key(text) {
                        return;
                    }
                    self.forward_references.push(name.clone());
                    return;
                }
            }
        }
        self.report_undefined(name);
    }

    fn report_undefined(&mut self, name: &Token) {
        let text = name.name();
        let candidates = self.scopes.visible_names();
        let message = match suggest(text, &candidates) {
            Some(similar) => {
                format!("undefined variable '{text}', did you mean '{similar}'?")
            }
            None => format!("undefined variable '{text}'"),
        };
        self.diagnostics
            .push(Diagnostic::error(message, name.span).with_code("undefined-variable"));
    }

    fn check_forward_references(&mut self) {
        let pending = std::mem::take(&mut self.forward_references);
        for name in &pending {
            if !self.scopes.module_scope().contains_key(name.name()) {
                self.report_undefined(name);
            }
        }
    }
}

impl Visitor for Resolver<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Var(var) => {
                self.declare(&var.name);
                if let Some(initializer) = &var.initializer {
                    self.visit_expr(initializer);
                }
            }
            Stmt::Class(class) => {
                self.declare(&class.name);
                self.scopes.begin_class();
                for method in &class.methods {
                    self.visit_method(method);
                }
                self.scopes.end_class();
            }
            Stmt::Block(block) => {
                self.scopes.begin();
                for stmt in &block.statements {
                    self.visit_stmt(stmt);
                }
                self.scopes.end();
            }
            Stmt::For(for_stmt) => {
                self.scopes.begin();
                self.declare(&for_stmt.variable);
                self.visit_expr(&for_stmt.iterator);
                self.visit_stmt(&for_stmt.body);
                self.scopes.end();
            }
            Stmt::Import(import) => match &import.variables {
                Some(variables) => {
                    for variable in variables {
                        self.declare(variable);
                    }
                }
                None => self.has_bare_import = true,
            },
            _ => walk_stmt(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Call(call) => {
                match &call.receiver {
                    Some(receiver) => self.visit_expr(receiver),
                    // A bare name or implicit call resolves its name.
                    None => self.resolve_name(&call.name),
                }
                if let Some(arguments) = &call.arguments {
                    for argument in arguments {
                        self.visit_expr(argument);
                    }
                }
                if let Some(body) = &call.block_argument {
                    self.visit_body(body);
                }
            }
            _ => walk_expr(self, expr),
        }
    }

    fn visit_body(&mut self, body: &Body) {
        self.scopes.begin();
        if let Some(parameters) = &body.parameters {
            for parameter in parameters {
                self.declare(&parameter.name);
            }
        }
        walk_body(self, body);
        self.scopes.end();
    }
}
