//! The type checker — annotation consistency and method existence.

use std::collections::{HashMap, HashSet};

use wren_ast::expr::{CallExpr, Expr};
use wren_ast::stmt::{Body, ClassStmt, Method, Module, Stmt};
use wren_ast::visitor::{walk_body, walk_expr, walk_method, walk_stmt, Visitor};
use wren_diagnostics::{Diagnostic, Span};

use crate::core;

/// Check a module, returning warnings in traversal order. The caller
/// is responsible for skipping this pass when error-severity
/// diagnostics already exist.
pub fn check(module: &Module) -> Vec<Diagnostic> {
    let mut collector = ClassCollector {
        classes: HashMap::new(),
    };
    collector.visit_module(module);

    let mut checker = TypeChecker::new(collector.classes);
    checker.visit_module(module);
    checker.diagnostics
}

/// Methods of one user-defined class, split the way dispatch works:
/// constructors and statics answer on the class, everything else on
/// instances.
struct ClassInfo {
    instance_methods: HashSet<String>,
    static_methods: HashSet<String>,
    superclass: Option<String>,
}

impl ClassInfo {
    fn from_class(class: &ClassStmt) -> Self {
        let mut info = ClassInfo {
            instance_methods: HashSet::new(),
            static_methods: HashSet::new(),
            superclass: class.superclass.as_ref().map(|t| t.name().to_string()),
        };
        for method in &class.methods {
            let name = method.name.name().to_string();
            let set = if method.is_static() {
                &mut info.static_methods
            } else {
                &mut info.instance_methods
            };
            if method.is_setter {
                set.insert(format!("{name}="));
            }
            set.insert(name);
        }
        info
    }
}

/// The registry pre-scan. Classes may be declared inside blocks,
/// loop bodies, and method bodies, so the whole module is walked,
/// not just its top level.
struct ClassCollector {
    classes: HashMap<String, ClassInfo>,
}

impl Visitor for ClassCollector {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::Class(class) = stmt {
            self.classes
                .insert(class.name.name().to_string(), ClassInfo::from_class(class));
        }
        walk_stmt(self, stmt);
    }
}

/// One environment frame: explicit annotations (`declared`) checked
/// on assignment, and `inferred` (annotations plus initializer
/// inference) used for method existence.
#[derive(Default)]
struct EnvFrame {
    declared: HashMap<String, String>,
    inferred: HashMap<String, String>,
}

struct TypeChecker {
    classes: HashMap<String, ClassInfo>,
    env: Vec<EnvFrame>,
    class_stack: Vec<String>,
    return_type: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

/// The type a literal expression evaluates to, if it is one.
fn literal_type(expr: &Expr) -> Option<&'static str> {
    match expr {
        Expr::Num(_) => Some("Num"),
        Expr::String(_) => Some("String"),
        Expr::Interpolation(_) => Some("String"),
        Expr::Bool(_) => Some("Bool"),
        Expr::Null(_) => Some("Null"),
        Expr::List(_) => Some("List"),
        Expr::Map(_) => Some("Map"),
        _ => None,
    }
}

/// A bare uppercase identifier, read as a class reference.
fn bare_uppercase_name(expr: &Expr) -> Option<&str> {
    if let Expr::Call(call) = expr {
        if call.is_bare_name() {
            let name = call.name.name();
            if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                return Some(name);
            }
        }
    }
    None
}

impl TypeChecker {
    fn new(classes: HashMap<String, ClassInfo>) -> Self {
        Self {
            classes,
            env: vec![EnvFrame::default()],
            class_stack: Vec::new(),
            return_type: None,
            diagnostics: Vec::new(),
        }
    }

    // ---- Environment ----

    fn push_frame(&mut self) {
        self.env.push(EnvFrame::default());
    }

    fn pop_frame(&mut self) {
        self.env.pop();
    }

    fn declare(&mut self, name: &str, ty: &str, is_annotation: bool) {
        let frame = self.env.last_mut().expect("env is never empty");
        if is_annotation {
            frame.declared.insert(name.to_string(), ty.to_string());
        }
        frame.inferred.insert(name.to_string(), ty.to_string());
    }

    fn lookup_declared(&self, name: &str) -> Option<&String> {
        self.env.iter().rev().find_map(|f| f.declared.get(name))
    }

    fn lookup_inferred(&self, name: &str) -> Option<&String> {
        self.env.iter().rev().find_map(|f| f.inferred.get(name))
    }

    fn warn(&mut self, message: String, span: Span, code: &str) {
        self.diagnostics
            .push(Diagnostic::warning(message, span).with_code(code));
    }

    // ---- Inference ----

    /// Infer a type for a receiver expression: literals, bare names
    /// through the environment, `Class.new(...)` constructor calls,
    /// `this`, and transparent grouping.
    fn infer_type(&self, expr: &Expr) -> Option<String> {
        if let Some(ty) = literal_type(expr) {
            return Some(ty.to_string());
        }
        match expr {
            Expr::This(_) => self.class_stack.last().cloned(),
            Expr::Grouping(grouping) => self.infer_type(&grouping.expression),
            Expr::Call(call) if call.is_bare_name() => {
                self.lookup_inferred(call.name.name()).cloned()
            }
            Expr::Call(call) if call.name.name() == "new" => {
                let receiver = call.receiver.as_ref()?;
                bare_uppercase_name(receiver).map(str::to_string)
            }
            _ => None,
        }
    }

    // ---- Method existence ----

    fn check_call(&mut self, call: &CallExpr) {
        let Some(receiver) = &call.receiver else {
            return;
        };
        let method = call.name.name().to_string();

        // A bare uppercase receiver is a class reference: dispatch
        // is static, and statics are not inherited.
        if let Some(class_name) = bare_uppercase_name(receiver) {
            // Every class answers `attributes`.
            if method == "attributes" {
                return;
            }
            let known_missing = if let Some(info) = self.classes.get(class_name) {
                !info.static_methods.contains(&method)
            } else if let Some(statics) = core::static_methods(class_name) {
                !core::table_contains(statics, &method)
            } else {
                // Unknown class, possibly imported.
                false
            };
            if known_missing {
                self.warn(
                    format!("class '{class_name}' has no static method '{method}'"),
                    call.name.span,
                    "unknown-method",
                );
            }
            return;
        }

        let Some(receiver_type) = self.infer_type(receiver) else {
            return;
        };
        // A variable that started as null was probably reassigned.
        if receiver_type == "Null" {
            return;
        }

        // Walk the instance-method chain through user and core
        // superclasses; the visited set breaks declaration cycles.
        let mut current = Some(receiver_type.clone());
        let mut visited = HashSet::new();
        let mut any_known = false;
        while let Some(class_name) = current {
            if !visited.insert(class_name.clone()) {
                break;
            }
            if let Some(info) = self.classes.get(&class_name) {
                any_known = true;
                if info.instance_methods.contains(&method) {
                    return;
                }
                current = info.superclass.clone();
            } else if let Some(methods) = core::instance_methods(&class_name) {
                any_known = true;
                if core::table_contains(methods, &method) {
                    return;
                }
                current = core::superclass(&class_name).map(str::to_string);
            } else {
                current = None;
            }
        }

        if core::is_object_method(&method) {
            return;
        }
        if any_known {
            self.warn(
                format!("'{receiver_type}' has no method '{method}'"),
                call.name.span,
                "unknown-method",
            );
        }
    }
}

impl Visitor for TypeChecker {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Var(var) => {
                if let Some(annotation) = &var.type_annotation {
                    let declared = annotation.name.name().to_string();
                    match &var.initializer {
                        Some(initializer) => {
                            if let Some(actual) = literal_type(initializer) {
                                if actual != declared {
                                    self.warn(
                                        format!(
                                            "variable '{}' is declared as {declared} but its \
                                             initializer is a {actual}",
                                            var.name.name()
                                        ),
                                        initializer.span(),
                                        "type-mismatch",
                                    );
                                }
                            }
                        }
                        None => {
                            if declared != "Null" {
                                self.warn(
                                    format!(
                                        "variable '{}' has type {declared} but no initializer \
                                         (defaults to Null)",
                                        var.name.name()
                                    ),
                                    annotation.name.span,
                                    "type-mismatch",
                                );
                            }
                        }
                    }
                    self.declare(var.name.name(), &declared, true);
                } else if let Some(initializer) = &var.initializer {
                    if let Some(inferred) = self.infer_type(initializer) {
                        self.declare(var.name.name(), &inferred, false);
                    }
                }
                if let Some(initializer) = &var.initializer {
                    self.visit_expr(initializer);
                }
            }
            Stmt::Class(class) => {
                self.class_stack.push(class.name.name().to_string());
                for method in &class.methods {
                    self.visit_method(method);
                }
                self.class_stack.pop();
            }
            Stmt::For(for_stmt) => match &for_stmt.type_annotation {
                Some(annotation) => {
                    let ty = annotation.name.name().to_string();
                    self.push_frame();
                    self.declare(for_stmt.variable.name(), &ty, true);
                    self.visit_expr(&for_stmt.iterator);
                    self.visit_stmt(&for_stmt.body);
                    self.pop_frame();
                }
                None => walk_stmt(self, stmt),
            },
            Stmt::Return(ret) => {
                if let Some(expected) = self.return_type.clone() {
                    match &ret.value {
                        Some(value) => {
                            if let Some(actual) = literal_type(value) {
                                if actual != expected {
                                    self.warn(
                                        format!(
                                            "method declares return type {expected} but \
                                             returns {actual}"
                                        ),
                                        value.span(),
                                        "type-mismatch",
                                    );
                                }
                            }
                        }
                        None => {
                            if expected != "Null" {
                                self.warn(
                                    format!(
                                        "method declares return type {expected} but returns \
                                         nothing"
                                    ),
                                    ret.keyword.span,
                                    "type-mismatch",
                                );
                            }
                        }
                    }
                }
                walk_stmt(self, stmt);
            }
            _ => walk_stmt(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Assignment(assignment) => {
                if let Expr::Call(target) = &assignment.target {
                    if target.is_bare_name() {
                        if let Some(declared) = self.lookup_declared(target.name.name()).cloned() {
                            if let Some(actual) = literal_type(&assignment.value) {
                                if actual != declared {
                                    self.warn(
                                        format!(
                                            "cannot assign {actual} to '{}' of declared type \
                                             {declared}",
                                            target.name.name()
                                        ),
                                        assignment.value.span(),
                                        "type-mismatch",
                                    );
                                }
                            }
                        }
                    }
                }
                walk_expr(self, expr);
            }
            Expr::Call(call) => {
                self.check_call(call);
                walk_expr(self, expr);
            }
            _ => walk_expr(self, expr),
        }
    }

    fn visit_method(&mut self, method: &Method) {
        self.push_frame();
        if let Some(parameters) = &method.parameters {
            for parameter in parameters {
                if let Some(annotation) = &parameter.type_annotation {
                    self.declare(parameter.name.name(), annotation.name.name(), true);
                }
            }
        }
        let saved = std::mem::replace(
            &mut self.return_type,
            method
                .return_type
                .as_ref()
                .map(|a| a.name.name().to_string()),
        );
        walk_method(self, method);
        self.return_type = saved;
        self.pop_frame();
    }

    fn visit_body(&mut self, body: &Body) {
        self.push_frame();
        if let Some(parameters) = &body.parameters {
            for parameter in parameters {
                if let Some(annotation) = &parameter.type_annotation {
                    self.declare(parameter.name.name(), annotation.name.name(), true);
                }
            }
        }
        if let (Some(expression), Some(expected)) = (&body.expression, self.return_type.clone()) {
            if let Some(actual) = literal_type(expression) {
                if actual != expected {
                    self.warn(
                        format!("method declares return type {expected} but returns {actual}"),
                        expression.span(),
                        "type-mismatch",
                    );
                }
            }
        }
        walk_body(self, body);
        self.pop_frame();
    }
}
