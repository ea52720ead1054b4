//! The scope stack — maps from name to declaration site, plus class
//! markers.

use std::collections::HashMap;

use wren_lexer::Token;

/// Names every Wren module sees without declaring them.
pub const MODULE_BUILTINS: &[&str] = &[
    "Bool",
    "Class",
    "Fiber",
    "Fn",
    "List",
    "Map",
    "MapKeySequence",
    "MapSequence",
    "MapValueSequence",
    "Null",
    "Num",
    "Object",
    "Range",
    "Sequence",
    "String",
    "StringByteSequence",
    "StringCodePointSequence",
    "System",
    "WhereSequence",
];

/// Where a name was declared: in source, or preseeded.
#[derive(Debug, Clone)]
pub enum DeclSite {
    Builtin,
    Declared(Token),
}

/// One element of the scope stack. A class body is a marker, not a
/// scope: it never holds bindings.
#[derive(Debug)]
pub enum Frame {
    Regular(HashMap<String, DeclSite>),
    ClassMarker,
}

/// A stack of scope frames. The bottom frame is the module scope,
/// preseeded with the built-in classes.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        let mut module = HashMap::new();
        for name in MODULE_BUILTINS {
            module.insert(name.to_string(), DeclSite::Builtin);
        }
        Self {
            frames: vec![Frame::Regular(module)],
        }
    }

    pub fn begin(&mut self) {
        self.frames.push(Frame::Regular(HashMap::new()));
    }

    pub fn end(&mut self) {
        let frame = self.frames.pop().expect("cannot pop the module scope");
        debug_assert!(matches!(frame, Frame::Regular(_)));
    }

    pub fn begin_class(&mut self) {
        self.frames.push(Frame::ClassMarker);
    }

    pub fn end_class(&mut self) {
        let frame = self.frames.pop().expect("cannot pop the module scope");
        debug_assert!(matches!(frame, Frame::ClassMarker));
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn innermost_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("scope stack is never empty")
    }

    /// The bottom (module) frame's bindings.
    pub fn module_scope(&self) -> &HashMap<String, DeclSite> {
        match &self.frames[0] {
            Frame::Regular(map) => map,
            Frame::ClassMarker => unreachable!("module scope is always a regular frame"),
        }
    }

    /// Every name visible from the innermost scope, for suggestions.
    pub fn visible_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for frame in self.frames.iter().rev() {
            if let Frame::Regular(map) = frame {
                names.extend(map.keys().map(String::as_str));
            }
        }
        names
    }
}
