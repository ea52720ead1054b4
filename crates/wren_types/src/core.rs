//! Fixed tables of core class methods.
//!
//! These reflect the commonly called subset of Wren's core library,
//! not the full surface; omissions must stay non-fatal, which is why
//! method-existence findings are warnings.

const OBJECT_METHODS: &[&str] = &["toString", "type", "is"];

const BOOL_METHODS: &[&str] = &["toString"];

const NULL_METHODS: &[&str] = &["toString"];

const NUM_METHODS: &[&str] = &[
    "abs",
    "acos",
    "asin",
    "atan",
    "atan2",
    "cbrt",
    "ceil",
    "clamp",
    "cos",
    "exp",
    "floor",
    "fraction",
    "isInfinity",
    "isInteger",
    "isNan",
    "log",
    "log2",
    "max",
    "min",
    "pow",
    "round",
    "sign",
    "sin",
    "sqrt",
    "tan",
    "toString",
    "truncate",
];

const STRING_METHODS: &[&str] = &[
    "bytes",
    "codePoints",
    "contains",
    "count",
    "endsWith",
    "indexOf",
    "iterate",
    "iteratorValue",
    "replace",
    "split",
    "startsWith",
    "toNum",
    "toString",
    "toLowercase",
    "toUppercase",
    "trim",
    "trimEnd",
    "trimStart",
];

const LIST_METHODS: &[&str] = &[
    "add",
    "addAll",
    "clear",
    "count",
    "indexOf",
    "insert",
    "iterate",
    "iteratorValue",
    "remove",
    "removeAt",
    "sort",
    "swap",
    "toString",
];

const MAP_METHODS: &[&str] = &[
    "clear",
    "containsKey",
    "count",
    "iterate",
    "iteratorValue",
    "keys",
    "remove",
    "toString",
    "values",
];

const RANGE_METHODS: &[&str] = &[
    "from",
    "isInclusive",
    "iterate",
    "iteratorValue",
    "max",
    "min",
    "to",
    "toString",
];

const FIBER_METHODS: &[&str] = &["call", "error", "isDone", "transfer", "transferError", "try"];

const FN_METHODS: &[&str] = &["arity", "call", "toString"];

const SEQUENCE_METHODS: &[&str] = &[
    "all",
    "any",
    "contains",
    "count",
    "each",
    "isEmpty",
    "join",
    "map",
    "reduce",
    "skip",
    "skipWhile",
    "take",
    "takeWhile",
    "toList",
    "where",
];

const OBJECT_STATICS: &[&str] = &["same"];

const NUM_STATICS: &[&str] = &[
    "fromString",
    "infinity",
    "largest",
    "maxSafeInteger",
    "minSafeInteger",
    "nan",
    "pi",
    "smallest",
    "tau",
];

const STRING_STATICS: &[&str] = &["fromByte", "fromCodePoint"];

const LIST_STATICS: &[&str] = &["filled", "new"];

const MAP_STATICS: &[&str] = &["new"];

const FIBER_STATICS: &[&str] = &["abort", "current", "new", "suspend", "yield"];

const FN_STATICS: &[&str] = &["new"];

const SYSTEM_STATICS: &[&str] = &["clock", "gc", "print", "printAll", "write", "writeAll"];

/// Known instance methods of a core class.
pub fn instance_methods(class: &str) -> Option<&'static [&'static str]> {
    match class {
        "Object" => Some(OBJECT_METHODS),
        "Bool" => Some(BOOL_METHODS),
        "Null" => Some(NULL_METHODS),
        "Num" => Some(NUM_METHODS),
        "String" => Some(STRING_METHODS),
        "List" => Some(LIST_METHODS),
        "Map" => Some(MAP_METHODS),
        "Range" => Some(RANGE_METHODS),
        "Fiber" => Some(FIBER_METHODS),
        "Fn" => Some(FN_METHODS),
        "Sequence" => Some(SEQUENCE_METHODS),
        _ => None,
    }
}

/// Known static methods of a core class. Statics are not inherited.
pub fn static_methods(class: &str) -> Option<&'static [&'static str]> {
    match class {
        "Object" => Some(OBJECT_STATICS),
        "Num" => Some(NUM_STATICS),
        "String" => Some(STRING_STATICS),
        "List" => Some(LIST_STATICS),
        "Map" => Some(MAP_STATICS),
        "Fiber" => Some(FIBER_STATICS),
        "Fn" => Some(FN_STATICS),
        "System" => Some(SYSTEM_STATICS),
        _ => None,
    }
}

/// The core superclass chain. Only the sequence-like classes
/// inherit; everything else answers to the final Object check.
pub fn superclass(class: &str) -> Option<&'static str> {
    match class {
        "List" | "Map" | "Range" | "String" => Some("Sequence"),
        _ => None,
    }
}

/// Membership test for the `&'static` method tables.
pub fn table_contains(table: &[&str], method: &str) -> bool {
    table.iter().any(|entry| *entry == method)
}

/// True if `method` is defined on `Object`, the last resort of every
/// dispatch chain.
pub fn is_object_method(method: &str) -> bool {
    table_contains(OBJECT_METHODS, method)
}
