//! Diagnostic records produced by the analysis pipeline.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::span::Span;

/// Reported in JSON output as the `source` field of every diagnostic.
pub const SOURCE_NAME: &str = "wren-analyzer";

/// Diagnostic severity. Errors count as analysis failures in a
/// driver; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, pinned to a byte span of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub span: Span,
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            span,
            code: None,
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            span,
            code: None,
        }
    }

    pub fn info(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
            span,
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}] {}: {}",
            self.span.start, self.span.end, self.severity, self.message
        )
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Wire shape: {message, severity, span: {start, length}, source, code?}.
// `code` is omitted entirely when absent.
impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.code.is_some() { 5 } else { 4 };
        let mut s = serializer.serialize_struct("Diagnostic", fields)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("severity", &self.severity)?;
        s.serialize_field("span", &self.span)?;
        s.serialize_field("source", SOURCE_NAME)?;
        if let Some(code) = &self.code {
            s.serialize_field("code", code)?;
        }
        s.end()
    }
}
