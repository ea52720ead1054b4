//! The pretty diagnostic reporter: location header, the offending
//! source line, and a caret underline.

use wren_diagnostics::{Diagnostic, Severity};
use wren_lexer::SourceBuffer;

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
        Severity::Info => "Info",
    }
}

/// Render one diagnostic as
///
/// ```text
/// [path line:col] Severity: message
///   source line text
///        ^^^^
/// ```
///
/// The underline is `max(1, span.length)` carets, clipped to the end
/// of the line.
pub fn pretty(source: &SourceBuffer, diagnostic: &Diagnostic) -> String {
    let line = source.line_at(diagnostic.span.start);
    let column = source.column_at(diagnostic.span.start) as usize;
    let text = source.line_text(line);

    let mut out = format!(
        "[{} {}:{}] {}: {}\n",
        source.path(),
        line,
        column,
        severity_label(diagnostic.severity),
        diagnostic.message
    );

    out.push_str("  ");
    out.push_str(text);
    out.push('\n');

    let available = text.len().saturating_sub(column - 1).max(1);
    let width = (diagnostic.span.len().max(1) as usize).min(available);
    out.push_str("  ");
    out.push_str(&" ".repeat(column - 1));
    out.push_str(&"^".repeat(width));
    out.push('\n');

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
