//! Diagnostics Module
//!
//! Diagnostic type reported by the resolver, plus the sink trait the compiler
//! plugs its logger into. Lookups themselves never fail; anything worth
//! telling the author about goes through a `DiagnosticSink`.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Diagnostic severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Hint,
    Info,
}

/// Diagnostic codes for categorizing issues
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // =========================================================================
    // Resolution errors
    // =========================================================================
    CircularParentChain,
}

/// Source location span
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    #[serde(default)]
    pub file: Option<String>,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl SourceSpan {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            file: None,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Attach the file the span belongs to
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:", file)?;
        }
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

/// Related information for multi-location diagnostics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelatedInfo {
    pub message: String,
    pub span: SourceSpan,
}

/// Suggested fix for code actions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestedFix {
    pub description: String,
    pub replacement: String,
    pub span: Option<SourceSpan>,
}

/// A diagnostic message with location, severity, and optional fix
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Option<SourceSpan>,
    pub related: Vec<RelatedInfo>,
    pub suggested_fix: Option<SuggestedFix>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: String) -> Self {
        Self {
            severity,
            code,
            message,
            span: None,
            related: vec![],
            suggested_fix: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message.into())
    }

    /// Create a warning diagnostic
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message.into())
    }

    /// Add source span
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Add suggested fix
    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.suggested_fix = Some(fix);
        self
    }

    /// Add related information
    pub fn with_related(mut self, related: RelatedInfo) -> Self {
        self.related.push(related);
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Where the resolver reports diagnostics.
///
/// Implemented by the compiler's logger. Emitting never fails and never
/// interrupts the lookup that produced the diagnostic.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at a level matching their severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let location = diagnostic
            .span
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_default();
        let hint = diagnostic
            .suggested_fix
            .as_ref()
            .map(|f| f.description.as_str())
            .unwrap_or_default();
        match diagnostic.severity {
            Severity::Error => tracing::error!(
                code = ?diagnostic.code,
                location = %location,
                hint = %hint,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                code = ?diagnostic.code,
                location = %location,
                "{}",
                diagnostic.message
            ),
            Severity::Hint | Severity::Info => tracing::info!(
                code = ?diagnostic.code,
                location = %location,
                "{}",
                diagnostic.message
            ),
        }
    }
}

/// Buffers diagnostics in memory so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<Diagnostic> {
        let mut guard = self
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().iter().filter(|d| d.is_error()).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

// =============================================================================
// Convenience Builders
// =============================================================================

/// Create an error for a parent chain that loops back on itself.
///
/// `chain` is ordered oldest to newest and already includes the repeated
/// definition at the end.
pub fn circular_parent_error(chain: &[String]) -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::CircularParentChain,
        format!(
            "Circular dependency detected in parent chain: {}",
            chain.join(" derives from ")
        ),
    )
}

/// Suggest referencing a standard definition by its canonical URL
pub fn prefer_canonical_fix(parent: &str, url: &str) -> SuggestedFix {
    SuggestedFix {
        description: format!(
            "If the parent {} is intended to refer to the standard definition {}, use its canonical URL instead: {}",
            parent, parent, url
        ),
        replacement: url.to_string(),
        span: None,
    }
}

// =============================================================================
// Tests
// =============================================================================
