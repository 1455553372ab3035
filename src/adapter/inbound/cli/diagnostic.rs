//! Miette-based diagnostics for malformed proposal files.
//!
//! A JSON syntax or type error is rendered against the proposal source with a
//! label at the reported line and column.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Proposal parse error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(bizfun::proposal))]
pub struct ProposalDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Proposal file content.
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ProposalDiagnostic {
    /// Build a diagnostic from a `serde_json` error over `src`.
    #[must_use]
    pub fn from_json_error(src: &str, err: &serde_json::Error) -> Self {
        let offset = offset_of(src, err.line(), err.column());
        let help = err.is_data().then(|| {
            "integers may be JSON numbers, decimal strings, or 0x-prefixed hex".to_string()
        });

        Self {
            message: format!("invalid proposal: {err}"),
            src: src.to_string(),
            span: (offset, 1).into(),
            help,
        }
    }
}

/// Byte offset of a 1-based `line` and `column`, clamped to the source.
fn offset_of(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_points_at_reported_column() {
        let src = "{\n  \"a\": 1,\n  \"b\" 2\n}";
        assert_eq!(offset_of(src, 3, 7), 19);
        assert_eq!(&src[19..20], "2");
    }

    #[test]
    fn offset_is_clamped_to_source() {
        assert_eq!(offset_of("{}", 9, 9), 1);
        assert_eq!(offset_of("", 1, 1), 0);
    }

    #[test]
    fn diagnostic_carries_source_and_message() {
        let src = r#"{"description": 5}"#;
        let err = serde_json::from_str::<crate::domain::MarketCreationProposal>(src).unwrap_err();

        let diagnostic = ProposalDiagnostic::from_json_error(src, &err);

        assert!(diagnostic.message.starts_with("invalid proposal"));
        assert_eq!(diagnostic.src, src);
        assert!(diagnostic.help.is_some());
    }
}
