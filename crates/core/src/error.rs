use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors surfaced by the Markdown to HTML pipeline.
///
/// The mermaid rewrite itself is total and never produces one of these.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// A hast tree could not be encoded to or decoded from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_displays_line_and_column() {
        assert_eq!(SourceLocation::new(3, 7).to_string(), "3:7");
    }

    #[test]
    fn parse_error_message_includes_location() {
        let err = ProcessError::Parse {
            message: "unexpected end".into(),
            location: SourceLocation::new(4, 1),
        };
        assert_eq!(err.to_string(), "Parse error at 4:1: unexpected end");
    }
}
