use crate::span::Span;

#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    #[error("Invalid semantic data pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: Box<regex::Error>,
    },
    #[error("Element builder failed for occurrence at {span}: {source}")]
    Build {
        span: Span,
        source: anyhow::Error,
    },
}

pub type Result<T, E = SemanticError> = std::result::Result<T, E>;
