pub mod element;
pub mod error;
pub mod markdown;
pub mod semantic;
pub mod span;

// Re-export key types for easier usage
pub use element::Element;
pub use error::{Result, SemanticError};
pub use markdown::{rewrite_events, to_html, to_html_with_options};
pub use semantic::*;
pub use span::Span;
