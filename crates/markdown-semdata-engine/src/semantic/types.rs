use crate::{element::Element, span::Span};

/// A piece of a processed inline fragment.
///
/// Text is kept as a span into the source; occurrences carry the element
/// built for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Source text that isn't part of any occurrence.
    Text(Span),
    /// A recognized occurrence.
    Semantic {
        /// Full span including both delimiters.
        full: Span,
        element: Element,
    },
}

impl InlineNode {
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::Semantic { full, .. } => *full,
        }
    }
}

/// The element built for one occurrence, with the absolute span it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub element: Element,
    pub span: Span,
}
