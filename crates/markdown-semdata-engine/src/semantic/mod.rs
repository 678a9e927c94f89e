//! # Semantic Spans
//!
//! Recognizes the `%% [ns:]Type :: [ns:]prop :: content | label %%`
//! micro-syntax in text fragments and turns each occurrence into an
//! RDFa-annotated element.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter and separator constants
//! - **`pattern`**: compiles the recognizer for a delimiter pair and yields raw matches
//! - **`fields`**: `SemanticFields`, the decomposed occurrence after namespace defaulting
//! - **`builder`**: the `ElementBuilder` extension point and the stock builders
//! - **`processor`**: `SemanticDataProcessor`, which ties the above together
//! - **`types`**: `InlineNode` and `Replacement` outputs
//!
//! ## Matching
//!
//! Delimiters are regex fragments spliced into the pattern unescaped. Within
//! an occurrence every field is lazy, so the first `::` or `|` wins. Input that
//! doesn't match is left alone; there is no error for malformed occurrences.

pub mod builder;
pub mod fields;
pub mod kinds;
pub mod pattern;
pub mod processor;
pub mod types;

pub use builder::{DefaultBuilder, ElementBuilder, LegacyBuilder, PropertyTagBuilder};
pub use fields::SemanticFields;
pub use kinds::SemanticSpan;
pub use pattern::{RawMatch, SemanticPattern};
pub use processor::{SemanticDataOptions, SemanticDataProcessor};
pub use types::{InlineNode, Replacement};
