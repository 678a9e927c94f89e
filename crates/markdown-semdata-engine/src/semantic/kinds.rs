/// Syntax constants for the semantic span micro-syntax.
///
/// Every delimiter and separator the recognizer relies on lives here; the
/// pattern compiler refers to these rather than hardcoding `%%` or `::`.
pub struct SemanticSpan;

impl SemanticSpan {
    /// Default start and end delimiter.
    pub const DELIMITER: &'static str = "%%";
    /// Separates the type, property and content segments.
    pub const SEPARATOR: &'static str = "::";
    /// Introduces the optional label.
    pub const LABEL: char = '|';
    /// Joins a namespace to a name in a qualified name.
    pub const NAMESPACE: char = ':';
    /// Namespace used when an occurrence doesn't give one.
    pub const DEFAULT_NAMESPACE: &'static str = "aa";
    /// Tag produced by the default builder.
    pub const DEFAULT_TAG: &'static str = "span";
}
