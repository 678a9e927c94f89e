use regex::{Captures, Regex};

use super::kinds::SemanticSpan;
use crate::{
    error::{Result, SemanticError},
    span::Span,
};

/// Group names used by the compiled pattern.
mod group {
    pub const TYPE_NS: &str = "ns_typeof";
    pub const TYPE: &str = "typeof";
    pub const PROP_NS: &str = "ns_prop";
    pub const PROP: &str = "prop";
    pub const CONTENT: &str = "content";
    pub const LABEL: &str = "label";
}

/// The recognizer for one configured delimiter pair.
///
/// Delimiters are spliced into the pattern as-is, so they are regex
/// fragments; use [`SemanticPattern::compile_literal`] for plain strings.
#[derive(Debug, Clone)]
pub struct SemanticPattern {
    regex: Regex,
}

/// One occurrence as matched, before any namespace defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'t> {
    /// Absolute span of the whole occurrence, delimiters included.
    pub span: Span,
    pub type_namespace: Option<&'t str>,
    pub type_name: Option<&'t str>,
    pub property_namespace: Option<&'t str>,
    pub property: &'t str,
    pub content: &'t str,
    pub label: Option<&'t str>,
}

impl SemanticPattern {
    /// Builds the pattern source for a delimiter pair.
    ///
    /// Fields are lazy so the earliest separator wins; whitespace around
    /// delimiters and separators is left outside every group.
    pub fn source(start: &str, end: &str) -> String {
        let sep = regex::escape(SemanticSpan::SEPARATOR);
        let label = regex::escape(&SemanticSpan::LABEL.to_string());
        let ns = SemanticSpan::NAMESPACE;
        let name = r"[^%#]+?";
        format!(
            r"{start}\s*(?:(?:(?P<{tns}>\w+){ns})?(?P<{ty}>{name})\s*{sep}\s*)?(?:(?P<{pns}>\w+){ns})?(?P<{prop}>{name})\s*{sep}\s*(?P<{content}>.+?)(?:\s*{label}\s*(?P<{lbl}>.+?))?\s*{end}",
            tns = group::TYPE_NS,
            ty = group::TYPE,
            pns = group::PROP_NS,
            prop = group::PROP,
            content = group::CONTENT,
            lbl = group::LABEL,
        )
    }

    /// Compiles the recognizer for `start`/`end` pattern fragments.
    pub fn compile(start: &str, end: &str) -> Result<Self> {
        let pattern = Self::source(start, end);
        let regex = Regex::new(&pattern).map_err(|source| SemanticError::InvalidPattern {
            pattern: pattern.clone(),
            source: Box::new(source),
        })?;
        log::debug!("compiled semantic data pattern {pattern}");
        Ok(Self { regex })
    }

    /// Compiles the recognizer for delimiters taken literally.
    pub fn compile_literal(start: &str, end: &str) -> Result<Self> {
        Self::compile(&regex::escape(start), &regex::escape(end))
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Finds the leftmost occurrence in `text`. `base` is the absolute offset
    /// of `text` in the surrounding document.
    pub fn find_at<'t>(&self, text: &'t str, base: usize) -> Option<RawMatch<'t>> {
        self.regex
            .captures(text)
            .and_then(|caps| RawMatch::from_captures(&caps, base))
    }

    /// All non-overlapping occurrences, left to right.
    pub fn find_iter<'t>(&self, text: &'t str, base: usize) -> impl Iterator<Item = RawMatch<'t>> {
        self.regex
            .captures_iter(text)
            .filter_map(move |caps| RawMatch::from_captures(&caps, base))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl<'t> RawMatch<'t> {
    fn from_captures(caps: &Captures<'t>, base: usize) -> Option<Self> {
        let whole = caps.get(0)?;
        let text = |name: &str| caps.name(name).map(|m| m.as_str());
        Some(Self {
            span: Span::new(base + whole.start(), base + whole.end()),
            type_namespace: text(group::TYPE_NS),
            type_name: text(group::TYPE),
            property_namespace: text(group::PROP_NS),
            property: text(group::PROP)?,
            content: text(group::CONTENT)?,
            label: text(group::LABEL),
        })
    }
}
