use std::fmt;

use super::{
    builder::{DefaultBuilder, ElementBuilder},
    fields::SemanticFields,
    kinds::SemanticSpan,
    pattern::{RawMatch, SemanticPattern},
    types::{InlineNode, Replacement},
};
use crate::{
    error::{Result, SemanticError},
    span::Span,
};

/// Settings for one processor instance. Fixed once the processor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticDataOptions {
    /// Substituted when an occurrence omits a namespace.
    pub default_namespace: String,
    pub start_delimiter: String,
    pub end_delimiter: String,
    /// Escape the delimiters instead of treating them as regex fragments.
    pub literal_delimiters: bool,
}

impl Default for SemanticDataOptions {
    fn default() -> Self {
        Self {
            default_namespace: SemanticSpan::DEFAULT_NAMESPACE.to_string(),
            start_delimiter: SemanticSpan::DELIMITER.to_string(),
            end_delimiter: SemanticSpan::DELIMITER.to_string(),
            literal_delimiters: false,
        }
    }
}

impl SemanticDataOptions {
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Delimiters given as regex fragments, spliced in unescaped.
    #[must_use]
    pub fn with_delimiters(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_delimiter = start.into();
        self.end_delimiter = end.into();
        self.literal_delimiters = false;
        self
    }

    /// Delimiters matched character for character.
    #[must_use]
    pub fn with_literal_delimiters(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.start_delimiter = start.into();
        self.end_delimiter = end.into();
        self.literal_delimiters = true;
        self
    }

    fn compile(&self) -> Result<SemanticPattern> {
        if self.literal_delimiters {
            SemanticPattern::compile_literal(&self.start_delimiter, &self.end_delimiter)
        } else {
            SemanticPattern::compile(&self.start_delimiter, &self.end_delimiter)
        }
    }
}

/// Recognizes occurrences in text fragments and builds elements for them.
///
/// Holds no state besides its configuration, so one instance can be reused
/// across every fragment of every document.
pub struct SemanticDataProcessor {
    pattern: SemanticPattern,
    default_namespace: String,
    builder: Box<dyn ElementBuilder>,
}

impl fmt::Debug for SemanticDataProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticDataProcessor")
            .field("pattern", &self.pattern.as_str())
            .field("default_namespace", &self.default_namespace)
            .finish_non_exhaustive()
    }
}

impl SemanticDataProcessor {
    /// A processor using [`DefaultBuilder`].
    pub fn new(options: SemanticDataOptions) -> Result<Self> {
        Self::with_builder(options, DefaultBuilder::default())
    }

    pub fn with_builder(
        options: SemanticDataOptions,
        builder: impl ElementBuilder + 'static,
    ) -> Result<Self> {
        Ok(Self {
            pattern: options.compile()?,
            default_namespace: options.default_namespace,
            builder: Box::new(builder),
        })
    }

    pub fn pattern(&self) -> &SemanticPattern {
        &self.pattern
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Applies namespace defaulting to a raw match.
    ///
    /// The type namespace is only filled in when a type was captured.
    pub fn resolve(&self, raw: &RawMatch<'_>) -> SemanticFields {
        let type_name = raw.type_name.map(str::to_string);
        let type_namespace = type_name.as_ref().map(|_| {
            raw.type_namespace
                .unwrap_or(&self.default_namespace)
                .to_string()
        });
        SemanticFields {
            type_namespace,
            type_name,
            property_namespace: raw
                .property_namespace
                .unwrap_or(&self.default_namespace)
                .to_string(),
            property: raw.property.to_string(),
            content: raw.content.to_string(),
            label: raw.label.map(str::to_string),
        }
    }

    /// Builds the replacement for one raw match.
    pub fn build(&self, raw: &RawMatch<'_>) -> Result<Replacement> {
        let fields = self.resolve(raw);
        log::debug!(
            "semantic data at {}..{}: {}",
            raw.span.start,
            raw.span.end,
            fields.qualified_property()
        );
        let element = self
            .builder
            .build(&fields)
            .map_err(|source| SemanticError::Build {
                span: raw.span,
                source,
            })?;
        Ok(Replacement {
            element,
            span: raw.span,
        })
    }

    /// Recognizes the leftmost occurrence in `text` and builds its element.
    ///
    /// `base` is the absolute offset of `text`; the returned span is absolute.
    /// Text without an occurrence yields `Ok(None)`.
    pub fn handle_match(&self, text: &str, base: usize) -> Result<Option<Replacement>> {
        self.pattern
            .find_at(text, base)
            .map(|raw| self.build(&raw))
            .transpose()
    }

    /// The resolved fields of every occurrence in `text`, left to right.
    pub fn fields(&self, text: &str) -> Vec<SemanticFields> {
        self.pattern
            .find_iter(text, 0)
            .map(|raw| self.resolve(&raw))
            .collect()
    }

    /// Splits a fragment into text runs and built occurrences.
    ///
    /// The nodes cover `text` completely and in order; spans are absolute,
    /// offset by `base`.
    pub fn process_inline(&self, base: usize, text: &str) -> Result<Vec<InlineNode>> {
        let mut out = vec![];
        let mut text_start = base;

        fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
            if end > start {
                out.push(InlineNode::Text(Span { start, end }));
            }
        }

        for raw in self.pattern.find_iter(text, base) {
            let replacement = self.build(&raw)?;
            flush_text(&mut out, text_start, replacement.span.start);
            text_start = replacement.span.end;
            out.push(InlineNode::Semantic {
                full: replacement.span,
                element: replacement.element,
            });
        }

        flush_text(&mut out, text_start, base + text.len());
        Ok(out)
    }

    /// Renders a fragment as HTML: text is escaped, occurrences become
    /// elements.
    pub fn render_inline(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        for node in self.process_inline(0, text)? {
            match node {
                InlineNode::Text(sp) => {
                    html_escape::encode_text_to_string(&text[sp.relative_to(0)], &mut out);
                }
                InlineNode::Semantic { element, .. } => out.push_str(&element.to_html()),
            }
        }
        Ok(out)
    }

    /// Returns `true` if `text` holds at least one occurrence.
    pub fn has_occurrences(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}
