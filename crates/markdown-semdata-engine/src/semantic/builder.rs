use std::collections::BTreeMap;

use super::{fields::SemanticFields, kinds::SemanticSpan};
use crate::element::Element;

/// Turns the decomposed parts of an occurrence into a markup element.
///
/// This is the extension point for callers who want a different tag or
/// attribute layout. Closures of the right shape implement it directly:
///
/// ```
/// use markdown_semdata_engine::{Element, ElementBuilder, SemanticFields};
///
/// let cite = |f: &SemanticFields| -> anyhow::Result<Element> {
///     let mut el = Element::new("cite");
///     el.set_text(f.display_text());
///     Ok(el)
/// };
/// # let _: &dyn ElementBuilder = &cite;
/// ```
pub trait ElementBuilder {
    fn build(&self, fields: &SemanticFields) -> anyhow::Result<Element>;
}

impl<F> ElementBuilder for F
where
    F: Fn(&SemanticFields) -> anyhow::Result<Element>,
{
    fn build(&self, fields: &SemanticFields) -> anyhow::Result<Element> {
        self(fields)
    }
}

/// The default RDFa layout: `content` and `property` always, `typeof` when
/// the occurrence was typed, text from the label or the content.
#[derive(Debug, Clone)]
pub struct DefaultBuilder {
    tag: String,
}

impl DefaultBuilder {
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for DefaultBuilder {
    fn default() -> Self {
        Self::with_tag(SemanticSpan::DEFAULT_TAG)
    }
}

impl ElementBuilder for DefaultBuilder {
    fn build(&self, fields: &SemanticFields) -> anyhow::Result<Element> {
        Ok(rdfa_element(&self.tag, fields))
    }
}

fn rdfa_element(tag: &str, fields: &SemanticFields) -> Element {
    let mut el = Element::new(tag);
    if let Some(type_qname) = fields.qualified_type() {
        el.set("typeof", type_qname);
    }
    el.set("property", fields.qualified_property());
    el.set("content", fields.content.as_str());
    el.set_text(fields.display_text());
    el
}

/// Default layout with the tag chosen per qualified property, e.g.
/// `dc:title` rendered as `<cite>`.
#[derive(Debug, Clone, Default)]
pub struct PropertyTagBuilder {
    fallback: DefaultBuilder,
    tags: BTreeMap<String, String>,
}

impl PropertyTagBuilder {
    pub fn new(fallback: DefaultBuilder) -> Self {
        Self {
            fallback,
            tags: BTreeMap::new(),
        }
    }

    /// Uses `tag` for occurrences whose qualified property is `property`.
    #[must_use]
    pub fn with_property_tag(mut self, property: impl Into<String>, tag: impl Into<String>) -> Self {
        self.tags.insert(property.into(), tag.into());
        self
    }

    pub fn tag_for(&self, fields: &SemanticFields) -> &str {
        self.tags
            .get(&fields.qualified_property())
            .map(String::as_str)
            .unwrap_or(self.fallback.tag())
    }
}

impl ElementBuilder for PropertyTagBuilder {
    fn build(&self, fields: &SemanticFields) -> anyhow::Result<Element> {
        Ok(rdfa_element(self.tag_for(fields), fields))
    }
}

/// Adapter for builders written against the older three-argument form
/// `(qualified_property, content, label)`.
///
/// Type information is dropped; the callback only ever sees the property.
pub struct LegacyBuilder<F> {
    callback: F,
}

impl<F> LegacyBuilder<F>
where
    F: Fn(&str, &str, Option<&str>) -> anyhow::Result<Element>,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ElementBuilder for LegacyBuilder<F>
where
    F: Fn(&str, &str, Option<&str>) -> anyhow::Result<Element>,
{
    fn build(&self, fields: &SemanticFields) -> anyhow::Result<Element> {
        (self.callback)(
            &fields.qualified_property(),
            &fields.content,
            fields.label.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed() -> SemanticFields {
        SemanticFields {
            type_namespace: Some("dc".to_string()),
            type_name: Some("book".to_string()),
            property_namespace: "aa".to_string(),
            property: "author".to_string(),
            content: "Sherry Turkle".to_string(),
            label: Some("Turkle's".to_string()),
        }
    }

    fn untyped() -> SemanticFields {
        SemanticFields {
            type_namespace: None,
            type_name: None,
            property_namespace: "dc".to_string(),
            property: "title".to_string(),
            content: "Second Self".to_string(),
            label: None,
        }
    }

    #[test]
    fn default_builder_typed() {
        let el = DefaultBuilder::default().build(&typed()).unwrap();
        assert_eq!(el.tag(), "span");
        assert_eq!(el.get("typeof"), Some("dc:book"));
        assert_eq!(el.get("property"), Some("aa:author"));
        assert_eq!(el.get("content"), Some("Sherry Turkle"));
        assert_eq!(el.text(), "Turkle's");
    }

    #[test]
    fn default_builder_untyped_has_no_typeof() {
        let el = DefaultBuilder::default().build(&untyped()).unwrap();
        assert_eq!(el.get("typeof"), None);
        assert_eq!(el.text(), "Second Self");
        assert_eq!(
            el.to_html(),
            r#"<span content="Second Self" property="dc:title">Second Self</span>"#
        );
    }

    #[test]
    fn property_tag_builder_overrides_tag_only() {
        let builder = PropertyTagBuilder::new(DefaultBuilder::default())
            .with_property_tag("dc:title", "cite");

        let title = builder.build(&untyped()).unwrap();
        assert_eq!(
            title.to_html(),
            r#"<cite content="Second Self" property="dc:title">Second Self</cite>"#
        );

        let author = builder.build(&typed()).unwrap();
        assert_eq!(author.tag(), "span");
    }

    #[test]
    fn closure_builder() {
        let builder = |f: &SemanticFields| -> anyhow::Result<Element> {
            let mut el = Element::new("cite");
            el.set_text(f.display_text());
            Ok(el)
        };
        let el = builder.build(&typed()).unwrap();
        assert_eq!(el.to_html(), "<cite>Turkle's</cite>");
    }

    #[test]
    fn legacy_builder_receives_qualified_property() {
        let builder = LegacyBuilder::new(|rel: &str, target: &str, label: Option<&str>| {
            let mut el = Element::new(if rel == "dc:title" { "cite" } else { "span" });
            el.set("content", target);
            el.set("property", rel);
            el.set_text(label.unwrap_or(target));
            Ok(el)
        });

        let el = builder.build(&untyped()).unwrap();
        assert_eq!(
            el.to_html(),
            r#"<cite content="Second Self" property="dc:title">Second Self</cite>"#
        );

        let el = builder.build(&typed()).unwrap();
        assert_eq!(el.get("property"), Some("aa:author"));
        assert_eq!(el.get("typeof"), None);
    }

    #[test]
    fn builder_errors_propagate() {
        let builder =
            |_: &SemanticFields| -> anyhow::Result<Element> { anyhow::bail!("no element for you") };
        let err = builder.build(&typed()).unwrap_err();
        assert_eq!(err.to_string(), "no element for you");
    }
}
