use std::collections::BTreeMap;

/// A minimal inline markup element, the unit handed back to the host
/// document tree.
///
/// Attributes are kept in a sorted map so serialization order is stable
/// (`content`, `property`, `typeof` for the default layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: String::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Sets (or replaces) an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the element as a single HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.tag.len() * 2 + self.text.len() + 32);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            html_escape::encode_double_quoted_attribute_to_string(value, &mut out);
            out.push('"');
        }
        out.push('>');
        html_escape::encode_text_to_string(&self.text, &mut out);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}
