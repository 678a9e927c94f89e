use super::kinds::SemanticSpan;

/// The decomposed parts of one recognized occurrence, with namespace
/// defaulting already applied.
///
/// `property_namespace` is always resolved. `type_namespace` is `Some` exactly
/// when `type_name` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticFields {
    pub type_namespace: Option<String>,
    /// The `typeof` segment.
    pub type_name: Option<String>,
    pub property_namespace: String,
    pub property: String,
    pub content: String,
    pub label: Option<String>,
}

impl SemanticFields {
    /// `namespace:property`
    pub fn qualified_property(&self) -> String {
        qualify(&self.property_namespace, &self.property)
    }

    /// `namespace:Type`, if the occurrence had a type segment. A type with no
    /// namespace is returned bare.
    pub fn qualified_type(&self) -> Option<String> {
        let name = self.type_name.as_deref()?;
        Some(match self.type_namespace.as_deref() {
            Some(ns) => qualify(ns, name),
            None => name.to_string(),
        })
    }

    /// The visible text: the label when present and non-empty, else the content.
    pub fn display_text(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.content,
        }
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    let mut out = String::with_capacity(namespace.len() + name.len() + 1);
    out.push_str(namespace);
    out.push(SemanticSpan::NAMESPACE);
    out.push_str(name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> SemanticFields {
        SemanticFields {
            type_namespace: None,
            type_name: None,
            property_namespace: "dc".to_string(),
            property: "author".to_string(),
            content: "Sherry Turkle".to_string(),
            label: None,
        }
    }

    #[test]
    fn qualified_names() {
        let mut f = fields();
        assert_eq!(f.qualified_property(), "dc:author");
        assert_eq!(f.qualified_type(), None);

        f.type_namespace = Some("schema".to_string());
        f.type_name = Some("Book".to_string());
        assert_eq!(f.qualified_type().as_deref(), Some("schema:Book"));
    }

    #[test]
    fn type_without_namespace_is_not_invented() {
        let mut f = fields();
        f.type_name = Some("Book".to_string());
        assert_eq!(f.qualified_type().as_deref(), Some("Book"));
    }

    #[test]
    fn display_text_prefers_label() {
        let mut f = fields();
        assert_eq!(f.display_text(), "Sherry Turkle");

        f.label = Some("Turkle's".to_string());
        assert_eq!(f.display_text(), "Turkle's");

        f.label = Some(String::new());
        assert_eq!(f.display_text(), "Sherry Turkle");
    }
}
