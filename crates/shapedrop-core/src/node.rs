//! Node creation and attribute helpers.

use crate::host::{Host, HostResult, Namespace};

/// An ordered attribute set with a nested inline-style group.
///
/// Style properties are written one at a time, so applying a set never
/// clobbers style properties it does not mention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: Vec<(String, String)>,
    style: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attributes::insert`].
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder form of [`Attributes::insert_style`].
    pub fn with_style(mut self, property: &str, value: impl ToString) -> Self {
        self.insert_style(property, value);
        self
    }

    /// Set an attribute, replacing an earlier value with the same name.
    pub fn insert(&mut self, name: &str, value: impl ToString) {
        upsert(&mut self.values, name, value.to_string());
    }

    /// Set a style property, replacing an earlier value with the same name.
    pub fn insert_style(&mut self, property: &str, value: impl ToString) {
        upsert(&mut self.style, property, value.to_string());
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a style property value.
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Style properties in insertion order.
    pub fn style_iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Check if there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.style.is_empty()
    }
}

fn upsert(entries: &mut Vec<(String, String)>, name: &str, value: String) {
    match entries.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name.to_string(), value)),
    }
}

/// Create an element and apply `attrs` to it.
pub fn create_element<H: Host>(
    host: &mut H,
    namespace: Namespace,
    tag: &str,
    attrs: &Attributes,
) -> HostResult<H::Node> {
    let node = host.create_element(namespace, tag)?;
    update_element(host, &node, attrs)?;
    Ok(node)
}

/// Apply `attrs` to an existing element in place.
pub fn update_element<H: Host>(host: &mut H, node: &H::Node, attrs: &Attributes) -> HostResult<()> {
    for (name, value) in attrs.iter() {
        host.set_attribute(node, name, value)?;
    }
    for (property, value) in attrs.style_iter() {
        host.set_style_property(node, property, value)?;
    }
    Ok(())
}

/// Wrap `child` in a new HTML box carrying `attrs`.
pub fn contain<H: Host>(host: &mut H, child: &H::Node, attrs: &Attributes) -> HostResult<H::Node> {
    let container = create_element(host, Namespace::Html, "div", attrs)?;
    host.append_child(&container, child)?;
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_insert_replaces() {
        let attrs = Attributes::new().with("x", 1.0).with("y", 2).with("x", 3.5);
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("x", "3.5"), ("y", "2")]);
    }

    #[test]
    fn test_whole_numbers_format_without_fraction() {
        let attrs = Attributes::new().with("x", 80.0);
        assert_eq!(attrs.get("x"), Some("80"));
    }

    #[test]
    fn test_update_style_per_property() {
        let mut host = MemoryHost::new();
        let attrs = Attributes::new()
            .with_style("width", "400px")
            .with_style("height", "300px");
        let node = create_element(&mut host, Namespace::Html, "div", &attrs).unwrap();

        update_element(&mut host, &node, &Attributes::new().with_style("width", "500px")).unwrap();

        assert_eq!(host.style_property(node, "width"), Some("500px"));
        assert_eq!(host.style_property(node, "height"), Some("300px"));
    }

    #[test]
    fn test_contain() {
        let mut host = MemoryHost::new();
        let svg = host.create_element(Namespace::Svg, "svg").unwrap();
        let attrs = Attributes::new().with("class", "box");
        let container = contain(&mut host, &svg, &attrs).unwrap();

        assert_eq!(host.tag(container), Some("div"));
        assert_eq!(host.namespace(container), Some(Namespace::Html));
        assert_eq!(host.attribute(container, "class"), Some("box"));
        assert_eq!(host.children(container), &[svg]);
    }
}
