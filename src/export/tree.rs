//! Generic markup tree.
//!
//! The serializer builds a [`Tree`]; an encoder turns it into text. Trees
//! carry no escaping concerns of their own.

use serde::{Serialize, Serializer};

/// A named node with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    pub name: String,

    /// Attribute pairs in output order. `None` values are omitted on output.
    #[serde(serialize_with = "serialize_attributes")]
    pub attributes: Vec<(String, Option<String>)>,

    pub children: Vec<Node>,
}

/// Serialize only the attributes that have a value, as `[name, value]` pairs.
fn serialize_attributes<S: Serializer>(
    attributes: &[(String, Option<String>)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        attributes
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|value| (name, value))),
    )
}

/// A child of a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Tree),
}

impl Tree {
    pub fn new(name: impl Into<String>) -> Self {
        Tree {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create `<name>text</name>`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Tree::new(name).text(text)
    }

    /// Add an attribute that is always present.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), Some(value.into())));
        self
    }

    /// Add an attribute that is omitted when `value` is `None`.
    pub fn attr_opt(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.attributes.push((name.into(), value));
        self
    }

    /// Add a boolean attribute: `"true"` when set, omitted otherwise.
    pub fn flag(self, name: impl Into<String>, value: bool) -> Self {
        self.attr_opt(name, value.then(|| "true".to_string()))
    }

    /// Add a `;`-joined list attribute, omitted when the list is empty.
    pub fn list_attr(self, name: impl Into<String>, values: &[String]) -> Self {
        let value = if values.is_empty() {
            None
        } else {
            Some(values.join(";"))
        };
        self.attr_opt(name, value)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Tree) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Add a child only when present.
    pub fn child_opt(self, child: Option<Tree>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Tree>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Look up an attribute value. Omitted attributes read as `None`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Tree> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(tree) => Some(tree),
            Node::Text(_) => None,
        })
    }

    /// Child elements with the given name.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tree> + 'a {
        self.elements().filter(move |tree| tree.name == name)
    }

    /// First child element with the given name.
    pub fn first(&self, name: &str) -> Option<&Tree> {
        self.elements().find(|tree| tree.name == name)
    }

    /// Concatenated text content of direct text children.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_rendering() {
        let on = Tree::new("android").flag("isLibrary", true);
        let off = Tree::new("android").flag("isLibrary", false);

        assert_eq!(on.attribute("isLibrary"), Some("true"));
        assert_eq!(off.attribute("isLibrary"), None);
    }

    #[test]
    fn test_list_attr_keeps_order() {
        let tree = Tree::new("jar").list_attr(
            "configurations",
            &["test".to_string(), "compile".to_string()],
        );
        assert_eq!(tree.attribute("configurations"), Some("test;compile"));

        let empty = Tree::new("jar").list_attr("configurations", &[]);
        assert_eq!(empty.attribute("configurations"), None);
    }

    #[test]
    fn test_navigation() {
        let tree = Tree::new("project")
            .child(Tree::leaf("id", "core"))
            .child_opt(None)
            .child(Tree::leaf("name", "Core"));

        assert_eq!(tree.elements().count(), 2);
        assert_eq!(tree.first("id").map(Tree::text_content), Some("core".to_string()));
        assert!(tree.first("java").is_none());
    }
}
