//! Structured view fragments.
//!
//! Views are built as trees of [`Element`]s and [`Node::Text`] leaves and
//! serialized to HTML in one place. Text and attribute values are always
//! escaped; there is no way to inject raw markup through this API.
//!
//! ```
//! use complab_render::view::{Element, Fragment};
//!
//! let card = Element::new("div")
//!     .class("property")
//!     .child(Element::new("span").class("prop-label").text("Density <ρ>"))
//!     .child(Element::new("span").class("prop-value").text("1.76 g/cm³"));
//!
//! assert_eq!(
//!     Fragment::from(card).to_html(),
//!     "<div class=\"property\"><span class=\"prop-label\">Density &lt;ρ&gt;</span>\
//!      <span class=\"prop-value\">1.76 g/cm³</span></div>"
//! );
//! ```

use std::fmt;

/// A node in a view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// Escaped text.
    Text(String),
}

impl Node {
    /// Text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(text) => escape_into(text, out, false),
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => {
                for child in &element.children {
                    child.write_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Start an element.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute. Attributes render in insertion order.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Set the `class` attribute.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child when present.
    pub fn maybe_child(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Append several children.
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    /// Tag name.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Value of an attribute, if set.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, out, true);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// A sequence of sibling nodes; the unit the page controller injects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(Vec<Node>);

impl Fragment {
    /// Empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.0.push(node.into());
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// Whether the fragment has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.write_html(&mut out);
        }
        out
    }

    /// Concatenated text content, unescaped (what a reader would copy).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.write_text(&mut out);
        }
        out
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self(vec![Node::Element(element)])
    }
}

impl FromIterator<Node> for Fragment {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Node> for Fragment {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Escape text for HTML. Quotes are escaped too when `attribute` is set.
fn escape_into(input: &str, out: &mut String, attribute: bool) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

/// Escape a string for use as HTML text.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_into(input, &mut out, true);
    out
}
