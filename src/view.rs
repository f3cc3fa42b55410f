//! A small typed node tree for the results area.
//!
//! Builders produce [`Node`]s; nothing is concatenated as markup. Text and
//! attribute values are escaped when the tree is serialized with
//! [`Node::to_html`] (or `Display`), so item fields coming back from the model
//! can never inject markup.

use std::fmt::{self, Write};
use url::{ParseError, Url};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

impl Element {
    pub fn new(tag: &'static str) -> Element {
        Element {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Element {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Element {
        self.set_attr(name, value);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Element {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Element
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Element {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// Visits this element and every descendant element, depth first.
    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut Element)) {
        visit(self);
        for child in self.child_elements_mut() {
            child.walk_mut(visit);
        }
    }

    fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            write!(out, " class=\"{}\"", escape_attr(&self.classes.join(" ")))?;
        }
        for (name, value) in &self.attrs {
            write!(out, " {name}=\"{}\"", escape_attr(value))?;
        }
        out.write_char('>')?;
        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            child.write_html(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }

    fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.write_str(&escape_text(text)),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Node {
        Node::Element(el)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_html(f)
    }
}

/// Serializes a list of sibling nodes, e.g. the contents of a container.
pub fn render_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(input: &str) -> String {
    escape_text(input)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keeps http(s) and relative URLs; anything with another scheme becomes `#`.
pub fn safe_url(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => raw.to_string(),
        Ok(_) => "#".to_string(),
        Err(ParseError::RelativeUrlWithoutBase) => raw.to_string(),
        Err(_) => "#".to_string(),
    }
}
