//! Headless, in-memory implementation of the [`Document`] contract.
//!
//! Elements live in an arena and are addressed by [`ElementId`]. Appending a
//! child detaches it from its previous parent and setting text content drops
//! existing children, matching DOM semantics closely enough for layout tests
//! and static page export.
//!
//! The arena never reclaims elements. Detached subtrees, such as a matrix
//! replaced by a rebuild, stay addressable until the document is dropped, so
//! a long-lived document grows with every rebuild.

use std::fmt::Write as _;

use pulse_matrix_core::{Document, DocumentError, Viewport};
use serde::Serialize;

/// Handle to an element stored in a [`MemoryDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(usize);

impl ElementId {
    /// Raw arena index of the element.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    classes: Vec<String>,
    style: Vec<StyleProperty>,
    text: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            classes: Vec::new(),
            style: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Inline style declaration attached to an element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleProperty {
    /// Property name, e.g. `--cell-size`.
    pub name: String,
    /// Property value, e.g. `64px`.
    pub value: String,
}

/// Document tree kept entirely in memory.
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    viewport: Viewport,
    nodes: Vec<Node>,
    body: ElementId,
}

impl MemoryDocument {
    /// Creates a document containing only an empty `body` element.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: vec![Node::new("body")],
            body: ElementId(0),
        }
    }

    /// Simulates the host surface being resized.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The `body` element serving as mount point.
    #[must_use]
    pub const fn body(&self) -> ElementId {
        self.body
    }

    /// Number of elements ever created, including detached ones.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements reachable from `body`, including `body` itself.
    #[must_use]
    pub fn connected_element_count(&self) -> usize {
        let mut pending = vec![self.body];
        let mut count = 0;
        while let Some(id) = pending.pop() {
            count += 1;
            if let Some(node) = self.nodes.get(id.0) {
                pending.extend(node.children.iter().copied());
            }
        }
        count
    }

    /// Tag name of the element.
    #[must_use]
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id.0).map(|node| node.tag.as_str())
    }

    /// Class list of the element.
    #[must_use]
    pub fn classes(&self, id: ElementId) -> Option<&[String]> {
        self.nodes.get(id.0).map(|node| node.classes.as_slice())
    }

    /// Value of an inline style property set on the element.
    #[must_use]
    pub fn style_property(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes
            .get(id.0)?
            .style
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.value.as_str())
    }

    /// Text content of the element.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id.0).map(|node| node.text.as_str())
    }

    /// Children of the element in document order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> Option<&[ElementId]> {
        self.nodes.get(id.0).map(|node| node.children.as_slice())
    }

    /// Parent of the element, if attached.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id.0)?.parent
    }

    /// Captures the subtree rooted at `id`.
    #[must_use]
    pub fn snapshot(&self, id: ElementId) -> Option<ElementSnapshot> {
        let node = self.nodes.get(id.0)?;
        let children = node
            .children
            .iter()
            .filter_map(|child| self.snapshot(*child))
            .collect();

        Some(ElementSnapshot {
            tag: node.tag.clone(),
            classes: node.classes.clone(),
            style: node.style.clone(),
            text: node.text.clone(),
            children,
        })
    }

    fn node(&self, id: ElementId) -> Result<&Node, DocumentError> {
        self.nodes
            .get(id.0)
            .ok_or(DocumentError::UnknownElement { id: id.0 })
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, DocumentError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(DocumentError::UnknownElement { id: id.0 })
    }

    fn detach_children(&mut self, id: ElementId) -> Result<(), DocumentError> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in children {
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }
}

impl Document for MemoryDocument {
    type Element = ElementId;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn mount_point(&self) -> Result<ElementId, DocumentError> {
        Ok(self.body)
    }

    fn create_element(&mut self, tag: &str) -> Result<ElementId, DocumentError> {
        self.nodes.push(Node::new(tag));
        Ok(ElementId(self.nodes.len() - 1))
    }

    fn set_class_name(
        &mut self,
        element: &ElementId,
        class_name: &str,
    ) -> Result<(), DocumentError> {
        self.node_mut(*element)?.classes = class_name
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        Ok(())
    }

    fn add_class(&mut self, element: &ElementId, class: &str) -> Result<(), DocumentError> {
        let node = self.node_mut(*element)?;
        if !node.classes.iter().any(|existing| existing == class) {
            node.classes.push(class.to_owned());
        }
        Ok(())
    }

    fn set_style_property(
        &mut self,
        element: &ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        let node = self.node_mut(*element)?;
        match node.style.iter_mut().find(|property| property.name == name) {
            Some(property) => value.clone_into(&mut property.value),
            None => node.style.push(StyleProperty {
                name: name.to_owned(),
                value: value.to_owned(),
            }),
        }
        Ok(())
    }

    fn append_child(
        &mut self,
        parent: &ElementId,
        child: &ElementId,
    ) -> Result<(), DocumentError> {
        let _ = self.node(*child)?;

        let mut ancestor = Some(*parent);
        while let Some(current) = ancestor {
            if current == *child {
                return Err(DocumentError::HierarchyCycle { child: child.0 });
            }
            ancestor = self.node(current)?.parent;
        }

        if let Some(previous) = self.node(*child)?.parent {
            self.node_mut(previous)?
                .children
                .retain(|existing| existing != child);
        }

        self.node_mut(*parent)?.children.push(*child);
        self.node_mut(*child)?.parent = Some(*parent);
        Ok(())
    }

    fn clear_children(&mut self, element: &ElementId) -> Result<(), DocumentError> {
        self.detach_children(*element)
    }

    fn set_text_content(
        &mut self,
        element: &ElementId,
        text: &str,
    ) -> Result<(), DocumentError> {
        self.detach_children(*element)?;
        text.clone_into(&mut self.node_mut(*element)?.text);
        Ok(())
    }
}

/// Owned copy of an element subtree, suitable for serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElementSnapshot {
    /// Tag name.
    pub tag: String,
    /// Class list in application order.
    pub classes: Vec<String>,
    /// Inline style declarations in application order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<StyleProperty>,
    /// Text content.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Child subtrees in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSnapshot>,
}

impl ElementSnapshot {
    /// Serializes the subtree as HTML markup, one element per line.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, 0);
        out
    }

    fn write_html(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        if !self.style.is_empty() {
            let declarations = self
                .style
                .iter()
                .map(|property| format!("{}: {}", property.name, property.value))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&declarations));
        }
        out.push('>');
        out.push_str(&escape(&self.text));

        if !self.children.is_empty() {
            out.push('\n');
            for child in &self.children {
                child.write_html(out, depth + 1);
            }
            out.push_str(&indent);
        }
        let _ = writeln!(out, "</{}>", self.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for character in raw.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
