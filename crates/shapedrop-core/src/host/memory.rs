//! In-memory host implementation.

use super::{Host, HostError, HostResult, Namespace};
use kurbo::Affine;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Handle to a node stored in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Listener reference for a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

#[derive(Debug, Clone)]
struct MemoryNode {
    namespace: Namespace,
    tag: String,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    listeners: Vec<(String, HandlerId)>,
    screen_transform: Option<Affine>,
}

/// In-memory node tree for headless embedding and testing.
///
/// Every node starts with an identity screen transform.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    nodes: Vec<MemoryNode>,
    attribute_writes: usize,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: NodeId) -> HostResult<&MemoryNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| HostError::UnknownNode(format!("{:?}", id)))
    }

    fn node_mut(&mut self, id: NodeId) -> HostResult<&mut MemoryNode> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| HostError::UnknownNode(format!("{:?}", id)))
    }

    /// Tag name of a node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.tag.as_str())
    }

    /// Namespace a node was created in.
    pub fn namespace(&self, id: NodeId) -> Option<Namespace> {
        self.nodes.get(id.0).map(|n| n.namespace)
    }

    /// Read an attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(id.0)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Read an attribute as a number.
    pub fn attribute_f64(&self, id: NodeId, name: &str) -> Option<f64> {
        self.attribute(id, name).and_then(|v| v.parse().ok())
    }

    /// Read an inline style property.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(id.0)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    /// Children of a node in append order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Listeners attached to a node.
    pub fn listeners(&self, id: NodeId) -> &[(String, HandlerId)] {
        self.nodes
            .get(id.0)
            .map(|n| n.listeners.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether a node has a class in its `class` attribute.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Total number of attribute and style writes performed so far.
    pub fn attribute_writes(&self) -> usize {
        self.attribute_writes
    }

    /// Set the screen transform reported for a node.
    pub fn set_screen_transform(&mut self, id: NodeId, affine: Affine) -> HostResult<()> {
        self.node_mut(id)?.screen_transform = Some(affine);
        Ok(())
    }

    /// Make the node report no screen transform (e.g. detached from layout).
    pub fn clear_screen_transform(&mut self, id: NodeId) -> HostResult<()> {
        self.node_mut(id)?.screen_transform = None;
        Ok(())
    }

    /// Serialize a subtree as markup, attributes in name order.
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        let _ = write!(out, "<{}", node.tag);
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, value);
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node
                .style
                .iter()
                .map(|(p, v)| format!("{}: {}", p, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", style.join("; "));
        }
        if node.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &node.children {
            self.write_markup(*child, out);
        }
        let _ = write!(out, "</{}>", node.tag);
    }
}

impl Host for MemoryHost {
    type Node = NodeId;
    type Handler = HandlerId;

    fn create_element(&mut self, namespace: Namespace, tag: &str) -> HostResult<NodeId> {
        if tag.is_empty() {
            return Err(HostError::CreateFailed("empty tag name".to_string()));
        }
        self.nodes.push(MemoryNode {
            namespace,
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
            listeners: Vec::new(),
            screen_transform: Some(Affine::IDENTITY),
        });
        Ok(NodeId(self.nodes.len() - 1))
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> HostResult<()> {
        self.node_mut(*node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        self.attribute_writes += 1;
        Ok(())
    }

    fn set_style_property(&mut self, node: &NodeId, property: &str, value: &str) -> HostResult<()> {
        self.node_mut(*node)?
            .style
            .insert(property.to_string(), value.to_string());
        self.attribute_writes += 1;
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> HostResult<()> {
        self.node(*parent)?;
        if self.contains(child, parent) {
            return Err(HostError::Tree(format!(
                "cannot append {:?} inside its own subtree",
                child
            )));
        }
        // Re-appending moves the node, as in the DOM.
        if let Some(old_parent) = self.node(*child)?.parent {
            self.node_mut(old_parent)?.children.retain(|c| c != child);
        }
        self.node_mut(*child)?.parent = Some(*parent);
        self.node_mut(*parent)?.children.push(*child);
        Ok(())
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn add_listener(&mut self, node: &NodeId, event: &str, handler: &HandlerId) -> HostResult<()> {
        let listeners = &mut self.node_mut(*node)?.listeners;
        // Same (event, handler) pair is registered once, as in the DOM.
        if !listeners.iter().any(|(e, h)| e == event && h == handler) {
            listeners.push((event.to_string(), *handler));
        }
        Ok(())
    }

    fn remove_listener(&mut self, node: &NodeId, event: &str, handler: &HandlerId) -> HostResult<()> {
        self.node_mut(*node)?
            .listeners
            .retain(|(e, h)| !(e == event && h == handler));
        Ok(())
    }

    fn screen_transform(&self, node: &NodeId) -> HostResult<Affine> {
        self.node(*node)?
            .screen_transform
            .ok_or(HostError::TransformUnavailable)
    }
}
