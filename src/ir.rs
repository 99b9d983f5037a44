use std::collections::HashMap;

use crate::layout::{LayoutError, Point, Positioned};
use crate::theme::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub color: Color,
    position: Point,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, name: &str, color: Color) -> Self {
        Self {
            id,
            name: name.to_string(),
            color,
            position: Point::ORIGIN,
            children: Vec::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }
}

// Nodes compare by name only; the index is not part of the identity.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Node {}

impl Positioned for Node {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// The node set: an arena in creation order plus a name index.
///
/// Layout never reorders the arena. Engines that need a different order
/// compute it on the side, so a `NodeId` stays valid for the whole life of
/// the graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    /// Adds a node, or returns the existing one with that name.
    pub fn ensure_node(&mut self, name: &str, color: Color) -> NodeId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name, color));
        self.index.insert(name.to_string(), id);
        id
    }

    /// Ingests one discovered `name` below `parent`.
    ///
    /// A missing parent is created first (with `parent_color`, falling back
    /// to `color`), then the node itself. The edge is only added when the
    /// parent has no child of that name yet, so repeated calls are harmless.
    /// An empty `parent` makes this a stand-alone node.
    pub fn create_node(
        &mut self,
        name: &str,
        parent: &str,
        color: Color,
        parent_color: Option<Color>,
    ) -> NodeId {
        if parent.is_empty() {
            return self.create_standalone_node(name, color);
        }
        let parent_id = self.ensure_node(parent, parent_color.unwrap_or(color));
        let id = self.ensure_node(name, color);
        if !self.has_child(parent_id, name) {
            self.add_child(parent_id, id);
        }
        id
    }

    pub fn create_standalone_node(&mut self, name: &str, color: Color) -> NodeId {
        self.ensure_node(name, color)
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id.0].child_count()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .filter_map(|child| self.nodes.get(child.0))
    }

    pub fn has_child(&self, id: NodeId, name: &str) -> bool {
        self.children(id).any(|child| child.name == name)
    }

    /// Appends without a duplicate check; see `create_node` for the checked path.
    pub fn add_child(&mut self, id: NodeId, child: NodeId) {
        self.nodes[id.0].children.push(child);
    }

    pub fn position(&self, id: NodeId) -> Point {
        self.nodes[id.0].position
    }

    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.nodes[id.0].position = position;
    }

    /// Moves one node by hand. No engine is told about it.
    pub fn reposition(&mut self, name: &str, position: Point) -> Result<(), LayoutError> {
        let id = self
            .node_by_name(name)
            .ok_or_else(|| LayoutError::NotFound(name.to_string()))?;
        self.set_position(id, position);
        Ok(())
    }

    pub fn child_positions(&self, id: NodeId) -> Vec<Point> {
        self.children(id).map(|child| child.position).collect()
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        for node in &self.nodes {
            if let Some(missing) = node.children.iter().find(|child| child.0 >= self.nodes.len()) {
                return Err(LayoutError::InvalidLayoutState(format!(
                    "node '{}' references child #{} outside the node set of {}",
                    node.name,
                    missing.0,
                    self.nodes.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Color {
        Color::default()
    }

    #[test]
    fn create_node_is_idempotent() {
        let mut graph = Graph::new();
        let a = graph.create_node("a", "root", white(), None);
        let again = graph.create_node("a", "root", white(), None);
        assert_eq!(a, again);
        assert_eq!(graph.len(), 2);
        let root = graph.node_by_name("root").unwrap();
        assert_eq!(graph.child_count(root), 1);
        assert!(graph.has_child(root, "a"));
        assert!(!graph.has_child(root, "b"));
    }

    #[test]
    fn parent_is_created_before_child() {
        let mut graph = Graph::new();
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        graph.create_node("child", "parent", red, Some(blue));
        assert_eq!(graph.nodes()[0].name, "parent");
        assert_eq!(graph.nodes()[0].color, blue);
        assert_eq!(graph.nodes()[1].name, "child");
        assert_eq!(graph.nodes()[1].color, red);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut graph = Graph::new();
        for name in ["c", "a", "b"] {
            graph.create_node(name, "p", white(), None);
        }
        let p = graph.node_by_name("p").unwrap();
        let names: Vec<&str> = graph.children(p).map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn nodes_compare_by_name() {
        let a = Node::new(NodeId(0), "same", white());
        let b = Node::new(NodeId(7), "same", Color::rgb(1, 2, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn add_child_does_not_deduplicate() {
        let mut graph = Graph::new();
        let p = graph.ensure_node("p", white());
        let c = graph.ensure_node("c", white());
        graph.add_child(p, c);
        graph.add_child(p, c);
        assert_eq!(graph.child_count(p), 2);
    }

    #[test]
    fn reposition_unknown_name_is_not_found() {
        let mut graph = Graph::new();
        graph.ensure_node("a", white());
        assert!(graph.reposition("a", Point::new(3, 4)).is_ok());
        assert_eq!(graph.position(NodeId(0)), Point::new(3, 4));
        assert!(matches!(
            graph.reposition("missing", Point::ORIGIN),
            Err(LayoutError::NotFound(_))
        ));
    }

    #[test]
    fn child_positions_follow_children() {
        let mut graph = Graph::new();
        let a = graph.create_node("a", "p", white(), None);
        let b = graph.create_node("b", "p", white(), None);
        graph.set_position(a, Point::new(1, 1));
        graph.set_position(b, Point::new(2, 2));
        let p = graph.node_by_name("p").unwrap();
        assert_eq!(graph.child_positions(p), vec![Point::new(1, 1), Point::new(2, 2)]);
    }

    #[test]
    fn validate_flags_dangling_children() {
        let mut graph = Graph::new();
        let p = graph.ensure_node("p", white());
        assert!(graph.validate().is_ok());
        graph.add_child(p, NodeId(42));
        assert!(matches!(
            graph.validate(),
            Err(LayoutError::InvalidLayoutState(_))
        ));
    }
}
