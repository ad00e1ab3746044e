//! Lineage node search
//!
//! Lists the nodes on the canvas as search options and turns a selection
//! into a centering request for the rendering engine.

use serde::{Deserialize, Serialize};

/// Canvas position of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// A node rendered on the lineage canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageNode {
    /// Node id on the canvas
    pub id: String,
    /// Entity name
    #[serde(default)]
    pub name: Option<String>,
    /// Entity display name
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
    /// Entity fully qualified name
    #[serde(default, rename = "fullyQualifiedName")]
    pub fully_qualified_name: Option<String>,
    /// Canvas position
    #[serde(default)]
    pub position: Position,
}

impl LineageNode {
    /// Create node with a name at a position
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            display_name: None,
            fully_qualified_name: None,
            position,
        }
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Label shown to the user: display name, then name, then FQN
    #[must_use]
    pub fn label(&self) -> &str {
        [&self.display_name, &self.name, &self.fully_qualified_name]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map_or("", String::as_str)
    }
}

/// Search dropdown option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOption {
    /// Label shown to the user
    pub label: String,
    /// Node id
    pub value: String,
}

/// Instruction for the rendering engine to center on a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterRequest {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Zoom to keep while centering
    pub zoom: f64,
    /// Animation duration
    pub duration_ms: u64,
}

/// Searchable view of the canvas nodes
#[derive(Debug, Clone, Default)]
pub struct NodeSearch {
    nodes: Vec<LineageNode>,
}

impl NodeSearch {
    /// Create search over nodes
    #[inline]
    #[must_use]
    pub fn new(nodes: Vec<LineageNode>) -> Self {
        Self { nodes }
    }

    /// Replace the node set
    pub fn set_nodes(&mut self, nodes: Vec<LineageNode>) {
        self.nodes = nodes;
    }

    /// All options in canvas order
    #[must_use]
    pub fn options(&self) -> Vec<NodeOption> {
        self.nodes.iter().map(to_option).collect()
    }

    /// Options whose label contains `text`, ignoring case
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<NodeOption> {
        let needle = text.to_lowercase();
        self.nodes
            .iter()
            .filter(|node| node.label().to_lowercase().contains(&needle))
            .map(to_option)
            .collect()
    }

    /// Look up a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&LineageNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Centering request for a selected node, `None` for unknown ids
    #[must_use]
    pub fn select(&self, id: &str, zoom: f64, duration_ms: u64) -> Option<CenterRequest> {
        self.node(id).map(|node| CenterRequest {
            x: node.position.x,
            y: node.position.y,
            zoom,
            duration_ms,
        })
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn to_option(node: &LineageNode) -> NodeOption {
    NodeOption {
        label: node.label().to_string(),
        value: node.id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<LineageNode> {
        vec![
            LineageNode::new("n1", "dim_customer", Position { x: 10.0, y: 20.0 })
                .with_display_name("Dim Customer"),
            LineageNode::new("n2", "fact_orders", Position { x: 300.0, y: 20.0 }),
            LineageNode {
                id: "n3".to_string(),
                name: None,
                display_name: None,
                fully_qualified_name: Some("mysql.shop.raw_customers".to_string()),
                position: Position::default(),
            },
        ]
    }

    #[test]
    fn label_fallbacks() {
        let nodes = nodes();
        assert_eq!(nodes[0].label(), "Dim Customer");
        assert_eq!(nodes[1].label(), "fact_orders");
        assert_eq!(nodes[2].label(), "mysql.shop.raw_customers");
    }

    #[test]
    fn search_is_case_insensitive() {
        let search = NodeSearch::new(nodes());
        let hits: Vec<String> = search.search("CUSTOMER").into_iter().map(|o| o.value).collect();
        assert_eq!(hits, vec!["n1", "n3"]);
    }

    #[test]
    fn empty_search_lists_all() {
        let search = NodeSearch::new(nodes());
        assert_eq!(search.search("").len(), 3);
        assert_eq!(search.options(), search.search(""));
    }

    #[test]
    fn select_centers_on_node() {
        let search = NodeSearch::new(nodes());
        let center = search.select("n2", 0.65, 800).unwrap();
        assert!((center.x - 300.0).abs() < f64::EPSILON);
        assert!((center.y - 20.0).abs() < f64::EPSILON);
        assert_eq!(center.duration_ms, 800);
    }

    #[test]
    fn select_unknown_node() {
        let search = NodeSearch::new(nodes());
        assert!(search.select("missing", 1.0, 800).is_none());
    }

    #[test]
    fn node_deserializes_from_entity_shape() {
        let node: LineageNode = serde_json::from_str(
            r#"{"id":"n9","displayName":"Orders","position":{"x":1.0,"y":2.0}}"#,
        )
        .unwrap();
        assert_eq!(node.label(), "Orders");
        assert!(node.name.is_none());
    }
}
