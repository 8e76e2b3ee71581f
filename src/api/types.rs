//! Wire data model shared with the graph server.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of an entity in the impact graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	Activity,
	Factor,
	Location,
	Consequence,
	/// Anything the server reports that this client does not know about.
	#[default]
	#[serde(other)]
	Unknown,
}

impl NodeType {
	/// Types a user may pick when creating a node.
	pub const SELECTABLE: [NodeType; 4] = [
		NodeType::Activity,
		NodeType::Factor,
		NodeType::Location,
		NodeType::Consequence,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			NodeType::Activity => "activity",
			NodeType::Factor => "factor",
			NodeType::Location => "location",
			NodeType::Consequence => "consequence",
			NodeType::Unknown => "unknown",
		}
	}

	/// Human readable label used in the type picker.
	pub fn title(self) -> &'static str {
		match self {
			NodeType::Activity => "Activity",
			NodeType::Factor => "Environmental Factor",
			NodeType::Location => "Geographic Area",
			NodeType::Consequence => "Consequence",
			NodeType::Unknown => "Unknown",
		}
	}

	/// Parses a form value. Only selectable types are accepted.
	pub fn parse(value: &str) -> Option<Self> {
		Self::SELECTABLE
			.into_iter()
			.find(|t| t.as_str() == value.trim())
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An entity as stored on the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	pub name: String,
	#[serde(rename = "type", default)]
	pub kind: NodeType,
}

impl Node {
	/// Text shown for this node in the selection dropdowns.
	pub fn option_label(&self) -> String {
		format!("{} ({})", self.name, self.kind)
	}
}

/// A directed, labelled relationship between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub relationship: String,
}

/// The full node and edge set, replaced wholesale on every fetch.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphSnapshot {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl GraphSnapshot {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

/// One causal chain from the queried source to a consequence.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ImpactResult {
	/// Name of the consequence the path ends in, when the server reports it.
	#[serde(default)]
	pub consequence: Option<String>,
	pub path: Vec<String>,
}

impl ImpactResult {
	pub fn joined_path(&self) -> String {
		self.path.join(" → ")
	}
}

/// Body of `POST /api/add_node`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewNode {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: NodeType,
	pub name: String,
}

/// Body of `POST /api/add_edge`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewEdge {
	pub source: String,
	pub target: String,
	pub relationship: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snapshot_decodes_server_shape() {
		let json = r#"{
			"nodes": [
				{"id": "activity_1", "name": "Mining", "type": "activity"},
				{"id": "c1", "name": "Erosion", "type": "consequence"}
			],
			"edges": [{"source": "activity_1", "target": "c1", "relationship": "causes"}]
		}"#;
		let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(snapshot.nodes.len(), 2);
		assert_eq!(snapshot.nodes[0].kind, NodeType::Activity);
		assert_eq!(snapshot.nodes[1].kind, NodeType::Consequence);
		assert_eq!(snapshot.edges[0].relationship, "causes");
	}

	#[test]
	fn unknown_type_does_not_fail_snapshot() {
		let json = r#"{"nodes": [{"id": "x", "name": "x", "type": "unknown"}, {"id": "y", "name": "y", "type": "river"}]}"#;
		let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();
		assert!(snapshot.nodes.iter().all(|n| n.kind == NodeType::Unknown));
		assert!(snapshot.edges.is_empty());
	}

	#[test]
	fn empty_object_is_empty_snapshot() {
		let snapshot: GraphSnapshot = serde_json::from_str("{}").unwrap();
		assert!(snapshot.is_empty());
	}

	#[test]
	fn new_node_serializes_type_field() {
		let body = NewNode {
			id: "factor_42".into(),
			kind: NodeType::Factor,
			name: "Air quality".into(),
		};
		let value = serde_json::to_value(&body).unwrap();
		assert_eq!(
			value,
			serde_json::json!({"id": "factor_42", "type": "factor", "name": "Air quality"})
		);
	}

	#[test]
	fn parse_rejects_unknown_and_blank() {
		assert_eq!(NodeType::parse("location"), Some(NodeType::Location));
		assert_eq!(NodeType::parse(" consequence "), Some(NodeType::Consequence));
		assert_eq!(NodeType::parse("unknown"), None);
		assert_eq!(NodeType::parse(""), None);
	}

	#[test]
	fn option_label_and_path_formatting() {
		let node = Node {
			id: "l1".into(),
			name: "Delta".into(),
			kind: NodeType::Location,
		};
		assert_eq!(node.option_label(), "Delta (location)");

		let impact = ImpactResult {
			consequence: None,
			path: vec!["Mining".into(), "Runoff".into(), "Fish loss".into()],
		};
		assert_eq!(impact.joined_path(), "Mining → Runoff → Fish loss");
	}
}
