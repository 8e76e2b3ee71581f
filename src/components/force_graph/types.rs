//! Scene input for the force graph component, derived from a server snapshot.

use crate::api::{GraphSnapshot, NodeType};
use crate::config::TypeColors;

/// A node as the canvas sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Server id. Links refer to nodes by this value.
	pub id: String,
	pub label: String,
	pub kind: NodeType,
	/// CSS fill colour.
	pub color: String,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub relationship: String,
}

/// Complete scene: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Maps a snapshot to a scene, colouring nodes by type.
	pub fn from_snapshot(snapshot: &GraphSnapshot, colors: &TypeColors) -> Self {
		let nodes = snapshot
			.nodes
			.iter()
			.map(|node| GraphNode {
				id: node.id.clone(),
				label: node.name.clone(),
				kind: node.kind,
				color: colors.get(node.kind).to_string(),
			})
			.collect();
		let links = snapshot
			.edges
			.iter()
			.map(|edge| GraphLink {
				source: edge.source.clone(),
				target: edge.target.clone(),
				relationship: edge.relationship.clone(),
			})
			.collect();
		Self { nodes, links }
	}
}
