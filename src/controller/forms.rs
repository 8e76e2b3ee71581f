//! Client-side validation of form input before anything is sent.

use thiserror::Error;

use crate::api::{NewEdge, NewNode, NodeType};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
	#[error("Please choose a node type")]
	MissingType,
	#[error("Please enter a node name")]
	MissingName,
	#[error("Please choose a source node")]
	MissingSource,
	#[error("Please choose a target node")]
	MissingTarget,
	#[error("Please enter a relationship")]
	MissingRelationship,
	#[error("Please select a file to upload")]
	MissingFile,
}

/// Builds a node id from its type and a millisecond timestamp.
pub fn node_id(kind: NodeType, millis: f64) -> String {
	format!("{}_{}", kind, millis.max(0.0).floor() as u64)
}

/// Validates the add-node form. `millis` seeds the generated id.
pub fn node_request(kind: &str, name: &str, millis: f64) -> Result<NewNode, FormError> {
	let kind = NodeType::parse(kind).ok_or(FormError::MissingType)?;
	let name = name.trim();
	if name.is_empty() {
		return Err(FormError::MissingName);
	}
	Ok(NewNode {
		id: node_id(kind, millis),
		kind,
		name: name.to_string(),
	})
}

/// Validates the add-edge form. Endpoint existence is left to the server.
pub fn edge_request(source: &str, target: &str, relationship: &str) -> Result<NewEdge, FormError> {
	let (source, target, relationship) = (source.trim(), target.trim(), relationship.trim());
	if source.is_empty() {
		return Err(FormError::MissingSource);
	}
	if target.is_empty() {
		return Err(FormError::MissingTarget);
	}
	if relationship.is_empty() {
		return Err(FormError::MissingRelationship);
	}
	Ok(NewEdge {
		source: source.to_string(),
		target: target.to_string(),
		relationship: relationship.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_id_uses_type_prefix_and_whole_millis() {
		assert_eq!(node_id(NodeType::Factor, 1_700_000_000_123.7), "factor_1700000000123");
	}

	#[test]
	fn valid_node_form_builds_request() {
		let req = node_request("activity", "  Deforestation ", 42.0).unwrap();
		assert_eq!(req.kind, NodeType::Activity);
		assert_eq!(req.name, "Deforestation");
		assert_eq!(req.id, "activity_42");
	}

	#[test]
	fn node_form_requires_type_and_name() {
		assert_eq!(node_request("", "x", 0.0), Err(FormError::MissingType));
		assert_eq!(node_request("unknown", "x", 0.0), Err(FormError::MissingType));
		assert_eq!(node_request("factor", "   ", 0.0), Err(FormError::MissingName));
	}

	#[test]
	fn edge_form_checks_every_field() {
		assert_eq!(edge_request("", "b", "causes"), Err(FormError::MissingSource));
		assert_eq!(edge_request("a", "", "causes"), Err(FormError::MissingTarget));
		assert_eq!(edge_request("a", "b", " "), Err(FormError::MissingRelationship));
	}

	#[test]
	fn edge_form_does_not_check_existence() {
		let req = edge_request("ghost", "phantom", "affects").unwrap();
		assert_eq!(req.source, "ghost");
		assert_eq!(req.target, "phantom");
	}

	#[test]
	fn missing_file_message_matches_upload_prompt() {
		assert_eq!(FormError::MissingFile.to_string(), "Please select a file to upload");
	}
}
