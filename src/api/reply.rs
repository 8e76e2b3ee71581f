//! Decoding of server replies.
//!
//! The server never signals failure through the HTTP status alone: every
//! endpoint answers with a JSON body, and a body carrying an `error` field is
//! an application-level failure regardless of status. These functions are
//! pure so the reply policy can be tested without a browser.

use serde::Deserialize;

use super::error::ApiError;
use super::types::{GraphSnapshot, ImpactResult};

/// Acknowledgement of a mutating call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ack {
	Message(String),
	Error(String),
}

#[derive(Deserialize)]
struct AckBody {
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	error: Option<String>,
}

/// Decodes a `{message}` / `{error}` body. `error` wins when both are present.
pub fn decode_ack(body: &str) -> Result<Ack, ApiError> {
	let parsed: AckBody = serde_json::from_str(body)?;
	match (parsed.error, parsed.message) {
		(Some(error), _) => Ok(Ack::Error(error)),
		(None, Some(message)) => Ok(Ack::Message(message)),
		(None, None) => Err(ApiError::UnexpectedReply),
	}
}

/// Reply of `GET /api/get_graph`.
///
/// `Failed` is tried first: every snapshot field has a default, so an error
/// object would otherwise decode as an empty graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SnapshotReply {
	Failed { error: String },
	Graph(GraphSnapshot),
}

/// Decodes a full graph snapshot or the server's error object.
pub fn decode_snapshot(body: &str) -> Result<SnapshotReply, ApiError> {
	Ok(serde_json::from_str(body)?)
}

/// Reply of `GET /api/query_impacts`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImpactReply {
	Paths(Vec<ImpactResult>),
	Failed { error: String },
}

pub fn decode_impacts(body: &str) -> Result<ImpactReply, ApiError> {
	Ok(serde_json::from_str(body)?)
}
