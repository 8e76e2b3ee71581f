//! Client side of the graph server's HTTP API.
//!
//! [`ApiClient`] performs the requests; [`reply`] turns bodies into typed
//! values. Transport and decode failures surface as [`ApiError`], while a
//! reply's `error` field is a regular value ([`Ack::Error`],
//! [`ImpactReply::Failed`], [`SnapshotReply::Failed`]).

mod client;
mod error;
pub mod reply;
mod types;

pub use client::{ApiClient, Endpoint};
pub use error::ApiError;
pub use reply::{Ack, ImpactReply, SnapshotReply};
pub use types::{Edge, GraphSnapshot, ImpactResult, NewEdge, NewNode, Node, NodeType};
