//! The view controller: owns the last fetched snapshot and turns user actions
//! into API calls.
//!
//! Every mutating action follows the same contract: send, and on an
//! acknowledgement re-fetch the whole snapshot. A reply carrying an `error`
//! field raises a blocking alert and leaves the graph untouched. Transport
//! and decode failures are only logged.

mod forms;
mod sequence;

use std::future::Future;

use leptos::prelude::*;
use log::{debug, error, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::api::{Ack, ApiClient, ApiError, GraphSnapshot, ImpactReply, ImpactResult, SnapshotReply};
use crate::config::{ClientConfig, TypeColors};

pub use forms::{FormError, edge_request, node_id, node_request};
pub use sequence::Sequencer;

/// What the controller does once a mutating call has completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
	/// Acknowledged: reload the snapshot and reset the originating form.
	Reload,
	/// The server reported an error; show it to the user.
	Alert(String),
	/// Transport or decode failure; log and leave everything as is.
	Abandon(String),
}

/// Maps a completed mutating call to the controller's reaction.
pub fn settle(result: Result<Ack, ApiError>) -> Outcome {
	match result {
		Ok(Ack::Message(_)) => Outcome::Reload,
		Ok(Ack::Error(message)) => Outcome::Alert(format!("Error: {}", message)),
		Err(e) => Outcome::Abandon(e.to_string()),
	}
}

/// State of the impact query panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImpactView {
	/// No query has completed yet.
	#[default]
	Idle,
	Paths(Vec<ImpactResult>),
	Failed(String),
}

impl From<ImpactReply> for ImpactView {
	fn from(reply: ImpactReply) -> Self {
		match reply {
			ImpactReply::Paths(paths) => ImpactView::Paths(paths),
			ImpactReply::Failed { error } => ImpactView::Failed(error),
		}
	}
}

/// Shows a blocking browser alert.
pub fn alert(message: &str) {
	let Some(window) = web_sys::window() else {
		warn!("impact-graph: no window to alert: {}", message);
		return;
	};
	if window.alert_with_message(message).is_err() {
		warn!("impact-graph: alert failed: {}", message);
	}
}

/// Single owner of the client-side graph state.
///
/// All fields are arena handles, so the controller is `Copy` and is handed to
/// components through context.
#[derive(Clone, Copy)]
pub struct ViewController {
	client: StoredValue<ApiClient>,
	colors: StoredValue<TypeColors>,
	relationships: StoredValue<Vec<String>>,
	min_canvas_height: f64,
	snapshot: RwSignal<GraphSnapshot>,
	loaded: RwSignal<bool>,
	impacts: RwSignal<ImpactView>,
	graph_seq: StoredValue<Sequencer>,
	query_seq: StoredValue<Sequencer>,
}

impl ViewController {
	pub fn new(config: &ClientConfig) -> Self {
		Self {
			client: StoredValue::new(ApiClient::new(config.api_base.clone())),
			colors: StoredValue::new(config.type_colors()),
			relationships: StoredValue::new(config.relationships.clone()),
			min_canvas_height: config.min_canvas_height,
			snapshot: RwSignal::new(GraphSnapshot::default()),
			loaded: RwSignal::new(false),
			impacts: RwSignal::new(ImpactView::Idle),
			graph_seq: StoredValue::new(Sequencer::default()),
			query_seq: StoredValue::new(Sequencer::default()),
		}
	}

	pub fn snapshot(&self) -> Signal<GraphSnapshot> {
		self.snapshot.read_only().into()
	}

	/// Whether any snapshot has been applied yet.
	pub fn loaded(&self) -> Signal<bool> {
		self.loaded.read_only().into()
	}

	pub fn impacts(&self) -> Signal<ImpactView> {
		self.impacts.read_only().into()
	}

	pub fn colors(&self) -> TypeColors {
		self.colors.get_value()
	}

	pub fn relationships(&self) -> Vec<String> {
		self.relationships.get_value()
	}

	pub fn min_canvas_height(&self) -> f64 {
		self.min_canvas_height
	}

	/// Fetches the snapshot. Failures keep the previous snapshot on screen;
	/// an `error` reply is also shown as an alert.
	pub fn load_graph_data(&self) {
		let Some(ticket) = self.graph_seq.try_update_value(Sequencer::issue) else {
			return;
		};
		let (this, client) = (*self, self.client.get_value());
		spawn_local(async move {
			match client.get_graph().await {
				Ok(SnapshotReply::Graph(snapshot)) => this.apply_snapshot(ticket, snapshot),
				Ok(SnapshotReply::Failed { error }) => alert(&format!("Error: {}", error)),
				Err(e) => warn!("impact-graph: failed to load graph: {}", e),
			}
		});
	}

	fn apply_snapshot(&self, ticket: u64, snapshot: GraphSnapshot) {
		if self.graph_seq.try_update_value(|s| s.accept(ticket)) != Some(true) {
			debug!("impact-graph: discarding stale snapshot #{}", ticket);
			return;
		}
		info!(
			"impact-graph: loaded {} nodes, {} edges",
			snapshot.nodes.len(),
			snapshot.edges.len()
		);
		let _ = self.snapshot.try_set(snapshot);
		let _ = self.loaded.try_set(true);
	}

	pub fn add_node(&self, kind: &str, name: &str, on_success: impl FnOnce() + 'static) {
		let request = match node_request(kind, name, js_sys::Date::now()) {
			Ok(request) => request,
			Err(e) => return alert(&e.to_string()),
		};
		let client = self.client.get_value();
		self.submit(
			"add node",
			async move { client.add_node(&request).await },
			on_success,
		);
	}

	pub fn add_edge(
		&self,
		source: &str,
		target: &str,
		relationship: &str,
		on_success: impl FnOnce() + 'static,
	) {
		let request = match edge_request(source, target, relationship) {
			Ok(request) => request,
			Err(e) => return alert(&e.to_string()),
		};
		let client = self.client.get_value();
		self.submit(
			"add edge",
			async move { client.add_edge(&request).await },
			on_success,
		);
	}

	pub fn upload_data(&self, file: Option<File>, on_success: impl FnOnce() + 'static) {
		let Some(file) = file else {
			return alert(&FormError::MissingFile.to_string());
		};
		info!("impact-graph: uploading {}", file.name());
		let client = self.client.get_value();
		self.submit(
			"upload",
			async move { client.upload_data(&file).await },
			on_success,
		);
	}

	pub fn load_sample_data(&self) {
		let client = self.client.get_value();
		self.submit(
			"load sample data",
			async move { client.load_sample_data().await },
			|| {},
		);
	}

	/// Queries impact paths from `source`. Only the newest query's answer is shown.
	pub fn query_impacts(&self, source: &str) {
		let Some(ticket) = self.query_seq.try_update_value(Sequencer::issue) else {
			return;
		};
		let (this, client, source) = (*self, self.client.get_value(), source.to_string());
		spawn_local(async move {
			match client.query_impacts(&source).await {
				Ok(reply) => {
					if this.query_seq.try_update_value(|s| s.accept(ticket)) != Some(true) {
						debug!("impact-graph: discarding stale impact query #{}", ticket);
						return;
					}
					let _ = this.impacts.try_set(reply.into());
				}
				Err(e) => error!("impact-graph: impact query for {} failed: {}", source, e),
			}
		});
	}

	fn submit<F>(&self, action: &'static str, request: F, on_success: impl FnOnce() + 'static)
	where
		F: Future<Output = Result<Ack, ApiError>> + 'static,
	{
		let this = *self;
		spawn_local(async move {
			match settle(request.await) {
				Outcome::Reload => {
					this.load_graph_data();
					on_success();
				}
				Outcome::Alert(message) => alert(&message),
				Outcome::Abandon(reason) => error!("impact-graph: {} failed: {}", action, reason),
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::reply::decode_ack;

	#[test]
	fn acknowledgement_reloads() {
		let outcome = settle(decode_ack(r#"{"message": "Edge added successfully"}"#));
		assert_eq!(outcome, Outcome::Reload);
	}

	#[test]
	fn error_reply_alerts_exact_message_and_never_reloads() {
		let outcome = settle(decode_ack(r#"{"error": "Target node \"Sea\" not found"}"#));
		let Outcome::Alert(text) = outcome else {
			panic!("expected alert");
		};
		assert!(text.contains("Target node \"Sea\" not found"));
	}

	#[test]
	fn transport_failure_is_abandoned() {
		let outcome = settle(Err(ApiError::Transport("NetworkError".into())));
		assert!(matches!(outcome, Outcome::Abandon(reason) if reason.contains("NetworkError")));
	}

	#[test]
	fn undecodable_reply_is_abandoned() {
		assert!(matches!(settle(decode_ack("not json")), Outcome::Abandon(_)));
	}

	fn snapshot_with(id: &str) -> GraphSnapshot {
		GraphSnapshot {
			nodes: vec![crate::api::Node {
				id: id.into(),
				name: id.into(),
				kind: crate::api::NodeType::Activity,
			}],
			edges: Vec::new(),
		}
	}

	#[test]
	fn stale_snapshot_does_not_replace_newer_one() {
		let owner = Owner::new();
		owner.set();
		let controller = ViewController::new(&ClientConfig::default());
		let older = controller.graph_seq.try_update_value(Sequencer::issue).unwrap();
		let newer = controller.graph_seq.try_update_value(Sequencer::issue).unwrap();

		controller.apply_snapshot(newer, snapshot_with("newer"));
		controller.apply_snapshot(older, snapshot_with("older"));

		assert_eq!(controller.snapshot().get_untracked(), snapshot_with("newer"));
		assert!(controller.loaded().get_untracked());
	}

	#[test]
	fn snapshot_is_not_applied_before_first_load() {
		let owner = Owner::new();
		owner.set();
		let controller = ViewController::new(&ClientConfig::default());
		assert!(controller.snapshot().get_untracked().is_empty());
		assert!(!controller.loaded().get_untracked());
	}

	#[test]
	fn impact_reply_maps_to_view() {
		assert_eq!(
			ImpactView::from(ImpactReply::Paths(Vec::new())),
			ImpactView::Paths(Vec::new())
		);
		assert_eq!(
			ImpactView::from(ImpactReply::Failed {
				error: "Source node required".into()
			}),
			ImpactView::Failed("Source node required".into())
		);
	}
}
