//! Layout simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, the
//! pan/zoom transform, drag pinning, a cooling schedule that stops the
//! physics once the layout has settled, and the hover tooltip.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use crate::api::NodeType;

use super::scale::{ScaleConfig, ScaledValues};
use super::types::GraphData;

/// Physics stops once alpha falls below this.
pub const ALPHA_MIN: f64 = 0.001;
/// Alpha target while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;
/// Alpha a resize reheats the layout to.
pub const RESIZE_ALPHA: f64 = 0.3;
/// Ticks for a fresh layout to cool from 1 to [`ALPHA_MIN`].
const COOLING_TICKS: f64 = 300.0;

const TOOLTIP_FADE_IN: f64 = 0.2;
const TOOLTIP_FADE_OUT: f64 = 0.5;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub kind: NodeType,
	pub color: String,
}

/// Per-edge metadata. The simulation graph is undirected, so the source is
/// kept here to orient arrows.
#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub relationship: String,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Layout heat. Each tick alpha moves towards `target` by a fixed fraction
/// and damps the physics step; the simulation halts when it drops below
/// [`ALPHA_MIN`].
#[derive(Clone, Debug)]
pub struct Heat {
	pub alpha: f64,
	pub target: f64,
	decay: f64,
}

impl Default for Heat {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			target: 0.0,
			decay: 1.0 - ALPHA_MIN.powf(1.0 / COOLING_TICKS),
		}
	}
}

impl Heat {
	pub fn cool(&mut self) {
		self.alpha += (self.target - self.alpha) * self.decay;
	}
}

/// Hover tooltip with fade in/out. Keeps the last node while fading out.
#[derive(Clone, Debug, Default)]
pub struct Tooltip {
	pub node: Option<DefaultNodeIdx>,
	pub opacity: f64,
	visible: bool,
}

impl Tooltip {
	fn show(&mut self, idx: DefaultNodeIdx) {
		if self.node != Some(idx) {
			self.opacity = 0.0;
		}
		self.node = Some(idx);
		self.visible = true;
	}

	fn hide(&mut self) {
		self.visible = false;
	}

	fn tick(&mut self, dt: f64) {
		if self.visible {
			self.opacity = (self.opacity + dt / TOOLTIP_FADE_IN).min(1.0);
		} else if self.node.is_some() {
			self.opacity = (self.opacity - dt / TOOLTIP_FADE_OUT).max(0.0);
			if self.opacity <= 0.0 {
				self.node = None;
			}
		}
	}
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Built from scratch for every snapshot; the animation loop calls `tick`
/// each frame.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub heat: Heat,
	pub hovered: Option<DefaultNodeIdx>,
	pub tooltip: Tooltip,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	edge_count: usize,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 400.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();

		// Seed positions on a circle around the world origin, which the
		// transform maps to the canvas centre.
		let ring = 100.0 + 8.0 * data.nodes.len() as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					kind: node.kind,
					color: node.color.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edge_count = 0;
		for link in &data.links {
			let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			else {
				debug!(
					"impact-graph: skipping edge {} -> {} with a missing endpoint",
					link.source, link.target
				);
				continue;
			};
			if src == tgt {
				continue;
			}
			graph.add_edge(
				src,
				tgt,
				EdgeData {
					user_data: EdgeInfo {
						source: src,
						relationship: link.relationship.clone(),
					},
				},
			);
			edge_count += 1;
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			heat: Heat::default(),
			hovered: None,
			tooltip: Tooltip::default(),
			width,
			height,
			animation_running: true,
			id_to_idx,
			edge_count,
		}
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Resumes the simulation without touching alpha.
	pub fn restart(&mut self) {
		self.animation_running = true;
	}

	/// Pins `idx` at its current position and keeps the layout warm.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		let Some((nx, ny)) = self.node_position(idx) else {
			return;
		};
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: nx,
			node_start_y: ny,
		};
		self.set_pinned(idx, true);
		self.heat.target = DRAG_ALPHA_TARGET;
		self.restart();
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
			}
		});
	}

	/// Releases the dragged node back to the simulation and lets it cool.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.set_pinned(idx, false);
			self.heat.target = 0.0;
		}
		self.drag.active = false;
	}

	fn set_pinned(&mut self, idx: DefaultNodeIdx, pinned: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = pinned;
			}
		});
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zooms by one wheel step, keeping the point under the cursor fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		match node {
			Some(idx) => self.tooltip.show(idx),
			None => self.tooltip.hide(),
		}
	}

	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<(f64, f64, NodeInfo)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64, node.data.user_data.clone()));
			}
		});
		found
	}

	pub fn tick(&mut self, dt: f32) {
		self.tooltip.tick(dt as f64);
		if !self.animation_running {
			return;
		}
		self.heat.cool();
		// The step enters the velocity gain twice, so sqrt(alpha) scales
		// forces linearly with heat.
		self.graph.update(dt * self.heat.alpha.sqrt() as f32);
		if self.heat.alpha < ALPHA_MIN {
			self.animation_running = false;
		}
	}

	/// Adopts a new canvas size. The view stays centred; node positions,
	/// pinned or not, are kept.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
		self.heat.alpha = RESIZE_ALPHA;
		self.restart();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	impl ForceGraphState {
		fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
			self.id_to_idx.get(id).copied()
		}

		fn is_pinned(&self, idx: DefaultNodeIdx) -> bool {
			let mut pinned = false;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					pinned = node.data.is_anchor;
				}
			});
			pinned
		}
	}

	fn scene() -> GraphData {
		let node = |id: &str, kind| GraphNode {
			id: id.into(),
			label: id.into(),
			kind,
			color: "#000000".into(),
		};
		let link = |s: &str, t: &str| GraphLink {
			source: s.into(),
			target: t.into(),
			relationship: "causes".into(),
		};
		GraphData {
			nodes: vec![
				node("mining", NodeType::Activity),
				node("runoff", NodeType::Factor),
				node("fish_loss", NodeType::Consequence),
			],
			links: vec![
				link("mining", "runoff"),
				link("runoff", "fish_loss"),
				link("runoff", "nowhere"),
				link("mining", "mining"),
			],
		}
	}

	#[test]
	fn empty_scene_builds_and_ticks() {
		let mut state = ForceGraphState::new(&GraphData::default(), 800.0, 600.0);
		assert_eq!(state.node_count(), 0);
		assert_eq!(state.edge_count(), 0);
		state.tick(0.016);
		assert_eq!(state.node_at_position(400.0, 300.0, &ScaleConfig::default()), None);
	}

	#[test]
	fn dangling_and_self_edges_are_skipped() {
		let state = ForceGraphState::new(&scene(), 800.0, 600.0);
		assert_eq!(state.node_count(), 3);
		assert_eq!(state.edge_count(), 2);

		let mut arrows = Vec::new();
		state.graph.visit_edges(|_, _, edge| {
			arrows.push(edge.user_data.source);
		});
		assert_eq!(arrows.len(), 2);
		assert!(arrows.contains(&state.index_of("mining").unwrap()));
		assert!(arrows.contains(&state.index_of("runoff").unwrap()));
	}

	#[test]
	fn node_under_cursor_is_found() {
		let state = ForceGraphState::new(&scene(), 800.0, 600.0);
		let idx = state.index_of("runoff").unwrap();
		let (x, y) = state.node_position(idx).unwrap();
		let (sx, sy) = (
			x as f64 * state.transform.k + state.transform.x,
			y as f64 * state.transform.k + state.transform.y,
		);
		assert_eq!(state.node_at_position(sx, sy, &ScaleConfig::default()), Some(idx));
	}

	#[test]
	fn drag_pins_node_and_release_unpins() {
		let mut state = ForceGraphState::new(&scene(), 800.0, 600.0);
		let idx = state.index_of("mining").unwrap();
		let (x0, y0) = state.node_position(idx).unwrap();

		state.begin_drag(idx, 10.0, 10.0);
		assert!(state.is_pinned(idx));
		assert_eq!(state.heat.target, DRAG_ALPHA_TARGET);

		state.drag_to(40.0, 30.0);
		let (x1, y1) = state.node_position(idx).unwrap();
		assert!((x1 - (x0 + 30.0)).abs() < 1e-3);
		assert!((y1 - (y0 + 20.0)).abs() < 1e-3);

		state.end_drag();
		assert!(!state.is_pinned(idx));
		assert!(!state.drag.active);
		assert_eq!(state.heat.target, 0.0);
	}

	#[test]
	fn layout_settles_and_drag_rewarms_it() {
		let mut state = ForceGraphState::new(&scene(), 800.0, 600.0);
		for _ in 0..1000 {
			state.tick(0.016);
		}
		assert!(!state.animation_running);

		let idx = state.index_of("fish_loss").unwrap();
		state.begin_drag(idx, 0.0, 0.0);
		for _ in 0..1000 {
			state.tick(0.016);
		}
		assert!(state.animation_running);
		assert!((state.heat.alpha - DRAG_ALPHA_TARGET).abs() < 0.01);

		state.end_drag();
		for _ in 0..1000 {
			state.tick(0.016);
		}
		assert!(!state.animation_running);
	}

	fn positions(state: &ForceGraphState) -> Vec<(f32, f32)> {
		let mut out = Vec::new();
		state.graph.visit_nodes(|node| out.push((node.x(), node.y())));
		out
	}

	#[test]
	fn layout_is_at_rest_when_physics_stops() {
		let nodes = (0..40)
			.map(|i| GraphNode {
				id: format!("n{}", i),
				label: format!("n{}", i),
				kind: NodeType::Factor,
				color: "#000000".into(),
			})
			.collect();
		let links = (1..40)
			.map(|i| GraphLink {
				source: format!("n{}", (i - 1) / 3),
				target: format!("n{}", i),
				relationship: "causes".into(),
			})
			.collect();
		let mut state = ForceGraphState::new(&GraphData { nodes, links }, 800.0, 600.0);

		let mut last_step = f32::MAX;
		for _ in 0..1000 {
			let before = positions(&state);
			state.tick(0.016);
			last_step = before
				.iter()
				.zip(positions(&state))
				.map(|(a, b)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
				.fold(0.0, f32::max);
			if !state.animation_running {
				break;
			}
		}
		assert!(!state.animation_running);
		assert!(last_step < 0.05, "still moving {} px per tick", last_step);
	}

	#[test]
	fn resize_recentres_and_keeps_pins() {
		let mut state = ForceGraphState::new(&scene(), 800.0, 600.0);
		let idx = state.index_of("runoff").unwrap();
		state.begin_drag(idx, 0.0, 0.0);
		state.drag_to(50.0, -20.0);
		let pinned_at = state.node_position(idx).unwrap();
		state.transform.x += 15.0;

		state.resize(1000.0, 800.0);
		assert_eq!(state.transform.x, 400.0 + 15.0 + 100.0);
		assert_eq!(state.transform.y, 300.0 + 100.0);
		assert!(state.is_pinned(idx));
		assert_eq!(state.node_position(idx).unwrap(), pinned_at);
		assert!(state.animation_running);
		assert_eq!(state.heat.alpha, RESIZE_ALPHA);
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let mut state = ForceGraphState::new(&GraphData::default(), 800.0, 600.0);
		let before = state.screen_to_graph(200.0, 100.0);
		state.zoom_at(200.0, 100.0, true);
		let after = state.screen_to_graph(200.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, true);
		}
		assert_eq!(state.transform.k, 10.0);
	}

	#[test]
	fn tooltip_fades_in_and_out() {
		let mut state = ForceGraphState::new(&scene(), 800.0, 600.0);
		let idx = state.index_of("mining").unwrap();
		state.set_hover(Some(idx));
		state.tick(0.1);
		assert!((state.tooltip.opacity - 0.5).abs() < 1e-6);
		state.tick(0.2);
		assert_eq!(state.tooltip.opacity, 1.0);

		state.set_hover(None);
		state.tick(0.25);
		assert_eq!(state.tooltip.node, Some(idx));
		state.tick(0.3);
		assert_eq!(state.tooltip.node, None);
	}
}
