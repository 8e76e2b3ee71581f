//! Canvas rendering for the force graph.
//!
//! Drawing order:
//! 1. Background (screen space)
//! 2. Edges with arrow heads, then relationship labels (world space)
//! 3. Nodes and their labels, hovered ring on top (world space)
//! 4. Tooltip (screen space)

use std::f64::consts::PI;

use force_graph::Node;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	draw_tooltip(state, ctx, theme);
}

/// Endpoints of an edge in arrow direction.
fn oriented<'a>(
	n1: &'a Node<NodeInfo>,
	n2: &'a Node<NodeInfo>,
	source: force_graph::DefaultNodeIdx,
) -> (&'a Node<NodeInfo>, &'a Node<NodeInfo>) {
	if n1.index() == source { (n1, n2) } else { (n2, n1) }
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let color = theme.edge.color.to_css();
	ctx.set_stroke_style_str(&color);
	ctx.set_fill_style_str(&color);
	ctx.set_line_width(scale.edge_width);

	state.graph.visit_edges(|n1, n2, edge| {
		let (from, to) = oriented(n1, n2, edge.user_data.source);
		let (x1, y1, x2, y2) = (
			from.x() as f64,
			from.y() as f64,
			to.x() as f64,
			to.y() as f64,
		);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < scale.node_radius * 2.0 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.begin_path();
		ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
		ctx.line_to(
			x2 - ux * (scale.node_radius + scale.arrow_size),
			y2 - uy * (scale.node_radius + scale.arrow_size),
		);
		ctx.stroke();

		let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
		let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
		let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});

	if scale.edge_label_alpha <= 0.01 {
		return;
	}
	ctx.set_fill_style_str(&theme.edge.label_color.fade(scale.edge_label_alpha).to_css());
	ctx.set_font(&scale.edge_label_font);
	ctx.set_text_align("center");
	state.graph.visit_edges(|n1, n2, edge| {
		let relationship = &edge.user_data.relationship;
		if relationship.is_empty() {
			return;
		}
		let (mx, my) = (
			(n1.x() as f64 + n2.x() as f64) / 2.0,
			(n1.y() as f64 + n2.y() as f64) / 2.0,
		);
		let _ = ctx.fill_text(relationship, mx, my - 3.0 / scale.k);
	});
	ctx.set_text_align("start");
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_font(&scale.label_font);
	ctx.set_line_width(theme.node.border_width / scale.k);
	ctx.set_stroke_style_str(&theme.node.border_color.to_css());

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		ctx.begin_path();
		let _ = ctx.arc(x, y, scale.node_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();
		ctx.stroke();

		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		let _ = ctx.fill_text(
			&node.data.user_data.label,
			x + scale.label_offset,
			y + 4.0 / scale.k,
		);
	});

	let Some((x, y, _)) = state.hovered.and_then(|idx| state.node_info(idx)) else {
		return;
	};
	ctx.begin_path();
	let _ = ctx.arc(x, y, scale.node_radius + 3.0 / scale.k, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&theme.node.hover_ring.to_css());
	ctx.set_line_width(2.0 / scale.k);
	ctx.stroke();
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if state.tooltip.opacity <= 0.01 {
		return;
	}
	let Some((x, y, info)) = state.tooltip.node.and_then(|idx| state.node_info(idx)) else {
		return;
	};
	let style = &theme.tooltip;
	let lines = [format!("Type: {}", info.kind), format!("Name: {}", info.label)];

	ctx.set_font(style.font);
	let text_width = lines
		.iter()
		.filter_map(|line| ctx.measure_text(line).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let (box_w, box_h) = (
		text_width + style.padding * 2.0,
		style.line_height * lines.len() as f64 + style.padding * 2.0,
	);

	// Offset from the node like a pointer tooltip, kept inside the canvas.
	let (sx, sy) = (
		x * state.transform.k + state.transform.x + 10.0,
		y * state.transform.k + state.transform.y - 28.0,
	);
	let left = sx.min(state.width - box_w).max(0.0);
	let top = sy.min(state.height - box_h).max(0.0);

	ctx.set_global_alpha(0.9 * state.tooltip.opacity);
	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(left, top, box_w, box_h);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(left, top, box_w, box_h);

	ctx.set_fill_style_str(&style.text.to_css());
	for (i, line) in lines.iter().enumerate() {
		let baseline = top + style.padding + style.line_height * (i as f64 + 1.0) - 4.0;
		let _ = ctx.fill_text(line, left + style.padding, baseline);
	}
	ctx.set_global_alpha(1.0);
}
