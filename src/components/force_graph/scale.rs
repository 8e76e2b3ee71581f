//! Zoom-dependent sizing of graph visuals.
//!
//! Drawing happens after the canvas transform is applied, so every value
//! produced here is in world units. A value that should keep a fixed pixel
//! size has to be divided by the zoom factor `k`.

/// How a size reacts to the zoom factor.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant pixel size.
	Screen,
	/// World-space size whose on-screen size stays within bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Opacity ramp between two zoom levels: invisible at or below `hidden_k`,
/// opaque at or above `visible_k`.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomFade {
	pub hidden_k: f64,
	pub visible_k: f64,
}

impl ZoomFade {
	pub fn alpha(&self, k: f64) -> f64 {
		if self.visible_k <= self.hidden_k {
			return if k >= self.visible_k { 1.0 } else { 0.0 };
		}
		((k - self.hidden_k) / (self.visible_k - self.hidden_k)).clamp(0.0, 1.0)
	}
}

#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node radius in world units.
	pub node_radius: f64,
	pub node_behavior: ScaleBehavior,
	/// Extra pick tolerance around a node, in pixels.
	pub hit_slop: f64,
	/// Node label font size in pixels.
	pub label_size: f64,
	/// Labels stop shrinking below this zoom factor.
	pub label_min_k: f64,
	/// Edge stroke in pixels.
	pub edge_width: f64,
	/// Arrow head length in world units.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Relationship label font size in pixels.
	pub edge_label_size: f64,
	pub edge_label_fade: ZoomFade,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 10.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 4.0,
				max_screen: f64::INFINITY,
			},
			hit_slop: 4.0,
			label_size: 12.0,
			label_min_k: 0.5,
			edge_width: 2.0,
			arrow_size: 8.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: 16.0,
			},
			edge_label_size: 10.0,
			edge_label_fade: ZoomFade {
				hidden_k: 0.8,
				visible_k: 1.2,
			},
		}
	}
}

/// Values resolved for one frame at zoom factor `k`, in world units.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	pub label_font: String,
	pub label_offset: f64,
	pub edge_width: f64,
	pub arrow_size: f64,
	pub edge_label_font: String,
	pub edge_label_alpha: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.node_behavior.apply(config.node_radius, k);
		let label_px = config.label_size / k.max(config.label_min_k);
		Self {
			k,
			node_radius,
			hit_radius: node_radius + config.hit_slop / k,
			label_font: format!("{}px Arial, sans-serif", label_px),
			label_offset: node_radius + 5.0 / k,
			edge_width: config.edge_width / k,
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			edge_label_font: format!("{}px Arial, sans-serif", config.edge_label_size / k),
			edge_label_alpha: config.edge_label_fade.alpha(k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_behavior_keeps_pixel_size() {
		let b = ScaleBehavior::Screen;
		assert_eq!(b.apply(2.0, 1.0), 2.0);
		assert_eq!(b.apply(2.0, 4.0) * 4.0, 2.0);
	}

	#[test]
	fn clamped_node_never_shrinks_below_min_pixels() {
		let b = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: f64::INFINITY,
		};
		// At k = 0.1 a 10-unit node would be 1px on screen.
		let world = b.apply(10.0, 0.1);
		assert!((world * 0.1 - 4.0).abs() < 1e-9);
		assert_eq!(b.apply(10.0, 2.0), 10.0);
	}

	#[test]
	fn edge_labels_fade_in_with_zoom() {
		let fade = ScaleConfig::default().edge_label_fade;
		assert_eq!(fade.alpha(0.5), 0.0);
		assert_eq!(fade.alpha(2.0), 1.0);
		let mid = fade.alpha(1.0);
		assert!(mid > 0.0 && mid < 1.0);
	}

	#[test]
	fn degenerate_fade_is_a_step() {
		let fade = ZoomFade {
			hidden_k: 1.0,
			visible_k: 1.0,
		};
		assert_eq!(fade.alpha(0.99), 0.0);
		assert_eq!(fade.alpha(1.0), 1.0);
	}

	#[test]
	fn hit_radius_exceeds_node_radius() {
		let scaled = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(scaled.node_radius, 10.0);
		assert!(scaled.hit_radius > scaled.node_radius);
		assert_eq!(scaled.label_font, "12px Arial, sans-serif");
	}
}
