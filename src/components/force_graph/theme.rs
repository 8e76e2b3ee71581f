//! Visual theme for the graph canvas.
//!
//! Node fill colours come from the configured type table, not from here.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Multiplies the existing alpha.
	pub fn fade(self, factor: f64) -> Self {
		Self {
			a: self.a * factor.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Relationship label text.
	pub label_color: Color,
}

#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Outline drawn around every node.
	pub border_color: Color,
	/// Border width in pixels.
	pub border_width: f64,
	/// Ring drawn around the hovered node.
	pub hover_ring: Color,
	pub label_color: Color,
}

#[derive(Clone, Debug)]
pub struct TooltipStyle {
	pub background: Color,
	pub border: Color,
	pub text: Color,
	pub font: &'static str,
	pub padding: f64,
	pub line_height: f64,
}

#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub tooltip: TooltipStyle,
}

impl Theme {
	/// Light page theme: white canvas, grey links.
	pub fn light() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			edge: EdgeStyle {
				color: Color::rgba(153, 153, 153, 0.6),
				label_color: Color::rgb(102, 102, 102),
			},
			node: NodeStyle {
				border_color: Color::rgb(255, 255, 255),
				border_width: 1.5,
				hover_ring: Color::rgba(33, 37, 41, 0.7),
				label_color: Color::rgb(33, 37, 41),
			},
			tooltip: TooltipStyle {
				background: Color::rgb(255, 255, 255),
				border: Color::rgb(221, 221, 221),
				text: Color::rgb(33, 37, 41),
				font: "12px Arial, sans-serif",
				padding: 5.0,
				line_height: 15.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(255, 127, 14).to_css(), "#ff7f0e");
	}

	#[test]
	fn fade_multiplies_alpha() {
		let c = Color::rgba(10, 20, 30, 0.6).fade(0.5);
		assert_eq!(c.to_css(), "rgba(10, 20, 30, 0.3)");
		assert_eq!(c.with_alpha(1.0).to_css(), "#0a141e");
	}
}
