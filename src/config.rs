//! Client configuration embedded in the host page.
//!
//! The page may carry a `<script id="app-config" type="application/json">`
//! element; every field is optional and falls back to its default.

use std::collections::HashMap;

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::api::NodeType;

/// Fallback colour for nodes of an unrecognised type.
pub const UNKNOWN_COLOR: &str = "#999999";

/// Built-in node colour tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
	/// factor = blue, location = green
	#[default]
	Classic,
	/// factor = green, location = blue
	Alternate,
}

/// Node type to CSS colour mapping used by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeColors {
	pub activity: String,
	pub factor: String,
	pub location: String,
	pub consequence: String,
	pub unknown: String,
}

impl TypeColors {
	pub fn from_palette(palette: Palette) -> Self {
		let (factor, location) = match palette {
			Palette::Classic => ("#1f77b4", "#2ca02c"),
			Palette::Alternate => ("#2ca02c", "#1f77b4"),
		};
		Self {
			activity: "#ff7f0e".into(),
			factor: factor.into(),
			location: location.into(),
			consequence: "#d62728".into(),
			unknown: UNKNOWN_COLOR.into(),
		}
	}

	pub fn get(&self, kind: NodeType) -> &str {
		match kind {
			NodeType::Activity => &self.activity,
			NodeType::Factor => &self.factor,
			NodeType::Location => &self.location,
			NodeType::Consequence => &self.consequence,
			NodeType::Unknown => &self.unknown,
		}
	}

	pub fn set(&mut self, kind: NodeType, color: String) {
		let slot = match kind {
			NodeType::Activity => &mut self.activity,
			NodeType::Factor => &mut self.factor,
			NodeType::Location => &mut self.location,
			NodeType::Consequence => &mut self.consequence,
			NodeType::Unknown => &mut self.unknown,
		};
		*slot = color;
	}
}

impl Default for TypeColors {
	fn default() -> Self {
		Self::from_palette(Palette::Classic)
	}
}

fn default_relationships() -> Vec<String> {
	["causes", "affects", "occurs_in", "contributes_to", "impacts"]
		.into_iter()
		.map(String::from)
		.collect()
}

/// Runtime configuration for the client.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Prefix prepended to every API route. Empty means same origin.
	pub api_base: String,
	pub palette: Palette,
	/// Per-type colour overrides applied on top of `palette`.
	pub colors: HashMap<NodeType, String>,
	/// Suggested values for the relationship input.
	pub relationships: Vec<String>,
	/// Lower bound for the canvas height in pixels.
	pub min_canvas_height: f64,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base: String::new(),
			palette: Palette::default(),
			colors: HashMap::new(),
			relationships: default_relationships(),
			min_canvas_height: 400.0,
		}
	}
}

impl ClientConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Resolves the palette and overrides into a single colour table.
	pub fn type_colors(&self) -> TypeColors {
		let mut colors = TypeColors::from_palette(self.palette);
		for (&kind, color) in &self.colors {
			colors.set(kind, color.clone());
		}
		colors
	}
}

/// Reads the configuration from the `app-config` script element.
pub fn load_config() -> ClientConfig {
	let Some(json) = read_config_element() else {
		info!("impact-graph: no app-config element, using defaults");
		return ClientConfig::default();
	};
	match ClientConfig::from_json(&json) {
		Ok(config) => config,
		Err(e) => {
			warn!("impact-graph: failed to parse app-config: {}", e);
			ClientConfig::default()
		}
	}
}

fn read_config_element() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("app-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
