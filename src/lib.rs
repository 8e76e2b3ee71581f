//! impact-graph: browser client for an environmental impact knowledge graph.
//!
//! The server owns the graph; this crate fetches snapshots, renders them as
//! an interactive force-directed canvas and forwards edits, uploads and
//! impact queries over HTTP.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod controller;
mod pages;

pub use components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};
pub use config::{ClientConfig, load_config};
pub use controller::ViewController;

use crate::pages::home::Home;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("impact-graph: logging initialized");
}

/// Main application component.
/// Reads the page configuration and provides the view controller to the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	provide_context(ViewController::new(&config));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Environmental Impact Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Home />
	}
}
