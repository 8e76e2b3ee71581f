use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::components::forms::{EdgeForm, NodeForm, QueryForm, SampleDataButton, UploadForm};
use crate::components::impacts::ImpactResults;
use crate::controller::ViewController;

/// Graph canvas with the editing and query panels beside it.
#[component]
pub fn Home() -> impl IntoView {
	let controller = expect_context::<ViewController>();
	let (snapshot, loaded, colors) = (controller.snapshot(), controller.loaded(), controller.colors());
	let scene = Signal::derive(move || snapshot.with(|s| GraphData::from_snapshot(s, &colors)));

	Effect::new(move |_| controller.load_graph_data());

	view! {
		<main class="layout">
			<section class="graph-pane">
				<header class="graph-header">
					<h1>"Environmental Impact Network"</h1>
					<p class="subtitle">
						{move || {
							if loaded.get() {
								"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
							} else {
								"Loading graph..."
							}
						}}
					</p>
				</header>
				<div id="graph" class="graph-container">
					<ForceGraphCanvas data=scene min_height=controller.min_canvas_height() />
				</div>
			</section>
			<aside class="controls">
				<SampleDataButton />
				<NodeForm />
				<EdgeForm />
				<UploadForm />
				<QueryForm />
				<ImpactResults />
			</aside>
		</main>
	}
}
