use leptos::prelude::*;

use crate::controller::{ImpactView, ViewController};

pub const NO_IMPACTS: &str = "No impact paths found from this node.";

/// Result panel of the impact query.
#[component]
pub fn ImpactResults() -> impl IntoView {
	let controller = expect_context::<ViewController>();
	let impacts = controller.impacts();

	view! {
		<div id="queryResults" class="query-results">
			{move || match impacts.get() {
				ImpactView::Idle => ().into_any(),
				ImpactView::Paths(paths) if paths.is_empty() => {
					view! { <div class="empty-state">{NO_IMPACTS}</div> }.into_any()
				}
				ImpactView::Paths(paths) => {
					paths
						.into_iter()
						.map(|impact| {
							let path = impact.joined_path();
							view! {
								<div class="impact-path">
									{impact
										.consequence
										.map(|c| {
											view! {
												<strong>"Consequence: "</strong>
												{c}
												<br />
											}
										})}
									<strong>"Path: "</strong>
									{path}
								</div>
							}
						})
						.collect_view()
						.into_any()
				}
				ImpactView::Failed(error) => {
					view! { <div class="alert alert-danger">{error}</div> }.into_any()
				}
			}}
		</div>
	}
}
