//! Input forms. Each form only collects values and hands them to the
//! [`ViewController`]; validation and requests live there.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::api::{GraphSnapshot, NodeType};
use crate::controller::ViewController;

/// Entry of a node dropdown.
#[derive(Clone, Debug, PartialEq)]
struct NodeOption {
	value: String,
	label: String,
	selected: bool,
}

/// Options for every node of `snapshot`, with `current` marked selected so a
/// reordered snapshot keeps showing the submitted node.
fn node_options(snapshot: &GraphSnapshot, current: &str) -> Vec<NodeOption> {
	snapshot
		.nodes
		.iter()
		.map(|node| NodeOption {
			value: node.id.clone(),
			label: node.option_label(),
			selected: node.id == current,
		})
		.collect()
}

/// Dropdown listing every node of the current snapshot by id.
#[component]
fn NodeSelect(
	#[prop(into)] id: String,
	#[prop(into)] label: String,
	value: RwSignal<String>,
) -> impl IntoView {
	let controller = expect_context::<ViewController>();
	let snapshot = controller.snapshot();

	view! {
		<label for=id.clone()>{label}</label>
		<select
			id=id
			class="form-select"
			prop:value=move || value.get()
			on:change=move |ev| value.set(event_target_value(&ev))
		>
			<option value="">"Select a node"</option>
			{move || {
				let current = value.get();
				snapshot
					.with(|s| node_options(s, &current))
					.into_iter()
					.map(|option| {
						view! {
							<option value=option.value prop:selected=option.selected>
								{option.label}
							</option>
						}
					})
					.collect_view()
			}}
		</select>
	}
}

#[component]
pub fn NodeForm() -> impl IntoView {
	let controller = expect_context::<ViewController>();
	let (kind, name) = (RwSignal::new(String::new()), RwSignal::new(String::new()));

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		controller.add_node(&kind.get_untracked(), &name.get_untracked(), move || {
			kind.set(String::new());
			name.set(String::new());
		});
	};

	view! {
		<form class="panel" on:submit=on_submit>
			<h3>"Add Node"</h3>
			<label for="nodeType">"Type"</label>
			<select
				id="nodeType"
				class="form-select"
				prop:value=move || kind.get()
				on:change=move |ev| kind.set(event_target_value(&ev))
			>
				<option value="">"Select a type"</option>
				{NodeType::SELECTABLE
					.into_iter()
					.map(|t| view! { <option value=t.as_str()>{t.title()}</option> })
					.collect_view()}
			</select>
			<label for="nodeName">"Name"</label>
			<input
				id="nodeName"
				class="form-control"
				type="text"
				prop:value=move || name.get()
				on:input=move |ev| name.set(event_target_value(&ev))
			/>
			<button type="submit" class="btn btn-primary">"Add Node"</button>
		</form>
	}
}

#[component]
pub fn EdgeForm() -> impl IntoView {
	let controller = expect_context::<ViewController>();
	let (source, target, relationship) = (
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
	);
	let suggestions = controller.relationships();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		controller.add_edge(
			&source.get_untracked(),
			&target.get_untracked(),
			&relationship.get_untracked(),
			move || {
				source.set(String::new());
				target.set(String::new());
				relationship.set(String::new());
			},
		);
	};

	view! {
		<form class="panel" on:submit=on_submit>
			<h3>"Add Relationship"</h3>
			<NodeSelect id="sourceNode" label="Source" value=source />
			<NodeSelect id="targetNode" label="Target" value=target />
			<label for="relationship">"Relationship"</label>
			<input
				id="relationship"
				class="form-control"
				type="text"
				list="relationship-options"
				prop:value=move || relationship.get()
				on:input=move |ev| relationship.set(event_target_value(&ev))
			/>
			<datalist id="relationship-options">
				{suggestions
					.into_iter()
					.map(|r| view! { <option value=r></option> })
					.collect_view()}
			</datalist>
			<button type="submit" class="btn btn-primary">"Add Relationship"</button>
		</form>
	}
}

#[component]
pub fn UploadForm() -> impl IntoView {
	let controller = expect_context::<ViewController>();
	let file_ref = NodeRef::<leptos::html::Input>::new();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let file = file_ref
			.get()
			.and_then(|input| input.files())
			.and_then(|files| files.get(0));
		controller.upload_data(file, move || {
			if let Some(input) = file_ref.get_untracked() {
				input.set_value("");
			}
		});
	};

	view! {
		<form class="panel" on:submit=on_submit>
			<h3>"Upload Data"</h3>
			<input
				node_ref=file_ref
				id="dataFile"
				class="form-control"
				type="file"
				accept=".csv,.json"
			/>
			<button type="submit" class="btn btn-primary">"Upload"</button>
		</form>
	}
}

#[component]
pub fn QueryForm() -> impl IntoView {
	let controller = expect_context::<ViewController>();
	let source = RwSignal::new(String::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		controller.query_impacts(&source.get_untracked());
	};

	view! {
		<form class="panel" on:submit=on_submit>
			<h3>"Query Impacts"</h3>
			<NodeSelect id="queryNode" label="Source node" value=source />
			<button type="submit" class="btn btn-primary">"Find Impacts"</button>
		</form>
	}
}

#[component]
pub fn SampleDataButton() -> impl IntoView {
	let controller = expect_context::<ViewController>();

	view! {
		<button type="button" class="btn btn-secondary" on:click=move |_| controller.load_sample_data()>
			"Load Sample Data"
		</button>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::Node;

	fn node(id: &str, name: &str) -> Node {
		Node {
			id: id.into(),
			name: name.into(),
			kind: NodeType::Location,
		}
	}

	#[test]
	fn options_label_by_name_and_carry_ids() {
		let snapshot = GraphSnapshot {
			nodes: vec![node("location_1", "River")],
			edges: Vec::new(),
		};
		assert_eq!(
			node_options(&snapshot, ""),
			vec![NodeOption {
				value: "location_1".into(),
				label: "River (location)".into(),
				selected: false,
			}]
		);
	}

	#[test]
	fn selection_follows_id_across_reordered_snapshots() {
		let first = GraphSnapshot {
			nodes: vec![node("a", "Forest"), node("b", "River")],
			edges: Vec::new(),
		};
		let reordered = GraphSnapshot {
			nodes: vec![node("c", "Coast"), node("b", "River"), node("a", "Forest")],
			edges: Vec::new(),
		};
		for snapshot in [first, reordered] {
			let selected: Vec<_> = node_options(&snapshot, "b")
				.into_iter()
				.filter(|o| o.selected)
				.map(|o| o.value)
				.collect();
			assert_eq!(selected, vec!["b".to_string()]);
		}
	}
}
