use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::detail_panel::{DetailOverlay, SidePanel, describe};
use crate::components::library_panel::LibraryPanel;
use crate::components::neural_graph::{
	Category, ContentItem, GraphCommand, GraphEvent, NeuralGraphCanvas, SubCategory,
};

const TOPICS: &[(&str, &[&str])] = &[
	("Engineering", &["Rust", "Databases", "Distributed systems"]),
	("Design", &["Typography", "Color"]),
	("Research", &["Papers", "", "Talks"]),
	("Cooking", &["Baking", "Weeknight"]),
	("Music", &["Theory", "Production", "Gear"]),
];

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Generate a sample bookmark library. An empty sub name stands for items
/// filed directly under the category.
fn generate_sample_data() -> Vec<Category> {
	let mut seed = 0;
	TOPICS
		.iter()
		.map(|(name, subs)| Category {
			name: name.to_string(),
			tag_id: Some(name.to_lowercase()),
			tag_color: None,
			subs: subs
				.iter()
				.map(|sub| {
					seed += 1;
					let count = 2 + (rand_simple(seed) * 5.0) as usize;
					SubCategory {
						name: sub.to_string(),
						tag_id: None,
						tag_color: None,
						items: (0..count)
							.map(|i| {
								let label = if sub.is_empty() { *name } else { *sub };
								ContentItem {
									id: format!("bm-{seed}-{i}"),
									title: format!("{label} #{}", i + 1),
									description: Some(format!("Saved from the {name} reading list.")),
									thumbnail_url: None,
								}
							})
							.collect(),
					}
				})
				.collect(),
		})
		.collect()
}

/// Graph page. A `focus` query parameter pre-selects a node.
#[component]
pub fn Home() -> impl IntoView {
	let library = RwSignal::new(generate_sample_data());
	let selected = RwSignal::new(Option::<String>::None);
	let detail_open = RwSignal::new(false);
	let empty = RwSignal::new(false);
	let query = use_query_map();
	let command = RwSignal::new(
		query
			.with_untracked(|q| q.get("focus"))
			.map(GraphCommand::Focus),
	);

	let on_event = Callback::new(move |event: GraphEvent| match event {
		GraphEvent::NodeSelected { id, .. } => selected.set(Some(id)),
		GraphEvent::DetailOpened { .. } => detail_open.set(true),
		GraphEvent::DetailClosed { .. } => detail_open.set(false),
		GraphEvent::Reset => {
			selected.set(None);
			detail_open.set(false);
		}
		GraphEvent::EmptyChanged(is_empty) => empty.set(is_empty),
	});

	let focused = Signal::derive(move || {
		let id = selected.get()?;
		library.with(|lib| describe(lib, &id))
	});
	let detail = Signal::derive(move || if detail_open.get() { focused.get() } else { None });
	let send = move |cmd: GraphCommand| command.set(Some(cmd));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<NeuralGraphCanvas
					data=library
					fullscreen=true
					on_event=on_event
					command=command
				/>
				<div class="graph-overlay">
					<h1>"Library Graph"</h1>
					<p class="subtitle">"Drag to orbit. Scroll to zoom. Click a node to focus it."</p>
					<button on:click=move |_| {
						library.update(|lib| {
							*lib = if lib.is_empty() { generate_sample_data() } else { Vec::new() };
						})
					}>
						{move || if empty.get() { "Load sample library" } else { "Clear library" }}
					</button>
				</div>
				<Show when=move || empty.get()>
					<p class="graph-empty">"Nothing saved yet. Bookmarks you add will show up here."</p>
				</Show>
				<LibraryPanel
					data=library
					selected=selected
					on_focus=Callback::new(move |id| send(GraphCommand::Focus(id)))
				/>
				<SidePanel
					node=focused
					on_open=Callback::new(move |_| send(GraphCommand::OpenDetail))
					on_reset=Callback::new(move |_| send(GraphCommand::Reset))
				/>
				<DetailOverlay
					node=detail
					on_close=Callback::new(move |_| send(GraphCommand::CloseDetail))
				/>
			</div>
		</ErrorBoundary>
	}
}
