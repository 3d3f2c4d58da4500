//! Host-side panels that follow the graph's focus state.

use leptos::prelude::*;

use crate::components::neural_graph::{Category, NodeKind, ROOT_ID, assign_ids};

/// What the panels show about one graph node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSummary {
	pub id: String,
	pub kind: NodeKind,
	pub title: String,
	pub description: Option<String>,
	pub thumbnail_url: Option<String>,
	pub children: usize,
}

impl NodeSummary {
	fn group(id: &str, kind: NodeKind, title: &str, children: usize) -> Self {
		Self {
			id: id.to_string(),
			kind,
			title: title.to_string(),
			description: None,
			thumbnail_url: None,
			children,
		}
	}
}

/// Looks a graph node id back up in the host dataset.
pub fn describe(categories: &[Category], id: &str) -> Option<NodeSummary> {
	if id == ROOT_ID {
		return Some(NodeSummary::group(id, NodeKind::Root, "Library", categories.len()));
	}
	for (category, ids) in categories.iter().zip(assign_ids(categories)) {
		if id == ids.id {
			let children = category
				.subs
				.iter()
				.map(|s| if s.name.is_empty() { s.items.len() } else { 1 })
				.sum();
			return Some(NodeSummary::group(id, NodeKind::Category, &category.name, children));
		}
		for (sub, sub_ids) in category.subs.iter().zip(&ids.subs) {
			if sub_ids.id.as_deref() == Some(id) {
				return Some(NodeSummary::group(id, NodeKind::Sub, &sub.name, sub.items.len()));
			}
			let found = sub.items.iter().zip(&sub_ids.items).find(|(_, item_id)| *item_id == id);
			if let Some((item, _)) = found {
				return Some(NodeSummary {
					id: id.to_string(),
					kind: NodeKind::Content,
					title: item.title.clone(),
					description: item.description.clone(),
					thumbnail_url: item.thumbnail_url.clone(),
					children: 0,
				});
			}
		}
	}
	None
}

#[component]
pub fn SidePanel(
	#[prop(into)] node: Signal<Option<NodeSummary>>,
	#[prop(into)] on_open: Callback<()>,
	#[prop(into)] on_reset: Callback<()>,
) -> impl IntoView {
	move || {
		node.get().map(|n| {
			let can_open = matches!(n.kind, NodeKind::Category | NodeKind::Sub);
			view! {
				<aside class="side-panel">
					<span class="side-panel-kind">{n.kind.as_str()}</span>
					<h2>{n.title}</h2>
					<p>{format!("{} linked", n.children)}</p>
					{can_open
						.then(|| {
							view! {
								<button on:click=move |_| on_open.run(())>"Open details"</button>
							}
						})}
					<button on:click=move |_| on_reset.run(())>"Reset camera"</button>
				</aside>
			}
		})
	}
}

#[component]
pub fn DetailOverlay(
	#[prop(into)] node: Signal<Option<NodeSummary>>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	move || {
		node.get().map(|n| {
			view! {
				<div class="detail-overlay">
					<article>
						<button class="detail-close" on:click=move |_| on_close.run(())>
							"Close"
						</button>
						{n.thumbnail_url.map(|src| view! { <img src=src alt="" /> })}
						<h1>{n.title}</h1>
						{n.description.map(|d| view! { <p>{d}</p> })}
					</article>
				</div>
			}
		})
	}
}
