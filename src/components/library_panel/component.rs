use leptos::prelude::*;

use super::tree::{Expanded, TreeAction, TreeId, is_open, reduce};
use crate::components::neural_graph::{Category, assign_ids};

/// Collapsible category -> sub -> item list that drives graph focus.
#[component]
pub fn LibraryPanel(
	#[prop(into)] data: Signal<Vec<Category>>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] on_focus: Callback<String>,
) -> impl IntoView {
	let expanded = RwSignal::new(Expanded::new());
	let toggle = move |id: TreeId| expanded.update(|set| *set = reduce(set, TreeAction::Toggle(id)));
	let is_selected = move |id: &str| selected.with(|s| s.as_deref() == Some(id));

	let rows = move || {
		let categories = data.get();
		let ids = assign_ids(&categories);
		categories
			.into_iter()
			.zip(ids)
			.enumerate()
			.map(|(ci, (category, ids))| {
				let cat_node = ids.id;
				let cat_open = is_open(&expanded.get(), TreeId::Category(ci));
				let cat_active = is_selected(&cat_node);
				let subs = category
					.subs
					.into_iter()
					.zip(ids.subs)
					.enumerate()
					.map(|(si, (sub, sub_ids))| {
						let items = sub
							.items
							.into_iter()
							.zip(sub_ids.items)
							.map(|(item, node)| {
								let active = is_selected(&node);
								view! {
									<li
										class="library-item"
										class:active=active
										on:click=move |_| on_focus.run(node.clone())
									>
										{item.title}
									</li>
								}
							})
							.collect_view();

						let Some(sub_node) = sub_ids.id else {
							return view! { <ul class="library-items">{items}</ul> }.into_any();
						};
						let sub_open = is_open(&expanded.get(), TreeId::Sub(ci, si));
						let sub_active = is_selected(&sub_node);
						view! {
							<li class="library-sub">
								<button
									class="library-toggle"
									class:open=sub_open
									class:active=sub_active
									on:click=move |_| {
										toggle(TreeId::Sub(ci, si));
										on_focus.run(sub_node.clone());
									}
								>
									{sub.name}
								</button>
								{sub_open.then(|| view! { <ul class="library-items">{items}</ul> })}
							</li>
						}
						.into_any()
					})
					.collect_view();

				view! {
					<li class="library-category">
						<button
							class="library-toggle"
							class:open=cat_open
							class:active=cat_active
							on:click=move |_| {
								toggle(TreeId::Category(ci));
								on_focus.run(cat_node.clone());
							}
						>
							{category.name}
						</button>
						{cat_open.then(|| view! { <ul class="library-subs">{subs}</ul> })}
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<nav class="library-panel">
			<header>
				<h2>"Library"</h2>
				<button
					class="library-collapse"
					on:click=move |_| expanded.update(|set| *set = reduce(set, TreeAction::CollapseAll))
				>
					"Collapse"
				</button>
			</header>
			<ul class="library-categories">{rows}</ul>
		</nav>
	}
}
