use super::projection::{Projection, ProjectedNode, sort_far_to_near};
use super::state::NeuralGraphState;
use super::surface::Surface;
use super::types::{GraphNode, NodeKind, Rgba};

const HALO: Rgba = Rgba::rgb(255, 255, 255);
const LABEL: Rgba = Rgba::rgb(235, 240, 255);

/// Projected nodes in the order they are painted, farthest first.
pub fn draw_list(state: &NeuralGraphState) -> Vec<ProjectedNode> {
	let mut projected = state.project();
	sort_far_to_near(&mut projected);
	projected
}

pub fn link_alpha(source_scale: f64, touches_content: bool) -> f64 {
	let alpha = (0.35 * source_scale).clamp(0.04, 0.6);
	if touches_content { alpha * 0.35 } else { alpha }
}

fn node_alpha(node: &GraphNode, scale: f64) -> f64 {
	match node.kind {
		NodeKind::Dust => (0.1 + 0.25 * (scale - 0.6)).clamp(0.04, 0.35),
		_ => (0.45 + 0.55 * scale).clamp(0.2, 1.0),
	}
}

/// Which nodes get a text label this frame.
pub fn label_visible(
	node: &GraphNode,
	selected: Option<&GraphNode>,
	scale: f64,
	legible_scale: f64,
) -> bool {
	let is_selected = selected.is_some_and(|s| s.id == node.id);
	let parent_selected = selected.is_some_and(|s| node.parent_id.as_deref() == Some(s.id.as_str()));
	match node.kind {
		NodeKind::Root | NodeKind::Category => true,
		NodeKind::Sub => is_selected || parent_selected || scale > legible_scale,
		NodeKind::Content => is_selected || parent_selected,
		NodeKind::Dust => false,
	}
}

fn font_size(kind: NodeKind) -> f64 {
	match kind {
		NodeKind::Root => 14.0,
		NodeKind::Category => 12.0,
		NodeKind::Sub => 11.0,
		_ => 10.0,
	}
}

/// Draws one frame. A zero-size viewport draws nothing.
pub fn render(state: &NeuralGraphState, surface: &impl Surface) {
	if !state.has_area() {
		return;
	}
	surface.clear(state.width, state.height, &state.config.background.css(1.0));

	let list = draw_list(state);
	let mut at: Vec<Option<Projection>> = vec![None; state.graph.nodes.len()];
	for p in &list {
		at[p.index] = Some(p.at);
	}

	draw_links(state, surface, &at);
	draw_nodes(state, surface, &list);
	draw_labels(state, surface, &list);
}

fn draw_links(state: &NeuralGraphState, surface: &impl Surface, at: &[Option<Projection>]) {
	let zoom = state.camera.zoom();
	for link in &state.graph.links {
		let (Some(si), Some(ti)) = (state.index_of(&link.source), state.index_of(&link.target)) else {
			continue;
		};
		let (Some(a), Some(b)) = (at[si], at[ti]) else {
			continue;
		};
		let (source, target) = (&state.graph.nodes[si], &state.graph.nodes[ti]);
		let touches_content = source.kind == NodeKind::Content || target.kind == NodeKind::Content;
		let alpha = link_alpha(a.scale, touches_content);
		surface.line(
			(a.x, a.y),
			(b.x, b.y),
			(a.scale * zoom).clamp(0.5, 2.5),
			&source.color.css(alpha),
		);
	}
}

fn draw_nodes(state: &NeuralGraphState, surface: &impl Surface, list: &[ProjectedNode]) {
	let zoom = state.camera.zoom();
	let selected = state.selected_index();
	for p in list {
		let node = &state.graph.nodes[p.index];
		let radius = node.radius * p.at.scale * zoom;
		let alpha = node_alpha(node, p.at.scale);

		if Some(p.index) == selected {
			surface.fill_circle(p.at.x, p.at.y, radius * 2.4, &node.color.css(0.18));
			surface.stroke_circle(p.at.x, p.at.y, radius + 4.0, 1.5, &HALO.css(0.9), false);
		} else if Some(p.index) == state.hovered {
			surface.stroke_circle(p.at.x, p.at.y, radius + 3.0, 1.0, &HALO.css(0.5), true);
		}
		surface.fill_circle(p.at.x, p.at.y, radius, &node.color.css(alpha));
	}
}

fn draw_labels(state: &NeuralGraphState, surface: &impl Surface, list: &[ProjectedNode]) {
	let zoom = state.camera.zoom();
	let selected = state.selected_node();
	for p in list {
		let node = &state.graph.nodes[p.index];
		let Some(label) = node.label.as_deref() else {
			continue;
		};
		if !label_visible(node, selected, p.at.scale, state.config.sub_label_scale) {
			continue;
		}
		let radius = node.radius * p.at.scale * zoom;
		let size = (font_size(node.kind) * p.at.scale.sqrt()).clamp(8.0, 20.0);
		surface.text(
			p.at.x + radius + 4.0,
			p.at.y + size * 0.35,
			label,
			&format!("{size:.0}px sans-serif"),
			&LABEL.css(node_alpha(node, p.at.scale)),
		);
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::neural_graph::config::GraphConfig;
	use crate::components::neural_graph::types::{Category, ContentItem, SubCategory, Vec3};

	#[derive(Debug, Clone, PartialEq)]
	enum Op {
		Clear,
		Fill,
		Stroke { dashed: bool },
		Line,
		Text(String),
	}

	#[derive(Default)]
	struct Recorder(RefCell<Vec<Op>>);

	impl Surface for Recorder {
		fn clear(&self, _: f64, _: f64, _: &str) {
			self.0.borrow_mut().push(Op::Clear);
		}
		fn fill_circle(&self, _: f64, _: f64, _: f64, _: &str) {
			self.0.borrow_mut().push(Op::Fill);
		}
		fn stroke_circle(&self, _: f64, _: f64, _: f64, _: f64, _: &str, dashed: bool) {
			self.0.borrow_mut().push(Op::Stroke { dashed });
		}
		fn line(&self, _: (f64, f64), _: (f64, f64), _: f64, _: &str) {
			self.0.borrow_mut().push(Op::Line);
		}
		fn text(&self, _: f64, _: f64, text: &str, _: &str, _: &str) {
			self.0.borrow_mut().push(Op::Text(text.to_string()));
		}
	}

	fn dataset() -> Vec<Category> {
		vec![Category {
			name: "Reading".into(),
			subs: vec![SubCategory {
				name: "Papers".into(),
				items: vec![ContentItem {
					id: "p1".into(),
					title: "Attention".into(),
					..Default::default()
				}],
				..Default::default()
			}],
			..Default::default()
		}]
	}

	fn config() -> GraphConfig {
		GraphConfig {
			dust_count: 40,
			..GraphConfig::default()
		}
	}

	fn texts(ops: &[Op]) -> Vec<String> {
		ops.iter()
			.filter_map(|op| match op {
				Op::Text(t) => Some(t.clone()),
				_ => None,
			})
			.collect()
	}

	fn node(id: &str, kind: NodeKind, parent: Option<&str>) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: Some(id.into()),
			kind,
			position: Vec3::ZERO,
			radius: 4.0,
			color: Rgba::rgb(0, 0, 0),
			parent_id: parent.map(Into::into),
			payload: None,
		}
	}

	#[test]
	fn zero_size_draws_nothing() {
		let state = NeuralGraphState::new(&dataset(), config(), 0.0, 600.0);
		let surface = Recorder::default();
		render(&state, &surface);
		assert!(surface.0.borrow().is_empty());
	}

	#[test]
	fn paints_links_then_nodes_then_labels() {
		let state = NeuralGraphState::new(&dataset(), config(), 800.0, 600.0);
		let surface = Recorder::default();
		render(&state, &surface);
		let ops = surface.0.into_inner();

		assert_eq!(ops[0], Op::Clear);
		let last_line = ops.iter().rposition(|o| *o == Op::Line).unwrap();
		let first_fill = ops.iter().position(|o| *o == Op::Fill).unwrap();
		let last_fill = ops.iter().rposition(|o| *o == Op::Fill).unwrap();
		let first_text = ops.iter().position(|o| matches!(o, Op::Text(_))).unwrap();
		assert!(last_line < first_fill);
		assert!(last_fill < first_text);
		assert_eq!(ops.iter().filter(|o| **o == Op::Line).count(), 3);
	}

	#[test]
	fn draw_list_is_far_to_near() {
		let state = NeuralGraphState::new(&dataset(), config(), 800.0, 600.0);
		let list = draw_list(&state);
		assert!(!list.is_empty());
		for pair in list.windows(2) {
			assert!(pair[0].at.depth >= pair[1].at.depth);
		}
		assert!(list.iter().all(|p| p.at.depth > 0.0));
	}

	#[test]
	fn labels_follow_selection() {
		let mut state = NeuralGraphState::new(&dataset(), config(), 800.0, 600.0);
		let surface = Recorder::default();
		render(&state, &surface);
		let orbit = texts(&surface.0.borrow());
		assert!(orbit.contains(&"You".to_string()));
		assert!(orbit.contains(&"Reading".to_string()));
		assert!(!orbit.contains(&"Attention".to_string()));

		state.select("cat:Reading/sub:Papers");
		let surface = Recorder::default();
		render(&state, &surface);
		let focused = texts(&surface.0.borrow());
		assert!(focused.contains(&"Papers".to_string()));
		assert!(focused.contains(&"Attention".to_string()));
	}

	#[test]
	fn selected_node_gets_a_halo() {
		let mut state = NeuralGraphState::new(&dataset(), config(), 800.0, 600.0);
		let plain = Recorder::default();
		render(&state, &plain);
		let halos = |ops: &[Op]| ops.iter().filter(|o| **o == Op::Stroke { dashed: false }).count();
		assert_eq!(halos(plain.0.borrow().as_slice()), 0);

		state.select("cat:Reading");
		let focused = Recorder::default();
		render(&state, &focused);
		assert_eq!(halos(focused.0.borrow().as_slice()), 1);
	}

	#[test]
	fn label_policy() {
		let cat = node("cat", NodeKind::Category, Some("root"));
		let sub = node("sub", NodeKind::Sub, Some("cat"));
		let item = node("item", NodeKind::Content, Some("sub"));
		let other = node("other", NodeKind::Sub, Some("elsewhere"));
		let dust = node("dust", NodeKind::Dust, None);

		assert!(label_visible(&cat, None, 0.1, 1.1));
		assert!(!label_visible(&sub, None, 1.0, 1.1));
		assert!(label_visible(&sub, None, 1.2, 1.1));
		assert!(label_visible(&sub, Some(&cat), 0.5, 1.1));
		assert!(label_visible(&sub, Some(&sub), 0.5, 1.1));
		assert!(!label_visible(&sub, Some(&other), 0.5, 1.1));

		assert!(!label_visible(&item, None, 5.0, 1.1));
		assert!(!label_visible(&item, Some(&cat), 5.0, 1.1));
		assert!(label_visible(&item, Some(&sub), 0.5, 1.1));
		assert!(label_visible(&item, Some(&item), 0.5, 1.1));
		assert!(!label_visible(&dust, Some(&dust), 5.0, 1.1));
	}

	#[test]
	fn content_links_are_subdued() {
		assert!(link_alpha(1.0, true) < link_alpha(1.0, false));
		assert!(link_alpha(0.5, false) < link_alpha(1.5, false));
	}
}
