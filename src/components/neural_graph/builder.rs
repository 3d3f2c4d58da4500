//! Turns the host's category tree into positioned nodes and parent links.
//!
//! Layout is fully deterministic for a given input and config: categories sit on
//! a sphere around the root, subs orbit their category, items orbit their sub.
//! Only the decorative dust shell uses an RNG, and that RNG is seeded from the
//! config.

use std::collections::HashSet;
use std::f64::consts::{PI, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::GraphConfig;
use super::types::{
	Category, ContentItem, ContentPayload, GraphData, GraphLink, GraphNode, NodeKind, Rgba, Vec3,
};

pub const ROOT_ID: &str = "root";

/// Graph ids for one category and everything under it.
///
/// Ids come from host identity (tag id, else name; the item id for content),
/// scoped by the parent id, so reordering or removing siblings never moves an
/// id onto a different entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryIds {
	pub id: String,
	pub subs: Vec<SubIds>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubIds {
	/// `None` for a nameless sub, whose items hang off the category.
	pub id: Option<String>,
	pub items: Vec<String>,
}

fn identity<'a>(tag_id: Option<&'a str>, name: &'a str) -> &'a str {
	tag_id.filter(|tag| !tag.is_empty()).unwrap_or(name)
}

/// Hands out ids, suffixing `#2`, `#3`... when a host key repeats.
struct IdClaims(HashSet<String>);

impl IdClaims {
	fn claim(&mut self, base: String) -> String {
		if self.0.insert(base.clone()) {
			return base;
		}
		let mut n = 2;
		loop {
			let candidate = format!("{base}#{n}");
			if self.0.insert(candidate.clone()) {
				return candidate;
			}
			n += 1;
		}
	}
}

/// Assigns node ids to every category, sub and item in dataset order.
pub fn assign_ids(categories: &[Category]) -> Vec<CategoryIds> {
	let mut claims = IdClaims(HashSet::from([ROOT_ID.to_string()]));
	let mut out = Vec::with_capacity(categories.len());
	for category in categories {
		let cat_id = claims.claim(format!(
			"cat:{}",
			identity(category.tag_id.as_deref(), &category.name)
		));
		let mut subs = Vec::with_capacity(category.subs.len());
		for sub in &category.subs {
			let sub_id = if sub.name.is_empty() {
				None
			} else {
				Some(claims.claim(format!(
					"{cat_id}/sub:{}",
					identity(sub.tag_id.as_deref(), &sub.name)
				)))
			};
			let parent = sub_id.as_deref().unwrap_or(&cat_id);
			let items = sub
				.items
				.iter()
				.map(|item| claims.claim(format!("{parent}/item:{}", item.id)))
				.collect();
			subs.push(SubIds { id: sub_id, items });
		}
		out.push(CategoryIds { id: cat_id, subs });
	}
	out
}

/// Point `index` of `count` spread evenly over a sphere of `radius`.
pub fn sphere_point(index: usize, count: usize, radius: f64) -> Vec3 {
	let n = count.max(1) as f64;
	let phi = (-1.0 + 2.0 * index as f64 / n).clamp(-1.0, 1.0).acos();
	let theta = (n * PI).sqrt() * phi;
	Vec3::from_spherical(theta, phi) * radius
}

/// Direction for slot `slot` of `slots` around a category. Named subs and
/// loose items share the slots.
fn sub_direction(slot: usize, slots: usize, cat_index: usize, outward: Vec3) -> Vec3 {
	let theta = slot as f64 / slots.max(1) as f64 * TAU + cat_index as f64 * 0.7;
	let phi = 0.6 + ((slot + cat_index) % 5) as f64 * 0.45;
	(Vec3::from_spherical(theta, phi) + outward * 0.6).normalized()
}

fn content_direction(item_index: usize, item_count: usize, sub_index: usize, cat_index: usize) -> Vec3 {
	let theta = item_index as f64 / item_count.max(1) as f64 * TAU
		+ sub_index as f64 * 1.3
		+ cat_index as f64 * 0.5;
	// golden-angle walk down the polar axis keeps neighbours apart
	let phi = ((item_index as f64 * 2.399_963) % PI).max(0.25);
	Vec3::from_spherical(theta, phi)
}

struct Builder<'a> {
	config: &'a GraphConfig,
	data: GraphData,
}

impl Builder<'_> {
	fn push(&mut self, node: GraphNode) {
		if let Some(parent) = &node.parent_id {
			self.data.links.push(GraphLink {
				source: parent.clone(),
				target: node.id.clone(),
			});
		}
		self.data.nodes.push(node);
	}

	fn content_node(&self, id: String, item: &ContentItem, parent: &str, position: Vec3) -> GraphNode {
		let label = if item.title.is_empty() {
			None
		} else {
			Some(item.title.clone())
		};
		GraphNode {
			id,
			label,
			kind: NodeKind::Content,
			position,
			radius: self.config.content_size,
			color: self.config.content_color,
			parent_id: Some(parent.to_string()),
			payload: Some(ContentPayload {
				id: item.id.clone(),
				title: item.title.clone(),
				description: item.description.clone(),
				thumbnail_url: item.thumbnail_url.clone(),
			}),
		}
	}

	fn category(&mut self, ci: usize, count: usize, category: &Category, ids: &CategoryIds) {
		let cfg = self.config;
		let position = sphere_point(ci, count, cfg.category_radius);
		let outward = position.normalized();
		let color = category
			.tag_color
			.as_deref()
			.and_then(Rgba::from_hex)
			.unwrap_or_else(|| cfg.palette_color(ci));
		let cat_id = &ids.id;
		self.push(GraphNode {
			id: cat_id.clone(),
			label: Some(category.name.clone()),
			kind: NodeKind::Category,
			position,
			radius: cfg.category_size,
			color,
			parent_id: Some(ROOT_ID.to_string()),
			payload: None,
		});

		// named subs take the first slots, items of nameless subs the rest
		let named = category.subs.iter().filter(|s| !s.name.is_empty()).count();
		let loose: usize = category
			.subs
			.iter()
			.filter(|s| s.name.is_empty())
			.map(|s| s.items.len())
			.sum();
		let slots = named + loose;
		let mut next_named = 0;
		let mut next_loose = named;

		for (si, (sub, sub_ids)) in category.subs.iter().zip(&ids.subs).enumerate() {
			let Some(sub_node_id) = &sub_ids.id else {
				for (item, item_id) in sub.items.iter().zip(&sub_ids.items) {
					let dir = sub_direction(next_loose, slots, ci, outward);
					next_loose += 1;
					let node = self.content_node(
						item_id.clone(),
						item,
						cat_id,
						position + dir * cfg.sub_radius,
					);
					self.push(node);
				}
				continue;
			};

			let sub_position =
				position + sub_direction(next_named, slots, ci, outward) * cfg.sub_radius;
			next_named += 1;
			let sub_color = sub
				.tag_color
				.as_deref()
				.and_then(Rgba::from_hex)
				.unwrap_or_else(|| color.lighten(0.3));
			self.push(GraphNode {
				id: sub_node_id.clone(),
				label: Some(sub.name.clone()),
				kind: NodeKind::Sub,
				position: sub_position,
				radius: cfg.sub_size,
				color: sub_color,
				parent_id: Some(cat_id.clone()),
				payload: None,
			});

			let item_count = sub.items.len();
			for (ii, (item, item_id)) in sub.items.iter().zip(&sub_ids.items).enumerate() {
				let dir = content_direction(ii, item_count, si, ci);
				let node = self.content_node(
					item_id.clone(),
					item,
					sub_node_id,
					sub_position + dir * cfg.content_radius,
				);
				self.push(node);
			}
		}
	}

	fn dust(&mut self) {
		let cfg = self.config;
		let mut rng = StdRng::seed_from_u64(cfg.dust_seed);
		let (inner, outer) = cfg.dust_shell;
		let (inner, outer) = (inner.min(outer), inner.max(outer));
		for i in 0..cfg.dust_count {
			let theta = rng.gen_range(0.0..TAU);
			let phi = rng.gen_range(-1.0f64..=1.0).acos();
			let radius = if outer > inner {
				rng.gen_range(inner..outer)
			} else {
				inner
			};
			self.data.nodes.push(GraphNode {
				id: format!("dust-{i}"),
				label: None,
				kind: NodeKind::Dust,
				position: Vec3::from_spherical(theta, phi) * radius,
				radius: cfg.dust_size,
				color: cfg.dust_color,
				parent_id: None,
				payload: None,
			});
		}
	}
}

/// Builds the full node and link set. Never fails; an empty dataset yields the
/// root plus dust.
pub fn build_graph(categories: &[Category], config: &GraphConfig) -> GraphData {
	let mut builder = Builder {
		config,
		data: GraphData::default(),
	};
	builder.push(GraphNode {
		id: ROOT_ID.to_string(),
		label: Some("You".to_string()),
		kind: NodeKind::Root,
		position: Vec3::ZERO,
		radius: config.root_size,
		color: config.root_color,
		parent_id: None,
		payload: None,
	});
	let ids = assign_ids(categories);
	for (ci, (category, ids)) in categories.iter().zip(&ids).enumerate() {
		builder.category(ci, categories.len(), category, ids);
	}
	builder.dust();
	builder.data
}

/// True when the graph holds nothing beyond the root and dust.
pub fn is_empty_graph(data: &GraphData) -> bool {
	data.solid_nodes().all(|n| n.kind == NodeKind::Root)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::components::neural_graph::types::SubCategory;

	fn item(id: &str) -> ContentItem {
		ContentItem {
			id: id.into(),
			title: format!("Item {id}"),
			..Default::default()
		}
	}

	fn category(name: &str, subs: Vec<SubCategory>) -> Category {
		Category {
			name: name.into(),
			subs,
			..Default::default()
		}
	}

	fn sub(name: &str, items: Vec<ContentItem>) -> SubCategory {
		SubCategory {
			name: name.into(),
			items,
			..Default::default()
		}
	}

	#[test]
	fn empty_dataset_is_root_plus_dust() {
		let config = GraphConfig::default();
		let data = build_graph(&[], &config);
		let solid: Vec<_> = data.solid_nodes().collect();
		assert_eq!(solid.len(), 1);
		assert_eq!(solid[0].kind, NodeKind::Root);
		assert_eq!(solid[0].position, Vec3::ZERO);
		assert!(data.links.is_empty());
		assert_eq!(data.nodes.len(), 1 + config.dust_count);
		assert!(is_empty_graph(&data));
	}

	#[test]
	fn one_category_one_sub_three_items() {
		let input = vec![category(
			"Reading",
			vec![sub("Papers", vec![item("a"), item("b"), item("c")])],
		)];
		let data = build_graph(&input, &GraphConfig::default());

		let count = |kind| data.nodes.iter().filter(|n| n.kind == kind).count();
		assert_eq!(count(NodeKind::Root), 1);
		assert_eq!(count(NodeKind::Category), 1);
		assert_eq!(count(NodeKind::Sub), 1);
		assert_eq!(count(NodeKind::Content), 3);
		assert_eq!(data.solid_nodes().count(), 6);
		assert_eq!(data.links.len(), 5);
		assert!(!is_empty_graph(&data));

		let link = |s: &str, t: &str| {
			data.links
				.iter()
				.any(|l| l.source == s && l.target == t)
		};
		assert!(link("root", "cat:Reading"));
		assert!(link("cat:Reading", "cat:Reading/sub:Papers"));
		for id in ["a", "b", "c"] {
			assert!(link(
				"cat:Reading/sub:Papers",
				&format!("cat:Reading/sub:Papers/item:{id}")
			));
		}
	}

	#[test]
	fn categories_never_coincide() {
		for n in 1..=300 {
			let points: Vec<Vec3> = (0..n).map(|i| sphere_point(i, n, 220.0)).collect();
			for i in 0..n {
				for j in (i + 1)..n {
					assert_ne!(points[i], points[j], "n={n} i={i} j={j}");
				}
			}
		}
	}

	#[test]
	fn single_category_sits_on_a_pole() {
		let p = sphere_point(0, 1, 100.0);
		assert!(p.x.abs() < 1e-9 && p.z.abs() < 1e-9);
		assert!((p.y.abs() - 100.0).abs() < 1e-9);
	}

	#[test]
	fn nameless_sub_attaches_items_to_category() {
		let input = vec![category("Loose", vec![sub("", vec![item("x"), item("y")])])];
		let data = build_graph(&input, &GraphConfig::default());
		assert!(data.nodes.iter().all(|n| n.kind != NodeKind::Sub));
		let items: Vec<_> = data
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Content)
			.collect();
		assert_eq!(items.len(), 2);
		for n in items {
			assert_eq!(n.parent_id.as_deref(), Some("cat:Loose"));
		}
		assert_eq!(data.links.len(), 3);
	}

	#[test]
	fn every_solid_node_reaches_root() {
		let input = vec![
			category("A", vec![sub("a1", vec![item("1")]), sub("", vec![item("2")])]),
			category("B", vec![sub("b1", vec![item("3"), item("4")])]),
		];
		let data = build_graph(&input, &GraphConfig::default());
		let ids: HashSet<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids.len(), data.nodes.len());

		for node in data.solid_nodes() {
			let mut current = node;
			let mut steps = 0;
			while let Some(parent) = &current.parent_id {
				current = data.nodes.iter().find(|n| &n.id == parent).unwrap();
				steps += 1;
				assert!(steps < 8);
			}
			assert_eq!(current.kind, NodeKind::Root);
		}
		for dust in data.nodes.iter().filter(|n| n.is_dust()) {
			assert!(dust.parent_id.is_none());
			assert!(data.links.iter().all(|l| l.target != dust.id && l.source != dust.id));
		}
	}

	#[test]
	fn rebuilds_are_reproducible() {
		let input = vec![category("A", vec![sub("a1", vec![item("1"), item("2")])])];
		let config = GraphConfig::default();
		let first = build_graph(&input, &config);
		let second = build_graph(&input, &config);
		assert_eq!(first.nodes, second.nodes);
		assert_eq!(first.links, second.links);
	}

	#[test]
	fn tag_color_overrides_palette() {
		let mut cat = category("Tagged", vec![sub("s", vec![])]);
		cat.tag_color = Some("#102030".into());
		let data = build_graph(&[cat], &GraphConfig::default());
		let node = data.nodes.iter().find(|n| n.id == "cat:Tagged").unwrap();
		assert_eq!(node.color, Rgba::rgb(0x10, 0x20, 0x30));
		let sub = data.nodes.iter().find(|n| n.id == "cat:Tagged/sub:s").unwrap();
		assert_eq!(sub.color, node.color.lighten(0.3));
	}

	#[test]
	fn dust_stays_on_its_shell() {
		let config = GraphConfig::default();
		let data = build_graph(&[], &config);
		for dust in data.nodes.iter().filter(|n| n.is_dust()) {
			let r = dust.position.length();
			assert!(r >= config.dust_shell.0 - 1e-6 && r <= config.dust_shell.1 + 1e-6);
		}
	}

	#[test]
	fn ids_survive_removing_siblings() {
		let a = category("A", vec![sub("s", vec![item("x1"), item("x2")])]);
		let b = category("B", vec![sub("s", vec![item("y1")])]);
		let before = assign_ids(&[a, b.clone()]);
		let after = assign_ids(&[b]);
		assert_eq!(after[0], before[1]);
		assert_eq!(after[0].subs[0].items[0], "cat:B/sub:s/item:y1");

		let trimmed = category("A", vec![sub("s", vec![item("x2")])]);
		assert_eq!(assign_ids(&[trimmed])[0].subs[0].items[0], before[0].subs[0].items[1]);
	}

	#[test]
	fn ids_prefer_tags_and_stay_unique() {
		let mut tagged = category("Same", vec![sub("", vec![item("i"), item("i")])]);
		tagged.tag_id = Some("t-1".into());
		let input = vec![tagged, category("Same", vec![]), category("Same", vec![])];
		let ids = assign_ids(&input);
		assert_eq!(ids[0].id, "cat:t-1");
		assert_eq!(ids[0].subs[0].id, None);
		assert_eq!(ids[0].subs[0].items, vec!["cat:t-1/item:i", "cat:t-1/item:i#2"]);
		assert_eq!(ids[1].id, "cat:Same");
		assert_eq!(ids[2].id, "cat:Same#2");

		let data = build_graph(&input, &GraphConfig::default());
		let unique: HashSet<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(unique.len(), data.nodes.len());
	}

	#[test]
	fn loose_items_never_share_a_position() {
		let input = vec![category(
			"Mixed",
			vec![
				sub("", vec![item("a"), item("b")]),
				sub("", vec![item("c"), item("d")]),
				sub("named", vec![item("e")]),
				sub("", vec![item("f")]),
			],
		)];
		let data = build_graph(&input, &GraphConfig::default());
		let solid: Vec<_> = data.solid_nodes().collect();
		for (i, a) in solid.iter().enumerate() {
			for b in &solid[i + 1..] {
				assert!(
					(a.position - b.position).length() > 1e-6,
					"{} and {} coincide",
					a.id,
					b.id
				);
			}
		}
	}
}
