use std::collections::HashMap;

use log::{debug, info};

use super::builder::{build_graph, is_empty_graph};
use super::camera::CameraState;
use super::config::GraphConfig;
use super::projection::{ProjectedNode, pick, project_nodes};
use super::selection::FocusState;
use super::types::{Category, GraphCommand, GraphData, GraphEvent, GraphNode};

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub pressed: bool,
	pub active: bool,
	pub down_node: Option<usize>,
	pub last_x: f64,
	pub last_y: f64,
	pub travelled: f64,
}

/// Everything the canvas needs between frames. Owned by the component and
/// mutated from the frame callback and the pointer handlers alike.
pub struct NeuralGraphState {
	pub config: GraphConfig,
	pub graph: GraphData,
	pub camera: CameraState,
	pub focus: FocusState,
	pub drag: DragState,
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
	index: HashMap<String, usize>,
	empty: bool,
	events: Vec<GraphEvent>,
}

impl NeuralGraphState {
	pub fn new(categories: &[Category], config: GraphConfig, width: f64, height: f64) -> Self {
		let graph = build_graph(categories, &config);
		let empty = is_empty_graph(&graph);
		let camera = CameraState::new(&config);
		let state = Self {
			index: index_nodes(&graph),
			graph,
			camera,
			config,
			focus: FocusState::Orbiting,
			drag: DragState::default(),
			hovered: None,
			width,
			height,
			empty,
			events: vec![GraphEvent::EmptyChanged(empty)],
		};
		state.log_counts();
		state
	}

	fn log_counts(&self) {
		info!(
			"neural graph built: {} nodes, {} links",
			self.graph.nodes.len(),
			self.graph.links.len()
		);
	}

	/// Rebuilds nodes and links wholesale. Camera and selection survive unless
	/// the focused node is gone.
	pub fn set_data(&mut self, categories: &[Category]) {
		self.graph = build_graph(categories, &self.config);
		self.index = index_nodes(&self.graph);
		self.hovered = None;
		self.drag.down_node = None;
		self.log_counts();

		let empty = is_empty_graph(&self.graph);
		if empty != self.empty {
			self.empty = empty;
			self.events.push(GraphEvent::EmptyChanged(empty));
		}

		let Some(id) = self.focus.selected_id() else {
			return;
		};
		match self.index.get(id) {
			Some(&i) => self.camera.target_focus = self.graph.nodes[i].position,
			None => {
				debug!("focused node {id} vanished on rebuild");
				self.focus
					.reset(&mut self.camera, &self.config, &mut self.events);
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn has_area(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn selected_index(&self) -> Option<usize> {
		self.focus
			.selected_id()
			.and_then(|id| self.index.get(id).copied())
	}

	pub fn selected_node(&self) -> Option<&GraphNode> {
		self.selected_index().map(|i| &self.graph.nodes[i])
	}

	/// CSS cursor for the canvas: grabbing while orbiting by drag, pointer over
	/// a node.
	pub fn cursor(&self) -> &'static str {
		if self.drag.active {
			"grabbing"
		} else if self.hovered.is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	/// Advances the camera by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let auto_rotate = !self.drag.active && self.focus.is_orbiting();
		self.camera.step(dt * 60.0, auto_rotate, &self.config);
	}

	pub fn project(&self) -> Vec<ProjectedNode> {
		project_nodes(&self.graph.nodes, &self.camera, self.width, self.height)
	}

	/// Nearest non-dust node under the pointer.
	pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
		let projected = self.project();
		pick(
			&self.graph.nodes,
			&projected,
			x,
			y,
			self.camera.zoom(),
			self.config.min_click_radius,
		)
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		let hit = self.hit_test(x, y);
		self.drag = DragState {
			pressed: true,
			active: hit.is_none(),
			down_node: hit,
			last_x: x,
			last_y: y,
			travelled: 0.0,
		};
	}

	/// Returns true when the hovered node changed.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		if self.drag.pressed {
			let (dx, dy) = (x - self.drag.last_x, y - self.drag.last_y);
			self.drag.travelled += (dx * dx + dy * dy).sqrt();
			self.drag.last_x = x;
			self.drag.last_y = y;
			if self.drag.active {
				self.camera.drag_by(dx, dy, &self.config);
			}
			return false;
		}
		let hovered = self.hit_test(x, y);
		let changed = hovered != self.hovered;
		self.hovered = hovered;
		changed
	}

	/// Ends a press. A press that barely moved is a click and gets hit tested.
	pub fn pointer_up(&mut self, x: f64, y: f64) {
		let was_click = self.drag.pressed && self.drag.travelled <= self.config.click_slop;
		self.drag = DragState::default();
		if was_click {
			self.click(x, y);
		}
	}

	pub fn pointer_leave(&mut self) {
		self.drag = DragState::default();
		self.hovered = None;
	}

	pub fn click(&mut self, x: f64, y: f64) {
		match self.hit_test(x, y) {
			Some(i) => {
				let node = &self.graph.nodes[i];
				self.focus
					.focus(node, &mut self.camera, &self.config, &mut self.events);
			}
			None => {
				self.focus
					.empty_click(&mut self.camera, &self.config, &mut self.events);
			}
		}
	}

	pub fn wheel(&mut self, delta_y: f64) {
		self.camera.wheel(delta_y, &self.config);
	}

	/// Focuses a node by id, e.g. from the library panel.
	pub fn select(&mut self, id: &str) -> bool {
		let Some(&i) = self.index.get(id) else {
			return false;
		};
		let node = &self.graph.nodes[i];
		if node.is_dust() {
			return false;
		}
		self.focus
			.focus(node, &mut self.camera, &self.config, &mut self.events);
		true
	}

	pub fn open_detail(&mut self) -> bool {
		self.focus.open_detail(&mut self.events)
	}

	pub fn close_detail(&mut self) -> bool {
		self.focus.close_detail(&mut self.events)
	}

	pub fn reset(&mut self) {
		self.focus
			.reset(&mut self.camera, &self.config, &mut self.events);
	}

	pub fn apply(&mut self, command: &GraphCommand) {
		match command {
			GraphCommand::Focus(id) => {
				self.select(id);
			}
			GraphCommand::OpenDetail => {
				self.open_detail();
			}
			GraphCommand::CloseDetail => {
				self.close_detail();
			}
			GraphCommand::Reset => self.reset(),
		}
	}

	/// Drains queued host events.
	pub fn take_events(&mut self) -> Vec<GraphEvent> {
		std::mem::take(&mut self.events)
	}
}

fn index_nodes(graph: &GraphData) -> HashMap<String, usize> {
	graph
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.clone(), i))
		.collect()
}
