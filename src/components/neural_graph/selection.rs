use log::debug;

use super::camera::CameraState;
use super::config::GraphConfig;
use super::types::{GraphEvent, GraphNode, NodeKind};

/// Orbiting -> Focused(n) -> DetailOpen(n), plus close/reset back down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusState {
	#[default]
	Orbiting,
	Focused(String),
	DetailOpen(String),
}

impl FocusState {
	pub fn selected_id(&self) -> Option<&str> {
		match self {
			FocusState::Orbiting => None,
			FocusState::Focused(id) | FocusState::DetailOpen(id) => Some(id),
		}
	}

	pub fn is_orbiting(&self) -> bool {
		matches!(self, FocusState::Orbiting)
	}

	/// Focuses `node`, replacing any previous focus. Content nodes open their
	/// detail straight away.
	pub fn focus(
		&mut self,
		node: &GraphNode,
		camera: &mut CameraState,
		config: &GraphConfig,
		events: &mut Vec<GraphEvent>,
	) {
		if node.is_dust() {
			return;
		}
		camera.focus_on(node.position, config);
		events.push(GraphEvent::NodeSelected {
			id: node.id.clone(),
			kind: node.kind,
			payload_id: node.payload.as_ref().map(|p| p.id.clone()),
		});
		if node.kind == NodeKind::Content {
			*self = FocusState::DetailOpen(node.id.clone());
			events.push(GraphEvent::DetailOpened {
				id: node.id.clone(),
			});
		} else {
			*self = FocusState::Focused(node.id.clone());
		}
		debug!("focus -> {:?}", self);
	}

	/// Opens the detail overlay for the focused node. Only valid from `Focused`.
	pub fn open_detail(&mut self, events: &mut Vec<GraphEvent>) -> bool {
		let FocusState::Focused(id) = self else {
			return false;
		};
		let id = std::mem::take(id);
		events.push(GraphEvent::DetailOpened { id: id.clone() });
		*self = FocusState::DetailOpen(id);
		debug!("focus -> {:?}", self);
		true
	}

	/// Closes the overlay; the camera stays on the node.
	pub fn close_detail(&mut self, events: &mut Vec<GraphEvent>) -> bool {
		let FocusState::DetailOpen(id) = self else {
			return false;
		};
		let id = std::mem::take(id);
		events.push(GraphEvent::DetailClosed { id: id.clone() });
		*self = FocusState::Focused(id);
		debug!("focus -> {:?}", self);
		true
	}

	/// Explicit reset from any state.
	pub fn reset(
		&mut self,
		camera: &mut CameraState,
		config: &GraphConfig,
		events: &mut Vec<GraphEvent>,
	) {
		camera.reset(config);
		*self = FocusState::Orbiting;
		events.push(GraphEvent::Reset);
		debug!("focus -> Orbiting");
	}

	/// A click that hit nothing. Resets only from `Focused`; an open detail
	/// overlay pins the current focus.
	pub fn empty_click(
		&mut self,
		camera: &mut CameraState,
		config: &GraphConfig,
		events: &mut Vec<GraphEvent>,
	) -> bool {
		if !matches!(self, FocusState::Focused(_)) {
			return false;
		}
		self.reset(camera, config, events);
		true
	}
}
