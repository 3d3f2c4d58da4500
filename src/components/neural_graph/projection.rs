//! World to screen mapping and screen-space picking.
//!
//! `depth` is the distance in front of the camera plane along the view axis,
//! `camera_distance - rotated_z`. Smaller depth is nearer; anything with
//! `depth <= 0` sits at or behind the camera and is never drawn or picked.

use std::cmp::Ordering;

use super::camera::CameraState;
use super::types::{GraphNode, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
	pub x: f64,
	pub y: f64,
	pub scale: f64,
	pub depth: f64,
}

impl Projection {
	pub fn in_front(&self) -> bool {
		self.depth > 0.0
	}
}

/// Yaw about the vertical axis, then pitch about the horizontal one.
pub fn rotate(point: Vec3, yaw: f64, pitch: f64) -> Vec3 {
	let (sin_y, cos_y) = yaw.sin_cos();
	let x = point.x * cos_y - point.z * sin_y;
	let z = point.x * sin_y + point.z * cos_y;

	let (sin_p, cos_p) = pitch.sin_cos();
	let y = point.y * cos_p - z * sin_p;
	let z = point.y * sin_p + z * cos_p;
	Vec3::new(x, y, z)
}

/// Projects `point` for a viewport of `width` x `height`. Returns `None` for
/// points at or behind the camera plane.
pub fn project(point: Vec3, camera: &CameraState, width: f64, height: f64) -> Option<Projection> {
	let rotation = camera.rotation();
	let r = rotate(point - camera.focus(), rotation.y, rotation.x);
	let depth = camera.camera_distance - r.z;
	if depth <= 0.0 || !depth.is_finite() {
		return None;
	}
	let scale = camera.camera_distance / depth;
	let zoom = camera.zoom();
	Some(Projection {
		x: width / 2.0 + r.x * scale * zoom,
		y: height / 2.0 + r.y * scale * zoom,
		scale,
		depth,
	})
}

/// A node index paired with where it landed on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedNode {
	pub index: usize,
	pub at: Projection,
}

/// Projects every node that is in front of the camera.
pub fn project_nodes(
	nodes: &[GraphNode],
	camera: &CameraState,
	width: f64,
	height: f64,
) -> Vec<ProjectedNode> {
	nodes
		.iter()
		.enumerate()
		.filter_map(|(index, node)| {
			project(node.position, camera, width, height).map(|at| ProjectedNode { index, at })
		})
		.collect()
}

/// Painter's order: farthest first.
pub fn sort_far_to_near(projected: &mut [ProjectedNode]) {
	projected.sort_by(|a, b| b.at.depth.partial_cmp(&a.at.depth).unwrap_or(Ordering::Equal));
}

/// Screen radius a pointer has to land within to pick a node. Includes the
/// zoom factor so the hit circle tracks the circle actually drawn.
pub fn hit_radius(node_radius: f64, scale: f64, zoom: f64, min_radius: f64) -> f64 {
	(node_radius * scale * zoom * 2.0).max(min_radius)
}

/// Picks the nearest candidate whose hit circle contains `(x, y)`. Dust and
/// anything behind the camera are ignored.
pub fn pick(
	nodes: &[GraphNode],
	projected: &[ProjectedNode],
	x: f64,
	y: f64,
	zoom: f64,
	min_radius: f64,
) -> Option<usize> {
	let mut candidates: Vec<&ProjectedNode> = projected
		.iter()
		.filter(|p| p.at.in_front() && nodes.get(p.index).is_some_and(|n| !n.is_dust()))
		.collect();
	candidates.sort_by(|a, b| a.at.depth.partial_cmp(&b.at.depth).unwrap_or(Ordering::Equal));

	candidates
		.into_iter()
		.find(|p| {
			let node = &nodes[p.index];
			let (dx, dy) = (p.at.x - x, p.at.y - y);
			// zoomed radius, same as render
			(dx * dx + dy * dy).sqrt() <= hit_radius(node.radius, p.at.scale, zoom, min_radius)
		})
		.map(|p| p.index)
}
