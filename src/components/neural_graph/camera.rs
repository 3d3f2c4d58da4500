use std::f64::consts::TAU;

use super::config::GraphConfig;
use super::types::Vec3;

/// Pitch (`x`) and yaw (`y`) in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
	pub x: f64,
	pub y: f64,
}

/// Orbit camera. `rotation` and `focus` only move through [`CameraState::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
	rotation: Rotation,
	pub target_rotation: Rotation,
	focus: Vec3,
	pub target_focus: Vec3,
	zoom: f64,
	pub camera_distance: f64,
}

impl CameraState {
	pub fn new(config: &GraphConfig) -> Self {
		let rotation = Rotation {
			x: config.default_pitch,
			y: 0.0,
		};
		Self {
			rotation,
			target_rotation: rotation,
			focus: Vec3::ZERO,
			target_focus: Vec3::ZERO,
			zoom: 1.0,
			camera_distance: config.camera_distance,
		}
	}

	pub fn rotation(&self) -> Rotation {
		self.rotation
	}

	pub fn focus(&self) -> Vec3 {
		self.focus
	}

	pub fn zoom(&self) -> f64 {
		self.zoom
	}

	/// Sets zoom immediately; zoom is never smoothed.
	pub fn set_zoom(&mut self, zoom: f64, config: &GraphConfig) {
		self.zoom = config.clamp_zoom(zoom);
	}

	/// One animation step. `frames` is elapsed time in 60 Hz frames, so a
	/// frame at 60 Hz applies exactly `config.smoothing`.
	pub fn step(&mut self, frames: f64, auto_rotate: bool, config: &GraphConfig) {
		let frames = frames.clamp(0.0, 6.0);
		if auto_rotate {
			self.target_rotation.y += config.auto_rotate_speed * frames;
		}
		let alpha = 1.0 - (1.0 - config.smoothing.clamp(0.0, 1.0)).powf(frames);
		let ease = |current: f64, target: f64| current + (target - current) * alpha;

		self.rotation.x = ease(self.rotation.x, self.target_rotation.x);
		self.rotation.y = ease(self.rotation.y, self.target_rotation.y);
		self.focus = Vec3::new(
			ease(self.focus.x, self.target_focus.x),
			ease(self.focus.y, self.target_focus.y),
			ease(self.focus.z, self.target_focus.z),
		);
	}

	/// Adds a pointer drag delta (in pixels) to the target rotation.
	pub fn drag_by(&mut self, dx: f64, dy: f64, config: &GraphConfig) {
		self.target_rotation.y += dx * config.drag_sensitivity;
		let limit = config.pitch_limit();
		self.target_rotation.x = (self.target_rotation.x + dy * config.drag_sensitivity).clamp(-limit, limit);
	}

	pub fn wheel(&mut self, delta_y: f64, config: &GraphConfig) {
		if !delta_y.is_finite() {
			return;
		}
		self.set_zoom(self.zoom - delta_y * config.wheel_factor, config);
	}

	pub fn focus_on(&mut self, point: Vec3, config: &GraphConfig) {
		self.target_focus = point;
		self.set_zoom(config.focus_zoom, config);
	}

	/// Back to the default orbit around the origin. Yaw returns to the default
	/// angle by the nearest whole turn, so accumulated orbits don't unwind.
	pub fn reset(&mut self, config: &GraphConfig) {
		self.target_focus = Vec3::ZERO;
		self.target_rotation = Rotation {
			x: config.default_pitch,
			y: (self.target_rotation.y / TAU).round() * TAU,
		};
		self.set_zoom(1.0, config);
	}
}
