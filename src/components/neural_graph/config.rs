use super::types::Rgba;

pub const PALETTE: &[Rgba] = &[
	Rgba::rgb(0x1f, 0x77, 0xb4),
	Rgba::rgb(0xff, 0x7f, 0x0e),
	Rgba::rgb(0x2c, 0xa0, 0x2c),
	Rgba::rgb(0xd6, 0x27, 0x28),
	Rgba::rgb(0x94, 0x67, 0xbd),
	Rgba::rgb(0x8c, 0x56, 0x4b),
	Rgba::rgb(0xe3, 0x77, 0xc2),
	Rgba::rgb(0x7f, 0x7f, 0x7f),
	Rgba::rgb(0xbc, 0xbd, 0x22),
	Rgba::rgb(0x17, 0xbe, 0xcf),
];

/// Tunables for layout, camera and interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	// layout
	pub category_radius: f64,
	pub sub_radius: f64,
	pub content_radius: f64,
	pub dust_count: usize,
	pub dust_shell: (f64, f64),
	pub dust_seed: u64,

	// node draw radii
	pub root_size: f64,
	pub category_size: f64,
	pub sub_size: f64,
	pub content_size: f64,
	pub dust_size: f64,

	// camera
	pub camera_distance: f64,
	pub smoothing: f64,
	pub auto_rotate_speed: f64,
	pub default_pitch: f64,
	pub max_pitch: f64,
	pub drag_sensitivity: f64,
	pub wheel_factor: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub focus_zoom: f64,

	// interaction
	pub min_click_radius: f64,
	pub click_slop: f64,
	pub sub_label_scale: f64,

	pub background: Rgba,
	pub root_color: Rgba,
	pub content_color: Rgba,
	pub dust_color: Rgba,
	pub palette: Vec<Rgba>,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			category_radius: 220.0,
			sub_radius: 80.0,
			content_radius: 32.0,
			dust_count: 240,
			dust_shell: (420.0, 760.0),
			dust_seed: 0x6e65_7572_616c,

			root_size: 14.0,
			category_size: 9.0,
			sub_size: 6.0,
			content_size: 3.5,
			dust_size: 1.2,

			camera_distance: 800.0,
			smoothing: 0.1,
			auto_rotate_speed: 0.0015,
			default_pitch: 0.3,
			max_pitch: 1.45,
			drag_sensitivity: 0.005,
			wheel_factor: 0.001,
			min_zoom: 0.5,
			max_zoom: 2.5,
			focus_zoom: 2.0,

			min_click_radius: 10.0,
			click_slop: 5.0,
			sub_label_scale: 1.1,

			background: Rgba::rgb(0x0b, 0x0d, 0x1a),
			root_color: Rgba::rgb(0xf5, 0xf5, 0xff),
			content_color: Rgba::rgb(0xc8, 0xd6, 0xe5),
			dust_color: Rgba::rgb(0x9f, 0xb4, 0xff),
			palette: PALETTE.to_vec(),
		}
	}
}

impl GraphConfig {
	pub fn palette_color(&self, index: usize) -> Rgba {
		if self.palette.is_empty() {
			return PALETTE[index % PALETTE.len()];
		}
		self.palette[index % self.palette.len()]
	}

	/// `(min, max)` zoom, ordered. Non-finite bounds fall back to the defaults.
	pub fn zoom_bounds(&self) -> (f64, f64) {
		let (lo, hi) = if self.min_zoom.is_finite() && self.max_zoom.is_finite() {
			(self.min_zoom, self.max_zoom)
		} else {
			(0.5, 2.5)
		};
		(lo.min(hi), lo.max(hi))
	}

	pub fn clamp_zoom(&self, zoom: f64) -> f64 {
		let (lo, hi) = self.zoom_bounds();
		if zoom.is_nan() {
			return lo;
		}
		zoom.clamp(lo, hi)
	}

	/// Largest pitch magnitude a drag may reach.
	pub fn pitch_limit(&self) -> f64 {
		if self.max_pitch.is_finite() {
			self.max_pitch.abs()
		} else {
			1.45
		}
	}
}
