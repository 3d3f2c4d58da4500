use std::ops::{Add, Mul, Sub};

/// A point or direction in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	/// Unit vector from spherical angles, with `y` as the polar axis.
	pub fn from_spherical(theta: f64, phi: f64) -> Self {
		let (sin_phi, cos_phi) = phi.sin_cos();
		let (sin_theta, cos_theta) = theta.sin_cos();
		Self::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
	}

	pub fn normalized(self) -> Self {
		let len = self.length();
		if len < f64::EPSILON {
			return Self::ZERO;
		}
		self * (1.0 / len)
	}
}

impl Add for Vec3 {
	type Output = Vec3;

	fn add(self, rhs: Vec3) -> Vec3 {
		Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
	}
}

impl Sub for Vec3 {
	type Output = Vec3;

	fn sub(self, rhs: Vec3) -> Vec3 {
		Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
	}
}

impl Mul<f64> for Vec3 {
	type Output = Vec3;

	fn mul(self, rhs: f64) -> Vec3 {
		Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
	}
}

/// An sRGB colour with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Parses `#rrggbb` or `rrggbb`. Anything else yields `None`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let hex = hex.strip_prefix('#').unwrap_or(hex);
		if hex.len() != 6 || !hex.is_ascii() {
			return None;
		}
		let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
		Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
	}

	/// Mixes towards white by `t` in `[0, 1]`.
	pub fn lighten(self, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |c: u8| (c as f64 + (255.0 - c as f64) * t).round() as u8;
		Self {
			r: mix(self.r),
			g: mix(self.g),
			b: mix(self.b),
			a: self.a,
		}
	}

	/// CSS `rgba()` string with the colour's alpha multiplied by `alpha`.
	pub fn css(&self, alpha: f64) -> String {
		format!(
			"rgba({}, {}, {}, {:.3})",
			self.r,
			self.g,
			self.b,
			(self.a * alpha).clamp(0.0, 1.0)
		)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Root,
	Category,
	Sub,
	Content,
	Dust,
}

impl NodeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Root => "root",
			NodeKind::Category => "category",
			NodeKind::Sub => "sub",
			NodeKind::Content => "content",
			NodeKind::Dust => "dust",
		}
	}
}

/// The externally owned record a content node points at.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentPayload {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub thumbnail_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub kind: NodeKind,
	pub position: Vec3,
	pub radius: f64,
	pub color: Rgba,
	pub parent_id: Option<String>,
	pub payload: Option<ContentPayload>,
}

impl GraphNode {
	pub fn is_dust(&self) -> bool {
		self.kind == NodeKind::Dust
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Nodes that take part in hit testing and links.
	pub fn solid_nodes(&self) -> impl Iterator<Item = &GraphNode> {
		self.nodes.iter().filter(|n| !n.is_dust())
	}
}

// Host dataset: category -> subcategory -> item.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Category {
	pub name: String,
	pub tag_id: Option<String>,
	/// Tag colour resolved by the host, `#rrggbb`.
	pub tag_color: Option<String>,
	pub subs: Vec<SubCategory>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubCategory {
	/// An empty name attaches the items straight to the category.
	pub name: String,
	pub tag_id: Option<String>,
	pub tag_color: Option<String>,
	pub items: Vec<ContentItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentItem {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub thumbnail_url: Option<String>,
}

/// Signals sent back to the host page.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	NodeSelected {
		id: String,
		kind: NodeKind,
		payload_id: Option<String>,
	},
	DetailOpened {
		id: String,
	},
	DetailClosed {
		id: String,
	},
	Reset,
	EmptyChanged(bool),
}

/// Requests from host controls into the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphCommand {
	Focus(String),
	OpenDetail,
	CloseDetail,
	Reset,
}
