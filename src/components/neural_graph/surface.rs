use std::f64::consts::PI;

use log::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
	#[error("no global window")]
	NoWindow,
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub fn window() -> Result<Window, SurfaceError> {
	web_sys::window().ok_or(SurfaceError::NoWindow)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")?
		.ok_or(SurfaceError::NoContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::NoContext)
}

/// A drawing surface that may not exist yet. Every [`LazySurface::get`] retries
/// a failed lookup, so a canvas whose context shows up late starts drawing on
/// the next frame or resize.
pub struct LazySurface<S, F> {
	surface: Option<S>,
	acquire: F,
	failed: bool,
}

impl<S, F> LazySurface<S, F>
where
	F: FnMut() -> Result<S, SurfaceError>,
{
	pub fn new(acquire: F) -> Self {
		Self {
			surface: None,
			acquire,
			failed: false,
		}
	}

	pub fn get(&mut self) -> Option<&S> {
		if self.surface.is_none() {
			match (self.acquire)() {
				Ok(surface) => {
					if self.failed {
						info!("drawing surface acquired");
					}
					self.surface = Some(surface);
				}
				Err(err) => {
					if !self.failed {
						warn!("no drawing surface, skipping frames: {err}");
						self.failed = true;
					}
					return None;
				}
			}
		}
		self.surface.as_ref()
	}
}

/// The handful of 2D primitives the renderer draws with.
pub trait Surface {
	fn clear(&self, width: f64, height: f64, css: &str);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, css: &str);
	fn stroke_circle(&self, x: f64, y: f64, radius: f64, line_width: f64, css: &str, dashed: bool);
	fn line(&self, from: (f64, f64), to: (f64, f64), line_width: f64, css: &str);
	fn text(&self, x: f64, y: f64, text: &str, font: &str, css: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64, css: &str) {
		self.set_fill_style_str(css);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, css: &str) {
		self.begin_path();
		let _ = self.arc(x, y, radius.max(0.0), 0.0, 2.0 * PI);
		self.set_fill_style_str(css);
		self.fill();
	}

	fn stroke_circle(&self, x: f64, y: f64, radius: f64, line_width: f64, css: &str, dashed: bool) {
		if dashed {
			let _ = self.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(3.0),
				&JsValue::from_f64(3.0),
			));
		}
		self.begin_path();
		let _ = self.arc(x, y, radius.max(0.0), 0.0, 2.0 * PI);
		self.set_stroke_style_str(css);
		self.set_line_width(line_width);
		self.stroke();
		if dashed {
			let _ = self.set_line_dash(&js_sys::Array::new());
		}
	}

	fn line(&self, from: (f64, f64), to: (f64, f64), line_width: f64, css: &str) {
		self.set_stroke_style_str(css);
		self.set_line_width(line_width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn text(&self, x: f64, y: f64, text: &str, font: &str, css: &str) {
		self.set_font(font);
		self.set_fill_style_str(css);
		let _ = self.fill_text(text, x, y);
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn lazy_surface_retries_until_acquired() {
		let attempts = Cell::new(0);
		let mut lazy = LazySurface::new(|| {
			attempts.set(attempts.get() + 1);
			if attempts.get() < 3 {
				Err(SurfaceError::NoContext)
			} else {
				Ok(attempts.get())
			}
		});
		assert_eq!(lazy.get(), None);
		assert_eq!(lazy.get(), None);
		assert_eq!(lazy.get(), Some(&3));
		assert_eq!(lazy.get(), Some(&3));
		assert_eq!(attempts.get(), 3);
	}
}
