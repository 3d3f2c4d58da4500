use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, ResizeObserver, WheelEvent, Window};

use super::config::GraphConfig;
use super::frame_loop::{self, Teardown};
use super::render;
use super::state::NeuralGraphState;
use super::surface::{LazySurface, SurfaceError, context_2d, window};
use super::types::{Category, GraphCommand, GraphEvent};

type SharedState = Rc<RefCell<Option<NeuralGraphState>>>;

/// Drains engine events and forwards them to the host, outside the borrow.
fn flush(state: &SharedState, on_event: Option<Callback<GraphEvent>>) {
	let events = match state.borrow_mut().as_mut() {
		Some(s) => s.take_events(),
		None => return,
	};
	if let Some(cb) = on_event {
		for event in events {
			cb.run(event);
		}
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn parent_size(canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	let _ = HtmlElement::style(canvas).set_property("cursor", cursor);
}

/// Watches the host container and re-renders synchronously on every resize.
fn watch_size(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	fixed: (Option<f64>, Option<f64>),
	state: SharedState,
) -> Result<Teardown, SurfaceError> {
	let on_resize = {
		let canvas = canvas.clone();
		let mut surface = {
			let canvas = canvas.clone();
			LazySurface::new(move || context_2d(&canvas))
		};
		Closure::<dyn FnMut()>::new(move || {
			let (w, h) = if fullscreen {
				match web_sys::window() {
					Some(win) => window_size(&win),
					None => return,
				}
			} else {
				let (pw, ph) = parent_size(&canvas).unwrap_or((0.0, 0.0));
				(fixed.0.unwrap_or(pw), fixed.1.unwrap_or(ph))
			};
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			if let Some(ref mut s) = *state.borrow_mut() {
				s.resize(w, h);
				if let Some(ctx) = surface.get() {
					render::render(s, ctx);
				}
			}
		})
	};

	if fullscreen {
		window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
		let window = window.clone();
		return Ok(Box::new(move || {
			let _ = window
				.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		}));
	}

	let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
	if let Some(parent) = canvas.parent_element() {
		observer.observe(&parent);
	}
	Ok(Box::new(move || {
		observer.disconnect();
		drop(on_resize);
	}))
}

/// Interactive 3D node-link view of the host's category tree.
#[component]
pub fn NeuralGraphCanvas(
	#[prop(into)] data: Signal<Vec<Category>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] config: Option<GraphConfig>,
	#[prop(optional, into)] on_event: Option<Callback<GraphEvent>>,
	#[prop(optional, into)] command: Option<Signal<Option<GraphCommand>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window = match window() {
			Ok(window) => window,
			Err(err) => {
				warn!("neural graph not mounted: {err}");
				return;
			}
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			let parent = parent_size(&canvas).unwrap_or((800.0, 600.0));
			(width.unwrap_or(parent.0), height.unwrap_or(parent.1))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut surface = {
			let canvas = canvas.clone();
			LazySurface::new(move || context_2d(&canvas))
		};
		*state_init.borrow_mut() = Some(NeuralGraphState::new(
			&data.get_untracked(),
			config.clone(),
			w,
			h,
		));
		flush(&state_init, on_event);

		let mut teardown: Vec<Teardown> = Vec::new();
		match watch_size(&canvas, &window, fullscreen, (width, height), state_init.clone()) {
			Ok(hook) => teardown.push(hook),
			Err(err) => warn!("resize tracking unavailable: {err}"),
		}

		let state_anim = state_init.clone();
		let started = frame_loop::start(
			move |dt| {
				let Some(ctx) = surface.get() else {
					return;
				};
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					s.tick(dt);
					render::render(s, ctx);
				}
			},
			teardown,
		);
		match started {
			Ok(handle) => {
				info!("neural graph mounted at {w}x{h}");
				on_cleanup(move || handle.stop());
			}
			Err(err) => warn!("frame loop failed to start: {err}"),
		}
	});

	let state_data = state.clone();
	Effect::new(move |initialized: Option<()>| {
		let categories = data.get();
		if initialized.is_none() {
			return;
		}
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.set_data(&categories);
		}
		flush(&state_data, on_event);
	});

	if let Some(command) = command {
		let state_cmd = state.clone();
		Effect::new(move |_| {
			let Some(cmd) = command.get() else {
				return;
			};
			if let Some(ref mut s) = *state_cmd.borrow_mut() {
				s.apply(&cmd);
			}
			flush(&state_cmd, on_event);
		});
	}

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
			set_cursor(&canvas, s.cursor());
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pointer_move(x, y) {
				set_cursor(&canvas, s.cursor());
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up(x, y);
			set_cursor(&canvas, s.cursor());
		}
		flush(&state_mu, on_event);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="neural-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
