use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use wasm_bindgen::prelude::*;

use super::surface::{SurfaceError, window};

/// Cleanup to run once the loop has stopped.
pub type Teardown = Box<dyn FnOnce()>;

/// Cancels a running frame loop. Cloneable and `Send`, so it can be handed to
/// reactive cleanup hooks.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
	stopped: Arc<AtomicBool>,
}

impl LoopHandle {
	/// Stops scheduling. The teardown hooks run on the next frame callback.
	pub fn stop(&self) {
		self.stopped.store(true, Ordering::Relaxed);
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped.load(Ordering::Relaxed)
	}
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Starts a `requestAnimationFrame` loop calling `frame` with the elapsed
/// seconds since the previous frame.
pub fn start(
	mut frame: impl FnMut(f64) + 'static,
	teardown: Vec<Teardown>,
) -> Result<LoopHandle, SurfaceError> {
	let window = window()?;
	let handle = LoopHandle::default();
	let control = handle.clone();
	let slot: FrameSlot = Rc::new(RefCell::new(None));
	let slot_inner = slot.clone();
	let mut teardown = Some(teardown);
	let mut last: Option<f64> = None;

	*slot.borrow_mut() = Some(Closure::new(move |now: f64| {
		if control.is_stopped() {
			for hook in teardown.take().into_iter().flatten() {
				hook();
			}
			// hand the running closure to the JS GC instead of dropping it here
			if let Some(cb) = slot_inner.borrow_mut().take() {
				let _ = cb.into_js_value();
			}
			info!("frame loop stopped");
			return;
		}

		let dt = last.map_or(1.0 / 60.0, |prev| ((now - prev) / 1000.0).clamp(0.0, 0.1));
		last = Some(now);
		frame(dt);

		let scheduled = match (web_sys::window(), slot_inner.borrow().as_ref()) {
			(Some(win), Some(cb)) => win
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.map_err(SurfaceError::from),
			_ => Err(SurfaceError::NoWindow),
		};
		if let Err(err) = scheduled {
			warn!("could not schedule next frame: {err}");
		}
	}));

	if let Some(cb) = slot.borrow().as_ref() {
		window.request_animation_frame(cb.as_ref().unchecked_ref())?;
	}
	Ok(handle)
}
