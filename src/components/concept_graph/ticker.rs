//! Animation-frame scheduling for the graph loop.
//!
//! Wraps the `requestAnimationFrame` callback chain in an explicit
//! capability with `start`/`stop`, keeping the engine's math free of any
//! timer so it stays testable natively. Stopping cancels the pending frame,
//! so no stale tick can ever run against a discarded graph.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Drives a callback once per animation frame until stopped.
///
/// `start` replaces any previous callback, so swapping in a new graph's
/// loop implicitly retires the old one. Dropping the ticker stops it.
pub struct Ticker {
	inner: Rc<TickerInner>,
}

struct TickerInner {
	callback: RefCell<Option<Box<dyn FnMut(f64)>>>,
	frame: RefCell<Option<Closure<dyn FnMut()>>>,
	running: Cell<bool>,
	pending: Cell<Option<i32>>,
	last_ms: Cell<f64>,
}

/// Upper bound on reported frame delta, so a backgrounded tab does not
/// come back with one huge step.
const MAX_FRAME_DT: f64 = 0.1;

impl Ticker {
	pub fn new() -> Self {
		let inner = Rc::new(TickerInner {
			callback: RefCell::new(None),
			frame: RefCell::new(None),
			running: Cell::new(false),
			pending: Cell::new(None),
			last_ms: Cell::new(0.0),
		});

		// One long-lived closure re-arms itself each frame; holding it by
		// weak reference lets the ticker drop cleanly.
		let weak = Rc::downgrade(&inner);
		*inner.frame.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.pending.set(None);
			if !inner.running.get() {
				return;
			}

			let now = js_sys::Date::now();
			let dt = ((now - inner.last_ms.get()) / 1000.0).clamp(0.0, MAX_FRAME_DT);
			inner.last_ms.set(now);

			if let Some(on_tick) = inner.callback.borrow_mut().as_mut() {
				on_tick(dt);
			}
			if inner.running.get() {
				inner.schedule();
			}
		}));

		Self { inner }
	}

	/// Begin (or replace) the frame loop. The callback receives the
	/// elapsed time since the previous frame, in seconds.
	pub fn start(&self, on_tick: impl FnMut(f64) + 'static) {
		*self.inner.callback.borrow_mut() = Some(Box::new(on_tick));
		self.inner.running.set(true);
		self.inner.last_ms.set(js_sys::Date::now());
		self.inner.schedule();
	}

	/// Stop the loop and cancel the in-flight frame. Idempotent.
	pub fn stop(&self) {
		self.inner.running.set(false);
		if let Some(id) = self.inner.pending.take() {
			let _ = web_sys::window().unwrap().cancel_animation_frame(id);
		}
	}

	/// Whether a loop is currently scheduled.
	pub fn is_running(&self) -> bool {
		self.inner.running.get()
	}
}

impl TickerInner {
	fn schedule(&self) {
		if self.pending.get().is_some() {
			return;
		}
		if let Some(ref frame) = *self.frame.borrow() {
			if let Ok(id) = web_sys::window()
				.unwrap()
				.request_animation_frame(frame.as_ref().unchecked_ref())
			{
				self.pending.set(Some(id));
			}
		}
	}
}

impl Drop for Ticker {
	fn drop(&mut self) {
		self.stop();
	}
}
