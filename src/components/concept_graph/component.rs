//! Leptos component wrapping the concept graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse event
//! handlers for node dragging, clicking, and hovering. A [`Ticker`] runs the
//! frame loop, advancing the simulation and rendering each frame; it is
//! stopped on teardown so no stale tick can touch a discarded graph.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::GraphState;
use super::theme::Theme;
use super::ticker::Ticker;
use super::types::GraphData;

/// Bundles one graph's interactive state with its visual theme.
struct GraphContext {
	state: GraphState,
	theme: Theme,
}

/// Pointer position in canvas coordinates.
fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive force-directed concept map on a canvas element.
///
/// Pass the graph payload via the reactive `data` signal; a new payload
/// replaces the graph and its simulation wholesale. The component takes its
/// width from the parent container (reacting to window resizes) unless an
/// explicit `width` is given; height is fixed. Genuine node clicks (not
/// drags) are reported through `on_node_click` with the node id.
#[component]
pub fn ConceptGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = 400.0)] height: f64,
	#[prop(default = Theme::default())] theme: Theme,
	#[prop(optional, into)] on_node_click: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let ticker = Rc::new(Ticker::new());
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_registered = Rc::new(Cell::new(false));

	let (context_init, ticker_init, resize_cb_init, resize_registered_init) = (
		context.clone(),
		ticker.clone(),
		resize_cb.clone(),
		resize_registered.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|&pw| pw > 0.0)
				.unwrap_or(600.0)
		});
		canvas.set_width(w as u32);
		canvas.set_height(height as u32);

		let ctx: web_sys::CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(GraphContext {
			state: GraphState::new(&data.get(), w, height),
			theme: theme.clone(),
		});

		// Track container width on window resize; height stays fixed and
		// node positions are kept.
		if width.is_none() && !resize_registered_init.get() {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(parent) = canvas_resize.parent_element() else {
					return;
				};
				let nw = parent.client_width() as f64;
				if nw <= 0.0 {
					return;
				}
				canvas_resize.set_width(nw as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, height);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window
					.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			resize_registered_init.set(true);
		}

		// (Re)start the frame loop; replacing the callback retires any
		// previous graph's loop.
		let context_anim = context_init.clone();
		ticker_init.start(move |dt| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(dt);
				render::render(&c.state, &ctx, &c.theme);
			}
		});
	});

	// `on_cleanup` requires `Send + Sync`, but these CSR-only handles are not.
	// Wrap them so the bound is satisfied; all access stays on the single WASM
	// thread, where `SendWrapper` never panics.
	let cleanup_handles =
		leptos::__reexports::send_wrapper::SendWrapper::new((ticker.clone(), resize_cb.clone()));
	on_cleanup(move || {
		let (ticker_cleanup, resize_cb_cleanup) = &*cleanup_handles;
		ticker_cleanup.stop();
		if let Some(cb) = resize_cb_cleanup.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = pointer_position(&canvas, &ev);
		let clicked = match *context_mu.borrow_mut() {
			Some(ref mut c) => c.state.pointer_up(x, y),
			None => None,
		};
		if let (Some(id), Some(callback)) = (clicked, on_node_click) {
			callback.run(id);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="concept-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
