//! Interactive state for one displayed graph.
//!
//! Combines the layout simulation with gesture and hover tracking, and
//! translates raw pointer coordinates into engine operations. Pointer
//! updates apply synchronously as events arrive, so a drag is always
//! visible to the next tick rather than queued behind a render frame.

use super::drag::{DragGesture, DragOutcome};
use super::simulation::{MIN_VIEWPORT, Simulation};
use super::types::GraphData;

/// Extra pixels around a node's display disk that still count as a hit.
const HIT_SLACK: f64 = 2.0;

/// Alpha target applied while a node is held, keeping the rest of the
/// graph reacting live to the drag.
const DRAG_HEAT: f64 = 0.3;

/// Hover tracking with a smoothed intensity for fade in/out.
///
/// The fade subject is kept through fade-out so the ring and tooltip can
/// dissolve in place after the pointer leaves the node.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverState {
	node: Option<usize>,
	active: bool,
	intensity: f64,
}

impl HoverState {
	/// Update the hovered node (None = pointer over empty space).
	pub fn set(&mut self, node: Option<usize>) {
		match node {
			Some(idx) => {
				if self.node != Some(idx) {
					self.node = Some(idx);
					self.intensity = 0.0;
				}
				self.active = true;
			}
			None => self.active = false,
		}
	}

	/// Ease intensity toward its target with exponential smoothing.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		if self.active {
			self.intensity += (1.0 - self.intensity) * (1.0 - (-FADE_IN_SPEED * dt).exp());
		} else {
			self.intensity *= (-FADE_OUT_SPEED * dt).exp();
			if self.intensity < 0.005 {
				self.intensity = 0.0;
				self.node = None;
			}
		}
	}

	/// The fade subject and its current intensity, while visible.
	pub fn current(&self) -> Option<(usize, f64)> {
		self.node
			.filter(|_| self.intensity > 0.0)
			.map(|idx| (idx, self.intensity))
	}
}

/// State for one graph: physics, gestures, hover, and viewport.
///
/// Created once per payload and mutated each frame by the animation loop.
/// A new payload gets a fresh `GraphState`; there is no incremental
/// update path.
pub struct GraphState {
	pub sim: Simulation,
	pub drag: DragGesture,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

impl GraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let width = width.max(MIN_VIEWPORT);
		let height = height.max(MIN_VIEWPORT);
		Self {
			sim: Simulation::new(data, width, height),
			drag: DragGesture::default(),
			hover: HoverState::default(),
			width,
			height,
		}
	}

	/// Advance physics one step and ease hover intensity.
	pub fn tick(&mut self, dt: f64) {
		self.sim.tick();
		self.hover.tick(dt);
	}

	/// Topmost node whose display disk contains the position, if any.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let mut found = None;
		for (idx, (node, body)) in self.sim.nodes().iter().zip(self.sim.bodies()).enumerate() {
			let (dx, dy) = (body.x - x, body.y - y);
			let hit = node.radius() + HIT_SLACK;
			if dx * dx + dy * dy < hit * hit {
				found = Some(idx);
			}
		}
		found
	}

	/// Pointer pressed: grab the node under the pointer, pin it at its
	/// current position, and reheat so the graph responds live.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		let Some(idx) = self.node_at_position(x, y) else {
			return;
		};
		let body = self.sim.bodies()[idx];
		self.sim.pin(idx, body.x, body.y);
		self.sim.set_alpha_target(DRAG_HEAT);
		self.drag.begin(idx, x, y);
		self.hover.set(None);
	}

	/// Pointer moved: while a node is held its pin follows the pointer
	/// exactly; otherwise update hover.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.movement(x, y) {
			self.sim.pin(idx, x, y);
		} else {
			let hovered = self.node_at_position(x, y);
			self.hover.set(hovered);
		}
	}

	/// Pointer released: release the held node and let alpha decay.
	/// Returns the node id when the gesture was a genuine click.
	pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<String> {
		match self.drag.finish(x, y) {
			DragOutcome::Clicked { node } => {
				self.release(node);
				Some(self.sim.nodes()[node].id.clone())
			}
			DragOutcome::Dragged { node } => {
				self.release(node);
				None
			}
			DragOutcome::None => None,
		}
	}

	/// Pointer left the canvas: abort any gesture, clear hover.
	pub fn pointer_leave(&mut self) {
		if let Some(node) = self.drag.cancel() {
			self.release(node);
		}
		self.hover.set(None);
	}

	/// Viewport change: retarget the centering force, keep positions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width.max(MIN_VIEWPORT);
		self.height = height.max(MIN_VIEWPORT);
		self.sim.set_center(self.width, self.height);
	}

	fn release(&mut self, node: usize) {
		self.sim.unpin(node);
		self.sim.set_alpha_target(0.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::types::{GraphLink, GraphNode};

	/// Three nodes seeded on the startup circle in a 600x400 viewport;
	/// node "A" (group 1) lands at (400, 200).
	fn state() -> GraphState {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "A".into(),
					group: 1,
					description: "primary".into(),
				},
				GraphNode {
					id: "B".into(),
					group: 2,
					description: "sub".into(),
				},
				GraphNode {
					id: "C".into(),
					group: 3,
					description: "related".into(),
				},
			],
			links: vec![GraphLink {
				source: "A".into(),
				target: "B".into(),
				value: 1.0,
			}],
		};
		GraphState::new(&data, 600.0, 400.0)
	}

	#[test]
	fn hit_test_finds_node_by_display_radius() {
		let state = state();
		assert_eq!(state.node_at_position(400.0, 200.0), Some(0));
		// Just inside the group-1 radius of 20.
		assert_eq!(state.node_at_position(418.0, 200.0), Some(0));
		// Well outside any disk.
		assert_eq!(state.node_at_position(500.0, 350.0), None);
	}

	#[test]
	fn drag_pins_to_pointer_before_next_tick() {
		let mut state = state();
		state.pointer_down(400.0, 200.0);
		assert_eq!(state.drag.pinned_node(), Some(0));
		assert!(state.sim.is_running());

		state.pointer_move(450.0, 260.0);
		state.tick(0.016);
		let body = state.sim.bodies()[0];
		assert_eq!((body.x, body.y), (450.0, 260.0));

		// Every subsequent move is honored exactly, forces or not.
		state.pointer_move(100.0, 100.0);
		state.tick(0.016);
		let body = state.sim.bodies()[0];
		assert_eq!((body.x, body.y), (100.0, 100.0));
	}

	#[test]
	fn release_after_drag_resumes_physics_and_suppresses_click() {
		let mut state = state();
		state.pointer_down(400.0, 200.0);
		state.pointer_move(100.0, 100.0);
		assert_eq!(state.pointer_up(100.0, 100.0), None);
		assert_eq!(state.drag.pinned_node(), None);

		let before = state.sim.bodies()[0];
		for _ in 0..5 {
			state.tick(0.016);
		}
		let after = state.sim.bodies()[0];
		let moved = ((after.x - before.x).powi(2) + (after.y - before.y).powi(2)).sqrt();
		assert!(moved > 1.0, "released node should evolve under forces");
	}

	#[test]
	fn press_release_in_place_reports_click() {
		let mut state = state();
		state.pointer_down(400.0, 200.0);
		assert_eq!(state.pointer_up(401.0, 200.0), Some("A".to_string()));
	}

	#[test]
	fn press_on_empty_space_is_inert() {
		let mut state = state();
		state.pointer_down(50.0, 50.0);
		assert_eq!(state.drag.pinned_node(), None);
		assert_eq!(state.pointer_up(50.0, 50.0), None);
	}

	#[test]
	fn pointer_leave_cancels_gesture() {
		let mut state = state();
		state.pointer_down(400.0, 200.0);
		state.pointer_move(420.0, 220.0);
		state.pointer_leave();
		assert_eq!(state.drag.pinned_node(), None);
		assert!(state.sim.bodies()[0].fx.is_none());
	}

	#[test]
	fn hover_fades_in_and_out() {
		let mut state = state();
		state.pointer_move(400.0, 200.0);
		state.tick(0.016);
		let (idx, rising) = state.hover.current().expect("hover should be visible");
		assert_eq!(idx, 0);
		assert!(rising > 0.0);

		state.pointer_move(50.0, 50.0);
		let mut last = rising;
		for _ in 0..10 {
			state.tick(0.016);
			if let Some((_, t)) = state.hover.current() {
				assert!(t < last);
				last = t;
			}
		}
	}

	#[test]
	fn resize_retargets_without_discarding_positions() {
		let mut state = state();
		for _ in 0..10 {
			state.tick(0.016);
		}
		let before: Vec<_> = state.sim.bodies().to_vec();
		state.resize(900.0, 400.0);
		for (old, new) in before.iter().zip(state.sim.bodies()) {
			assert_eq!(old.x, new.x);
			assert_eq!(old.y, new.y);
		}
	}
}
