//! Force-directed layout engine for the concept graph.
//!
//! Owns the physics of node positioning: a decaying-temperature (alpha)
//! simulation combining link springs, pairwise charge repulsion, viewport
//! centering, and disk collision avoidance. Mutable body state (position,
//! velocity, pin) lives in an arena index-aligned with the immutable node
//! metadata, so payload data is never touched by the physics.
//!
//! The engine performs no drawing and no scheduling: callers advance it one
//! [`Simulation::tick`] at a time and read positions back each frame.

use std::collections::HashMap;

use log::warn;

use super::types::{GraphData, GraphNode};

/// Tuning parameters for the layout simulation.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
	/// Rest length of link springs, in pixels.
	pub link_distance: f64,
	/// Pairwise charge strength. Negative repels.
	pub charge_strength: f64,
	/// Fraction of the centroid-to-center offset corrected per tick.
	pub center_strength: f64,
	/// Collision disk radius per node, in pixels.
	pub collide_radius: f64,
	/// Fraction of velocity retained each tick (damping).
	pub velocity_decay: f64,
	/// Alpha below which the simulation is considered converged.
	pub alpha_min: f64,
	/// Per-tick interpolation rate of alpha toward its target.
	pub alpha_decay: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			link_distance: 100.0,
			charge_strength: -300.0,
			center_strength: 1.0,
			collide_radius: 40.0,
			velocity_decay: 0.6,
			alpha_min: 0.001,
			// Reaches alpha_min from 1.0 in ~300 ticks.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
		}
	}
}

/// Mutable physics state for one node.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimBody {
	/// Position.
	pub x: f64,
	pub y: f64,
	/// Velocity.
	pub vx: f64,
	pub vy: f64,
	/// Pinned x position. While set, forces do not move this body.
	pub fx: Option<f64>,
	/// Pinned y position.
	pub fy: Option<f64>,
}

/// A link whose endpoints have been resolved to body indices.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedLink {
	/// Body index of the source endpoint.
	pub source: usize,
	/// Body index of the target endpoint.
	pub target: usize,
	/// Weight carried through from the payload, for stroke scaling.
	pub value: f64,
	strength: f64,
	bias: f64,
}

/// Viewports below this size degenerate distance-based forces, so clamp.
pub const MIN_VIEWPORT: f64 = 1.0;

/// Radius of the circle nodes are seeded on at startup.
const SEED_RADIUS: f64 = 100.0;

/// Force-directed simulation over one graph.
///
/// Created once per graph; a new payload gets a fresh simulation. Converges
/// as alpha decays below [`SimulationConfig::alpha_min`] and stays inert
/// until reheated via [`Simulation::set_alpha_target`].
pub struct Simulation {
	nodes: Vec<GraphNode>,
	bodies: Vec<SimBody>,
	links: Vec<ResolvedLink>,
	config: SimulationConfig,
	alpha: f64,
	alpha_target: f64,
	center: (f64, f64),
	jiggle_seed: f64,
}

impl Simulation {
	/// Build a simulation from a payload and viewport size.
	///
	/// Links referencing unknown node ids are dropped with a warning; the
	/// remaining graph lays out normally. Nodes are seeded on a circle
	/// around the viewport center so early repulsion never sees coincident
	/// points. An empty node list yields an already-converged simulation.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		Self::with_config(data, width, height, SimulationConfig::default())
	}

	/// [`Simulation::new`] with explicit tuning parameters.
	pub fn with_config(
		data: &GraphData,
		width: f64,
		height: f64,
		config: SimulationConfig,
	) -> Self {
		let center = (
			width.max(MIN_VIEWPORT) / 2.0,
			height.max(MIN_VIEWPORT) / 2.0,
		);

		let nodes = data.nodes.clone();
		let mut id_to_index = HashMap::new();
		for (i, node) in nodes.iter().enumerate() {
			id_to_index.insert(node.id.as_str(), i);
		}

		let mut endpoints = Vec::new();
		for link in &data.links {
			match (
				id_to_index.get(link.source.as_str()),
				id_to_index.get(link.target.as_str()),
			) {
				(Some(&source), Some(&target)) => {
					endpoints.push((source, target, link.value));
				}
				_ => warn!(
					"concept-graph: dropping link {} -> {}: unknown endpoint",
					link.source, link.target
				),
			}
		}

		// Degree-derived spring parameters: weaker springs at hubs so one
		// link cannot yank a highly connected node, and corrections split
		// toward the lower-degree endpoint.
		let mut degrees = vec![0usize; nodes.len()];
		for &(source, target, _) in &endpoints {
			degrees[source] += 1;
			degrees[target] += 1;
		}
		let links = endpoints
			.into_iter()
			.map(|(source, target, value)| {
				let (ds, dt) = (degrees[source] as f64, degrees[target] as f64);
				ResolvedLink {
					source,
					target,
					value,
					strength: 1.0 / ds.min(dt).max(1.0),
					bias: ds / (ds + dt).max(1.0),
				}
			})
			.collect();

		let total = nodes.len();
		let bodies = (0..total)
			.map(|i| {
				let angle = i as f64 * std::f64::consts::TAU / total as f64;
				SimBody {
					x: center.0 + SEED_RADIUS * angle.cos(),
					y: center.1 + SEED_RADIUS * angle.sin(),
					..SimBody::default()
				}
			})
			.collect();

		Self {
			alpha: if total == 0 { 0.0 } else { 1.0 },
			alpha_target: 0.0,
			nodes,
			bodies,
			links,
			config,
			center,
			jiggle_seed: 0.0,
		}
	}

	/// Whether the simulation still advances on tick.
	pub fn is_running(&self) -> bool {
		self.alpha >= self.config.alpha_min || self.alpha_target >= self.config.alpha_min
	}

	/// Current simulation temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Set the value alpha relaxes toward. A target above `alpha_min`
	/// keeps the simulation live (used while dragging); zero lets it
	/// decay to convergence.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Retarget the centering force, e.g. after a viewport resize.
	/// Accumulated positions are kept.
	pub fn set_center(&mut self, width: f64, height: f64) {
		self.center = (
			width.max(MIN_VIEWPORT) / 2.0,
			height.max(MIN_VIEWPORT) / 2.0,
		);
	}

	/// Pin a body at the given position. Forces stop moving it until
	/// [`Simulation::unpin`].
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(body) = self.bodies.get_mut(index) {
			body.fx = Some(x);
			body.fy = Some(y);
		}
	}

	/// Release a pinned body back to force-governed motion.
	pub fn unpin(&mut self, index: usize) {
		if let Some(body) = self.bodies.get_mut(index) {
			body.fx = None;
			body.fy = None;
		}
	}

	/// Node metadata, index-aligned with [`Simulation::bodies`].
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Physics state, index-aligned with [`Simulation::nodes`].
	pub fn bodies(&self) -> &[SimBody] {
		&self.bodies
	}

	/// Links with endpoints resolved to body indices.
	pub fn links(&self) -> &[ResolvedLink] {
		&self.links
	}

	/// Current positions keyed by node id, the per-tick output contract.
	pub fn positions(&self) -> impl Iterator<Item = (&str, f64, f64)> {
		self.nodes
			.iter()
			.zip(&self.bodies)
			.map(|(node, body)| (node.id.as_str(), body.x, body.y))
	}

	/// Advance one step: relax alpha toward its target, accumulate forces
	/// into velocities, then integrate. A no-op once converged or when the
	/// graph is empty.
	pub fn tick(&mut self) {
		if self.bodies.is_empty() || !self.is_running() {
			return;
		}

		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.apply_link_force();
		self.apply_charge_force();
		self.apply_center_force();
		self.apply_collide_force();

		for body in &mut self.bodies {
			match (body.fx, body.fy) {
				(Some(fx), Some(fy)) => {
					body.x = fx;
					body.y = fy;
					body.vx = 0.0;
					body.vy = 0.0;
				}
				_ => {
					body.vx *= self.config.velocity_decay;
					body.vy *= self.config.velocity_decay;
					body.x += body.vx;
					body.y += body.vy;
				}
			}
		}
	}

	/// Springs pull linked bodies toward the rest distance, corrections
	/// biased toward the lower-degree endpoint.
	fn apply_link_force(&mut self) {
		for link in &self.links {
			let (s, t) = (self.bodies[link.source], self.bodies[link.target]);
			let mut dx = t.x + t.vx - s.x - s.vx;
			let mut dy = t.y + t.vy - s.y - s.vy;
			if dx == 0.0 && dy == 0.0 {
				dx = Self::jiggle(&mut self.jiggle_seed);
				dy = Self::jiggle(&mut self.jiggle_seed);
			}
			let dist = (dx * dx + dy * dy).sqrt();
			let pull =
				(dist - self.config.link_distance) / dist * self.alpha * link.strength;
			let (fx, fy) = (dx * pull, dy * pull);

			self.bodies[link.target].vx -= fx * link.bias;
			self.bodies[link.target].vy -= fy * link.bias;
			self.bodies[link.source].vx += fx * (1.0 - link.bias);
			self.bodies[link.source].vy += fy * (1.0 - link.bias);
		}
	}

	/// Inverse-square pairwise repulsion. O(n^2), fine at concept-map
	/// scale; a spatial index is the first thing to add for large graphs.
	fn apply_charge_force(&mut self) {
		let n = self.bodies.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let mut dx = self.bodies[j].x - self.bodies[i].x;
				let mut dy = self.bodies[j].y - self.bodies[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = Self::jiggle(&mut self.jiggle_seed);
					dy = Self::jiggle(&mut self.jiggle_seed);
				}
				// Clamp the squared distance so near-coincident bodies
				// get a bounded kick instead of a blow-up.
				let d2 = (dx * dx + dy * dy).max(1.0);
				let w = self.config.charge_strength * self.alpha / d2;

				self.bodies[i].vx += dx * w;
				self.bodies[i].vy += dy * w;
				self.bodies[j].vx -= dx * w;
				self.bodies[j].vy -= dy * w;
			}
		}
	}

	/// Translate all bodies so the centroid drifts toward the viewport
	/// center. Positional, not velocity-based, so it cannot add energy.
	fn apply_center_force(&mut self) {
		let n = self.bodies.len() as f64;
		let (mut sx, mut sy) = (0.0, 0.0);
		for body in &self.bodies {
			sx += body.x;
			sy += body.y;
		}
		let shift_x = (sx / n - self.center.0) * self.config.center_strength;
		let shift_y = (sy / n - self.center.1) * self.config.center_strength;
		for body in &mut self.bodies {
			body.x -= shift_x;
			body.y -= shift_y;
		}
	}

	/// Push apart any pair of bodies whose collision disks overlap at
	/// their projected (position + velocity) locations.
	fn apply_collide_force(&mut self) {
		let n = self.bodies.len();
		let min_dist = 2.0 * self.config.collide_radius;
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (self.bodies[i], self.bodies[j]);
				let mut dx = (b.x + b.vx) - (a.x + a.vx);
				let mut dy = (b.y + b.vy) - (a.y + a.vy);
				if dx == 0.0 && dy == 0.0 {
					dx = Self::jiggle(&mut self.jiggle_seed);
					dy = Self::jiggle(&mut self.jiggle_seed);
				}
				let d2 = dx * dx + dy * dy;
				if d2 >= min_dist * min_dist {
					continue;
				}
				let dist = d2.sqrt();
				let push = (min_dist - dist) / dist;
				let (fx, fy) = (dx * push * 0.5, dy * push * 0.5);

				self.bodies[j].vx += fx;
				self.bodies[j].vy += fy;
				self.bodies[i].vx -= fx;
				self.bodies[i].vy -= fy;
			}
		}
	}

	/// Deterministic sub-pixel offset used to break exact coincidence.
	fn jiggle(seed: &mut f64) -> f64 {
		*seed += 1.0;
		let x = (*seed * 12.9898).sin() * 43758.5453;
		(x - x.floor() - 0.5) * 1e-6
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::types::GraphLink;

	fn node(id: &str, group: u8) -> GraphNode {
		GraphNode {
			id: id.to_string(),
			group,
			description: String::new(),
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.to_string(),
			target: target.to_string(),
			value: 1.0,
		}
	}

	fn dist(a: &SimBody, b: &SimBody) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	fn run_to_convergence(sim: &mut Simulation) {
		for _ in 0..1000 {
			if !sim.is_running() {
				return;
			}
			sim.tick();
		}
		panic!("simulation did not converge within 1000 ticks");
	}

	#[test]
	fn dangling_link_is_dropped_not_fatal() {
		// The A/B/C graph with one link into nowhere: init must keep the
		// two valid links and never panic.
		let data = GraphData {
			nodes: vec![node("A", 1), node("B", 2), node("C", 2)],
			links: vec![link("A", "B"), link("A", "B"), link("A", "Z")],
		};
		let mut sim = Simulation::new(&data, 600.0, 400.0);
		assert_eq!(sim.links().len(), 2);
		assert_eq!(sim.nodes().len(), 3);

		run_to_convergence(&mut sim);
		assert!(!sim.is_running());

		// The connected pair stays nearer the viewport center than the
		// stray node, which only gets pushed outward.
		let center = SimBody {
			x: 300.0,
			y: 200.0,
			..SimBody::default()
		};
		let bodies = sim.bodies();
		assert!(dist(&bodies[0], &center) < dist(&bodies[2], &center));
	}

	#[test]
	fn alpha_decays_strictly_then_settles() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2)],
			links: vec![link("a", "b")],
		};
		let mut sim = Simulation::new(&data, 600.0, 400.0);

		let mut previous = sim.alpha();
		for _ in 0..50 {
			sim.tick();
			assert!(sim.alpha() < previous);
			previous = sim.alpha();
		}

		run_to_convergence(&mut sim);

		// Converged: further ticks are no-ops and positions freeze.
		let frozen: Vec<_> = sim.bodies().to_vec();
		sim.tick();
		for (before, after) in frozen.iter().zip(sim.bodies()) {
			assert_eq!(before.x, after.x);
			assert_eq!(before.y, after.y);
		}
	}

	#[test]
	fn linked_pair_settles_closer_than_unlinked_pair() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2), node("c", 3), node("d", 3)],
			links: vec![link("a", "b")],
		};
		let mut sim = Simulation::new(&data, 600.0, 400.0);
		run_to_convergence(&mut sim);

		let bodies = sim.bodies();
		assert!(dist(&bodies[0], &bodies[1]) < dist(&bodies[2], &bodies[3]));
	}

	#[test]
	fn converged_nodes_respect_collision_separation() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2), node("c", 2)],
			links: vec![link("a", "b"), link("a", "c")],
		};
		let mut sim = Simulation::new(&data, 600.0, 400.0);
		run_to_convergence(&mut sim);

		// Twice the collision radius, minus slack for the final
		// integration step.
		let bodies = sim.bodies();
		for i in 0..bodies.len() {
			for j in (i + 1)..bodies.len() {
				assert!(
					dist(&bodies[i], &bodies[j]) > 78.0,
					"nodes {i} and {j} overlap at {}",
					dist(&bodies[i], &bodies[j])
				);
			}
		}
	}

	#[test]
	fn pinned_body_tracks_pin_exactly() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2)],
			links: vec![link("a", "b")],
		};
		let mut sim = Simulation::new(&data, 600.0, 400.0);

		sim.pin(0, 42.0, 24.0);
		for _ in 0..10 {
			sim.tick();
			assert_eq!(sim.bodies()[0].x, 42.0);
			assert_eq!(sim.bodies()[0].y, 24.0);
		}
	}

	#[test]
	fn released_body_resumes_physics() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2)],
			links: vec![link("a", "b")],
		};
		let mut sim = Simulation::new(&data, 600.0, 400.0);

		// Pin far from equilibrium, then release.
		sim.pin(0, 0.0, 0.0);
		sim.set_alpha_target(0.3);
		for _ in 0..5 {
			sim.tick();
		}
		sim.unpin(0);
		sim.set_alpha_target(0.0);

		let before = sim.bodies()[0];
		for _ in 0..5 {
			sim.tick();
		}
		let after = sim.bodies()[0];
		assert!(dist(&before, &after) > 1.0, "released node should move");
	}

	#[test]
	fn reheat_restarts_a_converged_simulation() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2)],
			links: vec![link("a", "b")],
		};
		let mut sim = Simulation::new(&data, 600.0, 400.0);
		run_to_convergence(&mut sim);
		assert!(!sim.is_running());

		sim.set_alpha_target(0.3);
		assert!(sim.is_running());
		let low = sim.alpha();
		sim.tick();
		assert!(sim.alpha() > low, "alpha should climb toward the target");
	}

	#[test]
	fn empty_graph_is_a_noop() {
		let mut sim = Simulation::new(&GraphData::default(), 600.0, 400.0);
		assert!(!sim.is_running());
		sim.tick();
		assert_eq!(sim.positions().count(), 0);
		assert_eq!(sim.links().len(), 0);
	}

	#[test]
	fn zero_viewport_is_clamped() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2)],
			links: vec![link("a", "b")],
		};
		let mut sim = Simulation::new(&data, 0.0, 0.0);
		run_to_convergence(&mut sim);
		for (_, x, y) in sim.positions() {
			assert!(x.is_finite() && y.is_finite());
		}
	}

	#[test]
	fn seeded_positions_are_distinct() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 2), node("c", 3)],
			links: vec![],
		};
		let sim = Simulation::new(&data, 600.0, 400.0);
		let bodies = sim.bodies();
		for i in 0..bodies.len() {
			for j in (i + 1)..bodies.len() {
				assert!(dist(&bodies[i], &bodies[j]) > 1.0);
			}
		}
	}
}
