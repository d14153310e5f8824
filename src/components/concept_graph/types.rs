//! Graph data structures for input to the concept graph component.

use serde::Deserialize;

/// Group id for primary topic nodes.
pub const GROUP_PRIMARY: u8 = 1;
/// Group id for sub-concept nodes.
pub const GROUP_SUB_CONCEPT: u8 = 2;
/// Group id for related-term nodes.
pub const GROUP_RELATED: u8 = 3;

/// A concept in the graph.
///
/// Metadata only: position, velocity, and pin state live in the simulation
/// arena ([`super::simulation::Simulation`]), keyed by node index, so payload
/// data is never mutated by the layout engine.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this concept. Used to reference nodes in links
	/// and rendered as the node label.
	pub id: String,
	/// Category: 1 = primary topic, 2 = sub-concept, 3 = related term.
	/// Determines display radius and color, never physics.
	pub group: u8,
	/// Free-text explanation, shown on hover.
	#[serde(default)]
	pub description: String,
}

impl GraphNode {
	/// Display radius in pixels for this node's group.
	/// Unknown groups render like related terms.
	pub fn radius(&self) -> f64 {
		match self.group {
			GROUP_PRIMARY => 20.0,
			GROUP_SUB_CONCEPT => 15.0,
			_ => 10.0,
		}
	}
}

/// A weighted relationship between two concepts.
///
/// Directed in data, undirected in rendering and physics.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relationship weight. Scales rendered stroke width only.
	#[serde(default = "default_link_value")]
	pub value: f64,
}

fn default_link_value() -> f64 {
	1.0
}

/// Complete graph payload: concepts and their relationships.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_collaborator_payload() {
		let json = r#"{
			"nodes": [
				{"id": "Gravity", "group": 1, "description": "Attraction between masses"},
				{"id": "Mass", "group": 2, "description": "Amount of matter"}
			],
			"links": [
				{"source": "Gravity", "target": "Mass", "value": 3}
			]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.nodes[0].group, GROUP_PRIMARY);
		assert_eq!(data.links[0].value, 3.0);
	}

	#[test]
	fn link_value_defaults_to_one() {
		let json = r#"{
			"nodes": [{"id": "a", "group": 3}],
			"links": [{"source": "a", "target": "a"}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.links[0].value, 1.0);
		assert_eq!(data.nodes[0].description, "");
	}

	#[test]
	fn radius_follows_group() {
		let node = |group| GraphNode {
			id: "n".into(),
			group,
			description: String::new(),
		};
		assert_eq!(node(GROUP_PRIMARY).radius(), 20.0);
		assert_eq!(node(GROUP_SUB_CONCEPT).radius(), 15.0);
		assert_eq!(node(GROUP_RELATED).radius(), 10.0);
		assert_eq!(node(7).radius(), 10.0);
	}
}
