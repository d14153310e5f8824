//! Force-directed concept map component.
//!
//! Renders an interactive concept graph on an HTML canvas with:
//! - Physics-based node positioning via a decaying-alpha force simulation
//! - Node dragging with live reheat, and click reporting with drag suppression
//! - Hover descriptions with smooth fade transitions
//! - Group-based sizing and coloring, configurable theming
//!
//! # Example
//!
//! ```ignore
//! use concept_graph::{ConceptGraphCanvas, GraphData, GraphNode, GraphLink};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "Gravity".into(), group: 1, description: "...".into() },
//!         GraphNode { id: "Mass".into(), group: 2, description: "...".into() },
//!     ],
//!     links: vec![
//!         GraphLink { source: "Gravity".into(), target: "Mass".into(), value: 1.0 },
//!     ],
//! };
//!
//! let on_click = Callback::new(|id: String| log::info!("clicked {id}"));
//! view! { <ConceptGraphCanvas data=data.into() on_node_click=on_click /> }
//! ```

mod component;
mod drag;
mod render;
mod simulation;
mod state;
pub mod theme;
mod ticker;
mod types;

pub use component::ConceptGraphCanvas;
pub use simulation::{ResolvedLink, SimBody, Simulation, SimulationConfig};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, GROUP_PRIMARY, GROUP_RELATED, GROUP_SUB_CONCEPT};
