//! concept-graph: Interactive force-directed concept map visualization.
//!
//! This crate provides a WASM-based graph visualization component that lays
//! out concept maps with a physics simulation and renders them to a canvas,
//! with node dragging, hover descriptions, and click reporting. The graph
//! payload is produced by an external learning-assistant backend and
//! embedded in the host page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::concept_graph::{ConceptGraphCanvas, GraphData, GraphLink, GraphNode};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("concept-graph: logging initialized");
}

/// Load the graph payload from a script element with id="concept-graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("concept-graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"concept-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("concept-graph: failed to parse graph payload: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the concept map payload from the DOM and renders the interactive
/// graph with a detail panel for the clicked concept.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// Load graph data from the DOM; an unparseable payload degrades to an
	// empty graph rather than failing the page.
	let graph_data = load_graph_data().unwrap_or_default();
	let nodes_for_lookup = graph_data.nodes.clone();
	let graph_signal = Signal::derive(move || graph_data.clone());

	let selected: RwSignal<Option<GraphNode>> = RwSignal::new(None);
	let on_node_click = Callback::new(move |id: String| {
		let node = nodes_for_lookup.iter().find(|n| n.id == id).cloned();
		selected.set(node);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Concept Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="concept-map">
			<div class="concept-map-header">
				<h1>"Concept Map"</h1>
				<p class="subtitle">"Interactive. Drag nodes to reposition, click a node for details."</p>
			</div>
			<ConceptGraphCanvas data=graph_signal on_node_click=on_node_click />
			{move || {
				selected.get().map(|node| {
					view! {
						<div class="concept-detail">
							<h2>{node.id.clone()}</h2>
							<p>{node.description.clone()}</p>
						</div>
					}
				})
			}}
		</div>
	}
}
