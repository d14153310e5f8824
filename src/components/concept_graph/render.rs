//! Canvas rendering for the concept graph.
//!
//! Draws from the simulation's current positions each frame: background,
//! then links, then nodes with labels, then the hover ring and description
//! tooltip on top. The renderer owns pixels only; it never advances physics.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphState;
use super::theme::Theme;

/// Gap between a node's circle and its label, in pixels.
const LABEL_GAP: f64 = 4.0;

/// Renders the complete graph to the canvas.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(state, ctx, theme);
	draw_links(state, ctx, theme);
	draw_nodes(state, ctx, theme);
	draw_hover(state, ctx, theme);
}

fn draw_background(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Center-to-center lines, stroke width scaled by the square root of the
/// link weight. Drawn before nodes so circles cover the line ends.
fn draw_links(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bodies = state.sim.bodies();
	ctx.set_stroke_style_str(&theme.edge.color.to_css());

	for link in state.sim.links() {
		let (a, b) = (bodies[link.source], bodies[link.target]);
		let weight = if link.value > 0.0 { link.value } else { 1.0 };
		ctx.set_line_width(weight.sqrt());
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let font = format!("{}px sans-serif", theme.label.size);

	for (node, body) in state.sim.nodes().iter().zip(state.sim.bodies()) {
		let radius = node.radius();
		let color = theme.node_color(node.group);

		ctx.begin_path();
		let _ = ctx.arc(body.x, body.y, radius, 0.0, 2.0 * PI);

		if theme.node.use_gradient {
			let gradient = ctx
				.create_radial_gradient(
					body.x - radius * 0.3,
					body.y - radius * 0.3,
					0.0,
					body.x,
					body.y,
					radius,
				)
				.unwrap();
			gradient
				.add_color_stop(0.0, &color.lighten(0.4).to_css())
				.unwrap();
			gradient.add_color_stop(0.7, &color.to_css()).unwrap();
			gradient
				.add_color_stop(1.0, &color.darken(0.2).to_css())
				.unwrap();
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		} else {
			ctx.set_fill_style_str(&color.to_css());
		}
		ctx.fill();

		if theme.node.border_width > 0.0 {
			ctx.set_stroke_style_str(&theme.node.border_color.to_css());
			ctx.set_line_width(theme.node.border_width);
			ctx.stroke();
		}

		ctx.set_fill_style_str(&theme.label.color.to_css());
		ctx.set_font(&font);
		let _ = ctx.fill_text(&node.id, body.x + radius + LABEL_GAP, body.y + 4.0);
	}
}

/// Hover ring plus description tooltip, both faded by hover intensity.
fn draw_hover(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Some((idx, intensity)) = state.hover.current() else {
		return;
	};
	let node = &state.sim.nodes()[idx];
	let body = state.sim.bodies()[idx];
	let radius = node.radius();

	ctx.begin_path();
	let _ = ctx.arc(body.x, body.y, radius + 3.0, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(
		&theme
			.hover
			.ring_color
			.with_alpha(theme.hover.ring_color.a * intensity)
			.to_css(),
	);
	ctx.set_line_width(1.5);
	ctx.stroke();

	if node.description.is_empty() {
		return;
	}
	draw_tooltip(state, ctx, theme, &node.description, body.x, body.y + radius, intensity);
}

/// Word-wrapped tooltip box under the node, clamped to the viewport.
/// Text width is estimated from character count; canvas text metrics are
/// not worth a feature flag at this size.
fn draw_tooltip(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	text: &str,
	anchor_x: f64,
	anchor_y: f64,
	intensity: f64,
) {
	const CHAR_WIDTH: f64 = 6.2;
	const LINE_HEIGHT: f64 = 16.0;
	const PADDING: f64 = 8.0;
	const MAX_LINE_CHARS: usize = 38;

	let mut lines: Vec<String> = Vec::new();
	let mut current = String::new();
	for word in text.split_whitespace() {
		if !current.is_empty() && current.len() + 1 + word.len() > MAX_LINE_CHARS {
			lines.push(std::mem::take(&mut current));
		}
		if !current.is_empty() {
			current.push(' ');
		}
		current.push_str(word);
	}
	if !current.is_empty() {
		lines.push(current);
	}

	let longest = lines.iter().map(|l| l.len()).max().unwrap_or(0);
	let box_width = longest as f64 * CHAR_WIDTH + PADDING * 2.0;
	let box_height = lines.len() as f64 * LINE_HEIGHT + PADDING * 2.0 - 4.0;

	let x = (anchor_x - box_width / 2.0)
		.clamp(0.0, (state.width - box_width).max(0.0));
	let y = (anchor_y + 8.0).min((state.height - box_height).max(0.0));

	ctx.set_fill_style_str(
		&theme
			.hover
			.tooltip_background
			.with_alpha(theme.hover.tooltip_background.a * intensity)
			.to_css(),
	);
	ctx.fill_rect(x, y, box_width, box_height);

	ctx.set_fill_style_str(
		&theme
			.hover
			.tooltip_text
			.with_alpha(theme.hover.tooltip_text.a * intensity)
			.to_css(),
	);
	ctx.set_font("11px sans-serif");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x + PADDING, y + PADDING + 7.0 + i as f64 * LINE_HEIGHT);
	}
}
