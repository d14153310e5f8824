//! Visual theming for the concept graph.
//!
//! Group-based node colors plus background, edge, label, and hover styles.

use super::types::{GROUP_PRIMARY, GROUP_SUB_CONCEPT};

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style. Stroke width comes from the link weight.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
}

/// Node visual style and group palette.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
	/// Primary-topic fill (group 1)
	pub primary: Color,
	/// Sub-concept fill (group 2)
	pub sub_concept: Color,
	/// Related-term fill (group 3 and anything else)
	pub related: Color,
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	/// Font size in pixels.
	pub size: f64,
}

/// Hover ring and tooltip style.
#[derive(Clone, Debug)]
pub struct HoverStyle {
	pub ring_color: Color,
	pub tooltip_background: Color,
	pub tooltip_text: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub label: LabelStyle,
	pub hover: HoverStyle,
}

impl Theme {
	/// Light dashboard theme (default): slate background, flat fills.
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(248, 250, 252),
				color_secondary: Color::rgb(248, 250, 252),
				use_gradient: false,
			},
			edge: EdgeStyle {
				color: Color::rgba(148, 163, 184, 0.6),
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.5,
				border_color: Color::rgb(255, 255, 255),
				primary: Color::rgb(59, 130, 246),
				sub_concept: Color::rgb(16, 185, 129),
				related: Color::rgb(139, 92, 246),
			},
			label: LabelStyle {
				color: Color::rgb(51, 65, 85),
				size: 12.0,
			},
			hover: HoverStyle {
				ring_color: Color::rgb(51, 65, 85),
				tooltip_background: Color::rgba(15, 23, 42, 0.85),
				tooltip_text: Color::rgb(241, 245, 249),
			},
		}
	}

	/// Dark theme with gradient background and shaded nodes.
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(15, 23, 42),
				color_secondary: Color::rgb(30, 41, 59),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(148, 163, 184, 0.4),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 1.5,
				border_color: Color::rgba(255, 255, 255, 0.8),
				primary: Color::rgb(96, 165, 250),
				sub_concept: Color::rgb(52, 211, 153),
				related: Color::rgb(167, 139, 250),
			},
			label: LabelStyle {
				color: Color::rgb(203, 213, 225),
				size: 12.0,
			},
			hover: HoverStyle {
				ring_color: Color::rgb(241, 245, 249),
				tooltip_background: Color::rgba(241, 245, 249, 0.92),
				tooltip_text: Color::rgb(15, 23, 42),
			},
		}
	}

	/// Fill color for a node group.
	pub fn node_color(&self, group: u8) -> Color {
		match group {
			GROUP_PRIMARY => self.node.primary,
			GROUP_SUB_CONCEPT => self.node.sub_concept,
			_ => self.node.related,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
