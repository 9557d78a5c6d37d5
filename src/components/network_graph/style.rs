use super::layout::LayoutStrategy;

/// Visual constants of one graph variant. Sizes named `*_px` are in surface
/// pixels and get divided by zoom when drawn; radii are in simulation units.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphStyle {
	pub background: &'static str,
	pub edge_color: &'static str,
	pub edge_width_px: f64,
	pub edge_label_color: &'static str,
	pub edge_label_font_px: f64,
	pub edge_label_offset_px: f64,

	pub focal_radius: f64,
	pub connected_radius: f64,

	pub focal_fill: &'static str,
	pub hover_fill: &'static str,
	pub node_fill: &'static str,
	pub focal_stroke: &'static str,
	pub selected_stroke: &'static str,
	pub node_stroke: &'static str,
	pub stroke_px: f64,
	pub selected_stroke_px: f64,

	pub initials_font_px: f64,
	pub initials_color: &'static str,
	pub focal_initials_color: &'static str,
	pub max_initials: Option<usize>,
	/// Show the company under a hovered node.
	pub hover_details: bool,

	pub empty_message: &'static str,
	pub legend: &'static [(&'static str, &'static str)],
	/// Prefix of the stats line under the canvas.
	pub stats_prefix: &'static str,
	pub default_size: (f64, f64),
}

impl GraphStyle {
	/// Single-contact view.
	pub fn focal() -> Self {
		Self {
			background: "#ffffff",
			edge_color: "#e5e7eb",
			edge_width_px: 2.0,
			edge_label_color: "#6b7280",
			edge_label_font_px: 12.0,
			edge_label_offset_px: 10.0,

			focal_radius: 40.0,
			connected_radius: 25.0,

			focal_fill: "#3b82f6",
			hover_fill: "#10b981",
			node_fill: "#f3f4f6",
			focal_stroke: "#1e40af",
			selected_stroke: "#f59e0b",
			node_stroke: "#d1d5db",
			stroke_px: 2.0,
			selected_stroke_px: 4.0,

			initials_font_px: 12.0,
			initials_color: "#1f2937",
			focal_initials_color: "#ffffff",
			max_initials: None,
			hover_details: true,

			empty_message: "No connections yet. Add some relationships!",
			legend: &[("#3b82f6", "You"), ("#f3f4f6", "Connection")],
			stats_prefix: "Graph shows",
			default_size: (800.0, 500.0),
		}
	}

	/// All-contacts view.
	pub fn network() -> Self {
		Self {
			edge_label_font_px: 11.0,
			focal_radius: 20.0,
			connected_radius: 20.0,
			initials_font_px: 10.0,
			max_initials: Some(2),
			hover_details: false,
			empty_message: "No contacts yet. Create your first contact!",
			legend: &[("#f3f4f6", "Contact"), ("#10b981", "Hovered")],
			stats_prefix: "Network:",
			default_size: (1000.0, 600.0),
			..Self::focal()
		}
	}

	pub fn for_strategy(strategy: &LayoutStrategy) -> Self {
		if strategy.is_focal() {
			Self::focal()
		} else {
			Self::network()
		}
	}

	pub fn node_radius(&self, focal: bool) -> f64 {
		if focal { self.focal_radius } else { self.connected_radius }
	}

	/// "<prefix> 3 contacts with 1 connection"
	pub fn stats_line(&self, nodes: usize, edges: usize) -> String {
		format!(
			"{} {} with {}",
			self.stats_prefix,
			plural(nodes, "contact"),
			plural(edges, "connection")
		)
	}
}

impl Default for GraphStyle {
	fn default() -> Self {
		Self::network()
	}
}

fn plural(count: usize, noun: &str) -> String {
	if count == 1 {
		format!("{count} {noun}")
	} else {
		format!("{count} {noun}s")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn radius_depends_on_focus() {
		let style = GraphStyle::focal();
		assert_eq!(style.node_radius(true), 40.0);
		assert_eq!(style.node_radius(false), 25.0);
		assert_eq!(GraphStyle::network().node_radius(false), 20.0);
	}

	#[test]
	fn stats_line_pluralizes() {
		assert_eq!(
			GraphStyle::focal().stats_line(1, 0),
			"Graph shows 1 contact with 0 connections"
		);
		assert_eq!(
			GraphStyle::network().stats_line(3, 1),
			"Network: 3 contacts with 1 connection"
		);
	}

	#[test]
	fn style_follows_strategy() {
		let focal = LayoutStrategy::FocalRadial {
			focal_id: "a".into(),
		};
		assert_eq!(GraphStyle::for_strategy(&focal), GraphStyle::focal());
		assert_eq!(
			GraphStyle::for_strategy(&LayoutStrategy::ForceDirected),
			GraphStyle::network()
		);
	}
}
