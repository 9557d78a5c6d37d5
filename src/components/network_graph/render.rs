use super::layout::Point;
use super::state::NetworkGraphState;
use super::surface::{Baseline, Surface};

pub fn render<S: Surface>(state: &NetworkGraphState, surface: &mut S) {
	let style = &state.style;
	surface.clear(style.background, state.width, state.height);

	if state.data.is_empty() {
		let center = Point::new(state.width / 2.0, state.height / 2.0);
		surface.text(
			center,
			style.empty_message,
			"14px sans-serif",
			style.edge_label_color,
			Baseline::Middle,
		);
		return;
	}

	let t = &state.transform;
	surface.push_transform(
		state.width / 2.0 + t.pan_x,
		state.height / 2.0 + t.pan_y,
		t.zoom,
	);
	draw_edges(state, surface);
	draw_nodes(state, surface);
	surface.pop_transform();
}

fn draw_edges<S: Surface>(state: &NetworkGraphState, surface: &mut S) {
	let (style, k) = (&state.style, state.transform.zoom);
	let font = format!("{}px sans-serif", style.edge_label_font_px / k);
	let offset = style.edge_label_offset_px / k;

	for edge in &state.data.edges {
		let (Some(&from), Some(&to)) = (
			state.positions.get(&edge.source),
			state.positions.get(&edge.target),
		) else {
			continue;
		};

		surface.line(from, to, style.edge_color, style.edge_width_px / k);

		let mid = from.midpoint(to);
		surface.text(
			Point::new(mid.x, mid.y - offset),
			edge.kind.label(),
			&font,
			style.edge_label_color,
			Baseline::Alphabetic,
		);
	}
}

fn draw_nodes<S: Surface>(state: &NetworkGraphState, surface: &mut S) {
	let (style, k) = (&state.style, state.transform.zoom);
	let initials_font = format!("bold {}px sans-serif", style.initials_font_px / k);

	for node in state.nodes() {
		let Some(&pos) = state.positions.get(&node.id) else {
			continue;
		};
		let (focal, hovered, selected) = (
			state.is_focal(&node.id),
			state.is_hovered(&node.id),
			state.is_selected(&node.id),
		);

		let radius = state.node_radius(node);
		let fill = if focal {
			style.focal_fill
		} else if hovered {
			style.hover_fill
		} else {
			style.node_fill
		};
		let stroke = if selected {
			style.selected_stroke
		} else if focal {
			style.focal_stroke
		} else {
			style.node_stroke
		};
		let stroke_px = if selected {
			style.selected_stroke_px
		} else {
			style.stroke_px
		};
		surface.circle(pos, radius, fill, stroke, stroke_px / k);

		let text_color = if focal {
			style.focal_initials_color
		} else {
			style.initials_color
		};
		surface.text(
			pos,
			&node.initials(style.max_initials),
			&initials_font,
			text_color,
			Baseline::Middle,
		);

		if hovered && style.hover_details {
			if let Some(company) = &node.company {
				surface.text(
					Point::new(pos.x, pos.y + radius + 25.0 / k),
					company,
					&format!("{}px sans-serif", 11.0 / k),
					style.initials_color,
					Baseline::Alphabetic,
				);
			}
		}
	}
}
