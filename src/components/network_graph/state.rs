use std::collections::HashSet;

use log::debug;

use super::layout::{LayoutOptions, LayoutStrategy, Point, PositionMap};
use super::style::GraphStyle;
use super::types::{GraphData, GraphNode};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const BUTTON_ZOOM_IN: f64 = 1.2;
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

/// Pan is applied relative to the surface center, then zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub zoom: f64,
	pub pan_x: f64,
	pub pan_y: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			pan_x: 0.0,
			pan_y: 0.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub pan_start_x: f64,
	pub pan_start_y: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
	pub hovered: Option<String>,
	pub selected: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
	/// When false every interaction handler is a no-op.
	pub interactive: bool,
	/// Contact the view is centered on. Without one, a node tagged focal in
	/// the data decides.
	pub focal: Option<String>,
	pub layout: LayoutOptions,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			interactive: true,
			focal: None,
			layout: LayoutOptions::default(),
		}
	}
}

pub struct NetworkGraphState {
	pub data: GraphData,
	pub positions: PositionMap,
	pub strategy: LayoutStrategy,
	pub style: GraphStyle,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub interaction: InteractionState,
	pub width: f64,
	pub height: f64,
	pub needs_redraw: bool,
	options: GraphOptions,
}

impl NetworkGraphState {
	pub fn new(data: GraphData, options: GraphOptions, width: f64, height: f64) -> Self {
		let strategy = LayoutStrategy::resolve(&data, options.focal.as_deref());
		let positions = strategy.compute(&data, &options.layout);
		Self {
			style: GraphStyle::for_strategy(&strategy),
			data,
			positions,
			strategy,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			interaction: InteractionState::default(),
			width,
			height,
			needs_redraw: true,
			options,
		}
	}

	/// Replaces the graph and its focal contact, recomputing the layout and
	/// dropping hover and selection. The view transform is kept.
	pub fn set_data(&mut self, data: GraphData, focal: Option<String>) {
		self.options.focal = focal;
		self.strategy = LayoutStrategy::resolve(&data, self.options.focal.as_deref());
		self.style = GraphStyle::for_strategy(&self.strategy);
		self.positions = self.strategy.compute(&data, &self.options.layout);
		self.data = data;
		self.interaction = InteractionState::default();
		self.needs_redraw = true;
	}

	pub fn interactive(&self) -> bool {
		self.options.interactive
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.needs_redraw = true;
	}

	pub fn surface_to_simulation(&self, sx: f64, sy: f64) -> Point {
		let t = &self.transform;
		Point::new(
			(sx - self.width / 2.0 - t.pan_x) / t.zoom,
			(sy - self.height / 2.0 - t.pan_y) / t.zoom,
		)
	}

	/// Nodes in list order, skipping repeats of an id already seen. These are
	/// the ones the layout placed.
	pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
		let mut seen = HashSet::with_capacity(self.data.nodes.len());
		self.data
			.nodes
			.iter()
			.filter(move |node| seen.insert(node.id.as_str()))
	}

	pub fn is_focal(&self, id: &str) -> bool {
		self.strategy.focal_id() == Some(id)
	}

	pub fn node_radius(&self, node: &GraphNode) -> f64 {
		self.style.node_radius(self.is_focal(&node.id))
	}

	/// First node, in list order, whose circle contains the surface point.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<&GraphNode> {
		let pointer = self.surface_to_simulation(sx, sy);
		self.nodes().find(|node| {
			self.positions
				.get(&node.id)
				.is_some_and(|p| p.distance(pointer) <= self.node_radius(node))
		})
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if !self.interactive() {
			return;
		}
		let hovered = self.node_at(sx, sy).map(|n| n.id.clone());
		self.set_hover(hovered);
	}

	pub fn pointer_leave(&mut self) {
		if !self.interactive() {
			return;
		}
		self.set_hover(None);
	}

	fn set_hover(&mut self, hovered: Option<String>) {
		if self.interaction.hovered != hovered {
			self.interaction.hovered = hovered;
			self.needs_redraw = true;
		}
	}

	/// Selects the node under the pointer, or clears the selection on a miss.
	pub fn click(&mut self, sx: f64, sy: f64) {
		if !self.interactive() {
			return;
		}
		let selected = self.node_at(sx, sy).map(|n| n.id.clone());
		if let Some(id) = &selected {
			debug!("selected node {id}");
		}
		self.interaction.selected = selected;
		self.needs_redraw = true;
	}

	/// Starts a pan drag. Returns whether the drag began.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
		if !self.interactive() {
			return false;
		}
		self.drag = DragState {
			active: true,
			start_x: x,
			start_y: y,
			pan_start_x: self.transform.pan_x,
			pan_start_y: self.transform.pan_y,
		};
		true
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.interactive() || !self.drag.active {
			return;
		}
		self.transform.pan_x = self.drag.pan_start_x + (x - self.drag.start_x);
		self.transform.pan_y = self.drag.pan_start_y + (y - self.drag.start_y);
		self.needs_redraw = true;
	}

	pub fn pointer_up(&mut self) {
		self.drag.active = false;
	}

	/// Positive `delta_y` (scrolling toward the user) zooms out.
	pub fn wheel(&mut self, delta_y: f64) {
		if delta_y > 0.0 {
			self.zoom_by(WHEEL_ZOOM_OUT);
		} else if delta_y < 0.0 {
			self.zoom_by(WHEEL_ZOOM_IN);
		}
	}

	pub fn zoom_by(&mut self, factor: f64) {
		if !self.interactive() {
			return;
		}
		self.transform.zoom = (self.transform.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		self.needs_redraw = true;
	}

	/// Back to the initial view and no selection. Positions are untouched.
	pub fn reset(&mut self) {
		if !self.interactive() {
			return;
		}
		self.transform = ViewTransform::default();
		self.interaction.selected = None;
		self.needs_redraw = true;
	}

	pub fn clear_selection(&mut self) {
		if !self.interactive() {
			return;
		}
		self.interaction.selected = None;
		self.needs_redraw = true;
	}

	pub fn is_hovered(&self, id: &str) -> bool {
		self.interaction.hovered.as_deref() == Some(id)
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.interaction.selected.as_deref() == Some(id)
	}

	pub fn selected_node(&self) -> Option<&GraphNode> {
		self.interaction
			.selected
			.as_deref()
			.and_then(|id| self.data.node(id))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::{GraphEdge, NodeRole};

	const W: f64 = 800.0;
	const H: f64 = 500.0;

	fn scenario() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("A", "Ann Lee").with_role(NodeRole::Focal),
				GraphNode::new("B", "Bo Park").with_role(NodeRole::Connected),
				GraphNode::new("C", "Cy Diaz").with_role(NodeRole::Connected),
			],
			edges: vec![
				GraphEdge::new("e1", "A", "B", "knows"),
				GraphEdge::new("e2", "B", "C", "referred_by"),
			],
		}
	}

	impl NetworkGraphState {
		fn simulation_to_surface(&self, p: Point) -> (f64, f64) {
			let t = &self.transform;
			(
				p.x * t.zoom + self.width / 2.0 + t.pan_x,
				p.y * t.zoom + self.height / 2.0 + t.pan_y,
			)
		}
	}

	fn state() -> NetworkGraphState {
		NetworkGraphState::new(scenario(), GraphOptions::default(), W, H)
	}

	fn read_only() -> NetworkGraphState {
		let options = GraphOptions {
			interactive: false,
			..GraphOptions::default()
		};
		NetworkGraphState::new(scenario(), options, W, H)
	}

	#[test]
	fn scenario_layout_and_hover() {
		let mut s = state();
		assert_eq!(s.positions["A"], Point::ORIGIN);
		let (b, c) = (s.positions["B"], s.positions["C"]);
		assert!((b.x - 150.0).abs() < 1e-9 && b.y.abs() < 1e-9);
		assert!((c.x + 150.0).abs() < 1e-9 && c.y.abs() < 1e-9);

		let (bx, by) = s.simulation_to_surface(b);
		s.pointer_move(bx, by);
		assert_eq!(s.interaction.hovered.as_deref(), Some("B"));
	}

	#[test]
	fn hit_test_through_zoom_and_pan() {
		let mut s = state();
		s.transform = ViewTransform {
			zoom: 2.0,
			pan_x: 37.0,
			pan_y: -12.5,
		};
		for id in ["A", "B", "C"] {
			let (x, y) = s.simulation_to_surface(s.positions[id]);
			assert_eq!(s.node_at(x, y).map(|n| n.id.as_str()), Some(id));
		}

		// B has radius 25; 26 units right of it is empty space.
		let (x, y) = s.simulation_to_surface(Point::new(176.0, 0.0));
		assert!(s.node_at(x, y).is_none());
		// The edge of the circle still counts.
		let (x, y) = s.simulation_to_surface(Point::new(175.0, 0.0));
		assert_eq!(s.node_at(x, y).map(|n| n.id.as_str()), Some("B"));
	}

	#[test]
	fn hit_test_prefers_first_node_in_list() {
		let data = GraphData {
			nodes: vec![
				GraphNode::new("x", "X").with_role(NodeRole::Focal),
				GraphNode::new("y", "Y").with_role(NodeRole::Connected),
			],
			edges: vec![],
		};
		let mut options = GraphOptions::default();
		options.layout.ring_radius = 10.0;
		let s = NetworkGraphState::new(data, options, W, H);
		let (x, y) = s.simulation_to_surface(Point::new(5.0, 0.0));
		assert_eq!(s.node_at(x, y).map(|n| n.id.as_str()), Some("x"));
	}

	#[test]
	fn click_selects_and_miss_clears() {
		let mut s = state();
		let (x, y) = s.simulation_to_surface(s.positions["C"]);
		s.click(x, y);
		assert_eq!(s.selected_node().map(|n| n.name.as_str()), Some("Cy Diaz"));

		let (x, y) = s.simulation_to_surface(s.positions["B"]);
		s.click(x, y);
		assert!(s.is_selected("B") && !s.is_selected("C"));

		s.click(0.0, 0.0);
		assert_eq!(s.interaction.selected, None);
	}

	#[test]
	fn zoom_saturates_at_bounds() {
		let mut s = state();
		for _ in 0..50 {
			s.wheel(-1.0);
			assert!(s.transform.zoom <= MAX_ZOOM);
		}
		assert_eq!(s.transform.zoom, MAX_ZOOM);
		for _ in 0..50 {
			s.wheel(120.0);
			assert!(s.transform.zoom >= MIN_ZOOM);
		}
		assert_eq!(s.transform.zoom, MIN_ZOOM);

		s.wheel(0.0);
		assert_eq!(s.transform.zoom, MIN_ZOOM);
		s.zoom_by(BUTTON_ZOOM_IN);
		assert!((s.transform.zoom - 0.6).abs() < 1e-12);
	}

	#[test]
	fn drag_pans_by_cumulative_delta() {
		let mut s = state();
		assert!(s.pointer_down(100.0, 100.0));
		s.drag_to(110.0, 95.0);
		s.drag_to(130.0, 80.0);
		assert_eq!((s.transform.pan_x, s.transform.pan_y), (30.0, -20.0));
		s.pointer_up();

		s.drag_to(500.0, 500.0);
		assert_eq!((s.transform.pan_x, s.transform.pan_y), (30.0, -20.0));

		s.pointer_down(0.0, 0.0);
		s.drag_to(-10.0, 10.0);
		assert_eq!((s.transform.pan_x, s.transform.pan_y), (20.0, -10.0));
	}

	#[test]
	fn reset_restores_view_but_not_layout() {
		let mut s = state();
		let before = s.positions.clone();
		s.pointer_down(0.0, 0.0);
		s.drag_to(40.0, 40.0);
		s.pointer_up();
		s.wheel(-1.0);
		let (x, y) = s.simulation_to_surface(s.positions["B"]);
		s.click(x, y);
		assert!(s.interaction.selected.is_some());

		s.reset();
		assert_eq!(s.transform, ViewTransform::default());
		assert_eq!(s.interaction.selected, None);
		assert_eq!(s.positions, before);
	}

	#[test]
	fn read_only_ignores_every_handler() {
		let mut s = read_only();
		let (x, y) = s.simulation_to_surface(s.positions["B"]);
		s.pointer_move(x, y);
		s.click(x, y);
		assert!(!s.pointer_down(0.0, 0.0));
		s.drag_to(50.0, 50.0);
		s.wheel(-1.0);
		s.zoom_by(BUTTON_ZOOM_IN);

		assert_eq!(s.interaction, InteractionState::default());
		assert_eq!(s.transform, ViewTransform::default());
	}

	#[test]
	fn new_data_clears_hover_and_selection() {
		let mut s = state();
		let (x, y) = s.simulation_to_surface(s.positions["B"]);
		s.pointer_move(x, y);
		s.click(x, y);
		s.wheel(-1.0);
		let zoom = s.transform.zoom;

		let mut data = scenario();
		data.nodes.truncate(2);
		s.set_data(data, None);
		assert_eq!(s.interaction, InteractionState::default());
		assert_eq!(s.transform.zoom, zoom);
		assert_eq!(s.positions.len(), 2);
	}

	#[test]
	fn global_data_switches_to_force_layout() {
		let mut s = state();
		let data = GraphData {
			nodes: vec![GraphNode::new("p", "P Q"), GraphNode::new("q", "Q R")],
			edges: vec![GraphEdge::new("e", "p", "q", "friend")],
		};
		s.set_data(data, None);
		assert_eq!(s.strategy, LayoutStrategy::ForceDirected);
		assert_eq!(s.style, GraphStyle::network());
		assert!(s.positions.contains_key("p") && s.positions.contains_key("q"));
	}

	#[test]
	fn explicit_focal_keeps_focal_look_without_nodes() {
		let mut s = state();
		s.set_data(GraphData::default(), Some("A".into()));
		assert!(s.strategy.is_focal());
		assert_eq!(s.style, GraphStyle::focal());

		s.set_data(scenario(), Some("B".into()));
		assert_eq!(s.positions["B"], Point::ORIGIN);
		assert!(s.is_focal("B") && !s.is_focal("A"));
	}

	#[test]
	fn duplicate_ids_are_hit_once() {
		let mut data = scenario();
		data.nodes.push(GraphNode::new("B", "Second Bo"));
		let s = NetworkGraphState::new(data, GraphOptions::default(), W, H);
		assert_eq!(s.nodes().map(|n| n.id.as_str()).collect::<Vec<_>>(), ["A", "B", "C"]);

		let (x, y) = s.simulation_to_surface(s.positions["B"]);
		assert_eq!(s.node_at(x, y).map(|n| n.name.as_str()), Some("Bo Park"));
	}

	#[test]
	fn only_the_layout_focal_gets_the_focal_radius() {
		let mut data = scenario();
		data.nodes[2].role = Some(NodeRole::Focal);
		let s = NetworkGraphState::new(data, GraphOptions::default(), W, H);
		assert!(s.is_focal("A") && !s.is_focal("C"));

		let c = s.positions["C"];
		let (x, y) = s.simulation_to_surface(Point::new(c.x - 30.0, c.y));
		assert!(s.node_at(x, y).is_none());
	}
}
