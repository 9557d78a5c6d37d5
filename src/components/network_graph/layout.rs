use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{GraphData, GraphNode};

/// Radius of the ring connected nodes sit on around the focal node.
pub const FOCAL_RING_RADIUS: f64 = 150.0;
pub const SIMULATION_STEPS: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// Simulation-space position of every laid out node, keyed by node id.
pub type PositionMap = HashMap<String, Point>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
	/// Numerator of the inverse-square repulsion between every pair.
	pub repulsion: f64,
	/// Divisor of the squared-distance attraction along edges.
	pub spring_divisor: f64,
	/// Pull toward the origin per unit of distance.
	pub centering: f64,
	pub damping: f64,
	/// Upper bound on the net force applied to one node in one step.
	pub max_force: f64,
	/// Side of the initial placement square per `sqrt(node count)`.
	pub spread: f64,
}

impl Default for ForceParams {
	fn default() -> Self {
		Self {
			repulsion: 100_000.0,
			spring_divisor: 1_000.0,
			centering: 0.01,
			damping: 0.8,
			max_force: 50.0,
			spread: 150.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
	pub ring_radius: f64,
	pub steps: usize,
	/// Seed for the random initial placement of the force simulation.
	pub seed: u64,
	pub forces: ForceParams,
}

impl Default for LayoutOptions {
	fn default() -> Self {
		Self {
			ring_radius: FOCAL_RING_RADIUS,
			steps: SIMULATION_STEPS,
			seed: 0,
			forces: ForceParams::default(),
		}
	}
}

/// How positions are derived for one graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutStrategy {
	/// Focal node at the origin, everything else evenly on a ring.
	FocalRadial { focal_id: String },
	ForceDirected,
}

impl LayoutStrategy {
	/// Radial when the data designates a focal node, force-directed otherwise.
	pub fn for_data(data: &GraphData) -> Self {
		match data.focal() {
			Some(node) => Self::FocalRadial {
				focal_id: node.id.clone(),
			},
			None => Self::ForceDirected,
		}
	}

	/// An explicitly designated focal id wins over role tags in the data, so
	/// a focal view stays focal even before it has any nodes.
	pub fn resolve(data: &GraphData, focal: Option<&str>) -> Self {
		match focal {
			Some(id) => Self::FocalRadial {
				focal_id: id.to_string(),
			},
			None => Self::for_data(data),
		}
	}

	pub fn is_focal(&self) -> bool {
		matches!(self, Self::FocalRadial { .. })
	}

	pub fn focal_id(&self) -> Option<&str> {
		match self {
			Self::FocalRadial { focal_id } => Some(focal_id),
			Self::ForceDirected => None,
		}
	}

	pub fn compute(&self, data: &GraphData, options: &LayoutOptions) -> PositionMap {
		let nodes = unique_nodes(&data.nodes);
		let positions = match self {
			Self::FocalRadial { focal_id } => focal_radial(&nodes, focal_id, options.ring_radius),
			Self::ForceDirected => force_directed(&nodes, data, options),
		};
		debug!(
			"layout {:?}: {} nodes, {} edges",
			self,
			positions.len(),
			data.edges.len()
		);
		positions
	}
}

fn unique_nodes(nodes: &[GraphNode]) -> Vec<&GraphNode> {
	let mut seen = HashSet::with_capacity(nodes.len());
	nodes
		.iter()
		.filter(|node| {
			let fresh = seen.insert(node.id.as_str());
			if !fresh {
				warn!("duplicate node id {:?} dropped from layout", node.id);
			}
			fresh
		})
		.collect()
}

fn focal_radial(nodes: &[&GraphNode], focal_id: &str, radius: f64) -> PositionMap {
	let ring: Vec<_> = nodes.iter().filter(|n| n.id != focal_id).collect();
	let count = ring.len() as f64;

	let mut positions: PositionMap = ring
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let angle = 2.0 * PI * i as f64 / count;
			(
				node.id.clone(),
				Point::new(radius * angle.cos(), radius * angle.sin()),
			)
		})
		.collect();
	if nodes.iter().any(|n| n.id == focal_id) {
		positions.insert(focal_id.to_string(), Point::ORIGIN);
	}
	positions
}

struct Body {
	pos: Point,
	vx: f64,
	vy: f64,
}

fn force_directed(nodes: &[&GraphNode], data: &GraphData, options: &LayoutOptions) -> PositionMap {
	let params = &options.forces;
	let index: HashMap<&str, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();

	// Each edge pulls on both endpoints; parallel edges pull once each.
	let mut neighbors = vec![Vec::new(); nodes.len()];
	let mut skipped = 0;
	for edge in &data.edges {
		match (
			index.get(edge.source.as_str()),
			index.get(edge.target.as_str()),
		) {
			(Some(&src), Some(&tgt)) => {
				neighbors[src].push(tgt);
				neighbors[tgt].push(src);
			}
			_ => skipped += 1,
		}
	}
	if skipped > 0 {
		debug!("{} edges with missing endpoints ignored by layout", skipped);
	}

	let mut rng = SmallRng::seed_from_u64(options.seed);
	let area = (nodes.len() as f64).sqrt() * params.spread;
	let mut bodies: Vec<Body> = nodes
		.iter()
		.map(|_| Body {
			pos: Point::new(
				rng.gen_range(-0.5..0.5) * area,
				rng.gen_range(-0.5..0.5) * area,
			),
			vx: 0.0,
			vy: 0.0,
		})
		.collect();

	for _ in 0..options.steps {
		// Bodies move in place, so later nodes in a step see earlier moves.
		for i in 0..bodies.len() {
			let pos = bodies[i].pos;
			let (mut fx, mut fy) = (0.0, 0.0);

			for (j, other) in bodies.iter().enumerate() {
				if i == j {
					continue;
				}
				let (dx, dy) = (pos.x - other.pos.x, pos.y - other.pos.y);
				let dist = non_zero(dx.hypot(dy));
				let force = params.repulsion / (dist * dist);
				fx += dx / dist * force;
				fy += dy / dist * force;
			}

			for &j in &neighbors[i] {
				let other = bodies[j].pos;
				let (dx, dy) = (other.x - pos.x, other.y - pos.y);
				let dist = non_zero(dx.hypot(dy));
				let force = dist * dist / params.spring_divisor;
				fx += dx / dist * force;
				fy += dy / dist * force;
			}

			fx -= pos.x * params.centering;
			fy -= pos.y * params.centering;

			let magnitude = fx.hypot(fy);
			if magnitude > params.max_force {
				fx *= params.max_force / magnitude;
				fy *= params.max_force / magnitude;
			}

			let body = &mut bodies[i];
			body.vx = (body.vx + fx) * params.damping;
			body.vy = (body.vy + fy) * params.damping;
			body.pos.x += body.vx;
			body.pos.y += body.vy;
		}
	}

	nodes
		.iter()
		.zip(bodies)
		.map(|(node, body)| (node.id.clone(), body.pos))
		.collect()
}

fn non_zero(dist: f64) -> f64 {
	if dist == 0.0 { 1.0 } else { dist }
}
