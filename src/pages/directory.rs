use crate::components::network_graph::{GraphData, GraphEdge, GraphNode};

const FIRST_NAMES: &[&str] = &[
	"Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances", "Ken", "Margaret", "Dennis",
	"Radia", "Niklaus", "Hedy", "John", "Katherine", "Tim", "Shafi", "Bjarne",
];
const LAST_NAMES: &[&str] = &[
	"Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Allen", "Thompson", "Hamilton",
	"Ritchie", "Perlman", "Wirth", "Lamarr", "McCarthy", "Johnson", "Berners-Lee", "Goldwasser",
	"Stroustrup",
];
const COMPANIES: &[&str] = &["Acme", "Initech", "Globex", "Umbrella", "Hooli"];
const KINDS: &[&str] = &["knows", "works_with", "referred_by", "friend"];

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Stand-in for the contacts backend: a fixed address book shaped like a
/// random tree, plus a few cross links.
pub fn sample_directory() -> GraphData {
	let n = FIRST_NAMES.len();
	let nodes: Vec<GraphNode> = (0..n)
		.map(|i| {
			let mut node = GraphNode::new(
				format!("c{i}"),
				format!("{} {}", FIRST_NAMES[i], LAST_NAMES[i]),
			)
			.with_email(format!("{}@example.com", FIRST_NAMES[i].to_lowercase()));
			if i % 3 != 2 {
				node = node.with_company(COMPANIES[i % COMPANIES.len()]);
			}
			node
		})
		.collect();

	let mut edges: Vec<GraphEdge> = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			GraphEdge::new(
				format!("r{i}"),
				format!("c{i}"),
				format!("c{target}"),
				KINDS[i % KINDS.len()],
			)
		})
		.collect();
	for (i, (a, b)) in [(2, 9), (4, 13), (7, 16)].into_iter().enumerate() {
		edges.push(
			GraphEdge::new(format!("x{i}"), format!("c{a}"), format!("c{b}"), "works_with")
				.with_notes("Met at a conference"),
		);
	}

	GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_relationship_points_at_a_known_contact() {
		let directory = sample_directory();
		assert_eq!(directory.nodes.len(), FIRST_NAMES.len());
		for edge in &directory.edges {
			assert!(directory.node(&edge.source).is_some(), "{}", edge.id);
			assert!(directory.node(&edge.target).is_some(), "{}", edge.id);
			assert_ne!(edge.source, edge.target);
		}
	}
}
