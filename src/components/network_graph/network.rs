//! Derived views over a full contact network.

use std::collections::HashSet;

use super::types::{GraphData, NodeRole, RelationshipKind};

impl GraphData {
	/// Builds the single-contact view for `contact_id`.
	///
	/// The contact is tagged focal and every contact sharing an edge with it is
	/// tagged connected, in first-seen order. Only edges touching the contact are
	/// kept. An edge whose far end is not in the directory is kept as-is so the
	/// renderer can skip it. Returns `None` when the contact is unknown.
	pub fn neighborhood(&self, contact_id: &str) -> Option<GraphData> {
		let focal = self.node(contact_id)?;

		let mut seen: HashSet<&str> = HashSet::from([contact_id]);
		let mut nodes = vec![focal.clone().with_role(NodeRole::Focal)];
		let mut edges = Vec::new();

		for edge in self.edges.iter().filter(|e| e.touches(contact_id)) {
			for id in [edge.source.as_str(), edge.target.as_str()] {
				if !seen.insert(id) {
					continue;
				}
				if let Some(node) = self.node(id) {
					nodes.push(node.clone().with_role(NodeRole::Connected));
				}
			}
			edges.push(edge.clone());
		}

		Some(GraphData { nodes, edges })
	}
}

/// Relationship counts for one contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkStats {
	/// Distinct contacts this contact points at.
	pub people_they_know: usize,
	/// Distinct contacts pointing at this contact.
	pub people_who_know_them: usize,
	pub referrers: usize,
	pub total_connections: usize,
}

impl NetworkStats {
	pub fn for_contact(data: &GraphData, contact_id: &str) -> Self {
		let mut outgoing = HashSet::new();
		let mut incoming = HashSet::new();
		let mut referrers = 0;

		for edge in &data.edges {
			if edge.source == contact_id {
				outgoing.insert(edge.target.as_str());
			}
			if edge.target == contact_id {
				incoming.insert(edge.source.as_str());
				if edge.kind == RelationshipKind::ReferredBy {
					referrers += 1;
				}
			}
		}

		Self {
			people_they_know: outgoing.len(),
			people_who_know_them: incoming.len(),
			referrers,
			total_connections: outgoing.len() + incoming.len(),
		}
	}
}
