use std::fmt;

/// Role tag of a node in the single-contact view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	/// The contact being viewed, pinned at the origin.
	Focal,
	Connected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub name: String,
	pub email: Option<String>,
	pub company: Option<String>,
	/// `None` in the global network view where all nodes are equal.
	pub role: Option<NodeRole>,
}

impl GraphNode {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			email: None,
			company: None,
			role: None,
		}
	}

	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}

	pub fn with_company(mut self, company: impl Into<String>) -> Self {
		self.company = Some(company.into());
		self
	}

	pub fn with_role(mut self, role: NodeRole) -> Self {
		self.role = Some(role);
		self
	}

	pub fn is_focal(&self) -> bool {
		self.role == Some(NodeRole::Focal)
	}

	/// First letter of each name token, optionally capped to `limit` letters.
	pub fn initials(&self, limit: Option<usize>) -> String {
		let letters = self
			.name
			.split_whitespace()
			.filter_map(|part| part.chars().next());
		match limit {
			Some(n) => letters.take(n).collect(),
			None => letters.collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelationshipKind {
	ReferredBy,
	Knows,
	WorksWith,
	Friend,
	/// A kind this build does not know about, kept verbatim.
	Other(String),
}

impl RelationshipKind {
	pub fn parse(raw: &str) -> Self {
		match raw {
			"referred_by" => Self::ReferredBy,
			"knows" => Self::Knows,
			"works_with" => Self::WorksWith,
			"friend" => Self::Friend,
			other => Self::Other(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::ReferredBy => "referred_by",
			Self::Knows => "knows",
			Self::WorksWith => "works_with",
			Self::Friend => "friend",
			Self::Other(raw) => raw,
		}
	}

	/// Short glyph + word drawn at the edge midpoint.
	pub fn label(&self) -> &str {
		match self {
			Self::ReferredBy => "↑ Referred",
			Self::Knows => "→ Knows",
			Self::WorksWith => "↔ Works",
			Self::Friend => "❤ Friend",
			Self::Other(raw) => raw,
		}
	}
}

impl From<&str> for RelationshipKind {
	fn from(raw: &str) -> Self {
		Self::parse(raw)
	}
}

impl fmt::Display for RelationshipKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Directed, typed link between two contacts.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub kind: RelationshipKind,
	pub notes: Option<String>,
}

impl GraphEdge {
	pub fn new(
		id: impl Into<String>,
		source: impl Into<String>,
		target: impl Into<String>,
		kind: impl Into<RelationshipKind>,
	) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			kind: kind.into(),
			notes: None,
		}
	}

	pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
		self.notes = Some(notes.into());
		self
	}

	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// The designated focal node, if any. The first one wins.
	pub fn focal(&self) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.is_focal())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn initials_take_first_letter_of_each_token() {
		let node = GraphNode::new("1", "Ada  King Lovelace");
		assert_eq!(node.initials(None), "AKL");
		assert_eq!(node.initials(Some(2)), "AK");
		assert_eq!(GraphNode::new("2", "").initials(None), "");
	}

	#[test]
	fn unknown_kinds_keep_their_raw_value() {
		let kind = RelationshipKind::from("mentor");
		assert_eq!(kind, RelationshipKind::Other("mentor".into()));
		assert_eq!(kind.label(), "mentor");
		assert_eq!(kind.to_string(), "mentor");
	}

	#[test]
	fn known_kinds_map_to_labels() {
		assert_eq!(RelationshipKind::from("referred_by").label(), "↑ Referred");
		assert_eq!(RelationshipKind::from("knows").label(), "→ Knows");
		assert_eq!(RelationshipKind::from("works_with").label(), "↔ Works");
		assert_eq!(RelationshipKind::from("friend").label(), "❤ Friend");
		assert_eq!(RelationshipKind::WorksWith.as_str(), "works_with");
	}

	#[test]
	fn first_focal_node_wins() {
		let data = GraphData {
			nodes: vec![
				GraphNode::new("a", "A"),
				GraphNode::new("b", "B").with_role(NodeRole::Focal),
				GraphNode::new("c", "C").with_role(NodeRole::Focal),
			],
			edges: vec![],
		};
		assert_eq!(data.focal().map(|n| n.id.as_str()), Some("b"));
	}
}
