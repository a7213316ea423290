use std::collections::{HashMap, HashSet};

use crate::api::SquadId;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: SquadId,
	pub name: String,
	pub group: Option<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: SquadId,
	pub target: SquadId,
	pub kind: Option<String>,
	pub interaction: Option<String>,
}

impl GraphLink {
	pub fn touches(&self, id: SquadId) -> bool {
		self.source == id || self.target == id
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Degree {
	pub incoming: usize,
	pub outgoing: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: SquadId) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Incoming counts links targeting `id`, outgoing counts links leaving it.
	pub fn degree(&self, id: SquadId) -> Degree {
		self.links.iter().fold(Degree::default(), |mut degree, link| {
			if link.target == id {
				degree.incoming += 1;
			}
			if link.source == id {
				degree.outgoing += 1;
			}
			degree
		})
	}

	pub fn neighbors(&self, id: SquadId) -> HashSet<SquadId> {
		let mut neighbors = HashSet::new();
		for link in &self.links {
			if link.source == id {
				neighbors.insert(link.target);
			} else if link.target == id {
				neighbors.insert(link.source);
			}
		}
		neighbors
	}

	pub fn index_of(&self) -> HashMap<SquadId, usize> {
		self.nodes
			.iter()
			.enumerate()
			.map(|(idx, node)| (node.id, idx))
			.collect()
	}

	/// Links as `(source, target)` node positions, skipping unresolved ends.
	pub fn link_indices(&self) -> Vec<(usize, usize)> {
		let index = self.index_of();
		self.links
			.iter()
			.filter_map(|link| Some((*index.get(&link.source)?, *index.get(&link.target)?)))
			.collect()
	}
}
