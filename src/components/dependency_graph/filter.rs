use std::collections::HashSet;

use crate::api::{Dependency, InteractionMode, Squad, SquadId};

use super::types::{GraphData, GraphLink, GraphNode};

/// Everything loaded from the directory for one mount.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	pub dependencies: Vec<Dependency>,
	pub squads: Vec<Squad>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeFilter {
	#[default]
	All,
	Only(InteractionMode),
}

impl ModeFilter {
	/// Value used by the `<select>` control.
	pub fn as_value(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Only(mode) => mode.as_str(),
		}
	}

	pub fn from_value(value: &str) -> Self {
		InteractionMode::parse(value).map_or(Self::All, Self::Only)
	}

	pub fn options() -> impl Iterator<Item = (Self, &'static str)> {
		std::iter::once((Self::All, "All interaction modes")).chain(
			InteractionMode::ALL
				.into_iter()
				.map(|mode| (Self::Only(mode), mode.label())),
		)
	}

	fn admits(self, dependency: &Dependency) -> bool {
		match self {
			Self::All => true,
			Self::Only(mode) => dependency.interaction_mode.as_deref() == Some(mode.as_str()),
		}
	}
}

/// Build the nodes and links to lay out for the current filters.
///
/// With a search term the node set is exactly the matching squads, whether or
/// not they have dependencies. Without one, only squads taking part in a
/// filtered dependency are shown.
pub fn filter_graph(dataset: &Dataset, mode: ModeFilter, search: &str) -> GraphData {
	let dependencies: Vec<&Dependency> = dataset
		.dependencies
		.iter()
		.filter(|dep| mode.admits(dep))
		.collect();

	let relevant: Vec<&Squad> = if search.is_empty() {
		let endpoints: HashSet<SquadId> = dependencies
			.iter()
			.flat_map(|dep| [dep.dependent_squad_id, dep.dependency_squad_id])
			.collect();
		dataset
			.squads
			.iter()
			.filter(|squad| endpoints.contains(&squad.id))
			.collect()
	} else {
		let needle = search.to_lowercase();
		dataset
			.squads
			.iter()
			.filter(|squad| squad.name.to_lowercase().contains(&needle))
			.collect()
	};

	let present: HashSet<SquadId> = relevant.iter().map(|squad| squad.id).collect();
	let nodes = relevant
		.into_iter()
		.map(|squad| GraphNode {
			id: squad.id,
			name: squad.name.clone(),
			group: squad.tribe_id,
		})
		.collect();

	let links = dependencies
		.into_iter()
		.filter(|dep| dep.dependent_squad_id != dep.dependency_squad_id)
		.filter(|dep| {
			present.contains(&dep.dependent_squad_id) && present.contains(&dep.dependency_squad_id)
		})
		.map(|dep| GraphLink {
			source: dep.dependent_squad_id,
			target: dep.dependency_squad_id,
			kind: dep.dependency_type.clone(),
			interaction: dep.interaction_mode.clone(),
		})
		.collect();

	GraphData { nodes, links }
}
