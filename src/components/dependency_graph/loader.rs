use log::{error, info};

use crate::api::DataService;

use super::filter::Dataset;

pub const LOAD_ERROR: &str = "Failed to load dependency data";
pub const EMPTY_MESSAGE: &str = "No dependencies found in the system";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
	#[default]
	Loading,
	Failed(String),
	Loaded(Dataset),
}

impl LoadState {
	pub fn dataset(&self) -> Option<&Dataset> {
		match self {
			Self::Loaded(dataset) => Some(dataset),
			_ => None,
		}
	}
}

/// Fetch dependencies and squads concurrently. Both must succeed; any failure
/// is logged and turned into [`LoadState::Failed`].
pub async fn load_dataset<S: DataService + ?Sized>(service: &S) -> LoadState {
	match futures::try_join!(service.fetch_dependencies(), service.fetch_squads()) {
		Ok((dependencies, squads)) => {
			info!(
				"loaded {} dependencies across {} squads",
				dependencies.len(),
				squads.len()
			);
			LoadState::Loaded(Dataset {
				dependencies,
				squads,
			})
		}
		Err(err) => {
			error!("{LOAD_ERROR}: {err}");
			LoadState::Failed(LOAD_ERROR.to_string())
		}
	}
}

/// What the view shows for a load state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
	Loading,
	Failed(String),
	/// No dependencies exist at all, whatever the squads.
	Empty,
	Graph,
}

impl Screen {
	pub fn of(state: &LoadState) -> Self {
		match state {
			LoadState::Loading => Self::Loading,
			LoadState::Failed(message) => Self::Failed(message.clone()),
			LoadState::Loaded(dataset) if dataset.dependencies.is_empty() => Self::Empty,
			LoadState::Loaded(_) => Self::Graph,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use async_trait::async_trait;
	use futures::executor::block_on;

	use super::*;
	use crate::api::{ApiError, Dependency, Squad};

	#[derive(Default)]
	struct FakeService {
		dependencies: Vec<Dependency>,
		squads: Vec<Squad>,
		fail_dependencies: bool,
		fail_squads: bool,
		calls: Cell<usize>,
	}

	fn failure(path: &str) -> ApiError {
		ApiError::Status {
			url: format!("/api/{path}"),
			status: 503,
		}
	}

	#[async_trait(?Send)]
	impl DataService for FakeService {
		async fn fetch_dependencies(&self) -> Result<Vec<Dependency>, ApiError> {
			self.calls.set(self.calls.get() + 1);
			if self.fail_dependencies {
				return Err(failure("dependencies"));
			}
			Ok(self.dependencies.clone())
		}

		async fn fetch_squads(&self) -> Result<Vec<Squad>, ApiError> {
			self.calls.set(self.calls.get() + 1);
			if self.fail_squads {
				return Err(failure("squads"));
			}
			Ok(self.squads.clone())
		}
	}

	fn squads() -> Vec<Squad> {
		vec![
			Squad {
				id: 1,
				name: "Checkout".to_string(),
				tribe_id: Some(1),
			},
			Squad {
				id: 2,
				name: "Catalog".to_string(),
				tribe_id: Some(1),
			},
		]
	}

	#[test]
	fn successful_load_keeps_both_collections() {
		let service = FakeService {
			squads: squads(),
			dependencies: vec![Dependency {
				dependent_squad_id: 1,
				dependency_squad_id: 2,
				dependency_type: None,
				interaction_mode: Some("x_as_a_service".to_string()),
			}],
			..FakeService::default()
		};
		let state = block_on(load_dataset(&service));
		let dataset = state.dataset().unwrap();
		assert_eq!(dataset.squads.len(), 2);
		assert_eq!(dataset.dependencies.len(), 1);
		assert_eq!(service.calls.get(), 2);
		assert_eq!(Screen::of(&state), Screen::Graph);
	}

	#[test]
	fn either_failure_fails_the_whole_load() {
		for (fail_dependencies, fail_squads) in [(true, false), (false, true), (true, true)] {
			let service = FakeService {
				squads: squads(),
				fail_dependencies,
				fail_squads,
				..FakeService::default()
			};
			let state = block_on(load_dataset(&service));
			assert_eq!(state, LoadState::Failed(LOAD_ERROR.to_string()));
			assert_eq!(Screen::of(&state), Screen::Failed(LOAD_ERROR.to_string()));
		}
	}

	#[test]
	fn zero_dependencies_shows_empty_screen() {
		let service = FakeService {
			squads: squads(),
			..FakeService::default()
		};
		let state = block_on(load_dataset(&service));
		assert_eq!(Screen::of(&state), Screen::Empty);

		let bare = block_on(load_dataset(&FakeService::default()));
		assert_eq!(Screen::of(&bare), Screen::Empty);
	}

	#[test]
	fn initial_state_is_loading() {
		assert_eq!(Screen::of(&LoadState::default()), Screen::Loading);
		assert!(LoadState::default().dataset().is_none());
	}
}
