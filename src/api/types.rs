use serde::{Deserialize, Serialize};

pub type SquadId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Squad {
	pub id: SquadId,
	pub name: String,
	#[serde(default)]
	pub tribe_id: Option<i64>,
}

/// A directed "dependent depends on dependency" record.
///
/// `interaction_mode` is kept as the raw wire string: filtering compares it
/// verbatim, while rendering goes through [`InteractionMode::from_wire`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
	pub dependent_squad_id: SquadId,
	pub dependency_squad_id: SquadId,
	#[serde(default)]
	pub dependency_type: Option<String>,
	#[serde(default)]
	pub interaction_mode: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
	#[default]
	XAsAService,
	Collaboration,
	Facilitating,
}

impl InteractionMode {
	pub const ALL: [InteractionMode; 3] = [
		InteractionMode::XAsAService,
		InteractionMode::Collaboration,
		InteractionMode::Facilitating,
	];

	/// Lenient parse used for styling: anything unrecognised is x-as-a-service.
	pub fn from_wire(raw: Option<&str>) -> Self {
		match raw {
			Some("collaboration") => Self::Collaboration,
			Some("facilitating") => Self::Facilitating,
			_ => Self::XAsAService,
		}
	}

	/// Strict parse, `None` for unknown values.
	pub fn parse(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|mode| mode.as_str() == raw)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::XAsAService => "x_as_a_service",
			Self::Collaboration => "collaboration",
			Self::Facilitating => "facilitating",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::XAsAService => "X-as-a-Service",
			Self::Collaboration => "Collaboration",
			Self::Facilitating => "Facilitating",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn squad_ignores_unknown_fields() {
		let squad: Squad = serde_json::from_str(
			r#"{"id": 7, "name": "Payments", "tribe_id": 2, "description": "money", "member_count": 5}"#,
		)
		.unwrap();
		assert_eq!(squad.id, 7);
		assert_eq!(squad.name, "Payments");
		assert_eq!(squad.tribe_id, Some(2));
	}

	#[test]
	fn squad_without_tribe_defaults_to_none() {
		let squad: Squad = serde_json::from_str(r#"{"id": 1, "name": "Core"}"#).unwrap();
		assert_eq!(squad.tribe_id, None);
	}

	#[test]
	fn dependency_keeps_raw_interaction_mode() {
		let dep: Dependency = serde_json::from_str(
			r#"{"dependent_squad_id": 1, "dependency_squad_id": 2, "dependency_type": "api", "interaction_mode": "unknown_value"}"#,
		)
		.unwrap();
		assert_eq!(dep.interaction_mode.as_deref(), Some("unknown_value"));
		assert_eq!(dep.dependency_type.as_deref(), Some("api"));
	}

	#[test]
	fn dependency_mode_may_be_null_or_missing() {
		let dep: Dependency = serde_json::from_str(
			r#"{"dependent_squad_id": 1, "dependency_squad_id": 2, "interaction_mode": null}"#,
		)
		.unwrap();
		assert_eq!(dep.interaction_mode, None);
		assert_eq!(dep.dependency_type, None);
	}

	#[test]
	fn unknown_modes_style_as_x_as_a_service() {
		assert_eq!(
			InteractionMode::from_wire(Some("unknown_value")),
			InteractionMode::XAsAService
		);
		assert_eq!(InteractionMode::from_wire(None), InteractionMode::XAsAService);
		assert_eq!(
			InteractionMode::from_wire(Some("facilitating")),
			InteractionMode::Facilitating
		);
	}

	#[test]
	fn strict_parse_rejects_unknown() {
		assert_eq!(
			InteractionMode::parse("collaboration"),
			Some(InteractionMode::Collaboration)
		);
		assert_eq!(InteractionMode::parse("Collaboration"), None);
		assert_eq!(InteractionMode::parse("all"), None);
	}
}
