use crate::api::InteractionMode;

use super::simulation::Point;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

const UNGROUPED_COLOR: &str = "#a0aec0";

/// Fill for a tribe. Keyed on the id itself so a tribe keeps its colour
/// across reloads and filter changes.
pub fn group_color(group: Option<i64>) -> &'static str {
	match group {
		Some(group) => COLORS[group.rem_euclid(COLORS.len() as i64) as usize],
		None => UNGROUPED_COLOR,
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeStyle {
	pub color: &'static str,
	pub dash: Option<&'static str>,
	pub marker_id: &'static str,
}

impl EdgeStyle {
	pub fn for_mode(mode: InteractionMode) -> Self {
		match mode {
			InteractionMode::XAsAService => Self {
				color: "#3182CE",
				dash: None,
				marker_id: "arrow-x_as_a_service",
			},
			InteractionMode::Collaboration => Self {
				color: "#9C5FFF",
				dash: Some("3,3"),
				marker_id: "arrow-collaboration",
			},
			InteractionMode::Facilitating => Self {
				color: "#48BB78",
				dash: Some("6,3"),
				marker_id: "arrow-facilitating",
			},
		}
	}

	/// Style for a raw interaction value; unknown values look like
	/// x-as-a-service.
	pub fn for_raw(raw: Option<&str>) -> Self {
		Self::for_mode(InteractionMode::from_wire(raw))
	}

	pub fn marker_url(&self) -> String {
		format!("url(#{})", self.marker_id)
	}

	pub fn dash_attr(&self) -> &'static str {
		self.dash.unwrap_or("none")
	}
}

/// First three characters of the squad name, drawn inside the circle.
pub fn node_label(name: &str) -> String {
	name.chars().take(3).collect()
}

/// Segment from the source circle's rim to the target circle's rim, so the
/// arrowhead tip touches the target. Overlapping circles fall back to the
/// centre-to-centre segment; coincident ones have no direction at all.
pub fn edge_endpoints(source: Point, target: Point, radius: f64) -> Option<(Point, Point)> {
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	if dist <= radius * 2.0 {
		return Some((source, target));
	}
	let (ux, uy) = (dx / dist, dy / dist);
	Some((
		Point::new(source.x + ux * radius, source.y + uy * radius),
		Point::new(target.x - ux * radius, target.y - uy * radius),
	))
}
