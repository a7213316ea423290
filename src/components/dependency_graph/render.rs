use std::collections::HashSet;

use leptos::prelude::*;

use crate::api::{InteractionMode, SquadId};

use super::state::NODE_RADIUS;
use super::style::{EdgeStyle, group_color, node_label};
use super::types::Degree;

/// One arrowhead definition per interaction mode, referenced by `marker-end`.
#[component]
pub fn ArrowMarkers() -> impl IntoView {
	view! {
		<defs>
			{InteractionMode::ALL
				.into_iter()
				.map(|mode| {
					let style = EdgeStyle::for_mode(mode);
					view! {
						<marker
							id=style.marker_id
							viewBox="0 -5 10 10"
							refX="10"
							refY="0"
							markerWidth="6"
							markerHeight="6"
							orient="auto"
						>
							<path d="M0,-5L10,0L0,5" fill=style.color />
						</marker>
					}
				})
				.collect_view()}
		</defs>
	}
}

/// Static key for the three line styles, shown whether or not such edges
/// are currently visible.
#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<div style="display: flex; flex-wrap: wrap; gap: 16px; margin-top: 8px; font-size: 13px; color: #4a5568;">
			{InteractionMode::ALL
				.into_iter()
				.map(|mode| {
					let style = EdgeStyle::for_mode(mode);
					view! {
						<div style="display: flex; align-items: center; gap: 6px;">
							<svg width="36" height="10" viewBox="0 0 36 10">
								<line
									x1="0"
									y1="5"
									x2="36"
									y2="5"
									stroke=style.color
									stroke-width="2"
									stroke-dasharray=style.dash_attr()
								/>
							</svg>
							<span>{mode.label()}</span>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Circle and short label for one squad. The full name rides along as the
/// native SVG `<title>` tooltip.
#[component]
pub fn NodeGlyph(name: String, group: Option<i64>) -> impl IntoView {
	let label = node_label(&name);
	view! {
		<circle r=NODE_RADIUS.to_string() fill=group_color(group) stroke="#fff" stroke-width="1.5">
			<title>{name}</title>
		</circle>
		<text
			text-anchor="middle"
			dy="0.35em"
			fill="white"
			font-size="11"
			font-weight="bold"
			pointer-events="none"
		>
			{label}
		</text>
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoverCard {
	pub id: SquadId,
	pub name: String,
	pub degree: Degree,
	/// Squads sharing a visible edge with this one.
	pub neighbors: HashSet<SquadId>,
	/// Page coordinates of the pointer when the hover started.
	pub x: f64,
	pub y: f64,
}

impl HoverCard {
	/// Whether `id` stays at full strength while this card is shown.
	pub fn highlights(&self, id: SquadId) -> bool {
		id == self.id || self.neighbors.contains(&id)
	}
}

#[component]
pub fn NodeTooltip(card: HoverCard) -> impl IntoView {
	view! {
		<div style=format!(
			"position: absolute; left: {}px; top: {}px; padding: 8px 10px; background: rgba(26, 32, 44, 0.92); color: white; border-radius: 6px; font-size: 12px; pointer-events: none; z-index: 10;",
			card.x + 12.0,
			card.y + 12.0,
		)>
			<div style="font-weight: bold; margin-bottom: 4px;">{card.name}</div>
			<div>{format!("Incoming: {}", card.degree.incoming)}</div>
			<div>{format!("Outgoing: {}", card.degree.outgoing)}</div>
		</div>
	}
}
