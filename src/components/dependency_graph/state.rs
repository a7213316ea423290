use std::collections::HashMap;

use log::debug;

use crate::api::SquadId;

use super::drag::DragTable;
use super::simulation::{Point, Simulation, SimulationConfig};
use super::types::GraphData;

pub const NODE_RADIUS: f64 = 20.0;

/// Pointer travel, in view units, after which a press counts as a drag.
const CLICK_SLOP: f64 = 3.0;

/// Logical drawing area, scaled into the element with `xMidYMid meet`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	pub width: f64,
	pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl ViewBox {
	pub fn from_config(config: &SimulationConfig) -> Self {
		Self {
			width: config.width,
			height: config.height,
		}
	}

	pub fn attr(&self) -> String {
		format!("0 0 {} {}", self.width, self.height)
	}

	/// Map client coordinates into view units, accounting for the letterbox
	/// bands `meet` adds on the slack axis.
	pub fn client_to_view(&self, rect: ClientRect, client_x: f64, client_y: f64) -> Option<Point> {
		if rect.width <= 0.0 || rect.height <= 0.0 {
			return None;
		}
		let scale = (rect.width / self.width).min(rect.height / self.height);
		let offset_x = (rect.width - self.width * scale) / 2.0;
		let offset_y = (rect.height - self.height * scale) / 2.0;
		Some(Point::new(
			(client_x - rect.left - offset_x) / scale,
			(client_y - rect.top - offset_y) / scale,
		))
	}
}

#[derive(Clone, Copy, Debug)]
struct Grab {
	id: SquadId,
	origin: Point,
	moved: bool,
}

/// One laid-out graph: the filtered data, its simulation and pointer state.
///
/// Built from scratch for every filter change and dropped with it.
pub struct GraphViewState {
	pub graph: GraphData,
	simulation: Simulation,
	drag: DragTable,
	ids: Vec<SquadId>,
	index: HashMap<SquadId, usize>,
	grab: Option<Grab>,
	suppress_click: bool,
	stopped: bool,
}

impl GraphViewState {
	pub fn new(graph: GraphData, config: SimulationConfig) -> Self {
		let simulation = Simulation::new(graph.nodes.len(), &graph.link_indices(), config);
		debug!(
			"layout restarted with {} squads and {} dependencies",
			graph.nodes.len(),
			graph.links.len()
		);
		Self {
			ids: graph.nodes.iter().map(|node| node.id).collect(),
			index: graph.index_of(),
			graph,
			simulation,
			drag: DragTable::default(),
			grab: None,
			suppress_click: false,
			stopped: false,
		}
	}

	/// Run one tick and return the positions to draw, or `None` when the
	/// layout is empty, at rest or stopped.
	pub fn advance(&mut self) -> Option<Vec<Point>> {
		if self.stopped || self.graph.is_empty() || self.simulation.is_settled() {
			return None;
		}

		let (drag, ids) = (&self.drag, &self.ids);
		self.simulation.tick(|index| drag.pin(ids[index]));
		if self.simulation.is_settled() {
			debug!("layout settled after {} ticks", self.simulation.ticks());
		}
		Some(self.positions())
	}

	/// Node positions in node order with drag pins applied.
	pub fn positions(&self) -> Vec<Point> {
		self.simulation
			.positions()
			.zip(&self.ids)
			.map(|(simulated, &id)| self.drag.resolve(id, simulated))
			.collect()
	}

	pub fn position_of(&self, id: SquadId) -> Option<Point> {
		let simulated = self.simulation.position(*self.index.get(&id)?)?;
		Some(self.drag.resolve(id, simulated))
	}

	/// Pin `id` where it currently is and heat the layout so neighbours follow.
	pub fn begin_drag(&mut self, id: SquadId, pointer: Point) -> bool {
		self.suppress_click = false;
		if self.stopped {
			return false;
		}
		let Some(current) = self.position_of(id) else {
			return false;
		};
		if let Some(previous) = self.grab.take() {
			self.drag.release(previous.id);
		}

		self.drag.start(id, current);
		self.grab = Some(Grab {
			id,
			origin: pointer,
			moved: false,
		});
		let heat = self.simulation.config().drag_alpha_target;
		self.simulation.set_alpha_target(heat);
		true
	}

	pub fn drag_to(&mut self, pointer: Point) -> bool {
		let Some(grab) = self.grab.as_mut() else {
			return false;
		};
		if grab.origin.distance(pointer) > CLICK_SLOP {
			grab.moved = true;
		}
		self.drag.move_to(grab.id, pointer)
	}

	pub fn end_drag(&mut self) -> bool {
		let Some(grab) = self.grab.take() else {
			return false;
		};
		self.drag.release(grab.id);
		self.suppress_click = grab.moved;
		self.simulation.set_alpha_target(0.0);
		true
	}

	#[cfg(test)]
	pub fn dragged(&self) -> Option<SquadId> {
		self.grab.map(|grab| grab.id)
	}

	/// Whether a click that just landed should navigate; a click ending a
	/// drag that moved does not.
	pub fn take_click(&mut self) -> bool {
		!std::mem::take(&mut self.suppress_click)
	}

	pub fn stop(&mut self) {
		if let Some(grab) = self.grab.take() {
			self.drag.release(grab.id);
		}
		self.stopped = true;
	}

	#[cfg(test)]
	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	pub fn ticks(&self) -> u64 {
		self.simulation.ticks()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::dependency_graph::types::{GraphLink, GraphNode};

	fn chain() -> GraphData {
		let node = |id: SquadId| GraphNode {
			id,
			name: format!("Squad {id}"),
			group: Some(1),
		};
		let link = |source: SquadId, target: SquadId| GraphLink {
			source,
			target,
			kind: None,
			interaction: Some("collaboration".to_string()),
		};
		GraphData {
			nodes: vec![node(10), node(20), node(30)],
			links: vec![link(10, 20), link(20, 30)],
		}
	}

	fn state() -> GraphViewState {
		GraphViewState::new(chain(), SimulationConfig::default())
	}

	#[test]
	fn dragged_node_follows_pointer_every_tick() {
		let mut view = state();
		for _ in 0..10 {
			view.advance();
		}
		let start = view.position_of(10).unwrap();
		assert!(view.begin_drag(10, start));
		assert_eq!(view.dragged(), Some(10));

		for step in 0..5 {
			let pointer = Point::new(100.0 + step as f64 * 15.0, 90.0);
			assert!(view.drag_to(pointer));
			let positions = view.advance().unwrap();
			assert_eq!(positions[0], pointer);
			assert_eq!(view.position_of(10), Some(pointer));
		}
	}

	#[test]
	fn released_node_moves_under_forces() {
		let mut view = state();
		let start = view.position_of(10).unwrap();
		view.begin_drag(10, start);
		let pointer = Point::new(60.0, 60.0);
		view.drag_to(pointer);
		view.advance();
		assert_eq!(view.position_of(10), Some(pointer));

		assert!(view.end_drag());
		assert_eq!(view.dragged(), None);
		let positions = view.advance().unwrap();
		assert_ne!(positions[0], pointer);
	}

	#[test]
	fn dragging_reheats_a_settled_layout() {
		let mut view = state();
		while view.advance().is_some() {}
		let settled_at = view.ticks();
		assert!(view.advance().is_none());

		let at = view.position_of(20).unwrap();
		view.begin_drag(20, at);
		assert!(view.advance().is_some());
		assert_eq!(view.ticks(), settled_at + 1);
	}

	#[test]
	fn empty_layout_idles_on_the_first_frame() {
		let mut view = GraphViewState::new(GraphData::default(), SimulationConfig::default());
		assert!(view.advance().is_none());
		assert_eq!(view.ticks(), 0);
		assert!(view.positions().is_empty());
	}

	#[test]
	fn stopped_layout_never_ticks_again() {
		let mut view = state();
		view.advance();
		let ticks = view.ticks();
		view.stop();
		assert!(view.is_stopped());
		for _ in 0..5 {
			assert!(view.advance().is_none());
		}
		assert_eq!(view.ticks(), ticks);
		assert!(!view.begin_drag(10, Point::default()));
	}

	#[test]
	fn click_after_real_drag_is_swallowed() {
		let mut view = state();
		let at = view.position_of(30).unwrap();
		view.begin_drag(30, at);
		view.drag_to(Point::new(at.x + 40.0, at.y));
		view.end_drag();
		assert!(!view.take_click());
		// The flag is consumed by the click it was meant for.
		assert!(view.take_click());
	}

	#[test]
	fn click_without_movement_navigates() {
		let mut view = state();
		let at = view.position_of(30).unwrap();
		view.begin_drag(30, at);
		view.drag_to(Point::new(at.x + 1.0, at.y));
		view.end_drag();
		assert!(view.take_click());
	}

	#[test]
	fn unknown_node_cannot_be_dragged() {
		let mut view = state();
		assert!(!view.begin_drag(99, Point::default()));
		assert!(!view.drag_to(Point::default()));
		assert!(!view.end_drag());
	}

	#[test]
	fn client_points_map_into_view_units() {
		let view_box = ViewBox {
			width: 800.0,
			height: 600.0,
		};
		// Same aspect ratio, half size.
		let rect = ClientRect {
			left: 10.0,
			top: 20.0,
			width: 400.0,
			height: 300.0,
		};
		assert_eq!(
			view_box.client_to_view(rect, 210.0, 170.0),
			Some(Point::new(400.0, 300.0))
		);

		// Wider element: horizontal letterbox of 100px each side.
		let wide = ClientRect {
			left: 0.0,
			top: 0.0,
			width: 1000.0,
			height: 600.0,
		};
		assert_eq!(view_box.client_to_view(wide, 100.0, 0.0), Some(Point::new(0.0, 0.0)));
		assert_eq!(
			view_box.client_to_view(wide, 900.0, 600.0),
			Some(Point::new(800.0, 600.0))
		);

		let collapsed = ClientRect {
			width: 0.0,
			..rect
		};
		assert_eq!(view_box.client_to_view(collapsed, 1.0, 1.0), None);
	}

	#[test]
	fn view_box_attribute() {
		let view_box = ViewBox::from_config(&SimulationConfig::default());
		assert_eq!(view_box.attr(), "0 0 800 600");
	}
}
