use std::collections::HashMap;

use crate::api::SquadId;

use super::simulation::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	#[default]
	Free,
	Dragging { target_x: f64, target_y: f64 },
}

/// Pins for nodes currently held by the pointer, keyed by squad.
///
/// Free nodes have no entry. Pins are applied when positions are read and
/// when the simulation integrates, never written into the node records.
#[derive(Clone, Debug, Default)]
pub struct DragTable {
	pins: HashMap<SquadId, DragState>,
}

impl DragTable {
	pub fn state(&self, id: SquadId) -> DragState {
		self.pins.get(&id).copied().unwrap_or_default()
	}

	pub fn start(&mut self, id: SquadId, at: Point) {
		self.pins.insert(
			id,
			DragState::Dragging {
				target_x: at.x,
				target_y: at.y,
			},
		);
	}

	/// Move an existing pin; free nodes are left alone.
	pub fn move_to(&mut self, id: SquadId, at: Point) -> bool {
		match self.pins.get_mut(&id) {
			Some(DragState::Dragging { target_x, target_y }) => {
				*target_x = at.x;
				*target_y = at.y;
				true
			}
			_ => false,
		}
	}

	pub fn release(&mut self, id: SquadId) -> bool {
		self.pins.remove(&id).is_some()
	}

	pub fn pin(&self, id: SquadId) -> Option<Point> {
		match self.state(id) {
			DragState::Dragging { target_x, target_y } => Some(Point::new(target_x, target_y)),
			DragState::Free => None,
		}
	}

	pub fn resolve(&self, id: SquadId, simulated: Point) -> Point {
		self.pin(id).unwrap_or(simulated)
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.pins.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nodes_start_free() {
		let table = DragTable::default();
		assert_eq!(table.state(1), DragState::Free);
		assert_eq!(table.pin(1), None);
		assert!(table.is_empty());
	}

	#[test]
	fn drag_lifecycle() {
		let mut table = DragTable::default();
		table.start(3, Point::new(10.0, 20.0));
		assert_eq!(
			table.state(3),
			DragState::Dragging {
				target_x: 10.0,
				target_y: 20.0
			}
		);

		assert!(table.move_to(3, Point::new(50.0, 60.0)));
		assert_eq!(table.pin(3), Some(Point::new(50.0, 60.0)));
		assert_eq!(table.resolve(3, Point::new(0.0, 0.0)), Point::new(50.0, 60.0));

		assert!(table.release(3));
		assert_eq!(table.state(3), DragState::Free);
		assert_eq!(table.resolve(3, Point::new(1.0, 2.0)), Point::new(1.0, 2.0));
		assert!(!table.release(3));
	}

	#[test]
	fn moving_a_free_node_is_ignored() {
		let mut table = DragTable::default();
		assert!(!table.move_to(9, Point::new(1.0, 1.0)));
		assert_eq!(table.state(9), DragState::Free);
	}

	#[test]
	fn pins_are_independent_per_node() {
		let mut table = DragTable::default();
		table.start(1, Point::new(1.0, 1.0));
		table.start(2, Point::new(2.0, 2.0));
		table.release(1);
		assert_eq!(table.state(1), DragState::Free);
		assert_eq!(table.pin(2), Some(Point::new(2.0, 2.0)));
	}
}
