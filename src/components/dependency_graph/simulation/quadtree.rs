use super::Point;

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;

#[derive(Clone, Copy, Debug)]
pub(super) struct QuadBounds {
	center: Point,
	half_extent: f64,
}

impl QuadBounds {
	fn from_points(points: &[Point]) -> Option<Self> {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for point in points {
			min_x = min_x.min(point.x);
			min_y = min_y.min(point.y);
			max_x = max_x.max(point.x);
			max_y = max_y.max(point.y);
		}

		if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
			return None;
		}

		let span = (max_x - min_x).max(max_y - min_y).max(1.0);
		Some(Self {
			center: Point::new((min_x + max_x) * 0.5, (min_y + max_y) * 0.5),
			half_extent: span * 0.5 + 1.0,
		})
	}

	pub(super) fn contains(self, point: Point) -> bool {
		(point.x - self.center.x).abs() <= self.half_extent
			&& (point.y - self.center.y).abs() <= self.half_extent
	}

	pub(super) fn side_length(self) -> f64 {
		self.half_extent * 2.0
	}

	fn child(self, quadrant: usize) -> Self {
		let quarter = self.half_extent * 0.5;
		let (dx, dy) = match quadrant {
			0 => (-quarter, -quarter),
			1 => (quarter, -quarter),
			2 => (-quarter, quarter),
			_ => (quarter, quarter),
		};
		Self {
			center: Point::new(self.center.x + dx, self.center.y + dy),
			half_extent: quarter,
		}
	}

	fn quadrant_for(self, point: Point) -> usize {
		match (point.x >= self.center.x, point.y >= self.center.y) {
			(false, false) => 0,
			(true, false) => 1,
			(false, true) => 2,
			(true, true) => 3,
		}
	}
}

/// Region of the plane with the bodies it holds and their centre of mass.
pub(super) struct QuadNode {
	pub(super) bounds: QuadBounds,
	pub(super) center_of_mass: Point,
	pub(super) count: usize,
	pub(super) indices: Vec<usize>,
	pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
	pub(super) fn build(positions: &[Point]) -> Option<Self> {
		let bounds = QuadBounds::from_points(positions)?;
		let indices = (0..positions.len()).collect();
		Some(Self::build_node(bounds, indices, positions, 0))
	}

	fn build_node(bounds: QuadBounds, indices: Vec<usize>, positions: &[Point], depth: usize) -> Self {
		let count = indices.len();
		let (sum_x, sum_y) = indices.iter().fold((0.0, 0.0), |(sx, sy), &index| {
			(sx + positions[index].x, sy + positions[index].y)
		});
		let center_of_mass = if count > 0 {
			Point::new(sum_x / count as f64, sum_y / count as f64)
		} else {
			bounds.center
		};

		let mut node = Self {
			bounds,
			center_of_mass,
			count,
			indices,
			children: std::array::from_fn(|_| None),
		};

		if depth >= MAX_DEPTH || node.indices.len() <= LEAF_CAPACITY {
			return node;
		}

		let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
		for &index in &node.indices {
			buckets[bounds.quadrant_for(positions[index])].push(index);
		}

		// Coincident points never separate; keep them in one leaf.
		if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
			return node;
		}

		for (quadrant, bucket) in buckets.into_iter().enumerate() {
			if bucket.is_empty() {
				continue;
			}
			node.children[quadrant] = Some(Box::new(Self::build_node(
				bounds.child(quadrant),
				bucket,
				positions,
				depth + 1,
			)));
		}
		node.indices.clear();
		node
	}

	pub(super) fn is_leaf(&self) -> bool {
		self.children.iter().all(Option::is_none)
	}
}
