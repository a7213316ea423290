use super::quadtree::QuadNode;
use super::{Body, Point};

/// Deterministic source of tiny offsets for separating coincident bodies.
#[derive(Clone, Debug)]
pub(super) struct Jiggle {
	state: u64,
}

impl Jiggle {
	const MULTIPLIER: u64 = 1_664_525;
	const INCREMENT: u64 = 1_013_904_223;
	const MODULUS: u64 = 1 << 32;

	pub(super) fn new() -> Self {
		Self { state: 1 }
	}

	fn next_unit(&mut self) -> f64 {
		self.state = (Self::MULTIPLIER * self.state + Self::INCREMENT) % Self::MODULUS;
		self.state as f64 / Self::MODULUS as f64
	}

	pub(super) fn nudge(&mut self) -> f64 {
		(self.next_unit() - 0.5) * 1e-6
	}

	fn or_nudge(&mut self, value: f64) -> f64 {
		if value == 0.0 { self.nudge() } else { value }
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Spring {
	pub(super) source: usize,
	pub(super) target: usize,
	pub(super) strength: f64,
	pub(super) bias: f64,
}

/// Springs weighted by endpoint degree: stiffness `1 / min(deg)`, and the
/// better connected end moves less.
pub(super) fn springs(node_count: usize, links: &[(usize, usize)]) -> Vec<Spring> {
	let links: Vec<(usize, usize)> = links
		.iter()
		.copied()
		.filter(|&(source, target)| source != target && source < node_count && target < node_count)
		.collect();

	let mut degree = vec![0usize; node_count];
	for &(source, target) in &links {
		degree[source] += 1;
		degree[target] += 1;
	}

	links
		.into_iter()
		.map(|(source, target)| {
			let (ds, dt) = (degree[source] as f64, degree[target] as f64);
			Spring {
				source,
				target,
				strength: 1.0 / ds.min(dt),
				bias: ds / (ds + dt),
			}
		})
		.collect()
}

pub(super) fn apply_links(
	bodies: &mut [Body],
	springs: &[Spring],
	distance: f64,
	alpha: f64,
	jiggle: &mut Jiggle,
) {
	for spring in springs {
		let (source, target) = (bodies[spring.source], bodies[spring.target]);
		let x = jiggle.or_nudge(target.x + target.vx - source.x - source.vx);
		let y = jiggle.or_nudge(target.y + target.vy - source.y - source.vy);
		let length = (x * x + y * y).sqrt();
		let k = (length - distance) / length * alpha * spring.strength;
		let (x, y) = (x * k, y * k);

		let target = &mut bodies[spring.target];
		target.vx -= x * spring.bias;
		target.vy -= y * spring.bias;
		let source = &mut bodies[spring.source];
		source.vx += x * (1.0 - spring.bias);
		source.vy += y * (1.0 - spring.bias);
	}
}

/// Velocity change on a body at `from` caused by `charge` located at `to`.
fn charge_pull(from: Point, to: Point, charge: f64, alpha: f64, jiggle: &mut Jiggle) -> (f64, f64) {
	let x = jiggle.or_nudge(to.x - from.x);
	let y = jiggle.or_nudge(to.y - from.y);
	let mut l = x * x + y * y;
	if l < 1.0 {
		l = l.sqrt();
	}
	let w = charge * alpha / l;
	(x * w, y * w)
}

pub(super) fn apply_charge_exact(bodies: &mut [Body], strength: f64, alpha: f64, jiggle: &mut Jiggle) {
	let positions: Vec<Point> = bodies.iter().map(Body::position).collect();
	for (i, body) in bodies.iter_mut().enumerate() {
		for (j, &other) in positions.iter().enumerate() {
			if i == j {
				continue;
			}
			let (dvx, dvy) = charge_pull(positions[i], other, strength, alpha, jiggle);
			body.vx += dvx;
			body.vy += dvy;
		}
	}
}

pub(super) fn apply_charge_barnes_hut(
	bodies: &mut [Body],
	strength: f64,
	alpha: f64,
	theta: f64,
	jiggle: &mut Jiggle,
) {
	let positions: Vec<Point> = bodies.iter().map(Body::position).collect();
	let Some(tree) = QuadNode::build(&positions) else {
		return;
	};

	let theta2 = theta * theta;
	for (index, body) in bodies.iter_mut().enumerate() {
		let (dvx, dvy) = accumulate_charge(&tree, index, &positions, strength, alpha, theta2, jiggle);
		body.vx += dvx;
		body.vy += dvy;
	}
}

fn accumulate_charge(
	node: &QuadNode,
	index: usize,
	positions: &[Point],
	strength: f64,
	alpha: f64,
	theta2: f64,
	jiggle: &mut Jiggle,
) -> (f64, f64) {
	if node.count == 0 {
		return (0.0, 0.0);
	}

	let point = positions[index];
	let dx = node.center_of_mass.x - point.x;
	let dy = node.center_of_mass.y - point.y;
	let side = node.bounds.side_length();
	if !node.bounds.contains(point) && side * side / theta2 < dx * dx + dy * dy {
		return charge_pull(
			point,
			node.center_of_mass,
			strength * node.count as f64,
			alpha,
			jiggle,
		);
	}

	if node.is_leaf() {
		return node
			.indices
			.iter()
			.filter(|&&other| other != index)
			.fold((0.0, 0.0), |(vx, vy), &other| {
				let (dvx, dvy) = charge_pull(point, positions[other], strength, alpha, jiggle);
				(vx + dvx, vy + dvy)
			});
	}

	node.children
		.iter()
		.flatten()
		.fold((0.0, 0.0), |(vx, vy), child| {
			let (dvx, dvy) =
				accumulate_charge(child, index, positions, strength, alpha, theta2, jiggle);
			(vx + dvx, vy + dvy)
		})
}

/// Translate every body so the centroid sits on `center`.
pub(super) fn apply_center(bodies: &mut [Body], center: Point, strength: f64) {
	if bodies.is_empty() {
		return;
	}
	let n = bodies.len() as f64;
	let (sx, sy) = bodies
		.iter()
		.fold((0.0, 0.0), |(sx, sy), body| (sx + body.x, sy + body.y));
	let shift_x = (sx / n - center.x) * strength;
	let shift_y = (sy / n - center.y) * strength;
	for body in bodies {
		body.x -= shift_x;
		body.y -= shift_y;
	}
}

/// Push apart bodies whose predicted positions are closer than two radii.
///
/// Candidate pairs come from a sweep along x, so only bodies within reach on
/// that axis are compared.
pub(super) fn apply_collision(bodies: &mut [Body], radius: f64, strength: f64, jiggle: &mut Jiggle) {
	if bodies.len() < 2 || radius <= 0.0 {
		return;
	}

	let predicted: Vec<f64> = bodies.iter().map(|body| body.x + body.vx).collect();
	let mut order: Vec<usize> = (0..bodies.len()).collect();
	order.sort_by(|&a, &b| predicted[a].total_cmp(&predicted[b]));

	let reach = radius * 2.0;
	for (pos, &i) in order.iter().enumerate() {
		let xi = bodies[i].x + bodies[i].vx;
		let yi = bodies[i].y + bodies[i].vy;
		for &j in &order[pos + 1..] {
			if predicted[j] - predicted[i] > reach {
				break;
			}
			let other = bodies[j];
			let mut x = xi - other.x - other.vx;
			let mut y = yi - other.y - other.vy;
			let mut l = x * x + y * y;
			if l >= reach * reach {
				continue;
			}
			if x == 0.0 {
				x = jiggle.nudge();
				l += x * x;
			}
			if y == 0.0 {
				y = jiggle.nudge();
				l += y * y;
			}
			let l = l.sqrt();
			let k = (reach - l) / l * strength;
			// Equal radii split the correction evenly.
			let (x, y) = (x * k * 0.5, y * k * 0.5);
			bodies[i].vx += x;
			bodies[i].vy += y;
			bodies[j].vx -= x;
			bodies[j].vy -= y;
		}
	}
}
