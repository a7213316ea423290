//! Force-directed layout: link springs, many-body repulsion, centering and
//! collision, cooled by a decaying `alpha`.

mod forces;
mod quadtree;

use std::f64::consts::PI;

use forces::{Jiggle, Spring};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Body {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
}

impl Body {
	fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	pub width: f64,
	pub height: f64,
	pub link_distance: f64,
	/// Negative values repel.
	pub charge_strength: f64,
	pub collision_radius: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity lost every tick.
	pub velocity_decay: f64,
	/// Heat kept while a node is being dragged.
	pub drag_alpha_target: f64,
	/// Barnes-Hut opening angle.
	pub theta: f64,
	/// Node count from which repulsion switches to the quadtree approximation.
	pub barnes_hut_min_nodes: usize,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			width: 800.0,
			height: 600.0,
			link_distance: 100.0,
			charge_strength: -300.0,
			collision_radius: 40.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			theta: 0.9,
			barnes_hut_min_nodes: 200,
		}
	}
}

impl SimulationConfig {
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

pub struct Simulation {
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	alpha: f64,
	alpha_target: f64,
	config: SimulationConfig,
	jiggle: Jiggle,
	ticks: u64,
}

impl Simulation {
	/// Seed `node_count` bodies on a phyllotaxis spiral around the canvas
	/// centre and connect them with `links` given as index pairs.
	pub fn new(node_count: usize, links: &[(usize, usize)], config: SimulationConfig) -> Self {
		let center = config.center();
		let golden_angle = PI * (3.0 - 5f64.sqrt());
		let bodies = (0..node_count)
			.map(|i| {
				let radius = 10.0 * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden_angle;
				Body {
					x: center.x + radius * angle.cos(),
					y: center.y + radius * angle.sin(),
					..Body::default()
				}
			})
			.collect();

		Self {
			bodies,
			springs: forces::springs(node_count, links),
			alpha: 1.0,
			alpha_target: 0.0,
			config,
			jiggle: Jiggle::new(),
			ticks: 0,
		}
	}

	/// Advance one step. `pinned` returns the fixed position of a body that
	/// must not move under the forces this tick.
	pub fn tick(&mut self, pinned: impl Fn(usize) -> Option<Point>) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		let alpha = self.alpha;
		let config = &self.config;

		forces::apply_links(
			&mut self.bodies,
			&self.springs,
			config.link_distance,
			alpha,
			&mut self.jiggle,
		);
		if self.bodies.len() >= config.barnes_hut_min_nodes {
			forces::apply_charge_barnes_hut(
				&mut self.bodies,
				config.charge_strength,
				alpha,
				config.theta,
				&mut self.jiggle,
			);
		} else {
			forces::apply_charge_exact(&mut self.bodies, config.charge_strength, alpha, &mut self.jiggle);
		}
		forces::apply_center(&mut self.bodies, config.center(), 1.0);
		forces::apply_collision(&mut self.bodies, config.collision_radius, 1.0, &mut self.jiggle);

		let keep = 1.0 - config.velocity_decay;
		for (index, body) in self.bodies.iter_mut().enumerate() {
			match pinned(index) {
				Some(pin) => {
					body.x = pin.x;
					body.y = pin.y;
					body.vx = 0.0;
					body.vy = 0.0;
				}
				None => {
					body.vx *= keep;
					body.vy *= keep;
					body.x += body.vx;
					body.y += body.vy;
				}
			}
		}
		self.ticks += 1;
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Cold and not being reheated; further ticks would not move anything
	/// noticeably.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.config.alpha_min && self.alpha_target < self.config.alpha_min
	}

	pub fn position(&self, index: usize) -> Option<Point> {
		self.bodies.get(index).map(Body::position)
	}

	pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
		self.bodies.iter().map(Body::position)
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.bodies.len()
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}
}
