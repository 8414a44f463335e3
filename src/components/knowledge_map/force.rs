//! Velocity-Verlet style force layout: link springs, all-pairs repulsion,
//! centering and collision, integrated with velocity decay.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::graph::{Link, Node};
use super::layout::{LayoutConfig, LayoutEngine, StepContext};

/// Squared distance under which repulsion stops growing.
const CHARGE_DISTANCE_MIN2: f64 = 1.0;

pub struct ForceLayout {
	link_distance: f64,
	charge: f64,
	velocity_decay: f64,
	rng: SmallRng,
}

impl ForceLayout {
	pub fn new(config: &LayoutConfig) -> Self {
		Self {
			link_distance: config.link_distance,
			charge: config.charge,
			velocity_decay: config.velocity_decay,
			rng: SmallRng::seed_from_u64(config.seed),
		}
	}

	fn jiggle(&mut self) -> f64 {
		jiggle(&mut self.rng)
	}

	/// Pulls linked nodes toward `link_distance`, split by degree so hubs
	/// move less than leaves.
	fn apply_links(&mut self, nodes: &mut [Node], links: &[Link], alpha: f64) {
		let mut degree = vec![0usize; nodes.len()];
		for l in links {
			degree[l.source] += 1;
			degree[l.target] += 1;
		}

		for l in links {
			let (s, t) = (l.source, l.target);
			let (ds, dt) = (degree[s] as f64, degree[t] as f64);
			let strength = 1.0 / ds.min(dt);
			let bias = ds / (ds + dt);

			let mut x = nodes[t].x + nodes[t].vx - nodes[s].x - nodes[s].vx;
			let mut y = nodes[t].y + nodes[t].vy - nodes[s].y - nodes[s].vy;
			if x == 0.0 {
				x = self.jiggle();
			}
			if y == 0.0 {
				y = self.jiggle();
			}
			let dist = (x * x + y * y).sqrt();
			let k = (dist - self.link_distance) / dist * alpha * strength;
			let (x, y) = (x * k, y * k);

			nodes[t].vx -= x * bias;
			nodes[t].vy -= y * bias;
			nodes[s].vx += x * (1.0 - bias);
			nodes[s].vy += y * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self, nodes: &mut [Node], alpha: f64) {
		for i in 0..nodes.len() {
			let (mut ax, mut ay) = (0.0, 0.0);
			for j in 0..nodes.len() {
				if i == j {
					continue;
				}
				let mut x = nodes[j].x - nodes[i].x;
				let mut y = nodes[j].y - nodes[i].y;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.jiggle();
					l += y * y;
				}
				if l < CHARGE_DISTANCE_MIN2 {
					l = (CHARGE_DISTANCE_MIN2 * l).sqrt();
				}
				let w = self.charge * alpha / l;
				ax += x * w;
				ay += y * w;
			}
			nodes[i].vx += ax;
			nodes[i].vy += ay;
		}
	}

	fn integrate(&self, nodes: &mut [Node]) {
		let keep = 1.0 - self.velocity_decay;
		for node in nodes.iter_mut() {
			node.vx *= keep;
			node.vy *= keep;
			node.x += node.vx;
			node.y += node.vy;
			node.apply_pin();
		}
	}
}

/// Pushes overlapping circles apart, heavier (larger) nodes moving less.
pub(super) fn apply_collision(nodes: &mut [Node], rng: &mut SmallRng) {
	for i in 0..nodes.len() {
		let ri = nodes[i].radius();
		let xi = nodes[i].x + nodes[i].vx;
		let yi = nodes[i].y + nodes[i].vy;
		for j in (i + 1)..nodes.len() {
			let rj = nodes[j].radius();
			let r = ri + rj;
			let mut x = xi - nodes[j].x - nodes[j].vx;
			let mut y = yi - nodes[j].y - nodes[j].vy;
			let mut l = x * x + y * y;
			if l >= r * r {
				continue;
			}
			if x == 0.0 {
				x = jiggle(rng);
				l += x * x;
			}
			if y == 0.0 {
				y = jiggle(rng);
				l += y * y;
			}
			let dist = l.sqrt();
			let k = (r - dist) / dist;
			let (x, y) = (x * k, y * k);
			let share = (rj * rj) / (ri * ri + rj * rj);

			nodes[i].vx += x * share;
			nodes[i].vy += y * share;
			nodes[j].vx -= x * (1.0 - share);
			nodes[j].vy -= y * (1.0 - share);
		}
	}
}

/// Tiny random offset that separates coincident nodes.
fn jiggle(rng: &mut SmallRng) -> f64 {
	(rng.r#gen::<f64>() - 0.5) * 1e-6
}

/// Translates the whole layout so its mean position sits on `center`.
pub(super) fn apply_center(nodes: &mut [Node], center: (f64, f64)) {
	if nodes.is_empty() {
		return;
	}
	let n = nodes.len() as f64;
	let (sx, sy) = nodes
		.iter()
		.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
	let (dx, dy) = (sx / n - center.0, sy / n - center.1);
	for node in nodes.iter_mut() {
		node.x -= dx;
		node.y -= dy;
	}
}

impl LayoutEngine for ForceLayout {
	fn step(&mut self, nodes: &mut [Node], links: &[Link], ctx: &StepContext) {
		self.apply_links(nodes, links, ctx.alpha);
		self.apply_charge(nodes, ctx.alpha);
		apply_center(nodes, ctx.center);
		apply_collision(nodes, &mut self.rng);
		self.integrate(nodes);
	}

	fn name(&self) -> &'static str {
		"force"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_map::types::NodeAttrs;

	fn node(id: &str, x: f64, y: f64) -> Node {
		Node::new(id, id, x, y, NodeAttrs::default())
	}

	fn ctx(alpha: f64) -> StepContext {
		StepContext {
			alpha,
			center: (400.0, 300.0),
			dt: 0.016,
		}
	}

	fn dist(a: &Node, b: &Node) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn linked_pair_settles_near_link_distance() {
		let mut layout = ForceLayout::new(&LayoutConfig {
			charge: 0.0,
			..Default::default()
		});
		let mut nodes = vec![node("a", 390.0, 300.0), node("b", 410.0, 300.0)];
		let links = [Link { source: 0, target: 1 }];
		for _ in 0..300 {
			layout.step(&mut nodes, &links, &ctx(0.5));
		}
		let d = dist(&nodes[0], &nodes[1]);
		assert!((d - 150.0).abs() < 1.0, "distance {}", d);
	}

	#[test]
	fn repulsion_pushes_unlinked_nodes_apart() {
		let mut layout = ForceLayout::new(&LayoutConfig::default());
		let mut nodes = vec![node("a", 300.0, 300.0), node("b", 500.0, 300.0)];
		let before = dist(&nodes[0], &nodes[1]);
		layout.step(&mut nodes, &[], &ctx(1.0));
		assert!(dist(&nodes[0], &nodes[1]) > before);
	}

	#[test]
	fn centering_keeps_mean_on_target() {
		let mut nodes = vec![node("a", 0.0, 0.0), node("b", 100.0, 50.0)];
		apply_center(&mut nodes, (400.0, 300.0));
		let mx = (nodes[0].x + nodes[1].x) / 2.0;
		let my = (nodes[0].y + nodes[1].y) / 2.0;
		assert!((mx - 400.0).abs() < 1e-9 && (my - 300.0).abs() < 1e-9);
		assert!((dist(&nodes[0], &nodes[1]) - 125f64.sqrt() * 10.0).abs() < 1e-9);
	}

	#[test]
	fn collision_separates_coincident_circles() {
		let mut layout = ForceLayout::new(&LayoutConfig {
			charge: 0.0,
			..Default::default()
		});
		let mut nodes = vec![node("a", 400.0, 300.0), node("b", 400.0, 300.0)];
		for _ in 0..200 {
			layout.step(&mut nodes, &[], &ctx(0.1));
		}
		assert!(dist(&nodes[0], &nodes[1]) > 50.0);
	}

	#[test]
	fn pinned_node_stays_on_its_pin() {
		let mut layout = ForceLayout::new(&LayoutConfig::default());
		let mut nodes = vec![node("a", 100.0, 100.0), node("b", 120.0, 100.0)];
		nodes[0].pin(100.0, 100.0);
		let links = [Link { source: 0, target: 1 }];
		for _ in 0..50 {
			layout.step(&mut nodes, &links, &ctx(1.0));
			assert_eq!((nodes[0].x, nodes[0].y), (100.0, 100.0));
		}
		assert_ne!((nodes[1].x, nodes[1].y), (120.0, 100.0));
	}

	#[test]
	fn self_loop_does_not_produce_nan() {
		let mut layout = ForceLayout::new(&LayoutConfig::default());
		let mut nodes = vec![node("a", 400.0, 300.0)];
		let links = [Link { source: 0, target: 0 }];
		for _ in 0..10 {
			layout.step(&mut nodes, &links, &ctx(1.0));
		}
		assert!(nodes[0].x.is_finite() && nodes[0].y.is_finite());
	}
}
