use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::force::{apply_center, apply_collision};
use super::graph::{Link, Node};
use super::layout::{LayoutConfig, LayoutEngine, StepContext};

const NODE_MASS: f32 = 10.0;
const SPRING: f32 = 0.05;
/// Charge magnitude the derived crate charge is scaled against.
const REFERENCE_CHARGE: f64 = 100.0;

/// Charge/spring layout backed by `force_graph`.
///
/// The crate keeps its own node store, so it is rebuilt whenever the node or
/// link set changes and positions are copied in and out around every update.
pub struct SpringLayout {
	graph: ForceGraph<usize, ()>,
	parameters: SimulationParameters,
	rng: SmallRng,
	synced_ids: Vec<String>,
	synced_links: Vec<Link>,
}

/// Maps the layout knobs onto the crate's charge/spring model.
///
/// A linked pair settles where `charge * m^2 / d^2 == spring * d`, so the
/// charge is chosen to put that point at `link_distance` when `charge` is
/// at its default of -100, and scales linearly with `|charge|` from there.
/// Zero charge leaves only the springs and collision.
fn parameters(config: &LayoutConfig) -> SimulationParameters {
	let mass2 = f64::from(NODE_MASS * NODE_MASS);
	let balance = f64::from(SPRING) * config.link_distance.max(0.0).powi(3) / mass2;
	SimulationParameters {
		force_charge: (balance * config.charge.abs() / REFERENCE_CHARGE) as f32,
		force_spring: SPRING,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

impl SpringLayout {
	pub fn new(config: &LayoutConfig) -> Self {
		let parameters = parameters(config);
		Self {
			graph: ForceGraph::new(parameters.clone()),
			parameters,
			rng: SmallRng::seed_from_u64(config.seed),
			synced_ids: Vec::new(),
			synced_links: Vec::new(),
		}
	}

	fn is_stale(&self, nodes: &[Node], links: &[Link]) -> bool {
		self.synced_links != links
			|| self.synced_ids.len() != nodes.len()
			|| self.synced_ids.iter().zip(nodes).any(|(id, n)| *id != n.id)
	}

	fn rebuild(&mut self, nodes: &[Node], links: &[Link]) {
		let mut graph: ForceGraph<usize, ()> = ForceGraph::new(self.parameters.clone());
		let slots: Vec<DefaultNodeIdx> = nodes
			.iter()
			.enumerate()
			.map(|(slot, node)| {
				graph.add_node(NodeData {
					x: node.x as f32,
					y: node.y as f32,
					mass: NODE_MASS,
					is_anchor: node.is_pinned(),
					user_data: slot,
				})
			})
			.collect();
		for l in links {
			// the underlying graph is undirected; a self loop has nothing to pull
			if l.source != l.target {
				graph.add_edge(slots[l.source], slots[l.target], EdgeData::default());
			}
		}
		self.graph = graph;
		self.synced_ids = nodes.iter().map(|n| n.id.clone()).collect();
		self.synced_links = links.to_vec();
	}
}

impl LayoutEngine for SpringLayout {
	fn step(&mut self, nodes: &mut [Node], links: &[Link], ctx: &StepContext) {
		if self.is_stale(nodes, links) {
			self.rebuild(nodes, links);
		}

		self.graph.visit_nodes_mut(|n| {
			let node = &nodes[n.data.user_data];
			n.data.x = node.x as f32;
			n.data.y = node.y as f32;
			n.data.is_anchor = node.is_pinned();
		});
		self.graph.update((ctx.dt * ctx.alpha) as f32);
		self.graph.visit_nodes(|n| {
			let node = &mut nodes[n.data.user_data];
			node.x = n.x() as f64;
			node.y = n.y() as f64;
		});

		// the crate has no notion of node size; resolve overlaps as position offsets
		for node in nodes.iter_mut() {
			node.vx = 0.0;
			node.vy = 0.0;
		}
		apply_collision(nodes, &mut self.rng);
		for node in nodes.iter_mut() {
			node.x += node.vx;
			node.y += node.vy;
			node.vx = 0.0;
			node.vy = 0.0;
		}

		apply_center(nodes, ctx.center);
		for node in nodes.iter_mut() {
			node.apply_pin();
		}
	}

	fn name(&self) -> &'static str {
		"spring"
	}
}
