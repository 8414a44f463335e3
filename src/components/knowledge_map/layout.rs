//! Layout engine seam and the knobs shared by every engine.

use super::force::ForceLayout;
use super::graph::{Link, Node};
use super::spring::SpringLayout;

/// Per-tick inputs an engine may use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepContext {
	/// Current simulation energy, in `(0, 1]`.
	pub alpha: f64,
	/// Point the layout is pulled toward.
	pub center: (f64, f64),
	/// Seconds since the previous frame.
	pub dt: f64,
}

/// A force-directed layout that moves nodes one tick at a time.
///
/// Implementations must leave every pinned node on its pin. The viewport
/// clamp is not their concern; [`GraphView`](super::state::GraphView) runs it
/// after every step.
pub trait LayoutEngine {
	fn step(&mut self, nodes: &mut [Node], links: &[Link], ctx: &StepContext);

	/// Human readable name, for logs.
	fn name(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineKind {
	/// Link, many-body, center and collision forces with velocity decay.
	#[default]
	Force,
	/// Charge/spring model from the `force_graph` crate.
	Spring,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	pub engine: EngineKind,
	/// Rest length of a link.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Clearance kept between a node's circle and the canvas edge.
	pub margin: f64,
	/// New nodes start within this distance of the centre on each axis.
	pub jitter: f64,
	pub seed: u64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			engine: EngineKind::Force,
			link_distance: 150.0,
			charge: -100.0,
			velocity_decay: 0.4,
			margin: 20.0,
			jitter: 50.0,
			seed: 0x5eed,
		}
	}
}

impl LayoutConfig {
	pub fn build_engine(&self) -> Box<dyn LayoutEngine> {
		match self.engine {
			EngineKind::Force => Box::new(ForceLayout::new(self)),
			EngineKind::Spring => Box::new(SpringLayout::new(self)),
		}
	}
}
