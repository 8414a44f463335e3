use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::energy::{DRAG_ALPHA_TARGET, Energy};
use super::graph::{Graph, Node};
use super::layout::{LayoutConfig, LayoutEngine, StepContext};
use super::navigation::note_gallery_url;
use super::scene::{Scene, SceneRenderer};
use super::types::{EdgeAttrs, KnowledgeMapData, NodeAttrs};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
/// Pointer travel (screen px) under which a press on a node counts as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<String>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Inputs the view reacts to, in the order the host delivers them.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	Resize { width: f64, height: f64 },
	DataLoaded(KnowledgeMapData),
	Tick { dt: f64 },
	DragStart { id: String },
	/// Pointer position in graph coordinates.
	DragMove { x: f64, y: f64 },
	DragEnd,
	/// Zoom by `factor` around the screen point `(x, y)`.
	Zoom { x: f64, y: f64, factor: f64 },
	Pan { dx: f64, dy: f64 },
	Click { id: String },
}

/// Side effects the host has to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
	Navigate(String),
}

/// The knowledge map: tag graph, physics and view state for one canvas.
pub struct GraphView<R = Scene> {
	graph: Graph,
	engine: Box<dyn LayoutEngine>,
	energy: Energy,
	scene: R,
	config: LayoutConfig,
	rng: SmallRng,
	width: f64,
	height: f64,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<String>,
}

impl GraphView {
	pub fn new(width: f64, height: f64, config: LayoutConfig) -> Self {
		Self::with_renderer(width, height, config, Scene::default())
	}
}

impl<R: SceneRenderer> GraphView<R> {
	pub fn with_renderer(width: f64, height: f64, config: LayoutConfig, scene: R) -> Self {
		let engine = config.build_engine();
		info!("knowledge map {}x{} using the {} layout", width, height, engine.name());
		Self {
			graph: Graph::default(),
			engine,
			energy: Energy::default(),
			scene,
			rng: SmallRng::seed_from_u64(config.seed),
			config,
			width,
			height,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn scene(&self) -> &R {
		&self.scene
	}

	pub fn energy(&self) -> &Energy {
		&self.energy
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn handle(&mut self, event: GraphEvent) -> Option<Command> {
		match event {
			GraphEvent::Resize { width, height } => self.resize(width, height),
			GraphEvent::DataLoaded(data) => self.load(&data),
			GraphEvent::Tick { dt } => {
				self.tick(dt);
			}
			GraphEvent::DragStart { id } => {
				self.drag_start(&id);
			}
			GraphEvent::DragMove { x, y } => self.drag_to(x, y),
			GraphEvent::DragEnd => self.drag_end(),
			GraphEvent::Zoom { x, y, factor } => self.zoom_at(x, y, factor),
			GraphEvent::Pan { dx, dy } => {
				self.transform.x += dx;
				self.transform.y += dy;
			}
			GraphEvent::Click { id } => return self.click(&id),
		}
		None
	}

	/// Adds a tag near the centre of the viewport. Returns `false`, leaving
	/// the existing node untouched, when `id` is already on the map.
	pub fn add_node(&mut self, id: &str, label: &str, data: NodeAttrs) -> bool {
		if self.graph.contains_node(id) {
			debug!("node {} already on the map", id);
			return false;
		}
		let jitter = self.config.jitter.abs();
		let x = self.width / 2.0 + self.rng.gen_range(-jitter..=jitter);
		let y = self.height / 2.0 + self.rng.gen_range(-jitter..=jitter);
		self.graph.insert_node(Node::new(id, label, x, y, data));
		self.refresh();
		true
	}

	pub fn add_edge(&mut self, from: &str, to: &str, label: &str) -> bool {
		self.add_edge_with(from, to, label, EdgeAttrs::default())
	}

	/// Links two tags already on the map. Missing endpoints and repeated
	/// pairs are ignored so nodes and edges may arrive in any order.
	pub fn add_edge_with(&mut self, from: &str, to: &str, label: &str, data: EdgeAttrs) -> bool {
		if !self.graph.insert_edge(from, to, label, data) {
			debug!("edge {} -> {} skipped", from, to);
			return false;
		}
		self.refresh();
		true
	}

	pub fn remove_node(&mut self, id: &str) -> bool {
		if self.drag.node.as_deref() == Some(id) {
			self.drag_end();
		}
		if self.hover.as_deref() == Some(id) {
			self.hover = None;
		}
		let removed = self.graph.remove_node(id);
		if removed {
			self.refresh();
		}
		removed
	}

	pub fn remove_edge(&mut self, id: &str) -> bool {
		let removed = self.graph.remove_edge(id);
		if removed {
			self.refresh();
		}
		removed
	}

	/// Adds every node of `data`, then every edge.
	pub fn load(&mut self, data: &KnowledgeMapData) {
		for node in &data.nodes {
			let label = node.label.as_deref().unwrap_or(&node.id);
			self.add_node(&node.id, label, node.data.clone().unwrap_or_default());
		}
		for edge in &data.edges {
			self.add_edge_with(
				&edge.from,
				&edge.to,
				edge.label.as_deref().unwrap_or(""),
				edge.data.clone().unwrap_or_default(),
			);
		}
		info!(
			"knowledge map holds {} tags and {} links",
			self.graph.nodes().len(),
			self.graph.edges().len()
		);
	}

	/// Syncs the scene with the graph and reheats the simulation so new
	/// entities settle into the current layout.
	fn refresh(&mut self) {
		let diff = self.scene.reconcile(self.graph.nodes(), self.graph.edges());
		if !diff.is_empty() {
			debug!(
				"scene: +{} -{} nodes, +{} -{} edges",
				diff.entered_nodes.len(),
				diff.exited_nodes.len(),
				diff.entered_edges.len(),
				diff.exited_edges.len()
			);
		}
		self.energy.reheat();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		if !(width > 0.0 && height > 0.0) {
			debug!("ignoring resize to {}x{}", width, height);
			return;
		}
		self.width = width;
		self.height = height;
		let margin = self.config.margin;
		for node in self.graph.nodes_mut() {
			if let (Some(fx), Some(fy)) = (node.fx, node.fy) {
				let r = node.radius() + margin;
				node.pin(clamp_axis(fx, r, width), clamp_axis(fy, r, height));
				node.apply_pin();
			}
		}
		self.energy.reheat();
	}

	/// Runs one simulation step. Returns `false` once the layout has cooled.
	pub fn tick(&mut self, dt: f64) -> bool {
		let Some(alpha) = self.energy.advance() else {
			return false;
		};
		let ctx = StepContext {
			alpha,
			center: (self.width / 2.0, self.height / 2.0),
			dt,
		};
		let (nodes, links) = self.graph.nodes_and_links();
		self.engine.step(nodes, &links, &ctx);
		for node in nodes.iter_mut() {
			node.apply_pin();
		}
		clamp_to_viewport(nodes, self.width, self.height, self.config.margin);
		self.scene.update_transforms(self.graph.nodes(), self.graph.edges());
		true
	}

	/// Pins `id` where it is and keeps the simulation warm until the drag ends.
	pub fn drag_start(&mut self, id: &str) -> bool {
		let (width, height, margin) = (self.width, self.height, self.config.margin);
		let Some(node) = self.graph.node_mut(id) else {
			return false;
		};
		let r = node.radius() + margin;
		let (x, y) = (clamp_axis(node.x, r, width), clamp_axis(node.y, r, height));
		node.pin(x, y);

		if !self.drag.active {
			self.energy.set_target(DRAG_ALPHA_TARGET);
			self.energy.restart();
		}
		self.drag.active = true;
		self.drag.moved = false;
		self.drag.node = Some(id.to_string());
		self.drag.node_start_x = x;
		self.drag.node_start_y = y;
		true
	}

	/// Moves the dragged node's pin to `(x, y)`, kept inside the viewport.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		let (width, height, margin) = (self.width, self.height, self.config.margin);
		let Some(node) = self.drag.node.as_deref().and_then(|id| self.graph.node_mut(id)) else {
			return;
		};
		let r = node.radius() + margin;
		node.pin(clamp_axis(x, r, width), clamp_axis(y, r, height));
		node.apply_pin();
	}

	pub fn drag_end(&mut self) {
		if !self.drag.active {
			return;
		}
		self.energy.set_target(0.0);
		if let Some(node) = self.drag.node.take().and_then(|id| self.graph.node_mut(&id)) {
			node.unpin();
		}
		self.drag.active = false;
	}

	pub fn click(&self, id: &str) -> Option<Command> {
		let node = self.graph.node(id)?;
		Some(Command::Navigate(note_gallery_url(&node.label)))
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		if !(factor.is_finite() && factor > 0.0) {
			debug!("ignoring zoom factor {factor}");
			return;
		}
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Top-most node whose circle contains the graph point `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&Node> {
		self.graph.nodes().iter().rev().find(|n| {
			let (dx, dy) = (n.x - x, n.y - y);
			dx * dx + dy * dy <= n.radius() * n.radius()
		})
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		if let Some(id) = self.node_at(gx, gy).map(|n| n.id.clone()) {
			self.drag_start(&id);
			self.drag.start_x = sx;
			self.drag.start_y = sy;
		} else {
			self.pan.active = true;
			self.pan.start_x = sx;
			self.pan.start_y = sy;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if dx.hypot(dy) > CLICK_TOLERANCE {
				self.drag.moved = true;
			}
			if self.drag.moved {
				let k = self.transform.k;
				self.drag_to(self.drag.node_start_x + dx / k, self.drag.node_start_y + dy / k);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		} else {
			let (gx, gy) = self.screen_to_graph(sx, sy);
			self.hover = self.node_at(gx, gy).map(|n| n.id.clone());
		}
	}

	/// Ends the current gesture; a press on a node that never moved is a click.
	pub fn pointer_up(&mut self) -> Option<Command> {
		self.pan.active = false;
		if !self.drag.active {
			return None;
		}
		let clicked = (!self.drag.moved).then(|| self.drag.node.clone()).flatten();
		self.drag_end();
		clicked.and_then(|id| self.click(&id))
	}

	pub fn pointer_leave(&mut self) {
		self.drag_end();
		self.pan.active = false;
		self.hover = None;
	}

	/// CSS cursor for the canvas: a pointer over a node or while dragging one.
	pub fn cursor(&self) -> &'static str {
		if self.hover.is_some() || self.drag.active {
			"pointer"
		} else {
			"grab"
		}
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.zoom_at(sx, sy, factor);
	}
}

/// Clamps `v` into `[r, extent - r]`, or centres it when the extent is too
/// small to fit `2r`.
fn clamp_axis(v: f64, r: f64, extent: f64) -> f64 {
	if extent - r < r || !v.is_finite() {
		return extent / 2.0;
	}
	v.clamp(r, extent - r)
}

/// Keeps every circle, plus `margin`, inside the viewport.
fn clamp_to_viewport(nodes: &mut [Node], width: f64, height: f64, margin: f64) {
	for node in nodes.iter_mut() {
		let r = node.radius() + margin;
		node.x = clamp_axis(node.x, r, width);
		node.y = clamp_axis(node.y, r, height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_map::graph::Edge;
	use crate::components::knowledge_map::layout::EngineKind;
	use crate::components::knowledge_map::scene::SceneDiff;
	use crate::components::knowledge_map::types::{MapEdge, MapNode};

	fn view() -> GraphView {
		GraphView::new(800.0, 600.0, LayoutConfig::default())
	}

	fn chain(view: &mut GraphView, n: usize) {
		for i in 0..n {
			view.add_node(&i.to_string(), &format!("tag {}", i), NodeAttrs::default());
			if i > 0 {
				view.add_edge(&(i - 1).to_string(), &i.to_string(), "");
			}
		}
	}

	fn assert_in_bounds(view: &GraphView) {
		for n in view.graph().nodes() {
			let r = n.radius() + 20.0;
			assert!(
				n.x >= r && n.x <= view.width() - r && n.y >= r && n.y <= view.height() - r,
				"{} at ({}, {}) escaped {}x{}",
				n.id,
				n.x,
				n.y,
				view.width(),
				view.height()
			);
		}
	}

	#[derive(Default)]
	struct Recorder {
		inner: Scene,
		reconciles: usize,
		transforms: usize,
	}

	impl SceneRenderer for Recorder {
		fn reconcile(&mut self, nodes: &[Node], edges: &[Edge]) -> SceneDiff {
			self.reconciles += 1;
			self.inner.reconcile(nodes, edges)
		}

		fn update_transforms(&mut self, nodes: &[Node], edges: &[Edge]) {
			self.transforms += 1;
			self.inner.update_transforms(nodes, edges);
		}
	}

	#[test]
	fn new_nodes_start_near_the_centre() {
		let mut v = view();
		chain(&mut v, 20);
		for n in v.graph().nodes() {
			assert!((n.x - 400.0).abs() <= 50.0 && (n.y - 300.0).abs() <= 50.0);
		}
	}

	#[test]
	fn re_adding_a_node_keeps_position_and_data() {
		let mut v = view();
		let data = NodeAttrs {
			size: Some(40.0),
			..Default::default()
		};
		assert!(v.add_node("py", "Python", data.clone()));
		for _ in 0..5 {
			v.tick(0.016);
		}
		let before = v.graph().node("py").unwrap().clone();

		assert!(!v.add_node("py", "Other", NodeAttrs::default()));
		assert_eq!(v.graph().nodes().len(), 1);
		assert_eq!(v.graph().node("py").unwrap(), &before);
		assert_eq!(before.data, data);
	}

	#[test]
	fn edges_need_endpoints_and_are_directed() {
		let mut v = view();
		v.add_node("a", "a", NodeAttrs::default());
		assert!(!v.add_edge("a", "b", ""));
		v.add_node("b", "b", NodeAttrs::default());
		assert!(v.add_edge("a", "b", ""));
		assert!(!v.add_edge("a", "b", ""));
		assert!(v.add_edge("b", "a", ""));

		let ids: Vec<_> = v.graph().edges().iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, ["a-b", "b-a"]);
	}

	#[test]
	fn only_effective_adds_reconcile() {
		let mut v = GraphView::with_renderer(800.0, 600.0, LayoutConfig::default(), Recorder::default());
		v.add_node("a", "a", NodeAttrs::default());
		v.add_node("a", "a", NodeAttrs::default());
		v.add_edge("a", "missing", "");
		assert_eq!(v.scene().reconciles, 1);

		v.add_node("b", "b", NodeAttrs::default());
		v.add_edge("a", "b", "");
		assert_eq!(v.scene().reconciles, 3);
		assert_eq!(v.scene().inner.edge_count(), 1);

		v.tick(0.016);
		assert_eq!(v.scene().transforms, 1);
	}

	#[test]
	fn adding_reheats_a_cold_layout() {
		let mut v = view();
		chain(&mut v, 3);
		while v.tick(0.016) {}
		assert!(!v.energy().is_running());

		v.add_node("late", "late", NodeAttrs::default());
		assert_eq!(v.energy().alpha(), 1.0);
		assert!(v.tick(0.016));
	}

	#[test]
	fn nodes_stay_inside_the_viewport() {
		let mut v = view();
		chain(&mut v, 30);
		for _ in 0..150 {
			v.tick(0.016);
			assert_in_bounds(&v);
		}

		v.resize(300.0, 250.0);
		v.tick(0.016);
		assert_in_bounds(&v);
		for _ in 0..50 {
			v.tick(0.016);
			assert_in_bounds(&v);
		}
	}

	#[test]
	fn spring_engine_respects_the_viewport_too() {
		let mut v = GraphView::new(
			640.0,
			480.0,
			LayoutConfig {
				engine: EngineKind::Spring,
				..Default::default()
			},
		);
		chain(&mut v, 12);
		for _ in 0..100 {
			v.tick(0.016);
			assert_in_bounds(&v);
		}
	}

	#[test]
	fn viewport_narrower_than_a_node_centres_it() {
		let mut v = view();
		v.add_node("a", "a", NodeAttrs::default());
		v.resize(60.0, 600.0);
		v.tick(0.016);
		assert_eq!(v.graph().node("a").unwrap().x, 30.0);
	}

	#[test]
	fn resize_ignores_empty_sizes_and_reheats() {
		let mut v = view();
		v.resize(0.0, 100.0);
		assert_eq!((v.width(), v.height()), (800.0, 600.0));

		while v.tick(0.016) {}
		v.handle(GraphEvent::Resize {
			width: 1024.0,
			height: 768.0,
		});
		assert_eq!((v.width(), v.height()), (1024.0, 768.0));
		assert_eq!(v.energy().alpha(), 1.0);
	}

	#[test]
	fn dragged_node_only_moves_with_the_pointer() {
		let mut v = view();
		chain(&mut v, 6);
		for _ in 0..20 {
			v.tick(0.016);
		}

		assert!(v.drag_start("2"));
		v.drag_to(200.0, 150.0);
		for _ in 0..30 {
			v.tick(0.016);
			let n = v.graph().node("2").unwrap();
			assert_eq!((n.x, n.y), (200.0, 150.0));
		}
		v.handle(GraphEvent::DragMove { x: 500.0, y: 400.0 });
		v.tick(0.016);
		let n = v.graph().node("2").unwrap();
		assert_eq!((n.x, n.y), (500.0, 400.0));

		v.handle(GraphEvent::DragEnd);
		assert!(!v.graph().node("2").unwrap().is_pinned());
		v.tick(0.016);
		let n = v.graph().node("2").unwrap();
		assert_ne!((n.x, n.y), (500.0, 400.0));
	}

	#[test]
	fn drag_pin_is_kept_inside_the_viewport() {
		let mut v = view();
		v.add_node("a", "a", NodeAttrs::default());
		v.drag_start("a");
		v.drag_to(-500.0, 5000.0);
		let n = v.graph().node("a").unwrap();
		assert_eq!((n.fx, n.fy), (Some(50.0), Some(550.0)));
	}

	#[test]
	fn drag_holds_energy_until_release() {
		let mut v = view();
		chain(&mut v, 3);
		while v.tick(0.016) {}

		v.handle(GraphEvent::DragStart { id: "1".into() });
		assert!(v.energy().is_running());
		for _ in 0..500 {
			assert!(v.tick(0.016));
		}
		assert!((v.energy().alpha() - DRAG_ALPHA_TARGET).abs() < 1e-3);

		v.drag_end();
		assert_eq!(v.energy().target(), 0.0);
		let mut ticks = 0;
		while v.tick(0.016) {
			ticks += 1;
		}
		assert!(ticks > 0 && ticks < 400);
	}

	#[test]
	fn drag_start_on_unknown_node_is_ignored() {
		let mut v = view();
		assert!(!v.drag_start("ghost"));
		assert!(!v.drag.active);
		assert_eq!(v.energy().target(), 0.0);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut v = view();
		for _ in 0..100 {
			v.wheel(400.0, 300.0, -1.0);
		}
		assert_eq!(v.transform.k, MAX_ZOOM);
		for _ in 0..100 {
			v.handle(GraphEvent::Zoom {
				x: 10.0,
				y: 10.0,
				factor: 0.5,
			});
		}
		assert_eq!(v.transform.k, MIN_ZOOM);
	}

	#[test]
	fn degenerate_zoom_factors_leave_the_transform_alone() {
		let mut v = view();
		for factor in [f64::NAN, f64::INFINITY, 0.0, -2.0] {
			v.zoom_at(400.0, 300.0, factor);
			assert_eq!(v.transform.k, 1.0);
			assert_eq!((v.transform.x, v.transform.y), (0.0, 0.0));
		}
		v.zoom_at(400.0, 300.0, 2.0);
		assert_eq!(v.transform.k, 2.0);
	}

	#[test]
	fn cursor_tracks_hover_and_drag() {
		let mut v = view();
		v.add_node("a", "a", NodeAttrs::default());
		assert_eq!(v.cursor(), "grab");

		let (x, y) = {
			let n = v.graph().node("a").unwrap();
			(n.x, n.y)
		};
		v.pointer_move(x, y);
		assert_eq!(v.cursor(), "pointer");

		v.pointer_leave();
		assert_eq!(v.cursor(), "grab");
		v.drag_start("a");
		assert_eq!(v.cursor(), "pointer");
	}

	#[test]
	fn zoom_keeps_the_pointer_anchored() {
		let mut v = view();
		let before = v.screen_to_graph(250.0, 120.0);
		v.zoom_at(250.0, 120.0, 2.0);
		let after = v.screen_to_graph(250.0, 120.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn press_and_release_on_a_node_navigates() {
		let mut v = view();
		v.add_node("ml", "Machine Learning", NodeAttrs::default());
		let (x, y) = {
			let n = v.graph().node("ml").unwrap();
			(n.x, n.y)
		};
		v.pointer_down(x, y);
		v.pointer_move(x + 1.0, y);
		assert_eq!(
			v.pointer_up(),
			Some(Command::Navigate("/note_gallery?tag=Machine%20Learning".into()))
		);
		assert!(!v.graph().node("ml").unwrap().is_pinned());
	}

	#[test]
	fn dragging_a_node_is_not_a_click() {
		let mut v = view();
		v.add_node("a", "a", NodeAttrs::default());
		let (x, y) = {
			let n = v.graph().node("a").unwrap();
			(n.x, n.y)
		};
		v.pointer_down(x, y);
		v.pointer_move(x + 40.0, y + 10.0);
		let n = v.graph().node("a").unwrap();
		assert_eq!((n.x, n.y), (x + 40.0, y + 10.0));
		assert_eq!(v.pointer_up(), None);
	}

	#[test]
	fn background_drag_pans_and_hover_tracks_nodes() {
		let mut v = view();
		v.pointer_down(10.0, 10.0);
		v.pointer_move(60.0, 30.0);
		assert_eq!((v.transform.x, v.transform.y), (50.0, 20.0));
		assert_eq!(v.pointer_up(), None);

		v.add_node("a", "a", NodeAttrs::default());
		let (x, y) = {
			let n = v.graph().node("a").unwrap();
			(n.x + 50.0, n.y + 20.0)
		};
		v.pointer_move(x, y);
		assert_eq!(v.hover.as_deref(), Some("a"));
		v.pointer_leave();
		assert_eq!(v.hover, None);
	}

	#[test]
	fn click_event_on_unknown_node_does_nothing() {
		let mut v = view();
		assert_eq!(v.handle(GraphEvent::Click { id: "nope".into() }), None);
	}

	#[test]
	fn removing_a_node_unpins_and_drops_edges() {
		let mut v = view();
		chain(&mut v, 3);
		v.drag_start("1");
		assert!(v.remove_node("1"));
		assert!(!v.drag.active);
		assert!(v.graph().edges().is_empty());
		assert_eq!(v.scene().node_count(), 2);
		assert!(!v.remove_edge("0-1"));
	}

	#[test]
	fn loads_payload_nodes_before_edges() {
		let data = KnowledgeMapData {
			nodes: vec![
				MapNode {
					id: "rust".into(),
					label: Some("Rust".into()),
					data: Some(NodeAttrs {
						size: Some(45.0),
						..Default::default()
					}),
				},
				MapNode {
					id: "wasm".into(),
					label: None,
					data: None,
				},
			],
			edges: vec![
				MapEdge {
					from: "rust".into(),
					to: "wasm".into(),
					label: Some("2".into()),
					data: Some(EdgeAttrs {
						strength: Some(2.0),
						weight: Some(2),
						..Default::default()
					}),
				},
				MapEdge {
					from: "rust".into(),
					to: "ghost".into(),
					label: None,
					data: None,
				},
			],
		};
		let mut v = view();
		v.handle(GraphEvent::DataLoaded(data));

		assert_eq!(v.graph().nodes().len(), 2);
		assert_eq!(v.graph().node("wasm").unwrap().label, "wasm");
		assert_eq!(v.graph().node("rust").unwrap().radius(), 45.0);
		assert_eq!(v.graph().edges().len(), 1);
		assert_eq!(v.graph().edge("rust-wasm").unwrap().label, "2");
	}
}
