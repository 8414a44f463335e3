//! In-memory tag graph: nodes and directed edges keyed by id, kept in
//! insertion order.

use std::collections::HashMap;

use super::types::{EdgeAttrs, NodeAttrs};

pub const DEFAULT_NODE_SIZE: f64 = 30.0;
pub const DEFAULT_EDGE_WIDTH: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub label: String,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned position; overrides the simulation while set.
	pub fx: Option<f64>,
	pub fy: Option<f64>,
	pub data: NodeAttrs,
}

impl Node {
	pub fn new(id: impl Into<String>, label: impl Into<String>, x: f64, y: f64, data: NodeAttrs) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
			data,
		}
	}

	/// Circle radius, `data.size` when it is a usable number.
	pub fn radius(&self) -> f64 {
		self.data
			.size
			.filter(|s| s.is_finite() && *s > 0.0)
			.unwrap_or(DEFAULT_NODE_SIZE)
	}

	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}

	pub fn pin(&mut self, x: f64, y: f64) {
		self.fx = Some(x);
		self.fy = Some(y);
	}

	pub fn unpin(&mut self) {
		self.fx = None;
		self.fy = None;
	}

	/// Moves the node onto its pin, if any, and kills its velocity.
	pub fn apply_pin(&mut self) {
		if let Some(fx) = self.fx {
			self.x = fx;
			self.vx = 0.0;
		}
		if let Some(fy) = self.fy {
			self.y = fy;
			self.vy = 0.0;
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub label: String,
	pub data: EdgeAttrs,
}

impl Edge {
	pub fn edge_id(source: &str, target: &str) -> String {
		format!("{}-{}", source, target)
	}

	pub fn width(&self) -> f64 {
		self.data
			.strength
			.filter(|s| s.is_finite() && *s > 0.0)
			.unwrap_or(DEFAULT_EDGE_WIDTH)
	}
}

/// An edge resolved to node slots, as handed to layout engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: usize,
	pub target: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	node_index: HashMap<String, usize>,
	edges: Vec<Edge>,
	edge_index: HashMap<String, usize>,
}

impl Graph {
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node_index.contains_key(id)
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.node_index.get(id).copied()
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index_of(id).map(|i| &self.nodes[i])
	}

	pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.index_of(id).map(move |i| &mut self.nodes[i])
	}

	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edge_index.get(id).map(|&i| &self.edges[i])
	}

	/// Stores `node` unless its id is taken. Returns whether it was stored.
	pub fn insert_node(&mut self, node: Node) -> bool {
		if self.node_index.contains_key(&node.id) {
			return false;
		}
		self.node_index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
		true
	}

	/// Stores the edge `source -> target` when both ends exist and the pair
	/// is new. Returns whether it was stored.
	pub fn insert_edge(&mut self, source: &str, target: &str, label: &str, data: EdgeAttrs) -> bool {
		let id = Edge::edge_id(source, target);
		if self.edge_index.contains_key(&id) || !self.contains_node(source) || !self.contains_node(target) {
			return false;
		}
		self.edge_index.insert(id.clone(), self.edges.len());
		self.edges.push(Edge {
			id,
			source: source.to_string(),
			target: target.to_string(),
			label: label.to_string(),
			data,
		});
		true
	}

	/// Removes a node together with every edge touching it.
	pub fn remove_node(&mut self, id: &str) -> bool {
		let Some(idx) = self.node_index.remove(id) else {
			return false;
		};
		self.nodes.remove(idx);
		self.edges.retain(|e| e.source != id && e.target != id);
		self.reindex();
		true
	}

	pub fn remove_edge(&mut self, id: &str) -> bool {
		let Some(idx) = self.edge_index.remove(id) else {
			return false;
		};
		self.edges.remove(idx);
		self.reindex();
		true
	}

	/// Edges resolved to node slots, in edge order.
	pub fn links(&self) -> Vec<Link> {
		self.edges
			.iter()
			.filter_map(|e| {
				Some(Link {
					source: self.index_of(&e.source)?,
					target: self.index_of(&e.target)?,
				})
			})
			.collect()
	}

	/// Split borrow used by the tick: nodes to move, links to read.
	pub fn nodes_and_links(&mut self) -> (&mut [Node], Vec<Link>) {
		let links = self.links();
		(self.nodes.as_mut_slice(), links)
	}

	fn reindex(&mut self) {
		self.node_index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		self.edge_index = self
			.edges
			.iter()
			.enumerate()
			.map(|(i, e)| (e.id.clone(), i))
			.collect();
	}
}
