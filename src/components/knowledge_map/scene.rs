//! Retained scene: one sprite per node and edge, keyed by id so a sprite
//! survives every refresh that still contains its entity.

use std::collections::{HashMap, HashSet};

use super::color::color_for;
use super::graph::{Edge, Node};

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
	pub radius: f64,
	pub color: &'static str,
	pub label: String,
	/// Current translate, in graph coordinates.
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	pub source: String,
	pub target: String,
	pub width: f64,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// What a reconcile pass created and destroyed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDiff {
	pub entered_nodes: Vec<String>,
	pub exited_nodes: Vec<String>,
	pub entered_edges: Vec<String>,
	pub exited_edges: Vec<String>,
}

impl SceneDiff {
	pub fn is_empty(&self) -> bool {
		self.entered_nodes.is_empty()
			&& self.exited_nodes.is_empty()
			&& self.entered_edges.is_empty()
			&& self.exited_edges.is_empty()
	}
}

/// Drawing side of the knowledge map.
pub trait SceneRenderer {
	/// Brings the rendered entity set in line with `nodes`/`edges`: drops what
	/// is gone, creates what is new, leaves the rest alone.
	fn reconcile(&mut self, nodes: &[Node], edges: &[Edge]) -> SceneDiff;

	/// Moves every rendered entity to its current simulated position.
	fn update_transforms(&mut self, nodes: &[Node], edges: &[Edge]);
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
	nodes: HashMap<String, NodeSprite>,
	edges: HashMap<String, EdgeSprite>,
}

impl Scene {
	pub fn node(&self, id: &str) -> Option<&NodeSprite> {
		self.nodes.get(id)
	}

	pub fn edge(&self, id: &str) -> Option<&EdgeSprite> {
		self.edges.get(id)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}
}

impl SceneRenderer for Scene {
	fn reconcile(&mut self, nodes: &[Node], edges: &[Edge]) -> SceneDiff {
		let mut diff = SceneDiff::default();

		let live: HashSet<&str> = edges.iter().map(|e| e.id.as_str()).collect();
		self.edges.retain(|id, _| {
			let keep = live.contains(id.as_str());
			if !keep {
				diff.exited_edges.push(id.clone());
			}
			keep
		});
		let live: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		self.nodes.retain(|id, _| {
			let keep = live.contains(id.as_str());
			if !keep {
				diff.exited_nodes.push(id.clone());
			}
			keep
		});
		diff.exited_edges.sort();
		diff.exited_nodes.sort();

		for edge in edges {
			if self.edges.contains_key(&edge.id) {
				continue;
			}
			self.edges.insert(
				edge.id.clone(),
				EdgeSprite {
					source: edge.source.clone(),
					target: edge.target.clone(),
					width: edge.width(),
					x1: 0.0,
					y1: 0.0,
					x2: 0.0,
					y2: 0.0,
				},
			);
			diff.entered_edges.push(edge.id.clone());
		}
		for node in nodes {
			if self.nodes.contains_key(&node.id) {
				continue;
			}
			self.nodes.insert(
				node.id.clone(),
				NodeSprite {
					radius: node.radius(),
					color: color_for(&node.label),
					label: node.label.clone(),
					x: node.x,
					y: node.y,
				},
			);
			diff.entered_nodes.push(node.id.clone());
		}

		diff
	}

	fn update_transforms(&mut self, nodes: &[Node], edges: &[Edge]) {
		for node in nodes {
			if let Some(sprite) = self.nodes.get_mut(&node.id) {
				sprite.x = node.x;
				sprite.y = node.y;
			}
		}
		for edge in edges {
			let (Some(s), Some(t)) = (self.nodes.get(&edge.source), self.nodes.get(&edge.target)) else {
				continue;
			};
			let (x1, y1, x2, y2) = (s.x, s.y, t.x, t.y);
			if let Some(sprite) = self.edges.get_mut(&edge.id) {
				sprite.x1 = x1;
				sprite.y1 = y1;
				sprite.x2 = x2;
				sprite.y2 = y2;
			}
		}
	}
}
