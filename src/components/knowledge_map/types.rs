use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attributes attached to a tag node by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
	/// Circle radius in graph units.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<f64>,
	/// Number of notes carrying the tag.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub strength: Option<f64>,
	/// Anything else the backend chose to send along.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Attributes attached to a co-occurrence edge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttrs {
	/// Number of notes in which both tags appear.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub weight: Option<u32>,
	/// Stroke width.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub strength: Option<f64>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
	pub id: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub data: Option<NodeAttrs>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapEdge {
	pub from: String,
	pub to: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub data: Option<EdgeAttrs>,
}

/// Payload of `GET /api/knowledge-map`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeMapData {
	#[serde(default)]
	pub nodes: Vec<MapNode>,
	#[serde(default)]
	pub edges: Vec<MapEdge>,
}
