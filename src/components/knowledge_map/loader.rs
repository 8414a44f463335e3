//! Fetching the tag graph from the backend, with a canned map to fall back on.

use anyhow::{Context, Result, anyhow, bail};
use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::types::{KnowledgeMapData, MapEdge, MapNode};

pub const KNOWLEDGE_MAP_ENDPOINT: &str = "/api/knowledge-map";

const FALLBACK_TOPICS: [&str; 5] = [
	"Python",
	"JavaScript",
	"Machine Learning",
	"Web Development",
	"Data Science",
];

/// Five generic topics linked as a chain, shown when the backend is
/// unreachable.
pub fn fallback_data() -> KnowledgeMapData {
	let nodes = FALLBACK_TOPICS
		.iter()
		.enumerate()
		.map(|(i, topic)| MapNode {
			id: i.to_string(),
			label: Some(topic.to_string()),
			data: None,
		})
		.collect();
	let edges = (1..FALLBACK_TOPICS.len())
		.map(|i| MapEdge {
			from: (i - 1).to_string(),
			to: i.to_string(),
			label: None,
			data: None,
		})
		.collect();
	KnowledgeMapData { nodes, edges }
}

pub fn parse(body: &str) -> Result<KnowledgeMapData> {
	serde_json::from_str(body).context("knowledge map payload is not valid JSON")
}

pub async fn fetch_knowledge_map(endpoint: &str) -> Result<KnowledgeMapData> {
	let window = web_sys::window().context("no window to fetch from")?;
	let response = JsFuture::from(window.fetch_with_str(endpoint))
		.await
		.map_err(|e| anyhow!("request to {} failed: {:?}", endpoint, e))?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| anyhow!("fetch of {} did not yield a Response", endpoint))?;
	if !response.ok() {
		bail!("{} answered with status {}", endpoint, response.status());
	}
	let text = response
		.text()
		.map_err(|e| anyhow!("unreadable body: {:?}", e))?;
	let body = JsFuture::from(text)
		.await
		.map_err(|e| anyhow!("unreadable body: {:?}", e))?
		.as_string()
		.context("response body is not text")?;
	parse(&body).with_context(|| format!("decoding {}", endpoint))
}

/// The backend's map, or [`fallback_data`] if it cannot be had.
pub async fn load_or_fallback(endpoint: &str) -> KnowledgeMapData {
	match fetch_knowledge_map(endpoint).await {
		Ok(data) => data,
		Err(e) => {
			error!("Error loading knowledge map: {:#}", e);
			fallback_data()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_map::layout::LayoutConfig;
	use crate::components::knowledge_map::state::GraphView;

	#[test]
	fn fallback_is_a_five_topic_chain() {
		let mut view = GraphView::new(800.0, 600.0, LayoutConfig::default());
		view.load(&fallback_data());

		let labels: Vec<_> = view.graph().nodes().iter().map(|n| n.label.as_str()).collect();
		assert_eq!(labels, FALLBACK_TOPICS);
		let ids: Vec<_> = view.graph().nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["0", "1", "2", "3", "4"]);
		let edges: Vec<_> = view.graph().edges().iter().map(|e| e.id.as_str()).collect();
		assert_eq!(edges, ["0-1", "1-2", "2-3", "3-4"]);
	}

	#[test]
	fn parse_reports_malformed_payloads() {
		assert!(parse("<html>502 Bad Gateway</html>").is_err());
		assert!(parse(r#"{"nodes": "nope"}"#).is_err());
		let data = parse(r#"{"nodes": [{"id": "a", "label": "A"}], "edges": []}"#).unwrap();
		assert_eq!(data.nodes.len(), 1);
	}
}
