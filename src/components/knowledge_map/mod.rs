//! Force-directed map of note tags.

mod color;
mod component;
mod energy;
mod force;
mod graph;
mod layout;
mod loader;
mod navigation;
mod render;
mod scene;
mod spring;
mod state;
mod types;

pub use color::color_for;
pub use component::KnowledgeMapCanvas;
pub use energy::Energy;
pub use graph::{Edge, Graph, Link, Node};
pub use layout::{EngineKind, LayoutConfig, LayoutEngine, StepContext};
pub use scene::{EdgeSprite, NodeSprite, Scene, SceneDiff, SceneRenderer};
pub use state::{Command, DragState, GraphEvent, GraphView, PanState, ViewTransform};
pub use types::{EdgeAttrs, KnowledgeMapData, MapEdge, MapNode, NodeAttrs};
