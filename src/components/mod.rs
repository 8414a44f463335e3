//! Reusable UI components.

pub mod knowledge_map;
