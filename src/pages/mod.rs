pub mod knowledge_map;
pub mod not_found;
