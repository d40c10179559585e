pub mod document;
pub mod node_id;
