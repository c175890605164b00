pub mod domain;
pub mod dto;
pub mod ids;

pub use ids::parse_object_id;
