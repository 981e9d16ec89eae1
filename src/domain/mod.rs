pub mod posts;
pub mod types;
