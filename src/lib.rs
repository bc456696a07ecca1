pub mod config;
pub mod error;
pub mod pipeline;
pub mod recognize;
pub mod segment;
