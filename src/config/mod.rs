pub mod job;
pub mod merged;
pub mod settings;
