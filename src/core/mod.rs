pub mod types;
pub mod validation;
pub mod store;
pub mod sort;
pub mod config;
pub mod error;
pub mod stats;
