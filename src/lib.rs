pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod inference;
pub mod logging;
pub mod pipeline;
pub mod types;
