pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod fetch;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod query;
pub mod stats;
