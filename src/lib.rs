//! Urban planning analytics engine: survey aggregation, scenario
//! simulation, city health scoring, and mock Earth-observation queries.

pub mod analysis;
pub mod api;
pub mod earthdata;
pub mod error;
pub mod health;
pub mod insights;
pub mod output;
pub mod report;
pub mod scenario;
pub mod store;
pub mod survey;
pub mod types;
pub mod util;

pub use error::EngineError;
