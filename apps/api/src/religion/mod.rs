// Religion generation: prompt building, response coercion, orchestration and storage.
// All backend calls go through llm_client::TextGenerator.

pub mod coercion;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod store;
