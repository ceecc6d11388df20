//! Campaign export core: document model, collection fetching, sheet shaping
//! and the export orchestrator.

pub mod artifact;
pub mod document;
pub mod export;
pub mod query;
pub mod sheet;
pub mod store;
