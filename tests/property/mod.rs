//! Property-based tests for ingestion, batch state, and mail links

mod batch_properties;
mod ingest_properties;
