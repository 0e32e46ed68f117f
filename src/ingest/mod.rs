// Ingestion — export parsing and per-person aggregation.

pub mod profile;
pub mod records;
