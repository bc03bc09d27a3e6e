// Pipelines that write topics: ingestion, single-record analysis,
// batch re-analysis and demo seeding.

pub mod ingest;
pub mod reanalyze;
pub mod seed;
