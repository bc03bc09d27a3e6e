// Convolog: topic analytics for conversation logs
//
// This is the library root. Each module corresponds to a major subsystem
// of the ingest-and-analyze pipeline.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod output;
pub mod pipeline;
pub mod status;
pub mod topics;

#[cfg(feature = "web")]
pub mod web;
