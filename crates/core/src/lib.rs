//! Core library: metadata extraction, taxonomy classification and the
//! folder-to-spreadsheet pipeline.

pub mod classifier;
pub mod config;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod scanner;
pub mod taxonomy;
pub mod writer;
