//! Data models for rule records and pipeline configuration.

pub mod config;
pub mod rule;
