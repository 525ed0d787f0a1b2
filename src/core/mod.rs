//! Core functionality: canonical record, formats, configuration, errors

pub mod config;
pub mod error;
pub mod report;
