//! SmartDoc Builder - mail-merge report generator
//!
//! Loads structured data (JSON, XML or CSV), merges it into a Word template
//! via mail-merge fields, and exports the result to PDF, DOCX, HTML or TXT.

pub mod app;
pub mod core;
pub mod engine;
pub mod ingest;
pub mod ui;
