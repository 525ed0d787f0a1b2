//! UI components for SmartDoc Builder

pub mod builder;
pub mod status;
