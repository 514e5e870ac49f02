//! Data models for registration field extraction.

pub mod config;
pub mod fields;
pub mod result;
pub mod summary;
