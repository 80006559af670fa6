//! CLI command implementations.

pub mod bounds;
pub mod common;
pub mod config;
pub mod project;
pub mod render;
