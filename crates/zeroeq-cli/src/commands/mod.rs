//! CLI command implementations.

pub mod common;
pub mod curve;
pub mod params;
pub mod simulate;
