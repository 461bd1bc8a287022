//! Building interior generator library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod building;
pub mod config;
pub mod export;
pub mod seeds;
pub mod tilemap;
