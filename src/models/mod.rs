//! Core data models for neighbourhood resolution.

pub mod region;

pub use region::{format_code, Region, RegionId, Resolution, NSA};
