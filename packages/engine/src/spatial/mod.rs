//! Spatial layer: the flat cell grid and its partition into chunks.

pub mod chunks;
pub mod grid;
