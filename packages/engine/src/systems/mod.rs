//! Systems - per-cell transition rules run by the tick loop.

pub mod behaviors;
