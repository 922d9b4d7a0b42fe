//! Shared building blocks: index guards and the engine error type.

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;
pub mod errors;

pub use errors::{EngineError, EngineResult};
