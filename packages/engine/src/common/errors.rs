use thiserror::Error;

/// Everything that can go wrong outside of a running tick.
///
/// Configuration problems surface when a world is built; a tick itself never
/// fails (blocked moves are not errors).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("world dimension `{field}` must be positive")]
    ZeroDimension { field: &'static str },

    #[error("{chunks_wide}x{chunks_tall} chunks of {chunk_size}px overflow the addressable grid")]
    DimensionOverflow {
        chunks_wide: u32,
        chunks_tall: u32,
        chunk_size: u32,
    },

    #[error("{width}x{height} grid is not an exact tiling of {chunk_size}px chunks")]
    NotChunkAligned {
        width: u32,
        height: u32,
        chunk_size: u32,
    },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("no chunk with id {id} (world has {count})")]
    UnknownChunk { id: usize, count: usize },

    #[error("unknown cell state id {0}")]
    InvalidCellState(u8),

    #[error("failed to parse world config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
