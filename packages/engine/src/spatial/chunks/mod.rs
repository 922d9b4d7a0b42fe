//! Chunk System - fixed-size chunk tiling of the cell grid.
//!
//! A chunk never owns cells. It is a coordinate into the world's single cell
//! buffer plus two activity flags; all geometry lives in [`ChunkLayout`].

use crate::common::{EngineError, EngineResult};

mod bitset;
mod boundary;
mod chunk;
mod lifecycle;
mod phases;
mod wake;

pub use bitset::ChangeTracker;
pub use boundary::HALO;
pub use chunk::Chunk;
pub use phases::{chebyshev_distance, phase_groups, PhaseKey, PHASE_COUNT, PHASE_MODULUS};

/// Chunk position in chunk units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: u32,
    pub y: u32,
}

impl ChunkCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Grow by `margin` on every side, clipped to a `width x height` world.
    pub fn grown(&self, margin: u32, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x0: self.x0.saturating_sub(margin),
            y0: self.y0.saturating_sub(margin),
            x1: self.x1.saturating_add(margin).min(width),
            y1: self.y1.saturating_add(margin).min(height),
        }
    }
}

/// Geometry of a world tiled by square chunks.
///
/// Invariant: `width == chunks_wide * chunk_size` and
/// `height == chunks_tall * chunk_size`, and `width * height` fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    chunks_wide: u32,
    chunks_tall: u32,
    chunk_size: u32,
    width: u32,
    height: u32,
    chunk_count: usize,
    cell_count: usize,
}

impl ChunkLayout {
    pub fn new(chunks_wide: u32, chunks_tall: u32, chunk_size: u32) -> EngineResult<Self> {
        if chunks_wide == 0 {
            return Err(EngineError::ZeroDimension { field: "chunksWide" });
        }
        if chunks_tall == 0 {
            return Err(EngineError::ZeroDimension { field: "chunksTall" });
        }
        if chunk_size == 0 {
            return Err(EngineError::ZeroDimension { field: "chunkSize" });
        }

        let overflow = || EngineError::DimensionOverflow {
            chunks_wide,
            chunks_tall,
            chunk_size,
        };
        let width = chunks_wide.checked_mul(chunk_size).ok_or_else(overflow)?;
        let height = chunks_tall.checked_mul(chunk_size).ok_or_else(overflow)?;
        let cell_count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(overflow)?;
        let chunk_count = (chunks_wide as usize)
            .checked_mul(chunks_tall as usize)
            .ok_or_else(overflow)?;

        Ok(Self {
            chunks_wide,
            chunks_tall,
            chunk_size,
            width,
            height,
            chunk_count,
            cell_count,
        })
    }

    // === Dimensions ===

    #[inline]
    pub fn chunks_wide(&self) -> u32 { self.chunks_wide }

    #[inline]
    pub fn chunks_tall(&self) -> u32 { self.chunks_tall }

    #[inline]
    pub fn chunk_size(&self) -> u32 { self.chunk_size }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn chunk_count(&self) -> usize { self.chunk_count }

    #[inline]
    pub fn cell_count(&self) -> usize { self.cell_count }

    // === Chunk indexing ===

    /// Linear chunk id: `chunks_wide * y + x`.
    #[inline]
    pub fn chunk_id(&self, coord: ChunkCoord) -> usize {
        coord.y as usize * self.chunks_wide as usize + coord.x as usize
    }

    #[inline]
    pub fn chunk_coord(&self, id: usize) -> ChunkCoord {
        let wide = self.chunks_wide as usize;
        ChunkCoord::new((id % wide) as u32, (id / wide) as u32)
    }

    #[inline]
    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        coord.x < self.chunks_wide && coord.y < self.chunks_tall
    }

    /// Chunk owning the pixel, or `None` outside the world.
    #[inline]
    pub fn chunk_of_pixel(&self, x: u32, y: u32) -> Option<ChunkCoord> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(ChunkCoord::new(x / self.chunk_size, y / self.chunk_size))
    }

    /// Pixel origin (top-left) of a chunk.
    #[inline]
    pub fn origin(&self, coord: ChunkCoord) -> (u32, u32) {
        (coord.x * self.chunk_size, coord.y * self.chunk_size)
    }

    pub fn pixel_rect(&self, coord: ChunkCoord) -> PixelRect {
        let (x0, y0) = self.origin(coord);
        PixelRect {
            x0,
            y0,
            x1: x0 + self.chunk_size,
            y1: y0 + self.chunk_size,
        }
    }

    /// Row-major global index of an in-world pixel.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_rejects_degenerate_dimensions() {
        assert!(matches!(
            ChunkLayout::new(0, 1, 4),
            Err(EngineError::ZeroDimension { field: "chunksWide" })
        ));
        assert!(matches!(
            ChunkLayout::new(1, 0, 4),
            Err(EngineError::ZeroDimension { field: "chunksTall" })
        ));
        assert!(matches!(
            ChunkLayout::new(1, 1, 0),
            Err(EngineError::ZeroDimension { field: "chunkSize" })
        ));
        assert!(matches!(
            ChunkLayout::new(u32::MAX, 1, 2),
            Err(EngineError::DimensionOverflow { .. })
        ));
    }

    #[test]
    fn ids_and_coords_agree() {
        let layout = ChunkLayout::new(5, 3, 8).unwrap();
        assert_eq!(layout.width(), 40);
        assert_eq!(layout.height(), 24);
        assert_eq!(layout.chunk_count(), 15);
        assert_eq!(layout.cell_count(), 960);

        for id in 0..layout.chunk_count() {
            let coord = layout.chunk_coord(id);
            assert!(layout.contains_chunk(coord));
            assert_eq!(layout.chunk_id(coord), id);
        }
        assert_eq!(layout.chunk_id(ChunkCoord::new(2, 1)), 7);
    }

    #[test]
    fn pixels_map_to_owning_chunk() {
        let layout = ChunkLayout::new(3, 2, 4).unwrap();
        assert_eq!(layout.chunk_of_pixel(0, 0), Some(ChunkCoord::new(0, 0)));
        assert_eq!(layout.chunk_of_pixel(3, 3), Some(ChunkCoord::new(0, 0)));
        assert_eq!(layout.chunk_of_pixel(4, 3), Some(ChunkCoord::new(1, 0)));
        assert_eq!(layout.chunk_of_pixel(11, 7), Some(ChunkCoord::new(2, 1)));
        assert_eq!(layout.chunk_of_pixel(12, 0), None);
        assert_eq!(layout.chunk_of_pixel(0, 8), None);

        let rect = layout.pixel_rect(ChunkCoord::new(2, 1));
        assert_eq!(rect, PixelRect { x0: 8, y0: 4, x1: 12, y1: 8 });
        assert!(rect.contains(8, 4));
        assert!(!rect.contains(12, 4));
    }

    #[test]
    fn grown_rect_is_clipped_to_world() {
        let rect = PixelRect { x0: 0, y0: 4, x1: 4, y1: 8 };
        let grown = rect.grown(1, 12, 8);
        assert_eq!(grown, PixelRect { x0: 0, y0: 3, x1: 5, y1: 8 });
    }
}
