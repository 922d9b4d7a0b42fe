use super::*;

impl ChunkLayout {
    // === Adjacent chunks of an edge cell ===

    /// Offsets for each wake-mask bit: (dx, dy)
    ///   Bit 0: Left, Bit 1: Right, Bit 2: Top, Bit 3: Bottom
    ///   Bit 4: Top-Left, Bit 5: Top-Right, Bit 6: Bottom-Left, Bit 7: Bottom-Right
    const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
        (-1, 0),  // 0: Left
        (1, 0),   // 1: Right
        (0, -1),  // 2: Top
        (0, 1),   // 3: Bottom
        (-1, -1), // 4: Top-Left
        (1, -1),  // 5: Top-Right
        (-1, 1),  // 6: Bottom-Left
        (1, 1),   // 7: Bottom-Right
    ];

    /// Index = (on_left | on_right<<1 | on_top<<2 | on_bottom<<3)
    /// Value = bitmask of neighbours whose halo contains the cell.
    /// Opposite-edge combinations only occur with 1px chunks.
    const WAKE_MASK_LUT: [u8; 16] = [
        0b0000_0000, // 0: interior
        0b0000_0001, // 1: left
        0b0000_0010, // 2: right
        0b0000_0011, // 3: left+right
        0b0000_0100, // 4: top
        0b0001_0101, // 5: left+top
        0b0010_0110, // 6: right+top
        0b0011_0111, // 7: left+right+top
        0b0000_1000, // 8: bottom
        0b0100_1001, // 9: left+bottom
        0b1000_1010, // 10: right+bottom
        0b1100_1011, // 11: left+right+bottom
        0b0000_1100, // 12: top+bottom
        0b0101_1101, // 13: left+top+bottom
        0b1010_1110, // 14: right+top+bottom
        0b1111_1111, // 15: all edges
    ];

    /// Call `f` with the id of every in-world chunk, other than the owner,
    /// whose one-cell halo contains pixel `(x, y)`.
    pub fn for_each_adjacent_chunk(&self, x: u32, y: u32, mut f: impl FnMut(usize)) {
        let Some(owner) = self.chunk_of_pixel(x, y) else {
            return;
        };

        let local_x = x % self.chunk_size;
        let local_y = y % self.chunk_size;
        let edge = self.chunk_size - 1;

        let on_left = (local_x == 0) as usize;
        let on_right = (local_x == edge) as usize;
        let on_top = (local_y == 0) as usize;
        let on_bottom = (local_y == edge) as usize;

        let lut_idx = on_left | (on_right << 1) | (on_top << 2) | (on_bottom << 3);
        let mut mask = Self::WAKE_MASK_LUT[lut_idx];

        // Most edits are interior
        if mask == 0 {
            return;
        }

        while mask != 0 {
            let bit = mask.trailing_zeros() as usize;
            mask &= mask - 1; // Clear lowest set bit

            let (dx, dy) = Self::NEIGHBOR_OFFSETS[bit];
            let ncx = i64::from(owner.x) + dx;
            let ncy = i64::from(owner.y) + dy;

            if ncx >= 0
                && ncx < i64::from(self.chunks_wide)
                && ncy >= 0
                && ncy < i64::from(self.chunks_tall)
            {
                f(self.chunk_id(ChunkCoord::new(ncx as u32, ncy as u32)));
            }
        }
    }
}
