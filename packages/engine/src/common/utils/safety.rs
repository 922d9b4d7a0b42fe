//! Index guards for the lock-free paths.
//!
//! The tick loop addresses the shared cell buffer and the change tracker by
//! global index while several chunk tasks run at once. An index outside the
//! buffer can only come from an arithmetic bug in boundary translation, so:
//!
//! In Debug mode: the guard panics with the offending index (fail loudly)
//! In Release mode: the guard yields `None` and the caller treats the
//! operation as a blocked move (never writes out of range)
//!
//! Usage:
//! ```rust
//! use sandgrid_engine::guarded_slot;
//!
//! let cells = vec![0u8; 16];
//! let slot: Option<usize> = guarded_slot!(5, cells.len());
//! assert_eq!(slot, Some(5));
//! ```

/// Bounds guard returning `Option<usize>`.
///
/// - Debug: `debug_assert!` on the index with a descriptive message
/// - Release: out-of-range index becomes `None`
#[macro_export]
macro_rules! guarded_slot {
    ($index:expr, $len:expr) => {{
        let index: usize = $index;
        let len: usize = $len;
        debug_assert!(
            index < len,
            "guarded_slot: index {} out of range for buffer of {}",
            index,
            len
        );
        if index < len {
            Some(index)
        } else {
            None
        }
    }};
}
