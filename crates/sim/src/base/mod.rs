//! Base types for sequence representation.
//!
//! This module provides the foundational types of the engine: nucleotides,
//! sequences, the backing buffer store, and the segment-chain arena that
//! edits are applied to.

mod buffer;
mod chain;
mod nucleotide;
mod sequence;

pub use buffer::{Buffer, BufferId, BufferOrigin, BufferStore};
pub use chain::{Segment, SegmentArena, SegmentChain, SegmentId};
pub use nucleotide::Nucleotide;
pub use sequence::Sequence;
