//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use mutforge_sim::prelude::*;
//! use std::str::FromStr;
//!
//! let seq = Sequence::from_str("ACGT").unwrap();
//! ```

pub use crate::base::{BufferOrigin, BufferStore, Nucleotide, SegmentArena, SegmentChain, Sequence};
pub use crate::errors;
pub use crate::ledger::{LedgerWriter, MutationKind, MutationRecord};
pub use crate::mutation::{IndelModel, SubstitutionModel};
pub use crate::simulation::{Configuration, InputRecord, Simulation};
