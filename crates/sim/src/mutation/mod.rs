//! Mutation generators.
//!
//! Two passes produce the synthesized variation. The indel generator walks
//! segment chains in order and restructures them with randomized insertions
//! and deletions; the substitution generator then rewrites single bases in
//! place inside the original backing buffers. Both consume the same
//! explicitly passed random stream, which together with the fixed traversal
//! order makes a seeded run fully reproducible.

mod indel;
mod substitution;

pub use indel::IndelModel;
pub use substitution::SubstitutionModel;
