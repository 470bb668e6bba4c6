//! Run configuration and the engine that executes both mutation passes.

mod engine;
mod parameters;

pub use engine::{InputRecord, Simulation};
pub use parameters::Configuration;
