//! Configuration for one generation run.
//!
//! The defaults mirror the rates and weight tables the tool ships with;
//! everything is serde-serializable so a whole model can be loaded from a
//! JSON file and selectively overridden from the command line.

use crate::errors::ModelError;
use crate::mutation::{IndelModel, SubstitutionModel};
use serde::{Deserialize, Serialize};

/// Default per-position indel trial probability.
pub const DEFAULT_INDEL_RATE: f64 = 0.1;
/// Default per-position substitution trial probability.
pub const DEFAULT_SNP_RATE: f64 = 0.1;

/// Full mutation-model configuration.
///
/// The length tables are relative sampling weights (they need not sum
/// to 1); index 0 of each must carry weight 0. `substitution_weights` is a
/// 4x4 matrix in A, C, G, T order whose diagonal must be zero. Validation
/// happens when the models are built, not at deserialization time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Per-position Bernoulli probability of an indel trial succeeding
    pub indel_rate: f64,
    /// Per-position Bernoulli probability of a substitution trial succeeding
    pub snp_rate: f64,
    /// Relative weights over insertion lengths; index = length in bases
    pub insertion_length_weights: Vec<f64>,
    /// Relative weights over deletion lengths; index = length in bases
    pub deletion_length_weights: Vec<f64>,
    /// Relative weights over the bases synthesized for insertions
    pub insertion_base_weights: [f64; 4],
    /// Replacement weights per reference base, diagonal forced to zero
    pub substitution_weights: [[f64; 4]; 4],
    /// Random seed; `None` draws a fresh stream from the operating system
    pub seed: Option<u64>,
}

impl Default for Configuration {
    fn default() -> Self {
        // uniform replacement choice, no self-transitions
        let mut substitution_weights = [[1.0; 4]; 4];
        for (i, row) in substitution_weights.iter_mut().enumerate() {
            row[i] = 0.0;
        }

        Self {
            indel_rate: DEFAULT_INDEL_RATE,
            snp_rate: DEFAULT_SNP_RATE,
            insertion_length_weights: vec![0.0, 0.3, 0.2, 0.2, 0.05, 0.05],
            deletion_length_weights: vec![0.0, 0.5, 0.2, 0.2, 0.05, 0.05],
            insertion_base_weights: [0.25; 4],
            substitution_weights,
            seed: None,
        }
    }
}

impl Configuration {
    /// Build the validated indel model.
    pub fn indel_model(&self) -> Result<IndelModel, ModelError> {
        IndelModel::new(
            self.indel_rate,
            &self.insertion_length_weights,
            &self.deletion_length_weights,
            self.insertion_base_weights,
        )
    }

    /// Build the validated substitution model.
    pub fn substitution_model(&self) -> Result<SubstitutionModel, ModelError> {
        SubstitutionModel::new(self.snp_rate, self.substitution_weights)
    }
}
