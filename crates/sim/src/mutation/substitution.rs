use crate::base::{BufferOrigin, BufferStore, Nucleotide};
use crate::errors::ModelError;
use crate::ledger::MutationRecord;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Randomized single-base substitution generator.
///
/// The model holds one discrete distribution per reference base, built from
/// a 4x4 weight matrix indexed in A, C, G, T order. The diagonal must be
/// zero — a base can never "substitute" to itself — which the constructor
/// enforces and the sampler re-checks as a fatal assertion.
///
/// Substitution is the second pass: it rewrites bytes in place inside the
/// original backing buffers, after chain topology has settled, so the new
/// bases stay visible through whichever segments still reference the
/// mutated region.
#[derive(Debug, Clone)]
pub struct SubstitutionModel {
    rate: f64,
    targets: [WeightedIndex<f64>; 4],
}

impl SubstitutionModel {
    /// Build a model from a trial probability and a 4x4 weight matrix.
    ///
    /// Row `i` weights the replacement choices when the reference base has
    /// index `i`. Weights are relative, not normalized probabilities.
    pub fn new(rate: f64, weights: [[f64; 4]; 4]) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ModelError::InvalidRate(rate));
        }
        for (i, row) in weights.iter().enumerate() {
            if row[i] != 0.0 {
                return Err(ModelError::InvalidWeights {
                    table: "substitutions",
                    reason: format!("diagonal entry {i} must be 0, got {}", row[i]),
                });
            }
        }

        let targets = [
            row_table(&weights[0])?,
            row_table(&weights[1])?,
            row_table(&weights[2])?,
            row_table(&weights[3])?,
        ];

        Ok(Self { rate, targets })
    }

    /// Per-position trial probability.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Sample a replacement for `base` from its row of the matrix.
    ///
    /// # Panics
    /// Panics if the sampled replacement equals the reference; with a zero
    /// diagonal that can only happen if the engine itself is defective, and
    /// emitting a self-substitution would corrupt the ledger.
    pub fn mutate_base<R: Rng + ?Sized>(&self, base: Nucleotide, rng: &mut R) -> Nucleotide {
        let idx = self.targets[base.to_index() as usize].sample(rng);
        // the row has exactly four entries, one per base
        let replacement = Nucleotide::from_index(idx as u8).unwrap();
        assert!(
            replacement != base,
            "sampled substitution equals its reference base {base}"
        );
        replacement
    }

    /// Walk every original buffer in input order and apply randomized
    /// substitutions in place, appending one SNP record per edit. Returns
    /// the number of edits applied.
    ///
    /// Synthesized buffers are never visited: inserted content is not part
    /// of the original reference coordinate space the ledger reports in.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        store: &mut BufferStore,
        rng: &mut R,
        records: &mut Vec<MutationRecord>,
    ) -> usize {
        let mut count = 0;

        let ids: Vec<_> = store.ids().collect();
        for id in ids {
            let chrom = match store.get(id).origin() {
                BufferOrigin::Original { name } => name.clone(),
                BufferOrigin::Synthesized => continue,
            };

            for pos in 0..store.get(id).len() {
                if rng.random_bool(self.rate) {
                    let buffer = store.get_mut(id);
                    let reference = buffer.base_at(pos);
                    let replacement = self.mutate_base(reference, rng);
                    buffer.as_mut_slice()[pos] = replacement;

                    records.push(MutationRecord::substitution(
                        &chrom,
                        pos,
                        reference.to_char(),
                        replacement.to_char(),
                    ));
                    count += 1;
                }
            }
        }

        count
    }
}

/// Validate and build the distribution for one matrix row.
fn row_table(row: &[f64; 4]) -> Result<WeightedIndex<f64>, ModelError> {
    WeightedIndex::new(row.iter().copied()).map_err(|e| ModelError::InvalidWeights {
        table: "substitutions",
        reason: e.to_string(),
    })
}
