use crate::base::{BufferStore, Nucleotide, SegmentArena, SegmentChain, SegmentId, Sequence};
use crate::errors::ModelError;
use crate::ledger::MutationRecord;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Randomized insertion/deletion generator.
///
/// At every originally present base position the generator runs one
/// Bernoulli trial with the configured rate; on success a fair coin picks
/// insertion or deletion, and the edit length is drawn from the matching
/// weight table. The tables hold relative sampling weights — they need not
/// sum to 1 — but index 0 must carry weight 0, since a zero-length edit is
/// meaningless.
///
/// Inserted bases are sampled independently from `insertion_base_weights`
/// (uniform over A, C, G, T by default).
#[derive(Debug, Clone)]
pub struct IndelModel {
    rate: f64,
    insertion_len: WeightedIndex<f64>,
    deletion_len: WeightedIndex<f64>,
    insertion_base: WeightedIndex<f64>,
}

impl IndelModel {
    /// Build a model, validating the rate and all three weight tables.
    pub fn new(
        rate: f64,
        insertion_length_weights: &[f64],
        deletion_length_weights: &[f64],
        insertion_base_weights: [f64; 4],
    ) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ModelError::InvalidRate(rate));
        }
        let insertion_len = length_table("insertion lengths", insertion_length_weights)?;
        let deletion_len = length_table("deletion lengths", deletion_length_weights)?;
        let insertion_base =
            WeightedIndex::new(insertion_base_weights).map_err(|e| ModelError::InvalidWeights {
                table: "insertion bases",
                reason: e.to_string(),
            })?;

        Ok(Self {
            rate,
            insertion_len,
            deletion_len,
            insertion_base,
        })
    }

    /// Per-position trial probability.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Walk every chain and apply randomized indels, appending one ledger
    /// record per edit. Returns the number of edits applied.
    ///
    /// Chains are visited in input order, segments in chain order,
    /// positions ascending; the stream is consumed in the fixed order
    /// trial, coin, length, inserted bases. This ordering is part of the
    /// reproducibility contract.
    ///
    /// After an insertion, scanning resumes at the segment returned by the
    /// chain — the piece that follows the inserted content — so the freshly
    /// synthesized bases are never themselves candidates for mutation.
    /// After a deletion, scanning resumes at the first live segment past
    /// the removed span, or moves to the next chain when the deletion ran
    /// off the end.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        chains: &[SegmentChain],
        arena: &mut SegmentArena,
        store: &mut BufferStore,
        rng: &mut R,
        records: &mut Vec<MutationRecord>,
    ) -> usize {
        let mut count = 0;

        for chain in chains {
            let chrom = chain.name();
            let mut cursor = Some(chain.head());

            'segments: while let Some(seg_id) = cursor {
                let mut pos = arena.get(seg_id).start();
                loop {
                    let seg = arena.get(seg_id);
                    if seg.is_retired() || pos > seg.end() {
                        break;
                    }

                    if rng.random_bool(self.rate) {
                        count += 1;
                        if rng.random_bool(0.5) {
                            cursor = Some(self.insert_at(
                                seg_id, pos, chrom, arena, store, rng, records,
                            ));
                        } else {
                            cursor = self.delete_at(seg_id, pos, chrom, arena, store, rng, records);
                        }
                        continue 'segments;
                    }
                    pos += 1;
                }
                cursor = arena.get(seg_id).next();
            }
        }

        count
    }

    /// Apply one insertion at `pos` and return the segment to resume from.
    #[allow(clippy::too_many_arguments)]
    fn insert_at<R: Rng + ?Sized>(
        &self,
        seg_id: SegmentId,
        pos: usize,
        chrom: &str,
        arena: &mut SegmentArena,
        store: &mut BufferStore,
        rng: &mut R,
        records: &mut Vec<MutationRecord>,
    ) -> SegmentId {
        let len = self.insertion_len.sample(rng);
        let bases = self.synthesize(len, rng);
        let alt: String = bases.iter().map(|b| b.to_char()).collect();

        let reference = store
            .get(arena.get(seg_id).buffer())
            .base_at(pos)
            .to_char();
        let buffer = store.insert_synthesized(Sequence::from_nucleotides(bases));
        let resume = arena.insert_sequence(seg_id, pos, buffer, store);

        records.push(MutationRecord::insertion(chrom, pos, reference, alt));
        resume
    }

    /// Apply one deletion at `pos` and return the segment to resume from,
    /// or `None` when the deletion consumed the rest of the chain.
    #[allow(clippy::too_many_arguments)]
    fn delete_at<R: Rng + ?Sized>(
        &self,
        seg_id: SegmentId,
        pos: usize,
        chrom: &str,
        arena: &mut SegmentArena,
        store: &BufferStore,
        rng: &mut R,
        records: &mut Vec<MutationRecord>,
    ) -> Option<SegmentId> {
        let len = self.deletion_len.sample(rng);
        // capture the doomed text first: it stays in its buffer but is about
        // to become unreachable through the chain
        let reference = copy_span(arena, store, seg_id, pos, len);
        let resume = arena.delete_section(seg_id, pos, len);

        records.push(MutationRecord::deletion(chrom, pos, reference));
        resume
    }

    /// Sample `len` nucleotides for an insertion.
    fn synthesize<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Vec<Nucleotide> {
        (0..len)
            .map(|_| {
                let idx = self.insertion_base.sample(rng) as u8;
                // the table has exactly four entries, one per base
                Nucleotide::from_index(idx).unwrap()
            })
            .collect()
    }
}

/// Validate and build one of the two edit-length tables.
fn length_table(table: &'static str, weights: &[f64]) -> Result<WeightedIndex<f64>, ModelError> {
    if weights.len() < 2 {
        return Err(ModelError::InvalidWeights {
            table,
            reason: format!("need at least two entries, got {}", weights.len()),
        });
    }
    if weights[0] != 0.0 {
        return Err(ModelError::InvalidWeights {
            table,
            reason: format!("index 0 must carry weight 0, got {}", weights[0]),
        });
    }
    WeightedIndex::new(weights.iter().copied()).map_err(|e| ModelError::InvalidWeights {
        table,
        reason: e.to_string(),
    })
}

/// Copy `len` visible bases starting at `pos` in segment `seg`, walking
/// across segment boundaries as needed. Stops early at the chain's end.
///
/// Used to capture the text a deletion is about to hide, for the ledger.
fn copy_span(
    arena: &SegmentArena,
    store: &BufferStore,
    seg: SegmentId,
    pos: usize,
    len: usize,
) -> String {
    assert!(
        arena.get(seg).contains(pos),
        "copy position {pos} outside live range"
    );

    let mut out = String::with_capacity(len);
    let mut cursor = seg;
    let mut pos = pos;
    while out.len() < len {
        let seg = arena.get(cursor);
        if pos <= seg.end() && !seg.is_retired() {
            out.push(store.get(seg.buffer()).base_at(pos).to_char());
            pos += 1;
        } else {
            match seg.next() {
                Some(n) => {
                    cursor = n;
                    pos = arena.get(n).start();
                }
                None => break,
            }
        }
    }
    out
}
