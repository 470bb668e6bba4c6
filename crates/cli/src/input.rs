//! FASTA input handling.

use anyhow::{bail, Context, Result};
use bio::io::fasta;
use mutforge_sim::simulation::InputRecord;
use mutforge_sim::Sequence;
use std::path::Path;

/// Read every record of a FASTA file into engine inputs, in file order.
///
/// Characters outside `ACGT` (either case) are an input error reported with
/// the offending record's identifier; so is a file with no records at all.
/// Empty records are caught later, when the engine refuses to build a chain
/// for them.
pub fn read_fasta(path: &Path) -> Result<Vec<InputRecord>> {
    let reader = fasta::Reader::from_file(path)
        .with_context(|| format!("Failed to open input FASTA {}", path.display()))?;

    let mut inputs = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to parse {}", path.display()))?;
        let sequence = Sequence::from_ascii(record.seq())
            .with_context(|| format!("Record '{}' in {}", record.id(), path.display()))?;
        inputs.push(InputRecord::new(record.id(), sequence));
    }

    if inputs.is_empty() {
        bail!("No sequence records found in {}", path.display());
    }
    Ok(inputs)
}
