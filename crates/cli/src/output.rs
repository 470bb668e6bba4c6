//! Output handling: the mutation ledger and the mutated FASTA.

use anyhow::{Context, Result};
use bio::io::fasta;
use mutforge_sim::ledger::{LedgerWriter, MutationRecord};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Default mutated-FASTA path: the input's file name with a `mut_` prefix,
/// in the input's directory.
pub fn mutated_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.fa".to_string());
    input.with_file_name(format!("mut_{name}"))
}

/// Write the ledger: headers naming `reference`, then one row per record
/// in generation order.
pub fn write_ledger(path: &Path, reference: &Path, records: &[MutationRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create ledger {}", path.display()))?;
    let mut writer = LedgerWriter::new(BufWriter::new(file), &reference.display().to_string())
        .context("Failed to write ledger header")?;
    writer
        .write_all(records)
        .with_context(|| format!("Failed to write ledger {}", path.display()))?;
    writer.flush().context("Failed to flush ledger")?;
    Ok(())
}

/// Write the mutated sequences as FASTA, one record per input sequence, in
/// input order.
pub fn write_fasta(path: &Path, sequences: &[(String, String)]) -> Result<()> {
    let mut writer = fasta::Writer::to_file(path)
        .with_context(|| format!("Failed to create output FASTA {}", path.display()))?;
    for (id, content) in sequences {
        writer
            .write(id, None, content.as_bytes())
            .with_context(|| format!("Failed to write record '{id}'"))?;
    }
    writer.flush().context("Failed to flush output FASTA")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutated_path_prefixes_file_name() {
        assert_eq!(
            mutated_path(Path::new("data/ref.fa")),
            PathBuf::from("data/mut_ref.fa")
        );
        assert_eq!(mutated_path(Path::new("ref.fa")), PathBuf::from("mut_ref.fa"));
    }
}
