//! The mutation ledger: one immutable record per edit, in generation order,
//! plus the append-only writer that renders records as tab-separated text.
//!
//! Every position is reported in the *original* reference coordinate space,
//! not the post-edit space — that is what makes the ledger usable as ground
//! truth against the unmutated input.

use std::fmt;
use std::io::{self, Write};

/// Which kind of edit a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Insertion,
    Deletion,
    Substitution,
}

impl MutationKind {
    /// The ledger INFO column code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Insertion => "INS",
            Self::Deletion => "DEL",
            Self::Substitution => "SNP",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One applied edit: `{chrom, pos, ref, alt, kind}` with `pos` 0-based in
/// original-reference coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub chrom: String,
    pub pos: usize,
    pub reference: String,
    pub alternate: String,
    pub kind: MutationKind,
}

impl MutationRecord {
    /// An insertion of `alternate` at `pos`; `reference` is the single
    /// original base at the insertion site.
    pub fn insertion(chrom: &str, pos: usize, reference: char, alternate: String) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            reference: reference.to_string(),
            alternate,
            kind: MutationKind::Insertion,
        }
    }

    /// A deletion of `reference` starting at `pos`; the alternate column is
    /// the literal no-value marker.
    pub fn deletion(chrom: &str, pos: usize, reference: String) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            reference,
            alternate: ".".to_string(),
            kind: MutationKind::Deletion,
        }
    }

    /// A single-base substitution at `pos`.
    pub fn substitution(chrom: &str, pos: usize, reference: char, alternate: char) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            reference: reference.to_string(),
            alternate: alternate.to_string(),
            kind: MutationKind::Substitution,
        }
    }
}

impl fmt::Display for MutationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.chrom, self.pos, self.reference, self.alternate, self.kind
        )
    }
}

/// Append-only writer for the mutation ledger.
///
/// Writes the two header lines on construction, then one row per record in
/// whatever order records are handed in — callers pass them in generation
/// order.
#[derive(Debug)]
pub struct LedgerWriter<W: Write> {
    out: W,
}

impl<W: Write> LedgerWriter<W> {
    /// Create a writer and emit the header lines, naming the reference the
    /// ledger's coordinates refer to.
    pub fn new(mut out: W, reference: &str) -> io::Result<Self> {
        writeln!(out, "##reference={reference}")?;
        writeln!(out, "#CHROM\tPOS\tREF\tALT\tINFO")?;
        Ok(Self { out })
    }

    /// Append a single record.
    pub fn write_record(&mut self, record: &MutationRecord) -> io::Result<()> {
        writeln!(self.out, "{record}")
    }

    /// Append every record in iteration order.
    pub fn write_all<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a MutationRecord>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(MutationKind::Insertion.code(), "INS");
        assert_eq!(MutationKind::Deletion.code(), "DEL");
        assert_eq!(MutationKind::Substitution.code(), "SNP");
    }

    #[test]
    fn test_insertion_row() {
        let record = MutationRecord::insertion("chr1", 4, 'A', "TT".to_string());
        assert_eq!(record.to_string(), "chr1\t4\tA\tTT\tINS");
    }

    #[test]
    fn test_deletion_row() {
        let record = MutationRecord::deletion("chr1", 2, "GT".to_string());
        assert_eq!(record.to_string(), "chr1\t2\tGT\t.\tDEL");
    }

    #[test]
    fn test_substitution_row() {
        let record = MutationRecord::substitution("chr1", 0, 'A', 'T');
        assert_eq!(record.to_string(), "chr1\t0\tA\tT\tSNP");
    }

    #[test]
    fn test_writer_headers_and_order() {
        let records = vec![
            MutationRecord::insertion("chr1", 4, 'A', "TT".to_string()),
            MutationRecord::deletion("chr1", 2, "GT".to_string()),
            MutationRecord::substitution("chr2", 0, 'A', 'T'),
        ];

        let mut buf = Vec::new();
        let mut writer = LedgerWriter::new(&mut buf, "ref.fa").unwrap();
        writer.write_all(&records).unwrap();
        writer.flush().unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "##reference=ref.fa");
        assert_eq!(lines[1], "#CHROM\tPOS\tREF\tALT\tINFO");
        assert_eq!(lines[2], "chr1\t4\tA\tTT\tINS");
        assert_eq!(lines[3], "chr1\t2\tGT\t.\tDEL");
        assert_eq!(lines[4], "chr2\t0\tA\tT\tSNP");
        assert_eq!(lines.len(), 5);
    }
}
