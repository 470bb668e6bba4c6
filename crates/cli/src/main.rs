//! mutforge CLI - command-line front end for the variation synthesizer.

mod input;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use mutforge_sim::ledger::MutationKind;
use mutforge_sim::simulation::{Configuration, Simulation};
use std::path::PathBuf;
use std::time::Instant;

/// mutforge: a randomized genetic-variation synthesizer
///
/// Applies randomized insertions, deletions, and single-base substitutions
/// to every sequence of a reference FASTA, writing the mutated sequences
/// plus a ground-truth ledger of every edit in original coordinates.
#[derive(Parser, Debug)]
#[command(name = "mutforge")]
#[command(author, version, about = "Synthesizes randomized genetic variation over reference sequences", long_about = None)]
struct Cli {
    /// Input reference FASTA
    input: PathBuf,

    /// Per-position indel trial probability (overrides the model file)
    #[arg(long)]
    indel_rate: Option<f64>,

    /// Per-position substitution trial probability (overrides the model file)
    #[arg(long)]
    snp_rate: Option<f64>,

    /// Random seed (overrides the model file); omit for a fresh stream
    #[arg(long)]
    seed: Option<u64>,

    /// JSON mutation model file (rates, weight tables, seed)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Mutated FASTA path (default: mut_<input name>, next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Mutation ledger path
    #[arg(short, long, default_value = "mutation_record")]
    ledger: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let started = Instant::now();

    println!("🧬 mutforge - synthesizing variation");
    println!("====================================\n");

    let config = load_configuration(&cli)?;
    let inputs = input::read_fasta(&cli.input)?;
    println!(
        "✓ Loaded {} sequence(s) from {}",
        inputs.len(),
        cli.input.display()
    );

    let mut sim = Simulation::new(inputs, &config)?;
    let total = sim.run();

    output::write_ledger(&cli.ledger, &cli.input, sim.records())?;
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| output::mutated_path(&cli.input));
    output::write_fasta(&output_path, &sim.mutated_sequences())?;

    let count = |kind: MutationKind| sim.records().iter().filter(|r| r.kind == kind).count();
    println!(
        "✓ Applied {total} mutation(s) ({} INS, {} DEL, {} SNP)",
        count(MutationKind::Insertion),
        count(MutationKind::Deletion),
        count(MutationKind::Substitution),
    );
    println!("  Ledger: {}", cli.ledger.display());
    println!("  Output: {}", output_path.display());

    println!("\nElapsed: {:.2?}", started.elapsed());
    Ok(())
}

/// Resolve the run configuration: the model file if given, defaults
/// otherwise, with individual command-line overrides applied on top.
fn load_configuration(cli: &Cli) -> Result<Configuration> {
    let mut config = match &cli.model {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read model file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse model file {}", path.display()))?
        }
        None => Configuration::default(),
    };

    if let Some(rate) = cli.indel_rate {
        config.indel_rate = rate;
    }
    if let Some(rate) = cli.snp_rate {
        config.snp_rate = rate;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}
