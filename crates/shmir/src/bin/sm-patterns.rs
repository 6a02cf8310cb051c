use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use colored::*;
use log::info;

use shmir::input_parsers::read_sequences_input;
use shmir::logging::init_logging;
use shmir::logging::Verbosity;
use shmir::patterns::compile;
use shmir::patterns::PatternSet;
use shmir::scaffold::Scaffold;

#[derive(Debug, Parser)]
#[command(name = "sm-patterns")]
#[command(author, version, about = "Compile miRNA strands into graded match patterns")]
pub struct Cli {
    /// Input file (FASTA-like), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// JSON list of scaffold records instead of plain sequences
    #[arg(long, value_name = "FILE")]
    scaffolds: Option<PathBuf>,

    /// Compile all input sequences into one pattern set
    #[arg(long)]
    joint: bool,

    /// Report which weight classes match this candidate
    #[arg(long, value_name = "SEQ")]
    candidate: Option<String>,

    #[command(flatten)]
    verbosity: Verbosity,
}

fn report(name: &str, set: &PatternSet, candidate: Option<&str>) -> Result<()> {
    println!("{}", format!(">{}", name).yellow());
    println!("{}", set.to_json()?);

    let Some(candidate) = candidate else {
        return Ok(());
    };
    for (weight, count) in set.matches(candidate) {
        let line = format!("weight {}: {} of {} pattern(s) match", weight, count, set.get(weight).len());
        if count > 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.dimmed());
        }
    }
    match set.best_weight(candidate) {
        Some(w) => println!("{} {}", "best weight:".bold(), w.to_string().green().bold()),
        None => println!("{}", "no pattern matches".red()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity.verbose);
    let candidate = cli.candidate.as_deref();

    if let Some(path) = &cli.scaffolds {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let scaffolds = Scaffold::list_from_json(&json)
            .with_context(|| format!("Failed to load scaffolds from {}", path.display()))?;
        info!("Loaded {} scaffold(s).", scaffolds.len());
        for scaffold in &scaffolds {
            report(scaffold.name(), scaffold.patterns(), candidate)?;
        }
        return Ok(());
    }

    let records = read_sequences_input(&cli.input)?;
    info!("Read {} sequence(s).", records.len());

    if cli.joint {
        let sequences: Vec<&str> = records.iter().map(|r| r.sequence.as_str()).collect();
        let set = compile(&sequences)?;
        return report("joint", &set, candidate);
    }

    for (i, record) in records.iter().enumerate() {
        let name = record.name(i);
        let set = compile(&[record.sequence.as_str()])
            .with_context(|| format!("Cannot compile {}", name))?;
        report(&name, &set, candidate)?;
    }
    Ok(())
}
