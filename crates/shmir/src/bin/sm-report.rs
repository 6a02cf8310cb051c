use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use colored::*;
use log::info;

use shmir::logging::init_logging;
use shmir::logging::Verbosity;
use shmir::report::FoldReport;

#[derive(Debug, Parser)]
#[command(name = "sm-report")]
#[command(author, version, about = "Summarize an mfold structure file (and score file) as JSON")]
pub struct Cli {
    /// The mfold `.ss` structure file
    #[arg(value_name = "STRUCTURE")]
    structure: PathBuf,

    /// Score file: maximum score, then `position partner score` lines
    #[arg(short, long, value_name = "FILE")]
    score: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    verbosity: Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity.verbose);

    let report = FoldReport::from_files(&cli.structure, cli.score.as_ref())
        .with_context(|| format!("Failed to read {}", cli.structure.display()))?;
    info!("{} line(s) in {}", report.length, cli.structure.display().to_string().magenta());
    if let Some(total) = report.total_score {
        info!("total score: {}", total.to_string().green());
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
