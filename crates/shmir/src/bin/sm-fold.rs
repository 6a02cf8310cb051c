use anyhow::anyhow;
use anyhow::Result;
use clap::Parser;
use colored::*;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use log::info;
use log::warn;
use serde_json::json;

use shmir::fold::FoldJob;
use shmir::fold::FoldQueue;
use shmir::fold::TaskReply;
use shmir::fold_parsers::FoldArguments;
use shmir::input_parsers::read_sequences_input;
use shmir::input_parsers::unique_names;
use shmir::logging::init_logging;
use shmir::logging::Verbosity;
use shmir::report::FoldReport;

#[derive(Debug, Parser)]
#[command(name = "sm-fold")]
#[command(author, version, about = "Fold every input sequence with mfold")]
pub struct Cli {
    /// Input file (FASTA-like), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Attach the parsed structure to raw (unarchived) results
    #[arg(long, requires = "no_archive")]
    report: bool,

    #[command(flatten, next_help_heading = "Folding parameters")]
    fold: FoldArguments,

    #[command(flatten)]
    verbosity: Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity.verbose);

    let records = read_sequences_input(&cli.input)?;
    let jobs: Vec<FoldJob> = unique_names(&records)
        .into_iter()
        .zip(&records)
        .map(|(name, r)| FoldJob::new(name, r.sequence.clone()))
        .collect();
    info!("Folding {} sequence(s) with {}", jobs.len(), cli.fold.mfold.display());

    let task = cli.fold.build_task();
    let queue = FoldQueue::new(cli.fold.workers)?;

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
        .progress_chars("#>-"),
    );

    let results = queue.dispatch(&task, &jobs, |job, result| {
        if let Err(e) = result {
            pb.suspend(|| warn!("Job {}: {}", job.job_id, e));
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    let mut failed = 0;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(reply) => {
                let report = match &reply {
                    TaskReply::Files(files) if cli.report => files.iter()
                        .find(|f| f.extension().is_some_and(|e| e == "ss"))
                        .map(|ss| FoldReport::from_files(ss, None))
                        .transpose()?,
                    _ => None,
                };
                let mut line = json!({ "job_id": job.job_id, "reply": reply });
                if let Some(report) = report {
                    line["report"] = serde_json::to_value(report)?;
                }
                println!("{}", line);
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "error".red().bold(), job.job_id, e);
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} of {} job(s) failed", failed, jobs.len()));
    }
    Ok(())
}
