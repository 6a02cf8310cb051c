use std::io::Write;

use clap::ArgAction;
use clap::Args;
use env_logger::Builder;

#[derive(Debug, Args)]
pub struct Verbosity {
    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// `RUST_LOG` wins over the verbosity count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init_logging(verbosity: u8) {
    Builder::from_env(env_logger::Env::default().default_filter_or(level_for(verbosity)))
        .format(|buf, record| {
            // no prefix, just the message
            writeln!(buf, "{}", record.args())
        })
        .init();
}
