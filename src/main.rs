use clap::Parser;
use cointrend::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
