use clap::Parser;
use tradewatch::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
