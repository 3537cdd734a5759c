mod app;

use clap::Parser;
use std::process;

use app::cli::Cli;

fn main() {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(err) = app::run(args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
