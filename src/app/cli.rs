use crate::app::models::Framework;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    disable_version_flag = true,
    arg(clap::Arg::new("version")
        .short('v')
        .long("version")
        .action(clap::ArgAction::Version)
        .help("Print version")),
    about = "Turn a pasted firebaseConfig into an env file and a firebase init module",
    after_help = "Paste the firebaseConfig on stdin (finish with CTRL-D) or point at a file with --input-file."
)]
pub struct Cli {
    /// Environment variables file name, written inside the app root
    #[arg(long, short = 'o', value_parser = parse_file_name)]
    pub output: Option<String>,

    /// Root directory of the app (where package.json lives)
    #[arg(long, short = 's')]
    pub source: Option<PathBuf>,

    /// Read the firebaseConfig from this file instead of stdin
    #[arg(long, short = 'i')]
    pub input_file: Option<PathBuf>,

    /// Generate an init module wired to the local emulators
    #[arg(long, short = 'e')]
    pub emulator: bool,

    /// Force the framework instead of detecting it from package.json
    #[arg(long, short = 'f', value_enum)]
    pub framework: Option<Framework>,

    /// Write KEY=value instead of KEY="value"
    #[arg(long)]
    pub unquoted: bool,

    /// Do not prompt; use flags, settings and defaults
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Settings file (defaults to ~/.config/firebase-env/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(long)]
    pub verbose: bool,
}

fn parse_file_name(value: &str) -> Result<String, String> {
    crate::app::config::validate_file_name(value)
        .map(str::to_string)
        .map_err(|e| e.to_string())
}
