// Declare modules
pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod extractor;
pub mod models;
pub mod project;
pub mod prompt;

use anyhow::Result;
use std::io::{self, StdinLock, Stdout};
use std::path::Path;

use self::cli::Cli;
use self::config::{
    default_settings_path, load_settings, resolve_options, Settings, DEFAULT_INPUT_FILE,
};
use self::emitter::{write_file, OutputGenerator};
use self::models::{InputMode, ProjectProfile, ResolvedOptions};
use self::prompt::Prompter;

/// Runs the pipeline: options, project profile, extraction, emission.
pub fn run(args: Cli) -> Result<()> {
    // 1. Settings file
    let settings = match args.config.clone().or_else(default_settings_path) {
        Some(path) => load_settings(&path)?,
        None => Settings::default(),
    };

    // 2. Resolve options, asking questions unless --yes
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let options = if args.yes {
        resolve_options::<&mut StdinLock<'_>, Stdout>(&args, settings, None)?
    } else {
        let mut prompter = Prompter::new(&mut input, io::stdout());
        resolve_options(&args, settings, Some(&mut prompter))?
    };
    log::debug!("resolved options: {:?}", options);

    // 3. Inspect the app
    let mut profile = project::detect(&options.source_dir)?;
    if let Some(framework) = options.framework_override {
        log::info!("framework forced to {}", framework);
        profile.framework = framework;
    }

    let env_path = options.env_file_path();
    let source_path = options.generated_file_path(&profile);
    print_banner(&options, &profile, &env_path, &source_path);

    // 4. Extract
    let (extracted, _stats) = match options.input_mode {
        InputMode::Stdin => extractor::extract_from_reader(&mut input)
            .map_err(|e| error::AppError::Read("<stdin>".into(), e))?,
        InputMode::File => {
            let path = options
                .input_file
                .clone()
                .unwrap_or_else(|| DEFAULT_INPUT_FILE.into());
            extractor::extract_from_file(&path)?
        }
    };
    if extracted.is_empty() {
        log::warn!("⚠️ No `key: \"value\"` lines found; the generated files will be empty.");
    }

    // 5. Emit
    let entries = OutputGenerator::env_entries(&extracted, profile.env_prefix());
    write_file(
        &env_path,
        &OutputGenerator::generate_env_file(&entries, options.quote_values),
    )?;
    write_file(
        &source_path,
        &OutputGenerator::generate_source(&entries, options.use_emulator),
    )?;

    println!(
        "✔ {} variable(s) written to {} and {}",
        entries.len(),
        env_path.display(),
        source_path.display()
    );
    Ok(())
}

fn print_banner(
    options: &ResolvedOptions,
    profile: &ProjectProfile,
    env_path: &Path,
    source_path: &Path,
) {
    println!();
    println!("framework type: {}", profile.framework);
    println!("language: {}", profile.language);
    println!("App root dir: {}", options.source_dir.display());
    println!("output file: {}, {}", env_path.display(), source_path.display());
    println!("input: {}", options.input_mode);
    if options.input_mode == InputMode::Stdin {
        println!("\nPaste your firebaseConfig below this and press CTRL-D");
        println!("To cancel, press CTRL-C\n");
    }
}
