use crate::app::cli::Cli;
use crate::app::error::AppError;
use crate::app::models::{InputMode, ResolvedOptions};
use crate::app::prompt::Prompter;
use serde::Deserialize;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE: &str = "./";
pub const DEFAULT_OUTPUT: &str = ".env.local";
pub const DEFAULT_INPUT_FILE: &str = "./firebaseConfig.js";

const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>'];

/// Optional defaults read from `config.toml`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub source: Option<PathBuf>,
    pub output: Option<String>,
    pub input: Option<String>,
    pub input_file: Option<PathBuf>,
    pub emulator: Option<bool>,
    pub quote_values: Option<bool>,
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("firebase-env").join("config.toml"))
}

/// A missing file yields empty settings.
pub fn load_settings(path: &Path) -> Result<Settings, AppError> {
    if !path.exists() {
        log::debug!("no settings file at {}", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| AppError::Read(path.to_path_buf(), e))?;
    let settings: Settings =
        toml::from_str(&content).map_err(|e| AppError::Settings(path.to_path_buf(), e.to_string()))?;

    if let Some(output) = &settings.output {
        validate_file_name(output)?;
    }
    if let Some(input) = &settings.input {
        InputMode::parse(input).ok_or_else(|| {
            AppError::Settings(
                path.to_path_buf(),
                format!("input must be \"stdin\" or \"file\", got \"{}\"", input),
            )
        })?;
    }

    Ok(settings)
}

pub fn validate_file_name(name: &str) -> Result<&str, AppError> {
    if name.is_empty() || name.contains(FORBIDDEN_CHARS) {
        return Err(AppError::InvalidFileName(name.to_string()));
    }
    Ok(name)
}

/// Merges CLI flags over settings over built-in defaults.
///
/// With a prompter the merged values become the defaults of the questions;
/// without one they are taken as-is.
pub fn resolve_options<R: BufRead, W: Write>(
    cli: &Cli,
    settings: Settings,
    prompter: Option<&mut Prompter<R, W>>,
) -> Result<ResolvedOptions, AppError> {
    let source = cli
        .source
        .clone()
        .or(settings.source)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
    let output = cli
        .output
        .clone()
        .or(settings.output)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let emulator = cli.emulator || settings.emulator.unwrap_or(false);
    let input_mode = if cli.input_file.is_some() {
        InputMode::File
    } else {
        settings
            .input
            .as_deref()
            .and_then(InputMode::parse)
            .unwrap_or_default()
    };
    let input_file = cli
        .input_file
        .clone()
        .or(settings.input_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_FILE));
    let quote_values = !cli.unquoted && settings.quote_values.unwrap_or(true);

    let Some(prompter) = prompter else {
        return Ok(ResolvedOptions {
            source_dir: source,
            output_env_file: output,
            input_file: (input_mode == InputMode::File).then_some(input_file),
            input_mode,
            use_emulator: emulator,
            quote_values,
            framework_override: cli.framework,
        });
    };

    let source = prompter.input(
        "Where is the root dir of your App?",
        &source.to_string_lossy(),
    )?;
    let output = prompter.input_with("Environment variables file name?", &output, |answer| {
        validate_file_name(answer).map(|_| ())
    })?;
    let emulator = prompter.confirm("Connect to the local Firebase emulators?", emulator)?;

    let modes = [InputMode::Stdin, InputMode::File];
    let labels = ["stdin", "file"];
    let default_index = modes.iter().position(|m| *m == input_mode).unwrap_or(0);
    let chosen = prompter.select(
        "How will you enter the contents of firebaseConfig?",
        &labels,
        default_index,
    )?;
    let input_mode = modes.get(chosen).copied().unwrap_or_default();

    let input_file = match input_mode {
        InputMode::File => Some(PathBuf::from(prompter.input(
            "Where is the file containing firebaseConfig?",
            &input_file.to_string_lossy(),
        )?)),
        InputMode::Stdin => None,
    };

    Ok(ResolvedOptions {
        source_dir: PathBuf::from(source),
        output_env_file: output,
        input_mode,
        input_file,
        use_emulator: emulator,
        quote_values,
        framework_override: cli.framework,
    })
}
