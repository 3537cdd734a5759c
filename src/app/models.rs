use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;

/// Where the pasted firebaseConfig text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Stdin,
    File,
}

impl InputMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdin" => Some(Self::Stdin),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("stdin"),
            Self::File => f.write_str("file"),
        }
    }
}

/// Represents the final options after merging settings, CLI args and prompt answers.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub source_dir: PathBuf,
    pub output_env_file: String,
    pub input_mode: InputMode,
    pub input_file: Option<PathBuf>,
    pub use_emulator: bool,
    pub quote_values: bool,
    pub framework_override: Option<Framework>,
}

impl ResolvedOptions {
    pub fn env_file_path(&self) -> PathBuf {
        self.source_dir.join(&self.output_env_file)
    }

    pub fn generated_file_path(&self, profile: &ProjectProfile) -> PathBuf {
        self.source_dir.join("src").join(profile.generated_file_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Framework {
    Vue,
    React,
}

impl Framework {
    pub fn env_prefix(self) -> &'static str {
        match self {
            Self::Vue => "VUE_APP_",
            Self::React => "REACT_APP_",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vue => f.write_str("vue"),
            Self::React => f.write_str("react"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JavaScript => f.write_str("JavaScript"),
            Self::TypeScript => f.write_str("TypeScript"),
        }
    }
}

/// Framework and language of the target app, derived once from its manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectProfile {
    pub framework: Framework,
    pub language: Language,
}

impl ProjectProfile {
    pub fn env_prefix(&self) -> &'static str {
        self.framework.env_prefix()
    }

    pub fn generated_file_name(&self) -> &'static str {
        match self.language {
            Language::JavaScript => "firebase.js",
            Language::TypeScript => "firebase.ts",
        }
    }
}

/// Original config key -> raw string value, in order of first appearance.
pub type ExtractedConfig = IndexMap<String, String>;

/// One extracted key paired with its environment variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub var_name: String,
    pub value: String,
}
