use crate::app::error::AppError;
use crate::app::extractor::to_upper_snake;
use crate::app::models::{EnvEntry, ExtractedConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

const PLACEHOLDER: &str = "{{FIREBASE_CONFIG}}";
const DIRECT_TEMPLATE: &str = include_str!("../templates/firebase.tpl");
const EMULATOR_TEMPLATE: &str = include_str!("../templates/firebase_emulator.tpl");

static JS_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid identifier regex"));

pub struct OutputGenerator;

impl OutputGenerator {
    /// One entry per extracted key, in extraction order.
    pub fn env_entries(config: &ExtractedConfig, prefix: &str) -> Vec<EnvEntry> {
        config
            .iter()
            .map(|(key, value)| EnvEntry {
                key: key.clone(),
                var_name: format!("{}{}", prefix, to_upper_snake(key)),
                value: value.clone(),
            })
            .collect()
    }

    pub fn env_line(entry: &EnvEntry, quote_values: bool) -> String {
        if quote_values {
            format!("{}=\"{}\"", entry.var_name, entry.value)
        } else {
            format!("{}={}", entry.var_name, entry.value)
        }
    }

    /// Newline-terminated env file body.
    pub fn generate_env_file(entries: &[EnvEntry], quote_values: bool) -> String {
        entries
            .iter()
            .map(|entry| Self::env_line(entry, quote_values) + "\n")
            .collect()
    }

    /// Object literal whose values read `process.env` instead of holding strings.
    pub fn generate_config_literal(entries: &[EnvEntry]) -> String {
        if entries.is_empty() {
            return "{}".to_string();
        }

        let fields: Vec<String> = entries
            .iter()
            .map(|entry| format!("  {}: {}", Self::object_key(&entry.key), Self::env_reference(entry)))
            .collect();

        format!("{{\n{}\n}}", fields.join(",\n"))
    }

    pub fn generate_source(entries: &[EnvEntry], use_emulator: bool) -> String {
        let template = if use_emulator {
            EMULATOR_TEMPLATE
        } else {
            DIRECT_TEMPLATE
        };
        template.replace(PLACEHOLDER, &Self::generate_config_literal(entries))
    }

    fn object_key(key: &str) -> String {
        if JS_IDENTIFIER.is_match(key) {
            key.to_string()
        } else {
            Self::js_string(key)
        }
    }

    fn env_reference(entry: &EnvEntry) -> String {
        if JS_IDENTIFIER.is_match(&entry.var_name) {
            format!("process.env.{}", entry.var_name)
        } else {
            format!("process.env[{}]", Self::js_string(&entry.var_name))
        }
    }

    fn js_string(text: &str) -> String {
        serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
    }
}

/// Replaces the file wholesale. The parent directory must already exist.
pub fn write_file(path: &Path, content: &str) -> Result<(), AppError> {
    fs::write(path, content).map_err(|e| AppError::Write(path.to_path_buf(), e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(pairs: &[(&str, &str)]) -> ExtractedConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn vue_api_key_scenario() {
        let entries = OutputGenerator::env_entries(&config(&[("apiKey", "AIzaSyXXXX")]), "VUE_APP_");
        assert_eq!(
            OutputGenerator::env_line(&entries[0], true),
            r#"VUE_APP_API_KEY="AIzaSyXXXX""#
        );
        assert_eq!(
            OutputGenerator::env_line(&entries[0], false),
            "VUE_APP_API_KEY=AIzaSyXXXX"
        );
    }

    #[test]
    fn env_file_has_one_line_per_key_in_order() {
        let entries = OutputGenerator::env_entries(
            &config(&[("apiKey", "k"), ("authDomain", "a.firebaseapp.com"), ("appId", "1:2:web:3")]),
            "REACT_APP_",
        );
        let body = OutputGenerator::generate_env_file(&entries, true);

        assert_eq!(
            body,
            "REACT_APP_API_KEY=\"k\"\nREACT_APP_AUTH_DOMAIN=\"a.firebaseapp.com\"\nREACT_APP_APP_ID=\"1:2:web:3\"\n"
        );
        assert_eq!(body.lines().count(), entries.len());
    }

    #[test]
    fn config_literal_references_env_vars() {
        let entries = OutputGenerator::env_entries(
            &config(&[("apiKey", "k"), ("projectId", "p")]),
            "VUE_APP_",
        );
        assert_eq!(
            OutputGenerator::generate_config_literal(&entries),
            "{\n  apiKey: process.env.VUE_APP_API_KEY,\n  projectId: process.env.VUE_APP_PROJECT_ID\n}"
        );
    }

    #[test]
    fn config_literal_quotes_non_identifier_keys() {
        let entries = OutputGenerator::env_entries(&config(&[("my-key", "v")]), "VUE_APP_");
        assert_eq!(
            OutputGenerator::generate_config_literal(&entries),
            "{\n  \"my-key\": process.env[\"VUE_APP_MY_-KEY\"]\n}"
        );
        assert_eq!(OutputGenerator::generate_config_literal(&[]), "{}");
    }

    #[test]
    fn templates_substitute_the_placeholder() {
        let entries = OutputGenerator::env_entries(&config(&[("apiKey", "k")]), "VUE_APP_");

        let direct = OutputGenerator::generate_source(&entries, false);
        assert!(direct.contains("const firebaseConfig = {\n  apiKey: process.env.VUE_APP_API_KEY\n};"));
        assert!(direct.contains("initializeApp(firebaseConfig)"));
        assert!(!direct.contains(PLACEHOLDER));
        assert!(!direct.contains("Emulator"));

        let emulated = OutputGenerator::generate_source(&entries, true);
        assert!(emulated.contains("apiKey: process.env.VUE_APP_API_KEY"));
        assert!(emulated.contains("connectFirestoreEmulator(db, \"localhost\", 8080);"));
        assert!(emulated.contains("connectAuthEmulator(auth, \"http://localhost:9099\");"));
        assert!(!emulated.contains(PLACEHOLDER));
    }

    #[test]
    fn write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.local");
        fs::write(&path, "OLD=1\nOLDER=2\n").unwrap();

        write_file(&path, "NEW=\"1\"\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "NEW=\"1\"\n");
    }

    #[test]
    fn write_file_needs_existing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src").join("firebase.js");
        assert!(matches!(write_file(&path, "x"), Err(AppError::Write(..))));
        assert!(!dir.path().join("src").exists());
    }
}
