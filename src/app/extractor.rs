use crate::app::error::AppError;
use crate::app::models::ExtractedConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

// e.g. `  apiKey: "AIzaSy...",`; unanchored, so the pair may start mid-line.
static CONFIG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s*([^:]+):\s*"(.+)".*"#).expect("Invalid config line regex"));

// A leading lowercase run, or a capitalised word.
static CAMEL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+|[A-Z][a-z]+").expect("Invalid camel case regex"));

/// Counts kept for diagnostics; skipped lines are never an error.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub matched: usize,
    pub skipped: usize,
}

/// Returns `(key, value)` when the line looks like `key: "value"`.
pub fn match_line(line: &str) -> Option<(&str, &str)> {
    let caps = CONFIG_LINE.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Scans every line; a repeated key keeps its first position but takes the last value.
///
/// Lines are decoded lossily, so stray non-UTF-8 bytes never abort the scan.
pub fn extract_from_reader<R: BufRead>(reader: R) -> io::Result<(ExtractedConfig, ScanStats)> {
    let mut config = ExtractedConfig::new();
    let mut stats = ScanStats::default();

    for raw in reader.split(b'\n') {
        let raw = raw?;
        let bytes = raw.strip_suffix(b"\r").unwrap_or(&raw);
        let line = String::from_utf8_lossy(bytes);
        match match_line(&line) {
            Some((key, value)) => {
                stats.matched += 1;
                if let Some(previous) = config.insert(key.to_string(), value.to_string()) {
                    log::debug!("{} repeated, replacing \"{}\"", key, previous);
                }
            }
            None => stats.skipped += 1,
        }
    }

    log::info!(
        "{} line(s) matched, {} skipped, {} key(s) extracted",
        stats.matched,
        stats.skipped,
        config.len()
    );
    Ok((config, stats))
}

pub fn extract_from_file(path: &Path) -> Result<(ExtractedConfig, ScanStats), AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::InputNotFound(path.to_path_buf()),
        _ => AppError::Read(path.to_path_buf(), e),
    })?;
    extract_from_reader(BufReader::new(file)).map_err(|e| AppError::Read(path.to_path_buf(), e))
}

/// `apiKey` -> `API_KEY`, `measurementId` -> `MEASUREMENT_ID`.
///
/// Text between camel-case words (digits, acronyms, underscores) is kept as its
/// own segment, so `API_KEY` maps to itself.
pub fn to_upper_snake(key: &str) -> String {
    let mut segments = Vec::new();
    let mut last = 0;

    for word in CAMEL_WORD.find_iter(key) {
        segments.push(&key[last..word.start()]);
        segments.push(word.as_str());
        last = word.end();
    }
    segments.push(&key[last..]);

    segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const PASTED: &str = r#"
// Your web app's Firebase configuration
const firebaseConfig = {
  apiKey: "AIzaSyXXXX",
  authDomain: "myapp.firebaseapp.com",
  databaseURL: "https://myapp.firebaseio.com",
  projectId: "myapp",
  storageBucket: "myapp.appspot.com",
  messagingSenderId: "1234567890",
  appId: "1:1234567890:web:abcdef",
  measurementId: "G-ABCDEF"
};
"#;

    #[test]
    fn scenario_api_key_line() {
        assert_eq!(match_line(r#"  apiKey: "AIzaSyXXXX","#), Some(("apiKey", "AIzaSyXXXX")));
    }

    #[test]
    fn non_matching_lines_are_skipped() {
        assert_eq!(match_line("const firebaseConfig = {"), None);
        assert_eq!(match_line("};"), None);
        assert_eq!(match_line("projectId: 'single-quoted'"), None);
        assert_eq!(match_line(r#"empty: """#), None);
    }

    #[test]
    fn pair_may_start_after_an_earlier_colon() {
        assert_eq!(
            match_line(r#"retries: 3, apiKey: "AIzaSyXXXX""#),
            Some(("3, apiKey", "AIzaSyXXXX"))
        );
        assert_eq!(
            match_line(r#"{ projectId: "myapp" }"#),
            Some(("{ projectId", "myapp"))
        );
    }

    #[test]
    fn invalid_utf8_lines_do_not_abort_the_scan() {
        let input: &[u8] = b"// caf\xe9 config\r\n  apiKey: \"AIzaSyXXXX\",\r\n  appId: \"caf\xe9\"\n";
        let (config, stats) = extract_from_reader(Cursor::new(input)).unwrap();

        assert_eq!(config["apiKey"], "AIzaSyXXXX");
        assert_eq!(config["appId"], "caf\u{FFFD}");
        assert_eq!(stats, ScanStats { matched: 2, skipped: 1 });
    }

    #[test]
    fn key_stops_at_first_colon_and_value_keeps_inner_colons() {
        assert_eq!(
            match_line(r#"appId: "1:1234567890:web:abcdef""#),
            Some(("appId", "1:1234567890:web:abcdef"))
        );
        assert_eq!(
            match_line(r#"databaseURL: "https://myapp.firebaseio.com","#),
            Some(("databaseURL", "https://myapp.firebaseio.com"))
        );
    }

    #[test]
    fn extracts_full_pasted_block_in_order() {
        let (config, stats) = extract_from_reader(Cursor::new(PASTED)).unwrap();

        let keys: Vec<&str> = config.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "apiKey",
                "authDomain",
                "databaseURL",
                "projectId",
                "storageBucket",
                "messagingSenderId",
                "appId",
                "measurementId"
            ]
        );
        assert_eq!(config["storageBucket"], "myapp.appspot.com");
        assert_eq!(stats.matched, 8);
        assert_eq!(stats.skipped, 4);
    }

    #[test]
    fn last_duplicate_wins_first_position_kept() {
        let input = "apiKey: \"first\"\nprojectId: \"p\"\napiKey: \"second\"\n";
        let (config, _) = extract_from_reader(Cursor::new(input)).unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(config["apiKey"], "second");
        assert_eq!(config.get_index(0).map(|(k, _)| k.as_str()), Some("apiKey"));
    }

    #[test]
    fn missing_input_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("firebaseConfig.js");
        assert!(matches!(extract_from_file(&missing), Err(AppError::InputNotFound(_))));
    }

    #[test]
    fn reads_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("firebaseConfig.js");
        std::fs::write(&path, PASTED).unwrap();

        let (config, _) = extract_from_file(&path).unwrap();
        assert_eq!(config["projectId"], "myapp");
    }

    #[test]
    fn camel_case_keys_become_upper_snake() {
        assert_eq!(to_upper_snake("apiKey"), "API_KEY");
        assert_eq!(to_upper_snake("authDomain"), "AUTH_DOMAIN");
        assert_eq!(to_upper_snake("messagingSenderId"), "MESSAGING_SENDER_ID");
        assert_eq!(to_upper_snake("databaseURL"), "DATABASE_URL");
        assert_eq!(to_upper_snake("appId"), "APP_ID");
        assert_eq!(to_upper_snake("projectId"), "PROJECT_ID");
    }

    #[test]
    fn upper_snake_is_idempotent() {
        for key in ["API_KEY", "AUTH_DOMAIN", "X", "V2_ID"] {
            assert_eq!(to_upper_snake(key), key);
            assert_eq!(to_upper_snake(&to_upper_snake(key)), key);
        }
        let once = to_upper_snake("storageBucket");
        assert_eq!(to_upper_snake(&once), once);
    }
}
