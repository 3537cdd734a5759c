use crate::app::error::AppError;
use crate::app::models::{Framework, Language, ProjectProfile};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug)]
struct PackageJson {
    dependencies: Option<IndexMap<String, serde_json::Value>>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: Option<IndexMap<String, serde_json::Value>>,
}

impl PackageJson {
    fn depends_on(&self, name: &str) -> bool {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .any(|deps| deps.contains_key(name))
    }
}

/// Reads `<root>/package.json` and probes for TypeScript config files.
pub fn detect(root: &Path) -> Result<ProjectProfile, AppError> {
    let manifest_path = root.join("package.json");
    if !manifest_path.is_file() {
        return Err(AppError::NotProjectRoot(root.to_path_buf()));
    }

    let content =
        fs::read_to_string(&manifest_path).map_err(|e| AppError::Read(manifest_path.clone(), e))?;
    let manifest: PackageJson =
        serde_json::from_str(&content).map_err(|e| AppError::ManifestParse(manifest_path, e))?;

    let profile = ProjectProfile {
        framework: detect_framework(&manifest),
        language: detect_language(root, &manifest),
    };
    log::info!(
        "detected {} / {} in {}",
        profile.framework,
        profile.language,
        root.display()
    );
    Ok(profile)
}

fn detect_framework(manifest: &PackageJson) -> Framework {
    if manifest.depends_on("react") {
        Framework::React
    } else {
        Framework::Vue
    }
}

fn detect_language(root: &Path, manifest: &PackageJson) -> Language {
    let has_tsconfig =
        root.join("tsconfig.json").exists() || root.join("src").join("tsconfig.json").exists();

    if manifest.depends_on("typescript") || has_tsconfig {
        Language::TypeScript
    } else {
        Language::JavaScript
    }
}
