use std::process::Command;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use camino::Utf8Path;
use regex::Regex;

use crate::error::GenerateError;
use crate::gitops;
use crate::util::fs;

/// Entries a target directory must contain before schematic generation is
/// allowed to touch it.
const REQUIRED_STRUCTURE: [&str; 5] = [
    "src",
    "src/app",
    "src/app/modules",
    "src/app/routes",
    "src/app/routes/index.ts",
];

/// Check the fixed project layout. Failing entries are listed so the user
/// sees exactly what is missing rather than a generic refusal.
pub fn validate_structure(project_root: &Utf8Path) -> Result<(), GenerateError> {
    let missing: Vec<&str> = REQUIRED_STRUCTURE
        .iter()
        .filter(|item| !fs::path_exists(&project_root.join(item)))
        .copied()
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(GenerateError::validation(format!(
        "not a valid project directory (missing: {}); create one first with `exm new <project-name>`",
        missing.join(", ")
    )))
}

static PROJECT_NAME_RE: OnceLock<Regex> = OnceLock::new();

pub fn validate_project_name(name: &str) -> Result<(), GenerateError> {
    if name.len() < 2 {
        return Err(GenerateError::validation(
            "project name must be at least 2 characters long",
        ));
    }
    if name.len() > 100 {
        return Err(GenerateError::validation(
            "project name must be less than 100 characters",
        ));
    }
    let re = PROJECT_NAME_RE.get_or_init(|| {
        Regex::new("^[a-zA-Z0-9_-]+$").expect("project name pattern is valid")
    });
    if !re.is_match(name) {
        return Err(GenerateError::validation(format!(
            "project name `{name}` can only contain letters, numbers, hyphens, and underscores"
        )));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(GenerateError::validation(
            "project name cannot start or end with a hyphen",
        ));
    }
    Ok(())
}

/// Bootstrap a new project: clone the template repository into
/// `<dest_root>/<name>` and install its dependencies.
pub fn create_project(
    dest_root: &Utf8Path,
    name: &str,
    template_repo: Option<&str>,
    shallow: bool,
) -> Result<()> {
    validate_project_name(name)?;

    let target = dest_root.join(name);
    if fs::path_exists(&target) {
        return Err(GenerateError::AlreadyExists { path: target }.into());
    }

    let Some(repo_url) = template_repo else {
        bail!(
            "no template repository configured; set {} or run `exm config set template_repo <url>`",
            crate::config::TEMPLATE_REPO_ENV
        );
    };

    tracing::info!("creating project `{name}` from {repo_url}");
    if let Err(err) = gitops::clone(repo_url, &target, shallow) {
        // A failed clone can leave a partial checkout behind.
        if target.exists() {
            let _ = std::fs::remove_dir_all(&target);
        }
        return Err(err);
    }

    let manifest = target.join("package.json");
    let raw = fs::read_text(&manifest)
        .with_context(|| format!("template has no readable {}", manifest))?;
    let _: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", manifest))?;

    install_dependencies(&target)?;
    tracing::info!("project `{name}` created; next: cd {name} && npm run dev");
    Ok(())
}

fn install_dependencies(target: &Utf8Path) -> Result<()> {
    tracing::info!("installing dependencies in {}", target);
    let status = match Command::new("npm")
        .arg("install")
        .current_dir(target)
        .status()
    {
        Ok(status) => status,
        Err(_) => {
            tracing::warn!("npm not found; run `npm install` in {} manually", target);
            return Ok(());
        }
    };
    if !status.success() {
        bail!("npm install failed with exit code {:?}", status.code());
    }
    Ok(())
}
