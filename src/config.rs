use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use toml_edit::{DocumentMut, value};

const CONFIG_DIR: &str = ".exm";
const CONFIG_FILE: &str = "config.toml";

/// Environment override for the template repository URL. Takes precedence
/// over the config file when set.
pub const TEMPLATE_REPO_ENV: &str = "EXM_TEMPLATE_REPO";

/// User configuration loaded from `~/.exm/config.toml`. All fields are
/// optional; a missing file behaves like an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct ExmConfig {
    pub template_repo: Option<String>,
    pub shallow_clone: Option<bool>,
}

impl ExmConfig {
    /// Resolve the template repository URL, preferring the environment.
    pub fn template_repo(&self) -> Option<String> {
        if let Ok(url) = env::var(TEMPLATE_REPO_ENV)
            && !url.is_empty()
        {
            return Some(url);
        }
        self.template_repo.clone()
    }

    pub fn shallow_clone(&self) -> bool {
        self.shallow_clone.unwrap_or(true)
    }
}

pub fn config_path() -> Result<Utf8PathBuf> {
    let home = dirs::home_dir().context("determining home directory")?;
    let home = Utf8PathBuf::from_path_buf(home)
        .map_err(|_| anyhow::anyhow!("home directory is not valid UTF-8"))?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load(path: &Utf8Path) -> Result<ExmConfig> {
    if !path.exists() {
        return Ok(ExmConfig::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

/// Update one key in place, preserving any unrelated document content.
pub fn set_key(path: &Utf8Path, key: &str, raw_value: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent))?;
    }

    let mut doc: DocumentMut = if path.exists() {
        let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        raw.parse()
            .with_context(|| format!("parsing config {}", path))?
    } else {
        DocumentMut::new()
    };

    match key {
        "template_repo" => {
            doc[key] = value(raw_value);
        }
        "shallow_clone" => {
            let flag: bool = raw_value
                .parse()
                .with_context(|| format!("`{}` expects true or false, got `{}`", key, raw_value))?;
            doc[key] = value(flag);
        }
        other => bail!("unknown config key `{other}` (known: template_repo, shallow_clone)"),
    }

    fs::write(path, doc.to_string()).with_context(|| format!("writing config {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn missing_file_loads_as_default() {
        let dir = TempDir::new().unwrap();
        let cfg = load(&temp_config(&dir)).unwrap();
        assert!(cfg.template_repo.is_none());
        assert!(cfg.shallow_clone());
    }

    #[test]
    fn set_key_round_trips_and_preserves_unrelated_content() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir);
        fs::write(&path, "# my settings\nshallow_clone = false\n").unwrap();

        set_key(&path, "template_repo", "https://example.com/starter.git").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("# my settings"));
        assert!(raw.contains("shallow_clone = false"));

        let cfg = load(&path).unwrap();
        assert_eq!(
            cfg.template_repo.as_deref(),
            Some("https://example.com/starter.git")
        );
        assert!(!cfg.shallow_clone());
    }

    #[test]
    fn set_key_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir);
        assert!(set_key(&path, "favourite_color", "blue").is_err());
    }

    #[test]
    fn set_key_rejects_non_boolean_shallow_clone() {
        let dir = TempDir::new().unwrap();
        let path = temp_config(&dir);
        assert!(set_key(&path, "shallow_clone", "sometimes").is_err());
    }
}
