use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use camino::Utf8Path;

/// Clone a template repository into `destination`, capturing stderr so a
/// failure surfaces git's own explanation.
pub fn clone(repo_url: &str, destination: &Utf8Path, shallow: bool) -> Result<()> {
    let mut command = Command::new("git");
    command.arg("clone");
    if shallow {
        command.args(["--depth", "1"]);
    }
    command.arg(repo_url).arg(destination.as_str());

    let output = command
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .context("spawning git clone")?;

    if !output.status.success() {
        bail!(
            "git clone failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
