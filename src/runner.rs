use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;

use crate::cli::{Cli, Command, ConfigCommand};
use crate::{config, project, schematic};

/// Dispatch a parsed CLI invocation. This is the single error-reporting
/// boundary: the core returns typed errors, `main` renders them, and the
/// process exits non-zero on any failure.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::New { project_name } => handle_new(&project_name),
        Command::Generate { kind, name } => handle_generate(&kind, &name),
        Command::Config { command } => handle_config(command),
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().context("determining current directory")?;
    Utf8PathBuf::from_path_buf(dir).map_err(|_| anyhow!("current directory is not valid UTF-8"))
}

fn handle_new(project_name: &str) -> Result<()> {
    let cfg = config::load(&config::config_path()?)?;
    let cwd = current_dir()?;
    project::create_project(
        &cwd,
        project_name,
        cfg.template_repo().as_deref(),
        cfg.shallow_clone(),
    )
}

fn handle_generate(kind: &str, name: &str) -> Result<()> {
    let cwd = current_dir()?;
    schematic::generate::run(&cwd, kind, name)?;
    Ok(())
}

fn handle_config(command: ConfigCommand) -> Result<()> {
    let path = config::config_path()?;
    match command {
        ConfigCommand::Show => {
            let cfg = config::load(&path)?;
            println!(
                "template_repo = {}",
                cfg.template_repo().as_deref().unwrap_or("(unset)")
            );
            println!("shallow_clone = {}", cfg.shallow_clone());
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{path}");
            Ok(())
        }
        ConfigCommand::Set { key, value } => config::set_key(&path, &key, &value),
    }
}
