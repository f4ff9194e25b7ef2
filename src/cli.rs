use clap::{Parser, Subcommand};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "exm", version, about = "Express/TypeScript project and module scaffolding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project by cloning the configured template repository.
    New {
        project_name: String,
    },
    /// Generate a schematic file, or a whole module with `generate module <name>`.
    #[command(alias = "g")]
    Generate {
        /// Schematic kind (controller, service, model, route, interface,
        /// validation) or `module`/`mo` for a full module.
        kind: String,
        name: String,
    },
    /// Configuration display and editing.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    Show,
    Path,
    Set { key: String, value: String },
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
