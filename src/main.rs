mod cli;
mod config;
mod error;
mod gitops;
mod logging;
mod project;
mod routes;
mod runner;
mod schematic;
mod util;

fn main() -> anyhow::Result<()> {
    logging::init();
    let app = cli::parse();
    runner::run(app)
}
