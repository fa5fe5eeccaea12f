use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::PokedexService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::Catalog;

/// Resolve settings from `--config` or the global config file.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    debug!("Settings: {:?}", settings);
    Ok(settings)
}

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    match &cli.command {
        None | Some(Commands::Play) => _play(settings),
        Some(Commands::Catalog { evolving }) => _catalog(settings, *evolving),
        Some(Commands::Settings) => _settings(settings),
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

#[instrument(skip(settings))]
fn _play(settings: &Settings) -> CliResult<()> {
    let catalog = settings.load_catalog()?;
    let mut service = PokedexService::new(&catalog);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = Menu::new(&mut service, stdin.lock(), stdout.lock()).run();

    let destroyed = service.shutdown();
    debug!("Shutdown released {} owners", destroyed);
    result
}

#[instrument(skip(settings))]
fn _catalog(settings: &Settings, evolving: bool) -> CliResult<()> {
    let catalog: Catalog = settings.load_catalog()?;
    let mut out = io::stdout().lock();
    for record in catalog.iter().filter(|record| !evolving || record.can_evolve) {
        output::info(&mut out, record)?;
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _settings(settings: &Settings) -> CliResult<()> {
    let text = toml::to_string_pretty(settings)
        .map_err(|e| ApplicationError::Config {
            message: format!("cannot render settings: {}", e),
        })?;
    let mut out = io::stdout().lock();
    write!(out, "{}", text)?;
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
