//! Command dispatch

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    debug!("project_dir: {}", project_dir.display());

    match &cli.command {
        None | Some(Commands::Generate) => cmd_generate(cli, &project_dir),
        Some(Commands::Config { command }) => cmd_config(cli, command, &project_dir),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => std::env::current_dir().map_err(|e| {
            CliError::Application(ApplicationError::Filesystem {
                context: "determine current directory".to_string(),
                source: e,
            })
        }),
    }
}

/// Load layered settings and apply CLI flags on top.
fn load_settings(cli: &Cli, project_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(project_dir)?;
    if let Some(length) = cli.length {
        settings.tree.length = length;
    }
    if let Some(seed) = cli.seed {
        settings.tree.seed = Some(seed);
    }
    Ok(settings)
}

#[instrument(skip(cli))]
fn cmd_generate(cli: &Cli, project_dir: &Path) -> CliResult<()> {
    let settings = load_settings(cli, project_dir)?;
    let container = ServiceContainer::new(settings);
    let report = container.game_service.run(&container.settings)?;

    output::success(&format!(
        "Generated {} ({} steps, seed {})",
        report.output_file.display(),
        report.steps,
        report.seed
    ));
    output::detail(&format!("tree: {}", report.tree));
    output::detail(&format!(
        "frames: {} copied to {}",
        report.frames.len(),
        container.settings.copies_dir().display()
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli, project_dir)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
