//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::BuiltBookmarks;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, PreviewFormat};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{render_tree, OrgUnit};
use crate::infrastructure::csv_source::STDIN_PATH;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Preview {
            file,
            format,
            truncate,
        }) => preview(&container(cli)?, file, *format, *truncate),
        Some(Commands::Push { file, yes, dry_run }) => push(&container(cli)?, file, *yes, *dry_run),
        Some(Commands::Payload { file }) => payload(&container(cli)?, file),
        Some(Commands::Config { command }) => config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "managed-bookmarks", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".into(),
        )),
    }
}

/// Settings from files and environment, with command line flags on top.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?.merge_with(&cli.overrides());
    settings.validate()?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?)?)
}

fn build(c: &ServiceContainer, file: &Path) -> CliResult<BuiltBookmarks> {
    let source = c.row_source(file)?;
    Ok(c.bookmark_service()?.build(&source)?)
}

/// Print the envelope as JSON or as a tree.
#[instrument(skip(c))]
pub fn preview(
    c: &ServiceContainer,
    file: &Path,
    format: PreviewFormat,
    truncate: Option<usize>,
) -> CliResult<()> {
    let built = build(c, file)?;
    let json = built.to_json_pretty()?;
    debug!("envelope:\n{}", json);

    match format {
        PreviewFormat::Json => output::info(&truncate_chars(&json, truncate)),
        PreviewFormat::Tree => {
            output::info(&render_tree(&built.envelope));
            let s = built.stats;
            output::detail(&format!(
                "{} bookmarks, {} folders, depth {}, {} of {} rows skipped",
                s.bookmarks, s.folders, s.max_depth, s.skipped, s.rows
            ));
        }
    }
    Ok(())
}

/// First `limit` characters followed by `...`, or the whole text if it fits.
pub fn truncate_chars(text: &str, limit: Option<usize>) -> String {
    match limit {
        Some(n) if text.chars().count() > n => {
            let head: String = text.chars().take(n).collect();
            format!("{head}...")
        }
        _ => text.to_string(),
    }
}

/// Print target URL and request body.
#[instrument(skip(c))]
pub fn payload(c: &ServiceContainer, file: &Path) -> CliResult<()> {
    let org_unit = c.settings.org_unit()?;
    let built = build(c, file)?;
    print_request(c, &built, &org_unit)
}

fn print_request(
    c: &ServiceContainer,
    built: &BuiltBookmarks,
    org_unit: &OrgUnit,
) -> CliResult<()> {
    let prepared = c.policy_service().prepare(&built.envelope, org_unit)?;
    let body: serde_json::Value =
        serde_json::from_str(&prepared.body).map_err(ApplicationError::from)?;
    let pretty = serde_json::to_string_pretty(&body).map_err(ApplicationError::from)?;

    output::header(&format!("POST {}", prepared.url));
    output::info(&pretty);
    Ok(())
}

/// Confirm, then overwrite the org unit's managed bookmarks.
#[instrument(skip(c))]
pub fn push(c: &ServiceContainer, file: &Path, yes: bool, dry_run: bool) -> CliResult<()> {
    let org_unit = c.settings.org_unit()?;
    // rows and the confirmation answer cannot both come from stdin
    if file.as_os_str() == STDIN_PATH && !yes && !dry_run {
        return Err(CliError::Usage(
            "reading rows from stdin (-) requires --yes, the confirmation prompt also reads stdin"
                .into(),
        ));
    }
    let built = build(c, file)?;

    if dry_run {
        return print_request(c, &built, &org_unit);
    }

    if !yes {
        let message = format!(
            "This will overwrite all Managed Bookmarks for OU: {org_unit}. Are you sure?"
        );
        let confirmed = c
            .prompter
            .confirm(&message)
            .map_err(|e| InfraError::io("read confirmation", e))?;
        if !confirmed {
            output::warning("push cancelled, nothing sent");
            return Ok(());
        }
    }

    let outcome = c.policy_service().submit(&built.envelope, &org_unit);
    if outcome.success {
        output::success(&format!(
            "Bookmarks updated for {} ({} bookmarks, {} folders)",
            org_unit, built.stats.bookmarks, built.stats.folders
        ));
        return Ok(());
    }

    Err(CliError::PushFailed(match outcome.status_code {
        Some(code) => format!("HTTP {}: {}", code, outcome.body_text),
        None => outcome.body_text,
    }))
}

fn config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?.merge_with(&cli.overrides());
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no home directory, global config unavailable"),
            }
            if let Some(path) = &cli.config {
                output::action("explicit", &path.display());
            }
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("no home directory, cannot place global config".into())
            })?;
            write_config_template(&path, *force)?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

/// Write the commented settings template to `path`, creating parent directories.
pub fn write_config_template(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} exists, use --force to overwrite",
            path.display()
        )));
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| InfraError::io(format!("create config dir {}", dir.display()), e))?;
    }
    std::fs::write(path, Settings::template())
        .map_err(|e| InfraError::io(format!("write config {}", path.display()), e))?;
    Ok(())
}
