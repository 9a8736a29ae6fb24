use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use nixup_core::{
    run_update, LogError, SystemCommandRunner, UpdateLog, UpdateOutcome, UpdatePhase,
    UpdaterConfig,
};

mod render;

use render::{current_output_style, format_elapsed, OutputStyle, TerminalRenderer, UpgradeProgress};

const UPDATE_FAILED_EXIT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "nixup")]
#[command(
    about = "Run nixos-rebuild switch and log the generation and package changes",
    long_about = None
)]
struct Cli {
    /// TOML file with `log_file` and `fail_on_update_error` settings.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Exit with status 2 when the upgrade command fails.
    #[arg(long)]
    fail_on_error: bool,
    /// Exit with status 0 on upgrade failure even if the config file enables
    /// `fail_on_update_error`.
    #[arg(long, conflicts_with = "fail_on_error")]
    no_fail_on_error: bool,
    /// Disable badges, colors and the progress spinner.
    #[arg(long)]
    plain: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let renderer = TerminalRenderer::from_style(current_output_style(cli.plain));

    match run_cli(cli, renderer) {
        Ok(code) => code,
        Err(err) => {
            report_fatal(renderer, &err);
            ExitCode::FAILURE
        }
    }
}

fn fatal_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<LogError>() {
        Some(log_err) => format!("fatal: update log unavailable: {log_err}"),
        None => format!("fatal: {err:#}"),
    }
}

fn report_fatal(renderer: TerminalRenderer, err: &anyhow::Error) {
    let message = fatal_message(err);
    eprintln!(
        "{}",
        render::render_status_line(renderer.style(), "err", &message)
    );
}

fn resolve_config(cli: &Cli) -> Result<UpdaterConfig> {
    let mut config = match &cli.config {
        Some(path) => UpdaterConfig::load(path)?,
        None => UpdaterConfig::default(),
    };
    if let Some(log_file) = &cli.log_file {
        config.log_file = log_file.clone();
    }
    if cli.fail_on_error {
        config.fail_on_update_error = true;
    }
    if cli.no_fail_on_error {
        config.fail_on_update_error = false;
    }
    Ok(config)
}

fn run_cli(cli: Cli, renderer: TerminalRenderer) -> Result<ExitCode> {
    let config = resolve_config(&cli)?;
    let log = UpdateLog::new(&config.log_file);

    renderer.print_banner("NixOS Auto-Updater");

    let mut progress: Option<UpgradeProgress> = None;
    let outcome = run_update(&SystemCommandRunner, &log, |phase| {
        if phase == UpdatePhase::RunUpgrade {
            renderer.print_line("Running nixos-rebuild switch...");
            progress = Some(renderer.start_upgrade_progress("nixos-rebuild switch"));
        } else if let Some(running) = progress.take() {
            let elapsed = running.finish();
            if renderer.style() == OutputStyle::Rich {
                renderer.print_status(
                    "..",
                    &format!("nixos-rebuild switch finished in {}", format_elapsed(elapsed)),
                );
            }
        }
    });
    drop(progress);
    let outcome = outcome?;

    for warning in outcome.warnings() {
        renderer.print_warning(warning);
    }

    Ok(report_outcome(renderer, &outcome, &config))
}

fn report_outcome(
    renderer: TerminalRenderer,
    outcome: &UpdateOutcome,
    config: &UpdaterConfig,
) -> ExitCode {
    match outcome {
        UpdateOutcome::Failed { failure, .. } => {
            if renderer.style() == OutputStyle::Rich {
                renderer.print_status("err", &failure.to_string());
            }
            renderer.print_status("err", "Update failed, logged.");
            exit_code_for(outcome, config)
        }
        UpdateOutcome::Updated {
            added_packages,
            log_path,
            ..
        } => {
            if renderer.style() == OutputStyle::Rich {
                renderer.print_status(
                    "..",
                    &format!(
                        "{added_packages} added package line(s) recorded in {}",
                        log_path.display()
                    ),
                );
            }
            renderer.print_status("ok", "Update complete. Changes logged.");
            exit_code_for(outcome, config)
        }
    }
}

fn exit_code_for(outcome: &UpdateOutcome, config: &UpdaterConfig) -> ExitCode {
    ExitCode::from(exit_status_for(outcome, config))
}

// A failed upgrade only changes the exit status when explicitly requested.
fn exit_status_for(outcome: &UpdateOutcome, config: &UpdaterConfig) -> u8 {
    if outcome.is_failed() && config.fail_on_update_error {
        UPDATE_FAILED_EXIT
    } else {
        0
    }
}
