use std::path::PathBuf;

use crate::diff::added_packages;
use crate::journal::{LogError, UpdateLog};
use crate::record::{failure_record_body, success_record_body};
use crate::runner::{CommandFailure, CommandRunner};
use crate::snapshot::SystemSnapshot;

pub const UPGRADE_COMMAND: (&str, &[&str]) = ("nixos-rebuild", &["switch"]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    SnapshotBefore,
    RunUpgrade,
    SnapshotAfter,
    WriteLog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated {
        log_path: PathBuf,
        added_packages: usize,
        warnings: Vec<String>,
    },
    Failed {
        log_path: PathBuf,
        failure: CommandFailure,
        warnings: Vec<String>,
    },
}

impl UpdateOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Updated { warnings, .. } | Self::Failed { warnings, .. } => warnings,
        }
    }
}

/// Snapshot, upgrade, snapshot again, then write exactly one log record.
///
/// A failed upgrade is an `Ok(UpdateOutcome::Failed)`; only a log failure is an error.
pub fn run_update<OnPhase>(
    runner: &dyn CommandRunner,
    log: &UpdateLog,
    mut on_phase: OnPhase,
) -> Result<UpdateOutcome, LogError>
where
    OnPhase: FnMut(UpdatePhase),
{
    on_phase(UpdatePhase::SnapshotBefore);
    let before = SystemSnapshot::capture(runner);
    let mut warnings = labelled_warnings("before upgrade", &before);

    on_phase(UpdatePhase::RunUpgrade);
    let (program, args) = UPGRADE_COMMAND;
    let upgrade = runner.run(program, args);

    if let Some(failure) = upgrade.failure {
        on_phase(UpdatePhase::WriteLog);
        log.append(&failure_record_body(&upgrade.text))?;
        return Ok(UpdateOutcome::Failed {
            log_path: log.path().to_path_buf(),
            failure,
            warnings,
        });
    }

    on_phase(UpdatePhase::SnapshotAfter);
    let after = SystemSnapshot::capture(runner);
    warnings.extend(labelled_warnings("after upgrade", &after));

    let added = added_packages(&before.packages.value, &after.packages.value).len();
    let body = success_record_body(&before, &after, &upgrade.text);

    on_phase(UpdatePhase::WriteLog);
    log.append(&body)?;

    Ok(UpdateOutcome::Updated {
        log_path: log.path().to_path_buf(),
        added_packages: added,
        warnings,
    })
}

fn labelled_warnings(stage: &str, snapshot: &SystemSnapshot) -> Vec<String> {
    snapshot
        .warnings()
        .into_iter()
        .map(|warning| format!("{stage}: {warning}"))
        .collect()
}
