mod config;
mod diff;
mod journal;
mod record;
mod runner;
mod snapshot;
mod update;

pub use config::{UpdaterConfig, DEFAULT_LOG_FILE};
pub use diff::{added_packages, render_package_diff};
pub use journal::{format_log_record, LogError, UpdateLog, LOG_TIMESTAMP_FORMAT};
pub use record::{failure_record_body, success_record_body};
pub use runner::{CommandFailure, CommandOutput, CommandRunner, SystemCommandRunner};
pub use snapshot::{
    current_generation, installed_packages, select_current_generation, Observed, SystemSnapshot,
    INSTALLED_PACKAGES_COMMAND, LIST_GENERATIONS_COMMAND, UNKNOWN_GENERATION,
};
pub use update::{run_update, UpdateOutcome, UpdatePhase, UPGRADE_COMMAND};
