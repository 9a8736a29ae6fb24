use crate::runner::{CommandFailure, CommandRunner};

pub const LIST_GENERATIONS_COMMAND: (&str, &[&str]) = ("nixos-rebuild", &["list-generations"]);
pub const INSTALLED_PACKAGES_COMMAND: (&str, &[&str]) = ("nix-env", &["-q", "--installed"]);
pub const UNKNOWN_GENERATION: &str = "unknown";

const CURRENT_MARKER: &str = "current";

/// Picks the last line of a generation listing that mentions `current`.
pub fn select_current_generation(listing: &str) -> String {
    listing
        .split('\n')
        .rev()
        .find(|line| line.contains(CURRENT_MARKER))
        .unwrap_or(UNKNOWN_GENERATION)
        .to_string()
}

pub fn current_generation(runner: &dyn CommandRunner) -> Result<String, CommandFailure> {
    let (program, args) = LIST_GENERATIONS_COMMAND;
    let listing = runner.run(program, args).into_result()?;
    Ok(select_current_generation(&listing))
}

pub fn installed_packages(runner: &dyn CommandRunner) -> Result<String, CommandFailure> {
    let (program, args) = INSTALLED_PACKAGES_COMMAND;
    runner.run(program, args).into_result()
}

/// A best-effort query result: the value is empty when `warning` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Observed {
    pub value: String,
    pub warning: Option<String>,
}

impl Observed {
    fn from_query(query: &str, result: Result<String, CommandFailure>) -> Self {
        match result {
            Ok(value) => Self {
                value,
                warning: None,
            },
            Err(err) => Self {
                value: String::new(),
                warning: Some(format!("{query} unavailable: {err}")),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemSnapshot {
    pub generation: Observed,
    pub packages: Observed,
}

impl SystemSnapshot {
    /// Queries generation and package state; failures degrade instead of aborting.
    pub fn capture(runner: &dyn CommandRunner) -> Self {
        Self {
            generation: Observed::from_query("current generation", current_generation(runner)),
            packages: Observed::from_query("installed packages", installed_packages(runner)),
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        [&self.generation, &self.packages]
            .into_iter()
            .filter_map(|observed| observed.warning.clone())
            .collect()
    }
}
