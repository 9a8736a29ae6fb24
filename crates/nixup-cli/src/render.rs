use std::io::IsTerminal;
use std::time::{Duration, Instant};

use anstyle::{AnsiColor, Effects, Style};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn resolve_output_style(stdout_is_tty: bool, force_plain: bool) -> OutputStyle {
    if stdout_is_tty && !force_plain {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub(crate) fn current_output_style(force_plain: bool) -> OutputStyle {
    resolve_output_style(std::io::stdout().is_terminal(), force_plain)
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
}

pub(crate) struct UpgradeProgress {
    spinner: Option<ProgressBar>,
    started_at: Instant,
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self { style }
    }

    pub(crate) fn style(self) -> OutputStyle {
        self.style
    }

    pub(crate) fn print_banner(self, title: &str) {
        println!("{}", render_banner(self.style, title));
    }

    pub(crate) fn print_line(self, message: &str) {
        println!("{message}");
    }

    pub(crate) fn print_status(self, status: &str, message: &str) {
        println!("{}", render_status_line(self.style, status, message));
    }

    pub(crate) fn print_warning(self, message: &str) {
        eprintln!("{}", render_status_line(self.style, "warn", message));
    }

    pub(crate) fn start_upgrade_progress(self, label: &str) -> UpgradeProgress {
        let spinner = if self.style == OutputStyle::Rich {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan.bold} {msg} {elapsed}") {
                spinner.set_style(style.tick_chars("-=~* "));
            }
            spinner.set_message(label.to_string());
            spinner.enable_steady_tick(Duration::from_millis(80));
            Some(spinner)
        } else {
            None
        };

        UpgradeProgress {
            spinner,
            started_at: Instant::now(),
        }
    }
}

impl UpgradeProgress {
    pub(crate) fn finish(mut self) -> Duration {
        self.clear();
        self.started_at.elapsed()
    }

    fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for UpgradeProgress {
    fn drop(&mut self) {
        self.clear();
    }
}

pub(crate) fn render_banner(style: OutputStyle, title: &str) -> String {
    let line = format!("== {title} ==");
    match style {
        OutputStyle::Plain => line,
        OutputStyle::Rich => colorize(banner_style(), &line),
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => {
            let (badge, badge_style) = status_badge(status);
            format!("{} {message}", colorize(badge_style, badge))
        }
    }
}

pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    format!("{secs}.{millis:03}s")
}

fn status_badge(status: &str) -> (&'static str, Style) {
    match status {
        "ok" => ("[OK]", badge_style(AnsiColor::BrightGreen)),
        "warn" => ("[WARN]", badge_style(AnsiColor::BrightYellow)),
        "err" => ("[ERR]", badge_style(AnsiColor::BrightRed)),
        _ => ("[..]", badge_style(AnsiColor::BrightBlue)),
    }
}

fn badge_style(color: AnsiColor) -> Style {
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn banner_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

/// Wraps `text` in ANSI codes; the text itself is left untouched.
fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
