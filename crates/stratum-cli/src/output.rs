//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use stratum_core::prelude::{GenerationReport, LayerOutcome};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Manages CLI output based on flags and configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = args.output_format.unwrap_or(config.output.format);
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.mark_success(msg))
    }

    /// Error indicator: `✗ <msg>`.  Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(&self.mark_error(msg))
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout. Printed even in quiet mode.
    pub fn json<T: Serialize>(&self, what: &'static str, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|source| CliError::Serialization { what, source })?;
        self.term.write_line(&text)?;
        Ok(())
    }

    /// Spinner on stderr while a long step runs; only for interactive human output.
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.quiet || self.resolved_format != OutputFormat::Human || !io::stderr().is_terminal()
        {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Render a generation report in the resolved format.
    pub fn report(&self, report: &GenerationReport) -> CliResult<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json("generation report", report);
        }
        for line in self.report_lines(report) {
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    fn report_lines(&self, report: &GenerationReport) -> Vec<String> {
        let verb = if report.dry_run { "Would generate" } else { "Generated" };
        let mut lines = Vec::new();
        if !self.quiet {
            lines.push(String::new());
            let title = format!(
                "{verb} {} ({}), placement {}",
                report.model, report.plural, report.placement
            );
            lines.push(if self.no_color {
                title
            } else {
                title.cyan().bold().to_string()
            });
        }

        for layer in &report.layers {
            match &layer.outcome {
                LayerOutcome::Written { files } | LayerOutcome::Planned { files } => {
                    if self.quiet {
                        continue;
                    }
                    lines.push(self.mark_success(&format!(
                        "{:<12} {} file(s)",
                        layer.layer.as_str(),
                        files.len()
                    )));
                    lines.extend(files.iter().map(|f| format!("    {}", f.display())));
                }
                LayerOutcome::Failed { error } => {
                    lines.push(self.mark_error(&format!("{:<12} {error}", layer.layer.as_str())));
                }
                LayerOutcome::Skipped => {
                    if !self.quiet {
                        lines.push(format!("- {:<12} skipped", layer.layer.as_str()));
                    }
                }
            }
        }
        lines
    }

    fn mark_success(&self, msg: &str) -> String {
        if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        }
    }

    fn mark_error(&self, msg: &str) -> String {
        if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}
