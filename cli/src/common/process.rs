//! # Lattice CLI Process Supervision (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module supervises external child processes (the dependency
//! installer, the application's build and launch scripts). It launches one
//! subprocess per call, streams its output into a single collapsing status
//! line, and detects the terminal conditions: success, failure, and
//! operator cancellation.
//!
//! ## Architecture
//!
//! Built on `tokio::process::Command` with piped stdout and stderr. Both
//! streams are read line-by-line inside a `select!` loop that also watches
//! for Ctrl-C:
//!
//! - Each line passes through a [`LineFilter`] that suppresses known-noisy
//!   output so only one meaningful status string is surfaced at a time.
//! - Once a configured *marker* substring is seen (a sub-phase boundary,
//!   e.g. a post-install script starting), no further lines are surfaced;
//!   the streams are still drained so the child never blocks on a full
//!   pipe.
//! - On Ctrl-C the child is killed and the call resolves as
//!   [`ProcessOutcome::Cancelled`] rather than hanging.
//!
//! After both streams close, the child's exit status is collected and a
//! non-zero exit becomes `LatticeError::ExternalCommand` — stream close by
//! itself is never taken as proof of success.
//!
use crate::common::ui;
use crate::core::error::{LatticeError, Result};
use anyhow::{anyhow, Context};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// How a supervised process run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The child exited with a zero status.
    Completed,
    /// An operator interrupt terminated the child before it finished.
    Cancelled,
}

/// Options controlling one supervised run.
#[derive(Debug, Clone, Default)]
pub struct SuperviseOptions {
    /// Working directory for the child; inherits the CLI's when `None`.
    pub cwd: Option<PathBuf>,
    /// Lines starting with any of these prefixes are never surfaced.
    pub noisy_prefixes: Vec<String>,
    /// Substring marking a sub-phase boundary; once seen, stop surfacing.
    pub marker: Option<String>,
    /// Initial status line shown before the child produces output.
    pub label: String,
}

impl SuperviseOptions {
    /// Options tuned for npm-driven subprocesses: suppress npm's chatter
    /// and stop surfacing once the postinstall sub-phase begins.
    pub fn npm(cwd: &std::path::Path, label: &str) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
            noisy_prefixes: vec![
                "npm WARN".into(),
                "npm notice".into(),
                "npm timing".into(),
                "npm http".into(),
            ],
            marker: Some("postinstall".into()),
            label: label.to_string(),
        }
    }
}

/// Decides which output lines are surfaced to the status display.
///
/// Stateful: observing the marker substring flips the filter into its
/// quiet mode for the rest of the run.
#[derive(Debug)]
pub struct LineFilter {
    noisy_prefixes: Vec<String>,
    marker: Option<String>,
    past_marker: bool,
}

impl LineFilter {
    pub fn new(noisy_prefixes: Vec<String>, marker: Option<String>) -> Self {
        Self {
            noisy_prefixes,
            marker,
            past_marker: false,
        }
    }

    /// Returns the line if it should be surfaced as the current status.
    ///
    /// Suppresses blank lines, configured noisy prefixes, and everything
    /// after the marker. The marker line itself is not surfaced; it marks
    /// the boundary, it is not progress.
    pub fn surface<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        if self.past_marker {
            return None;
        }
        let trimmed = line.trim();
        if let Some(marker) = &self.marker {
            if trimmed.contains(marker.as_str()) {
                self.past_marker = true;
                return None;
            }
        }
        if trimmed.is_empty() {
            return None;
        }
        if self
            .noisy_prefixes
            .iter()
            .any(|prefix| trimmed.starts_with(prefix.as_str()))
        {
            return None;
        }
        Some(trimmed)
    }
}

/// Runs one subprocess under supervision.
///
/// Streams stdout and stderr through the line filter into a collapsing
/// status line, kills the child on Ctrl-C, and checks the exit status once
/// both streams close.
///
/// # Errors
///
/// Returns an `Err` if the child cannot be spawned, a stream read fails,
/// or the child exits with a non-zero status
/// (`LatticeError::ExternalCommand`).
pub async fn supervise(
    program: &str,
    args: &[&str],
    options: &SuperviseOptions,
) -> Result<ProcessOutcome> {
    let display_cmd = format!("{} {}", program, args.join(" "));
    info!("Supervising subprocess: {}", display_cmd);

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to spawn '{}'", display_cmd))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("Child stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("Child stderr was not captured"))?;

    let mut stdout_lines = BufReader::new(stdout).lines();
    let mut stderr_lines = BufReader::new(stderr).lines();
    let mut stdout_open = true;
    let mut stderr_open = true;

    let mut filter = LineFilter::new(options.noisy_prefixes.clone(), options.marker.clone());
    let spinner = ui::status_spinner(&options.label);

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_lines.next_line(), if stdout_open => {
                match line.context("Failed reading child stdout")? {
                    Some(l) => {
                        debug!(target: "subprocess", "{}", l);
                        if let Some(status) = filter.surface(&l) {
                            spinner.set_message(status.to_string());
                        }
                    }
                    None => stdout_open = false,
                }
            }
            line = stderr_lines.next_line(), if stderr_open => {
                match line.context("Failed reading child stderr")? {
                    Some(l) => {
                        debug!(target: "subprocess", "{}", l);
                        if let Some(status) = filter.surface(&l) {
                            spinner.set_message(status.to_string());
                        }
                    }
                    None => stderr_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupt received, terminating '{}'", display_cmd);
                spinner.finish_and_clear();
                child
                    .kill()
                    .await
                    .with_context(|| format!("Failed to kill '{}'", display_cmd))?;
                return Ok(ProcessOutcome::Cancelled);
            }
        }
    }

    spinner.finish_and_clear();

    // Streams are closed; now collect and *check* the exit status.
    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to collect exit status of '{}'", display_cmd))?;
    if !status.success() {
        anyhow::bail!(LatticeError::ExternalCommand {
            cmd: display_cmd,
            status: status
                .code()
                .map(|c| format!("exit code {}", c))
                .unwrap_or_else(|| "terminated by signal".to_string()),
        });
    }

    info!("Subprocess completed: {}", display_cmd);
    Ok(ProcessOutcome::Completed)
}
