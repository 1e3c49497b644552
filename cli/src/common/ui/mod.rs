//! # Lattice CLI Terminal UI Utilities (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Terminal progress rendering built on `indicatif`:
//!
//! - a spinner with a single collapsing message line, used by the process
//!   supervisor to surface one meaningful status string at a time, and
//! - a byte progress bar for archive downloads.
//!
//! Both render to stderr so stdout stays clean for command output, and both
//! degrade gracefully when stderr is not a terminal (indicatif hides the
//! bar and drops the draw calls).
//!
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Creates a spinner whose message is replaced in place — the "single
/// collapsing status line" used while supervising subprocesses.
pub fn status_spinner(initial: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {wide_msg}")
            .expect("spinner template is statically valid"),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(initial.to_string());
    spinner
}

/// Creates a byte-denominated progress bar for a download of `total` bytes,
/// or a plain spinner when the length is unknown.
pub fn download_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template(
                    "{bar:30.cyan/blue} {bytes}/{total_bytes} ({eta}) {wide_msg}",
                )
                .expect("download template is statically valid"),
            );
            bar
        }
        None => status_spinner("Downloading..."),
    }
}
