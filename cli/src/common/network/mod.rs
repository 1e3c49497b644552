//! # Lattice CLI Network Utilities (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! HTTP download support for the installer: fetches a remote archive and
//! streams it into a local file, rendering byte progress as it goes. This
//! is the only place the CLI performs outbound HTTP.
//!
//! ## Architecture
//!
//! Built on `reqwest` with rustls. The response body is consumed as a byte
//! stream and written chunk-by-chunk via `tokio::fs`, so archives never
//! need to fit in memory. Non-2xx statuses are turned into errors before
//! the first byte is written.
//!
use crate::common::ui;
use crate::core::error::Result;
use anyhow::Context;
use futures_util::TryStreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Downloads `url` into the file at `dest`, streaming the body to disk.
///
/// The destination file is created (truncated if present). Progress is
/// rendered from the `Content-Length` header when the server provides one.
///
/// # Errors
///
/// Returns an `Err` if the request fails, the server responds with a
/// non-success status, or any chunk cannot be read or written.
pub async fn download_file(url: &str, dest: &Path) -> Result<()> {
    info!("Downloading '{}' to '{}'", url, dest.display());

    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to request '{}'", url))?
        .error_for_status()
        .with_context(|| format!("Server rejected download of '{}'", url))?;

    let bar = ui::download_bar(response.content_length());

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("Failed to create download file '{}'", dest.display()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream
        .try_next()
        .await
        .with_context(|| format!("Failed reading response body from '{}'", url))?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed writing to '{}'", dest.display()))?;
        bar.inc(chunk.len() as u64);
    }

    file.flush()
        .await
        .with_context(|| format!("Failed flushing '{}'", dest.display()))?;
    bar.finish_and_clear();
    info!("Download complete: {}", dest.display());
    Ok(())
}
