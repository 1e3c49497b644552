//! # Lattice CLI Installation Pipeline
//!
//! File: cli/src/commands/install/pipeline.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! The staged state machine behind `lattice install`:
//!
//! `ValidateEmptyDir → CollectParams → Download → Extract → Configure →
//!  SeedData → ProvisionAdmin → InstallDependencies`
//!
//! Stages run strictly in order; each consumes the side effects of the
//! previous one (Configure reads the env document Extract wrote, SeedData
//! reads the seed dump Extract unpacked). The first error aborts the
//! remaining sequence. There is no rollback: a failure after SeedData
//! leaves the seeded data in place — this is a fresh-install path and the
//! directory precondition keeps it from eating an existing app.
//!
//! ## Resource guarantees
//!
//! The download scratch directory is a `TempDir` in the context: `Extract`
//! closes it once the archive has been unpacked, and the drop glue removes
//! it when any stage fails first. The empty-directory check runs before
//! any network or filesystem mutation, so an aborted precondition leaves
//! zero artifacts behind.
//!
use super::params::{self, ResolvedParams};
use crate::common::db::admin;
use crate::common::db::transfer::{self, DataFormat, DropPolicy, TransferSpec};
use crate::common::fs::{io, scratch};
use crate::common::process::{self, ProcessOutcome, SuperviseOptions};
use crate::common::{archive, network};
use crate::core::config::{EnvironmentConfig, ENV_FILE_RELATIVE};
use crate::core::error::{LatticeError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// Release archive fetched by the Download stage. Overridable through the
/// environment so tests and mirrors can point elsewhere.
const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/lattice-framework/lattice/archive/refs/heads/master.tar.gz";
const ARCHIVE_URL_ENV: &str = "LATTICE_ARCHIVE_URL";

/// File name of the downloaded archive inside the scratch directory.
const ARCHIVE_FILE_NAME: &str = "lattice.tar.gz";

/// Directory inside the extracted tree holding the seed dump.
const SEED_DATA_DIR: &str = "db";

/// Parameter bag for one installation run, as collected from the CLI.
#[derive(Debug, Clone, Default)]
pub struct InstallParams {
    pub username: Option<String>,
    pub password: Option<String>,
    pub db: Option<String>,
    pub port: Option<u16>,
    pub overwrite: bool,
}

/// Mutable context threaded through the stage sequence. Exclusively owned
/// by one pipeline run.
struct InstallContext {
    params: InstallParams,
    workspace_root: PathBuf,
    resolved: Option<ResolvedParams>,
    scratch: Option<TempDir>,
    archive_path: Option<PathBuf>,
}

/// The closed set of installation stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstallStage {
    ValidateEmptyDir,
    CollectParams,
    Download,
    Extract,
    Configure,
    SeedData,
    ProvisionAdmin,
    InstallDependencies,
}

impl InstallStage {
    /// The stage that follows this one on success; `None` ends the run.
    fn next(self) -> Option<Self> {
        match self {
            InstallStage::ValidateEmptyDir => Some(InstallStage::CollectParams),
            InstallStage::CollectParams => Some(InstallStage::Download),
            InstallStage::Download => Some(InstallStage::Extract),
            InstallStage::Extract => Some(InstallStage::Configure),
            InstallStage::Configure => Some(InstallStage::SeedData),
            InstallStage::SeedData => Some(InstallStage::ProvisionAdmin),
            InstallStage::ProvisionAdmin => Some(InstallStage::InstallDependencies),
            InstallStage::InstallDependencies => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            InstallStage::ValidateEmptyDir => "ValidateEmptyDir",
            InstallStage::CollectParams => "CollectParams",
            InstallStage::Download => "Download",
            InstallStage::Extract => "Extract",
            InstallStage::Configure => "Configure",
            InstallStage::SeedData => "SeedData",
            InstallStage::ProvisionAdmin => "ProvisionAdmin",
            InstallStage::InstallDependencies => "InstallDependencies",
        }
    }
}

/// Runs the installation pipeline to completion or first failure.
pub async fn run(params: InstallParams, workspace_root: &Path) -> Result<()> {
    let mut ctx = InstallContext {
        params,
        workspace_root: workspace_root.to_path_buf(),
        resolved: None,
        scratch: None,
        archive_path: None,
    };

    let mut stage = Some(InstallStage::ValidateEmptyDir);
    while let Some(current) = stage {
        debug!("Install stage: {}", current.name());
        advance(current, &mut ctx)
            .await
            .with_context(|| format!("Installation failed during {}", current.name()))?;
        stage = current.next();
    }

    info!("Installation pipeline complete");
    Ok(())
}

/// Executes one stage against the shared context.
async fn advance(stage: InstallStage, ctx: &mut InstallContext) -> Result<()> {
    match stage {
        InstallStage::ValidateEmptyDir => {
            if !ctx.params.overwrite && io::dir_has_visible_entries(&ctx.workspace_root)? {
                anyhow::bail!(LatticeError::FileSystem(format!(
                    "Directory '{}' is not empty. Use --overwrite to install anyway.",
                    ctx.workspace_root.display()
                )));
            }
            Ok(())
        }
        InstallStage::CollectParams => {
            ctx.resolved = Some(params::collect(&ctx.params)?);
            Ok(())
        }
        InstallStage::Download => {
            let url =
                std::env::var(ARCHIVE_URL_ENV).unwrap_or_else(|_| DEFAULT_ARCHIVE_URL.to_string());
            let scratch_dir = scratch::create_scratch_dir(&ctx.workspace_root, "install-")?;
            let archive_path = scratch_dir.path().join(ARCHIVE_FILE_NAME);
            network::download_file(&url, &archive_path).await?;
            ctx.scratch = Some(scratch_dir);
            ctx.archive_path = Some(archive_path);
            Ok(())
        }
        InstallStage::Extract => {
            let archive_path = ctx.archive_path.take().ok_or_else(|| {
                anyhow::anyhow!(LatticeError::FileSystem(
                    "No downloaded archive to extract".to_string()
                ))
            })?;
            // Release tarballs wrap everything in one top-level directory;
            // strip it so files land directly in the workspace.
            archive::tar::unpack_archive(&archive_path, &ctx.workspace_root, 1)?;
            if let Some(scratch_dir) = ctx.scratch.take() {
                let path = scratch_dir.path().to_path_buf();
                scratch_dir.close().with_context(|| {
                    format!("Failed to remove scratch directory {:?}", path)
                })?;
            }
            Ok(())
        }
        InstallStage::Configure => {
            let resolved = ctx.resolved()?;
            let env_path = ctx.workspace_root.join(ENV_FILE_RELATIVE);
            let mut env = EnvironmentConfig::load(&env_path)?;
            env.set_server_uri(&resolved.server_uri);
            env.set_port(resolved.port);
            env.set_database_uri(&resolved.db_uri);
            env.save()?;
            Ok(())
        }
        InstallStage::SeedData => {
            let resolved = ctx.resolved()?;
            let spec = TransferSpec {
                connection_uri: resolved.db_uri.clone(),
                root_path: ctx.workspace_root.join(SEED_DATA_DIR),
                collection_filter: None,
                // Fresh-install path: replace whatever shares the seed's shape.
                drop_policy: DropPolicy::All,
                archive_name: None,
                format: DataFormat::Bson,
            };
            let summary = transfer::import(&spec).await?;
            info!(
                "Seeded {} document(s) across {} collection(s)",
                summary.documents, summary.collections
            );
            Ok(())
        }
        InstallStage::ProvisionAdmin => {
            let resolved = ctx.resolved()?;
            admin::provision_admin(&resolved.db_uri, &resolved.username, &resolved.password).await
        }
        InstallStage::InstallDependencies => {
            let options =
                SuperviseOptions::npm(&ctx.workspace_root, "Installing dependencies...");
            match process::supervise("npm", &["install"], &options).await? {
                ProcessOutcome::Completed => Ok(()),
                ProcessOutcome::Cancelled => {
                    anyhow::bail!(LatticeError::Interrupted)
                }
            }
        }
    }
}

impl InstallContext {
    /// Resolved parameters; present from `CollectParams` onward.
    fn resolved(&self) -> Result<&ResolvedParams> {
        self.resolved.as_ref().ok_or_else(|| {
            anyhow::anyhow!(LatticeError::Config(
                "Installation parameters not collected".to_string()
            ))
        })
    }
}
