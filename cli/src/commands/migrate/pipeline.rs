//! # Lattice CLI Migration Pipeline
//!
//! File: cli/src/commands/migrate/pipeline.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! The staged state machine behind `lattice migrate`. A migration is a
//! fixed sequence of asynchronous stages sharing one context:
//!
//! `ValidateParams → StageTempDir → BackupSource → RestoreTarget → Cleanup`
//!
//! The driver advances to the next stage only when the current one
//! succeeds; the first error aborts the remaining sequence. There are no
//! retries — any stage failure is terminal for the run.
//!
//! ## Resource guarantees
//!
//! The scratch directory created by `StageTempDir` is a `TempDir` held in
//! the context, so it is released on *every* exit path: `Cleanup` closes
//! it explicitly on success (surfacing removal errors), and the drop glue
//! removes it when any stage fails mid-pipeline.
//!
use crate::common::db::transfer::{self, DataFormat, DropPolicy, TransferSpec};
use crate::common::fs::scratch;
use crate::core::error::{LatticeError, Result};
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// Parameter bag for one migration run, as collected from the CLI.
#[derive(Debug, Clone, Default)]
pub struct MigrateParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub zip: Option<String>,
    pub collections: Option<String>,
    pub clear: bool,
}

/// Mutable context threaded through the stage sequence. Exclusively owned
/// by one pipeline run.
struct MigrateContext {
    params: MigrateParams,
    workspace_root: PathBuf,
    filter: Option<BTreeSet<String>>,
    scratch: Option<TempDir>,
}

/// The closed set of migration stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MigrateStage {
    ValidateParams,
    StageTempDir,
    BackupSource,
    RestoreTarget,
    Cleanup,
}

impl MigrateStage {
    /// The stage that follows this one on success; `None` ends the run.
    fn next(self) -> Option<Self> {
        match self {
            MigrateStage::ValidateParams => Some(MigrateStage::StageTempDir),
            MigrateStage::StageTempDir => Some(MigrateStage::BackupSource),
            MigrateStage::BackupSource => Some(MigrateStage::RestoreTarget),
            MigrateStage::RestoreTarget => Some(MigrateStage::Cleanup),
            MigrateStage::Cleanup => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            MigrateStage::ValidateParams => "ValidateParams",
            MigrateStage::StageTempDir => "StageTempDir",
            MigrateStage::BackupSource => "BackupSource",
            MigrateStage::RestoreTarget => "RestoreTarget",
            MigrateStage::Cleanup => "Cleanup",
        }
    }
}

/// Runs the migration pipeline to completion or first failure.
pub async fn run(params: MigrateParams, workspace_root: &Path) -> Result<()> {
    let filter = params
        .collections
        .as_deref()
        .map(transfer::parse_collection_filter);
    let mut ctx = MigrateContext {
        params,
        workspace_root: workspace_root.to_path_buf(),
        filter,
        scratch: None,
    };

    let mut stage = Some(MigrateStage::ValidateParams);
    while let Some(current) = stage {
        debug!("Migration stage: {}", current.name());
        advance(current, &mut ctx)
            .await
            .with_context(|| format!("Migration failed during {}", current.name()))?;
        stage = current.next();
    }

    info!("Migration pipeline complete");
    Ok(())
}

/// Executes one stage against the shared context.
async fn advance(stage: MigrateStage, ctx: &mut MigrateContext) -> Result<()> {
    match stage {
        MigrateStage::ValidateParams => {
            let mut missing = Vec::new();
            if ctx.params.from.as_deref().unwrap_or("").trim().is_empty() {
                missing.push("from".to_string());
            }
            if ctx.params.to.as_deref().unwrap_or("").trim().is_empty() {
                missing.push("to".to_string());
            }
            if !missing.is_empty() {
                anyhow::bail!(LatticeError::MissingParams(missing));
            }
            Ok(())
        }
        MigrateStage::StageTempDir => {
            ctx.scratch = Some(scratch::create_scratch_dir(&ctx.workspace_root, "migrate-")?);
            Ok(())
        }
        MigrateStage::BackupSource => {
            let spec = TransferSpec {
                connection_uri: ctx.params.from.clone().unwrap_or_default(),
                root_path: ctx.scratch_path()?,
                collection_filter: ctx.filter.clone(),
                drop_policy: DropPolicy::None,
                archive_name: ctx.params.zip.clone(),
                format: DataFormat::Bson,
            };
            transfer::export(&spec).await?;
            Ok(())
        }
        MigrateStage::RestoreTarget => {
            let has_filter = ctx.filter.as_ref().is_some_and(|set| !set.is_empty());
            let spec = TransferSpec {
                connection_uri: ctx.params.to.clone().unwrap_or_default(),
                root_path: ctx.scratch_path()?,
                collection_filter: ctx.filter.clone(),
                drop_policy: DropPolicy::derive(ctx.params.clear, has_filter),
                archive_name: ctx.params.zip.clone(),
                format: DataFormat::Bson,
            };
            transfer::import(&spec).await?;
            Ok(())
        }
        MigrateStage::Cleanup => {
            if let Some(scratch) = ctx.scratch.take() {
                let path = scratch.path().to_path_buf();
                scratch
                    .close()
                    .with_context(|| format!("Failed to remove scratch directory {:?}", path))?;
                debug!("Removed scratch directory {:?}", path);
            }
            Ok(())
        }
    }
}

impl MigrateContext {
    /// Path of the staged scratch directory; present from `StageTempDir`
    /// onward.
    fn scratch_path(&self) -> Result<PathBuf> {
        self.scratch
            .as_ref()
            .map(|dir| dir.path().to_path_buf())
            .ok_or_else(|| {
                anyhow::anyhow!(LatticeError::FileSystem(
                    "Scratch directory not staged".to_string()
                ))
            })
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stage_order_is_fixed() {
        let mut order = Vec::new();
        let mut stage = Some(MigrateStage::ValidateParams);
        while let Some(current) = stage {
            order.push(current.name());
            stage = current.next();
        }
        assert_eq!(
            order,
            vec![
                "ValidateParams",
                "StageTempDir",
                "BackupSource",
                "RestoreTarget",
                "Cleanup",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_params_abort_with_every_field_and_no_side_effects() {
        let workspace = tempdir().unwrap();
        let err = run(MigrateParams::default(), workspace.path())
            .await
            .unwrap_err();

        let lattice = err
            .chain()
            .find_map(|c| c.downcast_ref::<LatticeError>())
            .expect("expected LatticeError in chain");
        match lattice {
            LatticeError::MissingParams(fields) => {
                assert_eq!(fields, &vec!["from".to_string(), "to".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Validation failed before StageTempDir: no temp root was created.
        assert!(!workspace.path().join(scratch::SCRATCH_ROOT).exists());
    }

    #[tokio::test]
    async fn test_partial_params_name_only_the_absent_field() {
        let workspace = tempdir().unwrap();
        let params = MigrateParams {
            from: Some("mongodb://localhost:27017/source".into()),
            ..Default::default()
        };
        let err = run(params, workspace.path()).await.unwrap_err();
        let lattice = err
            .chain()
            .find_map(|c| c.downcast_ref::<LatticeError>())
            .unwrap();
        match lattice {
            LatticeError::MissingParams(fields) => {
                assert_eq!(fields, &vec!["to".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scratch_released_when_backup_stage_fails() {
        // An unreachable source makes BackupSource fail after the scratch
        // directory exists; the guard must still remove it.
        let workspace = tempdir().unwrap();
        let params = MigrateParams {
            from: Some("mongodb://127.0.0.1:1/none?serverSelectionTimeoutMS=200".into()),
            to: Some("mongodb://127.0.0.1:1/none?serverSelectionTimeoutMS=200".into()),
            ..Default::default()
        };
        let result = run(params, workspace.path()).await;
        assert!(result.is_err());

        let tmp_root = workspace.path().join(scratch::SCRATCH_ROOT);
        if tmp_root.exists() {
            let leftovers: Vec<_> = std::fs::read_dir(&tmp_root)
                .unwrap()
                .filter_map(|e| e.ok())
                .collect();
            assert!(
                leftovers.is_empty(),
                "scratch directory leaked: {:?}",
                leftovers
            );
        }
    }
}
