//! # Lattice CLI Template System
//!
//! File: cli/src/core/templating.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements the template rendering used by the `create`
//! command to scaffold new Lattice modules (helpers, plugins, widgets,
//! themes). It renders a fixed set of embedded Tera templates into a target
//! directory, creating intermediate directories as needed.
//!
//! ## Architecture
//!
//! Rendering uses `Tera::one_off` per template, with a context map of
//! string variables (module name, slug, type). Two rules govern output:
//!
//! 1. Target files that already exist are skipped, never overwritten.
//!    Re-running `create` over an existing module is therefore harmless.
//! 2. Parent directories are created on demand.
//!
//! There is no failure-recovery complexity here; the scaffolder has no
//! stage dependency on the orchestration pipelines.
//!
use crate::core::error::{LatticeError, Result};
use anyhow::{anyhow, Context};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One file to scaffold: a path relative to the module directory plus the
/// embedded Tera template for its content.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    pub relative_path: &'static str,
    pub template: &'static str,
}

/// Renders a set of embedded templates into `target_dir`.
///
/// Files that already exist at their target path are skipped with a warning
/// rather than overwritten. Returns the paths that were actually written.
///
/// # Errors
///
/// Returns an `Err` if a parent directory cannot be created, a template
/// fails to render, or a rendered file cannot be written. Rendering errors
/// surface as `LatticeError::Template`.
pub fn render_file_set(
    target_dir: &Path,
    files: &[TemplateFile],
    context_map: &HashMap<String, String>,
) -> Result<Vec<PathBuf>> {
    let tera_context = tera::Context::from_serialize(context_map)
        .map_err(|e| anyhow!(LatticeError::Template { source: e }))
        .context("Failed to build template context from variable map")?;

    let mut written = Vec::new();
    for file in files {
        let target_path = target_dir.join(file.relative_path);

        if target_path.exists() {
            warn!(
                "Skipping '{}': file already exists",
                target_path.display()
            );
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory '{}'", parent.display())
            })?;
        }

        let rendered = tera::Tera::one_off(file.template, &tera_context, false)
            .map_err(|e| anyhow!(LatticeError::Template { source: e }))
            .with_context(|| {
                format!("Template rendering failed for '{}'", file.relative_path)
            })?;

        fs::write(&target_path, rendered).with_context(|| {
            format!("Failed to write scaffolded file '{}'", target_path.display())
        })?;
        debug!("Wrote scaffolded file: {}", target_path.display());
        written.push(target_path);
    }

    Ok(written)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn context_with_name(name: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("name".to_string(), name.to_string());
        map
    }

    #[test]
    fn test_render_file_set_writes_and_creates_dirs() -> Result<()> {
        let dir = tempdir()?;
        let files = [
            TemplateFile {
                relative_path: "module.json",
                template: r#"{ "name": "{{ name }}" }"#,
            },
            TemplateFile {
                relative_path: "assets/index.js",
                template: "// {{ name }}\n",
            },
        ];

        let written = render_file_set(dir.path(), &files, &context_with_name("greeter"))?;
        assert_eq!(written.len(), 2);

        let manifest = fs::read_to_string(dir.path().join("module.json"))?;
        assert!(manifest.contains(r#""name": "greeter""#));
        let entry = fs::read_to_string(dir.path().join("assets/index.js"))?;
        assert_eq!(entry, "// greeter\n");
        Ok(())
    }

    #[test]
    fn test_render_file_set_skips_existing_files() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("module.json"), "original")?;
        let files = [TemplateFile {
            relative_path: "module.json",
            template: "replacement {{ name }}",
        }];

        let written = render_file_set(dir.path(), &files, &context_with_name("x"))?;
        assert!(written.is_empty());
        // The pre-existing file is untouched.
        assert_eq!(fs::read_to_string(dir.path().join("module.json"))?, "original");
        Ok(())
    }

    #[test]
    fn test_render_file_set_invalid_template_errors() {
        let dir = tempdir().unwrap();
        let files = [TemplateFile {
            relative_path: "broken.txt",
            template: "{{ unclosed",
        }];
        let result = render_file_set(dir.path(), &files, &context_with_name("x"));
        assert!(result.is_err());
    }
}
