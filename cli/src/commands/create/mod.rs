//! # Lattice CLI Create Command
//!
//! File: cli/src/commands/create/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements `lattice create`, the module scaffolder. It
//! writes a small fixed set of files for a new helper, plugin, widget, or
//! theme module into a computed path, skipping any file that already
//! exists rather than overwriting it.
//!
//! The scaffolder has no ordering or failure-recovery complexity and no
//! stage dependency on the orchestration pipelines; it shares only the CLI
//! surface with them.
//!
//! ## Examples
//!
//! ```bash
//! # Scaffold an application helper
//! lattice create helper --name "Format Currency"
//!
//! # Scaffold a core plugin in an explicit application root
//! lattice create plugin --core --name syndicator --path ~/apps/site
//! ```
//!
use crate::core::error::{LatticeError, Result};
use crate::core::templating::{self, TemplateFile};
use anyhow::Context;
use clap::Parser;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Embedded template file sets per module type.
mod templates;

/// The module types the scaffolder knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Helper,
    Plugin,
    Widget,
    Theme,
}

impl ModuleKind {
    /// Lowercase name, as typed on the command line and rendered into
    /// manifests.
    fn as_str(self) -> &'static str {
        match self {
            ModuleKind::Helper => "helper",
            ModuleKind::Plugin => "plugin",
            ModuleKind::Widget => "widget",
            ModuleKind::Theme => "theme",
        }
    }

    /// Directory segment grouping modules of this kind (`helpers`, ...).
    fn plural(self) -> &'static str {
        match self {
            ModuleKind::Helper => "helpers",
            ModuleKind::Plugin => "plugins",
            ModuleKind::Widget => "widgets",
            ModuleKind::Theme => "themes",
        }
    }

    /// The file set scaffolded for this kind.
    fn files(self) -> &'static [TemplateFile] {
        match self {
            ModuleKind::Helper => templates::HELPER_FILES,
            ModuleKind::Plugin => templates::PLUGIN_FILES,
            ModuleKind::Widget => templates::WIDGET_FILES,
            ModuleKind::Theme => templates::THEME_FILES,
        }
    }
}

impl FromStr for ModuleKind {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "helper" => Ok(ModuleKind::Helper),
            "plugin" => Ok(ModuleKind::Plugin),
            "widget" => Ok(ModuleKind::Widget),
            "theme" => Ok(ModuleKind::Theme),
            other => Err(anyhow::anyhow!(LatticeError::Config(format!(
                "Unknown module type '{}' (expected helper, plugin, widget, or theme)",
                other
            )))),
        }
    }
}

/// Arguments for `lattice create`.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Module type: helper, plugin, widget, or theme.
    module_type: String,

    /// Display name of the new module; its kebab-case slug becomes the
    /// directory name. Defaults to `new-<type>`.
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Application root to scaffold into. Defaults to the current
    /// directory.
    #[arg(long, short = 'p')]
    path: Option<PathBuf>,

    /// Place the module under `src/core/` instead of `src/app/`.
    #[arg(long)]
    core: bool,
}

/// Handler for `lattice create`: resolves the target path and renders the
/// module's file set, skipping anything that already exists.
pub async fn handle_create(args: CreateArgs) -> Result<()> {
    let kind: ModuleKind = args.module_type.parse()?;
    let name = args
        .name
        .unwrap_or_else(|| format!("new-{}", kind.as_str()));
    let slug = slugify(&name);
    if slug.is_empty() {
        anyhow::bail!(LatticeError::Config(format!(
            "Module name '{}' produces an empty slug",
            name
        )));
    }

    let app_root = match args.path {
        Some(path) => path,
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let target_dir = module_dir(&app_root, kind, args.core, &slug);
    info!(
        "Scaffolding {} '{}' into '{}'",
        kind.as_str(),
        name,
        target_dir.display()
    );

    let mut context = HashMap::new();
    context.insert("name".to_string(), name.clone());
    context.insert("slug".to_string(), slug.clone());
    context.insert("kind".to_string(), kind.as_str().to_string());

    let written = templating::render_file_set(&target_dir, kind.files(), &context)?;

    println!(
        "✅ Created {} '{}' in {}",
        kind.as_str(),
        name,
        target_dir.display()
    );
    if written.is_empty() {
        println!("   (all files already existed; nothing was written)");
    } else {
        for path in &written {
            println!("   + {}", path.display());
        }
    }
    Ok(())
}

/// Computes the module directory:
/// `<root>/src/{app|core}/<kind-plural>/<slug>`.
fn module_dir(app_root: &std::path::Path, kind: ModuleKind, core: bool, slug: &str) -> PathBuf {
    let tier = if core { "core" } else { "app" };
    app_root
        .join("src")
        .join(tier)
        .join(kind.plural())
        .join(slug)
}

/// Converts a display name to a kebab-case slug: lowercase, alphanumerics
/// kept, every other run of characters collapsed to a single hyphen.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_module_kind_parsing() {
        assert_eq!("helper".parse::<ModuleKind>().unwrap(), ModuleKind::Helper);
        assert_eq!("Theme".parse::<ModuleKind>().unwrap(), ModuleKind::Theme);
        assert!("gadget".parse::<ModuleKind>().is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Format Currency"), "format-currency");
        assert_eq!(slugify("already-kebab"), "already-kebab");
        assert_eq!(slugify("  padded  name "), "padded-name");
        assert_eq!(slugify("Mixed_Case 2.0"), "mixed-case-2-0");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_module_dir_layout() {
        let root = std::path::Path::new("/apps/site");
        assert_eq!(
            module_dir(root, ModuleKind::Widget, false, "clock"),
            PathBuf::from("/apps/site/src/app/widgets/clock")
        );
        assert_eq!(
            module_dir(root, ModuleKind::Plugin, true, "syndicator"),
            PathBuf::from("/apps/site/src/core/plugins/syndicator")
        );
    }

    #[tokio::test]
    async fn test_handle_create_writes_file_set() -> Result<()> {
        let root = tempdir()?;
        let args = CreateArgs::try_parse_from([
            "create",
            "theme",
            "--name",
            "Night Mode",
            "--path",
            root.path().to_str().unwrap(),
        ])
        .unwrap();
        handle_create(args).await?;

        let module = root.path().join("src/app/themes/night-mode");
        assert!(module.join("module.json").is_file());
        assert!(module.join("index.js").is_file());
        assert!(module.join("style.css").is_file());

        let manifest = std::fs::read_to_string(module.join("module.json"))?;
        assert!(manifest.contains(r#""name": "Night Mode""#));
        assert!(manifest.contains(r#""slug": "night-mode""#));
        assert!(manifest.contains(r#""type": "theme""#));
        Ok(())
    }

    #[tokio::test]
    async fn test_handle_create_skips_existing_files() -> Result<()> {
        let root = tempdir()?;
        let module = root.path().join("src/app/helpers/greeter");
        std::fs::create_dir_all(&module)?;
        std::fs::write(module.join("index.js"), "// original")?;

        let args = CreateArgs::try_parse_from([
            "create",
            "helper",
            "--name",
            "greeter",
            "--path",
            root.path().to_str().unwrap(),
        ])
        .unwrap();
        handle_create(args).await?;

        // The existing entry file was preserved; the manifest was added.
        assert_eq!(
            std::fs::read_to_string(module.join("index.js"))?,
            "// original"
        );
        assert!(module.join("module.json").is_file());
        Ok(())
    }
}
