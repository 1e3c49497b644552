//! # Lattice CLI Module Templates
//!
//! File: cli/src/commands/create/templates.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Embedded Tera templates for the `create` command, one fixed file set
//! per module type. Variables available to every template: `name` (the
//! display name), `slug` (kebab-case directory name), and `kind` (the
//! module type).
//!
use crate::core::templating::TemplateFile;

/// Module manifest, shared by every module type.
const MODULE_MANIFEST: &str = r#"{
    "name": "{{ name }}",
    "slug": "{{ slug }}",
    "type": "{{ kind }}",
    "version": "0.0.1",
    "active": true
}
"#;

const HELPER_INDEX: &str = r#"/**
 * {{ name }} helper.
 * Registered with the Lattice helper registry at application start.
 */
module.exports = {
    id: '{{ slug }}',
    helper: (...args) => {
        // TODO: implement the {{ name }} helper body.
        return null;
    },
};
"#;

const PLUGIN_INDEX: &str = r#"/**
 * {{ name }} plugin.
 * Lifecycle hooks are invoked by the Lattice plugin loader.
 */
module.exports = {
    id: '{{ slug }}',
    order: 100,
    init: (app) => app,
    start: (app) => app,
};
"#;

const WIDGET_INDEX: &str = r#"/**
 * {{ name }} widget.
 * Mounted into admin dashboard zones by zone id.
 */
module.exports = {
    id: '{{ slug }}',
    zone: 'dashboard',
    render: () => '{{ name }}',
};
"#;

const THEME_INDEX: &str = r#"/**
 * {{ name }} theme entry point.
 */
module.exports = {
    id: '{{ slug }}',
    assets: ['style.css'],
};
"#;

const THEME_STYLE: &str = r#"/* {{ name }} theme styles. */
:root {
    --{{ slug }}-accent: #4067b0;
}
"#;

/// File set for helper modules.
pub const HELPER_FILES: &[TemplateFile] = &[
    TemplateFile {
        relative_path: "module.json",
        template: MODULE_MANIFEST,
    },
    TemplateFile {
        relative_path: "index.js",
        template: HELPER_INDEX,
    },
];

/// File set for plugin modules.
pub const PLUGIN_FILES: &[TemplateFile] = &[
    TemplateFile {
        relative_path: "module.json",
        template: MODULE_MANIFEST,
    },
    TemplateFile {
        relative_path: "index.js",
        template: PLUGIN_INDEX,
    },
];

/// File set for widget modules.
pub const WIDGET_FILES: &[TemplateFile] = &[
    TemplateFile {
        relative_path: "module.json",
        template: MODULE_MANIFEST,
    },
    TemplateFile {
        relative_path: "index.js",
        template: WIDGET_INDEX,
    },
];

/// File set for theme modules.
pub const THEME_FILES: &[TemplateFile] = &[
    TemplateFile {
        relative_path: "module.json",
        template: MODULE_MANIFEST,
    },
    TemplateFile {
        relative_path: "index.js",
        template: THEME_INDEX,
    },
    TemplateFile {
        relative_path: "style.css",
        template: THEME_STYLE,
    },
];
