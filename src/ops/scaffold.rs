//! Scaffolding of a single app folder, shared by `create` and `add`.
//!
//! A vite app is bootstrapped by create-vite and then trimmed and rewired; a
//! plain node app is an `npm init -y` package with an entry file.

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::config::Config;
use crate::loader::Loader;
use crate::platform::{Fs, Runner};
use crate::template::{self, Replacement};

/// Files create-vite emits that the monorepo root owns instead.
const REDUNDANT_FILES: &[&str] = &[".eslintrc.cjs", ".gitignore", "README.md"];

const VITE_CONFIG_NAMES: &[&str] = &["vite.config.js", "vite.config.ts", "vite.config.mjs"];

static BUILD_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""build": "([^"]*)""#).expect("valid build script regex"));

/// How an app gets bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppKind {
    /// create-vite with the given `--template`.
    Vite { template: String },
    Node,
}

/// Everything needed to scaffold one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPlan {
    pub folder: String,
    pub kind: AppKind,
    pub port: u16,
}

/// Template-facing view of an [`AppPlan`].
#[derive(Serialize)]
pub struct AppSummary<'a> {
    folder: &'a str,
    vite: bool,
    port: u16,
}

impl AppPlan {
    pub fn is_vite(&self) -> bool {
        matches!(self.kind, AppKind::Vite { .. })
    }

    /// The `"name": "command"` entry that runs this app from the project root.
    pub fn run_script(&self) -> String {
        let command = if self.is_vite() {
            "npm run dev"
        } else {
            "node index.js"
        };
        format!("\"{0}\": \"cd {0} && {command}\"", self.folder)
    }

    /// One-line description for logs and dry runs.
    pub fn describe(&self) -> String {
        match &self.kind {
            AppKind::Vite { template } => {
                format!("{} (vite, template {template}, port {})", self.folder, self.port)
            }
            AppKind::Node => format!("{} (node)", self.folder),
        }
    }
}

/// Serializable summaries for the README template.
pub fn summaries(apps: &[AppPlan]) -> Vec<AppSummary<'_>> {
    apps.iter()
        .map(|app| AppSummary {
            folder: &app.folder,
            vite: app.is_vite(),
            port: app.port,
        })
        .collect()
}

/// Scaffold `app` as a new folder of `parent`.
pub fn scaffold(
    config: &Config,
    parent: &Path,
    app: &AppPlan,
    fs: &impl Fs,
    runner: &impl Runner,
    loader: &mut Loader,
) -> Result<PathBuf> {
    let app_dir = parent.join(&app.folder);
    match &app.kind {
        AppKind::Vite { template } => {
            vite_app(config, parent, &app_dir, app, template, fs, runner, loader)?
        }
        AppKind::Node => node_app(&app_dir, app, fs, runner, loader)?,
    }
    info!("Created {}", app.describe());
    Ok(app_dir)
}

#[allow(clippy::too_many_arguments)]
fn vite_app(
    config: &Config,
    parent: &Path,
    app_dir: &Path,
    app: &AppPlan,
    template: &str,
    fs: &impl Fs,
    runner: &impl Runner,
    loader: &mut Loader,
) -> Result<()> {
    let folder = &app.folder;

    loader.set_message(format!("Creating {folder} - Installing and initializing vite"));
    runner.run(
        parent,
        &format!(
            "npm create vite@{} {folder} -- --template {template}",
            config.vite_version
        ),
    )?;
    if !fs.is_dir(app_dir) {
        bail!("create-vite did not create {}", app_dir.display());
    }
    runner.run(app_dir, "npm install")?;

    loader.set_message(format!("Creating {folder} - Removing unnecessary files"));
    for name in REDUNDANT_FILES {
        let path = app_dir.join(name);
        if fs.exists(&path) {
            fs.remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            debug!("Removed {}", path.display());
        }
    }

    loader.set_message(format!("Creating {folder} - Setting package.json scripts"));
    let manifest = app_dir.join("package.json");
    let contents = fs
        .read_to_string(&manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    template::apply_replacements(
        fs,
        &manifest,
        &script_replacements(&contents, app.port, config.open_browser)?,
    )?;

    loader.set_message(format!("Creating {folder} - Updating vite config"));
    configure_vite(app_dir, fs)?;

    loader.set_message(format!("Creating {folder} - Setup env folder and files"));
    let env_dir = app_dir.join("envDir");
    fs.create_dir(&env_dir)
        .with_context(|| format!("Failed to create {}", env_dir.display()))?;
    for name in [".env.production", ".env.development"] {
        let path = env_dir.join(name);
        fs.write(&path, b"")
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

fn node_app(
    app_dir: &Path,
    app: &AppPlan,
    fs: &impl Fs,
    runner: &impl Runner,
    loader: &mut Loader,
) -> Result<()> {
    let folder = &app.folder;

    loader.set_message(format!("Creating {folder}"));
    fs.create_dir(app_dir)
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;

    loader.set_message(format!("Creating {folder} - Initializing npm"));
    runner.run(app_dir, "npm init -y")?;

    let mut ctx = tera::Context::new();
    ctx.insert("app", folder);
    template::write_rendered(fs, &app_dir.join("index.js"), template::INDEX_JS, &ctx)
}

/// Rewrites for a create-vite `package.json`.
///
/// `dev` gets a fixed port, `build` is split into semver-bumping variants, and
/// the eslint `lint` script is dropped.
fn script_replacements(manifest: &str, port: u16, open: bool) -> Result<Vec<Replacement>> {
    let open_flag = if open { " --open" } else { "" };
    let mut replacements = vec![Replacement::regex(
        r#""dev": "vite""#,
        format!("\"dev\": \"vite{open_flag} --port {port}\""),
    )?];

    if let Some(caps) = BUILD_SCRIPT.captures(manifest) {
        let build = &caps[1];
        let bumps: Vec<String> = ["patch", "minor", "major"]
            .iter()
            .map(|level| format!("\"build-{level}\": \"npm version {level} && {build}\""))
            .collect();
        replacements.push(Replacement::literal(&caps[0], bumps.join(",\n    ")));
    }

    replacements.push(Replacement::regex(r#"\n\s*"lint": "eslint[^"]*","#, "")?);
    replacements.push(Replacement::regex(r#",\s*"lint": "eslint[^"]*""#, "")?);
    Ok(replacements)
}

/// Point vite at `envDir`, add the `@` alias, CSS sourcemaps and `APP_VERSION`.
///
/// Injects into the existing config when it has a `defineConfig({` call,
/// otherwise writes a minimal `vite.config.js`.
fn configure_vite(app_dir: &Path, fs: &impl Fs) -> Result<()> {
    let existing = VITE_CONFIG_NAMES
        .iter()
        .map(|name| app_dir.join(name))
        .find(|path| fs.exists(path));

    if let Some(path) = existing {
        let contents = fs
            .read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if let Some(line) = contents.lines().position(|l| l.contains("defineConfig({")) {
            template::insert_line(fs, &path, line + 1, template::VITE_CONFIG_BLOCK.trim_end())?;
            if !contents.contains("from \"path\"") && !contents.contains("from 'path'") {
                template::insert_line(fs, &path, 0, "import path from \"path\";")?;
            }
            debug!("Injected config into {}", path.display());
            return Ok(());
        }
        debug!("{} has no defineConfig call, replacing it", path.display());
        fs.remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }

    let mut ctx = tera::Context::new();
    ctx.insert("block", template::VITE_CONFIG_BLOCK.trim_end());
    template::write_rendered(
        fs,
        &app_dir.join("vite.config.js"),
        template::VITE_CONFIG,
        &ctx,
    )
}
