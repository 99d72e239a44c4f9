//! `monokit add`: one more app inside an existing project.

use anyhow::{Context, Result, bail};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::catalog::DevEnv;
use crate::config::Config;
use crate::loader::Loader;
use crate::ops::create::{pick_template, unsupported_env};
use crate::ops::scaffold::{self, AppKind, AppPlan};
use crate::paths;
use crate::platform::{Fs, Prompter, Runner};
use crate::template::{self, Replacement};

static EMPTY_SCRIPTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""scripts":\s*\{\s*\}"#).expect("valid empty scripts regex"));

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &Config,
    app: &str,
    env: Option<&str>,
    path: Option<&str>,
    dry_run: bool,
    fs: &impl Fs,
    runner: &impl Runner,
    prompter: &impl Prompter,
) -> Result<()> {
    let name = paths::validate_name(app, "app")?;

    let answer = match path {
        Some(path) => path.to_string(),
        None => prompter.ask(&format!(
            "❔ Where do you want to create the app {name}? (leave empty for current path)"
        ))?,
    };
    let parent = paths::parent_dir(&answer, fs);
    if !fs.is_dir(&parent) {
        bail!("The directory {} does not exist", parent.display());
    }
    let app_dir = parent.join(&name);
    if fs.exists(&app_dir) {
        bail!("{name} already exists in {}", parent.display());
    }
    info!("App {name} will be created in {}", app_dir.display());

    let env = match env {
        Some(env) => DevEnv::parse(env).with_context(|| unsupported_env(env))?,
        None => prompter.select(
            "❔ Do you want to install any development environment?",
            &DevEnv::options(),
        )?,
    };
    let kind = match env {
        DevEnv::Vite => AppKind::Vite {
            template: pick_template(&name, prompter)?,
        },
        DevEnv::None => AppKind::Node,
    };
    let plan = AppPlan {
        port: next_port(config, &parent, fs)?,
        folder: name.clone(),
        kind,
    };

    let manifest = parent.join("package.json");
    if dry_run {
        info!("[dry-run] Would create app: {}", plan.describe());
        if fs.exists(&manifest) {
            info!("[dry-run] Would add script to {}", manifest.display());
        }
        return Ok(());
    }

    let mut loader = Loader::start(format!("Creating {name}"));
    let result = scaffold::scaffold(config, &parent, &plan, fs, runner, &mut loader)
        .and_then(|_| register_script(fs, &manifest, &plan));
    loader.stop();

    if let Err(err) = result {
        warn!("Step failed: {}", loader.message());
        if fs.exists(&app_dir) {
            warn!("Removing {} after failure", app_dir.display());
            if let Err(cleanup) = fs.remove_dir_all(&app_dir) {
                warn!("Could not remove {}: {cleanup:#}", app_dir.display());
            }
        }
        return Err(err.context(format!("Failed to create app {name}")));
    }

    info!("✅ {name} app created");
    Ok(())
}

/// The first port after the apps already in `parent`.
///
/// Every sibling folder with a `package.json` counts as an app.
fn next_port(config: &Config, parent: &Path, fs: &impl Fs) -> Result<u16> {
    let existing = fs
        .read_dir(parent)
        .with_context(|| format!("Failed to list {}", parent.display()))?
        .into_iter()
        .filter(|entry| entry.is_dir && fs.exists(&entry.path.join("package.json")))
        .count();
    u16::try_from(existing)
        .ok()
        .and_then(|offset| config.base_port.checked_add(offset))
        .context("No free port left for the new app")
}

/// Add the app's run script to the project manifest, if there is one.
///
/// The entry goes first in `scripts`; it only takes a trailing comma when
/// other scripts follow.
fn register_script(fs: &impl Fs, manifest: &Path, plan: &AppPlan) -> Result<()> {
    if !fs.exists(manifest) {
        debug!("No {}, skipping script registration", manifest.display());
        return Ok(());
    }
    let contents = fs
        .read_to_string(manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let entry = plan.run_script();
    let replacement = if EMPTY_SCRIPTS.is_match(&contents) {
        Replacement::regex(
            EMPTY_SCRIPTS.as_str(),
            format!("\"scripts\": {{\n    {entry}\n  }}"),
        )?
    } else {
        Replacement::regex(r#""scripts":\s*\{"#, format!("\"scripts\": {{\n    {entry},"))?
    };
    let applied = template::apply_replacements(fs, manifest, &[replacement])?;
    if applied == 0 {
        warn!("{} has no scripts section", manifest.display());
    }
    Ok(())
}
