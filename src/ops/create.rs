//! `monokit create`: a new monorepo with one folder per app.

use anyhow::{Context, Result, bail};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::catalog::{DevEnv, Framework};
use crate::config::Config;
use crate::loader::Loader;
use crate::ops::scaffold::{self, AppKind, AppPlan};
use crate::paths;
use crate::platform::{Fs, Prompter, Runner};
use crate::template::{self, Replacement};

static SUBFOLDERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]+(?:-[a-zA-Z]+)?(\([a-zA-Z]+(?:-[a-zA-Z]+)?\))?\s*)*$")
        .expect("valid subfolder list regex")
});

static SUBFOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]+(?:-[a-zA-Z]+)?)(?:\(([a-zA-Z]+(?:-[a-zA-Z]+)?)\))?$")
        .expect("valid subfolder regex")
});

const NPM_TEST_SCRIPT: &str = r#""test": "echo \"Error: no test specified\" && exit 1""#;
const BIOME_INSTALL: &str = "npm install --save-dev --save-exact @biomejs/biome";
const BIOME_MIGRATE: &str = "npx @biomejs/biome migrate --write";
const BIOME_SCRIPTS: &[(&str, &str)] = &[
    ("lint", "npx @biomejs/biome lint ."),
    ("format", "npx @biomejs/biome format . --write"),
    ("check", "npx @biomejs/biome check ."),
];

/// A sub-folder entry as typed, before frameworks are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    folder: String,
    env: DevEnv,
}

pub fn run(
    config: &Config,
    name: Option<&str>,
    path: Option<&str>,
    dry_run: bool,
    fs: &impl Fs,
    runner: &impl Runner,
    prompter: &impl Prompter,
) -> Result<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => prompter.ask("❔ What is the name of the project?")?,
    };
    let name = paths::validate_name(&name, "project")?;

    let answer = match path {
        Some(path) => path.to_string(),
        None => prompter.ask(&format!(
            "❔ Where do you want to create the project {name}? (leave empty for current path)"
        ))?,
    };
    let parent = paths::parent_dir(&answer, fs);
    if !fs.is_dir(&parent) {
        bail!("The directory {} does not exist", parent.display());
    }
    let project_dir = parent.join(&name);
    if fs.exists(&project_dir) {
        bail!("The project {name} already exists in {}", parent.display());
    }

    let folders = prompter.ask(
        "❔ Which subfolders should this project have? (ex: client(vite) backoffice(vite) server) (separate by space)",
    )?;
    let entries = parse_subfolders(&folders)?;
    let apps = plan_apps(config, &entries, prompter)?;

    if dry_run {
        for step in planned_steps(config, &project_dir, &apps) {
            info!("[dry-run] Would {step}");
        }
        return Ok(());
    }

    let mut loader = Loader::start(format!("Creating {name}"));
    fs.create_dir(&project_dir)
        .with_context(|| format!("Failed to create {}", project_dir.display()))?;

    let result = build(config, &name, &project_dir, &apps, fs, runner, &mut loader);
    loader.stop();

    if let Err(err) = result {
        warn!("Step failed: {}", loader.message());
        warn!("Removing {} after failure", project_dir.display());
        if let Err(cleanup) = fs.remove_dir_all(&project_dir) {
            warn!("Could not remove {}: {cleanup:#}", project_dir.display());
        }
        return Err(err.context(format!("Failed to create project {name}")));
    }

    info!("✅ {name} project created");
    Ok(())
}

/// Split the sub-folder answer into entries.
///
/// A folder without a `(env)` suffix is a plain node app.
fn parse_subfolders(answer: &str) -> Result<Vec<Entry>> {
    let answer = answer.trim();
    if !SUBFOLDERS.is_match(answer) {
        bail!(
            "Invalid subfolder list {answer:?}. Use names like `client(vite) backoffice(vite) server`."
        );
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for word in answer.split_whitespace() {
        let Some(caps) = SUBFOLDER.captures(word) else {
            bail!("Invalid subfolder {word:?}");
        };
        let folder = caps[1].to_string();
        let env = match caps.get(2) {
            Some(env) => DevEnv::parse(env.as_str())
                .with_context(|| unsupported_env(env.as_str()))?,
            None => DevEnv::None,
        };
        if !seen.insert(folder.clone()) {
            bail!("The subfolder {folder} is listed more than once");
        }
        entries.push(Entry { folder, env });
    }
    Ok(entries)
}

pub(crate) fn unsupported_env(env: &str) -> String {
    let mut message = format!(
        "Unsupported development environment {env:?} (supported: {})",
        DevEnv::SUPPORTED.join(", ")
    );
    if let Some(suggestion) = DevEnv::suggest(env) {
        message.push_str(&format!(". Did you mean {suggestion:?}?"));
    }
    message
}

/// Ask framework and variant for every vite entry and assign ports.
fn plan_apps(config: &Config, entries: &[Entry], prompter: &impl Prompter) -> Result<Vec<AppPlan>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let kind = match entry.env {
                DevEnv::Vite => AppKind::Vite {
                    template: pick_template(&entry.folder, prompter)?,
                },
                DevEnv::None => AppKind::Node,
            };
            let port = u16::try_from(index)
                .ok()
                .and_then(|offset| config.base_port.checked_add(offset))
                .with_context(|| format!("No port left for {}", entry.folder))?;
            Ok(AppPlan {
                folder: entry.folder.clone(),
                kind,
                port,
            })
        })
        .collect()
}

/// Select a framework and then one of its variants for `folder`.
pub(crate) fn pick_template(folder: &str, prompter: &impl Prompter) -> Result<String> {
    let framework = prompter.select(
        &format!("❔ Pick a framework for the app {folder}?"),
        &Framework::options(folder),
    )?;
    let variant = prompter.select(
        &format!("❔ Pick a variant of {} for the app {folder}?", framework.name),
        &framework.variant_options(),
    )?;
    Ok(framework.template(variant))
}

/// Every step `build` performs, in order, for dry runs.
fn planned_steps(config: &Config, project_dir: &Path, apps: &[AppPlan]) -> Vec<String> {
    let mut steps = vec![
        format!("create directory: {}", project_dir.display()),
        "run: npm init -y".to_string(),
    ];
    steps.extend(apps.iter().map(|app| format!("create app: {}", app.describe())));
    if config.biome {
        steps.push(format!("run: {BIOME_INSTALL}"));
        steps.push("write: biome.json".to_string());
    }
    steps.push("write: .gitignore, README.md".to_string());
    if config.biome {
        steps.push(format!("run: {BIOME_MIGRATE}"));
    }
    let scripts = root_scripts(apps, config.biome);
    if !scripts.is_empty() {
        steps.push(format!("set package.json scripts: {}", scripts.join(", ")));
    }
    steps
}

fn build(
    config: &Config,
    name: &str,
    project_dir: &Path,
    apps: &[AppPlan],
    fs: &impl Fs,
    runner: &impl Runner,
    loader: &mut Loader,
) -> Result<()> {
    loader.set_message(format!("Creating {name} - Initializing npm"));
    runner.run(project_dir, "npm init -y")?;

    for app in apps {
        scaffold::scaffold(config, project_dir, app, fs, runner, loader)?;
    }

    if config.biome {
        loader.set_message(format!("Creating {name} - Installing biome"));
        runner.run(project_dir, BIOME_INSTALL)?;
        fs.write(&project_dir.join("biome.json"), template::BIOME_JSON.as_bytes())
            .context("Failed to write biome.json")?;
    }

    loader.set_message(format!("Creating {name} - Writing project files"));
    fs.write(&project_dir.join(".gitignore"), template::GITIGNORE.as_bytes())
        .context("Failed to write .gitignore")?;
    let mut ctx = tera::Context::new();
    ctx.insert("project", name);
    ctx.insert("apps", &scaffold::summaries(apps));
    template::write_rendered(fs, &project_dir.join("README.md"), template::README, &ctx)?;

    if config.biome {
        loader.set_message(format!("Creating {name} - Migrating biome config"));
        runner.run(project_dir, BIOME_MIGRATE)?;
    }

    loader.set_message(format!("Creating {name} - Setting package.json scripts"));
    let scripts = root_scripts(apps, config.biome);
    if scripts.is_empty() {
        debug!("No root scripts to register");
        return Ok(());
    }
    let applied = template::apply_replacements(
        fs,
        &project_dir.join("package.json"),
        &[Replacement::literal(NPM_TEST_SCRIPT, scripts.join(",\n    "))],
    )?;
    if applied == 0 {
        warn!("package.json has no default test script, root scripts were not added");
    }
    Ok(())
}

fn root_scripts(apps: &[AppPlan], biome: bool) -> Vec<String> {
    let mut scripts: Vec<String> = apps.iter().map(AppPlan::run_script).collect();
    if biome {
        scripts.extend(
            BIOME_SCRIPTS
                .iter()
                .map(|(name, command)| format!("\"{name}\": \"{command}\"")),
        );
    }
    scripts
}
