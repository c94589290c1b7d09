use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use fs2::FileExt;

use frontgen::config::{ConfigWarning, Options};
use frontgen::domain::ports::PipelineEventSink;
use frontgen::infrastructure::{JsonEventSink, TracingEventSink};
use frontgen::{PipelineReport, Services, TaskPipeline};

use crate::cli::ProjectArgs;

const LOCK_FILE: &str = "frontgen.lock";

/// Config file, env overrides, then CLI flags
fn load_options(args: &ProjectArgs) -> Result<Options> {
    let (options, warnings) = match &args.config {
        Some(config) => Options::load_for_project(config, &args.project)
            .with_context(|| format!("failed to load {}", config.display()))?,
        None => Options::load_or_default(&args.project)
            .with_context(|| format!("failed to load configuration for {}", args.project.display()))?,
    };
    print_config_warnings(&warnings);

    let mut options = options.with_env_overrides();
    if args.production {
        options = options.with_production_mode(true);
    }
    if args.bundle_build {
        options = options.with_bundle_build(true);
    }
    Ok(options)
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        match &warning.suggestion {
            Some(suggestion) => tracing::warn!(
                "unknown config key '{}' at {} (did you mean '{}'?)",
                warning.key,
                location,
                suggestion
            ),
            None => tracing::warn!("unknown config key '{}' at {}", warning.key, location),
        }
    }
}

/// Held for the whole run so two runs never touch one project at once
fn acquire_lock(options: &Options) -> Result<File> {
    let build_dir = options.build_directory();
    fs::create_dir_all(&build_dir)
        .with_context(|| format!("failed to create {}", build_dir.display()))?;
    let lock_path = build_dir.join(LOCK_FILE);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("failed to open lock file {}", lock_path.display()))?;
    FileExt::lock_exclusive(&file)
        .with_context(|| format!("failed to lock {}", lock_path.display()))?;
    Ok(file)
}

fn run_pipeline(args: &ProjectArgs, json: bool) -> Result<PipelineReport> {
    let options = load_options(args)?;
    let _lock = acquire_lock(&options)?;

    let services = Services::from_options(&options);
    let sink: Arc<dyn PipelineEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink)
    };
    let mut pipeline = TaskPipeline::new(options, &services).with_event_sink(sink);
    let report = pipeline.execute()?;
    Ok(report)
}

pub fn cmd_run(args: &ProjectArgs, json: bool) -> Result<()> {
    let report = run_pipeline(args, json)?;
    if !json {
        println!(
            "Ran {} tasks ({} skipped): {} files tracked, {} written",
            report.executed.len(),
            report.skipped.len(),
            report.files.len(),
            report.changed.len()
        );
    }
    Ok(())
}

pub fn cmd_files(args: &ProjectArgs, under: Option<&Path>, json: bool) -> Result<()> {
    let report = run_pipeline(args, json)?;
    let files = match under {
        Some(dir) => {
            let root = if dir.is_relative() {
                args.project.join(dir)
            } else {
                dir.to_path_buf()
            };
            report
                .files_under(&root)
                .context("failed to resolve --under directory")?
        }
        None => report.files,
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "files",
                "files": files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>(),
            })
        );
    } else {
        for file in files {
            println!("{}", file.display());
        }
    }
    Ok(())
}
