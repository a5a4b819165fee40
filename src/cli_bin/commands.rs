//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use log::{debug, info};
use mdsite::error::{Result, SiteError};
use mdsite::{
    BuildReport, DryRunStore, FailurePolicy, FileStore, LocalFileStore, Pipeline, PlannedChange,
    SiteConfig,
};
use std::path::Path;

/// Execute the build command
pub fn build_command(args: BuildArgs, config_path: Option<&Path>) -> Result<BuildReport> {
    debug!("Executing build command with args: {:?}", args);

    let config = load_config(config_path, &args.site)?;
    let policy = if args.strict {
        FailurePolicy::Halt
    } else {
        FailurePolicy::Continue
    };

    let store = LocalFileStore::new();
    if args.dry_run {
        let dry_run = DryRunStore::new(&store);
        let report = run_pipeline(&config, &dry_run, policy)?;
        output_dry_run(&dry_run.planned(), &report, args.format)?;
        return Ok(report);
    }

    let report = run_pipeline(&config, &store, policy)?;
    output_report(&report, args.format)?;
    Ok(report)
}

/// Execute the check command
pub fn check_command(args: CheckArgs, config_path: Option<&Path>) -> Result<BuildReport> {
    debug!("Executing check command with args: {:?}", args);

    let config = load_config(config_path, &args.site)?;
    let store = LocalFileStore::new();
    let dry_run = DryRunStore::new(&store);

    let report = run_pipeline(&config, &dry_run, FailurePolicy::Continue)?;
    output_validation_results(&report, args.format)?;
    Ok(report)
}

fn load_config(config_path: Option<&Path>, site: &SiteOptions) -> Result<SiteConfig> {
    let mut config = SiteConfig::load_or_default(config_path)?;

    if let Some(source) = &site.source {
        config.source_dir = source.clone();
    }
    if let Some(output) = &site.output {
        config.output_dir = output.clone();
    }
    if let Some(template) = &site.template {
        config.template_path = template.clone();
    }

    debug!("Using configuration: {:?}", config);
    Ok(config)
}

fn run_pipeline(
    config: &SiteConfig,
    store: &dyn FileStore,
    policy: FailurePolicy,
) -> Result<BuildReport> {
    info!(
        "Building {} -> {}",
        config.source_dir.display(),
        config.output_dir.display()
    );
    Pipeline::new(config, store).with_policy(policy).run()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| SiteError::Io(e.into()))
}

fn output_report(report: &BuildReport, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Human => {
            for outcome in &report.outcomes {
                match (&outcome.output, &outcome.error) {
                    (Some(output), None) => println!("{} -> {}", outcome.source, output.display()),
                    (_, Some(error)) => println!("{}: ✗ ERROR - {}", outcome.source, error),
                    (None, None) => println!("{}", outcome.source),
                }
            }
            println!(
                "{} built, {} failed",
                report.succeeded(),
                report.failed()
            );
        }
        ReportFormat::Json => println!("{}", to_json(report)?),
    }
    Ok(())
}

fn output_dry_run(planned: &[PlannedChange], report: &BuildReport, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Human => {
            output_planned_changes(planned);
            output_report(report, format)?;
        }
        ReportFormat::Json => println!("{}", dry_run_json(planned, report)?),
    }
    Ok(())
}

/// Planned changes and the report as a single JSON document
fn dry_run_json(planned: &[PlannedChange], report: &BuildReport) -> Result<String> {
    to_json(&serde_json::json!({
        "planned": planned,
        "report": report,
    }))
}

fn output_planned_changes(planned: &[PlannedChange]) {
    for change in planned {
        match change {
            PlannedChange::Write { path, bytes } => {
                println!("would write {} ({} bytes)", path.display(), bytes)
            }
            PlannedChange::Copy { source, dest } => {
                println!("would copy {} -> {}", source.display(), dest.display())
            }
        }
    }
}

fn output_validation_results(report: &BuildReport, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Human => {
            for outcome in &report.outcomes {
                match &outcome.error {
                    None => println!("{}: ✓ OK", outcome.source),
                    Some(error) => println!("{}: ✗ ERROR - {}", outcome.source, error),
                }
            }
        }
        ReportFormat::Json => {
            let json_results: Vec<serde_json::Value> = report
                .outcomes
                .iter()
                .map(|outcome| {
                    serde_json::json!({
                        "file": outcome.source,
                        "valid": outcome.is_ok(),
                        "error": outcome.error,
                    })
                })
                .collect();
            println!("{}", to_json(&json_results)?);
        }
    }
    Ok(())
}
