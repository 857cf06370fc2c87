use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use chrono::Local;
use dialoguer::Input;
use retention_probe::Config;
use retention_probe::core::{Alias, EvidenceCollector, recommend};
use retention_probe::report::{ReportFormat, ReportRenderer, print_summary};
use retention_probe::ui::style;
use std::path::PathBuf;
use tracing::info;

use crate::app::status::render_status;

fn prompt_alias() -> Result<String> {
    let alias: String = Input::new()
        .with_prompt("  Enter user alias")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read alias")?;
    Ok(alias)
}

/// Investigate one alias end to end: collect, reconcile, recommend, report.
async fn run_investigation(
    config: &Config,
    alias: Option<String>,
    format: Option<ReportFormat>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let raw = match alias {
        Some(alias) => alias,
        None => prompt_alias()?,
    };
    // An empty alias stops here, before any backend is contacted.
    let alias = Alias::parse(&raw)?;

    let collector = EvidenceCollector::from_config(config);
    println!(
        "{} {}",
        style::dim("Investigating"),
        style::value(&alias)
    );
    let investigation = collector.collect(&alias).await;
    let recommendation = recommend(&investigation);

    let format = format.unwrap_or(config.report.format);
    let dir = output_dir.unwrap_or_else(|| config.output_dir());
    let renderer = ReportRenderer::new().context("Failed to load report templates")?;
    let path = renderer
        .write(&dir, &investigation, &recommendation, format, &Local::now())
        .with_context(|| format!("Failed to write report to {}", dir.display()))?;

    print_summary(&investigation, &recommendation);
    let unavailable = investigation
        .findings
        .iter()
        .filter(|finding| finding.unavailable_reason().is_some())
        .count();
    if unavailable > 0 {
        println!();
        println!(
            "{}",
            style::yellow(format!(
                "! {unavailable} source(s) could not be queried; see the report for details"
            ))
        );
    }
    println!();
    println!(
        "{} {}",
        style::success("✓ Report written:"),
        style::value(path.display())
    );
    info!(alias = alias.as_str(), verdict = %recommendation.verdict, "investigation complete");
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Investigate {
            alias,
            format,
            output_dir,
        } => run_investigation(&config, alias, format, output_dir).await,
        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}
