//! Report rendering: one self-contained document per investigation.

pub mod engine;
pub mod format;
pub mod summary;
pub mod templates;
pub mod view;

pub use engine::TeraEngine;
pub use format::NOT_AVAILABLE;
pub use summary::{print_summary, summary_lines};
pub use view::ReportView;

use crate::core::{Investigation, Recommendation};
use crate::error::ReportError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::Display;
use templates::{HTML_TEMPLATE, HTML_TEMPLATE_NAME, MARKDOWN_TEMPLATE, MARKDOWN_TEMPLATE_NAME};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

/// `RetentionReport_<ALIAS>_<yyyyMMdd_HHmmss>.<ext>`
pub fn report_file_name(
    investigation: &Investigation,
    format: ReportFormat,
    generated_at: &DateTime<Local>,
) -> String {
    format!(
        "RetentionReport_{}_{}.{}",
        investigation.alias.file_safe(),
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    investigation: &'a Investigation,
    recommendation: &'a Recommendation,
}

pub struct ReportRenderer {
    engine: TeraEngine,
}

impl ReportRenderer {
    pub fn new() -> Result<Self, ReportError> {
        let mut engine = TeraEngine::new();
        engine.add_template(HTML_TEMPLATE_NAME, HTML_TEMPLATE)?;
        engine.add_template(MARKDOWN_TEMPLATE_NAME, MARKDOWN_TEMPLATE)?;
        Ok(Self { engine })
    }

    pub fn render(
        &self,
        investigation: &Investigation,
        recommendation: &Recommendation,
        format: ReportFormat,
        generated_at: &DateTime<Local>,
    ) -> Result<String, ReportError> {
        let stamp = generated_at.format("%Y-%m-%d %H:%M:%S %:z").to_string();
        let template = match format {
            ReportFormat::Json => {
                let document = JsonReport {
                    generated_at: generated_at.to_rfc3339(),
                    investigation,
                    recommendation,
                };
                return Ok(serde_json::to_string_pretty(&document)?);
            }
            ReportFormat::Html => HTML_TEMPLATE_NAME,
            ReportFormat::Markdown => MARKDOWN_TEMPLATE_NAME,
        };

        let view = ReportView::build(investigation, recommendation, &stamp);
        let mut context = tera::Context::new();
        context.insert("report", &view);
        self.engine.render(template, &context)
    }

    /// Render and write into `dir`, creating it if needed. Returns the path.
    pub fn write(
        &self,
        dir: &Path,
        investigation: &Investigation,
        recommendation: &Recommendation,
        format: ReportFormat,
        generated_at: &DateTime<Local>,
    ) -> Result<PathBuf, ReportError> {
        let body = self.render(investigation, recommendation, format, generated_at)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(report_file_name(investigation, format, generated_at));
        fs::write(&path, body)?;
        tracing::info!(path = %path.display(), "report written");
        Ok(path)
    }
}
