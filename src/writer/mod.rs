use crate::error::LensResult;
use crate::excel::WorkbookModel;
use crate::types::WorkbookSummary;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output format of the summary document, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Json,
    Yaml,
}

impl SummaryFormat {
    /// `.yaml`/`.yml` → YAML, anything else → JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => SummaryFormat::Yaml,
            _ => SummaryFormat::Json,
        }
    }
}

/// Collect the summary document for a loaded workbook
pub fn build_summary(model: &WorkbookModel) -> LensResult<WorkbookSummary> {
    Ok(WorkbookSummary {
        workbook: model.path().display().to_string(),
        sheets: model.all_summaries()?,
    })
}

/// Write `{workbook, sheets}` to `out_path` and return the written path
pub fn export_summary(model: &WorkbookModel, out_path: &Path) -> LensResult<PathBuf> {
    let summary = build_summary(model)?;

    let content = match SummaryFormat::from_path(out_path) {
        SummaryFormat::Json => serde_json::to_string_pretty(&summary)?,
        SummaryFormat::Yaml => serde_yaml::to_string(&summary)?,
    };
    fs::write(out_path, content)?;

    info!(
        "Summary of {} sheets written to {}",
        summary.sheets.len(),
        out_path.display()
    );
    Ok(out_path.to_path_buf())
}
