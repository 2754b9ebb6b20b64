//! Writing exported artifacts to disk

use anyhow::Context;
use chrono::NaiveDateTime;
use gedreport_core::{
    export_filename, export_pdf, render_printable, PageGeometry, ReportDocument,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Read page geometry from a JSON file; absent keys keep their defaults
pub fn load_geometry(path: Option<&Path>) -> anyhow::Result<PageGeometry> {
    let Some(path) = path else {
        return Ok(PageGeometry::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read geometry file: {}", path.display()))?;
    let geometry: PageGeometry = serde_json::from_str(&content)
        .with_context(|| format!("Invalid geometry file: {}", path.display()))?;
    geometry.validate()?;
    Ok(geometry)
}

pub fn write_pdf(
    report: &ReportDocument,
    geometry: &PageGeometry,
    out_dir: &Path,
    now: NaiveDateTime,
) -> anyhow::Result<PathBuf> {
    let bytes = export_pdf(report, geometry)?;
    let path = out_dir.join(export_filename(now));
    fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "PDF written");
    Ok(path)
}

/// Printable HTML next to the PDF, same stem
pub fn write_html(
    report: &ReportDocument,
    out_dir: &Path,
    now: NaiveDateTime,
) -> anyhow::Result<PathBuf> {
    let view = render_printable(report, now);
    let path = out_dir.join(export_filename(now)).with_extension("html");
    fs::write(&path, view.html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "printable HTML written");
    Ok(path)
}
