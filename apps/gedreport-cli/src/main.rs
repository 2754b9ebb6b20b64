//! GEDCOM duplicate report CLI
//!
//! Validates a local GEDCOM file, uploads it to the duplicate-detection
//! service and writes the report as PDF and/or printable HTML.

mod output;
mod transport;

use anyhow::Context;
use clap::Parser;
use gedreport_core::intake::MAX_FILE_SIZE;
use gedreport_core::upload::{submit, UploadFile};
use gedreport_core::{FileHandle, FileSource, IntakeLimits, SubmissionSession, ValidationOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transport::ReqwestTransport;

#[derive(Parser, Debug)]
#[command(name = "gedreport")]
#[command(
    version,
    about = "Check a GEDCOM file for duplicate individuals and export the report"
)]
struct Args {
    /// GEDCOM file to analyse
    file: PathBuf,

    /// Duplicate-detection endpoint
    #[arg(
        long,
        env = "GEDREPORT_ENDPOINT",
        default_value = "http://127.0.0.1:3001/check-duplicates"
    )]
    endpoint: String,

    /// Directory receiving the exported files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the printable HTML view
    #[arg(long)]
    html: bool,

    /// Skip the PDF export
    #[arg(long)]
    no_pdf: bool,

    /// Largest file accepted for upload, in bytes
    #[arg(long, default_value_t = MAX_FILE_SIZE)]
    max_bytes: u64,

    /// JSON file overriding the PDF page geometry
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Require the .ged extension, as the drop zone does
    #[arg(long)]
    strict_extension: bool,

    /// Upload timeout in seconds
    #[arg(long, default_value = "300")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("gedreport v{}", env!("CARGO_PKG_VERSION"));

    let geometry = output::load_geometry(args.geometry.as_deref())?;

    let metadata = std::fs::metadata(&args.file)
        .with_context(|| format!("Cannot access {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let mut session = SubmissionSession::new(IntakeLimits {
        max_bytes: args.max_bytes,
    });
    let source = if args.strict_extension {
        FileSource::Drop
    } else {
        FileSource::Picker
    };

    let outcome = session.select(FileHandle::new(name.clone(), metadata.len()), source)?;
    if let ValidationOutcome::Rejected { message, .. } = outcome {
        eprintln!("{}", message);
        return Ok(ExitCode::from(2));
    }

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let selected = session.begin_submit()?;
    let upload = UploadFile::new(selected.name, bytes);

    tracing::info!(endpoint = %args.endpoint, "{}", gedreport_core::session::IN_PROGRESS_LABEL);
    let transport = ReqwestTransport::new(Duration::from_secs(args.timeout_secs))?;
    let result = submit(&transport, &args.endpoint, &upload).await;
    let failed = result.failure().is_some();
    session.resolve(result)?;

    println!("{}", session.status_text());
    if failed {
        return Ok(ExitCode::FAILURE);
    }

    let Some(report) = session.report() else {
        return Ok(ExitCode::SUCCESS);
    };
    let now = chrono::Local::now().naive_local();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    if !args.no_pdf {
        let path = output::write_pdf(&report, &geometry, &args.out_dir, now)?;
        eprintln!("PDF report: {}", path.display());
    }
    if args.html {
        let path = output::write_html(&report, &args.out_dir, now)?;
        eprintln!("Printable report: {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}
