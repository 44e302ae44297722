//! # Reports Subcommand
//!
//! - `list`: List uploaded reports, newest first.
//! - `show`: Show one report and, once completed, its compliance results.
//! - `upload`: Validate and upload a PDF.
//! - `download`: Save the stored PDF.
//! - `delete`: Delete a report.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use cscan_client::{ApiClient, ComplianceBackend, ReportQuery};
use cscan_core::{check_upload_size, FieldErrors, Report, ReportId, ReportStatus, UploadForm};
use cscan_view::{submit_upload, ReportTracker, ReportView, ViewError, ViewScope};

use crate::output;
use crate::view_error;

/// Arguments for the `cscan reports` subcommand.
#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

/// Report subcommands.
#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// List uploaded reports, newest first.
    List {
        /// Only reports in this status (pending, processing, completed, failed).
        #[arg(long)]
        status: Option<ReportStatus>,
        /// Number of reports to skip.
        #[arg(long)]
        skip: Option<u32>,
        /// Maximum number of reports to return.
        #[arg(long)]
        limit: Option<u32>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show a report and its compliance results.
    Show {
        /// Report identifier.
        id: ReportId,
        /// Keep polling until processing completes or fails.
        #[arg(long)]
        watch: bool,
        /// Seconds between polls with --watch.
        #[arg(long, default_value_t = 3)]
        interval_secs: u64,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Upload a PDF report (max 20MB).
    Upload {
        /// Path to the PDF file.
        file: PathBuf,
        /// Company the report belongs to.
        #[arg(long)]
        company_name: Option<String>,
        /// Four-digit fiscal year.
        #[arg(long)]
        fiscal_year: Option<String>,
        /// Follow processing after upload.
        #[arg(long)]
        watch: bool,
    },

    /// Download the stored PDF.
    Download {
        /// Report identifier.
        id: ReportId,
        /// Output path. Defaults to the report's original file name.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a report and its compliance results.
    Delete {
        /// Report identifier.
        id: ReportId,
    },
}

/// Execute the reports subcommand.
pub async fn run_reports(args: &ReportsArgs, client: Arc<ApiClient>) -> Result<u8> {
    let scope = ViewScope::new();
    crate::close_on_interrupt(&scope);

    match &args.command {
        ReportsCommand::List {
            status,
            skip,
            limit,
            json,
        } => {
            let query = ReportQuery {
                status: *status,
                skip: *skip,
                limit: *limit,
            };
            cmd_list(&client, &scope, &query, *json).await
        }
        ReportsCommand::Show {
            id,
            watch,
            interval_secs,
            json,
        } => {
            let tracker = ReportTracker::new(client, scope, *id)
                .with_poll_interval(Duration::from_secs(*interval_secs));
            cmd_show(tracker, *watch, *json).await
        }
        ReportsCommand::Upload {
            file,
            company_name,
            fiscal_year,
            watch,
        } => {
            let report = cmd_upload(&client, &scope, file, company_name, fiscal_year).await?;
            match report {
                Some(report) if *watch => {
                    let tracker = ReportTracker::new(client, scope, report.id);
                    cmd_show(tracker, true, false).await
                }
                _ => Ok(0),
            }
        }
        ReportsCommand::Download { id, output } => {
            cmd_download(&client, &scope, *id, output.as_deref()).await
        }
        ReportsCommand::Delete { id } => cmd_delete(&client, &scope, *id).await,
    }
}

async fn cmd_list(
    client: &ApiClient,
    scope: &ViewScope,
    query: &ReportQuery,
    json: bool,
) -> Result<u8> {
    let Some(result) = scope.run(client.list_reports(query)).await else {
        return Ok(0);
    };
    let reports = result.map_err(|e| view_error(e.into()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if reports.is_empty() {
        println!("No reports uploaded yet.");
    } else {
        for report in &reports {
            println!("{}", output::report_line(report));
        }
    }
    Ok(0)
}

async fn cmd_show(mut tracker: ReportTracker<ApiClient>, watch: bool, json: bool) -> Result<u8> {
    let view = if watch {
        tracker
            .watch(|view| {
                if !view.status().is_terminal() {
                    println!("Report {}: {}", view.report().id, view.status());
                }
            })
            .await
    } else {
        tracker.load().await
    };

    let Some(view) = view.map_err(view_error)? else {
        return Ok(0);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view_json(&view))?);
    } else {
        print!("{}", output::report_detail(&view));
    }

    // A failed report is a normal outcome, but the command did not produce
    // results.
    match view.outcome() {
        Ok(_) => Ok(0),
        Err(e) => {
            tracing::warn!("{}", e.user_message());
            Ok(crate::EXIT_FAILURE)
        }
    }
}

fn view_json(view: &ReportView) -> serde_json::Value {
    serde_json::json!({
        "report": view.report(),
        "summary": view.summary(),
    })
}

async fn cmd_upload(
    client: &ApiClient,
    scope: &ViewScope,
    file: &Path,
    company_name: &Option<String>,
    fiscal_year: &Option<String>,
) -> Result<Option<Report>> {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("upload path has no file name")?;

    // Reject oversized or non-PDF files before reading them.
    let size = std::fs::metadata(file)
        .with_context(|| format!("cannot read {}", file.display()))?
        .len();
    check_upload_size(&file_name, size)
        .map_err(|e| view_error(ViewError::Validation(FieldErrors::from(e))))?;

    let contents =
        std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let mut form = UploadForm::new(file_name, contents);
    form.company_name = company_name.clone();
    form.fiscal_year = fiscal_year.clone();

    let report = submit_upload(client, scope, form).await.map_err(view_error)?;
    if let Some(report) = &report {
        println!("Uploaded report {} ({})", report.id, report.file_name);
    }
    Ok(report)
}

async fn cmd_download(
    client: &ApiClient,
    scope: &ViewScope,
    id: ReportId,
    output: Option<&Path>,
) -> Result<u8> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(result) = scope.run(client.get_report(id)).await else {
                return Ok(0);
            };
            let report = result.map_err(|e| view_error(e.into()))?;
            default_download_path(&report)
        }
    };

    let Some(result) = scope.run(client.download_report(id)).await else {
        return Ok(0);
    };
    let bytes = result.map_err(|e| view_error(e.into()))?;
    std::fs::write(&path, &bytes).with_context(|| format!("cannot write {}", path.display()))?;
    println!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(0)
}

/// The report's original file name, stripped of any directory part.
fn default_download_path(report: &Report) -> PathBuf {
    Path::new(&report.file_name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("report-{}.pdf", report.id)))
}

async fn cmd_delete(client: &ApiClient, scope: &ViewScope, id: ReportId) -> Result<u8> {
    let Some(result) = scope.run(client.delete_report(id)).await else {
        return Ok(0);
    };
    result.map_err(|e| view_error(e.into()))?;
    println!("Deleted report {id}");
    Ok(0)
}
