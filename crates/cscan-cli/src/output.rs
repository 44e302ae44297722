//! Plain-text rendering of reports, summaries, and requirements.

use std::fmt::Write;

use cscan_core::{Report, Requirement, Verdict};
use cscan_view::display::{format_file_size, percentage_label, status_label};
use cscan_view::{CompliancePanel, ReportView};

/// One line per report: id, status, size, upload time, file name.
pub fn report_line(report: &Report) -> String {
    let mut line = format!(
        "{:>6}  {:<10}  {:>10}  {}  {}",
        report.id,
        status_label(report.status),
        format_file_size(report.file_size),
        report.upload_date.to_display_string(),
        report.file_name,
    );
    if let Some(company) = &report.company_name {
        let _ = write!(line, "  [{company}");
        if let Some(year) = report.fiscal_year {
            let _ = write!(line, " FY{year}");
        }
        line.push(']');
    }
    line
}

/// Multi-line detail for one report view.
pub fn report_detail(view: &ReportView) -> String {
    let report = view.report();
    let mut out = String::new();
    let _ = writeln!(out, "Report {}: {}", report.id, report.file_name);
    let _ = writeln!(out, "  Status:    {}", status_label(report.status));
    let _ = writeln!(out, "  Size:      {}", format_file_size(report.file_size));
    let _ = writeln!(out, "  Uploaded:  {}", report.upload_date.to_display_string());
    if let Some(company) = &report.company_name {
        let _ = writeln!(out, "  Company:   {company}");
    }
    if let Some(year) = report.fiscal_year {
        let _ = writeln!(out, "  Fiscal yr: {year}");
    }
    match view {
        ReportView::Pending(_) | ReportView::Processing(_) => {
            out.push_str("\nCompliance results will be available once processing completes.\n");
        }
        ReportView::Failed(_) => {
            out.push_str("\nProcessing failed. Upload the file again to retry.\n");
        }
        ReportView::Completed { .. } => {
            if let Some(panel) = view.panel() {
                out.push('\n');
                out.push_str(&panel_text(&panel));
            }
        }
    }
    out
}

/// Compliance panel: overall score, counts, and one line per result.
pub fn panel_text(panel: &CompliancePanel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Overall compliance: {} ({})",
        percentage_label(panel.percentage),
        panel.band
    );
    let _ = writeln!(
        out,
        "  {} requirements: {} compliant, {} non-compliant, {} pending",
        panel.total, panel.compliant, panel.non_compliant, panel.pending
    );
    for row in &panel.rows {
        let marker = match row.verdict {
            Verdict::Compliant => "+",
            Verdict::NonCompliant => "x",
            Verdict::Pending => "?",
        };
        let _ = write!(out, "  {marker} {:<14} {}", row.verdict.label(), row.name);
        if let Some(category) = &row.category {
            let _ = write!(out, " ({category})");
        }
        if let Some(confidence) = row.confidence_percent {
            let _ = write!(out, "  confidence {confidence}%");
        }
        out.push('\n');
        if let Some(evidence) = &row.evidence {
            let _ = writeln!(out, "      \"{evidence}\"");
        }
    }
    out
}

/// One line per requirement.
pub fn requirement_line(requirement: &Requirement) -> String {
    format!(
        "{:>6}  {:<8}  {:<16}  {}",
        requirement.id,
        if requirement.active { "active" } else { "inactive" },
        requirement.category.as_deref().unwrap_or("-"),
        requirement.name,
    )
}
