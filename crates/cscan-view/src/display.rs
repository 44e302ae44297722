//! Display helpers shared by the report and requirement screens.

use cscan_core::ReportStatus;

/// Human label for a report status.
pub fn status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "Pending",
        ReportStatus::Processing => "Processing",
        ReportStatus::Completed => "Completed",
        ReportStatus::Failed => "Failed",
    }
}

/// File size in `B` below 1 KiB, otherwise `KB` or `MB` with two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Percentage rounded half away from zero to a whole number, e.g. `67%`.
pub fn percentage_label(percentage: f64) -> String {
    format!("{}%", percentage.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(20 * 1024 * 1024), "20.00 MB");
    }

    #[test]
    fn labels() {
        assert_eq!(status_label(ReportStatus::Processing), "Processing");
        assert_eq!(percentage_label(66.6), "67%");
        assert_eq!(percentage_label(0.0), "0%");
        assert_eq!(percentage_label(100.0), "100%");
    }

    #[test]
    fn percentage_halves_round_up() {
        assert_eq!(percentage_label(62.5), "63%");
        assert_eq!(percentage_label(12.5), "13%");
        assert_eq!(percentage_label(87.5), "88%");
        assert_eq!(percentage_label(0.5), "1%");
    }
}
