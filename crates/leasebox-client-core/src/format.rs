//! Panel copy shared between the quota and upload views.

use crate::api::{QuotaResponse, UploadResponse};

const BYTES_PER_MEBIBYTE: f64 = 1024.0 * 1024.0;

/// Byte count as mebibytes with two decimals, e.g. 2_097_152 -> "2.00".
#[must_use]
pub fn mebibytes_2dp(bytes: u64) -> String {
    let mebibytes = bytes as f64 / BYTES_PER_MEBIBYTE;
    format!("{mebibytes:.2}")
}

/// Byte count as whole mebibytes, used for plan ceilings.
#[must_use]
pub fn mebibytes_whole(bytes: u64) -> String {
    let mebibytes = bytes as f64 / BYTES_PER_MEBIBYTE;
    format!("{mebibytes:.0}")
}

#[must_use]
pub fn session_status_label(signed_in: bool) -> &'static str {
    if signed_in { "Signed in" } else { "Signed out" }
}

/// The two lines the upload panel prints after a successful upload.
#[must_use]
pub fn upload_success_lines(response: &UploadResponse) -> [String; 2] {
    [
        format!(
            "Uploaded: {} \u{2022} {} MB",
            response.filename,
            mebibytes_2dp(response.size_bytes)
        ),
        format!(
            "Month: {} \u{2022} Plan quota: {} MB",
            response.yyyymm, response.quota_mb
        ),
    ]
}

/// The two lines the quota panel prints for the current month.
#[must_use]
pub fn quota_summary_lines(response: &QuotaResponse) -> [String; 2] {
    [
        format!("Plan: {}", response.plan),
        format!(
            "Used: {} MB of {} MB this month ({}).",
            mebibytes_2dp(response.used_bytes),
            mebibytes_whole(response.max_bytes),
            response.yyyymm
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mebibyte_formatting_matches_the_panel_contract() {
        assert_eq!(mebibytes_2dp(2_097_152), "2.00");
        assert_eq!(mebibytes_2dp(1_572_864), "1.50");
        assert_eq!(mebibytes_2dp(0), "0.00");
        assert_eq!(mebibytes_whole(104_857_600), "100");
        assert_eq!(mebibytes_whole(524_288_000), "500");
    }

    #[test]
    fn upload_success_lines_surface_size_month_and_quota() {
        let lines = upload_success_lines(&UploadResponse {
            filename: "a.pdf".to_string(),
            size_bytes: 2_097_152,
            yyyymm: "2024-05".to_string(),
            quota_mb: 500,
        });
        assert_eq!(lines[0], "Uploaded: a.pdf \u{2022} 2.00 MB");
        assert_eq!(lines[1], "Month: 2024-05 \u{2022} Plan quota: 500 MB");
    }

    #[test]
    fn quota_summary_reads_used_of_max_for_the_month() {
        let lines = quota_summary_lines(&QuotaResponse {
            plan: "free".to_string(),
            used_bytes: 1_048_576,
            max_bytes: 104_857_600,
            yyyymm: "2024-05".to_string(),
        });
        assert_eq!(lines[0], "Plan: free");
        assert_eq!(lines[1], "Used: 1.00 MB of 100 MB this month (2024-05).");
    }

    #[test]
    fn status_label_reflects_session_presence() {
        assert_eq!(session_status_label(true), "Signed in");
        assert_eq!(session_status_label(false), "Signed out");
    }
}
