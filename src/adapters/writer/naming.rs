//! Output file naming and sheet title rules

use chrono::{DateTime, TimeZone};
use url::Url;

/// Extension of generated workbooks
pub const XLSX_EXTENSION: &str = "xlsx";

/// Excel's worksheet name length limit
pub const MAX_SHEET_TITLE_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// `{stem}_{YYYYMMDD_HHMMSS}.xlsx`
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sheetforge::adapters::writer::naming::export_file_name;
///
/// let at = Utc.with_ymd_and_hms(2025, 4, 17, 9, 5, 30).unwrap();
/// assert_eq!(export_file_name("attendance_report", &at), "attendance_report_20250417_090530.xlsx");
/// ```
pub fn export_file_name<Tz: TimeZone>(stem: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let stem = sanitize_stem(stem);
    format!("{stem}_{}.{XLSX_EXTENSION}", at.format("%Y%m%d_%H%M%S"))
}

/// Keep file name stems to a safe character set
fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned
    }
}

/// Make a worksheet title Excel will accept
///
/// Strips forbidden characters and truncates to 31 characters; a blank
/// result becomes `"Sheet1"`.
pub fn sanitize_sheet_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !FORBIDDEN_SHEET_CHARS.contains(c))
        .take(MAX_SHEET_TITLE_LEN)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

/// Public URL of a generated file
///
/// Absolute base URLs are joined with [`Url::join`]; relative bases such as
/// `/media` are joined with a single slash.
pub fn file_url(public_base_url: &str, file_name: &str) -> String {
    let base = if public_base_url.ends_with('/') {
        public_base_url.to_string()
    } else {
        format!("{public_base_url}/")
    };

    match Url::parse(&base).and_then(|u| u.join(file_name)) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{base}{file_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use test_case::test_case;

    #[test]
    fn test_file_name_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 11, 3, 23, 59, 1).unwrap();
        assert_eq!(
            export_file_name("report", &at),
            "report_20241103_235901.xlsx"
        );
    }

    #[test_case("attendance report", "attendance_report" ; "spaces")]
    #[test_case("../etc/passwd", "_etc_passwd" ; "path traversal")]
    #[test_case("   ", "export" ; "blank")]
    fn test_stem_sanitized(stem: &str, expected: &str) {
        assert_eq!(sanitize_stem(stem), expected);
    }

    #[test_case("Daily Attendance", "Daily Attendance" ; "plain")]
    #[test_case("Q1/Q2 [draft]?", "Q1Q2 draft" ; "forbidden chars")]
    #[test_case("", "Sheet1" ; "empty")]
    fn test_sheet_title(title: &str, expected: &str) {
        assert_eq!(sanitize_sheet_title(title), expected);
    }

    #[test]
    fn test_sheet_title_truncated() {
        let title = "A".repeat(40);
        assert_eq!(sanitize_sheet_title(&title).len(), MAX_SHEET_TITLE_LEN);
    }

    #[test_case("/media", "/media/a.xlsx" ; "relative")]
    #[test_case("/media/", "/media/a.xlsx" ; "relative trailing slash")]
    #[test_case("https://files.example.com/exports", "https://files.example.com/exports/a.xlsx" ; "absolute")]
    fn test_file_url(base: &str, expected: &str) {
        assert_eq!(file_url(base, "a.xlsx"), expected);
    }
}
