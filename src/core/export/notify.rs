//! Notification composition for finished jobs
//!
//! Admin exports are announced organization-wide to holders of the export's
//! permissions; every other audience notifies the requester alone.

use crate::adapters::notify::{Notification, NotificationTarget};
use crate::core::export::definition::ExportDefinition;
use crate::domain::job::{Audience, ExportJob};

/// Human-readable form of a job name
///
/// Underscores become spaces, the text is lowercased with its first letter
/// capitalised, and the word "report" is removed. With `split_camel`,
/// `CamelCase` words are separated first.
///
/// # Examples
///
/// ```
/// use sheetforge::core::export::notify::pretty_name;
///
/// assert_eq!(pretty_name("DailyAttendanceReport", true), "Daily attendance");
/// assert_eq!(pretty_name("attendance_report", false), "Attendance");
/// ```
pub fn pretty_name(name: &str, split_camel: bool) -> String {
    let spaced = if split_camel {
        split_camel_case(name)
    } else {
        name.to_string()
    };

    let lowered = spaced.replace('_', " ").to_lowercase().replace("report", " ");
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Text announcing a successful export
pub fn success_text(job: &ExportJob) -> String {
    let split_camel = job.identity.audience != Audience::Admin;
    match pretty_name(&job.name, split_camel) {
        pretty if pretty.is_empty() => "Report has been generated.".to_string(),
        pretty => format!("{pretty} report has been generated."),
    }
}

/// Text announcing a failed export
pub fn failure_text(job: &ExportJob) -> String {
    match pretty_name(&job.name, false) {
        pretty if pretty.is_empty() => "Failed to generate report".to_string(),
        pretty => format!("Failed to generate {pretty} report"),
    }
}

/// Frontend link for a job, or empty when no redirect URL is configured
pub fn action_url(redirect_url: Option<&str>, job: &ExportJob) -> String {
    match redirect_url.map(|u| u.trim_end_matches('/')) {
        Some(base) if !base.is_empty() => format!("{base}/?export={}", job.id),
        _ => String::new(),
    }
}

/// Recipient(s) of a job's notification
///
/// An Admin export with no organization falls back to the requester.
pub fn target(job: &ExportJob, definition: &ExportDefinition) -> NotificationTarget {
    match (&job.identity.audience, &job.identity.organization_id) {
        (Audience::Admin, Some(organization_id)) => NotificationTarget::Organization {
            organization_id: organization_id.clone(),
            permissions: definition.notification_permissions.clone(),
        },
        (Audience::Admin, None) => {
            tracing::warn!(
                job_id = %job.id,
                requester_id = %job.identity.requester_id,
                "Admin export has no organization, notifying the requester instead"
            );
            NotificationTarget::User {
                recipient_id: job.identity.requester_id.clone(),
            }
        }
        _ => NotificationTarget::User {
            recipient_id: job.identity.requester_id.clone(),
        },
    }
}

/// Build the notification for a job in a terminal state
pub fn compose(job: &ExportJob, definition: &ExportDefinition, succeeded: bool) -> Notification {
    Notification {
        target: target(job, definition),
        text: if succeeded {
            success_text(job)
        } else {
            failure_text(job)
        },
        action_ref: job.id,
        url: action_url(definition.redirect_url.as_deref(), job),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ExportType, OrganizationId, RequesterId};
    use crate::domain::job::ExportIdentity;
    use crate::domain::table::FieldMapping;
    use test_case::test_case;

    fn job(audience: Audience, organization: Option<&str>) -> ExportJob {
        ExportJob::new(
            ExportIdentity::new(
                ExportType::new("DailyAttendanceReport").unwrap(),
                RequesterId::new("user-7").unwrap(),
                audience,
                organization.map(|o| OrganizationId::new(o).unwrap()),
            ),
            None,
        )
    }

    fn definition() -> ExportDefinition {
        let mut def = ExportDefinition::new(
            ExportType::new("DailyAttendanceReport").unwrap(),
            FieldMapping::from_paths(["timesheet_for"]).unwrap(),
        );
        def.redirect_url = Some("https://app.example.com/attendance/".to_string());
        def.notification_permissions = vec!["attendance.view_report".to_string()];
        def
    }

    #[test_case("DailyAttendanceReport", true, "Daily attendance" ; "camel case split")]
    #[test_case("DailyAttendanceReport", false, "Dailyattendance" ; "camel case kept")]
    #[test_case("overtime_report", false, "Overtime" ; "snake case")]
    #[test_case("Report", true, "" ; "only report")]
    #[test_case("Leave2024Summary", true, "Leave2024 summary" ; "digits")]
    fn test_pretty_name(name: &str, split: bool, expected: &str) {
        assert_eq!(pretty_name(name, split), expected);
    }

    #[test]
    fn test_user_success_text() {
        let job = job(Audience::NormalUser, None);
        assert_eq!(
            success_text(&job),
            "Daily attendance report has been generated."
        );
    }

    #[test]
    fn test_failure_text() {
        let mut job = job(Audience::NormalUser, None);
        job.name = "overtime_report".to_string();
        assert_eq!(failure_text(&job), "Failed to generate Overtime report");
    }

    #[test]
    fn test_admin_targets_organization_with_permissions() {
        let job = job(Audience::Admin, Some("org-1"));
        let notification = compose(&job, &definition(), true);

        assert_eq!(
            notification.target,
            NotificationTarget::Organization {
                organization_id: OrganizationId::new("org-1").unwrap(),
                permissions: vec!["attendance.view_report".to_string()],
            }
        );
        assert_eq!(
            notification.url,
            format!("https://app.example.com/attendance/?export={}", job.id)
        );
    }

    #[test_case(Audience::NormalUser, Some("org-1") ; "normal user")]
    #[test_case(Audience::Supervisor, Some("org-1") ; "supervisor")]
    #[test_case(Audience::Admin, None ; "admin without organization")]
    fn test_single_recipient(audience: Audience, organization: Option<&str>) {
        let job = job(audience, organization);
        assert_eq!(
            target(&job, &definition()),
            NotificationTarget::User {
                recipient_id: RequesterId::new("user-7").unwrap()
            }
        );
    }

    #[test]
    fn test_url_empty_without_redirect() {
        let job = job(Audience::NormalUser, None);
        assert_eq!(action_url(None, &job), "");
        assert_eq!(action_url(Some(""), &job), "");
    }
}
