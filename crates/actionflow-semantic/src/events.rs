//! Webhook events a workflow can be triggered on.

use once_cell::sync::Lazy;
use regex::Regex;

pub const WEBHOOK_EVENTS: &[&str] = &[
    "check_run",
    "check_suite",
    "commit_comment",
    "create",
    "delete",
    "deployment",
    "deployment_status",
    "fork",
    "github_app_authorization",
    "gollum",
    "installation",
    "installation_repositories",
    "issue_comment",
    "issues",
    "label",
    "marketplace_purchase",
    "member",
    "membership",
    "milestone",
    "organization",
    "org_block",
    "page_build",
    "project_card",
    "project_column",
    "project",
    "public",
    "pull_request",
    "pull_request_review",
    "pull_request_review_comment",
    "push",
    "release",
    "repository",
    "repository_import",
    "repository_vulnerability_alert",
    "security_advisory",
    "status",
    "team",
    "team_add",
    "watch",
    "ping",
];

static SCHEDULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^schedule\(.+\)$").expect("Valid regex pattern for schedule"));

/// `true` for a webhook event name or a `schedule(...)` expression.
pub fn is_known_event(value: &str) -> bool {
    WEBHOOK_EVENTS.contains(&value) || SCHEDULE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_events() {
        assert!(is_known_event("push"));
        assert!(is_known_event("pull_request_review_comment"));
        assert!(!is_known_event("Push"));
        assert!(!is_known_event("pushed"));
    }

    #[test]
    fn test_schedule() {
        assert!(is_known_event("schedule(*/15 * * * *)"));
        assert!(!is_known_event("schedule()"));
        assert!(!is_known_event("schedule(x) "));
    }

    #[test]
    fn test_schedule_pattern_compiles() {
        assert_eq!(Lazy::force(&SCHEDULE).as_str(), r"^schedule\(.+\)$");
    }
}
