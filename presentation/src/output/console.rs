//! Console output formatter for discussion reports and CI runs

use crate::output::formatter::{OutputFormatter, ReportView};
use agora_application::{CiReport, DiscussionSummary};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

/// Formats reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format_full(view: &ReportView<'_>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Discussion Report"));
        output.push('\n');

        if view.discussions.is_empty() {
            output.push_str(&format!("\n{}\n", "No discussions.".dimmed()));
        }

        for (key, summary) in view.discussions {
            output.push_str(&Self::discussion(view, key, summary));
        }

        if !view.destroyed.is_empty() {
            output.push_str(&Self::section_header("Destroyed"));
            for (key, destroyed) in view.destroyed {
                output.push_str(&format!(
                    "  {} {} motion(s), {} vote(s), {} comment(s), {} reader(s) removed\n",
                    key.red().bold(),
                    destroyed.motions_removed,
                    destroyed.votes_removed,
                    destroyed.comments_removed,
                    destroyed.readers_removed
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// One line per discussion
    pub fn format_brief(view: &ReportView<'_>) -> String {
        let mut output = String::new();
        for (key, summary) in view.discussions {
            let d = &summary.discussion;
            let mut line = format!(
                "{} {} views={} comments={} motions={} followers={} participants={}",
                key.bold(),
                d.title,
                d.total_views,
                d.comments_count,
                d.motions_count,
                summary.followers.len(),
                summary.participants.len()
            );
            if d.is_archived() {
                line.push_str(&format!(" {}", "[archived]".dimmed()));
            }
            output.push_str(&line);
            output.push('\n');
        }
        for (key, _) in view.destroyed {
            output.push_str(&format!("{} {}\n", key.bold(), "[destroyed]".red()));
        }
        output
    }

    /// Format as JSON
    pub fn format_json(view: &ReportView<'_>) -> String {
        let discussions: Vec<_> = view
            .discussions
            .iter()
            .map(|(key, summary)| json!({ "key": key, "summary": summary }))
            .collect();
        let destroyed: Vec<_> = view
            .destroyed
            .iter()
            .map(|(key, destroyed)| json!({ "key": key, "destroyed": destroyed }))
            .collect();
        serde_json::to_string_pretty(&json!({
            "discussions": discussions,
            "destroyed": destroyed,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Summary line per suite after a passing CI run
    pub fn format_ci_report(report: &CiReport) -> String {
        let mut output = String::new();
        for (suite, outcome) in &report.results {
            output.push_str(&format!(
                "  {} {:<12} {:.1}s\n",
                "v".green(),
                suite.name,
                outcome.duration.as_secs_f64()
            ));
        }
        output.push_str(&format!(
            "{} {} suite(s) passed in {:.1}s\n",
            "CI passed:".green().bold(),
            report.results.len(),
            report.total_duration().as_secs_f64()
        ));
        output
    }

    fn discussion(view: &ReportView<'_>, key: &str, summary: &DiscussionSummary) -> String {
        let d = &summary.discussion;
        let mut output = Self::section_header(&format!("{} ({})", d.title, key));

        let privacy = match d.private {
            Some(true) => "private",
            Some(false) => "public",
            None => "unset",
        };
        let group = d
            .group_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&Self::field("Author", &view.name(d.author_id)));
        output.push_str(&Self::field("Group", &group));
        output.push_str(&Self::field("Privacy", privacy));
        output.push_str(&Self::field("Archived", &Self::time(d.archived_at)));
        output.push_str(&Self::field("Views", &d.total_views.to_string()));
        output.push_str(&Self::field(
            "Comments",
            &format!(
                "{} (last: {})",
                d.comments_count,
                Self::time(d.last_comment_at)
            ),
        ));
        output.push_str(&Self::field("Motions", &d.motions_count.to_string()));
        let current = match &summary.current_motion {
            Some(motion) => match motion.closed_at {
                Some(closes) => format!("{} (closes {})", motion.name, Self::time(Some(closes))),
                None => motion.name.clone(),
            },
            None => "-".to_string(),
        };
        output.push_str(&Self::field("Current motion", &current));
        output.push_str(&Self::field("Followers", &view.names(&summary.followers)));
        output.push_str(&Self::field(
            "Participants",
            &view.names(&summary.participants),
        ));
        output.push_str(&Self::field(
            "Versions",
            &format!(
                "{} (last: {})",
                summary.version_count,
                Self::time(Some(summary.last_versioned_at))
            ),
        ));
        output
    }

    fn field(label: &str, value: &str) -> String {
        format!("  {:<16}{}\n", format!("{}:", label).cyan(), value)
    }

    fn time(at: Option<DateTime<Utc>>) -> String {
        at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, view: &ReportView<'_>) -> String {
        Self::format_full(view)
    }

    fn format_brief(&self, view: &ReportView<'_>) -> String {
        Self::format_brief(view)
    }

    fn format_json(&self, view: &ReportView<'_>) -> String {
        Self::format_json(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_application::DestroyedDiscussion;
    use agora_domain::{DiscussionId, GroupId, NewDiscussion, OutputFormat, UserId};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn summary() -> DiscussionSummary {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut discussion = NewDiscussion::new(UserId::new(1), "Budget")
            .in_group(GroupId::new(2))
            .build(DiscussionId::new(3), None, now);
        discussion.total_views = 4;
        DiscussionSummary {
            discussion,
            followers: vec![UserId::new(1)],
            participants: vec![UserId::new(1), UserId::new(9)],
            current_motion: None,
            last_versioned_at: now,
            version_count: 0,
        }
    }

    fn names() -> BTreeMap<UserId, String> {
        BTreeMap::from([(UserId::new(1), "Ada".to_string())])
    }

    #[test]
    fn test_brief_is_one_line_per_discussion() {
        colored::control::set_override(false);
        let discussions = vec![("budget".to_string(), summary())];
        let names = names();
        let view = ReportView {
            discussions: &discussions,
            destroyed: &[],
            user_names: &names,
        };

        let out = ConsoleFormatter.format(&view, OutputFormat::Brief);
        assert_eq!(
            out,
            "budget Budget views=4 comments=0 motions=0 followers=1 participants=2\n"
        );
    }

    #[test]
    fn test_full_resolves_names() {
        colored::control::set_override(false);
        let discussions = vec![("budget".to_string(), summary())];
        let names = names();
        let view = ReportView {
            discussions: &discussions,
            destroyed: &[],
            user_names: &names,
        };

        let out = ConsoleFormatter::format_full(&view);
        assert!(out.contains("Budget (budget)"));
        assert!(out.contains("Participants:   Ada, #9"));
        assert!(out.contains("Privacy:        unset"));
    }

    #[test]
    fn test_json_lists_destroyed() {
        let destroyed = vec![(
            "old".to_string(),
            DestroyedDiscussion {
                discussion_id: DiscussionId::new(5),
                motions_removed: 1,
                votes_removed: 2,
                comments_removed: 0,
                readers_removed: 0,
            },
        )];
        let names = BTreeMap::new();
        let view = ReportView {
            discussions: &[],
            destroyed: &destroyed,
            user_names: &names,
        };

        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&view)).unwrap();
        assert_eq!(value["destroyed"][0]["key"], "old");
        assert_eq!(value["destroyed"][0]["destroyed"]["votes_removed"], 2);
        assert!(value["discussions"].as_array().unwrap().is_empty());
    }
}
