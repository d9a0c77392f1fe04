//! Output formatter trait

use agora_application::{DestroyedDiscussion, DiscussionSummary};
use agora_domain::{OutputFormat, UserId};
use std::collections::BTreeMap;

/// Everything a discussion report shows, borrowed from the replay result
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    /// Surviving discussions keyed by their scenario name
    pub discussions: &'a [(String, DiscussionSummary)],
    pub destroyed: &'a [(String, DestroyedDiscussion)],
    pub user_names: &'a BTreeMap<UserId, String>,
}

impl ReportView<'_> {
    /// Display name for a user, falling back to `#id`
    pub fn name(&self, id: UserId) -> String {
        self.user_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn names(&self, ids: &[UserId]) -> String {
        if ids.is_empty() {
            return "-".to_string();
        }
        ids.iter()
            .map(|id| self.name(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Trait for formatting discussion reports
pub trait OutputFormatter {
    /// Every field of every discussion
    fn format_full(&self, view: &ReportView<'_>) -> String;

    /// One line per discussion
    fn format_brief(&self, view: &ReportView<'_>) -> String;

    /// Format as JSON
    fn format_json(&self, view: &ReportView<'_>) -> String;

    fn format(&self, view: &ReportView<'_>, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(view),
            OutputFormat::Brief => self.format_brief(view),
            OutputFormat::Json => self.format_json(view),
        }
    }
}
