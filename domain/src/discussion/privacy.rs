//! Privacy inheritance from the owning group and the matching validation rule.
//!
//! `private` is tri-state: `Some(true)`, `Some(false)` or unset (`None`). An
//! unset value counts as public when the group's setting is checked.

use crate::core::validation::ValidationErrors;
use crate::group::{Group, PrivacyOptions};

/// Privacy of a new discussion after applying its group's setting.
///
/// `private_only` and `public_only` force the value; `public_or_private` and
/// the absence of a group leave the given value untouched.
pub fn inherit_privacy(private: Option<bool>, group: Option<&Group>) -> Option<bool> {
    match group.and_then(|g| g.discussion_privacy_options.forced_privacy()) {
        Some(forced) => Some(forced),
        None => private,
    }
}

/// Whether `options` allows a discussion with the given privacy.
pub fn is_permitted(options: PrivacyOptions, private: Option<bool>) -> bool {
    let is_private = private.unwrap_or(false);
    match options {
        PrivacyOptions::PrivateOnly => is_private,
        PrivacyOptions::PublicOnly => !is_private,
        PrivacyOptions::PublicOrPrivate => true,
    }
}

/// Adds exactly one error on `private` when the group forbids the value.
pub fn privacy_is_permitted_by_group(
    private: Option<bool>,
    group: Option<&Group>,
    errors: &mut ValidationErrors,
) {
    let Some(group) = group else {
        return;
    };
    let options = group.discussion_privacy_options;
    if is_permitted(options, private) {
        return;
    }
    let message = match options {
        PrivacyOptions::PrivateOnly => "must be private in this group",
        PrivacyOptions::PublicOnly => "must be public in this group",
        PrivacyOptions::PublicOrPrivate => return,
    };
    errors.add("private", message);
}
