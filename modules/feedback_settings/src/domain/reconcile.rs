//! Channel set reconciliation
//!
//! Diffs a requested channel list against the persisted one by channel
//! identity (contact method + case-insensitive destination) and applies the
//! minimal add/remove delta. Channels whose identity is kept stay untouched,
//! even when the requested `send_feedback` differs.

use crate::contract::{FeedbackChannel, FeedbackSettings};
use chrono::{DateTime, Utc};

fn contains_identity(channels: &[FeedbackChannel], channel: &FeedbackChannel) -> bool {
    channels.iter().any(|c| c.same_channel(channel))
}

/// Requested channels whose identity does not exist in `current`.
///
/// `None` (no change requested) yields nothing.
pub fn added(current: &[FeedbackChannel], requested: Option<&[FeedbackChannel]>) -> Vec<FeedbackChannel> {
    requested
        .unwrap_or_default()
        .iter()
        .filter(|channel| !contains_identity(current, channel))
        .cloned()
        .collect()
}

/// Current channels whose identity does not exist in `requested`.
///
/// `None` (no change requested) yields nothing; an empty request removes all.
pub fn removed(current: &[FeedbackChannel], requested: Option<&[FeedbackChannel]>) -> Vec<FeedbackChannel> {
    let Some(requested) = requested else {
        return Vec::new();
    };
    current
        .iter()
        .filter(|channel| !contains_identity(requested, channel))
        .cloned()
        .collect()
}

/// Applies `current := (current \ removed) ∪ added` to the settings.
///
/// Bumps `modified` to `now` when the resulting channel list differs from the
/// one before the merge; returns whether it did.
pub fn merge(
    settings: &mut FeedbackSettings,
    requested: Option<&[FeedbackChannel]>,
    now: DateTime<Utc>,
) -> bool {
    let Some(requested) = requested else {
        return false;
    };

    let before = settings.channels.clone();
    let to_add = added(&before, Some(requested));
    let to_remove = removed(&before, Some(requested));

    settings.channels.retain(|channel| !to_remove.contains(channel));
    settings.channels.extend(to_add);

    let changed = settings.channels != before;
    if changed {
        settings.modified = Some(now);
    }
    changed
}
