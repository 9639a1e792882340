//! In-memory library filtering and ordering.
//!
//! This reproduces the gallery's reactive filter/sort pass over the fetched
//! list. The two rating orders use different sentinels for unrated items:
//! descending substitutes -1 (unrated sorts below every rated item) while
//! ascending substitutes 999 (unrated sorts above every rated item, i.e.
//! last). The asymmetry is deliberate product behavior and must not be
//! "fixed" into a symmetric rule.

use serde::Deserialize;

use crate::models::video::VideoItem;

/// Sentinel for an absent rating when sorting highest-first.
const UNRATED_DESC: i16 = -1;

/// Sentinel for an absent rating when sorting lowest-first.
const UNRATED_ASC: i16 = 999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Last-modified descending.
    #[default]
    Newest,
    /// Rating descending; unrated last.
    Highest,
    /// Rating ascending; unrated last.
    Lowest,
}

/// Keep items whose rating (absent counts as 0) meets the threshold.
pub fn filter_by_min_rating(items: &mut Vec<VideoItem>, min_rating: i16) {
    items.retain(|item| item.rating.unwrap_or(0) >= min_rating);
}

/// Order items according to `sort`. Stable: equal keys keep fetch order.
pub fn sort_items(items: &mut [VideoItem], sort: SortKey) {
    match sort {
        SortKey::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Highest => {
            items.sort_by_key(|item| std::cmp::Reverse(item.rating.unwrap_or(UNRATED_DESC)))
        }
        SortKey::Lowest => items.sort_by_key(|item| item.rating.unwrap_or(UNRATED_ASC)),
    }
}

/// The full gallery pass: optional threshold filter, then ordering.
pub fn apply(items: &mut Vec<VideoItem>, min_rating: Option<i16>, sort: SortKey) {
    if let Some(threshold) = min_rating {
        filter_by_min_rating(items, threshold);
    }
    sort_items(items, sort);
}
