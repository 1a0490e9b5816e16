//! Duplicate-channel grouping and visible-limit selection
//!
//! Channels that reduce to the same key (call sign for OTA, cleaned name
//! otherwise) are duplicates of one entity. Within a group, members are
//! ranked by quality then numeric id, and only the first `visible_limit`
//! members are eligible to receive streams — whether or not they
//! individually matched anything.

use std::collections::{HashMap, HashSet};

use crate::models::ChannelGroup;
use crate::quality::QualityRank;

/// One channel's grouping inputs, in input-list order.
#[derive(Debug, Clone)]
pub struct GroupEntry {
    pub key: String,
    pub channel_id: i64,
    pub quality: QualityRank,
}

/// Applies the visible-limit policy over grouped channels.
pub struct PrioritySelector {
    visible_limit: usize,
}

impl PrioritySelector {
    pub fn new(visible_limit: usize) -> Self {
        Self { visible_limit }
    }

    /// Group entries by key and mark the best `visible_limit` members of
    /// each group eligible.
    ///
    /// Groups are emitted in first-appearance order and members are sorted
    /// by (quality rank, channel id) ascending, so output is deterministic
    /// for identical input.
    pub fn select(&self, entries: &[GroupEntry]) -> (Vec<ChannelGroup>, HashSet<i64>) {
        let mut order: Vec<&str> = Vec::new();
        let mut members: HashMap<&str, Vec<(i64, QualityRank)>> = HashMap::new();

        for entry in entries {
            let bucket = members.entry(entry.key.as_str()).or_default();
            if bucket.is_empty() {
                order.push(entry.key.as_str());
            }
            bucket.push((entry.channel_id, entry.quality));
        }

        let mut groups = Vec::with_capacity(order.len());
        let mut eligible = HashSet::new();
        for key in order {
            let mut list = members.remove(key).unwrap_or_default();
            list.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

            for (channel_id, _) in list.iter().take(self.visible_limit) {
                eligible.insert(*channel_id);
            }
            groups.push(ChannelGroup {
                key: key.to_string(),
                channel_ids: list.into_iter().map(|(id, _)| id).collect(),
            });
        }

        (groups, eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, channel_id: i64, quality: QualityRank) -> GroupEntry {
        GroupEntry {
            key: key.to_string(),
            channel_id,
            quality,
        }
    }

    #[test]
    fn test_best_quality_member_is_eligible() {
        let selector = PrioritySelector::new(1);
        let entries = vec![
            entry("WIAT", 10, QualityRank::Hd),
            entry("WIAT", 11, QualityRank::Fhd),
            entry("WIAT", 12, QualityRank::Hd),
        ];
        let (groups, eligible) = selector.select(&entries);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].channel_ids, vec![11, 10, 12]);
        assert_eq!(eligible, HashSet::from([11]));
    }

    #[test]
    fn test_exactly_min_k_n_members_eligible() {
        let selector = PrioritySelector::new(2);
        let entries = vec![
            entry("TBS", 1, QualityRank::Unknown),
            entry("TBS", 2, QualityRank::Unknown),
            entry("TBS", 3, QualityRank::Unknown),
            entry("AMC", 4, QualityRank::Unknown),
        ];
        let (groups, eligible) = selector.select(&entries);

        assert_eq!(groups.len(), 2);
        // min(3, 2) from TBS plus min(1, 2) from AMC
        assert_eq!(eligible, HashSet::from([1, 2, 4]));
    }

    #[test]
    fn test_equal_rank_ties_break_by_channel_id() {
        let selector = PrioritySelector::new(1);
        let entries = vec![
            entry("AMC", 9, QualityRank::Hd),
            entry("AMC", 3, QualityRank::Hd),
        ];
        let (groups, eligible) = selector.select(&entries);
        assert_eq!(groups[0].channel_ids, vec![3, 9]);
        assert_eq!(eligible, HashSet::from([3]));
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let selector = PrioritySelector::new(1);
        let entries = vec![
            entry("ZULU", 1, QualityRank::Hd),
            entry("ALPHA", 2, QualityRank::Hd),
            entry("ZULU", 3, QualityRank::Hd),
        ];
        let (groups, _) = selector.select(&entries);
        assert_eq!(groups[0].key, "ZULU");
        assert_eq!(groups[1].key, "ALPHA");
    }
}
