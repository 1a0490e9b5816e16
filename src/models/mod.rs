//! Plain-data records exchanged with the host platform
//!
//! All records are immutable snapshots built fresh per matching pass. The
//! engine never mutates caller data and nothing here persists beyond a single
//! invocation — callers own persistence and applying results.

use serde::{Deserialize, Serialize};
use strum::Display;

/// A channel to find streams for, as supplied by the host platform
/// (already filtered by profile and group).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: i64,
    pub name: String,
    /// Display number carried through to results for reporters
    #[serde(default)]
    pub channel_number: Option<f64>,
    /// Opaque host-platform group membership
    #[serde(default)]
    pub group_id: Option<i64>,
}

/// A candidate stream, as supplied by the host platform
/// (already paginated/aggregated across sources).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    pub id: i64,
    pub name: String,
    /// Provider/source identifier
    #[serde(default)]
    pub m3u_account: Option<i64>,
    /// Health flag: dead streams are never assigned to channels. A `[Dead]`
    /// marker in the stream name has the same effect.
    #[serde(default)]
    pub is_dead: bool,
}

/// How a channel's streams were resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MatchMethod {
    /// Whole-word name match between cleaned channel and stream names
    Exact,
    /// Token-order-insensitive similarity at or above the threshold
    FuzzyScored,
    /// OTA channel matched on its own extracted call sign
    OtaDirect,
    /// OTA channel matched through the station database locale fallback
    OtaDatabase,
    /// No qualifying streams — a normal, reportable outcome
    NoMatch,
}

/// Outcome of matching a single channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub channel_id: i64,
    pub channel_name: String,
    pub channel_number: Option<f64>,
    /// Matched stream ids, best quality first
    pub stream_ids: Vec<i64>,
    /// Stream names parallel to `stream_ids`, for reporters
    pub stream_names: Vec<String>,
    pub method: MatchMethod,
    /// Human-readable explanation of the method and score/call sign used
    pub reason: String,
    /// Whether this channel is within its group's visible limit
    pub eligible: bool,
}

/// Duplicate channels sharing a group key, ordered best first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelGroup {
    /// Call sign for OTA channels, upper-cased cleaned name otherwise
    pub key: String,
    /// Member channel ids by priority: quality rank ascending, then numeric
    /// channel id ascending
    pub channel_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_method_display() {
        assert_eq!(MatchMethod::Exact.to_string(), "exact");
        assert_eq!(MatchMethod::FuzzyScored.to_string(), "fuzzy-scored");
        assert_eq!(MatchMethod::OtaDirect.to_string(), "ota-direct");
        assert_eq!(MatchMethod::OtaDatabase.to_string(), "ota-database");
        assert_eq!(MatchMethod::NoMatch.to_string(), "no-match");
    }

    #[test]
    fn test_stream_record_health_flag_defaults_to_alive() {
        let stream: StreamRecord =
            serde_json::from_str(r#"{"id": 7, "name": "TBS [HD]"}"#).unwrap();
        assert!(!stream.is_dead);
        assert_eq!(stream.m3u_account, None);
    }
}
