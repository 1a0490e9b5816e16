//! Station database for OTA resolution
//!
//! Curated regional record sets map call signs to their authoritative
//! network affiliation and community of license. The database is built once
//! per invocation from the enabled regions and is read-only afterwards;
//! rebuild it when the region selection changes.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::callsign::strip_suffix;
use crate::errors::{EngineError, EngineResult};

/// Networks recognized by the affiliation parser's token-extraction pass.
const KNOWN_NETWORKS: &[&str] = &[
    "ABC",
    "CBS",
    "NBC",
    "FOX",
    "CW",
    "PBS",
    "ION",
    "MYNETWORKTV",
    "TELEMUNDO",
    "UNIVISION",
    "UNIMAS",
    "METV",
    "GRIT",
    "COZI",
    "INDEPENDENT",
];

/// One curated station record, as found in a regional data set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(default)]
    pub callsign: String,
    #[serde(default)]
    pub community_served_city: String,
    #[serde(default)]
    pub community_served_state: String,
    #[serde(default)]
    pub network_affiliation: String,
    #[serde(default)]
    pub tv_virtual_channel: Option<String>,
    #[serde(default)]
    pub facility_id: Option<i64>,
}

/// A named regional set of station records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalRecordSet {
    pub region: String,
    pub records: Vec<StationRecord>,
}

impl RegionalRecordSet {
    /// Deserialize a record set from JSON text the caller already read.
    pub fn from_json_str(region: &str, json: &str) -> EngineResult<Self> {
        let records: Vec<StationRecord> = serde_json::from_str(json)
            .map_err(|e| EngineError::station_data(region, e.to_string()))?;
        Ok(Self {
            region: region.to_string(),
            records,
        })
    }
}

/// A station with its derived lookup fields.
#[derive(Debug, Clone)]
pub struct Station {
    /// Normalized call sign (upper-cased, suffix stripped)
    pub callsign: String,
    /// Primary network parsed from the affiliation field
    pub network: String,
    pub city: String,
    pub state: String,
    pub record: StationRecord,
}

/// Indexed, immutable lookup over the enabled regional record sets.
#[derive(Debug, Default)]
pub struct StationDatabase {
    stations: Vec<Station>,
    by_callsign: HashMap<String, usize>,
    by_locale: HashMap<(String, String), Vec<usize>>,
}

impl StationDatabase {
    /// Index the supplied record sets. An empty `enabled_regions` selection
    /// enables every set. Records without a call sign are skipped, not fatal.
    pub fn build(sets: &[RegionalRecordSet], enabled_regions: &HashSet<String>) -> Self {
        let mut db = StationDatabase::default();

        for set in sets {
            if !enabled_regions.is_empty()
                && !enabled_regions
                    .iter()
                    .any(|r| r.eq_ignore_ascii_case(&set.region))
            {
                debug!(region = %set.region, "regional record set not enabled, skipping");
                continue;
            }

            let mut loaded = 0usize;
            let mut skipped = 0usize;
            for record in &set.records {
                let callsign = strip_suffix(&record.callsign);
                if callsign.is_empty() {
                    skipped += 1;
                    continue;
                }

                let index = db.stations.len();
                db.stations.push(Station {
                    callsign: callsign.clone(),
                    network: parse_affiliation(&record.network_affiliation),
                    city: record.community_served_city.trim().to_uppercase(),
                    state: record.community_served_state.trim().to_uppercase(),
                    record: record.clone(),
                });

                // First record wins on duplicate call signs within a region
                db.by_callsign.entry(callsign).or_insert(index);
                let locale = (
                    db.stations[index].state.clone(),
                    db.stations[index].city.clone(),
                );
                db.by_locale.entry(locale).or_default().push(index);
                loaded += 1;
            }

            if skipped > 0 {
                warn!(region = %set.region, skipped, "station records without a callsign skipped");
            }
            info!(region = %set.region, loaded, "station records indexed");
        }

        db
    }

    /// Primary lookup by call sign; the input is normalized first.
    pub fn lookup(&self, callsign: &str) -> Option<&Station> {
        let normalized = strip_suffix(callsign);
        self.by_callsign
            .get(&normalized)
            .map(|&index| &self.stations[index])
    }

    /// Secondary lookup by community of license, used only when the
    /// call-sign lookup misses.
    pub fn lookup_locale(&self, state: &str, city: &str) -> Vec<&Station> {
        let key = (
            state.trim().to_uppercase(),
            city.trim().to_uppercase(),
        );
        self.by_locale
            .get(&key)
            .map(|indices| indices.iter().map(|&i| &self.stations[i]).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Extract the primary network from a raw affiliation field.
///
/// `"CBS (12.1), CW (12.2)"` yields `CBS`;
/// `"WTOV D1 - NBC; WTOV D2 - FOX"` yields `NBC`. After segmentation the
/// first token matching a known network abbreviation wins; failing that, the
/// whole first segment is used as-is.
pub fn parse_affiliation(raw: &str) -> String {
    let mut text = raw;
    if let Some(i) = text.find('(') {
        text = &text[..i];
    }

    let mut segment = text;
    if segment.contains(" - ") {
        for sep in [';', '/'] {
            if let Some(i) = segment.find(sep) {
                segment = &segment[..i];
                break;
            }
        }
        if let Some(i) = segment.rfind(" - ") {
            segment = &segment[i + 3..];
        }
    }

    for sep in [',', ';', '/'] {
        if let Some(i) = segment.find(sep) {
            segment = &segment[..i];
            break;
        }
    }

    let segment = segment.trim().to_uppercase();
    for token in segment.split_whitespace() {
        if KNOWN_NETWORKS.contains(&token) {
            return token.to_string();
        }
    }
    segment
}
