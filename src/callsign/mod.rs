//! Call-sign extraction for over-the-air (OTA) channels
//!
//! OTA channels are named `NETWORK - STATE City (CALLSIGN)`, optionally
//! followed by quality tags. A name that does not fit the pattern is simply
//! not OTA — a normal outcome, not a failure. Arbitrary stream names get a
//! priority cascade instead, since providers bury call signs anywhere.

use regex::Regex;
use serde::Serialize;

use crate::errors::EngineResult;

/// Words that look like call signs but never are.
pub const CALLSIGN_FALSE_POSITIVES: &[&str] = &["WEST", "EAST", "KIDS", "WOMEN", "WILD", "WORLD"];

/// Parsed components of an OTA channel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtaChannel {
    pub network: String,
    /// Two-letter state code
    pub state: String,
    pub city: String,
    /// Upper-cased, station-type suffix stripped
    pub callsign: String,
}

/// Upper-case a call sign and strip any trailing `-SUFFIX`
/// (`WLNE-TV` becomes `WLNE`).
pub fn strip_suffix(callsign: &str) -> String {
    callsign
        .trim()
        .split('-')
        .next()
        .unwrap_or("")
        .to_uppercase()
}

/// Parses OTA channel names and hunts call signs in stream names.
///
/// All patterns are compiled once at construction.
pub struct CallSignExtractor {
    ota: Regex,
    prefix_digits: Regex,
    prefix_country: Regex,
    paren_plain: Regex,
    paren_suffixed: Regex,
    at_end: Regex,
    any_word: Regex,
}

impl CallSignExtractor {
    pub fn new() -> EngineResult<Self> {
        Ok(Self {
            ota: Regex::new(
                r"^([A-Z]+)\s*-\s*([A-Z]{2})\s+(.+?)\s*\(([A-Z][A-Z0-9-]*)\)\s*(?:\[[^\]]*\]\s*)*$",
            )?,
            prefix_digits: Regex::new(r"^D\d+-")?,
            prefix_country: Regex::new(r"(?i)^USA?\s*[^a-z0-9]*\s*")?,
            paren_plain: Regex::new(r"(?i)\(([KW][A-Z]{2,3})(?:-[A-Z\s]+)?\)")?,
            paren_suffixed: Regex::new(r"(?i)\(([KW][A-Z]{1,4}-(?:TV|CD|LP|DT|LD))\)")?,
            at_end: Regex::new(
                r"(?i)\b([KW][A-Z]{2,4}(?:-(?:TV|CD|LP|DT|LD))?)\s*(?:\.[a-z]+)?\s*$",
            )?,
            any_word: Regex::new(r"(?i)\b([KW][A-Z]{2,4}(?:-(?:TV|CD|LP|DT|LD))?)\b")?,
        })
    }

    /// Parse an OTA channel name, tolerating trailing quality tags.
    /// Returns `None` when the name does not fit the pattern.
    pub fn parse_ota(&self, name: &str) -> Option<OtaChannel> {
        let caps = self.ota.captures(name.trim())?;
        Some(OtaChannel {
            network: caps[1].to_uppercase(),
            state: caps[2].to_uppercase(),
            city: caps[3].trim().to_string(),
            callsign: strip_suffix(&caps[4]),
        })
    }

    pub fn is_ota(&self, name: &str) -> bool {
        self.parse_ota(name).is_some()
    }

    /// Call sign in parenthesized form only, suffix stripped. This is the
    /// high-confidence form used for local-affiliate exclusion.
    pub fn paren_callsign(&self, name: &str) -> Option<String> {
        if let Some(caps) = self.paren_plain.captures(name) {
            let callsign = caps[1].to_uppercase();
            if !CALLSIGN_FALSE_POSITIVES.contains(&callsign.as_str()) {
                return Some(callsign);
            }
        }
        if let Some(caps) = self.paren_suffixed.captures(name) {
            return Some(strip_suffix(&caps[1]));
        }
        None
    }

    /// Find a call sign anywhere in a name, in priority order:
    /// parenthesized, parenthesized with station-type suffix, at the end of
    /// the name, any call-sign-shaped word. Returns the suffix-stripped base.
    pub fn find_callsign(&self, name: &str) -> Option<String> {
        let name = self.prefix_digits.replace(name, "");
        let name = self.prefix_country.replace(&name, "");

        if let Some(callsign) = self.paren_callsign(&name) {
            return Some(callsign);
        }

        for pattern in [&self.at_end, &self.any_word] {
            if let Some(caps) = pattern.captures(&name) {
                let callsign = strip_suffix(&caps[1]);
                if !CALLSIGN_FALSE_POSITIVES.contains(&callsign.as_str()) {
                    return Some(callsign);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> CallSignExtractor {
        CallSignExtractor::new().unwrap()
    }

    #[test]
    fn test_parse_ota_basic() {
        let e = extractor();
        let ota = e.parse_ota("ABC - TN Chattanooga (WTVC)").unwrap();
        assert_eq!(ota.network, "ABC");
        assert_eq!(ota.state, "TN");
        assert_eq!(ota.city, "Chattanooga");
        assert_eq!(ota.callsign, "WTVC");
    }

    #[test]
    fn test_parse_ota_with_trailing_quality_tags() {
        let e = extractor();
        let ota = e.parse_ota("CBS - IN South Bend (WSBT) [HD]").unwrap();
        assert_eq!(ota.network, "CBS");
        assert_eq!(ota.state, "IN");
        assert_eq!(ota.city, "South Bend");
        assert_eq!(ota.callsign, "WSBT");
    }

    #[test]
    fn test_parse_ota_strips_station_suffix() {
        let e = extractor();
        let ota = e.parse_ota("ABC - RI Providence (WLNE-TV)").unwrap();
        assert_eq!(ota.callsign, "WLNE");
    }

    #[test]
    fn test_non_ota_names_are_not_ota() {
        let e = extractor();
        assert!(e.parse_ota("TBS [FHD]").is_none());
        assert!(e.parse_ota("FX Movie Channel").is_none());
        // No parenthesized call sign at the end
        assert!(e.parse_ota("NBC - NY New York").is_none());
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix("WLNE-TV"), "WLNE");
        assert_eq!(strip_suffix("kob"), "KOB");
        assert_eq!(strip_suffix("WSBT"), "WSBT");
    }

    #[test]
    fn test_paren_callsign() {
        let e = extractor();
        assert_eq!(
            e.paren_callsign("US CBS 4 (KOB) Albuquerque"),
            Some("KOB".to_string())
        );
        assert_eq!(
            e.paren_callsign("ABC Providence (WLNE-TV)"),
            Some("WLNE".to_string())
        );
        assert_eq!(e.paren_callsign("Hallmark (WEST)"), None);
        assert_eq!(e.paren_callsign("TBS (HD)"), None);
    }

    #[test]
    fn test_find_callsign_priorities() {
        let e = extractor();
        // Parenthesized beats a call-sign-shaped word elsewhere
        assert_eq!(
            e.find_callsign("KASA Fox 2 (KWBQ)"),
            Some("KWBQ".to_string())
        );
        // Falls back to the end of the name
        assert_eq!(e.find_callsign("News on KOMO-TV"), Some("KOMO".to_string()));
        // Then to any call-sign-shaped word
        assert_eq!(
            e.find_callsign("WXYZ Detroit Local News"),
            Some("WXYZ".to_string())
        );
    }

    #[test]
    fn test_find_callsign_ignores_country_prefix() {
        let e = extractor();
        assert_eq!(e.find_callsign("US: WGN Chicago"), Some("WGN".to_string()));
    }

    #[test]
    fn test_find_callsign_rejects_false_positives() {
        let e = extractor();
        assert_eq!(e.find_callsign("Hallmark Movies WEST"), None);
        assert_eq!(e.find_callsign("Nat Geo WILD"), None);
        assert_eq!(e.find_callsign("BBC WORLD"), None);
    }
}
