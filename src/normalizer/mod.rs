//! Tag normalization for channel and stream names
//!
//! Raw names arrive encrusted with quality tags, feed markers, country
//! prefixes and embedded call signs. The normalizer strips the recognized
//! noise into a cleaned name suitable for matching and extracts the useful
//! metadata (quality rank, region marker) before it goes. Unrecognized tags
//! are left untouched — stripping fails open, never errors.

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::errors::EngineResult;
use crate::quality::{QualityClassifier, QualityRank};

/// Regional feed marker found in a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    East,
    West,
    Pacific,
}

impl Region {
    pub fn parse(token: &str) -> Option<Region> {
        match token.trim().to_uppercase().as_str() {
            "EAST" => Some(Region::East),
            "WEST" => Some(Region::West),
            "PACIFIC" | "PST" => Some(Region::Pacific),
            _ => None,
        }
    }

    /// Western feeds are excluded by default unless the channel itself
    /// carries a western marker.
    pub fn is_western(self) -> bool {
        matches!(self, Region::West | Region::Pacific)
    }
}

/// A name after normalization, with the metadata extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedName {
    pub cleaned: String,
    pub quality: QualityRank,
    pub region: Option<Region>,
}

/// Tags preserved from a raw name, for rebuilding display names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedTags {
    pub region: Option<Region>,
    /// Parenthesized tags that are not regions, call signs or ignored
    pub extra: Vec<String>,
    /// Bracketed tags, quality markers included
    pub quality: Vec<String>,
}

/// Built-in strip patterns, applied in order. Every removal substitutes a
/// single space so adjacent words never merge; whitespace is collapsed at
/// the end.
const STRIP_PATTERNS: &[&str] = &[
    // leading parenthetical prefixes like (SP2) or (D1)
    r"^\s*\([^)]*\)\s*",
    r"(?i)\[(?:4K|UHD|FHD|HD|SD|Unknown|Unk|Slow|Dead)\]",
    // single-letter feed markers (H), (F), (D)
    r"(?i)\([A-Z]\)",
    r"(?i)\s\((?:CX|SD|HD|FD|Backup)\)",
    r"(?i)\((?:East|West|Pacific|PST)\)",
    r"(?i)\sEast\b",
    r"(?i)\s(?:SD|HD|FD)\s",
    r"(?i)\s(?:SD|HD|FD)\s*$",
    r"(?i)\b(?:SD|HD|FD|FHD):?\s",
    // country prefixes
    r"(?i)\bUSA?:\s",
    r"(?i)\bUS\s",
    // embedded call signs
    r"(?i)\([KW][A-Z]{2,3}(?:-(?:TV|CD|LP|DT|LD))?\)",
    // other upper-case parenthesized tags
    r"\([A-Z0-9]{2,}\)",
    r"(?i)^\s*The\s+",
    r"(?i)\s+Network\s*$",
    r"(?i)\s+Channel\s*$",
    r"(?i)\s+TV\s*$",
];

/// Strips recognized tags from names and extracts their metadata.
///
/// All patterns, including the user-configured ignore tags, are compiled once
/// at construction; the normalizer is immutable afterwards.
pub struct TagNormalizer {
    strip_patterns: Vec<Regex>,
    user_tag_patterns: Vec<Regex>,
    paren_tag: Regex,
    bracket_tag: Regex,
    region_paren: Regex,
    region_word: Regex,
    callsign_tag: Regex,
    dead_marker: Regex,
    whitespace: Regex,
    quality: QualityClassifier,
    ignore_tags: Vec<String>,
}

impl TagNormalizer {
    pub fn new(ignore_tags: &[String]) -> EngineResult<Self> {
        let mut strip_patterns = Vec::with_capacity(STRIP_PATTERNS.len());
        for pattern in STRIP_PATTERNS {
            strip_patterns.push(Regex::new(pattern)?);
        }

        let mut user_tag_patterns = Vec::new();
        for tag in ignore_tags {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                continue;
            }
            let escaped = regex::escape(trimmed);
            // Tags carrying their own enclosure are removed as an exact unit;
            // bare tags only as whole words.
            let pattern = if trimmed.contains(&['[', ']', '(', ')'][..]) {
                format!(r"(?i)\s*{escaped}\s*")
            } else {
                format!(r"(?i)\b{escaped}\b")
            };
            user_tag_patterns.push(Regex::new(&pattern)?);
        }

        Ok(Self {
            strip_patterns,
            user_tag_patterns,
            paren_tag: Regex::new(r"\(([^)]+)\)")?,
            bracket_tag: Regex::new(r"\[([^\]]+)\]")?,
            region_paren: Regex::new(r"(?i)\((East|West|Pacific|PST)\)")?,
            region_word: Regex::new(r"(?i)\b(East|West|Pacific|PST)\b")?,
            callsign_tag: Regex::new(r"^[KW][A-Z]{2,3}(?:-(?:TV|CD|LP|DT|LD))?$")?,
            dead_marker: Regex::new(r"(?i)\[dead\]")?,
            whitespace: Regex::new(r"\s+")?,
            quality: QualityClassifier::new()?,
            ignore_tags: ignore_tags.to_vec(),
        })
    }

    /// Cleaned name with all recognized and user-configured tags removed.
    pub fn clean(&self, raw: &str) -> String {
        let mut name = raw.to_string();
        for pattern in &self.strip_patterns {
            name = pattern.replace_all(&name, " ").to_string();
        }
        for pattern in &self.user_tag_patterns {
            name = pattern.replace_all(&name, " ").to_string();
        }
        self.whitespace.replace_all(name.trim(), " ").to_string()
    }

    /// Clean a raw name and extract its quality rank and region marker.
    ///
    /// Quality and region are read from the raw name before stripping, so
    /// the metadata survives its own removal.
    pub fn normalize(&self, raw: &str) -> NormalizedName {
        NormalizedName {
            cleaned: self.clean(raw),
            quality: self.quality.classify_name(raw),
            region: self.extract_region(raw),
        }
    }

    /// First region marker in the name: a parenthesized `(East)`/`(West)`
    /// wins, otherwise the last bare region word.
    pub fn extract_region(&self, raw: &str) -> Option<Region> {
        if let Some(caps) = self.region_paren.captures(raw) {
            return Region::parse(&caps[1]);
        }
        self.region_word
            .find_iter(raw)
            .last()
            .and_then(|m| Region::parse(m.as_str()))
    }

    /// Preserve the tags a caller may want to rebuild a display name from.
    pub fn extract_tags(&self, raw: &str) -> ExtractedTags {
        let starts_with_prefix = raw.trim_start().starts_with('(');

        let mut extra = Vec::new();
        for (idx, caps) in self.paren_tag.captures_iter(raw).enumerate() {
            let tag = &caps[1];
            if idx == 0 && starts_with_prefix {
                continue;
            }
            if self.is_ignored_tag(tag) {
                continue;
            }
            let upper = tag.to_uppercase();
            if Region::parse(&upper).is_some() {
                continue;
            }
            if self.callsign_tag.is_match(&upper) {
                continue;
            }
            extra.push(format!("({tag})"));
        }

        let mut quality = Vec::new();
        for caps in self.bracket_tag.captures_iter(raw) {
            let tag = &caps[1];
            if self.is_ignored_tag(tag) {
                continue;
            }
            quality.push(format!("[{tag}]"));
        }

        ExtractedTags {
            region: self.extract_region(raw),
            extra,
            quality,
        }
    }

    /// Whether the name carries a dead-stream marker.
    pub fn is_marked_dead(&self, raw: &str) -> bool {
        self.dead_marker.is_match(raw)
    }

    fn is_ignored_tag(&self, tag: &str) -> bool {
        let bracketed = format!("[{tag}]");
        let parenthesized = format!("({tag})");
        self.ignore_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&bracketed) || t.eq_ignore_ascii_case(&parenthesized))
    }
}

/// Reassemble a display name from its parts:
/// `base region (extra…) [quality…]`.
pub fn rebuild_name(base: &str, tags: &ExtractedTags) -> String {
    let mut parts = vec![base.to_string()];
    if let Some(region) = tags.region {
        parts.push(region.to_string());
    }
    parts.extend(tags.extra.iter().cloned());
    parts.extend(tags.quality.iter().cloned());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TagNormalizer {
        TagNormalizer::new(&[]).unwrap()
    }

    #[test]
    fn test_quality_tags_are_stripped() {
        let n = normalizer();
        assert_eq!(n.clean("TBS [FHD]"), "TBS");
        assert_eq!(n.clean("WIAT [Slow][HD]"), "WIAT");
        assert_eq!(n.clean("AMC (HD)"), "AMC");
    }

    #[test]
    fn test_country_prefixes_are_stripped() {
        let n = normalizer();
        assert_eq!(n.clean("USA: TBS"), "TBS");
        assert_eq!(n.clean("US: TBS"), "TBS");
        assert_eq!(n.clean("US TBS"), "TBS");
    }

    #[test]
    fn test_leading_parenthetical_prefix_is_stripped() {
        let n = normalizer();
        assert_eq!(n.clean("(SP2) Discovery (HD)"), "Discovery");
        assert_eq!(n.clean("(D1) CBS"), "CBS");
    }

    #[test]
    fn test_embedded_callsigns_are_stripped() {
        let n = normalizer();
        assert_eq!(n.clean("CBS 22 (WSBT) South Bend"), "CBS 22 South Bend");
        assert_eq!(n.clean("ABC (WLNE-TV) Providence"), "ABC Providence");
    }

    #[test]
    fn test_common_name_affixes_are_stripped() {
        let n = normalizer();
        assert_eq!(n.clean("The Weather Channel"), "Weather");
        assert_eq!(n.clean("Paramount Network"), "Paramount");
    }

    #[test]
    fn test_removal_never_merges_words() {
        let n = normalizer();
        assert_eq!(n.clean("ESPN [HD] Deportes"), "ESPN Deportes");
        assert_eq!(n.clean("A HD B"), "A B");
    }

    #[test]
    fn test_unknown_tags_are_left_untouched() {
        let n = normalizer();
        assert_eq!(n.clean("AMC [Whatever]"), "AMC [Whatever]");
    }

    #[test]
    fn test_user_ignore_tags() {
        let n = TagNormalizer::new(&["VIP".to_string(), "(Multi)".to_string()]).unwrap();
        assert_eq!(n.clean("VIP TBS"), "TBS");
        assert_eq!(n.clean("TBS (Multi)"), "TBS");
        // Bare tags only match whole words
        assert_eq!(n.clean("VIPER"), "VIPER");
    }

    #[test]
    fn test_normalize_extracts_quality_and_region() {
        let n = normalizer();
        let hbo = n.normalize("HBO (West) [HD]");
        assert_eq!(hbo.cleaned, "HBO");
        assert_eq!(hbo.quality, QualityRank::Hd);
        assert_eq!(hbo.region, Some(Region::West));

        let syfy = n.normalize("SYFY [HD]");
        assert_eq!(syfy.cleaned, "SYFY");
        assert_eq!(syfy.region, None);
    }

    #[test]
    fn test_region_word_forms() {
        let n = normalizer();
        assert_eq!(n.extract_region("HBO East"), Some(Region::East));
        assert_eq!(n.extract_region("Starz (PST)"), Some(Region::Pacific));
        assert_eq!(n.extract_region("TBS"), None);
    }

    #[test]
    fn test_extract_tags() {
        let n = normalizer();
        let tags = n.extract_tags("(D1) CBS (WSBT) (East) (Alt) [HD]");
        assert_eq!(tags.region, Some(Region::East));
        assert_eq!(tags.extra, vec!["(Alt)".to_string()]);
        assert_eq!(tags.quality, vec!["[HD]".to_string()]);
    }

    #[test]
    fn test_rebuild_name() {
        let n = normalizer();
        let tags = n.extract_tags("HBO (East) (Alt) [HD]");
        assert_eq!(rebuild_name("HBO", &tags), "HBO East (Alt) [HD]");
    }

    #[test]
    fn test_dead_marker() {
        let n = normalizer();
        assert!(n.is_marked_dead("TBS [Dead]"));
        assert!(n.is_marked_dead("TBS [dead]"));
        assert!(!n.is_marked_dead("TBS [HD]"));
    }
}
