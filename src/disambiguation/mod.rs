//! Disambiguation of near-identical channel names
//!
//! A candidate that matched on name can still belong to a different entity:
//! a longer curated name (`FX` inside `FX Movie Channel`), a local affiliate
//! feed carrying someone else's call sign, or an opposite-coast feed. The
//! filter rejects those after matching. Every rule fails open — a candidate
//! is only dropped on positive evidence.

use regex::Regex;
use tracing::debug;

use crate::callsign::CallSignExtractor;
use crate::errors::EngineResult;
use crate::matcher::contains_word;
use crate::normalizer::Region;

/// Curated list of known distinct channel names, one per line.
/// Used only for the longer-name exclusion rule.
#[derive(Debug, Clone, Default)]
pub struct CuratedNames {
    names: Vec<String>,
}

impl CuratedNames {
    pub fn from_lines(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A matched stream under consideration, seen through its raw name.
#[derive(Debug, Clone, Copy)]
pub struct StreamCandidate<'a> {
    pub raw_name: &'a str,
    pub region: Option<Region>,
}

/// Shared state for the three exclusion rules.
pub struct DisambiguationFilter {
    curated: CuratedNames,
    extractor: CallSignExtractor,
}

impl DisambiguationFilter {
    pub fn new(curated: CuratedNames) -> EngineResult<Self> {
        Ok(Self {
            curated,
            extractor: CallSignExtractor::new()?,
        })
    }

    /// Prepare the per-channel view of the rules.
    ///
    /// `target_callsign` is the OTA channel's own call sign, when it has one.
    pub fn for_channel<'a>(
        &'a self,
        cleaned_name: &str,
        region: Option<Region>,
        target_callsign: Option<&str>,
    ) -> ChannelFilter<'a> {
        // Curated names this channel's name sits inside of as a whole word
        let longer_names = self
            .curated
            .names()
            .iter()
            .filter(|known| !known.eq_ignore_ascii_case(cleaned_name))
            .filter(|known| contains_word(known, cleaned_name))
            .map(|known| known.as_str())
            .collect();

        // A 4-5 letter upper-case call sign immediately before the channel
        // name marks a local affiliate feed. Compiled per channel; on the
        // (unreachable) chance the escaped name fails to compile, the rule
        // is skipped rather than failing the pass.
        let preceded_by_callsign = if target_callsign.is_none() {
            Regex::new(&format!(
                r"\b[A-Z]{{4,5}}\s+{}\b",
                regex::escape(cleaned_name)
            ))
            .ok()
        } else {
            None
        };

        ChannelFilter {
            extractor: &self.extractor,
            longer_names,
            preceded_by_callsign,
            channel_is_western: region.map(Region::is_western).unwrap_or(false),
            target_callsign: target_callsign.map(str::to_uppercase),
        }
    }
}

/// The exclusion rules specialized to one channel.
pub struct ChannelFilter<'a> {
    extractor: &'a CallSignExtractor,
    longer_names: Vec<&'a str>,
    preceded_by_callsign: Option<Regex>,
    channel_is_western: bool,
    target_callsign: Option<String>,
}

impl ChannelFilter<'_> {
    /// Whether a matched candidate survives all three rules.
    pub fn permits(&self, candidate: &StreamCandidate) -> bool {
        // Rule A: the stream really belongs to a longer, distinct entity
        for longer in &self.longer_names {
            if contains_word(candidate.raw_name, longer) {
                debug!(stream = %candidate.raw_name, longer, "excluded: matches longer channel name");
                return false;
            }
        }

        // Rule B: local affiliate feeds carrying a foreign call sign
        if let Some(callsign) = self.extractor.paren_callsign(candidate.raw_name) {
            if self.target_callsign.as_deref() != Some(callsign.as_str()) {
                debug!(stream = %candidate.raw_name, %callsign, "excluded: foreign callsign");
                return false;
            }
        }
        if let Some(pattern) = &self.preceded_by_callsign {
            if pattern.is_match(candidate.raw_name) {
                debug!(stream = %candidate.raw_name, "excluded: name preceded by callsign");
                return false;
            }
        }

        // Rule C: opposite-coast feeds, unless the channel asked for one
        if let Some(region) = candidate.region {
            if region.is_western() && !self.channel_is_western {
                debug!(stream = %candidate.raw_name, "excluded: western feed");
                return false;
            }
        }

        true
    }
}
