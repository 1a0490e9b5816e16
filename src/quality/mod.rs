//! Quality classification for channel and stream names
//!
//! Names encode their feed quality as bracketed (`[HD]`), parenthesized
//! (`(HD)`) or bare (`HD`) tokens. The classifier maps any recognized
//! spelling to a total-ordered rank so matched streams can be sorted best
//! first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::errors::EngineResult;

/// Feed quality, ordered best to worst.
///
/// The derived `Ord` follows declaration order, so sorting ascending yields
/// best quality first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum QualityRank {
    #[strum(serialize = "4K")]
    Uhd4k,
    #[strum(serialize = "FHD")]
    Fhd,
    #[strum(serialize = "HD")]
    Hd,
    /// Bare `(H)` marker seen on some provider feeds, a step below `HD`
    #[strum(serialize = "H")]
    HdVariant,
    #[strum(serialize = "SD")]
    Sd,
    /// `(F)` / `(D)` tertiary markers
    #[strum(serialize = "F")]
    SdVariant,
    #[strum(serialize = "Slow")]
    Slow,
    /// No recognized quality token
    #[strum(serialize = "Unknown")]
    Unknown,
}

impl QualityRank {
    /// Map a single quality token to its rank. Bracketed, parenthesized and
    /// bare spellings are equivalent; unrecognized tokens rank `Unknown`.
    pub fn classify(token: &str) -> QualityRank {
        let inner = token
            .trim()
            .trim_start_matches(['[', '('])
            .trim_end_matches([']', ')'])
            .trim()
            .to_uppercase();
        match inner.as_str() {
            "4K" | "UHD" => QualityRank::Uhd4k,
            "FHD" => QualityRank::Fhd,
            "HD" => QualityRank::Hd,
            "H" => QualityRank::HdVariant,
            "SD" => QualityRank::Sd,
            "F" | "D" => QualityRank::SdVariant,
            "SLOW" => QualityRank::Slow,
            _ => QualityRank::Unknown,
        }
    }
}

/// Scans whole names for quality tokens, highest precedence first.
///
/// Patterns are compiled once at construction; the classifier is immutable
/// afterwards and safe to share across threads.
pub struct QualityClassifier {
    rules: Vec<(QualityRank, Regex)>,
}

impl QualityClassifier {
    pub fn new() -> EngineResult<Self> {
        // Single-letter markers are only recognized enclosed; a bare H or F
        // word is too ambiguous.
        let table: &[(QualityRank, &str)] = &[
            (
                QualityRank::Uhd4k,
                r"(?i)(?:\[(?:4K|UHD)\]|\((?:4K|UHD)\)|\b(?:4K|UHD)\b)",
            ),
            (QualityRank::Fhd, r"(?i)(?:\[FHD\]|\(FHD\)|\bFHD\b)"),
            (QualityRank::Hd, r"(?i)(?:\[HD\]|\(HD\)|\bHD\b)"),
            (QualityRank::HdVariant, r"(?i)(?:\[H\]|\(H\))"),
            (QualityRank::Sd, r"(?i)(?:\[SD\]|\(SD\)|\bSD\b)"),
            (QualityRank::SdVariant, r"(?i)(?:\[[FD]\]|\([FD]\))"),
            (QualityRank::Slow, r"(?i)(?:\[Slow\]|\(Slow\)|\bSlow\b)"),
        ];

        let mut rules = Vec::with_capacity(table.len());
        for (rank, pattern) in table {
            rules.push((*rank, Regex::new(pattern)?));
        }
        Ok(Self { rules })
    }

    /// Rank of the highest-precedence quality token found in `name`, or
    /// `Unknown` when the name carries none.
    pub fn classify_name(&self, name: &str) -> QualityRank {
        for (rank, pattern) in &self.rules {
            if pattern.is_match(name) {
                return *rank;
            }
        }
        QualityRank::Unknown
    }
}
