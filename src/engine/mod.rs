//! Match orchestration
//!
//! `MatchEngine` composes the components into the per-channel pipeline:
//! classify OTA once, run the matching path, apply the disambiguation
//! filter, sort survivors by quality and attach a human-readable reason.
//! Eligibility is assigned after all channels are known, since the visible
//! limit is a property of the duplicate group, not the channel.
//!
//! The engine is immutable after construction and `run` takes `&self`, so
//! one engine serves concurrent invocations; every sub-step fails open to a
//! `NoMatch` outcome rather than raising.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::callsign::{CallSignExtractor, OtaChannel};
use crate::config::MatchConfig;
use crate::disambiguation::{CuratedNames, DisambiguationFilter, StreamCandidate};
use crate::errors::EngineResult;
use crate::grouping::{GroupEntry, PrioritySelector};
use crate::matcher::{contains_word, TokenMatcher};
use crate::models::{ChannelGroup, ChannelRecord, MatchMethod, MatchResult, StreamRecord};
use crate::normalizer::{NormalizedName, Region, TagNormalizer};
use crate::quality::QualityRank;
use crate::stations::StationDatabase;

/// Everything a matching pass produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// One result per input channel, in input order
    pub results: Vec<MatchResult>,
    /// Duplicate groups in first-appearance order
    pub groups: Vec<ChannelGroup>,
}

/// A stream with its derived per-pass snapshot.
struct StreamContext<'a> {
    record: &'a StreamRecord,
    cleaned: String,
    region: Option<Region>,
    quality: QualityRank,
    dead: bool,
}

/// Outcome of resolving a single channel, before eligibility is known.
struct Resolution {
    stream_indices: Vec<usize>,
    method: MatchMethod,
    reason: String,
}

impl Resolution {
    fn no_match(reason: String) -> Self {
        Self {
            stream_indices: Vec::new(),
            method: MatchMethod::NoMatch,
            reason,
        }
    }
}

/// The matching engine. Construct once per configuration, run many times.
pub struct MatchEngine {
    config: MatchConfig,
    normalizer: TagNormalizer,
    extractor: CallSignExtractor,
    matcher: TokenMatcher,
    disambiguation: DisambiguationFilter,
    stations: StationDatabase,
    selector: PrioritySelector,
}

impl MatchEngine {
    /// Validate the configuration and compile every pattern set.
    pub fn new(
        config: MatchConfig,
        stations: StationDatabase,
        curated: CuratedNames,
    ) -> EngineResult<Self> {
        config.validate()?;
        let normalizer = TagNormalizer::new(&config.ignore_tags)?;
        let extractor = CallSignExtractor::new()?;
        let matcher = TokenMatcher::new(config.match_threshold);
        let disambiguation = DisambiguationFilter::new(curated)?;
        let selector = PrioritySelector::new(config.visible_limit);

        Ok(Self {
            config,
            normalizer,
            extractor,
            matcher,
            disambiguation,
            stations,
            selector,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a full matching pass over immutable input snapshots.
    ///
    /// Pure and deterministic: identical inputs and configuration always
    /// produce the identical report, ordering included.
    pub fn run(&self, channels: &[ChannelRecord], streams: &[StreamRecord]) -> MatchReport {
        let stream_ctx: Vec<StreamContext> = streams
            .iter()
            .map(|stream| {
                let normalized = self.normalizer.normalize(&stream.name);
                StreamContext {
                    record: stream,
                    cleaned: normalized.cleaned,
                    region: normalized.region,
                    quality: normalized.quality,
                    dead: stream.is_dead || self.normalizer.is_marked_dead(&stream.name),
                }
            })
            .collect();
        let corpus: Vec<String> = stream_ctx.iter().map(|ctx| ctx.cleaned.clone()).collect();

        let mut entries = Vec::with_capacity(channels.len());
        let mut resolved = Vec::with_capacity(channels.len());
        for channel in channels {
            let normalized = self.normalizer.normalize(&channel.name);
            let ota = self.extractor.parse_ota(&channel.name);

            let resolution = match &ota {
                Some(info) => self.resolve_ota(channel, info, &normalized, &stream_ctx),
                None => self.resolve_standard(channel, &normalized, &stream_ctx, &corpus),
            };
            debug!(
                channel = %channel.name,
                method = %resolution.method,
                streams = resolution.stream_indices.len(),
                "channel resolved"
            );

            let key = match &ota {
                Some(info) => info.callsign.clone(),
                None => normalized.cleaned.to_uppercase(),
            };
            entries.push(GroupEntry {
                key,
                channel_id: channel.id,
                quality: normalized.quality,
            });
            resolved.push((channel, resolution));
        }

        let (groups, eligible) = self.selector.select(&entries);

        let mut matched = 0usize;
        let results = resolved
            .into_iter()
            .map(|(channel, resolution)| {
                if !resolution.stream_indices.is_empty() {
                    matched += 1;
                }
                MatchResult {
                    channel_id: channel.id,
                    channel_name: channel.name.clone(),
                    channel_number: channel.channel_number,
                    stream_ids: resolution
                        .stream_indices
                        .iter()
                        .map(|&i| stream_ctx[i].record.id)
                        .collect(),
                    stream_names: resolution
                        .stream_indices
                        .iter()
                        .map(|&i| stream_ctx[i].record.name.clone())
                        .collect(),
                    method: resolution.method,
                    reason: resolution.reason,
                    eligible: eligible.contains(&channel.id),
                }
            })
            .collect();

        info!(
            channels = channels.len(),
            streams = streams.len(),
            matched,
            groups = groups.len(),
            "matching pass complete"
        );
        MatchReport { results, groups }
    }

    /// OTA path: resolve the target call sign through the station database,
    /// then collect streams carrying it as a whole word.
    fn resolve_ota(
        &self,
        channel: &ChannelRecord,
        info: &OtaChannel,
        normalized: &NormalizedName,
        stream_ctx: &[StreamContext],
    ) -> Resolution {
        let resolved = if self.stations.is_empty() {
            // No database supplied: trust the call sign in the name
            Some((info.callsign.clone(), MatchMethod::OtaDirect, String::new()))
        } else if let Some(station) = self
            .stations
            .lookup(&info.callsign)
            .filter(|station| station.network == info.network)
        {
            Some((
                station.callsign.clone(),
                MatchMethod::OtaDirect,
                format!(
                    " (station database: {} {}, {})",
                    station.network, station.city, station.state
                ),
            ))
        } else {
            // Call-sign lookup missed or disagreed on affiliation; fall back
            // to the community of license
            self.stations
                .lookup_locale(&info.state, &info.city)
                .into_iter()
                .find(|station| station.network == info.network)
                .map(|station| {
                    (
                        station.callsign.clone(),
                        MatchMethod::OtaDatabase,
                        format!(
                            " (station database locale fallback: {} {}, {})",
                            station.network, station.city, station.state
                        ),
                    )
                })
        };

        let Some((target, method, note)) = resolved else {
            debug!(channel = %channel.name, callsign = %info.callsign, "no station database entry");
            return Resolution::no_match(format!(
                "no station database entry for callsign {} ({} {}, {})",
                info.callsign, info.network, info.city, info.state
            ));
        };

        let filter = self.disambiguation.for_channel(
            &normalized.cleaned,
            normalized.region,
            Some(target.as_str()),
        );
        let mut indices = Vec::new();
        for (index, ctx) in stream_ctx.iter().enumerate() {
            if ctx.dead {
                continue;
            }
            if !contains_word(&ctx.record.name, &target) {
                continue;
            }
            if !contains_word(&ctx.record.name, &info.network) {
                continue;
            }
            let candidate = StreamCandidate {
                raw_name: &ctx.record.name,
                region: ctx.region,
            };
            if !filter.permits(&candidate) {
                continue;
            }
            indices.push(index);
        }

        if indices.is_empty() {
            return Resolution::no_match(format!("no stream carries callsign {target}{note}"));
        }

        indices.sort_by_key(|&i| stream_ctx[i].quality);
        Resolution {
            stream_indices: indices,
            method,
            reason: format!(
                "callsign {} for {} {}, {}{}",
                target, info.network, info.city, info.state, note
            ),
        }
    }

    /// Standard path: token/fuzzy matching over the cleaned corpus, then the
    /// disambiguation rules.
    fn resolve_standard(
        &self,
        channel: &ChannelRecord,
        normalized: &NormalizedName,
        stream_ctx: &[StreamContext],
        corpus: &[String],
    ) -> Resolution {
        if normalized.cleaned.is_empty() {
            debug!(channel = %channel.name, "name normalized to an empty string");
            return Resolution::no_match("name normalized to an empty string".to_string());
        }

        let filter = self
            .disambiguation
            .for_channel(&normalized.cleaned, normalized.region, None);

        let mut kept = Vec::new();
        for candidate in self.matcher.find_matches(&normalized.cleaned, corpus) {
            let ctx = &stream_ctx[candidate.index];
            if ctx.dead {
                debug!(stream = %ctx.record.name, "skipped dead stream");
                continue;
            }
            let stream = StreamCandidate {
                raw_name: &ctx.record.name,
                region: ctx.region,
            };
            if !filter.permits(&stream) {
                continue;
            }
            kept.push(candidate);
        }

        if kept.is_empty() {
            return Resolution::no_match(format!(
                "no stream matched \"{}\" at threshold {}",
                normalized.cleaned, self.config.match_threshold
            ));
        }

        let exact = kept.iter().any(|c| c.exact);
        let best_score = kept.iter().map(|c| c.score).max().unwrap_or(0);
        let mut indices: Vec<usize> = kept.into_iter().map(|c| c.index).collect();
        indices.sort_by_key(|&i| stream_ctx[i].quality);

        let (method, reason) = if exact {
            (
                MatchMethod::Exact,
                format!("exact name match on \"{}\"", normalized.cleaned),
            )
        } else {
            (
                MatchMethod::FuzzyScored,
                format!(
                    "fuzzy match on \"{}\" (best score {})",
                    normalized.cleaned, best_score
                ),
            )
        };
        Resolution {
            stream_indices: indices,
            method,
            reason,
        }
    }
}
