//! Channel-to-stream matching engine
//!
//! Matches broadcast/streaming channel records to candidate stream records
//! by name: tag normalization, quality ranking, OTA call-sign resolution
//! against a station database, word-boundary and token-sort fuzzy matching,
//! disambiguation of near-identical names, and visible-limit priority
//! selection over duplicate channels.
//!
//! The engine is a pure library boundary: it performs no network or file
//! I/O, consumes in-memory snapshots and produces in-memory results.
//! Callers own fetching records, scheduling passes and applying results.
//!
//! ```rust
//! use stream_matcher::{
//!     ChannelRecord, CuratedNames, MatchConfig, MatchEngine, StationDatabase, StreamRecord,
//! };
//!
//! let engine = MatchEngine::new(
//!     MatchConfig::default(),
//!     StationDatabase::default(),
//!     CuratedNames::default(),
//! )
//! .unwrap();
//!
//! let channels = vec![ChannelRecord {
//!     id: 1,
//!     name: "TBS [FHD]".to_string(),
//!     channel_number: None,
//!     group_id: None,
//! }];
//! let streams = vec![StreamRecord {
//!     id: 10,
//!     name: "USA: TBS".to_string(),
//!     m3u_account: None,
//!     is_dead: false,
//! }];
//!
//! let report = engine.run(&channels, &streams);
//! assert_eq!(report.results[0].stream_ids, vec![10]);
//! ```

pub mod callsign;
pub mod config;
pub mod disambiguation;
pub mod engine;
pub mod errors;
pub mod grouping;
pub mod matcher;
pub mod models;
pub mod normalizer;
pub mod quality;
pub mod stations;

pub use config::MatchConfig;
pub use disambiguation::CuratedNames;
pub use engine::{MatchEngine, MatchReport};
pub use errors::{EngineError, EngineResult};
pub use models::{ChannelGroup, ChannelRecord, MatchMethod, MatchResult, StreamRecord};
pub use quality::QualityRank;
pub use stations::{RegionalRecordSet, StationDatabase, StationRecord};
