//! Fixture resolution: cache first, then each source in priority order.
//!
//! A fresh cache hit returns immediately. Otherwise the sources are tried in the order
//! given (manual overrides, the live API, the generated fallback) and the first usable
//! round is normalized, cached and returned. If only the synthetic source is left and
//! the cache still holds real (manual/live) data past its TTL, that stale round is
//! served instead of placeholder fixtures.

use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::cache::{CacheKey, FixtureCache};
use crate::config::EngineConfig;
use crate::model::fixture::{Round, SourceTag};
use crate::normalize::Normalizer;
use crate::sources::{FixtureSource, GeneratedSource, ManualSource, SourceFailure, SquiggleSource};

/// Highest round number accepted; the longest seasons run to a round-28 grand final.
pub const MAX_ROUND: u32 = 30;

/// Seasons the engine will answer for.
pub const SEASONS: RangeInclusive<i32> = 1897..=2999;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("round {0} is outside the supported range")]
    InvalidRound(u32),

    #[error("season {0} is outside the supported range")]
    InvalidSeason(i32),

    /// Every source failed, the generated one included. Indicates a bug.
    #[error("no source could produce {season} round {round}")]
    Exhausted { season: i32, round: u32 },
}

/// A resolved round and the source it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub source: SourceTag,
    pub round: Round,
}

pub struct FixtureResolver {
    cache: Arc<FixtureCache>,
    sources: Vec<Box<dyn FixtureSource>>,
    normalizer: Normalizer,
}

impl FixtureResolver {
    /// `sources` are consulted in order; the last should be one that never fails.
    pub fn new(cache: Arc<FixtureCache>, sources: Vec<Box<dyn FixtureSource>>) -> Self {
        FixtureResolver { cache, sources, normalizer: Normalizer::new() }
    }

    /// Standard chain: override file, then Squiggle, then the generated schedule.
    pub fn from_config(config: &EngineConfig) -> Self {
        let cache = Arc::new(FixtureCache::new(config.cache_ttl));
        let sources: Vec<Box<dyn FixtureSource>> = vec![
            Box::new(ManualSource::new(config.override_path.clone())),
            Box::new(SquiggleSource::new(config.api_url.clone(), config.user_agent.clone(), config.api_timeout)),
            Box::new(GeneratedSource::new()),
        ];
        Self::new(cache, sources)
    }

    pub fn cache(&self) -> &FixtureCache {
        &self.cache
    }

    pub fn resolve(&self, season: i32, round: u32) -> Result<Resolution, EngineError> {
        self.resolve_at(season, round, Utc::now())
    }

    /// Resolve as of `now`, which decides cache freshness and stamps any new entry.
    #[instrument(level = "debug", skip(self, now))]
    pub fn resolve_at(&self, season: i32, round: u32, now: DateTime<Utc>) -> Result<Resolution, EngineError> {
        if round == 0 || round > MAX_ROUND {
            return Err(EngineError::InvalidRound(round));
        }
        if !SEASONS.contains(&season) {
            return Err(EngineError::InvalidSeason(season));
        }

        let key = CacheKey::new(season, round);
        let stale = match self.cache.get(key, now) {
            Some(hit) if hit.fresh => {
                debug!(source = %hit.entry.source, "Serving cached round");
                return Ok(Resolution { source: hit.entry.source, round: hit.entry.round });
            }
            Some(hit) => {
                info!(source = %hit.entry.source, fetched_at = %hit.entry.fetched_at, "Cached round expired; refreshing");
                Some(hit.entry)
            }
            None => None,
        };

        for source in &self.sources {
            let tag = source.tag();

            // Stale real fixtures outrank freshly synthesized ones
            if !tag.is_real() {
                if let Some(entry) = stale.as_ref().filter(|e| e.source.is_real()) {
                    warn!(
                        cached_source = %entry.source,
                        fetched_at = %entry.fetched_at,
                        "Real sources failed; serving stale round instead of generated fixtures"
                    );
                    return Ok(Resolution { source: SourceTag::Stale, round: entry.round.clone() });
                }
            }

            match source.fetch(season, round) {
                Ok(raw) => {
                    let normalized = self.normalizer.normalize_round(season, raw);
                    if normalized.round.is_empty() {
                        warn!(source = %tag, dropped = normalized.dropped.len(), "Source yielded no usable fixtures");
                        continue;
                    }
                    if !self.cache.put(key, normalized.round.clone(), tag, now) {
                        debug!(source = %tag, "A newer entry was cached concurrently; keeping it");
                    }
                    info!(
                        source = %tag,
                        fixtures = normalized.round.fixtures.len(),
                        dropped = normalized.dropped.len(),
                        unrecognized = normalized.warnings.len(),
                        "Resolved round"
                    );
                    return Ok(Resolution { source: tag, round: normalized.round });
                }
                Err(SourceFailure::Absent) => {
                    debug!(source = %tag, "Source has no entry for this round");
                }
                Err(e) => {
                    warn!(source = %tag, error = %e, "Source failed; falling through");
                }
            }
        }

        if let Some(entry) = stale {
            warn!(cached_source = %entry.source, "All sources failed; serving stale round");
            return Ok(Resolution { source: SourceTag::Stale, round: entry.round });
        }

        error!(season, round, "Every fixture source failed");
        Err(EngineError::Exhausted { season, round })
    }
}
