//! The feed ranking orchestrator.
//!
//! `FeedRanker` composes the read seams from `tidyfeed-core` into the
//! two-path ranking flow: a located viewer is served from the remote
//! pre-ranked procedure (strict filtering first, one relaxed cold-start
//! retry), and everything else falls back to local factor scoring over a
//! recent-content batch. Reads are bounded by a per-call timeout and any
//! failure degrades to the next path; the public operation never errors.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use geo::Coord;
use tidyfeed_core::{
    BOOKING_HISTORY_LIMIT, BookingStore, ContentStore, FeedRequest, RankedFeedProvider,
    RankedFeedQuery, RankedFeedRow, ScoredContent, StoreError,
};
use tokio::time::error::Elapsed;

use crate::factors::{MAX_PROXIMITY_KM, compute_factors};
use crate::viewer::ViewerSnapshot;
use crate::weights::RankingWeights;

/// Default bound on each external read.
const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;

/// Default factor between the requested limit and the local candidate
/// batch size.
const DEFAULT_CANDIDATE_BATCH_FACTOR: usize = 2;

/// Tuning knobs for [`FeedRanker`], passed explicitly rather than read
/// from process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRankerConfig {
    /// Deadline applied independently to every external read.
    pub read_timeout: Duration,
    /// Radius handed to the remote procedure, in kilometres.
    pub search_radius_km: f64,
    /// Local candidate batches fetch this multiple of the limit.
    pub candidate_batch_factor: usize,
}

impl Default for FeedRankerConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            search_radius_km: MAX_PROXIMITY_KM,
            candidate_batch_factor: DEFAULT_CANDIDATE_BATCH_FACTOR,
        }
    }
}

impl FeedRankerConfig {
    /// Set the per-read deadline.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the remote search radius in kilometres.
    #[must_use]
    pub const fn with_search_radius_km(mut self, radius_km: f64) -> Self {
        self.search_radius_km = radius_km;
        self
    }
}

/// Ranks content feeds for viewers.
///
/// The ranker holds no per-viewer state; one instance safely serves
/// concurrent requests. It issues only reads, so callers may drop a
/// pending feed future at any time without compensation.
pub struct FeedRanker {
    content: Arc<dyn ContentStore>,
    bookings: Arc<dyn BookingStore>,
    remote: Option<Arc<dyn RankedFeedProvider>>,
    config: FeedRankerConfig,
}

impl std::fmt::Debug for FeedRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRanker")
            .field("remote", &self.remote.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FeedRanker {
    /// Build a ranker that always computes locally.
    #[must_use]
    pub fn new(content: Arc<dyn ContentStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self {
            content,
            bookings,
            remote: None,
            config: FeedRankerConfig::default(),
        }
    }

    /// Attach the remote pre-ranked procedure.
    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn RankedFeedProvider>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: FeedRankerConfig) -> Self {
        self.config = config;
        self
    }

    /// Rank a feed for the given request.
    ///
    /// Never errors: every read failure is logged and degraded, and total
    /// failure across all paths yields an empty vector, which callers
    /// should render as an empty state rather than an error.
    pub async fn ranked_feed(&self, request: &FeedRequest) -> Vec<ScoredContent> {
        if let Some(location) = request.location {
            if let Some(feed) = self.remote_feed(location, request).await {
                return feed;
            }
            log::debug!("remote ranking unavailable; computing feed locally");
        }
        self.local_feed(request).await
    }

    /// Serve the feed from the remote procedure, retrying once with
    /// relaxed cleaner qualification when strict filtering finds nothing.
    ///
    /// Returns `None` when the remote path cannot produce a feed and the
    /// caller should fall back to local computation.
    async fn remote_feed(
        &self,
        location: Coord<f64>,
        request: &FeedRequest,
    ) -> Option<Vec<ScoredContent>> {
        let remote = self.remote.as_ref()?;
        let limit = request.options.limit;
        for include_unverified in [false, true] {
            let query = RankedFeedQuery {
                latitude: location.y,
                longitude: location.x,
                radius_km: self.config.search_radius_km,
                limit,
                include_unverified,
            };
            let outcome = tokio::time::timeout(
                self.config.read_timeout,
                remote.ranked_feed(&query),
            )
            .await;
            let rows = match outcome {
                Ok(Ok(rows)) => rows,
                Ok(Err(err)) => {
                    log::warn!("ranked feed procedure failed: {err}");
                    return None;
                }
                Err(_) => {
                    log::warn!(
                        "ranked feed procedure timed out after {}s",
                        self.config.read_timeout.as_secs()
                    );
                    return None;
                }
            };
            if rows.is_empty() {
                if !include_unverified {
                    log::debug!("strict ranking returned no rows; retrying with unverified cleaners");
                }
                continue;
            }
            return self.hydrate_rows(rows, limit).await;
        }
        None
    }

    /// Hydrate remote rows into scored items, preserving the remote
    /// order. The remote score is carried verbatim and no factor
    /// breakdown is attached.
    async fn hydrate_rows(
        &self,
        rows: Vec<RankedFeedRow>,
        limit: usize,
    ) -> Option<Vec<ScoredContent>> {
        let ids: Vec<String> = rows.iter().map(|row| row.content_id.clone()).collect();
        let outcome =
            tokio::time::timeout(self.config.read_timeout, self.content.content_by_ids(&ids))
                .await;
        let items = flatten_read("content hydration", outcome)?;
        let mut by_id: HashMap<String, _> = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        let mut feed = Vec::with_capacity(rows.len().min(limit));
        for row in rows {
            if feed.len() == limit {
                break;
            }
            let Some(mut item) = by_id.remove(&row.content_id) else {
                log::debug!("ranked row {} missing from the content store", row.content_id);
                continue;
            };
            if let Some(distance) = row.distance_km {
                item.cleaner.distance_km = Some(distance);
            }
            feed.push(ScoredContent {
                item,
                score: row.rank_score,
                factors: None,
            });
        }
        if feed.is_empty() { None } else { Some(feed) }
    }

    /// Compute the feed locally from a recent-content batch.
    async fn local_feed(&self, request: &FeedRequest) -> Vec<ScoredContent> {
        let limit = request.options.limit;
        let batch_size = limit.saturating_mul(self.config.candidate_batch_factor);
        let service_filter = request.options.service_filter.as_deref();

        // The snapshot and the candidate batch are independent reads.
        let (snapshot, candidates) = tokio::join!(
            self.viewer_snapshot(&request.viewer_id),
            self.candidate_batch(batch_size, service_filter),
        );

        let budget = request.options.budget.or(snapshot.profile.budget);
        let weights = RankingWeights::for_preference(request.options.sort);
        let now = Utc::now();

        let mut feed: Vec<ScoredContent> = candidates
            .into_iter()
            .map(|item| {
                let factors =
                    compute_factors(&item, request.location, &snapshot, budget, now);
                let score = weights.combine(&factors);
                ScoredContent {
                    item,
                    score,
                    factors: Some(factors),
                }
            })
            .collect();
        // Stable sort: tied scores keep the batch's original order.
        feed.sort_by(|a, b| b.score.total_cmp(&a.score));
        feed.truncate(limit);
        feed
    }

    /// Assemble the viewer snapshot from three independent history reads.
    /// Each read degrades to its neutral default on failure.
    async fn viewer_snapshot(&self, viewer_id: &str) -> ViewerSnapshot {
        let timeout = self.config.read_timeout;
        let (bookings, customer, interacted) = tokio::join!(
            tokio::time::timeout(
                timeout,
                self.bookings.recent_bookings(viewer_id, BOOKING_HISTORY_LIMIT),
            ),
            tokio::time::timeout(timeout, self.bookings.customer_profile(viewer_id)),
            tokio::time::timeout(timeout, self.bookings.interacted_cleaners(viewer_id)),
        );
        let bookings = flatten_read("booking history", bookings).unwrap_or_default();
        let customer = flatten_read("customer profile", customer).flatten();
        let interacted = flatten_read("content interactions", interacted).unwrap_or_default();
        ViewerSnapshot::from_parts(&bookings, customer.as_ref(), interacted)
    }

    /// Fetch the local candidate batch; failures yield an empty batch.
    async fn candidate_batch(
        &self,
        batch_size: usize,
        service_filter: Option<&str>,
    ) -> Vec<tidyfeed_core::ContentItem> {
        let outcome = tokio::time::timeout(
            self.config.read_timeout,
            self.content.recent_content(batch_size, service_filter),
        )
        .await;
        flatten_read("recent content", outcome).unwrap_or_default()
    }
}

/// Collapse a timed read into an option, logging the degraded cases.
fn flatten_read<T>(
    operation: &str,
    outcome: Result<Result<T, StoreError>, Elapsed>,
) -> Option<T> {
    match outcome {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            log::warn!("{operation} read failed: {err}");
            None
        }
        Err(_) => {
            log::warn!("{operation} read timed out");
            None
        }
    }
}
