//! Feed ranking for tidyfeed content.
//!
//! The crate provides two complementary capabilities:
//! - **Factor scoring** turns a content item and its viewer context into
//!   eight normalised sub-scores (proximity, engagement, recency,
//!   personal interaction, service relevance, cleaner rating,
//!   availability, price match) and combines them under a named
//!   [`RankingWeights`] table.
//! - **Feed orchestration** via [`FeedRanker`]: a located viewer is served
//!   from the remote pre-ranked procedure when one is configured (with a
//!   relaxed cold-start retry), and every other case is computed locally
//!   from a recent-content batch and the viewer's booking history. Read
//!   failures degrade path by path; the ranker never errors and returns
//!   an empty feed only when every path yields nothing.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use tidyfeed_core::{BookingStore, ContentStore, FeedRequest};
//! use tidyfeed_ranker::FeedRanker;
//!
//! # async fn demo(content: Arc<dyn ContentStore>, bookings: Arc<dyn BookingStore>) {
//! let ranker = FeedRanker::new(content, bookings);
//! let feed = ranker.ranked_feed(&FeedRequest::new("viewer-1")).await;
//! assert!(feed.len() <= 20);
//! # }
//! ```

#![forbid(unsafe_code)]

mod factors;
mod ranker;
mod viewer;
mod weights;

pub use factors::{
    MAX_PROXIMITY_KM, availability_score, cleaner_rating_score, compute_factors, engagement_score,
    haversine_km, personal_interaction_score, price_match_score, proximity_score, recency_score,
    service_relevance_score,
};
pub use ranker::{FeedRanker, FeedRankerConfig};
pub use viewer::{CleanerHistory, ViewerSnapshot};
pub use weights::RankingWeights;
