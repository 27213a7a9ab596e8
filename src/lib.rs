//! Facade crate for the tidyfeed ranking engine.
//!
//! This crate re-exports the core domain types and exposes the feed
//! ranker and the HTTP ranked-feed client behind feature flags.

#![forbid(unsafe_code)]

pub use tidyfeed_core::{
    BOOKING_HISTORY_LIMIT, BookingRecord, BookingStore, BudgetRange, CleanerProfile, ContentItem,
    ContentStore, CustomerProfile, DEFAULT_FEED_LIMIT, FeedOptions, FeedRequest, NEUTRAL_SCORE,
    PreferenceProfile, PriceInfo, PricingModel, RankedFeedError, RankedFeedProvider,
    RankedFeedQuery, RankedFeedRow, RankingFactors, ScoredContent, SortPreference, StoreError,
    clamp_score,
};

#[cfg(feature = "ranker")]
pub use tidyfeed_ranker::{FeedRanker, FeedRankerConfig, RankingWeights, ViewerSnapshot};

#[cfg(feature = "http-rpc")]
pub use tidyfeed_data::{HttpRankedFeedProvider, HttpRankedFeedProviderConfig};
