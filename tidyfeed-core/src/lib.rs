//! Core domain types for the tidyfeed ranking engine.
//!
//! The crate defines the content and cleaner models, the viewer preference
//! profile, the scoring primitives shared by every ranking implementation,
//! and the read-only traits through which rankers reach the persistence
//! layer and the remote ranked-feed procedure. Implementations of those
//! seams live in sibling crates; everything here is transport-agnostic.

#![forbid(unsafe_code)]

mod content;
mod feed;
mod preference;
mod profile;
mod remote;
mod score;
mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use content::{CleanerProfile, ContentItem, PriceInfo, PricingModel};
pub use feed::{DEFAULT_FEED_LIMIT, FeedOptions, FeedRequest};
pub use preference::SortPreference;
pub use profile::{BOOKING_HISTORY_LIMIT, BudgetRange, PreferenceProfile};
pub use remote::{RankedFeedError, RankedFeedProvider, RankedFeedQuery, RankedFeedRow};
pub use score::{NEUTRAL_SCORE, RankingFactors, ScoredContent, clamp_score};
pub use store::{BookingRecord, BookingStore, ContentStore, CustomerProfile, StoreError};
