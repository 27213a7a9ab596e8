//! Remote proximity-aware ranking over the full cleaner catalogue.
//!
//! The `RankedFeedProvider` trait abstracts the backend procedure that
//! pre-ranks content for a located viewer. Callers supply a
//! [`RankedFeedQuery`] and receive rows already ordered by the remote
//! score; that order is authoritative and must never be re-sorted
//! locally.
//!
//! An empty row set is a legitimate response (for example a market with
//! no qualified cleaners yet), distinct from the error cases in
//! [`RankedFeedError`].

mod error;
mod provider;

pub use error::RankedFeedError;
pub use provider::{RankedFeedProvider, RankedFeedQuery, RankedFeedRow};
