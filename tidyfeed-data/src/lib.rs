//! HTTP access to the backend's ranked-feed procedure.
//!
//! This crate provides [`HttpRankedFeedProvider`], an implementation of
//! [`tidyfeed_core::RankedFeedProvider`] that calls the managed
//! backend's remote procedure endpoint over HTTPS.
//!
//! # Architecture
//!
//! The provider posts a JSON argument object to `{base_url}/rpc/{function}`
//! and decodes the response as an ordered array of
//! [`RankedFeedRow`](tidyfeed_core::RankedFeedRow) values. Transport
//! failures, non-success statuses, and undecodable bodies map onto the
//! [`RankedFeedError`](tidyfeed_core::RankedFeedError) taxonomy; callers
//! (the feed ranker) treat every variant as a signal to fall back to
//! local computation.
//!
//! # Example
//!
//! ```no_run
//! use tidyfeed_data::{HttpRankedFeedProvider, HttpRankedFeedProviderConfig};
//! use tidyfeed_core::{RankedFeedProvider, RankedFeedQuery};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpRankedFeedProviderConfig::new("https://backend.example")
//!     .with_timeout(Duration::from_secs(5))
//!     .with_bearer_token("service-role-key");
//! let provider = HttpRankedFeedProvider::with_config(config)?;
//!
//! let rows = provider
//!     .ranked_feed(&RankedFeedQuery {
//!         latitude: 37.7749,
//!         longitude: -122.4194,
//!         radius_km: 50.0,
//!         limit: 20,
//!         include_unverified: false,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod provider;
mod rpc;

pub use provider::{
    DEFAULT_RPC_FUNCTION, DEFAULT_USER_AGENT, HttpRankedFeedProvider,
    HttpRankedFeedProviderConfig, ProviderBuildError,
};
