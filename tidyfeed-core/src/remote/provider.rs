use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::RankedFeedError;

/// Parameters for one remote ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFeedQuery {
    /// Viewer latitude in degrees.
    pub latitude: f64,
    /// Viewer longitude in degrees.
    pub longitude: f64,
    /// Search radius around the viewer in kilometres.
    pub radius_km: f64,
    /// Maximum number of rows to return.
    pub limit: usize,
    /// Relax cleaner qualification filtering to include unverified and
    /// newly registered cleaners (cold-start markets).
    pub include_unverified: bool,
}

/// One pre-ranked row returned by the remote procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFeedRow {
    /// Content identifier to hydrate.
    pub content_id: String,
    /// Score the remote procedure ordered the row by.
    pub rank_score: f32,
    /// Distance between viewer and cleaner, when the backend computed it.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Fetch a pre-ranked candidate set for a located viewer.
///
/// Implementations must be `Send + Sync` so a single provider can serve
/// concurrent feed requests. Returning an empty vector is a valid,
/// non-error outcome.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use tidyfeed_core::{RankedFeedError, RankedFeedProvider, RankedFeedQuery, RankedFeedRow};
///
/// struct EmptyCatalogue;
///
/// #[async_trait]
/// impl RankedFeedProvider for EmptyCatalogue {
///     async fn ranked_feed(
///         &self,
///         _query: &RankedFeedQuery,
///     ) -> Result<Vec<RankedFeedRow>, RankedFeedError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait RankedFeedProvider: Send + Sync {
    /// Return rows ordered by descending remote score.
    async fn ranked_feed(
        &self,
        query: &RankedFeedQuery,
    ) -> Result<Vec<RankedFeedRow>, RankedFeedError>;
}
