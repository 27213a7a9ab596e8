//! Request parameters for a ranked feed call.
//!
//! The request captures the viewer, an optional location, and tuning
//! options. Options default to a balanced twenty-item feed; callers
//! override individual fields through the chaining setters.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::preference::SortPreference;
use crate::profile::BudgetRange;

/// Feed length returned when the caller does not override it.
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// Caller-tunable knobs for a ranked feed call.
///
/// # Examples
/// ```
/// use tidyfeed_core::{FeedOptions, SortPreference};
///
/// let options = FeedOptions::default()
///     .with_limit(5)
///     .with_sort(SortPreference::Proximity);
/// assert_eq!(options.limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedOptions {
    /// Maximum number of items to return.
    pub limit: usize,
    /// Weighting intent for the local ranking path.
    pub sort: SortPreference,
    /// Restrict candidates to cleaners advertising this service type.
    pub service_filter: Option<String>,
    /// Budget override; takes precedence over the profile's budget.
    pub budget: Option<BudgetRange>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEED_LIMIT,
            sort: SortPreference::default(),
            service_filter: None,
            budget: None,
        }
    }
}

impl FeedOptions {
    /// Set the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sort preference.
    #[must_use]
    pub fn with_sort(mut self, sort: SortPreference) -> Self {
        self.sort = sort;
        self
    }

    /// Restrict candidates to a service type.
    #[must_use]
    pub fn with_service_filter(mut self, service: impl Into<String>) -> Self {
        self.service_filter = Some(service.into());
        self
    }

    /// Override the viewer's budget band.
    #[must_use]
    pub fn with_budget(mut self, budget: BudgetRange) -> Self {
        self.budget = Some(budget);
        self
    }
}

/// A single ranked feed request.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tidyfeed_core::FeedRequest;
///
/// let request = FeedRequest::new("viewer-1")
///     .with_location(Coord { x: -122.4194, y: 37.7749 });
/// assert!(request.location.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRequest {
    /// Identifier of the viewer the feed is ranked for.
    pub viewer_id: String,
    /// Viewer position (WGS84, `x = longitude`, `y = latitude`); enables
    /// the server-assisted ranking path when present.
    pub location: Option<Coord<f64>>,
    /// Tuning options.
    pub options: FeedOptions,
}

impl FeedRequest {
    /// Build a request with default options and no location.
    #[must_use]
    pub fn new(viewer_id: impl Into<String>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            location: None,
            options: FeedOptions::default(),
        }
    }

    /// Supply the viewer's position while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Replace the options while returning `self` for chaining.
    #[must_use]
    pub fn with_options(mut self, options: FeedOptions) -> Self {
        self.options = options;
        self
    }
}
