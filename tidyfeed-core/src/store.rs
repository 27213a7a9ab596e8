//! Read-only data access traits for content and booking history.
//!
//! Rankers reach the persistence layer exclusively through these seams,
//! so tests and alternative backends can swap implementations freely.
//! Every method is a point-in-time read; the core issues no writes.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::ContentItem;
use crate::profile::BudgetRange;

/// Errors returned by [`ContentStore`] and [`BookingStore`] reads.
///
/// Rankers treat any variant as "no data from this path" and degrade;
/// store errors never reach feed callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the read.
    #[error("{operation} failed: backend unavailable: {message}")]
    Unavailable {
        /// Read operation that failed.
        operation: &'static str,
        /// Backend-supplied detail.
        message: String,
    },
    /// The backend answered with rows the typed contract rejects.
    #[error("{operation} returned malformed data: {message}")]
    Malformed {
        /// Read operation that failed.
        operation: &'static str,
        /// Description of the shape mismatch.
        message: String,
    },
}

/// One booking row from the viewer's history, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Cleaner the booking was placed with.
    pub cleaner_id: String,
    /// Booked service type, e.g. `deep_clean`.
    pub service_type: String,
    /// Rating the viewer left afterwards, when they left one.
    pub rating_given: Option<f32>,
}

impl BookingRecord {
    /// Build an unrated record.
    ///
    /// # Examples
    /// ```
    /// use tidyfeed_core::BookingRecord;
    ///
    /// let record = BookingRecord::new("c-1", "window");
    /// assert!(record.rating_given.is_none());
    /// ```
    #[must_use]
    pub fn new(cleaner_id: impl Into<String>, service_type: impl Into<String>) -> Self {
        Self {
            cleaner_id: cleaner_id.into(),
            service_type: service_type.into(),
            rating_given: None,
        }
    }

    /// Attach the rating the viewer gave.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating_given = Some(rating);
        self
    }
}

/// Optional per-customer fields merged into the preference profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Hourly-rate band the customer configured, when they set one.
    pub budget: Option<BudgetRange>,
}

/// Read-only access to content items with their joined cleaner profiles.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Return up to `limit` recent items, newest first. A service filter
    /// restricts results to cleaners advertising that specialty.
    async fn recent_content(
        &self,
        limit: usize,
        service_filter: Option<&str>,
    ) -> Result<Vec<ContentItem>, StoreError>;

    /// Hydrate the given content identifiers. Unknown identifiers are
    /// skipped; callers must not rely on the result order.
    async fn content_by_ids(&self, ids: &[String]) -> Result<Vec<ContentItem>, StoreError>;
}

/// Read-only access to a viewer's booking and interaction history.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Return up to `limit` completed bookings, most recent first.
    async fn recent_bookings(
        &self,
        viewer_id: &str,
        limit: usize,
    ) -> Result<Vec<BookingRecord>, StoreError>;

    /// Return the customer profile, or `None` for unknown viewers.
    async fn customer_profile(
        &self,
        viewer_id: &str,
    ) -> Result<Option<CustomerProfile>, StoreError>;

    /// Return the cleaners the viewer has liked, commented on, or watched,
    /// excluding cleaners they only booked.
    async fn interacted_cleaners(&self, viewer_id: &str) -> Result<BTreeSet<String>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_formats_operation() {
        let err = StoreError::Unavailable {
            operation: "recent content",
            message: "connection refused".to_owned(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("recent content"));
        assert!(rendered.contains("connection refused"));
    }

    #[test]
    fn booking_record_builder_attaches_rating() {
        let record = BookingRecord::new("c-1", "office").with_rating(4.5);
        assert_eq!(record.rating_given, Some(4.5));
    }
}
