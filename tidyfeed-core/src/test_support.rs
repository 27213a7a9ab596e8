//! Test-only, in-memory implementations of the read seams used by unit
//! and behaviour tests.

use std::collections::{BTreeSet, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::content::ContentItem;
use crate::remote::{RankedFeedError, RankedFeedProvider, RankedFeedQuery, RankedFeedRow};
use crate::store::{BookingRecord, BookingStore, ContentStore, CustomerProfile, StoreError};

fn unavailable(operation: &'static str) -> StoreError {
    StoreError::Unavailable {
        operation,
        message: "injected failure".to_owned(),
    }
}

/// In-memory `ContentStore` backed by a vector scan.
///
/// Intended only for small test datasets; `recent_content` assumes the
/// items were supplied newest first.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    items: Vec<ContentItem>,
    fail: bool,
}

impl MemoryContentStore {
    /// Create a store from a collection of content items.
    pub fn with_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ContentItem>,
    {
        Self {
            items: items.into_iter().collect(),
            fail: false,
        }
    }

    /// Create a store whose every read fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            items: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn recent_content(
        &self,
        limit: usize,
        service_filter: Option<&str>,
    ) -> Result<Vec<ContentItem>, StoreError> {
        if self.fail {
            return Err(unavailable("recent content"));
        }
        Ok(self
            .items
            .iter()
            .filter(|item| {
                service_filter.is_none_or(|service| item.cleaner.specialties.contains(service))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn content_by_ids(&self, ids: &[String]) -> Result<Vec<ContentItem>, StoreError> {
        if self.fail {
            return Err(unavailable("content by ids"));
        }
        Ok(self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }
}

/// In-memory `BookingStore` with fixed history and interactions.
#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    bookings: Vec<BookingRecord>,
    profile: Option<CustomerProfile>,
    interactions: BTreeSet<String>,
    fail: bool,
}

impl MemoryBookingStore {
    /// Create a store with the given booking history, newest first.
    pub fn with_bookings<I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = BookingRecord>,
    {
        Self {
            bookings: bookings.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Attach a customer profile while returning `self` for chaining.
    #[must_use]
    pub fn with_profile(mut self, profile: CustomerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Record a content interaction with a cleaner.
    #[must_use]
    pub fn with_interaction(mut self, cleaner_id: impl Into<String>) -> Self {
        self.interactions.insert(cleaner_id.into());
        self
    }

    /// Create a store whose every read fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn recent_bookings(
        &self,
        _viewer_id: &str,
        limit: usize,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        if self.fail {
            return Err(unavailable("recent bookings"));
        }
        Ok(self.bookings.iter().take(limit).cloned().collect())
    }

    async fn customer_profile(
        &self,
        _viewer_id: &str,
    ) -> Result<Option<CustomerProfile>, StoreError> {
        if self.fail {
            return Err(unavailable("customer profile"));
        }
        Ok(self.profile)
    }

    async fn interacted_cleaners(&self, _viewer_id: &str) -> Result<BTreeSet<String>, StoreError> {
        if self.fail {
            return Err(unavailable("interacted cleaners"));
        }
        Ok(self.interactions.clone())
    }
}

/// Scripted `RankedFeedProvider` that replays queued responses.
///
/// Each call pops the next queued response; an exhausted queue yields
/// empty row sets. Received queries are recorded for assertions.
#[derive(Debug, Default)]
pub struct StubRankedFeed {
    responses: Mutex<VecDeque<Result<Vec<RankedFeedRow>, RankedFeedError>>>,
    calls: Mutex<Vec<RankedFeedQuery>>,
}

impl StubRankedFeed {
    /// Queue a single successful response.
    #[must_use]
    pub fn with_rows(rows: Vec<RankedFeedRow>) -> Self {
        Self::with_responses([Ok(rows)])
    }

    /// Queue a single failed response.
    #[must_use]
    pub fn with_error(error: RankedFeedError) -> Self {
        Self::with_responses([Err(error)])
    }

    /// Queue an ordered sequence of responses.
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<Vec<RankedFeedRow>, RankedFeedError>>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<RankedFeedQuery> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RankedFeedProvider for StubRankedFeed {
    async fn ranked_feed(
        &self,
        query: &RankedFeedQuery,
    ) -> Result<Vec<RankedFeedRow>, RankedFeedError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
