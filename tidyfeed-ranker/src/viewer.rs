//! Per-viewer context assembled before local ranking.
//!
//! The snapshot folds the viewer's recent bookings, customer profile,
//! and content interactions into the pure inputs the factor functions
//! need, so scoring a candidate batch issues no further reads.

use std::collections::{BTreeMap, BTreeSet};

use tidyfeed_core::{BookingRecord, CustomerProfile, PreferenceProfile};

/// Aggregated booking history between the viewer and one cleaner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanerHistory {
    /// Completed bookings with this cleaner inside the history window.
    pub bookings: u32,
    /// Mean rating the viewer gave, when they rated any of them.
    pub mean_rating: Option<f32>,
}

/// Everything the local ranking path knows about the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerSnapshot {
    /// Preference profile derived from booking history, budget merged in.
    pub profile: PreferenceProfile,
    /// Booking history grouped per cleaner.
    pub booked: BTreeMap<String, CleanerHistory>,
    /// Cleaners the viewer liked, commented on, or watched.
    pub interacted: BTreeSet<String>,
}

impl ViewerSnapshot {
    /// Snapshot for a viewer with no recoverable history. Used when every
    /// history read fails; scoring proceeds on neutral defaults.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold fetched history into a snapshot.
    ///
    /// `bookings` must be in most-recent-first order; the preference
    /// profile's tie-breaking depends on it. A budget configured on the
    /// customer profile is merged onto the preference profile.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "mean rating averages a handful of survey values"
    )]
    pub fn from_parts(
        bookings: &[BookingRecord],
        customer: Option<&CustomerProfile>,
        interacted: BTreeSet<String>,
    ) -> Self {
        let mut profile = PreferenceProfile::from_bookings(bookings);
        profile.budget = customer.and_then(|record| record.budget);

        let mut booked: BTreeMap<String, CleanerHistory> = BTreeMap::new();
        let mut rating_sums: BTreeMap<&str, (f32, u32)> = BTreeMap::new();
        for booking in bookings {
            let entry = booked
                .entry(booking.cleaner_id.clone())
                .or_insert(CleanerHistory {
                    bookings: 0,
                    mean_rating: None,
                });
            entry.bookings += 1;
            if let Some(rating) = booking.rating_given {
                let (sum, count) = rating_sums.entry(&booking.cleaner_id).or_insert((0.0, 0));
                *sum += rating;
                *count += 1;
            }
        }
        for (cleaner_id, (sum, count)) in rating_sums {
            if let Some(entry) = booked.get_mut(cleaner_id) {
                entry.mean_rating = Some(sum / count as f32);
            }
        }

        Self {
            profile,
            booked,
            interacted,
        }
    }

    /// Booking history with a cleaner, if any exists.
    #[must_use]
    pub fn history_for(&self, cleaner_id: &str) -> Option<&CleanerHistory> {
        self.booked.get(cleaner_id)
    }

    /// Whether the viewer has interacted with a cleaner's content.
    #[must_use]
    pub fn has_interacted(&self, cleaner_id: &str) -> bool {
        self.interacted.contains(cleaner_id)
    }
}
