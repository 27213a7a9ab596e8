//! Viewer preference profiles derived from booking history.
//!
//! The profile is computed fresh for every ranking call from the most
//! recent bookings; nothing here is persisted. A viewer with no history
//! yields an empty profile rather than an error.

use serde::{Deserialize, Serialize};

use crate::store::BookingRecord;

/// Number of most-recent bookings the profile is derived from.
pub const BOOKING_HISTORY_LIMIT: usize = 10;

/// Maximum number of preferred service types retained on the profile.
const MAX_PREFERRED_SERVICES: usize = 3;

/// Inclusive hourly-rate band the viewer is willing to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    /// Lower bound in whole currency units.
    pub min: u32,
    /// Upper bound in whole currency units.
    pub max: u32,
}

impl BudgetRange {
    /// Report whether a rate falls inside the band, bounds included.
    ///
    /// # Examples
    /// ```
    /// use tidyfeed_core::BudgetRange;
    ///
    /// let budget = BudgetRange { min: 20, max: 40 };
    /// assert!(budget.contains(20));
    /// assert!(!budget.contains(41));
    /// ```
    #[must_use]
    pub const fn contains(self, rate: u32) -> bool {
        rate >= self.min && rate <= self.max
    }
}

/// Summary of a viewer's booking habits used by the local ranking path.
///
/// # Examples
/// ```
/// use tidyfeed_core::{BookingRecord, PreferenceProfile};
///
/// let history = vec![
///     BookingRecord::new("c-1", "deep_clean"),
///     BookingRecord::new("c-2", "window"),
///     BookingRecord::new("c-1", "deep_clean"),
/// ];
/// let profile = PreferenceProfile::from_bookings(&history);
/// assert_eq!(profile.preferred_services, vec!["deep_clean", "window"]);
/// assert_eq!(profile.booking_count, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Up to three service types ranked by booking frequency. Ties keep
    /// the order in which the services first appear in the history.
    pub preferred_services: Vec<String>,
    /// Number of bookings the profile was derived from.
    pub booking_count: usize,
    /// Hourly-rate band merged in from the customer profile, when set.
    pub budget: Option<BudgetRange>,
}

impl PreferenceProfile {
    /// Derive a profile from recency-ordered booking rows.
    ///
    /// An empty history produces an empty profile; this never fails.
    #[must_use]
    pub fn from_bookings(bookings: &[BookingRecord]) -> Self {
        let mut frequencies: Vec<(&str, usize)> = Vec::new();
        for booking in bookings {
            match frequencies
                .iter_mut()
                .find(|(service, _)| *service == booking.service_type)
            {
                Some((_, count)) => *count += 1,
                None => frequencies.push((&booking.service_type, 1)),
            }
        }
        // Stable sort keeps first-appearance order for equal frequencies.
        frequencies.sort_by(|a, b| b.1.cmp(&a.1));
        let preferred_services = frequencies
            .into_iter()
            .take(MAX_PREFERRED_SERVICES)
            .map(|(service, _)| service.to_owned())
            .collect();
        Self {
            preferred_services,
            booking_count: bookings.len(),
            budget: None,
        }
    }

    /// Attach a budget band while returning `self` for chaining.
    #[must_use]
    pub fn with_budget(mut self, budget: BudgetRange) -> Self {
        self.budget = Some(budget);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn history(services: &[&str]) -> Vec<BookingRecord> {
        services
            .iter()
            .map(|service| BookingRecord::new("c-1", *service))
            .collect()
    }

    #[test]
    fn empty_history_yields_empty_profile() {
        let profile = PreferenceProfile::from_bookings(&[]);
        assert!(profile.preferred_services.is_empty());
        assert_eq!(profile.booking_count, 0);
        assert!(profile.budget.is_none());
    }

    #[test]
    fn ranks_services_by_frequency() {
        let bookings = history(&["window", "deep_clean", "deep_clean", "office", "office", "office"]);
        let profile = PreferenceProfile::from_bookings(&bookings);
        assert_eq!(profile.preferred_services, vec!["office", "deep_clean", "window"]);
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let bookings = history(&["window", "office", "deep_clean"]);
        let profile = PreferenceProfile::from_bookings(&bookings);
        assert_eq!(profile.preferred_services, vec!["window", "office", "deep_clean"]);
    }

    #[test]
    fn retains_at_most_three_services() {
        let bookings = history(&["a", "b", "c", "d"]);
        let profile = PreferenceProfile::from_bookings(&bookings);
        assert_eq!(profile.preferred_services.len(), 3);
        assert_eq!(profile.booking_count, 4);
    }

    #[rstest]
    #[case(19, false)]
    #[case(20, true)]
    #[case(40, true)]
    #[case(41, false)]
    fn budget_bounds_are_inclusive(#[case] rate: u32, #[case] expected: bool) {
        let budget = BudgetRange { min: 20, max: 40 };
        assert_eq!(budget.contains(rate), expected);
    }
}
