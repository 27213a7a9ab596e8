//! Named weight tables combining the eight factor sub-scores.
//!
//! Each table maps a [`SortPreference`] to fixed coefficients. The
//! literal values are load-bearing: they sum to 1.0 by convention, and
//! renormalising them would silently change ranking order, so they are
//! kept verbatim.

use serde::{Deserialize, Serialize};
use tidyfeed_core::{RankingFactors, SortPreference};

/// Coefficients applied to each ranking factor in the weighted sum.
///
/// Weights are non-negative; the total ranking score is monotone in
/// every factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    /// Weight on viewer–cleaner closeness.
    pub proximity: f32,
    /// Weight on like and comment rates.
    pub engagement: f32,
    /// Weight on content freshness.
    pub recency: f32,
    /// Weight on prior viewer–cleaner history.
    pub personal_interaction: f32,
    /// Weight on specialty overlap with viewer preferences.
    pub service_relevance: f32,
    /// Weight on the cleaner's review rating.
    pub cleaner_rating: f32,
    /// Weight on current availability.
    pub availability: f32,
    /// Weight on budget fit.
    pub price_match: f32,
}

impl RankingWeights {
    /// Even spread across all factors.
    pub const BALANCED: Self = Self {
        proximity: 0.25,
        engagement: 0.15,
        recency: 0.15,
        personal_interaction: 0.10,
        service_relevance: 0.15,
        cleaner_rating: 0.10,
        availability: 0.05,
        price_match: 0.05,
    };

    /// Heavy emphasis on closeness.
    pub const PROXIMITY: Self = Self {
        proximity: 0.40,
        engagement: 0.10,
        recency: 0.10,
        personal_interaction: 0.10,
        service_relevance: 0.10,
        cleaner_rating: 0.10,
        availability: 0.05,
        price_match: 0.05,
    };

    /// Heavy emphasis on engagement and freshness.
    pub const ENGAGEMENT: Self = Self {
        proximity: 0.15,
        engagement: 0.30,
        recency: 0.20,
        personal_interaction: 0.15,
        service_relevance: 0.10,
        cleaner_rating: 0.05,
        availability: 0.03,
        price_match: 0.02,
    };

    /// Heavy emphasis on budget fit.
    pub const PRICE: Self = Self {
        proximity: 0.20,
        engagement: 0.10,
        recency: 0.10,
        personal_interaction: 0.10,
        service_relevance: 0.15,
        cleaner_rating: 0.10,
        availability: 0.05,
        price_match: 0.20,
    };

    /// Select the table for a caller's sort preference.
    ///
    /// # Examples
    /// ```
    /// use tidyfeed_core::SortPreference;
    /// use tidyfeed_ranker::RankingWeights;
    ///
    /// let weights = RankingWeights::for_preference(SortPreference::Proximity);
    /// assert_eq!(weights.proximity, 0.40);
    /// ```
    #[must_use]
    pub const fn for_preference(preference: SortPreference) -> Self {
        match preference {
            SortPreference::Balanced => Self::BALANCED,
            SortPreference::Proximity => Self::PROXIMITY,
            SortPreference::Engagement => Self::ENGAGEMENT,
            SortPreference::Price => Self::PRICE,
        }
    }

    /// Weighted sum of the factor sub-scores.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the ranking score is a weighted sum of sub-scores"
    )]
    pub fn combine(&self, factors: &RankingFactors) -> f32 {
        self.proximity * factors.proximity
            + self.engagement * factors.engagement
            + self.recency * factors.recency
            + self.personal_interaction * factors.personal_interaction
            + self.service_relevance * factors.service_relevance
            + self.cleaner_rating * factors.cleaner_rating
            + self.availability * factors.availability
            + self.price_match * factors.price_match
    }
}
