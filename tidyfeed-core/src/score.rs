//! Scoring primitives shared by every ranking implementation.
//!
//! A ranking score is a weighted sum of eight factor sub-scores, each
//! normalised into `0.0..=1.0`. Missing data never fails a ranking call;
//! factor functions substitute [`NEUTRAL_SCORE`] (or the specific
//! constants they document) and proceed.

use serde::{Deserialize, Serialize};

use crate::content::ContentItem;

/// Sub-score substituted when the inputs for a factor are unavailable.
pub const NEUTRAL_SCORE: f32 = 0.5;

/// Clamp and validate a raw sub-score.
///
/// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`. Every
/// factor function routes its result through this guard.
///
/// # Examples
/// ```
/// use tidyfeed_core::clamp_score;
///
/// assert_eq!(clamp_score(1.4), 1.0);
/// assert_eq!(clamp_score(f32::NAN), 0.0);
/// assert_eq!(clamp_score(0.25), 0.25);
/// ```
#[must_use]
pub fn clamp_score(score: f32) -> f32 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// The eight independent dimensions contributing to a ranking score.
///
/// Every field is in `0.0..=1.0`; the weighted total is monotone in each
/// field for non-negative weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingFactors {
    /// Closeness of the cleaner to the viewer.
    pub proximity: f32,
    /// Blended like and comment rate of the content.
    pub engagement: f32,
    /// Freshness of the content.
    pub recency: f32,
    /// Prior history between this viewer and this cleaner.
    pub personal_interaction: f32,
    /// Overlap between cleaner specialties and viewer preferences.
    pub service_relevance: f32,
    /// The cleaner's mean review rating.
    pub cleaner_rating: f32,
    /// Whether the cleaner currently accepts bookings.
    pub availability: f32,
    /// Fit of the cleaner's hourly rate to the viewer's budget.
    pub price_match: f32,
}

/// A content item paired with the score that ordered it.
///
/// Items ranked by the remote procedure carry its score verbatim and no
/// factor breakdown; locally ranked items always carry one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredContent {
    /// The hydrated content item.
    pub item: ContentItem,
    /// Final ranking score; higher sorts earlier.
    pub score: f32,
    /// Factor breakdown, present only for locally computed scores.
    pub factors: Option<RankingFactors>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE: f32 = 1e-6;

    #[rstest]
    #[case(f32::NAN, 0.0)]
    #[case(f32::INFINITY, 0.0)]
    #[case(f32::NEG_INFINITY, 0.0)]
    #[case(-0.1, 0.0)]
    #[case(1.2, 1.0)]
    #[case(0.4, 0.4)]
    fn clamp_filters_and_bounds(#[case] input: f32, #[case] expected: f32) {
        let result = clamp_score(input);
        assert!(result.is_finite(), "result must be finite");
        assert!((0.0..=1.0).contains(&result), "result must be within [0, 1]");
        assert!((result - expected).abs() <= TOLERANCE);
    }

    #[test]
    fn default_factors_are_zeroed() {
        let factors = RankingFactors::default();
        assert_eq!(factors.proximity, 0.0);
        assert_eq!(factors.price_match, 0.0);
    }
}
