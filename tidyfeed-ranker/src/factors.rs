//! The eight factor sub-scores behind a ranking score.
//!
//! Every function here is pure, returns a value in `0.0..=1.0` via
//! [`clamp_score`], and substitutes [`NEUTRAL_SCORE`] (or its documented
//! constant) when an optional input is missing. Missing data is a shape
//! gap, not an error; no function here can fail.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use geo::Coord;
use tidyfeed_core::{BudgetRange, ContentItem, NEUTRAL_SCORE, RankingFactors, clamp_score};

use crate::viewer::{CleanerHistory, ViewerSnapshot};

/// Mean Earth radius in kilometres for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance at which proximity scoring bottoms out.
pub const MAX_PROXIMITY_KM: f64 = 50.0;

/// Blended engagement rate treated as the scoring ceiling.
const ENGAGEMENT_RATE_CEILING: f32 = 0.1;

/// Relative weight of the like rate inside the blended engagement rate.
const LIKE_RATE_WEIGHT: f32 = 0.6;

/// Relative weight of the comment rate inside the blended engagement rate.
const COMMENT_RATE_WEIGHT: f32 = 0.4;

/// Flat score for viewers who interacted with a cleaner's content
/// without ever booking them.
const CONTENT_INTERACTION_SCORE: f32 = 0.3;

/// Score for cleaners not currently accepting bookings. Deliberately
/// above zero so they surface, just deprioritised.
const UNAVAILABLE_SCORE: f32 = 0.3;

/// Score for rates below the viewer's budget: good, but not a perfect
/// fit, so the cheapest cleaner does not always win.
const UNDER_BUDGET_SCORE: f32 = 0.8;

/// Upper bound of the review rating scale.
const MAX_RATING: f32 = 5.0;

/// Recency breakpoints in hours, paired with their step scores.
const FRESH_HOURS: i64 = 24;
const WEEK_HOURS: i64 = 168;
const MONTH_HOURS: i64 = 720;
const FRESH_SCORE: f32 = 1.0;
const WEEK_SCORE: f32 = 0.8;
const MONTH_SCORE: f32 = 0.6;
const STALE_SCORE: f32 = 0.4;

/// Great-circle distance between two WGS84 coordinates in kilometres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tidyfeed_ranker::haversine_km;
///
/// let sf = Coord { x: -122.4194, y: 37.7749 };
/// let la = Coord { x: -118.2437, y: 34.0522 };
/// let distance = haversine_km(sf, la);
/// assert!((distance - 559.0).abs() < 5.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is inherently floating-point"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let from_lat = from.y.to_radians();
    let to_lat = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lon = (to.x - from.x).to_radians();
    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * half_chord.sqrt().asin()
}

/// Closeness of the cleaner to the viewer.
///
/// Scores 1.0 at zero distance, falling linearly to 0.0 at
/// [`MAX_PROXIMITY_KM`]. Either side missing a position degrades to
/// [`NEUTRAL_SCORE`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "distance mapping is floating-point; the ratio is in unit range before narrowing"
)]
pub fn proximity_score(viewer: Option<Coord<f64>>, cleaner: Option<Coord<f64>>) -> f32 {
    let (Some(viewer_at), Some(cleaner_at)) = (viewer, cleaner) else {
        return NEUTRAL_SCORE;
    };
    let distance = haversine_km(viewer_at, cleaner_at);
    clamp_score(((MAX_PROXIMITY_KM - distance) / MAX_PROXIMITY_KM) as f32)
}

/// Blended like and comment rate of the content.
///
/// A 10% blended rate (60% likes, 40% comments) scores 1.0; zero views
/// scores 0.0.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "engagement rates are ratios of counters far below the f64 mantissa limit"
)]
pub fn engagement_score(views: u64, likes: u64, comments: u64) -> f32 {
    if views == 0 {
        return 0.0;
    }
    let like_rate = likes as f32 / views as f32;
    let comment_rate = comments as f32 / views as f32;
    let blended = LIKE_RATE_WEIGHT * like_rate + COMMENT_RATE_WEIGHT * comment_rate;
    clamp_score(blended / ENGAGEMENT_RATE_CEILING)
}

/// Freshness of the content as a step function of its age.
///
/// Up to a day old scores 1.0, up to a week 0.8, up to a month 0.6, and
/// anything older 0.4. The breakpoints are exact; there is no decay
/// between them.
#[must_use]
pub fn recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f32 {
    let age_hours = now.signed_duration_since(created_at).num_hours();
    if age_hours <= FRESH_HOURS {
        FRESH_SCORE
    } else if age_hours <= WEEK_HOURS {
        WEEK_SCORE
    } else if age_hours <= MONTH_HOURS {
        MONTH_SCORE
    } else {
        STALE_SCORE
    }
}

/// Prior history between this viewer and this cleaner.
///
/// Completed bookings dominate: the mean rating the viewer gave, scaled
/// to unit range, or [`NEUTRAL_SCORE`] when they booked but never rated.
/// Content-only interaction scores a flat [`CONTENT_INTERACTION_SCORE`];
/// no history at all scores 0.0.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rating normalisation divides by the scale maximum"
)]
pub fn personal_interaction_score(history: Option<&CleanerHistory>, interacted: bool) -> f32 {
    if let Some(booked) = history {
        return booked
            .mean_rating
            .map_or(NEUTRAL_SCORE, |rating| clamp_score(rating / MAX_RATING));
    }
    if interacted {
        CONTENT_INTERACTION_SCORE
    } else {
        0.0
    }
}

/// Overlap between the cleaner's specialties and the viewer's preferred
/// services, as a share of the preferred list. Either side empty
/// degrades to [`NEUTRAL_SCORE`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "overlap ratio is a small-count division"
)]
pub fn service_relevance_score(specialties: &BTreeSet<String>, preferred: &[String]) -> f32 {
    if specialties.is_empty() || preferred.is_empty() {
        return NEUTRAL_SCORE;
    }
    let overlap = preferred
        .iter()
        .filter(|service| specialties.contains(*service))
        .count();
    clamp_score(overlap as f32 / preferred.len().max(1) as f32)
}

/// The cleaner's mean review rating scaled to unit range; unrated
/// cleaners degrade to [`NEUTRAL_SCORE`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rating normalisation divides by the scale maximum"
)]
pub fn cleaner_rating_score(rating_average: Option<f32>) -> f32 {
    rating_average.map_or(NEUTRAL_SCORE, |rating| clamp_score(rating / MAX_RATING))
}

/// Availability dichotomy: accepting bookings scores 1.0, otherwise
/// [`UNAVAILABLE_SCORE`]. No third value exists.
#[must_use]
pub const fn availability_score(available: bool) -> f32 {
    if available { 1.0 } else { UNAVAILABLE_SCORE }
}

/// Fit of the cleaner's hourly rate to the viewer's budget band.
///
/// In range scores 1.0 and under budget [`UNDER_BUDGET_SCORE`]. Over
/// budget the penalty doubles the fractional overage, floored at 0.0.
/// No budget or no advertised rate degrades to [`NEUTRAL_SCORE`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "overage penalty is a ratio of whole-unit rates"
)]
pub fn price_match_score(hourly_rate: Option<u32>, budget: Option<BudgetRange>) -> f32 {
    let (Some(rate), Some(band)) = (hourly_rate, budget) else {
        return NEUTRAL_SCORE;
    };
    if band.contains(rate) {
        return 1.0;
    }
    if rate < band.min {
        return UNDER_BUDGET_SCORE;
    }
    let overage = (rate - band.max) as f32 / band.max as f32;
    clamp_score(1.0 - 2.0 * overage)
}

/// Compute all eight sub-scores for one candidate item.
#[must_use]
pub fn compute_factors(
    item: &ContentItem,
    viewer_location: Option<Coord<f64>>,
    snapshot: &ViewerSnapshot,
    budget: Option<BudgetRange>,
    now: DateTime<Utc>,
) -> RankingFactors {
    let cleaner = &item.cleaner;
    RankingFactors {
        proximity: proximity_score(viewer_location, cleaner.location),
        engagement: engagement_score(item.view_count, item.like_count, item.comment_count),
        recency: recency_score(item.created_at, now),
        personal_interaction: personal_interaction_score(
            snapshot.history_for(&cleaner.id),
            snapshot.has_interacted(&cleaner.id),
        ),
        service_relevance: service_relevance_score(
            &cleaner.specialties,
            &snapshot.profile.preferred_services,
        ),
        cleaner_rating: cleaner_rating_score(cleaner.rating_average),
        availability: availability_score(cleaner.available),
        price_match: price_match_score(cleaner.hourly_rate, budget),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    const TOLERANCE: f32 = 1e-6;

    fn coord(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    /// Offset a latitude by roughly `km` kilometres.
    fn north_of(origin: Coord<f64>, km: f64) -> Coord<f64> {
        coord(origin.x, origin.y + km / 111.195)
    }

    #[rstest]
    #[case(None, Some(coord(0.0, 0.0)))]
    #[case(Some(coord(0.0, 0.0)), None)]
    #[case(None, None)]
    fn proximity_is_neutral_without_positions(
        #[case] viewer: Option<Coord<f64>>,
        #[case] cleaner: Option<Coord<f64>>,
    ) {
        assert_eq!(proximity_score(viewer, cleaner), NEUTRAL_SCORE);
    }

    #[test]
    fn proximity_is_perfect_at_zero_distance() {
        let here = coord(-122.4194, 37.7749);
        assert!((proximity_score(Some(here), Some(here)) - 1.0).abs() <= TOLERANCE);
    }

    #[test]
    fn proximity_prefers_the_closer_cleaner() {
        let viewer = coord(-122.4194, 37.7749);
        let near = proximity_score(Some(viewer), Some(north_of(viewer, 5.0)));
        let far = proximity_score(Some(viewer), Some(north_of(viewer, 40.0)));
        assert!(near > far, "5 km must outscore 40 km: {near} vs {far}");
    }

    #[test]
    fn proximity_bottoms_out_past_fifty_km() {
        let viewer = coord(-122.4194, 37.7749);
        let score = proximity_score(Some(viewer), Some(north_of(viewer, 80.0)));
        assert_eq!(score, 0.0);
    }

    #[rstest]
    #[case(0, 50, 50, 0.0)] // zero views scores zero regardless of counters
    #[case(1000, 100, 0, 0.6)] // 10% like rate gives a 6% blended rate
    #[case(1000, 0, 0, 0.0)]
    #[case(100, 10, 10, 1.0)] // 6% + 4% hits the ceiling exactly
    #[case(100, 90, 90, 1.0)] // far past the ceiling still clamps to 1.0
    fn engagement_scenarios(
        #[case] views: u64,
        #[case] likes: u64,
        #[case] comments: u64,
        #[case] expected: f32,
    ) {
        assert!((engagement_score(views, likes, comments) - expected).abs() <= TOLERANCE);
    }

    #[rstest]
    #[case(23, 1.0)]
    #[case(100, 0.8)]
    #[case(500, 0.6)]
    #[case(1000, 0.4)]
    #[case(24, 1.0)] // boundary is inclusive
    #[case(168, 0.8)]
    #[case(720, 0.6)]
    fn recency_breakpoints(#[case] age_hours: i64, #[case] expected: f32) {
        let now = Utc::now();
        let created_at = now - Duration::hours(age_hours);
        assert_eq!(recency_score(created_at, now), expected);
    }

    #[test]
    fn future_timestamps_count_as_fresh() {
        let now = Utc::now();
        assert_eq!(recency_score(now + Duration::hours(2), now), 1.0);
    }

    #[test]
    fn booked_history_scores_by_mean_rating() {
        let history = CleanerHistory {
            bookings: 2,
            mean_rating: Some(4.0),
        };
        assert!((personal_interaction_score(Some(&history), false) - 0.8).abs() <= TOLERANCE);
    }

    #[test]
    fn unrated_bookings_score_neutral() {
        let history = CleanerHistory {
            bookings: 1,
            mean_rating: None,
        };
        assert_eq!(personal_interaction_score(Some(&history), true), NEUTRAL_SCORE);
    }

    #[test]
    fn content_interaction_scores_flat() {
        assert_eq!(personal_interaction_score(None, true), CONTENT_INTERACTION_SCORE);
    }

    #[test]
    fn strangers_score_zero() {
        assert_eq!(personal_interaction_score(None, false), 0.0);
    }

    #[rstest]
    #[case(&[] as &[&str], &["deep_clean"], NEUTRAL_SCORE)]
    #[case(&["deep_clean"], &[] as &[&str], NEUTRAL_SCORE)]
    #[case(&["deep_clean", "window"], &["deep_clean", "office"], 0.5)]
    #[case(&["deep_clean", "window"], &["deep_clean", "window"], 1.0)]
    #[case(&["office"], &["deep_clean", "window"], 0.0)]
    fn service_relevance_scenarios(
        #[case] specialties: &[&str],
        #[case] preferred: &[&str],
        #[case] expected: f32,
    ) {
        let specialties: BTreeSet<String> = specialties.iter().map(|s| (*s).to_owned()).collect();
        let preferred: Vec<String> = preferred.iter().map(|s| (*s).to_owned()).collect();
        assert!(
            (service_relevance_score(&specialties, &preferred) - expected).abs() <= TOLERANCE
        );
    }

    #[rstest]
    #[case(None, NEUTRAL_SCORE)]
    #[case(Some(5.0), 1.0)]
    #[case(Some(2.5), 0.5)]
    #[case(Some(0.0), 0.0)]
    fn rating_scenarios(#[case] rating: Option<f32>, #[case] expected: f32) {
        assert!((cleaner_rating_score(rating) - expected).abs() <= TOLERANCE);
    }

    #[test]
    fn availability_is_a_dichotomy() {
        assert_eq!(availability_score(true), 1.0);
        assert_eq!(availability_score(false), UNAVAILABLE_SCORE);
    }

    #[rstest]
    #[case(None, Some(BudgetRange { min: 20, max: 40 }), NEUTRAL_SCORE)]
    #[case(Some(30), None, NEUTRAL_SCORE)]
    #[case(Some(30), Some(BudgetRange { min: 20, max: 40 }), 1.0)]
    #[case(Some(40), Some(BudgetRange { min: 20, max: 40 }), 1.0)]
    #[case(Some(10), Some(BudgetRange { min: 20, max: 40 }), UNDER_BUDGET_SCORE)]
    #[case(Some(50), Some(BudgetRange { min: 20, max: 40 }), 0.5)] // 25% over, doubled
    #[case(Some(100), Some(BudgetRange { min: 20, max: 40 }), 0.0)] // penalty floors at zero
    fn price_match_scenarios(
        #[case] rate: Option<u32>,
        #[case] budget: Option<BudgetRange>,
        #[case] expected: f32,
    ) {
        assert!((price_match_score(rate, budget) - expected).abs() <= TOLERANCE);
    }
}
