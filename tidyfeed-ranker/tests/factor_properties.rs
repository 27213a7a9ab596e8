//! Property-based tests for the factor sub-scores.
//!
//! These tests use `proptest` to assert the invariants that must hold
//! for all inputs, complementing the pinned-constant unit tests.
//!
//! # Invariants tested
//!
//! - **Clamping:** every sub-score lies in `0.0..=1.0` for any input.
//! - **Proximity monotonicity:** closer cleaners never score lower.
//! - **Availability dichotomy:** exactly two possible values.

use std::collections::BTreeSet;

use geo::Coord;
use proptest::prelude::*;
use tidyfeed_core::BudgetRange;
use tidyfeed_ranker::{
    availability_score, cleaner_rating_score, engagement_score, personal_interaction_score,
    price_match_score, proximity_score, service_relevance_score,
};

fn coord_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..=180.0, -90.0_f64..=90.0).prop_map(|(x, y)| Coord { x, y })
}

fn in_unit_range(score: f32) -> bool {
    score.is_finite() && (0.0..=1.0).contains(&score)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn proximity_stays_in_unit_range(
        viewer in proptest::option::of(coord_strategy()),
        cleaner in proptest::option::of(coord_strategy()),
    ) {
        prop_assert!(in_unit_range(proximity_score(viewer, cleaner)));
    }

    #[test]
    fn proximity_never_rewards_the_farther_cleaner(
        viewer in coord_strategy(),
        near_km in 0.0_f64..=25.0,
        extra_km in 0.1_f64..=200.0,
    ) {
        let near = Coord { x: viewer.x, y: (viewer.y + near_km / 111.195).clamp(-90.0, 90.0) };
        let far = Coord { x: viewer.x, y: (viewer.y + (near_km + extra_km) / 111.195).clamp(-90.0, 90.0) };
        let near_score = proximity_score(Some(viewer), Some(near));
        let far_score = proximity_score(Some(viewer), Some(far));
        prop_assert!(near_score >= far_score);
    }

    #[test]
    fn engagement_stays_in_unit_range(
        views in any::<u64>(),
        likes in any::<u64>(),
        comments in any::<u64>(),
    ) {
        prop_assert!(in_unit_range(engagement_score(views, likes, comments)));
    }

    #[test]
    fn rating_stays_in_unit_range(rating in proptest::option::of(-10.0_f32..=10.0)) {
        prop_assert!(in_unit_range(cleaner_rating_score(rating)));
    }

    #[test]
    fn interaction_stays_in_unit_range(interacted in any::<bool>()) {
        prop_assert!(in_unit_range(personal_interaction_score(None, interacted)));
    }

    #[test]
    fn availability_takes_exactly_two_values(available in any::<bool>()) {
        let score = availability_score(available);
        prop_assert!(score == 1.0 || score == 0.3);
    }

    #[test]
    fn service_relevance_stays_in_unit_range(
        specialties in proptest::collection::btree_set("[a-z]{1,8}", 0..6),
        preferred in proptest::collection::vec("[a-z]{1,8}", 0..4),
    ) {
        let specialties: BTreeSet<String> = specialties;
        prop_assert!(in_unit_range(service_relevance_score(&specialties, &preferred)));
    }

    #[test]
    fn price_match_stays_in_unit_range(
        rate in proptest::option::of(0_u32..=10_000),
        bounds in proptest::option::of((0_u32..=5_000, 0_u32..=5_000)),
    ) {
        let budget = bounds.map(|(a, b)| BudgetRange { min: a.min(b), max: a.max(b) });
        prop_assert!(in_unit_range(price_match_score(rate, budget)));
    }
}
