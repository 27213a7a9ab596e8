//! Content items and the cleaner profiles joined onto them at read time.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`. Both
//! models are read-only snapshots: stores hydrate them fresh for every
//! ranking call and rankers never write them back.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// How a piece of content is priced when booked directly.
///
/// # Examples
/// ```
/// use tidyfeed_core::PricingModel;
///
/// assert_eq!(PricingModel::Hourly.as_str(), "hourly");
/// assert_eq!("fixed".parse::<PricingModel>(), Ok(PricingModel::Fixed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    /// A single all-in price.
    Fixed,
    /// A non-binding estimate finalised after inspection.
    Estimate,
    /// Billed per hour worked.
    Hourly,
}

impl PricingModel {
    /// Return the model as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use tidyfeed_core::PricingModel;
    ///
    /// assert_eq!(PricingModel::Estimate.as_str(), "estimate");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Estimate => "estimate",
            Self::Hourly => "hourly",
        }
    }
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PricingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "estimate" => Ok(Self::Estimate),
            "hourly" => Ok(Self::Hourly),
            _ => Err(format!("unknown pricing model '{s}'")),
        }
    }
}

/// Commerce fields attached to directly bookable content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    /// Pricing model the base price is quoted under.
    pub model: PricingModel,
    /// Base price in minor currency units (e.g. cents).
    pub base_price: u32,
    /// Estimated duration of the job in hours, when quoted.
    pub estimated_hours: Option<f32>,
}

/// Public profile of the cleaner who owns a piece of content.
///
/// Optional fields degrade scoring to documented neutral values rather
/// than failing a ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanerProfile {
    /// Unique cleaner identifier.
    pub id: String,
    /// Name shown on cards and overlays.
    pub display_name: String,
    /// Avatar image reference, when uploaded.
    pub avatar_url: Option<String>,
    /// Mean review rating on a 0–5 scale, absent for new cleaners.
    pub rating_average: Option<f32>,
    /// Completed job count.
    pub completed_jobs: u32,
    /// Advertised hourly rate in whole currency units.
    pub hourly_rate: Option<u32>,
    /// Whether the cleaner currently accepts bookings.
    pub available: bool,
    /// Base location, absent when the cleaner has not shared one.
    pub location: Option<Coord<f64>>,
    /// Service specialty tags, e.g. `deep_clean` or `move_out`.
    pub specialties: BTreeSet<String>,
    /// Distance from the viewer in kilometres, populated only when the
    /// ranking call supplied a viewer location.
    pub distance_km: Option<f64>,
}

impl CleanerProfile {
    /// Construct a minimal profile with every optional field unset.
    ///
    /// # Examples
    /// ```
    /// use tidyfeed_core::CleanerProfile;
    ///
    /// let cleaner = CleanerProfile::new("c-1", "Dana");
    /// assert!(cleaner.available);
    /// assert!(cleaner.location.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: None,
            rating_average: None,
            completed_jobs: 0,
            hourly_rate: None,
            available: true,
            location: None,
            specialties: BTreeSet::new(),
            distance_km: None,
        }
    }

    /// Set the base location while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Add a specialty tag while returning `self` for chaining.
    #[must_use]
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialties.insert(specialty.into());
        self
    }
}

/// A single piece of viewable, optionally bookable cleaner content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique content identifier.
    pub id: String,
    /// Identifier of the owning cleaner; matches `cleaner.id`.
    pub cleaner_id: String,
    /// Card title.
    pub title: String,
    /// Longer description, when provided.
    pub description: Option<String>,
    /// Playable media reference.
    pub media_url: String,
    /// Preview image reference.
    pub thumbnail_url: Option<String>,
    /// Commerce fields, present only for priced content.
    pub pricing: Option<PriceInfo>,
    /// Whether the content can be booked directly from the feed.
    pub bookable: bool,
    /// Total recorded views.
    pub view_count: u64,
    /// Total recorded likes.
    pub like_count: u64,
    /// Total recorded comments.
    pub comment_count: u64,
    /// Creation timestamp, drives recency scoring.
    pub created_at: DateTime<Utc>,
    /// Owning cleaner's profile, joined at read time.
    pub cleaner: CleanerProfile,
}

impl ContentItem {
    /// Construct an item with empty engagement counters and no commerce
    /// fields.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use tidyfeed_core::{CleanerProfile, ContentItem};
    ///
    /// let item = ContentItem::new("post-1", CleanerProfile::new("c-1", "Dana"), Utc::now());
    /// assert_eq!(item.cleaner_id, "c-1");
    /// assert_eq!(item.view_count, 0);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, cleaner: CleanerProfile, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            cleaner_id: cleaner.id.clone(),
            title: String::new(),
            description: None,
            media_url: String::new(),
            thumbnail_url: None,
            pricing: None,
            bookable: false,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            created_at,
            cleaner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(PricingModel::Hourly.to_string(), PricingModel::Hourly.as_str());
    }

    #[test]
    fn parsing_rejects_unknown_model() {
        let err = PricingModel::from_str("auction").unwrap_err();
        assert!(err.contains("unknown pricing model"));
    }

    #[test]
    fn new_item_mirrors_cleaner_id() {
        let item = ContentItem::new("p-1", CleanerProfile::new("c-9", "Ana"), Utc::now());
        assert_eq!(item.cleaner_id, item.cleaner.id);
    }

    #[test]
    fn specialties_deduplicate() {
        let cleaner = CleanerProfile::new("c-1", "Dana")
            .with_specialty("deep_clean")
            .with_specialty("deep_clean");
        assert_eq!(cleaner.specialties.len(), 1);
    }
}
