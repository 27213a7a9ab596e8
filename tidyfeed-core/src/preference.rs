//! Caller intent for how the feed should be ordered.
//!
//! The enum offers compile-time safety for weight-table lookups while
//! staying forgiving at the API boundary: unknown query values fall back
//! to [`SortPreference::Balanced`] instead of erroring.
//!
//! # Examples
//! ```
//! use tidyfeed_core::SortPreference;
//!
//! assert_eq!(SortPreference::Proximity.as_str(), "proximity");
//! assert_eq!(SortPreference::parse_or_default("nonsense"), SortPreference::Balanced);
//! ```

use serde::{Deserialize, Serialize};

/// Named weighting intent selected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPreference {
    /// Even spread across all ranking factors.
    #[default]
    Balanced,
    /// Favour cleaners close to the viewer.
    Proximity,
    /// Favour content with high like and comment rates.
    Engagement,
    /// Favour cleaners whose rates fit the viewer's budget.
    Price,
}

impl SortPreference {
    /// Return the preference as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use tidyfeed_core::SortPreference;
    ///
    /// assert_eq!(SortPreference::Engagement.as_str(), "engagement");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Proximity => "proximity",
            Self::Engagement => "engagement",
            Self::Price => "price",
        }
    }

    /// Parse caller input, falling back to [`Self::Balanced`] for anything
    /// unrecognised.
    ///
    /// # Examples
    /// ```
    /// use tidyfeed_core::SortPreference;
    ///
    /// assert_eq!(SortPreference::parse_or_default("price"), SortPreference::Price);
    /// assert_eq!(SortPreference::parse_or_default(""), SortPreference::Balanced);
    /// ```
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for SortPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "proximity" => Ok(Self::Proximity),
            "engagement" => Ok(Self::Engagement),
            "price" => Ok(Self::Price),
            _ => Err(format!("unknown sort preference '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(SortPreference::Price.to_string(), SortPreference::Price.as_str());
    }

    #[rstest]
    #[case("balanced", SortPreference::Balanced)]
    #[case("PROXIMITY", SortPreference::Proximity)]
    #[case("engagement", SortPreference::Engagement)]
    #[case("price", SortPreference::Price)]
    fn parses_known_values(#[case] input: &str, #[case] expected: SortPreference) {
        assert_eq!(SortPreference::from_str(input), Ok(expected));
    }

    #[rstest]
    #[case("trending")]
    #[case("")]
    fn unknown_values_default_to_balanced(#[case] input: &str) {
        assert!(SortPreference::from_str(input).is_err());
        assert_eq!(SortPreference::parse_or_default(input), SortPreference::Balanced);
    }
}
