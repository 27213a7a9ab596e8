//! Wire types for the ranked-feed remote procedure.
//!
//! The procedure accepts a flat JSON argument object and answers with an
//! ordered JSON array of rows. Failed calls answer with a JSON error
//! body; both shapes are decoded here so the provider can classify
//! responses without trusting them implicitly.

use serde::{Deserialize, Serialize};
use tidyfeed_core::RankedFeedQuery;

/// JSON argument object posted to the procedure endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RpcArguments {
    /// Viewer latitude in degrees.
    pub latitude: f64,
    /// Viewer longitude in degrees.
    pub longitude: f64,
    /// Search radius in kilometres.
    pub radius_km: f64,
    /// Maximum number of rows to return.
    pub max_results: usize,
    /// Relax cleaner qualification filtering.
    pub include_unverified: bool,
}

impl From<&RankedFeedQuery> for RpcArguments {
    fn from(query: &RankedFeedQuery) -> Self {
        Self {
            latitude: query.latitude,
            longitude: query.longitude,
            radius_km: query.radius_km,
            max_results: query.limit,
            include_unverified: query.include_unverified,
        }
    }
}

/// JSON error body returned by the backend on procedure failures.
///
/// Every field is optional; backends differ in which they populate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct RpcErrorBody {
    /// Backend error code, e.g. `PGRST202`.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable failure description.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidyfeed_core::RankedFeedRow;

    #[test]
    fn arguments_serialise_with_backend_field_names() {
        let query = RankedFeedQuery {
            latitude: 37.7749,
            longitude: -122.4194,
            radius_km: 50.0,
            limit: 20,
            include_unverified: false,
        };
        let json = serde_json::to_value(RpcArguments::from(&query)).expect("serialise arguments");

        assert_eq!(json["latitude"], 37.7749);
        assert_eq!(json["longitude"], -122.4194);
        assert_eq!(json["max_results"], 20);
        assert_eq!(json["include_unverified"], false);
    }

    #[test]
    fn rows_decode_from_a_bare_array() {
        let json = r#"[
            {"content_id": "post-2", "rank_score": 0.91, "distance_km": 1.2},
            {"content_id": "post-7", "rank_score": 0.55}
        ]"#;

        let rows: Vec<RankedFeedRow> = serde_json::from_str(json).expect("decode rows");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].content_id, "post-2");
        assert_eq!(rows[0].distance_km, Some(1.2));
        assert!(rows[1].distance_km.is_none());
    }

    #[test]
    fn error_body_tolerates_partial_fields() {
        let body: RpcErrorBody =
            serde_json::from_str(r#"{"message": "function not found"}"#).expect("decode error");

        assert_eq!(body.message.as_deref(), Some("function not found"));
        assert!(body.code.is_none());
    }
}
