use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use ts_rs::TS;
use uuid::Uuid;

use crate::{Report, ReportAverages};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, TS)]
#[sqlx(type_name = "venue_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Cafe,
    Library,
    Coworking,
    Other,
}

impl VenueType {
    pub fn as_str(self) -> &'static str {
        match self {
            VenueType::Cafe => "cafe",
            VenueType::Library => "library",
            VenueType::Coworking => "coworking",
            VenueType::Other => "other",
        }
    }
}

/// Facilities a venue offers. Flags missing from the payload are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
pub struct Amenities {
    pub wifi: bool,
    pub power_outlets: bool,
    pub quiet_environment: bool,
    pub coffee: bool,
    pub food: bool,
    pub outdoor_seating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub venue_type: VenueType,
    #[sqlx(json)]
    pub amenities: Amenities,
    pub created_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A workspace together with its recent reports and the viewer's favorite status.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WorkspaceDetail {
    #[serde(flatten)]
    pub workspace: Workspace,
    pub reports: Vec<Report>,
    pub averages: Option<ReportAverages>,
    pub is_favorited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub venue_type: VenueType,
    #[serde(default)]
    pub amenities: Amenities,
}

/// Query string of the workspace listing.
///
/// `latitude` and `longitude` switch the listing to a proximity search; without them the
/// newest workspaces come first. `venueTypes` may be repeated to match any of several types.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkspacesQuery {
    #[ts(optional)]
    pub latitude: Option<f64>,
    #[ts(optional)]
    pub longitude: Option<f64>,
    /// Search radius in kilometres.
    #[ts(optional)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub venue_types: Vec<VenueType>,
    #[ts(optional)]
    pub limit: Option<i64>,
    #[ts(optional)]
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct SearchWorkspacesQuery {
    pub query: String,
    #[ts(optional)]
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workspace() -> Workspace {
        let now = Utc::now();
        Workspace {
            id: Uuid::new_v4(),
            name: "Coastal Coffee Shop".to_string(),
            address: "1 Harbor Rd".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
            venue_type: VenueType::Cafe,
            amenities: Amenities {
                wifi: true,
                ..Amenities::default()
            },
            created_by_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_missing_amenity_flags_default_to_false() {
        let amenities: Amenities =
            serde_json::from_value(serde_json::json!({ "wifi": true, "coffee": true })).unwrap();
        assert!(amenities.wifi);
        assert!(amenities.coffee);
        assert!(!amenities.power_outlets);
        assert!(!amenities.outdoor_seating);
    }

    #[test]
    fn test_unknown_venue_type_is_rejected() {
        assert!(serde_json::from_str::<VenueType>("\"bar\"").is_err());
        assert_eq!(
            serde_json::from_str::<VenueType>("\"coworking\"").unwrap(),
            VenueType::Coworking
        );
    }

    #[test]
    fn test_detail_flattens_workspace_fields() {
        let detail = WorkspaceDetail {
            workspace: sample_workspace(),
            reports: vec![],
            averages: None,
            is_favorited: false,
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["name"], "Coastal Coffee Shop");
        assert_eq!(value["venueType"], "cafe");
        assert_eq!(value["amenities"]["powerOutlets"], false);
        assert_eq!(value["isFavorited"], false);
        assert!(value["averages"].is_null());
        assert!(value.get("workspace").is_none());
    }
}
