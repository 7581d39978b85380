//! Input checks run by the handlers before any storage access.

use api_types::{
    CreateWorkspaceRequest, ListWorkspacesQuery, SearchWorkspacesQuery, SubmitReportRequest,
    VenueType,
};
use thiserror::Error;

use crate::geo::Coordinates;

pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;
pub const MAX_SEARCH_LIMIT: i64 = 20;
pub const MAX_SEARCH_QUERY_CHARS: usize = 100;
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_ADDRESS_CHARS: usize = 200;
pub const MAX_NOTES_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyFilter {
    pub center: Coordinates,
    pub radius_km: f64,
}

/// A validated workspace listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceListing {
    /// `None` lists newest workspaces first instead of nearest.
    pub nearby: Option<NearbyFilter>,
    pub venue_types: Vec<VenueType>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSearch {
    pub query: String,
    pub limit: i64,
}

pub fn validate_listing(query: ListWorkspacesQuery) -> Result<WorkspaceListing, ValidationError> {
    let radius_km = query.radius.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(ValidationError::new(
            "radius",
            "must be a positive number of kilometres",
        ));
    }

    let nearby = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => {
            check_latitude(latitude)?;
            check_longitude(longitude)?;
            Some(NearbyFilter {
                center: Coordinates::new(latitude, longitude),
                radius_km,
            })
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(ValidationError::new(
                "longitude",
                "must be provided together with latitude",
            ));
        }
        (None, Some(_)) => {
            return Err(ValidationError::new(
                "latitude",
                "must be provided together with longitude",
            ));
        }
    };

    let limit = check_limit(query.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)?;
    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(ValidationError::new("offset", "must not be negative"));
    }

    let mut venue_types = query.venue_types;
    venue_types.sort_by_key(|venue_type| venue_type.as_str());
    venue_types.dedup();

    Ok(WorkspaceListing {
        nearby,
        venue_types,
        limit,
        offset,
    })
}

pub fn validate_search(query: SearchWorkspacesQuery) -> Result<WorkspaceSearch, ValidationError> {
    if query.query.trim().is_empty() {
        return Err(ValidationError::new("query", "must not be empty"));
    }
    if query.query.chars().count() > MAX_SEARCH_QUERY_CHARS {
        return Err(ValidationError::new(
            "query",
            format!("must be at most {MAX_SEARCH_QUERY_CHARS} characters"),
        ));
    }
    let limit = check_limit(query.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT)?;

    Ok(WorkspaceSearch {
        query: query.query,
        limit,
    })
}

pub fn validate_create_workspace(request: &CreateWorkspaceRequest) -> Result<(), ValidationError> {
    check_text("name", &request.name, MAX_NAME_CHARS)?;
    check_text("address", &request.address, MAX_ADDRESS_CHARS)?;
    check_latitude(request.latitude)?;
    check_longitude(request.longitude)?;
    Ok(())
}

pub fn validate_report(request: &SubmitReportRequest) -> Result<(), ValidationError> {
    if let Some(speed) = request.wifi_speed
        && (!speed.is_finite() || speed < 0.0)
    {
        return Err(ValidationError::new(
            "wifiSpeed",
            "must be a non-negative number of Mbps",
        ));
    }
    if let Some(notes) = &request.notes
        && notes.chars().count() > MAX_NOTES_CHARS
    {
        return Err(ValidationError::new(
            "notes",
            format!("must be at most {MAX_NOTES_CHARS} characters"),
        ));
    }
    Ok(())
}

fn check_latitude(latitude: f64) -> Result<(), ValidationError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::new("latitude", "must be between -90 and 90"));
    }
    Ok(())
}

fn check_longitude(longitude: f64) -> Result<(), ValidationError> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::new(
            "longitude",
            "must be between -180 and 180",
        ));
    }
    Ok(())
}

fn check_limit(limit: Option<i64>, default: i64, max: i64) -> Result<i64, ValidationError> {
    let limit = limit.unwrap_or(default);
    if !(1..=max).contains(&limit) {
        return Err(ValidationError::new(
            "limit",
            format!("must be between 1 and {max}"),
        ));
    }
    Ok(limit)
}

fn check_text(field: &'static str, value: &str, max_chars: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use api_types::{Amenities, Level};
    use uuid::Uuid;

    use super::*;

    fn create_request(latitude: f64, longitude: f64) -> CreateWorkspaceRequest {
        CreateWorkspaceRequest {
            name: "Central Library".to_string(),
            address: "455 Fifth Ave".to_string(),
            latitude,
            longitude,
            venue_type: VenueType::Library,
            amenities: Amenities::default(),
        }
    }

    fn report_request(wifi_speed: Option<f64>, notes: Option<String>) -> SubmitReportRequest {
        SubmitReportRequest {
            workspace_id: Uuid::new_v4(),
            crowd_level: Level::Moderate,
            noise_level: Level::Low,
            wifi_speed,
            notes,
        }
    }

    #[test]
    fn test_listing_defaults() {
        let listing = validate_listing(ListWorkspacesQuery::default()).unwrap();
        assert_eq!(listing.nearby, None);
        assert_eq!(listing.limit, DEFAULT_LIST_LIMIT);
        assert_eq!(listing.offset, 0);
        assert!(listing.venue_types.is_empty());
    }

    #[test]
    fn test_listing_with_center_uses_default_radius() {
        let listing = validate_listing(ListWorkspacesQuery {
            latitude: Some(40.7128),
            longitude: Some(-74.006),
            ..Default::default()
        })
        .unwrap();
        let nearby = listing.nearby.unwrap();
        assert_eq!(nearby.radius_km, DEFAULT_RADIUS_KM);
        assert_eq!(nearby.center, Coordinates::new(40.7128, -74.006));
    }

    #[test]
    fn test_listing_requires_both_coordinates() {
        let err = validate_listing(ListWorkspacesQuery {
            latitude: Some(40.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "longitude");

        let err = validate_listing(ListWorkspacesQuery {
            longitude: Some(-74.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "latitude");
    }

    #[test]
    fn test_listing_rejects_bad_bounds() {
        let cases = [
            ListWorkspacesQuery {
                limit: Some(0),
                ..Default::default()
            },
            ListWorkspacesQuery {
                limit: Some(101),
                ..Default::default()
            },
            ListWorkspacesQuery {
                offset: Some(-1),
                ..Default::default()
            },
            ListWorkspacesQuery {
                radius: Some(0.0),
                ..Default::default()
            },
            ListWorkspacesQuery {
                radius: Some(f64::NAN),
                ..Default::default()
            },
            ListWorkspacesQuery {
                latitude: Some(95.0),
                longitude: Some(0.0),
                ..Default::default()
            },
        ];
        for query in cases {
            assert!(validate_listing(query.clone()).is_err(), "{query:?} passed");
        }
    }

    #[test]
    fn test_listing_deduplicates_venue_types() {
        let listing = validate_listing(ListWorkspacesQuery {
            venue_types: vec![VenueType::Library, VenueType::Cafe, VenueType::Library],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(listing.venue_types, vec![VenueType::Cafe, VenueType::Library]);
    }

    #[test]
    fn test_search_limits() {
        let search = validate_search(SearchWorkspacesQuery {
            query: "coffee".to_string(),
            limit: None,
        })
        .unwrap();
        assert_eq!(search.limit, DEFAULT_SEARCH_LIMIT);

        assert!(
            validate_search(SearchWorkspacesQuery {
                query: "coffee".to_string(),
                limit: Some(21),
            })
            .is_err()
        );
        assert!(
            validate_search(SearchWorkspacesQuery {
                query: "   ".to_string(),
                limit: None,
            })
            .is_err()
        );
    }

    #[test]
    fn test_create_workspace_rejects_latitude_out_of_range() {
        let err = validate_create_workspace(&create_request(91.0, 0.0)).unwrap_err();
        assert_eq!(err.field, "latitude");
        let err = validate_create_workspace(&create_request(0.0, -180.5)).unwrap_err();
        assert_eq!(err.field, "longitude");
        assert!(validate_create_workspace(&create_request(90.0, -180.0)).is_ok());
    }

    #[test]
    fn test_create_workspace_checks_text_lengths() {
        let mut request = create_request(0.0, 0.0);
        request.name = "x".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(validate_create_workspace(&request).unwrap_err().field, "name");

        let mut request = create_request(0.0, 0.0);
        request.address = String::new();
        assert_eq!(
            validate_create_workspace(&request).unwrap_err().field,
            "address"
        );
    }

    #[test]
    fn test_report_checks() {
        assert!(validate_report(&report_request(Some(42.5), Some("quiet".into()))).is_ok());
        assert!(validate_report(&report_request(Some(-1.0), None)).is_err());
        assert!(validate_report(&report_request(None, Some("é".repeat(MAX_NOTES_CHARS)))).is_ok());
        assert!(
            validate_report(&report_request(None, Some("a".repeat(MAX_NOTES_CHARS + 1)))).is_err()
        );
    }
}
