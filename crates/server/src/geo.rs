//! Great-circle distance helpers for proximity search.

/// Mean Earth radius used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Spherical law of cosines distance in kilometres.
///
/// The cosine term is clamped to [-1, 1] so rounding on (near-)identical points yields 0
/// rather than NaN. The SQL proximity query applies the same clamp.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_lambda = b.longitude.to_radians() - a.longitude.to_radians();

    let cosine = phi1.cos() * phi2.cos() * delta_lambda.cos() + phi1.sin() * phi2.sin();
    EARTH_RADIUS_KM * cosine.clamp(-1.0, 1.0).acos()
}

/// Latitude/longitude box containing every point within a radius of a center.
///
/// Used to narrow the candidate rows with an index before the exact distance check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    // Keeps points sitting exactly on the radius inside the box despite rounding.
    const PADDING_DEGREES: f64 = 1e-6;

    pub fn around(center: Coordinates, radius_km: f64) -> Self {
        let angular_radius = radius_km / EARTH_RADIUS_KM;
        let lat_delta = angular_radius.to_degrees() + Self::PADDING_DEGREES;

        let min_latitude = center.latitude - lat_delta;
        let max_latitude = center.latitude + lat_delta;

        // A circle reaching a pole covers every meridian.
        if min_latitude <= -90.0
            || max_latitude >= 90.0
            || angular_radius >= std::f64::consts::FRAC_PI_2
        {
            return Self {
                min_latitude: min_latitude.max(-90.0),
                max_latitude: max_latitude.min(90.0),
                min_longitude: -180.0,
                max_longitude: 180.0,
            };
        }

        let lng_delta = (angular_radius.sin() / center.latitude.to_radians().cos())
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees()
            + Self::PADDING_DEGREES;

        let min_longitude = center.longitude - lng_delta;
        let max_longitude = center.longitude + lng_delta;

        // A circle crossing the antimeridian widens to every longitude.
        if min_longitude < -180.0 || max_longitude > 180.0 {
            return Self {
                min_latitude,
                max_latitude,
                min_longitude: -180.0,
                max_longitude: 180.0,
            };
        }

        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}
