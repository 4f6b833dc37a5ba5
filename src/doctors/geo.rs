//! Geographic helpers for the doctor finder

use std::str::FromStr;

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse `lat` and `lng` query values; both must be valid coordinates
    pub fn from_parts(lat: Option<&str>, lng: Option<&str>) -> Option<Self> {
        let lat: f64 = lat?.trim().parse().ok()?;
        let lng: f64 = lng?.trim().parse().ok()?;
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

impl FromStr for GeoPoint {
    type Err = String;

    /// Parse `"lat,lng"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG, got {:?}", s))?;
        GeoPoint::from_parts(Some(lat), Some(lng)).ok_or_else(|| format!("invalid coordinates {:?}", s))
    }
}

/// Great-circle distance in km, rounded to two decimals
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_KM * c * 100.0).round() / 100.0
}

/// Maps SDK bootstrap script for the given API key
pub fn maps_script_url(api_key: &str) -> String {
    format!(
        "https://maps.googleapis.com/maps/api/js?key={}&callback=initMap",
        urlencoding::encode(api_key)
    )
}

/// Driving directions link to `destination`, from `origin` when known
pub fn directions_url(origin: Option<GeoPoint>, destination: GeoPoint) -> String {
    let mut url = format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}&travelmode=driving",
        destination.lat, destination.lng
    );
    if let Some(o) = origin {
        url.push_str(&format!("&origin={},{}", o.lat, o.lng));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // Mumbai to Pune is roughly 120 km
        let mumbai = GeoPoint::new(19.0760, 72.8777);
        let pune = GeoPoint::new(18.5204, 73.8567);
        let d = haversine_km(mumbai, pune);
        assert!((115.0..125.0).contains(&d), "got {}", d);
        assert_eq!(haversine_km(mumbai, mumbai), 0.0);
    }

    #[test]
    fn test_parse_point() {
        let p: GeoPoint = "19.07,72.87".parse().unwrap();
        assert_eq!(p, GeoPoint::new(19.07, 72.87));
        assert!("91,0".parse::<GeoPoint>().is_err());
        assert!(GeoPoint::from_parts(Some("1"), None).is_none());
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            maps_script_url("k y"),
            "https://maps.googleapis.com/maps/api/js?key=k%20y&callback=initMap"
        );
        let url = directions_url(Some(GeoPoint::new(1.0, 2.0)), GeoPoint::new(3.0, 4.0));
        assert!(url.contains("destination=3,4"));
        assert!(url.ends_with("&origin=1,2"));
    }
}
