//! Geolocation ranking for physical dispensaries

mod directory;

pub use directory::kendra_directory;

use crate::error::{MedInfoError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A Jan Aushadhi kendra (generic-medicine dispensary)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kendra {
    pub name: String,
    pub address: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,

    /// Distance from the request coordinate in km; computed per request,
    /// never persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Nearest-kendra ranking for a request coordinate
#[derive(Debug, Clone, Serialize)]
pub struct NearestKendras {
    pub kendras: Vec<Kendra>,
    pub nearest: Kendra,
}

/// Great-circle distance between two coordinates in km (Haversine)
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rank `list` by distance from `(lat, lng)`, returning the top `k` entries
/// plus the single nearest one.
///
/// A zero latitude or longitude is treated as "unset" and rejected.
/// Distances are rounded to two decimals before sorting.
pub fn nearest(lat: f64, lng: f64, list: &[Kendra], k: usize) -> Result<NearestKendras> {
    if lat == 0.0 || lng == 0.0 {
        return Err(MedInfoError::InvalidInput("invalid coordinates".to_string()));
    }

    let mut ranked: Vec<Kendra> = list
        .iter()
        .cloned()
        .map(|mut kendra| {
            let distance = haversine_km(lat, lng, kendra.lat, kendra.lng);
            kendra.distance = Some((distance * 100.0).round() / 100.0);
            kendra
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });

    let nearest_entry = ranked
        .first()
        .cloned()
        .ok_or_else(|| MedInfoError::NotFound("no kendras in the directory".to_string()))?;

    ranked.truncate(k);

    Ok(NearestKendras {
        kendras: ranked,
        nearest: nearest_entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kendra(name: &str, lat: f64, lng: f64) -> Kendra {
        Kendra {
            name: name.to_string(),
            address: "addr".to_string(),
            city: "city".to_string(),
            lat,
            lng,
            distance: None,
        }
    }

    #[test]
    fn test_origin_is_rejected_regardless_of_list() {
        let list = vec![kendra("a", 28.6, 77.2)];
        assert!(matches!(
            nearest(0.0, 0.0, &list, 10),
            Err(MedInfoError::InvalidInput(_))
        ));
        assert!(matches!(
            nearest(0.0, 0.0, &[], 10),
            Err(MedInfoError::InvalidInput(_))
        ));
        assert!(matches!(
            nearest(0.0, 77.2, &list, 10),
            Err(MedInfoError::InvalidInput(_))
        ));
        assert!(matches!(
            nearest(28.6, 0.0, &list, 10),
            Err(MedInfoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_identical_coordinates_have_zero_distance() {
        let list = vec![kendra("here", 19.1197, 72.8468)];
        let ranked = nearest(19.1197, 72.8468, &list, 10).unwrap();
        assert_eq!(ranked.nearest.distance, Some(0.0));
    }

    #[test]
    fn test_ranking_is_ascending_and_truncated() {
        let list = vec![
            kendra("far", 13.0446, 80.2337),
            kendra("near", 28.7, 77.3),
            kendra("mid", 22.5867, 88.4172),
        ];
        let ranked = nearest(28.6315, 77.2167, &list, 2).unwrap();

        assert_eq!(ranked.kendras.len(), 2);
        assert_eq!(ranked.kendras[0].name, "near");
        assert_eq!(ranked.nearest.name, "near");
        assert!(ranked.kendras[0].distance <= ranked.kendras[1].distance);
    }

    #[test]
    fn test_empty_directory_is_not_found() {
        assert!(matches!(
            nearest(28.6, 77.2, &[], 10),
            Err(MedInfoError::NotFound(_))
        ));
    }

    #[test]
    fn test_known_distance_delhi_to_mumbai() {
        // Connaught Place to Andheri, roughly 1160 km
        let d = haversine_km(28.6315, 77.2167, 19.1197, 72.8468);
        assert!((1100.0..1250.0).contains(&d), "got {}", d);
    }
}
