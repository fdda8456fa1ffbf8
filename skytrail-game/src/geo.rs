//! Geospatial primitives: airport locations, WGS-84 geodesic distance,
//! and the nearest-airport-per-country reduction that drives reachability.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

// WGS-84 ellipsoid, kilometres.
const WGS84_A_KM: f64 = 6_378.137;
const WGS84_B_KM: f64 = 6_356.752_314_245;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
// Mean Earth radius for the spherical fallback.
const EARTH_RADIUS_KM: f64 = 6_371.008_8;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_CONVERGENCE: f64 = 1e-12;

/// One airport record from the geographic collaborator.
///
/// Immutable once loaded; game state references it by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique airport code (ICAO ident).
    pub ident: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub iso_country: String,
    #[serde(default)]
    pub municipality: Option<String>,
}

/// Geodesic distance between two locations in kilometres.
///
/// Uses the WGS-84 inverse problem (Vincenty's iteration) and falls back
/// to the spherical great-circle formula for the rare near-antipodal pairs
/// where the iteration fails to converge.
#[must_use]
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    vincenty_km(a.lat, a.lon, b.lat, b.lon)
        .unwrap_or_else(|| haversine_km(a.lat, a.lon, b.lat, b.lon))
}

fn vincenty_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Option<f64> {
    let u1 = ((1.0 - WGS84_F) * lat1.to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * lat2.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();
    let l = (lon2 - lon1).to_radians();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // Coincident points.
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            // Equatorial line.
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_next = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (2.0 * cos_2sigma_m * cos_2sigma_m - 1.0)));
        if (lambda_next - lambda).abs() < VINCENTY_CONVERGENCE {
            let u_sq = cos_sq_alpha * (WGS84_A_KM * WGS84_A_KM - WGS84_B_KM * WGS84_B_KM)
                / (WGS84_B_KM * WGS84_B_KM);
            let a_term =
                1.0 + u_sq / 16_384.0 * (4_096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let b_term = u_sq / 1_024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = b_term
                * sin_sigma
                * (cos_2sigma_m
                    + b_term / 4.0
                        * (cos_sigma * (2.0 * cos_2sigma_m * cos_2sigma_m - 1.0)
                            - b_term / 6.0
                                * cos_2sigma_m
                                * (4.0 * sin_sigma * sin_sigma - 3.0)
                                * (4.0 * cos_2sigma_m * cos_2sigma_m - 3.0)));
            return Some(WGS84_B_KM * a_term * (sigma - delta_sigma));
        }
        lambda = lambda_next;
    }
    None
}

fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// The closest in-range airport of one foreign country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestAirport {
    pub iso_country: String,
    pub ident: String,
    pub distance_km: f64,
}

/// Reduce a candidate set to the nearest airport per foreign country.
///
/// Candidates in `exclude_country`, with non-finite coordinates, or beyond
/// `max_range_km` are dropped. Within a country the minimum-distance
/// airport wins, with ties broken by ident; the result is sorted ascending
/// by `(distance, ident)` so the ordering is fully deterministic.
#[must_use]
pub fn nearest_per_country(
    origin: &Location,
    candidates: &[Location],
    exclude_country: &str,
    max_range_km: f64,
) -> Vec<NearestAirport> {
    let mut best_by_country: HashMap<&str, (f64, &Location)> = HashMap::new();
    for candidate in candidates {
        if candidate.iso_country == exclude_country {
            continue;
        }
        let distance = distance_km(origin, candidate);
        if !distance.is_finite() || distance > max_range_km {
            continue;
        }
        match best_by_country.get(candidate.iso_country.as_str()) {
            Some((best_distance, best)) => {
                let closer = match distance.total_cmp(best_distance) {
                    Ordering::Less => true,
                    Ordering::Equal => candidate.ident < best.ident,
                    Ordering::Greater => false,
                };
                if closer {
                    best_by_country.insert(candidate.iso_country.as_str(), (distance, candidate));
                }
            }
            None => {
                best_by_country.insert(candidate.iso_country.as_str(), (distance, candidate));
            }
        }
    }

    let mut results: Vec<NearestAirport> = best_by_country
        .into_values()
        .map(|(distance, location)| NearestAirport {
            iso_country: location.iso_country.clone(),
            ident: location.ident.clone(),
            distance_km: distance,
        })
        .collect();
    results.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.ident.cmp(&b.ident))
    });
    results
}
