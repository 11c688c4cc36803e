use crate::data::geography::GeoPosition;

const EARTH_RADIUS_KM: f64 = 6371.0;

const KM_TO_MILES: f64 = 0.621371;
const KNOTS_TO_MPH: f64 = 1.15078;

/// Great-circle distance in kilometres (haversine)
pub fn haversine_km(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let (phi1, phi2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn km_to_miles(km: f64) -> f64 { km * KM_TO_MILES }

pub fn knots_to_mph(knots: f64) -> f64 { knots * KNOTS_TO_MPH }
