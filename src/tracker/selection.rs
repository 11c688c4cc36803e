use crate::data::aircraft::AircraftObservation;
use crate::data::geography::GeoPosition;
use crate::geo::coords::haversine_km;

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub aircraft: AircraftObservation,
    pub distance_km: f64
}

/// Picks the aircraft closest to `home`. On equal distances the earlier
/// observation wins, so the result only depends on input order.
pub fn select(observations: &[AircraftObservation], home: &GeoPosition) -> Option<Selection> {
    observations.iter()
        .map(|a| (a, haversine_km(home, &a.position)))
        .fold(None, |best: Option<(&AircraftObservation, f64)>, (a, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((a, d))
        })
        .map(|(a, d)| Selection { aircraft: a.clone(), distance_km: d })
}
