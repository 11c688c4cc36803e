use serde::Deserialize;
use crate::data::geography::GeoPosition;

/// Barometric altitude as reported by the position API: either feet or a label
/// such as "ground"
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReportedAltitude {
    Feet(f64),
    Label(String)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAircraft {
    #[serde(default)]
    pub hex: String,
    pub flight: Option<String>,             // Callsign, space padded.  Can be absent
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt_baro: Option<ReportedAltitude>,
    pub gs: Option<f64>,                    // Ground speed, knots
    pub r: Option<String>,                  // Registration
    pub t: Option<String>                   // Type designator
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointResponse {
    #[serde(rename = "ac")]
    pub aircraft: Vec<RawAircraft>
}

/// One aircraft seen during a single polling cycle
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftObservation {
    pub icao24: String,
    pub callsign: Option<String>,
    pub position: GeoPosition,
    pub altitude_ft: Option<i32>,
    pub on_ground: bool,
    pub ground_speed_kt: Option<f64>,
    pub registration: Option<String>,
    pub aircraft_type: Option<String>
}

impl RawAircraft {
    /// Reports without a position cannot be ranked by distance and are dropped
    pub fn into_observation(self) -> Option<AircraftObservation> {
        let (lat, lon) = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => (lat, lon),
            _ => return None
        };

        let (altitude_ft, on_ground) = match self.alt_baro {
            Some(ReportedAltitude::Feet(ft)) if ft.is_finite() => (Some(ft.round() as i32), false),
            Some(ReportedAltitude::Label(ref label)) if label.eq_ignore_ascii_case("ground") => (Some(0), true),
            _ => (None, false)
        };

        Some(AircraftObservation {
            icao24: self.hex.trim().to_ascii_lowercase(),
            callsign: non_blank(self.flight),
            position: GeoPosition::new(lat, lon),
            altitude_ft,
            on_ground,
            ground_speed_kt: self.gs.filter(|gs| gs.is_finite() && *gs >= 0.0),
            registration: non_blank(self.r),
            aircraft_type: non_blank(self.t)
        })
    }
}

impl PointResponse {
    pub fn into_observations(self) -> Vec<AircraftObservation> {
        self.aircraft.into_iter()
            .filter_map(RawAircraft::into_observation)
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
