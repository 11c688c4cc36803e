use crate::data::geography::Location;

pub const DEFAULT_AIRCRAFT_API: &str = "https://api.adsb.lol/v2";
pub const DEFAULT_ROUTE_API: &str = "https://api.adsbdb.com/v0";
pub const DEFAULT_LOGO_API: &str = "https://logo.clearbit.com";

/// Builds request URLs for the three remote services
#[derive(Debug, Clone)]
pub struct SourceProvider {
    aircraft_base: String,
    route_base: String,
    logo_base: String
}

impl SourceProvider {
    pub fn new(aircraft_base: &str, route_base: &str, logo_base: &str) -> Self {
        Self {
            aircraft_base: trim_base(aircraft_base),
            route_base: trim_base(route_base),
            logo_base: trim_base(logo_base)
        }
    }

    pub fn source_point(&self, location: &Location) -> String {
        let centre = location.centre();
        format!("{}/point/{}/{}/{}", self.aircraft_base, centre.latitude, centre.longitude, location.radius_nm())
    }

    pub fn source_callsign(&self, callsign: &str) -> String {
        format!("{}/callsign/{}", self.route_base, callsign)
    }

    pub fn source_logo(&self, domain: &str) -> String {
        format!("{}/{}", self.logo_base, domain)
    }
}

impl Default for SourceProvider {
    fn default() -> Self {
        Self::new(DEFAULT_AIRCRAFT_API, DEFAULT_ROUTE_API, DEFAULT_LOGO_API)
    }
}

fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
