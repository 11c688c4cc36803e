use serde::Deserialize;
use crate::errors::ConfigError;

// Largest radius accepted by the position API, nautical miles
pub const MAX_RADIUS_NM: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn validate(&self, what: &str) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConfigError::Invalid(format!("{} latitude {} is outside [-90, 90]", what, self.latitude)));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::Invalid(format!("{} longitude {} is outside [-180, 180]", what, self.longitude)));
        }
        Ok(())
    }
}

/// A fixed search area. Only constructible through `Location::new`, so the
/// radius is always positive and within the API limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    centre: GeoPosition,
    radius_nm: f64
}

impl Location {
    pub fn new(name: &str, latitude: f64, longitude: f64, radius_nm: f64) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("location name must not be blank".to_string()));
        }

        let centre = GeoPosition::new(latitude, longitude);
        centre.validate(&format!("location \"{}\"", name))?;

        if !(radius_nm > 0.0 && radius_nm <= MAX_RADIUS_NM) {
            return Err(ConfigError::Invalid(format!(
                "location \"{}\" radius {} nm must be in (0, {}]", name, radius_nm, MAX_RADIUS_NM)));
        }

        Ok(Self { name: name.to_string(), centre, radius_nm })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn centre(&self) -> GeoPosition { self.centre }
    pub fn radius_nm(&self) -> f64 { self.radius_nm }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_location() {
        let loc = Location::new("  Austin ", 30.3, -97.7, 50.0).unwrap();
        assert_eq!(loc.name(), "Austin");
        assert_eq!(loc.centre(), GeoPosition::new(30.3, -97.7));
        assert_eq!(loc.radius_nm(), 50.0);
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(Location::new("Austin", 30.3, -97.7, 0.0).is_err());
        assert!(Location::new("Austin", 30.3, -97.7, -5.0).is_err());
        assert!(Location::new("Austin", 30.3, -97.7, 251.0).is_err());
        assert!(Location::new("Austin", 30.3, -97.7, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        assert!(Location::new("North", 91.0, 0.0, 10.0).is_err());
        assert!(Location::new("East", 0.0, 180.5, 10.0).is_err());
        assert!(Location::new("   ", 0.0, 0.0, 10.0).is_err());
    }
}
