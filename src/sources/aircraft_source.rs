use std::rc::Rc;
use crate::data::aircraft::{AircraftObservation, PointResponse};
use crate::data::geography::Location;
use crate::errors::FetchError;
use crate::sources::httpclient::{self, HttpClient, ACCEPT_JSON};
use crate::sources::sources::SourceProvider;

/// Live aircraft positions around a location
pub struct AircraftSource {
    http: Rc<dyn HttpClient>,
    sources: SourceProvider
}

impl AircraftSource {
    pub fn new(http: Rc<dyn HttpClient>, sources: SourceProvider) -> Self {
        Self { http, sources }
    }

    /// Aircraft currently reported within the location's radius, in the order
    /// the API returned them. An empty Vec is a valid result.
    pub fn fetch(&self, location: &Location) -> Result<Vec<AircraftObservation>, FetchError> {
        let url = self.sources.source_point(location);
        tracing::info!(location = location.name(), %url, "fetching aircraft");

        let response = self.http.get(&url, ACCEPT_JSON)?;
        let body = httpclient::expect_success(&url, response)?;

        let parsed: PointResponse = serde_json::from_slice(&body)
            .map_err(|e| FetchError::Malformed { url: url.clone(), reason: e.to_string() })?;

        let reported = parsed.aircraft.len();
        let observations = parsed.into_observations();
        tracing::debug!(location = location.name(), reported, positioned = observations.len(), "aircraft received");

        Ok(observations)
    }
}
