use std::rc::Rc;
use crate::data::flight::{CallsignEnvelope, CallsignResponse, RouteInfo};
use crate::errors::FetchError;
use crate::sources::caching::{cache_key, LookupCache};
use crate::sources::httpclient::{self, HttpClient, ACCEPT_JSON};
use crate::sources::sources::SourceProvider;

/// Airline and route lookup by callsign, cached for the lifetime of the process
pub struct RouteEnricher {
    http: Rc<dyn HttpClient>,
    sources: SourceProvider,
    cache: LookupCache<RouteInfo>
}

impl RouteEnricher {
    pub fn new(http: Rc<dyn HttpClient>, sources: SourceProvider) -> Self {
        Self { http, sources, cache: LookupCache::new() }
    }

    pub fn enrich(&mut self, callsign: &str) -> Option<RouteInfo> {
        let key = cache_key(callsign);
        if key.is_empty() {
            return self.cache.get_or_fetch(&key, || Ok(None));
        }

        let (http, sources) = (&self.http, &self.sources);
        self.cache.get_or_fetch(&key, || {
            let result = lookup(http.as_ref(), sources, &key);
            match &result {
                Ok(Some(_)) => tracing::debug!(callsign = %key, "route found"),
                Ok(None) | Err(FetchError::NotFound { .. }) => tracing::debug!(callsign = %key, "no route known"),
                Err(e @ FetchError::Malformed { .. }) => tracing::warn!(callsign = %key, "route lookup returned an unexpected shape: {}", e),
                Err(e) => tracing::warn!(callsign = %key, "route lookup unavailable: {}", e)
            }
            result
        })
    }

    #[cfg(test)]
    pub fn cached_entries(&self) -> usize { self.cache.len() }
}

fn lookup(http: &dyn HttpClient, sources: &SourceProvider, callsign: &str) -> Result<Option<RouteInfo>, FetchError> {
    let url = sources.source_callsign(callsign);
    let response = http.get(&url, ACCEPT_JSON)?;
    let body = httpclient::expect_success(&url, response)?;

    let envelope: CallsignEnvelope = serde_json::from_slice(&body)
        .map_err(|e| FetchError::Malformed { url: url.clone(), reason: e.to_string() })?;

    match envelope.response {
        CallsignResponse::Route { flightroute } => Ok(flightroute.into_route_info()),
        CallsignResponse::Message(message) => {
            tracing::trace!(callsign, %message, "route service reply");
            Err(FetchError::NotFound { url })
        }
    }
}
