use std::collections::HashMap;
use std::rc::Rc;
use image::RgbaImage;
use crate::errors::FetchError;
use crate::sources::caching::{cache_key, LookupCache};
use crate::sources::httpclient::{self, HttpClient, ACCEPT_IMAGE};
use crate::sources::sources::SourceProvider;

/// Known airline domain mappings used to look up logos
pub const DEFAULT_LOGO_DOMAINS: [(&str, &str); 5] = [
    ("American Airlines", "aa.com"),
    ("Delta Air Lines", "delta.com"),
    ("United Airlines", "united.com"),
    ("Southwest Airlines", "southwest.com"),
    ("Alaska Airlines", "alaskaair.com"),
];

#[derive(Debug, Clone)]
pub struct LogoAsset {
    pub airline: String,
    pub image: RgbaImage
}

pub struct LogoResolver {
    http: Rc<dyn HttpClient>,
    sources: SourceProvider,
    domains: HashMap<String, String>,
    cache: LookupCache<Rc<LogoAsset>>
}

impl LogoResolver {
    pub fn new(http: Rc<dyn HttpClient>, sources: SourceProvider, domains: &HashMap<String, String>) -> Self {
        let domains = domains.iter()
            .map(|(airline, domain)| (cache_key(airline), domain.trim().to_string()))
            .collect();

        Self { http, sources, domains, cache: LookupCache::new() }
    }

    pub fn resolve(&mut self, airline: &str) -> Option<Rc<LogoAsset>> {
        let key = cache_key(airline);
        if key.is_empty() {
            return None;
        }

        let (http, sources, domains) = (&self.http, &self.sources, &self.domains);
        self.cache.get_or_fetch(&key, || {
            let domain = match domains.get(&key) {
                Some(domain) => domain,
                None => {
                    tracing::debug!(airline, "no logo domain configured");
                    return Ok(None);
                }
            };

            let result = fetch_logo(http.as_ref(), sources, airline, domain);
            match &result {
                Ok(_) => tracing::debug!(airline, domain = %domain, "logo loaded"),
                Err(e @ FetchError::NotFound { .. }) => tracing::debug!(airline, "{}", e),
                Err(e) => tracing::warn!(airline, "logo fetch failed: {}", e)
            }
            result
        })
    }
}

fn fetch_logo(http: &dyn HttpClient, sources: &SourceProvider, airline: &str, domain: &str) -> Result<Option<Rc<LogoAsset>>, FetchError> {
    let url = sources.source_logo(domain);
    let response = http.get(&url, ACCEPT_IMAGE)?;
    let body = httpclient::expect_success(&url, response)?;

    let image = image::load_from_memory(&body)
        .map_err(|e| FetchError::Malformed { url: url.clone(), reason: e.to_string() })?
        .to_rgba8();

    Ok(Some(Rc::new(LogoAsset { airline: airline.trim().to_string(), image })))
}

pub fn default_logo_domains() -> HashMap<String, String> {
    DEFAULT_LOGO_DOMAINS.iter()
        .map(|(airline, domain)| (airline.to_string(), domain.to_string()))
        .collect()
}
