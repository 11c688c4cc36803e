use std::collections::HashMap;
use crate::errors::FetchError;

/// Process-lifetime lookup cache.
///
/// Entries are never evicted or replaced. Definitive misses (not found,
/// malformed) are stored as `None` so they are not requested again during the
/// run; transient failures are not stored and the next lookup retries.
pub struct LookupCache<V> {
    data: HashMap<String, Option<V>>
}

impl<V: Clone> LookupCache<V> {
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }

    pub fn get_or_fetch<F>(&mut self, key: &str, fetch: F) -> Option<V>
        where F: FnOnce() -> Result<Option<V>, FetchError>
    {
        if let Some(entry) = self.data.get(key) {
            return entry.clone();                                // Either return cached value or cached miss
        }

        match fetch() {
            Ok(value) => {
                self.data.insert(key.to_string(), value.clone());
                value
            },
            Err(e) if e.is_definitive() => {
                self.data.insert(key.to_string(), None);
                None
            },
            Err(_) => None
        }
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool { self.data.contains_key(key) }

    #[cfg(test)]
    pub fn len(&self) -> usize { self.data.len() }
}

impl<V: Clone> Default for LookupCache<V> {
    fn default() -> Self { Self::new() }
}

// Returns a normalised key: trimmed, upper-case, non-alphanumerics replaced by '-'
pub fn cache_key(input_str: &str) -> String {
    input_str.trim().chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '-' })
        .collect::<String>()
}
