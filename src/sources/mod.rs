pub mod aircraft_source;
pub mod caching;
pub mod httpclient;
pub mod logos;
pub mod routes;
pub mod sources;
