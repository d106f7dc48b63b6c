// Place-name search against the Open-Meteo geocoding API

use std::time::Duration;

use agridoc_protocol::{GeoMatch, GeocodeResponse};

use crate::client::{build_http, decode, normalize_base, send};
use crate::error::ApiError;

#[derive(Clone)]
pub struct Geocoder {
    http: reqwest::blocking::Client,
    base: String,
}

impl Geocoder {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self { http: build_http(timeout)?, base: normalize_base(base)? })
    }

    /// Best single match for free text, or `None` when nothing matched.
    /// Blank input never hits the network.
    pub fn lookup(&self, query: &str) -> Result<Option<GeoMatch>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let url = format!("{}/v1/search", self.base);
        let req = self.http.get(&url).query(&[
            ("name", query),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ]);
        let response: GeocodeResponse = decode(send(req, &url)?)?;

        let found = response
            .results
            .as_deref()
            .and_then(|results| results.first())
            .map(GeoMatch::from);
        match &found {
            Some(m) => log::info!("geocoded {:?} to {} ({}, {})", query, m.display, m.lat, m.lon),
            None => log::info!("no geocoding match for {:?}", query),
        }
        Ok(found)
    }
}
