//! AgriDoc HTTP client.
//!
//! This crate is the single place that talks to the network: the AgriDoc
//! backend (`/api/*`) and the Open-Meteo geocoding search. Every response is
//! decoded into the `agridoc-protocol` types and validated before it is
//! handed back, so callers never see a half-formed payload.
//!
//! Blocking reqwest, no async runtime. No retries.

mod client;
mod error;
mod geocode;

pub use client::ApiClient;
pub use error::ApiError;
pub use geocode::Geocoder;
