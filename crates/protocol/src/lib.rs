//! AgriDoc backend wire schemas.
//!
//! This crate defines the request and response types for every endpoint the
//! client talks to. The wire format is JSON over HTTP.
//!
//! # Validation
//!
//! Responses are decoded with serde and then checked with [`Validate`]
//! before they reach any view state. A response that decodes but carries
//! out-of-range values (a confidence of 7, a humidity of -3) is rejected
//! with a [`SchemaError`] instead of being rendered.
//!
//! # Usage
//!
//! ```ignore
//! use agridoc_protocol::{DetectionResult, Validate};
//!
//! let result: DetectionResult = serde_json::from_str(&body)?;
//! result.validate()?;
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Validation
// =============================================================================

/// A decoded response that violates its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    pub field: String,
    pub reason: String,
}

impl SchemaError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: field.into(), reason: reason.into() }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for SchemaError {}

/// Boundary check for decoded responses.
pub trait Validate {
    fn validate(&self) -> Result<(), SchemaError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), SchemaError> {
        self.iter().try_for_each(Validate::validate)
    }
}

fn finite(field: &str, value: f64) -> Result<(), SchemaError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SchemaError::new(field, "not a finite number"))
    }
}

fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), SchemaError> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(SchemaError::new(field, format!("{} outside [{}, {}]", value, min, max)));
    }
    Ok(())
}

fn non_empty(field: &str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        Err(SchemaError::new(field, "empty"))
    } else {
        Ok(())
    }
}

// =============================================================================
// Weather (GET /api/weather?lat&lon)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: DailySummary,
    #[serde(default)]
    pub units: WeatherUnits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    /// WMO weather interpretation code. Absent codes render as partly cloudy.
    #[serde(default = "default_weather_code")]
    pub weather_code: u8,
}

fn default_weather_code() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub max_temp: f64,
    pub min_temp: f64,
    pub total_precip: f64,
}

/// Unit labels passed through from the upstream forecast provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherUnits {
    pub temperature_2m: String,
    pub precipitation: String,
    pub wind_speed_10m: String,
}

impl Default for WeatherUnits {
    fn default() -> Self {
        Self {
            temperature_2m: "°C".into(),
            precipitation: "mm".into(),
            wind_speed_10m: "km/h".into(),
        }
    }
}

impl Validate for WeatherReport {
    fn validate(&self) -> Result<(), SchemaError> {
        finite("current.temperature", self.current.temperature)?;
        in_range("current.humidity", self.current.humidity, 0.0, 100.0)?;
        in_range("current.precipitation", self.current.precipitation, 0.0, f64::MAX)?;
        in_range("current.wind_speed", self.current.wind_speed, 0.0, f64::MAX)?;
        finite("daily.max_temp", self.daily.max_temp)?;
        finite("daily.min_temp", self.daily.min_temp)?;
        in_range("daily.total_precip", self.daily.total_precip, 0.0, f64::MAX)?;
        if self.daily.min_temp > self.daily.max_temp {
            return Err(SchemaError::new("daily", "min_temp above max_temp"));
        }
        Ok(())
    }
}

// =============================================================================
// Climate (GET /api/climate?lat&lon)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateInsight {
    pub comparison: ClimateComparison,
    pub insight: String,
}

/// Week-mean temperatures for the same calendar week in two reference years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateComparison {
    pub year_1990: f64,
    pub year_2023: f64,
    pub diff: f64,
}

impl ClimateComparison {
    pub fn is_warming(&self) -> bool {
        self.diff > 0.0
    }
}

impl Validate for ClimateInsight {
    fn validate(&self) -> Result<(), SchemaError> {
        finite("comparison.year_1990", self.comparison.year_1990)?;
        finite("comparison.year_2023", self.comparison.year_2023)?;
        finite("comparison.diff", self.comparison.diff)?;
        non_empty("insight", &self.insight)
    }
}

// =============================================================================
// Disease detection (POST /api/disease/detect, multipart `file`)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub disease: String,
    /// Probability in [0, 1].
    pub confidence: f64,
    pub treatment: String,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<serde_json::Value>,
}

impl DetectionResult {
    pub fn is_healthy(&self) -> bool {
        self.disease.eq_ignore_ascii_case("healthy")
    }

    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl Validate for DetectionResult {
    fn validate(&self) -> Result<(), SchemaError> {
        non_empty("disease", &self.disease)?;
        in_range("confidence", self.confidence, 0.0, 1.0)
    }
}

// =============================================================================
// Doctor chat (POST /api/doctor/diagnose)
// =============================================================================

/// Who wrote a chat history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Data URL (`data:image/jpeg;base64,...`) of an attached photo.
    pub image_base64: Option<String>,
    pub chat_history: Vec<HistoryEntry>,
    pub language: String,
    pub language_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnoseResponse {
    pub diagnosis: Option<String>,
    pub confidence: Option<String>,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

// Every field is optional free text; the chat fills in the gaps.
impl Validate for DiagnoseResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}

// =============================================================================
// Schemes (GET /api/schemes, GET /api/schemes/categories)
// =============================================================================

/// Category value that means "no category filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: u32,
    pub name: String,
    pub hindi_name: String,
    pub ministry: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub category: String,
    pub link: String,
    pub last_updated: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_updated: bool,
}

impl Validate for Scheme {
    fn validate(&self) -> Result<(), SchemaError> {
        non_empty("name", &self.name)?;
        non_empty("category", &self.category)?;
        if !self.link.starts_with("http://") && !self.link.starts_with("https://") {
            return Err(SchemaError::new("link", format!("not an http(s) url: {}", self.link)));
        }
        Ok(())
    }
}

/// Search and category filter for the schemes listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemeQuery {
    pub search: String,
    pub category: Option<String>,
}

impl SchemeQuery {
    /// Query parameters in wire form. Empty search and the "All" category
    /// are omitted.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(category) = &self.category {
            if category != ALL_CATEGORIES {
                params.push(("category", category.clone()));
            }
        }
        params
    }
}

// =============================================================================
// Practice advisor (POST /api/advisor/plan)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub practice_name: String,
    #[serde(default)]
    pub farmer_profile: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compatibility {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPhase {
    pub phase: u32,
    pub title: String,
    pub duration: String,
    pub steps: Vec<String>,
    #[serde(default)]
    pub cost_this_phase: String,
    #[serde(default)]
    pub what_you_need: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticePlan {
    pub practice_name: String,
    pub one_liner: String,
    #[serde(default)]
    pub why_it_works: String,
    pub compatibility: Compatibility,
    #[serde(default)]
    pub compatibility_reason: String,
    pub estimated_cost: CostRange,
    #[serde(default)]
    pub time_to_see_results: String,
    pub phases: Vec<PlanPhase>,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    #[serde(default)]
    pub government_schemes: Vec<String>,
    #[serde(default)]
    pub youtube_search: String,
}

impl Validate for PracticePlan {
    fn validate(&self) -> Result<(), SchemaError> {
        non_empty("practice_name", &self.practice_name)?;
        finite("estimated_cost.min", self.estimated_cost.min)?;
        finite("estimated_cost.max", self.estimated_cost.max)?;
        if self.estimated_cost.min > self.estimated_cost.max {
            return Err(SchemaError::new("estimated_cost", "min above max"));
        }
        if self.phases.is_empty() {
            return Err(SchemaError::new("phases", "empty"));
        }
        Ok(())
    }
}

// =============================================================================
// Geocoding (Open-Meteo search)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Absent entirely when nothing matched.
    #[serde(default)]
    pub results: Option<Vec<GeocodeCandidate>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeocodeCandidate {
    /// "Name, Region, Country" with missing parts skipped.
    pub fn display(&self) -> String {
        let mut out = self.name.clone();
        for part in [&self.admin1, &self.country].into_iter().flatten() {
            out.push_str(", ");
            out.push_str(part);
        }
        out
    }
}

impl Validate for GeocodeCandidate {
    fn validate(&self) -> Result<(), SchemaError> {
        in_range("latitude", self.latitude, -90.0, 90.0)?;
        in_range("longitude", self.longitude, -180.0, 180.0)
    }
}

impl Validate for GeocodeResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        match &self.results {
            Some(results) => results.validate(),
            None => Ok(()),
        }
    }
}

/// A resolved place: coordinates plus a human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMatch {
    pub lat: f64,
    pub lon: f64,
    pub display: String,
}

impl From<&GeocodeCandidate> for GeoMatch {
    fn from(c: &GeocodeCandidate) -> Self {
        Self { lat: c.latitude, lon: c.longitude, display: c.display() }
    }
}
