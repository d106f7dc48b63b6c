// Service seams between the screen flows and the network

use agridoc_api_client::{ApiClient, ApiError, Geocoder};
use agridoc_core::scan::ScanImage;
use agridoc_core::Coordinates;
use agridoc_protocol::{
    ClimateInsight, DetectionResult, DiagnoseRequest, DiagnoseResponse, GeoMatch, PlanRequest,
    PracticePlan, Scheme, SchemeQuery, WeatherReport,
};

/// The AgriDoc backend routes the app uses.
pub trait Backend: Send + Sync {
    fn weather(&self, coords: Coordinates) -> Result<WeatherReport, ApiError>;
    fn climate(&self, coords: Coordinates) -> Result<ClimateInsight, ApiError>;
    fn detect_disease(&self, image: &ScanImage) -> Result<DetectionResult, ApiError>;
    fn diagnose(&self, request: &DiagnoseRequest) -> Result<DiagnoseResponse, ApiError>;
    fn schemes(&self, query: &SchemeQuery) -> Result<Vec<Scheme>, ApiError>;
    fn scheme_categories(&self) -> Result<Vec<String>, ApiError>;
    fn plan(&self, request: &PlanRequest) -> Result<PracticePlan, ApiError>;
}

/// Free-text place search.
pub trait PlaceLookup: Send + Sync {
    fn lookup(&self, query: &str) -> Result<Option<GeoMatch>, ApiError>;
}

impl Backend for ApiClient {
    fn weather(&self, coords: Coordinates) -> Result<WeatherReport, ApiError> {
        ApiClient::weather(self, coords)
    }

    fn climate(&self, coords: Coordinates) -> Result<ClimateInsight, ApiError> {
        ApiClient::climate(self, coords)
    }

    fn detect_disease(&self, image: &ScanImage) -> Result<DetectionResult, ApiError> {
        ApiClient::detect_disease(self, image)
    }

    fn diagnose(&self, request: &DiagnoseRequest) -> Result<DiagnoseResponse, ApiError> {
        ApiClient::diagnose(self, request)
    }

    fn schemes(&self, query: &SchemeQuery) -> Result<Vec<Scheme>, ApiError> {
        ApiClient::schemes(self, query)
    }

    fn scheme_categories(&self) -> Result<Vec<String>, ApiError> {
        ApiClient::scheme_categories(self)
    }

    fn plan(&self, request: &PlanRequest) -> Result<PracticePlan, ApiError> {
        ApiClient::plan(self, request)
    }
}

impl PlaceLookup for Geocoder {
    fn lookup(&self, query: &str) -> Result<Option<GeoMatch>, ApiError> {
        Geocoder::lookup(self, query)
    }
}
