//! AgriDoc backend client.
//!
//! Blocking reqwest client (no Tokio runtime required). One method per
//! backend route; each decodes and validates the response body.

use std::time::Duration;

use agridoc_core::scan::ScanImage;
use agridoc_core::Coordinates;
use agridoc_protocol::{
    ClimateInsight, DetectionResult, DiagnoseRequest, DiagnoseResponse, PlanRequest,
    PracticePlan, Scheme, SchemeQuery, Validate, WeatherReport,
};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Filename the detector expects on the uploaded photo.
const SCAN_FILENAME: &str = "scan.jpg";

/// AgriDoc API client (blocking).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

impl ApiClient {
    /// Create a client for `api_base` (e.g. `http://localhost:8000`).
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, ApiError> {
        let api_base = normalize_base(api_base)?;
        let http = build_http(timeout)?;
        Ok(Self { http, api_base })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Current conditions and today's summary for a location.
    pub fn weather(&self, coords: Coordinates) -> Result<WeatherReport, ApiError> {
        let url = format!("{}/api/weather", self.api_base);
        let req = self.http.get(&url).query(&[("lat", coords.lat), ("lon", coords.lon)]);
        decode(send(req, &url)?)
    }

    /// 1990 vs 2023 temperature comparison for a location.
    pub fn climate(&self, coords: Coordinates) -> Result<ClimateInsight, ApiError> {
        let url = format!("{}/api/climate", self.api_base);
        let req = self.http.get(&url).query(&[("lat", coords.lat), ("lon", coords.lon)]);
        decode(send(req, &url)?)
    }

    /// Upload a crop photo for disease detection.
    pub fn detect_disease(&self, image: &ScanImage) -> Result<DetectionResult, ApiError> {
        let url = format!("{}/api/disease/detect", self.api_base);
        let part = Part::bytes(image.bytes.clone())
            .file_name(SCAN_FILENAME)
            .mime_str(&image.mime)
            .map_err(|e| ApiError::Io(format!("Invalid image type {}: {}", image.mime, e)))?;
        let form = Form::new().part("file", part);
        decode(send(self.http.post(&url).multipart(form), &url)?)
    }

    /// One turn of the doctor chat.
    pub fn diagnose(&self, request: &DiagnoseRequest) -> Result<DiagnoseResponse, ApiError> {
        self.post_json("/api/doctor/diagnose", request)
    }

    pub fn schemes(&self, query: &SchemeQuery) -> Result<Vec<Scheme>, ApiError> {
        let url = format!("{}/api/schemes", self.api_base);
        let req = self.http.get(&url).query(&query.params());
        decode(send(req, &url)?)
    }

    /// Scheme categories as served, without the "All" pseudo-category.
    pub fn scheme_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/api/schemes/categories", self.api_base);
        let resp = send(self.http.get(&url), &url)?;
        resp.json::<Vec<String>>().map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Step-by-step adoption plan for a farming practice.
    pub fn plan(&self, request: &PlanRequest) -> Result<PracticePlan, ApiError> {
        self.post_json("/api/advisor/plan", request)
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        let url = format!("{}{}", self.api_base, path);
        decode(send(self.http.post(&url).json(body), &url)?)
    }
}

pub(crate) fn build_http(timeout: Duration) -> Result<reqwest::blocking::Client, ApiError> {
    reqwest::blocking::Client::builder()
        .user_agent(format!("agridoc/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Io(format!("Failed to create HTTP client: {}", e)))
}

/// Check the base parses as an http(s) URL and drop any trailing slash.
pub(crate) fn normalize_base(base: &str) -> Result<String, ApiError> {
    let parsed = url::Url::parse(base.trim())
        .map_err(|e| ApiError::Parse(format!("Invalid base URL {:?}: {}", base, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::Parse(format!("Unsupported URL scheme: {}", parsed.scheme())));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

pub(crate) fn send(req: RequestBuilder, url: &str) -> Result<Response, ApiError> {
    log::debug!("request {}", url);
    let response = req.send().map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().unwrap_or_default();
        log::warn!("{} returned HTTP {}", url, status);
        return Err(ApiError::Http(status, body));
    }
    Ok(response)
}

pub(crate) fn decode<T: DeserializeOwned + Validate>(response: Response) -> Result<T, ApiError> {
    let value: T = response.json().map_err(|e| ApiError::Parse(e.to_string()))?;
    value.validate()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agridoc_protocol::{ChatRole, HistoryEntry};
    use httpmock::prelude::*;
    use serde_json::json;

    const HOSPET: Coordinates = Coordinates { lat: 15.1394, lon: 76.9214 };

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8000/").unwrap(), "http://localhost:8000");
        assert_eq!(normalize_base("https://api.agridoc.in/v2/").unwrap(), "https://api.agridoc.in/v2");
        assert!(matches!(normalize_base("not a url"), Err(ApiError::Parse(_))));
        assert!(matches!(normalize_base("ftp://example.com"), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_weather_sends_coordinates() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/weather")
                .query_param("lat", "15.1394")
                .query_param("lon", "76.9214");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "current": {"temperature": 31.2, "humidity": 48, "precipitation": 0.0,
                                "wind_speed": 11.5, "weather_code": 2},
                    "daily": {"max_temp": 34.0, "min_temp": 22.1, "total_precip": 0.4}
                }));
        });

        let report = client(&server).weather(HOSPET).unwrap();
        mock.assert();
        assert_eq!(report.current.weather_code, 2);
        assert_eq!(report.units.temperature_2m, "°C");
    }

    #[test]
    fn test_http_error_keeps_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/climate");
            then.status(503).body("upstream down");
        });

        match client(&server).climate(HOSPET) {
            Err(ApiError::Http(503, body)) => assert_eq!(body, "upstream down"),
            other => panic!("expected HTTP 503, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_out_of_range_confidence_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/disease/detect");
            then.status(200).json_body(json!({
                "disease": "Tomato Early Blight",
                "confidence": 97.0,
                "treatment": "Copper fungicide"
            }));
        });

        let err = client(&server).detect_disease(&ScanImage::jpeg(vec![0xFF, 0xD8, 0xFF])).unwrap_err();
        match err {
            ApiError::Malformed(e) => assert_eq!(e.field, "confidence"),
            other => panic!("expected Malformed, got {}", other),
        }
    }

    #[test]
    fn test_detect_uploads_multipart_file() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/disease/detect")
                .header_exists("content-type")
                .body_includes("name=\"file\"")
                .body_includes("filename=\"scan.jpg\"");
            then.status(200).json_body(json!({
                "disease": "Healthy",
                "confidence": 0.93,
                "treatment": "No action needed",
                "prevention": ["Keep monitoring"]
            }));
        });

        let result = client(&server).detect_disease(&ScanImage::jpeg(b"jpegbytes".to_vec())).unwrap();
        mock.assert();
        assert!(result.is_healthy());
        assert_eq!(result.confidence_percent(), 93);
    }

    #[test]
    fn test_diagnose_posts_history_and_language() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/doctor/diagnose")
                .body_includes(r#""language":"kn""#)
                .body_includes(r#""chat_history":[{"role":"ai","content":"Namaste"}]"#);
            then.status(200).json_body(json!({
                "diagnosis": "Likely leaf curl virus",
                "confidence": "High",
                "treatment": ["Remove whitefly hosts"]
            }));
        });

        let request = DiagnoseRequest {
            message: "Leaves are curling".into(),
            crop_type: None,
            location: None,
            image_base64: None,
            chat_history: vec![HistoryEntry { role: ChatRole::Ai, content: "Namaste".into() }],
            language: "kn".into(),
            language_name: "ಕನ್ನಡ".into(),
        };
        let response = client(&server).diagnose(&request).unwrap();
        mock.assert();
        assert_eq!(response.confidence.as_deref(), Some("High"));
        assert!(response.prevention.is_empty());
    }

    #[test]
    fn test_diagnose_without_diagnosis_uses_fallback_reply() {
        use agridoc_core::chat::ChatSession;
        use agridoc_core::Lang;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/doctor/diagnose");
            then.status(200).json_body(json!({
                "diagnosis": null,
                "confidence": "High",
                "treatment": [],
                "prevention": []
            }));
        });

        let mut chat = ChatSession::new(Lang::En);
        let request = chat.begin_send("My paddy leaves have brown spots", None).unwrap();
        let outcome = client(&server).diagnose(&request);
        assert!(outcome.is_ok());
        chat.complete(outcome);

        let last = chat.messages().last().unwrap();
        assert_eq!(last.text, "I've analyzed your request.");
        assert_eq!(last.diagnosis.as_ref().unwrap().confidence, "High");
    }

    #[test]
    fn test_schemes_query_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/schemes")
                .query_param("search", "kisan")
                .query_param_missing("category");
            then.status(200).json_body(json!([{
                "id": 1,
                "name": "PM-KISAN",
                "hindi_name": "पीएम-किसान",
                "ministry": "Ministry of Agriculture & Farmers Welfare",
                "description": "Income support of ₹6,000 per year",
                "benefits": ["₹2,000 every four months"],
                "category": "Financial Assistance",
                "link": "https://pmkisan.gov.in/",
                "last_updated": "2025-01-15",
                "is_new": false
            }]));
        });

        let query = SchemeQuery { search: "kisan".into(), category: Some("All".into()) };
        let schemes = client(&server).schemes(&query).unwrap();
        mock.assert();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0].name, "PM-KISAN");
        assert!(!schemes[0].is_updated);
    }

    #[test]
    fn test_categories_and_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/schemes/categories");
            then.status(200).json_body(json!(["Credit & Loan", "Irrigation"]));
        });
        assert_eq!(
            client(&server).scheme_categories().unwrap(),
            vec!["Credit & Loan".to_string(), "Irrigation".to_string()]
        );

        let broken = MockServer::start();
        broken.mock(|when, then| {
            when.method(GET).path("/api/schemes/categories");
            then.status(200).body("<html>oops</html>");
        });
        assert!(matches!(client(&broken).scheme_categories(), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on CI hosts.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert!(client.climate(HOSPET).unwrap_err().is_network());
    }
}
