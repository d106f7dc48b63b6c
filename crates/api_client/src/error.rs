use agridoc_protocol::SchemaError;

/// Error type for backend and geocoding calls.
#[derive(Debug)]
pub enum ApiError {
    /// Connection, DNS or timeout failure
    Network(String),
    /// Non-2xx status with the response body
    Http(u16, String),
    /// Body was not the JSON shape we expected
    Parse(String),
    /// Body decoded but failed schema validation
    Malformed(SchemaError),
    /// Local I/O or request-building failure
    Io(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Malformed(e) => write!(f, "Malformed response: {}", e),
            ApiError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(e: SchemaError) -> Self {
        ApiError::Malformed(e)
    }
}

impl ApiError {
    /// True for failures where the server was never reached.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
