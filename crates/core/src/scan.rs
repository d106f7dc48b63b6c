// Disease scanner flow
//
// idle -> capturing -> previewing -> analyzing -> show-result
//                         ^   (upload)               |
//                         |                          v
//                        idle  <---- failure ---- analyzing

use std::fmt;

use agridoc_protocol::DetectionResult;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const ANALYSIS_FAILED_ALERT: &str = "Failed to analyze image. Please try again.";

/// A captured or uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl ScanImage {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self { bytes, mime: mime.into() }
    }

    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "image/jpeg")
    }

    /// Decode a `data:<mime>;base64,<payload>` URL, as produced by camera
    /// screenshots and file readers.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let mime = meta.strip_suffix(";base64")?;
        let bytes = STANDARD.decode(payload.trim()).ok()?;
        Some(Self::new(bytes, if mime.is_empty() { "image/jpeg" } else { mime }))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Idle,
    Capturing,
    Previewing(ScanImage),
    Analyzing(ScanImage),
    ShowResult { image: ScanImage, result: DetectionResult },
}

impl ScanState {
    pub fn name(&self) -> &'static str {
        match self {
            ScanState::Idle => "idle",
            ScanState::Capturing => "capturing",
            ScanState::Previewing(_) => "previewing",
            ScanState::Analyzing(_) => "analyzing",
            ScanState::ShowResult { .. } => "show-result",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    InvalidTransition { from: &'static str, action: &'static str },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidTransition { from, action } => {
                write!(f, "cannot {} while {}", action, from)
            }
        }
    }
}

impl std::error::Error for ScanError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanFlow {
    state: ScanState,
    alert: Option<String>,
}

impl Default for ScanFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanFlow {
    pub fn new() -> Self {
        Self { state: ScanState::Idle, alert: None }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Image shown in the preview/analyzing/result screens.
    pub fn image(&self) -> Option<&ScanImage> {
        match &self.state {
            ScanState::Previewing(img) | ScanState::Analyzing(img) => Some(img),
            ScanState::ShowResult { image, .. } => Some(image),
            ScanState::Idle | ScanState::Capturing => None,
        }
    }

    pub fn result(&self) -> Option<&DetectionResult> {
        match &self.state {
            ScanState::ShowResult { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Pending blocking alert, cleared once taken.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    fn invalid(&self, action: &'static str) -> ScanError {
        ScanError::InvalidTransition { from: self.state.name(), action }
    }

    pub fn open_camera(&mut self) -> Result<(), ScanError> {
        match self.state {
            ScanState::Idle => {
                self.state = ScanState::Capturing;
                Ok(())
            }
            _ => Err(self.invalid("open camera")),
        }
    }

    /// Take a frame from the camera. A camera that produced no frame leaves
    /// the flow in capturing.
    pub fn capture(&mut self, frame: Option<ScanImage>) -> Result<(), ScanError> {
        if !matches!(self.state, ScanState::Capturing) {
            return Err(self.invalid("capture"));
        }
        if let Some(image) = frame {
            self.state = ScanState::Previewing(image);
        }
        Ok(())
    }

    pub fn upload(&mut self, image: ScanImage) -> Result<(), ScanError> {
        match self.state {
            ScanState::Idle | ScanState::Capturing => {
                self.state = ScanState::Previewing(image);
                Ok(())
            }
            _ => Err(self.invalid("upload")),
        }
    }

    /// Enter analyzing and hand back the image to send to the detector.
    pub fn begin_analysis(&mut self) -> Result<ScanImage, ScanError> {
        let ScanState::Previewing(image) = &self.state else {
            return Err(self.invalid("analyze"));
        };
        let image = image.clone();
        self.state = ScanState::Analyzing(image.clone());
        Ok(image)
    }

    /// Apply the detector outcome. Failures roll back to idle and raise the
    /// blocking alert. Outcomes arriving outside analyzing are dropped.
    pub fn finish<E: fmt::Display>(&mut self, outcome: Result<DetectionResult, E>) {
        let ScanState::Analyzing(image) = &self.state else {
            log::debug!("dropping detection outcome received while {}", self.state.name());
            return;
        };
        match outcome {
            Ok(result) => {
                log::info!("detected {} ({:.2})", result.disease, result.confidence);
                self.state = ScanState::ShowResult { image: image.clone(), result };
            }
            Err(e) => {
                log::warn!("disease detection failed: {}", e);
                self.state = ScanState::Idle;
                self.alert = Some(ANALYSIS_FAILED_ALERT.to_string());
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }
}
