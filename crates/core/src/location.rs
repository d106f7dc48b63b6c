// Location setup form
//
// Search a place name, confirm the geocoded suggestion, pick a soil type,
// save. Saving produces the new profile; persisting it is the caller's job.

use std::fmt;

use agridoc_protocol::GeoMatch;

use crate::profile::UserProfile;

pub const NOT_FOUND_MESSAGE: &str = "Location not found. Try a more specific name.";
pub const UNCONFIRMED_MESSAGE: &str = "Please search and confirm your location first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    NotFound,
    Unconfirmed,
}

impl LocationError {
    pub fn message(&self) -> &'static str {
        match self {
            LocationError::NotFound => NOT_FOUND_MESSAGE,
            LocationError::Unconfirmed => UNCONFIRMED_MESSAGE,
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LocationError {}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationSetup {
    input: String,
    soil_type: String,
    suggestion: Option<GeoMatch>,
    error: Option<LocationError>,
    searching: bool,
}

impl LocationSetup {
    /// Prefill from the saved profile.
    pub fn new(profile: &UserProfile) -> Self {
        Self {
            input: profile.location_name.clone(),
            soil_type: profile.soil_type.clone(),
            suggestion: None,
            error: None,
            searching: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn soil_type(&self) -> &str {
        &self.soil_type
    }

    pub fn suggestion(&self) -> Option<&GeoMatch> {
        self.suggestion.as_ref()
    }

    pub fn error(&self) -> Option<LocationError> {
        self.error
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Editing the place name invalidates any confirmed suggestion.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.suggestion = None;
    }

    pub fn set_soil_type(&mut self, soil: impl Into<String>) {
        self.soil_type = soil.into();
    }

    /// Returns the text to geocode, or `None` when the input is blank.
    pub fn begin_search(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        self.searching = true;
        self.error = None;
        Some(self.input.clone())
    }

    /// A lookup failure is shown the same way as an empty result.
    pub fn finish_search<E: fmt::Display>(&mut self, outcome: Result<Option<GeoMatch>, E>) {
        self.searching = false;
        match outcome {
            Ok(Some(found)) => self.suggestion = Some(found),
            Ok(None) => self.error = Some(LocationError::NotFound),
            Err(e) => {
                log::warn!("geocoding '{}' failed: {}", self.input, e);
                self.error = Some(LocationError::NotFound);
            }
        }
    }

    pub fn can_save(&self, current: &UserProfile) -> bool {
        self.suggestion.is_some() || current.has_location()
    }

    /// Build the profile to persist. Without a fresh suggestion the saved
    /// location is kept and only the soil type changes; the name is always
    /// preserved.
    pub fn save(&mut self, current: &UserProfile) -> Result<UserProfile, LocationError> {
        if !self.can_save(current) {
            self.error = Some(LocationError::Unconfirmed);
            return Err(LocationError::Unconfirmed);
        }
        let (location_name, lat, lon) = match &self.suggestion {
            Some(m) => (m.display.clone(), m.lat, m.lon),
            None => (current.location_name.clone(), current.lat, current.lon),
        };
        Ok(UserProfile {
            location_name,
            lat,
            lon,
            soil_type: self.soil_type.clone(),
            ..current.clone()
        })
    }
}
