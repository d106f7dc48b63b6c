use serde::{Deserialize, Serialize};

/// Coordinates used until the farmer sets a location (Hosapete, Karnataka).
pub const DEFAULT_LAT: f64 = 15.1394;
pub const DEFAULT_LON: f64 = 76.9214;

pub const SOIL_TYPES: &[&str] = &[
    "Black Cotton (Vertisol)",
    "Red Loamy",
    "Alluvial",
    "Laterite",
    "Sandy Loam",
    "Clay Loam",
    "Silty Clay",
    "Saline / Alkaline",
    "Peaty / Organic",
];

/// The locally persisted farmer record consumed by dashboard widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// Human-readable place, e.g. "Bellary, Karnataka, India".
    pub location_name: String,
    pub lat: f64,
    pub lon: f64,
    pub soil_type: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            location_name: String::new(),
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
            soil_type: String::new(),
        }
    }
}

impl UserProfile {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.lat, lon: self.lon }
    }

    pub fn has_location(&self) -> bool {
        !self.location_name.is_empty()
    }

    /// Location label for headers, falling back to a generic one.
    pub fn location_label(&self) -> &str {
        if self.location_name.is_empty() {
            "Your Location"
        } else {
            &self.location_name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let p = UserProfile::default();
        assert_eq!(p.lat, 15.1394);
        assert_eq!(p.lon, 76.9214);
        assert!(p.name.is_empty());
        assert!(!p.has_location());
        assert_eq!(p.location_label(), "Your Location");
    }

    #[test]
    fn test_profile_wire_keys_are_camel_case() {
        let p = UserProfile {
            name: "Ramu".into(),
            location_name: "Bellary".into(),
            lat: 15.3,
            lon: 76.9,
            soil_type: "Red Loamy".into(),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["locationName"], "Bellary");
        assert_eq!(json["soilType"], "Red Loamy");

        let back: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_soil_types_listed() {
        assert_eq!(SOIL_TYPES.len(), 9);
        assert!(SOIL_TYPES.contains(&"Red Loamy"));
    }
}
