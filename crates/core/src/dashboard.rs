// Dashboard widgets keyed by the profile coordinates

use std::fmt;

use agridoc_protocol::{ClimateInsight, WeatherReport};

use crate::profile::Coordinates;

pub const WEATHER_ERROR: &str = "Unable to load weather";
pub const CLIMATE_ERROR: &str = "Unable to load climate insights";

/// Exactly one of loading, error or data is shown at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A card that loads one resource for the current coordinates.
#[derive(Debug, Clone)]
pub struct CoordinateWidget<T> {
    coords: Option<Coordinates>,
    state: Loadable<T>,
    error_text: &'static str,
}

impl<T> CoordinateWidget<T> {
    pub fn new(error_text: &'static str) -> Self {
        Self { coords: None, state: Loadable::Loading, error_text }
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }

    pub fn coords(&self) -> Option<Coordinates> {
        self.coords
    }

    /// Point the widget at `coords`. Returns true when a fetch is needed,
    /// i.e. the coordinates changed since the last load.
    pub fn track(&mut self, coords: Coordinates) -> bool {
        if self.coords == Some(coords) {
            return false;
        }
        self.coords = Some(coords);
        self.state = Loadable::Loading;
        true
    }

    /// Force a reload for the current coordinates.
    pub fn reload(&mut self) -> Option<Coordinates> {
        let coords = self.coords?;
        self.state = Loadable::Loading;
        Some(coords)
    }

    /// Apply a fetch outcome. In-flight requests are never cancelled, so a
    /// late result for coordinates the widget has since left still lands.
    pub fn finish<E: fmt::Display>(&mut self, coords: Coordinates, outcome: Result<T, E>) {
        if self.coords != Some(coords) {
            log::debug!("late widget result for {:?}, now tracking {:?}", coords, self.coords);
        }
        self.state = match outcome {
            Ok(v) => Loadable::Ready(v),
            Err(e) => {
                log::warn!("{}: {}", self.error_text, e);
                Loadable::Failed(self.error_text.to_string())
            }
        };
    }
}

/// Weather and climate cards on the dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub weather: CoordinateWidget<WeatherReport>,
    pub climate: CoordinateWidget<ClimateInsight>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            weather: CoordinateWidget::new(WEATHER_ERROR),
            climate: CoordinateWidget::new(CLIMATE_ERROR),
        }
    }
}
