// WMO weather-code presentation

/// Icon family for a weather code. Renderers map these to their own glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    CloudSun,
    CloudRain,
    CloudSnow,
    CloudLightning,
    Cloudy,
}

/// Short description of a WMO weather interpretation code.
pub fn weather_description(code: u8) -> &'static str {
    match code {
        0 => "Clear Sky",
        1..=3 => "Partly Cloudy",
        4..=9 => "Foggy",
        10..=19 => "Drizzle",
        20..=29 => "Rain",
        30..=39 => "Snow / Sleet",
        40..=49 => "Foggy",
        50..=59 => "Drizzle",
        60..=69 => "Rain",
        70..=79 => "Snow",
        80..=84 => "Rain Showers",
        85..=94 => "Thunderstorm",
        _ => "Severe Thunderstorm",
    }
}

pub fn weather_icon(code: u8) -> WeatherIcon {
    match code {
        0 => WeatherIcon::Sun,
        1..=3 => WeatherIcon::CloudSun,
        4..=69 => WeatherIcon::CloudRain,
        70..=79 => WeatherIcon::CloudSnow,
        80..=84 => WeatherIcon::CloudRain,
        85..=99 => WeatherIcon::CloudLightning,
        _ => WeatherIcon::Cloudy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_bands() {
        assert_eq!(weather_description(0), "Clear Sky");
        assert_eq!(weather_description(2), "Partly Cloudy");
        assert_eq!(weather_description(45), "Foggy");
        assert_eq!(weather_description(61), "Rain");
        assert_eq!(weather_description(81), "Rain Showers");
        assert_eq!(weather_description(95), "Severe Thunderstorm");
    }

    #[test]
    fn test_icon_bands() {
        assert_eq!(weather_icon(0), WeatherIcon::Sun);
        assert_eq!(weather_icon(3), WeatherIcon::CloudSun);
        assert_eq!(weather_icon(63), WeatherIcon::CloudRain);
        assert_eq!(weather_icon(75), WeatherIcon::CloudSnow);
        assert_eq!(weather_icon(96), WeatherIcon::CloudLightning);
        assert_eq!(weather_icon(120), WeatherIcon::Cloudy);
    }
}
