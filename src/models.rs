use serde::Deserialize;

// ============================================================================
// National Weather Service API Models
// ============================================================================

/// One entry of the `features` array returned by the alerts endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlertFeature {
    pub properties: Option<AlertProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentWeatherResponse {
    pub main: Option<MainReadings>,
    pub weather: Option<Vec<WeatherCondition>>,
    pub wind: Option<WindReadings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MainReadings {
    pub temp: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    pub main: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WindReadings {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
}

// ============================================================================
// Derived records
// ============================================================================

/// An alert with every field resolved to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherAlert {
    pub event: String,
    pub area: String,
    pub severity: String,
    pub description: String,
    pub instruction: String,
}

impl From<AlertProperties> for WeatherAlert {
    fn from(props: AlertProperties) -> Self {
        Self {
            event: props.event.unwrap_or_else(|| "Unknown".to_string()),
            area: props.area_desc.unwrap_or_else(|| "Unknown".to_string()),
            severity: props.severity.unwrap_or_else(|| "Unknown".to_string()),
            description: props
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            instruction: props
                .instruction
                .unwrap_or_else(|| "No specific instructions provided".to_string()),
        }
    }
}

/// Current conditions at a point, temperature in °C and wind speed in m/s.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub condition: String,
    pub description: String,
    pub wind_speed: f64,
    /// Bearing the wind blows from, in degrees, when reported.
    pub wind_degrees: Option<f64>,
}

impl From<CurrentWeatherResponse> for CurrentConditions {
    fn from(response: CurrentWeatherResponse) -> Self {
        let condition = response
            .weather
            .and_then(|conditions| conditions.into_iter().next())
            .unwrap_or_default();
        let wind = response.wind.unwrap_or_default();

        Self {
            temperature: response.main.and_then(|m| m.temp).unwrap_or(0.0),
            condition: condition.main.unwrap_or_else(|| "Unknown".to_string()),
            description: condition
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            wind_speed: wind.speed.unwrap_or(0.0),
            wind_degrees: wind.deg,
        }
    }
}
