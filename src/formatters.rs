use serde::Deserialize;
use serde_json::Value;

use crate::constants::{
    ALERT_FORMAT_FAILED, NO_ACTIVE_ALERTS, NO_ALERT_DATA, WEATHER_FORMAT_FAILED,
};
use crate::models::{AlertFeature, CurrentConditions, CurrentWeatherResponse, WeatherAlert};

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Formats the alerts payload, telling "no data" apart from "no alerts".
///
/// A payload without a `features` array means the fetch failed or returned
/// something unexpected; an empty array means there are no active alerts.
pub fn format_alerts(payload: Option<&Value>) -> String {
    let Some(features) = payload.and_then(|p| p.get("features")) else {
        return NO_ALERT_DATA.to_string();
    };

    match features {
        Value::Null => NO_ACTIVE_ALERTS.to_string(),
        Value::Array(features) if features.is_empty() => NO_ACTIVE_ALERTS.to_string(),
        Value::Array(features) => features
            .iter()
            .map(format_alert)
            .collect::<Vec<_>>()
            .join("\n---\n"),
        _ => NO_ALERT_DATA.to_string(),
    }
}

/// Formats a single alert feature into a human-readable block
pub fn format_alert(feature: &Value) -> String {
    let feature = match AlertFeature::deserialize(feature) {
        Ok(feature) => feature,
        Err(e) => {
            tracing::error!("Error formatting alert: {}", e);
            return ALERT_FORMAT_FAILED.to_string();
        }
    };

    let alert = WeatherAlert::from(feature.properties.unwrap_or_default());
    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        alert.event, alert.area, alert.severity, alert.description, alert.instruction
    )
}

/// Formats an OpenWeatherMap current-weather payload
pub fn format_current_conditions(payload: &Value) -> String {
    let response = match CurrentWeatherResponse::deserialize(payload) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error formatting weather data: {}", e);
            return WEATHER_FORMAT_FAILED.to_string();
        }
    };

    let current = CurrentConditions::from(response);
    let direction = current
        .wind_degrees
        .map(wind_direction)
        .unwrap_or("Unknown direction");

    format!(
        "Current Weather:\nTemperature: {}\u{00b0}C\nCondition: {}\nWind: {} m/s {}\nDescription: {}",
        current.temperature, current.condition, current.wind_speed, direction, current.description
    )
}

/// Converts a wind bearing in degrees to one of eight compass points
pub fn wind_direction(degrees: f64) -> &'static str {
    let index = (degrees / 45.0).round_ties_even() as i64;
    COMPASS_POINTS[index.rem_euclid(8) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wind_direction_octants() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(45.0), "NE");
        assert_eq!(wind_direction(90.0), "E");
        assert_eq!(wind_direction(200.0), "S");
        assert_eq!(wind_direction(315.0), "NW");
        assert_eq!(wind_direction(360.0), "N");
        assert_eq!(wind_direction(-45.0), "NW");
    }

    #[test]
    fn wind_direction_rounds_half_to_even() {
        // 22.5 / 45 = 0.5 and 67.5 / 45 = 1.5
        assert_eq!(wind_direction(22.5), "N");
        assert_eq!(wind_direction(67.5), "E");
    }

    #[test]
    fn alert_with_every_field() {
        let feature = json!({"properties": {
            "event": "Tornado Warning",
            "areaDesc": "Travis, TX",
            "severity": "Extreme",
            "description": "A tornado was sighted.",
            "instruction": "Take shelter now."
        }});

        assert_eq!(
            format_alert(&feature),
            "\nEvent: Tornado Warning\nArea: Travis, TX\nSeverity: Extreme\n\
             Description: A tornado was sighted.\nInstructions: Take shelter now.\n"
        );
    }

    #[test]
    fn alert_missing_fields_use_placeholders() {
        let text = format_alert(&json!({"properties": {
            "event": "Flood Warning",
            "areaDesc": "County X",
            "instruction": null
        }}));

        assert!(text.contains("Event: Flood Warning"));
        assert!(text.contains("Area: County X"));
        assert!(text.contains("Severity: Unknown"));
        assert!(text.contains("Description: No description available"));
        assert!(text.contains("Instructions: No specific instructions provided"));
    }

    #[test]
    fn alert_without_properties_still_formats() {
        let text = format_alert(&json!({}));
        assert!(text.contains("Event: Unknown"));
        assert!(text.contains("Area: Unknown"));
    }

    #[test]
    fn malformed_alert_gives_generic_message() {
        assert_eq!(
            format_alert(&json!({"properties": {"event": 42}})),
            ALERT_FORMAT_FAILED
        );
        assert_eq!(format_alert(&json!("not an object")), ALERT_FORMAT_FAILED);
    }

    #[test]
    fn alerts_payload_shapes() {
        assert_eq!(format_alerts(None), NO_ALERT_DATA);
        assert_eq!(format_alerts(Some(&json!({"title": "x"}))), NO_ALERT_DATA);
        assert_eq!(format_alerts(Some(&json!({"features": "x"}))), NO_ALERT_DATA);
        assert_eq!(format_alerts(Some(&json!({"features": []}))), NO_ACTIVE_ALERTS);
        assert_eq!(format_alerts(Some(&json!({"features": null}))), NO_ACTIVE_ALERTS);
    }

    #[test]
    fn alerts_are_joined_with_separator() {
        let payload = json!({"features": [
            {"properties": {"event": "Heat Advisory"}},
            {"properties": {"event": "Wind Advisory"}}
        ]});

        let text = format_alerts(Some(&payload));
        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("Heat Advisory"));
        assert!(blocks[1].contains("Wind Advisory"));
    }

    #[test]
    fn current_conditions_full_payload() {
        let payload = json!({
            "main": {"temp": 21.5},
            "weather": [{"main": "Clouds", "description": "broken clouds"}],
            "wind": {"speed": 3.6, "deg": 90}
        });

        assert_eq!(
            format_current_conditions(&payload),
            "Current Weather:\nTemperature: 21.5\u{00b0}C\nCondition: Clouds\n\
             Wind: 3.6 m/s E\nDescription: broken clouds"
        );
    }

    #[test]
    fn current_conditions_missing_fields_use_placeholders() {
        let text = format_current_conditions(&json!({}));
        assert!(text.contains("Temperature: 0\u{00b0}C"));
        assert!(text.contains("Condition: Unknown"));
        assert!(text.contains("Wind: 0 m/s Unknown direction"));
        assert!(text.contains("Description: No description available"));

        let text = format_current_conditions(&json!({"weather": []}));
        assert!(text.contains("Condition: Unknown"));
    }

    #[test]
    fn malformed_current_conditions_give_generic_message() {
        assert_eq!(
            format_current_conditions(&json!({"main": {"temp": "hot"}})),
            WEATHER_FORMAT_FAILED
        );
        assert_eq!(format_current_conditions(&json!([1, 2])), WEATHER_FORMAT_FAILED);
    }
}
