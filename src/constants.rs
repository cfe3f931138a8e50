/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("mcp-weather-tools/", env!("CARGO_PKG_VERSION"));

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// OpenWeatherMap API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Media type requested from the NWS alerts endpoint
pub const GEO_JSON: &str = "application/geo+json";

/// Header a streamable HTTP client may use to supply its own OpenWeather key
pub const API_KEY_HEADER: &str = "x-openweather-api-key";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

// Tool response texts
pub const NO_ALERT_DATA: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
pub const ALERT_FORMAT_FAILED: &str = "Unable to format alert";
pub const WEATHER_FORMAT_FAILED: &str = "Unable to format weather data";
pub const API_KEY_MISSING: &str = "Please set openweather_api_key in the MCP configuration";
pub const SERVICE_UNAVAILABLE: &str = "Weather service temporarily unavailable";
