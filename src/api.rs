//! Open-Meteo API client

use async_trait::async_trait;
use serde::Deserialize;

use crate::state::{CurrentConditions, DailyForecast, ResolvedLocation};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

const CURRENT_FIELDS: &str = "temperature_2m,weathercode,snowfall,rain,relative_humidity_2m,\
apparent_temperature,is_day,precipitation,wind_speed_10m";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Lookup error type
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("location not found: {0}")]
    NotFound(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The remote services the fetch pipeline talks to
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Resolve free text to the first matching location
    async fn geocode(&self, query: &str) -> Result<ResolvedLocation, ApiError>;

    async fn current(&self, location: &ResolvedLocation) -> Result<CurrentConditions, ApiError>;

    async fn daily(&self, location: &ResolvedLocation) -> Result<DailyForecast, ApiError>;
}

/// Base URLs for the two Open-Meteo services
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

impl ApiConfig {
    fn geocode_url(&self, query: &str) -> String {
        format!(
            "{}/v1/search?name={}&count=1&language=en",
            self.geocoding_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }

    fn forecast_url(&self, location: &ResolvedLocation, fields: &str) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&timezone={}&{}",
            self.forecast_url.trim_end_matches('/'),
            location.latitude,
            location.longitude,
            urlencoding::encode(&location.timezone),
            fields
        )
    }
}

// ============================================================================
// Response payloads
// ============================================================================

/// Geocoding API response from Open-Meteo
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Option<CurrentPayload>,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    time: String,
    #[serde(default)]
    interval: u32,
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    precipitation: f64,
    rain: f64,
    snowfall: f64,
    weathercode: i32,
    is_day: u8,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: Option<DailyPayload>,
}

#[derive(Debug, Deserialize)]
struct DailyPayload {
    time: Vec<String>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    weathercode: Vec<i32>,
}

fn location_from_response(query: &str, data: GeocodingResponse) -> Result<ResolvedLocation, ApiError> {
    data.results
        .and_then(|results| results.into_iter().next())
        .map(|result| ResolvedLocation {
            name: result.name,
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result.timezone.unwrap_or_else(|| "auto".to_string()),
        })
        .ok_or_else(|| ApiError::NotFound(query.to_string()))
}

fn current_from_response(data: CurrentResponse) -> Result<CurrentConditions, ApiError> {
    let current = data
        .current
        .ok_or_else(|| ApiError::Decode("missing `current` block".into()))?;
    Ok(CurrentConditions {
        time: current.time,
        interval: current.interval,
        temperature: current.temperature_2m,
        apparent_temperature: current.apparent_temperature,
        relative_humidity: current.relative_humidity_2m,
        wind_speed: current.wind_speed_10m,
        precipitation: current.precipitation,
        rain: current.rain,
        snowfall: current.snowfall,
        weather_code: current.weathercode,
        is_day: current.is_day != 0,
    })
}

fn daily_from_response(data: DailyResponse) -> Result<DailyForecast, ApiError> {
    let daily = data
        .daily
        .ok_or_else(|| ApiError::Decode("missing `daily` block".into()))?;
    Ok(DailyForecast {
        time: daily.time,
        temperature_min: daily.temperature_2m_min,
        temperature_max: daily.temperature_2m_max,
        weather_code: daily.weathercode,
    })
}

// ============================================================================
// HTTP client
// ============================================================================

/// `WeatherApi` backed by the public Open-Meteo endpoints
#[derive(Clone, Debug, Default)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl OpenMeteoClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl WeatherApi for OpenMeteoClient {
    async fn geocode(&self, query: &str) -> Result<ResolvedLocation, ApiError> {
        let data: GeocodingResponse = self.get_json(&self.config.geocode_url(query)).await?;
        location_from_response(query, data)
    }

    async fn current(&self, location: &ResolvedLocation) -> Result<CurrentConditions, ApiError> {
        let url = self
            .config
            .forecast_url(location, &format!("current={CURRENT_FIELDS}"));
        current_from_response(self.get_json(&url).await?)
    }

    async fn daily(&self, location: &ResolvedLocation) -> Result<DailyForecast, ApiError> {
        let url = self
            .config
            .forecast_url(location, &format!("daily={DAILY_FIELDS}"));
        daily_from_response(self.get_json(&url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kyiv() -> ResolvedLocation {
        ResolvedLocation {
            name: "Kyiv".into(),
            latitude: 50.45,
            longitude: 30.52,
            timezone: "Europe/Kyiv".into(),
        }
    }

    #[test]
    fn test_geocode_takes_first_result() {
        let body = r#"{"results":[
            {"name":"Paris","latitude":48.85,"longitude":2.35,"timezone":"Europe/Paris","country":"France"},
            {"name":"Paris","latitude":33.66,"longitude":-95.55,"timezone":"America/Chicago"}
        ]}"#;
        let data: GeocodingResponse = serde_json::from_str(body).unwrap();

        let location = location_from_response("Paris", data).unwrap();

        assert_eq!(
            location,
            ResolvedLocation {
                name: "Paris".into(),
                latitude: 48.85,
                longitude: 2.35,
                timezone: "Europe/Paris".into(),
            }
        );
    }

    #[test]
    fn test_geocode_without_results_is_not_found() {
        let data: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        let err = location_from_response("Atlantis", data).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref q) if q == "Atlantis"));
        assert_eq!(err.to_string(), "location not found: Atlantis");

        let data: GeocodingResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(matches!(
            location_from_response("Atlantis", data),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_geocode_missing_timezone_falls_back_to_auto() {
        let body = r#"{"results":[{"name":"Nowhere","latitude":1.0,"longitude":2.0}]}"#;
        let data: GeocodingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(location_from_response("x", data).unwrap().timezone, "auto");
    }

    #[test]
    fn test_current_payload_maps_fields() {
        let body = r#"{"latitude":50.5,"current":{
            "time":"2024-03-05T10:00","interval":900,"temperature_2m":7.5,
            "weathercode":61,"snowfall":0.0,"rain":1.2,"relative_humidity_2m":81,
            "apparent_temperature":4.1,"is_day":1,"precipitation":1.2,"wind_speed_10m":14.3
        }}"#;
        let data: CurrentResponse = serde_json::from_str(body).unwrap();

        let current = current_from_response(data).unwrap();

        assert_eq!(
            current,
            CurrentConditions {
                time: "2024-03-05T10:00".into(),
                interval: 900,
                temperature: 7.5,
                apparent_temperature: 4.1,
                relative_humidity: 81.0,
                wind_speed: 14.3,
                precipitation: 1.2,
                rain: 1.2,
                snowfall: 0.0,
                weather_code: 61,
                is_day: true,
            }
        );
    }

    #[test]
    fn test_daily_payload_maps_sequences() {
        let body = r#"{"daily":{
            "time":["2024-03-05","2024-03-06"],
            "temperature_2m_max":[9.1,10.4],
            "temperature_2m_min":[1.0,-0.5],
            "weathercode":[3,71]
        }}"#;
        let data: DailyResponse = serde_json::from_str(body).unwrap();

        let daily = daily_from_response(data).unwrap();

        assert_eq!(daily.time, vec!["2024-03-05", "2024-03-06"]);
        assert_eq!(daily.temperature_min, vec![1.0, -0.5]);
        assert_eq!(daily.temperature_max, vec![9.1, 10.4]);
        assert_eq!(daily.weather_code, vec![3, 71]);
    }

    #[test]
    fn test_missing_blocks_are_decode_errors() {
        let data: CurrentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(current_from_response(data), Err(ApiError::Decode(_))));

        let data: DailyResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(daily_from_response(data), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_urls() {
        let config = ApiConfig {
            geocoding_url: "http://geo.test/".into(),
            forecast_url: "http://wx.test".into(),
        };

        assert_eq!(
            config.geocode_url("New York"),
            "http://geo.test/v1/search?name=New%20York&count=1&language=en"
        );
        assert_eq!(
            config.forecast_url(&kyiv(), "daily=weathercode"),
            "http://wx.test/v1/forecast?latitude=50.45&longitude=30.52&timezone=Europe%2FKyiv&daily=weathercode"
        );
    }
}
