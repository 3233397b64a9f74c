//! OpenWeatherMap API client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::WeatherReport;

const API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Current-weather response from OpenWeatherMap (the fields we display)
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    main: MainInfo,
    weather: Vec<ConditionInfo>,
    wind: WindInfo,
}

#[derive(Debug, Deserialize)]
struct MainInfo {
    temp: f32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f32,
}

/// Fetch error type
#[derive(Debug)]
pub enum FetchError {
    /// The API answered with a non-success status for this city
    NotFound(String),
    /// Transport-level failure (DNS, timeout, malformed body)
    Request(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound(city) => write!(f, "city {} not found", city),
            FetchError::Request(detail) => write!(f, "weather request failed: {}", detail),
        }
    }
}

impl std::error::Error for FetchError {}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

fn report_from_response(response: WeatherResponse) -> WeatherReport {
    WeatherReport {
        city: response.name,
        temperature: response.main.temp,
        description: response
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
    }
}

/// Fetch current weather for one city (metric units, Japanese descriptions).
/// Any non-success status is reported as a missing city, matching the
/// user-facing error message; the name is sent as-is, empty or not.
pub async fn fetch_city_weather(city: &str, api_key: &str) -> Result<WeatherReport, FetchError> {
    let url = format!(
        "{API_BASE}/weather?q={}&appid={}&units=metric&lang=ja",
        urlencoding::encode(city),
        api_key
    );

    let response = http_client()
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FetchError::NotFound(city.to_string()));
    }

    let data: WeatherResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    Ok(report_from_response(data))
}

/// Fetch current weather for every city concurrently.
///
/// All requests are spawned before any is awaited. Every request is then
/// awaited to settlement; nothing is cancelled when a sibling fails. On
/// success the reports come back in input order. When one or more requests
/// fail, the failure with the lowest input index wins and every other result
/// is discarded.
pub async fn fetch_comparison(
    cities: &[String],
    api_key: &str,
) -> Result<Vec<WeatherReport>, FetchError> {
    let mut handles = Vec::with_capacity(cities.len());
    for city in cities {
        let city = city.clone();
        let api_key = api_key.to_string();
        handles.push(tokio::spawn(async move {
            fetch_city_weather(&city, &api_key).await
        }));
    }

    let mut settled = Vec::with_capacity(handles.len());
    for handle in handles {
        settled.push(match handle.await {
            Ok(result) => result,
            Err(e) => Err(FetchError::Request(e.to_string())),
        });
    }

    aggregate_settled(settled)
}

/// Fold the settled per-city results into the aggregate outcome: every
/// report in input order, or the failure with the lowest input index. Runs
/// only after all requests have settled, so the winning failure does not
/// depend on completion timing.
fn aggregate_settled(
    settled: Vec<Result<WeatherReport, FetchError>>,
) -> Result<Vec<WeatherReport>, FetchError> {
    settled.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_city() {
        let err = FetchError::NotFound("Nonexistentville".into());
        assert_eq!(err.to_string(), "city Nonexistentville not found");

        // Empty names are sent as-is and come back in the message too
        let err = FetchError::NotFound(String::new());
        assert_eq!(err.to_string(), "city  not found");
    }

    #[test]
    fn test_request_error_is_generic() {
        let err = FetchError::Request("connection refused".into());
        assert_eq!(
            err.to_string(),
            "weather request failed: connection refused"
        );
    }

    #[test]
    fn test_report_from_response_maps_display_fields() {
        let body = serde_json::json!({
            "name": "Tokyo",
            "main": { "temp": 22.5, "humidity": 45, "pressure": 1013 },
            "weather": [ { "id": 800, "main": "Clear", "description": "晴天" } ],
            "wind": { "speed": 3.2, "deg": 180 }
        });

        let response: WeatherResponse = serde_json::from_value(body).unwrap();
        let report = report_from_response(response);

        assert_eq!(report.city, "Tokyo");
        assert_eq!(report.temperature, 22.5);
        assert_eq!(report.description, "晴天");
        assert_eq!(report.humidity, 45);
        assert_eq!(report.wind_speed, 3.2);
    }

    #[test]
    fn test_report_from_response_without_conditions() {
        let body = serde_json::json!({
            "name": "Tokyo",
            "main": { "temp": 22.5, "humidity": 45 },
            "weather": [],
            "wind": { "speed": 3.2 }
        });

        let response: WeatherResponse = serde_json::from_value(body).unwrap();
        let report = report_from_response(response);

        assert_eq!(report.description, "");
    }

    #[tokio::test]
    async fn test_fetch_comparison_empty_input_resolves_empty() {
        let reports = fetch_comparison(&[], "test-key").await.unwrap();
        assert!(reports.is_empty());
    }

    fn report(city: &str) -> WeatherReport {
        WeatherReport {
            city: city.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_preserves_input_order() {
        let settled = vec![
            Ok(report("Tokyo")),
            Ok(report("Osaka")),
            Ok(report("Sapporo")),
        ];

        let reports = aggregate_settled(settled).unwrap();

        let names: Vec<_> = reports.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(names, vec!["Tokyo", "Osaka", "Sapporo"]);
    }

    #[test]
    fn test_aggregate_one_failure_discards_all_successes() {
        let settled = vec![
            Ok(report("Tokyo")),
            Err(FetchError::NotFound("Nonexistentville".into())),
        ];

        let err = aggregate_settled(settled).unwrap_err();

        assert_eq!(err.to_string(), "city Nonexistentville not found");
    }

    #[test]
    fn test_aggregate_lowest_index_failure_wins() {
        // Failures at mixed indices, successes in between: the earliest
        // input position is reported regardless of settle timing
        let settled = vec![
            Ok(report("Tokyo")),
            Err(FetchError::NotFound("Osaka".into())),
            Ok(report("Sapporo")),
            Err(FetchError::NotFound("Nagoya".into())),
        ];

        let err = aggregate_settled(settled).unwrap_err();

        assert_eq!(err.to_string(), "city Osaka not found");
    }

    #[test]
    fn test_aggregate_transport_failure_beats_later_not_found() {
        let settled = vec![
            Err(FetchError::Request("connection refused".into())),
            Err(FetchError::NotFound("Osaka".into())),
        ];

        let err = aggregate_settled(settled).unwrap_err();

        assert!(matches!(err, FetchError::Request(_)));
    }
}
