//! OpenWeatherMap client and response mapping.
//!
//! Each operation performs exactly one outbound GET and either maps the full
//! payload into a model value or fails; no partial results, no retries. The
//! body is read as a generic JSON value first so the embedded `cod` status can
//! be inspected before committing to the success shape.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::error::GatewayError;
use crate::models::{
    CityInfo, Coordinates, CurrentWeather, ForecastEntry, ForecastResponse, WeatherCondition,
};

pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url,
            api_key,
        }
    }

    #[instrument(skip(self), fields(city = %city))]
    pub async fn current_weather(&self, city: &str) -> Result<CurrentWeather, GatewayError> {
        info!(city = %city, "Fetching current weather");
        let body = self.fetch("weather", city).await?;
        map_current(body)
    }

    #[instrument(skip(self), fields(city = %city))]
    pub async fn forecast(&self, city: &str) -> Result<ForecastResponse, GatewayError> {
        info!(city = %city, "Fetching forecast");
        let body = self.fetch("forecast", city).await?;
        map_forecast(body)
    }

    async fn fetch(&self, endpoint: &str, city: &str) -> Result<Value, GatewayError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let body = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .json::<Value>()
            .await?;

        Ok(body)
    }
}

// Error payloads usually carry a string `message`, but some carry a number.
// Empty strings and zero fall back to the generic text; anything else is
// surfaced verbatim.
fn upstream_error(body: &Value) -> GatewayError {
    let message = match body.get("message") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    };
    GatewayError::upstream(message.as_deref())
}

/// Maps a `/weather` payload. The endpoint reports `cod` as a *number*, unlike
/// `/forecast` which reports it as a string; the two checks are intentionally
/// not unified because the upstream API itself is inconsistent here. Any JSON
/// number equal to 200 passes (`as_f64` treats the integer 200 and 200.0 the
/// same); the string `"200"` does not.
pub fn map_current(body: Value) -> Result<CurrentWeather, GatewayError> {
    if body.get("cod").and_then(Value::as_f64) != Some(200.0) {
        return Err(upstream_error(&body));
    }

    let payload: CurrentPayload = serde_json::from_value(body)?;
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or(GatewayError::Malformed("empty weather condition list"))?;

    Ok(CurrentWeather {
        temperature: payload.main.temp,
        feels_like: payload.main.feels_like,
        temp_min: payload.main.temp_min,
        temp_max: payload.main.temp_max,
        pressure: payload.main.pressure,
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
        wind_deg: payload.wind.deg,
        clouds: payload.clouds.all,
        main: condition.main,
        icon: condition.icon,
        city: payload.name,
        country: payload.sys.country,
        sunrise: payload.sys.sunrise,
        sunset: payload.sys.sunset,
        timezone: payload.timezone,
        visibility: payload.visibility,
    })
}

/// Maps a `/forecast` payload. Success is the *string* `"200"`.
pub fn map_forecast(body: Value) -> Result<ForecastResponse, GatewayError> {
    if body.get("cod").and_then(Value::as_str) != Some("200") {
        return Err(upstream_error(&body));
    }

    let payload: ForecastPayload = serde_json::from_value(body)?;
    let list = payload
        .list
        .into_iter()
        .map(map_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastResponse {
        cod: payload.cod,
        message: payload.message,
        cnt: payload.cnt,
        city: CityInfo {
            id: payload.city.id,
            name: payload.city.name,
            coord: Coordinates {
                lat: payload.city.coord.lat,
                lon: payload.city.coord.lon,
            },
            country: payload.city.country,
            population: payload.city.population,
            timezone: payload.city.timezone,
            sunrise: payload.city.sunrise,
            sunset: payload.city.sunset,
        },
        list,
    })
}

fn map_entry(entry: EntryPayload) -> Result<ForecastEntry, GatewayError> {
    let condition = entry
        .weather
        .into_iter()
        .next()
        .ok_or(GatewayError::Malformed(
            "forecast entry has no weather condition",
        ))?;

    Ok(ForecastEntry {
        dt: entry.dt,
        dt_txt: entry.dt_txt,
        temperature: entry.main.temp,
        feels_like: entry.main.feels_like,
        temp_min: entry.main.temp_min,
        temp_max: entry.main.temp_max,
        temp_kf: entry.main.temp_kf,
        pressure: entry.main.pressure,
        sea_level: entry.main.sea_level,
        grnd_level: entry.main.grnd_level,
        humidity: entry.main.humidity,
        wind_speed: entry.wind.speed,
        wind_deg: entry.wind.deg,
        wind_gust: entry.wind.gust,
        clouds: entry.clouds.all,
        visibility: entry.visibility,
        pop: entry.pop,
        pod: entry.sys.pod,
        weather: WeatherCondition {
            id: condition.id,
            main: condition.main,
            description: condition.description,
            icon: condition.icon,
        },
    })
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    name: String,
    timezone: i32,
    visibility: i32,
    main: CurrentMain,
    wind: CurrentWind,
    clouds: CloudsPayload,
    weather: Vec<CurrentCondition>,
    sys: SysPayload,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct CurrentWind {
    speed: f64,
    deg: i32,
}

#[derive(Debug, Deserialize)]
struct CloudsPayload {
    all: i32,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct SysPayload {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    cod: String,
    message: Option<i64>,
    cnt: i64,
    city: CityPayload,
    list: Vec<EntryPayload>,
}

#[derive(Debug, Deserialize)]
struct CityPayload {
    id: i64,
    name: String,
    coord: CoordPayload,
    country: String,
    #[serde(default)]
    population: i64,
    timezone: i32,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct CoordPayload {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct EntryPayload {
    dt: i64,
    dt_txt: String,
    main: EntryMain,
    #[serde(default)]
    wind: EntryWind,
    clouds: CloudsPayload,
    #[serde(default)]
    visibility: i32,
    #[serde(default)]
    pop: f64,
    sys: EntrySys,
    weather: Vec<EntryCondition>,
}

#[derive(Debug, Deserialize)]
struct EntryMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    temp_kf: f64,
    pressure: i32,
    sea_level: i32,
    grnd_level: i32,
    humidity: i32,
}

// Individual fields default too: upstream sometimes sends a wind object with
// only `speed` and `deg`, or none at all.
#[derive(Debug, Default, Deserialize)]
struct EntryWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
    #[serde(default)]
    gust: f64,
}

#[derive(Debug, Deserialize)]
struct EntrySys {
    pod: String,
}

#[derive(Debug, Deserialize)]
struct EntryCondition {
    id: i64,
    main: String,
    description: String,
    icon: String,
}
