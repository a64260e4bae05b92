//! GraphQL output types.
//!
//! Every value here is built fresh per request from one upstream response and
//! dropped once the response is serialized. Field names are kept in snake_case
//! to match the upstream payload they are copied from.

use async_graphql::SimpleObject;

/// Flat current-conditions record. Every numeric field is copied verbatim from
/// the upstream `/weather` payload (requested in metric units, no conversion).
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct CurrentWeather {
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
    pub wind_speed: f64,
    pub wind_deg: i32,
    pub clouds: i32,
    pub main: String,
    pub icon: String,
    pub city: String,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub timezone: i32,
    pub visibility: i32,
}

/// Envelope of the `/forecast` endpoint: upstream status fields copied
/// verbatim, plus the mapped city and entry list in upstream order.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct ForecastResponse {
    pub cod: String,
    pub message: Option<i64>,
    pub cnt: i64,
    pub city: CityInfo,
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct CityInfo {
    pub id: i64,
    pub name: String,
    pub coord: Coordinates,
    pub country: String,
    pub population: i64,
    pub timezone: i32,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One upstream 3-hour forecast slot. Wind, visibility and precipitation
/// probability default to 0 when the upstream omits them; everything else is
/// required.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct ForecastEntry {
    pub dt: i64,
    pub dt_txt: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_kf: f64,
    pub pressure: i32,
    pub sea_level: i32,
    pub grnd_level: i32,
    pub humidity: i32,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub wind_gust: f64,
    pub clouds: i32,
    pub visibility: i32,
    pub pop: f64,
    pub pod: String,
    pub weather: WeatherCondition,
}

/// First element of an entry's upstream weather list.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}
