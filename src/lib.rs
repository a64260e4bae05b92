//! GraphQL gateway over the OpenWeatherMap REST API.
//!
//! Exposes two queries, `weather` and `weatherForecast`, each of which performs
//! a single upstream HTTP call and reshapes the JSON response into a fixed
//! GraphQL schema. The gateway is stateless: nothing is cached or shared
//! between requests.

pub mod config;
pub mod error;
pub mod models;
pub mod schema;
pub mod upstream;
