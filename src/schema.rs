use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Result, Schema};
use tracing::info;

use crate::models::{CurrentWeather, ForecastResponse};
use crate::upstream::OpenWeatherClient;

pub type GatewaySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Current conditions for a city, proxied from the upstream `/weather`
    /// endpoint.
    async fn weather(&self, ctx: &Context<'_>, city: String) -> Result<CurrentWeather> {
        info!(city = %city, "Weather query received");

        let client = ctx.data_unchecked::<OpenWeatherClient>();
        Ok(client.current_weather(&city).await?)
    }

    /// 3-hourly forecast for a city, proxied from the upstream `/forecast`
    /// endpoint.
    async fn weather_forecast(&self, ctx: &Context<'_>, city: String) -> Result<ForecastResponse> {
        info!(city = %city, "Forecast query received");

        let client = ctx.data_unchecked::<OpenWeatherClient>();
        Ok(client.forecast(&city).await?)
    }
}

pub fn build_schema(client: OpenWeatherClient) -> GatewaySchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(client)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn sdl_exposes_snake_case_fields_and_both_queries() {
        let client = OpenWeatherClient::new(
            "http://localhost".to_string(),
            "test-key".to_string(),
            Duration::from_secs(1),
        );
        let sdl = build_schema(client).sdl();

        assert!(sdl.contains("weather(city: String!): CurrentWeather!"));
        assert!(sdl.contains("weatherForecast(city: String!): ForecastResponse!"));
        assert!(sdl.contains("feels_like: Float!"));
        assert!(sdl.contains("dt_txt: String!"));
        assert!(sdl.contains("wind_gust: Float!"));
    }
}
