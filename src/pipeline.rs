//! Pipeline steps: run one remote call and turn the outcome into an action

use std::sync::Arc;

use crate::action::{Action, Fetched};
use crate::api::{ApiError, WeatherApi};
use crate::state::{RequestId, ResolvedLocation};

pub async fn geocode(api: Arc<dyn WeatherApi>, request: RequestId, query: String) -> Action {
    match api.geocode(&query).await {
        Ok(location) => Action::WeatherLocationDidResolve(Fetched::new(request, location)),
        Err(e) => failed(request, e),
    }
}

pub async fn current(
    api: Arc<dyn WeatherApi>,
    request: RequestId,
    location: ResolvedLocation,
) -> Action {
    match api.current(&location).await {
        Ok(conditions) => Action::WeatherCurrentDidLoad(Fetched::new(request, conditions)),
        Err(e) => failed(request, e),
    }
}

pub async fn daily(
    api: Arc<dyn WeatherApi>,
    request: RequestId,
    location: ResolvedLocation,
) -> Action {
    match api.daily(&location).await {
        Ok(forecast) => Action::WeatherDailyDidLoad(Fetched::new(request, forecast)),
        Err(e) => failed(request, e),
    }
}

fn failed(request: RequestId, error: ApiError) -> Action {
    Action::WeatherDidError(Fetched::new(request, error.to_string()))
}
