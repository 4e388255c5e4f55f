use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use whatif_core::scenario::params::{EngineConfig, ScenarioParameters};
use whatif_core::scenario::sweep::SweepInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Scenario parameters plus an optional engine config override.
#[derive(Deserialize)]
struct ScenarioRequest {
    params: ScenarioParameters,
    config: Option<EngineConfig>,
}

/// Sweep request plus an optional engine config override.
#[derive(Deserialize)]
struct SweepRequest {
    sweep: SweepInput,
    config: Option<EngineConfig>,
}

#[napi]
pub fn simulate_scenario(input_json: String) -> NapiResult<String> {
    let request: ScenarioRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = request.config.unwrap_or_default();
    let output = whatif_core::scenario::simulate::simulate(&request.params, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn evaluate_scenario(input_json: String) -> NapiResult<String> {
    let request: ScenarioRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = request.config.unwrap_or_default();
    let output = whatif_core::scenario::report::evaluate_scenario(&request.params, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sweep_scenario(input_json: String) -> NapiResult<String> {
    let request: SweepRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = request.config.unwrap_or_default();
    let output = whatif_core::scenario::sweep::sweep_parameter(&request.sweep, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
