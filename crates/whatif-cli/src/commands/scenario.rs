use clap::Args;
use serde_json::Value;

use whatif_core::scenario::params::{EngineConfig, ScenarioParameters};
use whatif_core::scenario::report;
use whatif_core::scenario::simulate;
use whatif_core::scenario::sweep::{self, SweepInput};

use crate::input;

/// Arguments for a dual-ledger simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON file with scenario parameters
    #[arg(long)]
    pub input: Option<String>,
    /// Path to JSON file overriding the engine reference constants
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for a full scenario evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON file with scenario parameters
    #[arg(long)]
    pub input: Option<String>,
    /// Path to JSON file overriding the engine reference constants
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for a one-variable parameter sweep
#[derive(Args)]
pub struct SweepArgs {
    /// Path to JSON file with the sweep request (base parameters, field, range)
    #[arg(long)]
    pub input: Option<String>,
    /// Path to JSON file overriding the engine reference constants
    #[arg(long)]
    pub config: Option<String>,
}

fn load_config(path: &Option<String>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(input::file::read_json(p)?),
        None => Ok(EngineConfig::default()),
    }
}

fn load_input<T: serde::de::DeserializeOwned>(
    path: &Option<String>,
    context: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(p) = path {
        input::file::read_json(p)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <file.json> or stdin required for {context}").into())
    }
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: ScenarioParameters = load_input(&args.input, "simulate")?;
    let config = load_config(&args.config)?;
    let result = simulate::simulate(&params, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: ScenarioParameters = load_input(&args.input, "evaluate")?;
    let config = load_config(&args.config)?;
    let result = report::evaluate_scenario(&params, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: SweepInput = load_input(&args.input, "sweep")?;
    let config = load_config(&args.config)?;
    let result = sweep::sweep_parameter(&request, &config)?;
    Ok(serde_json::to_value(result)?)
}
