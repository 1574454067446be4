use crate::error::{BfResult, BodyForgeError};
use crate::measurement::{parse_value, MeasurementKey};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub probe: ProbeParams,
    #[command(flatten)]
    pub output: OutputParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeParams {
    #[arg(long, default_value_t = 1_000)]
    pub probe_samples: usize,
    /// Relative perturbation applied to each measurement (0.1 = +/-10%).
    #[arg(long, default_value_t = 0.1)]
    pub probe_spread: f64,
    #[arg(long, default_value_t = 42)]
    pub probe_seed: u64,
}

impl Default for ProbeParams {
    fn default() -> Self {
        Self {
            probe_samples: 1_000,
            probe_spread: 0.1,
            probe_seed: 42,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputParams {
    /// Emit JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// Print every segment stage of the chain.
    #[arg(long, default_value_t = false)]
    pub show_chain: bool,
    #[arg(long, default_value_t = 6)]
    pub table_precision: usize,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            json: false,
            show_chain: false,
            table_precision: 6,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Values typed on the command line win over the ones from a file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(probe.probe_samples);
        update_if_present!(probe.probe_spread);
        update_if_present!(probe.probe_seed);
        update_if_present!(output.json);
        update_if_present!(output.show_chain);
        update_if_present!(output.table_precision);
    }
}

/// Parses `"Height=185, Thigh Length=50"` style overrides.
pub fn parse_overrides(s: &str) -> BfResult<Vec<(MeasurementKey, f64)>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (name, value) = part.split_once('=').ok_or_else(|| {
                BodyForgeError::InvalidInput(format!("'{}' is not NAME=VALUE", part))
            })?;
            let key: MeasurementKey = name.trim().parse().map_err(|_| {
                BodyForgeError::InvalidInput(format!("unknown measurement '{}'", name.trim()))
            })?;
            let value = parse_value(value).ok_or_else(|| {
                BodyForgeError::InvalidInput(format!("'{}' is not a finite number", value.trim()))
            })?;
            Ok((key, value))
        })
        .collect()
}
