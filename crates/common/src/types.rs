use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which feasibility model to apply to a device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeasibilityMode {
    /// Resolution, compression, bandwidth, memory and latency checks.
    #[default]
    Full,
    /// Bandwidth ceiling only. Memory and latency are not reported.
    #[serde(alias = "reduced")]
    Bandwidth,
}

impl std::fmt::Display for FeasibilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeasibilityMode::Full => write!(f, "full"),
            FeasibilityMode::Bandwidth => write!(f, "bandwidth"),
        }
    }
}

impl FromStr for FeasibilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(FeasibilityMode::Full),
            "bandwidth" | "reduced" => Ok(FeasibilityMode::Bandwidth),
            other => Err(format!(
                "unknown feasibility mode '{}', expected 'full' or 'bandwidth'",
                other
            )),
        }
    }
}

/// How to treat configurations with fewer than four electrodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectrodePolicy {
    /// Reject `electrodes < 4` with a validation error.
    #[default]
    Reject,
    /// Compute anyway; zero or negative measurement counts pass through.
    Permissive,
}

impl std::fmt::Display for ElectrodePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElectrodePolicy::Reject => write!(f, "reject"),
            ElectrodePolicy::Permissive => write!(f, "permissive"),
        }
    }
}

impl FromStr for ElectrodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(ElectrodePolicy::Reject),
            "permissive" => Ok(ElectrodePolicy::Permissive),
            other => Err(format!(
                "unknown electrode policy '{}', expected 'reject' or 'permissive'",
                other
            )),
        }
    }
}

/// Acquisition device configuration submitted for a feasibility check.
///
/// Built from raw JSON by the engine so missing and mistyped fields can be
/// reported by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigInput {
    /// Number of electrodes (sensing channels)
    pub electrodes: i64,
    /// ADC resolution in bits per sample
    pub adc_resolution: i64,
    /// ADC sample rate in samples/second
    pub adc_sample_rate: f64,
    /// Oversampling multiplier
    pub oversampling: f64,
    /// Bits per measurement after compression
    pub compression_bits: i64,
    /// Frames per second
    pub frame_rate: f64,
    /// Caller-supplied bandwidth ceiling in Mbps
    pub max_bandwidth: f64,
}

/// Feasibility metrics returned to the caller.
///
/// Values are rounded for display; the verdict in `feasible` was reached on
/// the unrounded figures. `memory_per_frame_bytes` and `latency_estimate_ms`
/// are only present for [`FeasibilityMode::Full`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityResult {
    pub measurements_per_frame: i64,
    pub bandwidth_required_mbps: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_per_frame_bytes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_estimate_ms: Option<f64>,
    pub feasible: bool,
}
