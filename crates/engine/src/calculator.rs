//! Feasibility calculator — bandwidth, memory and latency for an EIT front end.
//!
//! For `n` electrodes the adjacent-drive protocol yields `n * (n - 3)`
//! measurements per frame. From that and the ADC settings the calculator
//! derives:
//! - link bandwidth needed to stream compressed frames
//! - frame buffer memory for the raw (oversampled) ADC samples
//! - latency through a fixed-depth pipeline and a fixed-speed serial link
//!
//! [`FeasibilityMode::Full`] requires every hardware limit to hold.
//! [`FeasibilityMode::Bandwidth`] only compares bandwidth to the caller's ceiling.
//! Verdicts always use unrounded figures; rounding happens in
//! [`Assessment::to_result`].

use serde_json::Value;

use eit_common::error::AppError;
use eit_common::types::{ConfigInput, ElectrodePolicy, FeasibilityMode, FeasibilityResult};

use crate::input::parse_config;

/// Highest ADC resolution the front end supports, in bits.
pub const MAX_ADC_RESOLUTION_BITS: i64 = 18;
/// Widest compressed measurement word, in bits.
pub const MAX_COMPRESSION_BITS: i64 = 32;
/// Frame buffer capacity in bytes.
pub const MAX_MEMORY_PER_FRAME_BYTES: f64 = 1_000_000.0;
/// End-to-end latency budget in milliseconds.
pub const MAX_LATENCY_MS: f64 = 10.0;
/// Processing pipeline depth in ADC clock cycles.
pub const PIPELINE_DEPTH_CYCLES: f64 = 100.0;
/// Serial link speed in Mbps.
pub const LINK_SPEED_MBPS: f64 = 1000.0;
/// Fewest electrodes that yield a positive measurement count.
pub const MIN_ELECTRODES: i64 = 4;

/// Outcome of one threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdCheck {
    pub name: &'static str,
    pub passed: bool,
}

/// Unrounded metrics and per-threshold outcomes for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub measurements_per_frame: i64,
    pub bits_per_frame: i64,
    pub bandwidth_mbps: f64,
    /// `None` in bandwidth-only mode
    pub memory_bytes: Option<f64>,
    /// `None` in bandwidth-only mode
    pub latency_ms: Option<f64>,
    pub checks: Vec<ThresholdCheck>,
}

impl Assessment {
    /// True when every threshold check passed.
    pub fn feasible(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    /// Names of the checks that failed, in evaluation order.
    pub fn failed_checks(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.name)
            .collect()
    }

    /// Round the metrics for display.
    pub fn to_result(&self) -> FeasibilityResult {
        FeasibilityResult {
            measurements_per_frame: self.measurements_per_frame,
            bandwidth_required_mbps: round_to(self.bandwidth_mbps, 2),
            memory_per_frame_bytes: self.memory_bytes.map(|bytes| round_to(bytes, 2)),
            latency_estimate_ms: self.latency_ms.map(|ms| round_to(ms, 4)),
            feasible: self.feasible(),
        }
    }
}

/// Stateless feasibility calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeasibilityCalculator {
    mode: FeasibilityMode,
    policy: ElectrodePolicy,
}

impl FeasibilityCalculator {
    pub fn new(mode: FeasibilityMode, policy: ElectrodePolicy) -> Self {
        Self { mode, policy }
    }

    /// Same calculator with a different mode.
    pub fn with_mode(self, mode: FeasibilityMode) -> Self {
        Self { mode, ..self }
    }

    pub fn mode(&self) -> FeasibilityMode {
        self.mode
    }

    pub fn policy(&self) -> ElectrodePolicy {
        self.policy
    }

    /// Parse a raw JSON body and compute its result.
    pub fn compute_json(&self, body: &Value) -> Result<FeasibilityResult, AppError> {
        let config = parse_config(body)?;
        self.compute(&config)
    }

    /// Compute display-rounded metrics and the feasibility verdict.
    pub fn compute(&self, config: &ConfigInput) -> Result<FeasibilityResult, AppError> {
        Ok(self.assess(config)?.to_result())
    }

    /// Validate preconditions and evaluate every threshold for the active mode.
    pub fn assess(&self, config: &ConfigInput) -> Result<Assessment, AppError> {
        self.check_preconditions(config)?;

        let measurements = config
            .electrodes
            .checked_sub(3)
            .and_then(|others| config.electrodes.checked_mul(others))
            .ok_or_else(|| AppError::InvalidValue {
                field: "electrodes",
                reason: "measurement count overflows".to_string(),
            })?;
        let bits_per_frame = measurements
            .checked_mul(config.compression_bits)
            .ok_or_else(|| AppError::InvalidValue {
                field: "compression_bits",
                reason: "bits per frame overflows".to_string(),
            })?;
        let bandwidth_mbps = finite(
            "bandwidth_required_mbps",
            bits_per_frame as f64 * config.frame_rate / 1_000_000.0,
        )?;

        let mut checks = Vec::with_capacity(5);
        let (memory_bytes, latency_ms) = match self.mode {
            FeasibilityMode::Full => {
                let memory = finite("memory_per_frame_bytes", memory_per_frame_bytes(config))?;
                let latency = finite(
                    "latency_estimate_ms",
                    latency_ms(bits_per_frame, config.adc_sample_rate),
                )?;

                checks.push(ThresholdCheck {
                    name: "adc_resolution",
                    passed: config.adc_resolution <= MAX_ADC_RESOLUTION_BITS,
                });
                checks.push(ThresholdCheck {
                    name: "compression_bits",
                    passed: config.compression_bits <= MAX_COMPRESSION_BITS,
                });
                checks.push(bandwidth_check(bandwidth_mbps, config.max_bandwidth));
                checks.push(ThresholdCheck {
                    name: "memory",
                    passed: memory <= MAX_MEMORY_PER_FRAME_BYTES,
                });
                checks.push(ThresholdCheck {
                    name: "latency",
                    passed: latency <= MAX_LATENCY_MS,
                });
                (Some(memory), Some(latency))
            }
            FeasibilityMode::Bandwidth => {
                checks.push(bandwidth_check(bandwidth_mbps, config.max_bandwidth));
                (None, None)
            }
        };

        let assessment = Assessment {
            measurements_per_frame: measurements,
            bits_per_frame,
            bandwidth_mbps,
            memory_bytes,
            latency_ms,
            checks,
        };

        tracing::debug!(
            mode = %self.mode,
            electrodes = config.electrodes,
            measurements,
            bandwidth_mbps,
            feasible = assessment.feasible(),
            failed = ?assessment.failed_checks(),
            "Feasibility assessed"
        );

        Ok(assessment)
    }

    fn check_preconditions(&self, config: &ConfigInput) -> Result<(), AppError> {
        if self.policy == ElectrodePolicy::Reject && config.electrodes < MIN_ELECTRODES {
            return Err(AppError::InvalidValue {
                field: "electrodes",
                reason: format!(
                    "must be at least {} (got {})",
                    MIN_ELECTRODES, config.electrodes
                ),
            });
        }
        // NaN fails both comparisons, so it is rejected here too
        if !(config.frame_rate > 0.0) {
            return Err(AppError::InvalidValue {
                field: "frame_rate",
                reason: format!("must be greater than zero (got {})", config.frame_rate),
            });
        }
        if !(config.adc_sample_rate > 0.0) {
            return Err(AppError::InvalidValue {
                field: "adc_sample_rate",
                reason: format!(
                    "must be greater than zero (got {})",
                    config.adc_sample_rate
                ),
            });
        }
        Ok(())
    }
}

/// Inputs near the f64 limits can push a metric to `inf` or `NaN`.
fn finite(field: &'static str, value: f64) -> Result<f64, AppError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::InvalidValue {
            field,
            reason: "result is not finite".to_string(),
        })
    }
}

fn bandwidth_check(bandwidth_mbps: f64, max_bandwidth: f64) -> ThresholdCheck {
    ThresholdCheck {
        name: "bandwidth",
        passed: bandwidth_mbps <= max_bandwidth,
    }
}

fn memory_per_frame_bytes(config: &ConfigInput) -> f64 {
    let samples_per_channel = (config.adc_sample_rate / config.frame_rate) * config.oversampling;
    let total_samples = samples_per_channel * config.electrodes as f64;
    total_samples * (config.adc_resolution as f64 / 8.0)
}

fn latency_ms(bits_per_frame: i64, adc_sample_rate: f64) -> f64 {
    let transfer_ms = (bits_per_frame as f64 / LINK_SPEED_MBPS) / 1000.0;
    let pipeline_ms = (PIPELINE_DEPTH_CYCLES / adc_sample_rate) * 1000.0;
    transfer_ms + pipeline_ms
}

/// Round half away from zero to `decimals` places.
///
/// Values too large to scale are returned unchanged; they carry no
/// fractional digits at that magnitude anyway.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
