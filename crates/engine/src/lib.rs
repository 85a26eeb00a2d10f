//! Feasibility engine for EIT acquisition hardware.
//!
//! Turns a submitted device configuration into bandwidth, memory and latency
//! figures and decides whether the configuration fits the hardware limits.

pub mod calculator;
pub mod input;
