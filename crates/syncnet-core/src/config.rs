//! Network and simulation configuration.
//!
//! All knobs of the engine live here: ensemble size, coupling weight, the
//! cluster harmonic `q`, topology and initial-phase selectors, and the
//! adaptive-simulation policy. Configs are serde-serializable and validated
//! field by field before a network is built.

use serde::{Deserialize, Serialize};

use crate::initial::InitialPhases;
use crate::topology::ConnectionType;

/// Construction parameters for a [`SyncNetwork`](crate::SyncNetwork).
///
/// `weight` multiplies every connection uniformly; `cluster` is the harmonic
/// order `q` of the coupling term (`q = 1` is the classic Kuramoto model,
/// `q > 1` lets the network settle into `q` phase-locked groups). `frequency`
/// scales the natural frequencies, which are drawn uniformly from
/// `[0, frequency)`; the default `0.0` gives every oscillator an identical
/// zero natural frequency, the standard configuration for clustering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of oscillators. Must be > 0.
    pub size: usize,

    /// Coupling strength multiplier applied to all connections.
    pub weight: f64,

    /// Scale factor for natural frequencies.
    pub frequency: f64,

    /// Harmonic order `q` of the coupling term. Must be >= 1.
    pub cluster: u32,

    /// Connection scheme forwarded to the topology provider.
    pub connection: ConnectionType,

    /// Initial phase distribution strategy.
    pub initial_phases: InitialPhases,

    /// Seed for the construction-time RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            size: 10,
            weight: 1.0,
            frequency: 0.0,
            cluster: 1,
            connection: ConnectionType::AllToAll,
            initial_phases: InitialPhases::RandomUniform,
            seed: None,
        }
    }
}

impl NetworkConfig {
    /// Validate the network configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.size == 0 {
            return Err("size must be > 0".to_string());
        }
        if !self.weight.is_finite() {
            return Err(format!("weight must be finite, got {}", self.weight));
        }
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(format!(
                "frequency must be finite and >= 0, got {}",
                self.frequency
            ));
        }
        if self.cluster == 0 {
            return Err("cluster must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Policy for [`simulate_dynamic`](crate::SyncNetwork::simulate_dynamic).
///
/// The driver integrates in increments of `step` (with `step_int` as the
/// integrator's internal sub-step) until the target order is reached, the
/// order stabilizes below `threshold_changes`, or `max_iterations` increments
/// have run. The iteration cap guarantees termination even for unreachable
/// order targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// Integration increment per iteration.
    pub step: f64,

    /// Internal sub-step for the integrator.
    pub step_int: f64,

    /// Stop once the order changes less than this between iterations.
    pub threshold_changes: f64,

    /// Hard bound on the number of integration increments.
    pub max_iterations: usize,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            step_int: 0.01,
            threshold_changes: 1e-6,
            max_iterations: 10_000,
        }
    }
}

impl AdaptiveConfig {
    /// Validate the adaptive simulation policy.
    pub fn validate(&self) -> Result<(), String> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(format!("step must be finite and > 0, got {}", self.step));
        }
        if !self.step_int.is_finite() || self.step_int <= 0.0 {
            return Err(format!(
                "step_int must be finite and > 0, got {}",
                self.step_int
            ));
        }
        if !self.threshold_changes.is_finite() || self.threshold_changes < 0.0 {
            return Err(format!(
                "threshold_changes must be finite and >= 0, got {}",
                self.threshold_changes
            ));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        Ok(())
    }
}
