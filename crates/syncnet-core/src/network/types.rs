//! Network type definitions and construction.
//!
//! `SyncNetwork` owns the oscillator ensemble for its whole lifetime: phases
//! are seeded at construction per the initial-phase strategy, natural
//! frequencies are drawn once and never mutated by the engine, and the
//! topology is computed once and held fixed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NetworkConfig;
use crate::error::{SyncNetError, SyncNetResult};
use crate::initial;
use crate::topology::{ConnectionType, Topology};

use super::coupling::{CouplingFunction, KuramotoCoupling};

/// One phase oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Phase angle in radians. Canonically reducible to `[0, 2π)` but not
    /// required to be stored normalized between steps.
    pub phase: f64,
    /// Natural (intrinsic) frequency, fixed at construction.
    pub frequency: f64,
}

/// One oscillator's phase at one recorded instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicSample {
    /// Simulation time of the sample.
    pub time: f64,
    /// Phase at that time.
    pub phase: f64,
}

/// Global synchronization order at one recorded instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSample {
    /// Simulation time of the sample.
    pub time: f64,
    /// Global order parameter at that time.
    pub order: f64,
}

/// Oscillatory network with Kuramoto-style phase dynamics.
///
/// The ensemble is exclusively owned and mutated in place, one full-vector
/// update per simulation step. Order metrics and the ensemble allocator only
/// read it.
#[derive(Debug)]
pub struct SyncNetwork {
    pub(crate) oscillators: Vec<Oscillator>,
    pub(crate) topology: Topology,
    pub(crate) weight: f64,
    pub(crate) cluster: u32,
    pub(crate) coupling: Box<dyn CouplingFunction>,
}

impl SyncNetwork {
    /// Build a network from configuration, using the generalized Kuramoto
    /// coupling with harmonic order `config.cluster`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for invalid configuration values and
    /// `InvalidArgument` if the connection scheme rejects the size (grid
    /// schemes require a perfect square).
    ///
    /// # Example
    ///
    /// ```
    /// use syncnet_core::{NetworkConfig, SyncNetwork};
    ///
    /// let config = NetworkConfig {
    ///     size: 10,
    ///     seed: Some(7),
    ///     ..Default::default()
    /// };
    /// let network = SyncNetwork::new(&config).expect("valid config");
    /// assert_eq!(network.size(), 10);
    /// ```
    pub fn new(config: &NetworkConfig) -> SyncNetResult<Self> {
        Self::with_coupling(config, Box::new(KuramotoCoupling::new(config.cluster)))
    }

    /// Build a network with a caller-supplied coupling variant.
    pub fn with_coupling(
        config: &NetworkConfig,
        coupling: Box<dyn CouplingFunction>,
    ) -> SyncNetResult<Self> {
        config.validate().map_err(SyncNetError::ConfigError)?;
        let topology = Topology::new(config.connection, config.size)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let phases = initial::generate(config.initial_phases, config.size, &mut rng);
        let oscillators = phases
            .into_iter()
            .map(|phase| Oscillator {
                phase,
                frequency: rng.gen_range(0.0..1.0) * config.frequency,
            })
            .collect();

        debug!(
            size = config.size,
            connection = ?config.connection,
            cluster = config.cluster,
            weight = config.weight,
            "sync network constructed"
        );

        Ok(Self {
            oscillators,
            topology,
            weight: config.weight,
            cluster: config.cluster,
            coupling,
        })
    }

    /// Number of oscillators.
    #[inline]
    pub fn size(&self) -> usize {
        self.oscillators.len()
    }

    /// Network-wide coupling strength multiplier.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Harmonic order `q` of the coupling term.
    #[inline]
    pub fn cluster_order(&self) -> u32 {
        self.cluster
    }

    /// Connection scheme the topology was built from.
    #[inline]
    pub fn connection(&self) -> ConnectionType {
        self.topology.connection()
    }

    /// The fixed topology of this network.
    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Current phase vector, in oscillator-index order.
    pub fn phases(&self) -> Vec<f64> {
        self.oscillators.iter().map(|o| o.phase).collect()
    }

    /// Natural frequencies, in oscillator-index order.
    pub fn frequencies(&self) -> Vec<f64> {
        self.oscillators.iter().map(|o| o.frequency).collect()
    }

    /// Oscillator at `index`, if in range.
    pub fn oscillator(&self, index: usize) -> Option<&Oscillator> {
        self.oscillators.get(index)
    }

    /// Overwrite the phase of one oscillator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `index` is out of range or `phase` is not
    /// finite.
    pub fn set_phase(&mut self, index: usize, phase: f64) -> SyncNetResult<()> {
        if index >= self.oscillators.len() {
            return Err(SyncNetError::invalid_arg(
                "index",
                index,
                format!("out of range [0, {})", self.oscillators.len()),
            ));
        }
        if !phase.is_finite() {
            return Err(SyncNetError::invalid_arg(
                "phase",
                phase,
                "must be finite",
            ));
        }
        self.oscillators[index].phase = phase;
        Ok(())
    }
}
