//! Oscillatory network engine for synchronization-based clustering.
//!
//! This crate simulates a network of coupled phase oscillators governed by a
//! Kuramoto-style model and uses the resulting synchronization behavior for
//! unsupervised clustering: oscillators that converge to (near-)identical
//! phase form one cluster.
//!
//! ```text
//! dθ_i/dt = ω_i + (w / |N(i)|) · Σ_{j ∈ N(i)} sin(q · (θ_j − θ_i))
//! ```
//!
//! # Modules
//!
//! - [`config`]: Network and adaptive-simulation configuration
//! - [`error`]: Error types and result alias
//! - [`topology`]: Connection schemes and precomputed neighbor sets
//! - [`initial`]: Initial phase distribution strategies
//! - [`solver`]: Euler, Runge-Kutta 4 and Runge-Kutta-Fehlberg integrators
//! - [`network`]: The network itself — dynamics, order metrics, ensembles
//!
//! # Example
//!
//! ```
//! use syncnet_core::{NetworkConfig, SolveType, SyncNetwork};
//!
//! let config = NetworkConfig {
//!     size: 10,
//!     weight: 5.0,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let mut network = SyncNetwork::new(&config).expect("valid config");
//!
//! // Fixed-step run, recording every intermediate state.
//! let dynamic = network.simulate(25, 2.5, SolveType::Rk4, true).expect("simulation");
//! assert_eq!(dynamic.len(), 10);
//! assert_eq!(dynamic[0].len(), 26);
//!
//! // Group oscillators by phase proximity.
//! let ensembles = network.allocate_sync_ensembles(0.05).expect("valid tolerance");
//! assert!(!ensembles.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod initial;
pub mod network;
pub mod solver;
pub mod topology;

pub use config::{AdaptiveConfig, NetworkConfig};
pub use error::{SyncNetError, SyncNetResult};
pub use initial::InitialPhases;
pub use network::{
    phase_normalization, CouplingContext, CouplingFunction, DynamicSample, KuramotoCoupling,
    OrderSample, Oscillator, SyncNetwork, DEFAULT_ENSEMBLE_TOLERANCE,
};
pub use solver::SolveType;
pub use topology::{ConnectionType, Topology};
