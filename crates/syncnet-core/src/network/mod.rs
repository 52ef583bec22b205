//! Oscillatory network: state, dynamics, order metrics, ensemble extraction.
//!
//! The network owns its oscillator ensemble and evolves it with a
//! generalized Kuramoto coupling:
//!
//! ```text
//! dθ_i/dt = ω_i + (w / |N(i)|) · Σ_{j ∈ N(i)} sin(q · (θ_j − θ_i))
//! ```
//!
//! After simulation, oscillators that converged to (near-)identical phase
//! are grouped into synchronization ensembles — the clustering output.
//!
//! # Example
//!
//! ```
//! use syncnet_core::{AdaptiveConfig, NetworkConfig, SolveType, SyncNetwork};
//!
//! let config = NetworkConfig {
//!     size: 10,
//!     weight: 10.0,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let mut network = SyncNetwork::new(&config).unwrap();
//!
//! // Run until the ensemble synchronizes, then extract clusters.
//! network
//!     .simulate_dynamic(0.999, SolveType::Rk4, false, &AdaptiveConfig::default())
//!     .unwrap();
//! let ensembles = network.allocate_sync_ensembles(0.05).unwrap();
//! assert!(!ensembles.is_empty());
//! ```

mod coupling;
mod ensembles;
mod order;
mod simulation;
mod types;

#[cfg(test)]
mod tests;

pub use coupling::{CouplingContext, CouplingFunction, KuramotoCoupling};
pub use ensembles::{phase_normalization, DEFAULT_ENSEMBLE_TOLERANCE};
pub use types::{DynamicSample, OrderSample, Oscillator, SyncNetwork};
