//! Coupling functions: the per-oscillator phase derivative.
//!
//! The derivative of one oscillator is evaluated against a frozen phase
//! vector, so the integrator can probe intermediate `theta` values without
//! touching network state. Variants are selected at construction and
//! dispatched through `CouplingFunction`.

use std::fmt;

use super::types::SyncNetwork;

/// Read-only inputs for one derivative evaluation.
#[derive(Debug, Clone, Copy)]
pub struct CouplingContext<'a> {
    /// Frozen phase vector of the whole ensemble (previous step).
    pub phases: &'a [f64],
    /// Neighbor indices of the oscillator being advanced.
    pub neighbors: &'a [usize],
    /// Natural frequency `ω` of the oscillator being advanced.
    pub frequency: f64,
    /// Network-wide coupling strength multiplier.
    pub weight: f64,
}

/// Instantaneous phase derivative `dθ/dt` for one oscillator.
///
/// Implementations must be pure with respect to their explicit inputs.
pub trait CouplingFunction: fmt::Debug + Send + Sync {
    /// Evaluate `dθ/dt` at time `t` for oscillator `index`, whose candidate
    /// phase is `theta` (the integrator may probe values differing from
    /// `ctx.phases[index]` mid-step).
    fn phase_derivative(&self, t: f64, theta: f64, index: usize, ctx: &CouplingContext<'_>)
        -> f64;
}

/// Generalized Kuramoto coupling.
///
/// ```text
/// dθ_i/dt = ω_i + (w / |N(i)|) · Σ_{j ∈ N(i)} sin(q · (θ_j − θ_i))
/// ```
///
/// `q = 1` is classic pairwise phase attraction; `q > 1` lets the network
/// stabilize into `q` distinct phase-locked groups. An oscillator without
/// neighbors evolves at its natural frequency only.
#[derive(Debug, Clone, Copy)]
pub struct KuramotoCoupling {
    harmonics: u32,
}

impl KuramotoCoupling {
    /// Coupling with harmonic order `q` (the network's `cluster` parameter).
    pub fn new(harmonics: u32) -> Self {
        Self { harmonics }
    }

    /// Harmonic order `q`.
    #[inline]
    pub fn harmonics(&self) -> u32 {
        self.harmonics
    }
}

impl CouplingFunction for KuramotoCoupling {
    fn phase_derivative(
        &self,
        _t: f64,
        theta: f64,
        _index: usize,
        ctx: &CouplingContext<'_>,
    ) -> f64 {
        if ctx.neighbors.is_empty() {
            return ctx.frequency;
        }

        let q = f64::from(self.harmonics);
        let sum: f64 = ctx
            .neighbors
            .iter()
            .map(|&j| (q * (ctx.phases[j] - theta)).sin())
            .sum();
        ctx.frequency + ctx.weight / ctx.neighbors.len() as f64 * sum
    }
}

impl SyncNetwork {
    /// Phase derivative of oscillator `index` at candidate phase `theta`,
    /// given a frozen phase vector.
    pub(crate) fn phase_kuramoto(&self, t: f64, theta: f64, index: usize, phases: &[f64]) -> f64 {
        let ctx = CouplingContext {
            phases,
            neighbors: self.topology.neighbors(index),
            frequency: self.oscillators[index].frequency,
            weight: self.weight,
        };
        self.coupling.phase_derivative(t, theta, index, &ctx)
    }
}
