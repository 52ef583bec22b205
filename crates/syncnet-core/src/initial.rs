//! Initial phase distribution strategies.
//!
//! A strategy maps an oscillator index (and a source of randomness) to a
//! starting phase. Random variants draw from the supplied RNG so that a
//! seeded network is fully reproducible.

use std::f64::consts::{FRAC_PI_4, PI};

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::network::phase_normalization;

/// Initial phase distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialPhases {
    /// Uniform random over `[0, 2π)`.
    RandomUniform,
    /// Gaussian `N(π, π/4)`, wrapped into `[0, 2π)`.
    RandomGaussian,
    /// Evenly spaced: oscillator `i` starts at `i · 2π / size`.
    Equipartition,
}

/// Produce the initial phase vector for `size` oscillators.
pub fn generate(kind: InitialPhases, size: usize, rng: &mut impl Rng) -> Vec<f64> {
    (0..size)
        .map(|index| match kind {
            InitialPhases::RandomUniform => rng.gen_range(0.0..2.0 * PI),
            InitialPhases::RandomGaussian => {
                let z: f64 = rng.sample(StandardNormal);
                phase_normalization(PI + z * FRAC_PI_4)
            }
            InitialPhases::Equipartition => 2.0 * PI * index as f64 / size as f64,
        })
        .collect()
}
