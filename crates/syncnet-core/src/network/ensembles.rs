//! Post-simulation ensemble extraction.
//!
//! Oscillators whose normalized phases converged to within a tolerance form
//! one ensemble. Membership propagates transitively through chains of
//! pairwise-close oscillators, and the resulting partition does not depend on
//! traversal order: phases are sorted canonically first.

use std::f64::consts::PI;

use crate::error::{SyncNetError, SyncNetResult};

use super::types::SyncNetwork;

/// Default phase tolerance for [`SyncNetwork::allocate_sync_ensembles`].
pub const DEFAULT_ENSEMBLE_TOLERANCE: f64 = 0.01;

/// Map an arbitrary phase into the canonical range `[0, 2π)` by periodic
/// wrap.
///
/// Idempotent, and invariant under shifts by whole turns:
/// `phase_normalization(θ + 2π·k) == phase_normalization(θ)` up to floating
/// point.
pub fn phase_normalization(teta: f64) -> f64 {
    let wrapped = teta.rem_euclid(2.0 * PI);
    // rem_euclid can round a tiny negative input up to exactly 2π.
    if wrapped >= 2.0 * PI {
        0.0
    } else {
        wrapped
    }
}

impl SyncNetwork {
    /// Partition oscillator indices into ensembles of near-identical
    /// normalized phase.
    ///
    /// Two oscillators share an ensemble iff their normalized phases are
    /// within `tolerance` of each other, transitively. Every index appears in
    /// exactly one ensemble; members are listed in ascending index order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a negative or non-finite tolerance.
    pub fn allocate_sync_ensembles(&self, tolerance: f64) -> SyncNetResult<Vec<Vec<usize>>> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(SyncNetError::invalid_arg(
                "tolerance",
                tolerance,
                "must be finite and >= 0",
            ));
        }

        let mut ordered: Vec<(usize, f64)> = self
            .oscillators
            .iter()
            .enumerate()
            .map(|(index, oscillator)| (index, phase_normalization(oscillator.phase)))
            .collect();
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

        // Chaining adjacent sorted phases is exactly the transitive closure
        // of the pairwise-within-tolerance relation on the phase line.
        let mut ensembles: Vec<Vec<usize>> = Vec::new();
        let mut current = vec![ordered[0].0];
        let mut previous_phase = ordered[0].1;
        for &(index, phase) in &ordered[1..] {
            if phase - previous_phase <= tolerance {
                current.push(index);
            } else {
                ensembles.push(std::mem::replace(&mut current, vec![index]));
            }
            previous_phase = phase;
        }
        ensembles.push(current);

        for ensemble in &mut ensembles {
            ensemble.sort_unstable();
        }
        Ok(ensembles)
    }
}
