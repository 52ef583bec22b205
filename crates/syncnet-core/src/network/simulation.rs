//! Simulation driver: fixed-step and adaptive phase evolution.
//!
//! Every step is a synchronous (Jacobi) update: each oscillator's new phase
//! is obtained by integrating its scalar ODE against the frozen phase vector
//! of the previous step, never against already-updated neighbors. Non-finite
//! phases abort the run immediately; no partial trajectory is returned.

use tracing::{debug, trace};

use crate::config::AdaptiveConfig;
use crate::error::{SyncNetError, SyncNetResult};
use crate::solver::{self, SolveType};

use super::coupling::CouplingContext;
use super::types::{DynamicSample, OrderSample, SyncNetwork};

impl SyncNetwork {
    /// Fixed-step simulation over `[0, time]` in `steps` equal increments.
    ///
    /// Returns one trajectory per oscillator: `steps + 1` samples (including
    /// the initial state) when `collect_dynamic` is set, otherwise a single
    /// terminal sample at `t = time`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for `steps == 0` or a non-finite or non-positive
    /// `time`; `NumericDivergence` if integration produces a non-finite
    /// phase.
    pub fn simulate(
        &mut self,
        steps: usize,
        time: f64,
        solver: SolveType,
        collect_dynamic: bool,
    ) -> SyncNetResult<Vec<Vec<DynamicSample>>> {
        if steps == 0 {
            return Err(SyncNetError::invalid_arg("steps", steps, "must be > 0"));
        }
        if !time.is_finite() || time <= 0.0 {
            return Err(SyncNetError::invalid_arg(
                "time",
                time,
                "must be finite and > 0",
            ));
        }

        let step = time / steps as f64;
        let int_step = step / 10.0;
        debug!(steps, time, solver = ?solver, collect_dynamic, "fixed-step simulation started");

        let mut dynamic: Vec<Vec<DynamicSample>> = self
            .oscillators
            .iter()
            .map(|oscillator| {
                let mut trajectory = Vec::with_capacity(if collect_dynamic { steps + 1 } else { 1 });
                if collect_dynamic {
                    trajectory.push(DynamicSample {
                        time: 0.0,
                        phase: oscillator.phase,
                    });
                }
                trajectory
            })
            .collect();

        for k in 1..=steps {
            let t = step * k as f64;
            self.calculate_phases(solver, t - step, step, int_step)?;
            if collect_dynamic {
                for (trajectory, oscillator) in dynamic.iter_mut().zip(&self.oscillators) {
                    trajectory.push(DynamicSample {
                        time: t,
                        phase: oscillator.phase,
                    });
                }
            }
        }

        if !collect_dynamic {
            let t_final = step * steps as f64;
            for (trajectory, oscillator) in dynamic.iter_mut().zip(&self.oscillators) {
                trajectory.push(DynamicSample {
                    time: t_final,
                    phase: oscillator.phase,
                });
            }
        }

        Ok(dynamic)
    }

    /// Fixed-topology fixed-step simulation.
    ///
    /// Kept as a distinct entry point for API symmetry; behaviorally
    /// equivalent to [`simulate`](Self::simulate).
    pub fn simulate_static(
        &mut self,
        steps: usize,
        time: f64,
        solver: SolveType,
        collect_dynamic: bool,
    ) -> SyncNetResult<Vec<Vec<DynamicSample>>> {
        self.simulate(steps, time, solver, collect_dynamic)
    }

    /// Adaptive simulation: integrate in increments of `options.step` until
    /// the global order reaches `order`, the order stabilizes (successive
    /// change below `options.threshold_changes`), or
    /// `options.max_iterations` increments have run.
    ///
    /// Non-convergence is not an error; the cap guarantees termination and
    /// the best-effort trace is returned. The result is the `{time, order}`
    /// trace per increment (with the initial sample) when `collect_dynamic`,
    /// else the terminal sample only.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a non-finite `order`, non-positive
    /// `step`/`step_int`, negative `threshold_changes`, or a zero iteration
    /// cap; `NumericDivergence` from the integrator.
    ///
    /// # Example
    ///
    /// ```
    /// use syncnet_core::{AdaptiveConfig, NetworkConfig, SolveType, SyncNetwork};
    ///
    /// let config = NetworkConfig {
    ///     size: 8,
    ///     weight: 10.0,
    ///     seed: Some(3),
    ///     ..Default::default()
    /// };
    /// let mut network = SyncNetwork::new(&config).unwrap();
    /// let trace = network
    ///     .simulate_dynamic(0.99, SolveType::Rk4, false, &AdaptiveConfig::default())
    ///     .unwrap();
    /// assert_eq!(trace.len(), 1);
    /// assert!(trace[0].order >= 0.99);
    /// ```
    pub fn simulate_dynamic(
        &mut self,
        order: f64,
        solver: SolveType,
        collect_dynamic: bool,
        options: &AdaptiveConfig,
    ) -> SyncNetResult<Vec<OrderSample>> {
        if !order.is_finite() {
            return Err(SyncNetError::invalid_arg("order", order, "must be finite"));
        }
        if !options.step.is_finite() || options.step <= 0.0 {
            return Err(SyncNetError::invalid_arg(
                "step",
                options.step,
                "must be finite and > 0",
            ));
        }
        if !options.step_int.is_finite() || options.step_int <= 0.0 {
            return Err(SyncNetError::invalid_arg(
                "step_int",
                options.step_int,
                "must be finite and > 0",
            ));
        }
        if !options.threshold_changes.is_finite() || options.threshold_changes < 0.0 {
            return Err(SyncNetError::invalid_arg(
                "threshold_changes",
                options.threshold_changes,
                "must be finite and >= 0",
            ));
        }
        if options.max_iterations == 0 {
            return Err(SyncNetError::invalid_arg(
                "max_iterations",
                options.max_iterations,
                "must be > 0",
            ));
        }

        debug!(
            order,
            solver = ?solver,
            step = options.step,
            max_iterations = options.max_iterations,
            "adaptive simulation started"
        );

        let mut time = 0.0;
        let mut current_order = self.sync_order();
        let mut dynamic = Vec::new();
        if collect_dynamic {
            dynamic.push(OrderSample {
                time,
                order: current_order,
            });
        }

        let mut iterations = 0usize;
        while current_order < order {
            if iterations >= options.max_iterations {
                debug!(
                    iterations,
                    order = current_order,
                    "iteration cap reached before target order"
                );
                break;
            }

            self.calculate_phases(solver, time, options.step, options.step_int)?;
            time += options.step;
            iterations += 1;

            let previous_order = current_order;
            current_order = self.sync_order();
            trace!(iteration = iterations, time, order = current_order, "adaptive increment");

            if collect_dynamic {
                dynamic.push(OrderSample {
                    time,
                    order: current_order,
                });
            }

            if (current_order - previous_order).abs() < options.threshold_changes {
                debug!(
                    time,
                    order = current_order,
                    "order stabilized below change threshold"
                );
                break;
            }
        }

        if !collect_dynamic {
            dynamic.push(OrderSample {
                time,
                order: current_order,
            });
        }
        Ok(dynamic)
    }

    /// Advance the full phase vector from `t` to `t + step`.
    ///
    /// Synchronous update: derivatives are evaluated against the frozen old
    /// phase vector and the new vector is committed only after every
    /// oscillator integrated successfully.
    pub(crate) fn calculate_phases(
        &mut self,
        solver: SolveType,
        t: f64,
        step: f64,
        int_step: f64,
    ) -> SyncNetResult<()> {
        let frozen: Vec<f64> = self.oscillators.iter().map(|o| o.phase).collect();
        let mut next = Vec::with_capacity(frozen.len());

        for (index, oscillator) in self.oscillators.iter().enumerate() {
            let ctx = CouplingContext {
                phases: &frozen,
                neighbors: self.topology.neighbors(index),
                frequency: oscillator.frequency,
                weight: self.weight,
            };
            let coupling = &self.coupling;
            let phase = solver::integrate(
                solver,
                |tau, theta| coupling.phase_derivative(tau, theta, index, &ctx),
                t,
                frozen[index],
                step,
                int_step,
            );

            if !phase.is_finite() {
                return Err(SyncNetError::NumericDivergence { time: t, index });
            }
            next.push(phase);
        }

        for (oscillator, phase) in self.oscillators.iter_mut().zip(next) {
            oscillator.phase = phase;
        }
        Ok(())
    }
}
